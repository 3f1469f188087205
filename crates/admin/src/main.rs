//! # biobank-admin
//!
//! Lists centres, studies, users or a centre's shipments through the paged
//! list engine.
//!
//! ```bash
//! biobank-admin centres --state disabled --sort name
//! biobank-admin users --email example.org --page 2
//! biobank-admin shipments <centre-id> --sort -couriername
//! ```

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biobank_admin::list::{ListConfig, ListSource, Navigation, PagedListController};
use biobank_admin::sources::{
    CentreListSource, ShipmentListSource, StudyListSource, UserListSource,
};
use biobank_client::{BiobankClient, ClientConfig};
use biobank_core::centre::Centre;
use biobank_core::filter::FilterName;
use biobank_core::paging::DisplayState;
use biobank_core::shipment::Shipment;
use biobank_core::study::Study;
use biobank_core::user::User;

#[derive(Parser)]
#[command(name = "biobank-admin")]
#[command(about = "Browse biobank entities page by page", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    kind: Kind,

    #[command(flatten)]
    query: Query,
}

#[derive(Subcommand)]
enum Kind {
    Centres,
    Studies,
    Users,
    /// Shipments sent from or to a centre
    Shipments {
        centre_id: String,
    },
}

#[derive(Args)]
struct Query {
    /// Substring match on the name
    #[arg(long, global = true)]
    name: Option<String>,

    /// Exact state match (`all` for every state)
    #[arg(long, global = true)]
    state: Option<String>,

    /// Substring match on the email (users only)
    #[arg(long, global = true)]
    email: Option<String>,

    /// Sort field, prefix with `-` for descending
    #[arg(long, global = true, allow_hyphen_values = true)]
    sort: Option<String>,

    /// 1-based page number
    #[arg(long, global = true, default_value_t = 1)]
    page: u32,

    /// Items per page (defaults to BIOBANK_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<u32>,
}

impl Query {
    fn apply(&self, mut config: ListConfig) -> anyhow::Result<ListConfig> {
        let presets = [
            (FilterName::Name, &self.name),
            (FilterName::State, &self.state),
            (FilterName::Email, &self.email),
        ];
        for (name, value) in presets {
            if let Some(value) = value {
                config = config.with_filter_value(name, value.as_str())?;
            }
        }
        if let Some(sort) = &self.sort {
            config = config.with_sort(sort)?;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "biobank_admin=info,biobank_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // --- Configuration ---
    let config = ClientConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, "Loaded client configuration");

    let client = BiobankClient::from_config(&config)?;
    let page_size = cli.query.page_size.unwrap_or(config.page_size);

    match cli.kind {
        Kind::Centres => {
            let list_config = cli.query.apply(CentreListSource::default_config(page_size))?;
            show(CentreListSource::new(client), list_config, cli.query.page, |c: &Centre| {
                format!("{}  {}", c.name, c.state)
            })
            .await
        }
        Kind::Studies => {
            let list_config = cli.query.apply(StudyListSource::default_config(page_size))?;
            show(StudyListSource::new(client), list_config, cli.query.page, |s: &Study| {
                format!("{}  {}", s.name, s.state)
            })
            .await
        }
        Kind::Users => {
            let list_config = cli.query.apply(UserListSource::default_config(page_size))?;
            show(UserListSource::new(client), list_config, cli.query.page, |u: &User| {
                format!("{} <{}>  {}", u.name, u.email, u.state)
            })
            .await
        }
        Kind::Shipments { centre_id } => {
            let list_config = cli.query.apply(ShipmentListSource::default_config(page_size))?;
            show(
                ShipmentListSource::new(client, centre_id),
                list_config,
                cli.query.page,
                |s: &Shipment| format!("{} {}  {}", s.courier_name, s.tracking_number, s.state),
            )
            .await
        }
    }
}

async fn show<S>(
    source: S,
    config: ListConfig,
    page: u32,
    describe: impl Fn(&S::Item) -> String,
) -> anyhow::Result<()>
where
    S: ListSource,
{
    let mut list = PagedListController::new(source, config);
    list.load().await;
    if page != 1 {
        list.page_changed(page).await;
    }

    if list.take_navigation() == Some(Navigation::Login) {
        anyhow::bail!("not authorised: set BIOBANK_API_TOKEN and log in again");
    }

    match list.display_state() {
        DisplayState::NoEntities => println!("No entities have been added yet."),
        DisplayState::NoResults => println!("No entities match the current filters."),
        DisplayState::HaveResults => {
            for entry in list.items() {
                println!("[{}] {}", entry.icon, describe(&entry.item));
            }
            println!(
                "page {} ({} per page), {} of {} matching",
                list.page(),
                list.limit(),
                list.items().len(),
                list.total_count()
            );
        }
    }
    Ok(())
}
