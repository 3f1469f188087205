//! Entity lifecycle states.
//!
//! Every state-machine entity declares its states through
//! [`define_state_enum!`], which ties the wire string, the list icon and the
//! parse error together so no caller compares raw state strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::EntityKind;

macro_rules! define_state_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:expr) {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal => $icon:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $val)] $variant ),+
        }

        impl $name {
            /// Every declared state, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire representation of this state.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $val ),+
                }
            }

            /// Icon identifier shown next to an entity in this state.
            pub fn icon(self) -> &'static str {
                match self {
                    $( Self::$variant => $icon ),+
                }
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $val => Ok(Self::$variant), )+
                    _ => Err(CoreError::InvalidState {
                        kind: $kind,
                        state: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_state_enum! {
    /// Centre lifecycle: a centre toggles between disabled and enabled.
    CentreState (EntityKind::Centre) {
        Disabled = "disabled" => "glyphicon-cog",
        Enabled = "enabled" => "glyphicon-ok-circle",
    }
}

define_state_enum! {
    /// Study lifecycle.
    StudyState (EntityKind::Study) {
        Disabled = "disabled" => "glyphicon-cog",
        Enabled = "enabled" => "glyphicon-ok-circle",
        Retired = "retired" => "glyphicon-remove-sign",
    }
}

define_state_enum! {
    /// User account lifecycle.
    UserState (EntityKind::User) {
        Registered = "registered" => "glyphicon-cog",
        Active = "active" => "glyphicon-user",
        Locked = "locked" => "glyphicon-lock",
    }
}

define_state_enum! {
    /// Shipment lifecycle. `Lost` is terminal.
    ShipmentState (EntityKind::Shipment) {
        Created = "created" => "glyphicon-edit",
        Packed = "packed" => "glyphicon-gift",
        Sent = "sent" => "glyphicon-send",
        Received = "received" => "glyphicon-inbox",
        Unpacked = "unpacked" => "glyphicon-folder-open",
        Completed = "completed" => "glyphicon-ok-sign",
        Lost = "lost" => "glyphicon-question-sign",
    }
}

/// Resolve the list icon for a raw state string of the given entity kind.
///
/// Fails with [`CoreError::InvalidState`] for any value outside the kind's
/// declared states, and for kinds that carry no state at all.
pub fn icon_for_state(kind: EntityKind, state: &str) -> Result<&'static str, CoreError> {
    match kind {
        EntityKind::Centre => state.parse::<CentreState>().map(CentreState::icon),
        EntityKind::Study => state.parse::<StudyState>().map(StudyState::icon),
        EntityKind::User => state.parse::<UserState>().map(UserState::icon),
        EntityKind::Shipment => state.parse::<ShipmentState>().map(ShipmentState::icon),
        _ => Err(CoreError::InvalidState {
            kind,
            state: state.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_every_state_has_icon(kind: EntityKind, states: &[&str]) {
        for state in states {
            let icon = icon_for_state(kind, state)
                .unwrap_or_else(|e| panic!("{kind} state '{state}' should have an icon: {e}"));
            assert!(!icon.is_empty());
        }
    }

    #[test]
    fn every_declared_state_has_an_icon() {
        let centre: Vec<_> = CentreState::ALL.iter().map(|s| s.as_str()).collect();
        let study: Vec<_> = StudyState::ALL.iter().map(|s| s.as_str()).collect();
        let user: Vec<_> = UserState::ALL.iter().map(|s| s.as_str()).collect();
        let shipment: Vec<_> = ShipmentState::ALL.iter().map(|s| s.as_str()).collect();

        assert_every_state_has_icon(EntityKind::Centre, &centre);
        assert_every_state_has_icon(EntityKind::Study, &study);
        assert_every_state_has_icon(EntityKind::User, &user);
        assert_every_state_has_icon(EntityKind::Shipment, &shipment);
    }

    #[test]
    fn invalid_state_names_the_kind() {
        for kind in [
            EntityKind::Centre,
            EntityKind::Study,
            EntityKind::User,
            EntityKind::Shipment,
        ] {
            let err = icon_for_state(kind, "xxx").unwrap_err();
            assert!(
                err.to_string().contains(&format!("invalid {kind} state")),
                "unexpected message: {err}"
            );
        }
    }

    #[test]
    fn stateless_kind_has_no_icons() {
        assert!(icon_for_state(EntityKind::Membership, "enabled").is_err());
    }

    #[test]
    fn state_serializes_as_lowercase_string() {
        let json = serde_json::to_string(&ShipmentState::Unpacked).unwrap();
        assert_eq!(json, "\"unpacked\"");
        let parsed: StudyState = serde_json::from_str("\"retired\"").unwrap();
        assert_eq!(parsed, StudyState::Retired);
    }

    #[test]
    fn parse_round_trips_display() {
        for state in UserState::ALL {
            assert_eq!(state.to_string().parse::<UserState>().unwrap(), *state);
        }
    }
}
