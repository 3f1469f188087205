//! Sortable columns.
//!
//! Server sort keys are lower-case. Descending order is requested with a
//! leading `-` (`-name`).

use std::fmt;

/// A selectable sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField {
    pub id: &'static str,
    pub label: &'static str,
}

/// Current sort: a field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: &'static str,
    pub descending: bool,
}

impl SortOrder {
    pub fn ascending(field: &'static str) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn descending(field: &'static str) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    /// Resolve a user supplied field id against the declared fields.
    ///
    /// The id is lower-cased first; a leading `-` selects descending order.
    pub fn resolve(fields: &[SortField], id: &str) -> Option<Self> {
        let id = id.trim().to_lowercase();
        let (descending, key) = match id.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, id.as_str()),
        };
        fields.iter().find(|f| f.id == key).map(|f| Self {
            field: f.id,
            descending,
        })
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            f.write_str(self.field)
        }
    }
}

macro_rules! define_sort_fields {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => ($id:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn field(self) -> SortField {
                match self {
                    $( Self::$variant => SortField { id: $id, label: $label } ),+
                }
            }

            /// All fields in declaration order; the first is the default sort.
            pub fn fields() -> Vec<SortField> {
                Self::ALL.iter().map(|f| f.field()).collect()
            }
        }
    };
}

define_sort_fields! {
    CentreSortField {
        Name => ("name", "Name"),
        State => ("state", "State"),
    }
}

define_sort_fields! {
    StudySortField {
        Name => ("name", "Name"),
        State => ("state", "State"),
    }
}

define_sort_fields! {
    UserSortField {
        Name => ("name", "Name"),
        Email => ("email", "Email"),
        State => ("state", "State"),
    }
}

define_sort_fields! {
    ShipmentSortField {
        CourierName => ("couriername", "Courier"),
        TrackingNumber => ("trackingnumber", "Tracking Number"),
        TimePacked => ("timepacked", "Time Packed"),
        State => ("state", "State"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_lowercases_the_id() {
        let fields = ShipmentSortField::fields();
        let order = SortOrder::resolve(&fields, "CourierName").unwrap();
        assert_eq!(order, SortOrder::ascending("couriername"));
    }

    #[test]
    fn leading_minus_selects_descending() {
        let order = SortOrder::resolve(&CentreSortField::fields(), "-Name").unwrap();
        assert!(order.descending);
        assert_eq!(order.to_string(), "-name");
    }

    #[test]
    fn unknown_field_does_not_resolve() {
        assert!(SortOrder::resolve(&StudySortField::fields(), "email").is_none());
    }

    #[test]
    fn first_field_is_default() {
        assert_eq!(UserSortField::fields()[0].id, "name");
    }
}
