//! Strongly-typed identifiers for planner records
//!
//! Each record kind gets its own newtype so a loan id can never be handed to
//! a bill operation by accident.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from its full UUID form, with or without the display prefix
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// True when `s` is this id's short display form or a prefix of its UUID
            pub fn matches_short(&self, s: &str) -> bool {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                !s.is_empty() && self.0.to_string().starts_with(s)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id!(BillId, "bill-");
define_id!(OneTimeBillId, "once-");
define_id!(AssetId, "loan-");
define_id!(DebtId, "debt-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = BillId::new();
        let display = id.to_string();
        assert!(display.starts_with("bill-"));
        assert_eq!(display.len(), 13);
    }

    #[test]
    fn test_parse_with_prefix() {
        let raw = "550e8400-e29b-41d4-a716-446655440000";
        let plain = DebtId::parse(raw).unwrap();
        let prefixed: DebtId = format!("debt-{}", raw).parse().unwrap();
        assert_eq!(plain, prefixed);
    }

    #[test]
    fn test_matches_short() {
        let id = AssetId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(id.matches_short("loan-550e8400"));
        assert!(id.matches_short("550e"));
        assert!(!id.matches_short("loan-"));
        assert!(!id.matches_short("deadbeef"));
    }

    #[test]
    fn test_id_serialization() {
        let id = OneTimeBillId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: OneTimeBillId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
