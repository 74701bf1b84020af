//! Conference kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// What the provider should set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConferenceKind {
    /// Interactive video meeting.
    #[default]
    Conference,
    /// Meeting with a public live stream attached.
    Broadcast,
}

impl ConferenceKind {
    /// Stable lowercase name, also used as the stored column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConferenceKind::Conference => "conference",
            ConferenceKind::Broadcast => "broadcast",
        }
    }

    pub fn is_broadcast(&self) -> bool {
        matches!(self, ConferenceKind::Broadcast)
    }
}

impl fmt::Display for ConferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConferenceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conference" => Ok(ConferenceKind::Conference),
            "broadcast" => Ok(ConferenceKind::Broadcast),
            _ => Err(ValidationError::invalid_format(
                "kind",
                "expected 'conference' or 'broadcast'",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_both_kinds() {
        assert_eq!("conference".parse::<ConferenceKind>().unwrap(), ConferenceKind::Conference);
        assert_eq!("broadcast".parse::<ConferenceKind>().unwrap(), ConferenceKind::Broadcast);
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Conference".parse::<ConferenceKind>().is_err());
        assert!("BROADCAST".parse::<ConferenceKind>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&ConferenceKind::Broadcast).unwrap();
        assert_eq!(json, "\"broadcast\"");
    }

    proptest! {
        #[test]
        fn anything_outside_the_two_values_is_rejected(s in "\\PC*") {
            prop_assume!(s != "conference" && s != "broadcast");
            let err = s.parse::<ConferenceKind>().unwrap_err();
            prop_assert_eq!(err.field(), "kind");
        }
    }
}
