use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of physical change a user proposes at a location.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionType {
    Tree,
    Roof,
    Water,
    Building,
}

impl InterventionType {
    pub const ALL: [InterventionType; 4] = [
        InterventionType::Tree,
        InterventionType::Roof,
        InterventionType::Water,
        InterventionType::Building,
    ];

    /// Wire name, as sent in the `type` field of a prediction request.
    pub fn as_str(self) -> &'static str {
        match self {
            InterventionType::Tree => "tree",
            InterventionType::Roof => "roof",
            InterventionType::Water => "water",
            InterventionType::Building => "building",
        }
    }

    /// Human-facing name used on the tool buttons.
    pub fn title(self) -> &'static str {
        match self {
            InterventionType::Tree => "Tree Area",
            InterventionType::Roof => "Green Roof",
            InterventionType::Water => "Water Body",
            InterventionType::Building => "Building Block",
        }
    }
}

impl fmt::Display for InterventionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intervention type '{0}' (expected tree, roof, water or building)")]
pub struct ParseInterventionError(pub String);

impl FromStr for InterventionType {
    type Err = ParseInterventionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        InterventionType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseInterventionError(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::InterventionType;

    #[test]
    fn parses_wire_names_case_insensitively() {
        assert_eq!("tree".parse(), Ok(InterventionType::Tree));
        assert_eq!(" Water ".parse(), Ok(InterventionType::Water));
        assert!("lawn".parse::<InterventionType>().is_err());
    }

    #[test]
    fn serializes_as_lowercase_string() {
        let json = serde_json::to_string(&InterventionType::Building).expect("json");
        assert_eq!(json, "\"building\"");
        for t in InterventionType::ALL {
            assert_eq!(t.to_string(), t.as_str());
        }
    }
}
