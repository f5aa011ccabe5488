//! Mental model lifecycle status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reading status of a mental model.
///
/// Transitions are unrestricted in both directions. Action plans are only
/// reachable while the status is `Completed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentalModelStatus {
    #[default]
    Reading,
    Completed,
}

impl MentalModelStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reading => "reading",
            Self::Completed => "completed",
        }
    }

    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for MentalModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mental model status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for MentalModelStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reading" => Ok(Self::Reading),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}
