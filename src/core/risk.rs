use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallRisk {
    Low,
    High,
}

impl OverallRisk {
    pub const fn as_str(self) -> &'static str {
        match self {
            OverallRisk::Low => "low",
            OverallRisk::High => "high",
        }
    }
}

impl fmt::Display for OverallRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
