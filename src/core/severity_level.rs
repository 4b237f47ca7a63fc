//! Severity level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Importance of a log event.
///
/// Levels are totally ordered by their ordinal. `Minimum` and `Maximum` are
/// sentinels for filtering configuration only: a gate set to `Minimum`
/// accepts everything, a gate set to `Maximum` accepts nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum SeverityLevel {
    Minimum = 0,
    Verbose = 1,
    Debug = 2,
    #[default]
    Information = 3,
    Warning = 4,
    Error = 5,
    Fatal = 6,
    Maximum = 7,
}

impl SeverityLevel {
    /// Every level an event can actually carry, lowest first.
    pub const REAL_LEVELS: [SeverityLevel; 6] = [
        SeverityLevel::Verbose,
        SeverityLevel::Debug,
        SeverityLevel::Information,
        SeverityLevel::Warning,
        SeverityLevel::Error,
        SeverityLevel::Fatal,
    ];

    /// Returns true when an event at `self` passes a gate set to `minimum`.
    #[inline]
    pub fn is_enabled(self, minimum: SeverityLevel) -> bool {
        self >= minimum
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            SeverityLevel::Minimum => "MIN",
            SeverityLevel::Verbose => "VERBOSE",
            SeverityLevel::Debug => "DEBUG",
            SeverityLevel::Information => "INFO",
            SeverityLevel::Warning => "WARN",
            SeverityLevel::Error => "ERROR",
            SeverityLevel::Fatal => "FATAL",
            SeverityLevel::Maximum => "MAX",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            SeverityLevel::Minimum | SeverityLevel::Verbose => BrightBlack,
            SeverityLevel::Debug => Blue,
            SeverityLevel::Information => Green,
            SeverityLevel::Warning => Yellow,
            SeverityLevel::Error => Red,
            SeverityLevel::Fatal | SeverityLevel::Maximum => BrightRed,
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for SeverityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MIN" | "MINIMUM" => Ok(SeverityLevel::Minimum),
            "VERBOSE" | "TRACE" => Ok(SeverityLevel::Verbose),
            "DEBUG" => Ok(SeverityLevel::Debug),
            "INFO" | "INFORMATION" => Ok(SeverityLevel::Information),
            "WARN" | "WARNING" => Ok(SeverityLevel::Warning),
            "ERROR" => Ok(SeverityLevel::Error),
            "FATAL" => Ok(SeverityLevel::Fatal),
            "MAX" | "MAXIMUM" | "OFF" => Ok(SeverityLevel::Maximum),
            _ => Err(format!("Invalid severity level: '{}'", s)),
        }
    }
}
