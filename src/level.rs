//! Severity levels shared by the filter, the embed builder and the adapters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

/// Returned when a level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level '{0}'")]
pub struct ParseLevelError(pub String);

impl Level {
    /// Every level in ascending order of severity.
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Critical,
    ];

    /// The least severe level. An unset minimum filters against this.
    pub const LOWEST: Level = Level::Trace;

    /// Canonical upper-case name, also used as the colour table key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("debug", Level::Debug)]
    #[case("WARNING", Level::Warn)]
    #[case(" error ", Level::Error)]
    #[case("Critical", Level::Critical)]
    fn parses_names_case_insensitively(#[case] input: &str, #[case] expected: Level) {
        assert_eq!(input.parse::<Level>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_names() {
        let err = "verbose".parse::<Level>().expect_err("unknown level");
        assert_eq!(err.to_string(), "unknown log level 'verbose'");
    }

    #[rstest]
    fn all_is_sorted_and_starts_at_lowest() {
        assert_eq!(Level::ALL[0], Level::LOWEST);
        assert!(Level::ALL.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[rstest]
    fn display_round_trips_through_from_str() {
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>(), Ok(level));
        }
    }

    #[rstest]
    fn serialises_as_upper_case_name() {
        let json = serde_json::to_string(&Level::Warn).expect("serialise");
        assert_eq!(json, "\"WARN\"");
    }
}
