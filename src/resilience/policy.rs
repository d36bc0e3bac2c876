//! Failure policies for user lookups.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a lookup does when the user service cannot produce a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Report "no name" and carry on.
    ReturnNone,
    /// Substitute the fallback name.
    Fallback,
    /// Hand the error to the caller.
    Propagate,
    /// Try again a fixed number of times, then substitute the fallback name.
    #[default]
    Retry,
}

impl FailurePolicy {
    pub const ALL: [FailurePolicy; 4] = [
        FailurePolicy::ReturnNone,
        FailurePolicy::Fallback,
        FailurePolicy::Propagate,
        FailurePolicy::Retry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::ReturnNone => "return_none",
            FailurePolicy::Fallback => "fallback",
            FailurePolicy::Propagate => "propagate",
            FailurePolicy::Retry => "retry",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FailurePolicy::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown failure policy '{}' (expected one of: return_none, fallback, propagate, retry)",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for policy in FailurePolicy::ALL {
            assert_eq!(policy.as_str().parse::<FailurePolicy>().unwrap(), policy);
        }
        assert!("Retry".parse::<FailurePolicy>().is_err());
    }

    #[test]
    fn test_default_is_retry() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Retry);
        assert_eq!(FailurePolicy::default().to_string(), "retry");
    }
}
