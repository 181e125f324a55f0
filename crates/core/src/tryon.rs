//! Virtual try-on job rules: segmentation types, job status, poll budget.
//!
//! A try-on job is submitted to the provider once and never resubmitted;
//! only the *status poll* retries. The job row moves `processing ->
//! {completed, failed}` exactly once.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Interval between provider status polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Maximum number of status polls before the job is declared failed
/// (with [`POLL_INTERVAL`], roughly a 60-second ceiling).
pub const MAX_POLL_ATTEMPTS: u32 = 20;

/// Which part of the outfit the provider should replace.
///
/// Closed set; the wire/database representation is the numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum SegmentationType {
    UpperBody,
    LowerBody,
    FullBody,
}

impl SegmentationType {
    pub fn code(self) -> i16 {
        match self {
            SegmentationType::UpperBody => 0,
            SegmentationType::LowerBody => 1,
            SegmentationType::FullBody => 2,
        }
    }
}

impl From<SegmentationType> for i16 {
    fn from(s: SegmentationType) -> i16 {
        s.code()
    }
}

impl TryFrom<i16> for SegmentationType {
    type Error = CoreError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(SegmentationType::UpperBody),
            1 => Ok(SegmentationType::LowerBody),
            2 => Ok(SegmentationType::FullBody),
            other => Err(CoreError::Validation(format!(
                "Unknown segmentation type {other}; expected 0 (upper), 1 (lower) or 2 (full)"
            ))),
        }
    }
}

/// Persisted status of a try-on job. Stored as lowercase TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TryOnStatus {
    Processing,
    Completed,
    Failed,
}

impl TryOnStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TryOnStatus::Processing => "processing",
            TryOnStatus::Completed => "completed",
            TryOnStatus::Failed => "failed",
        }
    }

    /// `completed` and `failed` permit no further update.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TryOnStatus::Processing)
    }
}

impl std::fmt::Display for TryOnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TryOnStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(TryOnStatus::Processing),
            "completed" => Ok(TryOnStatus::Completed),
            "failed" => Ok(TryOnStatus::Failed),
            other => Err(CoreError::Validation(format!(
                "Unknown try-on status '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for TryOnStatus {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn segmentation_codes_are_closed() {
        assert_eq!(
            SegmentationType::try_from(0).unwrap(),
            SegmentationType::UpperBody
        );
        assert_eq!(
            SegmentationType::try_from(1).unwrap(),
            SegmentationType::LowerBody
        );
        assert_eq!(
            SegmentationType::try_from(2).unwrap(),
            SegmentationType::FullBody
        );
        assert_matches!(SegmentationType::try_from(3), Err(CoreError::Validation(_)));
        assert_matches!(
            SegmentationType::try_from(-1),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn only_processing_is_non_terminal() {
        assert!(!TryOnStatus::Processing.is_terminal());
        assert!(TryOnStatus::Completed.is_terminal());
        assert!(TryOnStatus::Failed.is_terminal());
    }

    #[test]
    fn poll_budget_is_about_a_minute() {
        let ceiling = POLL_INTERVAL * MAX_POLL_ATTEMPTS;
        assert_eq!(ceiling, Duration::from_secs(60));
    }
}
