//! Input rejection.
//!
//! Every check runs before any simulation work starts, so a caller either gets
//! a complete result or one of these and no partial state. Degenerate metric
//! inputs (zero elapsed time, zero burst) are not errors; see
//! [`crate::metrics::analyze`].

/// Why a workload or quantum was rejected.
///
/// Variants tied to one process carry its id so the caller can point at the
/// offending row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidInput {
    #[error("time quantum must be a positive integer, got {quantum}")]
    NonPositiveQuantum { quantum: i64 },

    #[error("no processes to schedule")]
    EmptyWorkload,

    #[error("invalid burst time for {id}: must be > 0, got {burst}")]
    NonPositiveBurst { id: String, burst: i64 },

    #[error("invalid arrival time for {id}: must be >= 0, got {arrival}")]
    NegativeArrival { id: String, arrival: i64 },

    #[error("duplicate process id {id}")]
    DuplicateId { id: String },

    #[error("schedule for {id} runs past the largest representable time")]
    ClockOverflow { id: String },

    #[error("{field} time missing for process {id}")]
    MissingField { id: String, field: &'static str },

    #[error("{field} time for process {id} is not an integer: {value:?}")]
    MalformedField {
        id: String,
        field: &'static str,
        value: String,
    },
}

impl InvalidInput {
    /// The process this error is about, if any.
    pub fn process_id(&self) -> Option<&str> {
        match self {
            Self::NonPositiveQuantum { .. } | Self::EmptyWorkload => None,
            Self::NonPositiveBurst { id, .. }
            | Self::NegativeArrival { id, .. }
            | Self::DuplicateId { id }
            | Self::ClockOverflow { id }
            | Self::MissingField { id, .. }
            | Self::MalformedField { id, .. } => Some(id),
        }
    }
}

/// Checks a signed quantum and narrows it to ticks.
pub fn validate_quantum(quantum: i64) -> Result<u64, InvalidInput> {
    u64::try_from(quantum)
        .ok()
        .filter(|&q| q > 0)
        .ok_or(InvalidInput::NonPositiveQuantum { quantum })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantum_must_be_positive() {
        assert_eq!(validate_quantum(3), Ok(3));
        assert_eq!(
            validate_quantum(0),
            Err(InvalidInput::NonPositiveQuantum { quantum: 0 })
        );
        assert_eq!(
            validate_quantum(-2),
            Err(InvalidInput::NonPositiveQuantum { quantum: -2 })
        );
    }

    #[test]
    fn messages_name_the_process() {
        let err = InvalidInput::NonPositiveBurst {
            id: "P3".into(),
            burst: 0,
        };
        assert_eq!(err.process_id(), Some("P3"));
        assert_eq!(err.to_string(), "invalid burst time for P3: must be > 0, got 0");
        assert_eq!(
            InvalidInput::ClockOverflow { id: "P9".into() }.process_id(),
            Some("P9")
        );
        assert_eq!(InvalidInput::EmptyWorkload.process_id(), None);
    }
}
