use serde::Serialize;

use crate::core::state::Ticks;
use crate::error::InvalidInput;

pub type ProcessId = String;

/// A unit of CPU demand known before the run starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Process {
    pub id: ProcessId,
    pub arrival: Ticks,
    pub burst: Ticks,
}

impl Process {
    pub fn new(id: impl Into<ProcessId>, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            id: id.into(),
            arrival,
            burst,
        }
    }

    /// Builds a process from signed fields, rejecting negative arrivals and
    /// non-positive bursts.
    pub fn from_raw(id: impl Into<ProcessId>, arrival: i64, burst: i64) -> Result<Self, InvalidInput> {
        let id = id.into();
        let Ok(arrival) = Ticks::try_from(arrival) else {
            return Err(InvalidInput::NegativeArrival { id, arrival });
        };
        if burst <= 0 {
            return Err(InvalidInput::NonPositiveBurst { id, burst });
        }
        Ok(Self::new(id, arrival, burst as Ticks))
    }

    /// Builds a process from text fields as typed by a user.
    pub fn parse(id: impl Into<ProcessId>, arrival: &str, burst: &str) -> Result<Self, InvalidInput> {
        let id = id.into();
        let arrival = parse_field(&id, "arrival", arrival)?;
        let burst = parse_field(&id, "burst", burst)?;
        Self::from_raw(id, arrival, burst)
    }
}

fn parse_field(id: &str, field: &'static str, raw: &str) -> Result<i64, InvalidInput> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(InvalidInput::MissingField {
            id: id.to_owned(),
            field,
        });
    }
    raw.parse().map_err(|_| InvalidInput::MalformedField {
        id: id.to_owned(),
        field,
        value: raw.to_owned(),
    })
}

/// Per-process timing row of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    pub process: Process,
    pub completion: Ticks,
    pub turnaround: Ticks,
    pub waiting: Ticks,
    pub response: Ticks,
}
