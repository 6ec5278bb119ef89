//! Run configuration loaded from TOML.
//!
//! ```toml
//! quantum = 2
//! sweep = true
//! compare = [2, 4]
//!
//! [[process]]
//! id = "P1"
//! arrival = 0
//! burst = 5
//!
//! # used only when no [[process]] entries are given
//! [random]
//! count = 5
//! seed = 7
//! ```

use std::{fs, path::Path};

use serde::Deserialize;

use crate::core::Ticks;
use crate::error::{InvalidInput, validate_quantum};
use crate::sim::Process;
use crate::workload::RandomWorkload;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Input(#[from] InvalidInput),
}

/// A process row as written in the config. Fields are signed so negative
/// values reach validation instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawProcess {
    pub id: String,
    pub arrival: i64,
    pub burst: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub quantum: i64,
    pub sweep: bool,
    pub compare: Option<[i64; 2]>,
    #[serde(rename = "process")]
    pub processes: Vec<RawProcess>,
    pub random: Option<RandomWorkload>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            quantum: 2,
            sweep: false,
            compare: None,
            processes: Vec::new(),
            random: None,
        }
    }
}

impl RunConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn quantum(&self) -> Result<Ticks, InvalidInput> {
        validate_quantum(self.quantum)
    }

    pub fn compare_quanta(&self) -> Result<Option<(Ticks, Ticks)>, InvalidInput> {
        self.compare
            .map(|[q1, q2]| Ok((validate_quantum(q1)?, validate_quantum(q2)?)))
            .transpose()
    }

    /// Explicit processes win; otherwise the random workload, if any.
    pub fn workload(&self) -> Result<Vec<Process>, InvalidInput> {
        if !self.processes.is_empty() {
            return self
                .processes
                .iter()
                .map(|raw| Process::from_raw(raw.id.clone(), raw.arrival, raw.burst))
                .collect();
        }
        Ok(self
            .random
            .as_ref()
            .map(RandomWorkload::generate)
            .unwrap_or_default())
    }
}
