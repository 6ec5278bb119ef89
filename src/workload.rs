use rand::prelude::*;
use serde::Deserialize;

use crate::core::Ticks;
use crate::sim::Process;

/// Parameters for a seeded random workload named `P1..Pn`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomWorkload {
    pub count: usize,
    pub seed: u64,
    /// Arrivals are drawn from `0..=max_arrival`.
    pub max_arrival: Ticks,
    /// Bursts are drawn from `1..=max_burst`.
    pub max_burst: Ticks,
}

impl Default for RandomWorkload {
    fn default() -> Self {
        Self {
            count: 5,
            seed: 0,
            max_arrival: 5,
            max_burst: 10,
        }
    }
}

impl RandomWorkload {
    pub fn generate(&self) -> Vec<Process> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let max_burst = self.max_burst.max(1);

        (1..=self.count)
            .map(|n| {
                let arrival = rng.random_range(0..=self.max_arrival);
                let burst = rng.random_range(1..=max_burst);
                Process::new(format!("P{n}"), arrival, burst)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_workload() {
        let spec = RandomWorkload {
            count: 8,
            seed: 42,
            ..Default::default()
        };
        assert_eq!(spec.generate(), spec.generate());
    }

    #[test]
    fn values_stay_in_range() {
        let spec = RandomWorkload {
            count: 200,
            seed: 7,
            max_arrival: 3,
            max_burst: 4,
        };
        let procs = spec.generate();
        assert_eq!(procs.len(), 200);
        assert_eq!(procs[0].id, "P1");
        assert!(procs.iter().all(|p| p.arrival <= 3 && (1..=4).contains(&p.burst)));
    }

    #[test]
    fn zero_max_burst_still_yields_runnable_processes() {
        let spec = RandomWorkload {
            count: 3,
            max_burst: 0,
            ..Default::default()
        };
        assert!(spec.generate().iter().all(|p| p.burst == 1));
    }
}
