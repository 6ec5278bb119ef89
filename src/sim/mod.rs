pub mod driver;
pub mod job;
pub mod result;

pub use driver::{Sim, simulate};
pub use job::{Process, ProcessId, ProcessStats};
pub use result::SimulationResult;
