// Experiment Runner Module

pub mod scenario;
pub mod stats;

// Re-export commonly used types
pub use scenario::ScenarioFile;
pub use stats::ExperimentSummary;
