pub mod mc_engine;

pub use mc_engine::{simulate_scenarios, McScenarioConfig, ScenarioDistribution};
