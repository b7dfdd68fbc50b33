//! Configuration: where files live and the user's planner settings

pub mod paths;
pub mod settings;

pub use paths::PlannerPaths;
pub use settings::Settings;
