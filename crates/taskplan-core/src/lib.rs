pub mod board;
pub mod error;
pub mod generator;
pub mod parser;
pub mod plan;

pub use board::PlanBoard;
pub use error::{PlanError, Result};
pub use generator::{DraftResult, GeneratorError, StepSource};
pub use plan::{fallback_steps, Plan, PlanState, PlanStats};
