use thiserror::Error;

use crate::generator::GeneratorError;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("task is required")]
    EmptyTask,

    #[error("edit instruction is required")]
    EmptyInstruction,

    #[error("steps must not be empty")]
    EmptySteps,

    #[error("invalid plan index {index}: store holds {len} plan(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot edit confirmed plan: {0}")]
    PlanConfirmed(String),

    #[error("plan no longer exists: {0}")]
    PlanMissing(String),

    #[error("no plan has been finalized yet")]
    NoFinalPlan,

    #[error("generator failure: {0}")]
    Generator(#[from] GeneratorError),
}

pub type Result<T> = std::result::Result<T, PlanError>;
