use std::sync::Arc;

use taskplan_core::PlanBoard;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<PlanBoard>,
}

impl AppState {
    pub fn new(board: PlanBoard) -> Self {
        Self {
            board: Arc::new(board),
        }
    }
}
