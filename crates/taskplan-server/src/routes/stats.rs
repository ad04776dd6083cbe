use axum::extract::State;
use axum::Json;

use crate::state::AppState;
use taskplan_core::PlanStats;

/// GET /api/stats — store-wide counters. Pure read, no side effects.
pub async fn get_stats(State(app): State<AppState>) -> Json<PlanStats> {
    Json(app.board.stats().await)
}
