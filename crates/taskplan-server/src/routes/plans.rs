use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use taskplan_core::Plan;

#[derive(serde::Deserialize)]
pub struct CreatePlanBody {
    /// Missing or blank task is rejected as a validation error.
    #[serde(default)]
    pub task: String,
}

/// POST /api/plans — generate a new draft plan from a task description.
pub async fn create_plan(
    State(app): State<AppState>,
    Json(body): Json<CreatePlanBody>,
) -> Result<Json<Plan>, AppError> {
    let plan = app.board.create(&body.task).await?;
    Ok(Json(plan))
}

/// GET /api/plans — full plan history, oldest first.
pub async fn list_plans(State(app): State<AppState>) -> Json<serde_json::Value> {
    let history = app.board.history().await;
    Json(serde_json::json!({ "history": history }))
}

#[derive(serde::Deserialize)]
pub struct EditPlanBody {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub steps: Option<Vec<String>>,
}

/// PUT /api/plans/:index — manual partial update of a draft plan.
pub async fn edit_plan(
    State(app): State<AppState>,
    Path(index): Path<usize>,
    Json(body): Json<EditPlanBody>,
) -> Result<Json<Plan>, AppError> {
    let plan = app.board.edit_by_index(index, body.task, body.steps).await?;
    Ok(Json(plan))
}

#[derive(serde::Deserialize)]
pub struct RefinePlanBody {
    #[serde(default)]
    pub instruction: String,
}

/// POST /api/plans/:index/refine — AI-assisted revision.
pub async fn refine_plan(
    State(app): State<AppState>,
    Path(index): Path<usize>,
    Json(body): Json<RefinePlanBody>,
) -> Result<Json<Plan>, AppError> {
    let plan = app.board.refine(index, &body.instruction).await?;
    Ok(Json(plan))
}

/// POST /api/plans/:index/confirm — lock a plan and designate it final.
pub async fn confirm_plan(
    State(app): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Plan>, AppError> {
    let plan = app.board.confirm(index).await?;
    Ok(Json(plan))
}

/// POST /api/plans/:index/accept — designate a plan final, confirming it.
pub async fn accept_plan(
    State(app): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<serde_json::Value>, AppError> {
    let plan = app.board.accept(index).await?;
    Ok(Json(serde_json::json!({ "plan": &plan, "final": &plan })))
}

/// DELETE /api/plans/:index — remove a plan; later indices shift down.
pub async fn delete_plan(
    State(app): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Plan>, AppError> {
    let plan = app.board.remove(index).await?;
    Ok(Json(plan))
}

/// GET /api/plans/final — the finalized plan, if any.
pub async fn final_plan(State(app): State<AppState>) -> Result<Json<Plan>, AppError> {
    let plan = app.board.final_plan().await?;
    Ok(Json(plan))
}
