use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use taskplan_core::PlanError;

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<PlanError>() {
            match e {
                PlanError::EmptyTask
                | PlanError::EmptyInstruction
                | PlanError::EmptySteps
                | PlanError::IndexOutOfRange { .. }
                | PlanError::PlanConfirmed(_) => StatusCode::BAD_REQUEST,
                PlanError::PlanMissing(_) | PlanError::NoFinalPlan => StatusCode::NOT_FOUND,
                PlanError::Generator(_) => StatusCode::BAD_GATEWAY,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskplan_core::GeneratorError;

    #[test]
    fn empty_task_maps_to_400() {
        let response = AppError(PlanError::EmptyTask.into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn out_of_range_maps_to_400() {
        let err = AppError(PlanError::IndexOutOfRange { index: 9, len: 1 }.into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn confirmed_conflict_maps_to_400() {
        let err = AppError(PlanError::PlanConfirmed("abc".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn no_final_plan_maps_to_404() {
        let err = AppError(PlanError::NoFinalPlan.into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn plan_missing_maps_to_404() {
        let err = AppError(PlanError::PlanMissing("abc".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn generator_failure_maps_to_502() {
        let err = AppError(PlanError::Generator(GeneratorError("down".into())).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unknown_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_body_is_json_with_error_field() {
        let response = AppError(PlanError::NoFinalPlan.into()).into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
