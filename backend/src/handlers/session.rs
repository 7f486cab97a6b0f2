//! HTTP handlers for the recommendation form session

use axum::{extract::State, Json};
use shared::Season;

use crate::error::{AppError, AppResult};
use crate::models::{SessionView, UpdateParametersInput};
use crate::services::SubmitOutcome;
use crate::AppState;

/// Get the current session view
pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.controller.snapshot())
}

/// Update one or more parameters. Numeric values are clamped, not rejected.
pub async fn update_parameters(
    State(state): State<AppState>,
    Json(input): Json<UpdateParametersInput>,
) -> AppResult<Json<SessionView>> {
    // Parse first so an invalid season leaves every parameter untouched
    let season = input
        .season
        .as_deref()
        .map(str::parse::<Season>)
        .transpose()
        .map_err(|e| AppError::Validation {
            field: "season".to_string(),
            message: e.to_string(),
        })?;

    if let Some(temperature) = input.temperature {
        state.controller.set_temperature(temperature);
    }
    if let Some(rainfall) = input.rainfall {
        state.controller.set_rainfall(rainfall);
    }
    if let Some(season) = season {
        state.controller.set_season(season);
    }

    Ok(Json(state.controller.snapshot()))
}

/// Request recommendations for the current parameters
pub async fn submit_recommendation(State(state): State<AppState>) -> AppResult<Json<SessionView>> {
    match state.controller.submit().await {
        SubmitOutcome::AlreadyInFlight => Err(AppError::RequestInFlight),
        SubmitOutcome::Completed(_) | SubmitOutcome::Superseded => {
            Ok(Json(state.controller.snapshot()))
        }
    }
}

/// Reset parameters to defaults and clear results
pub async fn reset_session(State(state): State<AppState>) -> Json<SessionView> {
    state.controller.reset();
    Json(state.controller.snapshot())
}
