//! Input/Result controller
//!
//! Holds the single source of truth for the form: parameter values and the
//! lifecycle of the recommendation request. Transitions:
//!
//! ```text
//! Idle --submit--> Loading --ok--> Success --submit--> Loading
//!                          --err-> Failure --submit--> Loading
//! Success | Failure --reset--> Idle
//! ```
//!
//! At most one provider call is in flight at any time. A call that outlives a
//! `reset` still holds the in-flight slot until it finishes, but its outcome is
//! discarded.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::{clamp_rainfall, clamp_temperature, GeoLocation, QueryParameters, RecommendationSet, Season};

use crate::error::RECOMMENDATION_FAILED_MESSAGE;
use crate::models::{RecommendationView, SessionStatus, SessionView};
use crate::services::recommendation::RecommendationClient;

/// Lifecycle of the recommendation request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(RecommendationSet),
    /// Carries the user-facing message only
    Failure(String),
}

impl RequestState {
    pub fn status(&self) -> SessionStatus {
        match self {
            RequestState::Idle => SessionStatus::Idle,
            RequestState::Loading => SessionStatus::Loading,
            RequestState::Success(_) => SessionStatus::Success,
            RequestState::Failure(_) => SessionStatus::Failure,
        }
    }
}

/// Result of calling [`Controller::submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The call finished and its outcome was applied
    Completed(RequestState),
    /// Another call was already in flight; nothing changed
    AlreadyInFlight,
    /// The call finished after a reset and its outcome was dropped
    Superseded,
}

#[derive(Debug, Default)]
struct SessionState {
    parameters: QueryParameters,
    request: RequestState,
    in_flight: bool,
    /// Bumped by every submit and reset
    generation: u64,
}

/// Handle to the session state; clones share the same session
#[derive(Debug, Clone)]
pub struct Controller {
    state: Arc<Mutex<SessionState>>,
    client: RecommendationClient,
}

/// Releases the in-flight slot even if the provider call panics
struct FlightGuard {
    state: Arc<Mutex<SessionState>>,
    generation: u64,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.in_flight = false;
        if state.generation == self.generation && state.request == RequestState::Loading {
            state.request = RequestState::Failure(RECOMMENDATION_FAILED_MESSAGE.to_string());
        }
    }
}

impl Controller {
    pub fn new(client: RecommendationClient) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::default())),
            client,
        }
    }

    // The lock is never held across an await and every transition leaves the
    // state consistent, so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    /// Store a temperature, clamped to the slider range. Returns the stored value.
    pub fn set_temperature(&self, value: f64) -> f64 {
        let stored = clamp_temperature(value);
        self.lock().parameters.temperature = stored;
        stored
    }

    /// Store a rainfall amount, clamped and snapped to the slider step.
    pub fn set_rainfall(&self, value: f64) -> u32 {
        let stored = clamp_rainfall(value);
        self.lock().parameters.rainfall = stored;
        stored
    }

    pub fn set_season(&self, season: Season) {
        self.lock().parameters.season = season;
    }

    /// Merge a geolocation fix into the parameters for the next request
    pub fn set_location(&self, location: GeoLocation) {
        self.lock().parameters.location = Some(location);
    }

    pub fn parameters(&self) -> QueryParameters {
        self.lock().parameters.clone()
    }

    pub fn request_state(&self) -> RequestState {
        self.lock().request.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().request == RequestState::Loading
    }

    pub fn results(&self) -> Option<RecommendationSet> {
        match &self.lock().request {
            RequestState::Success(set) => Some(set.clone()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<String> {
        match &self.lock().request {
            RequestState::Failure(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Request recommendations for the current parameters.
    ///
    /// A no-op returning [`SubmitOutcome::AlreadyInFlight`] while another call
    /// is running. The provider call runs on its own task, so dropping the
    /// returned future does not cancel it or leave the session stuck in
    /// Loading.
    pub async fn submit(&self) -> SubmitOutcome {
        let (generation, snapshot) = {
            let mut state = self.lock();
            if state.in_flight {
                tracing::debug!("Submit ignored, a recommendation request is already in flight");
                return SubmitOutcome::AlreadyInFlight;
            }
            state.in_flight = true;
            state.generation += 1;
            state.request = RequestState::Loading;
            (state.generation, state.parameters.clone())
        };

        let guard = FlightGuard {
            state: Arc::clone(&self.state),
            generation,
        };
        let controller = self.clone();
        let task = tokio::spawn(async move {
            let _guard = guard;
            let result = controller.client.recommend(&snapshot).await;
            controller.apply(generation, result)
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Recommendation task failed");
                SubmitOutcome::Completed(self.request_state())
            }
        }
    }

    fn apply(
        &self,
        generation: u64,
        result: Result<RecommendationSet, crate::error::ProviderError>,
    ) -> SubmitOutcome {
        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!(generation, "Discarding outcome of a superseded recommendation request");
            return SubmitOutcome::Superseded;
        }

        state.request = match result {
            Ok(set) => RequestState::Success(set),
            Err(e) => {
                tracing::warn!(error.kind = e.kind(), error = %e, "Recommendation request failed");
                RequestState::Failure(RECOMMENDATION_FAILED_MESSAGE.to_string())
            }
        };
        SubmitOutcome::Completed(state.request.clone())
    }

    /// Restore default parameters and return to Idle.
    ///
    /// The geolocation fix is kept. An in-flight call is not cancelled.
    pub fn reset(&self) {
        let mut state = self.lock();
        let location = state.parameters.location;
        state.parameters = QueryParameters {
            location,
            ..QueryParameters::default()
        };
        state.request = RequestState::Idle;
        state.generation += 1;
    }

    /// Render the current session
    pub fn snapshot(&self) -> SessionView {
        let state = self.lock();
        let (results, error) = match &state.request {
            RequestState::Success(set) => (
                Some(
                    set.crops
                        .iter()
                        .enumerate()
                        .map(|(i, crop)| RecommendationView::from_ranked(i, crop))
                        .collect(),
                ),
                None,
            ),
            RequestState::Failure(message) => (None, Some(message.clone())),
            RequestState::Idle | RequestState::Loading => (None, None),
        };

        SessionView {
            parameters: state.parameters.clone(),
            status: state.request.status(),
            location_label: state.parameters.location.map(|l| l.to_string()),
            results,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::FakeProvider;

    fn controller_with(provider: FakeProvider) -> Controller {
        Controller::new(RecommendationClient::new(Arc::new(provider)))
    }

    #[test]
    fn test_initial_state() {
        let controller = controller_with(FakeProvider::new());
        assert_eq!(controller.request_state(), RequestState::Idle);
        assert_eq!(controller.parameters(), QueryParameters::default());
        assert!(controller.results().is_none());
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_setters_clamp() {
        let controller = controller_with(FakeProvider::new());
        assert_eq!(controller.set_temperature(-3.0), 0.0);
        assert_eq!(controller.set_temperature(72.0), 60.0);
        assert_eq!(controller.set_rainfall(1337.0), 1350);
        assert_eq!(controller.set_rainfall(9000.0), 3000);
        controller.set_season(Season::Rabi);

        let params = controller.parameters();
        assert_eq!(params.temperature, 60.0);
        assert_eq!(params.rainfall, 3000);
        assert_eq!(params.season, Season::Rabi);
    }

    #[test]
    fn test_reset_keeps_location() {
        let controller = controller_with(FakeProvider::new());
        controller.set_location(GeoLocation::new(26.85, 80.95));
        controller.set_temperature(12.0);
        controller.reset();

        let params = controller.parameters();
        assert_eq!(params.temperature, 28.0);
        assert_eq!(params.location, Some(GeoLocation::new(26.85, 80.95)));
    }

    #[tokio::test]
    async fn test_failure_then_snapshot_shows_generic_message() {
        let controller = controller_with(FakeProvider::failing(
            crate::error::ProviderError::MalformedResponse("bad json".into()),
        ));
        controller.submit().await;

        let view = controller.snapshot();
        assert_eq!(view.status, SessionStatus::Failure);
        assert_eq!(view.error.as_deref(), Some(RECOMMENDATION_FAILED_MESSAGE));
        assert!(view.results.is_none());
    }
}
