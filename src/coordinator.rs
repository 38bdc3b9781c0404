//! Request Coordinator
//!
//! Owns the submission lifecycle: one Planning Service call per submission,
//! busy/idle tracking, and the plan/error/status slots the presentation layer
//! renders. State is published through a `watch` channel so views subscribe
//! instead of polling.
//!
//! A submission made while another is in flight is rejected with
//! [`PlannerError::SubmissionInProgress`] and leaves the state untouched.
//! The published busy flag is the only record of an in-flight submission, so
//! a caller that observes idle can always submit.

use tokio::sync::watch;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{PlannerError, Result};
use crate::planning_client::PlanningService;
use crate::schema::{TripPlan, TripRequest};
use crate::service_status;
use crate::state_machine::PlannerState;

pub struct RequestCoordinator<S> {
    service: S,
    state: watch::Sender<PlannerState>,
}

impl<S: PlanningService> RequestCoordinator<S> {
    pub fn new(service: S) -> Self {
        let (state, _) = watch::channel(PlannerState::default());
        Self { service, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<PlannerState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> PlannerState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    /// Runs one submission: clear error, plan and status, go busy, call the
    /// Planning Service, record the outcome, go idle. The idle transition runs
    /// on every exit path, including when this future is dropped mid-call.
    pub async fn submit(&self, request: TripRequest) -> Result<TripPlan> {
        // Claiming the slot and publishing busy happen under one lock.
        let claimed = self.state.send_if_modified(|state| {
            if state.is_busy() {
                false
            } else {
                state.begin_submission();
                true
            }
        });
        if !claimed {
            warn!(city = %request.city, "submission rejected, a trip plan request is already in flight");
            return Err(PlannerError::SubmissionInProgress);
        }
        let _idle = IdleGuard { state: &self.state };

        let submission = Uuid::new_v4();
        let outcome = self
            .service
            .plan_trip(&request)
            .instrument(info_span!("plan_trip", %submission, city = %request.city))
            .await;

        match &outcome {
            Ok(plan) => {
                let status = service_status::derive_for_plan(plan);
                info!(
                    %submission,
                    flights = plan.raw_data.flights.len(),
                    activities = plan.raw_data.activities.len(),
                    unavailable = ?status.as_ref().map(|s| s.unavailable()),
                    "trip plan received"
                );
                self.state
                    .send_modify(|state| state.record_plan(plan.clone(), status));
            }
            Err(err) => {
                warn!(%submission, error = %err, "trip plan request failed");
                self.state
                    .send_modify(|state| state.record_failure(err.to_string()));
            }
        }

        outcome
    }
}

/// Publishes idle when dropped, which also frees the slot for the next submit.
struct IdleGuard<'a> {
    state: &'a watch::Sender<PlannerState>,
}

impl Drop for IdleGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(PlannerState::finish_submission);
    }
}
