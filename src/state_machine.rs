use serde::Serialize;

use crate::schema::TripPlan;
use crate::service_status::ServiceStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Busy,
}

/// Per-subsystem loading flags. Only `main` is driven; the rest stay false.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadingState {
    pub main: bool,
    pub flights: bool,
    pub attractions: bool,
    pub rag: bool,
}

impl LoadingState {
    pub fn busy() -> Self {
        Self {
            main: true,
            ..Self::default()
        }
    }
}

/// Snapshot published to subscribers after every transition.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct PlannerState {
    pub plan: Option<TripPlan>,
    /// Empty when there is nothing to show.
    pub error: String,
    pub loading: LoadingState,
    pub service_status: Option<ServiceStatus>,
}

impl PlannerState {
    pub fn phase(&self) -> Phase {
        if self.loading.main {
            Phase::Busy
        } else {
            Phase::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase() == Phase::Busy
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Clears the previous outcome and marks the submission busy.
    pub(crate) fn begin_submission(&mut self) {
        self.error.clear();
        self.plan = None;
        self.service_status = None;
        self.loading = LoadingState::busy();
    }

    pub(crate) fn record_plan(&mut self, plan: TripPlan, status: Option<ServiceStatus>) {
        self.error.clear();
        self.plan = Some(plan);
        self.service_status = status;
    }

    pub(crate) fn record_failure(&mut self, message: String) {
        self.error = message;
        self.plan = None;
        self.service_status = None;
    }

    pub(crate) fn finish_submission(&mut self) {
        self.loading = LoadingState::default();
    }
}
