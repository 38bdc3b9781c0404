pub mod config;
pub mod coordinator;
pub mod error;
pub mod form;
pub mod planning_client;
pub mod render;
pub mod schema;
pub mod service_status;
pub mod state_machine;

pub use config::PlannerConfig;
pub use coordinator::RequestCoordinator;
pub use error::PlannerError;
pub use planning_client::{PlanningService, PlanningServiceClient};
pub use schema::{FlightOption, TripPlan, TripRequest};
pub use service_status::{derive_status, ServiceStatus, SubsystemStatus};
pub use state_machine::{LoadingState, PlannerState};
