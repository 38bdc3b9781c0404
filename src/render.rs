//! Plain-text views of [`PlannerState`] for the terminal front end.

use std::fmt::Write;

use crate::schema::{FlightOption, TripPlan};
use crate::service_status::ServiceStatus;
use crate::state_machine::PlannerState;

pub const NO_FLIGHTS: &str = "No flight information available";
pub const NO_ACTIVITIES: &str = "No activity suggestions available";

pub fn render_state(state: &PlannerState) -> String {
    let mut out = String::new();

    if state.is_busy() {
        out.push_str("Planning...\n");
    }
    if state.has_error() {
        let _ = writeln!(out, "Error: {}", state.error);
    }
    if let Some(status) = state.service_status.as_ref().filter(|s| !s.is_empty()) {
        out.push_str(&render_status(status));
    }
    if let Some(plan) = &state.plan {
        out.push_str(&render_plan(plan));
    }

    out
}

pub fn render_status(status: &ServiceStatus) -> String {
    let mut out = String::from("Service Status:\n");
    for (name, subsystem) in status.iter() {
        let _ = writeln!(out, "  {}: {} ({})", name, subsystem, subsystem.indicator());
    }
    out
}

pub fn render_plan(plan: &TripPlan) -> String {
    let mut out = String::new();

    out.push_str("== Your AI-Generated Trip Plan ==\n");
    let _ = writeln!(out, "{}\n", plan.summary_text());

    out.push_str("-- Flight Details --\n");
    if plan.raw_data.flights.is_empty() {
        let _ = writeln!(out, "{}", NO_FLIGHTS);
    } else {
        for flight in &plan.raw_data.flights {
            out.push_str(&render_flight(flight));
        }
    }

    out.push_str("\n-- Recommended Activities --\n");
    if plan.raw_data.activities.is_empty() {
        let _ = writeln!(out, "{}", NO_ACTIVITIES);
    } else {
        for activity in &plan.raw_data.activities {
            let _ = writeln!(out, "  - {}", activity);
        }
    }

    out
}

fn render_flight(flight: &FlightOption) -> String {
    let field = |v: &Option<String>| v.clone().unwrap_or_default();
    let mut out = String::new();

    let _ = writeln!(out, "  {} {}", field(&flight.airline), field(&flight.flight_number));
    let _ = writeln!(
        out,
        "    {} -> {}",
        field(&flight.departure_airport),
        field(&flight.arrival_airport)
    );
    let _ = writeln!(out, "    Departs: {}", field(&flight.departure_time));
    let _ = writeln!(out, "    Arrives: {}", field(&flight.arrival_time));
    let _ = writeln!(out, "    Status: {}", field(&flight.status));
    if flight.is_mock() {
        out.push_str("    (Mock data)\n");
    }
    out
}
