//! Service-status derivation
//!
//! Turns `metadata.services_used` from a trip plan into the availability map
//! shown on the status panel. Pure and synchronous.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::schema::TripPlan;

/// Subsystems that always get an entry once a status map is derived.
pub const KNOWN_SUBSYSTEMS: [&str; 3] = ["flight", "knowledge", "rag"];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubsystemStatus {
    Operational,
    Unavailable,
}

impl SubsystemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubsystemStatus::Operational => "operational",
            SubsystemStatus::Unavailable => "unavailable",
        }
    }

    /// Panel colour for this status.
    pub fn indicator(&self) -> &'static str {
        match self {
            SubsystemStatus::Operational => "green",
            SubsystemStatus::Unavailable => "orange",
        }
    }
}

impl fmt::Display for SubsystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subsystem name to status. Entries are kept and listed in name order, not
/// in the order the service reported them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct ServiceStatus(BTreeMap<String, SubsystemStatus>);

impl ServiceStatus {
    pub fn get(&self, subsystem: &str) -> Option<SubsystemStatus> {
        self.0.get(subsystem).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SubsystemStatus)> {
        self.0.iter().map(|(name, status)| (name.as_str(), *status))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn unavailable(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, status)| *status == SubsystemStatus::Unavailable)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Marks every reported subsystem operational, then every known subsystem
/// missing from the report unavailable. Unknown names never get the
/// unavailable fallback.
pub fn derive_status(services_used: &[String]) -> ServiceStatus {
    let mut status: BTreeMap<String, SubsystemStatus> = services_used
        .iter()
        .map(|name| (name.clone(), SubsystemStatus::Operational))
        .collect();

    for known in KNOWN_SUBSYSTEMS {
        if !services_used.iter().any(|name| name == known) {
            status.insert(known.to_string(), SubsystemStatus::Unavailable);
        }
    }

    ServiceStatus(status)
}

/// `None` when the plan carries no `services_used` report.
pub fn derive_for_plan(plan: &TripPlan) -> Option<ServiceStatus> {
    plan.services_used().map(derive_status)
}
