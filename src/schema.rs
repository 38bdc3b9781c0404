use serde::{Deserialize, Deserializer, Serialize};

pub const NO_SUMMARY: &str = "No summary available";
pub const MOCK_SOURCE: &str = "mock";

// =====================================================
// REQUEST
// =====================================================

/// Body of `POST /api/plan_trip`. Values are forwarded as entered; the
/// Planning Service is authoritative for validation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub city: String,
    pub origin: String,
    pub travel_date: String,
}

impl TripRequest {
    pub fn new(
        city: impl Into<String>,
        origin: impl Into<String>,
        travel_date: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            origin: origin.into(),
            travel_date: travel_date.into(),
        }
    }
}

// =====================================================
// RESPONSE
// =====================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TripPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub raw_data: RawData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PlanMetadata>,
}

impl TripPlan {
    /// Summary to display; an absent or blank summary reads as [`NO_SUMMARY`].
    pub fn summary_text(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_SUMMARY)
    }

    pub fn services_used(&self) -> Option<&[String]> {
        self.metadata
            .as_ref()
            .and_then(|m| m.services_used.as_deref())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RawData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub flights: Vec<FlightOption>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PlanMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services_used: Option<Vec<String>>,
}

/// One flight as reported by the flight subsystem. Placeholder entries (e.g.
/// "no flights found for this route") carry only some fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FlightOption {
    #[serde(default)]
    pub airline: Option<String>,
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub departure_airport: Option<String>,
    #[serde(default)]
    pub arrival_airport: Option<String>,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub price_usd: Option<String>,
}

impl FlightOption {
    /// True when the flight subsystem fell back to synthetic data.
    pub fn is_mock(&self) -> bool {
        self.source.as_deref() == Some(MOCK_SOURCE)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
