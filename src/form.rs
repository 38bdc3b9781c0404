//! Input constraints for the trip form.
//!
//! These belong to the presentation layer: the coordinator forwards whatever
//! it is given.

use chrono::NaiveDate;

use crate::schema::TripRequest;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    City,
    Origin,
    TravelDate,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::City, Field::Origin, Field::TravelDate];

    pub fn prompt(&self) -> &'static str {
        match self {
            Field::City => "Destination (e.g., Paris)",
            Field::Origin => "Origin Airport (e.g., JFK)",
            Field::TravelDate => "Travel date (YYYY-MM-DD)",
        }
    }

    /// Returns the accepted value or the message to show before re-prompting.
    pub fn accept(&self, raw: &str) -> Result<String, String> {
        let value = raw.trim();
        if value.is_empty() {
            return Err("Please fill out this field.".to_string());
        }
        match self {
            Field::TravelDate => NaiveDate::parse_from_str(value, DATE_FORMAT)
                .map(|date| date.format(DATE_FORMAT).to_string())
                .map_err(|_| format!("'{}' is not a valid date, use YYYY-MM-DD.", value)),
            _ => Ok(value.to_string()),
        }
    }
}

/// Collects accepted field values in prompt order.
#[derive(Debug, Default)]
pub struct TripForm {
    city: Option<String>,
    origin: Option<String>,
    travel_date: Option<String>,
}

impl TripForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_field(&self) -> Option<Field> {
        Field::ALL.into_iter().find(|field| self.slot(*field).is_none())
    }

    pub fn fill(&mut self, field: Field, raw: &str) -> Result<(), String> {
        let value = field.accept(raw)?;
        *self.slot_mut(field) = Some(value);
        Ok(())
    }

    /// The finished request, once every field holds an accepted value.
    pub fn build(&self) -> Option<TripRequest> {
        Some(TripRequest::new(
            self.city.clone()?,
            self.origin.clone()?,
            self.travel_date.clone()?,
        ))
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::City => &self.city,
            Field::Origin => &self.origin,
            Field::TravelDate => &self.travel_date,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::City => &mut self.city,
            Field::Origin => &mut self.origin,
            Field::TravelDate => &mut self.travel_date,
        }
    }
}
