use crate::models::{describe_missing, Passenger, PassengerEntry, PassengerField};
use rail_core::{BookingError, BookingResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_PASSENGERS: usize = 6;

/// Passenger rows on the details step. Always holds at least one row and
/// never more than `max_passengers`; ids follow row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawPassengerForm")]
pub struct PassengerForm {
    entries: Vec<PassengerEntry>,
    max_passengers: usize,
}

impl Default for PassengerForm {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PASSENGERS)
    }
}

impl PassengerForm {
    pub fn new(max_passengers: usize) -> Self {
        Self {
            entries: vec![PassengerEntry::blank(1)],
            max_passengers: max_passengers.max(1),
        }
    }

    /// Append a blank row. Returns false once the form is full.
    pub fn add_passenger(&mut self) -> bool {
        if self.entries.len() >= self.max_passengers {
            tracing::debug!(max = self.max_passengers, "Passenger limit reached");
            return false;
        }
        let id = self.entries.len() as u32 + 1;
        self.entries.push(PassengerEntry::blank(id));
        true
    }

    pub fn update_field(&mut self, passenger_id: u32, field: PassengerField, value: &str) -> BookingResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == passenger_id)
            .ok_or_else(|| BookingError::NotFound(format!("passenger {}", passenger_id)))?;

        entry.set(field, value);
        tracing::debug!(passenger_id, ?field, "Passenger field updated");
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(PassengerEntry::is_complete)
    }

    pub fn missing_fields(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|e| describe_missing(e.id, &e.missing_fields()))
            .collect()
    }

    /// Convert every row into a validated passenger
    pub fn finalize(&self) -> BookingResult<Vec<Passenger>> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(BookingError::IncompleteDetails { missing });
        }
        self.entries.iter().map(PassengerEntry::to_passenger).collect()
    }

    pub fn entries(&self) -> &[PassengerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_passengers
    }
}

#[derive(Deserialize)]
struct RawPassengerForm {
    entries: Vec<PassengerEntry>,
    max_passengers: usize,
}

impl TryFrom<RawPassengerForm> for PassengerForm {
    type Error = BookingError;

    fn try_from(raw: RawPassengerForm) -> BookingResult<Self> {
        if raw.entries.is_empty() || raw.entries.len() > raw.max_passengers {
            return Err(BookingError::InvalidArgument(format!(
                "passenger form needs 1 to {} rows, got {}",
                raw.max_passengers,
                raw.entries.len()
            )));
        }
        for (index, entry) in raw.entries.iter().enumerate() {
            if entry.id as usize != index + 1 {
                return Err(BookingError::InvalidArgument(format!(
                    "passenger row {} has id {}",
                    index + 1,
                    entry.id
                )));
            }
        }
        Ok(Self {
            entries: raw.entries,
            max_passengers: raw.max_passengers,
        })
    }
}
