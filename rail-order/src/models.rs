use crate::passengers::PassengerForm;
use chrono::{DateTime, Utc};
use rail_catalog::FareBreakdown;
use rail_core::search::TrainClass;
use rail_core::BookingError;
use rail_shared::models::events::BookingConfirmedEvent;
use rail_shared::Masked;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(BookingError::InvalidArgument(format!("unknown gender '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BerthPreference {
    Lower,
    Middle,
    Upper,
    SideLower,
    SideUpper,
}

impl FromStr for BerthPreference {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower" => Ok(BerthPreference::Lower),
            "middle" => Ok(BerthPreference::Middle),
            "upper" => Ok(BerthPreference::Upper),
            "side-lower" => Ok(BerthPreference::SideLower),
            "side-upper" => Ok(BerthPreference::SideUpper),
            other => Err(BookingError::InvalidArgument(format!("unknown berth '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassengerField {
    Name,
    Age,
    Gender,
    Berth,
}

/// One row of the passenger form, holding values exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerEntry {
    pub id: u32,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub berth: String,
}

impl PassengerEntry {
    pub fn blank(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn set(&mut self, field: PassengerField, value: &str) {
        let slot = match field {
            PassengerField::Name => &mut self.name,
            PassengerField::Age => &mut self.age,
            PassengerField::Gender => &mut self.gender,
            PassengerField::Berth => &mut self.berth,
        };
        *slot = value.to_string();
    }

    /// Fields that are empty or hold a value outside the allowed set
    pub fn missing_fields(&self) -> Vec<PassengerField> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push(PassengerField::Name);
        }
        if parse_age(&self.age).is_none() {
            missing.push(PassengerField::Age);
        }
        if self.gender.parse::<Gender>().is_err() {
            missing.push(PassengerField::Gender);
        }
        if self.berth.parse::<BerthPreference>().is_err() {
            missing.push(PassengerField::Berth);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn to_passenger(&self) -> Result<Passenger, BookingError> {
        let incomplete = || BookingError::IncompleteDetails {
            missing: describe_missing(self.id, &self.missing_fields()),
        };
        if self.name.is_empty() {
            return Err(incomplete());
        }
        let age = parse_age(&self.age).ok_or_else(incomplete)?;
        let gender = self.gender.parse().map_err(|_| incomplete())?;
        let berth = self.berth.parse().map_err(|_| incomplete())?;

        Ok(Passenger {
            id: self.id,
            name: self.name.clone(),
            age,
            gender,
            berth,
        })
    }
}

fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|age| *age > 0)
}

pub(crate) fn describe_missing(passenger_id: u32, fields: &[PassengerField]) -> Vec<String> {
    fields
        .iter()
        .map(|field| {
            let name = match field {
                PassengerField::Name => "name",
                PassengerField::Age => "age",
                PassengerField::Gender => "gender",
                PassengerField::Berth => "berth preference",
            };
            format!("passenger {} {}", passenger_id, name)
        })
        .collect()
}

/// A validated traveller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub berth: BerthPreference,
}

/// Presence check only; no email or phone format rules apply.
pub fn validate_contact(email: &str, mobile: &str) -> bool {
    !email.is_empty() && !mobile.is_empty()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: Masked<String>,
    pub mobile: Masked<String>,
}

impl ContactDetails {
    pub fn new(email: &str, mobile: &str) -> Self {
        Self {
            email: Masked::from(email),
            mobile: Masked::from(mobile),
        }
    }

    pub fn is_valid(&self) -> bool {
        validate_contact(self.email.expose(), self.mobile.expose())
    }

    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.email.is_empty() {
            missing.push("contact email".to_string());
        }
        if self.mobile.is_empty() {
            missing.push("contact mobile".to_string());
        }
        missing
    }
}

/// Progress through the booking steps; drives the step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStep {
    SeatSelection,
    Details,
    Payment,
    Confirmed,
}

impl FlowStep {
    /// Steps already behind the traveller
    pub fn completed_steps(&self) -> &'static [FlowStep] {
        static ALL: [FlowStep; 4] = [
            FlowStep::SeatSelection,
            FlowStep::Details,
            FlowStep::Payment,
            FlowStep::Confirmed,
        ];
        let done = match self {
            FlowStep::SeatSelection => 0,
            FlowStep::Details => 1,
            FlowStep::Payment => 2,
            FlowStep::Confirmed => 3,
        };
        &ALL[..done]
    }
}

/// Booking under construction between seat selection and payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDraft {
    pub id: Uuid,
    pub session_id: Uuid,
    pub customer: Option<Masked<String>>,
    pub train_id: String,
    pub train_class: TrainClass,
    pub seats: Vec<u32>,
    pub seat_numbers: Vec<String>,
    pub fare: FareBreakdown,
    pub passengers: PassengerForm,
    pub contact: ContactDetails,
    pub step: FlowStep,
    pub created_at: DateTime<Utc>,
}

impl BookingDraft {
    pub fn base_fare(&self) -> i64 {
        self.fare.base_fare
    }

    /// Seat and passenger counts when they disagree. Booking still proceeds
    /// with a mismatch; callers decide whether to warn.
    pub fn passenger_seat_mismatch(&self) -> Option<(usize, usize)> {
        let seats = self.seats.len();
        let passengers = self.passengers.len();
        (seats != passengers).then_some((seats, passengers))
    }

    /// Everything that still blocks the move to payment
    pub fn missing_details(&self) -> Vec<String> {
        let mut missing = self.passengers.missing_fields();
        missing.extend(self.contact.missing_fields());
        missing
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Completed,
}

/// Frozen record shown on the confirmation screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmedBooking {
    pub id: Uuid,
    pub pnr: String,
    pub session_id: Uuid,
    pub customer: Option<Masked<String>>,
    pub train_id: String,
    pub train_class: TrainClass,
    pub seats: Vec<u32>,
    pub seat_numbers: Vec<String>,
    pub passengers: Vec<Passenger>,
    pub contact: ContactDetails,
    pub base_fare: i64,
    pub tax: i64,
    pub total_amount: i64,
    pub currency: String,
    pub payment_method: String,
    pub status: BookingStatus,
    pub confirmed_at: DateTime<Utc>,
}

impl ConfirmedBooking {
    pub fn confirmation_event(&self) -> BookingConfirmedEvent {
        BookingConfirmedEvent {
            booking_id: self.id,
            pnr: self.pnr.clone(),
            session_id: self.session_id,
            customer: self.customer.clone(),
            train_id: self.train_id.clone(),
            seat_count: self.seats.len(),
            total_amount: self.total_amount,
            timestamp: self.confirmed_at.timestamp(),
        }
    }
}
