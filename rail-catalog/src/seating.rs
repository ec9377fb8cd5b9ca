use rail_core::search::TrainClass;
use rail_core::{BookingError, BookingResult};
use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[cfg(test)]
pub const DEFAULT_MAX_SEATS: usize = 6;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Booked,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BerthType {
    Lower,
    Middle,
    Upper,
}

impl BerthType {
    /// Berths cycle lower/middle/upper across a row
    pub fn for_column(col: u32) -> Self {
        match col % 3 {
            0 => BerthType::Lower,
            1 => BerthType::Middle,
            _ => BerthType::Upper,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub id: u32,
    pub number: String,
    pub berth: BerthType,
    pub status: SeatStatus,
}

impl Seat {
    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }
}

/// Decides whether a seat is already booked when a layout is generated.
pub trait SeatAvailability {
    fn status_for(&mut self, seat_id: u32) -> SeatStatus;
}

impl<F> SeatAvailability for F
where
    F: FnMut(u32) -> SeatStatus,
{
    fn status_for(&mut self, seat_id: u32) -> SeatStatus {
        self(seat_id)
    }
}

/// Marks each seat available with a fixed probability.
pub struct RandomAvailability<R = ThreadRng> {
    rng: R,
    available_ratio: f64,
}

impl RandomAvailability<ThreadRng> {
    pub fn new(available_ratio: f64) -> Self {
        Self::with_rng(rand::thread_rng(), available_ratio)
    }
}

impl<R: Rng> RandomAvailability<R> {
    pub fn with_rng(rng: R, available_ratio: f64) -> Self {
        let available_ratio = if available_ratio.is_finite() {
            available_ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { rng, available_ratio }
    }
}

impl<R: Rng> SeatAvailability for RandomAvailability<R> {
    fn status_for(&mut self, _seat_id: u32) -> SeatStatus {
        if self.rng.gen_bool(self.available_ratio) {
            SeatStatus::Available
        } else {
            SeatStatus::Booked
        }
    }
}

/// Enumerate seats row-major with 1-based ids.
pub fn generate_layout<A>(rows: u32, cols: u32, availability: &mut A) -> BookingResult<Vec<Seat>>
where
    A: SeatAvailability + ?Sized,
{
    // Every id is at most rows * cols, so one check covers the loop
    let total = rows.checked_mul(cols).ok_or_else(|| {
        BookingError::InvalidArgument(format!("coach layout {}x{} is too large", rows, cols))
    })?;

    let mut seats = Vec::with_capacity(total as usize);
    for row in 0..rows {
        for col in 0..cols {
            let id = row * cols + col + 1;
            seats.push(Seat {
                id,
                number: format!("S{}", id),
                berth: BerthType::for_column(col),
                status: availability.status_for(id),
            });
        }
    }
    Ok(seats)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    AlreadyBooked,
    LimitReached,
    UnknownSeat,
}

impl ToggleOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, ToggleOutcome::Selected | ToggleOutcome::Deselected)
    }

    /// Notice for the seat map when a click is ignored
    pub fn message(&self, max_seats: usize) -> Option<String> {
        match self {
            ToggleOutcome::Selected | ToggleOutcome::Deselected => None,
            ToggleOutcome::AlreadyBooked => Some("This seat is already booked".to_string()),
            ToggleOutcome::LimitReached => {
                Some(format!("You can select up to {} seats per booking", max_seats))
            }
            ToggleOutcome::UnknownSeat => Some("Seat not found in this coach".to_string()),
        }
    }
}

/// Seat map for one train and class plus the traveller's current picks.
/// Booked/available is fixed once generated; only the selection changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSeatSelection")]
pub struct SeatSelection {
    seats: Vec<Seat>,
    selected: Vec<u32>,
    max_selected: usize,
}

impl SeatSelection {
    pub fn new(seats: Vec<Seat>, max_selected: usize) -> Self {
        Self {
            seats,
            selected: Vec::new(),
            max_selected,
        }
    }

    pub fn generate<A>(
        rows: u32,
        cols: u32,
        max_selected: usize,
        availability: &mut A,
    ) -> BookingResult<Self>
    where
        A: SeatAvailability + ?Sized,
    {
        Ok(Self::new(generate_layout(rows, cols, availability)?, max_selected))
    }

    pub fn toggle(&mut self, seat_id: u32) -> ToggleOutcome {
        let status = self.seat(seat_id).map(|s| s.status);
        let outcome = match status {
            None => ToggleOutcome::UnknownSeat,
            Some(SeatStatus::Booked) => ToggleOutcome::AlreadyBooked,
            Some(SeatStatus::Available) => {
                if let Some(pos) = self.selected.iter().position(|id| *id == seat_id) {
                    self.selected.remove(pos);
                    ToggleOutcome::Deselected
                } else if self.selected.len() >= self.max_selected {
                    ToggleOutcome::LimitReached
                } else {
                    self.selected.push(seat_id);
                    ToggleOutcome::Selected
                }
            }
        };

        tracing::debug!(seat_id, ?outcome, selected = self.selected.len(), "Seat toggled");
        outcome
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids in the order they were picked
    pub fn selected_ids(&self) -> &[u32] {
        &self.selected
    }

    pub fn selected_seats(&self) -> Vec<&Seat> {
        self.selected.iter().filter_map(|id| self.seat(*id)).collect()
    }

    pub fn is_selected(&self, seat_id: u32) -> bool {
        self.selected.contains(&seat_id)
    }

    pub fn seat(&self, seat_id: u32) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == seat_id)
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn available_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_available()).count()
    }

    pub fn max_selected(&self) -> usize {
        self.max_selected
    }
}

/// Wire shape of a `SeatSelection` before its picks are checked
#[derive(Deserialize)]
struct RawSeatSelection {
    seats: Vec<Seat>,
    selected: Vec<u32>,
    max_selected: usize,
}

impl TryFrom<RawSeatSelection> for SeatSelection {
    type Error = BookingError;

    fn try_from(raw: RawSeatSelection) -> BookingResult<Self> {
        if raw.selected.len() > raw.max_selected {
            return Err(BookingError::InvalidArgument(format!(
                "{} seats selected, limit is {}",
                raw.selected.len(),
                raw.max_selected
            )));
        }

        let mut ids = HashSet::new();
        for seat in &raw.seats {
            if !ids.insert(seat.id) {
                return Err(BookingError::InvalidArgument(format!("seat {} listed twice", seat.id)));
            }
        }

        let mut picked = HashSet::new();
        for id in &raw.selected {
            let seat = raw
                .seats
                .iter()
                .find(|s| s.id == *id)
                .ok_or_else(|| BookingError::InvalidArgument(format!("selected seat {} is not in the coach", id)))?;
            if !seat.is_available() {
                return Err(BookingError::InvalidArgument(format!("selected seat {} is booked", id)));
            }
            if !picked.insert(*id) {
                return Err(BookingError::InvalidArgument(format!("seat {} selected twice", id)));
            }
        }

        Ok(Self {
            seats: raw.seats,
            selected: raw.selected,
            max_selected: raw.max_selected,
        })
    }
}

/// Seat picker opened for one train and class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatMap {
    pub train_id: String,
    pub train_class: TrainClass,
    pub price_per_seat: i64,
    pub selection: SeatSelection,
}
