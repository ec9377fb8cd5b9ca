use crate::seating::{SeatAvailability, SeatMap, SeatSelection};
use rail_core::app_config::CoachLayout;
use rail_core::search::{SearchQuery, TrainClass};
use rail_core::{BookingError, BookingResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ClassAvailability {
    Available { seats: u32 },
    /// Display-only; waitlisted classes cannot be booked here
    Waitlist { position: u32 },
    Unavailable,
}

impl ClassAvailability {
    pub fn is_bookable(&self) -> bool {
        matches!(self, ClassAvailability::Available { seats } if *seats > 0)
    }

    pub fn label(&self) -> String {
        match self {
            ClassAvailability::Available { .. } => "Available".to_string(),
            ClassAvailability::Waitlist { position } => format!("WL {}", position),
            ClassAvailability::Unavailable => "Not Available".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassFare {
    pub class: TrainClass,
    pub price: i64,
    pub availability: ClassAvailability,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Train {
    pub id: String,
    pub name: String,
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    pub duration_minutes: u32,
    pub classes: Vec<ClassFare>,
}

impl Train {
    pub fn class_fare(&self, class: TrainClass) -> Option<&ClassFare> {
        self.classes.iter().find(|c| c.class == class)
    }

    /// e.g. "16h 00m"
    pub fn duration_label(&self) -> String {
        format!("{}h {:02}m", self.duration_minutes / 60, self.duration_minutes % 60)
    }
}

/// Static timetable standing in for a train inventory service.
#[derive(Debug, Clone, Default)]
pub struct TrainCatalog {
    trains: Vec<Train>,
}

impl TrainCatalog {
    pub fn new(trains: Vec<Train>) -> Self {
        Self { trains }
    }

    pub fn mock() -> Self {
        use ClassAvailability::*;
        use TrainClass::*;

        let fare = |class, price, availability| ClassFare { class, price, availability };
        Self::new(vec![
            Train {
                id: "12301".to_string(),
                name: "Rajdhani Express".to_string(),
                from: "Mumbai".to_string(),
                to: "Delhi".to_string(),
                departure: "16:35".to_string(),
                arrival: "08:35".to_string(),
                duration_minutes: 16 * 60,
                classes: vec![
                    fare(FirstAc, 3500, Available { seats: 12 }),
                    fare(SecondAc, 2100, Waitlist { position: 15 }),
                    fare(ThirdAc, 1400, Available { seats: 24 }),
                ],
            },
            Train {
                id: "12951".to_string(),
                name: "Mumbai Rajdhani".to_string(),
                from: "Mumbai".to_string(),
                to: "Delhi".to_string(),
                departure: "17:00".to_string(),
                arrival: "09:15".to_string(),
                duration_minutes: 16 * 60 + 15,
                classes: vec![
                    fare(FirstAc, 3600, Available { seats: 5 }),
                    fare(SecondAc, 2200, Available { seats: 18 }),
                    fare(ThirdAc, 1500, Unavailable),
                ],
            },
            Train {
                id: "12137".to_string(),
                name: "Punjab Mail".to_string(),
                from: "Mumbai".to_string(),
                to: "Delhi".to_string(),
                departure: "19:40".to_string(),
                arrival: "14:45".to_string(),
                duration_minutes: 19 * 60 + 5,
                classes: vec![
                    fare(SecondAc, 1800, Available { seats: 32 }),
                    fare(ThirdAc, 1200, Available { seats: 45 }),
                    fare(Sleeper, 450, Available { seats: 78 }),
                ],
            },
        ])
    }

    pub fn get(&self, train_id: &str) -> Option<&Train> {
        self.trains.iter().find(|t| t.id == train_id)
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Trains on the requested route, narrowed to those offering the class
    /// when one is given. Station names compare case-insensitively.
    pub fn search(&self, query: &SearchQuery) -> Vec<&Train> {
        self.trains
            .iter()
            .filter(|t| t.from.eq_ignore_ascii_case(&query.from) && t.to.eq_ignore_ascii_case(&query.to))
            .filter(|t| query.class.map_or(true, |class| t.class_fare(class).is_some()))
            .collect()
    }

    /// Fare for a class that can actually be booked right now.
    pub fn bookable_fare(&self, train_id: &str, class: TrainClass) -> BookingResult<&ClassFare> {
        let train = self
            .get(train_id)
            .ok_or_else(|| BookingError::NotFound(format!("train {}", train_id)))?;
        let fare = train
            .class_fare(class)
            .ok_or_else(|| BookingError::NotFound(format!("class {} on train {}", class, train_id)))?;

        if !fare.availability.is_bookable() {
            return Err(BookingError::InvalidArgument(format!(
                "class {} on train {} is {}",
                class,
                train_id,
                fare.availability.label()
            )));
        }
        Ok(fare)
    }

    /// Generate a fresh coach layout for the seat-selection view. Each call
    /// discards any earlier layout and selection.
    pub fn open_seat_map<A>(
        &self,
        train_id: &str,
        class: TrainClass,
        coach: &CoachLayout,
        max_seats: usize,
        availability: &mut A,
    ) -> BookingResult<SeatMap>
    where
        A: SeatAvailability + ?Sized,
    {
        let fare = self.bookable_fare(train_id, class)?;
        let selection = SeatSelection::generate(coach.rows, coach.cols, max_seats, availability)?;

        tracing::info!(
            train_id,
            class = %class,
            available = selection.available_count(),
            "Seat map opened"
        );

        Ok(SeatMap {
            train_id: train_id.to_string(),
            train_class: class,
            price_per_seat: fare.price,
            selection,
        })
    }
}
