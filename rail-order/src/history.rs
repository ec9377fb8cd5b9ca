use crate::models::{BookingStatus, ConfirmedBooking};
use chrono::NaiveDate;
use rail_catalog::Train;
use rail_core::search::TrainClass;
use rail_core::{BookingError, BookingResult};
use serde::{Deserialize, Serialize};

/// One line on the "My Bookings" page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingSummary {
    pub pnr: String,
    pub train_id: String,
    pub train_name: String,
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
    pub class: TrainClass,
    pub passengers: usize,
    pub amount: i64,
    pub status: BookingStatus,
}

/// Bookings made in this session, newest first. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct BookingHistory {
    bookings: Vec<BookingSummary>,
}

impl BookingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with the two sample bookings shown to new visitors
    pub fn with_mock_bookings() -> Self {
        let samples = [
            (
                "PNR1234567890", "12301", "Rajdhani Express", NaiveDate::from_ymd_opt(2025, 11, 15),
                TrainClass::ThirdAc, 2, 2940, BookingStatus::Confirmed,
            ),
            (
                "PNR0987654321", "12951", "Mumbai Rajdhani", NaiveDate::from_ymd_opt(2025, 10, 28),
                TrainClass::SecondAc, 1, 2310, BookingStatus::Completed,
            ),
        ];

        let bookings = samples
            .into_iter()
            .filter_map(|(pnr, train_id, train_name, date, class, passengers, amount, status)| {
                Some(BookingSummary {
                    pnr: pnr.to_string(),
                    train_id: train_id.to_string(),
                    train_name: train_name.to_string(),
                    from: "Mumbai".to_string(),
                    to: "Delhi".to_string(),
                    date: date?,
                    class,
                    passengers,
                    amount,
                    status,
                })
            })
            .collect();

        Self { bookings }
    }

    pub fn record(&mut self, booking: &ConfirmedBooking, train: &Train, date: NaiveDate) -> &BookingSummary {
        let summary = BookingSummary {
            pnr: booking.pnr.clone(),
            train_id: booking.train_id.clone(),
            train_name: train.name.clone(),
            from: train.from.clone(),
            to: train.to.clone(),
            date,
            class: booking.train_class,
            passengers: booking.passengers.len(),
            amount: booking.total_amount,
            status: booking.status,
        };
        tracing::debug!(pnr = %summary.pnr, "Booking added to history");
        self.bookings.insert(0, summary);
        &self.bookings[0]
    }

    pub fn get(&self, pnr: &str) -> Option<&BookingSummary> {
        self.bookings.iter().find(|b| b.pnr == pnr)
    }

    pub fn list(&self) -> &[BookingSummary] {
        &self.bookings
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Journey taken
    pub fn mark_completed(&mut self, pnr: &str) -> BookingResult<()> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.pnr == pnr)
            .ok_or_else(|| BookingError::NotFound(format!("booking {}", pnr)))?;
        booking.status = BookingStatus::Completed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BerthPreference, ContactDetails, Gender, Passenger};
    use chrono::Utc;
    use rail_catalog::TrainCatalog;
    use uuid::Uuid;

    fn confirmed(pnr: &str) -> ConfirmedBooking {
        ConfirmedBooking {
            id: Uuid::new_v4(),
            pnr: pnr.to_string(),
            session_id: Uuid::new_v4(),
            customer: None,
            train_id: "12137".to_string(),
            train_class: TrainClass::Sleeper,
            seats: vec![3],
            seat_numbers: vec!["S3".to_string()],
            passengers: vec![Passenger {
                id: 1,
                name: "Asha".to_string(),
                age: 29,
                gender: Gender::Female,
                berth: BerthPreference::SideLower,
            }],
            contact: ContactDetails::new("asha@example.com", "9000000000"),
            base_fare: 450,
            tax: 23,
            total_amount: 473,
            currency: "INR".to_string(),
            payment_method: "UPI".to_string(),
            status: BookingStatus::Confirmed,
            confirmed_at: Utc::now(),
        }
    }

    #[test]
    fn test_mock_bookings() {
        let history = BookingHistory::with_mock_bookings();
        assert_eq!(history.list().len(), 2);

        let completed = history.get("PNR0987654321").unwrap();
        assert_eq!(completed.status, BookingStatus::Completed);
        assert_eq!(completed.amount, 2310);
    }

    #[test]
    fn test_record_puts_newest_first() {
        let catalog = TrainCatalog::mock();
        let train = catalog.get("12137").unwrap();
        let mut history = BookingHistory::with_mock_bookings();

        let date = NaiveDate::from_ymd_opt(2025, 12, 2).unwrap();
        let summary = history.record(&confirmed("PNRABC123XYZ"), train, date);
        assert_eq!(summary.train_name, "Punjab Mail");
        assert_eq!(summary.passengers, 1);

        assert_eq!(history.list()[0].pnr, "PNRABC123XYZ");
        assert_eq!(history.list().len(), 3);
    }

    #[test]
    fn test_mark_completed() {
        let mut history = BookingHistory::with_mock_bookings();
        history.mark_completed("PNR1234567890").unwrap();
        assert_eq!(history.get("PNR1234567890").unwrap().status, BookingStatus::Completed);

        assert!(matches!(
            history.mark_completed("PNRMISSING"),
            Err(BookingError::NotFound(_))
        ));
    }
}
