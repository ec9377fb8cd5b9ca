use crate::models::{BookingDraft, BookingStatus, ConfirmedBooking, ContactDetails, FlowStep};
use crate::orchestrator::{MockPaymentAdapter, PaymentOrchestrator};
use crate::passengers::PassengerForm;
use chrono::Utc;
use rail_catalog::{FareCalculator, SeatMap};
use rail_core::app_config::BookingRules;
use rail_core::payment::{PaymentAdapter, PaymentMethod, PaymentRequest};
use rail_core::session::Session;
use rail_core::{BookingError, BookingResult};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Drives a booking from seat selection through details to payment.
pub struct BookingCoordinator {
    fares: FareCalculator,
    payments: PaymentOrchestrator,
    max_passengers: usize,
    currency: String,
}

impl BookingCoordinator {
    pub fn new(rules: &BookingRules, adapter: Arc<dyn PaymentAdapter>) -> BookingResult<Self> {
        Ok(Self {
            fares: FareCalculator::from_rules(rules)?,
            payments: PaymentOrchestrator::new(adapter),
            max_passengers: rules.max_passengers,
            currency: rules.currency.clone(),
        })
    }

    /// Coordinator backed by the mock gateway with the configured delay
    pub fn with_mock_gateway(rules: &BookingRules) -> BookingResult<Self> {
        let adapter = MockPaymentAdapter::new(Duration::from_millis(rules.payment_delay_ms));
        Self::new(rules, Arc::new(adapter))
    }

    pub fn fares(&self) -> &FareCalculator {
        &self.fares
    }

    /// Seat selection → details. Contact details are pre-filled from the
    /// session profile when there is one.
    pub fn proceed_to_checkout(&self, session: &Session, seat_map: &SeatMap) -> BookingResult<BookingDraft> {
        let selection = &seat_map.selection;
        if selection.selected_count() == 0 {
            tracing::warn!(train_id = %seat_map.train_id, "Checkout attempted with no seats selected");
            return Err(BookingError::EmptySelection);
        }

        let fare = self
            .fares
            .breakdown(seat_map.price_per_seat, selection.selected_count())?;
        let contact = session
            .profile
            .as_ref()
            .map(|p| ContactDetails {
                email: p.email.clone(),
                mobile: p.mobile.clone(),
            })
            .unwrap_or_default();

        let draft = BookingDraft {
            id: Uuid::new_v4(),
            session_id: session.id,
            customer: session.customer_id(),
            train_id: seat_map.train_id.clone(),
            train_class: seat_map.train_class,
            seats: selection.selected_ids().to_vec(),
            seat_numbers: selection
                .selected_seats()
                .iter()
                .map(|s| s.number.clone())
                .collect(),
            fare,
            passengers: PassengerForm::new(self.max_passengers),
            contact,
            step: FlowStep::Details,
            created_at: Utc::now(),
        };

        tracing::info!(
            draft_id = %draft.id,
            train_id = %draft.train_id,
            seats = draft.seats.len(),
            base_fare = draft.fare.base_fare,
            "Checkout started"
        );
        Ok(draft)
    }

    /// Details → payment. Blocked until every passenger row and both contact
    /// fields are filled in.
    pub fn proceed_to_payment(&self, draft: &mut BookingDraft) -> BookingResult<()> {
        if draft.step == FlowStep::Confirmed {
            return Err(BookingError::InvalidArgument(format!(
                "booking {} is already confirmed",
                draft.id
            )));
        }

        let missing = draft.missing_details();
        if !missing.is_empty() {
            tracing::warn!(draft_id = %draft.id, missing = missing.len(), "Details incomplete");
            return Err(BookingError::IncompleteDetails { missing });
        }

        if let Some((seats, passengers)) = draft.passenger_seat_mismatch() {
            tracing::warn!(draft_id = %draft.id, seats, passengers, "Passenger count differs from seat count");
        }

        draft.step = FlowStep::Payment;
        tracing::info!(draft_id = %draft.id, contact = %draft.contact.email, "Proceeding to payment");
        Ok(())
    }

    /// Charge the total and freeze the booking. Passenger and contact
    /// details are re-checked first. The draft is borrowed
    /// exclusively for the duration, so it cannot be paid twice at once;
    /// dropping the future before it resolves leaves the draft unpaid.
    pub async fn confirm_payment(
        &self,
        draft: &mut BookingDraft,
        method: PaymentMethod,
    ) -> BookingResult<ConfirmedBooking> {
        // Fields stay editable after the details step, so check again
        self.proceed_to_payment(draft)?;

        let passengers = draft.passengers.finalize()?;
        let fare = draft.fare;
        let request = PaymentRequest {
            reference: draft.id,
            amount: fare.total,
            currency: self.currency.clone(),
            method,
        };

        let pnr = self.payments.charge(&request).await?;

        draft.step = FlowStep::Confirmed;
        let booking = ConfirmedBooking {
            id: draft.id,
            pnr,
            session_id: draft.session_id,
            customer: draft.customer.clone(),
            train_id: draft.train_id.clone(),
            train_class: draft.train_class,
            seats: draft.seats.clone(),
            seat_numbers: draft.seat_numbers.clone(),
            passengers,
            contact: draft.contact.clone(),
            base_fare: fare.base_fare,
            tax: fare.tax,
            total_amount: fare.total,
            currency: request.currency,
            payment_method: request.method.label(),
            status: BookingStatus::Confirmed,
            confirmed_at: Utc::now(),
        };

        tracing::info!(
            pnr = %booking.pnr,
            total = booking.total_amount,
            "Payment successful, booking confirmed"
        );
        Ok(booking)
    }
}
