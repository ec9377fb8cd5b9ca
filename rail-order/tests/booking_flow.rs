use chrono::NaiveDate;
use rail_catalog::{SeatStatus, ToggleOutcome, TrainCatalog};
use rail_core::app_config::{BookingRules, CoachLayout};
use rail_core::payment::PaymentMethod;
use rail_core::search::{SearchQuery, TrainClass};
use rail_core::session::Session;
use rail_core::BookingError;
use rail_order::{BookingCoordinator, BookingHistory, BookingStatus, ContactDetails, FlowStep, PassengerField};
use rail_shared::Masked;

fn rules() -> BookingRules {
    BookingRules {
        payment_delay_ms: 0,
        ..Default::default()
    }
}

fn four_seat_coach() -> CoachLayout {
    CoachLayout {
        rows: 1,
        cols: 4,
        available_ratio: 1.0,
    }
}

fn odd_seats_booked(id: u32) -> SeatStatus {
    if id % 2 == 1 {
        SeatStatus::Booked
    } else {
        SeatStatus::Available
    }
}

#[tokio::test]
async fn test_search_to_confirmation() {
    let today = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
    let query = SearchQuery::parse("from=Mumbai&to=Delhi&date=2025-11-15&class=3A&passengers=2", today).unwrap();

    let catalog = TrainCatalog::mock();
    let results = catalog.search(&query);
    assert_eq!(results.len(), 3);
    let train = results[0];
    assert_eq!(train.id, "12301");

    let mut availability = odd_seats_booked;
    let mut seat_map = catalog
        .open_seat_map(&train.id, TrainClass::ThirdAc, &four_seat_coach(), 6, &mut availability)
        .unwrap();

    assert_eq!(seat_map.selection.toggle(2), ToggleOutcome::Selected);
    assert_eq!(seat_map.selection.toggle(4), ToggleOutcome::Selected);
    assert_eq!(seat_map.selection.toggle(1), ToggleOutcome::AlreadyBooked);
    assert_eq!(seat_map.selection.selected_ids(), &[2, 4]);

    let coordinator = BookingCoordinator::with_mock_gateway(&rules()).unwrap();
    let session = Session::guest();
    let mut draft = coordinator.proceed_to_checkout(&session, &seat_map).unwrap();
    assert_eq!(draft.fare.base_fare, 2800);
    assert_eq!(draft.fare.tax, 140);
    assert_eq!(draft.fare.total, 2940);

    assert!(draft.passengers.add_passenger());
    for (id, name, age, gender, berth) in [
        (1, "Ravi Kumar", "34", "male", "lower"),
        (2, "Meera Kumar", "31", "female", "side-upper"),
    ] {
        draft.passengers.update_field(id, PassengerField::Name, name).unwrap();
        draft.passengers.update_field(id, PassengerField::Age, age).unwrap();
        draft.passengers.update_field(id, PassengerField::Gender, gender).unwrap();
        draft.passengers.update_field(id, PassengerField::Berth, berth).unwrap();
    }
    draft.contact = ContactDetails::new("ravi@example.com", "9876543210");

    coordinator.proceed_to_payment(&mut draft).unwrap();
    assert_eq!(draft.step, FlowStep::Payment);

    let method = PaymentMethod::Upi { vpa: Masked::from("ravi@okbank") };
    let booking = coordinator.confirm_payment(&mut draft, method).await.unwrap();

    assert!(!booking.pnr.is_empty());
    assert_eq!(booking.total_amount, 2940);
    assert_eq!(booking.seats, vec![2, 4]);
    assert_eq!(booking.passengers.len(), 2);
    assert_eq!(booking.status, BookingStatus::Confirmed);

    let event = booking.confirmation_event();
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["pnr"], booking.pnr.as_str());
    assert_eq!(json["total_amount"], 2940);
    assert_eq!(json["seat_count"], 2);

    let mut history = BookingHistory::with_mock_bookings();
    history.record(&booking, train, query.date);
    assert_eq!(history.list()[0].pnr, booking.pnr);
    assert_eq!(history.list()[0].amount, 2940);
}

#[tokio::test]
async fn test_empty_selection_blocks_checkout() {
    let catalog = TrainCatalog::mock();
    let mut availability = odd_seats_booked;
    let seat_map = catalog
        .open_seat_map("12301", TrainClass::ThirdAc, &four_seat_coach(), 6, &mut availability)
        .unwrap();

    let coordinator = BookingCoordinator::with_mock_gateway(&rules()).unwrap();
    let result = coordinator.proceed_to_checkout(&Session::guest(), &seat_map);
    assert!(matches!(result, Err(BookingError::EmptySelection)));
}

#[tokio::test]
async fn test_abandoned_payment_leaves_draft_payable() {
    let catalog = TrainCatalog::mock();
    let mut availability = odd_seats_booked;
    let mut seat_map = catalog
        .open_seat_map("12301", TrainClass::ThirdAc, &four_seat_coach(), 6, &mut availability)
        .unwrap();
    seat_map.selection.toggle(2);

    let slow = BookingRules {
        payment_delay_ms: 60_000,
        ..Default::default()
    };
    let coordinator = BookingCoordinator::with_mock_gateway(&slow).unwrap();
    let mut draft = coordinator.proceed_to_checkout(&Session::guest(), &seat_map).unwrap();
    draft.passengers.update_field(1, PassengerField::Name, "Ravi").unwrap();
    draft.passengers.update_field(1, PassengerField::Age, "34").unwrap();
    draft.passengers.update_field(1, PassengerField::Gender, "male").unwrap();
    draft.passengers.update_field(1, PassengerField::Berth, "upper").unwrap();
    draft.contact = ContactDetails::new("ravi@example.com", "9876543210");
    coordinator.proceed_to_payment(&mut draft).unwrap();

    // Traveller navigates away before the gateway answers
    let method = PaymentMethod::Upi { vpa: Masked::from("ravi@okbank") };
    let attempt = tokio::time::timeout(
        std::time::Duration::from_millis(10),
        coordinator.confirm_payment(&mut draft, method),
    )
    .await;
    assert!(attempt.is_err());
    assert_eq!(draft.step, FlowStep::Payment);
}
