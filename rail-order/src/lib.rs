pub mod models;
pub mod passengers;
pub mod orchestrator;
pub mod coordinator;
pub mod history;

pub use models::{
    BerthPreference, BookingDraft, BookingStatus, ConfirmedBooking, ContactDetails, FlowStep,
    Gender, Passenger, PassengerEntry, PassengerField,
};
pub use passengers::PassengerForm;
pub use orchestrator::{MockPaymentAdapter, PaymentOrchestrator};
pub use coordinator::BookingCoordinator;
pub use history::{BookingHistory, BookingSummary};
