pub mod app_config;
pub mod help;
pub mod payment;
pub mod search;
pub mod session;

/// Local validation failures raised by the booking flow. None of these
/// cross an I/O boundary; callers block the relevant UI transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Please select at least one seat")]
    EmptySelection,
    #[error("Please fill in all required details: {}", .missing.join(", "))]
    IncompleteDetails { missing: Vec<String> },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Payment failed: {0}")]
    PaymentFailed(String),
}

pub type BookingResult<T> = Result<T, BookingError>;
