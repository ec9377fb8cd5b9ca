use crate::pii::Masked;
use uuid::Uuid;

/// Emitted once a payment succeeds and the booking is frozen.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingConfirmedEvent {
    pub booking_id: Uuid,
    pub pnr: String,
    pub session_id: Uuid,
    /// Serialises in clear; log the `Debug` form instead.
    pub customer: Option<Masked<String>>,
    pub train_id: String,
    pub seat_count: usize,
    pub total_amount: i64,
    pub timestamp: i64,
}
