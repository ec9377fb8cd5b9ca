pub mod pricing;
pub mod seating;
pub mod train;

pub use pricing::{FareBreakdown, FareCalculator};
pub use seating::{
    BerthType, RandomAvailability, Seat, SeatAvailability, SeatMap, SeatSelection, SeatStatus,
    ToggleOutcome,
};
pub use train::{ClassAvailability, ClassFare, Train, TrainCatalog};
