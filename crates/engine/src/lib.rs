pub use allocation::{AttendeeBalance, CategoryKey, allocate};
pub use attendees::Attendee;
pub use categories::Category;
pub use error::EngineError;
pub use events::Event;
pub use ops::{Engine, EngineBuilder, EventReport, EventSnapshot};
pub use participations::Participation;
pub use settlement::{
    SETTLE_TOLERANCE, SettlementStrategy, SettlementTransfer, is_fully_settled, plan,
};

mod allocation;
mod attendees;
mod categories;
mod error;
mod events;
mod ops;
mod participations;
mod settlement;

type ResultEngine<T> = Result<T, EngineError>;
