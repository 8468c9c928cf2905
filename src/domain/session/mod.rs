//! Conversation session model: flow state machine, move details, and
//! turn-log records.

mod flow;
mod move_details;
mod turn;

pub use flow::{FlowStep, QueryType};
pub use move_details::{MoveDetails, MoveEstimateRequest, UNKNOWN_FIELD};
pub use turn::TurnRole;
