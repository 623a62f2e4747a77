//! Domain types for StratLab.

pub mod bar;
pub mod equity;
pub mod fill;
pub mod order;
pub mod position;
pub mod trade;

pub use bar::{AuxSignal, Bar};
pub use equity::{equity_values, EquityPoint};
pub use fill::Fill;
pub use order::{OrderSide, RejectReason, Rejection};
pub use position::{Position, PositionState};
pub use trade::ClosedTrade;

/// Symbol type alias
pub type Symbol = String;
