//! Commands - embedding shell to service bridge
//!
//! Every operation a shell needs, as plain functions over [`AppContext`](
//! crate::AppContext). Each command times itself and logs one uniform
//! execution event through `utils::logging`.

mod bookings;
mod operators;
mod payout;
mod seasons;

pub use bookings::*;
pub use operators::*;
pub use payout::*;
pub use seasons::*;
