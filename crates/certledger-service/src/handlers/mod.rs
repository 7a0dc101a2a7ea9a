//! API handlers.

pub mod certificates;
pub mod health;
pub mod transactions;
