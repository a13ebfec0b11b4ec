//! Reusable rendering helpers shared across screens.

pub mod input;
pub mod reservation_table;
