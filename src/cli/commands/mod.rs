//! Command implementations

pub mod compare;
pub mod evaluate;
pub mod play;
pub mod train;
