//! Core contracts for cycle-accurate 65xx emulation.
//!
//! One bus access per clock cycle. The CPU crate consumes the [`Bus`] trait
//! and never interprets addresses beyond the interrupt vectors; address
//! decoding belongs to the bus implementation.

mod bus;
mod ticks;

pub use bus::{Bus, FlatBus};
pub use ticks::Ticks;
