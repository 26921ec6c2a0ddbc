//! Cycle-accurate MOS 6502 / WDC 65C02 / Rockwell 65C02 CPU core.
//!
//! Every opcode is decomposed into a fixed pipeline of one-cycle
//! micro-ops; each `clock()` advances exactly one of them, performing at
//! most one bus access. The state buffer keeps a committed snapshot of
//! the pre-instruction state, so after every `step()` the caller can diff
//! `prev` against `current` to see precisely what one instruction did —
//! the foundation the cycle-accurate test harnesses build on.
//!
//! Four variants share the engine and differ only in their decode tables
//! and interrupt D-flag policy: the NMOS 6502 (full illegal-opcode set),
//! a simplified NMOS without illegals, the WDC 65C02 and the Rockwell
//! 65C02.

mod cpu;
mod execute;
pub mod flags;
mod microcode;
mod state;
mod tables;

pub use cpu::{Cpu, UnknownVariant, Variant};
pub use flags::Status;
pub use state::{CpuState, PendingInterrupt, RunState, StateBuffer};
