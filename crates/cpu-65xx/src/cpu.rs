//! CPU core: variant selection, tick engine, and interrupt subsystem.
//!
//! The tick engine advances one micro-op per clock. At an instruction
//! boundary it snapshots the state buffer (`prev := current`), then either
//! splices in a pending interrupt's sequence or peeks the next opcode and
//! installs that opcode's pipeline from the variant's decode table. The
//! table reference is selected once at construction.

use std::fmt;

use emu_core::{Bus, Ticks};

use crate::execute::run_micro_op;
use crate::flags::I;
use crate::state::{CpuState, PendingInterrupt, Pipeline, RunState, StateBuffer};
use crate::tables::{self, OpcodeTable};

/// Safety bound for `step`: no well-formed pipeline runs this long.
const STEP_CYCLE_LIMIT: usize = 100;

/// CPU variant. Selects the decode table and the interrupt D-flag policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// NMOS 6502 with the full illegal-opcode set and JAM lock-ups.
    Nmos6502,
    /// NMOS 6502 with illegal opcodes neutered into timed NOPs.
    Nmos6502Simple,
    /// WDC 65C02 with WAI/STP.
    Wdc65C02,
    /// Rockwell 65C02: WDC without WAI/STP.
    Rockwell65C02,
}

impl Variant {
    /// The decode table for this variant.
    pub(crate) fn table(self) -> &'static OpcodeTable {
        match self {
            Self::Nmos6502 => &tables::nmos::NMOS,
            Self::Nmos6502Simple => &tables::nmos_simple::NMOS_SIMPLE,
            Self::Wdc65C02 => &tables::cmos::WDC,
            Self::Rockwell65C02 => &tables::cmos::ROCKWELL,
        }
    }

    /// CMOS parts clear D when servicing an interrupt; NMOS parts do not.
    pub(crate) fn is_cmos(self) -> bool {
        matches!(self, Self::Wdc65C02 | Self::Rockwell65C02)
    }

    fn irq_sequence(self) -> Pipeline {
        if self.is_cmos() {
            tables::IRQ_CMOS
        } else {
            tables::IRQ_NMOS
        }
    }

    fn nmi_sequence(self) -> Pipeline {
        if self.is_cmos() {
            tables::NMI_CMOS
        } else {
            tables::NMI_NMOS
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nmos6502 => "NMOS 6502",
            Self::Nmos6502Simple => "NMOS 6502 (no illegal opcodes)",
            Self::Wdc65C02 => "WDC 65C02",
            Self::Rockwell65C02 => "Rockwell 65C02",
        };
        f.write_str(name)
    }
}

/// Error from constructing a [`Variant`] out of a numeric tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownVariant(pub u8);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown CPU variant tag {} (expected 0-3)", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl TryFrom<u8> for Variant {
    type Error = UnknownVariant;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Nmos6502),
            1 => Ok(Self::Nmos6502Simple),
            2 => Ok(Self::Wdc65C02),
            3 => Ok(Self::Rockwell65C02),
            other => Err(UnknownVariant(other)),
        }
    }
}

/// A 65xx CPU instance: a variant, its cached decode table, and the
/// two-slot state buffer.
#[derive(Debug, Clone)]
pub struct Cpu {
    variant: Variant,
    table: &'static OpcodeTable,
    buffer: StateBuffer,
    total_cycles: Ticks,
}

impl Cpu {
    /// Create a CPU over an existing state buffer.
    #[must_use]
    pub fn new(variant: Variant, buffer: StateBuffer) -> Self {
        Self {
            variant,
            table: variant.table(),
            buffer,
            total_cycles: Ticks::ZERO,
        }
    }

    /// Create a CPU with a zeroed buffer.
    #[must_use]
    pub fn with_variant(variant: Variant) -> Self {
        Self::new(variant, StateBuffer::new())
    }

    /// The CPU variant.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The state buffer.
    #[must_use]
    pub fn buffer(&self) -> &StateBuffer {
        &self.buffer
    }

    /// Mutable access to the state buffer.
    pub fn buffer_mut(&mut self) -> &mut StateBuffer {
        &mut self.buffer
    }

    /// Swap in a new buffer, returning the old one. Safe at instruction
    /// boundaries; mid-pipeline the caller owns the transition.
    pub fn swap_buffer(&mut self, buffer: StateBuffer) -> StateBuffer {
        std::mem::replace(&mut self.buffer, buffer)
    }

    /// The committed pre-instruction state.
    #[must_use]
    pub fn prev(&self) -> &CpuState {
        self.buffer.prev()
    }

    /// The live state.
    #[must_use]
    pub fn current(&self) -> &CpuState {
        self.buffer.current()
    }

    /// Total clock ticks since construction.
    #[must_use]
    pub fn total_cycles(&self) -> Ticks {
        self.total_cycles
    }

    // === Interrupt lines ===

    /// Assert the IRQ line. Level-triggered: callers hold it by signalling
    /// every cycle and release it with [`Cpu::clear_irq`]. Latched only if
    /// no higher-priority request is pending.
    pub fn signal_irq(&mut self) {
        let cur = self.buffer.current_mut();
        if cur.pending == PendingInterrupt::None {
            cur.pending = PendingInterrupt::Irq;
        }
    }

    /// Release the IRQ line.
    pub fn clear_irq(&mut self) {
        let cur = self.buffer.current_mut();
        if cur.pending == PendingInterrupt::Irq {
            cur.pending = PendingInterrupt::None;
        }
    }

    /// Assert the NMI line (edge-triggered; consumed when serviced).
    pub fn signal_nmi(&mut self) {
        let cur = self.buffer.current_mut();
        if cur.pending != PendingInterrupt::Reset {
            cur.pending = PendingInterrupt::Nmi;
        }
    }

    /// Assert the RESET line, overriding any other pending request.
    pub fn signal_reset(&mut self) {
        self.buffer.current_mut().pending = PendingInterrupt::Reset;
    }

    // === Engine ===

    /// Advance exactly one clock cycle. Returns true when an instruction
    /// (or interrupt sequence) completed on this cycle.
    pub fn clock<B: Bus>(&mut self, bus: &mut B) -> bool {
        self.total_cycles += Ticks::new(1);

        let (run_state, pending) = {
            let cur = self.buffer.current();
            (cur.run_state, cur.pending)
        };
        match run_state {
            RunState::Running => {}
            RunState::Waiting => {
                // WAI wakes on any latched interrupt, masked or not.
                if pending == PendingInterrupt::None {
                    return true;
                }
                self.buffer.current_mut().run_state = RunState::Running;
            }
            RunState::Stopped | RunState::Jammed => {
                // Only reset restarts a stopped or jammed CPU.
                if pending != PendingInterrupt::Reset {
                    return true;
                }
                self.buffer.current_mut().run_state = RunState::Running;
            }
            RunState::Bypassed => return true,
        }

        if self.buffer.current().pipeline_done() {
            self.begin_next(bus);
        }

        let (prev, cur) = self.buffer.split();
        let op = cur.pipeline[cur.pipeline_index];
        cur.pipeline_index += 1;
        run_micro_op(op, prev, cur, bus);

        self.buffer.current().complete
    }

    /// Run to the end of the current instruction. Returns the cycles
    /// consumed, bounded at 100 to catch malformed pipelines.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> usize {
        let mut cycles = 0;
        while cycles < STEP_CYCLE_LIMIT {
            cycles += 1;
            if self.clock(bus) {
                break;
            }
        }
        cycles
    }

    /// Run exactly `n` cycles, crossing instruction boundaries freely.
    /// Returns `n`.
    pub fn run<B: Bus>(&mut self, bus: &mut B, n: usize) -> usize {
        for _ in 0..n {
            self.clock(bus);
        }
        n
    }

    /// Full reset: state fields to their post-reset values, then the
    /// 7-cycle reset sequence that loads PC from `$FFFC/D`.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.buffer.snapshot();
        let cur = self.buffer.current_mut();
        cur.begin_reset_sequence();
        cur.install(tables::RESET_SEQUENCE);
        while !self.clock(bus) {}
    }

    /// Service an unmasked pending interrupt right now, running its full
    /// sequence. Returns false (and changes nothing) when nothing is
    /// serviceable.
    pub fn handle_pending_interrupt<B: Bus>(&mut self, bus: &mut B) -> bool {
        if !self.pending_serviceable() {
            return false;
        }
        self.buffer.snapshot();
        self.install_pending();
        while !self.clock(bus) {}
        true
    }

    fn pending_serviceable(&self) -> bool {
        let cur = self.buffer.current();
        match cur.pending {
            PendingInterrupt::Reset | PendingInterrupt::Nmi => true,
            PendingInterrupt::Irq => !cur.p.is_set(I),
            PendingInterrupt::None => false,
        }
    }

    /// Instruction boundary: snapshot, then splice an interrupt sequence
    /// or decode the next opcode.
    fn begin_next<B: Bus>(&mut self, bus: &mut B) {
        self.buffer.snapshot();
        if self.pending_serviceable() {
            self.install_pending();
            return;
        }
        let opcode = bus.peek(self.buffer.current().pc);
        let pipeline = self.table[opcode as usize];
        self.buffer.current_mut().install(pipeline);
    }

    /// Install the pending interrupt's sequence and consume the latch.
    /// A masked IRQ is never installed; its latch stays pending.
    fn install_pending(&mut self) {
        let variant = self.variant;
        let cur = self.buffer.current_mut();
        match cur.pending {
            PendingInterrupt::Reset => {
                cur.begin_reset_sequence();
                cur.install(tables::RESET_SEQUENCE);
            }
            PendingInterrupt::Nmi => {
                cur.pending = PendingInterrupt::None;
                cur.run_state = RunState::Running;
                cur.install(variant.nmi_sequence());
            }
            PendingInterrupt::Irq => {
                cur.pending = PendingInterrupt::None;
                cur.run_state = RunState::Running;
                cur.install(variant.irq_sequence());
            }
            PendingInterrupt::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu_core::FlatBus;

    fn cpu_at(variant: Variant, addr: u16, program: &[u8]) -> (Cpu, FlatBus) {
        let mut bus = FlatBus::new();
        bus.load(addr, program);
        bus.set_reset_vector(addr);
        let mut cpu = Cpu::with_variant(variant);
        cpu.reset(&mut bus);
        (cpu, bus)
    }

    #[test]
    fn reset_loads_vector_and_registers() {
        let (cpu, _bus) = cpu_at(Variant::Wdc65C02, 0x0400, &[0xEA]);
        let cur = cpu.current();
        assert_eq!(cur.pc, 0x0400);
        assert_eq!(cur.s, 0xFD);
        assert_eq!(cur.p.bits(), 0x24);
        assert_eq!(cur.a, 0);
        assert_eq!(cur.x, 0);
        assert_eq!(cur.y, 0);
        assert_eq!(cur.run_state, RunState::Running);
        assert_eq!(cur.pending, PendingInterrupt::None);
    }

    #[test]
    fn lda_immediate_takes_two_cycles() {
        // Compliance scenario: LDA #$42 at $0400 on the WDC part.
        let (mut cpu, mut bus) = cpu_at(Variant::Wdc65C02, 0x0400, &[0xA9, 0x42]);
        let cycles = cpu.step(&mut bus);
        assert_eq!(cycles, 2);
        let cur = cpu.current();
        assert_eq!(cur.a, 0x42);
        assert!(!cur.p.is_set(crate::flags::Z));
        assert!(!cur.p.is_set(crate::flags::N));
        assert_eq!(cur.pc, 0x0402);
    }

    #[test]
    fn clc_adc_immediate() {
        // CLC; ADC #$10 with A preloaded to $20.
        let (mut cpu, mut bus) = cpu_at(Variant::Nmos6502, 0x0400, &[0x18, 0x69, 0x10]);
        cpu.buffer_mut().current_mut().a = 0x20;
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        let cur = cpu.current();
        assert_eq!(cur.a, 0x30);
        assert!(!cur.p.is_set(crate::flags::C));
        assert!(!cur.p.is_set(crate::flags::V));
    }

    #[test]
    fn prev_holds_the_pre_instruction_state() {
        let (mut cpu, mut bus) = cpu_at(Variant::Nmos6502, 0x0400, &[0xA9, 0x42]);
        cpu.step(&mut bus);
        assert_eq!(cpu.prev().pc, 0x0400);
        assert_eq!(cpu.prev().a, 0x00);
        assert_eq!(cpu.current().pc, 0x0402);
        assert_eq!(cpu.current().a, 0x42);
        assert_eq!(cpu.current().opcode, 0xA9);
        assert_eq!(cpu.current().opcode_addr, 0x0400);
    }

    #[test]
    fn jam_locks_until_reset() {
        let (mut cpu, mut bus) = cpu_at(Variant::Nmos6502, 0x0400, &[0x02]);
        assert_eq!(cpu.step(&mut bus), 2);
        assert_eq!(cpu.current().run_state, RunState::Jammed);
        let pc = cpu.current().pc;
        // Clocking a jammed CPU does nothing.
        for _ in 0..10 {
            assert!(cpu.clock(&mut bus));
        }
        assert_eq!(cpu.current().pc, pc);
        cpu.reset(&mut bus);
        assert_eq!(cpu.current().run_state, RunState::Running);
        assert_eq!(cpu.current().pc, 0x0400);
    }

    #[test]
    fn simple_variant_has_no_jam() {
        let (mut cpu, mut bus) = cpu_at(Variant::Nmos6502Simple, 0x0400, &[0x02, 0xEA]);
        assert_eq!(cpu.step(&mut bus), 1);
        assert_eq!(cpu.current().run_state, RunState::Running);
        assert_eq!(cpu.current().pc, 0x0401);
    }

    #[test]
    fn reset_contract_holds_for_every_variant() {
        for tag in 0..4u8 {
            let variant = Variant::try_from(tag).expect("valid tag");
            let mut bus = FlatBus::new();
            bus.set_reset_vector(0x1234);
            let mut cpu = Cpu::with_variant(variant);
            // Start from a scrambled state.
            {
                let cur = cpu.buffer_mut().current_mut();
                cur.a = 0xAA;
                cur.x = 0xBB;
                cur.y = 0xCC;
                cur.s = 0x13;
                cur.p.set(crate::flags::D);
                cur.run_state = RunState::Stopped;
            }
            cpu.reset(&mut bus);
            let cur = cpu.current();
            assert_eq!(cur.a, 0, "{variant}");
            assert_eq!(cur.x, 0, "{variant}");
            assert_eq!(cur.y, 0, "{variant}");
            assert_eq!(cur.s, 0xFD, "{variant}");
            assert_eq!(cur.p.bits(), 0x24, "{variant}");
            assert_eq!(cur.pc, 0x1234, "{variant}");
            assert_eq!(cur.run_state, RunState::Running, "{variant}");
            assert_eq!(cur.pending, PendingInterrupt::None, "{variant}");
        }
    }

    #[test]
    fn unknown_variant_tag_is_rejected() {
        assert_eq!(Variant::try_from(2), Ok(Variant::Wdc65C02));
        assert!(Variant::try_from(4).is_err());
        let err = Variant::try_from(0xFF).unwrap_err();
        assert_eq!(err.to_string(), "unknown CPU variant tag 255 (expected 0-3)");
    }

    #[test]
    fn halted_states_complete_without_bus_traffic() {
        let mut bus = FlatBus::new();
        let mut cpu = Cpu::with_variant(Variant::Nmos6502);
        for halted in [RunState::Stopped, RunState::Jammed, RunState::Bypassed] {
            cpu.buffer_mut().current_mut().run_state = halted;
            let before = bus.accesses();
            assert!(cpu.clock(&mut bus));
            assert_eq!(cpu.step(&mut bus), 1);
            assert_eq!(bus.accesses(), before);
        }
    }
}
