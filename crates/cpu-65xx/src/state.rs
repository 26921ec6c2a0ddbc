//! Register state and the before/after state buffer.
//!
//! The buffer holds two state slots. `prev` is a snapshot taken at the
//! moment a new instruction (or interrupt sequence) is installed; `current`
//! is the only slot the engine mutates. After a completed instruction the
//! two slots differ by exactly that instruction's effects.

use emu_core::Bus;

use crate::flags::Status;
use crate::microcode::MicroOp;

/// A pipeline is a fixed, ordered micro-op schedule for one opcode (or one
/// interrupt sequence). One micro-op per clock cycle.
pub(crate) type Pipeline = &'static [MicroOp];

const EMPTY_PIPELINE: Pipeline = &[];

/// CPU execution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Normal execution.
    #[default]
    Running,
    /// WAI executed; no cycles consumed until an interrupt is latched.
    Waiting,
    /// STP executed; only reset restarts the CPU.
    Stopped,
    /// An NMOS JAM opcode locked the CPU; only reset restarts it.
    Jammed,
    /// An external agent owns the state; the engine does not drive it.
    Bypassed,
}

/// Latched interrupt request. At most one is held, highest priority wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingInterrupt {
    #[default]
    None,
    Irq,
    Nmi,
    Reset,
}

/// One state slot: registers, flags, interrupt latch, and pipeline cursor.
#[derive(Debug, Clone, Copy)]
pub struct CpuState {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer; the stack lives at `$0100 + s`.
    pub s: u8,
    /// Program counter.
    pub pc: u16,
    /// Status register.
    pub p: Status,
    /// Execution status.
    pub run_state: RunState,
    /// Latched interrupt request.
    pub pending: PendingInterrupt,
    /// Opcode byte of the instruction currently executing.
    pub opcode: u8,
    /// Address the opcode was fetched from.
    pub opcode_addr: u16,

    // Pipeline cursor.
    pub(crate) pipeline: Pipeline,
    pub(crate) pipeline_index: usize,
    pub(crate) complete: bool,

    // Scratch registers used by the micro-ops.
    pub(crate) addr: u16,
    pub(crate) ptr: u8,
    pub(crate) data: u8,
    pub(crate) fixup: bool,
}

impl Default for CpuState {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuState {
    /// A zeroed state slot with an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: 0,
            pc: 0,
            p: Status::power_on(),
            run_state: RunState::Running,
            pending: PendingInterrupt::None,
            opcode: 0,
            opcode_addr: 0,
            pipeline: EMPTY_PIPELINE,
            pipeline_index: 0,
            complete: false,
            addr: 0,
            ptr: 0,
            data: 0,
            fixup: false,
        }
    }

    /// True when the current pipeline has run out (or completed early) and
    /// the next tick begins a new instruction.
    pub(crate) fn pipeline_done(&self) -> bool {
        self.complete || self.pipeline_index >= self.pipeline.len()
    }

    /// Install a new pipeline. The cursor rewinds and the completion flag
    /// clears; the caller is responsible for the pre-install snapshot.
    pub(crate) fn install(&mut self, pipeline: Pipeline) {
        self.pipeline = pipeline;
        self.pipeline_index = 0;
        self.complete = false;
    }

    /// Terminal micro-ops call this to end the instruction.
    pub(crate) fn finish(&mut self) {
        self.complete = true;
    }

    /// Effective stack address for the current stack pointer.
    pub(crate) fn stack_addr(&self) -> u16 {
        0x0100 | u16::from(self.s)
    }

    /// Reset all state fields to the post-reset values. PC is left for the
    /// vector load. A latched Reset survives; other latches clear.
    pub(crate) fn reset_fields(&mut self) {
        let keep_reset = self.pending == PendingInterrupt::Reset;
        *self = Self::new();
        self.s = 0xFD;
        if keep_reset {
            self.pending = PendingInterrupt::Reset;
        }
    }

    /// Set up for the 7-cycle reset sequence: the stack pointer starts at
    /// zero and the three stack-read cycles walk it down to `$FD`; I is
    /// set by the vector fetch.
    pub(crate) fn begin_reset_sequence(&mut self) {
        let pc = self.pc;
        self.reset_fields();
        self.pc = pc;
        self.s = 0x00;
        self.p = Status::reset_base();
        self.pending = PendingInterrupt::None;
    }
}

/// Two-slot state buffer with the snapshot discipline.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateBuffer {
    prev: CpuState,
    current: CpuState,
}

impl StateBuffer {
    /// A buffer with both slots zeroed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed state at the start of the executing instruction.
    #[must_use]
    pub fn prev(&self) -> &CpuState {
        &self.prev
    }

    /// The live state the engine mutates.
    #[must_use]
    pub fn current(&self) -> &CpuState {
        &self.current
    }

    /// Mutable access to the live state.
    pub fn current_mut(&mut self) -> &mut CpuState {
        &mut self.current
    }

    /// Reset the live slot's fields to post-reset values (SP=$FD, P=$24,
    /// registers cleared, pipeline empty). PC is loaded separately with
    /// [`StateBuffer::load_reset_vector`].
    pub fn reset(&mut self) {
        self.current.reset_fields();
    }

    /// Load PC from the reset vector at `$FFFC/D` without bus cycles.
    pub fn load_reset_vector<B: Bus>(&mut self, bus: &B) {
        let lo = u16::from(bus.peek(0xFFFC));
        let hi = u16::from(bus.peek(0xFFFD));
        self.current.pc = lo | (hi << 8);
    }

    /// Take the pre-instruction snapshot: `prev := current`, field for
    /// field. The engine calls this exactly when a new pipeline is about
    /// to be installed, never on completion.
    pub fn snapshot(&mut self) {
        self.prev = self.current;
    }

    /// Both slots at once, for the micro-op dispatch signature.
    pub(crate) fn split(&mut self) -> (&CpuState, &mut CpuState) {
        (&self.prev, &mut self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_copies_every_field() {
        let mut buffer = StateBuffer::new();
        buffer.current_mut().a = 0x42;
        buffer.current_mut().pc = 0x1234;
        buffer.current_mut().fixup = true;
        buffer.snapshot();
        assert_eq!(buffer.prev().a, 0x42);
        assert_eq!(buffer.prev().pc, 0x1234);
        assert!(buffer.prev().fixup);
    }

    #[test]
    fn reset_preserves_a_latched_reset() {
        let mut buffer = StateBuffer::new();
        buffer.current_mut().pending = PendingInterrupt::Reset;
        buffer.reset();
        assert_eq!(buffer.current().pending, PendingInterrupt::Reset);

        buffer.current_mut().pending = PendingInterrupt::Irq;
        buffer.reset();
        assert_eq!(buffer.current().pending, PendingInterrupt::None);
    }

    #[test]
    fn reset_fields_match_power_on_contract() {
        let mut buffer = StateBuffer::new();
        buffer.current_mut().a = 0xFF;
        buffer.current_mut().s = 0x10;
        buffer.current_mut().run_state = RunState::Jammed;
        buffer.reset();
        let cur = buffer.current();
        assert_eq!(cur.a, 0);
        assert_eq!(cur.x, 0);
        assert_eq!(cur.y, 0);
        assert_eq!(cur.s, 0xFD);
        assert_eq!(cur.p.bits(), 0x24);
        assert_eq!(cur.run_state, RunState::Running);
        assert!(cur.pipeline_done());
    }
}
