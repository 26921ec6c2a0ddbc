//! Micro-operation definitions for cycle-accurate 65xx execution.
//!
//! Every opcode decomposes into a fixed schedule of micro-ops, one per
//! clock cycle. A micro-op performs at most one bus access and mutates
//! only the current state slot. Terminal micro-ops end the instruction
//! themselves; conditional ops (branches, page-cross fixups, the CMOS
//! decimal penalty) end it early or decline to end it, which is how
//! variable-length opcodes fit fixed schedules.

/// Index register selector for indexed addressing micro-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Index {
    X,
    Y,
}

/// Interrupt/BRK vector selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Vector {
    Nmi,
    Reset,
    IrqBrk,
}

impl Vector {
    /// Low byte address of the vector; the high byte follows it.
    pub(crate) const fn addr(self) -> u16 {
        match self {
            Self::Nmi => 0xFFFA,
            Self::Reset => 0xFFFC,
            Self::IrqBrk => 0xFFFE,
        }
    }
}

/// Branch conditions, evaluated against the current P register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cond {
    CarryClear,
    CarrySet,
    NotZero,
    Zero,
    Plus,
    Minus,
    OverflowClear,
    OverflowSet,
    /// BRA on the CMOS parts.
    Always,
}

/// Operations applied in the same cycle as the data read.
///
/// On silicon the ALU result lands while the next cycle is already being
/// scheduled, so a data-read micro-op carries the operation it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Alu {
    Adc,
    /// CMOS ADC: decimal mode re-derives N/Z from the corrected result
    /// and hands completion to the trailing penalty cycle.
    AdcCmos,
    Sbc,
    SbcCmos,
    And,
    Ora,
    Eor,
    Cmp,
    Cpx,
    Cpy,
    Bit,
    /// BIT immediate (CMOS): only Z is affected.
    BitImm,
    Lda,
    Ldx,
    Ldy,
    /// LAX: LDA + LDX in one.
    Lax,
    /// ANC: AND, then copy N into C.
    Anc,
    /// ALR: AND, then LSR A.
    Alr,
    /// ARR: AND, ROR A, C/V from bits 6/5, with the NMOS decimal fixup.
    Arr,
    /// XAA: A = (A | magic) & X & operand.
    Xaa,
    /// LXA: A = X = (A | magic) & operand.
    Lxa,
    /// AXS: X = (A & X) - operand, C as an unsigned compare.
    Axs,
    /// LAS: A = X = S = operand & S.
    Las,
    /// Read and discard (multi-byte NOPs).
    Ign,
}

/// Read-modify-write operations, applied in the modify cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rmw {
    Asl,
    Lsr,
    Rol,
    Ror,
    Inc,
    Dec,
    /// SLO: ASL memory, then ORA the result into A.
    Slo,
    /// RLA: ROL memory, then AND the result into A.
    Rla,
    /// SRE: LSR memory, then EOR the result into A.
    Sre,
    /// RRA: ROR memory, then ADC the result into A.
    Rra,
    /// DCP: DEC memory, then CMP A against the result.
    Dcp,
    /// ISC: INC memory, then SBC the result from A.
    Isc,
    /// TSB: Z from A & mem, then set the A bits in memory.
    Tsb,
    /// TRB: Z from A & mem, then clear the A bits in memory.
    Trb,
    /// RMB0-7: clear one bit in zero page, no flags.
    Rmb(u8),
    /// SMB0-7: set one bit in zero page, no flags.
    Smb(u8),
}

/// Value source for store micro-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Store {
    A,
    X,
    Y,
    /// STZ (CMOS).
    Zero,
    /// SAX: A & X.
    Ax,
    /// SHX: X & (high byte of the target + 1).
    ShxH,
    /// SHY: Y & (high byte of the target + 1).
    ShyH,
    /// AHX: A & X & (high byte of the target + 1).
    AhxH,
    /// TAS: S = A & X, store S & (high byte of the target + 1).
    TasH,
}

/// Value source for stack push micro-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PushSource {
    A,
    X,
    Y,
    /// P with B set (BRK/PHP).
    StatusBrk,
    /// P with B clear (IRQ/NMI).
    StatusIrq,
    Pch,
    Pcl,
}

/// Destination for terminal stack pull micro-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PullTarget {
    A,
    X,
    Y,
    Status,
}

/// Single-byte operations that execute during the dummy read after the
/// opcode fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImpliedOp {
    Tax,
    Tay,
    Txa,
    Tya,
    Tsx,
    Txs,
    Inx,
    Iny,
    Dex,
    Dey,
    AslA,
    LsrA,
    RolA,
    RorA,
    IncA,
    DecA,
    Clc,
    Sec,
    Cli,
    Sei,
    Clv,
    Cld,
    Sed,
    Nop,
}

/// A single one-cycle micro-operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MicroOp {
    // === Opcode fetch ===
    /// Read the opcode at PC, record it and its address, PC += 1.
    FetchOpcode,
    /// Same, but the instruction is one cycle long (CMOS undefined NOPs).
    FetchLast,

    // === Operand and address fetch ===
    /// Read the operand at PC, PC += 1, apply the ALU op. Terminal.
    ReadImm(Alu),
    /// addr low byte from PC, PC += 1.
    FetchAdl,
    /// addr high byte from PC, PC += 1.
    FetchAdh,
    /// addr high byte from PC; index added to the low byte, page-cross
    /// recorded in the fixup flag; PC += 1.
    FetchAdhIndex(Index),
    /// addr high byte from PC; jump there (JMP absolute). Terminal.
    FetchAdhJump,
    /// Zero-page pointer from PC into ptr (and addr); PC += 1.
    FetchPointer,
    /// Dummy read at ptr while the index is added (zero-page wrap).
    IndexPointer(Index),
    /// addr low byte from [ptr].
    ReadPointerLo,
    /// addr high byte from [ptr+1], zero-page wrap.
    ReadPointerHi,
    /// addr high byte from [ptr+1]; Y added to the low byte, page-cross
    /// recorded in the fixup flag.
    ReadPointerHiIndex,
    /// Internal cycle adding an index to the full 16-bit addr
    /// (JMP (abs,X)).
    IndexAddr(Index),
    /// Indirect jump target low byte from [addr].
    ReadIndirectLo,
    /// Indirect jump target high byte; the pointer wraps within the page
    /// (the NMOS JMP ($xxFF) bug). Terminal.
    ReadIndirectHiBug,
    /// Indirect jump target high byte from [addr+1]. Terminal.
    ReadIndirectHi,

    // === Data access ===
    /// Read [addr], apply the ALU op. Terminal.
    ReadEffective(Alu),
    /// Page-cross probe: without a cross this is the data read (terminal,
    /// the fixup cycle is skipped); with one it is the wrong-page dummy
    /// read and the high byte is corrected.
    ReadIndexed(Alu),
    /// Read from the corrected address, apply the ALU op. Terminal.
    ReadFixed(Alu),
    /// Read [addr] into the data latch (RMW).
    ReadData,
    /// Dummy read at the possibly-wrong address; always fix the high byte
    /// (indexed writes and RMW, which take the worst-case count).
    ReadFixAlways,
    /// NMOS RMW modify cycle: write the original value back, then modify
    /// the latch.
    DummyWrite(Rmw),
    /// CMOS RMW modify cycle: read the address again, then modify the
    /// latch.
    ReadAgain(Rmw),
    /// Write the data latch to [addr]. Terminal.
    WriteData,
    /// Write a register-derived value to [addr]. Terminal.
    WriteEffective(Store),

    // === Implied and internal cycles ===
    /// Dummy read at PC, apply a single-byte operation. Terminal.
    Implied(ImpliedOp),
    /// Dummy read at PC, no effect.
    InternalCycle,
    /// Internal cycle with no bus access at all.
    IdleCycle,
    /// As IdleCycle, but terminal (simplified illegal-NOP schedules).
    IdleLast,
    /// No bus access; PC steps over an operand byte (simplified illegal
    /// NOPs keep the instruction length of the opcode they replace).
    IdleSkip,
    /// As IdleSkip, but terminal.
    IdleSkipLast,
    /// Extra cycle taken by CMOS decimal ADC/SBC. Terminal.
    DecimalPenalty,

    // === Branches ===
    /// Read the displacement at PC, PC += 1; a failed condition ends the
    /// instruction here.
    BranchOperand(Cond),
    /// Displacement read for BBR/BBS, testing a bit of the zero-page byte
    /// fetched earlier.
    BitBranch { bit: u8, expect_set: bool },
    /// Dummy read while the target is formed; same-page targets jump and
    /// end here.
    BranchTake,
    /// Wrong-page dummy read, then jump across the page. Terminal.
    BranchFixPage,

    // === Stack ===
    /// Dummy read at the current stack address.
    StackDummy,
    /// Push one byte; S -= 1.
    Push(PushSource),
    /// S += 1, pull into a register (with flag updates). Terminal.
    Pull(PullTarget),
    /// S += 1, pull P mid-instruction (RTI).
    PullStatus,
    /// S += 1, pull the return address low byte.
    PullPcl,
    /// S += 1, pull the high byte and jump (RTI). Terminal.
    PullPchJump,
    /// Pull the high byte, then the extra cycle that steps past the JSR
    /// return address (RTS). Non-terminal: the increment cycle follows.
    PullPch,
    /// Dummy read at the pulled address; PC = addr + 1 (RTS). Terminal.
    RtsFinish,
    /// Read the JSR target high byte at PC and jump. Terminal.
    JsrJump,
    /// BRK signature byte: read at PC, PC += 1.
    BrkPad,

    // === Interrupt sequencing ===
    /// Vector low byte into the data latch.
    VectorLo(Vector),
    /// Vector high byte; jump, set I, optionally clear D. Terminal.
    VectorHi { vector: Vector, clear_d: bool },
    /// Reset's fake stack push: read at the stack address, S -= 1.
    ResetStack,

    // === Control ===
    /// NMOS JAM: lock the CPU until reset. Terminal.
    Jam,
    /// WAI: wait for an interrupt line. Terminal.
    Wait,
    /// STP: stop until reset. Terminal.
    Stop,
}
