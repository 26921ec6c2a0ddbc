//! Per-variant opcode pipeline tables.
//!
//! One 256-entry table per CPU variant. Each entry is a fixed micro-op
//! schedule whose length equals the opcode's documented cycle count;
//! variable-length opcodes (branches, page crossings, CMOS decimal
//! arithmetic) use conditional micro-ops inside a worst-case schedule.
//!
//! The macros below spell out the addressing-mode skeletons once; the
//! table files list all 256 opcodes with one line each.

use crate::microcode::MicroOp::{self, *};
use crate::microcode::{PushSource, PullTarget, Vector};
use crate::state::Pipeline;

pub(crate) mod cmos;
pub(crate) mod nmos;
pub(crate) mod nmos_simple;

/// A full decode table: one pipeline per opcode byte.
pub(crate) type OpcodeTable = [Pipeline; 256];

// === Addressing-mode skeletons ===
//
// `rd_*` read the operand and apply an ALU op in the access cycle.
// `wr_*` store a register-derived value. `rmw_*` are the NMOS
// read-modify-write shapes (dummy write in the modify cycle); `rmwc_*`
// the CMOS ones (second read instead). Extra trailing ops (the CMOS
// decimal penalty) can be appended at the call site.

macro_rules! rd_imm {
    ($alu:ident $(, $tail:expr)*) => {
        &[FetchOpcode, ReadImm(crate::microcode::Alu::$alu) $(, $tail)*]
    };
}

macro_rules! rd_zp {
    ($alu:ident $(, $tail:expr)*) => {
        &[FetchOpcode, FetchPointer, ReadEffective(crate::microcode::Alu::$alu) $(, $tail)*]
    };
}

macro_rules! rd_zpi {
    ($idx:ident, $alu:ident $(, $tail:expr)*) => {
        &[
            FetchOpcode,
            FetchPointer,
            IndexPointer(crate::microcode::Index::$idx),
            ReadEffective(crate::microcode::Alu::$alu)
            $(, $tail)*
        ]
    };
}

macro_rules! rd_abs {
    ($alu:ident $(, $tail:expr)*) => {
        &[FetchOpcode, FetchAdl, FetchAdh, ReadEffective(crate::microcode::Alu::$alu) $(, $tail)*]
    };
}

macro_rules! rd_abi {
    ($idx:ident, $alu:ident $(, $tail:expr)*) => {
        &[
            FetchOpcode,
            FetchAdl,
            FetchAdhIndex(crate::microcode::Index::$idx),
            ReadIndexed(crate::microcode::Alu::$alu),
            ReadFixed(crate::microcode::Alu::$alu)
            $(, $tail)*
        ]
    };
}

macro_rules! rd_izx {
    ($alu:ident $(, $tail:expr)*) => {
        &[
            FetchOpcode,
            FetchPointer,
            IndexPointer(crate::microcode::Index::X),
            ReadPointerLo,
            ReadPointerHi,
            ReadEffective(crate::microcode::Alu::$alu)
            $(, $tail)*
        ]
    };
}

macro_rules! rd_izy {
    ($alu:ident $(, $tail:expr)*) => {
        &[
            FetchOpcode,
            FetchPointer,
            ReadPointerLo,
            ReadPointerHiIndex,
            ReadIndexed(crate::microcode::Alu::$alu),
            ReadFixed(crate::microcode::Alu::$alu)
            $(, $tail)*
        ]
    };
}

macro_rules! rd_izp {
    ($alu:ident $(, $tail:expr)*) => {
        &[
            FetchOpcode,
            FetchPointer,
            ReadPointerLo,
            ReadPointerHi,
            ReadEffective(crate::microcode::Alu::$alu)
            $(, $tail)*
        ]
    };
}

macro_rules! wr_zp {
    ($src:ident) => {
        &[FetchOpcode, FetchPointer, WriteEffective(crate::microcode::Store::$src)]
    };
}

macro_rules! wr_zpi {
    ($idx:ident, $src:ident) => {
        &[
            FetchOpcode,
            FetchPointer,
            IndexPointer(crate::microcode::Index::$idx),
            WriteEffective(crate::microcode::Store::$src),
        ]
    };
}

macro_rules! wr_abs {
    ($src:ident) => {
        &[FetchOpcode, FetchAdl, FetchAdh, WriteEffective(crate::microcode::Store::$src)]
    };
}

macro_rules! wr_abi {
    ($idx:ident, $src:ident) => {
        &[
            FetchOpcode,
            FetchAdl,
            FetchAdhIndex(crate::microcode::Index::$idx),
            ReadFixAlways,
            WriteEffective(crate::microcode::Store::$src),
        ]
    };
}

macro_rules! wr_izx {
    ($src:ident) => {
        &[
            FetchOpcode,
            FetchPointer,
            IndexPointer(crate::microcode::Index::X),
            ReadPointerLo,
            ReadPointerHi,
            WriteEffective(crate::microcode::Store::$src),
        ]
    };
}

macro_rules! wr_izy {
    ($src:ident) => {
        &[
            FetchOpcode,
            FetchPointer,
            ReadPointerLo,
            ReadPointerHiIndex,
            ReadFixAlways,
            WriteEffective(crate::microcode::Store::$src),
        ]
    };
}

macro_rules! wr_izp {
    ($src:ident) => {
        &[
            FetchOpcode,
            FetchPointer,
            ReadPointerLo,
            ReadPointerHi,
            WriteEffective(crate::microcode::Store::$src),
        ]
    };
}

macro_rules! rmw_zp {
    ($op:expr) => {
        &[FetchOpcode, FetchPointer, ReadData, DummyWrite($op), WriteData]
    };
}

macro_rules! rmw_zpx {
    ($op:expr) => {
        &[
            FetchOpcode,
            FetchPointer,
            IndexPointer(crate::microcode::Index::X),
            ReadData,
            DummyWrite($op),
            WriteData,
        ]
    };
}

macro_rules! rmw_abs {
    ($op:expr) => {
        &[FetchOpcode, FetchAdl, FetchAdh, ReadData, DummyWrite($op), WriteData]
    };
}

macro_rules! rmw_abi {
    ($idx:ident, $op:expr) => {
        &[
            FetchOpcode,
            FetchAdl,
            FetchAdhIndex(crate::microcode::Index::$idx),
            ReadFixAlways,
            ReadData,
            DummyWrite($op),
            WriteData,
        ]
    };
}

macro_rules! rmw_izx {
    ($op:expr) => {
        &[
            FetchOpcode,
            FetchPointer,
            IndexPointer(crate::microcode::Index::X),
            ReadPointerLo,
            ReadPointerHi,
            ReadData,
            DummyWrite($op),
            WriteData,
        ]
    };
}

macro_rules! rmw_izy {
    ($op:expr) => {
        &[
            FetchOpcode,
            FetchPointer,
            ReadPointerLo,
            ReadPointerHiIndex,
            ReadFixAlways,
            ReadData,
            DummyWrite($op),
            WriteData,
        ]
    };
}

macro_rules! rmwc_zp {
    ($op:expr) => {
        &[FetchOpcode, FetchPointer, ReadData, ReadAgain($op), WriteData]
    };
}

macro_rules! rmwc_zpx {
    ($op:expr) => {
        &[
            FetchOpcode,
            FetchPointer,
            IndexPointer(crate::microcode::Index::X),
            ReadData,
            ReadAgain($op),
            WriteData,
        ]
    };
}

macro_rules! rmwc_abs {
    ($op:expr) => {
        &[FetchOpcode, FetchAdl, FetchAdh, ReadData, ReadAgain($op), WriteData]
    };
}

macro_rules! rmwc_abx {
    ($op:expr) => {
        &[
            FetchOpcode,
            FetchAdl,
            FetchAdhIndex(crate::microcode::Index::X),
            ReadFixAlways,
            ReadData,
            ReadAgain($op),
            WriteData,
        ]
    };
}

macro_rules! branch {
    ($cond:ident) => {
        &[
            FetchOpcode,
            BranchOperand(crate::microcode::Cond::$cond),
            BranchTake,
            BranchFixPage,
        ]
    };
}

macro_rules! bit_branch {
    ($bit:literal, $set:literal) => {
        &[
            FetchOpcode,
            FetchPointer,
            ReadData,
            InternalCycle,
            BitBranch { bit: $bit, expect_set: $set },
            BranchTake,
            BranchFixPage,
        ]
    };
}

macro_rules! imp {
    ($op:ident) => {
        &[FetchOpcode, Implied(crate::microcode::ImpliedOp::$op)]
    };
}

pub(crate) use {
    bit_branch, branch, imp, rd_abi, rd_abs, rd_imm, rd_izp, rd_izx, rd_izy, rd_zp, rd_zpi,
    rmw_abi, rmw_abs, rmw_izx, rmw_izy, rmw_zp, rmw_zpx, rmwc_abs, rmwc_abx, rmwc_zp, rmwc_zpx,
    wr_abi, wr_abs, wr_izp, wr_izx, wr_izy, wr_zp, wr_zpi,
};

// === Shared single-opcode schedules ===

pub(crate) const BRK_NMOS: Pipeline = &[
    FetchOpcode,
    BrkPad,
    Push(PushSource::Pch),
    Push(PushSource::Pcl),
    Push(PushSource::StatusBrk),
    VectorLo(Vector::IrqBrk),
    VectorHi { vector: Vector::IrqBrk, clear_d: false },
];

pub(crate) const BRK_CMOS: Pipeline = &[
    FetchOpcode,
    BrkPad,
    Push(PushSource::Pch),
    Push(PushSource::Pcl),
    Push(PushSource::StatusBrk),
    VectorLo(Vector::IrqBrk),
    VectorHi { vector: Vector::IrqBrk, clear_d: true },
];

pub(crate) const PHP: Pipeline = &[FetchOpcode, InternalCycle, Push(PushSource::StatusBrk)];
pub(crate) const PHA: Pipeline = &[FetchOpcode, InternalCycle, Push(PushSource::A)];
pub(crate) const PHX: Pipeline = &[FetchOpcode, InternalCycle, Push(PushSource::X)];
pub(crate) const PHY: Pipeline = &[FetchOpcode, InternalCycle, Push(PushSource::Y)];

pub(crate) const PLP: Pipeline =
    &[FetchOpcode, InternalCycle, StackDummy, Pull(PullTarget::Status)];
pub(crate) const PLA: Pipeline = &[FetchOpcode, InternalCycle, StackDummy, Pull(PullTarget::A)];
pub(crate) const PLX: Pipeline = &[FetchOpcode, InternalCycle, StackDummy, Pull(PullTarget::X)];
pub(crate) const PLY: Pipeline = &[FetchOpcode, InternalCycle, StackDummy, Pull(PullTarget::Y)];

pub(crate) const JSR: Pipeline = &[
    FetchOpcode,
    FetchAdl,
    StackDummy,
    Push(PushSource::Pch),
    Push(PushSource::Pcl),
    JsrJump,
];

pub(crate) const RTS: Pipeline =
    &[FetchOpcode, InternalCycle, StackDummy, PullPcl, PullPch, RtsFinish];

pub(crate) const RTI: Pipeline =
    &[FetchOpcode, InternalCycle, StackDummy, PullStatus, PullPcl, PullPchJump];

pub(crate) const JMP_ABS: Pipeline = &[FetchOpcode, FetchAdl, FetchAdhJump];

/// NMOS indirect jump: the pointer high byte wraps within the page.
pub(crate) const JMP_IND_NMOS: Pipeline =
    &[FetchOpcode, FetchAdl, FetchAdh, ReadIndirectLo, ReadIndirectHiBug];

/// CMOS indirect jump: page crossing fixed, one cycle longer.
pub(crate) const JMP_IND_CMOS: Pipeline = &[
    FetchOpcode,
    FetchAdl,
    FetchAdh,
    InternalCycle,
    ReadIndirectLo,
    ReadIndirectHi,
];

pub(crate) const JMP_ABX_IND: Pipeline = &[
    FetchOpcode,
    FetchAdl,
    FetchAdh,
    IndexAddr(crate::microcode::Index::X),
    ReadIndirectLo,
    ReadIndirectHi,
];

pub(crate) const JAM_PIPE: Pipeline = &[FetchOpcode, Jam];
pub(crate) const WAI_PIPE: Pipeline = &[FetchOpcode, InternalCycle, Wait];
pub(crate) const STP_PIPE: Pipeline = &[FetchOpcode, InternalCycle, Stop];

/// CMOS undefined opcodes decode as single-cycle NOPs.
pub(crate) const NOP1: Pipeline = &[FetchLast];

// === Interrupt and reset sequences ===
//
// Not reachable through the decode tables; the engine installs these at
// instruction boundaries.

macro_rules! interrupt_sequence {
    ($vector:ident, $clear_d:literal) => {
        &[
            InternalCycle,
            InternalCycle,
            Push(PushSource::Pch),
            Push(PushSource::Pcl),
            Push(PushSource::StatusIrq),
            VectorLo(Vector::$vector),
            VectorHi { vector: Vector::$vector, clear_d: $clear_d },
        ]
    };
}

pub(crate) const IRQ_NMOS: Pipeline = interrupt_sequence!(IrqBrk, false);
pub(crate) const IRQ_CMOS: Pipeline = interrupt_sequence!(IrqBrk, true);
pub(crate) const NMI_NMOS: Pipeline = interrupt_sequence!(Nmi, false);
pub(crate) const NMI_CMOS: Pipeline = interrupt_sequence!(Nmi, true);

/// The 7-cycle reset sequence: two internal cycles, three fake stack
/// pushes that walk S from $00 down to $FD, then the vector fetch.
pub(crate) const RESET_SEQUENCE: Pipeline = &[
    InternalCycle,
    InternalCycle,
    ResetStack,
    ResetStack,
    ResetStack,
    VectorLo(Vector::Reset),
    VectorHi { vector: Vector::Reset, clear_d: true },
];
