//! Simplified NMOS 6502 decode table.
//!
//! Documented opcodes behave exactly as on the full NMOS table. Illegal
//! opcodes become harmless NOPs with the documented cycle count for their
//! group (1 for the JAM slots, 2 for implied/immediate, 3 for zero page,
//! 4 for everything longer) and keep the replaced opcode's byte length so
//! surrounding code still decodes. The NOP filler cycles touch the bus
//! not at all.

use super::*;
use crate::microcode::MicroOp::*;
use crate::state::Pipeline;

const NOP_JAM: Pipeline = &[FetchLast];
const NOP_IMP: Pipeline = &[FetchOpcode, IdleLast];
const NOP_IMM: Pipeline = &[FetchOpcode, IdleSkipLast];
const NOP_ZP: Pipeline = &[FetchOpcode, IdleSkip, IdleLast];
const NOP_ZPI: Pipeline = &[FetchOpcode, IdleSkip, IdleCycle, IdleLast];
const NOP_ABS: Pipeline = &[FetchOpcode, IdleSkip, IdleSkip, IdleLast];

/// The former JAM slots: one cycle, no lock-up.
const JAM_SLOTS: &[u8] = &[
    0x02, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2,
];

/// Single-byte illegals.
const IMPLIED_SLOTS: &[u8] = &[0x1A, 0x3A, 0x5A, 0x7A, 0xDA, 0xFA];

/// Two-byte immediate illegals.
const IMM_SLOTS: &[u8] = &[
    0x0B, 0x2B, 0x4B, 0x6B, 0x80, 0x82, 0x89, 0x8B, 0xAB, 0xC2, 0xCB, 0xE2, 0xEB,
];

/// Two-byte zero-page illegals.
const ZP_SLOTS: &[u8] = &[0x04, 0x07, 0x27, 0x44, 0x47, 0x64, 0x67, 0x87, 0xA7, 0xC7, 0xE7];

/// Two-byte indexed and indirect illegals.
const ZPI_SLOTS: &[u8] = &[
    0x03, 0x13, 0x14, 0x17, 0x23, 0x33, 0x34, 0x37, 0x43, 0x53, 0x54, 0x57, 0x63, 0x73, 0x74,
    0x77, 0x83, 0x93, 0x97, 0xA3, 0xB3, 0xB7, 0xC3, 0xD3, 0xD4, 0xD7, 0xE3, 0xF3, 0xF4, 0xF7,
];

/// Three-byte illegals.
const ABS_SLOTS: &[u8] = &[
    0x0C, 0x0F, 0x1B, 0x1C, 0x1F, 0x2F, 0x3B, 0x3C, 0x3F, 0x4F, 0x5B, 0x5C, 0x5F, 0x6F, 0x7B,
    0x7C, 0x7F, 0x8F, 0x9B, 0x9C, 0x9E, 0x9F, 0xAF, 0xBB, 0xBF, 0xCF, 0xDB, 0xDC, 0xDF, 0xEF,
    0xFB, 0xFC, 0xFF,
];

const fn patch(mut table: OpcodeTable, opcodes: &[u8], pipeline: Pipeline) -> OpcodeTable {
    let mut i = 0;
    while i < opcodes.len() {
        table[opcodes[i] as usize] = pipeline;
        i += 1;
    }
    table
}

pub(crate) const NMOS_SIMPLE: OpcodeTable = {
    let mut table = nmos::NMOS;
    table = patch(table, JAM_SLOTS, NOP_JAM);
    table = patch(table, IMPLIED_SLOTS, NOP_IMP);
    table = patch(table, IMM_SLOTS, NOP_IMM);
    table = patch(table, ZP_SLOTS, NOP_ZP);
    table = patch(table, ZPI_SLOTS, NOP_ZPI);
    table = patch(table, ABS_SLOTS, NOP_ABS);
    table
};
