//! Central micro-op dispatch.
//!
//! `run_micro_op` executes exactly one micro-op: at most one bus access,
//! mutations confined to the current state slot. Terminal ops call
//! `finish()` themselves, the idiom that keeps schedule length equal to
//! cycle count.

use emu_core::Bus;

use crate::flags::{C, D, I, N, V, Z};
use crate::microcode::{
    Alu, Cond, ImpliedOp, Index, MicroOp, PullTarget, PushSource, Rmw, Store,
};
use crate::state::{CpuState, RunState};

/// Magic constant for the bus-noise-dependent XAA/LXA opcodes. Real chips
/// vary; this value matches the common test corpora.
const UNSTABLE_MAGIC: u8 = 0xEE;

pub(crate) fn run_micro_op<B: Bus>(
    op: MicroOp,
    _prev: &CpuState,
    cur: &mut CpuState,
    bus: &mut B,
) {
    match op {
        // === Opcode fetch ===
        MicroOp::FetchOpcode | MicroOp::FetchLast => {
            cur.opcode = bus.read(cur.pc);
            cur.opcode_addr = cur.pc;
            cur.pc = cur.pc.wrapping_add(1);
            cur.addr = 0;
            cur.ptr = 0;
            cur.data = 0;
            cur.fixup = false;
            if op == MicroOp::FetchLast {
                cur.finish();
            }
        }

        // === Operand and address fetch ===
        MicroOp::ReadImm(alu) => {
            let value = bus.read(cur.pc);
            cur.pc = cur.pc.wrapping_add(1);
            cur.data = value;
            if apply_alu(cur, alu, value) {
                cur.finish();
            }
        }
        MicroOp::FetchAdl => {
            cur.addr = u16::from(bus.read(cur.pc));
            cur.pc = cur.pc.wrapping_add(1);
        }
        MicroOp::FetchAdh => {
            cur.addr |= u16::from(bus.read(cur.pc)) << 8;
            cur.pc = cur.pc.wrapping_add(1);
        }
        MicroOp::FetchAdhIndex(index) => {
            let hi = bus.read(cur.pc);
            cur.pc = cur.pc.wrapping_add(1);
            let idx = index_value(cur, index);
            let lo = (cur.addr as u8).wrapping_add(idx);
            cur.fixup = lo < idx;
            cur.addr = u16::from(lo) | (u16::from(hi) << 8);
        }
        MicroOp::FetchAdhJump => {
            let hi = bus.read(cur.pc);
            cur.pc = (cur.addr & 0x00FF) | (u16::from(hi) << 8);
            cur.finish();
        }
        MicroOp::FetchPointer => {
            cur.ptr = bus.read(cur.pc);
            cur.addr = u16::from(cur.ptr);
            cur.pc = cur.pc.wrapping_add(1);
        }
        MicroOp::IndexPointer(index) => {
            // Dummy read while the index is added; the sum wraps in page 0.
            let _ = bus.read(u16::from(cur.ptr));
            cur.ptr = cur.ptr.wrapping_add(index_value(cur, index));
            cur.addr = u16::from(cur.ptr);
        }
        MicroOp::ReadPointerLo => {
            cur.addr = u16::from(bus.read(u16::from(cur.ptr)));
        }
        MicroOp::ReadPointerHi => {
            let hi = bus.read(u16::from(cur.ptr.wrapping_add(1)));
            cur.addr |= u16::from(hi) << 8;
        }
        MicroOp::ReadPointerHiIndex => {
            let hi = bus.read(u16::from(cur.ptr.wrapping_add(1)));
            let lo = (cur.addr as u8).wrapping_add(cur.y);
            cur.fixup = lo < cur.y;
            cur.addr = u16::from(lo) | (u16::from(hi) << 8);
        }
        MicroOp::IndexAddr(index) => {
            let _ = bus.read(cur.pc);
            cur.addr = cur.addr.wrapping_add(u16::from(index_value(cur, index)));
        }
        MicroOp::ReadIndirectLo => {
            cur.data = bus.read(cur.addr);
        }
        MicroOp::ReadIndirectHiBug => {
            // The pointer's high byte comes from within the same page.
            let hi_addr = (cur.addr & 0xFF00) | (cur.addr.wrapping_add(1) & 0x00FF);
            let hi = bus.read(hi_addr);
            cur.pc = u16::from(cur.data) | (u16::from(hi) << 8);
            cur.finish();
        }
        MicroOp::ReadIndirectHi => {
            let hi = bus.read(cur.addr.wrapping_add(1));
            cur.pc = u16::from(cur.data) | (u16::from(hi) << 8);
            cur.finish();
        }

        // === Data access ===
        MicroOp::ReadEffective(alu) => {
            let value = bus.read(cur.addr);
            cur.data = value;
            if apply_alu(cur, alu, value) {
                cur.finish();
            }
        }
        MicroOp::ReadIndexed(alu) => {
            if cur.fixup {
                // Wrong-page dummy read; the fixed read follows.
                let _ = bus.read(cur.addr);
                cur.addr = cur.addr.wrapping_add(0x100);
            } else {
                let value = bus.read(cur.addr);
                cur.data = value;
                if apply_alu(cur, alu, value) {
                    cur.finish();
                } else {
                    // Decimal penalty next; the unused fixup op is skipped.
                    cur.pipeline_index += 1;
                }
            }
        }
        MicroOp::ReadFixed(alu) => {
            let value = bus.read(cur.addr);
            cur.data = value;
            if apply_alu(cur, alu, value) {
                cur.finish();
            }
        }
        MicroOp::ReadData => {
            cur.data = bus.read(cur.addr);
        }
        MicroOp::ReadFixAlways => {
            let _ = bus.read(cur.addr);
            if cur.fixup {
                cur.addr = cur.addr.wrapping_add(0x100);
            }
        }
        MicroOp::DummyWrite(rmw) => {
            bus.write(cur.addr, cur.data);
            cur.data = apply_rmw(cur, rmw, cur.data);
        }
        MicroOp::ReadAgain(rmw) => {
            let _ = bus.read(cur.addr);
            cur.data = apply_rmw(cur, rmw, cur.data);
        }
        MicroOp::WriteData => {
            bus.write(cur.addr, cur.data);
            cur.finish();
        }
        MicroOp::WriteEffective(store) => {
            let value = store_value(cur, store);
            bus.write(cur.addr, value);
            cur.finish();
        }

        // === Implied and internal cycles ===
        MicroOp::Implied(op) => {
            let _ = bus.read(cur.pc);
            apply_implied(cur, op);
            cur.finish();
        }
        MicroOp::InternalCycle => {
            let _ = bus.read(cur.pc);
        }
        MicroOp::IdleCycle => {}
        MicroOp::IdleLast => {
            cur.finish();
        }
        MicroOp::IdleSkip => {
            cur.pc = cur.pc.wrapping_add(1);
        }
        MicroOp::IdleSkipLast => {
            cur.pc = cur.pc.wrapping_add(1);
            cur.finish();
        }
        MicroOp::DecimalPenalty => {
            let _ = bus.read(cur.pc);
            cur.finish();
        }

        // === Branches ===
        MicroOp::BranchOperand(cond) => {
            cur.data = bus.read(cur.pc);
            cur.pc = cur.pc.wrapping_add(1);
            if !cond_met(cur, cond) {
                cur.finish();
            }
        }
        MicroOp::BitBranch { bit, expect_set } => {
            let offset = bus.read(cur.pc);
            cur.pc = cur.pc.wrapping_add(1);
            let set = cur.data & (1 << bit) != 0;
            if set == expect_set {
                cur.data = offset;
            } else {
                cur.finish();
            }
        }
        MicroOp::BranchTake => {
            let _ = bus.read(cur.pc);
            let offset = i16::from(cur.data as i8);
            let target = cur.pc.wrapping_add(offset as u16);
            if (target ^ cur.pc) & 0xFF00 == 0 {
                cur.pc = target;
                cur.finish();
            } else {
                cur.addr = target;
            }
        }
        MicroOp::BranchFixPage => {
            let _ = bus.read((cur.pc & 0xFF00) | (cur.addr & 0x00FF));
            cur.pc = cur.addr;
            cur.finish();
        }

        // === Stack ===
        MicroOp::StackDummy => {
            let _ = bus.read(cur.stack_addr());
        }
        MicroOp::Push(source) => {
            let value = match source {
                PushSource::A => cur.a,
                PushSource::X => cur.x,
                PushSource::Y => cur.y,
                PushSource::StatusBrk => cur.p.pushed(true),
                PushSource::StatusIrq => cur.p.pushed(false),
                PushSource::Pch => (cur.pc >> 8) as u8,
                PushSource::Pcl => cur.pc as u8,
            };
            bus.write(cur.stack_addr(), value);
            cur.s = cur.s.wrapping_sub(1);
        }
        MicroOp::Pull(target) => {
            cur.s = cur.s.wrapping_add(1);
            let value = bus.read(cur.stack_addr());
            match target {
                PullTarget::A => {
                    cur.a = value;
                    cur.p.update_nz(value);
                }
                PullTarget::X => {
                    cur.x = value;
                    cur.p.update_nz(value);
                }
                PullTarget::Y => {
                    cur.y = value;
                    cur.p.update_nz(value);
                }
                PullTarget::Status => {
                    cur.p = crate::flags::Status::from_pulled(value);
                }
            }
            cur.finish();
        }
        MicroOp::PullStatus => {
            cur.s = cur.s.wrapping_add(1);
            let value = bus.read(cur.stack_addr());
            cur.p = crate::flags::Status::from_pulled(value);
        }
        MicroOp::PullPcl => {
            cur.s = cur.s.wrapping_add(1);
            cur.addr = u16::from(bus.read(cur.stack_addr()));
        }
        MicroOp::PullPchJump => {
            cur.s = cur.s.wrapping_add(1);
            cur.addr |= u16::from(bus.read(cur.stack_addr())) << 8;
            cur.pc = cur.addr;
            cur.finish();
        }
        MicroOp::PullPch => {
            cur.s = cur.s.wrapping_add(1);
            cur.addr |= u16::from(bus.read(cur.stack_addr())) << 8;
        }
        MicroOp::RtsFinish => {
            let _ = bus.read(cur.addr);
            cur.pc = cur.addr.wrapping_add(1);
            cur.finish();
        }
        MicroOp::JsrJump => {
            let hi = bus.read(cur.pc);
            cur.pc = (cur.addr & 0x00FF) | (u16::from(hi) << 8);
            cur.finish();
        }
        MicroOp::BrkPad => {
            let _ = bus.read(cur.pc);
            cur.pc = cur.pc.wrapping_add(1);
        }

        // === Interrupt sequencing ===
        MicroOp::VectorLo(vector) => {
            cur.data = bus.read(vector.addr());
        }
        MicroOp::VectorHi { vector, clear_d } => {
            let hi = bus.read(vector.addr().wrapping_add(1));
            cur.pc = u16::from(cur.data) | (u16::from(hi) << 8);
            cur.p.set(I);
            if clear_d {
                cur.p.clear(D);
            }
            cur.finish();
        }
        MicroOp::ResetStack => {
            let _ = bus.read(cur.stack_addr());
            cur.s = cur.s.wrapping_sub(1);
        }

        // === Control ===
        MicroOp::Jam => {
            let _ = bus.read(cur.pc);
            cur.run_state = RunState::Jammed;
            cur.finish();
        }
        MicroOp::Wait => {
            let _ = bus.read(cur.pc);
            cur.run_state = RunState::Waiting;
            cur.finish();
        }
        MicroOp::Stop => {
            let _ = bus.read(cur.pc);
            cur.run_state = RunState::Stopped;
            cur.finish();
        }
    }
}

fn index_value(cur: &CpuState, index: Index) -> u8 {
    match index {
        Index::X => cur.x,
        Index::Y => cur.y,
    }
}

fn cond_met(cur: &CpuState, cond: Cond) -> bool {
    match cond {
        Cond::CarryClear => !cur.p.is_set(C),
        Cond::CarrySet => cur.p.is_set(C),
        Cond::NotZero => !cur.p.is_set(Z),
        Cond::Zero => cur.p.is_set(Z),
        Cond::Plus => !cur.p.is_set(N),
        Cond::Minus => cur.p.is_set(N),
        Cond::OverflowClear => !cur.p.is_set(V),
        Cond::OverflowSet => cur.p.is_set(V),
        Cond::Always => true,
    }
}

fn store_value(cur: &mut CpuState, store: Store) -> u8 {
    // The high-byte-and-one term of the unstable NMOS stores.
    let hi_plus_one = ((cur.addr >> 8) as u8).wrapping_add(1);
    match store {
        Store::A => cur.a,
        Store::X => cur.x,
        Store::Y => cur.y,
        Store::Zero => 0,
        Store::Ax => cur.a & cur.x,
        Store::ShxH => cur.x & hi_plus_one,
        Store::ShyH => cur.y & hi_plus_one,
        Store::AhxH => cur.a & cur.x & hi_plus_one,
        Store::TasH => {
            cur.s = cur.a & cur.x;
            cur.s & hi_plus_one
        }
    }
}

/// Apply an ALU operation fed by a data read. Returns false when the
/// instruction must not end on this cycle (CMOS decimal ADC/SBC, which
/// hand completion to the trailing penalty cycle).
fn apply_alu(cur: &mut CpuState, alu: Alu, value: u8) -> bool {
    match alu {
        Alu::Adc => {
            if cur.p.is_set(D) {
                adc_decimal(cur, value, DecimalFlags::Binary);
            } else {
                adc_binary(cur, value);
            }
            true
        }
        Alu::AdcCmos => {
            if cur.p.is_set(D) {
                adc_decimal(cur, value, DecimalFlags::Corrected);
                false
            } else {
                adc_binary(cur, value);
                true
            }
        }
        Alu::Sbc => {
            if cur.p.is_set(D) {
                sbc_decimal(cur, value, DecimalFlags::Binary);
            } else {
                adc_binary(cur, !value);
            }
            true
        }
        Alu::SbcCmos => {
            if cur.p.is_set(D) {
                sbc_decimal(cur, value, DecimalFlags::Corrected);
                false
            } else {
                adc_binary(cur, !value);
                true
            }
        }
        Alu::And => {
            cur.a &= value;
            cur.p.update_nz(cur.a);
            true
        }
        Alu::Ora => {
            cur.a |= value;
            cur.p.update_nz(cur.a);
            true
        }
        Alu::Eor => {
            cur.a ^= value;
            cur.p.update_nz(cur.a);
            true
        }
        Alu::Cmp => {
            compare(cur, cur.a, value);
            true
        }
        Alu::Cpx => {
            compare(cur, cur.x, value);
            true
        }
        Alu::Cpy => {
            compare(cur, cur.y, value);
            true
        }
        Alu::Bit => {
            cur.p.set_if(Z, cur.a & value == 0);
            cur.p.set_if(N, value & 0x80 != 0);
            cur.p.set_if(V, value & 0x40 != 0);
            true
        }
        Alu::BitImm => {
            cur.p.set_if(Z, cur.a & value == 0);
            true
        }
        Alu::Lda => {
            cur.a = value;
            cur.p.update_nz(value);
            true
        }
        Alu::Ldx => {
            cur.x = value;
            cur.p.update_nz(value);
            true
        }
        Alu::Ldy => {
            cur.y = value;
            cur.p.update_nz(value);
            true
        }
        Alu::Lax => {
            cur.a = value;
            cur.x = value;
            cur.p.update_nz(value);
            true
        }
        Alu::Anc => {
            cur.a &= value;
            cur.p.update_nz(cur.a);
            let n = cur.p.is_set(N);
            cur.p.set_if(C, n);
            true
        }
        Alu::Alr => {
            let t = cur.a & value;
            cur.p.set_if(C, t & 0x01 != 0);
            cur.a = t >> 1;
            cur.p.update_nz(cur.a);
            true
        }
        Alu::Arr => {
            arr(cur, value);
            true
        }
        Alu::Xaa => {
            cur.a = (cur.a | UNSTABLE_MAGIC) & cur.x & value;
            cur.p.update_nz(cur.a);
            true
        }
        Alu::Lxa => {
            cur.a = (cur.a | UNSTABLE_MAGIC) & value;
            cur.x = cur.a;
            cur.p.update_nz(cur.a);
            true
        }
        Alu::Axs => {
            let t = cur.a & cur.x;
            cur.p.set_if(C, t >= value);
            cur.x = t.wrapping_sub(value);
            cur.p.update_nz(cur.x);
            true
        }
        Alu::Las => {
            let t = value & cur.s;
            cur.a = t;
            cur.x = t;
            cur.s = t;
            cur.p.update_nz(t);
            true
        }
        Alu::Ign => true,
    }
}

/// Apply a read-modify-write operation to the latched value.
fn apply_rmw(cur: &mut CpuState, rmw: Rmw, value: u8) -> u8 {
    match rmw {
        Rmw::Asl => asl(cur, value),
        Rmw::Lsr => lsr(cur, value),
        Rmw::Rol => rol(cur, value),
        Rmw::Ror => ror(cur, value),
        Rmw::Inc => {
            let result = value.wrapping_add(1);
            cur.p.update_nz(result);
            result
        }
        Rmw::Dec => {
            let result = value.wrapping_sub(1);
            cur.p.update_nz(result);
            result
        }
        Rmw::Slo => {
            let result = asl(cur, value);
            cur.a |= result;
            cur.p.update_nz(cur.a);
            result
        }
        Rmw::Rla => {
            let result = rol(cur, value);
            cur.a &= result;
            cur.p.update_nz(cur.a);
            result
        }
        Rmw::Sre => {
            let result = lsr(cur, value);
            cur.a ^= result;
            cur.p.update_nz(cur.a);
            result
        }
        Rmw::Rra => {
            let result = ror(cur, value);
            if cur.p.is_set(D) {
                adc_decimal(cur, result, DecimalFlags::Binary);
            } else {
                adc_binary(cur, result);
            }
            result
        }
        Rmw::Dcp => {
            let result = value.wrapping_sub(1);
            compare(cur, cur.a, result);
            result
        }
        Rmw::Isc => {
            let result = value.wrapping_add(1);
            if cur.p.is_set(D) {
                sbc_decimal(cur, result, DecimalFlags::Binary);
            } else {
                adc_binary(cur, !result);
            }
            result
        }
        Rmw::Tsb => {
            cur.p.set_if(Z, cur.a & value == 0);
            value | cur.a
        }
        Rmw::Trb => {
            cur.p.set_if(Z, cur.a & value == 0);
            value & !cur.a
        }
        Rmw::Rmb(bit) => value & !(1 << bit),
        Rmw::Smb(bit) => value | (1 << bit),
    }
}

fn apply_implied(cur: &mut CpuState, op: ImpliedOp) {
    match op {
        ImpliedOp::Tax => {
            cur.x = cur.a;
            cur.p.update_nz(cur.x);
        }
        ImpliedOp::Tay => {
            cur.y = cur.a;
            cur.p.update_nz(cur.y);
        }
        ImpliedOp::Txa => {
            cur.a = cur.x;
            cur.p.update_nz(cur.a);
        }
        ImpliedOp::Tya => {
            cur.a = cur.y;
            cur.p.update_nz(cur.a);
        }
        ImpliedOp::Tsx => {
            cur.x = cur.s;
            cur.p.update_nz(cur.x);
        }
        // TXS does not affect flags.
        ImpliedOp::Txs => cur.s = cur.x,
        ImpliedOp::Inx => {
            cur.x = cur.x.wrapping_add(1);
            cur.p.update_nz(cur.x);
        }
        ImpliedOp::Iny => {
            cur.y = cur.y.wrapping_add(1);
            cur.p.update_nz(cur.y);
        }
        ImpliedOp::Dex => {
            cur.x = cur.x.wrapping_sub(1);
            cur.p.update_nz(cur.x);
        }
        ImpliedOp::Dey => {
            cur.y = cur.y.wrapping_sub(1);
            cur.p.update_nz(cur.y);
        }
        ImpliedOp::AslA => cur.a = asl(cur, cur.a),
        ImpliedOp::LsrA => cur.a = lsr(cur, cur.a),
        ImpliedOp::RolA => cur.a = rol(cur, cur.a),
        ImpliedOp::RorA => cur.a = ror(cur, cur.a),
        ImpliedOp::IncA => {
            cur.a = cur.a.wrapping_add(1);
            cur.p.update_nz(cur.a);
        }
        ImpliedOp::DecA => {
            cur.a = cur.a.wrapping_sub(1);
            cur.p.update_nz(cur.a);
        }
        ImpliedOp::Clc => cur.p.clear(C),
        ImpliedOp::Sec => cur.p.set(C),
        ImpliedOp::Cli => cur.p.clear(I),
        ImpliedOp::Sei => cur.p.set(I),
        ImpliedOp::Clv => cur.p.clear(V),
        ImpliedOp::Cld => cur.p.clear(D),
        ImpliedOp::Sed => cur.p.set(D),
        ImpliedOp::Nop => {}
    }
}

fn compare(cur: &mut CpuState, reg: u8, value: u8) {
    cur.p.set_if(C, reg >= value);
    cur.p.update_nz(reg.wrapping_sub(value));
}

fn asl(cur: &mut CpuState, value: u8) -> u8 {
    cur.p.set_if(C, value & 0x80 != 0);
    let result = value << 1;
    cur.p.update_nz(result);
    result
}

fn lsr(cur: &mut CpuState, value: u8) -> u8 {
    cur.p.set_if(C, value & 0x01 != 0);
    let result = value >> 1;
    cur.p.update_nz(result);
    result
}

fn rol(cur: &mut CpuState, value: u8) -> u8 {
    let carry_in = u8::from(cur.p.is_set(C));
    cur.p.set_if(C, value & 0x80 != 0);
    let result = (value << 1) | carry_in;
    cur.p.update_nz(result);
    result
}

fn ror(cur: &mut CpuState, value: u8) -> u8 {
    let carry_in = if cur.p.is_set(C) { 0x80 } else { 0 };
    cur.p.set_if(C, value & 0x01 != 0);
    let result = (value >> 1) | carry_in;
    cur.p.update_nz(result);
    result
}

fn adc_binary(cur: &mut CpuState, value: u8) {
    let a = cur.a;
    let carry = u16::from(cur.p.is_set(C));
    let sum = u16::from(a) + u16::from(value) + carry;
    let result = sum as u8;

    cur.p.set_if(C, sum > 0xFF);
    cur.p
        .set_if(V, (a ^ result) & (value ^ result) & 0x80 != 0);
    cur.a = result;
    cur.p.update_nz(result);
}

/// Where decimal-mode N and Z are sampled. The NMOS parts latch them
/// from the adder mid-correction; the CMOS parts re-evaluate them from
/// the corrected result during the penalty cycle.
#[derive(Clone, Copy, PartialEq, Eq)]
enum DecimalFlags {
    Binary,
    Corrected,
}

/// Decimal ADC, shared by both families. The BCD correction is the same
/// silicon either way; `flags` only selects when N and Z are sampled.
fn adc_decimal(cur: &mut CpuState, value: u8, flags: DecimalFlags) {
    let a = u16::from(cur.a);
    let operand = u16::from(value);
    let carry_in = u16::from(cur.p.is_set(C));

    let binary = a + operand + carry_in;
    cur.p
        .set_if(V, (a ^ binary) & (operand ^ binary) & 0x80 != 0);

    // A digit summing past nine gets six added and carries into its
    // neighbor; the decimal carry out of the low digit is decided before
    // that digit's correction lands.
    let low = (a & 0x0F) + (operand & 0x0F) + carry_in;
    let high = (a >> 4) + (operand >> 4) + u16::from(low > 0x09);

    if flags == DecimalFlags::Binary {
        cur.p.set_if(N, high & 0x08 != 0);
        cur.p.set_if(Z, binary & 0xFF == 0);
    }

    let carry_out = high > 0x09;
    let high_digit = if carry_out { high + 0x06 } else { high };
    let low_digit = if low > 0x09 { low + 0x06 } else { low };
    cur.p.set_if(C, carry_out);
    cur.a = ((high_digit << 4) | (low_digit & 0x0F)) as u8;
    if flags == DecimalFlags::Corrected {
        cur.p.update_nz(cur.a);
    }
}

/// Decimal SBC, shared by both families. C, V (and on NMOS, N and Z)
/// always come from the binary difference; only the accumulator gets the
/// BCD correction.
fn sbc_decimal(cur: &mut CpuState, value: u8, flags: DecimalFlags) {
    let a = cur.a;
    let borrow = i16::from(!cur.p.is_set(C));
    let binary = i16::from(a) - i16::from(value) - borrow;

    cur.p.set_if(C, binary >= 0);
    cur.p.set_if(
        V,
        (i16::from(a) ^ binary) & (i16::from(a) ^ i16::from(value)) & 0x80 != 0,
    );
    if flags == DecimalFlags::Binary {
        cur.p.set_if(N, binary & 0x80 != 0);
        cur.p.set_if(Z, binary as u8 == 0);
    }

    // Each digit that borrowed sits six too high in the wrapped binary
    // difference. Patch the digits in place; the adjustment itself never
    // borrows across the nibble boundary.
    let mut result = binary as u8;
    if i16::from(a & 0x0F) - i16::from(value & 0x0F) - borrow < 0 {
        result = (result & 0xF0) | (result.wrapping_sub(0x06) & 0x0F);
    }
    if binary < 0 {
        result = result.wrapping_sub(0x60);
    }
    cur.a = result;
    if flags == DecimalFlags::Corrected {
        cur.p.update_nz(result);
    }
}

/// ARR: AND then ROR, with C and V derived from bits 6 and 5 of the
/// rotated result and the NMOS decimal fixup applied when D is set.
fn arr(cur: &mut CpuState, value: u8) {
    let t = cur.a & value;
    let carry_in = if cur.p.is_set(C) { 0x80 } else { 0 };
    let mut result = (t >> 1) | carry_in;

    cur.p.update_nz(result);
    cur.p.set_if(V, ((result >> 6) ^ (result >> 5)) & 0x01 != 0);

    if cur.p.is_set(D) {
        if (t & 0x0F) + (t & 0x01) > 5 {
            result = (result & 0xF0) | (result.wrapping_add(6) & 0x0F);
        }
        let high_adjust = (t & 0xF0) as u16 + (t & 0x10) as u16 > 0x50;
        cur.p.set_if(C, high_adjust);
        if high_adjust {
            result = result.wrapping_add(0x60);
        }
    } else {
        cur.p.set_if(C, result & 0x40 != 0);
    }
    cur.a = result;
}
