//! Property tests for the stack: push/pull round-trips and SP wrap.

use cpu_65xx::flags::{B, N, U, Z};
use cpu_65xx::{Cpu, Variant};
use emu_core::{Bus, FlatBus};
use proptest::prelude::*;

const ORIGIN: u16 = 0x0200;

fn boot(program: &[u8]) -> (Cpu, FlatBus) {
    let mut bus = FlatBus::new();
    bus.load(ORIGIN, program);
    bus.set_reset_vector(ORIGIN);
    let mut cpu = Cpu::with_variant(Variant::Nmos6502);
    cpu.reset(&mut bus);
    (cpu, bus)
}

proptest! {
    /// PHA then PLA restores A, leaves SP where it was, and sets Z/N
    /// consistently with the pulled value.
    #[test]
    fn pha_pla_round_trip(a in any::<u8>(), s in any::<u8>()) {
        let (mut cpu, mut bus) = boot(&[0x48, 0x68]);
        {
            let cur = cpu.buffer_mut().current_mut();
            cur.a = a;
            cur.s = s;
        }
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        let cur = cpu.current();
        prop_assert_eq!(cur.a, a);
        prop_assert_eq!(cur.s, s);
        prop_assert_eq!(cur.p.is_set(Z), a == 0);
        prop_assert_eq!(cur.p.is_set(N), a & 0x80 != 0);
    }

    /// PHP then PLP restores every stored P bit; the pushed copy carries
    /// B and U set, and the pull forces U back on.
    #[test]
    fn php_plp_round_trip(p_byte in any::<u8>(), s in any::<u8>()) {
        let (mut cpu, mut bus) = boot(&[0x08, 0x28]);
        let p = cpu_65xx::Status::from_pulled(p_byte);
        {
            let cur = cpu.buffer_mut().current_mut();
            cur.p = p;
            cur.s = s;
        }
        cpu.step(&mut bus);
        let stack_addr = 0x0100 | u16::from(s);
        let pushed = bus.peek(stack_addr);
        prop_assert_eq!(pushed & B, B);
        prop_assert_eq!(pushed & U, U);
        cpu.step(&mut bus);
        let cur = cpu.current();
        prop_assert_eq!(cur.p, p);
        prop_assert_eq!(cur.s, s);
    }

    /// A pushed byte sequence pulls back in reverse order, wrapping
    /// within $0100-$01FF however small SP starts.
    #[test]
    fn stack_order_is_preserved_with_wrap(
        values in prop::collection::vec(any::<u8>(), 1..8),
        s in any::<u8>(),
    ) {
        // One PHA per value, then one PLA per value.
        let mut program = vec![0x48u8; values.len()];
        program.extend(std::iter::repeat(0x68).take(values.len()));
        let (mut cpu, mut bus) = boot(&program);
        cpu.buffer_mut().current_mut().s = s;

        for &value in &values {
            cpu.buffer_mut().current_mut().a = value;
            cpu.step(&mut bus);
        }
        let mut pulled = Vec::new();
        for _ in &values {
            cpu.step(&mut bus);
            pulled.push(cpu.current().a);
        }
        let mut expected = values.clone();
        expected.reverse();
        prop_assert_eq!(pulled, expected);
        prop_assert_eq!(cpu.current().s, s);
    }

    /// TXS/TSX move SP without touching memory; effective stack addresses
    /// stay inside page 1.
    #[test]
    fn stack_stays_in_page_one(s in any::<u8>(), value in any::<u8>()) {
        let (mut cpu, mut bus) = boot(&[0x48]);
        {
            let cur = cpu.buffer_mut().current_mut();
            cur.s = s;
            cur.a = value;
        }
        cpu.step(&mut bus);
        let stack_addr = 0x0100 | u16::from(s);
        prop_assert_eq!(bus.peek(stack_addr), value);
        prop_assert_eq!(cpu.current().s, s.wrapping_sub(1));
    }
}
