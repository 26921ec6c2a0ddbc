//! Interrupt latching, priority, masking, and halt-state behavior.

use cpu_65xx::flags::{B, D, I, U};
use cpu_65xx::{Cpu, PendingInterrupt, RunState, Variant};
use emu_core::{Bus, FlatBus};

const ORIGIN: u16 = 0x0400;
const IRQ_HANDLER: u16 = 0x1000;
const NMI_HANDLER: u16 = 0x2000;

fn system(variant: Variant, program: &[u8]) -> (Cpu, FlatBus) {
    let mut bus = FlatBus::new();
    bus.load(ORIGIN, program);
    bus.set_reset_vector(ORIGIN);
    bus.set_irq_vector(IRQ_HANDLER);
    bus.set_nmi_vector(NMI_HANDLER);
    let mut cpu = Cpu::with_variant(variant);
    cpu.reset(&mut bus);
    (cpu, bus)
}

#[test]
fn reset_sequence_is_seven_observable_cycles() {
    let mut bus = FlatBus::new();
    bus.set_reset_vector(ORIGIN);
    let mut cpu = Cpu::with_variant(Variant::Nmos6502);
    let before = bus.accesses();
    cpu.reset(&mut bus);
    assert_eq!(bus.accesses() - before, 7);
    assert_eq!(cpu.current().pc, ORIGIN);
    assert_eq!(cpu.current().s, 0xFD);
    assert_eq!(cpu.total_cycles().get(), 7);
}

#[test]
fn masked_irq_stays_latched() {
    // Post-reset I=1, so the IRQ is held pending across instructions.
    let (mut cpu, mut bus) = system(Variant::Nmos6502, &[0xEA, 0x58, 0xEA]);
    cpu.signal_irq();
    cpu.step(&mut bus); // NOP
    assert_eq!(cpu.current().pending, PendingInterrupt::Irq);
    assert_eq!(cpu.current().pc, ORIGIN + 1);

    cpu.step(&mut bus); // CLI
    assert_eq!(cpu.current().pending, PendingInterrupt::Irq);

    // Now unmasked: the next step services the interrupt, 7 cycles.
    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 7);
    assert_eq!(cpu.current().pc, IRQ_HANDLER);
    assert_eq!(cpu.current().pending, PendingInterrupt::None);
    assert!(cpu.current().p.is_set(I));
}

#[test]
fn irq_pushes_return_state_with_b_clear() {
    let (mut cpu, mut bus) = system(Variant::Nmos6502, &[0x58, 0xEA]);
    cpu.step(&mut bus); // CLI
    cpu.signal_irq();
    cpu.step(&mut bus); // service
    // Return address is the interrupted PC ($0401), pushed high first.
    assert_eq!(bus.peek(0x01FD), 0x04);
    assert_eq!(bus.peek(0x01FC), 0x01);
    let pushed_p = bus.peek(0x01FB);
    assert_eq!(pushed_p & B, 0);
    assert_eq!(pushed_p & U, U);
    assert_eq!(cpu.current().s, 0xFA);
}

#[test]
fn brk_pushes_pc_plus_two_with_b_set() {
    let (mut cpu, mut bus) = system(Variant::Nmos6502, &[0x00, 0xFF]);
    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 7);
    assert_eq!(cpu.current().pc, IRQ_HANDLER);
    // BRK skips its signature byte: pushed PC is $0402.
    assert_eq!(bus.peek(0x01FD), 0x04);
    assert_eq!(bus.peek(0x01FC), 0x02);
    assert_eq!(bus.peek(0x01FB) & B, B);
    assert!(cpu.current().p.is_set(I));
}

#[test]
fn interrupt_decimal_flag_policy_differs_by_family() {
    for (variant, d_cleared) in [
        (Variant::Nmos6502, false),
        (Variant::Nmos6502Simple, false),
        (Variant::Wdc65C02, true),
        (Variant::Rockwell65C02, true),
    ] {
        // SED, then BRK.
        let (mut cpu, mut bus) = system(variant, &[0xF8, 0x00, 0xFF]);
        cpu.step(&mut bus);
        assert!(cpu.current().p.is_set(D));
        cpu.step(&mut bus);
        assert_eq!(
            cpu.current().p.is_set(D),
            !d_cleared,
            "D after BRK on {variant}"
        );
    }
}

#[test]
fn nmi_overrides_a_pending_irq() {
    let (mut cpu, mut bus) = system(Variant::Nmos6502, &[0xEA, 0xEA]);
    cpu.signal_irq();
    cpu.signal_nmi();
    assert_eq!(cpu.current().pending, PendingInterrupt::Nmi);
    cpu.step(&mut bus); // NMI services even with I=1
    assert_eq!(cpu.current().pc, NMI_HANDLER);
    assert_eq!(cpu.current().pending, PendingInterrupt::None);
}

#[test]
fn reset_overrides_everything() {
    let (mut cpu, mut bus) = system(Variant::Nmos6502, &[0xEA, 0xEA]);
    cpu.signal_nmi();
    cpu.signal_reset();
    assert_eq!(cpu.current().pending, PendingInterrupt::Reset);
    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 7);
    assert_eq!(cpu.current().pc, ORIGIN);
    assert_eq!(cpu.current().s, 0xFD);
    assert_eq!(cpu.current().pending, PendingInterrupt::None);
}

#[test]
fn clear_irq_releases_the_line_before_service() {
    let (mut cpu, mut bus) = system(Variant::Nmos6502, &[0x58, 0xEA]);
    cpu.step(&mut bus); // CLI
    cpu.signal_irq();
    cpu.clear_irq();
    cpu.step(&mut bus);
    // The NOP ran; no interrupt was taken.
    assert_eq!(cpu.current().pc, ORIGIN + 2);
}

#[test]
fn wai_waits_until_any_interrupt_is_latched() {
    // WAI; NOP, with interrupts masked.
    let (mut cpu, mut bus) = system(Variant::Wdc65C02, &[0xCB, 0xEA]);
    assert_eq!(cpu.step(&mut bus), 3);
    assert_eq!(cpu.current().run_state, RunState::Waiting);

    // Waiting burns no bus cycles.
    let before = bus.accesses();
    for _ in 0..5 {
        assert!(cpu.clock(&mut bus));
    }
    assert_eq!(bus.accesses(), before);

    // A masked IRQ wakes the CPU; execution falls through to the NOP.
    cpu.signal_irq();
    cpu.step(&mut bus);
    assert_eq!(cpu.current().run_state, RunState::Running);
    assert_eq!(cpu.current().pc, ORIGIN + 2);
    // The latch is still there for when I clears.
    assert_eq!(cpu.current().pending, PendingInterrupt::Irq);
}

#[test]
fn wai_services_an_unmasked_interrupt_on_wake() {
    // CLI; WAI.
    let (mut cpu, mut bus) = system(Variant::Wdc65C02, &[0x58, 0xCB, 0xEA]);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.current().run_state, RunState::Waiting);
    cpu.signal_irq();
    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 7);
    assert_eq!(cpu.current().pc, IRQ_HANDLER);
}

#[test]
fn stopped_cpu_restarts_only_on_reset() {
    let (mut cpu, mut bus) = system(Variant::Wdc65C02, &[0xDB, 0xEA]);
    cpu.step(&mut bus);
    assert_eq!(cpu.current().run_state, RunState::Stopped);

    cpu.signal_irq();
    cpu.signal_nmi();
    for _ in 0..5 {
        cpu.clock(&mut bus);
    }
    assert_eq!(cpu.current().run_state, RunState::Stopped);

    cpu.signal_reset();
    cpu.step(&mut bus);
    assert_eq!(cpu.current().run_state, RunState::Running);
    assert_eq!(cpu.current().pc, ORIGIN);
}

#[test]
fn handle_pending_interrupt_is_idempotent() {
    let (mut cpu, mut bus) = system(Variant::Nmos6502, &[0xEA]);
    // Nothing pending: no service, no state change.
    let before = *cpu.current();
    assert!(!cpu.handle_pending_interrupt(&mut bus));
    assert_eq!(cpu.current().pc, before.pc);
    assert_eq!(cpu.current().s, before.s);

    // Masked IRQ: still nothing.
    cpu.signal_irq();
    assert!(!cpu.handle_pending_interrupt(&mut bus));
    assert_eq!(cpu.current().pending, PendingInterrupt::Irq);

    // NMI: serviced immediately, full 7-cycle sequence.
    cpu.signal_nmi();
    let before = bus.accesses();
    assert!(cpu.handle_pending_interrupt(&mut bus));
    assert_eq!(bus.accesses() - before, 7);
    assert_eq!(cpu.current().pc, NMI_HANDLER);
}

#[test]
fn handle_pending_interrupt_wakes_a_waiting_cpu() {
    let (mut cpu, mut bus) = system(Variant::Wdc65C02, &[0xCB, 0xEA]);
    cpu.step(&mut bus); // WAI
    assert_eq!(cpu.current().run_state, RunState::Waiting);
    cpu.signal_nmi();
    assert!(cpu.handle_pending_interrupt(&mut bus));
    assert_eq!(cpu.current().run_state, RunState::Running);
    assert_eq!(cpu.current().pc, NMI_HANDLER);
}

#[test]
fn snapshot_covers_interrupt_sequences() {
    let (mut cpu, mut bus) = system(Variant::Nmos6502, &[0xEA, 0xEA]);
    cpu.step(&mut bus);
    cpu.signal_nmi();
    cpu.step(&mut bus);
    // Prev holds the state from just before the sequence was installed.
    assert_eq!(cpu.prev().pc, ORIGIN + 1);
    assert_eq!(cpu.current().pc, NMI_HANDLER);
}

#[test]
fn rti_returns_from_an_interrupt() {
    let (mut cpu, mut bus) = system(Variant::Nmos6502, &[0x58, 0xEA, 0xEA]);
    bus.load(IRQ_HANDLER, &[0x40]); // RTI
    cpu.step(&mut bus); // CLI
    cpu.signal_irq();
    cpu.step(&mut bus); // service
    assert_eq!(cpu.current().pc, IRQ_HANDLER);
    cpu.step(&mut bus); // RTI
    assert_eq!(cpu.current().pc, ORIGIN + 1);
    assert_eq!(cpu.current().s, 0xFD);
    assert!(!cpu.current().p.is_set(I));
}
