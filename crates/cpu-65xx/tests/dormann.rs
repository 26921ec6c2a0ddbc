//! Klaus Dormann's 6502/65C02 test suite harnesses.
//!
//! The binaries are not distributed with this repository; drop them into
//! `tests/data/` and run with `--ignored`:
//!
//! - `6502_functional_test.bin` (or `.hex`) — all documented opcodes;
//!   success is the trap loop at $3469.
//! - `6502_decimal_test.bin` — decimal ADC/SBC; success leaves $000B = 0.
//! - `65C02_extended_opcodes_test.bin` — WDC opcode set; success traps
//!   at $24F1.
//! - `6502_interrupt_test.bin` — IRQ/NMI delivery driven through the
//!   feedback register at $BFFC.
//!
//! Tests end when PC sticks on a trap (`jmp *` / branch-to-self); any
//! trap other than the success address is a failure.

use cpu_65xx::{Cpu, RunState, Variant};
use emu_core::{Bus, FlatBus, Ticks};
use format_ihex::Image;
use std::path::Path;

const MAX_INSTRUCTIONS: u64 = 100_000_000;

/// Load a test image: Intel-HEX when the file is `.hex`, raw otherwise.
fn load_image(name: &str) -> Option<Vec<u8>> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data");
    let hex_path = dir.join(format!("{name}.hex"));
    if hex_path.exists() {
        let text = std::fs::read_to_string(&hex_path).expect("readable hex image");
        let image = Image::parse(&text).expect("well-formed hex image");
        return Some(image.bytes().to_vec());
    }
    let bin_path = dir.join(format!("{name}.bin"));
    if bin_path.exists() {
        return Some(std::fs::read(&bin_path).expect("readable binary image"));
    }
    None
}

/// Run until PC sticks; returns the trap address and the elapsed ticks.
fn run_to_trap(cpu: &mut Cpu, bus: &mut FlatBus) -> (u16, Ticks) {
    let start = cpu.total_cycles();
    let mut prev_pc = 0xFFFF_u16;
    let mut same_count = 0u32;
    let mut instructions = 0u64;

    loop {
        let pc = cpu.current().pc;
        if pc == prev_pc {
            same_count += 1;
            if same_count > 2 {
                return (pc, cpu.total_cycles() - start);
            }
        } else {
            same_count = 0;
            prev_pc = pc;
        }

        cpu.step(bus);
        if cpu.current().run_state == RunState::Stopped {
            return (cpu.current().pc, cpu.total_cycles() - start);
        }

        instructions += 1;
        if instructions % 1_000_000 == 0 {
            eprint!("\r[{instructions} instructions, PC=${pc:04X}]");
        }
        assert!(
            instructions < MAX_INSTRUCTIONS,
            "test exceeded {MAX_INSTRUCTIONS} instructions at PC=${pc:04X}"
        );
    }
}

fn boot(variant: Variant, image: &[u8], start: u16) -> (Cpu, FlatBus) {
    let mut bus = FlatBus::new();
    bus.load(0x0000, image);
    bus.set_reset_vector(start);
    let mut cpu = Cpu::with_variant(variant);
    cpu.reset(&mut bus);
    (cpu, bus)
}

#[test]
#[ignore = "requires tests/data/6502_functional_test image"]
fn dormann_functional() {
    let image = load_image("6502_functional_test").expect("tests/data image present");
    let (mut cpu, mut bus) = boot(Variant::Nmos6502, &image, 0x0400);
    let (trap, elapsed) = run_to_trap(&mut cpu, &mut bus);
    eprintln!("\ntrapped at ${trap:04X} after {elapsed} cycles");
    assert_eq!(trap, 0x3469, "functional test failed at ${trap:04X}");
}

#[test]
#[ignore = "requires tests/data/6502_decimal_test image"]
fn dormann_decimal() {
    let image = load_image("6502_decimal_test").expect("tests/data image present");
    for variant in [Variant::Nmos6502, Variant::Wdc65C02] {
        let (mut cpu, mut bus) = boot(variant, &image, 0x0200);
        let (trap, elapsed) = run_to_trap(&mut cpu, &mut bus);
        let error = bus.peek(0x000B);
        eprintln!(
            "\n{variant}: trapped at ${trap:04X} after {elapsed} cycles, \
             error flag = ${error:02X}"
        );
        assert_eq!(error, 0, "decimal test failed on {variant}");
    }
}

#[test]
#[ignore = "requires tests/data/65C02_extended_opcodes_test image"]
fn dormann_extended_opcodes() {
    let image = load_image("65C02_extended_opcodes_test").expect("tests/data image present");
    let (mut cpu, mut bus) = boot(Variant::Wdc65C02, &image, 0x0400);
    let (trap, elapsed) = run_to_trap(&mut cpu, &mut bus);
    eprintln!("\ntrapped at ${trap:04X} after {elapsed} cycles");
    assert_eq!(trap, 0x24F1, "extended opcodes test failed at ${trap:04X}");
}

/// Interrupt test: the program drives its own IRQ/NMI lines by writing
/// bits 0/1 of the feedback register at $BFFC.
#[test]
#[ignore = "requires tests/data/6502_interrupt_test image"]
fn dormann_interrupts() {
    const I_PORT: u16 = 0xBFFC;
    const IRQ_BIT: u8 = 0x01;
    const NMI_BIT: u8 = 0x02;
    const SUCCESS: u16 = 0x06F5;
    // The WAI section expects manual single-stepping; the harness takes
    // the documented leap over it.
    const WAI_SECTION: u16 = 0x0719;
    const WAI_RESUME: u16 = 0x071F;

    let image = load_image("6502_interrupt_test").expect("tests/data image present");
    let (mut cpu, mut bus) = boot(Variant::Nmos6502, &image, 0x0400);

    let mut prev_pc = 0xFFFF_u16;
    let mut same_count = 0u32;
    let mut prev_feedback = bus.peek(I_PORT);
    let mut instructions = 0u64;

    loop {
        let pc = cpu.current().pc;
        if pc == WAI_SECTION {
            cpu.buffer_mut().current_mut().pc = WAI_RESUME;
            prev_pc = 0xFFFF;
            continue;
        }
        if pc == prev_pc {
            same_count += 1;
            if same_count > 2 {
                eprintln!("\ntrapped at ${pc:04X} after {instructions} instructions");
                assert_eq!(pc, SUCCESS, "interrupt test failed at ${pc:04X}");
                return;
            }
        } else {
            same_count = 0;
            prev_pc = pc;
        }

        cpu.step(&mut bus);
        instructions += 1;
        assert!(instructions < 10_000_000, "interrupt test runaway");

        // Mirror the feedback register onto the interrupt lines. IRQ is
        // level-held; NMI fires on its rising edge.
        let feedback = bus.peek(I_PORT);
        if feedback & IRQ_BIT != 0 {
            cpu.signal_irq();
        } else {
            cpu.clear_irq();
        }
        if feedback & NMI_BIT != 0 && prev_feedback & NMI_BIT == 0 {
            cpu.signal_nmi();
        }
        prev_feedback = feedback;
    }
}
