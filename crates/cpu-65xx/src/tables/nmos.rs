//! NMOS 6502 decode table, including the full illegal-opcode set.
//!
//! Illegal opcodes follow their conventional names: the RMW combinations
//! (SLO, RLA, SRE, RRA, DCP, ISC), the stores (SAX, AHX, SHX, SHY, TAS),
//! the loads (LAX, LAS), the immediate oddities (ANC, ALR, ARR, XAA, LXA,
//! AXS) and the multi-byte NOPs. The JAM opcodes lock the CPU until reset.

use super::*;
use crate::microcode::MicroOp::*;
use crate::microcode::Rmw;

#[rustfmt::skip]
pub(crate) const NMOS: OpcodeTable = [
    /* 00 BRK          */ BRK_NMOS,
    /* 01 ORA (zp,X)   */ rd_izx!(Ora),
    /* 02 JAM          */ JAM_PIPE,
    /* 03 SLO (zp,X)   */ rmw_izx!(Rmw::Slo),
    /* 04 NOP zp       */ rd_zp!(Ign),
    /* 05 ORA zp       */ rd_zp!(Ora),
    /* 06 ASL zp       */ rmw_zp!(Rmw::Asl),
    /* 07 SLO zp       */ rmw_zp!(Rmw::Slo),
    /* 08 PHP          */ PHP,
    /* 09 ORA #        */ rd_imm!(Ora),
    /* 0A ASL A        */ imp!(AslA),
    /* 0B ANC #        */ rd_imm!(Anc),
    /* 0C NOP abs      */ rd_abs!(Ign),
    /* 0D ORA abs      */ rd_abs!(Ora),
    /* 0E ASL abs      */ rmw_abs!(Rmw::Asl),
    /* 0F SLO abs      */ rmw_abs!(Rmw::Slo),
    /* 10 BPL rel      */ branch!(Plus),
    /* 11 ORA (zp),Y   */ rd_izy!(Ora),
    /* 12 JAM          */ JAM_PIPE,
    /* 13 SLO (zp),Y   */ rmw_izy!(Rmw::Slo),
    /* 14 NOP zp,X     */ rd_zpi!(X, Ign),
    /* 15 ORA zp,X     */ rd_zpi!(X, Ora),
    /* 16 ASL zp,X     */ rmw_zpx!(Rmw::Asl),
    /* 17 SLO zp,X     */ rmw_zpx!(Rmw::Slo),
    /* 18 CLC          */ imp!(Clc),
    /* 19 ORA abs,Y    */ rd_abi!(Y, Ora),
    /* 1A NOP          */ imp!(Nop),
    /* 1B SLO abs,Y    */ rmw_abi!(Y, Rmw::Slo),
    /* 1C NOP abs,X    */ rd_abi!(X, Ign),
    /* 1D ORA abs,X    */ rd_abi!(X, Ora),
    /* 1E ASL abs,X    */ rmw_abi!(X, Rmw::Asl),
    /* 1F SLO abs,X    */ rmw_abi!(X, Rmw::Slo),
    /* 20 JSR abs      */ JSR,
    /* 21 AND (zp,X)   */ rd_izx!(And),
    /* 22 JAM          */ JAM_PIPE,
    /* 23 RLA (zp,X)   */ rmw_izx!(Rmw::Rla),
    /* 24 BIT zp       */ rd_zp!(Bit),
    /* 25 AND zp       */ rd_zp!(And),
    /* 26 ROL zp       */ rmw_zp!(Rmw::Rol),
    /* 27 RLA zp       */ rmw_zp!(Rmw::Rla),
    /* 28 PLP          */ PLP,
    /* 29 AND #        */ rd_imm!(And),
    /* 2A ROL A        */ imp!(RolA),
    /* 2B ANC #        */ rd_imm!(Anc),
    /* 2C BIT abs      */ rd_abs!(Bit),
    /* 2D AND abs      */ rd_abs!(And),
    /* 2E ROL abs      */ rmw_abs!(Rmw::Rol),
    /* 2F RLA abs      */ rmw_abs!(Rmw::Rla),
    /* 30 BMI rel      */ branch!(Minus),
    /* 31 AND (zp),Y   */ rd_izy!(And),
    /* 32 JAM          */ JAM_PIPE,
    /* 33 RLA (zp),Y   */ rmw_izy!(Rmw::Rla),
    /* 34 NOP zp,X     */ rd_zpi!(X, Ign),
    /* 35 AND zp,X     */ rd_zpi!(X, And),
    /* 36 ROL zp,X     */ rmw_zpx!(Rmw::Rol),
    /* 37 RLA zp,X     */ rmw_zpx!(Rmw::Rla),
    /* 38 SEC          */ imp!(Sec),
    /* 39 AND abs,Y    */ rd_abi!(Y, And),
    /* 3A NOP          */ imp!(Nop),
    /* 3B RLA abs,Y    */ rmw_abi!(Y, Rmw::Rla),
    /* 3C NOP abs,X    */ rd_abi!(X, Ign),
    /* 3D AND abs,X    */ rd_abi!(X, And),
    /* 3E ROL abs,X    */ rmw_abi!(X, Rmw::Rol),
    /* 3F RLA abs,X    */ rmw_abi!(X, Rmw::Rla),
    /* 40 RTI          */ RTI,
    /* 41 EOR (zp,X)   */ rd_izx!(Eor),
    /* 42 JAM          */ JAM_PIPE,
    /* 43 SRE (zp,X)   */ rmw_izx!(Rmw::Sre),
    /* 44 NOP zp       */ rd_zp!(Ign),
    /* 45 EOR zp       */ rd_zp!(Eor),
    /* 46 LSR zp       */ rmw_zp!(Rmw::Lsr),
    /* 47 SRE zp       */ rmw_zp!(Rmw::Sre),
    /* 48 PHA          */ PHA,
    /* 49 EOR #        */ rd_imm!(Eor),
    /* 4A LSR A        */ imp!(LsrA),
    /* 4B ALR #        */ rd_imm!(Alr),
    /* 4C JMP abs      */ JMP_ABS,
    /* 4D EOR abs      */ rd_abs!(Eor),
    /* 4E LSR abs      */ rmw_abs!(Rmw::Lsr),
    /* 4F SRE abs      */ rmw_abs!(Rmw::Sre),
    /* 50 BVC rel      */ branch!(OverflowClear),
    /* 51 EOR (zp),Y   */ rd_izy!(Eor),
    /* 52 JAM          */ JAM_PIPE,
    /* 53 SRE (zp),Y   */ rmw_izy!(Rmw::Sre),
    /* 54 NOP zp,X     */ rd_zpi!(X, Ign),
    /* 55 EOR zp,X     */ rd_zpi!(X, Eor),
    /* 56 LSR zp,X     */ rmw_zpx!(Rmw::Lsr),
    /* 57 SRE zp,X     */ rmw_zpx!(Rmw::Sre),
    /* 58 CLI          */ imp!(Cli),
    /* 59 EOR abs,Y    */ rd_abi!(Y, Eor),
    /* 5A NOP          */ imp!(Nop),
    /* 5B SRE abs,Y    */ rmw_abi!(Y, Rmw::Sre),
    /* 5C NOP abs,X    */ rd_abi!(X, Ign),
    /* 5D EOR abs,X    */ rd_abi!(X, Eor),
    /* 5E LSR abs,X    */ rmw_abi!(X, Rmw::Lsr),
    /* 5F SRE abs,X    */ rmw_abi!(X, Rmw::Sre),
    /* 60 RTS          */ RTS,
    /* 61 ADC (zp,X)   */ rd_izx!(Adc),
    /* 62 JAM          */ JAM_PIPE,
    /* 63 RRA (zp,X)   */ rmw_izx!(Rmw::Rra),
    /* 64 NOP zp       */ rd_zp!(Ign),
    /* 65 ADC zp       */ rd_zp!(Adc),
    /* 66 ROR zp       */ rmw_zp!(Rmw::Ror),
    /* 67 RRA zp       */ rmw_zp!(Rmw::Rra),
    /* 68 PLA          */ PLA,
    /* 69 ADC #        */ rd_imm!(Adc),
    /* 6A ROR A        */ imp!(RorA),
    /* 6B ARR #        */ rd_imm!(Arr),
    /* 6C JMP (abs)    */ JMP_IND_NMOS,
    /* 6D ADC abs      */ rd_abs!(Adc),
    /* 6E ROR abs      */ rmw_abs!(Rmw::Ror),
    /* 6F RRA abs      */ rmw_abs!(Rmw::Rra),
    /* 70 BVS rel      */ branch!(OverflowSet),
    /* 71 ADC (zp),Y   */ rd_izy!(Adc),
    /* 72 JAM          */ JAM_PIPE,
    /* 73 RRA (zp),Y   */ rmw_izy!(Rmw::Rra),
    /* 74 NOP zp,X     */ rd_zpi!(X, Ign),
    /* 75 ADC zp,X     */ rd_zpi!(X, Adc),
    /* 76 ROR zp,X     */ rmw_zpx!(Rmw::Ror),
    /* 77 RRA zp,X     */ rmw_zpx!(Rmw::Rra),
    /* 78 SEI          */ imp!(Sei),
    /* 79 ADC abs,Y    */ rd_abi!(Y, Adc),
    /* 7A NOP          */ imp!(Nop),
    /* 7B RRA abs,Y    */ rmw_abi!(Y, Rmw::Rra),
    /* 7C NOP abs,X    */ rd_abi!(X, Ign),
    /* 7D ADC abs,X    */ rd_abi!(X, Adc),
    /* 7E ROR abs,X    */ rmw_abi!(X, Rmw::Ror),
    /* 7F RRA abs,X    */ rmw_abi!(X, Rmw::Rra),
    /* 80 NOP #        */ rd_imm!(Ign),
    /* 81 STA (zp,X)   */ wr_izx!(A),
    /* 82 NOP #        */ rd_imm!(Ign),
    /* 83 SAX (zp,X)   */ wr_izx!(Ax),
    /* 84 STY zp       */ wr_zp!(Y),
    /* 85 STA zp       */ wr_zp!(A),
    /* 86 STX zp       */ wr_zp!(X),
    /* 87 SAX zp       */ wr_zp!(Ax),
    /* 88 DEY          */ imp!(Dey),
    /* 89 NOP #        */ rd_imm!(Ign),
    /* 8A TXA          */ imp!(Txa),
    /* 8B XAA #        */ rd_imm!(Xaa),
    /* 8C STY abs      */ wr_abs!(Y),
    /* 8D STA abs      */ wr_abs!(A),
    /* 8E STX abs      */ wr_abs!(X),
    /* 8F SAX abs      */ wr_abs!(Ax),
    /* 90 BCC rel      */ branch!(CarryClear),
    /* 91 STA (zp),Y   */ wr_izy!(A),
    /* 92 JAM          */ JAM_PIPE,
    /* 93 AHX (zp),Y   */ wr_izy!(AhxH),
    /* 94 STY zp,X     */ wr_zpi!(X, Y),
    /* 95 STA zp,X     */ wr_zpi!(X, A),
    /* 96 STX zp,Y     */ wr_zpi!(Y, X),
    /* 97 SAX zp,Y     */ wr_zpi!(Y, Ax),
    /* 98 TYA          */ imp!(Tya),
    /* 99 STA abs,Y    */ wr_abi!(Y, A),
    /* 9A TXS          */ imp!(Txs),
    /* 9B TAS abs,Y    */ wr_abi!(Y, TasH),
    /* 9C SHY abs,X    */ wr_abi!(X, ShyH),
    /* 9D STA abs,X    */ wr_abi!(X, A),
    /* 9E SHX abs,Y    */ wr_abi!(Y, ShxH),
    /* 9F AHX abs,Y    */ wr_abi!(Y, AhxH),
    /* A0 LDY #        */ rd_imm!(Ldy),
    /* A1 LDA (zp,X)   */ rd_izx!(Lda),
    /* A2 LDX #        */ rd_imm!(Ldx),
    /* A3 LAX (zp,X)   */ rd_izx!(Lax),
    /* A4 LDY zp       */ rd_zp!(Ldy),
    /* A5 LDA zp       */ rd_zp!(Lda),
    /* A6 LDX zp       */ rd_zp!(Ldx),
    /* A7 LAX zp       */ rd_zp!(Lax),
    /* A8 TAY          */ imp!(Tay),
    /* A9 LDA #        */ rd_imm!(Lda),
    /* AA TAX          */ imp!(Tax),
    /* AB LXA #        */ rd_imm!(Lxa),
    /* AC LDY abs      */ rd_abs!(Ldy),
    /* AD LDA abs      */ rd_abs!(Lda),
    /* AE LDX abs      */ rd_abs!(Ldx),
    /* AF LAX abs      */ rd_abs!(Lax),
    /* B0 BCS rel      */ branch!(CarrySet),
    /* B1 LDA (zp),Y   */ rd_izy!(Lda),
    /* B2 JAM          */ JAM_PIPE,
    /* B3 LAX (zp),Y   */ rd_izy!(Lax),
    /* B4 LDY zp,X     */ rd_zpi!(X, Ldy),
    /* B5 LDA zp,X     */ rd_zpi!(X, Lda),
    /* B6 LDX zp,Y     */ rd_zpi!(Y, Ldx),
    /* B7 LAX zp,Y     */ rd_zpi!(Y, Lax),
    /* B8 CLV          */ imp!(Clv),
    /* B9 LDA abs,Y    */ rd_abi!(Y, Lda),
    /* BA TSX          */ imp!(Tsx),
    /* BB LAS abs,Y    */ rd_abi!(Y, Las),
    /* BC LDY abs,X    */ rd_abi!(X, Ldy),
    /* BD LDA abs,X    */ rd_abi!(X, Lda),
    /* BE LDX abs,Y    */ rd_abi!(Y, Ldx),
    /* BF LAX abs,Y    */ rd_abi!(Y, Lax),
    /* C0 CPY #        */ rd_imm!(Cpy),
    /* C1 CMP (zp,X)   */ rd_izx!(Cmp),
    /* C2 NOP #        */ rd_imm!(Ign),
    /* C3 DCP (zp,X)   */ rmw_izx!(Rmw::Dcp),
    /* C4 CPY zp       */ rd_zp!(Cpy),
    /* C5 CMP zp       */ rd_zp!(Cmp),
    /* C6 DEC zp       */ rmw_zp!(Rmw::Dec),
    /* C7 DCP zp       */ rmw_zp!(Rmw::Dcp),
    /* C8 INY          */ imp!(Iny),
    /* C9 CMP #        */ rd_imm!(Cmp),
    /* CA DEX          */ imp!(Dex),
    /* CB AXS #        */ rd_imm!(Axs),
    /* CC CPY abs      */ rd_abs!(Cpy),
    /* CD CMP abs      */ rd_abs!(Cmp),
    /* CE DEC abs      */ rmw_abs!(Rmw::Dec),
    /* CF DCP abs      */ rmw_abs!(Rmw::Dcp),
    /* D0 BNE rel      */ branch!(NotZero),
    /* D1 CMP (zp),Y   */ rd_izy!(Cmp),
    /* D2 JAM          */ JAM_PIPE,
    /* D3 DCP (zp),Y   */ rmw_izy!(Rmw::Dcp),
    /* D4 NOP zp,X     */ rd_zpi!(X, Ign),
    /* D5 CMP zp,X     */ rd_zpi!(X, Cmp),
    /* D6 DEC zp,X     */ rmw_zpx!(Rmw::Dec),
    /* D7 DCP zp,X     */ rmw_zpx!(Rmw::Dcp),
    /* D8 CLD          */ imp!(Cld),
    /* D9 CMP abs,Y    */ rd_abi!(Y, Cmp),
    /* DA NOP          */ imp!(Nop),
    /* DB DCP abs,Y    */ rmw_abi!(Y, Rmw::Dcp),
    /* DC NOP abs,X    */ rd_abi!(X, Ign),
    /* DD CMP abs,X    */ rd_abi!(X, Cmp),
    /* DE DEC abs,X    */ rmw_abi!(X, Rmw::Dec),
    /* DF DCP abs,X    */ rmw_abi!(X, Rmw::Dcp),
    /* E0 CPX #        */ rd_imm!(Cpx),
    /* E1 SBC (zp,X)   */ rd_izx!(Sbc),
    /* E2 NOP #        */ rd_imm!(Ign),
    /* E3 ISC (zp,X)   */ rmw_izx!(Rmw::Isc),
    /* E4 CPX zp       */ rd_zp!(Cpx),
    /* E5 SBC zp       */ rd_zp!(Sbc),
    /* E6 INC zp       */ rmw_zp!(Rmw::Inc),
    /* E7 ISC zp       */ rmw_zp!(Rmw::Isc),
    /* E8 INX          */ imp!(Inx),
    /* E9 SBC #        */ rd_imm!(Sbc),
    /* EA NOP          */ imp!(Nop),
    /* EB SBC #        */ rd_imm!(Sbc),
    /* EC CPX abs      */ rd_abs!(Cpx),
    /* ED SBC abs      */ rd_abs!(Sbc),
    /* EE INC abs      */ rmw_abs!(Rmw::Inc),
    /* EF ISC abs      */ rmw_abs!(Rmw::Isc),
    /* F0 BEQ rel      */ branch!(Zero),
    /* F1 SBC (zp),Y   */ rd_izy!(Sbc),
    /* F2 JAM          */ JAM_PIPE,
    /* F3 ISC (zp),Y   */ rmw_izy!(Rmw::Isc),
    /* F4 NOP zp,X     */ rd_zpi!(X, Ign),
    /* F5 SBC zp,X     */ rd_zpi!(X, Sbc),
    /* F6 INC zp,X     */ rmw_zpx!(Rmw::Inc),
    /* F7 ISC zp,X     */ rmw_zpx!(Rmw::Isc),
    /* F8 SED          */ imp!(Sed),
    /* F9 SBC abs,Y    */ rd_abi!(Y, Sbc),
    /* FA NOP          */ imp!(Nop),
    /* FB ISC abs,Y    */ rmw_abi!(Y, Rmw::Isc),
    /* FC NOP abs,X    */ rd_abi!(X, Ign),
    /* FD SBC abs,X    */ rd_abi!(X, Sbc),
    /* FE INC abs,X    */ rmw_abi!(X, Rmw::Inc),
    /* FF ISC abs,X    */ rmw_abi!(X, Rmw::Isc),
];
