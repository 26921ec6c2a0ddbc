//! 65C02 decode tables (WDC and Rockwell).
//!
//! The CMOS parts fix the NMOS indirect-jump page bug (at the cost of a
//! cycle), re-derive N/Z from the corrected result in decimal mode (one
//! extra cycle), replace the RMW dummy write with a second read, and add
//! the stack/store/bit-manipulation opcodes. Every undefined opcode
//! decodes as a single-cycle NOP. The Rockwell part is the WDC table with
//! WAI and STP absent.

use super::*;
use crate::microcode::MicroOp::*;
use crate::microcode::Rmw;

#[rustfmt::skip]
pub(crate) const WDC: OpcodeTable = [
    /* 00 BRK          */ BRK_CMOS,
    /* 01 ORA (zp,X)   */ rd_izx!(Ora),
    /* 02 ---          */ NOP1,
    /* 03 ---          */ NOP1,
    /* 04 TSB zp       */ rmwc_zp!(Rmw::Tsb),
    /* 05 ORA zp       */ rd_zp!(Ora),
    /* 06 ASL zp       */ rmwc_zp!(Rmw::Asl),
    /* 07 RMB0 zp      */ rmwc_zp!(Rmw::Rmb(0)),
    /* 08 PHP          */ PHP,
    /* 09 ORA #        */ rd_imm!(Ora),
    /* 0A ASL A        */ imp!(AslA),
    /* 0B ---          */ NOP1,
    /* 0C TSB abs      */ rmwc_abs!(Rmw::Tsb),
    /* 0D ORA abs      */ rd_abs!(Ora),
    /* 0E ASL abs      */ rmwc_abs!(Rmw::Asl),
    /* 0F BBR0 zp,rel  */ bit_branch!(0, false),
    /* 10 BPL rel      */ branch!(Plus),
    /* 11 ORA (zp),Y   */ rd_izy!(Ora),
    /* 12 ORA (zp)     */ rd_izp!(Ora),
    /* 13 ---          */ NOP1,
    /* 14 TRB zp       */ rmwc_zp!(Rmw::Trb),
    /* 15 ORA zp,X     */ rd_zpi!(X, Ora),
    /* 16 ASL zp,X     */ rmwc_zpx!(Rmw::Asl),
    /* 17 RMB1 zp      */ rmwc_zp!(Rmw::Rmb(1)),
    /* 18 CLC          */ imp!(Clc),
    /* 19 ORA abs,Y    */ rd_abi!(Y, Ora),
    /* 1A INC A        */ imp!(IncA),
    /* 1B ---          */ NOP1,
    /* 1C TRB abs      */ rmwc_abs!(Rmw::Trb),
    /* 1D ORA abs,X    */ rd_abi!(X, Ora),
    /* 1E ASL abs,X    */ rmwc_abx!(Rmw::Asl),
    /* 1F BBR1 zp,rel  */ bit_branch!(1, false),
    /* 20 JSR abs      */ JSR,
    /* 21 AND (zp,X)   */ rd_izx!(And),
    /* 22 ---          */ NOP1,
    /* 23 ---          */ NOP1,
    /* 24 BIT zp       */ rd_zp!(Bit),
    /* 25 AND zp       */ rd_zp!(And),
    /* 26 ROL zp       */ rmwc_zp!(Rmw::Rol),
    /* 27 RMB2 zp      */ rmwc_zp!(Rmw::Rmb(2)),
    /* 28 PLP          */ PLP,
    /* 29 AND #        */ rd_imm!(And),
    /* 2A ROL A        */ imp!(RolA),
    /* 2B ---          */ NOP1,
    /* 2C BIT abs      */ rd_abs!(Bit),
    /* 2D AND abs      */ rd_abs!(And),
    /* 2E ROL abs      */ rmwc_abs!(Rmw::Rol),
    /* 2F BBR2 zp,rel  */ bit_branch!(2, false),
    /* 30 BMI rel      */ branch!(Minus),
    /* 31 AND (zp),Y   */ rd_izy!(And),
    /* 32 AND (zp)     */ rd_izp!(And),
    /* 33 ---          */ NOP1,
    /* 34 BIT zp,X     */ rd_zpi!(X, Bit),
    /* 35 AND zp,X     */ rd_zpi!(X, And),
    /* 36 ROL zp,X     */ rmwc_zpx!(Rmw::Rol),
    /* 37 RMB3 zp      */ rmwc_zp!(Rmw::Rmb(3)),
    /* 38 SEC          */ imp!(Sec),
    /* 39 AND abs,Y    */ rd_abi!(Y, And),
    /* 3A DEC A        */ imp!(DecA),
    /* 3B ---          */ NOP1,
    /* 3C BIT abs,X    */ rd_abi!(X, Bit),
    /* 3D AND abs,X    */ rd_abi!(X, And),
    /* 3E ROL abs,X    */ rmwc_abx!(Rmw::Rol),
    /* 3F BBR3 zp,rel  */ bit_branch!(3, false),
    /* 40 RTI          */ RTI,
    /* 41 EOR (zp,X)   */ rd_izx!(Eor),
    /* 42 ---          */ NOP1,
    /* 43 ---          */ NOP1,
    /* 44 ---          */ NOP1,
    /* 45 EOR zp       */ rd_zp!(Eor),
    /* 46 LSR zp       */ rmwc_zp!(Rmw::Lsr),
    /* 47 RMB4 zp      */ rmwc_zp!(Rmw::Rmb(4)),
    /* 48 PHA          */ PHA,
    /* 49 EOR #        */ rd_imm!(Eor),
    /* 4A LSR A        */ imp!(LsrA),
    /* 4B ---          */ NOP1,
    /* 4C JMP abs      */ JMP_ABS,
    /* 4D EOR abs      */ rd_abs!(Eor),
    /* 4E LSR abs      */ rmwc_abs!(Rmw::Lsr),
    /* 4F BBR4 zp,rel  */ bit_branch!(4, false),
    /* 50 BVC rel      */ branch!(OverflowClear),
    /* 51 EOR (zp),Y   */ rd_izy!(Eor),
    /* 52 EOR (zp)     */ rd_izp!(Eor),
    /* 53 ---          */ NOP1,
    /* 54 ---          */ NOP1,
    /* 55 EOR zp,X     */ rd_zpi!(X, Eor),
    /* 56 LSR zp,X     */ rmwc_zpx!(Rmw::Lsr),
    /* 57 RMB5 zp      */ rmwc_zp!(Rmw::Rmb(5)),
    /* 58 CLI          */ imp!(Cli),
    /* 59 EOR abs,Y    */ rd_abi!(Y, Eor),
    /* 5A PHY          */ PHY,
    /* 5B ---          */ NOP1,
    /* 5C ---          */ NOP1,
    /* 5D EOR abs,X    */ rd_abi!(X, Eor),
    /* 5E LSR abs,X    */ rmwc_abx!(Rmw::Lsr),
    /* 5F BBR5 zp,rel  */ bit_branch!(5, false),
    /* 60 RTS          */ RTS,
    /* 61 ADC (zp,X)   */ rd_izx!(AdcCmos, DecimalPenalty),
    /* 62 ---          */ NOP1,
    /* 63 ---          */ NOP1,
    /* 64 STZ zp       */ wr_zp!(Zero),
    /* 65 ADC zp       */ rd_zp!(AdcCmos, DecimalPenalty),
    /* 66 ROR zp       */ rmwc_zp!(Rmw::Ror),
    /* 67 RMB6 zp      */ rmwc_zp!(Rmw::Rmb(6)),
    /* 68 PLA          */ PLA,
    /* 69 ADC #        */ rd_imm!(AdcCmos, DecimalPenalty),
    /* 6A ROR A        */ imp!(RorA),
    /* 6B ---          */ NOP1,
    /* 6C JMP (abs)    */ JMP_IND_CMOS,
    /* 6D ADC abs      */ rd_abs!(AdcCmos, DecimalPenalty),
    /* 6E ROR abs      */ rmwc_abs!(Rmw::Ror),
    /* 6F BBR6 zp,rel  */ bit_branch!(6, false),
    /* 70 BVS rel      */ branch!(OverflowSet),
    /* 71 ADC (zp),Y   */ rd_izy!(AdcCmos, DecimalPenalty),
    /* 72 ADC (zp)     */ rd_izp!(AdcCmos, DecimalPenalty),
    /* 73 ---          */ NOP1,
    /* 74 STZ zp,X     */ wr_zpi!(X, Zero),
    /* 75 ADC zp,X     */ rd_zpi!(X, AdcCmos, DecimalPenalty),
    /* 76 ROR zp,X     */ rmwc_zpx!(Rmw::Ror),
    /* 77 RMB7 zp      */ rmwc_zp!(Rmw::Rmb(7)),
    /* 78 SEI          */ imp!(Sei),
    /* 79 ADC abs,Y    */ rd_abi!(Y, AdcCmos, DecimalPenalty),
    /* 7A PLY          */ PLY,
    /* 7B ---          */ NOP1,
    /* 7C JMP (abs,X)  */ JMP_ABX_IND,
    /* 7D ADC abs,X    */ rd_abi!(X, AdcCmos, DecimalPenalty),
    /* 7E ROR abs,X    */ rmwc_abx!(Rmw::Ror),
    /* 7F BBR7 zp,rel  */ bit_branch!(7, false),
    /* 80 BRA rel      */ branch!(Always),
    /* 81 STA (zp,X)   */ wr_izx!(A),
    /* 82 ---          */ NOP1,
    /* 83 ---          */ NOP1,
    /* 84 STY zp       */ wr_zp!(Y),
    /* 85 STA zp       */ wr_zp!(A),
    /* 86 STX zp       */ wr_zp!(X),
    /* 87 SMB0 zp      */ rmwc_zp!(Rmw::Smb(0)),
    /* 88 DEY          */ imp!(Dey),
    /* 89 BIT #        */ rd_imm!(BitImm),
    /* 8A TXA          */ imp!(Txa),
    /* 8B ---          */ NOP1,
    /* 8C STY abs      */ wr_abs!(Y),
    /* 8D STA abs      */ wr_abs!(A),
    /* 8E STX abs      */ wr_abs!(X),
    /* 8F BBS0 zp,rel  */ bit_branch!(0, true),
    /* 90 BCC rel      */ branch!(CarryClear),
    /* 91 STA (zp),Y   */ wr_izy!(A),
    /* 92 STA (zp)     */ wr_izp!(A),
    /* 93 ---          */ NOP1,
    /* 94 STY zp,X     */ wr_zpi!(X, Y),
    /* 95 STA zp,X     */ wr_zpi!(X, A),
    /* 96 STX zp,Y     */ wr_zpi!(Y, X),
    /* 97 SMB1 zp      */ rmwc_zp!(Rmw::Smb(1)),
    /* 98 TYA          */ imp!(Tya),
    /* 99 STA abs,Y    */ wr_abi!(Y, A),
    /* 9A TXS          */ imp!(Txs),
    /* 9B ---          */ NOP1,
    /* 9C STZ abs      */ wr_abs!(Zero),
    /* 9D STA abs,X    */ wr_abi!(X, A),
    /* 9E STZ abs,X    */ wr_abi!(X, Zero),
    /* 9F BBS1 zp,rel  */ bit_branch!(1, true),
    /* A0 LDY #        */ rd_imm!(Ldy),
    /* A1 LDA (zp,X)   */ rd_izx!(Lda),
    /* A2 LDX #        */ rd_imm!(Ldx),
    /* A3 ---          */ NOP1,
    /* A4 LDY zp       */ rd_zp!(Ldy),
    /* A5 LDA zp       */ rd_zp!(Lda),
    /* A6 LDX zp       */ rd_zp!(Ldx),
    /* A7 SMB2 zp      */ rmwc_zp!(Rmw::Smb(2)),
    /* A8 TAY          */ imp!(Tay),
    /* A9 LDA #        */ rd_imm!(Lda),
    /* AA TAX          */ imp!(Tax),
    /* AB ---          */ NOP1,
    /* AC LDY abs      */ rd_abs!(Ldy),
    /* AD LDA abs      */ rd_abs!(Lda),
    /* AE LDX abs      */ rd_abs!(Ldx),
    /* AF BBS2 zp,rel  */ bit_branch!(2, true),
    /* B0 BCS rel      */ branch!(CarrySet),
    /* B1 LDA (zp),Y   */ rd_izy!(Lda),
    /* B2 LDA (zp)     */ rd_izp!(Lda),
    /* B3 ---          */ NOP1,
    /* B4 LDY zp,X     */ rd_zpi!(X, Ldy),
    /* B5 LDA zp,X     */ rd_zpi!(X, Lda),
    /* B6 LDX zp,Y     */ rd_zpi!(Y, Ldx),
    /* B7 SMB3 zp      */ rmwc_zp!(Rmw::Smb(3)),
    /* B8 CLV          */ imp!(Clv),
    /* B9 LDA abs,Y    */ rd_abi!(Y, Lda),
    /* BA TSX          */ imp!(Tsx),
    /* BB ---          */ NOP1,
    /* BC LDY abs,X    */ rd_abi!(X, Ldy),
    /* BD LDA abs,X    */ rd_abi!(X, Lda),
    /* BE LDX abs,Y    */ rd_abi!(Y, Ldx),
    /* BF BBS3 zp,rel  */ bit_branch!(3, true),
    /* C0 CPY #        */ rd_imm!(Cpy),
    /* C1 CMP (zp,X)   */ rd_izx!(Cmp),
    /* C2 ---          */ NOP1,
    /* C3 ---          */ NOP1,
    /* C4 CPY zp       */ rd_zp!(Cpy),
    /* C5 CMP zp       */ rd_zp!(Cmp),
    /* C6 DEC zp       */ rmwc_zp!(Rmw::Dec),
    /* C7 SMB4 zp      */ rmwc_zp!(Rmw::Smb(4)),
    /* C8 INY          */ imp!(Iny),
    /* C9 CMP #        */ rd_imm!(Cmp),
    /* CA DEX          */ imp!(Dex),
    /* CB WAI          */ WAI_PIPE,
    /* CC CPY abs      */ rd_abs!(Cpy),
    /* CD CMP abs      */ rd_abs!(Cmp),
    /* CE DEC abs      */ rmwc_abs!(Rmw::Dec),
    /* CF BBS4 zp,rel  */ bit_branch!(4, true),
    /* D0 BNE rel      */ branch!(NotZero),
    /* D1 CMP (zp),Y   */ rd_izy!(Cmp),
    /* D2 CMP (zp)     */ rd_izp!(Cmp),
    /* D3 ---          */ NOP1,
    /* D4 ---          */ NOP1,
    /* D5 CMP zp,X     */ rd_zpi!(X, Cmp),
    /* D6 DEC zp,X     */ rmwc_zpx!(Rmw::Dec),
    /* D7 SMB5 zp      */ rmwc_zp!(Rmw::Smb(5)),
    /* D8 CLD          */ imp!(Cld),
    /* D9 CMP abs,Y    */ rd_abi!(Y, Cmp),
    /* DA PHX          */ PHX,
    /* DB STP          */ STP_PIPE,
    /* DC ---          */ NOP1,
    /* DD CMP abs,X    */ rd_abi!(X, Cmp),
    /* DE DEC abs,X    */ rmwc_abx!(Rmw::Dec),
    /* DF BBS5 zp,rel  */ bit_branch!(5, true),
    /* E0 CPX #        */ rd_imm!(Cpx),
    /* E1 SBC (zp,X)   */ rd_izx!(SbcCmos, DecimalPenalty),
    /* E2 ---          */ NOP1,
    /* E3 ---          */ NOP1,
    /* E4 CPX zp       */ rd_zp!(Cpx),
    /* E5 SBC zp       */ rd_zp!(SbcCmos, DecimalPenalty),
    /* E6 INC zp       */ rmwc_zp!(Rmw::Inc),
    /* E7 SMB6 zp      */ rmwc_zp!(Rmw::Smb(6)),
    /* E8 INX          */ imp!(Inx),
    /* E9 SBC #        */ rd_imm!(SbcCmos, DecimalPenalty),
    /* EA NOP          */ imp!(Nop),
    /* EB ---          */ NOP1,
    /* EC CPX abs      */ rd_abs!(Cpx),
    /* ED SBC abs      */ rd_abs!(SbcCmos, DecimalPenalty),
    /* EE INC abs      */ rmwc_abs!(Rmw::Inc),
    /* EF BBS6 zp,rel  */ bit_branch!(6, true),
    /* F0 BEQ rel      */ branch!(Zero),
    /* F1 SBC (zp),Y   */ rd_izy!(SbcCmos, DecimalPenalty),
    /* F2 SBC (zp)     */ rd_izp!(SbcCmos, DecimalPenalty),
    /* F3 ---          */ NOP1,
    /* F4 ---          */ NOP1,
    /* F5 SBC zp,X     */ rd_zpi!(X, SbcCmos, DecimalPenalty),
    /* F6 INC zp,X     */ rmwc_zpx!(Rmw::Inc),
    /* F7 SMB7 zp      */ rmwc_zp!(Rmw::Smb(7)),
    /* F8 SED          */ imp!(Sed),
    /* F9 SBC abs,Y    */ rd_abi!(Y, SbcCmos, DecimalPenalty),
    /* FA PLX          */ PLX,
    /* FB ---          */ NOP1,
    /* FC ---          */ NOP1,
    /* FD SBC abs,X    */ rd_abi!(X, SbcCmos, DecimalPenalty),
    /* FE INC abs,X    */ rmwc_abx!(Rmw::Inc),
    /* FF BBS7 zp,rel  */ bit_branch!(7, true),
];

/// Rockwell 65C02: no WAI/STP; $CB and $DB fall back to 1-cycle NOPs.
pub(crate) const ROCKWELL: OpcodeTable = {
    let mut table = WDC;
    table[0xCB] = NOP1;
    table[0xDB] = NOP1;
    table
};
