//! Factory init program
//!
//! The ILI9806E is a paged register file: a register write lands in whichever
//! page was selected last. The program below is the factory tuning sequence
//! (power, VCOM, gamma and gate-in-panel timing) expressed as page switches
//! interleaved with register writes. It is executed strictly in order, one
//! transport write per instruction.

use crate::command::{Frame, encode_page_select, encode_register_write};
use crate::interface::DsiTransport;

/// One step of the init program
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Select the register page that following writes land in
    SwitchPage(u8),
    /// Write `value` to register `addr` of the current page
    WriteRegister(u8, u8),
}

impl Instruction {
    /// Encode this instruction as a single transport frame
    pub const fn encode(&self) -> Frame {
        match *self {
            Instruction::SwitchPage(page) => encode_page_select(page),
            Instruction::WriteRegister(addr, value) => encode_register_write(addr, value),
        }
    }
}

const fn page(page: u8) -> Instruction {
    Instruction::SwitchPage(page)
}

const fn reg(addr: u8, value: u8) -> Instruction {
    Instruction::WriteRegister(addr, value)
}

/// Factory init sequence for the Youritech 480x854 panel
pub static INIT_PROGRAM: &[Instruction] = &[
    // Page 1: panel control
    page(1),
    // Interface, DE polarity, resolution and inversion
    reg(0x08, 0x10),
    reg(0x20, 0x00),
    reg(0x21, 0x01),
    reg(0x30, 0x01),
    reg(0x31, 0x00),
    // Power: booster, VGH/VGL clamps
    reg(0x40, 0x16),
    reg(0x41, 0x33),
    reg(0x42, 0x03),
    reg(0x43, 0x09),
    reg(0x44, 0x06),
    // VREG1/VREG2 and VCOM (flicker) trim
    reg(0x50, 0x88),
    reg(0x51, 0x88),
    reg(0x52, 0x00),
    reg(0x53, 0x49),
    reg(0x55, 0x49),
    // Source timing
    reg(0x60, 0x07),
    reg(0x61, 0x00),
    reg(0x62, 0x07),
    reg(0x63, 0x00),
    // Positive gamma
    reg(0xA0, 0x00),
    reg(0xA1, 0x09),
    reg(0xA2, 0x11),
    reg(0xA3, 0x0B),
    reg(0xA4, 0x05),
    reg(0xA5, 0x08),
    reg(0xA6, 0x06),
    reg(0xA7, 0x04),
    reg(0xA8, 0x09),
    reg(0xA9, 0x0C),
    reg(0xAA, 0x15),
    reg(0xAB, 0x08),
    reg(0xAC, 0x0F),
    reg(0xAD, 0x12),
    reg(0xAE, 0x09),
    reg(0xAF, 0x00),
    // Negative gamma
    reg(0xC0, 0x00),
    reg(0xC1, 0x09),
    reg(0xC2, 0x10),
    reg(0xC3, 0x0C),
    reg(0xC4, 0x05),
    reg(0xC5, 0x08),
    reg(0xC6, 0x06),
    reg(0xC7, 0x04),
    reg(0xC8, 0x08),
    reg(0xC9, 0x0C),
    reg(0xCA, 0x14),
    reg(0xCB, 0x08),
    reg(0xCC, 0x0F),
    reg(0xCD, 0x11),
    reg(0xCE, 0x09),
    reg(0xCF, 0x00),
    // Page 6: gate-in-panel (GIP) timing
    page(6),
    reg(0x00, 0x20),
    reg(0x01, 0x0A),
    reg(0x02, 0x00),
    reg(0x03, 0x00),
    reg(0x04, 0x01),
    reg(0x05, 0x01),
    reg(0x06, 0x98),
    reg(0x07, 0x06),
    reg(0x08, 0x01),
    reg(0x09, 0x80),
    reg(0x0A, 0x00),
    reg(0x0B, 0x00),
    reg(0x0C, 0x01),
    reg(0x0D, 0x01),
    reg(0x0E, 0x05),
    reg(0x0F, 0x00),
    reg(0x10, 0xF0),
    reg(0x11, 0xF4),
    reg(0x12, 0x01),
    reg(0x13, 0x00),
    reg(0x14, 0x00),
    reg(0x15, 0xC0),
    reg(0x16, 0x08),
    reg(0x17, 0x00),
    reg(0x18, 0x00),
    reg(0x19, 0x00),
    reg(0x1A, 0x00),
    reg(0x1B, 0x00),
    reg(0x1C, 0x00),
    reg(0x1D, 0x00),
    // GIP signal routing
    reg(0x20, 0x01),
    reg(0x21, 0x23),
    reg(0x22, 0x45),
    reg(0x23, 0x67),
    reg(0x24, 0x01),
    reg(0x25, 0x23),
    reg(0x26, 0x45),
    reg(0x27, 0x67),
    // GIP output mapping
    reg(0x30, 0x11),
    reg(0x31, 0x11),
    reg(0x32, 0x00),
    reg(0x33, 0xEE),
    reg(0x34, 0xFF),
    reg(0x35, 0xBB),
    reg(0x36, 0xAA),
    reg(0x37, 0xDD),
    reg(0x38, 0xCC),
    reg(0x39, 0x66),
    reg(0x3A, 0x77),
    reg(0x3B, 0x22),
    reg(0x3C, 0x22),
    reg(0x3D, 0x22),
    reg(0x3E, 0x22),
    reg(0x3F, 0x22),
    reg(0x40, 0x22),
    // Page 7: vendor internals
    page(7),
    reg(0x17, 0x22),
    reg(0x02, 0x77),
    reg(0x26, 0xB2),
];

/// Send every instruction of `program` over `dsi`, in order
///
/// Stops at the first failed write and returns its error. Nothing is rolled
/// back: the controller is left partially programmed and only a full
/// power-down clears it.
pub fn execute<T>(dsi: &mut T, program: &[Instruction]) -> Result<(), T::Error>
where
    T: DsiTransport,
{
    for (index, instruction) in program.iter().enumerate() {
        if let Err(err) = dsi.write_buffer(instruction.encode().as_bytes()) {
            log::error!(
                "init instruction {index}/{} ({instruction:?}) failed: {err:?}",
                program.len()
            );
            return Err(err);
        }
    }

    Ok(())
}
