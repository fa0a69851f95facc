//! ILI9806E command definitions and frame encoding
//!
//! The controller understands two kinds of traffic on the DSI control channel:
//!
//! - Standard DCS commands (sleep, display on/off). These are only valid while
//!   page 0 is selected.
//! - Vendor register writes, which land in whichever register page was last
//!   selected with the page-select frame.

// Standard DCS commands (page 0 only)
pub const ENTER_SLEEP_MODE: u8 = 0x10; // Enter sleep mode
pub const EXIT_SLEEP_MODE: u8 = 0x11; // Exit sleep mode
pub const SET_DISPLAY_OFF: u8 = 0x28; // Display off
pub const SET_DISPLAY_ON: u8 = 0x29; // Display on

// Vendor extension command set
pub const PAGE_SELECT: u8 = 0xFF; // EXTC: unlock + page index
pub const PAGE_SELECT_PREAMBLE: [u8; 5] = [PAGE_SELECT, 0xFF, 0x98, 0x06, 0x04];

/// Page holding the standard DCS command set
pub const DCS_PAGE: u8 = 0;

/// Length of an encoded page-select frame
pub const PAGE_SELECT_LEN: usize = 6;
/// Length of an encoded register-write frame
pub const REGISTER_WRITE_LEN: usize = 2;

/// A single encoded write for the DSI control channel
///
/// Every frame is sent as exactly one blocking transport write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    /// `[0xFF, 0xFF, 0x98, 0x06, 0x04, page]`
    PageSelect([u8; PAGE_SELECT_LEN]),
    /// `[addr, value]`
    RegisterWrite([u8; REGISTER_WRITE_LEN]),
}

impl Frame {
    /// Bytes to hand to the transport
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Frame::PageSelect(bytes) => bytes,
            Frame::RegisterWrite(bytes) => bytes,
        }
    }
}

/// Encode a register page selection
pub const fn encode_page_select(page: u8) -> Frame {
    let [b0, b1, b2, b3, b4] = PAGE_SELECT_PREAMBLE;
    Frame::PageSelect([b0, b1, b2, b3, b4, page])
}

/// Encode a write of `value` to register `addr` of the current page
pub const fn encode_register_write(addr: u8, value: u8) -> Frame {
    Frame::RegisterWrite([addr, value])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_select_frame_carries_vendor_preamble() {
        let frame = encode_page_select(6);
        assert_eq!(frame.as_bytes(), &[0xFF, 0xFF, 0x98, 0x06, 0x04, 0x06]);
    }

    #[test]
    fn register_write_frame_is_addr_then_value() {
        let frame = encode_register_write(0x30, 0x01);
        assert_eq!(frame.as_bytes(), &[0x30, 0x01]);
    }

    #[test]
    fn frames_are_distinguishable_by_length() {
        assert_eq!(encode_page_select(DCS_PAGE).as_bytes().len(), PAGE_SELECT_LEN);
        assert_eq!(
            encode_register_write(0xFF, 0xFF).as_bytes().len(),
            REGISTER_WRITE_LEN
        );
    }
}
