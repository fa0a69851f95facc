//! Hardware interface abstraction
//!
//! This module provides the [`DsiTransport`] trait the panel drives its
//! command traffic through, the [`DsiDevice`] extension used when the panel is
//! attached to a DSI host, and [`NoResetPin`] for boards that do not route the
//! panel reset line.
//!
//! ## Hardware Requirements
//!
//! The ILI9806E panel requires:
//! - A MIPI-DSI link (2 data lanes, video burst mode, commands sent in LP mode)
//! - A switchable power rail (see [`PowerSupply`](crate::power::PowerSupply))
//! - A backlight (see [`Backlight`](crate::power::Backlight))
//! - Optionally a **RST** GPIO (output, active low)
//!
//! ## Example
//!
//! ```rust,ignore
//! use ili9806e::DsiTransport;
//!
//! // Vendor page select followed by a register write
//! dsi.write_buffer(&[0xFF, 0xFF, 0x98, 0x06, 0x04, 0x01])?;
//! dsi.write_buffer(&[0x30, 0x01])?;
//!
//! // Standard DCS command (page 0 only)
//! dsi.exit_sleep_mode()?;
//! ```

use core::convert::Infallible;
use core::fmt::Debug;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::command::{ENTER_SLEEP_MODE, EXIT_SLEEP_MODE, SET_DISPLAY_OFF, SET_DISPLAY_ON};
use crate::config::LinkConfig;

/// Blocking command channel to the panel controller
///
/// Implementations wrap the DSI host's low-power command path. Writes are
/// ordered and blocking: when a call returns, the frame has been delivered or
/// the error describes why it was not.
pub trait DsiTransport {
    /// Error type for transport operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send one DCS write frame
    ///
    /// The first byte is the command (or vendor register address), the rest
    /// are its parameters. Each call is exactly one packet on the link.
    ///
    /// # Errors
    ///
    /// Returns an error if the host failed to transmit the packet.
    fn write_buffer(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Send DCS `set_display_off`
    fn set_display_off(&mut self) -> Result<(), Self::Error> {
        self.write_buffer(&[SET_DISPLAY_OFF])
    }

    /// Send DCS `enter_sleep_mode`
    fn enter_sleep_mode(&mut self) -> Result<(), Self::Error> {
        self.write_buffer(&[ENTER_SLEEP_MODE])
    }

    /// Send DCS `exit_sleep_mode`
    fn exit_sleep_mode(&mut self) -> Result<(), Self::Error> {
        self.write_buffer(&[EXIT_SLEEP_MODE])
    }

    /// Send DCS `set_display_on`
    fn set_display_on(&mut self) -> Result<(), Self::Error> {
        self.write_buffer(&[SET_DISPLAY_ON])
    }
}

/// A DSI peripheral that can be attached to and detached from its host
///
/// Attaching tells the host which link parameters (lanes, pixel format, mode
/// flags) the panel expects. Until then the host may not drive the link.
pub trait DsiDevice: DsiTransport {
    /// Attach the device to the DSI host with the given link configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot provide the requested link.
    fn attach(&mut self, link: &LinkConfig) -> Result<(), Self::Error>;

    /// Detach the device from the DSI host
    fn detach(&mut self);
}

/// Placeholder reset pin for boards without a panel reset line
///
/// Used as the `RST` type parameter when the reset line is absent; it is never
/// driven.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResetPin;

impl ErrorType for NoResetPin {
    type Error = Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
