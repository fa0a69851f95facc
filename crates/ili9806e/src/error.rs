//! Error types for the driver
//!
//! This module defines error types for link configuration building
//! ([`BuilderError`]), panel lifecycle operations ([`Error`]), mode
//! publication ([`ModeError`]) and device attach ([`ProbeError`]).
//!
//! ## Error Types
//!
//! - [`Error`] - Runtime errors from prepare/enable/disable/unprepare
//! - [`ModeError`] - The mode sink could not store the panel mode
//! - [`ProbeError`] - A hardware resource or the DSI host was unavailable at attach
//! - [`BuilderError`] - Errors during link configuration construction
//!
//! ## Example
//!
//! ```
//! use ili9806e::{Builder, BuilderError};
//!
//! // The panel needs at least one data lane
//! let result = Builder::new().lanes(0).build();
//! assert!(matches!(result, Err(BuilderError::InvalidLaneCount(0))));
//! ```

use core::fmt::{self, Debug, Display};

/// Maximum number of DSI data lanes
pub const MAX_DATA_LANES: u8 = 4;

/// Highest DSI virtual channel number
pub const MAX_VIRTUAL_CHANNEL: u8 = 3;

/// Errors that can occur while driving the panel through its lifecycle
///
/// Generic over the error types of the collaborators so error handling code
/// can match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<DsiE, RstE, PwrE, BlE> {
    /// A DSI write or DCS command failed
    ///
    /// Fatal during prepare: the panel stays unprepared.
    Transport(DsiE),
    /// Driving the reset line failed
    Reset(RstE),
    /// The power supply refused to turn on
    Supply(PwrE),
    /// The backlight could not be switched
    Backlight(BlE),
    /// `enable` was called before a successful `prepare`
    NotPrepared,
}

impl<DsiE, RstE, PwrE, BlE> Display for Error<DsiE, RstE, PwrE, BlE>
where
    DsiE: Debug,
    RstE: Debug,
    PwrE: Debug,
    BlE: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "DSI transport error: {e:?}"),
            Error::Reset(e) => write!(f, "Reset line error: {e:?}"),
            Error::Supply(e) => write!(f, "Failed to enable supply: {e:?}"),
            Error::Backlight(e) => write!(f, "Backlight error: {e:?}"),
            Error::NotPrepared => write!(f, "Panel must be prepared before it is enabled"),
        }
    }
}

impl<DsiE, RstE, PwrE, BlE> core::error::Error for Error<DsiE, RstE, PwrE, BlE>
where
    DsiE: Debug,
    RstE: Debug,
    PwrE: Debug,
    BlE: Debug,
{
}

/// Errors that can occur when publishing the panel mode
#[derive(Debug)]
pub enum ModeError<E> {
    /// The sink had no room for a copy of the mode
    Allocation(E),
}

impl<E: Debug> Display for ModeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeError::Allocation(e) => write!(f, "Failed to add mode: {e:?}"),
        }
    }
}

impl<E: Debug> core::error::Error for ModeError<E> {}

/// Hardware resource looked up when the panel is attached
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    /// Panel reset GPIO
    ResetLine,
    /// Panel power regulator
    Supply,
    /// Backlight device
    Backlight,
}

impl Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::ResetLine => write!(f, "reset GPIO"),
            Resource::Supply => write!(f, "regulator"),
            Resource::Backlight => write!(f, "backlight"),
        }
    }
}

/// Errors that can occur when attaching the panel
#[derive(Debug)]
pub enum ProbeError<ResE, DsiE> {
    /// A hardware resource could not be acquired
    Resource {
        /// Which resource failed
        resource: Resource,
        /// Error reported by the resource provider
        source: ResE,
    },
    /// The DSI host refused to attach the device
    Attach(DsiE),
}

impl<ResE: Debug, DsiE: Debug> Display for ProbeError<ResE, DsiE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Resource { resource, source } => {
                write!(f, "Cannot get {resource}: {source:?}")
            }
            ProbeError::Attach(e) => write!(f, "DSI attach failed: {e:?}"),
        }
    }
}

impl<ResE: Debug, DsiE: Debug> core::error::Error for ProbeError<ResE, DsiE> {}

/// Errors that can occur when building the link configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Lane count outside 1..=MAX_DATA_LANES
    InvalidLaneCount(u8),
    /// Virtual channel above MAX_VIRTUAL_CHANNEL
    InvalidVirtualChannel(u8),
}

impl Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderError::InvalidLaneCount(lanes) => {
                write!(f, "Invalid lane count {lanes} (1..={MAX_DATA_LANES})")
            }
            BuilderError::InvalidVirtualChannel(channel) => {
                write!(f, "Invalid virtual channel {channel} (max {MAX_VIRTUAL_CHANNEL})")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
