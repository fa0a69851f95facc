//! Display timing mode
//!
//! The panel supports exactly one video timing. It is a property of how the
//! controller is programmed during prepare, so it is reported the same way
//! whether or not the panel is currently powered.

use core::fmt;

use crate::error::ModeError;

bitflags::bitflags! {
    /// Sync polarity and scan flags of a mode
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SyncFlags: u32 {
        const PHSYNC = 1 << 0;
        const NHSYNC = 1 << 1;
        const PVSYNC = 1 << 2;
        const NVSYNC = 1 << 3;
        const INTERLACE = 1 << 4;
    }
}

bitflags::bitflags! {
    /// How a mode was obtained
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ModeType: u32 {
        /// Mode is preferred over others the connector lists
        const PREFERRED = 1 << 3;
        /// Mode is defined by the driver rather than probed from EDID
        const DRIVER = 1 << 6;
    }
}

/// Video timing of a display mode
///
/// Horizontal values are in pixels, vertical values in lines, measured from
/// the start of the active area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayMode {
    /// Pixel clock in kHz
    pub clock: u32,
    pub hdisplay: u16,
    pub hsync_start: u16,
    pub hsync_end: u16,
    pub htotal: u16,
    pub vdisplay: u16,
    pub vsync_start: u16,
    pub vsync_end: u16,
    pub vtotal: u16,
    pub flags: SyncFlags,
    /// Physical width of the active area in millimetres
    pub width_mm: u16,
    /// Physical height of the active area in millimetres
    pub height_mm: u16,
}

/// The single timing the panel runs at: 480x854, 48 MHz pixel clock
pub const DEFAULT_MODE: DisplayMode = DisplayMode {
    clock: 48_000,
    hdisplay: 480,
    hsync_start: 480 + 20,
    hsync_end: 480 + 20 + 4,
    htotal: 480 + 20 + 4 + 16,
    vdisplay: 854,
    vsync_start: 854 + 100,
    vsync_end: 854 + 100 + 10,
    vtotal: 854 + 100 + 10 + 50,
    flags: SyncFlags::empty(),
    width_mm: 87,
    height_mm: 87,
};

impl DisplayMode {
    /// Refresh rate in Hz, rounded to the nearest integer
    ///
    /// Returns 0 for a mode with no blanking totals.
    pub fn vrefresh(&self) -> u32 {
        let total = u64::from(self.htotal) * u64::from(self.vtotal);
        if total == 0 {
            return 0;
        }
        let pixels_per_second = u64::from(self.clock) * 1000;
        ((pixels_per_second + total / 2) / total) as u32
    }

    /// Human readable mode name, e.g. `480x854`
    pub fn name(&self) -> ModeName {
        ModeName {
            hdisplay: self.hdisplay,
            vdisplay: self.vdisplay,
            interlaced: self.flags.contains(SyncFlags::INTERLACE),
        }
    }
}

/// Name of a mode, formatted on demand
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeName {
    hdisplay: u16,
    vdisplay: u16,
    interlaced: bool,
}

impl fmt::Display for ModeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.hdisplay, self.vdisplay)?;
        if self.interlaced {
            write!(f, "i")?;
        }
        Ok(())
    }
}

/// Receiver for the modes a panel supports (the display connector)
pub trait ModeSink {
    /// Error type when a mode cannot be stored
    type Error: fmt::Debug;

    /// Store a copy of `mode` under `name`
    ///
    /// # Errors
    ///
    /// Returns an error if there is no room for the copy.
    fn add_mode(&mut self, mode: &DisplayMode, name: ModeName, kind: ModeType)
    -> Result<(), Self::Error>;

    /// Record the physical size of the display area
    fn set_physical_size(&mut self, width_mm: u16, height_mm: u16);
}

/// Publish `mode` as the driver's preferred mode
///
/// Returns the number of modes added.
pub fn publish<S: ModeSink>(mode: &DisplayMode, sink: &mut S) -> Result<usize, ModeError<S::Error>> {
    if let Err(err) = sink.add_mode(mode, mode.name(), ModeType::DRIVER | ModeType::PREFERRED) {
        log::error!(
            "failed to add mode {}x{}@{}",
            mode.hdisplay,
            mode.vdisplay,
            mode.vrefresh()
        );
        return Err(ModeError::Allocation(err));
    }

    sink.set_physical_size(mode.width_mm, mode.height_mm);

    Ok(1)
}
