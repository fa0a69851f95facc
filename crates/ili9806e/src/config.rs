//! DSI link configuration types and builder

pub use crate::error::{BuilderError, MAX_DATA_LANES, MAX_VIRTUAL_CHANNEL};

bitflags::bitflags! {
    /// DSI link operating mode flags
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ModeFlags: u32 {
        /// Video mode (pixel stream) rather than command mode
        const VIDEO = 1 << 0;
        /// Video burst mode
        const VIDEO_BURST = 1 << 1;
        /// Video sync pulses rather than sync events
        const VIDEO_SYNC_PULSE = 1 << 2;
        /// Send commands in low-power mode
        const LOW_POWER_MODE = 1 << 11;
    }
}

/// Pixel format on the video stream
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelFormat {
    /// 24 bits per pixel
    #[default]
    Rgb888,
    /// 18 bits per pixel, loosely packed in 24-bit words
    Rgb666,
    /// 18 bits per pixel, packed
    Rgb666Packed,
    /// 16 bits per pixel
    Rgb565,
}

impl PixelFormat {
    /// Bits carried per pixel on the link
    pub fn bits_per_pixel(&self) -> u8 {
        match self {
            PixelFormat::Rgb888 | PixelFormat::Rgb666 => 24,
            PixelFormat::Rgb666Packed => 18,
            PixelFormat::Rgb565 => 16,
        }
    }
}

/// Link parameters the panel is attached with
///
/// Use [`Builder`] to create a LinkConfig.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkConfig {
    /// Number of DSI data lanes
    pub lanes: u8,
    /// Video pixel format
    pub format: PixelFormat,
    /// Operating mode flags
    pub mode_flags: ModeFlags,
    /// DSI virtual channel the panel answers on
    pub virtual_channel: u8,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            lanes: 2,
            format: PixelFormat::Rgb888,
            mode_flags: ModeFlags::VIDEO | ModeFlags::VIDEO_BURST | ModeFlags::LOW_POWER_MODE,
            virtual_channel: 0,
        }
    }
}

/// Builder for constructing the link configuration
///
/// Defaults match what the panel requires; only override them for board
/// bring-up experiments.
///
/// # Example
///
/// ```
/// use ili9806e::{Builder, PixelFormat};
///
/// let link = Builder::new()
///     .lanes(2)
///     .format(PixelFormat::Rgb888)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(link.lanes, 2);
/// ```
#[derive(Default)]
pub struct Builder {
    link: LinkConfig,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of data lanes (1..=4)
    pub fn lanes(mut self, lanes: u8) -> Self {
        self.link.lanes = lanes;
        self
    }

    /// Set the pixel format
    pub fn format(mut self, format: PixelFormat) -> Self {
        self.link.format = format;
        self
    }

    /// Set the operating mode flags
    pub fn mode_flags(mut self, flags: ModeFlags) -> Self {
        self.link.mode_flags = flags;
        self
    }

    /// Set the virtual channel (0..=3)
    pub fn virtual_channel(mut self, channel: u8) -> Self {
        self.link.virtual_channel = channel;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidLaneCount` or
    /// `BuilderError::InvalidVirtualChannel` for values the link cannot carry.
    pub fn build(self) -> Result<LinkConfig, BuilderError> {
        let LinkConfig {
            lanes,
            virtual_channel,
            ..
        } = self.link;
        if lanes == 0 || lanes > MAX_DATA_LANES {
            return Err(BuilderError::InvalidLaneCount(lanes));
        }
        if virtual_channel > MAX_VIRTUAL_CHANNEL {
            return Err(BuilderError::InvalidVirtualChannel(virtual_channel));
        }
        Ok(self.link)
    }
}
