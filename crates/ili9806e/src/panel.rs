//! Panel power and init state machine
//!
//! The panel has two orthogonal concerns. *Prepared* means the supply is on,
//! the controller has been reset and programmed and is out of sleep; this is
//! the expensive, timing sensitive part. *Enabled* means the backlight is lit.
//! A caller may blank the screen by disabling without re-running the init
//! program.
//!
//! ```text
//!            prepare              enable
//!     Off ───────────► Prepared ─────────► Enabled
//!      ▲   ◄─────────             ◄─────────   │
//!      │     unprepare             disable     │
//!      └───────────────────────────────────────┘
//!                     unprepare
//! ```
//!
//! Every transition is idempotent: asking for the state the panel is already
//! in succeeds without touching hardware.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::command::{DCS_PAGE, encode_page_select};
use crate::error::{Error, ModeError};
use crate::init::{self, INIT_PROGRAM};
use crate::interface::{DsiTransport, NoResetPin};
use crate::mode::{self, DEFAULT_MODE, DisplayMode, ModeSink};
use crate::power::{Backlight, PowerSupply};

/// Reset held asserted during the reset pulse
pub const RESET_ASSERT_MS: u32 = 20;
/// Settle time after reset is released, before the first command
pub const RESET_SETTLE_MS: u32 = 100;
/// Controller power-up time after exit sleep mode
pub const SLEEP_OUT_SETTLE_MS: u32 = 125;
/// Settle time after display on
pub const DISPLAY_ON_SETTLE_MS: u32 = 20;
/// Controller sleep-entry time after enter sleep mode
pub const SLEEP_IN_SETTLE_MS: u32 = 120;
/// Reset held asserted before the supply is cut
pub const RESET_HOLD_MS: u32 = 20;

/// Lifecycle state of the panel
///
/// "Enabled but not prepared" cannot be represented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    /// Unpowered, or powered but not (fully) programmed
    #[default]
    Off,
    /// Programmed and displaying, backlight off
    Prepared,
    /// Programmed and displaying, backlight on
    Enabled,
}

impl PanelState {
    /// Controller is powered and programmed
    pub fn is_prepared(&self) -> bool {
        matches!(self, PanelState::Prepared | PanelState::Enabled)
    }

    /// Backlight is on
    pub fn is_enabled(&self) -> bool {
        matches!(self, PanelState::Enabled)
    }
}

/// Standard panel driver contract used by a display pipeline
///
/// Callers serialise calls; the driver does no locking of its own.
pub trait Panel {
    /// Error returned by the lifecycle operations
    type Error;

    /// Power up, reset and program the panel controller
    fn prepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Turn on the backlight of a prepared panel
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Turn off the backlight
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Put the controller to sleep and cut its power
    fn unprepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Publish the supported modes into `sink`, returning how many were added
    fn get_modes<S: ModeSink>(&self, sink: &mut S) -> Result<usize, ModeError<S::Error>>;
}

/// Lifecycle error of an [`Ili9806e`] with the given collaborators
pub type PanelError<DSI, RST, PWR, BL> = Error<
    <DSI as DsiTransport>::Error,
    <RST as ErrorType>::Error,
    <PWR as PowerSupply>::Error,
    <BL as Backlight>::Error,
>;

/// Hardware resources owned by a panel
#[derive(Debug)]
pub struct Parts<DSI, RST, PWR, BL> {
    /// DSI command channel
    pub dsi: DSI,
    /// Reset line, if the board routes one
    pub reset: Option<RST>,
    /// Panel supply
    pub supply: PWR,
    /// Backlight
    pub backlight: BL,
}

/// ILI9806E based 480x854 MIPI-DSI panel
///
/// ## Type Parameters
///
/// * `DSI` - Command channel implementing [`DsiTransport`]
/// * `RST` - Reset pin implementing [`OutputPin`] (active low)
/// * `PWR` - Supply implementing [`PowerSupply`]
/// * `BL` - Backlight implementing [`Backlight`]
///
/// ## Example
///
/// ```rust,ignore
/// use ili9806e::{GpioBacklight, GpioSupply, Ili9806e, Panel};
///
/// let mut panel = Ili9806e::new(dsi, GpioSupply::new(vdd_en), GpioBacklight::new(bl_en))
///     .with_reset(rst_pin);
///
/// panel.prepare(&mut delay)?;
/// panel.enable()?;
/// ```
pub struct Ili9806e<DSI, RST, PWR, BL> {
    dsi: DSI,
    reset: Option<RST>,
    supply: PWR,
    backlight: BL,
    state: PanelState,
}

impl<DSI, PWR, BL> Ili9806e<DSI, NoResetPin, PWR, BL> {
    /// Create a panel on a board without a reset line
    pub fn new(dsi: DSI, supply: PWR, backlight: BL) -> Self {
        Self {
            dsi,
            reset: None,
            supply,
            backlight,
            state: PanelState::Off,
        }
    }

    /// Add the panel reset line (active low)
    pub fn with_reset<RST>(self, reset: RST) -> Ili9806e<DSI, RST, PWR, BL> {
        Ili9806e {
            dsi: self.dsi,
            reset: Some(reset),
            supply: self.supply,
            backlight: self.backlight,
            state: self.state,
        }
    }
}

impl<DSI, RST, PWR, BL> Ili9806e<DSI, RST, PWR, BL> {
    /// Create an unprepared panel from its resources
    pub fn from_parts(parts: Parts<DSI, RST, PWR, BL>) -> Self {
        let Parts {
            dsi,
            reset,
            supply,
            backlight,
        } = parts;
        Self {
            dsi,
            reset,
            supply,
            backlight,
            state: PanelState::Off,
        }
    }

    /// Give back the hardware resources
    pub fn release(self) -> Parts<DSI, RST, PWR, BL> {
        Parts {
            dsi: self.dsi,
            reset: self.reset,
            supply: self.supply,
            backlight: self.backlight,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Whether prepare has completed and unprepare has not run since
    pub fn is_prepared(&self) -> bool {
        self.state.is_prepared()
    }

    /// Whether the backlight is currently on
    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    /// The panel's only timing mode
    pub fn mode(&self) -> DisplayMode {
        DEFAULT_MODE
    }

    /// Whether the board routes a reset line to the panel
    pub fn has_reset(&self) -> bool {
        self.reset.is_some()
    }
}

impl<DSI, RST, PWR, BL> Ili9806e<DSI, RST, PWR, BL>
where
    DSI: DsiTransport,
    RST: OutputPin,
    PWR: PowerSupply,
    BL: Backlight,
{
    /// Everything prepare does after the supply is up
    fn power_on<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PanelError<DSI, RST, PWR, BL>> {
        if let Some(reset) = self.reset.as_mut() {
            reset.set_low().map_err(Error::Reset)?;
            delay.delay_ms(RESET_ASSERT_MS);
            reset.set_high().map_err(Error::Reset)?;
            delay.delay_ms(RESET_SETTLE_MS);
        }

        init::execute(&mut self.dsi, INIT_PROGRAM).map_err(Error::Transport)?;

        // DCS commands are only decoded on page 0
        self.dsi
            .write_buffer(encode_page_select(DCS_PAGE).as_bytes())
            .map_err(Error::Transport)?;

        self.dsi.exit_sleep_mode().map_err(Error::Transport)?;
        delay.delay_ms(SLEEP_OUT_SETTLE_MS);

        self.dsi.set_display_on().map_err(Error::Transport)?;
        delay.delay_ms(DISPLAY_ON_SETTLE_MS);

        Ok(())
    }

    /// Hold the controller in reset and cut its supply
    fn power_off<D: DelayNs>(&mut self, delay: &mut D) {
        if let Some(reset) = self.reset.as_mut() {
            if let Err(err) = reset.set_low() {
                log::warn!("failed to assert reset: {err:?}");
            }
            delay.delay_ms(RESET_HOLD_MS);
        }

        if let Err(err) = self.supply.disable() {
            log::warn!("failed to disable supply: {err:?}");
        }
    }
}

impl<DSI, RST, PWR, BL> Panel for Ili9806e<DSI, RST, PWR, BL>
where
    DSI: DsiTransport,
    RST: OutputPin,
    PWR: PowerSupply,
    BL: Backlight,
{
    type Error = PanelError<DSI, RST, PWR, BL>;

    fn prepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        if self.state.is_prepared() {
            log::debug!("prepare: already prepared");
            return Ok(());
        }

        if let Err(err) = self.supply.enable() {
            log::error!("failed to enable supply: {err:?}");
            return Err(Error::Supply(err));
        }

        if let Err(err) = self.power_on(delay) {
            // Register state is unknown; only a power cycle gets it back
            log::error!("prepare failed, powering panel down: {err}");
            self.power_off(delay);
            return Err(err);
        }

        log::debug!("panel prepared");
        self.state = PanelState::Prepared;
        Ok(())
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        match self.state {
            PanelState::Enabled => {
                log::debug!("enable: already enabled");
                Ok(())
            }
            PanelState::Off => {
                log::warn!("enable called on unprepared panel");
                Err(Error::NotPrepared)
            }
            PanelState::Prepared => {
                self.backlight.enable().map_err(Error::Backlight)?;
                log::debug!("panel enabled");
                self.state = PanelState::Enabled;
                Ok(())
            }
        }
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        if !self.state.is_enabled() {
            log::debug!("disable: already disabled");
            return Ok(());
        }

        self.backlight.disable().map_err(Error::Backlight)?;
        log::debug!("panel disabled");
        self.state = PanelState::Prepared;
        Ok(())
    }

    fn unprepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        if !self.state.is_prepared() {
            log::debug!("unprepare: already unprepared");
            return Ok(());
        }

        if self.state.is_enabled() {
            if let Err(err) = self.backlight.disable() {
                log::warn!("failed to disable backlight: {err:?}");
            }
        }

        if let Err(err) = self.dsi.set_display_off() {
            log::warn!("failed to set display off: {err:?}");
        }

        if let Err(err) = self.dsi.enter_sleep_mode() {
            log::warn!("failed to enter sleep mode: {err:?}");
        }

        delay.delay_ms(SLEEP_IN_SETTLE_MS);

        self.power_off(delay);

        log::debug!("panel unprepared");
        self.state = PanelState::Off;
        Ok(())
    }

    fn get_modes<S: ModeSink>(&self, sink: &mut S) -> Result<usize, ModeError<S::Error>> {
        mode::publish(&DEFAULT_MODE, sink)
    }
}
