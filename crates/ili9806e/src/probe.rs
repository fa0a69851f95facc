//! Device attach and detach
//!
//! On attach the panel acquires its hardware resources, registers itself with
//! the display framework and attaches to the DSI host with the link settings
//! it needs. Detach undoes this in reverse and hands the resources back.

use core::fmt::Debug;

use embedded_hal::digital::OutputPin;

use crate::config::LinkConfig;
use crate::error::{ProbeError, Resource};
use crate::interface::DsiDevice;
use crate::panel::{Ili9806e, Parts};
use crate::power::{Backlight, PowerSupply};

/// Device tree compatible string of the panel
pub const COMPATIBLE: &str = "youritech,ili9806";

/// Driver name registered with the display framework
pub const DRIVER_NAME: &str = "panel-youritech-ili9806";

/// Kind of connector the panel sits behind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectorType {
    Dsi,
}

/// Identity the panel registers with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelInfo {
    pub compatible: &'static str,
    pub driver: &'static str,
    pub connector: ConnectorType,
}

/// This panel's registration record
pub const PANEL_INFO: PanelInfo = PanelInfo {
    compatible: COMPATIBLE,
    driver: DRIVER_NAME,
    connector: ConnectorType::Dsi,
};

/// Board level lookup of the panel's hardware resources
pub trait ResourceProvider {
    type ResetPin: OutputPin;
    type Supply: PowerSupply;
    type Backlight: Backlight;
    /// Error type for failed lookups
    type Error: Debug;

    /// Look up the reset line, configured as an output and deasserted (high)
    ///
    /// `Ok(None)` means the board has no reset line, which is not an error.
    fn reset_line(&mut self) -> Result<Option<Self::ResetPin>, Self::Error>;

    /// Look up the panel supply
    fn power_supply(&mut self) -> Result<Self::Supply, Self::Error>;

    /// Look up the backlight
    fn backlight(&mut self) -> Result<Self::Backlight, Self::Error>;
}

/// Display framework the panel registers with
pub trait PanelRegistry {
    fn add_panel(&mut self, info: &PanelInfo);
    fn remove_panel(&mut self, info: &PanelInfo);
}

impl<DSI, RST, PWR, BL> Ili9806e<DSI, RST, PWR, BL>
where
    DSI: DsiDevice,
    RST: OutputPin,
    PWR: PowerSupply,
    BL: Backlight,
{
    /// Attach the panel
    ///
    /// Resources are acquired in order reset line, supply, backlight; the first
    /// failure aborts before anything is registered. If the DSI host refuses
    /// the link, the panel is unregistered again.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Resource`] naming the missing resource, or
    /// [`ProbeError::Attach`] with the host's error.
    pub fn probe<P, R>(
        mut dsi: DSI,
        provider: &mut P,
        registry: &mut R,
        link: &LinkConfig,
    ) -> Result<Self, ProbeError<P::Error, DSI::Error>>
    where
        P: ResourceProvider<ResetPin = RST, Supply = PWR, Backlight = BL>,
        R: PanelRegistry,
    {
        let (reset, supply, backlight) = match acquire(provider) {
            Ok(resources) => resources,
            Err((resource, source)) => {
                log::error!("cannot get {resource}: {source:?}");
                return Err(ProbeError::Resource { resource, source });
            }
        };

        registry.add_panel(&PANEL_INFO);

        if let Err(err) = dsi.attach(link) {
            log::error!("DSI attach failed: {err:?}");
            registry.remove_panel(&PANEL_INFO);
            return Err(ProbeError::Attach(err));
        }

        log::debug!(
            "{DRIVER_NAME} attached: {} lanes, {:?}, reset line {}",
            link.lanes,
            link.format,
            if reset.is_some() { "present" } else { "absent" }
        );

        Ok(Self::from_parts(Parts {
            dsi,
            reset,
            supply,
            backlight,
        }))
    }

    /// Detach the panel and return its resources
    ///
    /// The caller is expected to have unprepared the panel first.
    pub fn remove<R: PanelRegistry>(self, registry: &mut R) -> Parts<DSI, RST, PWR, BL> {
        if self.is_prepared() {
            log::warn!("removing {DRIVER_NAME} while still prepared");
        }

        let mut parts = self.release();
        parts.dsi.detach();
        registry.remove_panel(&PANEL_INFO);
        parts
    }
}

type Acquired<P> = (
    Option<<P as ResourceProvider>::ResetPin>,
    <P as ResourceProvider>::Supply,
    <P as ResourceProvider>::Backlight,
);

fn acquire<P: ResourceProvider>(provider: &mut P) -> Result<Acquired<P>, (Resource, P::Error)> {
    let reset = provider
        .reset_line()
        .map_err(|e| (Resource::ResetLine, e))?;
    let supply = provider.power_supply().map_err(|e| (Resource::Supply, e))?;
    let backlight = provider.backlight().map_err(|e| (Resource::Backlight, e))?;
    Ok((reset, supply, backlight))
}
