//! Driver for MIPI-DSI LCD panels built on the ILI9806E controller
//!
//! Targets the Youritech 480x854 panel: it brings the panel in and out of a
//! powered, programmed, lit state and reports the single video timing the
//! panel runs at. Pixel data travels over the DSI video stream and is not
//! handled here.
//!
//! ## Lifecycle
//!
//! - [`Panel::prepare`] - supply on, reset pulse, factory init program, exit
//!   sleep, display on
//! - [`Panel::enable`] / [`Panel::disable`] - backlight only, no DSI traffic
//! - [`Panel::unprepare`] - display off, enter sleep, reset, supply off
//! - [`Panel::get_modes`] - publish [`DEFAULT_MODE`]
//!
//! All calls block, including the protocol waits, which go through the
//! caller's [`DelayNs`](embedded_hal::delay::DelayNs).
//!
//! ## Example
//!
//! ```rust,ignore
//! use ili9806e::{GpioBacklight, GpioSupply, Ili9806e, Panel};
//!
//! let mut panel = Ili9806e::new(dsi, GpioSupply::new(vdd_en), GpioBacklight::new(bl_en))
//!     .with_reset(rst);
//!
//! panel.prepare(&mut delay)?;
//! panel.enable()?;
//! // ... stream video ...
//! panel.disable()?;
//! panel.unprepare(&mut delay)?;
//! ```
//!
//! ## Features
//!
//! - `graphics` (default) - geometry via `embedded-graphics-core`

#![cfg_attr(not(feature = "std"), no_std)]

pub mod command;
pub mod config;
pub mod error;
pub mod init;
pub mod interface;
pub mod mode;
pub mod panel;
pub mod power;
pub mod probe;

#[cfg(feature = "graphics")]
pub mod graphics;

pub use config::{Builder, LinkConfig, ModeFlags, PixelFormat};
pub use error::{BuilderError, Error, ModeError, ProbeError, Resource};
pub use init::{INIT_PROGRAM, Instruction};
pub use interface::{DsiDevice, DsiTransport, NoResetPin};
pub use mode::{DEFAULT_MODE, DisplayMode, ModeName, ModeSink, ModeType, SyncFlags};
pub use panel::{Ili9806e, Panel, PanelError, PanelState, Parts};
pub use power::{Backlight, GpioBacklight, GpioSupply, NoBacklight, PowerSupply, PwmBacklight};
pub use probe::{ConnectorType, PANEL_INFO, PanelInfo, PanelRegistry, ResourceProvider};
