//! Power rail and backlight control
//!
//! The panel owns two switchable resources besides its DSI link: the supply
//! that powers the controller and the backlight that makes the image visible.
//! Both are traits so boards can plug in a regulator driver, a load switch, or
//! a PWM channel. Adapters for the common embedded-hal cases are provided.

use core::convert::Infallible;
use core::fmt::Debug;

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

/// Switchable power rail feeding the panel
pub trait PowerSupply {
    /// Error type for supply operations
    type Error: Debug;

    /// Turn the rail on
    ///
    /// # Errors
    ///
    /// Returns an error if the regulator refused to enable.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Turn the rail off
    fn disable(&mut self) -> Result<(), Self::Error>;
}

/// Panel backlight
pub trait Backlight {
    /// Error type for backlight operations
    type Error: Debug;

    /// Light the panel
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Switch the light off
    fn disable(&mut self) -> Result<(), Self::Error>;
}

/// Supply switched by an active-high enable pin (load switch or LDO EN)
#[derive(Debug)]
pub struct GpioSupply<P> {
    pin: P,
}

impl<P: OutputPin> GpioSupply<P> {
    /// Wrap an enable pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the enable pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> PowerSupply for GpioSupply<P> {
    type Error = P::Error;

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }
}

/// Backlight switched fully on or off by an active-high pin
#[derive(Debug)]
pub struct GpioBacklight<P> {
    pin: P,
}

impl<P: OutputPin> GpioBacklight<P> {
    /// Wrap a backlight enable pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the enable pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Backlight for GpioBacklight<P> {
    type Error = P::Error;

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }
}

/// PWM dimmed backlight with a fixed brightness while enabled
#[derive(Debug)]
pub struct PwmBacklight<P> {
    pwm: P,
    brightness: u8,
}

impl<P: SetDutyCycle> PwmBacklight<P> {
    /// Wrap a PWM channel; `brightness` is a percentage, clamped to 100
    pub fn new(pwm: P, brightness: u8) -> Self {
        Self {
            pwm,
            brightness: brightness.min(100),
        }
    }

    /// Brightness applied on enable, in percent
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Release the PWM channel
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> Backlight for PwmBacklight<P> {
    type Error = P::Error;

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.pwm.set_duty_cycle_percent(self.brightness)
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.pwm.set_duty_cycle_fully_off()
    }
}

/// Backlight for boards where the light is not software controlled
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBacklight;

impl Backlight for NoBacklight {
    type Error = Infallible;

    fn enable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
