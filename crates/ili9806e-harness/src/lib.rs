//! Host-side test harness for scripted panel lifecycle flows.
//!
//! Every fake collaborator records into one shared [`Bench`], so tests can
//! assert the exact interleaving of supply, reset, DSI and delay activity.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};
use ili9806e::{
    Backlight, DisplayMode, DsiDevice, DsiTransport, Ili9806e, LinkConfig, ModeName, ModeSink,
    ModeType, PanelInfo, PanelRegistry, Parts, PowerSupply, Resource, ResourceProvider,
};

/// One observable hardware action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    SupplyOn,
    SupplyOff,
    /// Reset line driven low (asserted)
    ResetLow,
    /// Reset line driven high (released)
    ResetHigh,
    DelayMs(u32),
    DelayNs(u32),
    /// DSI write attempt, recorded even if it fails
    Write(Vec<u8>),
    BacklightOn,
    BacklightOff,
    Attach(LinkConfig),
    Detach,
    PanelAdded(&'static str),
    PanelRemoved(&'static str),
}

/// Failures to inject into the fakes
#[derive(Clone, Debug, Default)]
pub struct Faults {
    /// Fail the DSI write with this zero-based index
    pub fail_write_at: Option<usize>,
    /// Fail standalone DCS commands (single-byte writes) listed here
    pub fail_dcs: Vec<u8>,
    pub fail_supply_enable: bool,
    pub fail_supply_disable: bool,
    pub fail_backlight: bool,
    /// Reset line refuses every level change
    pub fail_reset: bool,
    pub fail_attach: bool,
    /// Resource the provider cannot find
    pub missing_resource: Option<Resource>,
}

/// Shared event trace and fault plan
#[derive(Clone, Debug, Default)]
pub struct Bench {
    events: Rc<RefCell<Vec<Event>>>,
    faults: Rc<RefCell<Faults>>,
}

impl Bench {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Forget recorded events, keeping the fault plan
    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    /// Payloads of all DSI write attempts, in order
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    /// Sum of all millisecond delays
    pub fn total_delay_ms(&self) -> u32 {
        self.events
            .borrow()
            .iter()
            .map(|event| match event {
                Event::DelayMs(ms) => *ms,
                _ => 0,
            })
            .sum()
    }

    /// Change the fault plan
    pub fn faults(&self) -> std::cell::RefMut<'_, Faults> {
        self.faults.borrow_mut()
    }

    /// Remove all injected faults
    pub fn heal(&self) {
        *self.faults.borrow_mut() = Faults::default();
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum DsiError {
    /// Write with this index was not acknowledged
    Nack(usize),
    AttachRefused,
}

/// DSI command channel that records every write
#[derive(Debug)]
pub struct RecordingDsi {
    bench: Bench,
    writes: usize,
}

impl RecordingDsi {
    pub fn new(bench: &Bench) -> Self {
        Self {
            bench: bench.clone(),
            writes: 0,
        }
    }
}

impl DsiTransport for RecordingDsi {
    type Error = DsiError;

    fn write_buffer(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let index = self.writes;
        self.writes += 1;
        self.bench.record(Event::Write(data.to_vec()));

        let faults = self.bench.faults.borrow();
        let fail_dcs = matches!(data, [command] if faults.fail_dcs.contains(command));
        if faults.fail_write_at == Some(index) || fail_dcs {
            return Err(DsiError::Nack(index));
        }
        Ok(())
    }
}

impl DsiDevice for RecordingDsi {
    fn attach(&mut self, link: &LinkConfig) -> Result<(), Self::Error> {
        self.bench.record(Event::Attach(*link));
        if self.bench.faults.borrow().fail_attach {
            return Err(DsiError::AttachRefused);
        }
        Ok(())
    }

    fn detach(&mut self) {
        self.bench.record(Event::Detach);
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SupplyError;

/// Regulator that records state changes
#[derive(Debug)]
pub struct FakeSupply {
    bench: Bench,
}

impl FakeSupply {
    pub fn new(bench: &Bench) -> Self {
        Self {
            bench: bench.clone(),
        }
    }
}

impl PowerSupply for FakeSupply {
    type Error = SupplyError;

    fn enable(&mut self) -> Result<(), Self::Error> {
        if self.bench.faults.borrow().fail_supply_enable {
            return Err(SupplyError);
        }
        self.bench.record(Event::SupplyOn);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.bench.record(Event::SupplyOff);
        if self.bench.faults.borrow().fail_supply_disable {
            return Err(SupplyError);
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct BacklightError;

/// Backlight that records state changes
#[derive(Debug)]
pub struct FakeBacklight {
    bench: Bench,
}

impl FakeBacklight {
    pub fn new(bench: &Bench) -> Self {
        Self {
            bench: bench.clone(),
        }
    }
}

impl Backlight for FakeBacklight {
    type Error = BacklightError;

    fn enable(&mut self) -> Result<(), Self::Error> {
        if self.bench.faults.borrow().fail_backlight {
            return Err(BacklightError);
        }
        self.bench.record(Event::BacklightOn);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        if self.bench.faults.borrow().fail_backlight {
            return Err(BacklightError);
        }
        self.bench.record(Event::BacklightOff);
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ResetError;

impl digital::Error for ResetError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Reset GPIO that records level changes
#[derive(Debug)]
pub struct FakeResetPin {
    bench: Bench,
}

impl FakeResetPin {
    pub fn new(bench: &Bench) -> Self {
        Self {
            bench: bench.clone(),
        }
    }

    fn drive(&self, event: Event) -> Result<(), ResetError> {
        if self.bench.faults.borrow().fail_reset {
            return Err(ResetError);
        }
        self.bench.record(event);
        Ok(())
    }
}

impl ErrorType for FakeResetPin {
    type Error = ResetError;
}

impl OutputPin for FakeResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(Event::ResetLow)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(Event::ResetHigh)
    }
}

/// Delay that returns immediately and records the requested time
#[derive(Debug)]
pub struct RecordingDelay {
    bench: Bench,
}

impl RecordingDelay {
    pub fn new(bench: &Bench) -> Self {
        Self {
            bench: bench.clone(),
        }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.bench.record(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.bench.record(Event::DelayMs(ms));
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct OutOfMemory;

/// A mode stored by [`RecordingModeSink`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbedMode {
    pub mode: DisplayMode,
    pub name: String,
    pub kind: ModeType,
}

/// Connector stand-in collecting published modes
#[derive(Debug, Default)]
pub struct RecordingModeSink {
    pub modes: Vec<ProbedMode>,
    pub physical_size: Option<(u16, u16)>,
    /// Refuse to store modes
    pub out_of_memory: bool,
}

impl ModeSink for RecordingModeSink {
    type Error = OutOfMemory;

    fn add_mode(
        &mut self,
        mode: &DisplayMode,
        name: ModeName,
        kind: ModeType,
    ) -> Result<(), Self::Error> {
        if self.out_of_memory {
            return Err(OutOfMemory);
        }
        self.modes.push(ProbedMode {
            mode: *mode,
            name: name.to_string(),
            kind,
        });
        Ok(())
    }

    fn set_physical_size(&mut self, width_mm: u16, height_mm: u16) {
        self.physical_size = Some((width_mm, height_mm));
    }
}

/// Display framework stand-in
#[derive(Debug)]
pub struct FakeRegistry {
    bench: Bench,
    registered: Vec<PanelInfo>,
}

impl FakeRegistry {
    pub fn new(bench: &Bench) -> Self {
        Self {
            bench: bench.clone(),
            registered: Vec::new(),
        }
    }

    /// Panels currently registered
    pub fn registered(&self) -> &[PanelInfo] {
        &self.registered
    }
}

impl PanelRegistry for FakeRegistry {
    fn add_panel(&mut self, info: &PanelInfo) {
        self.bench.record(Event::PanelAdded(info.compatible));
        self.registered.push(*info);
    }

    fn remove_panel(&mut self, info: &PanelInfo) {
        self.bench.record(Event::PanelRemoved(info.compatible));
        self.registered.retain(|registered| registered != info);
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct NotFound(pub Resource);

/// Board stand-in handing out fakes bound to the bench
#[derive(Debug)]
pub struct FakeProvider {
    bench: Bench,
    has_reset: bool,
}

impl FakeProvider {
    pub fn new(bench: &Bench, has_reset: bool) -> Self {
        Self {
            bench: bench.clone(),
            has_reset,
        }
    }

    fn check(&self, resource: Resource) -> Result<(), NotFound> {
        if self.bench.faults.borrow().missing_resource == Some(resource) {
            return Err(NotFound(resource));
        }
        Ok(())
    }
}

impl ResourceProvider for FakeProvider {
    type ResetPin = FakeResetPin;
    type Supply = FakeSupply;
    type Backlight = FakeBacklight;
    type Error = NotFound;

    fn reset_line(&mut self) -> Result<Option<Self::ResetPin>, Self::Error> {
        self.check(Resource::ResetLine)?;
        Ok(self.has_reset.then(|| FakeResetPin::new(&self.bench)))
    }

    fn power_supply(&mut self) -> Result<Self::Supply, Self::Error> {
        self.check(Resource::Supply)?;
        Ok(FakeSupply::new(&self.bench))
    }

    fn backlight(&mut self) -> Result<Self::Backlight, Self::Error> {
        self.check(Resource::Backlight)?;
        Ok(FakeBacklight::new(&self.bench))
    }
}

/// Panel wired to recording fakes
pub type TestPanel = Ili9806e<RecordingDsi, FakeResetPin, FakeSupply, FakeBacklight>;

/// Small helper that couples a panel, its delay and the bench for scenario tests.
pub struct PanelHarness {
    pub panel: TestPanel,
    pub delay: RecordingDelay,
    bench: Bench,
}

impl PanelHarness {
    /// Panel on a board with a reset line
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Panel on a board without a reset line
    pub fn without_reset() -> Self {
        Self::build(false)
    }

    fn build(has_reset: bool) -> Self {
        let bench = Bench::new();
        let panel = Ili9806e::from_parts(Parts {
            dsi: RecordingDsi::new(&bench),
            reset: has_reset.then(|| FakeResetPin::new(&bench)),
            supply: FakeSupply::new(&bench),
            backlight: FakeBacklight::new(&bench),
        });

        Self {
            panel,
            delay: RecordingDelay::new(&bench),
            bench,
        }
    }

    /// Access the bench for assertions and fault injection.
    pub fn bench(&self) -> &Bench {
        &self.bench
    }
}

impl Default for PanelHarness {
    fn default() -> Self {
        Self::new()
    }
}
