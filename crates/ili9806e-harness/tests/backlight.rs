use ili9806e::{Error, Panel, PanelState};
use ili9806e_harness::{BacklightError, Event, PanelHarness};

fn prepared() -> PanelHarness {
    let mut harness = PanelHarness::new();
    harness.panel.prepare(&mut harness.delay).unwrap();
    harness.bench().clear_events();
    harness
}

#[test]
fn enable_before_prepare_is_rejected() {
    let mut harness = PanelHarness::new();

    let result = harness.panel.enable();

    assert!(matches!(result, Err(Error::NotPrepared)));
    assert!(harness.bench().events().is_empty());
    assert_eq!(harness.panel.state(), PanelState::Off);
}

#[test]
fn enable_only_lights_the_backlight() {
    let mut harness = prepared();

    harness.panel.enable().unwrap();

    assert_eq!(harness.bench().events(), vec![Event::BacklightOn]);
    assert_eq!(harness.panel.state(), PanelState::Enabled);
    assert!(harness.panel.is_prepared());
}

#[test]
fn disable_only_switches_the_backlight_off() {
    let mut harness = prepared();
    harness.panel.enable().unwrap();
    harness.bench().clear_events();

    harness.panel.disable().unwrap();

    assert_eq!(harness.bench().events(), vec![Event::BacklightOff]);
    assert_eq!(harness.panel.state(), PanelState::Prepared);
    assert!(harness.bench().writes().is_empty());
}

#[test]
fn enable_and_disable_are_idempotent() {
    let mut harness = prepared();

    harness.panel.enable().unwrap();
    harness.panel.enable().unwrap();
    harness.panel.disable().unwrap();
    harness.panel.disable().unwrap();

    assert_eq!(
        harness.bench().events(),
        vec![Event::BacklightOn, Event::BacklightOff]
    );
}

#[test]
fn disable_when_never_enabled_is_a_no_op() {
    let mut harness = PanelHarness::new();

    harness.panel.disable().unwrap();

    assert!(harness.bench().events().is_empty());
}

#[test]
fn backlight_failure_keeps_previous_state() {
    let mut harness = prepared();
    harness.bench().faults().fail_backlight = true;

    let result = harness.panel.enable();

    assert!(matches!(result, Err(Error::Backlight(BacklightError))));
    assert_eq!(harness.panel.state(), PanelState::Prepared);
}

#[test]
fn blanking_does_not_rerun_init() {
    let mut harness = prepared();

    harness.panel.enable().unwrap();
    harness.panel.disable().unwrap();
    harness.panel.enable().unwrap();

    assert!(harness.bench().writes().is_empty());
    assert_eq!(harness.bench().total_delay_ms(), 0);
}
