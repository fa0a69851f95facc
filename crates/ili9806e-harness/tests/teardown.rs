use ili9806e::command::{ENTER_SLEEP_MODE, SET_DISPLAY_OFF};
use ili9806e::panel::{RESET_HOLD_MS, SLEEP_IN_SETTLE_MS};
use ili9806e::{Panel, PanelState};
use ili9806e_harness::{Event, PanelHarness};

fn prepared() -> PanelHarness {
    let mut harness = PanelHarness::new();
    harness.panel.prepare(&mut harness.delay).unwrap();
    harness.bench().clear_events();
    harness
}

#[test]
fn unprepare_sleeps_resets_and_cuts_supply() {
    let mut harness = prepared();

    harness.panel.unprepare(&mut harness.delay).unwrap();

    assert_eq!(
        harness.bench().events(),
        vec![
            Event::Write(vec![SET_DISPLAY_OFF]),
            Event::Write(vec![ENTER_SLEEP_MODE]),
            Event::DelayMs(SLEEP_IN_SETTLE_MS),
            Event::ResetLow,
            Event::DelayMs(RESET_HOLD_MS),
            Event::SupplyOff,
        ]
    );
    assert_eq!(harness.panel.state(), PanelState::Off);
}

#[test]
fn unprepare_without_reset_line_goes_straight_to_supply_off() {
    let mut harness = PanelHarness::without_reset();
    harness.panel.prepare(&mut harness.delay).unwrap();
    harness.bench().clear_events();

    harness.panel.unprepare(&mut harness.delay).unwrap();

    assert_eq!(
        harness.bench().events(),
        vec![
            Event::Write(vec![SET_DISPLAY_OFF]),
            Event::Write(vec![ENTER_SLEEP_MODE]),
            Event::DelayMs(SLEEP_IN_SETTLE_MS),
            Event::SupplyOff,
        ]
    );
}

#[test]
fn dsi_failures_during_teardown_are_not_fatal() {
    let mut harness = prepared();
    {
        let mut faults = harness.bench().faults();
        faults.fail_dcs.push(SET_DISPLAY_OFF);
        faults.fail_dcs.push(ENTER_SLEEP_MODE);
    }

    let result = harness.panel.unprepare(&mut harness.delay);

    assert!(result.is_ok());
    let events = harness.bench().events();
    assert!(events.contains(&Event::Write(vec![ENTER_SLEEP_MODE])));
    assert_eq!(events.last(), Some(&Event::SupplyOff));
    assert!(!harness.panel.is_prepared());
}

#[test]
fn supply_disable_failure_still_unprepares() {
    let mut harness = prepared();
    harness.bench().faults().fail_supply_disable = true;

    assert!(harness.panel.unprepare(&mut harness.delay).is_ok());
    assert!(!harness.panel.is_prepared());
}

#[test]
fn unprepare_of_enabled_panel_turns_backlight_off_first() {
    let mut harness = prepared();
    harness.panel.enable().unwrap();
    harness.bench().clear_events();

    harness.panel.unprepare(&mut harness.delay).unwrap();

    let events = harness.bench().events();
    assert_eq!(events[0], Event::BacklightOff);
    assert_eq!(events[1], Event::Write(vec![SET_DISPLAY_OFF]));
    assert_eq!(harness.panel.state(), PanelState::Off);
    assert!(!harness.panel.is_enabled());
}

#[test]
fn backlight_failure_during_unprepare_is_not_fatal() {
    let mut harness = prepared();
    harness.panel.enable().unwrap();
    harness.bench().clear_events();
    harness.bench().faults().fail_backlight = true;

    let result = harness.panel.unprepare(&mut harness.delay);

    assert!(result.is_ok());
    assert_eq!(harness.panel.state(), PanelState::Off);
    assert_eq!(
        harness.bench().events(),
        vec![
            Event::Write(vec![SET_DISPLAY_OFF]),
            Event::Write(vec![ENTER_SLEEP_MODE]),
            Event::DelayMs(SLEEP_IN_SETTLE_MS),
            Event::ResetLow,
            Event::DelayMs(RESET_HOLD_MS),
            Event::SupplyOff,
        ]
    );
}

#[test]
fn second_unprepare_is_a_no_op() {
    let mut harness = prepared();
    harness.panel.unprepare(&mut harness.delay).unwrap();
    harness.bench().clear_events();

    harness.panel.unprepare(&mut harness.delay).unwrap();

    assert!(harness.bench().events().is_empty());
}

#[test]
fn unprepare_before_prepare_touches_nothing() {
    let mut harness = PanelHarness::new();

    harness.panel.unprepare(&mut harness.delay).unwrap();

    assert!(harness.bench().events().is_empty());
}

#[test]
fn full_cycle_can_repeat() {
    let mut harness = PanelHarness::new();
    for _ in 0..2 {
        harness.panel.prepare(&mut harness.delay).unwrap();
        harness.panel.enable().unwrap();
        harness.panel.disable().unwrap();
        harness.panel.unprepare(&mut harness.delay).unwrap();
    }

    let events = harness.bench().events();
    let supply_on = events.iter().filter(|e| **e == Event::SupplyOn).count();
    let supply_off = events.iter().filter(|e| **e == Event::SupplyOff).count();
    assert_eq!((supply_on, supply_off), (2, 2));
}
