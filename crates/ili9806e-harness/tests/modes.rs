use ili9806e::{ModeError, ModeType, Panel, DEFAULT_MODE};
use ili9806e_harness::{OutOfMemory, PanelHarness, RecordingModeSink};

fn assert_single_default_mode(sink: &RecordingModeSink) {
    assert_eq!(sink.modes.len(), 1);
    let probed = &sink.modes[0];
    assert_eq!(probed.mode, DEFAULT_MODE);
    assert_eq!(probed.mode.clock, 48_000);
    assert_eq!((probed.mode.hdisplay, probed.mode.vdisplay), (480, 854));
    assert_eq!(probed.name, "480x854");
    assert_eq!(probed.kind, ModeType::DRIVER | ModeType::PREFERRED);
    assert_eq!(sink.physical_size, Some((87, 87)));
}

#[test]
fn reports_exactly_one_mode() {
    let harness = PanelHarness::new();
    let mut sink = RecordingModeSink::default();

    assert_eq!(harness.panel.get_modes(&mut sink).unwrap(), 1);
    assert_single_default_mode(&sink);
}

#[test]
fn mode_does_not_depend_on_panel_state() {
    let mut harness = PanelHarness::new();

    let mut off = RecordingModeSink::default();
    harness.panel.get_modes(&mut off).unwrap();

    harness.panel.prepare(&mut harness.delay).unwrap();
    harness.panel.enable().unwrap();
    let mut enabled = RecordingModeSink::default();
    harness.panel.get_modes(&mut enabled).unwrap();

    assert_single_default_mode(&off);
    assert_single_default_mode(&enabled);
    assert_eq!(harness.panel.mode(), DEFAULT_MODE);
}

#[test]
fn mode_query_sends_nothing() {
    let harness = PanelHarness::new();
    let mut sink = RecordingModeSink::default();

    harness.panel.get_modes(&mut sink).unwrap();

    assert!(harness.bench().events().is_empty());
}

#[test]
fn sink_out_of_memory_adds_nothing() {
    let harness = PanelHarness::new();
    let mut sink = RecordingModeSink {
        out_of_memory: true,
        ..Default::default()
    };

    let result = harness.panel.get_modes(&mut sink);

    assert!(matches!(result, Err(ModeError::Allocation(OutOfMemory))));
    assert!(sink.modes.is_empty());
    assert_eq!(sink.physical_size, None);
}
