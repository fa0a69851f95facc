use ili9806e::{Builder, Ili9806e, LinkConfig, Panel, ProbeError, Resource, PANEL_INFO};
use ili9806e_harness::{
    Bench, DsiError, Event, FakeProvider, FakeRegistry, NotFound, RecordingDelay, RecordingDsi,
    TestPanel,
};

type ProbeResult = Result<TestPanel, ProbeError<NotFound, DsiError>>;

fn probe(bench: &Bench, has_reset: bool) -> (ProbeResult, FakeRegistry) {
    let mut provider = FakeProvider::new(bench, has_reset);
    let mut registry = FakeRegistry::new(bench);
    let link = Builder::new().build().unwrap();
    let result = Ili9806e::probe(RecordingDsi::new(bench), &mut provider, &mut registry, &link);
    (result, registry)
}

#[test]
fn probe_registers_then_attaches_with_panel_link() {
    let bench = Bench::new();
    let (result, registry) = probe(&bench, true);

    let panel = result.unwrap();
    assert!(panel.has_reset());
    assert!(!panel.is_prepared());
    assert_eq!(registry.registered(), &[PANEL_INFO]);

    let events = bench.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], Event::PanelAdded("youritech,ili9806"));
    match &events[1] {
        Event::Attach(link) => {
            assert_eq!(link.lanes, 2);
            assert_eq!(*link, LinkConfig::default());
        }
        other => panic!("expected attach, got {other:?}"),
    }
}

#[test]
fn probe_accepts_boards_without_reset_line() {
    let bench = Bench::new();
    let (result, _) = probe(&bench, false);

    let mut panel = result.unwrap();
    assert!(!panel.has_reset());

    let mut delay = RecordingDelay::new(&bench);
    panel.prepare(&mut delay).unwrap();
    assert!(!bench.events().contains(&Event::ResetLow));
}

#[test]
fn missing_supply_aborts_before_registration() {
    let bench = Bench::new();
    bench.faults().missing_resource = Some(Resource::Supply);

    let (result, registry) = probe(&bench, true);

    assert!(matches!(
        result,
        Err(ProbeError::Resource {
            resource: Resource::Supply,
            source: NotFound(Resource::Supply),
        })
    ));
    assert!(registry.registered().is_empty());
    assert!(bench.events().is_empty());
}

#[test]
fn reset_line_lookup_error_is_fatal() {
    let bench = Bench::new();
    bench.faults().missing_resource = Some(Resource::ResetLine);

    let (result, _) = probe(&bench, true);

    assert!(matches!(
        result,
        Err(ProbeError::Resource {
            resource: Resource::ResetLine,
            ..
        })
    ));
}

#[test]
fn missing_backlight_is_fatal() {
    let bench = Bench::new();
    bench.faults().missing_resource = Some(Resource::Backlight);

    let (result, _) = probe(&bench, true);

    assert!(matches!(
        result,
        Err(ProbeError::Resource {
            resource: Resource::Backlight,
            ..
        })
    ));
}

#[test]
fn attach_failure_unregisters_panel() {
    let bench = Bench::new();
    bench.faults().fail_attach = true;

    let (result, registry) = probe(&bench, true);

    assert!(matches!(result, Err(ProbeError::Attach(DsiError::AttachRefused))));
    assert!(registry.registered().is_empty());
    assert_eq!(
        bench.events().last(),
        Some(&Event::PanelRemoved("youritech,ili9806"))
    );
}

#[test]
fn remove_detaches_and_returns_resources() {
    let bench = Bench::new();
    let (result, mut registry) = probe(&bench, true);
    let panel = result.unwrap();
    bench.clear_events();

    let parts = panel.remove(&mut registry);

    assert!(parts.reset.is_some());
    assert!(registry.registered().is_empty());
    assert_eq!(
        bench.events(),
        vec![Event::Detach, Event::PanelRemoved("youritech,ili9806")]
    );
}
