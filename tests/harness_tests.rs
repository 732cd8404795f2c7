use proptest::prelude::*;
use publisher_lab::benchmark::{ReportSink, ResultSink, absent_probe};
use publisher_lab::{ContainerKind, LookupHarness, Measurement, Organization, ProbeCase};
use strum::IntoEnumIterator;

#[test]
fn thousand_element_scenario() {
    let harness = LookupHarness::new(1000);
    assert_eq!(harness.container_sizes(), [1000; 4]);

    for index in [0, 500, 999] {
        let probe = harness.organizations()[index].clone();
        let measurements = harness.measure_lookup(&probe);
        assert_eq!(measurements.len(), 5);
        for m in &measurements {
            assert!(m.found, "index {index} missing from {}", m.kind.label());
        }
    }

    let absent = Organization::new_unchecked("NotExist", "Nowhere", 1999);
    assert_eq!(absent, absent_probe());
    for m in harness.measure_lookup(&absent) {
        assert!(!m.found, "absent probe found in {}", m.kind.label());
    }
}

#[test]
fn every_generated_entity_is_found() {
    let harness = LookupHarness::new(200);
    for organization in harness.organizations() {
        assert!(
            harness
                .measure_lookup(organization)
                .iter()
                .all(|m| m.found)
        );
    }
}

#[test]
fn containers_hold_the_same_entities() {
    let harness = LookupHarness::new(64);
    for (organization, key) in harness.organizations().iter().zip(harness.strings()) {
        assert_eq!(&organization.canonical_string(), key);
        let by_key = &harness.organization_map()[organization];
        let by_string = &harness.string_map()[key];
        assert_eq!(by_key, by_string);
        assert_eq!(by_key.organization(), organization);
    }
}

#[test]
fn probe_positions() {
    let harness = LookupHarness::new(1000);
    let probes = harness.probes();
    let cases: Vec<ProbeCase> = probes.iter().map(|(case, _)| *case).collect();
    assert_eq!(cases, ProbeCase::iter().collect::<Vec<_>>());
    assert_eq!(probes[0].1.name(), "Publisher0");
    assert_eq!(probes[1].1.name(), "Publisher500");
    assert_eq!(probes[2].1.name(), "Publisher999");
    assert_eq!(probes[3].1.name(), "NotExist");
}

#[test]
fn single_element_probes_share_the_entity() {
    let harness = LookupHarness::new(1);
    let probes = harness.probes();
    assert_eq!(probes.len(), 4);
    assert_eq!(probes[0].1, probes[1].1);
    assert_eq!(probes[1].1, probes[2].1);
}

#[test]
fn run_feeds_report_sink() {
    let harness = LookupHarness::new(100);
    let mut sink = ReportSink::new(harness.len());
    harness.run(&mut sink);
    let report = sink.into_report();

    assert_eq!(report.collection_size, 100);
    assert_eq!(report.probes.len(), 4);
    for probe in &report.probes {
        assert_eq!(probe.measurements.len(), 5);
        assert!(probe.matches_expectation(), "{}", probe.case);
    }
    assert_eq!(
        report
            .probe(ProbeCase::Middle)
            .and_then(|p| p.found_in(ContainerKind::OrganizationMapValue)),
        Some(true)
    );
    assert_eq!(
        report
            .probe(ProbeCase::Absent)
            .and_then(|p| p.found_in(ContainerKind::StringMapKey)),
        Some(false)
    );
}

#[test]
fn custom_sink_sees_every_measurement() {
    #[derive(Default)]
    struct Tally {
        found: usize,
        missed: usize,
    }

    impl ResultSink for Tally {
        fn record(&mut self, _case: ProbeCase, measurement: &Measurement) {
            if measurement.found {
                self.found += 1;
            } else {
                self.missed += 1;
            }
        }
    }

    let harness = LookupHarness::new(10);
    let mut tally = Tally::default();
    harness.run(&mut tally);
    assert_eq!(tally.found, 15);
    assert_eq!(tally.missed, 5);
}

#[test]
fn text_report_lists_every_container() {
    let harness = LookupHarness::new(10);
    let mut sink = ReportSink::new(harness.len());
    harness.run(&mut sink);
    let text = sink.report().render_text();

    assert!(text.contains("Searching: Non-existing element"));
    for kind in ContainerKind::iter() {
        assert_eq!(text.matches(&format!("{} - ", kind.label())).count(), 4);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_size_finds_members_and_misses_absent(n in 1usize..300, pick in any::<prop::sample::Index>()) {
        let harness = LookupHarness::new(n);
        prop_assert_eq!(harness.container_sizes(), [n; 4]);

        let member = harness.organizations()[pick.index(n)].clone();
        let hits = harness.measure_lookup(&member);
        prop_assert_eq!(hits.len(), 5);
        prop_assert!(hits.iter().all(|m| m.found));

        let misses = harness.measure_lookup(&absent_probe());
        prop_assert!(misses.iter().all(|m| !m.found));

        let generated = LookupHarness::generate_publisher(pick.index(n));
        prop_assert_eq!(generated.organization(), &member);
    }
}
