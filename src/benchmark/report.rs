use serde::Serialize;
use std::fmt::Write as _;

use super::harness::{ContainerKind, Measurement};
use super::probe::ProbeCase;
use crate::domain::Organization;

/// Measurements for a single probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    pub case: ProbeCase,
    pub probe: Organization,
    pub measurements: Vec<Measurement>,
}

impl ProbeReport {
    pub fn new(case: ProbeCase, probe: Organization) -> Self {
        Self {
            case,
            probe,
            measurements: Vec::new(),
        }
    }

    /// Outcome for one container, if it was measured.
    pub fn found_in(&self, kind: ContainerKind) -> Option<bool> {
        self.measurements
            .iter()
            .find(|m| m.kind == kind)
            .map(|m| m.found)
    }

    pub fn all_found(&self) -> bool {
        !self.measurements.is_empty() && self.measurements.iter().all(|m| m.found)
    }

    pub fn none_found(&self) -> bool {
        self.measurements.iter().all(|m| !m.found)
    }

    /// True when every container agrees with what the probe case expects.
    pub fn matches_expectation(&self) -> bool {
        if self.case.expected_found() {
            self.all_found()
        } else {
            self.none_found()
        }
    }
}

/// Everything one harness run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub collection_size: usize,
    pub probes: Vec<ProbeReport>,
}

impl BenchmarkReport {
    pub fn new(collection_size: usize) -> Self {
        Self {
            collection_size,
            probes: Vec::new(),
        }
    }

    pub fn probe(&self, case: ProbeCase) -> Option<&ProbeReport> {
        self.probes.iter().find(|p| p.case == case)
    }

    /// One header per probe and one line per container.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Collection lookup benchmark ({} elements) ===",
            self.collection_size
        );
        for probe in &self.probes {
            let _ = writeln!(out);
            let _ = writeln!(out, "Searching: {} ({})", probe.case, probe.probe);
            for m in &probe.measurements {
                let _ = writeln!(
                    out,
                    "{} - {}: {} ticks ({:.4} ms)",
                    m.kind.label(),
                    if m.found { "found" } else { "not found" },
                    m.ticks(),
                    m.millis()
                );
            }
        }
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample() -> BenchmarkReport {
        let mut first = ProbeReport::new(
            ProbeCase::First,
            Organization::new_unchecked("Publisher0", "Address0", 1900),
        );
        first.measurements.push(Measurement {
            kind: ContainerKind::OrganizationVec,
            found: true,
            elapsed: Duration::from_nanos(2_500),
        });

        let mut absent = ProbeReport::new(ProbeCase::Absent, crate::benchmark::absent_probe());
        absent.measurements.push(Measurement {
            kind: ContainerKind::StringMapKey,
            found: false,
            elapsed: Duration::from_nanos(100),
        });

        BenchmarkReport {
            collection_size: 1,
            probes: vec![first, absent],
        }
    }

    #[test]
    fn test_render_text() {
        let text = sample().render_text();
        assert!(text.contains("(1 elements)"));
        assert!(text.contains(
            "Searching: First element (Organization name: Publisher0, Address: Address0, Year: 1900)"
        ));
        assert!(text.contains("Vec<Organization> - found: 2500 ticks (0.0025 ms)"));
        assert!(text.contains("HashMap<String, Publisher> (by key) - not found: 100 ticks"));
    }

    #[test]
    fn test_render_json() {
        let json = sample().render_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["collection_size"], 1);
        assert_eq!(value["probes"][0]["case"], "first");
        assert_eq!(value["probes"][1]["probe"]["name"], "NotExist");
        assert_eq!(value["probes"][1]["measurements"][0]["found"], false);
    }

    #[test]
    fn test_expectations() {
        let report = sample();
        let first = report.probe(ProbeCase::First).unwrap();
        assert!(first.matches_expectation());
        assert_eq!(first.found_in(ContainerKind::OrganizationVec), Some(true));
        assert_eq!(first.found_in(ContainerKind::StringVec), None);
        assert!(report.probe(ProbeCase::Absent).unwrap().matches_expectation());
        assert!(report.probe(ProbeCase::Middle).is_none());
    }
}
