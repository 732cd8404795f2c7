use ahash::RandomState;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::hint::black_box;
use std::time::{Duration, Instant};
use strum::EnumIter;

use super::probe::{ProbeCase, absent_probe};
use super::sink::ResultSink;
use crate::domain::{Organization, Publisher, current_year, ymd};
use crate::log_slow_operation;
use crate::logging::operation_span;

/// Earliest registration year handed out by the generator.
const BASE_YEAR: i32 = 1900;

/// Warn when building the containers takes longer than this.
const SLOW_BUILD_THRESHOLD_MS: u64 = 500;

/// The container a lookup was timed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    OrganizationVec,
    StringVec,
    OrganizationMapKey,
    StringMapKey,
    OrganizationMapValue,
}

impl ContainerKind {
    pub fn label(self) -> &'static str {
        match self {
            ContainerKind::OrganizationVec => "Vec<Organization>",
            ContainerKind::StringVec => "Vec<String>",
            ContainerKind::OrganizationMapKey => "HashMap<Organization, Publisher> (by key)",
            ContainerKind::StringMapKey => "HashMap<String, Publisher> (by key)",
            ContainerKind::OrganizationMapValue => "HashMap<Organization, Publisher> (by value)",
        }
    }

    /// Label value used in metrics.
    pub fn metric_name(self) -> &'static str {
        match self {
            ContainerKind::OrganizationVec => "organization_vec",
            ContainerKind::StringVec => "string_vec",
            ContainerKind::OrganizationMapKey => "organization_map_key",
            ContainerKind::StringMapKey => "string_map_key",
            ContainerKind::OrganizationMapValue => "organization_map_value",
        }
    }

    /// True when the lookup goes through a hash index.
    pub fn is_indexed(self) -> bool {
        matches!(
            self,
            ContainerKind::OrganizationMapKey | ContainerKind::StringMapKey
        )
    }
}

/// One timed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Measurement {
    pub kind: ContainerKind,
    pub found: bool,
    #[serde(rename = "elapsed_ns", serialize_with = "serialize_nanos")]
    pub elapsed: Duration,
}

impl Measurement {
    /// Elapsed time in nanosecond ticks.
    pub fn ticks(&self) -> u128 {
        self.elapsed.as_nanos()
    }

    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }
}

fn serialize_nanos<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
}

/// Four parallel containers over the same generated organizations.
///
/// Built once and never mutated. Every container holds its own copy of
/// each organization.
#[derive(Debug, Clone)]
pub struct LookupHarness {
    organizations: Vec<Organization>,
    strings: Vec<String>,
    by_organization: HashMap<Organization, Publisher, RandomState>,
    by_string: HashMap<String, Publisher, RandomState>,
    license_expiry: NaiveDate,
}

impl LookupHarness {
    pub fn new(count: usize) -> Self {
        let span = operation_span("build_harness");
        let _entered = span.enter();
        let start = Instant::now();

        let current = current_year();
        let license_expiry = harness_license_expiry();

        let mut organizations = Vec::with_capacity(count);
        let mut strings = Vec::with_capacity(count);
        let mut by_organization = HashMap::with_capacity_and_hasher(count, RandomState::new());
        let mut by_string = HashMap::with_capacity_and_hasher(count, RandomState::new());

        for index in 0..count {
            let publisher = generate(index, current, license_expiry);
            let organization = publisher.organization_info();
            let key = organization.canonical_string();

            organizations.push(organization.clone());
            strings.push(key.clone());
            by_organization.insert(organization, publisher.clone());
            by_string.insert(key, publisher);
        }

        log_slow_operation!(
            start.elapsed(),
            SLOW_BUILD_THRESHOLD_MS,
            count,
            "lookup harness built"
        );
        crate::metrics::METRICS.set_collection_size(count);

        Self {
            organizations,
            strings,
            by_organization,
            by_string,
            license_expiry,
        }
    }

    /// The publisher the generator produces for `index`.
    pub fn generate_publisher(index: usize) -> Publisher {
        generate(index, current_year(), harness_license_expiry())
    }

    pub fn len(&self) -> usize {
        self.organizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
    }

    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    pub fn organization_map(&self) -> &HashMap<Organization, Publisher, RandomState> {
        &self.by_organization
    }

    pub fn string_map(&self) -> &HashMap<String, Publisher, RandomState> {
        &self.by_string
    }

    pub fn license_expiry(&self) -> NaiveDate {
        self.license_expiry
    }

    /// Entry counts of the four containers, in table order.
    pub fn container_sizes(&self) -> [usize; 4] {
        [
            self.organizations.len(),
            self.strings.len(),
            self.by_organization.len(),
            self.by_string.len(),
        ]
    }

    /// Time one membership test per container for `probe`.
    pub fn measure_lookup(&self, probe: &Organization) -> Vec<Measurement> {
        let probe_string = probe.canonical_string();
        let probe_value = Publisher::from_organization(probe.clone(), self.license_expiry);

        vec![
            timed(ContainerKind::OrganizationVec, || {
                self.organizations.contains(probe)
            }),
            timed(ContainerKind::StringVec, || {
                self.strings.contains(&probe_string)
            }),
            timed(ContainerKind::OrganizationMapKey, || {
                self.by_organization.contains_key(probe)
            }),
            timed(ContainerKind::StringMapKey, || {
                self.by_string.contains_key(probe_string.as_str())
            }),
            timed(ContainerKind::OrganizationMapValue, || {
                self.by_organization.values().any(|value| *value == probe_value)
            }),
        ]
    }

    /// First, middle, last and absent probes. Only the absent probe when empty.
    pub fn probes(&self) -> Vec<(ProbeCase, Organization)> {
        let mut probes: Vec<(ProbeCase, Organization)> =
            [ProbeCase::First, ProbeCase::Middle, ProbeCase::Last]
                .into_iter()
                .filter_map(|case| {
                    case.index(self.organizations.len())
                        .map(|index| (case, self.organizations[index].clone()))
                })
                .collect();
        probes.push((ProbeCase::Absent, absent_probe()));
        probes
    }

    /// Measure every probe and hand the results to `sink`.
    pub fn run(&self, sink: &mut dyn ResultSink) {
        for (case, probe) in self.probes() {
            tracing::debug!(case = %case, probe = %probe, "measuring probe");
            sink.begin_probe(case, &probe);
            for measurement in self.measure_lookup(&probe) {
                sink.record(case, &measurement);
            }
        }
    }
}

fn timed(kind: ContainerKind, lookup: impl FnOnce() -> bool) -> Measurement {
    let start = Instant::now();
    let found = black_box(lookup());
    let elapsed = start.elapsed();
    Measurement {
        kind,
        found,
        elapsed,
    }
}

fn harness_license_expiry() -> NaiveDate {
    ymd(2030, 12, 31)
}

/// Registration years cycle through `BASE_YEAR..=current` so none is in the future.
fn generated_year(index: usize, current: i32) -> i32 {
    let span = (current - BASE_YEAR + 1).max(1) as usize;
    BASE_YEAR + (index % span) as i32
}

fn generate(index: usize, current: i32, license_expiry: NaiveDate) -> Publisher {
    let organization = Organization::new_unchecked(
        format!("Publisher{index}"),
        format!("Address{index}"),
        generated_year(index, current),
    );
    Publisher::from_organization(organization, license_expiry)
}
