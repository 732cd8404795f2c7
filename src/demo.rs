//! The driver behind the `publisher-lab` binary.
//!
//! Output goes to the supplied writer so tests can capture it. Logs go
//! through `tracing` and never touch the writer.

use anyhow::{Context, Result};
use std::io::Write;

use crate::benchmark::{CompositeSink, LogSink, LookupHarness, MetricsSink, ReportSink};
use crate::collection::PublisherCollection;
use crate::config::{LabConfig, OutputFormat};
use crate::domain::{Book, Organization, OrganizationOrder, Person, Publisher, Size, current_year, ymd};
use crate::error::ResultExt;
use crate::logging::{operation_span, publisher_span};
use crate::metrics::{METRICS, PhaseTimer};

/// Run every enabled section in order.
pub fn run<W: Write>(config: &LabConfig, out: &mut W) -> Result<()> {
    if !config.skip_demo {
        run_collection_demo(out).with_operation("collection_demo")?;
        run_domain_demo(out).with_operation("domain_demo")?;
    }

    run_benchmark(config, out).context("benchmark run failed")?;

    if config.dump_metrics {
        writeln!(out)?;
        write!(out, "{}", METRICS.encode())?;
    }

    out.flush()?;
    Ok(())
}

/// Populate a collection and print it under each ordering.
pub fn run_collection_demo<W: Write>(out: &mut W) -> std::io::Result<()> {
    let span = operation_span("collection_demo");
    let _entered = span.enter();
    let _timer = PhaseTimer::new("collection_demo");

    let today = chrono::Local::now().date_naive();
    let mut collection = PublisherCollection::new();
    collection.add_defaults();
    collection.add_publishers([
        Publisher::from_organization(Organization::new_unchecked("Gamma", "Odesa", 2005), today),
        Publisher::from_organization(Organization::new_unchecked("Delta", "Kharkiv", 2008), today),
    ]);
    tracing::info!(publishers = collection.len(), "collection populated");

    writeln!(out, "=== Creating PublisherCollection and adding elements ===")?;
    writeln!(out)?;
    writeln!(out, "Original PublisherCollection:")?;
    writeln!(out)?;
    writeln!(out, "{collection}")?;

    for (order, heading) in [
        (OrganizationOrder::Name, "Sorted by Name"),
        (OrganizationOrder::Year, "Sorted by Registration Year"),
        (OrganizationOrder::Address, "Sorted by Address"),
    ] {
        collection.sort(order);
        writeln!(out)?;
        writeln!(out, "=== {heading} ===")?;
        writeln!(out, "{}", collection.short_string())?;
    }

    Ok(())
}

/// Equality, hashing, validation, deep copy and the book filters.
pub fn run_domain_demo<W: Write>(out: &mut W) -> std::io::Result<()> {
    let span = operation_span("domain_demo");
    let _entered = span.enter();
    let _timer = PhaseTimer::new("domain_demo");

    writeln!(out)?;
    writeln!(out, "=== Domain demonstration ===")?;

    let mut first = Organization::new_unchecked("Name", "Addr", 2001);
    let second = first.clone();
    writeln!(out, "Equals: {}", first == second)?;
    writeln!(out, "Hash Codes: {}, {}", first.hash_code(), second.hash_code())?;

    let future = current_year() + 1;
    match first.set_registration_year(future) {
        Ok(()) => writeln!(out, "Registration year {future} accepted")?,
        Err(err) => {
            tracing::warn!(
                code = err.code(),
                field = err.field(),
                year = future,
                "rejected registration year"
            );
            writeln!(out, "Error: {err}")?;
        }
    }

    let mut publisher = Publisher::from_organization(
        Organization::new_unchecked("Litera", "Kyiv", 2020),
        ymd(2030, 12, 31),
    );
    let pub_span = publisher_span(publisher.name());
    let _pub_entered = pub_span.enter();

    let ivan = Person::new("Ivan", "Ivanenko", ymd(1980, 1, 1));
    let oksana = Person::new("Oksana", "Petryk", ymd(1990, 2, 2));
    publisher.add_books([
        Book::new(ivan, "Intro to Rust", ymd(2020, 1, 1), Size::Standard),
        Book::new(oksana.clone(), "Advanced Rust", ymd(2021, 2, 2), Size::Big),
    ]);
    publisher.add_employees([oksana]);
    writeln!(out, "{publisher}")?;

    writeln!(out)?;
    writeln!(out, "OrganizationInfo:")?;
    writeln!(out, "{}", publisher.organization_info())?;

    let copy = publisher.deep_copy();
    let mut info = publisher.organization_info();
    info.set_name("ChangedName");
    if let Err(err) = publisher.set_organization_info(info) {
        tracing::warn!(error = %err, "organization info rejected");
    }
    if let Some(book) = publisher.books_mut().first_mut() {
        book.title = "ChangedTitle".to_string();
    }

    writeln!(out)?;
    writeln!(out, "Original:")?;
    writeln!(out, "{publisher}")?;
    writeln!(out)?;
    writeln!(out, "Copy:")?;
    writeln!(out, "{copy}")?;

    write_books(out, "Books published after 2020:", publisher.books_after_year(2020))?;
    write_books(
        out,
        "Books by author Oksana Petryk:",
        publisher.books_by_author("Oksana Petryk"),
    )?;
    write_books(
        out,
        "Books by authors who are employees:",
        publisher.books_by_employee_authors(),
    )?;
    write_books(
        out,
        "Books by authors NOT employees:",
        publisher.books_by_outside_authors(),
    )?;

    writeln!(out)?;
    writeln!(out, "Pocket books: {:.1}%", publisher.pocket_percentage())?;

    Ok(())
}

fn write_books<'a, W: Write>(
    out: &mut W,
    heading: &str,
    books: impl Iterator<Item = &'a Book>,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{heading}")?;
    for book in books {
        writeln!(out, "{book}")?;
    }
    Ok(())
}

/// Build the harness, time every probe and print the report.
pub fn run_benchmark<W: Write>(config: &LabConfig, out: &mut W) -> Result<()> {
    let span = operation_span("benchmark");
    let _entered = span.enter();

    let build_timer = PhaseTimer::new("harness_build");
    let harness = LookupHarness::new(config.count);
    let build_time = build_timer.finish();
    tracing::info!(
        count = harness.len(),
        build_ms = build_time.as_millis() as u64,
        "harness ready"
    );

    let lookup_timer = PhaseTimer::new("lookups");
    let mut report_sink = ReportSink::new(harness.len());
    {
        let mut sink = CompositeSink::new()
            .with_sink(&mut report_sink)
            .with_sink(MetricsSink)
            .with_sink(LogSink);
        harness.run(&mut sink);
    }
    lookup_timer.finish();

    let report = report_sink.into_report();
    for probe in &report.probes {
        if !probe.matches_expectation() {
            tracing::warn!(case = %probe.case, probe = %probe.probe, "unexpected lookup outcome");
        }
    }

    match config.format {
        OutputFormat::Text => {
            writeln!(out)?;
            write!(out, "{}", report.render_text())?;
        }
        OutputFormat::Json => {
            let json = report
                .render_json()
                .context("failed to serialize benchmark report")?;
            writeln!(out, "{json}")?;
        }
    }

    Ok(())
}
