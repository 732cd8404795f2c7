//! An ordered, sortable collection of publishers.

use chrono::{Local, NaiveDate};
use std::cmp::Ordering;
use std::fmt;

use crate::domain::{Book, Organization, OrganizationOrder, Person, Publisher, Size, ymd};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublisherCollection {
    publishers: Vec<Publisher>,
}

impl PublisherCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.publishers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publishers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Publisher> {
        self.publishers.iter()
    }

    pub fn as_slice(&self) -> &[Publisher] {
        &self.publishers
    }

    /// Adds the two stock publishers, Alpha (Kyiv) and Beta (Lviv).
    pub fn add_defaults(&mut self) {
        let today = Local::now().date_naive();
        let author = Person::new("Ivan", "Ivanenko", ymd(1980, 1, 1));
        let employee = Person::new("Taras", "Shevchenko", ymd(1990, 2, 2));

        let mut alpha = stock_publisher("Alpha", "Kyiv", today, 2010);
        alpha.add_books([Book::new(
            author.clone(),
            "Intro to Rust",
            ymd(2020, 1, 1),
            Size::Standard,
        )]);
        alpha.add_employees([author]);

        let mut beta = stock_publisher("Beta", "Lviv", today, 2012);
        beta.add_books([Book::new(
            employee.clone(),
            "Advanced Rust",
            ymd(2021, 2, 2),
            Size::Big,
        )]);
        beta.add_employees([employee]);

        self.publishers.push(alpha);
        self.publishers.push(beta);
    }

    /// Appends publishers, giving each a pocket edition and a staff member first.
    pub fn add_publishers(&mut self, publishers: impl IntoIterator<Item = Publisher>) {
        let today = Local::now().date_naive();
        for mut publisher in publishers {
            let book = Book::new(
                Person::new("Oksana", "Petryk", ymd(1995, 3, 3)),
                format!("Book of {}", publisher.name()),
                today,
                Size::Pocket,
            );
            publisher.add_books([book]);
            publisher.add_employees([Person::new("Andrii", "Zaychenko", ymd(1993, 4, 4))]);
            self.publishers.push(publisher);
        }
    }

    /// Stable in-place sort by a caller-supplied order over organization keys.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Organization, &Organization) -> Ordering,
    {
        self.publishers
            .sort_by(|a, b| compare(a.organization(), b.organization()));
    }

    /// Stable in-place sort by one of the named orders.
    pub fn sort(&mut self, order: OrganizationOrder) {
        tracing::debug!(order = %order, len = self.publishers.len(), "sorting publishers");
        crate::metrics::METRICS.record_sort(order);
        self.sort_by(order.comparator());
    }

    pub fn is_sorted_by(&self, order: OrganizationOrder) -> bool {
        self.publishers
            .windows(2)
            .all(|pair| order.compare(pair[0].organization(), pair[1].organization()) != Ordering::Greater)
    }

    pub fn short_string(&self) -> String {
        self.publishers
            .iter()
            .map(Publisher::short_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromIterator<Publisher> for PublisherCollection {
    fn from_iter<I: IntoIterator<Item = Publisher>>(iter: I) -> Self {
        Self {
            publishers: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PublisherCollection {
    type Item = &'a Publisher;
    type IntoIter = std::slice::Iter<'a, Publisher>;

    fn into_iter(self) -> Self::IntoIter {
        self.publishers.iter()
    }
}

impl fmt::Display for PublisherCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for publisher in &self.publishers {
            writeln!(f, "{publisher}")?;
        }
        Ok(())
    }
}

// stock years are all in the past
fn stock_publisher(name: &str, address: &str, expiry: NaiveDate, year: i32) -> Publisher {
    Publisher::from_organization(Organization::new_unchecked(name, address, year), expiry)
}
