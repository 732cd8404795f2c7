//! Publishing domain model
//!
//! ```text
//! Organization (key)  ──embedded by value──▶  Publisher (aggregate)
//!                                              ├── books: Vec<Book> ──▶ author: Person
//!                                              └── employees: Vec<Person>
//! ```
//!
//! Every type is a plain value: `Clone` is a full deep copy and equality is
//! structural over all fields.

use chrono::NaiveDate;

pub mod book;
pub mod organization;
pub mod person;
pub mod publisher;

pub use book::{Book, Size};
pub use organization::{Organization, OrganizationOrder, current_year};
pub use person::Person;
pub use publisher::Publisher;

/// A domain value that carries a characteristic date.
///
/// Persons are dated by birth, books by publication and publishers by
/// license expiry.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Build a calendar date from known-good constant components.
///
/// Falls back to the Unix epoch date when the components are not a valid
/// date, so callers with literal dates never have to handle an error.
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
