//! The publisher aggregate.
//!
//! A `Publisher` embeds its `Organization` key by value and exclusively owns
//! its books and employees. Queries over the books are lazy iterators that
//! borrow the backing lists and can be cloned to restart the scan.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fmt;

use super::organization::validate_registration_year;
use super::{Book, Dated, Organization, Person};
use crate::error::DomainResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publisher {
    organization: Organization,
    license_expiry: NaiveDate,
    books: Vec<Book>,
    employees: Vec<Person>,
}

impl Publisher {
    /// # Errors
    /// Returns `InvalidArgument` if `registration_year` exceeds the current year.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        license_expiry: NaiveDate,
        registration_year: i32,
    ) -> DomainResult<Self> {
        let organization = Organization::new(name, address, registration_year)?;
        Ok(Self::from_organization(organization, license_expiry))
    }

    pub fn from_organization(organization: Organization, license_expiry: NaiveDate) -> Self {
        Self {
            organization,
            license_expiry,
            books: Vec::new(),
            employees: Vec::new(),
        }
    }

    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    /// A detached copy of the key fields.
    pub fn organization_info(&self) -> Organization {
        self.organization.clone()
    }

    /// Replaces the key fields.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the new registration year is in the future;
    /// the publisher is left unchanged.
    pub fn set_organization_info(&mut self, organization: Organization) -> DomainResult<()> {
        validate_registration_year(organization.registration_year())?;
        self.organization = organization;
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.organization.name()
    }

    pub fn address(&self) -> &str {
        self.organization.address()
    }

    pub fn registration_year(&self) -> i32 {
        self.organization.registration_year()
    }

    pub fn set_registration_year(&mut self, year: i32) -> DomainResult<()> {
        self.organization.set_registration_year(year)
    }

    pub fn license_expiry(&self) -> NaiveDate {
        self.license_expiry
    }

    pub fn set_license_expiry(&mut self, date: NaiveDate) {
        self.license_expiry = date;
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn books_mut(&mut self) -> &mut Vec<Book> {
        &mut self.books
    }

    pub fn employees(&self) -> &[Person] {
        &self.employees
    }

    pub fn employees_mut(&mut self) -> &mut Vec<Person> {
        &mut self.employees
    }

    /// Appends books in iteration order. Duplicates are kept.
    pub fn add_books(&mut self, books: impl IntoIterator<Item = Book>) {
        self.books.extend(books);
    }

    /// Appends employees in iteration order. Duplicates are kept.
    pub fn add_employees(&mut self, employees: impl IntoIterator<Item = Person>) {
        self.employees.extend(employees);
    }

    /// A fully independent copy, down to every book's author.
    pub fn deep_copy(&self) -> Self {
        Self {
            organization: self.organization.clone(),
            license_expiry: self.license_expiry,
            books: self.books.iter().cloned().collect(),
            employees: self.employees.iter().cloned().collect(),
        }
    }

    /// Books published strictly after `year`.
    pub fn books_after_year(&self, year: i32) -> impl Iterator<Item = &Book> + Clone + '_ {
        self.books
            .iter()
            .filter(move |book| book.publication_year() > year)
    }

    /// Books whose author's full name is exactly `full_name`.
    pub fn books_by_author<'a>(
        &'a self,
        full_name: &'a str,
    ) -> impl Iterator<Item = &'a Book> + Clone + 'a {
        self.books
            .iter()
            .filter(move |book| book.author.full_name() == full_name)
    }

    /// Books written by one of this publisher's employees.
    pub fn books_by_employee_authors(&self) -> impl Iterator<Item = &Book> + Clone + '_ {
        let employees = &self.employees;
        self.books
            .iter()
            .filter(move |book| employees.contains(&book.author))
    }

    /// Books whose author is not an employee.
    pub fn books_by_outside_authors(&self) -> impl Iterator<Item = &Book> + Clone + '_ {
        let employees = &self.employees;
        self.books
            .iter()
            .filter(move |book| !employees.contains(&book.author))
    }

    /// Share of pocket-format books in percent; `0.0` when there are no books.
    pub fn pocket_percentage(&self) -> f64 {
        if self.books.is_empty() {
            return 0.0;
        }
        let pocket = self.books.iter().filter(|book| book.is_pocket()).count();
        pocket as f64 / self.books.len() as f64 * 100.0
    }

    pub fn short_string(&self) -> String {
        format!(
            "{}, License Expiry: {}, Total Books: {}, Employees: {}",
            self.organization,
            self.license_expiry,
            self.books.len(),
            self.employees.len()
        )
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Self::from_organization(
            Organization::new_unchecked("DefaultPublisher", "DefaultAddress", 2000),
            Local::now().date_naive(),
        )
    }
}

impl Dated for Publisher {
    fn date(&self) -> NaiveDate {
        self.license_expiry
    }
}

impl fmt::Display for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}, License Expiry: {},",
            self.organization, self.license_expiry
        )?;
        writeln!(f, "Books:")?;
        for book in &self.books {
            writeln!(f, "  {book}")?;
        }
        writeln!(f, "Employees:")?;
        for employee in &self.employees {
            writeln!(f, "  {employee}")?;
        }
        Ok(())
    }
}
