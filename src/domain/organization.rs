//! The organization entity key.
//!
//! An `Organization` is the `(name, address, registration_year)` triple that
//! identifies a publisher. It is the key type of the benchmark's hash maps,
//! so equality, `Hash` and the canonical string must all agree.

use chrono::{Datelike, Local};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use strum::{Display, EnumIter, EnumString};

use crate::error::{DomainError, DomainResult};

/// Fixed seeds so `hash_code` is reproducible between runs.
const HASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// The current calendar year in local time.
pub fn current_year() -> i32 {
    Local::now().year()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Organization {
    name: String,
    address: String,
    registration_year: i32,
}

impl Organization {
    /// Creates a new organization, rejecting a registration year in the future.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `registration_year` exceeds the current year.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        registration_year: i32,
    ) -> DomainResult<Self> {
        validate_year(registration_year, current_year())?;
        Ok(Self::new_unchecked(name, address, registration_year))
    }

    /// Creates an organization without validating the year.
    ///
    /// Caller must ensure `registration_year` is not in the future.
    pub fn new_unchecked(
        name: impl Into<String>,
        address: impl Into<String>,
        registration_year: i32,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            registration_year,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn registration_year(&self) -> i32 {
        self.registration_year
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    /// Updates the registration year. The value is left untouched on error.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `year` exceeds the current year.
    pub fn set_registration_year(&mut self, year: i32) -> DomainResult<()> {
        validate_year(year, current_year())?;
        self.registration_year = year;
        Ok(())
    }

    /// Deterministic text form used as the alternate lookup key.
    ///
    /// Separators are not escaped, so the mapping is only injective when no
    /// name or address contains `", Address: "` or `", Year: "`. Two unequal
    /// keys such as `("A, Address: B", "C", 2000)` and `("A", "B, Address: C", 2000)`
    /// share one string, and string-keyed containers then report both as
    /// present. Generated harness keys never contain the separators.
    pub fn canonical_string(&self) -> String {
        self.to_string()
    }

    /// Reproducible 64-bit hash over all three fields.
    ///
    /// Equal organizations always produce equal codes.
    pub fn hash_code(&self) -> u64 {
        let [k0, k1, k2, k3] = HASH_SEEDS;
        ahash::RandomState::with_seeds(k0, k1, k2, k3).hash_one(self)
    }

    pub fn compare_by_name(a: &Organization, b: &Organization) -> Ordering {
        a.name.cmp(&b.name)
    }

    pub fn compare_by_year(a: &Organization, b: &Organization) -> Ordering {
        a.registration_year.cmp(&b.registration_year)
    }

    pub fn compare_by_address(a: &Organization, b: &Organization) -> Ordering {
        a.address.cmp(&b.address)
    }
}

impl Default for Organization {
    fn default() -> Self {
        Self::new_unchecked("DefaultOrg", "DefaultAddress", 2000)
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Organization name: {}, Address: {}, Year: {}",
            self.name, self.address, self.registration_year
        )
    }
}

/// Rejects a registration year later than the current calendar year.
pub(crate) fn validate_registration_year(year: i32) -> DomainResult<()> {
    validate_year(year, current_year())
}

fn validate_year(year: i32, current: i32) -> DomainResult<()> {
    if year > current {
        let error = DomainError::invalid_argument(
            "registration_year",
            format!("year {year} is in the future (current year is {current})"),
        );
        error.track();
        return Err(error);
    }
    Ok(())
}

/// A named total order over organizations, usable as a sort strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrganizationOrder {
    /// Lexicographic on name
    Name,
    /// Numeric on registration year
    Year,
    /// Lexicographic on address
    Address,
}

impl OrganizationOrder {
    /// The comparison function behind this order.
    pub fn comparator(self) -> fn(&Organization, &Organization) -> Ordering {
        match self {
            OrganizationOrder::Name => Organization::compare_by_name,
            OrganizationOrder::Year => Organization::compare_by_year,
            OrganizationOrder::Address => Organization::compare_by_address,
        }
    }

    pub fn compare(self, a: &Organization, b: &Organization) -> Ordering {
        (self.comparator())(a, b)
    }
}
