use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};

use super::{Dated, Person, ymd};

/// Physical format of a printed book.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Size {
    Pocket,
    #[default]
    Standard,
    Big,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    pub author: Person,
    pub title: String,
    pub publication_date: NaiveDate,
    pub format: Size,
}

impl Book {
    pub fn new(
        author: Person,
        title: impl Into<String>,
        publication_date: NaiveDate,
        format: Size,
    ) -> Self {
        Self {
            author,
            title: title.into(),
            publication_date,
            format,
        }
    }

    pub fn publication_year(&self) -> i32 {
        self.publication_date.year()
    }

    pub fn is_pocket(&self) -> bool {
        self.format == Size::Pocket
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new(
            Person::default(),
            "DefaultTitle",
            ymd(2001, 1, 1),
            Size::Standard,
        )
    }
}

impl Dated for Book {
    fn date(&self) -> NaiveDate {
        self.publication_date
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Author: {}, Title: {}, Format: {}, Published: {}",
            self.author, self.title, self.format, self.publication_date
        )
    }
}
