use serde::Serialize;
use strum::{Display, EnumIter};

use crate::domain::Organization;

/// Which element of the generated data a probe targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeCase {
    #[strum(to_string = "First element")]
    First,
    #[strum(to_string = "Middle element")]
    Middle,
    #[strum(to_string = "Last element")]
    Last,
    #[strum(to_string = "Non-existing element")]
    Absent,
}

impl ProbeCase {
    /// Whether every container should report the probe as present.
    pub fn expected_found(self) -> bool {
        !matches!(self, ProbeCase::Absent)
    }

    /// Index of the targeted element in a collection of `len` items.
    pub fn index(self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        match self {
            ProbeCase::First => Some(0),
            ProbeCase::Middle => Some(len / 2),
            ProbeCase::Last => Some(len - 1),
            ProbeCase::Absent => None,
        }
    }
}

/// An organization that never matches a generated one.
///
/// Generated names all follow `Publisher{i}`, so `NotExist` cannot collide.
pub fn absent_probe() -> Organization {
    Organization::new_unchecked("NotExist", "Nowhere", 1999)
}
