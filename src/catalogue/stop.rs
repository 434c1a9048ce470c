use std::collections::BTreeSet;

use crate::catalogue::geo::Coordinates;

/// Handle into the catalogue's stop arena. Valid for the catalogue's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopId(usize);

impl StopId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Stop {
    pub name: String,
    pub coordinates: Coordinates,
    /// Names of the buses visiting this stop, sorted.
    pub buses: BTreeSet<String>,
}

impl Stop {
    pub fn new(name: String, coordinates: Coordinates) -> Self {
        Self {
            name,
            coordinates,
            buses: BTreeSet::new(),
        }
    }
}
