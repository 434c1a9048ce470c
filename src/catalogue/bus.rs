use crate::catalogue::stop::StopId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BusId(usize);

impl BusId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Bus {
    pub name: String,
    /// Full traversal order. Linear routes already include the return leg.
    pub stops: Vec<StopId>,
    pub is_roundtrip: bool,
    /// The terminus as declared, before the return leg was appended.
    pub last_stop: Option<StopId>,
}

impl Bus {
    pub fn new(
        name: String,
        stops: Vec<StopId>,
        is_roundtrip: bool,
        last_stop: Option<StopId>,
    ) -> Self {
        Self {
            name,
            stops,
            is_roundtrip,
            last_stop,
        }
    }

    pub fn first_stop(&self) -> Option<StopId> {
        self.stops.first().copied()
    }

    /// Whether the route name is also labelled at the far terminus.
    pub fn has_second_terminus(&self) -> bool {
        !self.is_roundtrip && self.last_stop.is_some() && self.last_stop != self.first_stop()
    }
}

/// Expands a declared stop list into the traversal order: linear routes
/// travel out and back, roundtrips are taken as declared.
pub fn expand_route<T: Clone>(declared: &[T], is_roundtrip: bool) -> Vec<T> {
    if is_roundtrip {
        return declared.to_vec();
    }

    declared
        .iter()
        .chain(declared.iter().rev().skip(1))
        .cloned()
        .collect()
}
