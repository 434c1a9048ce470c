pub mod bus;
pub mod geo;
pub mod io;
pub mod stop;

use std::collections::{BTreeSet, HashMap, HashSet};

use itertools::Itertools;
use tracing::debug;

use crate::{
    catalogue::{
        bus::{Bus, BusId},
        geo::{compute_distance, Coordinates},
        stop::{Stop, StopId},
    },
    error::CatalogueError,
};

/// Owns every stop and bus. Entities are only ever appended, so a `StopId`
/// or `BusId` handed out stays valid for the catalogue's lifetime.
#[derive(Debug, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    stops_by_name: HashMap<String, StopId>,
    buses: Vec<Bus>,
    buses_by_name: HashMap<String, BusId>,
    distances: HashMap<(StopId, StopId), u32>,
}

impl TransportCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stop. A name that is already registered keeps its first
    /// coordinates and the existing handle is returned.
    pub fn add_stop(&mut self, name: &str, coordinates: Coordinates) -> StopId {
        if let Some(&id) = self.stops_by_name.get(name) {
            debug!(stop = name, "Ignoring duplicate stop");
            return id;
        }

        let id = StopId::new(self.stops.len());
        self.stops.push(Stop::new(name.to_owned(), coordinates));
        self.stops_by_name.insert(name.to_owned(), id);
        id
    }

    /// Registers a bus over an already expanded stop sequence. Fails without
    /// touching the catalogue if any stop name is undeclared.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: &str,
        stops: &[S],
        is_roundtrip: bool,
        last_stop: Option<&str>,
    ) -> Result<BusId, CatalogueError> {
        let route = stops
            .iter()
            .map(|s| self.resolve(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let last_stop = last_stop.map(|s| self.resolve(s)).transpose()?;

        if let Some(&id) = self.buses_by_name.get(name) {
            debug!(bus = name, "Ignoring duplicate bus");
            return Ok(id);
        }

        for stop in &route {
            self.stops[stop.index()].buses.insert(name.to_owned());
        }

        let id = BusId::new(self.buses.len());
        self.buses.push(Bus::new(name.to_owned(), route, is_roundtrip, last_stop));
        self.buses_by_name.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Declares the road distance from `from` to `to`. The reverse direction
    /// is left untouched.
    pub fn set_distance(
        &mut self,
        from: &str,
        to: &str,
        meters: u32,
    ) -> Result<(), CatalogueError> {
        let key = (self.resolve(from)?, self.resolve(to)?);
        self.distances.insert(key, meters);
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<StopId, CatalogueError> {
        self.stops_by_name
            .get(name)
            .copied()
            .ok_or_else(|| CatalogueError::UnknownStop(name.to_owned()))
    }

    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.index()]
    }

    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    pub fn buses(&self) -> impl Iterator<Item = &Bus> {
        self.buses.iter()
    }

    pub fn distance_count(&self) -> usize {
        self.distances.len()
    }

    pub fn find_stop(&self, name: &str) -> Option<&Stop> {
        self.stops_by_name.get(name).map(|&id| self.stop(id))
    }

    pub fn find_bus(&self, name: &str) -> Option<&Bus> {
        self.buses_by_name.get(name).map(|&id| self.bus(id))
    }

    /// Names of the buses visiting a stop, sorted. `None` only when the stop
    /// was never declared.
    pub fn routes_through_stop(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.find_stop(name).map(|stop| &stop.buses)
    }

    /// Declared distance, falling back to the reverse direction, then to 0.
    pub fn get_distance(&self, from: StopId, to: StopId) -> u32 {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .unwrap_or(0)
    }

    pub fn route_length(&self, bus: &Bus) -> u64 {
        bus.stops
            .iter()
            .tuple_windows()
            .map(|(&from, &to)| u64::from(self.get_distance(from, to)))
            .sum()
    }

    pub fn geo_length(&self, bus: &Bus) -> f64 {
        bus.stops
            .iter()
            .tuple_windows()
            .map(|(&from, &to)| {
                compute_distance(self.stop(from).coordinates, self.stop(to).coordinates)
            })
            .sum()
    }

    pub fn curvature(&self, bus: &Bus) -> Result<f64, CatalogueError> {
        let geo_length = self.geo_length(bus);
        if geo_length == 0.0 {
            return Err(CatalogueError::DegenerateGeometry(bus.name.clone()));
        }

        Ok(self.route_length(bus) as f64 / geo_length)
    }

    pub fn unique_stop_count(&self, bus: &Bus) -> usize {
        bus.stops.iter().collect::<HashSet<_>>().len()
    }
}
