use std::collections::BTreeMap;

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::catalogue::{bus::expand_route, geo::Coordinates, TransportCatalogue};

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        road_distances: BTreeMap<String, u32>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

/// Builds the catalogue in three passes: stops, then road distances, then
/// buses, so records may refer to stops declared further down the document.
pub fn read_base_requests(requests: &[BaseRequest]) -> anyhow::Result<TransportCatalogue> {
    let mut catalogue = TransportCatalogue::new();

    for request in requests {
        if let BaseRequest::Stop {
            name,
            latitude,
            longitude,
            ..
        } = request
        {
            catalogue.add_stop(name, Coordinates::new(*latitude, *longitude));
        }
    }

    for request in requests {
        if let BaseRequest::Stop {
            name,
            road_distances,
            ..
        } = request
        {
            for (to, &meters) in road_distances {
                catalogue
                    .set_distance(name, to, meters)
                    .with_context(|| format!("Invalid road distance from stop {name}"))?;
            }
        }
    }

    for request in requests {
        if let BaseRequest::Bus {
            name,
            stops,
            is_roundtrip,
        } = request
        {
            let route = expand_route(stops, *is_roundtrip);
            catalogue
                .add_bus(name, &route, *is_roundtrip, stops.last().map(String::as_str))
                .with_context(|| format!("Invalid route for bus {name}"))?;
            debug!(bus = name.as_str(), stops = route.len(), "Added bus");
        }
    }

    Ok(catalogue)
}
