use std::{cell::OnceCell, collections::BTreeSet};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    catalogue::{
        io::{read_base_requests, BaseRequest},
        TransportCatalogue,
    },
    render::{settings::RenderSettings, MapRenderer},
};

const NOT_FOUND: &str = "not found";

#[derive(Debug, Deserialize)]
pub struct InputDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    #[serde(default)]
    pub render_settings: Option<RenderSettings>,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Map { id: i64 },
}

/// One answer per stat request. Keys are declared in alphabetical order.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Bus {
        curvature: f64,
        request_id: i64,
        route_length: u64,
        stop_count: usize,
        unique_stop_count: usize,
    },
    Stop {
        buses: Vec<String>,
        request_id: i64,
    },
    Map {
        map: String,
        request_id: i64,
    },
    NotFound {
        error_message: String,
        request_id: i64,
    },
}

impl Response {
    fn not_found(request_id: i64) -> Self {
        Response::NotFound {
            error_message: NOT_FOUND.to_owned(),
            request_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusStat {
    pub curvature: f64,
    pub route_length: u64,
    pub stop_count: usize,
    pub unique_stop_count: usize,
}

/// Populates the catalogue and validates the render settings, if any.
pub fn build(
    document: &InputDocument,
) -> anyhow::Result<(TransportCatalogue, Option<MapRenderer>)> {
    let catalogue = read_base_requests(&document.base_requests)?;
    let renderer = document
        .render_settings
        .clone()
        .map(MapRenderer::new)
        .transpose()
        .context("Invalid render settings")?;
    Ok((catalogue, renderer))
}

/// Answers queries against a fully populated catalogue. The map is rendered
/// at most once and shared by every map request.
pub struct RequestHandler<'a> {
    catalogue: &'a TransportCatalogue,
    renderer: Option<&'a MapRenderer>,
    map: OnceCell<String>,
}

impl<'a> RequestHandler<'a> {
    pub fn new(catalogue: &'a TransportCatalogue, renderer: Option<&'a MapRenderer>) -> Self {
        Self {
            catalogue,
            renderer,
            map: OnceCell::new(),
        }
    }

    pub fn bus_stat(&self, name: &str) -> Option<BusStat> {
        let bus = self.catalogue.find_bus(name)?;

        let curvature = self.catalogue.curvature(bus).unwrap_or_else(|e| {
            warn!(error = %e, "Reporting curvature 1 for degenerate route");
            1.0
        });

        Some(BusStat {
            curvature,
            route_length: self.catalogue.route_length(bus),
            stop_count: bus.stops.len(),
            unique_stop_count: self.catalogue.unique_stop_count(bus),
        })
    }

    pub fn buses_by_stop(&self, name: &str) -> Option<&'a BTreeSet<String>> {
        self.catalogue.routes_through_stop(name)
    }

    pub fn render_map(&self) -> anyhow::Result<&str> {
        let renderer = self
            .renderer
            .ok_or_else(|| anyhow!("Map requested but the document has no render_settings"))?;
        Ok(self
            .map
            .get_or_init(|| renderer.render(self.catalogue).to_string()))
    }

    pub fn answer(&self, request: &StatRequest) -> anyhow::Result<Response> {
        let response = match request {
            StatRequest::Bus { id, name } => match self.bus_stat(name) {
                Some(stat) => Response::Bus {
                    curvature: stat.curvature,
                    request_id: *id,
                    route_length: stat.route_length,
                    stop_count: stat.stop_count,
                    unique_stop_count: stat.unique_stop_count,
                },
                None => Response::not_found(*id),
            },
            StatRequest::Stop { id, name } => match self.buses_by_stop(name) {
                Some(buses) => Response::Stop {
                    buses: buses.iter().cloned().collect(),
                    request_id: *id,
                },
                None => Response::not_found(*id),
            },
            StatRequest::Map { id } => Response::Map {
                map: self.render_map()?.to_owned(),
                request_id: *id,
            },
        };
        Ok(response)
    }

    pub fn answer_all(&self, requests: &[StatRequest]) -> anyhow::Result<Vec<Response>> {
        requests.iter().map(|r| self.answer(r)).collect()
    }
}
