use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogueError {
    #[error("Unknown stop: {0}")]
    UnknownStop(String),
    #[error("Route {0} has zero geographic length")]
    DegenerateGeometry(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("Color palette must not be empty")]
    EmptyPalette,
    #[error("Setting {name} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Padding {padding} must be below half of the smaller canvas side ({limit})")]
    PaddingTooLarge { padding: f64, limit: f64 },
}
