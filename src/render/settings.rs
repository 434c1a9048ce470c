use serde::Deserialize;

use crate::{
    error::SettingsError,
    svg::{Color, Point},
};

const MAX_SETTING: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: Point,
    pub stop_label_font_size: u32,
    pub stop_label_offset: Point,
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    pub color_palette: Vec<Color>,
}

fn check_range(name: &'static str, value: f64) -> Result<(), SettingsError> {
    if (0.0..=MAX_SETTING).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            name,
            value,
            min: 0.0,
            max: MAX_SETTING,
        })
    }
}

fn check_offset(name: &'static str, offset: Point) -> Result<(), SettingsError> {
    for value in [offset.x, offset.y] {
        if !(-MAX_SETTING..=MAX_SETTING).contains(&value) {
            return Err(SettingsError::OutOfRange {
                name,
                value,
                min: -MAX_SETTING,
                max: MAX_SETTING,
            });
        }
    }
    Ok(())
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_range("width", self.width)?;
        check_range("height", self.height)?;
        check_range("line_width", self.line_width)?;
        check_range("stop_radius", self.stop_radius)?;
        check_range("underlayer_width", self.underlayer_width)?;
        check_range("bus_label_font_size", f64::from(self.bus_label_font_size))?;
        check_range("stop_label_font_size", f64::from(self.stop_label_font_size))?;
        check_offset("bus_label_offset", self.bus_label_offset)?;
        check_offset("stop_label_offset", self.stop_label_offset)?;

        let limit = self.width.min(self.height) / 2.0;
        if !(0.0..limit).contains(&self.padding) {
            return Err(SettingsError::PaddingTooLarge {
                padding: self.padding,
                limit,
            });
        }

        if self.color_palette.is_empty() {
            return Err(SettingsError::EmptyPalette);
        }

        Ok(())
    }
}
