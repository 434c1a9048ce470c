use std::fmt;

use serde::Deserialize;

use crate::svg::number::Num;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub opacity: f64,
}

impl Rgba {
    pub const fn new(red: u8, green: u8, blue: u8, opacity: f64) -> Self {
        Self {
            red,
            green,
            blue,
            opacity,
        }
    }
}

/// A paint value. `None` means the attribute is not emitted at all; the
/// keyword `"none"` is a `Named` color.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "ColorRepr")]
pub enum Color {
    #[default]
    None,
    Named(String),
    Rgb(Rgb),
    Rgba(Rgba),
}

impl Color {
    pub fn named(name: &str) -> Self {
        Self::Named(name.to_owned())
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Color::None)
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<Rgba> for Color {
    fn from(rgba: Rgba) -> Self {
        Self::Rgba(rgba)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::None => Ok(()),
            Color::Named(name) => f.write_str(name),
            Color::Rgb(Rgb { red, green, blue }) => write!(f, "rgb({red},{green},{blue})"),
            Color::Rgba(Rgba {
                red,
                green,
                blue,
                opacity,
            }) => write!(f, "rgba({red},{green},{blue},{})", Num(*opacity)),
        }
    }
}

/// Input form: `"keyword"`, `[r, g, b]` or `[r, g, b, opacity]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl From<ColorRepr> for Color {
    fn from(repr: ColorRepr) -> Self {
        match repr {
            ColorRepr::Named(name) => Color::Named(name),
            ColorRepr::Rgb(r, g, b) => Color::Rgb(Rgb::new(r, g, b)),
            ColorRepr::Rgba(r, g, b, a) => Color::Rgba(Rgba::new(r, g, b, a)),
        }
    }
}
