//! Minimal SVG scene: a closed set of shapes with shared stroke/fill styling,
//! emitted in insertion order.

pub mod color;
pub mod number;

use std::fmt;

use serde::Deserialize;

pub use color::Color;
use number::Num;

/// Canvas position or offset. Reads from a `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeLineCap {
    Round,
}

impl fmt::Display for StrokeLineCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrokeLineCap::Round => "round",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeLineJoin {
    Round,
}

impl fmt::Display for StrokeLineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrokeLineJoin::Round => "round",
        })
    }
}

/// Paint attributes common to every shape. Unset attributes are omitted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: Option<f64>,
    pub line_cap: Option<StrokeLineCap>,
    pub line_join: Option<StrokeLineJoin>,
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fill.is_set() {
            write!(f, " fill=\"{}\"", self.fill)?;
        }
        if self.stroke.is_set() {
            write!(f, " stroke=\"{}\"", self.stroke)?;
        }
        if let Some(width) = self.stroke_width {
            write!(f, " stroke-width=\"{}\"", Num(width))?;
        }
        if let Some(cap) = self.line_cap {
            write!(f, " stroke-linecap=\"{cap}\"")?;
        }
        if let Some(join) = self.line_join {
            write!(f, " stroke-linejoin=\"{join}\"")?;
        }
        Ok(())
    }
}

/// Consuming style setters shared by every shape.
pub trait Styled: Sized {
    fn style_mut(&mut self) -> &mut Style;

    fn fill(mut self, color: impl Into<Color>) -> Self {
        self.style_mut().fill = color.into();
        self
    }

    fn stroke(mut self, color: impl Into<Color>) -> Self {
        self.style_mut().stroke = color.into();
        self
    }

    fn stroke_width(mut self, width: f64) -> Self {
        self.style_mut().stroke_width = Some(width);
        self
    }

    fn line_cap(mut self, cap: StrokeLineCap) -> Self {
        self.style_mut().line_cap = Some(cap);
        self
    }

    fn line_join(mut self, join: StrokeLineJoin) -> Self {
        self.style_mut().line_join = Some(join);
        self
    }
}

macro_rules! impl_styled {
    ($shape:ident) => {
        impl Styled for $shape {
            fn style_mut(&mut self) -> &mut Style {
                &mut self.style
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub style: Style,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point(mut self, point: Point) -> Self {
        self.points.push(point);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub style: Style,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            style: Style::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub position: Point,
    pub offset: Point,
    pub font_size: u32,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub data: String,
    pub style: Style,
}

impl Text {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            position: Point::default(),
            offset: Point::default(),
            font_size: 1,
            font_family: None,
            font_weight: None,
            data: data.into(),
            style: Style::default(),
        }
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }
}

impl_styled!(Polyline);
impl_styled!(Circle);
impl_styled!(Text);

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polyline(Polyline),
    Circle(Circle),
    Text(Text),
}

impl From<Polyline> for Shape {
    fn from(polyline: Polyline) -> Self {
        Shape::Polyline(polyline)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Text> for Shape {
    fn from(text: Text) -> Self {
        Shape::Text(text)
    }
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '&' => f.write_str("&amp;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Polyline(Polyline { points, style }) => {
                f.write_str("<polyline points=\"")?;
                for (i, p) in points.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{},{}", Num(p.x), Num(p.y))?;
                }
                write!(f, "\"{style} />")
            }
            Shape::Circle(Circle {
                center,
                radius,
                style,
            }) => write!(
                f,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{style} />",
                Num(center.x),
                Num(center.y),
                Num(*radius)
            ),
            Shape::Text(text) => {
                write!(
                    f,
                    "<text x=\"{}\" y=\"{}\" dx=\"{}\" dy=\"{}\" font-size=\"{}\"",
                    Num(text.position.x),
                    Num(text.position.y),
                    Num(text.offset.x),
                    Num(text.offset.y),
                    text.font_size
                )?;
                if let Some(family) = &text.font_family {
                    write!(f, " font-family=\"{family}\"")?;
                }
                if let Some(weight) = &text.font_weight {
                    write!(f, " font-weight=\"{weight}\"")?;
                }
                write!(f, "{}>{}</text>", text.style, Escaped(&text.data))
            }
        }
    }
}

/// An append-only list of shapes. Later shapes are painted over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    shapes: Vec<Shape>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    #[cfg(test)]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8" ?>"#)?;
        writeln!(f, r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1">"#)?;
        for shape in &self.shapes {
            writeln!(f, "{shape}")?;
        }
        f.write_str("</svg>")
    }
}
