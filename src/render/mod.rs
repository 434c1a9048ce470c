pub mod projector;
pub mod settings;

use itertools::Itertools;
use tracing::debug;

use crate::{
    catalogue::{bus::Bus, stop::Stop, TransportCatalogue},
    error::SettingsError,
    render::{projector::SphereProjector, settings::RenderSettings},
    svg::{Circle, Color, Document, Polyline, StrokeLineCap, StrokeLineJoin, Styled, Text},
};

const FONT_FAMILY: &str = "Verdana";

/// Draws the route network. Layers, bottom to top: route lines, route
/// names, stop markers, stop names.
#[derive(Debug, Clone)]
pub struct MapRenderer {
    settings: RenderSettings,
}

impl MapRenderer {
    pub fn new(settings: RenderSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn render(&self, catalogue: &TransportCatalogue) -> Document {
        let buses = catalogue
            .buses()
            .filter(|bus| !bus.stops.is_empty())
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect_vec();
        let stops = buses
            .iter()
            .flat_map(|bus| bus.stops.iter().copied())
            .unique()
            .map(|id| catalogue.stop(id))
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect_vec();

        let coordinates = stops.iter().map(|stop| stop.coordinates).collect_vec();
        let projector = SphereProjector::new(
            &coordinates,
            self.settings.width,
            self.settings.height,
            self.settings.padding,
        );

        let mut document = Document::new();
        self.draw_route_lines(&mut document, catalogue, &buses, &projector);
        self.draw_route_labels(&mut document, catalogue, &buses, &projector);
        self.draw_stop_markers(&mut document, &stops, &projector);
        self.draw_stop_labels(&mut document, &stops, &projector);

        if document.is_empty() {
            debug!("No routes to draw");
        }
        debug!(
            buses = buses.len(),
            stops = stops.len(),
            shapes = document.len(),
            "Rendered map"
        );
        document
    }

    /// Pairs each bus with its palette color, wrapping around the palette.
    fn with_colors<'a>(
        &'a self,
        buses: &'a [&'a Bus],
    ) -> impl Iterator<Item = (&'a Bus, &'a Color)> + 'a {
        buses
            .iter()
            .copied()
            .zip(self.settings.color_palette.iter().cycle())
    }

    fn draw_route_lines(
        &self,
        document: &mut Document,
        catalogue: &TransportCatalogue,
        buses: &[&Bus],
        projector: &SphereProjector,
    ) {
        for (bus, color) in self.with_colors(buses) {
            let line = bus
                .stops
                .iter()
                .fold(Polyline::new(), |line, &id| {
                    line.point(projector.project(catalogue.stop(id).coordinates))
                })
                .fill("none")
                .stroke(color.clone())
                .stroke_width(self.settings.line_width)
                .line_cap(StrokeLineCap::Round)
                .line_join(StrokeLineJoin::Round);
            document.add(line);
        }
    }

    fn draw_route_labels(
        &self,
        document: &mut Document,
        catalogue: &TransportCatalogue,
        buses: &[&Bus],
        projector: &SphereProjector,
    ) {
        for (bus, color) in self.with_colors(buses) {
            let termini = bus
                .first_stop()
                .into_iter()
                .chain(bus.last_stop.filter(|_| bus.has_second_terminus()));

            for id in termini {
                let label = Text::new(bus.name.as_str())
                    .position(projector.project(catalogue.stop(id).coordinates))
                    .offset(self.settings.bus_label_offset)
                    .font_size(self.settings.bus_label_font_size)
                    .font_family(FONT_FAMILY)
                    .font_weight("bold");

                document.add(self.underlay(label.clone()));
                document.add(label.fill(color.clone()));
            }
        }
    }

    fn draw_stop_markers(
        &self,
        document: &mut Document,
        stops: &[&Stop],
        projector: &SphereProjector,
    ) {
        for stop in stops {
            document.add(
                Circle::new(projector.project(stop.coordinates), self.settings.stop_radius)
                    .fill("white"),
            );
        }
    }

    fn draw_stop_labels(
        &self,
        document: &mut Document,
        stops: &[&Stop],
        projector: &SphereProjector,
    ) {
        for stop in stops {
            let label = Text::new(stop.name.as_str())
                .position(projector.project(stop.coordinates))
                .offset(self.settings.stop_label_offset)
                .font_size(self.settings.stop_label_font_size)
                .font_family(FONT_FAMILY);

            document.add(self.underlay(label.clone()));
            document.add(label.fill("black"));
        }
    }

    fn underlay(&self, text: Text) -> Text {
        text.fill(self.settings.underlayer_color.clone())
            .stroke(self.settings.underlayer_color.clone())
            .stroke_width(self.settings.underlayer_width)
            .line_cap(StrokeLineCap::Round)
            .line_join(StrokeLineJoin::Round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalogue::{bus::expand_route, geo::Coordinates},
        render::settings::tests::settings,
        svg::Shape,
    };

    fn catalogue(buses: &[(&str, &[&str], bool)]) -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("A", Coordinates::new(55.0, 37.0));
        catalogue.add_stop("B", Coordinates::new(55.1, 37.1));
        catalogue.add_stop("C", Coordinates::new(55.05, 37.05));
        catalogue.add_stop("Unused", Coordinates::new(10.0, 10.0));
        for &(name, stops, is_roundtrip) in buses {
            catalogue
                .add_bus(
                    name,
                    &expand_route(stops, is_roundtrip),
                    is_roundtrip,
                    stops.last().copied(),
                )
                .unwrap();
        }
        catalogue
    }

    fn renderer() -> MapRenderer {
        MapRenderer::new(settings()).unwrap()
    }

    fn describe(shape: &Shape) -> String {
        match shape {
            Shape::Polyline(line) => format!("line {}", line.style.stroke),
            Shape::Circle(_) => "circle".to_owned(),
            Shape::Text(text) => format!("text {} {}", text.data, text.style.fill),
        }
    }

    #[test]
    fn full_document() {
        let svg = renderer()
            .render(&catalogue(&[("1", &["A", "B"], false)]))
            .to_string();

        let underlay = r#"fill="rgba(255,255,255,0.85)" stroke="rgba(255,255,255,0.85)" stroke-width="3" stroke-linecap="round" stroke-linejoin="round""#;
        let bus_text = r#"font-size="20" font-family="Verdana" font-weight="bold""#;
        let stop_text = r#"dx="7" dy="-3" font-size="18" font-family="Verdana""#;
        let expected = [
            r#"<?xml version="1.0" encoding="UTF-8" ?>"#.to_owned(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1">"#.to_owned(),
            r#"<polyline points="50,350 350,50 50,350" fill="none" stroke="green" stroke-width="14" stroke-linecap="round" stroke-linejoin="round" />"#.to_owned(),
            format!(r#"<text x="50" y="350" dx="7" dy="15" {bus_text} {underlay}>1</text>"#),
            format!(r#"<text x="50" y="350" dx="7" dy="15" {bus_text} fill="green">1</text>"#),
            format!(r#"<text x="350" y="50" dx="7" dy="15" {bus_text} {underlay}>1</text>"#),
            format!(r#"<text x="350" y="50" dx="7" dy="15" {bus_text} fill="green">1</text>"#),
            r#"<circle cx="50" cy="350" r="5" fill="white" />"#.to_owned(),
            r#"<circle cx="350" cy="50" r="5" fill="white" />"#.to_owned(),
            format!(r#"<text x="50" y="350" {stop_text} {underlay}>A</text>"#),
            format!(r#"<text x="50" y="350" {stop_text} fill="black">A</text>"#),
            format!(r#"<text x="350" y="50" {stop_text} {underlay}>B</text>"#),
            format!(r#"<text x="350" y="50" {stop_text} fill="black">B</text>"#),
            "</svg>".to_owned(),
        ]
        .join("\n");

        assert_eq!(svg, expected);
    }

    #[test]
    fn layers_and_palette_cycle() {
        let catalogue = catalogue(&[
            ("d", &["A", "C"], true),
            ("a", &["A", "B", "A"], true),
            ("empty", &[], true),
            ("c", &["C", "B"], false),
            ("b", &["B", "A"], false),
        ]);
        let document = renderer().render(&catalogue);
        let shapes: Vec<_> = document.shapes().iter().map(describe).collect();

        let u = "rgba(255,255,255,0.85)";
        let expected = vec![
            "line green".to_owned(),
            "line rgb(255,160,0)".to_owned(),
            "line red".to_owned(),
            "line green".to_owned(),
            format!("text a {u}"),
            "text a green".to_owned(),
            format!("text b {u}"),
            "text b rgb(255,160,0)".to_owned(),
            format!("text b {u}"),
            "text b rgb(255,160,0)".to_owned(),
            format!("text c {u}"),
            "text c red".to_owned(),
            format!("text c {u}"),
            "text c red".to_owned(),
            format!("text d {u}"),
            "text d green".to_owned(),
            "circle".to_owned(),
            "circle".to_owned(),
            "circle".to_owned(),
            format!("text A {u}"),
            "text A black".to_owned(),
            format!("text B {u}"),
            "text B black".to_owned(),
            format!("text C {u}"),
            "text C black".to_owned(),
        ];
        assert_eq!(shapes, expected);
    }

    #[test]
    fn unused_stops_do_not_affect_projection() {
        let with_unused = renderer().render(&catalogue(&[("1", &["A", "B"], false)]));
        let Shape::Polyline(line) = &with_unused.shapes()[0] else {
            panic!("expected the route line first");
        };
        assert!(line.points.iter().all(|p| p.x >= 50.0 - 1e-9 && p.y >= 50.0 - 1e-9));
        assert!(!with_unused.to_string().contains("Unused"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let catalogue = catalogue(&[("1", &["A", "B", "C"], false), ("2", &["C", "A", "C"], true)]);
        let renderer = renderer();
        assert_eq!(
            renderer.render(&catalogue).to_string(),
            renderer.render(&catalogue).to_string()
        );
    }

    #[test]
    fn empty_catalogue_renders_empty_scene() {
        let document = renderer().render(&TransportCatalogue::new());
        assert!(document.is_empty());
    }

    #[test]
    fn rejects_empty_palette() {
        let mut settings = settings();
        settings.color_palette.clear();
        assert_eq!(
            MapRenderer::new(settings).unwrap_err(),
            SettingsError::EmptyPalette
        );
    }
}
