//! SVG output for presented frames.

use foundation::math::{SCREEN_DIGITS, round_to_digits};
use svg::Document;
use svg::node::element as svg_element;

use crate::{LegendStrip, RenderCommand, RenderFrame, Rgb, Surface};

const GLOBE_GRADIENT_ID: &str = "globe-fill";
const SHADOW_GRADIENT_ID: &str = "globe-shadow";
const FONT_FAMILY: &str = "sans-serif";
const LEGEND_MARGIN: f64 = 16.0;
const SWATCH_WIDTH: f64 = 28.0;
const SWATCH_HEIGHT: f64 = 10.0;

/// Renders each presented frame into a standalone SVG document.
#[derive(Debug, Default)]
pub struct SvgSurface {
    document: Option<Document>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last presented frame as SVG text; empty before the first frame.
    pub fn to_svg_string(&self) -> String {
        self.document
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

impl Surface for SvgSurface {
    fn present(&mut self, frame: &RenderFrame<'_>) {
        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", frame.width, frame.height))
            .set("width", frame.width)
            .set("height", frame.height);

        // Consecutive features share one group, added where the first of them
        // sits in paint order.
        let mut countries: Option<svg_element::Group> = None;
        for cmd in &frame.commands {
            if !matches!(cmd, RenderCommand::Feature { .. }) {
                if let Some(group) = countries.take() {
                    doc = doc.add(group);
                }
            }
            match *cmd {
                RenderCommand::Shadow { center, rx, ry } => {
                    doc = doc.add(shadow_gradient()).add(
                        svg_element::Ellipse::new()
                            .set("cx", coord(center.x))
                            .set("cy", coord(center.y))
                            .set("rx", coord(rx))
                            .set("ry", coord(ry))
                            .set("fill", format!("url(#{SHADOW_GRADIENT_ID})")),
                    );
                }
                RenderCommand::Globe {
                    center,
                    radius,
                    top,
                    bottom,
                } => {
                    doc = doc.add(globe_gradient(top, bottom)).add(
                        svg_element::Circle::new()
                            .set("class", "globe")
                            .set("cx", coord(center.x))
                            .set("cy", coord(center.y))
                            .set("r", coord(radius))
                            .set("fill", format!("url(#{GLOBE_GRADIENT_ID})")),
                    );
                }
                RenderCommand::Feature {
                    code,
                    path,
                    fill,
                    no_data,
                    ..
                } => {
                    let class = if no_data { "country no-data" } else { "country" };
                    let group = countries
                        .take()
                        .unwrap_or_else(|| svg_element::Group::new().set("class", "countries"));
                    countries = Some(
                        group.add(
                            svg_element::Path::new()
                                .set("class", class)
                                .set("data-code", code)
                                .set("d", path.to_svg_d())
                                .set("fill", fill),
                        ),
                    );
                }
                RenderCommand::Legend(strip) => {
                    doc = doc.add(legend_group(&strip, frame.height));
                }
            }
        }
        if let Some(group) = countries {
            doc = doc.add(group);
        }
        self.document = Some(doc);
    }
}

fn coord(v: f64) -> f64 {
    round_to_digits(v, SCREEN_DIGITS)
}

fn globe_gradient(top: Rgb, bottom: Rgb) -> svg_element::Definitions {
    let gradient = svg_element::LinearGradient::new()
        .set("id", GLOBE_GRADIENT_ID)
        .set("x1", "60%")
        .set("y1", "30%")
        .set("x2", "20%")
        .set("y2", "90%")
        .add(
            svg_element::Stop::new()
                .set("offset", "0%")
                .set("stop-color", top),
        )
        .add(
            svg_element::Stop::new()
                .set("offset", "100%")
                .set("stop-color", bottom),
        );
    svg_element::Definitions::new().add(gradient)
}

fn shadow_gradient() -> svg_element::Definitions {
    let gradient = svg_element::RadialGradient::new()
        .set("id", SHADOW_GRADIENT_ID)
        .set("cx", "50%")
        .set("cy", "50%")
        .add(
            svg_element::Stop::new()
                .set("offset", "20%")
                .set("stop-color", "#000")
                .set("stop-opacity", 0.5),
        )
        .add(
            svg_element::Stop::new()
                .set("offset", "100%")
                .set("stop-color", "#000")
                .set("stop-opacity", 0),
        );
    svg_element::Definitions::new().add(gradient)
}

fn legend_group(strip: &LegendStrip<'_>, height: f64) -> svg_element::Group {
    let top = height - LEGEND_MARGIN - 3.0 * SWATCH_HEIGHT - 12.0;
    let mut group = svg_element::Group::new()
        .set("class", "legend")
        .set("transform", format!("translate({LEGEND_MARGIN}, {})", coord(top)))
        .add(
            svg_element::Text::new(strip.caption)
                .set("x", 0)
                .set("y", 0)
                .set("font-family", FONT_FAMILY)
                .set("font-size", 11),
        );

    let mut x = 0.0;
    for swatch in strip.swatches {
        group = group
            .add(
                svg_element::Rectangle::new()
                    .set("x", x)
                    .set("y", SWATCH_HEIGHT)
                    .set("width", SWATCH_WIDTH)
                    .set("height", SWATCH_HEIGHT)
                    .set("fill", swatch.fill),
            )
            .add(
                svg_element::Text::new(format!("{}", swatch.value))
                    .set("x", x + SWATCH_WIDTH / 2.0)
                    .set("y", 3.0 * SWATCH_HEIGHT)
                    .set("text-anchor", "middle")
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", 9),
            );
        x += SWATCH_WIDTH;
    }

    x += SWATCH_WIDTH / 2.0;
    group
        .add(
            svg_element::Rectangle::new()
                .set("class", "no-data")
                .set("x", x)
                .set("y", SWATCH_HEIGHT)
                .set("width", SWATCH_WIDTH)
                .set("height", SWATCH_HEIGHT)
                .set("fill", strip.no_data_fill),
        )
        .add(
            svg_element::Text::new(strip.no_data_label)
                .set("x", x + SWATCH_WIDTH + 4.0)
                .set("y", 2.0 * SWATCH_HEIGHT)
                .set("font-family", FONT_FAMILY)
                .set("font-size", 9),
        )
}

#[cfg(test)]
mod tests {
    use super::SvgSurface;
    use crate::{LegendStrip, RenderCommand, RenderFrame, Rgb, ScreenPath, Surface, Swatch};
    use foundation::math::Vec2;

    #[test]
    fn empty_before_first_frame() {
        assert_eq!(SvgSurface::new().to_svg_string(), "");
    }

    #[test]
    fn writes_globe_features_and_legend() {
        let path = ScreenPath::from_rings(vec![vec![
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 10.0),
            Vec2::new(20.0, 20.0),
        ]]);
        let swatches = [Swatch {
            value: 100.0,
            fill: Rgb::new(29, 125, 10),
        }];
        let mut frame = RenderFrame::new(400.0, 300.0);
        frame.push(RenderCommand::Globe {
            center: Vec2::new(200.0, 150.0),
            radius: 140.0,
            top: Rgb::new(36, 147, 195),
            bottom: Rgb::new(44, 64, 153),
        });
        frame.push(RenderCommand::Feature {
            index: 0,
            code: "IT",
            path: &path,
            fill: Rgb::new(223, 226, 232),
            no_data: true,
        });
        frame.push(RenderCommand::Legend(LegendStrip {
            caption: "Percent increase or decrease in travel to retail locations",
            swatches: &swatches,
            no_data_label: "No Data Available",
            no_data_fill: Rgb::new(223, 226, 232),
        }));

        let mut surface = SvgSurface::new();
        surface.present(&frame);
        let svg = surface.to_svg_string();

        assert!(svg.contains("viewBox=\"0 0 400 300\""));
        assert!(svg.contains("url(#globe-fill)"));
        assert!(svg.contains("class=\"country no-data\""));
        assert!(svg.contains("data-code=\"IT\""));
        assert!(svg.contains("M10,10L20,10L20,20Z"));
        assert!(svg.contains("rgb(223, 226, 232)"));
        assert!(svg.contains("No Data Available"));
        assert!(svg.contains("travel to retail locations"));
    }

    #[test]
    fn paints_in_command_order() {
        let path = ScreenPath::from_rings(vec![vec![
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 10.0),
            Vec2::new(20.0, 20.0),
        ]]);
        let mut frame = RenderFrame::new(400.0, 300.0);
        frame.push(RenderCommand::Shadow {
            center: Vec2::new(180.0, 295.0),
            rx: 154.0,
            ry: 35.0,
        });
        frame.push(RenderCommand::Globe {
            center: Vec2::new(200.0, 150.0),
            radius: 140.0,
            top: Rgb::new(36, 147, 195),
            bottom: Rgb::new(44, 64, 153),
        });
        for code in ["IT", "FR"] {
            frame.push(RenderCommand::Feature {
                index: 0,
                code,
                path: &path,
                fill: Rgb::new(216, 145, 136),
                no_data: false,
            });
        }
        frame.push(RenderCommand::Legend(LegendStrip {
            caption: "Percent increase or decrease in travel to park locations",
            swatches: &[],
            no_data_label: "N/A",
            no_data_fill: Rgb::new(223, 226, 232),
        }));

        let mut surface = SvgSurface::new();
        surface.present(&frame);
        let svg = surface.to_svg_string();

        let at = |needle: &str| svg.find(needle).unwrap_or_else(|| panic!("missing {needle}"));
        assert!(at("<ellipse") < at("class=\"globe\""));
        assert!(at("class=\"globe\"") < at("class=\"countries\""));
        assert!(at("data-code=\"FR\"") < at("class=\"legend\""));
        assert_eq!(svg.matches("class=\"countries\"").count(), 1);
    }

    #[test]
    fn backdrop_gradients() {
        let mut frame = RenderFrame::new(400.0, 300.0);
        frame.push(RenderCommand::Shadow {
            center: Vec2::new(180.0, 295.0),
            rx: 154.0,
            ry: 35.0,
        });
        frame.push(RenderCommand::Globe {
            center: Vec2::new(200.0, 150.0),
            radius: 140.0,
            top: Rgb::new(36, 147, 195),
            bottom: Rgb::new(44, 64, 153),
        });
        let mut surface = SvgSurface::new();
        surface.present(&frame);
        let svg = surface.to_svg_string();

        for attr in ["x1=\"60%\"", "y1=\"30%\"", "x2=\"20%\"", "y2=\"90%\""] {
            assert!(svg.contains(attr), "missing {attr}");
        }
        assert!(svg.contains("offset=\"20%\""));
        assert!(svg.contains("stop-opacity=\"0.5\""));
        assert!(!svg.contains("class=\"countries\""));
    }
}
