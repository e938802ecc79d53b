use foundation::math::Vec2;

use crate::{Rgb, ScreenPath};

/// One legend entry: the value it stands for and its fill.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Swatch {
    pub value: f64,
    pub fill: Rgb,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LegendStrip<'a> {
    pub caption: &'a str,
    pub swatches: &'a [Swatch],
    pub no_data_label: &'a str,
    pub no_data_fill: Rgb,
}

/// Draw instructions, in paint order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RenderCommand<'a> {
    /// Drop shadow under the globe.
    Shadow { center: Vec2, rx: f64, ry: f64 },
    /// Ocean disk with a top-to-bottom gradient.
    Globe {
        center: Vec2,
        radius: f64,
        top: Rgb,
        bottom: Rgb,
    },
    Feature {
        index: u32,
        code: &'a str,
        path: &'a ScreenPath,
        fill: Rgb,
        no_data: bool,
    },
    Legend(LegendStrip<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame<'a> {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<RenderCommand<'a>>,
}

impl<'a> RenderFrame<'a> {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: RenderCommand<'a>) {
        self.commands.push(command);
    }
}

/// Caller-owned output target. The engine only writes frames into it.
pub trait Surface {
    fn present(&mut self, frame: &RenderFrame<'_>);
}
