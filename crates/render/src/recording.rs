//! A surface that keeps an owned copy of every presented frame.

use foundation::math::Vec2;

use crate::{RenderCommand, RenderFrame, Rgb, Surface, Swatch};

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Shadow { center: Vec2, rx: f64, ry: f64 },
    Globe { center: Vec2, radius: f64 },
    Feature {
        index: u32,
        code: String,
        d: String,
        fill: Rgb,
        no_data: bool,
    },
    Legend {
        caption: String,
        swatches: Vec<Swatch>,
        no_data_label: String,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    frames: Vec<Vec<Recorded>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn last(&self) -> Option<&[Recorded]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Features of the most recent frame, in paint order.
    pub fn last_features(&self) -> Vec<&Recorded> {
        self.last()
            .unwrap_or_default()
            .iter()
            .filter(|r| matches!(r, Recorded::Feature { .. }))
            .collect()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Surface for RecordingSurface {
    fn present(&mut self, frame: &RenderFrame<'_>) {
        let recorded = frame
            .commands
            .iter()
            .map(|cmd| match *cmd {
                RenderCommand::Shadow { center, rx, ry } => Recorded::Shadow { center, rx, ry },
                RenderCommand::Globe { center, radius, .. } => Recorded::Globe { center, radius },
                RenderCommand::Feature {
                    index,
                    code,
                    path,
                    fill,
                    no_data,
                } => Recorded::Feature {
                    index,
                    code: code.to_string(),
                    d: path.to_svg_d(),
                    fill,
                    no_data,
                },
                RenderCommand::Legend(strip) => Recorded::Legend {
                    caption: strip.caption.to_string(),
                    swatches: strip.swatches.to_vec(),
                    no_data_label: strip.no_data_label.to_string(),
                },
            })
            .collect();
        self.frames.push(recorded);
    }
}
