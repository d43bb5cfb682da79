use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use tracing::info;

use crate::io::plot_path;
use crate::models::{ConfusionMatrix, Sentiment, SentimentStatistics};

/// Renders a confusion matrix to an image file
pub trait HeatmapRenderer {
    /// File extension of the produced images
    fn extension(&self) -> &'static str;

    fn render(&self, matrix: &ConfusionMatrix, title: &str, path: &Path) -> Result<()>;
}

/// Render one heat-map per speaker next to the transcript, returning the written paths
pub fn plot_confusion_matrices<R>(
    renderer: &R,
    stats: &SentimentStatistics,
    transcript: &Path,
) -> Result<Vec<PathBuf>>
where
    R: HeatmapRenderer + ?Sized,
{
    let mut written = Vec::with_capacity(stats.speaker_count());

    for (speaker, matrix) in stats.speakers() {
        let path = plot_path(transcript, speaker, renderer.extension());
        renderer.render(matrix, &format!("Speaker {}", speaker), &path)?;
        info!("Wrote confusion matrix for speaker {} to {:?}", speaker, path);
        written.push(path);
    }

    Ok(written)
}

/// Anchor colors of the sequential "Reds" scale, light to dark
const REDS: [RGBColor; 3] = [
    RGBColor(255, 245, 240),
    RGBColor(251, 106, 74),
    RGBColor(103, 0, 13),
];

const CELL: i32 = 90;
const GRID_X: i32 = 90;
const GRID_Y: i32 = 50;
const GRID: i32 = 3 * CELL;
const BAR_X: i32 = GRID_X + GRID + 25;
const BAR_WIDTH: i32 = 20;
const BAR_STEPS: i32 = 54;
const WIDTH: u32 = (BAR_X + BAR_WIDTH + 50) as u32;
const HEIGHT: u32 = (GRID_Y + GRID + 70) as u32;

/// SVG heat-map with a color bar and annotated cells, one document per call
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgHeatmap;

impl HeatmapRenderer for SvgHeatmap {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, matrix: &ConfusionMatrix, title: &str, path: &Path) -> Result<()> {
        let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        draw_heatmap(&root, matrix, title)
            .with_context(|| format!("Failed to draw plot: {:?}", path))?;
        root.present()
            .with_context(|| format!("Failed to write plot: {:?}", path))?;
        Ok(())
    }
}

/// Draw the full figure onto any plotters backend
pub fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    matrix: &ConfusionMatrix,
    title: &str,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let max = matrix.max_cell();
    let centered = Pos::new(HPos::Center, VPos::Center);

    root.fill(&WHITE)?;

    root.draw(&Text::new(
        title.to_string(),
        (GRID_X + GRID / 2, GRID_Y - 25),
        TextStyle::from(("sans-serif", 18).into_font()).pos(centered),
    ))?;

    for human in Sentiment::ALL {
        for service in Sentiment::ALL {
            let count = matrix.get(human, service);
            let fraction = if max == 0 { 0.0 } else { count as f64 / max as f64 };
            let x = GRID_X + service.index() as i32 * CELL;
            let y = GRID_Y + human.index() as i32 * CELL;

            root.draw(&Rectangle::new(
                [(x, y), (x + CELL, y + CELL)],
                reds(fraction).filled(),
            ))?;

            let text_color = if fraction > 0.5 { WHITE } else { BLACK };
            root.draw(&Text::new(
                count.to_string(),
                (x + CELL / 2, y + CELL / 2),
                TextStyle::from(("sans-serif", 16).into_font())
                    .pos(centered)
                    .color(&text_color),
            ))?;
        }
    }

    for category in Sentiment::ALL {
        let offset = category.index() as i32 * CELL + CELL / 2;
        root.draw(&Text::new(
            category.short_name(),
            (GRID_X + offset, GRID_Y + GRID + 15),
            TextStyle::from(("sans-serif", 13).into_font()).pos(centered),
        ))?;
        root.draw(&Text::new(
            category.short_name(),
            (GRID_X - 8, GRID_Y + offset),
            TextStyle::from(("sans-serif", 13).into_font()).pos(Pos::new(HPos::Right, VPos::Center)),
        ))?;
    }

    root.draw(&Text::new(
        "Google",
        (GRID_X + GRID / 2, GRID_Y + GRID + 45),
        TextStyle::from(("sans-serif", 14).into_font()).pos(centered),
    ))?;
    root.draw(&Text::new(
        "Human",
        (30, GRID_Y + GRID / 2),
        TextStyle::from(("sans-serif", 14).into_font().transform(FontTransform::Rotate270))
            .pos(centered),
    ))?;

    // Color bar, darkest at the top
    let step = GRID / BAR_STEPS;
    for i in 0..BAR_STEPS {
        let fraction = 1.0 - (i as f64 + 0.5) / BAR_STEPS as f64;
        let top = GRID_Y + i * step;
        root.draw(&Rectangle::new(
            [(BAR_X, top), (BAR_X + BAR_WIDTH, top + step)],
            reds(fraction).filled(),
        ))?;
    }
    root.draw(&Rectangle::new(
        [(BAR_X, GRID_Y), (BAR_X + BAR_WIDTH, GRID_Y + GRID)],
        BLACK.stroke_width(1),
    ))?;
    for (value, y) in [(max, GRID_Y), (0, GRID_Y + GRID)] {
        root.draw(&Text::new(
            value.to_string(),
            (BAR_X + BAR_WIDTH + 6, y),
            TextStyle::from(("sans-serif", 12).into_font()).pos(Pos::new(HPos::Left, VPos::Center)),
        ))?;
    }

    Ok(())
}

/// Color for `fraction` in [0, 1] on the "Reds" scale
pub fn reds(fraction: f64) -> RGBColor {
    let scaled = fraction.clamp(0.0, 1.0) * (REDS.len() - 1) as f64;
    let low = (scaled.floor() as usize).min(REDS.len() - 2);
    let t = scaled - low as f64;
    let (from, to) = (REDS[low], REDS[low + 1]);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;

    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}
