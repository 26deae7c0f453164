use super::canvas::Renderer;
use super::colors::Colors;
use crate::constants::{LEGEND_FONT_SIZE, MARGIN_TOP};

use image::Rgb;
use log::debug;

/// Legend sample drawn next to a label
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Swatch {
    /// line segment with a point marker
    LineMarker(Rgb<u8>),
    /// single circular marker
    Marker(Rgb<u8>),
    /// star with a black edge
    Star(Rgb<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub swatch: Swatch,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, swatch: Swatch) -> Self {
        Self {
            label: label.into(),
            swatch,
        }
    }
}

/// Legend panel colors
#[derive(Debug, Clone, Copy)]
pub struct LegendStyle {
    pub background: Rgb<u8>,
    pub edge: Rgb<u8>,
    pub text: Rgb<u8>,
}

const PADDING: f64 = 8.0;
const MAX_LINE_HEIGHT: f64 = 20.0;
const SWATCH_WIDTH: f64 = 24.0;

/// 凡例を描画（右側のパネル）
///
/// Entries shrink to fit the panel height when there are many trajectories.
pub fn draw_legend(
    renderer: &mut Renderer,
    entries: &[LegendEntry],
    legend_x: f64,
    style: LegendStyle,
) {
    if entries.is_empty() {
        return;
    }

    let panel_x = legend_x + PADDING;
    let panel_w = renderer.width as f64 - panel_x - PADDING;
    let available_h = renderer.height as f64 - MARGIN_TOP - PADDING * 3.0;
    if panel_w <= SWATCH_WIDTH || available_h <= 0.0 {
        debug!("legend panel too small, skipped");
        return;
    }

    let line_h = (available_h / entries.len() as f64).min(MAX_LINE_HEIGHT);
    let font_size = (line_h * 0.8).min(LEGEND_FONT_SIZE);
    let panel_h = line_h * entries.len() as f64 + PADDING * 2.0;

    renderer.fill_rect(panel_x, MARGIN_TOP, panel_w, panel_h, style.background);
    renderer.draw_rect_outline(panel_x, MARGIN_TOP, panel_w, panel_h, 1.0, style.edge);

    let mut y = MARGIN_TOP + PADDING;
    for entry in entries {
        let cy = y + line_h / 2.0;
        let sx = panel_x + PADDING;
        let marker_r = (line_h * 0.2).clamp(1.0, 3.0);

        // 色のサンプル
        match entry.swatch {
            Swatch::LineMarker(color) => {
                renderer.draw_line((sx, cy), (sx + SWATCH_WIDTH, cy), 2.0, color);
                renderer.fill_circle(sx + SWATCH_WIDTH / 2.0, cy, marker_r, color);
            }
            Swatch::Marker(color) => {
                renderer.fill_circle(sx + SWATCH_WIDTH / 2.0, cy, marker_r * 2.0, color);
            }
            Swatch::Star(color) => {
                let r = line_h * 0.45;
                renderer.fill_star(sx + SWATCH_WIDTH / 2.0, cy, r, Colors::BLACK);
                renderer.fill_star(sx + SWATCH_WIDTH / 2.0, cy, r * 0.7, color);
            }
        }

        // ラベル
        renderer.draw_text(
            sx + SWATCH_WIDTH + 6.0,
            cy - font_size / 2.0,
            &entry.label,
            font_size,
            style.text,
        );
        y += line_h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: LegendStyle = LegendStyle {
        background: Colors::FIGURE_BG,
        edge: Colors::WHITE,
        text: Colors::WHITE,
    };

    #[test]
    fn test_legend_swatch_color() {
        let mut renderer = Renderer::new(400, 300, Colors::BLACK);
        let color = Rgb([10, 200, 30]);
        draw_legend(
            &mut renderer,
            &[LegendEntry::new("Player 1", Swatch::LineMarker(color))],
            200.0,
            STYLE,
        );
        // first entry: swatch centered at (panel_x + PADDING + 12, MARGIN_TOP + PADDING + 10)
        let sx = (200.0 + PADDING + PADDING + SWATCH_WIDTH / 2.0) as u32;
        let cy = (MARGIN_TOP + PADDING + MAX_LINE_HEIGHT / 2.0) as u32;
        assert_eq!(renderer.pixel(sx, cy), color);
    }

    #[test]
    fn test_many_entries_fit_panel() {
        let mut renderer = Renderer::new(400, 200, Colors::BLACK);
        let entries: Vec<_> = (0..50)
            .map(|i| LegendEntry::new(format!("Player {}", i), Swatch::Marker(Colors::RED)))
            .collect();
        draw_legend(&mut renderer, &entries, 200.0, STYLE);
        // nothing is drawn below the panel
        assert_eq!(renderer.pixel(300, 199), Colors::BLACK);
    }

    #[test]
    fn test_empty_legend_draws_nothing() {
        let mut renderer = Renderer::new(100, 100, Colors::BLACK);
        draw_legend(&mut renderer, &[], 50.0, STYLE);
        assert_eq!(renderer.pixel(60, 50), Colors::BLACK);
    }
}
