use super::canvas::Renderer;
use super::colors::{Colors, blend};
use super::field::{AxisStyle, draw_axes, draw_title};
use super::legend::{LegendEntry, LegendStyle, Swatch, draw_legend};
use super::{RenderOptions, ensure_parent_dir, plot_title};
use crate::constants::{SINGLE_DEFAULT_TITLE, SINGLE_VIEW_X, SINGLE_VIEW_Y};
use crate::error::{Result, TrajError};
use crate::tracking::Point;

use log::{info, warn};
use std::path::Path;

const MARKER_RADIUS: f64 = 3.0;
const ENDPOINT_RADIUS: f64 = 7.0;

/// Input of the single trajectory plot
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePlot<'a> {
    pub points: &'a [Point],
    pub game_id: Option<i64>,
    pub play_id: Option<i64>,
}

impl SinglePlot<'_> {
    pub fn title(&self) -> String {
        plot_title(self.game_id, self.play_id, SINGLE_DEFAULT_TITLE)
    }

    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        vec![
            LegendEntry::new("Start", Swatch::Marker(Colors::GREEN)),
            LegendEntry::new("End", Swatch::Marker(Colors::RED)),
        ]
    }
}

/// 1人分の軌跡を座標グリッド上に描画し、レンダラーを返す
///
/// # Errors
/// `TrajError::EmptyTrajectory` when `plot.points` is empty
pub fn render_single(plot: &SinglePlot<'_>, opt: &RenderOptions) -> Result<Renderer> {
    let (Some(first), Some(last)) = (plot.points.first(), plot.points.last()) else {
        return Err(TrajError::EmptyTrajectory);
    };

    let mut renderer = Renderer::new(opt.width_px, opt.height_px, Colors::WHITE);
    let vp = opt.viewport(SINGLE_VIEW_X, SINGLE_VIEW_Y);

    draw_axes(
        &mut renderer,
        &vp,
        20.0,
        10.0,
        AxisStyle {
            text: Colors::BLACK,
            spine: Colors::BLACK,
            grid: Some(blend(Colors::GRID_GRAY, Colors::WHITE, 0.3)),
        },
    );

    let pixels: Vec<Option<(f64, f64)>> = plot
        .points
        .iter()
        .map(|p| p.coords().map(|(x, y)| vp.to_px(x, y)))
        .collect();
    for pair in pixels.windows(2) {
        if let [Some(a), Some(b)] = pair
            && let Some((a, b)) = vp.clip_segment(*a, *b)
        {
            renderer.draw_line(a, b, 1.0, Colors::BLUE);
        }
    }
    for &(px, py) in pixels.iter().flatten() {
        if vp.contains_px((px, py)) {
            renderer.fill_circle(px, py, MARKER_RADIUS, Colors::BLUE);
        }
    }

    // 始点と終点（1点だけなら同じ位置に重なる）
    for (point, color, name) in [(first, Colors::GREEN, "start"), (last, Colors::RED, "end")] {
        match point.coords() {
            Some((x, y)) => {
                let (px, py) = vp.to_px(x, y);
                if vp.contains_px((px, py)) {
                    renderer.fill_circle(px, py, ENDPOINT_RADIUS, color);
                }
            }
            None => warn!("{} point has a missing coordinate, marker skipped", name),
        }
    }

    draw_title(&mut renderer, &vp, &plot.title(), Colors::BLACK);
    draw_legend(
        &mut renderer,
        &plot.legend_entries(),
        opt.legend_x(),
        LegendStyle {
            background: Colors::WHITE,
            edge: Colors::LEGEND_EDGE,
            text: Colors::BLACK,
        },
    );

    Ok(renderer)
}

/// Renders one trajectory and writes it to `output_path` (PNG)
pub fn plot_single_trajectory<P: AsRef<Path>>(
    plot: &SinglePlot<'_>,
    opt: &RenderOptions,
    output_path: P,
) -> Result<()> {
    let output_path = output_path.as_ref();
    let renderer = render_single(plot, opt)?;

    ensure_parent_dir(output_path)?;
    renderer.save(output_path)?;

    info!(
        "wrote {} ({} points)",
        output_path.display(),
        plot.points.len()
    );
    Ok(())
}
