use super::canvas::Renderer;
use super::colors::{Colors, color_of};
use super::field::{AxisStyle, draw_axes, draw_field, draw_title};
use super::legend::{LegendEntry, LegendStyle, Swatch, draw_legend};
use super::{RenderOptions, Viewport, ensure_parent_dir, plot_title};
use crate::constants::{
    ARROW_HEAD_LENGTH, ARROW_HEAD_WIDTH, BALL_LANDING_LABEL, FIELD_VIEW_X, FIELD_VIEW_Y,
    MULTI_DEFAULT_TITLE,
};
use crate::error::Result;
use crate::extract::PlayPoints;
use crate::tracking::{LandingPoint, PlaySelection, Point, Trajectory};

use image::Rgb;
use log::{debug, info};
use std::path::Path;

const LINE_WIDTH: f64 = 2.0;
const MARKER_RADIUS: f64 = 3.0;
const STAR_RADIUS: f64 = 14.0;
const STAR_EDGE: f64 = 3.0;

/// Input of the multi-trajectory field plot
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiPlot<'a> {
    pub trajectories: &'a [Trajectory],
    pub ball_land: Option<LandingPoint>,
    pub game_id: Option<i64>,
    pub play_id: Option<i64>,
    pub labels: Option<&'a [String]>,
}

impl<'a> MultiPlot<'a> {
    /// Plot of an aggregated play
    pub fn from_play(points: &'a PlayPoints, selection: PlaySelection) -> Self {
        Self {
            trajectories: &points.trajectories,
            ball_land: points.ball_land,
            game_id: Some(selection.game_id),
            play_id: Some(selection.play_id),
            labels: Some(points.labels.as_slice()),
        }
    }

    /// `labels[i]` when given and in range, else "Player {i+1}"
    pub fn label(&self, index: usize) -> String {
        self.labels
            .and_then(|labels| labels.get(index))
            .cloned()
            .unwrap_or_else(|| format!("Player {}", index + 1))
    }

    pub fn title(&self) -> String {
        plot_title(self.game_id, self.play_id, MULTI_DEFAULT_TITLE)
    }

    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        let mut entries: Vec<LegendEntry> = (0..self.trajectories.len())
            .map(|i| LegendEntry::new(self.label(i), Swatch::LineMarker(color_of(i))))
            .collect();
        if self.ball_land.is_some() {
            entries.push(LegendEntry::new(
                BALL_LANDING_LABEL,
                Swatch::Star(Colors::YELLOW),
            ));
        }
        entries
    }
}

/// フィールド上に複数の軌跡を描画し、レンダラーを返す
pub fn render_multiple(plot: &MultiPlot<'_>, opt: &RenderOptions) -> Renderer {
    let mut renderer = Renderer::new(opt.width_px, opt.height_px, Colors::FIGURE_BG);
    let vp = opt.viewport(FIELD_VIEW_X, FIELD_VIEW_Y);

    draw_field(&mut renderer, &vp);

    for (i, trajectory) in plot.trajectories.iter().enumerate() {
        let color = color_of(i);
        draw_trajectory(&mut renderer, &vp, trajectory, color);

        if trajectory.len() >= 2 {
            let from = trajectory[trajectory.len() - 2].coords();
            let to = trajectory[trajectory.len() - 1].coords();
            match from.zip(to) {
                Some((from, to)) => draw_arrow(&mut renderer, &vp, from, to, color),
                None => debug!("trajectory {} ends with a missing point, no arrow", i),
            }
        } else {
            debug!("trajectory {} has {} point(s), no arrow", i, trajectory.len());
        }
    }

    // ボール落下地点（軌跡より上に描画）
    if let Some(land) = plot.ball_land {
        let (px, py) = vp.to_px(land.x, land.y);
        if vp.contains_px((px, py)) {
            renderer.fill_star(px, py, STAR_RADIUS, Colors::BLACK);
            renderer.fill_star(px, py, STAR_RADIUS - STAR_EDGE, Colors::YELLOW);
        } else {
            debug!("ball landing ({}, {}) is outside the field view", land.x, land.y);
        }
    }

    draw_axes(
        &mut renderer,
        &vp,
        20.0,
        10.0,
        AxisStyle {
            text: Colors::WHITE,
            spine: Colors::BLACK,
            grid: None,
        },
    );
    draw_title(&mut renderer, &vp, &plot.title(), Colors::WHITE);
    draw_legend(
        &mut renderer,
        &plot.legend_entries(),
        opt.legend_x(),
        LegendStyle {
            background: Colors::FIGURE_BG,
            edge: Colors::WHITE,
            text: Colors::WHITE,
        },
    );

    renderer
}

/// Renders the field plot and writes it to `output_path` (PNG)
pub fn plot_multiple_points<P: AsRef<Path>>(
    plot: &MultiPlot<'_>,
    opt: &RenderOptions,
    output_path: P,
) -> Result<()> {
    let output_path = output_path.as_ref();
    ensure_parent_dir(output_path)?;

    let renderer = render_multiple(plot, opt);
    renderer.save(output_path)?;

    info!(
        "wrote {} ({} trajectories)",
        output_path.display(),
        plot.trajectories.len()
    );
    Ok(())
}

/// 線と点マーカーで軌跡を描画。欠損点で線は途切れる
fn draw_trajectory(renderer: &mut Renderer, vp: &Viewport, trajectory: &[Point], color: Rgb<u8>) {
    let pixels: Vec<Option<(f64, f64)>> = trajectory
        .iter()
        .map(|p| p.coords().map(|(x, y)| vp.to_px(x, y)))
        .collect();

    for pair in pixels.windows(2) {
        if let [Some(a), Some(b)] = pair
            && let Some((a, b)) = vp.clip_segment(*a, *b)
        {
            renderer.draw_line(a, b, LINE_WIDTH, color);
        }
    }
    for &(px, py) in pixels.iter().flatten() {
        if vp.contains_px((px, py)) {
            renderer.fill_circle(px, py, MARKER_RADIUS, color);
        }
    }
}

/// 最後の区間に矢印を描画。矢じりは終点の先に伸びる
fn draw_arrow(
    renderer: &mut Renderer,
    vp: &Viewport,
    from: (f64, f64),
    to: (f64, f64),
    color: Rgb<u8>,
) {
    if let Some((a, b)) = vp.clip_segment(vp.to_px(from.0, from.1), vp.to_px(to.0, to.1)) {
        renderer.draw_line(a, b, LINE_WIDTH, color);
    }

    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = dx.hypot(dy);
    if len == 0.0 {
        return;
    }
    let (ux, uy) = (dx / len, dy / len);
    let (nx, ny) = (-uy * ARROW_HEAD_WIDTH / 2.0, ux * ARROW_HEAD_WIDTH / 2.0);

    let tip = vp.to_px(to.0 + ux * ARROW_HEAD_LENGTH, to.1 + uy * ARROW_HEAD_LENGTH);
    let left = vp.to_px(to.0 + nx, to.1 + ny);
    let right = vp.to_px(to.0 - nx, to.1 - ny);
    // the head is only drawn when it lies entirely inside the view
    if [left, tip, right].into_iter().all(|p| vp.contains_px(p)) {
        renderer.fill_polygon(&[left, tip, right], color);
    }
}
