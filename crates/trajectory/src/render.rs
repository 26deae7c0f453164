pub mod canvas;
pub mod colors;
pub mod field;
pub mod legend;
pub mod multi;
pub mod single;

pub use canvas::Renderer;
pub use colors::{Colors, TAB10, color_of};
pub use multi::{MultiPlot, plot_multiple_points, render_multiple};
pub use single::{SinglePlot, plot_single_trajectory, render_single};

use crate::constants::{
    DEFAULT_HEIGHT_PX, DEFAULT_LEGEND_WIDTH_PX, DEFAULT_WIDTH_PX, MARGIN_BOTTOM, MARGIN_LEFT,
    MARGIN_RIGHT, MARGIN_TOP,
};
use crate::tracking::PlaySelection;

use chrono::Local;
use std::path::{Path, PathBuf};

/// Image size settings shared by both plots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub width_px: u32,
    pub height_px: u32,
    /// legend panel on the right of the plot area
    pub legend_width_px: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_WIDTH_PX,
            height_px: DEFAULT_HEIGHT_PX,
            legend_width_px: DEFAULT_LEGEND_WIDTH_PX,
        }
    }
}

impl RenderOptions {
    /// データ座標の描画領域
    pub fn viewport(&self, x_range: (f64, f64), y_range: (f64, f64)) -> Viewport {
        let width = self.width_px as f64 - MARGIN_LEFT - MARGIN_RIGHT - self.legend_width_px as f64;
        let height = self.height_px as f64 - MARGIN_TOP - MARGIN_BOTTOM;
        Viewport {
            x_range,
            y_range,
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Left edge of the legend panel
    pub fn legend_x(&self) -> f64 {
        (self.width_px - self.legend_width_px.min(self.width_px)) as f64
    }
}

/// Maps data coordinates (yards) to pixels. Y grows upwards in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[inline]
    pub fn to_px(&self, x: f64, y: f64) -> (f64, f64) {
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        let px_x = self.left + (x - x0) / (x1 - x0) * self.width;
        let px_y = self.top + (y1 - y) / (y1 - y0) * self.height;
        (px_x, px_y)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// True when the pixel lies inside the plot area
    pub fn contains_px(&self, (px, py): (f64, f64)) -> bool {
        (self.left..=self.right()).contains(&px) && (self.top..=self.bottom()).contains(&py)
    }

    /// Clips a pixel segment to the plot area (Liang-Barsky).
    /// `None` when no part of the segment is inside.
    pub fn clip_segment(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Option<((f64, f64), (f64, f64))> {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

        for (p, q) in [
            (-dx, from.0 - self.left),
            (dx, self.right() - from.0),
            (-dy, from.1 - self.top),
            (dy, self.bottom() - from.1),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((
            (from.0 + t0 * dx, from.1 + t0 * dy),
            (from.0 + t1 * dx, from.1 + t1 * dy),
        ))
    }
}

/// "Game: g, Play: p" when both ids are given and non-zero
pub fn plot_title(game_id: Option<i64>, play_id: Option<i64>, default: &str) -> String {
    match (game_id, play_id) {
        (Some(game_id), Some(play_id)) if game_id != 0 && play_id != 0 => {
            PlaySelection::new(game_id, play_id).to_string()
        }
        _ => default.to_string(),
    }
}

/// `<dir>/game_<g>_play_<p>[_player_<id>]_<timestamp>.png`
pub fn default_output_path<P: AsRef<Path>>(
    output_dir: P,
    selection: PlaySelection,
    nfl_id: Option<i64>,
) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = match nfl_id {
        Some(id) => format!(
            "game_{}_play_{}_player_{}_{}.png",
            selection.game_id, selection.play_id, id, timestamp
        ),
        None => format!(
            "game_{}_play_{}_{}.png",
            selection.game_id, selection.play_id, timestamp
        ),
    };
    output_dir.as_ref().join(filename)
}

/// Creates the parent directory of `path` if needed
fn ensure_parent_dir(path: &Path) -> crate::error::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FIELD_VIEW_X, FIELD_VIEW_Y};

    #[test]
    fn test_title_rule() {
        assert_eq!(plot_title(Some(100), Some(7), "T"), "Game: 100, Play: 7");
        assert_eq!(plot_title(Some(100), None, "T"), "T");
        assert_eq!(plot_title(None, Some(7), "T"), "T");
        assert_eq!(plot_title(Some(0), Some(7), "T"), "T");
        assert_eq!(plot_title(Some(100), Some(0), "T"), "T");
    }

    #[test]
    fn test_viewport_corners() {
        let vp = RenderOptions::default().viewport(FIELD_VIEW_X, FIELD_VIEW_Y);
        let (x0, y0) = vp.to_px(FIELD_VIEW_X.0, FIELD_VIEW_Y.1);
        assert!((x0 - vp.left).abs() < 1e-9);
        assert!((y0 - vp.top).abs() < 1e-9);
        let (x1, y1) = vp.to_px(FIELD_VIEW_X.1, FIELD_VIEW_Y.0);
        assert!((x1 - vp.right()).abs() < 1e-9);
        assert!((y1 - vp.bottom()).abs() < 1e-9);
    }

    #[test]
    fn test_clip_segment() {
        let vp = RenderOptions::default().viewport(FIELD_VIEW_X, FIELD_VIEW_Y);
        let mid_y = vp.top + vp.height / 2.0;

        // fully inside: unchanged
        let inside = ((100.0, mid_y), (200.0, mid_y));
        assert_eq!(vp.clip_segment(inside.0, inside.1), Some(inside));

        // crosses the left edge
        let (a, b) = vp.clip_segment((0.0, mid_y), (200.0, mid_y)).unwrap();
        assert!((a.0 - vp.left).abs() < 1e-9);
        assert_eq!(b, (200.0, mid_y));

        // huge values are clipped to both edges
        let (a, b) = vp.clip_segment((-1e15, mid_y), (1e15, mid_y)).unwrap();
        assert!((a.0 - vp.left).abs() < 1.0);
        assert!((b.0 - vp.right()).abs() < 1.0);

        // fully outside
        assert_eq!(vp.clip_segment((0.0, 0.0), (10.0, 10.0)), None);
        assert_eq!(vp.clip_segment((10.0, mid_y), (10.0, mid_y)), None);
    }

    #[test]
    fn test_contains_px() {
        let vp = RenderOptions::default().viewport(FIELD_VIEW_X, FIELD_VIEW_Y);
        assert!(vp.contains_px(vp.to_px(60.0, 20.0)));
        assert!(!vp.contains_px(vp.to_px(-15.0, 20.0)));
        assert!(!vp.contains_px(vp.to_px(60.0, 1e12)));
    }

    #[test]
    fn test_viewport_leaves_room_for_legend() {
        let opt = RenderOptions::default();
        let vp = opt.viewport(FIELD_VIEW_X, FIELD_VIEW_Y);
        assert!(vp.right() <= opt.legend_x());
    }

    #[test]
    fn test_default_output_path() {
        let path = default_output_path("figs", PlaySelection::new(100, 7), None);
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(path.starts_with("figs"));
        assert!(name.starts_with("game_100_play_7_"));
        assert!(name.ends_with(".png"));

        let path = default_output_path("figs", PlaySelection::new(100, 7), Some(42));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("game_100_play_7_player_42_"));
    }
}
