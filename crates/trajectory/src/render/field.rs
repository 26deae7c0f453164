use super::canvas::Renderer;
use super::colors::{Colors, blend};
use super::Viewport;
use crate::constants::{
    ENDZONE_DEPTH, FIELD_LENGTH, FIELD_WIDTH, LABEL_FONT_SIZE, TICK_FONT_SIZE, TITLE_FONT_SIZE,
    YARD_LINE_STEP,
};

use image::Rgb;

/// Axis decoration colors
#[derive(Debug, Clone, Copy)]
pub struct AxisStyle {
    pub text: Rgb<u8>,
    pub spine: Rgb<u8>,
    /// grid line color, `None` for no grid
    pub grid: Option<Rgb<u8>>,
}

/// Data-space rectangle filled on the canvas
fn fill_data_rect(
    renderer: &mut Renderer,
    vp: &Viewport,
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    color: Rgb<u8>,
) {
    let (px0, py1) = vp.to_px(x0, y1);
    let (px1, py0) = vp.to_px(x1, y0);
    renderer.fill_rect(px0, py1, px1 - px0, py0 - py1, color);
}

/// フィールド背景を描画（フィールド、エンドゾーン、ヤードライン、サイドライン）
pub fn draw_field(renderer: &mut Renderer, vp: &Viewport) {
    // 描画領域全体をフィールド色で塗る
    renderer.fill_rect(vp.left, vp.top, vp.width, vp.height, Colors::FIELD_GREEN);

    // フィールド本体と白枠
    fill_data_rect(
        renderer,
        vp,
        (0.0, 0.0),
        (FIELD_LENGTH, FIELD_WIDTH),
        Colors::FIELD_GREEN,
    );
    let (fx0, fy1) = vp.to_px(0.0, FIELD_WIDTH);
    let (fx1, fy0) = vp.to_px(FIELD_LENGTH, 0.0);
    renderer.draw_rect_outline(fx0, fy1, fx1 - fx0, fy0 - fy1, 2.0, Colors::WHITE);

    // エンドゾーン（枠線の上に重なる）
    fill_data_rect(
        renderer,
        vp,
        (-ENDZONE_DEPTH, 0.0),
        (0.0, FIELD_WIDTH),
        Colors::ENDZONE_GREEN,
    );
    fill_data_rect(
        renderer,
        vp,
        (FIELD_LENGTH, 0.0),
        (FIELD_LENGTH + ENDZONE_DEPTH, FIELD_WIDTH),
        Colors::ENDZONE_GREEN,
    );

    // ヤードライン（半透明の白）
    let yard_line = blend(Colors::WHITE, Colors::FIELD_GREEN, 0.5);
    for yard in (0..=FIELD_LENGTH as usize).step_by(YARD_LINE_STEP) {
        let top = vp.to_px(yard as f64, FIELD_WIDTH);
        let bottom = vp.to_px(yard as f64, 0.0);
        renderer.draw_line(top, bottom, 1.0, yard_line);
    }

    // サイドライン
    for y in [0.0, FIELD_WIDTH] {
        let from = vp.to_px(0.0, y);
        let to = vp.to_px(FIELD_LENGTH, y);
        renderer.draw_line(from, to, 2.0, Colors::WHITE);
    }
}

/// Tick positions: multiples of `step` inside `range`
pub fn ticks((lo, hi): (f64, f64), step: f64) -> Vec<f64> {
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn tick_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// 枠線、目盛り、軸ラベル（必要ならグリッド）を描画
pub fn draw_axes(
    renderer: &mut Renderer,
    vp: &Viewport,
    x_step: f64,
    y_step: f64,
    style: AxisStyle,
) {
    let x_ticks = ticks(vp.x_range, x_step);
    let y_ticks = ticks(vp.y_range, y_step);

    if let Some(grid) = style.grid {
        for &x in &x_ticks {
            renderer.draw_line(vp.to_px(x, vp.y_range.0), vp.to_px(x, vp.y_range.1), 1.0, grid);
        }
        for &y in &y_ticks {
            renderer.draw_line(vp.to_px(vp.x_range.0, y), vp.to_px(vp.x_range.1, y), 1.0, grid);
        }
    }

    renderer.draw_rect_outline(vp.left, vp.top, vp.width, vp.height, 1.0, style.spine);

    let tick_len = 4.0;
    for &x in &x_ticks {
        let (px, _) = vp.to_px(x, 0.0);
        let bottom = vp.bottom();
        renderer.draw_line((px, bottom), (px, bottom + tick_len), 1.0, style.text);

        let label = tick_label(x);
        let w = renderer.text_width(&label, TICK_FONT_SIZE);
        renderer.draw_text(px - w / 2.0, bottom + 6.0, &label, TICK_FONT_SIZE, style.text);
    }
    for &y in &y_ticks {
        let (_, py) = vp.to_px(0.0, y);
        renderer.draw_line((vp.left - tick_len, py), (vp.left, py), 1.0, style.text);

        let label = tick_label(y);
        let w = renderer.text_width(&label, TICK_FONT_SIZE);
        renderer.draw_text(
            vp.left - tick_len - 3.0 - w,
            py - TICK_FONT_SIZE / 2.0,
            &label,
            TICK_FONT_SIZE,
            style.text,
        );
    }

    // 軸ラベル。回転テキストは描けないのでY軸ラベルは左上に置く
    let x_label = "X (yards)";
    let w = renderer.text_width(x_label, LABEL_FONT_SIZE);
    renderer.draw_text(
        vp.left + vp.width / 2.0 - w / 2.0,
        vp.bottom() + 24.0,
        x_label,
        LABEL_FONT_SIZE,
        style.text,
    );
    renderer.draw_text(
        4.0,
        vp.top - LABEL_FONT_SIZE - 2.0,
        "Y (yards)",
        LABEL_FONT_SIZE,
        style.text,
    );
}

/// タイトルを描画領域の上に中央寄せで描画
pub fn draw_title(renderer: &mut Renderer, vp: &Viewport, title: &str, color: Rgb<u8>) {
    let w = renderer.text_width(title, TITLE_FONT_SIZE);
    renderer.draw_text(
        vp.left + vp.width / 2.0 - w / 2.0,
        vp.top - TITLE_FONT_SIZE - 12.0,
        title,
        TITLE_FONT_SIZE,
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FIELD_VIEW_X, FIELD_VIEW_Y};
    use crate::render::RenderOptions;

    #[test]
    fn test_ticks() {
        assert_eq!(
            ticks((-10.0, 130.0), 20.0),
            vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0]
        );
        assert_eq!(
            ticks((-5.0, 58.3), 10.0),
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]
        );
    }

    #[test]
    fn test_tick_labels() {
        assert_eq!(tick_label(20.0), "20");
        assert_eq!(tick_label(-10.0), "-10");
        assert_eq!(tick_label(2.5), "2.5");
    }

    #[test]
    fn test_field_colors() {
        let opt = RenderOptions::default();
        let vp = opt.viewport(FIELD_VIEW_X, FIELD_VIEW_Y);
        let mut renderer = Renderer::new(opt.width_px, opt.height_px, Colors::FIGURE_BG);
        draw_field(&mut renderer, &vp);

        let at = |x: f64, y: f64| {
            let (px, py) = vp.to_px(x, y);
            renderer.pixel(px.round() as u32, py.round() as u32)
        };
        assert_eq!(at(65.0, 26.0), Colors::FIELD_GREEN);
        assert_eq!(at(-5.0, 26.0), Colors::ENDZONE_GREEN);
        assert_eq!(at(125.0, 26.0), Colors::ENDZONE_GREEN);
        assert_eq!(at(60.0, 26.0), blend(Colors::WHITE, Colors::FIELD_GREEN, 0.5));
        assert_eq!(at(65.0, 0.0), Colors::WHITE);
        assert_eq!(at(65.0, FIELD_WIDTH), Colors::WHITE);
        // margin outside the field keeps the axes face color
        assert_eq!(at(65.0, -3.0), Colors::FIELD_GREEN);
        // figure background outside the axes
        assert_eq!(renderer.pixel(2, 2), Colors::FIGURE_BG);
    }
}
