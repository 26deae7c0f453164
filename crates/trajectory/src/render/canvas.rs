use crate::error::Result;

use ab_glyph::{FontVec, PxScale};
use font_kit::{family_name::FamilyName, properties::Properties, source::SystemSource};
use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::{
    drawing::{
        draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut, draw_polygon_mut,
        draw_text_mut, text_size,
    },
    point::Point,
    rect::Rect,
};
use log::warn;
use std::path::Path;

/// Pixel coordinates are clamped to this range before casting so that
/// imageproc never does arithmetic near `i32::MAX`
const PX_LIMIT: f64 = 1.0e6;

#[inline]
fn to_px_i32(value: f64) -> i32 {
    value.round().clamp(-PX_LIMIT, PX_LIMIT) as i32
}

/// 画像描画用のコンテキスト構造体
///
/// One renderer is created per plot call and dropped when the call returns.
pub struct Renderer {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
    /// `None` when no system font is available; text is then skipped
    pub font: Option<FontVec>,
}

impl Renderer {
    /// 新しいレンダラーを作成
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        let image = ImageBuffer::from_pixel(width, height, background);

        let font = load_system_font();
        if font.is_none() {
            warn!("no system font found, text will not be drawn");
        }

        Self {
            image,
            width,
            height,
            font,
        }
    }

    /// 矩形を描画（塗りつぶし）
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb<u8>) {
        let rect = Rect::at(to_px_i32(x), to_px_i32(y))
            .of_size(
            width.round().clamp(1.0, PX_LIMIT) as u32,
            height.round().clamp(1.0, PX_LIMIT) as u32,
        );
        draw_filled_rect_mut(&mut self.image, rect, color);
    }

    /// 矩形の境界線を描画
    pub fn draw_rect_outline(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        line_width: f64,
        color: Rgb<u8>,
    ) {
        let (x1, y1) = (x + width, y + height);
        self.draw_line((x, y), (x1, y), line_width, color);
        self.draw_line((x1, y), (x1, y1), line_width, color);
        self.draw_line((x1, y1), (x, y1), line_width, color);
        self.draw_line((x, y1), (x, y), line_width, color);
    }

    /// 線分を描画。太さ1px超は四角形として塗る
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), line_width: f64, color: Rgb<u8>) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = dx.hypot(dy);

        if line_width <= 1.0 || len < f64::EPSILON {
            draw_line_segment_mut(
                &mut self.image,
                (to_px_i32(from.0) as f32, to_px_i32(from.1) as f32),
                (to_px_i32(to.0) as f32, to_px_i32(to.1) as f32),
                color,
            );
            return;
        }

        let half = line_width / 2.0;
        let (nx, ny) = (-dy / len * half, dx / len * half);
        self.fill_polygon(
            &[
                (from.0 + nx, from.1 + ny),
                (to.0 + nx, to.1 + ny),
                (to.0 - nx, to.1 - ny),
                (from.0 - nx, from.1 - ny),
            ],
            color,
        );
    }

    /// 円を描画（塗りつぶし）
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb<u8>) {
        draw_filled_circle_mut(
            &mut self.image,
            (to_px_i32(cx), to_px_i32(cy)),
            to_px_i32(radius),
            color,
        );
    }

    /// 多角形を描画（塗りつぶし）
    pub fn fill_polygon(&mut self, vertices: &[(f64, f64)], color: Rgb<u8>) {
        let mut poly: Vec<Point<i32>> = Vec::with_capacity(vertices.len());
        for &(x, y) in vertices {
            let p = Point::new(to_px_i32(x), to_px_i32(y));
            if poly.last() != Some(&p) {
                poly.push(p);
            }
        }
        // imageproc rejects polygons that are closed explicitly
        while poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }

        match poly.len() {
            0 => {}
            1 | 2 => {
                let (a, b) = (poly[0], poly[poly.len() - 1]);
                draw_line_segment_mut(
                    &mut self.image,
                    (a.x as f32, a.y as f32),
                    (b.x as f32, b.y as f32),
                    color,
                );
            }
            _ => draw_polygon_mut(&mut self.image, &poly, color),
        }
    }

    /// 5角の星を描画
    pub fn fill_star(&mut self, cx: f64, cy: f64, outer_radius: f64, color: Rgb<u8>) {
        let inner_radius = outer_radius * 0.382;
        let vertices: Vec<(f64, f64)> = (0..10)
            .map(|i| {
                let r = if i % 2 == 0 { outer_radius } else { inner_radius };
                let angle = -std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::PI / 5.0;
                (cx + r * angle.cos(), cy + r * angle.sin())
            })
            .collect();
        self.fill_polygon(&vertices, color);
    }

    /// テキストを描画
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, font_size: f64, color: Rgb<u8>) {
        let Some(font) = &self.font else {
            return;
        };
        let scale = PxScale::from(font_size as f32);
        draw_text_mut(
            &mut self.image,
            color,
            to_px_i32(x),
            to_px_i32(y),
            scale,
            font,
            text,
        );
    }

    /// テキスト幅（px）。フォントがない場合は文字数から概算
    pub fn text_width(&self, text: &str, font_size: f64) -> f64 {
        match &self.font {
            Some(font) => text_size(PxScale::from(font_size as f32), font, text).0 as f64,
            None => text.chars().count() as f64 * font_size * 0.55,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    /// 画像を保存
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }
}

/// システムフォントを読み込み
fn load_system_font() -> Option<FontVec> {
    let source = SystemSource::new();

    let font_families = [
        FamilyName::Title("Arial".to_string()),
        FamilyName::Title("Helvetica".to_string()),
        FamilyName::Title("DejaVu Sans".to_string()),
        FamilyName::SansSerif,
    ];

    for family in font_families {
        if let Ok(handle) = source.select_best_match(&[family], &Properties::new())
            && let Ok(font_kit_font) = handle.load()
            && let Some(font_bytes) = font_kit_font.copy_font_data()
            && let Ok(font) = FontVec::try_from_vec(font_bytes.to_vec())
        {
            return Some(font);
        }
    }
    None
}
