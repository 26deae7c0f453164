use image::Rgb;

/// 色定義
pub struct Colors;

impl Colors {
    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const FIGURE_BG: Rgb<u8> = Rgb([0x1a, 0x1a, 0x1a]); // 図の背景（ほぼ黒）
    pub const FIELD_GREEN: Rgb<u8> = Rgb([0x2d, 0x50, 0x16]); // フィールド
    pub const ENDZONE_GREEN: Rgb<u8> = Rgb([0x1a, 0x3d, 0x0a]); // エンドゾーン（濃い緑）
    pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
    pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
    pub const GREEN: Rgb<u8> = Rgb([0, 128, 0]);
    pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
    pub const GRID_GRAY: Rgb<u8> = Rgb([0xb0, 0xb0, 0xb0]);
    pub const LEGEND_EDGE: Rgb<u8> = Rgb([0xcc, 0xcc, 0xcc]);
}

/// 10色のカテゴリカルパレット
pub const TAB10: [Rgb<u8>; 10] = [
    Rgb([0x1f, 0x77, 0xb4]), // blue
    Rgb([0xff, 0x7f, 0x0e]), // orange
    Rgb([0x2c, 0xa0, 0x2c]), // green
    Rgb([0xd6, 0x27, 0x28]), // red
    Rgb([0x94, 0x67, 0xbd]), // purple
    Rgb([0x8c, 0x56, 0x4b]), // brown
    Rgb([0xe3, 0x77, 0xc2]), // pink
    Rgb([0x7f, 0x7f, 0x7f]), // gray
    Rgb([0xbc, 0xbd, 0x22]), // olive
    Rgb([0x17, 0xbe, 0xcf]), // cyan
];

/// Color of the i-th trajectory. Wraps around the palette.
pub fn color_of(index: usize) -> Rgb<u8> {
    TAB10[index % TAB10.len()]
}

/// `fg` drawn with opacity `alpha` over `bg`
pub fn blend(fg: Rgb<u8>, bg: Rgb<u8>, alpha: f64) -> Rgb<u8> {
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (f as f64 * alpha + b as f64 * (1.0 - alpha)).round() as u8;
    Rgb([
        mix(fg.0[0], bg.0[0]),
        mix(fg.0[1], bg.0[1]),
        mix(fg.0[2], bg.0[2]),
    ])
}
