//! Seeded procedural rendering used when no remote image is available.

use crate::{
    content::classifier::{classify, lookup},
    error::Result,
    imaging::ImageStage,
    models::{ContentCategory, ImageReference, ImageSource, Style},
};
use async_trait::async_trait;
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::io::Cursor;

pub type Palette = [[u8; 3]; 4];

/// The reference layout all shape sizes are expressed in.
const REFERENCE_SIZE: f32 = 512.0;

const KEYWORD_PALETTES: &[(&str, Palette)] = &[
    ("sunset", [[255, 165, 0], [255, 69, 0], [255, 20, 147], [138, 43, 226]]),
    ("ocean", [[0, 119, 190], [0, 168, 204], [127, 219, 255], [173, 216, 230]]),
    ("forest", [[34, 139, 34], [50, 205, 50], [144, 238, 144], [0, 100, 0]]),
    ("fire", [[255, 0, 0], [255, 165, 0], [255, 255, 0], [220, 20, 60]]),
    ("sky", [[135, 206, 235], [176, 224, 230], [173, 216, 230], [240, 248, 255]]),
    ("flower", [[255, 192, 203], [255, 20, 147], [255, 105, 180], [219, 112, 147]]),
    ("night", [[25, 25, 112], [72, 61, 139], [106, 90, 205], [123, 104, 238]]),
    ("gold", [[255, 215, 0], [255, 223, 0], [255, 255, 224], [240, 230, 140]]),
];

fn category_palette(category: ContentCategory) -> Option<Palette> {
    match category {
        ContentCategory::Food => Some([[210, 105, 30], [255, 140, 0], [255, 222, 173], [139, 69, 19]]),
        ContentCategory::People => Some([[255, 218, 185], [233, 150, 122], [205, 133, 63], [255, 240, 245]]),
        ContentCategory::Nature => Some([[34, 139, 34], [135, 206, 235], [107, 142, 35], [240, 255, 240]]),
        ContentCategory::Animal => Some([[160, 82, 45], [210, 180, 140], [245, 222, 179], [85, 107, 47]]),
        ContentCategory::Vehicle => Some([[178, 34, 34], [105, 105, 105], [192, 192, 192], [47, 79, 79]]),
        ContentCategory::Architecture => Some([[112, 128, 144], [169, 169, 169], [211, 211, 211], [70, 70, 70]]),
        ContentCategory::Technology => Some([[0, 0, 139], [30, 144, 255], [0, 206, 209], [25, 25, 25]]),
        ContentCategory::Fashion => Some([[199, 21, 133], [255, 182, 193], [0, 0, 0], [255, 250, 250]]),
        ContentCategory::General => None,
    }
}

fn style_palette(style: Style) -> Palette {
    match style {
        Style::Realistic => [[100, 100, 100], [150, 150, 150], [200, 200, 200], [250, 250, 250]],
        Style::Artistic => [[255, 99, 71], [255, 165, 0], [255, 215, 0], [50, 205, 50]],
        Style::Cartoon => [[255, 20, 147], [0, 191, 255], [50, 205, 50], [255, 165, 0]],
        Style::Vintage => [[139, 69, 19], [160, 82, 45], [210, 180, 140], [245, 245, 220]],
        Style::Modern => [[70, 130, 180], [100, 149, 237], [176, 196, 222], [230, 230, 250]],
    }
}

/// Colour keywords win, then the prompt's category, then the style default.
pub fn palette_for(prompt: &str, style: Style) -> Palette {
    lookup(prompt, KEYWORD_PALETTES)
        .copied()
        .or_else(|| category_palette(classify(prompt)))
        .unwrap_or_else(|| style_palette(style))
}

fn blend(a: [u8; 3], b: [u8; 3], ratio: f32) -> [u8; 3] {
    let mix = |x: u8, y: u8| (x as f32 * (1.0 - ratio) + y as f32 * ratio) as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

fn fill_rect(img: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: [u8; 3]) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    for y in y0.max(0)..y1.min(h) {
        for x in x0.max(0)..x1.min(w) {
            img.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }
}

fn fill_circle(img: &mut RgbImage, cx: i64, cy: i64, radius: i64, color: [u8; 3]) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let r2 = radius * radius;
    for y in (cy - radius).max(0)..(cy + radius + 1).min(h) {
        for x in (cx - radius).max(0)..(cx + radius + 1).min(w) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x as u32, y as u32, Rgb(color));
            }
        }
    }
}

/// Upward-pointing isosceles triangle inscribed in the box around (cx, cy).
fn fill_triangle(img: &mut RgbImage, cx: i64, cy: i64, half: i64, color: [u8; 3]) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    if half <= 0 {
        return;
    }
    let top = cy - half;
    for y in top.max(0)..(cy + half).min(h) {
        let span = (y - top) / 2;
        for x in (cx - span).max(0)..(cx + span + 1).min(w) {
            img.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }
}

/// Renders the procedural image for `prompt` in `style`.
///
/// Identical inputs always yield identical pixels.
pub fn render(prompt: &str, style: Style, seed: u64, width: u32, height: u32) -> RgbImage {
    let colors = palette_for(prompt, style);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    let (w, h) = (width as i64, height as i64);
    let scale = width.min(height) as f32 / REFERENCE_SIZE;
    let scaled = |v: i64| ((v as f32) * scale).round() as i64;

    match style {
        Style::Realistic => {
            for y in 0..height {
                let color = blend(colors[0], colors[1], y as f32 / height as f32);
                for x in 0..width {
                    img.put_pixel(x, y, Rgb(color));
                }
            }
        }
        Style::Artistic => {
            for _ in 0..20 {
                let x = rng.gen_range(0..=w);
                let y = rng.gen_range(0..=h);
                let size = scaled(rng.gen_range(20..=100));
                let color = colors[rng.gen_range(0..colors.len())];
                fill_circle(&mut img, x, y, size / 2, color);
            }
        }
        Style::Cartoon => {
            let margin = scaled(50);
            for _ in 0..15 {
                let x = rng.gen_range(margin..=(w - margin).max(margin));
                let y = rng.gen_range(margin..=(h - margin).max(margin));
                let half = scaled(rng.gen_range(30..=80)) / 2;
                let color = colors[rng.gen_range(0..colors.len())];
                match rng.gen_range(0..3) {
                    0 => fill_circle(&mut img, x, y, half, color),
                    1 => fill_rect(&mut img, x - half, y - half, x + half, y + half, color),
                    _ => fill_triangle(&mut img, x, y, half, color),
                }
            }
        }
        Style::Vintage => {
            let base = colors[0];
            let cell = 4;
            for y in (0..h).step_by(cell) {
                for x in (0..w).step_by(cell) {
                    let noise: i16 = rng.gen_range(-20..=20);
                    let shade = |c: u8| (c as i16 + noise).clamp(0, 255) as u8;
                    let color = [shade(base[0]), shade(base[1]), shade(base[2])];
                    fill_rect(&mut img, x, y, x + cell as i64, y + cell as i64, color);
                }
            }
        }
        Style::Modern => {
            let band = (h + 7) / 8;
            for i in 0..8 {
                let y = i * band;
                fill_rect(&mut img, 0, y, w, y + band, colors[i as usize % colors.len()]);
            }
        }
    }

    img
}

pub fn render_png(prompt: &str, style: Style, seed: u64, width: u32, height: u32) -> Result<Vec<u8>> {
    let img = render(prompt, style, seed, width, height);
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}

/// Local stage: renders a PNG from the prompt's palette.
pub struct SyntheticStage {
    width: u32,
    height: u32,
}

impl SyntheticStage {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[async_trait]
impl ImageStage for SyntheticStage {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn source(&self) -> ImageSource {
        ImageSource::LocalSynthetic
    }

    async fn attempt(&self, prompt: &str, style: Style, seed: u64) -> Result<ImageReference> {
        let png = render_png(prompt, style, seed, self.width, self.height)?;
        Ok(ImageReference::inline("image/png", png))
    }
}
