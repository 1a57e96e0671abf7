//! Raster surface backed by tiny-skia.

use image::RgbaImage;
use tiny_skia::{FillRule, IntSize, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};

use super::{Style, Surface};

/// Draws into a tiny-skia pixmap.
///
/// Pixel data is exchanged with [`RgbaImage`] as-is, which is exact for the
/// opaque photos this is used on. Text labels are not rasterised.
pub struct PixmapSurface {
    pixmap: Pixmap,
    style: Style,
}

impl PixmapSurface {
    /// A transparent surface. Returns `None` for a zero-sized request.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            style: Style::default(),
        })
    }

    /// A surface holding a copy of `img`.
    pub fn from_image(img: &RgbaImage) -> Option<Self> {
        let size = IntSize::from_wh(img.width(), img.height())?;
        Some(Self {
            pixmap: Pixmap::from_vec(img.as_raw().clone(), size)?,
            style: Style::default(),
        })
    }

    /// Hands the pixels back as an image.
    pub fn into_image(self) -> Option<RgbaImage> {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        RgbaImage::from_raw(w, h, self.pixmap.take())
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        let alpha = (self.style.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        paint.set_color_rgba8(self.style.color.r, self.style.color.g, self.style.color.b, alpha);
        paint.anti_alias = true;
        paint
    }

    fn stroke(&self) -> Stroke {
        Stroke {
            width: self.style.width,
            ..Default::default()
        }
    }
}

fn build_path(points: &[(f64, f64)], closed: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.0 as f32, first.1 as f32);
    for &(x, y) in rest {
        pb.line_to(x as f32, y as f32);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

impl Surface for PixmapSurface {
    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn stroke_path(&mut self, points: &[(f64, f64)], closed: bool) {
        if let Some(path) = build_path(points, closed) {
            let (paint, stroke) = (self.paint(), self.stroke());
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    fn fill_path(&mut self, points: &[(f64, f64)]) {
        if let Some(path) = build_path(points, true) {
            let paint = self.paint();
            self.pixmap
                .fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);
        }
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let (paint, stroke) = (self.paint(), self.stroke());
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn draw_label(&mut self, text: &str, _x: f64, _y: f64) {
        log::trace!("label '{text}' not rasterised");
    }
}
