use cairo::{Context, FontSlant, FontWeight, Operator};
use palette::Srgba;
use roulette_core::text::TextMetrics;
use roulette_core::{Font, Point, Surface};

/// Cairo backing for the wheel renderer.
///
/// Paths survive `fill` and `stroke` so a shape can be filled and then
/// outlined, the way a 2D canvas behaves.
pub struct CairoSurface<'a> {
    cr: &'a Context,
    width: f64,
    height: f64,
    fill: Srgba<f64>,
    stroke: Srgba<f64>,
    line_width: f64,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context, width: i32, height: i32) -> Self {
        Self {
            cr,
            width: width as f64,
            height: height as f64,
            fill: Srgba::new(0.0, 0.0, 0.0, 1.0),
            stroke: Srgba::new(0.0, 0.0, 0.0, 1.0),
            line_width: 1.0,
        }
    }

    fn source(&self, color: Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }
}

impl Surface for CairoSurface<'_> {
    type Error = cairo::Error;

    fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.cr.status().is_ok()
    }

    fn clear(&mut self, width: f64, height: f64) -> Result<(), cairo::Error> {
        self.cr.save()?;
        self.cr.set_operator(Operator::Clear);
        self.cr.rectangle(0.0, 0.0, width, height);
        self.cr.fill()?;
        self.cr.restore()
    }

    fn set_fill(&mut self, color: Srgba<f64>) {
        self.fill = color;
    }

    fn set_stroke(&mut self, color: Srgba<f64>, width: f64) {
        self.stroke = color;
        self.line_width = width;
    }

    fn set_font(&mut self, font: &Font) {
        self.cr
            .select_font_face(&font.family, FontSlant::Normal, FontWeight::Normal);
        self.cr.set_font_size(font.size);
    }

    fn begin_path(&mut self) {
        self.cr.new_path();
    }

    fn move_to(&mut self, p: Point) {
        self.cr.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.cr.line_to(p.x, p.y);
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        self.cr.arc(center.x, center.y, radius, start, end);
    }

    fn fill(&mut self) -> Result<(), cairo::Error> {
        self.source(self.fill);
        self.cr.fill_preserve()
    }

    fn stroke(&mut self) -> Result<(), cairo::Error> {
        self.source(self.stroke);
        self.cr.set_line_width(self.line_width);
        self.cr.stroke_preserve()
    }

    fn measure_text(&mut self, text: &str) -> Result<TextMetrics, cairo::Error> {
        let font = self.cr.font_extents()?;
        let ext = self.cr.text_extents(text)?;
        Ok(TextMetrics {
            width: ext.x_advance(),
            height: font.ascent() + font.descent(),
        })
    }

    fn fill_text(&mut self, text: &str, origin: Point) -> Result<(), cairo::Error> {
        self.source(self.fill);
        self.cr.move_to(origin.x, origin.y);
        self.cr.show_text(text)
    }
}
