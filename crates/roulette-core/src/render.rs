//! Full-repaint frame drawing onto an immediate-mode 2D surface.

use crate::geometry::{Geometry, Point, angle_step, sector_angle, sector_center_angle};
use crate::interaction::Hub;
use crate::options::Label;
use crate::text::{TextMetrics, stack_lines};
use crate::theme::{Font, ThemeColors};
use palette::Srgba;
use std::convert::Infallible;
use std::f64::consts::TAU;

pub const DIVIDER_WIDTH: f64 = 4.0;
pub const BUTTON_OUTLINE_WIDTH: f64 = 6.0;
pub const PROMPT_IDLE: &str = "Hold.";
pub const PROMPT_PRESSED: &str = "Let go!";

/// Canvas-style drawing target. `fill` and `stroke` keep the current path.
pub trait Surface {
    type Error: std::error::Error;

    /// False for a zero-sized or detached target; the frame is skipped.
    fn is_ready(&self) -> bool;
    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;
    fn set_fill(&mut self, color: Srgba<f64>);
    fn set_stroke(&mut self, color: Srgba<f64>, width: f64);
    fn set_font(&mut self, font: &Font);
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64);
    fn fill(&mut self) -> Result<(), Self::Error>;
    fn stroke(&mut self) -> Result<(), Self::Error>;
    fn measure_text(&mut self, text: &str) -> Result<TextMetrics, Self::Error>;
    fn fill_text(&mut self, text: &str, origin: Point) -> Result<(), Self::Error>;
}

/// Everything a frame depends on.
#[derive(Debug, Clone)]
pub struct View<'a> {
    pub geometry: Geometry,
    pub labels: Vec<&'a Label>,
    pub index: usize,
    pub open: bool,
    pub hub: Hub,
}

pub fn draw<S: Surface>(
    surface: &mut S,
    view: &View,
    colors: &ThemeColors,
    font: &Font,
) -> Result<(), S::Error> {
    if !surface.is_ready() {
        log::trace!("surface not ready, skipping frame");
        return Ok(());
    }
    let size = view.geometry.size;
    surface.clear(size, size)?;
    if !view.open || view.labels.is_empty() {
        return Ok(());
    }

    surface.set_font(font);
    draw_disc(surface, &view.geometry, colors)?;
    draw_dividers(surface, view, colors)?;

    let n = view.labels.len();
    for (i, label) in view.labels.iter().enumerate() {
        SectorRenderer::new(&view.geometry, i, n, label).draw_label(surface, colors.label)?;
    }
    let selected = view.index.min(n - 1);
    SectorRenderer::new(&view.geometry, selected, n, view.labels[selected])
        .draw_highlight(surface, colors)?;

    draw_hub(surface, view, colors)
}

fn draw_disc<S: Surface>(
    surface: &mut S,
    geometry: &Geometry,
    colors: &ThemeColors,
) -> Result<(), S::Error> {
    surface.set_fill(colors.disc);
    surface.begin_path();
    surface.arc(geometry.center(), geometry.outer_radius(), 0.0, TAU);
    surface.fill()
}

fn draw_dividers<S: Surface>(
    surface: &mut S,
    view: &View,
    colors: &ThemeColors,
) -> Result<(), S::Error> {
    let n = view.labels.len();
    if n < 2 {
        return Ok(());
    }
    let g = &view.geometry;
    surface.set_stroke(colors.divider, DIVIDER_WIDTH);
    for i in 0..n {
        surface.begin_path();
        surface.move_to(g.center());
        surface.line_to(g.point_on_circle(sector_angle(i, n), g.outer_radius()));
        surface.stroke()?;
    }
    Ok(())
}

struct SectorRenderer<'a> {
    geometry: &'a Geometry,
    index: usize,
    count: usize,
    label: &'a Label,
}

impl<'a> SectorRenderer<'a> {
    fn new(geometry: &'a Geometry, index: usize, count: usize, label: &'a Label) -> Self {
        Self {
            geometry,
            index,
            count,
            label,
        }
    }

    fn draw_label<S: Surface>(&self, surface: &mut S, color: Srgba<f64>) -> Result<(), S::Error> {
        self.draw_label_within(surface, color, self.geometry.outer_radius())
    }

    fn draw_highlight<S: Surface>(
        &self,
        surface: &mut S,
        colors: &ThemeColors,
    ) -> Result<(), S::Error> {
        let g = self.geometry;
        let start = sector_angle(self.index, self.count);
        surface.set_fill(colors.highlight);
        surface.begin_path();
        surface.move_to(g.center());
        surface.arc(
            g.center(),
            g.selected_radius(),
            start,
            start + angle_step(self.count),
        );
        surface.fill()?;
        self.draw_label_within(surface, colors.highlight_label, g.selected_radius())
    }

    fn draw_label_within<S: Surface>(
        &self,
        surface: &mut S,
        color: Srgba<f64>,
        outer: f64,
    ) -> Result<(), S::Error> {
        let g = self.geometry;
        let anchor = g.label_anchor(
            sector_center_angle(self.index, self.count),
            outer,
            g.hub_radius(),
        );
        surface.set_fill(color);
        draw_text(surface, self.label, anchor)
    }
}

fn draw_hub<S: Surface>(surface: &mut S, view: &View, colors: &ThemeColors) -> Result<(), S::Error> {
    let g = &view.geometry;
    surface.set_fill(colors.hub);
    surface.begin_path();
    surface.arc(g.center(), g.hub_radius(), 0.0, TAU);
    surface.fill()?;

    match &view.hub {
        Hub::Caption(Some(text)) => {
            surface.set_fill(colors.label);
            draw_text(surface, text, g.center())
        }
        Hub::Caption(None) => Ok(()),
        Hub::Button { pressed } => {
            let (fill, outline) = colors.button(*pressed);
            surface.set_fill(fill);
            surface.set_stroke(outline, BUTTON_OUTLINE_WIDTH);
            surface.begin_path();
            surface.arc(g.center(), g.button_radius(), 0.0, TAU);
            surface.fill()?;
            surface.stroke()?;

            let prompt = if *pressed { PROMPT_PRESSED } else { PROMPT_IDLE };
            surface.set_fill(colors.prompt);
            draw_text(surface, prompt, g.center())
        }
    }
}

fn draw_text<S: Surface>(surface: &mut S, text: &str, anchor: Point) -> Result<(), S::Error> {
    let line_height = surface.measure_text(text)?.height;
    let lines = stack_lines(text, anchor, line_height, |word| {
        surface.measure_text(word).map(|m| m.width)
    })?;
    for line in lines {
        surface.fill_text(line.text, line.origin)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { width: f64, height: f64 },
    SetFill(Srgba<f64>),
    SetStroke(Srgba<f64>, f64),
    SetFont(Font),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
    },
    Fill,
    Stroke,
    FillText { text: String, origin: Point },
}

/// Records the calls of the latest frame; `clear` starts a new recording.
/// Text is measured with a fixed advance of half the font size per character
/// and a line height of 1.2× the font size.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    ready: bool,
    font_size: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            ready: true,
            font_size: 10.0,
        }
    }

    pub fn detached() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Infallible> {
        self.ops.clear();
        self.ops.push(DrawOp::Clear { width, height });
        Ok(())
    }

    fn set_fill(&mut self, color: Srgba<f64>) {
        self.ops.push(DrawOp::SetFill(color));
    }

    fn set_stroke(&mut self, color: Srgba<f64>, width: f64) {
        self.ops.push(DrawOp::SetStroke(color, width));
    }

    fn set_font(&mut self, font: &Font) {
        self.font_size = font.size;
        self.ops.push(DrawOp::SetFont(font.clone()));
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.ops.push(DrawOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.ops.push(DrawOp::LineTo(p));
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        self.ops.push(DrawOp::Arc {
            center,
            radius,
            start,
            end,
        });
    }

    fn fill(&mut self) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Fill);
        Ok(())
    }

    fn stroke(&mut self) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Stroke);
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> Result<TextMetrics, Infallible> {
        Ok(TextMetrics {
            width: text.chars().count() as f64 * self.font_size / 2.0,
            height: self.font_size * 1.2,
        })
    }

    fn fill_text(&mut self, text: &str, origin: Point) -> Result<(), Infallible> {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            origin,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<Label> {
        names.iter().map(|n| Label::new(*n)).collect()
    }

    fn view<'a>(labels: &'a [Label], index: usize, hub: Hub) -> View<'a> {
        View {
            geometry: Geometry::new(200.0),
            labels: labels.iter().collect(),
            index,
            open: true,
            hub,
        }
    }

    fn render(view: &View) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        draw(
            &mut surface,
            view,
            &ThemeColors::default(),
            &Font::for_widget(200.0),
        )
        .unwrap();
        surface
    }

    #[test]
    fn closed_frame_only_clears() {
        let names = labels(&["a", "b"]);
        let mut v = view(&names, 0, Hub::Caption(None));
        v.open = false;
        let s = render(&v);
        assert_eq!(
            s.ops,
            vec![DrawOp::Clear {
                width: 200.0,
                height: 200.0
            }]
        );
    }

    #[test]
    fn detached_surface_is_skipped() {
        let names = labels(&["a", "b"]);
        let mut s = RecordingSurface::detached();
        draw(
            &mut s,
            &view(&names, 0, Hub::Caption(None)),
            &ThemeColors::default(),
            &Font::for_widget(200.0),
        )
        .unwrap();
        assert!(s.ops.is_empty());
    }

    #[test]
    fn one_divider_per_sector() {
        let names = labels(&["a", "b", "c", "d", "e"]);
        let s = render(&view(&names, 0, Hub::Caption(None)));
        assert_eq!(s.count(|op| matches!(op, DrawOp::LineTo(_))), 5);
        assert_eq!(s.count(|op| *op == DrawOp::Stroke), 5);
    }

    #[test]
    fn single_option_has_no_dividers() {
        let names = labels(&["only"]);
        let s = render(&view(&names, 0, Hub::Caption(None)));
        assert_eq!(s.count(|op| matches!(op, DrawOp::LineTo(_))), 0);
        assert_eq!(s.texts(), vec!["only", "only"]);
    }

    #[test]
    fn frame_order_and_highlight_redraw() {
        let names = labels(&["Beja", "Faro", "Lisboa"]);
        let colors = ThemeColors::default();
        let s = render(&view(&names, 1, Hub::Caption(Some(Label::new("Faro")))));

        assert_eq!(
            s.ops[0],
            DrawOp::Clear {
                width: 200.0,
                height: 200.0
            }
        );
        assert!(matches!(s.ops[1], DrawOp::SetFont(_)));
        assert_eq!(s.ops[2], DrawOp::SetFill(colors.disc));
        // labels, then the highlighted label again, then the hub caption
        assert_eq!(s.texts(), vec!["Beja", "Faro", "Lisboa", "Faro", "Faro"]);

        let highlight = s
            .ops
            .iter()
            .position(|op| *op == DrawOp::SetFill(colors.highlight))
            .unwrap();
        let last_label = s
            .ops
            .iter()
            .position(|op| {
                matches!(op, DrawOp::FillText { text, .. } if text == "Lisboa")
            })
            .unwrap();
        assert!(highlight > last_label);
        assert_eq!(s.ops[highlight + 1], DrawOp::BeginPath);
        assert_eq!(s.ops[highlight + 2], DrawOp::MoveTo(Point::new(100.0, 100.0)));
        match &s.ops[highlight + 3] {
            DrawOp::Arc { start, end, radius, .. } => {
                assert!((start - sector_angle(1, 3)).abs() < 1e-12);
                assert!((end - sector_angle(2, 3)).abs() < 1e-12);
                assert_eq!(*radius, 96.875);
            }
            other => panic!("expected highlight arc, got {other:?}"),
        }
        assert_eq!(s.ops[highlight + 5], DrawOp::SetFill(colors.highlight_label));
    }

    #[test]
    fn button_prompt_follows_press_state() {
        let names = labels(&["a", "b"]);
        let colors = ThemeColors::default();

        let idle = render(&view(&names, 0, Hub::Button { pressed: false }));
        assert_eq!(idle.texts().last(), Some(&"Hold."));
        assert!(idle.ops.contains(&DrawOp::SetStroke(colors.button_outline, BUTTON_OUTLINE_WIDTH)));

        let held = render(&view(&names, 0, Hub::Button { pressed: true }));
        let texts = held.texts();
        assert_eq!(&texts[texts.len() - 2..], &["Let", "go!"]);
        assert!(held.ops.contains(&DrawOp::SetStroke(colors.button_fill, BUTTON_OUTLINE_WIDTH)));
    }

    #[test]
    fn repaint_is_full() {
        let names = labels(&["a", "b"]);
        let mut s = RecordingSurface::new();
        let v = view(&names, 0, Hub::Caption(None));
        let (colors, font) = (ThemeColors::default(), Font::for_widget(200.0));
        draw(&mut s, &v, &colors, &font).unwrap();
        let first = s.ops.clone();
        draw(&mut s, &v, &colors, &font).unwrap();
        assert_eq!(s.ops, first);
    }
}
