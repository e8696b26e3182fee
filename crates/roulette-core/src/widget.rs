use crate::clock::{Clock, SteadyClock};
use crate::error::{Error, Result};
use crate::geometry::{Geometry, Point};
use crate::hover::HoverController;
use crate::interaction::{Interaction, Response, Selection, Variant};
use crate::options::{Label, OptionSet};
use crate::render::{self, Surface, View};
use crate::spin::{SpinController, SpinTuning};
use crate::theme::{Font, ThemeColors};
use palette::Srgba;

/// Construction parameters. Only `options` is required.
#[derive(Debug, Clone)]
pub struct RouletteOptions {
    pub options: OptionSet,
    pub variant: Variant,
    pub size: Option<f64>,
    pub background: Option<Srgba<f64>>,
    pub font: Option<Font>,
    /// Cosmetic caption for the host; unused by selection.
    pub label: Option<String>,
    pub tuning: SpinTuning,
}

impl RouletteOptions {
    pub fn new(options: OptionSet, variant: Variant) -> Self {
        Self {
            options,
            variant,
            size: None,
            background: None,
            font: None,
            label: None,
            tuning: SpinTuning::default(),
        }
    }
}

pub struct Roulette<C: Clock = SteadyClock> {
    selection: Selection,
    interaction: Box<dyn Interaction>,
    geometry: Geometry,
    colors: ThemeColors,
    font: Font,
    label: Option<String>,
    clock: C,
}

impl Roulette<SteadyClock> {
    pub fn new(options: RouletteOptions) -> Result<Self> {
        Self::with_clock(options, SteadyClock)
    }
}

impl<C: Clock> Roulette<C> {
    pub fn with_clock(options: RouletteOptions, clock: C) -> Result<Self> {
        let size = options.size.unwrap_or(options.variant.default_size());
        if !size.is_finite() || size <= 0.0 {
            return Err(Error::InvalidSize(size.to_string()));
        }
        if options.variant == Variant::Hover && !options.options.is_leaf() {
            return Err(Error::NestedHover {
                depth: options.options.depth(),
            });
        }
        let selection = Selection::new(options.options)?;
        let interaction: Box<dyn Interaction> = match options.variant {
            Variant::Hover => Box::new(HoverController::new()),
            Variant::Spin => Box::new(SpinController::new(options.tuning)),
        };
        let colors = options
            .background
            .map(|bg| ThemeColors::default().with_background(bg))
            .unwrap_or_default();

        Ok(Self {
            selection,
            interaction,
            geometry: Geometry::new(size),
            colors,
            font: options.font.unwrap_or_else(|| Font::for_widget(size)),
            label: options.label,
            clock,
        })
    }

    pub fn variant(&self) -> Variant {
        self.interaction.variant()
    }

    /// The committed label. Never empty.
    pub fn value(&self) -> &Label {
        self.selection.value()
    }

    pub fn is_open(&self) -> bool {
        self.selection.is_open()
    }

    pub fn labels(&self) -> Vec<&Label> {
        self.selection.level().labels()
    }

    pub fn selected_index(&self) -> usize {
        self.selection.index()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn size(&self) -> f64 {
        self.geometry.size
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.colors
    }

    pub fn set_colors(&mut self, colors: ThemeColors) {
        self.colors = colors;
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn activate(&mut self) -> Response {
        self.interaction.activate(&mut self.selection)
    }

    pub fn open(&mut self) -> Response {
        if self.is_open() {
            return Response::none();
        }
        self.activate()
    }

    pub fn close(&mut self) -> Response {
        if !self.is_open() {
            return Response::none();
        }
        self.interaction.reset();
        self.selection.close();
        Response::redraw()
    }

    pub fn pointer_moved(&mut self, at: Point) -> Result<Response> {
        self.interaction
            .pointer_moved(&mut self.selection, &self.geometry, at)
    }

    pub fn pressed(&mut self, at: Point) -> Result<Response> {
        let now = self.clock.now();
        self.interaction
            .pressed(&mut self.selection, &self.geometry, at, now)
    }

    pub fn released(&mut self, at: Point) -> Result<Response> {
        let now = self.clock.now();
        self.interaction
            .released(&mut self.selection, &self.geometry, at, now)
    }

    /// Delivers a scheduled callback. Stale epochs are dropped.
    pub fn tick(&mut self, epoch: u64) -> Result<Response> {
        if epoch != self.selection.epoch() || !self.selection.is_open() {
            log::trace!(
                "dropping stale tick {} (current {})",
                epoch,
                self.selection.epoch()
            );
            return Ok(Response::none());
        }
        let now = self.clock.now();
        self.interaction.tick(&mut self.selection, now)
    }

    pub fn view(&self) -> View<'_> {
        View {
            geometry: self.geometry,
            labels: self.selection.level().labels(),
            index: self.selection.index(),
            open: self.selection.is_open(),
            hub: self.interaction.hub(&self.selection),
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> std::result::Result<(), S::Error> {
        render::draw(surface, &self.view(), &self.colors, &self.font)
    }
}
