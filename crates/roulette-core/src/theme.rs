use palette::Srgba;

pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub disc: Srgba<f64>,
    pub divider: Srgba<f64>,
    pub label: Srgba<f64>,
    pub highlight: Srgba<f64>,
    pub highlight_label: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub button_fill: Srgba<f64>,
    pub button_outline: Srgba<f64>,
    pub prompt: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        let blue = Srgba::new(0.0, 0.0, 1.0, 1.0);
        let red = Srgba::new(1.0, 0.0, 0.0, 1.0);
        let white = Srgba::new(1.0, 1.0, 1.0, 1.0);
        let black = Srgba::new(0.0, 0.0, 0.0, 1.0);
        Self {
            disc: blue,
            divider: white,
            label: black,
            highlight: red,
            highlight_label: white,
            hub: white,
            button_fill: blue,
            button_outline: red,
            prompt: black,
        }
    }
}

impl ThemeColors {
    /// The hub takes the widget background color.
    pub fn with_background(self, background: Srgba<f64>) -> Self {
        Self {
            hub: background,
            ..self
        }
    }

    /// Button colors swap while it is held.
    pub fn button(&self, pressed: bool) -> (Srgba<f64>, Srgba<f64>) {
        if pressed {
            (self.button_outline, self.button_fill)
        } else {
            (self.button_fill, self.button_outline)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    pub fn for_widget(diameter: f64) -> Self {
        // 3/50 of the diameter
        Self::new(DEFAULT_FONT_FAMILY, diameter * 3.0 / 50.0)
    }
}
