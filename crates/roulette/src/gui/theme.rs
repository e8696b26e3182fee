use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use roulette_core::ThemeColors;

/// Maps the named colors of the active GTK theme onto the wheel palette,
/// keeping `base` for anything the theme does not define.
pub fn colors_from_context(context: &gtk::StyleContext, base: &ThemeColors) -> ThemeColors {
    let accent = lookup_color(context, "theme_selected_bg_color", base.highlight);
    let surface = lookup_color(context, "theme_base_color", base.disc);
    ThemeColors {
        disc: surface,
        divider: lookup_color(context, "borders", base.divider),
        label: lookup_color(context, "theme_text_color", base.label),
        highlight: accent,
        highlight_label: lookup_color(context, "theme_selected_fg_color", base.highlight_label),
        hub: lookup_color(context, "theme_bg_color", base.hub),
        button_fill: surface,
        button_outline: accent,
        prompt: lookup_color(context, "theme_fg_color", base.prompt),
    }
}

fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
    context
        .lookup_color(name)
        .map(|c| {
            Srgba::new(
                c.red() as f64,
                c.green() as f64,
                c.blue() as f64,
                c.alpha() as f64,
            )
        })
        .unwrap_or(fallback)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.roulette-wheel {
    background: none;
    background-color: transparent;
}
.roulette-value {
    font-weight: bold;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
