use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::{Srgb, Srgba, WithAlpha};
use roulette_core::spin::SpinTuning;
use roulette_core::{Font, OptionSet, Roulette, RouletteOptions, Variant};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub variant: Variant,
    pub size: Option<f64>,
    pub background_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub label: Option<String>,
    /// Take colors from the GTK theme instead of the built-in palette.
    #[serde(default)]
    pub gtk_theme: bool,
    /// Milliseconds between the wheel stopping and the pick taking effect.
    pub settle_delay_ms: Option<u64>,
    pub options: OptionSet,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid background color '{value}': {source}")]
    Color {
        value: String,
        source: palette::rgb::FromHexError,
    },
    #[error("Invalid options: {0}")]
    Roulette(#[from] roulette_core::Error),
}

impl Config {
    pub fn background(&self) -> Result<Option<Srgba<f64>>, ConfigError> {
        self.background_color
            .as_deref()
            .map(|hex| {
                Srgb::<u8>::from_str(hex)
                    .map(|c| c.into_format::<f64>().with_alpha(1.0))
                    .map_err(|source| ConfigError::Color {
                        value: hex.to_string(),
                        source,
                    })
            })
            .transpose()
    }

    pub fn roulette_options(&self) -> Result<RouletteOptions, ConfigError> {
        let size = self.size.unwrap_or(self.variant.default_size());
        let font = match (&self.font_family, self.font_size) {
            (None, None) => None,
            (family, font_size) => {
                let default = Font::for_widget(size);
                Some(Font::new(
                    family.clone().unwrap_or(default.family),
                    font_size.unwrap_or(default.size),
                ))
            }
        };
        let mut tuning = SpinTuning::default();
        if let Some(ms) = self.settle_delay_ms {
            tuning.settle_delay = std::time::Duration::from_millis(ms);
        }

        Ok(RouletteOptions {
            options: self.options.clone(),
            variant: self.variant,
            size: Some(size),
            background: self.background()?,
            font,
            label: self.label.clone(),
            tuning,
        })
    }
}

pub fn build_roulette(config: &Config) -> Result<Roulette, ConfigError> {
    Ok(Roulette::new(config.roulette_options()?)?)
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "roulette").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("ROULETTE"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn builtin_config() -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()?;
    Ok(s.try_deserialize()?)
}

/// Writes the default config on first run, then loads it.
pub fn load_or_setup() -> Config {
    if let Err(e) = write_default_config() {
        log::warn!("Could not write default config: {}", e);
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using built-in options: {}", e);
            builtin_config().unwrap_or_else(|e| {
                log::error!("Built-in config is invalid: {}", e);
                Config {
                    variant: Variant::Hover,
                    size: None,
                    background_color: None,
                    font_family: None,
                    font_size: None,
                    label: None,
                    gtk_theme: false,
                    settle_delay_ms: None,
                    options: OptionSet::flat(["Sim", "Não"]),
                }
            })
        }
    }
}

/// Leaves an existing file alone.
pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if path.exists() {
        return Ok(path);
    }
    if let Some(dir) = path.parent() {
        fs_err::create_dir_all(dir)?;
    }
    fs_err::write(&path, DEFAULT_CONFIG)?;
    log::info!("Wrote default config to {}", path.display());
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Whether `event` should rebuild the wheel. Deleting the file keeps the
/// current wheel, as do metadata-only changes such as `touch`.
fn is_config_change(event: &Event, config_path: &Path) -> bool {
    let wanted = match event.kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    };
    wanted && event.paths.iter().any(|p| p == config_path)
}

type WatchEvents = async_channel::Receiver<notify::Result<Event>>;

fn watch_config_dir(dir: &Path) -> Result<(RecommendedWatcher, WatchEvents), ConfigError> {
    fs_err::create_dir_all(dir)?;
    let (events_tx, events_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = events_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, events_rx))
}

/// Sends one `ConfigReload` per burst of writes to the config file.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let Some((config_path, dir)) = get_config_path()
        .ok()
        .and_then(|p| p.parent().map(|d| (p.clone(), d.to_path_buf())))
    else {
        log::error!("No config directory to watch");
        return;
    };

    // dropping the watcher stops the events
    let (_watcher, events) = match watch_config_dir(&dir) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Config reload disabled: {}", e);
            return;
        }
    };

    while let Ok(res) = events.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::error!("Watch error: {}", e);
                continue;
            }
        };
        if !is_config_change(&event, &config_path) {
            continue;
        }
        // editors save in several steps
        while events.try_recv().is_ok() {}
        log::debug!("{} changed", config_path.display());
        if tx.send(AppEvent::ConfigReload).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roulette_core::Label;

    #[test]
    fn builtin_config_is_valid() {
        let config = builtin_config().unwrap();
        assert_eq!(config.variant, Variant::Spin);
        assert_eq!(config.options.depth(), 2);
        let regions: Vec<&str> = config
            .options
            .labels()
            .into_iter()
            .map(Label::as_str)
            .collect();
        assert_eq!(regions[0], "R.A. Açores");
        assert_eq!(regions[4], "Região Sul");

        let roulette = build_roulette(&config).unwrap();
        assert_eq!(roulette.value().as_str(), "R.A. Açores");
        assert_eq!(roulette.size(), 400.0);
    }

    #[test]
    fn json_config_overrides() {
        let json = r##"{
            "variant": "HOVER",
            "size": 300,
            "background_color": "#808080",
            "font_size": 20,
            "options": ["Beja", "Évora", "Faro"]
        }"##;
        let config: Config = serde_json::from_str(json).unwrap();
        let options = config.roulette_options().unwrap();
        assert_eq!(options.variant, Variant::Hover);
        assert_eq!(options.size, Some(300.0));
        assert_eq!(
            options.font,
            Some(Font::new("sans-serif", 20.0))
        );
        let bg = options.background.unwrap();
        assert!((bg.red - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(bg.alpha, 1.0);
    }

    #[test]
    fn bad_color_is_reported() {
        let json = r##"{"background_color": "chartreuse-ish", "options": ["a"]}"##;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(matches!(
            config.roulette_options(),
            Err(ConfigError::Color { .. })
        ));
    }

    #[test]
    fn empty_options_are_rejected() {
        let json = r##"{"variant": "spin", "options": {"Norte": []}}"##;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(matches!(
            build_roulette(&config),
            Err(ConfigError::Roulette(roulette_core::Error::EmptyLevel { .. }))
        ));
    }

    #[test]
    fn hover_config_with_categories_is_rejected() {
        let json = r##"{"variant": "hover", "options": {"A": ["x", "y"], "B": ["z"]}}"##;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(matches!(
            build_roulette(&config),
            Err(ConfigError::Roulette(roulette_core::Error::NestedHover { depth: 2 }))
        ));
    }

    #[test]
    fn reload_filter_follows_the_config_file() {
        use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind};

        let path = PathBuf::from("/home/u/.config/roulette/config.toml");
        let event = |kind| Event::new(kind).add_path(path.clone());

        assert!(is_config_change(
            &event(EventKind::Modify(ModifyKind::Data(DataChange::Content))),
            &path
        ));
        assert!(is_config_change(&event(EventKind::Create(CreateKind::File)), &path));
        assert!(!is_config_change(
            &event(EventKind::Modify(ModifyKind::Metadata(MetadataKind::AccessTime))),
            &path
        ));
        assert!(!is_config_change(&event(EventKind::Remove(RemoveKind::File)), &path));

        let neighbour = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/home/u/.config/roulette/config.toml~"));
        assert!(!is_config_change(&neighbour, &path));
    }

    #[test]
    fn settle_delay_override() {
        let json = r##"{"variant": "spin", "settle_delay_ms": 250, "options": ["a"]}"##;
        let config: Config = serde_json::from_str(json).unwrap();
        let options = config.roulette_options().unwrap();
        assert_eq!(
            options.tuning.settle_delay,
            std::time::Duration::from_millis(250)
        );
    }
}
