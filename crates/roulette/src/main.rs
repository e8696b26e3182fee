use relm4::prelude::*;
use roulette::config;
use roulette::gui::app::AppModel;
use roulette::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_setup();
    let roulette = match config::build_roulette(&config) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Invalid config, using built-in options: {}", e);
            config::build_roulette(&config::builtin_config()?)?
        }
    };
    log::info!(
        "Starting {} roulette with value '{}'",
        roulette.variant(),
        roulette.value()
    );

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.troia.roulette");
    app.run::<AppModel>((roulette, config.gtk_theme, rx));
    Ok(())
}
