use anyhow::Result;

use skycast_core::{App, Config, FileStore, IpLocator, Unit, WeatherClient};

use crate::render;

/// Prompt for the API key and persist it.
pub fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;

    config.set_api_key(key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// One-shot city lookup.
pub async fn show(city: &str, units: Option<String>) -> Result<()> {
    let (mut app, _config) = build_app(units)?;

    render::loading();
    app.search_city(city).await;
    render::view_state(app.state(), app.unit());
    Ok(())
}

/// One-shot lookup for the device's position.
pub async fn here(units: Option<String>) -> Result<()> {
    let (mut app, _config) = build_app(units)?;

    render::loading();
    match app.locate_and_search(&IpLocator::new()).await {
        Ok(()) => render::view_state(app.state(), app.unit()),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

/// Wire the core pieces up from config plus an optional units override.
pub fn build_app(units: Option<String>) -> Result<(App<FileStore>, Config)> {
    let config = Config::load()?;

    let unit = match units {
        Some(raw) => Unit::try_from(raw.as_str())?,
        None => config.units,
    };

    let client = WeatherClient::new(config.resolve_api_key()?);
    let store = FileStore::open()?;

    Ok((App::new(client, unit, store), config))
}
