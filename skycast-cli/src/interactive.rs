use std::fmt;

use anyhow::Result;
use inquire::{InquireError, Select, Text};

use skycast_core::{IpLocator, Unit};

use crate::{commands, render};

enum MenuItem {
    Search,
    Locate,
    ToggleUnit(Unit),
    Recent(String),
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Search => f.write_str("Search city"),
            MenuItem::Locate => f.write_str("Use current location"),
            MenuItem::ToggleUnit(unit) => write!(f, "Switch to {}", unit.toggled().degrees()),
            MenuItem::Recent(name) => write!(f, "Recent: {name}"),
            MenuItem::Quit => f.write_str("Quit"),
        }
    }
}

/// The interactive session: fetch the configured default city, then loop
/// on a menu mirroring the lookup controls (search, locate, unit toggle,
/// recent-search chips).
pub async fn run() -> Result<()> {
    let (mut app, config) = commands::build_app(None)?;
    let locator = IpLocator::new();

    render::loading();
    app.search_city(&config.default_city).await;
    render::view_state(app.state(), app.unit());

    loop {
        let mut options = vec![
            MenuItem::Search,
            MenuItem::Locate,
            MenuItem::ToggleUnit(app.unit()),
        ];
        options.extend(app.recent().iter().cloned().map(MenuItem::Recent));
        options.push(MenuItem::Quit);

        let choice = match Select::new("skycast", options).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match choice {
            MenuItem::Search => {
                let city = match Text::new("City:").prompt() {
                    Ok(city) => city,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(err) => return Err(err.into()),
                };
                if city.trim().is_empty() {
                    continue;
                }
                render::loading();
                app.search_city(&city).await;
            }
            MenuItem::Locate => {
                render::loading();
                if let Err(err) = app.locate_and_search(&locator).await {
                    // Position failures keep whatever is on screen.
                    println!("{err}");
                    continue;
                }
            }
            MenuItem::ToggleUnit(_) => {
                render::loading();
                app.toggle_unit().await;
            }
            MenuItem::Recent(name) => {
                render::loading();
                app.search_city(&name).await;
            }
            MenuItem::Quit => break,
        }

        render::view_state(app.state(), app.unit());
    }

    Ok(())
}
