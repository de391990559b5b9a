use clap::{Parser, Subcommand};

use crate::{commands, interactive};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather lookup for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, e.g. "Paris" or "New York".
        city: String,

        /// Measurement system: "metric" or "imperial".
        #[arg(long)]
        units: Option<String>,
    },

    /// Show weather for the device's current location.
    Here {
        /// Measurement system: "metric" or "imperial".
        #[arg(long)]
        units: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => commands::configure(),
            Some(Command::Show { city, units }) => commands::show(&city, units).await,
            Some(Command::Here { units }) => commands::here(units).await,
            None => interactive::run().await,
        }
    }
}
