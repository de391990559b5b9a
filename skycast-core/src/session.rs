use crate::client::LookupError;
use crate::model::{Coordinates, Unit, WeatherReport};

/// What the presentation layer renders. Replaced wholesale on every
/// transition; `Loading` clears whatever was on screen for the duration
/// of the fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Ready(WeatherReport),
}

/// Owns the view state, the unit preference, and the counter that decides
/// which in-flight fetch is still the current one.
#[derive(Debug)]
pub struct Session {
    state: ViewState,
    unit: Unit,
    issued: u64,
}

impl Session {
    pub fn new(unit: Unit) -> Self {
        Self {
            state: ViewState::Idle,
            unit,
            issued: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Enter `Loading` and hand out the ticket for this fetch. Every
    /// previously issued ticket becomes stale at that moment.
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued += 1;
        self.state = ViewState::Loading;
        self.issued
    }

    /// Land a fetch outcome. Returns `false`, changing nothing, when the
    /// ticket is not the latest issued.
    pub fn resolve_fetch(
        &mut self,
        ticket: u64,
        outcome: Result<WeatherReport, LookupError>,
    ) -> bool {
        if ticket != self.issued {
            tracing::debug!(ticket, latest = self.issued, "discarding stale fetch result");
            return false;
        }

        self.state = match outcome {
            Ok(report) => ViewState::Ready(report),
            Err(err) => {
                if let LookupError::Network(cause) = &err {
                    tracing::warn!("lookup failed on transport: {cause}");
                }
                ViewState::Error(err.to_string())
            }
        };
        true
    }

    /// Flip units. The caller is expected to re-fetch the location
    /// currently on screen.
    pub fn toggle_unit(&mut self) -> Unit {
        self.unit = self.unit.toggled();
        self.unit
    }

    /// Coordinates of the snapshot currently displayed, if any.
    pub fn ready_coordinates(&self) -> Option<Coordinates> {
        match &self.state {
            ViewState::Ready(report) => Some(report.snapshot.coordinates),
            _ => None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Unit::default())
    }
}
