use chrono::Utc;

use crate::client::{self, WeatherClient};
use crate::geo::{GeoError, LocationProvider};
use crate::history::{KvStore, RecentSearches};
use crate::model::{Coordinates, Query, Unit};
use crate::session::{Session, ViewState};

/// Ties the client, the view state, and the recent-search store together.
/// Front ends call these operations and render `state()` afterwards.
pub struct App<S: KvStore> {
    client: WeatherClient,
    session: Session,
    history: RecentSearches,
    store: S,
}

impl<S: KvStore> App<S> {
    /// The recent-search list is read from the store once, here.
    pub fn new(client: WeatherClient, unit: Unit, store: S) -> Self {
        let history = RecentSearches::load(&store);
        Self {
            client,
            session: Session::new(unit),
            history,
            store,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.session.state()
    }

    pub fn unit(&self) -> Unit {
        self.session.unit()
    }

    pub fn recent(&self) -> &[String] {
        self.history.entries()
    }

    /// Look up a city by name. A success records the resolved location
    /// name in the search history. Blank input is ignored.
    pub async fn search_city(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.run_fetch(Query::City(name.to_string())).await;
    }

    /// Look up by position. Never touches the search history.
    pub async fn use_coordinates(&mut self, coords: Coordinates) {
        self.run_fetch(Query::Coordinates(coords)).await;
    }

    /// Resolve the device position and look it up. A failed position
    /// request surfaces its own message and leaves the current view
    /// untouched.
    pub async fn locate_and_search(
        &mut self,
        provider: &dyn LocationProvider,
    ) -> Result<(), GeoError> {
        let coords = provider.locate().await?;
        self.use_coordinates(coords).await;
        Ok(())
    }

    /// Flip units and re-fetch the location currently on screen, by its
    /// coordinates so history stays unchanged. With nothing on screen the
    /// preference still flips for the next lookup.
    pub async fn toggle_unit(&mut self) {
        let coords = self.session.ready_coordinates();
        self.session.toggle_unit();
        if let Some(coords) = coords {
            self.run_fetch(Query::Coordinates(coords)).await;
        }
    }

    async fn run_fetch(&mut self, query: Query) {
        let ticket = self.session.begin_fetch();
        let outcome =
            client::fetch_report(&self.client, &query, self.session.unit(), Utc::now()).await;

        if let (Query::City(_), Ok(report)) = (&query, &outcome) {
            let resolved = report.snapshot.location.clone();
            if let Err(err) = self.history.record(&resolved, &mut self.store) {
                tracing::warn!("failed to persist recent searches: {err}");
            }
        }

        self.session.resolve_fetch(ticket, outcome);
    }
}
