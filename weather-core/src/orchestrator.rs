//! Drives one city search from submitted text to a rendered card.
//!
//! ```text
//! Idle -> SearchingPlace -> SearchingWeather -> Displaying
//!              |                   |
//!              +-------------------+----------> Failed
//! ```
//!
//! Every non-empty submission takes a ticket from a generation counter. After
//! each await point the ticket is compared with the latest one; a submission
//! that has been overtaken stops without touching the view and reports
//! [`SearchState::Superseded`]. The check, the state update and that step's
//! view writes happen under one lock, so a newer submission's writes always
//! land after an older one's.

use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use tracing::instrument;

use crate::{
    WeatherError,
    provider::{Geocoder, WeatherSource},
    view::{Severity, View, WeatherCard},
};

pub const STATUS_SEARCHING_PLACE: &str = "Buscando cidade...";
pub const STATUS_SEARCHING_WEATHER: &str = "Buscando clima...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    SearchingPlace,
    SearchingWeather,
    Displaying(WeatherCard),
    /// Holds the message shown as status.
    Failed(String),
    /// A newer submission started before this one finished.
    Superseded,
}

impl SearchState {
    /// True for states a submission can end in.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchState::SearchingPlace | SearchState::SearchingWeather)
    }
}

#[derive(Debug)]
pub struct Orchestrator<G, W> {
    geocoder: G,
    weather: W,
    generation: AtomicU64,
    state: Mutex<SearchState>,
}

impl<G, W> Orchestrator<G, W>
where
    G: Geocoder,
    W: WeatherSource,
{
    pub fn new(geocoder: G, weather: W) -> Self {
        Self {
            geocoder,
            weather,
            generation: AtomicU64::new(0),
            state: Mutex::new(SearchState::Idle),
        }
    }

    /// State reached by the most recent submission.
    pub fn state(&self) -> SearchState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Run one search for `query` and drive `view` through it.
    ///
    /// A blank query returns [`SearchState::Idle`] without touching the view,
    /// the recorded state or the network.
    #[instrument(skip(self, view), level = "info")]
    pub async fn submit(&self, query: &str, view: &dyn View) -> SearchState {
        let query = query.trim();
        if query.is_empty() {
            return SearchState::Idle;
        }

        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let Some(_step) = self.claim(ticket, SearchState::SearchingPlace) else {
                return SearchState::Superseded;
            };
            view.set_status(STATUS_SEARCHING_PLACE, Severity::Info);
            view.set_visible(false);
        }

        let place = match self.geocoder.resolve(query).await {
            Ok(place) => place,
            Err(err) => return self.fail(ticket, err, view),
        };

        {
            let Some(_step) = self.claim(ticket, SearchState::SearchingWeather) else {
                return SearchState::Superseded;
            };
            view.set_status(STATUS_SEARCHING_WEATHER, Severity::Info);
        }

        let current = match self
            .weather
            .fetch_current(place.latitude, place.longitude, Some(place.timezone.as_str()))
            .await
        {
            Ok(current) => current,
            Err(err) => return self.fail(ticket, err, view),
        };

        let card = WeatherCard::new(&place, &current);
        let done = SearchState::Displaying(card.clone());
        {
            let Some(_step) = self.claim(ticket, done.clone()) else {
                return SearchState::Superseded;
            };
            view.set_status("", Severity::Info);
            view.render(&card);
            view.set_visible(true);
        }

        tracing::info!(place = %card.location, temperature = %card.temperature, "search complete");
        done
    }

    fn fail(&self, ticket: u64, err: WeatherError, view: &dyn View) -> SearchState {
        let message = err.to_string();
        tracing::warn!(error = %message, "search failed");

        let failed = SearchState::Failed(message.clone());
        let Some(_step) = self.claim(ticket, failed.clone()) else {
            return SearchState::Superseded;
        };
        view.set_status(&message, Severity::Error);
        view.set_visible(false);
        failed
    }

    /// Record `next` if `ticket` is still the latest submission.
    ///
    /// The returned guard is held while the step writes to the view and must
    /// be dropped before the next await. Views must not call back into the
    /// orchestrator.
    fn claim(&self, ticket: u64, next: SearchState) -> Option<MutexGuard<'_, SearchState>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "submission superseded");
            return None;
        }
        *state = next;
        Some(state)
    }
}
