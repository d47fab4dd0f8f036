use crate::core::event::AppEvent;
use crate::core::store::AppStore;
use crate::domain::model::Venue;
use crate::domain::ports::BookingApi;
use crate::domain::venues::{filter_venues, VenueFilter};
use crate::utils::error::Result;

/// Venue catalog flows: fetch, select, filter. Each flow dispatches a
/// `Requested` event, awaits the gateway, then dispatches the outcome.
pub struct CatalogFlow<'a, A: BookingApi> {
    api: &'a A,
    store: &'a AppStore,
}

impl<'a, A: BookingApi> CatalogFlow<'a, A> {
    pub fn new(api: &'a A, store: &'a AppStore) -> Self {
        Self { api, store }
    }

    pub async fn load_venues(&self) -> Result<Vec<Venue>> {
        self.store.dispatch(AppEvent::VenuesRequested);
        match self.api.fetch_venues().await {
            Ok(venues) => {
                self.store.dispatch(AppEvent::VenuesLoaded {
                    venues: venues.clone(),
                });
                Ok(venues)
            }
            Err(e) => {
                self.store.dispatch(AppEvent::VenuesFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Fetch one venue into the selected slot. Not-found bubbles up as
    /// `NotFoundError` for the caller to turn into a not-found view; the
    /// generation guard drops responses from a superseded fetch.
    pub async fn load_venue(&self, id: &str) -> Result<Venue> {
        let generation = self.store.allocate_generation();
        self.store.dispatch(AppEvent::VenueRequested { generation });
        match self.api.fetch_venue(id).await {
            Ok(venue) => {
                self.store.dispatch(AppEvent::VenueLoaded {
                    generation,
                    venue: venue.clone(),
                });
                Ok(venue)
            }
            Err(e) => {
                self.store.dispatch(AppEvent::VenueFailed {
                    generation,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Component teardown: drop the selected venue and the working draft.
    pub fn clear_selected(&self) {
        self.store.dispatch(AppEvent::SelectedVenueCleared);
    }

    /// Client-side filtering over the already-loaded list.
    pub fn filtered(&self, filter: &VenueFilter) -> Vec<Venue> {
        self.store.with_state(|state| {
            filter_venues(&state.catalog.venues, filter)
                .into_iter()
                .cloned()
                .collect()
        })
    }
}
