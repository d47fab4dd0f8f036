use crate::core::event::AppEvent;
use crate::core::state::SubmissionPhase;
use crate::core::store::AppStore;
use crate::domain::model::{Booking, BookingRequest, Slot};
use crate::domain::ports::BookingApi;
use crate::domain::slots::{contiguous_run_end, max_contiguous_hours, slots_for_date};
use crate::utils::error::{Result, TurfbookError};
use chrono::{Duration, NaiveDate, NaiveTime};

/// Where the view layer should go after a flow completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Profile,
}

/// The booking submission flow: build up a draft against the selected
/// venue, validate it against computed availability, and submit it exactly
/// once per successful validation pass.
pub struct BookingFlow<'a, A: BookingApi> {
    api: &'a A,
    store: &'a AppStore,
}

impl<'a, A: BookingApi> BookingFlow<'a, A> {
    pub fn new(api: &'a A, store: &'a AppStore) -> Self {
        Self { api, store }
    }

    // ---- draft editing ----

    pub fn select_date(&self, date: NaiveDate) {
        self.store.dispatch(AppEvent::DateSelected { date });
    }

    pub fn select_start(&self, start_time: NaiveTime) {
        self.store
            .dispatch(AppEvent::StartSlotSelected { start_time });
    }

    pub fn select_hours(&self, hours: u32) {
        self.store.dispatch(AppEvent::HoursSelected { hours });
    }

    pub fn select_sport(&self, sport: impl Into<String>) {
        self.store.dispatch(AppEvent::SportSelected {
            sport: sport.into(),
        });
    }

    pub fn select_court(&self, court: impl Into<String>) {
        self.store.dispatch(AppEvent::CourtSelected {
            court: court.into(),
        });
    }

    pub fn acknowledge_outcome(&self) {
        self.store.dispatch(AppEvent::SubmissionAcknowledged);
    }

    // ---- derived views, computed on demand from current inputs ----

    /// Slots offered for the draft's date (empty until a date is chosen).
    pub fn available_slots(&self) -> Vec<Slot> {
        self.store.with_state(|state| {
            let Some(date) = state.booking.draft.date else {
                return Vec::new();
            };
            let declared = state
                .catalog
                .selected
                .as_ref()
                .map(|venue| venue.available_slots.as_slice())
                .unwrap_or_default();
            slots_for_date(declared, date)
        })
    }

    /// Longest purchasable duration from the draft's chosen start slot.
    pub fn max_hours(&self) -> u32 {
        let slots = self.available_slots();
        self.store.with_state(|state| {
            state
                .booking
                .draft
                .start_time
                .map(|start| max_contiguous_hours(&slots, start))
                .unwrap_or(1)
        })
    }

    // ---- submission ----

    /// Validate the draft and submit it. On success the draft is discarded
    /// and the caller is pointed at the profile view; on failure the draft
    /// is preserved and the gateway's message lands in the booking state.
    pub async fn submit(&self) -> Result<Navigation> {
        if self
            .store
            .with_state(|state| state.booking.phase == SubmissionPhase::Submitting)
        {
            return Err(TurfbookError::ValidationError {
                message: "A booking is already being submitted".to_string(),
            });
        }

        self.store.dispatch(AppEvent::SubmissionValidating);
        let request = match self.validate() {
            Ok(request) => request,
            Err(e) => {
                self.store.dispatch(AppEvent::SubmissionFailed {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        self.store.dispatch(AppEvent::SubmissionStarted);
        tracing::info!(venue_id = %request.venue_id, date = %request.date, "submitting booking");
        match self.api.create_booking(&request).await {
            Ok(_confirmation) => {
                self.store.dispatch(AppEvent::SubmissionSucceeded);
                Ok(Navigation::Profile)
            }
            Err(e) => {
                self.store.dispatch(AppEvent::SubmissionFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Preconditions, in order, aborting at the first failure. Nothing here
    /// touches the network.
    fn validate(&self) -> Result<BookingRequest> {
        self.store.with_state(|state| {
            let user_id = state
                .session
                .user_id()
                .ok_or(TurfbookError::UnauthorizedError)?
                .to_string();

            let venue = state
                .catalog
                .selected
                .as_ref()
                .ok_or_else(|| validation_error("No turf selected"))?;

            let draft = &state.booking.draft;
            let date = draft
                .date
                .ok_or_else(|| validation_error("Please select a date"))?;
            let start_time = draft
                .start_time
                .ok_or_else(|| validation_error("Please select a time slot"))?;
            let sport = draft
                .sport
                .clone()
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| validation_error("Please select a sport"))?;
            let court = draft
                .court
                .clone()
                .filter(|c| !c.trim().is_empty())
                .ok_or_else(|| validation_error("Please select a court"))?;

            let slots = slots_for_date(&venue.available_slots, date);
            // Guards against a selection made before the date changed.
            let run_end = contiguous_run_end(&slots, start_time)
                .ok_or_else(|| validation_error("Selected time slot is not available"))?;

            let (end_time, day_carry) =
                start_time.overflowing_add_signed(Duration::hours(i64::from(draft.hours)));
            if day_carry != 0 || end_time > run_end {
                let run_hours = max_contiguous_hours(&slots, start_time);
                return Err(validation_error(&format!(
                    "Only {} consecutive hour(s) are available from {}",
                    run_hours,
                    start_time.format("%H:%M")
                )));
            }

            Ok(BookingRequest {
                venue_id: venue.id.clone(),
                date,
                start_time,
                end_time,
                hours: draft.hours,
                sport,
                court,
                user_id,
                day: date.format("%A").to_string(),
            })
        })
    }

    // ---- profile-view passthroughs ----

    pub async fn load_my_bookings(&self) -> Result<Vec<Booking>> {
        self.store.dispatch(AppEvent::BookingsRequested);
        match self.api.fetch_my_bookings().await {
            Ok(bookings) => {
                self.store.dispatch(AppEvent::BookingsLoaded {
                    bookings: bookings.clone(),
                });
                Ok(bookings)
            }
            Err(e) => {
                self.store.dispatch(AppEvent::BookingsFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    pub async fn cancel(&self, id: &str) -> Result<Booking> {
        self.api.cancel_booking(id).await
    }
}

fn validation_error(message: &str) -> TurfbookError {
    TurfbookError::ValidationError {
        message: message.to_string(),
    }
}
