use crate::core::event::AppEvent;
use crate::core::state::{AppState, SessionState, SubmissionPhase};
use crate::domain::model::BookingDraft;

/// The single serialized reducer. Synchronous, no I/O; every transition the
/// client can make is written out here.
pub fn reduce(state: &mut AppState, event: AppEvent) {
    match event {
        // ---- venue catalog ----
        AppEvent::VenuesRequested => {
            state.catalog.loading = true;
            state.catalog.error = None;
        }
        AppEvent::VenuesLoaded { venues } => {
            state.catalog.loading = false;
            state.catalog.venues = venues;
        }
        AppEvent::VenuesFailed { message } => {
            state.catalog.loading = false;
            state.catalog.error = Some(message);
        }

        AppEvent::VenueRequested { generation } => {
            state.catalog.selected_generation = generation;
            state.catalog.selected_loading = true;
            state.catalog.selected_error = None;
        }
        AppEvent::VenueLoaded { generation, venue } => {
            if generation != state.catalog.selected_generation {
                tracing::debug!(generation, "discarding stale venue detail response");
                return;
            }
            state.catalog.selected_loading = false;
            state.catalog.selected = Some(venue);
        }
        AppEvent::VenueFailed {
            generation,
            message,
        } => {
            if generation != state.catalog.selected_generation {
                tracing::debug!(generation, "discarding stale venue detail failure");
                return;
            }
            state.catalog.selected_loading = false;
            state.catalog.selected_error = Some(message);
        }
        AppEvent::SelectedVenueCleared => {
            // Component teardown: the working draft goes with the venue.
            state.catalog.selected = None;
            state.catalog.selected_error = None;
            state.booking.draft = BookingDraft::default();
            state.booking.phase = SubmissionPhase::Idle;
            state.booking.error = None;
        }

        // ---- booking draft ----
        AppEvent::DateSelected { date } => {
            state.booking.draft.date = Some(date);
            // A new date invalidates the previous slot choice.
            state.booking.draft.start_time = None;
            state.booking.draft.hours = 1;
        }
        AppEvent::StartSlotSelected { start_time } => {
            state.booking.draft.start_time = Some(start_time);
        }
        AppEvent::HoursSelected { hours } => {
            state.booking.draft.hours = hours.max(1);
        }
        AppEvent::SportSelected { sport } => {
            state.booking.draft.sport = Some(sport);
        }
        AppEvent::CourtSelected { court } => {
            state.booking.draft.court = Some(court);
        }

        // ---- booking submission ----
        AppEvent::SubmissionValidating => {
            state.booking.phase = SubmissionPhase::Validating;
            state.booking.error = None;
        }
        AppEvent::SubmissionStarted => {
            state.booking.phase = SubmissionPhase::Submitting;
        }
        AppEvent::SubmissionSucceeded => {
            state.booking.phase = SubmissionPhase::Succeeded;
            state.booking.draft = BookingDraft::default();
        }
        AppEvent::SubmissionFailed { message } => {
            // Draft stays put so the user can fix and resubmit.
            state.booking.phase = SubmissionPhase::Failed;
            state.booking.error = Some(message);
        }
        AppEvent::SubmissionAcknowledged => {
            state.booking.phase = SubmissionPhase::Idle;
            state.booking.error = None;
        }

        // ---- bookings list ----
        AppEvent::BookingsRequested => {
            state.booking.loading = true;
            state.booking.bookings_error = None;
        }
        AppEvent::BookingsLoaded { bookings } => {
            state.booking.loading = false;
            state.booking.bookings = bookings;
        }
        AppEvent::BookingsFailed { message } => {
            state.booking.loading = false;
            state.booking.bookings_error = Some(message);
        }

        // ---- session ----
        AppEvent::AuthRequested => {
            state.session.loading = true;
            state.session.error = None;
        }
        AppEvent::LoggedIn { token, user } => {
            state.session.loading = false;
            state.session.token = Some(token);
            state.session.user = Some(user);
            state.session.authenticated = true;
        }
        AppEvent::AuthFailed { message } => {
            state.session.loading = false;
            state.session.error = Some(message);
        }
        AppEvent::SessionRestored { token, user } => {
            state.session.token = Some(token);
            state.session.user = user;
            state.session.authenticated = true;
        }
        AppEvent::ProfileRequested => {
            state.session.profile_loading = true;
            state.session.profile_error = None;
        }
        AppEvent::ProfileLoaded { user } => {
            state.session.profile_loading = false;
            state.session.user = Some(user);
        }
        AppEvent::ProfileFailed { message } => {
            state.session.profile_loading = false;
            state.session.profile_error = Some(message);
        }
        AppEvent::LoggedOut => {
            state.session = SessionState::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Location, Venue};
    use chrono::{NaiveDate, NaiveTime};

    fn venue(id: &str) -> Venue {
        Venue {
            id: id.to_string(),
            name: "Champions Sports Arena".to_string(),
            description: String::new(),
            location: Location {
                city: "Pune".to_string(),
                state: "Maharashtra".to_string(),
            },
            sport_types: vec!["Football".to_string()],
            courts: vec!["Court 1".to_string()],
            price_per_hour: 1200.0,
            images: vec![],
            available_slots: vec![],
            amenities: vec![],
            rating: None,
            review_count: None,
        }
    }

    #[test]
    fn test_date_change_resets_start_slot_and_hours() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            AppEvent::DateSelected {
                date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            },
        );
        reduce(
            &mut state,
            AppEvent::StartSlotSelected {
                start_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            },
        );
        reduce(&mut state, AppEvent::HoursSelected { hours: 3 });
        assert_eq!(state.booking.draft.hours, 3);
        assert!(state.booking.draft.start_time.is_some());

        reduce(
            &mut state,
            AppEvent::DateSelected {
                date: NaiveDate::from_ymd_opt(2026, 8, 11).unwrap(),
            },
        );
        assert!(state.booking.draft.start_time.is_none());
        assert_eq!(state.booking.draft.hours, 1);
    }

    #[test]
    fn test_stale_venue_detail_is_discarded() {
        let mut state = AppState::default();
        reduce(&mut state, AppEvent::VenueRequested { generation: 1 });
        reduce(&mut state, AppEvent::VenueRequested { generation: 2 });

        // The slow first response lands after the second fetch began.
        reduce(
            &mut state,
            AppEvent::VenueLoaded {
                generation: 1,
                venue: venue("stale"),
            },
        );
        assert!(state.catalog.selected.is_none());
        assert!(state.catalog.selected_loading);

        reduce(
            &mut state,
            AppEvent::VenueLoaded {
                generation: 2,
                venue: venue("fresh"),
            },
        );
        assert_eq!(state.catalog.selected.as_ref().unwrap().id, "fresh");
        assert!(!state.catalog.selected_loading);
    }

    #[test]
    fn test_stale_venue_failure_is_discarded() {
        let mut state = AppState::default();
        reduce(&mut state, AppEvent::VenueRequested { generation: 3 });
        reduce(
            &mut state,
            AppEvent::VenueFailed {
                generation: 2,
                message: "old failure".to_string(),
            },
        );
        assert!(state.catalog.selected_error.is_none());
    }

    #[test]
    fn test_submission_success_clears_draft_failure_preserves_it() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            AppEvent::DateSelected {
                date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            },
        );
        reduce(
            &mut state,
            AppEvent::SportSelected {
                sport: "Football".to_string(),
            },
        );

        reduce(
            &mut state,
            AppEvent::SubmissionFailed {
                message: "Slot already booked".to_string(),
            },
        );
        assert_eq!(state.booking.phase, SubmissionPhase::Failed);
        assert!(state.booking.draft.date.is_some());
        assert_eq!(state.booking.error.as_deref(), Some("Slot already booked"));

        reduce(&mut state, AppEvent::SubmissionAcknowledged);
        assert_eq!(state.booking.phase, SubmissionPhase::Idle);
        assert!(state.booking.error.is_none());

        reduce(&mut state, AppEvent::SubmissionSucceeded);
        assert_eq!(state.booking.phase, SubmissionPhase::Succeeded);
        assert_eq!(state.booking.draft, Default::default());
    }

    #[test]
    fn test_teardown_clears_selected_venue_and_draft() {
        let mut state = AppState::default();
        reduce(&mut state, AppEvent::VenueRequested { generation: 1 });
        reduce(
            &mut state,
            AppEvent::VenueLoaded {
                generation: 1,
                venue: venue("t1"),
            },
        );
        reduce(
            &mut state,
            AppEvent::DateSelected {
                date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            },
        );

        reduce(&mut state, AppEvent::SelectedVenueCleared);
        assert!(state.catalog.selected.is_none());
        assert!(state.booking.draft.date.is_none());
        assert_eq!(state.booking.phase, SubmissionPhase::Idle);
    }

    #[test]
    fn test_logout_resets_session() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            AppEvent::SessionRestored {
                token: "tok".to_string(),
                user: None,
            },
        );
        assert!(state.session.authenticated);

        reduce(&mut state, AppEvent::LoggedOut);
        assert!(!state.session.authenticated);
        assert!(state.session.token.is_none());
        assert!(state.session.user.is_none());
    }
}
