use crate::domain::model::{Booking, UserProfile, Venue};
use chrono::{NaiveDate, NaiveTime};

/// Every state mutation in the client is one of these, applied by the
/// reducer. Async flows dispatch a `*Requested` event, await the gateway,
/// then dispatch the matching `*Loaded`/`*Failed` event.
#[derive(Debug, Clone)]
pub enum AppEvent {
    // Venue catalog
    VenuesRequested,
    VenuesLoaded { venues: Vec<Venue> },
    VenuesFailed { message: String },
    VenueRequested { generation: u64 },
    VenueLoaded { generation: u64, venue: Venue },
    VenueFailed { generation: u64, message: String },
    SelectedVenueCleared,

    // Booking draft
    DateSelected { date: NaiveDate },
    StartSlotSelected { start_time: NaiveTime },
    HoursSelected { hours: u32 },
    SportSelected { sport: String },
    CourtSelected { court: String },

    // Booking submission
    SubmissionValidating,
    SubmissionStarted,
    SubmissionSucceeded,
    SubmissionFailed { message: String },
    SubmissionAcknowledged,

    // Bookings list
    BookingsRequested,
    BookingsLoaded { bookings: Vec<Booking> },
    BookingsFailed { message: String },

    // Session
    AuthRequested,
    LoggedIn { token: String, user: UserProfile },
    AuthFailed { message: String },
    SessionRestored { token: String, user: Option<UserProfile> },
    ProfileRequested,
    ProfileLoaded { user: UserProfile },
    ProfileFailed { message: String },
    LoggedOut,
}
