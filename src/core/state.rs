use crate::domain::model::{Booking, BookingDraft, UserProfile, Venue};

/// The whole client state. One value, owned by the store, mutated only by
/// the reducer.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub catalog: CatalogState,
    pub booking: BookingState,
    pub session: SessionState,
}

/// Venue list and the currently selected venue, with per-operation
/// loading/error flags.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub venues: Vec<Venue>,
    pub loading: bool,
    pub error: Option<String>,

    pub selected: Option<Venue>,
    pub selected_loading: bool,
    pub selected_error: Option<String>,
    /// Generation of the most recent detail fetch. Completions carrying an
    /// older generation are discarded by the reducer.
    pub selected_generation: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookingState {
    pub draft: BookingDraft,
    pub phase: SubmissionPhase,
    pub error: Option<String>,

    pub bookings: Vec<Booking>,
    pub loading: bool,
    pub bookings_error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,

    pub profile_loading: bool,
    pub profile_error: Option<String>,
}

impl SessionState {
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }
}
