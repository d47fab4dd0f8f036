pub mod booking;
pub mod catalog;
pub mod event;
pub mod reducer;
pub mod session;
pub mod state;
pub mod store;

pub use crate::domain::ports::{BookingApi, ConfigProvider, Storage};
pub use crate::utils::error::Result;
pub use booking::Navigation;
pub use event::AppEvent;
pub use state::{AppState, SubmissionPhase};
