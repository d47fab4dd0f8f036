pub mod config;
pub mod core;
pub mod domain;
pub mod gateway;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::booking::{BookingFlow, Navigation};
pub use crate::core::catalog::CatalogFlow;
pub use crate::core::session::SessionFlow;
pub use crate::core::store::AppStore;
pub use gateway::ApiClient;
pub use utils::error::{Result, TurfbookError};
