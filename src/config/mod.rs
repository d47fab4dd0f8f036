pub mod cli;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
#[cfg(feature = "cli")]
use chrono::{NaiveDate, NaiveTime};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "turfbook")]
#[command(about = "Command-line client for a sports-turf booking platform")]
pub struct CliConfig {
    /// Base URL of the booking API
    #[arg(long, default_value = "http://localhost:5000/api")]
    pub api_base_url: String,

    /// Directory holding the persisted session (token and profile)
    #[arg(long, default_value = ".turfbook")]
    pub data_dir: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List venues, with optional client-side filters
    Venues {
        /// Only venues offering this sport
        #[arg(long)]
        sport: Option<String>,
        /// Only venues at this "City, State" location
        #[arg(long)]
        location: Option<String>,
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one venue's details
    Venue { id: String },
    /// Show bookable slots for a venue on a date
    Slots {
        id: String,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Book a venue
    Book {
        id: String,
        #[arg(long)]
        date: NaiveDate,
        /// Start time of the first slot, HH:MM
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,
        /// Whole hours to book
        #[arg(long, default_value = "1")]
        hours: u32,
        #[arg(long)]
        sport: String,
        #[arg(long)]
        court: String,
    },
    /// Sign in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        password: String,
    },
    /// Forget the persisted session
    Logout,
    /// Show the signed-in user and their bookings
    Profile,
    /// Cancel a booking
    Cancel { id: String },
}

#[cfg(feature = "cli")]
fn parse_time(s: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("'{}' is not a valid time, expected HH:MM", s))
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn data_dir(&self) -> &str {
        &self.data_dir
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_path("data_dir", &self.data_dir)?;
        if let Command::Book { hours, .. } = &self.command {
            validate_range("hours", *hours, 1, 17)?;
        }
        Ok(())
    }
}
