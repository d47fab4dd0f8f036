use clap::Parser;
use turfbook::config::Command;
use turfbook::core::booking::Navigation;
use turfbook::domain::slots::max_contiguous_hours;
use turfbook::domain::venues::{distinct_locations, distinct_sports, VenueFilter};
use turfbook::domain::model::{Registration, Venue};
use turfbook::utils::error::ErrorSeverity;
use turfbook::utils::{logger, validation::Validate};
use turfbook::{
    ApiClient, AppStore, BookingFlow, CatalogFlow, CliConfig, LocalStorage, Result, SessionFlow,
    TurfbookError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting turfbook CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    let storage = LocalStorage::new(config.data_dir.clone());
    let api = ApiClient::new(config.api_base_url.clone());
    let store = AppStore::new();
    let session = SessionFlow::new(&api, &store, &storage);

    // The analogue of reading local storage at boot.
    if let Err(e) = session.restore().await {
        tracing::warn!("Could not restore persisted session: {}", e);
    }

    match run(&config, &api, &store, &session).await {
        Ok(()) => {}
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // Token expired or invalid: drop the persisted session, the way
            // the browser build bounced the user to the login page.
            if matches!(e, TurfbookError::UnauthorizedError) {
                session.expire().await;
            }

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run(
    config: &CliConfig,
    api: &ApiClient,
    store: &AppStore,
    session: &SessionFlow<'_, ApiClient, LocalStorage>,
) -> Result<()> {
    let catalog = CatalogFlow::new(api, store);
    let booking = BookingFlow::new(api, store);

    match &config.command {
        Command::Venues {
            sport,
            location,
            search,
        } => {
            catalog.load_venues().await?;
            let filter = VenueFilter {
                sport: sport.clone(),
                location: location.clone(),
                search: search.clone(),
            };
            let venues = catalog.filtered(&filter);

            if venues.is_empty() {
                println!("No turfs matched your filters.");
            } else {
                for venue in &venues {
                    println!(
                        "{}  {}  ₹{}/hr  [{}]  ({})",
                        venue.id,
                        venue.name,
                        venue.price_per_hour,
                        venue.sport_types.join(", "),
                        venue.location
                    );
                }
            }

            let all = store.state().catalog.venues;
            if filter.is_empty() && !all.is_empty() {
                println!();
                println!("Sports: {}", distinct_sports(&all).join(", "));
                println!("Locations: {}", distinct_locations(&all).join(" | "));
            }
        }

        Command::Venue { id } => match catalog.load_venue(id).await {
            Ok(venue) => print_venue(&venue),
            Err(TurfbookError::NotFoundError { .. }) => print_not_found(id),
            Err(e) => return Err(e),
        },

        Command::Slots { id, date } => {
            match catalog.load_venue(id).await {
                Ok(venue) => {
                    booking.select_date(*date);
                    let slots = booking.available_slots();
                    println!("{} — {} ({})", venue.name, date.format("%A"), date);
                    if slots.is_empty() {
                        println!("No bookable slots on this date.");
                    }
                    for slot in &slots {
                        let run = max_contiguous_hours(&slots, slot.start_time);
                        println!(
                            "  {} - {}  (up to {} hr from here)",
                            slot.start_time.format("%H:%M"),
                            slot.end_time.format("%H:%M"),
                            run
                        );
                    }
                }
                Err(TurfbookError::NotFoundError { .. }) => print_not_found(id),
                Err(e) => return Err(e),
            }
        }

        Command::Book {
            id,
            date,
            start,
            hours,
            sport,
            court,
        } => {
            match catalog.load_venue(id).await {
                Ok(_) => {}
                Err(TurfbookError::NotFoundError { .. }) => {
                    print_not_found(id);
                    return Ok(());
                }
                Err(e) => return Err(e),
            }

            booking.select_date(*date);
            booking.select_start(*start);
            booking.select_hours(*hours);
            booking.select_sport(sport.clone());
            booking.select_court(court.clone());

            let navigation = booking.submit().await?;
            println!("✅ Booking created successfully!");
            booking.acknowledge_outcome();

            if navigation == Navigation::Profile {
                show_profile(store, session, &booking).await?;
            }
        }

        Command::Login { email, password } => {
            let user = session.login(email, password).await?;
            println!("✅ Signed in as {} <{}>", user.name, user.email);
        }

        Command::Register {
            name,
            email,
            phone,
            password,
        } => {
            let registration = Registration {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                password: password.clone(),
            };
            let user = session.register(registration).await?;
            println!("✅ Account created for {} <{}>", user.name, user.email);
        }

        Command::Logout => {
            session.logout().await;
            println!("✅ Signed out.");
        }

        Command::Profile => {
            show_profile(store, session, &booking).await?;
        }

        Command::Cancel { id } => {
            let cancelled = booking.cancel(id).await?;
            println!(
                "✅ Booking {} cancelled ({})",
                cancelled.id,
                cancelled.status.as_deref().unwrap_or("cancelled")
            );
        }
    }

    Ok(())
}

async fn show_profile(
    store: &AppStore,
    session: &SessionFlow<'_, ApiClient, LocalStorage>,
    booking: &BookingFlow<'_, ApiClient>,
) -> Result<()> {
    if !store.state().session.authenticated {
        return Err(TurfbookError::UnauthorizedError);
    }

    let user = session.fetch_profile().await?;
    println!("My Profile");
    println!("  Name:  {}", user.name);
    println!("  Email: {}", user.email);
    if let Some(phone) = &user.phone {
        println!("  Phone: {}", phone);
    }

    let bookings = booking.load_my_bookings().await?;
    println!();
    println!("My Bookings");
    if bookings.is_empty() {
        println!("  (none yet)");
    }
    for entry in &bookings {
        println!(
            "  {}  {}  {} - {}  {}  {}",
            entry.id,
            entry.date,
            entry.start_time.format("%H:%M"),
            entry.end_time.format("%H:%M"),
            entry.venue_name.as_deref().unwrap_or("-"),
            entry.status.as_deref().unwrap_or("confirmed")
        );
    }

    Ok(())
}

fn print_venue(venue: &Venue) {
    println!("{}", venue.name);
    println!("  Location: {}", venue.location);
    if let (Some(rating), Some(count)) = (venue.rating, venue.review_count) {
        println!("  Rating:   {} ({} reviews)", rating, count);
    }
    if !venue.description.is_empty() {
        println!("  {}", venue.description);
    }
    println!("  Sports:   {}", venue.sport_types.join(", "));
    println!("  Courts:   {}", venue.courts.join(", "));
    if !venue.amenities.is_empty() {
        println!("  Amenities: {}", venue.amenities.join(", "));
    }
    println!("  Price:    ₹{} per hour", venue.price_per_hour);
    println!("  Declared slots: {}", venue.available_slots.len());
}

fn print_not_found(id: &str) {
    println!("404 — Turf '{}' not found", id);
    println!("💡 List turfs with `turfbook venues` to find a valid id");
}
