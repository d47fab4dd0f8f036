use crate::domain::model::Venue;
use std::collections::BTreeSet;

/// Client-side venue list filter. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct VenueFilter {
    pub sport: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
}

impl VenueFilter {
    pub fn is_empty(&self) -> bool {
        self.sport.is_none() && self.location.is_none() && self.search.is_none()
    }
}

pub fn filter_venues<'a>(venues: &'a [Venue], filter: &VenueFilter) -> Vec<&'a Venue> {
    venues
        .iter()
        .filter(|venue| {
            let match_sport = filter
                .sport
                .as_deref()
                .map_or(true, |sport| venue.sport_types.iter().any(|s| s == sport));

            let match_location = filter
                .location
                .as_deref()
                .map_or(true, |location| venue.location.to_string() == location);

            let match_name = filter.search.as_deref().map_or(true, |query| {
                venue.name.to_lowercase().contains(&query.to_lowercase())
            });

            match_sport && match_location && match_name
        })
        .collect()
}

/// Distinct sport types across a venue list, for the filter dropdown.
pub fn distinct_sports(venues: &[Venue]) -> Vec<String> {
    venues
        .iter()
        .flat_map(|venue| venue.sport_types.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct "City, State" labels across a venue list.
pub fn distinct_locations(venues: &[Venue]) -> Vec<String> {
    venues
        .iter()
        .map(|venue| venue.location.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
