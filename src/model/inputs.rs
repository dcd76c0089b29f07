//! External input shapes: checkin table and location registries.
//!
//! Parsing and serialization of these shapes belong to the embedding
//! application; the engine only consumes the in-memory maps below.
use std::collections::HashMap;

use crate::{
    model::errors::{ModelError, ModelResult},
    spatial::geometry::Point,
};

/// Home location of a user as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserLocation {
    /// Disclosed home; never mutated by the estimator.
    Known(Point),
    /// Undisclosed home; seeded and re-estimated every outer iteration.
    Unknown,
}

/// Validated input bundle.
///
/// - `checkins`: user key → venue key → count.
/// - `venue_locations`: venue key → coordinate.
/// - `user_locations`: user key → [`UserLocation`].
///
/// Venues present in the registry but absent from the checkin table are
/// kept (they take part in the spatial partition and the competition term).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckinData {
    pub checkins: HashMap<String, HashMap<String, u32>>,
    pub venue_locations: HashMap<String, Point>,
    pub user_locations: HashMap<String, UserLocation>,
}

impl CheckinData {
    /// Bundle and validate the three inputs.
    ///
    /// # Errors
    /// - [`ModelError::EmptyVenueRegistry`] when no venue has a location.
    /// - [`ModelError::NonFiniteCoordinate`] for NaN/∞ coordinates.
    /// - [`ModelError::UnknownVenueLocation`] when a checked-in venue has no
    ///   location.
    /// - [`ModelError::UnknownUserLocation`] when a user of the checkin table
    ///   has no registry entry.
    pub fn new(
        checkins: HashMap<String, HashMap<String, u32>>, venue_locations: HashMap<String, Point>,
        user_locations: HashMap<String, UserLocation>,
    ) -> ModelResult<Self> {
        let data = Self { checkins, venue_locations, user_locations };
        data.validate()?;
        Ok(data)
    }

    /// Run the checks of [`CheckinData::new`] on an already assembled value.
    ///
    /// Offending keys are reported in sorted order so that the same input
    /// always yields the same error.
    pub fn validate(&self) -> ModelResult<()> {
        if self.venue_locations.is_empty() {
            return Err(ModelError::EmptyVenueRegistry);
        }
        let mut venues: Vec<(&String, &Point)> = self.venue_locations.iter().collect();
        venues.sort_by(|a, b| a.0.cmp(b.0));
        for (key, p) in venues {
            if !p.is_finite() {
                return Err(non_finite(key, p));
            }
        }

        let mut users: Vec<(&String, &UserLocation)> = self.user_locations.iter().collect();
        users.sort_by(|a, b| a.0.cmp(b.0));
        for (key, loc) in users {
            if let UserLocation::Known(p) = loc {
                if !p.is_finite() {
                    return Err(non_finite(key, p));
                }
            }
        }

        let mut table: Vec<(&String, &HashMap<String, u32>)> = self.checkins.iter().collect();
        table.sort_by(|a, b| a.0.cmp(b.0));
        for (user, visits) in table {
            if !self.user_locations.contains_key(user) {
                return Err(ModelError::UnknownUserLocation { user: user.clone() });
            }
            let mut keys: Vec<&String> = visits.keys().collect();
            keys.sort();
            if let Some(venue) = keys.into_iter().find(|v| !self.venue_locations.contains_key(*v)) {
                return Err(ModelError::UnknownVenueLocation { venue: venue.clone() });
            }
        }
        Ok(())
    }
}

fn non_finite(key: &str, p: &Point) -> ModelError {
    ModelError::NonFiniteCoordinate { key: key.to_string(), lat: p.lat, lng: p.lng }
}
