//! Arena entities: users, venues, and areas, addressed by dense ids.
use std::sync::OnceLock;

use crate::spatial::geometry::Point;

macro_rules! arena_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl $name {
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

arena_id!(
    /// Position of a user in `CheckinGraph::users`.
    UserId
);
arena_id!(
    /// Position of a venue in `CheckinGraph::venues`.
    VenueId
);
arena_id!(
    /// Position of an area in `CheckinGraph::areas`.
    AreaId
);

/// A user and their checkins.
///
/// `checkins` is sorted by venue id and holds positive counts only.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub(crate) key: String,
    pub(crate) location: Point,
    pub(crate) known: bool,
    pub(crate) checkins: Vec<(VenueId, u32)>,
}

impl User {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn location(&self) -> Point {
        self.location
    }

    /// `true` when the home location was supplied by the caller.
    pub fn is_known(&self) -> bool {
        self.known
    }

    pub fn checkins(&self) -> &[(VenueId, u32)] {
        &self.checkins
    }

    /// Checkin count at `venue`; zero when the user never checked in there.
    pub fn count_at(&self, venue: VenueId) -> u32 {
        self.checkins
            .binary_search_by_key(&venue, |&(v, _)| v)
            .map(|pos| self.checkins[pos].1)
            .unwrap_or(0)
    }

    /// Move an unknown-home user. Known homes are never moved.
    ///
    /// Returns `false` (and changes nothing) for known users.
    pub(crate) fn relocate(&mut self, location: Point) -> bool {
        if self.known {
            return false;
        }
        self.location = location;
        true
    }
}

/// A venue with its mutable influence scope.
#[derive(Debug, Clone)]
pub struct Venue {
    pub(crate) key: String,
    pub(crate) location: Point,
    pub(crate) scope: f64,
    pub(crate) total_checkins: u64,
    pub(crate) users: Vec<UserId>,
    pub(crate) neighbors: Vec<VenueId>,
    pub(crate) area_id: OnceLock<AreaId>,
    /// Areas whose aggregate scope includes this venue, sorted.
    pub(crate) member_of: Vec<AreaId>,
}

impl Venue {
    pub(crate) fn new(key: String, location: Point, scope: f64) -> Self {
        Self {
            key,
            location,
            scope,
            total_checkins: 0,
            users: Vec::new(),
            neighbors: Vec::new(),
            area_id: OnceLock::new(),
            member_of: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn scope(&self) -> f64 {
        self.scope
    }

    /// Sum of checkin counts across users.
    pub fn total_checkins(&self) -> u64 {
        self.total_checkins
    }

    /// Users with at least one checkin here, sorted.
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Sorted neighbor venues, never containing the venue itself.
    pub fn neighbors(&self) -> &[VenueId] {
        &self.neighbors
    }

    pub fn member_of(&self) -> &[AreaId] {
        &self.member_of
    }

    /// The venue's area; `None` only while the graph is being built.
    pub fn area_id(&self) -> Option<AreaId> {
        self.area_id.get().copied()
    }

    /// Set the area once. Later attempts are no-ops and return `false`.
    pub fn assign_area(&self, area: AreaId) -> bool {
        self.area_id.set(area).is_ok()
    }
}

/// A spatial aggregate of venues.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    pub(crate) key: String,
    pub(crate) centroid: Point,
    pub(crate) scope: f64,
    pub(crate) members: Vec<VenueId>,
    pub(crate) residents: Vec<VenueId>,
}

impl Area {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// `sqrt(Σ member.scope²)` as of the last refresh.
    pub fn scope(&self) -> f64 {
        self.scope
    }

    /// Venues whose scopes aggregate into this area, sorted.
    pub fn members(&self) -> &[VenueId] {
        &self.members
    }

    /// Venues whose `area_id` is this area, sorted.
    pub fn residents(&self) -> &[VenueId] {
        &self.residents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the set-once semantics of a venue's area.
    //
    // Given
    // -----
    // - A fresh venue assigned to area 3, then to area 7.
    //
    // Expect
    // ------
    // - First call returns true, second false; the area stays 3.
    fn venue_area_is_set_once() {
        // Arrange
        let venue = Venue::new("v".to_string(), Point::new(0.0, 0.0), 5.0);

        // Act
        let first = venue.assign_area(AreaId(3));
        let second = venue.assign_area(AreaId(7));

        // Assert
        assert!(first);
        assert!(!second);
        assert_eq!(venue.area_id(), Some(AreaId(3)));
    }

    #[test]
    // Purpose
    // -------
    // Verify checkin lookup and that known homes are never moved.
    //
    // Given
    // -----
    // - A known user with checkins at venues 1 and 4.
    //
    // Expect
    // ------
    // - Counts 2, 0, 5 at venues 1, 2, 4; `relocate` is refused.
    fn user_lookup_and_relocation_rules() {
        // Arrange
        let home = Point::new(1.0, 1.0);
        let mut user = User {
            key: "u".to_string(),
            location: home,
            known: true,
            checkins: vec![(VenueId(1), 2), (VenueId(4), 5)],
        };

        // Act
        let moved = user.relocate(Point::new(9.0, 9.0));

        // Assert
        assert_eq!(user.count_at(VenueId(1)), 2);
        assert_eq!(user.count_at(VenueId(2)), 0);
        assert_eq!(user.count_at(VenueId(4)), 5);
        assert!(!moved);
        assert_eq!(user.location(), home);
    }
}
