//! The checkin graph: an owned arena of users, venues, and areas.
//!
//! Construction runs the spatial indexer once and resolves every external
//! key into a dense id. Afterwards the graph only changes through the commit
//! methods, which the estimation coordinator calls between parallel compute
//! phases.
use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::{
    model::{
        entities::{Area, AreaId, User, UserId, Venue, VenueId},
        errors::{ModelError, ModelResult},
        inputs::{CheckinData, UserLocation},
        options::ModelOptions,
    },
    spatial::{
        geometry::{Point, weighted_mean},
        indexer::{AreaKey, SpatialIndexer},
        options::SpatialOptions,
    },
};

/// Arena of users, venues, and areas with key lookup.
///
/// Users and venues are ordered by their external key; areas follow the
/// indexer's order (ascending cell code, or anchor venue order).
#[derive(Debug, Clone)]
pub struct CheckinGraph {
    options: ModelOptions,
    users: Vec<User>,
    venues: Vec<Venue>,
    areas: Vec<Area>,
    venue_area: Vec<AreaId>,
    user_index: HashMap<String, UserId>,
    venue_index: HashMap<String, VenueId>,
    area_index: HashMap<String, AreaId>,
    unknown_users: Vec<UserId>,
    active_venues: Vec<VenueId>,
}

impl CheckinGraph {
    /// Build the graph from validated inputs.
    ///
    /// Steps:
    /// - order venues by key and index their coordinates,
    /// - order users by key, attach checkins (dropping zero counts) and seed
    ///   unknown homes at the checkin-weighted center of mass of their venues,
    /// - materialize areas, assign every venue to exactly one area, and
    ///   compute aggregate area scopes.
    ///
    /// # Errors
    /// - Input validation errors from [`CheckinData::validate`].
    /// - Option validation errors.
    /// - [`ModelError::UnseedableUser`] for an unknown-home user with no
    ///   checkins.
    /// - [`ModelError::VenueWithoutArea`] if indexing left a venue unassigned.
    pub fn new(
        data: &CheckinData, options: ModelOptions, spatial: SpatialOptions,
    ) -> ModelResult<Self> {
        data.validate()?;
        options.validate()?;

        // ---- Venues ----
        let mut venue_keys: Vec<&String> = data.venue_locations.keys().collect();
        venue_keys.sort();
        let points: Vec<Point> = venue_keys
            .iter()
            .map(|k| {
                data.venue_locations
                    .get(*k)
                    .copied()
                    .ok_or_else(|| ModelError::UnknownVenueLocation { venue: (*k).clone() })
            })
            .collect::<ModelResult<_>>()?;
        let layout = SpatialIndexer::new(spatial).index(&points)?;

        let mut venues: Vec<Venue> = venue_keys
            .iter()
            .zip(&points)
            .map(|(k, p)| Venue::new((*k).clone(), *p, options.initial_scope))
            .collect();
        let venue_index: HashMap<String, VenueId> =
            venue_keys.iter().enumerate().map(|(i, k)| ((*k).clone(), VenueId(i))).collect();
        for (venue, nb) in venues.iter_mut().zip(layout.neighbors) {
            venue.neighbors = nb.into_iter().map(VenueId).collect();
        }

        // ---- Users ----
        let mut user_keys: Vec<&String> = data.user_locations.keys().collect();
        user_keys.sort();
        let mut users = Vec::with_capacity(user_keys.len());
        let mut unknown_users = Vec::new();
        for (uid, key) in user_keys.iter().enumerate() {
            let mut checkins: Vec<(VenueId, u32)> = match data.checkins.get(*key) {
                Some(visits) => visits
                    .iter()
                    .filter(|&(_, &count)| count > 0)
                    .map(|(venue, &count)| {
                        let missing = || ModelError::UnknownVenueLocation { venue: venue.clone() };
                        venue_index.get(venue).map(|&v| (v, count)).ok_or_else(missing)
                    })
                    .collect::<ModelResult<_>>()?,
                None => Vec::new(),
            };
            checkins.sort_unstable();
            for &(v, count) in &checkins {
                let venue = &mut venues[v.index()];
                venue.users.push(UserId(uid));
                venue.total_checkins += u64::from(count);
            }

            let registered = data
                .user_locations
                .get(*key)
                .ok_or_else(|| ModelError::UnknownUserLocation { user: (*key).clone() })?;
            let (location, known) = match *registered {
                UserLocation::Known(p) => (p, true),
                UserLocation::Unknown => {
                    let seed = weighted_mean(
                        checkins.iter().map(|&(v, c)| (&venues[v.index()].location, f64::from(c))),
                    )
                    .ok_or_else(|| ModelError::UnseedableUser { user: (*key).clone() })?;
                    unknown_users.push(UserId(uid));
                    (seed, false)
                }
            };
            users.push(User { key: (*key).clone(), location, known, checkins });
        }
        let user_index: HashMap<String, UserId> =
            user_keys.iter().enumerate().map(|(i, k)| ((*k).clone(), UserId(i))).collect();

        // ---- Areas ----
        let mut areas = Vec::with_capacity(layout.areas.len());
        let mut area_index = HashMap::with_capacity(layout.areas.len());
        for (aid, entry) in layout.areas.into_iter().enumerate() {
            let id = AreaId(aid);
            let key = match entry.key {
                AreaKey::Cell(code) => code.to_string(),
                AreaKey::Anchor(anchor) => venues[anchor].key.clone(),
            };
            for &r in &entry.residents {
                if !venues[r].assign_area(id) {
                    warn!(venue = %venues[r].key, area = %key, "venue already assigned to an area");
                }
            }
            for &m in &entry.members {
                venues[m].member_of.push(id);
            }
            area_index.insert(key.clone(), id);
            areas.push(Area {
                key,
                centroid: entry.centroid,
                scope: 0.0,
                members: entry.members.into_iter().map(VenueId).collect(),
                residents: entry.residents.into_iter().map(VenueId).collect(),
            });
        }
        let venue_area = venues
            .iter()
            .map(|v| {
                v.area_id().ok_or_else(|| ModelError::VenueWithoutArea { venue: v.key.clone() })
            })
            .collect::<ModelResult<Vec<_>>>()?;
        let active_venues =
            (0..venues.len()).filter(|&i| venues[i].total_checkins > 0).map(VenueId).collect();

        let mut graph = Self {
            options,
            users,
            venues,
            areas,
            venue_area,
            user_index,
            venue_index,
            area_index,
            unknown_users,
            active_venues,
        };
        graph.refresh_area_scopes();
        info!(
            users = graph.users.len(),
            unknown_users = graph.unknown_users.len(),
            venues = graph.venues.len(),
            active_venues = graph.active_venues.len(),
            areas = graph.areas.len(),
            "checkin graph built"
        );
        Ok(graph)
    }

    // ---- Accessors ----

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn user(&self, id: UserId) -> &User {
        &self.users[id.index()]
    }

    pub fn venue(&self, id: VenueId) -> &Venue {
        &self.venues[id.index()]
    }

    pub fn area(&self, id: AreaId) -> &Area {
        &self.areas[id.index()]
    }

    /// The area a venue is assigned to.
    pub fn area_of(&self, venue: VenueId) -> &Area {
        self.area(self.venue_area[venue.index()])
    }

    pub fn user_id(&self, key: &str) -> Option<UserId> {
        self.user_index.get(key).copied()
    }

    pub fn venue_id(&self, key: &str) -> Option<VenueId> {
        self.venue_index.get(key).copied()
    }

    pub fn area_id(&self, key: &str) -> Option<AreaId> {
        self.area_index.get(key).copied()
    }

    /// Users whose home is re-estimated, in id order.
    pub fn unknown_users(&self) -> &[UserId] {
        &self.unknown_users
    }

    /// Venues with at least one checkin, in id order.
    pub fn active_venues(&self) -> &[VenueId] {
        &self.active_venues
    }

    // ---- Commit phase ----

    /// Apply staged venue scopes.
    ///
    /// All values are validated before any is written, so a rejected batch
    /// leaves the graph untouched. Area scopes are not refreshed here; call
    /// [`CheckinGraph::refresh_area_scopes`] once the batch is in.
    ///
    /// # Errors
    /// - [`ModelError::InvalidScope`] for a non-finite or non-positive scope.
    pub fn commit_scopes(&mut self, staged: &[(VenueId, f64)]) -> ModelResult<()> {
        if let Some(&(v, value)) = staged.iter().find(|(_, s)| !(s.is_finite() && *s > 0.0)) {
            return Err(ModelError::InvalidScope { venue: self.venue(v).key.clone(), value });
        }
        for &(v, scope) in staged {
            self.venues[v.index()].scope = scope;
        }
        Ok(())
    }

    /// Apply staged user locations and return how many users moved.
    ///
    /// Known homes are skipped. The batch is validated before writing.
    ///
    /// # Errors
    /// - [`ModelError::InvalidLocation`] for a non-finite coordinate.
    pub fn commit_locations(&mut self, staged: &[(UserId, Point)]) -> ModelResult<usize> {
        if let Some(&(u, p)) = staged.iter().find(|(_, p)| !p.is_finite()) {
            return Err(ModelError::InvalidLocation {
                user: self.user(u).key.clone(),
                lat: p.lat,
                lng: p.lng,
            });
        }
        let mut moved = 0;
        for &(u, p) in staged {
            if self.users[u.index()].relocate(p) {
                moved += 1;
            }
        }
        Ok(moved)
    }

    /// Recompute every area scope as `sqrt(Σ member.scope²)`.
    pub fn refresh_area_scopes(&mut self) {
        let venues = &self.venues;
        let scopes: Vec<f64> = self
            .areas
            .par_iter()
            .map(|a| a.members.iter().map(|m| venues[m.index()].scope.powi(2)).sum::<f64>().sqrt())
            .collect();
        for (area, scope) in self.areas.iter_mut().zip(scopes) {
            area.scope = scope;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::options::{AreaStrategy, CentroidMode};
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction on the two-venue threshold fixture: ids, neighbors,
    //   areas, seeded locations, aggregate scopes.
    // - Grid construction: same cell ⇒ same area; non-adjacent ⇒ not linked.
    // - Commit semantics and area-scope consistency.
    // - Construction failures for unseedable users.
    //
    // They intentionally DO NOT cover:
    // - Likelihood values (see `likelihood`).
    // -------------------------------------------------------------------------

    fn two_venue_data(user1: UserLocation) -> CheckinData {
        CheckinData::new(
            HashMap::from([
                ("u1".to_string(), HashMap::from([("A".to_string(), 10)])),
                ("u2".to_string(), HashMap::from([("B".to_string(), 10)])),
            ]),
            HashMap::from([
                ("A".to_string(), Point::new(0.0, 0.0)),
                ("B".to_string(), Point::new(0.0005, 0.0005)),
            ]),
            HashMap::from([
                ("u1".to_string(), user1),
                ("u2".to_string(), UserLocation::Known(Point::new(0.0005, 0.0005))),
            ]),
        )
        .expect("fixture is consistent")
    }

    fn threshold_options() -> SpatialOptions {
        SpatialOptions::new(AreaStrategy::threshold(100.0).expect("valid"), CentroidMode::Fixed)
            .expect("valid")
    }

    #[test]
    // Purpose
    // -------
    // Verify the threshold fixture: A and B are neighbors, each anchors an
    // area {A, B}, and area scopes aggregate both venues.
    //
    // Given
    // -----
    // - A (0, 0), B (0.0005, 0.0005), threshold 100 m, initial scope 5.
    //
    // Expect
    // ------
    // - Symmetric neighbors, area scope √50, user 1 seeded at A.
    fn threshold_fixture_builds_expected_graph() {
        // Arrange
        let data = two_venue_data(UserLocation::Unknown);

        // Act
        let g = CheckinGraph::new(&data, ModelOptions::default(), threshold_options())
            .expect("graph builds");

        // Assert
        let a = g.venue_id("A").expect("A exists");
        let b = g.venue_id("B").expect("B exists");
        assert_eq!(g.venue(a).neighbors(), &[b]);
        assert_eq!(g.venue(b).neighbors(), &[a]);
        assert_eq!(g.areas().len(), 2);
        assert_eq!(g.area_of(a).key(), "A");
        assert_eq!(g.area_of(a).members(), &[a, b]);
        assert_relative_eq!(g.area_of(a).scope(), 50f64.sqrt());
        let u1 = g.user_id("u1").expect("u1 exists");
        assert_eq!(g.unknown_users(), &[u1]);
        assert_eq!(g.user(u1).location(), Point::new(0.0, 0.0));
        assert_eq!(g.active_venues(), &[a, b]);
        assert_eq!(g.venue(a).total_checkins(), 10);
    }

    #[test]
    // Purpose
    // -------
    // Check grid partition correctness on the graph level.
    //
    // Given
    // -----
    // - Venues p (0.1, 0.1), q (0.5, 0.5) in one cell and r (2.5, 2.5) two
    //   cells away; scale 1.
    //
    // Expect
    // ------
    // - p and q share an area id and are neighbors; r is linked to neither.
    fn grid_graph_groups_cell_mates() {
        // Arrange
        let data = CheckinData::new(
            HashMap::new(),
            HashMap::from([
                ("p".to_string(), Point::new(0.1, 0.1)),
                ("q".to_string(), Point::new(0.5, 0.5)),
                ("r".to_string(), Point::new(2.5, 2.5)),
            ]),
            HashMap::new(),
        )
        .expect("consistent");
        let strategy = AreaStrategy::grid(1.0).expect("valid");
        let spatial = SpatialOptions::new(strategy, CentroidMode::Fixed).expect("valid");

        // Act
        let g = CheckinGraph::new(&data, ModelOptions::default(), spatial).expect("graph builds");

        // Assert
        let (p, q, r) = (
            g.venue_id("p").expect("p"),
            g.venue_id("q").expect("q"),
            g.venue_id("r").expect("r"),
        );
        assert_eq!(g.venue(p).area_id(), g.venue(q).area_id());
        assert_ne!(g.venue(p).area_id(), g.venue(r).area_id());
        assert!(g.venue(p).neighbors().contains(&q));
        assert!(!g.venue(p).neighbors().contains(&r));
        assert!(!g.venue(r).neighbors().contains(&q));
        assert_eq!(g.area_of(p).key(), "0");
        assert!(g.active_venues().is_empty());
        // Reassignment is a no-op.
        assert!(!g.venue(p).assign_area(AreaId(99)));
    }

    #[test]
    // Purpose
    // -------
    // Verify commit semantics and area-scope consistency.
    //
    // Given
    // -----
    // - The threshold fixture; staged scopes A = 3, B = 4; then a batch with
    //   a negative scope.
    //
    // Expect
    // ------
    // - After refresh, both area scopes equal 5; the bad batch is rejected
    //   and leaves scopes unchanged.
    fn commit_scopes_keeps_area_scopes_consistent() {
        // Arrange
        let data = two_venue_data(UserLocation::Unknown);
        let mut g = CheckinGraph::new(&data, ModelOptions::default(), threshold_options())
            .expect("graph builds");
        let a = g.venue_id("A").expect("A");
        let b = g.venue_id("B").expect("B");

        // Act
        g.commit_scopes(&[(a, 3.0), (b, 4.0)]).expect("valid scopes");
        g.refresh_area_scopes();
        let bad = g.commit_scopes(&[(a, 1.0), (b, -1.0)]);

        // Assert
        for area in g.areas() {
            assert_relative_eq!(area.scope(), 5.0);
        }
        assert!(matches!(bad, Err(ModelError::InvalidScope { .. })), "got {bad:?}");
        assert_eq!(g.venue(a).scope(), 3.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify location commits move unknown users only.
    //
    // Given
    // -----
    // - The threshold fixture with u1 unknown and u2 known; both staged.
    //
    // Expect
    // ------
    // - One user moved; u2 stays at its registered home.
    fn commit_locations_skips_known_users() {
        // Arrange
        let data = two_venue_data(UserLocation::Unknown);
        let mut g = CheckinGraph::new(&data, ModelOptions::default(), threshold_options())
            .expect("graph builds");
        let u1 = g.user_id("u1").expect("u1");
        let u2 = g.user_id("u2").expect("u2");
        let target = Point::new(0.0001, 0.0001);

        // Act
        let moved = g.commit_locations(&[(u1, target), (u2, target)]).expect("finite points");

        // Assert
        assert_eq!(moved, 1);
        assert_eq!(g.user(u1).location(), target);
        assert_eq!(g.user(u2).location(), Point::new(0.0005, 0.0005));
    }

    #[test]
    // Purpose
    // -------
    // Ensure an unknown-home user without checkins aborts construction.
    //
    // Given
    // -----
    // - A registry entry `ghost: Unknown` with no checkins.
    //
    // Expect
    // ------
    // - `UnseedableUser { user: "ghost" }`.
    fn unknown_user_without_checkins_is_fatal() {
        // Arrange
        let mut data = two_venue_data(UserLocation::Known(Point::new(0.0, 0.0)));
        data.user_locations.insert("ghost".to_string(), UserLocation::Unknown);

        // Act
        let err = CheckinGraph::new(&data, ModelOptions::default(), threshold_options())
            .unwrap_err();

        // Assert
        assert_eq!(err, ModelError::UnseedableUser { user: "ghost".to_string() });
    }
}
