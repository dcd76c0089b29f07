//! Errors raised while building or mutating the checkin graph.
//!
//! Construction errors (missing locations, unseedable users, venues left
//! without an area) are fatal: no partially built graph is ever returned.
//! Configuration errors for the model and spatial options live here too,
//! since both option sets are consumed by `CheckinGraph::new`.

/// Result alias for model construction and mutation.
pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Inputs ----
    /// A venue in the checkin table has no entry in the venue registry.
    UnknownVenueLocation { venue: String },
    /// A user in the checkin table has no entry in the user registry.
    UnknownUserLocation { user: String },
    /// A registry coordinate is NaN or infinite.
    NonFiniteCoordinate { key: String, lat: f64, lng: f64 },
    /// The venue registry is empty.
    EmptyVenueRegistry,
    /// An unknown-home user has no checkins to seed a location from.
    UnseedableUser { user: String },

    // ---- Spatial ----
    /// Indexing finished without assigning this venue to an area.
    VenueWithoutArea { venue: String },
    /// Threshold distance must be finite and > 0.
    InvalidThreshold { value: f64, reason: &'static str },
    /// Grid cell side must be finite and > 0.
    InvalidScale { value: f64, reason: &'static str },
    /// Cell codes overflow for this scale and bounding box.
    GridTooFine { scale: f64 },
    /// Invalid centroid mode name.
    InvalidCentroidMode { name: String, reason: &'static str },

    // ---- Model options ----
    /// Initial scope must be finite and > 0.
    InvalidInitialScope { value: f64, reason: &'static str },
    /// Invalid competition function name.
    InvalidCompetitionFn { name: String, reason: &'static str },
    /// Invalid likelihood mode name.
    InvalidLikelihoodMode { name: String, reason: &'static str },
    /// Invalid checkin weighting name.
    InvalidWeighting { name: String, reason: &'static str },

    // ---- State ----
    /// A committed scope must be finite and > 0.
    InvalidScope { venue: String, value: f64 },
    /// A committed user location must be finite.
    InvalidLocation { user: String, lat: f64, lng: f64 },
}

impl ModelError {
    /// `true` for errors caused by incomplete input data.
    pub fn is_missing_data(&self) -> bool {
        matches!(
            self,
            ModelError::UnknownVenueLocation { .. }
                | ModelError::UnknownUserLocation { .. }
                | ModelError::VenueWithoutArea { .. }
                | ModelError::UnseedableUser { .. }
                | ModelError::EmptyVenueRegistry
        )
    }
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Inputs ----
            ModelError::UnknownVenueLocation { venue } => {
                write!(f, "Missing data: venue '{venue}' has no registered location")
            }
            ModelError::UnknownUserLocation { user } => {
                write!(f, "Missing data: user '{user}' has no entry in the user registry")
            }
            ModelError::NonFiniteCoordinate { key, lat, lng } => {
                write!(f, "Non-finite coordinate for '{key}': ({lat}, {lng})")
            }
            ModelError::EmptyVenueRegistry => {
                write!(f, "Missing data: the venue registry is empty")
            }
            ModelError::UnseedableUser { user } => {
                write!(f, "Missing data: user '{user}' has an unknown home and no checkins")
            }

            // ---- Spatial ----
            ModelError::VenueWithoutArea { venue } => {
                write!(f, "Missing data: venue '{venue}' was not assigned to any area")
            }
            ModelError::InvalidThreshold { value, reason } => {
                write!(f, "Invalid neighbor threshold {value}: {reason}")
            }
            ModelError::InvalidScale { value, reason } => {
                write!(f, "Invalid grid scale {value}: {reason}")
            }
            ModelError::GridTooFine { scale } => {
                write!(f, "Grid scale {scale} yields cell codes that overflow")
            }
            ModelError::InvalidCentroidMode { name, reason } => {
                write!(f, "Invalid centroid mode '{name}': {reason}")
            }

            // ---- Model options ----
            ModelError::InvalidInitialScope { value, reason } => {
                write!(f, "Invalid initial scope {value}: {reason}")
            }
            ModelError::InvalidCompetitionFn { name, reason } => {
                write!(f, "Invalid competition function '{name}': {reason}")
            }
            ModelError::InvalidLikelihoodMode { name, reason } => {
                write!(f, "Invalid likelihood mode '{name}': {reason}")
            }
            ModelError::InvalidWeighting { name, reason } => {
                write!(f, "Invalid checkin weighting '{name}': {reason}")
            }

            // ---- State ----
            ModelError::InvalidScope { venue, value } => {
                write!(f, "Invalid scope {value} for venue '{venue}': must be finite and > 0")
            }
            ModelError::InvalidLocation { user, lat, lng } => {
                write!(f, "Invalid location ({lat}, {lng}) for user '{user}': must be finite")
            }
        }
    }
}
