//! Coordinate validation.
//!
//! Everything that ends up on the map passes through here; a coordinate that
//! fails validation is treated as absent, never as an error.

use serde::{Deserialize, Serialize};

/// A validated geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Returns `Some` only for a finite, in-range pair. Callers cannot
    /// distinguish "missing" from "malformed"; both collapse to `None`.
    pub fn validated(lat: f64, lng: f64) -> Option<Self> {
        if is_valid_coordinate(lat, lng) {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

/// True iff both values are finite and within geographic range
/// (lat in [-90, 90], lng in [-180, 180]).
pub fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    lat.is_finite() && lng.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}
