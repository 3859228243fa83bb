//! Listing data model
//!
//! A [`Property`] is immutable once it has been accepted into a catalog.
//! The wire shape mirrors the listing fixtures: camelCase keys, `"type"` for
//! the property type and `[lng, lat]` arrays for coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable, unique identifier of a listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PropertyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind of dwelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Studio,
    Loft,
}

impl PropertyType {
    /// Every variant, in display order
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Studio,
        PropertyType::Loft,
    ];

    /// Wire name (`"apartment"`, `"house"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Studio => "studio",
            PropertyType::Loft => "loft",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Energy performance class, ordered best (`A`) to worst (`G`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnergyClass {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl EnergyClass {
    pub const ALL: [EnergyClass; 7] = [
        EnergyClass::A,
        EnergyClass::B,
        EnergyClass::C,
        EnergyClass::D,
        EnergyClass::E,
        EnergyClass::F,
        EnergyClass::G,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyClass::A => "A",
            EnergyClass::B => "B",
            EnergyClass::C => "C",
            EnergyClass::D => "D",
            EnergyClass::E => "E",
            EnergyClass::F => "F",
            EnergyClass::G => "G",
        }
    }
}

impl fmt::Display for EnergyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinates {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinates> for (f64, f64) {
    fn from(coordinates: Coordinates) -> Self {
        (coordinates.lng, coordinates.lat)
    }
}

/// Where a listing is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,

    /// Administrative region the city belongs to
    #[serde(alias = "region")]
    pub department: String,

    pub coordinates: Coordinates,
}

/// A single real-estate listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub title: String,

    #[serde(rename = "type")]
    pub kind: PropertyType,

    /// Asking price, currency-agnostic
    pub price: f64,

    /// Living area in square meters
    pub surface: f64,

    pub rooms: u32,
    pub location: Location,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub features: Vec<String>,

    pub energy_class: EnergyClass,
}

/// Why a record cannot enter a catalog
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("listing id is empty")]
    EmptyId,

    #[error("price must be a finite, non-negative amount (got {0})")]
    InvalidPrice(f64),

    #[error("surface must be finite and strictly positive (got {0})")]
    InvalidSurface(f64),

    #[error("a listing has at least one room")]
    NoRooms,

    #[error("coordinates out of range: lng {lng}, lat {lat}")]
    InvalidCoordinates { lng: f64, lat: f64 },
}

impl Property {
    /// Check the record-level invariants not already enforced by the types
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice(self.price));
        }
        if !self.surface.is_finite() || self.surface <= 0.0 {
            return Err(ValidationError::InvalidSurface(self.surface));
        }
        if self.rooms == 0 {
            return Err(ValidationError::NoRooms);
        }
        let coordinates = self.location.coordinates;
        if !coordinates.is_valid() {
            return Err(ValidationError::InvalidCoordinates {
                lng: coordinates.lng,
                lat: coordinates.lat,
            });
        }
        Ok(())
    }

    pub fn coordinates(&self) -> Coordinates {
        self.location.coordinates
    }

    /// First image, used as the card and popup thumbnail
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
