//! Filter criteria and the predicate logic that narrows a catalog

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{Property, PropertyType};

mod engine;

pub use engine::{filter, FilterEngine, DEFAULT_PARALLEL_THRESHOLD};

/// User-chosen constraints. An absent field places no constraint on its dimension.
///
/// Values are replaced wholesale on every interaction; a bound of zero is a
/// real constraint, distinct from an absent bound. Unknown keys are ignored
/// when deserializing so the filter form can grow without breaking readers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub surface_min: Option<f64>,
    pub surface_max: Option<f64>,

    /// Minimum room count
    pub rooms: Option<u32>,

    #[serde(rename = "type")]
    pub kind: Option<PropertyType>,

    /// Matched against city, department and title
    pub search_query: Option<String>,
}

/// One filter dimension, used to report which predicate a listing fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    SearchQuery,
    Type,
    Rooms,
    PriceMin,
    PriceMax,
    SurfaceMin,
    SurfaceMax,
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterDimension::SearchQuery => "searchQuery",
            FilterDimension::Type => "type",
            FilterDimension::Rooms => "rooms",
            FilterDimension::PriceMin => "priceMin",
            FilterDimension::PriceMax => "priceMax",
            FilterDimension::SurfaceMin => "surfaceMin",
            FilterDimension::SurfaceMax => "surfaceMax",
        };
        f.write_str(name)
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn with_kind(mut self, kind: PropertyType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_min_rooms(mut self, rooms: u32) -> Self {
        self.rooms = Some(rooms);
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_surface_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.surface_min = min;
        self.surface_max = max;
        self
    }

    /// Trimmed, case-folded query, or `None` when it is blank
    pub fn normalized_query(&self) -> Option<String> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// True when no dimension is constrained
    pub fn is_empty(&self) -> bool {
        self.normalized_query().is_none()
            && self.kind.is_none()
            && self.rooms.is_none()
            && self.price_min.is_none()
            && self.price_max.is_none()
            && self.surface_min.is_none()
            && self.surface_max.is_none()
    }

    /// Number of constrained dimensions
    pub fn active_count(&self) -> usize {
        [
            self.normalized_query().is_some(),
            self.kind.is_some(),
            self.rooms.is_some(),
            self.price_min.is_some(),
            self.price_max.is_some(),
            self.surface_min.is_some(),
            self.surface_max.is_some(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    /// First predicate the listing fails, in evaluation order
    pub fn violation(&self, property: &Property) -> Option<FilterDimension> {
        CompiledCriteria::new(self).violation(property)
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.violation(property).is_none()
    }
}

/// Criteria prepared for repeated evaluation: the query is folded once
#[derive(Debug, Clone)]
pub(crate) struct CompiledCriteria<'a> {
    criteria: &'a FilterCriteria,
    query: Option<String>,
}

impl<'a> CompiledCriteria<'a> {
    pub(crate) fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            criteria,
            query: criteria.normalized_query(),
        }
    }

    pub(crate) fn violation(&self, property: &Property) -> Option<FilterDimension> {
        let c = self.criteria;

        if let Some(query) = &self.query {
            let location = &property.location;
            let hit = location.city.to_lowercase().contains(query.as_str())
                || location.department.to_lowercase().contains(query.as_str())
                || property.title.to_lowercase().contains(query.as_str());
            if !hit {
                return Some(FilterDimension::SearchQuery);
            }
        }

        if let Some(kind) = c.kind {
            if property.kind != kind {
                return Some(FilterDimension::Type);
            }
        }

        if let Some(rooms) = c.rooms {
            if property.rooms < rooms {
                return Some(FilterDimension::Rooms);
            }
        }

        if let Some(min) = c.price_min {
            if property.price < min {
                return Some(FilterDimension::PriceMin);
            }
        }
        if let Some(max) = c.price_max {
            if property.price > max {
                return Some(FilterDimension::PriceMax);
            }
        }

        if let Some(min) = c.surface_min {
            if property.surface < min {
                return Some(FilterDimension::SurfaceMin);
            }
        }
        if let Some(max) = c.surface_max {
            if property.surface > max {
                return Some(FilterDimension::SurfaceMax);
            }
        }

        None
    }

    pub(crate) fn matches(&self, property: &Property) -> bool {
        self.violation(property).is_none()
    }
}
