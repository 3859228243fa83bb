//! Filter engine: (catalog, criteria) → ordered result set

use std::sync::Arc;

use rayon::prelude::*;

use super::{CompiledCriteria, FilterCriteria};
use crate::catalog::Catalog;
use crate::model::Property;

/// Catalog size from which evaluation is spread over the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Stable filter of `catalog` against every present criterion.
///
/// Pure and total: the result keeps catalog order and an all-absent
/// criteria value returns the catalog unchanged.
pub fn filter(catalog: &Catalog, criteria: &FilterCriteria) -> Vec<Arc<Property>> {
    FilterEngine::sequential().apply(catalog, criteria)
}

/// Full, non-incremental filter pass over a catalog
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine {
    parallel_threshold: usize,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_THRESHOLD)
    }
}

impl FilterEngine {
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Engine that never leaves the calling thread
    pub fn sequential() -> Self {
        Self::new(usize::MAX)
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn apply(&self, catalog: &Catalog, criteria: &FilterCriteria) -> Vec<Arc<Property>> {
        if criteria.is_empty() {
            return catalog.to_results();
        }

        let compiled = CompiledCriteria::new(criteria);
        let entries = catalog.as_slice();

        if entries.len() >= self.parallel_threshold {
            // rayon's collect keeps the source order
            entries
                .par_iter()
                .filter(|property| compiled.matches(property))
                .cloned()
                .collect()
        } else {
            entries
                .iter()
                .filter(|property| compiled.matches(property))
                .cloned()
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterDimension;
    use crate::model::{PropertyId, PropertyType};
    use crate::test_support::{mixed, paris_lyon, property};

    fn ids(results: &[Arc<Property>]) -> Vec<&str> {
        results.iter().map(|p| p.id.as_str()).collect()
    }

    /// A spread of criteria touching every dimension, alone and combined
    fn criteria_grid() -> Vec<FilterCriteria> {
        vec![
            FilterCriteria::new(),
            FilterCriteria::new().with_search("rhône"),
            FilterCriteria::new().with_search("APPARTEMENT"),
            FilterCriteria::new().with_search("xyz"),
            FilterCriteria::new().with_kind(PropertyType::House),
            FilterCriteria::new().with_kind(PropertyType::Studio).with_min_rooms(2),
            FilterCriteria::new().with_min_rooms(3),
            FilterCriteria::new().with_price_range(Some(0.0), None),
            FilterCriteria::new().with_price_range(Some(400_000.0), Some(700_000.0)),
            FilterCriteria::new().with_price_range(None, Some(0.0)),
            FilterCriteria::new().with_surface_range(Some(70.0), Some(120.0)),
            FilterCriteria::new()
                .with_search("e")
                .with_kind(PropertyType::Apartment)
                .with_min_rooms(3)
                .with_price_range(Some(300_000.0), Some(900_000.0))
                .with_surface_range(Some(60.0), None),
        ]
    }

    #[test]
    fn test_search_matches_city_example() {
        let catalog = paris_lyon();
        let results = filter(&catalog, &FilterCriteria::new().with_search("lyon"));
        assert_eq!(ids(&results), vec!["2"]);
    }

    #[test]
    fn test_price_and_rooms_example() {
        let catalog = paris_lyon();
        let criteria = FilterCriteria::new()
            .with_price_range(None, Some(500_000.0))
            .with_min_rooms(4);
        assert_eq!(ids(&filter(&catalog, &criteria)), vec!["2"]);
    }

    #[test]
    fn test_missing_type_yields_empty_result() {
        let catalog = paris_lyon();
        let results = filter(&catalog, &FilterCriteria::new().with_kind(PropertyType::Studio));
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_matches_department_and_title() {
        let catalog = mixed();
        assert_eq!(
            ids(&filter(&catalog, &FilterCriteria::new().with_search("Rhône"))),
            vec!["b", "c", "i"]
        );
        assert_eq!(
            ids(&filter(&catalog, &FilterCriteria::new().with_search("vue mer"))),
            vec!["g"]
        );
    }

    #[test]
    fn test_absent_criteria_is_identity() {
        let catalog = mixed();
        let results = filter(&catalog, &FilterCriteria::new().with_search("  "));
        assert_eq!(results.len(), catalog.len());
        for (result, original) in results.iter().zip(catalog.iter()) {
            assert!(Arc::ptr_eq(result, original));
        }
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        let catalog = Catalog::empty();
        for criteria in criteria_grid() {
            assert!(filter(&catalog, &criteria).is_empty());
        }
    }

    #[test]
    fn test_results_partition_the_catalog() {
        let catalog = mixed();
        for criteria in criteria_grid() {
            let results = filter(&catalog, &criteria);
            let kept: Vec<&PropertyId> = results.iter().map(|p| &p.id).collect();

            for property in catalog.iter() {
                let violation = criteria.violation(property);
                if kept.contains(&&property.id) {
                    assert_eq!(violation, None, "{:?} kept {}", criteria, property.id);
                } else {
                    assert!(violation.is_some(), "{:?} dropped {}", criteria, property.id);
                }
            }
        }
    }

    #[test]
    fn test_filter_is_idempotent_and_order_preserving() {
        let catalog = mixed();
        for criteria in criteria_grid() {
            let once = filter(&catalog, &criteria);
            let again_catalog = Catalog::new(once.iter().map(|p| (**p).clone())).unwrap();
            let twice = filter(&again_catalog, &criteria);
            assert_eq!(ids(&once), ids(&twice));

            let positions: Vec<usize> = once
                .iter()
                .map(|p| catalog.position(&p.id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_zero_price_ceiling_keeps_free_listing_only() {
        let catalog = mixed();
        let results = filter(&catalog, &FilterCriteria::new().with_price_range(None, Some(0.0)));
        assert_eq!(ids(&results), vec!["i"]);
    }

    #[test]
    fn test_parallel_engine_matches_sequential() {
        let records: Vec<_> = (0..5_000u32)
            .map(|i| {
                let kind = PropertyType::ALL[(i % 4) as usize];
                let city = if i % 7 == 0 { "Lyon" } else { "Paris" };
                property(
                    &i.to_string(),
                    city,
                    f64::from(i) * 100.0,
                    1 + i % 6,
                    kind,
                    10.0 + f64::from(i % 200),
                )
            })
            .collect();
        let catalog = Catalog::new(records).unwrap();
        let parallel = FilterEngine::new(1_000);

        for criteria in criteria_grid() {
            let expected = FilterEngine::sequential().apply(&catalog, &criteria);
            let actual = parallel.apply(&catalog, &criteria);
            assert_eq!(ids(&expected), ids(&actual));
        }
    }

    #[test]
    fn test_every_violation_dimension_is_reachable() {
        let p = property("1", "Lyon", 450_000.0, 5, PropertyType::House, 120.0);
        let cases = [
            (FilterCriteria::new().with_search("nice"), FilterDimension::SearchQuery),
            (FilterCriteria::new().with_kind(PropertyType::Loft), FilterDimension::Type),
            (FilterCriteria::new().with_min_rooms(6), FilterDimension::Rooms),
            (FilterCriteria::new().with_price_range(Some(500_000.0), None), FilterDimension::PriceMin),
            (FilterCriteria::new().with_price_range(None, Some(400_000.0)), FilterDimension::PriceMax),
            (FilterCriteria::new().with_surface_range(Some(150.0), None), FilterDimension::SurfaceMin),
            (FilterCriteria::new().with_surface_range(None, Some(100.0)), FilterDimension::SurfaceMax),
        ];
        for (criteria, dimension) in cases {
            assert_eq!(criteria.violation(&p), Some(dimension));
        }
    }
}
