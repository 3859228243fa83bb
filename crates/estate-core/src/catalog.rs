//! Immutable, ordered listing catalog

use std::sync::Arc;

use ahash::AHashMap;
use thiserror::Error;

use crate::model::{Property, PropertyId, ValidationError};

/// Errors raised while building a catalog
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("listing '{id}' is malformed: {source}")]
    Invalid {
        id: PropertyId,
        #[source]
        source: ValidationError,
    },

    #[error("listing id '{0}' appears more than once")]
    DuplicateId(PropertyId),
}

/// The full set of listings, in supply order.
///
/// Cloning is cheap: the entries are shared.
#[derive(Clone)]
pub struct Catalog {
    entries: Arc<[Arc<Property>]>,
    index: Arc<AHashMap<PropertyId, usize>>,
}

impl Catalog {
    /// Build a catalog, rejecting the first malformed or duplicate record
    pub fn new(records: impl IntoIterator<Item = Property>) -> Result<Self, CatalogError> {
        let mut entries = Vec::new();
        let mut index = AHashMap::new();

        for record in records {
            Self::admit(&record, &index)?;
            index.insert(record.id.clone(), entries.len());
            entries.push(Arc::new(record));
        }

        Ok(Self::from_parts(entries, index))
    }

    /// Build a catalog from the valid records only, returning why the others were dropped
    pub fn new_lenient(records: impl IntoIterator<Item = Property>) -> (Self, Vec<CatalogError>) {
        let mut entries = Vec::new();
        let mut index = AHashMap::new();
        let mut rejected = Vec::new();

        for record in records {
            if let Err(err) = Self::admit(&record, &index) {
                rejected.push(err);
                continue;
            }
            index.insert(record.id.clone(), entries.len());
            entries.push(Arc::new(record));
        }

        (Self::from_parts(entries, index), rejected)
    }

    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), AHashMap::new())
    }

    fn admit(record: &Property, index: &AHashMap<PropertyId, usize>) -> Result<(), CatalogError> {
        record.validate().map_err(|source| CatalogError::Invalid {
            id: record.id.clone(),
            source,
        })?;
        if index.contains_key(&record.id) {
            return Err(CatalogError::DuplicateId(record.id.clone()));
        }
        Ok(())
    }

    fn from_parts(entries: Vec<Arc<Property>>, index: AHashMap<PropertyId, usize>) -> Self {
        Self {
            entries: entries.into(),
            index: Arc::new(index),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &PropertyId) -> Option<&Arc<Property>> {
        self.index.get(id).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, id: &PropertyId) -> bool {
        self.index.contains_key(id)
    }

    /// Supply-order position of a listing
    pub fn position(&self, id: &PropertyId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Property>> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Arc<Property>] {
        &self.entries
    }

    /// The whole catalog as a result set
    pub fn to_results(&self) -> Vec<Arc<Property>> {
        self.entries.to_vec()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyType;
    use crate::test_support::{paris_lyon, property};

    #[test]
    fn test_catalog_keeps_supply_order() {
        let catalog = paris_lyon();
        let ids: Vec<_> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(catalog.position(&PropertyId::from("2")), Some(1));
        assert_eq!(catalog.get(&PropertyId::from("2")).unwrap().location.city, "Lyon");
        assert!(catalog.get(&PropertyId::from("3")).is_none());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let a = property("1", "Paris", 1.0, 1, PropertyType::Studio, 10.0);
        let b = property("1", "Lyon", 2.0, 2, PropertyType::Loft, 20.0);

        let err = Catalog::new(vec![a, b]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId(PropertyId::from("1")));
    }

    #[test]
    fn test_malformed_record_is_rejected() {
        let mut bad = property("7", "Paris", 1.0, 1, PropertyType::Studio, 10.0);
        bad.surface = -3.0;

        match Catalog::new(vec![bad]) {
            Err(CatalogError::Invalid { id, source }) => {
                assert_eq!(id, PropertyId::from("7"));
                assert_eq!(source, ValidationError::InvalidSurface(-3.0));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_lenient_catalog_skips_bad_records() {
        let good = property("1", "Paris", 1.0, 1, PropertyType::Studio, 10.0);
        let mut bad = property("2", "Lyon", 1.0, 1, PropertyType::Studio, 10.0);
        bad.rooms = 0;
        let dup = property("1", "Nice", 1.0, 1, PropertyType::Studio, 10.0);
        let other = property("3", "Nantes", 1.0, 1, PropertyType::Studio, 10.0);

        let (catalog, rejected) = Catalog::new_lenient(vec![good, bad, dup, other]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.position(&PropertyId::from("3")), Some(1));
        assert_eq!(rejected.len(), 2);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.to_results().is_empty());
    }
}
