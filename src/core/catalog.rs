use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::error::{CatalogError, Result};
use crate::models::{CatalogDocument, CatalogEntry, GeoPoint};

/// Immutable, in-memory collection of located entries
///
/// Entries keep the order they were loaded in. Nothing mutates a catalog once
/// it has been built.
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from already-identified entries
    pub fn new(name: impl Into<String>, entries: Vec<CatalogEntry>) -> Result<Self> {
        let name = name.into();
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId {
                    catalog: name,
                    id: entry.id.clone(),
                });
            }
        }

        Ok(Self { name, entries, index })
    }

    /// Build a catalog from a source document
    ///
    /// Records without an id get a fresh UUID. Records with an out-of-range
    /// location are rejected.
    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        let CatalogDocument { name, entries: records } = document;

        let entries = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let location = GeoPoint::new(record.latitude, record.longitude);
                if !location.is_valid() {
                    return Err(CatalogError::InvalidLocation {
                        catalog: name.clone(),
                        index,
                        latitude: record.latitude,
                        longitude: record.longitude,
                    });
                }

                let id = record
                    .id
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

                Ok(CatalogEntry {
                    id,
                    location,
                    attributes: record.attributes,
                    details: record.details,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(name, entries)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All entries, in load order
    pub fn all(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn by_id(&self, id: &str) -> Result<&CatalogEntry> {
        self.index
            .get(id)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| CatalogError::NotFound {
                catalog: self.name.clone(),
                id: id.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct values of one attribute, first-seen order, case-insensitive
    pub fn distinct_values(&self, key: &str) -> Vec<String> {
        let mut seen = HashSet::new();

        self.entries
            .iter()
            .filter_map(|entry| entry.attribute(key))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .filter(|value| seen.insert(value.to_lowercase()))
            .map(str::to_string)
            .collect()
    }
}

/// Named catalogs loaded at startup
#[derive(Debug, Clone, Default)]
pub struct CatalogRegistry {
    catalogs: BTreeMap<String, Arc<Catalog>>,
}

impl CatalogRegistry {
    pub fn new(catalogs: impl IntoIterator<Item = Catalog>) -> Result<Self> {
        let mut registry = BTreeMap::new();

        for catalog in catalogs {
            let name = catalog.name().to_string();
            if registry.contains_key(&name) {
                return Err(CatalogError::DuplicateCatalog(name));
            }
            registry.insert(name, Arc::new(catalog));
        }

        Ok(Self { catalogs: registry })
    }

    pub fn get(&self, name: &str) -> Result<&Arc<Catalog>> {
        self.catalogs
            .get(name)
            .ok_or_else(|| CatalogError::UnknownCatalog(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Catalog>> {
        self.catalogs.values()
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}
