use reqwest::Client;
use std::path::Path;
use std::time::Duration;

use crate::config::CatalogSourceSettings;
use crate::core::{Catalog, CatalogRegistry};
use crate::error::{CatalogError, Result};
use crate::models::CatalogDocument;

const SOIL_TESTING_CENTERS: &str = include_str!("../../data/soil-testing-centers.json");
const MANDIS: &str = include_str!("../../data/mandis.json");

/// Built-in catalog document by name
pub fn builtin_document(name: &str) -> Option<&'static str> {
    match name {
        "soil-testing-centers" => Some(SOIL_TESTING_CENTERS),
        "mandis" => Some(MANDIS),
        _ => None,
    }
}

/// Parse a catalog document, TOML when `is_toml`, JSON otherwise
///
/// The configured name always wins over the name inside the document.
pub fn parse_document(name: &str, raw: &str, is_toml: bool) -> Result<Catalog> {
    let mut document: CatalogDocument = if is_toml {
        toml::from_str(raw)?
    } else {
        serde_json::from_str(raw)?
    };
    document.name = name.to_string();

    Catalog::from_document(document)
}

/// Loads catalogs from their configured sources
///
/// Runs once at startup, before the HTTP server accepts requests.
pub struct CatalogLoader {
    client: Client,
}

impl CatalogLoader {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Load a single catalog
    pub async fn load(&self, source: &CatalogSourceSettings) -> Result<Catalog> {
        let catalog = match (&source.path, &source.url) {
            (Some(path), _) => self.load_file(&source.name, Path::new(path)).await?,
            (None, Some(url)) => self.load_url(&source.name, url).await?,
            (None, None) => {
                let raw = builtin_document(&source.name)
                    .ok_or_else(|| CatalogError::MissingSource(source.name.clone()))?;
                parse_document(&source.name, raw, false)?
            }
        };

        tracing::info!("Loaded catalog {} ({} entries)", catalog.name(), catalog.len());

        Ok(catalog)
    }

    /// Load every configured catalog into a registry
    pub async fn load_all(&self, sources: &[CatalogSourceSettings]) -> Result<CatalogRegistry> {
        let mut catalogs = Vec::with_capacity(sources.len());
        for source in sources {
            catalogs.push(self.load(source).await?);
        }

        CatalogRegistry::new(catalogs)
    }

    async fn load_file(&self, name: &str, path: &Path) -> Result<Catalog> {
        tracing::debug!("Reading catalog {} from {}", name, path.display());

        let raw = tokio::fs::read_to_string(path).await?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        parse_document(name, &raw, is_toml)
    }

    async fn load_url(&self, name: &str, url: &str) -> Result<Catalog> {
        tracing::debug!("Fetching catalog {} from {}", name, url);

        let mut document: CatalogDocument = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        document.name = name.to_string();

        Catalog::from_document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_documents_parse() {
        for name in ["soil-testing-centers", "mandis"] {
            let raw = builtin_document(name).unwrap();
            let catalog = parse_document(name, raw, false).unwrap();
            assert!(!catalog.is_empty(), "{} should not be empty", name);
            assert!(catalog.all().iter().all(|e| e.location.is_valid()));
        }
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(builtin_document("weather-stations").is_none());
    }

    #[test]
    fn test_parse_toml_document() {
        let raw = r#"
name = "ignored"

[[entries]]
id = "kochi"
latitude = 9.9312
longitude = 76.2673

[entries.attributes]
state = "Kerala"

[entries.details]
name = "Ernakulam Market"
"#;
        let catalog = parse_document("mandis", raw, true).unwrap();
        assert_eq!(catalog.name(), "mandis");
        assert_eq!(catalog.by_id("kochi").unwrap().attribute("state"), Some("Kerala"));
    }

    #[test]
    fn test_missing_source() {
        let loader = CatalogLoader::new(Duration::from_secs(1)).unwrap();
        let source = CatalogSourceSettings::builtin("weather-stations");
        let err = tokio_test::block_on(loader.load(&source)).unwrap_err();
        assert!(matches!(err, CatalogError::MissingSource(_)));
    }
}
