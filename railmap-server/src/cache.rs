//! Caching layer for filtered payloads.
//!
//! Datasets never change after startup, so a payload filtered for a given
//! dataset and year is valid for the lifetime of the process. Only capacity
//! bounds the cache. Unfiltered requests bypass it entirely since they are
//! served from the retained source bytes.

use std::fmt;
use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::{debug, info};

use crate::assemble::{Payload, build_filtered, build_unfiltered};
use crate::geojson::{Dataset, DatasetError};
use crate::timeline::LineMembership;

/// Which dataset a request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Railroads,
    Stations,
}

impl DatasetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Railroads => "railroads",
            DatasetKind::Stations => "stations",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache key: (dataset, year).
type PayloadKey = (DatasetKind, i32);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached payloads.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_capacity: 256 }
    }
}

/// Cache of filtered payloads.
pub struct PayloadCache {
    payloads: MokaCache<PayloadKey, Arc<Payload>>,
}

impl PayloadCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let payloads = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Self { payloads }
    }

    pub async fn get(&self, kind: DatasetKind, year: i32) -> Option<Arc<Payload>> {
        self.payloads.get(&(kind, year)).await
    }

    pub async fn insert(&self, kind: DatasetKind, year: i32, payload: Arc<Payload>) {
        self.payloads.insert((kind, year), payload).await;
    }
}

/// Both datasets plus a cache of their filtered payloads.
pub struct CachedDatasets {
    rail: Dataset,
    stations: Dataset,
    cache: PayloadCache,
}

impl CachedDatasets {
    pub fn new(rail: Dataset, stations: Dataset, cache_config: &CacheConfig) -> Self {
        info!(
            rail_features = rail.len(),
            station_features = stations.len(),
            capacity = cache_config.max_capacity,
            "datasets ready"
        );
        Self {
            rail,
            stations,
            cache: PayloadCache::new(cache_config),
        }
    }

    pub fn dataset(&self, kind: DatasetKind) -> &Dataset {
        match kind {
            DatasetKind::Railroads => &self.rail,
            DatasetKind::Stations => &self.stations,
        }
    }

    /// The unfiltered source document.
    pub fn unfiltered(&self, kind: DatasetKind) -> Payload {
        build_unfiltered(self.dataset(kind))
    }

    /// The document filtered for `year`, using the cache if available.
    ///
    /// Stations are additionally restricted to lines active in the rail
    /// dataset for the same year.
    pub async fn filtered(
        &self,
        kind: DatasetKind,
        year: i32,
    ) -> Result<Arc<Payload>, DatasetError> {
        if let Some(cached) = self.cache.get(kind, year).await {
            debug!(dataset = %kind, year, "payload cache hit");
            return Ok(cached);
        }

        let payload = match kind {
            DatasetKind::Railroads => build_filtered(&self.rail, year, None)?,
            DatasetKind::Stations => {
                let lines = LineMembership::new(&self.rail);
                build_filtered(&self.stations, year, Some(&lines))?
            }
        };
        debug!(
            dataset = %kind,
            year,
            features = payload.feature_count,
            bytes = payload.body.len(),
            "built filtered payload"
        );

        let payload = Arc::new(payload);
        self.cache.insert(kind, year, payload.clone()).await;

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datasets() -> CachedDatasets {
        let rail = Dataset::from_bytes(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,"properties":{"N05_002":"Yamanote","N05_005b":"1925"}}
            ]}"#,
        )
        .unwrap();
        let stations = Dataset::from_bytes(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,"properties":{"N05_011":"Shibuya","N05_002":"Yamanote"}},
                {"type":"Feature","geometry":null,"properties":{"N05_011":"Nowhere","N05_002":"Phantom"}}
            ]}"#,
        )
        .unwrap();
        CachedDatasets::new(rail, stations, &CacheConfig::default())
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.max_capacity, 256);
    }

    #[test]
    fn kind_names() {
        assert_eq!(DatasetKind::Railroads.to_string(), "railroads");
        assert_eq!(DatasetKind::Stations.as_str(), "stations");
    }

    #[tokio::test]
    async fn cache_starts_empty() {
        let cache = PayloadCache::new(&CacheConfig::default());
        assert!(cache.get(DatasetKind::Railroads, 2020).await.is_none());
    }

    #[tokio::test]
    async fn filtered_payload_is_cached() {
        let datasets = datasets();

        let first = datasets.filtered(DatasetKind::Stations, 2020).await.unwrap();
        let second = datasets.filtered(DatasetKind::Stations, 2020).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.feature_count, 1);
    }

    #[tokio::test]
    async fn keys_distinguish_dataset_and_year() {
        let datasets = datasets();

        let rail = datasets.filtered(DatasetKind::Railroads, 2020).await.unwrap();
        let stations = datasets.filtered(DatasetKind::Stations, 2020).await.unwrap();
        let early = datasets.filtered(DatasetKind::Stations, 1900).await.unwrap();

        assert_eq!(rail.feature_count, 1);
        assert_eq!(stations.feature_count, 1);
        assert_eq!(early.feature_count, 0);
        assert_eq!(early.year, Some(1900));
    }

    #[tokio::test]
    async fn cached_payload_matches_fresh_build() {
        let datasets = datasets();

        let cached = datasets.filtered(DatasetKind::Stations, 2000).await.unwrap();
        let lines = LineMembership::new(&datasets.rail);
        let fresh = build_filtered(&datasets.stations, 2000, Some(&lines)).unwrap();

        assert_eq!(cached.body, fresh.body);
        assert_eq!(cached.feature_count, fresh.feature_count);
    }

    #[test]
    fn unfiltered_bypasses_cache() {
        let datasets = datasets();
        let payload = datasets.unfiltered(DatasetKind::Stations);

        assert_eq!(payload.feature_count, 2);
        assert_eq!(payload.year, None);
        assert_eq!(&payload.body, datasets.stations.original_bytes());
    }
}
