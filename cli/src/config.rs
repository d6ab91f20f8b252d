//! Route planner configuration (TOML).

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use flight_route_core::SearchMode;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::geo::Coordinates;

/// A city and where it is. Coordinates stand in for a geocoder lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityConfig {
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Which city pairs become flyable routes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeFilter {
    /// Pairs strictly shorter than the mean pairwise distance.
    #[default]
    BelowAverage,
    /// Every ordered pair of distinct cities.
    All,
    /// Pairs strictly shorter than `limit` kilometres.
    MaxKm { limit: f64 },
}

/// Search pruning strategy, as chosen in config or on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    #[default]
    Settled,
    Strict,
}

impl From<SearchStrategy> for SearchMode {
    fn from(s: SearchStrategy) -> Self {
        match s {
            SearchStrategy::Settled => SearchMode::Settled,
            SearchStrategy::Strict => SearchMode::Strict,
        }
    }
}

/// Word lists and per-city article text for sentiment scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentConfig {
    pub positive_words: PathBuf,
    pub negative_words: PathBuf,
    #[serde(default)]
    pub stop_words: Option<PathBuf>,
    /// City name -> file holding the article text.
    #[serde(default)]
    pub articles: BTreeMap<String, PathBuf>,
}

impl SentimentConfig {
    fn resolve_relative_to(&mut self, base: &Path) {
        let fix = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        fix(&mut self.positive_words);
        fix(&mut self.negative_words);
        if let Some(p) = self.stop_words.as_mut() {
            fix(p);
        }
        self.articles.values_mut().for_each(fix);
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub cities: Vec<CityConfig>,
    pub origin: String,
    pub destination: String,
    pub edge_filter: EdgeFilter,
    pub search: SearchStrategy,
    pub sentiment: Option<SentimentConfig>,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            cities: vec![
                CityConfig::new("London", 51.5074, -0.1278),
                CityConfig::new("Delhi", 28.6139, 77.2090),
                CityConfig::new("New York", 40.7128, -74.0060),
                CityConfig::new("Singapore", 1.3521, 103.8198),
                CityConfig::new("Shanghai", 31.2304, 121.4737),
                CityConfig::new("Kuala Lumpur", 3.1390, 101.6869),
            ],
            origin: "Kuala Lumpur".to_string(),
            destination: "New York".to_string(),
            edge_filter: EdgeFilter::default(),
            search: SearchStrategy::default(),
            sentiment: None,
        }
    }
}

impl RouteConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, AppError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. Relative word-list and article paths resolve
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        let mut config = Self::from_toml_str(&text)?;
        if let (Some(sentiment), Some(dir)) = (config.sentiment.as_mut(), path.parent()) {
            sentiment.resolve_relative_to(dir);
        }
        tracing::info!(path = %path.display(), cities = config.cities.len(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.cities.len() < 2 {
            return Err(AppError::InvalidConfig(
                "at least two cities are required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for city in &self.cities {
            if !seen.insert(city.name.as_str()) {
                return Err(AppError::InvalidConfig(format!(
                    "duplicate city '{}'",
                    city.name
                )));
            }
            if !city.coordinates().is_valid() {
                return Err(AppError::InvalidConfig(format!(
                    "city '{}' has out-of-range coordinates ({}, {})",
                    city.name, city.latitude, city.longitude
                )));
            }
        }

        for endpoint in [&self.origin, &self.destination] {
            if !seen.contains(endpoint.as_str()) {
                return Err(AppError::UnknownCity(endpoint.clone()));
            }
        }

        if let EdgeFilter::MaxKm { limit } = self.edge_filter {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(AppError::InvalidConfig(format!(
                    "max_km limit must be positive, got {}",
                    limit
                )));
            }
        }

        Ok(())
    }
}
