//! Travel locations and the ingestion boundary that validates them.
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

use crate::geo::Coordinate;

const DEFAULT_LOCATIONS_DATA: &str =
    include_str!("../../globetrot-web/static/data/locations.json");

static SLUG_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").ok());

/// Lowercase kebab-case, the shape story routes expect.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_PATTERN.as_ref().is_some_and(|re| re.is_match(slug))
}

/// One visited place. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Stable identifier, also the story route segment.
    pub slug: String,
    pub city: String,
    pub country: String,
    pub coordinates: Coordinate,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "distance", default)]
    pub distance_from_home_km: f64,
}

impl Location {
    /// Short "Mon YYYY" label shown on the detail card.
    #[must_use]
    pub fn visited_label(&self) -> String {
        self.date.format("%b %Y").to_string()
    }
}

/// Reasons a location catalog is rejected at ingestion.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse location catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("location #{index} has an empty slug")]
    EmptySlug { index: usize },
    #[error("slug `{slug}` is not lowercase kebab-case")]
    MalformedSlug { slug: String },
    #[error("slug `{slug}` appears more than once")]
    DuplicateSlug { slug: String },
    #[error("location `{slug}` has invalid coordinates {coordinates}")]
    InvalidCoordinates {
        slug: String,
        coordinates: Coordinate,
    },
}

/// Validated, ordered set of locations as authored.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LocationCatalog {
    locations: Vec<Location>,
}

impl LocationCatalog {
    /// Parse and validate a JSON array of locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any location fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let locations: Vec<Location> = serde_json::from_str(json)?;
        Self::from_locations(locations)
    }

    /// Validate already-deserialized locations.
    ///
    /// # Errors
    ///
    /// Returns an error on empty, malformed or duplicate slugs and on
    /// out-of-range coordinates.
    pub fn from_locations(locations: Vec<Location>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (index, location) in locations.iter().enumerate() {
            if location.slug.is_empty() {
                return Err(CatalogError::EmptySlug { index });
            }
            if !is_valid_slug(&location.slug) {
                return Err(CatalogError::MalformedSlug {
                    slug: location.slug.clone(),
                });
            }
            if !seen.insert(location.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug {
                    slug: location.slug.clone(),
                });
            }
            if !location.coordinates.is_valid() {
                return Err(CatalogError::InvalidCoordinates {
                    slug: location.slug.clone(),
                    coordinates: location.coordinates,
                });
            }
        }
        Ok(Self { locations })
    }

    /// The dataset bundled with the site.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset fails validation.
    pub fn load_from_static() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_LOCATIONS_DATA)
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.slug == slug)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    #[must_use]
    pub fn into_locations(self) -> Vec<Location> {
        self.locations
    }
}

/// Headline numbers for the travel section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelStats {
    pub places_visited: usize,
    pub countries_explored: usize,
    pub total_distance_km: f64,
    pub stories_written: usize,
}

impl TravelStats {
    #[must_use]
    pub fn from_locations(locations: &[Location]) -> Self {
        let countries: BTreeSet<&str> = locations.iter().map(|l| l.country.as_str()).collect();
        Self {
            places_visited: locations.len(),
            countries_explored: countries.len(),
            total_distance_km: locations.iter().map(|l| l.distance_from_home_km).sum(),
            stories_written: locations.len(),
        }
    }
}
