//! Request-scoped data model for the property pipeline.
//!
//! `SearchParameters` is produced once per query and immutable thereafter;
//! records are transcriptions of whatever the extraction source returned,
//! unvalidated beyond presence.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price ceiling assumed when the user does not name one, in crores.
pub const DEFAULT_MAX_PRICE_CRORES: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertyCategory {
    #[default]
    Residential,
    Commercial,
}

impl PropertyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyCategory::Residential => "Residential",
            PropertyCategory::Commercial => "Commercial",
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    Flat,
    #[serde(rename = "Individual House", alias = "IndividualHouse")]
    IndividualHouse,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Flat => "Flat",
            PropertyType::IndividualHouse => "Individual House",
        }
    }

    /// Plural label used in extraction prompts ("Flats", "Individual Houses").
    pub fn plural_label(&self) -> &'static str {
        match self {
            PropertyType::Flat => "Flats",
            PropertyType::IndividualHouse => "Individual Houses",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured search parameters inferred from one user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParameters {
    pub city: String,
    pub max_price: f64,
    pub property_category: PropertyCategory,
    pub property_type: PropertyType,
}

impl SearchParameters {
    /// Fallback constructor: a city plus hard defaults for everything else.
    pub fn for_city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            max_price: DEFAULT_MAX_PRICE_CRORES,
            property_category: PropertyCategory::default(),
            property_type: PropertyType::default(),
        }
    }
}

/// Loosely-typed decode target for model output.
///
/// The model is told to emit `null` for an unspecified price, and may omit
/// fields entirely; both map to defaults via [`RawSearchParameters::into_parameters`].
/// Only `city` is required for the decode to succeed.
#[derive(Debug, Deserialize)]
pub struct RawSearchParameters {
    pub city: String,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub property_category: Option<PropertyCategory>,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
}

impl RawSearchParameters {
    pub fn into_parameters(self) -> SearchParameters {
        SearchParameters {
            city: self.city,
            max_price: self.max_price.unwrap_or(DEFAULT_MAX_PRICE_CRORES),
            property_category: self.property_category.unwrap_or_default(),
            property_type: self.property_type.unwrap_or_default(),
        }
    }
}

/// One listing as transcribed by the extraction service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PropertyRecord {
    #[serde(default)]
    pub building_name: String,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub location_address: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
}

/// Shape hint handed to the extraction API for listing queries.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct PropertiesResponse {
    pub properties: Vec<PropertyRecord>,
}

/// Price-trend figures for one locality.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LocationTrend {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub price_per_sqft: f64,
    #[serde(default)]
    pub percent_increase: f64,
    #[serde(default)]
    pub rental_yield: f64,
}

/// Shape hint handed to the extraction API for trend queries.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct LocationsResponse {
    pub locations: Vec<LocationTrend>,
}

/// JSON schema hint for listing extraction.
pub fn properties_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(PropertiesResponse)).unwrap_or_default()
}

/// JSON schema hint for trend extraction.
pub fn locations_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(LocationsResponse)).unwrap_or_default()
}
