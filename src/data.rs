use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const CITIES: &[&str] = &["Copenhagen", "Berlin", "Budapest", "Lisbon", "Tokyo"];

pub const CUISINES: &[&str] = &[
    "Mexican",
    "Thai",
    "Japanese",
    "Korean",
    "Italian",
    "Indian",
    "Turkish",
    "Vietnamese",
    "Greek",
    "Hungarian",
];

pub const PRICE_LEVELS: &[&str] = &["$", "$$", "$$$"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub city: String,
    pub rating: f64,
    pub price_level: String,
    pub thumbnail: String,
    pub description: String,
    pub location: Location,
    pub menu: Vec<MenuItem>,
    pub is_featured: bool,
    /// The only field that changes after generation.
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// `"<vendor index>-<item index>"`, both 1-based.
    pub id: String,
    pub name: String,
    pub price: f64,
    pub spicy: bool,
    pub vegan: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub by_city: BTreeMap<String, usize>,
    pub by_cuisine: BTreeMap<String, usize>,
}
