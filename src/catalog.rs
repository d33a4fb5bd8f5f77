//! Dataset generation. Every random choice flows through one seeded RNG, so
//! the same seed always reproduces the same catalog.

use fake::faker::company::en::{BsNoun, Buzzword};
use fake::faker::lorem::en::Sentences;
use fake::faker::name::en::FirstName;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::{Location, MenuItem, Vendor, CITIES, CUISINES, PRICE_LEVELS};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_SIZE: usize = 80;

pub fn generate(seed: u64, count: usize) -> Vec<Vendor> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|i| build_vendor(i, &mut rng)).collect()
}

fn build_vendor(index: usize, rng: &mut StdRng) -> Vendor {
    let city = pick(CITIES, rng);
    let cuisine = pick(CUISINES, rng);
    let price_level = pick(PRICE_LEVELS, rng);

    let rating = round1(rng.random::<f64>() * 2.0 + 3.0);
    let menu_size: usize = rng.random_range(4..=10);
    let menu = (0..menu_size)
        .map(|j| build_menu_item(index, j, cuisine, rng))
        .collect();

    let owner: String = FirstName().fake_with_rng(rng);
    let noun: String = BsNoun().fake_with_rng(rng);
    let sentences: Vec<String> = Sentences(1..3).fake_with_rng(rng);

    Vendor {
        id: (index + 1).to_string(),
        name: format!("{owner}'s {cuisine} {noun}"),
        cuisine: cuisine.to_string(),
        city: city.to_string(),
        rating,
        price_level: price_level.to_string(),
        thumbnail: thumbnail_url(index + 1),
        description: sentences.join(" "),
        location: Location {
            lat: round5(55.0 + rng.random::<f64>()),
            lng: round5(12.0 + rng.random::<f64>()),
        },
        menu,
        is_featured: rng.random_bool(0.15),
        is_favorite: false,
    }
}

fn build_menu_item(vendor_index: usize, item_index: usize, cuisine: &str, rng: &mut StdRng) -> MenuItem {
    let adjective: String = Buzzword().fake_with_rng(rng);
    let noun: String = BsNoun().fake_with_rng(rng);
    MenuItem {
        id: format!("{}-{}", vendor_index + 1, item_index + 1),
        name: format!("{cuisine} {adjective} {noun}"),
        price: round2(rng.random::<f64>() * 15.0 + 5.0),
        spicy: rng.random_bool(0.3),
        vegan: rng.random_bool(0.4),
    }
}

// Enumerations are compile-time non-empty, so indexing can not fail.
fn pick<'a>(values: &'a [&'a str], rng: &mut StdRng) -> &'a str {
    values[rng.random_range(0..values.len())]
}

fn thumbnail_url(id: usize) -> String {
    format!("https://picsum.photos/seed/vendor-{id}/320/240")
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round5(value: f64) -> f64 {
    (value * 100_000.0).round() / 100_000.0
}
