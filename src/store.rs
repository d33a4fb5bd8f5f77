use derive_builder::Builder;
use serde::Serialize;
use thiserror::Error;

use crate::catalog;
use crate::data::{Stats, Vendor, CITIES, CUISINES};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("no vendor with id {0}")]
    NotFound(String),
}

/// Optional filters for the vendor list; absent fields match everything.
#[derive(Debug, Clone, Default, Builder)]
pub struct VendorFilter {
    #[builder(setter(into, strip_option), default)]
    pub city: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub cuisine: Option<String>,
}

/// Pagination envelope around any slice of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page: i64,
    pub limit: i64,
    pub total: usize,
    pub total_pages: usize,
    pub data: Vec<T>,
}

/// Clamps `page` to at least 1 and `limit` to [1, 100], then slices
/// `[(page-1)*limit, page*limit)`. Out-of-range pages give an empty `data`.
pub fn paginate<T: Clone>(items: &[T], page: i64, limit: i64) -> Page<T> {
    let page = page.max(1);
    let limit = limit.clamp(1, 100);
    let total = items.len();
    let total_pages = total.div_ceil(limit as usize);

    let start = (page - 1).saturating_mul(limit) as usize;
    let data = if start >= total {
        Vec::new()
    } else {
        items[start..total.min(start + limit as usize)].to_vec()
    };

    Page {
        page,
        limit,
        total,
        total_pages,
        data,
    }
}

/// Owns the generated catalog for the lifetime of the process. All queries
/// borrow; [`VendorStore::toggle_favorite`] is the single mutation site.
pub struct VendorStore {
    vendors: Vec<Vendor>,
}

impl VendorStore {
    pub fn new(vendors: Vec<Vendor>) -> Self {
        Self { vendors }
    }

    pub fn generate(seed: u64, count: usize) -> Self {
        Self::new(catalog::generate(seed, count))
    }

    pub fn all(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    pub fn filter(&self, props: &VendorFilter) -> Vec<&Vendor> {
        self.vendors
            .iter()
            .filter(|v| {
                props
                    .city
                    .as_deref()
                    .map_or(true, |city| v.city.eq_ignore_ascii_case(city))
                    && props
                        .cuisine
                        .as_deref()
                        .map_or(true, |cuisine| v.cuisine.eq_ignore_ascii_case(cuisine))
            })
            .collect()
    }

    pub fn find(&self, id: &str) -> Result<&Vendor, StoreError> {
        self.vendors
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Case-insensitive substring match on name, cuisine, or city. A blank
    /// query matches nothing rather than everything.
    pub fn search(&self, query: &str) -> Vec<&Vendor> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.vendors
            .iter()
            .filter(|v| {
                v.name.to_lowercase().contains(&needle)
                    || v.cuisine.to_lowercase().contains(&needle)
                    || v.city.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn featured(&self) -> Vec<&Vendor> {
        self.vendors.iter().filter(|v| v.is_featured).collect()
    }

    /// Counts per enumerated city and cuisine. Values absent from the data
    /// still show up with a count of 0.
    pub fn stats(&self) -> Stats {
        let by_city = CITIES
            .iter()
            .map(|&city| {
                let n = self.vendors.iter().filter(|v| v.city == city).count();
                (city.to_string(), n)
            })
            .collect();
        let by_cuisine = CUISINES
            .iter()
            .map(|&cuisine| {
                let n = self.vendors.iter().filter(|v| v.cuisine == cuisine).count();
                (cuisine.to_string(), n)
            })
            .collect();

        Stats {
            total: self.vendors.len(),
            by_city,
            by_cuisine,
        }
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, StoreError> {
        let vendor = self
            .vendors
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        vendor.is_favorite = !vendor.is_favorite;
        Ok(vendor.is_favorite)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::data::{Location, MenuItem};

    fn vendor(id: &str, name: &str, cuisine: &str, city: &str, featured: bool) -> Vendor {
        Vendor {
            id: id.to_string(),
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            city: city.to_string(),
            rating: 4.2,
            price_level: "$$".to_string(),
            thumbnail: format!("https://picsum.photos/seed/vendor-{id}/320/240"),
            description: "A stall.".to_string(),
            location: Location { lat: 55.5, lng: 12.5 },
            menu: vec![MenuItem {
                id: format!("{id}-1"),
                name: format!("{cuisine} Special"),
                price: 9.5,
                spicy: false,
                vegan: true,
            }],
            is_featured: featured,
            is_favorite: false,
        }
    }

    fn sample_store() -> VendorStore {
        VendorStore::new(vec![
            vendor("1", "Maria's Thai Market", "Thai", "Tokyo", true),
            vendor("2", "Jonas' Greek Corner", "Greek", "Berlin", false),
            vendor("3", "Aiko's Thai Wagon", "Thai", "Berlin", false),
            vendor("4", "Luca's Italian Cart", "Italian", "Lisbon", true),
        ])
    }

    #[rstest]
    #[case(0, 20, 1, 20)]
    #[case(-5, 20, 1, 20)]
    #[case(3, 0, 3, 1)]
    #[case(3, -7, 3, 1)]
    #[case(1, 1000, 1, 100)]
    fn paginate_clamps_page_and_limit(
        #[case] page: i64,
        #[case] limit: i64,
        #[case] want_page: i64,
        #[case] want_limit: i64,
    ) {
        let items: Vec<u32> = (0..5).collect();
        let out = paginate(&items, page, limit);
        assert_eq!(out.page, want_page);
        assert_eq!(out.limit, want_limit);
        assert_eq!(out.total, 5);
    }

    #[test]
    fn paginate_slices_in_original_order() {
        let items: Vec<u32> = (0..80).collect();
        let out = paginate(&items, 2, 20);
        assert_eq!(out.total, 80);
        assert_eq!(out.total_pages, 4);
        assert_eq!(out.data, (20..40).collect::<Vec<u32>>());
    }

    #[test]
    fn paginate_out_of_range_page_is_empty() {
        let items: Vec<u32> = (0..80).collect();
        let out = paginate(&items, 5, 20);
        assert_eq!(out.total, 80);
        assert_eq!(out.total_pages, 4);
        assert!(out.data.is_empty());
    }

    #[test]
    fn paginate_partial_last_page() {
        let items: Vec<u32> = (0..45).collect();
        let out = paginate(&items, 3, 20);
        assert_eq!(out.total_pages, 3);
        assert_eq!(out.data, (40..45).collect::<Vec<u32>>());
    }

    #[test]
    fn paginate_huge_page_does_not_overflow() {
        let items: Vec<u32> = (0..5).collect();
        let out = paginate(&items, i64::MAX, 100);
        assert!(out.data.is_empty());
    }

    #[test]
    fn filter_without_props_matches_all() {
        let store = sample_store();
        assert_eq!(store.filter(&VendorFilter::default()).len(), 4);
    }

    #[test]
    fn filter_by_city_is_case_insensitive() {
        let store = sample_store();
        let props = VendorFilterBuilder::default()
            .city("berlin")
            .build()
            .unwrap();
        let hits = store.filter(&props);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|v| v.city == "Berlin"));
    }

    #[test]
    fn filter_by_both_intersects() {
        let store = sample_store();
        let props = VendorFilterBuilder::default()
            .city("Berlin")
            .cuisine("THAI")
            .build()
            .unwrap();
        let hits = store.filter(&props);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");
    }

    #[test]
    fn find_by_id() {
        let store = sample_store();
        assert_eq!(store.find("2").unwrap().name, "Jonas' Greek Corner");
        assert_eq!(
            store.find("99").unwrap_err(),
            StoreError::NotFound("99".to_string())
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn search_blank_query_matches_nothing(#[case] query: &str) {
        assert!(sample_store().search(query).is_empty());
    }

    #[test]
    fn search_matches_name_cuisine_or_city() {
        let store = sample_store();
        // "thai" hits cuisine (1, 3) and nothing else
        let ids: Vec<&str> = store.search("THAI").iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        // "corner" hits a name
        assert_eq!(store.search("corner")[0].id, "2");
        // "lisbon" hits a city
        assert_eq!(store.search("Lisbon")[0].id, "4");
        assert!(store.search("sushi").is_empty());
    }

    #[test]
    fn featured_returns_flagged_vendors_only() {
        let store = sample_store();
        let ids: Vec<&str> = store.featured().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["1", "4"]);
    }

    #[test]
    fn stats_count_every_enumerated_value() {
        let stats = sample_store().stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_city.len(), CITIES.len());
        assert_eq!(stats.by_cuisine.len(), CUISINES.len());
        assert_eq!(stats.by_city["Berlin"], 2);
        // enumerated but absent from the data
        assert_eq!(stats.by_city["Copenhagen"], 0);
        assert_eq!(stats.by_cuisine["Mexican"], 0);
        assert_eq!(stats.by_city.values().sum::<usize>(), stats.total);
        assert_eq!(stats.by_cuisine.values().sum::<usize>(), stats.total);
    }

    #[test]
    fn toggle_favorite_flips_and_reports_new_value() {
        let mut store = sample_store();
        assert_eq!(store.toggle_favorite("1"), Ok(true));
        assert!(store.find("1").unwrap().is_favorite);
        assert_eq!(store.toggle_favorite("1"), Ok(false));
        assert!(!store.find("1").unwrap().is_favorite);
    }

    #[test]
    fn toggle_favorite_miss_has_no_side_effect() {
        let mut store = sample_store();
        let before: Vec<Vendor> = store.all().to_vec();
        for _ in 0..2 {
            assert_eq!(
                store.toggle_favorite("nope"),
                Err(StoreError::NotFound("nope".to_string()))
            );
        }
        assert_eq!(store.all(), before.as_slice());
    }
}
