use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use actix_web::{web, HttpResponse};
use rand::Rng;
use serde::{Deserialize, Serialize};

use food_safari::data::{MenuItem, Vendor};
use food_safari::store::{paginate, StoreError, VendorFilterBuilder, VendorStore};

pub(super) struct AppState {
    store: RwLock<VendorStore>,
}

impl AppState {
    pub(super) fn new(store: VendorStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    fn store(&self) -> RwLockReadGuard<'_, VendorStore> {
        self.store.read().expect("vendor store lock poisoned")
    }

    // Only the favorite toggle goes through here.
    fn store_mut(&self) -> RwLockWriteGuard<'_, VendorStore> {
        self.store.write().expect("vendor store lock poisoned")
    }
}

#[derive(Serialize)]
struct ErrJsonResp {
    error: &'static str,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrJsonResp { error: "Not found" })
}

// Query parameters arrive as strings; anything unparseable falls back to the
// default instead of failing the request.
fn coerce(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(default)
}

#[derive(Serialize)]
struct ApiDescriptor {
    name: &'static str,
    version: &'static str,
    endpoints: &'static [&'static str],
}

#[actix_web::get("/")]
pub(super) async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ApiDescriptor {
        name: "Street Food Safari API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: &[
            "GET /vendors?page=&limit=&city=&cuisine=",
            "GET /vendors/{id}",
            "GET /vendors/{id}/menu",
            "POST /vendors/{id}/favorite",
            "GET /search?q=",
            "GET /featured",
            "GET /stats",
            "GET /slow",
        ],
    })
}

#[derive(Deserialize)]
pub(super) struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
    city: Option<String>,
    cuisine: Option<String>,
}

#[actix_web::get("/vendors")]
pub(super) async fn vendors(
    data: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    let mut props = VendorFilterBuilder::default();
    if let Some(city) = query.city.as_deref() {
        props.city(city);
    }
    if let Some(cuisine) = query.cuisine.as_deref() {
        props.cuisine(cuisine);
    }
    let props = props.build().unwrap();

    let store = data.store();
    let matches = store.filter(&props);
    let page = coerce(query.page.as_deref(), 1);
    let limit = coerce(query.limit.as_deref(), 20);
    HttpResponse::Ok().json(paginate(&matches, page, limit))
}

#[derive(Deserialize)]
pub(super) struct VendorPath {
    id: String,
}

#[actix_web::get("/vendors/{id}")]
pub(super) async fn vendor_by_id(
    data: web::Data<AppState>,
    path: web::Path<VendorPath>,
) -> HttpResponse {
    let store = data.store();
    match store.find(&path.id) {
        Ok(vendor) => HttpResponse::Ok().json(vendor),
        Err(StoreError::NotFound(_)) => not_found(),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MenuResp<'a> {
    vendor_id: &'a str,
    items: &'a [MenuItem],
}

#[actix_web::get("/vendors/{id}/menu")]
pub(super) async fn vendor_menu(
    data: web::Data<AppState>,
    path: web::Path<VendorPath>,
) -> HttpResponse {
    let store = data.store();
    match store.find(&path.id) {
        Ok(vendor) => HttpResponse::Ok().json(MenuResp {
            vendor_id: &vendor.id,
            items: &vendor.menu,
        }),
        Err(StoreError::NotFound(_)) => not_found(),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteResp<'a> {
    id: &'a str,
    is_favorite: bool,
}

#[actix_web::post("/vendors/{id}/favorite")]
pub(super) async fn toggle_favorite(
    data: web::Data<AppState>,
    path: web::Path<VendorPath>,
) -> HttpResponse {
    let mut store = data.store_mut();
    match store.toggle_favorite(&path.id) {
        Ok(is_favorite) => HttpResponse::Ok().json(FavoriteResp {
            id: &path.id,
            is_favorite,
        }),
        Err(StoreError::NotFound(id)) => {
            tracing::debug!("favorite toggle miss for vendor {id}");
            not_found()
        }
    }
}

#[derive(Deserialize)]
pub(super) struct SearchQuery {
    q: Option<String>,
    limit: Option<String>,
}

#[actix_web::get("/search")]
pub(super) async fn search(
    data: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let store = data.store();
    let matches = store.search(query.q.as_deref().unwrap_or(""));
    let limit = coerce(query.limit.as_deref(), 20);
    HttpResponse::Ok().json(paginate(&matches, 1, limit))
}

#[derive(Serialize)]
struct FeaturedResp<'a> {
    data: Vec<&'a Vendor>,
}

#[actix_web::get("/featured")]
pub(super) async fn featured(data: web::Data<AppState>) -> HttpResponse {
    let store = data.store();
    HttpResponse::Ok().json(FeaturedResp {
        data: store.featured(),
    })
}

#[actix_web::get("/stats")]
pub(super) async fn stats(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(data.store().stats())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SlowResp {
    ok: bool,
    delay_ms: u64,
    message: &'static str,
}

/// Suspends 1500-3500 ms, then resolves success or a simulated outage
/// (p = 0.2) so clients can exercise their retry/backoff paths.
#[actix_web::get("/slow")]
pub(super) async fn slow() -> HttpResponse {
    let (delay_ms, outage) = {
        let mut rng = rand::rng();
        (rng.random_range(1500..3500u64), rng.random_bool(0.2))
    };
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    if outage {
        tracing::warn!("simulated outage after {delay_ms}ms");
        return HttpResponse::ServiceUnavailable().json(ErrJsonResp {
            error: "Temporary outage",
        });
    }
    HttpResponse::Ok().json(SlowResp {
        ok: true,
        delay_ms,
        message: "Thanks for waiting!",
    })
}
