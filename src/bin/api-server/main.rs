use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use food_safari::catalog;
use food_safari::store::VendorStore;

mod api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(true)
        .with_file(false)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("fail to setup logging");

    let port: u16 = env_or("PORT", 3333);
    let seed: u64 = env_or("DATASET_SEED", catalog::DEFAULT_SEED);
    let count: usize = env_or("DATASET_SIZE", catalog::DEFAULT_SIZE);

    let state = web::Data::new(api::AppState::new(VendorStore::generate(seed, count)));
    tracing::info!("generated {count} vendors with seed {seed}");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .service(api::index)
            .service(api::vendors)
            .service(api::vendor_by_id)
            .service(api::vendor_menu)
            .service(api::toggle_favorite)
            .service(api::search)
            .service(api::featured)
            .service(api::stats)
            .service(api::slow)
    })
    .bind(("0.0.0.0", port))?;

    tracing::info!("street food safari api listening on http://0.0.0.0:{port}");
    server.run().await?;
    Ok(())
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("invalid {key} value {raw:?}, using default {default}");
            default
        }
    }
}
