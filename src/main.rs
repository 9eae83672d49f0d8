use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::env;
use std::sync::Arc;

use streaks_server::api::{self, AppState};
use streaks_server::readiness::ReadinessGate;
use streaks_server::store::Store;
use streaks_server::views::ViewBuilder;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Load environment variables
    dotenvy::dotenv().ok();

    // Get configuration from environment
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8069".to_string())
        .parse()
        .expect("PORT must be a number");

    let db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "streaks.db".to_string());
    let app_name = env::var("APP_NAME").unwrap_or_else(|_| "streaks".to_string());
    let app_version =
        env::var("APP_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    // Initialize store
    let store = Arc::new(Store::new(&db_path).expect("Failed to initialize database"));
    let views = ViewBuilder::new(store.clone());

    // Seed starter data on first run
    let item_count = store.count_items().expect("Failed to count items");
    if item_count == 0 {
        log::info!("Empty database, seeding starter items");
        if let Err(e) = store.seed_initial_data() {
            log::error!("Failed to seed starter items: {}", e);
        }
    }

    // Bounded readiness check: resolves READY once the views have data, or
    // after the backoff schedule is exhausted (empty store, not a loading
    // store). Never blocks startup indefinitely.
    let mut gate = ReadinessGate::new();
    gate.wait_until_ready(|| {
        let items = views.items().map(|v| v.len()).unwrap_or(0);
        let categories = views.categories().map(|v| v.len()).unwrap_or(0);
        items > 0 && categories > 0
    });
    log::info!("Store ready");

    log::info!("Database: {}", db_path);
    log::info!("Starting streaks-server on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "SAMEORIGIN"))
                    .add(("Referrer-Policy", "strict-origin-when-cross-origin")),
            )
            .app_data(web::Data::new(AppState {
                app_name: app_name.clone(),
                app_version: app_version.clone(),
            }))
            .configure(api::configure_routes)
    })
    .workers(1)
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
