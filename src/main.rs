use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use sizeref::config::Settings;
use sizeref::core::Searcher;
use sizeref::routes::{self, friends::AppState};
use sizeref::services::{CatalogCache, CatalogLoader};
use std::sync::Arc;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing("info", "text");
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_tracing(&settings.logging.level, &settings.logging.format);

    info!("Starting SizeRef catalog service...");

    let loader = Arc::new(CatalogLoader::new(settings.catalog.path.clone(), settings.normalizer()));
    let cache = Arc::new(CatalogCache::new(settings.catalog.cache_ttl()));

    info!("Catalog source: {}", loader.path().display());

    // Warm the cache; a failure here is retried on the first request
    match cache.get_or_load(|| loader.load()) {
        Ok(catalog) => info!("Catalog loaded: {} entries", catalog.len()),
        Err(e) => warn!("Initial catalog load failed, will retry on demand: {}", e),
    }

    let searcher = Searcher::new(settings.search.default_tolerance);

    info!(
        "Searcher initialized (default tolerance: {}, cache TTL: {}s)",
        searcher.default_tolerance(),
        cache.ttl().as_secs()
    );

    let app_state = AppState {
        cache,
        loader,
        searcher,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
