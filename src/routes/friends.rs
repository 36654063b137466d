use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{Catalog, ErrorResponse, FriendsResponse, HealthResponse, SearchQuery};
use crate::services::{CatalogCache, CatalogError, CatalogLoader};
use crate::core::Searcher;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CatalogCache>,
    pub loader: Arc<CatalogLoader>,
    pub searcher: Searcher,
}

/// Configure all friend-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/friends", web::get().to(search_friends))
        .route("/friends/csv", web::get().to(list_friends));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog_entries = state.cache.peek().map(|catalog| catalog.len());

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_entries,
    })
}

/// Fetch the catalog through the cache, running the file read off the
/// async workers
async fn load_catalog(state: &AppState) -> Result<Arc<Catalog>, CatalogError> {
    let cache = Arc::clone(&state.cache);
    let loader = Arc::clone(&state.loader);

    web::block(move || cache.get_or_load(|| loader.load()))
        .await
        .map_err(|e| CatalogError::Task(e.to_string()))?
}

fn catalog_unavailable(err: &CatalogError) -> HttpResponse {
    tracing::error!("Error reading catalog: {}", err);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "catalog_unavailable".to_string(),
        message: "Failed to read friends data".to_string(),
        status_code: 500,
    })
}

/// Search friends endpoint
///
/// GET /api/v1/friends?height=65&bust=34&waist=28&hips=36&tolerance=2
///
/// Without any of the four measurements the whole catalog is returned.
async fn search_friends(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for friends search: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let catalog = match load_catalog(&state).await {
        Ok(catalog) => catalog,
        Err(e) => return catalog_unavailable(&e),
    };

    let filter = query.to_filter();
    let result = state.searcher.search(&catalog.entries, filter.as_ref());

    tracing::info!(
        "Returning {} friends (from {} in catalog, filtered: {})",
        result.entries.len(),
        result.total_candidates,
        filter.is_some()
    );

    HttpResponse::Ok().json(FriendsResponse {
        matched: result.entries.len(),
        total: result.total_candidates,
        friends: result.entries,
    })
}

/// Full catalog as a bare JSON array
///
/// GET /api/v1/friends/csv
async fn list_friends(state: web::Data<AppState>) -> impl Responder {
    match load_catalog(&state).await {
        Ok(catalog) => HttpResponse::Ok().json(&catalog.entries),
        Err(e) => catalog_unavailable(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Normalizer;
    use actix_web::{test, App};

    fn state_for(path: &str) -> AppState {
        AppState {
            cache: Arc::new(CatalogCache::default()),
            loader: Arc::new(CatalogLoader::new(path, Normalizer::default())),
            searcher: Searcher::default(),
        }
    }

    #[actix_web::test]
    async fn test_health_without_catalog() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for("/nonexistent.csv")))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
        assert_eq!(body.catalog_entries, None);
    }

    #[actix_web::test]
    async fn test_unreadable_source_hides_details() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for("/nonexistent/secret/path.csv")))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/friends").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let body = test::read_body(resp).await;
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("Failed to read friends data"));
        assert!(!text.contains("secret"));
    }
}
