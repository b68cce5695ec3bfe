pub mod health;
pub mod recipes;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// All routes, including Swagger UI. State is supplied by the caller.
pub fn router() -> Router<AppState> {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi());

    Router::new()
        .route("/api/health", get(health::health))
        .nest("/api/recipes", recipes::router())
        .merge(swagger_ui)
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Recipe Management API",
            description = "RESTful API for managing cooking recipes",
            version = "1.0.0"
        ),
        components(schemas(ErrorResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> =
        vec![health::ApiDoc::openapi(), recipes::ApiDoc::openapi()];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
pub mod testing {
    use crate::db::testing::temp_pool;
    use crate::service::RecipeService;
    use crate::store::DbRecipeStore;
    use crate::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde::de::DeserializeOwned;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    pub fn test_app() -> (TempDir, Router) {
        let (dir, pool) = temp_pool();
        let state = AppState {
            recipes: RecipeService::new(Arc::new(DbRecipeStore::new(pool.clone()))),
            pool,
        };
        (dir, super::router().with_state(state))
    }

    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    pub async fn send_json<T: DeserializeOwned>(
        app: &Router,
        request: Request<Body>,
    ) -> (StatusCode, T) {
        let (status, body) = send(app, request).await;
        let value = serde_json::from_slice(&body)
            .unwrap_or_else(|e| panic!("bad body ({}): {}", e, String::from_utf8_lossy(&body)));
        (status, value)
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn with_json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{get, send, test_app};
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_openapi_lists_recipe_paths() {
        let spec = openapi();
        assert_eq!(spec.info.title, "Recipe Management API");
        assert_eq!(spec.info.version, "1.0.0");
        assert!(spec.paths.paths.contains_key("/api/recipes"));
        assert!(spec.paths.paths.contains_key("/api/recipes/{id}"));
        assert!(spec.paths.paths.contains_key("/api/health"));

        let schemas = &spec.components.unwrap().schemas;
        assert!(schemas.contains_key("RecipeRequest"));
        assert!(schemas.contains_key("RecipeResponse"));
        assert!(schemas.contains_key("ErrorResponse"));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (_dir, app) = test_app();
        let (status, body) = send(&app, get("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(doc["info"]["title"], "Recipe Management API");
    }
}
