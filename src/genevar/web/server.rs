use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    http::StatusCode, response::{Html, IntoResponse, Response},
    routing::{get, post}, BoxError, Json, Router
};

use tower::ServiceBuilder;
use tower::timeout::error::Elapsed;
use tower_http::trace::TraceLayer;

use crate::data_types::{ErrorResponse, GeneInfoRequest};
use crate::lookup::{lookup_gene_info, LookupError};
use crate::provider::GeneProvider;
use crate::web::simple_pages::render_index_page;

pub struct AllState {
    pub provider: Arc<dyn GeneProvider>,
}

impl LookupError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::MissingInput |
            LookupError::InvalidRequest(_) |
            LookupError::InvalidGeneName(_) |
            LookupError::GeneNameTooLong(_) => StatusCode::BAD_REQUEST,
            LookupError::GeneNotFound(_) => StatusCode::NOT_FOUND,
            LookupError::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::warn!("gene lookup failed: {}", self);
        }

        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

async fn gene_info(all_state: &AllState, request: GeneInfoRequest) -> Response {
    match lookup_gene_info(all_state.provider.as_ref(), &request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => err.into_response(),
    }
}

// malformed bodies and query strings get the same {error} response as
// every other failure
async fn get_gene_info_post(State(all_state): State<Arc<AllState>>,
                            maybe_request: Result<Json<GeneInfoRequest>, JsonRejection>)
       -> Response
{
    match maybe_request {
        Ok(Json(request)) => gene_info(&all_state, request).await,
        Err(rejection) => LookupError::InvalidRequest(rejection.body_text()).into_response(),
    }
}

async fn get_gene_info_query(State(all_state): State<Arc<AllState>>,
                             maybe_request: Result<Query<GeneInfoRequest>, QueryRejection>)
       -> Response
{
    match maybe_request {
        Ok(Query(request)) => gene_info(&all_state, request).await,
        Err(rejection) => LookupError::InvalidRequest(rejection.body_text()).into_response(),
    }
}

async fn get_index() -> Html<String> {
    Html(render_index_page())
}

async fn ping() -> String {
    String::from("OK")
}

async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: "not found".to_owned() }))
}

async fn handle_layer_error(err: BoxError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, error) =
        if err.is::<Elapsed>() {
            (StatusCode::SERVICE_UNAVAILABLE, "Request timed out.".to_owned())
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Unhandled internal error: {}", err))
        };

    tracing::warn!("request failed: {}", error);

    (status, Json(ErrorResponse { error }))
}

pub fn make_router(all_state: AllState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(get_index))
        .route("/get_gene_info", post(get_gene_info_post))
        .route("/api/gene_info", get(get_gene_info_query))
        .route("/ping", get(ping))
        .fallback(not_found)
        .with_state(Arc::new(all_state))
        .layer(ServiceBuilder::new()
               .layer(HandleErrorLayer::new(handle_layer_error))
               .timeout(request_timeout))
        .layer(TraceLayer::new_for_http())
}
