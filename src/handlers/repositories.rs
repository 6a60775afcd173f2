use axum::{extract::State, response::Json};
use tracing::{instrument, trace};
use crate::schemas::{AppState, RepositoriesResponse};

/// List the repositories configured for the dashboard
#[utoipa::path(
    get,
    path = "/api/repositories",
    tag = "forecast",
    responses(
        (status = 200, description = "Configured repositories", body = RepositoriesResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_repositories(State(state): State<AppState>) -> Json<RepositoriesResponse> {
    let catalog = &state.settings.catalog;
    trace!("Listing {} repositories", catalog.len());

    Json(RepositoriesResponse {
        repositories: catalog.repositories().to_vec(),
        default_key: catalog.default_option().key.clone(),
    })
}
