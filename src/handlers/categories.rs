use axum::response::Json;
use common::CategoryCatalog;
use common::labels::catalog;
use tracing::instrument;

use crate::schemas::ApiResponse;

/// Every category key with its display label and icon
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Category catalog", body = ApiResponse<CategoryCatalog>)
    )
)]
#[instrument]
pub async fn get_categories() -> Json<ApiResponse<CategoryCatalog>> {
    Json(ApiResponse::ok(catalog(), "Categories retrieved successfully"))
}
