use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::poi_controller::PoiController;
use crate::dto::poi_dto::{PoiListQuery, PoiListResponse};
use crate::models::poi::Poi;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_poi_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pois))
        .route("/:id", get(get_poi))
}

async fn list_pois(
    State(state): State<AppState>,
    Query(query): Query<PoiListQuery>,
) -> Result<Json<PoiListResponse>, AppError> {
    let controller = PoiController::new(state.pois.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn get_poi(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Poi>, AppError> {
    let controller = PoiController::new(state.pois.clone());
    let response = controller.get_by_id(&id).await?;
    Ok(Json(response))
}
