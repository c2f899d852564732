use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post, put},
    Json, Router,
};

use crate::controllers::compute_controller::ComputeController;
use crate::controllers::routes_controller::RoutesController;
use crate::dto::compute_dto::ComputedRouteResponse;
use crate::dto::route_dto::{RouteListQuery, RouteListResponse};
use crate::models::route::SavedRoute;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/compute", post(compute_route))
        .route("/", post(create_route))
        .route("/", get(list_routes))
        .route("/:id", get(get_route))
        .route("/:id", put(replace_route))
        .route("/:id", patch(patch_route))
        .route("/:id", delete(delete_route))
}

async fn compute_route(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ComputedRouteResponse>, AppError> {
    let controller = ComputeController::new(state.pois.clone(), state.graphhopper.clone());
    let response = controller.compute(&body).await?;
    Ok(Json(response))
}

async fn create_route(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<SavedRoute>), AppError> {
    let controller = RoutesController::new(state.routes.clone());
    let route = controller.create(&body).await?;
    Ok((StatusCode::CREATED, Json(route)))
}

async fn list_routes(
    State(state): State<AppState>,
    Query(query): Query<RouteListQuery>,
) -> Result<Json<RouteListResponse>, AppError> {
    let controller = RoutesController::new(state.routes.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SavedRoute>, AppError> {
    let controller = RoutesController::new(state.routes.clone());
    let route = controller.get(&id).await?;
    Ok(Json(route))
}

async fn replace_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Json<SavedRoute>, AppError> {
    let controller = RoutesController::new(state.routes.clone());
    let route = controller.replace(&id, &body).await?;
    Ok(Json(route))
}

async fn patch_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Json<SavedRoute>, AppError> {
    let controller = RoutesController::new(state.routes.clone());
    let route = controller.patch(&id, &body).await?;
    Ok(Json(route))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let controller = RoutesController::new(state.routes.clone());
    controller.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
