//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: config, repositorios sobre los archivos
//! de datos, cliente del motor de routing y el gate de autenticación.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::auth::AuthGate;
use crate::models::{poi::Poi, route::SavedRoute, user::ApiUser};
use crate::repositories::json_store::JsonFileStore;
use crate::repositories::poi_repository::PoiRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::services::graphhopper_service::GraphHopperService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub pois: PoiRepository,
    pub routes: RouteRepository,
    pub graphhopper: GraphHopperService,
    pub auth: AuthGate,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> Self {
        let pois = PoiRepository::new(Arc::new(JsonFileStore::<Poi>::new(&config.pois_file)));
        let routes =
            RouteRepository::new(Arc::new(JsonFileStore::<SavedRoute>::new(&config.routes_file)));
        let auth = AuthGate::new(Arc::new(JsonFileStore::<ApiUser>::new(&config.users_file)));
        let graphhopper = GraphHopperService::new(config.graphhopper_url.clone());

        Self {
            config,
            pois,
            routes,
            graphhopper,
            auth,
        }
    }
}
