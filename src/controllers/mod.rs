//! Controllers de la API
//!
//! Cada controller encapsula la lógica de un recurso; los handlers de
//! axum quedan como capas finas que extraen y delegan.

pub mod compute_controller;
pub mod poi_controller;
pub mod routes_controller;
