//! DTOs de la API
//!
//! Requests y responses por endpoint, con su paso de validación que
//! convierte el JSON poco tipado del caller en structs tipados.

pub mod compute_dto;
pub mod poi_dto;
pub mod route_dto;
