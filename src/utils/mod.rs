//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores, la validación de payloads
//! y los cálculos geográficos compartidos.

pub mod errors;
pub mod geo;
pub mod validation;
