//! Cálculo de distancias geográficas

/// Radio medio de la Tierra en metros
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Distancia de círculo máximo entre dos puntos (fórmula de haversine)
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * a.sqrt().min(1.0).asin()
}
