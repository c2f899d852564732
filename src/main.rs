use anyhow::Result;
use axum::middleware;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use poi_routing::config::environment::EnvironmentConfig;
use poi_routing::middleware::auth::auth_rate_limit_middleware;
use poi_routing::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use poi_routing::routes::create_api_router;
use poi_routing::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🗺️ POI Routing API");
    info!("==================");

    let config = EnvironmentConfig::default();
    info!("⚙️ Entorno: {}", config.environment);
    info!("⚙️ POIs: {}", config.pois_file.display());
    info!("⚙️ Rutas: {}", config.routes_file.display());
    info!("⚙️ GraphHopper: {}", config.graphhopper_url);

    let state = AppState::new(config.clone());

    // En desarrollo se acepta cualquier origen; en producción solo los configurados
    let cors = if config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app = create_api_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_rate_limit_middleware,
        ))
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = config.server_addr().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /about - Información del servicio");
    info!("📍 POIs:");
    info!("   GET    /pois - Listar/filtrar POIs");
    info!("   GET    /pois/:id - Obtener POI");
    info!("🧭 Rutas:");
    info!("   POST   /routes/compute - Calcular ruta (GraphHopper)");
    info!("   POST   /routes - Guardar ruta");
    info!("   GET    /routes - Listar/filtrar rutas");
    info!("   GET    /routes/:id - Obtener ruta");
    info!("   PUT    /routes/:id - Reemplazar ruta");
    info!("   PATCH  /routes/:id - Actualizar ruta");
    info!("   DELETE /routes/:id - Eliminar ruta");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!("Error del servidor: {}", e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
