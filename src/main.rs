use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;

use altex_ppto_backend::api::{AuthApi, HealthApi, ResourcesApi, TipoUsuarioApi};
use altex_ppto_backend::app_data::AppData;
use altex_ppto_backend::config::{self, Settings};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    config::init_logging().map_err(std::io::Error::other)?;

    let settings = Settings::from_env().map_err(std::io::Error::other)?;

    let db = config::init_database(&settings.database_url)
        .await
        .map_err(std::io::Error::other)?;
    config::migrate_database(&db)
        .await
        .map_err(std::io::Error::other)?;

    let app_data = AppData::init(db, &settings);

    let auth_api = AuthApi::new(
        app_data.user_store.clone(),
        app_data.token_service.clone(),
    );
    let tipo_usuario_api = TipoUsuarioApi::new(
        app_data.tipo_usuario_store.clone(),
        app_data.token_service.clone(),
    );
    // ResourcesApi carries the catch-all routes, so it goes last
    let resources_api = ResourcesApi::new(app_data.record_store.clone());

    let api_service = OpenApiService::new(
        (HealthApi, auth_api, tipo_usuario_api, resources_api),
        "Altex PPTO API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://localhost:{}/api", settings.port));

    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    let bind_address = settings.bind_address();
    tracing::info!(%bind_address, "starting server");
    tracing::info!("Swagger UI available at /swagger");

    Server::new(TcpListener::bind(bind_address)).run(app).await
}
