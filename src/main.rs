use std::sync::Arc;

use clap::Parser;
use poem::{Server, listener::TcpListener};

use healthcard_backend::AppData;
use healthcard_backend::api::create_app;
use healthcard_backend::cli::{self, Cli};
use healthcard_backend::config::{
    BootstrapSettings, SystemEnvironment, init_database, init_logging, migrate_database,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();

    let env_provider = Arc::new(SystemEnvironment);
    let settings = BootstrapSettings::from_env_provider(env_provider.clone())?;
    tracing::info!("Loaded settings: {:?}", settings);

    let db = init_database(&settings).await?;
    migrate_database(&db).await?;

    let server_address = settings.server_address();
    let app_data = Arc::new(AppData::init(db, env_provider, settings).await?);

    if !cli.is_serve() {
        return cli::execute_command(cli, &app_data).await;
    }

    let app = create_app(app_data);

    tracing::info!("Starting server on http://{}", server_address);
    tracing::info!("Swagger UI available at http://{}/swagger", server_address);
    tracing::info!("API endpoints available at http://{}/api", server_address);

    Server::new(TcpListener::bind(server_address)).run(app).await?;

    Ok(())
}
