use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use random_poetry::config::{LoggingSettings, Settings};
use random_poetry::core::{GenerationLimits, PoemGenerator};
use random_poetry::routes::{self, AppState};
use random_poetry::services::Library;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber; `RUST_LOG` takes precedence over the configured level
fn init_logging(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting random poetry service...");
    info!("Configuration loaded successfully");

    // Dictionary and corpora take a while to index; keep it off the runtime thread
    let data_settings = settings.data.clone();
    let library = tokio::task::spawn_blocking(move || Library::load(&data_settings))
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?
        .map_err(|e| {
            error!("Failed to load poetry data: {}", e);
            std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string())
        })?;

    let limits = GenerationLimits::from(&settings.generation);
    info!("Poem generator initialized with limits: {:?}", limits);

    let app_state = AppState {
        library,
        generator: PoemGenerator::new(limits),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
