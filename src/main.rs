use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use jobboard_recommend::config::{LoggingSettings, Settings};
use jobboard_recommend::core::Recommender;
use jobboard_recommend::routes::{self, jobs::AppState};
use jobboard_recommend::services::{SupabaseClient, SupabaseTables};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting job recommendation service...");
    info!("Configuration loaded successfully");

    let tables = SupabaseTables {
        profiles: settings.supabase.profiles_table.clone(),
        jobs: settings.supabase.jobs_table.clone(),
    };

    let supabase = SupabaseClient::new(
        settings.supabase.url.clone(),
        settings.supabase.anon_key.clone(),
        tables,
        Duration::from_secs(settings.supabase.timeout_secs.unwrap_or(30)),
    )
    .map_err(|e| {
        error!("Failed to create Supabase client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Supabase client initialized for {}", settings.supabase.url);

    let rules = settings.scoring_rules();
    let recommender = Recommender::new(rules)
        .skip_ineligible(settings.recommendation.skip_ineligible_jobs);

    info!("Recommender initialized with rules: {:?}", rules);

    let app_state = AppState {
        supabase: Arc::new(supabase),
        recommender,
        limits: settings.recommendation.clone(),
    };

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
