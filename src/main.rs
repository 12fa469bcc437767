use std::io;
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use tasktrek::auth::{AuthMiddleware, PasswordHasher, TokenCodec};
use tasktrek::config::Config;
use tasktrek::routes::{self, health};
use tasktrek::state::AppState;
use tasktrek::store::{MemoryStore, PgStore, Store};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;
    info!("Loaded configuration: {:?}", config);

    let codec = TokenCodec::new(&config.jwt_secret).map_err(|e| {
        error!("Cannot build token codec: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let codec = Arc::new(codec);

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url).await.map_err(|e| {
                error!("Failed to connect to database: {}", e);
                io::Error::new(io::ErrorKind::Other, e.to_string())
            })?;
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set, keeping data in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let state = web::Data::new(AppState::new(
        store,
        codec.clone(),
        PasswordHasher::new(config.bcrypt_cost),
        config.is_production(),
    ));

    info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(routes::cors())
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(codec.clone()))
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
