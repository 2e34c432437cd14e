use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use studyforge_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    config
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    std::fs::create_dir_all(&config.upload_dir)?;

    let state = AppState::new(&config)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let state = web::Data::new(state);

    let bind_addr = (config.web_server_host.clone(), config.web_server_port);
    log::info!(
        "Starting HTTP server on {}:{} (model {})",
        bind_addr.0,
        bind_addr.1,
        config.gemini_model
    );

    HttpServer::new(move || {
        let cors = match &config.cors_allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header(),
            None => Cors::permissive(),
        };

        App::new()
            .wrap(cors)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(|cfg| handlers::configure(cfg, &config))
    })
    .bind(bind_addr)?
    .run()
    .await
}
