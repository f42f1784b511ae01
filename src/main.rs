mod api;
mod config;
mod errors;
mod handlers;
mod models;
mod session;
mod views;

use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::sync::Arc;

use crate::api::HttpEmployeeApi;
use crate::config::Config;
use crate::handlers::AppState;
use crate::session::SessionStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()));
        }
    };

    let api = HttpEmployeeApi::new(&config)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;
    let api_url = api.base_url().clone();

    let state = web::Data::new(AppState {
        sessions: SessionStore::new(Arc::new(api), config.session_idle),
        api_url,
    });

    info!("Starting employee UI at {} (backend {})", config.bind_address, config.api_url);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(handlers::configure))
        .bind(&config.bind_address)?
        .run()
        .await
}
