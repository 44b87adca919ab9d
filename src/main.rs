//! JSON API server for client records.

use dotenvy::dotenv;

use pushkind_clients::db::{establish_connection_pool, run_migrations};
use pushkind_clients::models::config::{ApiServerConfig, load_settings};
use pushkind_clients::run_api;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_settings::<ApiServerConfig>("api") {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading API config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to establish database connection: {err}");
            std::process::exit(1);
        }
    };

    match run_migrations(&pool) {
        Ok(0) => log::info!("Database schema is up to date"),
        Ok(applied) => log::info!("Applied {applied} migrations"),
        Err(err) => {
            log::error!("Failed to run migrations: {err}");
            std::process::exit(1);
        }
    }

    run_api(server_config, pool).await
}
