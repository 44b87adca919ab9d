//! Server-rendered front end talking to the clients API.

use dotenvy::dotenv;

use pushkind_clients::models::config::{WebServerConfig, load_settings};
use pushkind_clients::run_web;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_settings::<WebServerConfig>("web") {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading web config: {err}");
            std::process::exit(1);
        }
    };

    run_web(server_config).await
}
