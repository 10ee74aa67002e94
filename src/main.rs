use domain::jwt::Tokenizer;
use log::*;
use service::config::Config;
use service::logging::Logger;
use web::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::new();
    Logger::init_logger(&config);

    info!("Starting BeerBrawl tournament backend...");

    // Missing or weak signing material must stop the process here, before
    // any request is accepted.
    let tokenizer = Tokenizer::new(&config)?;

    let app_state = AppState::new(config, tokenizer);
    web::init_server(app_state).await?;

    Ok(())
}
