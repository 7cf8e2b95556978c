use rflux::logger::{self, LoggerConfig};
use rflux::ui::Session;
use rflux::{FluxConfig, InferenceClient};
use std::io;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::from_env())?;
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = FluxConfig::from_env()?;
    logger::log_config_info(&config);

    let client = match InferenceClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to initialize inference client: {}", e);
            return Err(e.into());
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    Session::new(&client, client.config().output_dir.clone())
        .run(&mut input, &mut output)
        .await?;

    Ok(())
}
