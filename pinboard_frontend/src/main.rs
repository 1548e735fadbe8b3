use anyhow::{anyhow, Result};
use pinboard_frontend::PinboardConfig;

fn main() -> Result<()> {
    env_logger::init();
    // Optional deep link, e.g. `pinboard "?pin=66a1f0"`.
    let location = std::env::args().nth(1);
    let config = PinboardConfig::from_env()?.with_initial_location(location);
    log::info!("catalog endpoint: {}", config.api_url);
    pinboard_frontend::run_frontend(config).map_err(|err| anyhow!("frontend exited: {err}"))
}
