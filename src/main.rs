/// Sentinel Relay - moderation command relay
///
/// Receives operator commands from a chat front end and applies them to
/// the game platform: persistent restrictions plus live server commands.

use sentinel_relay::{config::RelayConfig, context::AppContext, error::RelayResult, server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> RelayResult<()> {
    // Load configuration before logging so the format choice applies
    let config = RelayConfig::from_env()?;

    init_logging(config.logging.json);

    print_banner();

    let ctx = AppContext::new(config)?;

    server::serve(ctx).await?;

    Ok(())
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sentinel_relay=debug,tower_http=debug".into());

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn print_banner() {
    println!(
        r#"
   _____            __  _            __   ____       __
  / ___/___  ____  / /_(_)___  ___  / /  / __ \___  / /___ ___  __
  \__ \/ _ \/ __ \/ __/ / __ \/ _ \/ /  / /_/ / _ \/ / __ `/ / / /
 ___/ /  __/ / / / /_/ / / / /  __/ /  / _, _/  __/ / /_/ / /_/ /
/____/\___/_/ /_/\__/_/_/ /_/\___/_/  /_/ |_|\___/_/\__,_/\__, /
                                                         /____/
        Moderation Command Relay v{}
        "#,
        env!("CARGO_PKG_VERSION")
    );
}
