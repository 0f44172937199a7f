use relay_config::Config;
use relay_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = email::connect(&config.smtp, config.email.from.clone())?;
    if let Err(err) = email.ping().await {
        warn!("Smtp server is not reachable yet: {err:#}");
    }

    let server = environment::rest_server(&config, email)?;
    server.serve().await
}
