use crate::api;
use crate::cli::actions::Action;
use anyhow::Result;
use tracing::warn;

/// Handle the server action
///
/// # Errors
///
/// Returns an error if the server fails to start
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server { port, config } => {
            if config.uses_default_credentials() {
                warn!(
                    "Default admin credentials are in use. Set PORTERO_ADMIN_PASSWORD and PORTERO_SERVER_SECRET before exposing this service."
                );
            }

            api::serve(port, config).await?;
        }
    }

    Ok(())
}
