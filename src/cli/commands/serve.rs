//! Web server command.

use crate::cli::icons::info;
use crate::config::Settings;
use crate::context::AppContext;

/// Port used when the bind address names only a host.
const DEFAULT_PORT: u16 = 8501;

/// Start the web interface.
pub async fn cmd_serve(
    settings: &Settings,
    ctx: AppContext,
    bind: Option<&str>,
) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind.unwrap_or(&settings.server.bind));

    println!(
        "{} Starting textlens at http://{}:{}",
        info(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(ctx, &settings.server, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "8080" -> 127.0.0.1:8080
/// - Just a host: "0.0.0.0" -> 0.0.0.0:8501
/// - Host and port: "0.0.0.0:8080" -> 0.0.0.0:8080
fn parse_bind_address(bind: &str) -> (String, u16) {
    if let Ok(port) = bind.parse::<u16>() {
        return ("127.0.0.1".to_string(), port);
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return (host.to_string(), port);
        }
    }

    (bind.to_string(), DEFAULT_PORT)
}
