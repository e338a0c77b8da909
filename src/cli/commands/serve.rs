//! Web server command.

use console::style;

use crate::config::Settings;

/// Port used when the bind address names only a host.
const DEFAULT_PORT: u16 = 8000;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind);

    if !settings.has_api_key() {
        eprintln!(
            "{} No OpenWeather API key configured; weather requests will fail",
            style("!").yellow(),
        );
    }

    println!(
        "{} Starting weather-voice server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "8000" -> 127.0.0.1:8000
/// - Just a host: "0.0.0.0" -> 0.0.0.0:8000
/// - Host and port: "0.0.0.0:8000" -> 0.0.0.0:8000
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_only() {
        assert_eq!(parse_bind_address("9000"), ("127.0.0.1".to_string(), 9000));
    }

    #[test]
    fn test_host_only() {
        assert_eq!(
            parse_bind_address("0.0.0.0"),
            ("0.0.0.0".to_string(), DEFAULT_PORT)
        );
    }

    #[test]
    fn test_host_and_port() {
        assert_eq!(
            parse_bind_address("localhost:8003"),
            ("localhost".to_string(), 8003)
        );
    }
}
