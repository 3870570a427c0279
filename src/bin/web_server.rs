use route_finder::web::server::{start_server_with_config, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Optional first argument overrides the port
    let args: Vec<String> = env::args().collect();
    let port = match args.get(1) {
        Some(raw) => raw.parse()?,
        None => ServerConfig::default().port,
    };

    let config = ServerConfig {
        port,
        ..Default::default()
    };

    println!("Starting route finder web server...");
    println!("Configuration:");
    println!("   Port: {}", config.port);
    println!("   CORS enabled: {}", config.enable_cors);
    println!("   Max sessions: {}", config.max_sessions);
    println!("   Session timeout: {} minutes", config.session_timeout_minutes);
    println!();

    start_server_with_config(config).await?;

    Ok(())
}
