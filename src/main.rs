use salon_hub::models::config::ServerConfig;

fn load_config() -> std::io::Result<ServerConfig> {
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let settings = config::Config::builder()
        .add_source(config::File::with_name(&config_path).required(false))
        .add_source(config::Environment::default().separator("__"))
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    settings
        .try_deserialize::<ServerConfig>()
        .map_err(|e| std::io::Error::other(format!("Invalid configuration: {e}")))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let server_config = load_config()?;

    salon_hub::run(server_config).await
}
