use once_cell::sync::OnceCell;
use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UploadConfig {
    /// Путь, на который принимаются файлы
    pub route: String,
    /// Имя поля multipart формы с файлом
    pub field_name: String,
    /// Максимальный размер тела запроса в байтах
    pub max_body_bytes: usize,
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to `Config::default()`
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default configuration");
    Ok(Config::default())
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.upload.max_body_bytes == 0 {
        anyhow::bail!("upload.max_body_bytes must be greater than zero");
    }
    if !config.upload.route.starts_with('/') {
        anyhow::bail!("upload.route must start with '/': {}", config.upload.route);
    }
    Ok(config)
}

/// Сохраняет конфигурацию для всего процесса (вызывается один раз из main)
pub fn initialize(config: Config) -> anyhow::Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("configuration already initialized"))
}

/// Текущая конфигурация; без initialize() возвращается конфигурация по умолчанию
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            upload: UploadConfig {
                route: "/leitura/teste".to_string(),
                field_name: "file".to_string(),
                max_body_bytes: 10 * 1024 * 1024,
            },
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
