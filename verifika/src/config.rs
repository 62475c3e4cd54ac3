use anyhow::Result;
use config::Config;
use reqwest::Url;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://verifika.onrender.com/api/predict";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct AppConfig {
    pub api_url: String,
    pub bind_address: String,
    pub request_timeout_secs: Option<u64>,
    pub preview_chars: Option<usize>,
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_url: DEFAULT_API_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            request_timeout_secs: None,
            preview_chars: None,
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Валидация конфигурации
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_url)
            .map_err(|e| anyhow::anyhow!("api_url is not a valid URL: {}", e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow::anyhow!("api_url must use http or https"));
        }

        self.bind_address
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("bind_address is invalid: {}", e))?;

        if let Some(timeout) = self.request_timeout_secs {
            if timeout == 0 || timeout > 300 {
                return Err(anyhow::anyhow!("request_timeout_secs must be between 1 and 300"));
            }
        }

        if let Some(preview) = self.preview_chars {
            if preview == 0 || preview > 10_000 {
                return Err(anyhow::anyhow!("preview_chars must be between 1 and 10000"));
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn preview_chars(&self) -> usize {
        self.preview_chars.unwrap_or(DEFAULT_PREVIEW_CHARS)
    }
}

pub fn load_config() -> Result<AppConfig> {
    // Загружаем .env файл
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .set_default("api_url", DEFAULT_API_URL)?
        .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("VERIFIKA"))
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    config.validate()?;

    Ok(config)
}
