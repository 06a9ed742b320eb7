use std::env;

pub const DEFAULT_ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";
pub const DEFAULT_VOICE_ID: &str = "Pw7NjARk1Tw61eca5OiP";
pub const DEFAULT_LANGUAGE: &str = "english";

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Synthesis provider
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_api_url: String,
    pub default_voice_id: String,
    pub synthesis_timeout_secs: u64,
    // Audio storage
    pub audio_bucket_name: Option<String>,
    pub aws_region: String,
    pub audio_public_base_url: Option<String>,
    pub signed_url_expiry_secs: u64,
    // History
    pub database_url: Option<String>,
    pub default_language: String,
    pub require_caller_id: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            elevenlabs_api_key: non_empty_var("ELEVENLABS_API_KEY"),
            elevenlabs_api_url: env::var("ELEVENLABS_API_URL")
                .unwrap_or_else(|_| DEFAULT_ELEVENLABS_API_URL.to_string()),
            default_voice_id: env::var("DEFAULT_VOICE_ID")
                .unwrap_or_else(|_| DEFAULT_VOICE_ID.to_string()),
            synthesis_timeout_secs: env::var("SYNTHESIS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            audio_bucket_name: non_empty_var("AUDIO_BUCKET_NAME"),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            audio_public_base_url: non_empty_var("AUDIO_PUBLIC_BASE_URL"),
            signed_url_expiry_secs: env::var("SIGNED_URL_EXPIRY_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()?,
            database_url: non_empty_var("DATABASE_URL"),
            default_language: env::var("DEFAULT_LANGUAGE")
                .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
            require_caller_id: env::var("REQUIRE_CALLER_ID")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Base URL that stored audio keys are appended to.
    ///
    /// Falls back to the virtual-hosted S3 address of the bucket.
    pub fn public_base_url(&self) -> Option<String> {
        if let Some(url) = &self.audio_public_base_url {
            return Some(url.trim_end_matches('/').to_string());
        }
        self.audio_bucket_name
            .as_ref()
            .map(|bucket| format!("https://{}.s3.{}.amazonaws.com", bucket, self.aws_region))
    }
}

// Hand-written so the API key never ends up in a log line.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("log_format", &self.log_format)
            .field("elevenlabs_api_key", &self.elevenlabs_api_key.as_ref().map(|_| "<redacted>"))
            .field("elevenlabs_api_url", &self.elevenlabs_api_url)
            .field("default_voice_id", &self.default_voice_id)
            .field("synthesis_timeout_secs", &self.synthesis_timeout_secs)
            .field("audio_bucket_name", &self.audio_bucket_name)
            .field("aws_region", &self.aws_region)
            .field("audio_public_base_url", &self.audio_public_base_url)
            .field("signed_url_expiry_secs", &self.signed_url_expiry_secs)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("default_language", &self.default_language)
            .field("require_caller_id", &self.require_caller_id)
            .finish()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
