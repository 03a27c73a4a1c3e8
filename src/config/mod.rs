use std::collections::HashMap;

use actix_web::http::Uri;

use crate::consts;
use crate::errors::RoastError;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub json_response: bool,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub enum JwtKey {
    Secret(String),
    RsaPublicPem(String),
}

#[derive(Debug, Clone)]
pub enum AuthConfig {
    Static {
        token: String,
        client_id: String,
    },
    Jwt {
        key: JwtKey,
        issuer: Option<String>,
        audience: Option<String>,
        client_id: String,
    },
}

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub auth: AuthConfig,
    pub phone_number: String,
}

pub trait ConfigLoader: Send + Sync {
    fn load_config(&self) -> Result<Config, RoastError>;
}

pub struct EnvConfigLoader {
    vars: HashMap<String, String>,
}

impl EnvConfigLoader {
    pub fn from_env() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    fn require(&self, key: &str) -> Result<String, RoastError> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| RoastError::ConfigError(format!("{key} must be set")))
    }

    fn flag(&self, key: &str) -> Result<bool, RoastError> {
        match self.get(key).map(str::to_ascii_lowercase).as_deref() {
            None | Some("0" | "false" | "no" | "off") => Ok(false),
            Some("1" | "true" | "yes" | "on") => Ok(true),
            Some(other) => Err(RoastError::ConfigError(format!(
                "{key} must be a boolean, got {other:?}"
            ))),
        }
    }

    fn load_server(&self) -> Result<ServerConfig, RoastError> {
        let port = match self.get("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| RoastError::ConfigError(format!("invalid PORT {port:?}: {e}")))?,
            None => consts::DEFAULT_PORT,
        };

        let cors_allowed_origins: Vec<String> = self
            .get("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        for origin in &cors_allowed_origins {
            validate_origin(origin)?;
        }

        Ok(ServerConfig {
            host: self.get_or("HOST", consts::DEFAULT_HOST),
            port,
            json_response: self.flag("MCP_JSON_RESPONSE")?,
            cors_allowed_origins,
        })
    }

    fn load_auth(&self) -> Result<AuthConfig, RoastError> {
        let client_id = self.get_or("AUTH_CLIENT_ID", consts::DEFAULT_CLIENT_ID);
        let mode = self.get_or("AUTH_MODE", "static").to_ascii_lowercase();

        match mode.as_str() {
            "static" => Ok(AuthConfig::Static {
                token: self.require("AUTH_TOKEN")?,
                client_id,
            }),
            "jwt" => {
                let key = match (self.get("JWT_SECRET"), self.get("JWT_PUBLIC_KEY")) {
                    (Some(_), Some(_)) => {
                        return Err(RoastError::ConfigError(
                            "set only one of JWT_SECRET or JWT_PUBLIC_KEY".to_string(),
                        ));
                    }
                    (Some(secret), None) => JwtKey::Secret(secret.to_string()),
                    (None, Some(pem)) => JwtKey::RsaPublicPem(pem.replace("\\n", "\n")),
                    (None, None) => {
                        return Err(RoastError::ConfigError(
                            "AUTH_MODE=jwt requires JWT_SECRET or JWT_PUBLIC_KEY".to_string(),
                        ));
                    }
                };
                Ok(AuthConfig::Jwt {
                    key,
                    issuer: self.get("JWT_ISSUER").map(str::to_string),
                    audience: self.get("JWT_AUDIENCE").map(str::to_string),
                    client_id,
                })
            }
            other => Err(RoastError::ConfigError(format!(
                "unknown AUTH_MODE {other:?}, expected \"static\" or \"jwt\""
            ))),
        }
    }
}

/// Accepts `*` or an absolute `scheme://host[:port]` origin.
fn validate_origin(origin: &str) -> Result<(), RoastError> {
    if origin == "*" {
        return Ok(());
    }
    let invalid = || RoastError::ConfigError(format!("invalid CORS_ALLOWED_ORIGINS entry {origin:?}"));
    let uri = origin.parse::<Uri>().map_err(|_| invalid())?;
    match (uri.scheme(), uri.host()) {
        (Some(_), Some(_))
            if !origin.ends_with('/') && uri.path_and_query().is_none_or(|p| p.as_str() == "/") =>
        {
            Ok(())
        }
        _ => Err(invalid()),
    }
}

impl ConfigLoader for EnvConfigLoader {
    fn load_config(&self) -> Result<Config, RoastError> {
        let phone_number = self.require("MY_PHONE_NUMBER")?;
        if !phone_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(RoastError::ConfigError(
                "MY_PHONE_NUMBER must be digits only, formatted as {country_code}{number}"
                    .to_string(),
            ));
        }

        let provider = ProviderConfig {
            api_url: self
                .get_or("TOGETHER_API_URL", consts::DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key: self.require("TOGETHER_API_KEY")?,
            model: self.get_or("ROAST_MODEL", consts::DEFAULT_MODEL),
        };

        Ok(Config {
            server: self.load_server()?,
            provider,
            auth: self.load_auth()?,
            phone_number,
        })
    }
}

pub fn load_config() -> Result<Config, RoastError> {
    let loader = EnvConfigLoader::from_env();
    loader.load_config()
}
