//! Bearer credential verification in front of the tool endpoint.

use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::http::header::{self, HeaderMap};
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::config::{AuthConfig, JwtKey};
use crate::errors::RoastError;

const AUTH_REQUIRED: &str = "Authentication required";
const INVALID_TOKEN: &str = "Invalid or expired token";

/// A credential that passed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub client_id: String,
    pub scopes: Vec<String>,
    pub expires_at: Option<i64>,
}

pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AccessToken, RoastError>;
}

pub struct StaticTokenVerifier {
    token: String,
    client_id: String,
}

impl StaticTokenVerifier {
    pub fn new(token: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client_id: client_id.into(),
        }
    }
}

impl TokenVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> Result<AccessToken, RoastError> {
        if self.token.is_empty() || token != self.token {
            return Err(RoastError::Unauthorized(INVALID_TOKEN.to_string()));
        }
        Ok(AccessToken {
            token: token.to_string(),
            client_id: self.client_id.clone(),
            scopes: vec!["*".to_string()],
            expires_at: None,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    scp: Option<Vec<String>>,
    #[serde(default)]
    exp: Option<i64>,
}

pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
    default_client_id: String,
}

impl JwtVerifier {
    pub fn new(
        key: &JwtKey,
        issuer: Option<&str>,
        audience: Option<&str>,
        default_client_id: impl Into<String>,
    ) -> Result<Self, RoastError> {
        let (key, algorithm) = match key {
            JwtKey::Secret(secret) => (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
            JwtKey::RsaPublicPem(pem) => (
                DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
                    RoastError::ConfigError(format!("invalid JWT_PUBLIC_KEY: {e}"))
                })?,
                Algorithm::RS256,
            ),
        };

        // A configured issuer or audience must also be present in the token.
        let mut required = vec!["exp"];
        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
            required.push("iss");
        }
        match audience {
            Some(audience) => {
                validation.set_audience(&[audience]);
                required.push("aud");
            }
            None => validation.validate_aud = false,
        }
        validation.set_required_spec_claims(&required);

        Ok(Self {
            key,
            validation,
            default_client_id: default_client_id.into(),
        })
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<AccessToken, RoastError> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)?.claims;

        let scopes = match (claims.scope, claims.scp) {
            (Some(scope), _) => scope.split_whitespace().map(str::to_string).collect(),
            (None, Some(scp)) => scp,
            (None, None) => Vec::new(),
        };

        Ok(AccessToken {
            token: token.to_string(),
            client_id: claims
                .client_id
                .or(claims.sub)
                .unwrap_or_else(|| self.default_client_id.clone()),
            scopes,
            expires_at: claims.exp,
        })
    }
}

pub fn verifier_from_config(auth: &AuthConfig) -> Result<Arc<dyn TokenVerifier>, RoastError> {
    match auth {
        AuthConfig::Static { token, client_id } => {
            Ok(Arc::new(StaticTokenVerifier::new(token.as_str(), client_id.as_str())))
        }
        AuthConfig::Jwt {
            key,
            issuer,
            audience,
            client_id,
        } => Ok(Arc::new(JwtVerifier::new(
            key,
            issuer.as_deref(),
            audience.as_deref(),
            client_id.as_str(),
        )?)),
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, RoastError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| RoastError::Unauthorized(AUTH_REQUIRED.to_string()))?
        .to_str()
        .map_err(|_| RoastError::Unauthorized(AUTH_REQUIRED.to_string()))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(RoastError::Unauthorized(AUTH_REQUIRED.to_string())),
    }
}

fn authenticate(req: &HttpRequest) -> Result<AccessToken, RoastError> {
    let verifier = req
        .app_data::<Data<dyn TokenVerifier>>()
        .ok_or_else(|| RoastError::ConfigError("token verifier is not registered".to_string()))?;
    let token = bearer_token(req.headers())?;

    verifier.verify(token).map_err(|e| {
        log::warn!("rejected credential from {:?}: {}", req.peer_addr(), e);
        RoastError::Unauthorized(INVALID_TOKEN.to_string())
    })
}

/// Extractor that only resolves for requests carrying a verified bearer token.
pub struct Authenticated(pub AccessToken);

impl FromRequest for Authenticated {
    type Error = RoastError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(Authenticated))
    }
}
