use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    exp: Option<i64>,
}

impl Session {
    pub fn new(token: impl Into<String>, username: Option<String>) -> Self {
        Self {
            token: token.into(),
            username,
            saved_at: Utc::now(),
        }
    }

    /// Expiry read from the token's `exp` claim. The signature is not checked:
    /// the server remains the authority, this only avoids sending a dead token.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<TokenClaims>(&self.token, &DecodingKey::from_secret(&[]), &validation)
            .ok()?;
        DateTime::from_timestamp(data.claims.exp?, 0)
    }

    /// Opaque (non-JWT) tokens never count as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}

/// JSON file holding the bearer token between CLI invocations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> ClientResult<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw).map(Some).map_err(|e| {
            ClientError::Session(format!(
                "corrupt session file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    pub fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        log::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("Session file {} removed", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
