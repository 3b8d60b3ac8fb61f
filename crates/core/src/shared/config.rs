use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::{
    CLOUDINARY_API_KEY_VAR, CLOUDINARY_API_SECRET_VAR, CLOUDINARY_CLOUD_NAME_VAR,
    IMGUR_CLIENT_ID_VAR,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not found in environment variables")]
    MissingVariable(&'static str),
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Cloudinary account credentials. Any field may be absent; uploads made
/// with incomplete credentials fail individually.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CloudinaryCredentials {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl CloudinaryCredentials {
    /// Names of the environment variables that were not provided.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.cloud_name.is_none() {
            missing.push(CLOUDINARY_CLOUD_NAME_VAR);
        }
        if self.api_key.is_none() {
            missing.push(CLOUDINARY_API_KEY_VAR);
        }
        if self.api_secret.is_none() {
            missing.push(CLOUDINARY_API_SECRET_VAR);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

/// Credentials for every supported image host, read once at startup and
/// handed to the uploaders explicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostingConfig {
    pub cloudinary: CloudinaryCredentials,
    pub imgur_client_id: Option<String>,
}

impl HostingConfig {
    /// Reads credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads credentials through `lookup`. Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            cloudinary: CloudinaryCredentials {
                cloud_name: get(CLOUDINARY_CLOUD_NAME_VAR),
                api_key: get(CLOUDINARY_API_KEY_VAR),
                api_secret: get(CLOUDINARY_API_SECRET_VAR),
            },
            imgur_client_id: get(IMGUR_CLIENT_ID_VAR),
        }
    }

    pub fn require_imgur_client_id(&self) -> Result<&str, ConfigError> {
        self.imgur_client_id
            .as_deref()
            .ok_or(ConfigError::MissingVariable(IMGUR_CLIENT_ID_VAR))
    }
}

/// Loads `KEY=value` pairs from an env file into the process environment.
///
/// Variables already set in the environment win. A missing file is not an
/// error; returns whether a file was loaded.
pub fn load_env_file(path: &Path) -> Result<bool, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(source) => Err(ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}
