//! Asset loading with embedded fallbacks
//!
//! The configuration file and the upload page are compiled into the binary.
//! A `config.yaml` on disk is used instead of the embedded one only when the
//! `CONFIG_FILE` env var points at an existing file.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Embedded web pages
#[derive(RustEmbed)]
#[folder = "static/"]
#[include = "*.html"]
struct EmbeddedStatic;

const CONFIG_NAME: &str = "config.yaml";
const UPLOAD_PAGE: &str = "upload.html";

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override for the config file
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `config_file` should be `Some` only if the env var was set.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Loader configured from the process environment.
    pub fn from_env() -> Self {
        Self::new(std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
    }

    pub fn config_file(&self) -> Option<&PathBuf> {
        self.config_file.as_ref()
    }

    /// Read config, trying the external file first, then the embedded default
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::debug!(path = %path.display(), "Config file missing, using embedded default");
        }

        EmbeddedConfig::get(CONFIG_NAME)
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// The HTML upload form served at `/`.
    pub fn upload_page() -> io::Result<String> {
        let file = EmbeddedStatic::get(UPLOAD_PAGE).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Embedded upload.html not found")
        })?;
        String::from_utf8(file.data.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Extract the embedded config to the configured path (or `./config.yaml`)
    pub fn init_config(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();
        let path = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("./config.yaml"));

        if !force && path.exists() {
            report.skipped.push(path.display().to_string());
            return Ok(report);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if let Some(data) = EmbeddedConfig::get(CONFIG_NAME) {
            fs::write(&path, &*data.data)?;
            tracing::info!(path = %path.display(), "Wrote default config");
            report.written.push(path.display().to_string());
        }

        Ok(report)
    }
}
