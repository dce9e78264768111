// ============================================================================
// Configuration
// ============================================================================
// Ordre de priorité (le dernier gagne) :
// 1. Valeurs par défaut
// 2. Fichier JSON (~/.config/harmonia/config.json ou --config <path>)
// 3. Variables d'environnement HARMONIA_API_URL / HARMONIA_LOG_DIR
// 4. Arguments de ligne de commande (appliqués dans main.rs)
// ============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::DEFAULT_API_URL;

/// Variable d'environnement pour l'URL de l'API
pub const API_URL_ENV: &str = "HARMONIA_API_URL";

/// Variable d'environnement pour le répertoire des logs
pub const LOG_DIR_ENV: &str = "HARMONIA_LOG_DIR";

/// Configuration de l'application
///
/// CONCEPT RUST : #[serde(default)] au niveau de la struct
/// - Chaque champ absent du fichier prend la valeur de Config::default()
/// - Un fichier partiel (ex: seulement api_url) reste valide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL de l'API des rapports financiers
    pub api_url: String,

    /// Répertoire des fichiers de logs
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_dir: PathBuf::from("./logs"),
        }
    }
}

impl Config {
    /// Chemin du fichier de configuration par défaut
    ///
    /// - Linux : ~/.config/harmonia/config.json
    /// - macOS : ~/Library/Application Support/harmonia/config.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("harmonia").join("config.json"))
    }

    /// Charge la configuration complète (fichier puis environnement)
    ///
    /// Un fichier explicitement demandé doit exister ; le fichier par défaut
    /// est optionnel.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match explicit_path {
            Some(path) => Self::load_from_path(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_path(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Lit un fichier de configuration JSON
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| {
            format!("Impossible de lire le fichier de configuration : {}", path.display())
        })?;

        let config: Self = serde_json::from_str(&content).with_context(|| {
            format!("Fichier de configuration invalide : {}", path.display())
        })?;

        debug!(path = %path.display(), "Config file loaded");
        Ok(config)
    }

    /// Applique les surcharges d'environnement
    ///
    /// CONCEPT RUST : Closure en paramètre
    /// - `lookup` remplace std::env::var
    /// - Les tests passent une fausse source sans toucher au vrai environnement
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(dir) = lookup(LOG_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_dir = PathBuf::from(dir.trim());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.log_dir, PathBuf::from("./logs"));
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "api_url": "http://localhost:8080/reports" }}"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("./logs"));
        // L'URL du fichier peut être surchargée par HARMONIA_API_URL
        if std::env::var(API_URL_ENV).is_err() {
            assert_eq!(config.api_url, "http://localhost:8080/reports");
        }
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.json"))).is_err());
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "api_url = 'toml?'").unwrap();
        assert!(Config::load_from_path(file.path()).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            API_URL_ENV => Some(" http://example.test/api ".to_string()),
            LOG_DIR_ENV => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.api_url, "http://example.test/api");
        assert_eq!(config.log_dir, PathBuf::from("./logs"));
    }
}
