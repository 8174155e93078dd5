use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// User theme overrides. Color families are nested shade tables; a family
/// with a single `DEFAULT` entry acts as a plain named color.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct ThemeConfig {
    #[serde(default)]
    pub colors: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    pub spacing: BTreeMap<String, String>,
    #[serde(default)]
    pub opacity: BTreeMap<String, String>,
    #[serde(default)]
    pub screens: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub message: String,
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|err| ConfigError {
        message: format!("failed to read config {}: {}", path.display(), err),
    })?;
    toml::from_str(&text).map_err(|err| ConfigError {
        message: format!("failed to parse config {}: {}", path.display(), err),
    })
}

#[cfg(test)]
mod tests {
    use super::{load, Config};
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn defaults_when_empty() {
        let path = temp_path("ironparse_config_default");
        let _ = fs::write(&path, "");
        let config = load(&path).expect("config should parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn loads_theme_colors() {
        let path = temp_path("ironparse_config_colors");
        let _ = fs::write(
            &path,
            r##"
[theme.colors.brand]
500 = "#3b82f6"
900 = "#1e3a8a"

[theme.screens]
md = "768px"
"##,
        );
        let config = load(&path).expect("config should parse");
        assert_eq!(config.theme.colors["brand"]["500"], "#3b82f6");
        assert_eq!(config.theme.colors["brand"]["900"], "#1e3a8a");
        assert_eq!(config.theme.screens["md"], "768px");
    }

    #[test]
    fn reports_missing_file() {
        let err = load(std::path::Path::new("/nonexistent/ironparse.toml"))
            .expect_err("missing file should error");
        assert!(err.message.contains("failed to read config"));
    }

    fn temp_path(prefix: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("{}_{}.toml", prefix, nanos))
    }
}
