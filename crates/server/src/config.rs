use anyhow::Context;
use promoscan_ocr::UploadPolicy;
use promoscan_parse::ParserConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_ENV: &str = "PROMOSCAN_CONFIG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    /// Bunyan-style JSON lines.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Tesseract language code(s), e.g. `spa` or `spa+eng`.
    pub language: String,
    /// Directory holding `*.traineddata`; `None` uses the system default.
    pub data_path: Option<String>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self { language: "spa".to_string(), data_path: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub upload: UploadPolicy,
    pub ocr: OcrSettings,
    pub parser: ParserConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_format: LogFormat::default(),
            upload: UploadPolicy::default(),
            ocr: OcrSettings::default(),
            parser: ParserConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults, then the TOML file named by `PROMOSCAN_CONFIG`, then
    /// environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(toml_content: &str) -> anyhow::Result<Self> {
        let config: ServerConfig = toml::from_str(toml_content)?;
        config.parser.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(host) = lookup("PROMOSCAN_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PROMOSCAN_PORT").or_else(|| lookup("PORT")) {
            self.port = port
                .parse()
                .with_context(|| format!("Invalid port: '{port}'"))?;
        }
        if let Some(language) = lookup("PROMOSCAN_OCR_LANG") {
            self.ocr.language = language;
        }
        if let Some(data_path) = lookup("PROMOSCAN_TESSDATA") {
            self.ocr.data_path = Some(data_path);
        }
        Ok(())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.ocr.language, "spa");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.upload.max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn from_toml_nested_sections() {
        let config = ServerConfig::from_toml(
            r#"
            port = 8080
            log_format = "json"

            [upload]
            max_bytes = 1048576

            [ocr]
            language = "spa+eng"
            data_path = "/usr/share/tessdata"

            [parser]
            card_keywords = ["VISA", "PRESTO"]
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.upload.max_bytes, 1_048_576);
        assert_eq!(config.upload.allowed_types, UploadPolicy::default().allowed_types);
        assert_eq!(config.ocr.data_path.as_deref(), Some("/usr/share/tessdata"));
        assert_eq!(config.parser.card_keywords, vec!["VISA", "PRESTO"]);
        assert_eq!(config.parser.day_names[0], "LUNES");
    }

    #[test]
    fn example_config_matches_defaults() {
        let config = ServerConfig::from_toml(include_str!("../../../promoscan.example.toml")).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn from_toml_rejects_invalid_parser_vocabulary() {
        assert!(ServerConfig::from_toml("[parser]\nbank_keywords = [\"\"]").is_err());
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("promoscan.toml");
        std::fs::write(&path, "host = \"127.0.0.1\"\nport = 9000\n").unwrap();
        let config = ServerConfig::from_file(&path).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:9000");
    }

    #[test]
    fn from_file_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ServerConfig::from_file(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn env_overrides() {
        let mut config = ServerConfig::default();
        config
            .apply_env(env(&[
                ("PORT", "4000"),
                ("PROMOSCAN_HOST", "127.0.0.1"),
                ("PROMOSCAN_OCR_LANG", "eng"),
                ("PROMOSCAN_TESSDATA", "/opt/tessdata"),
            ]))
            .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:4000");
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.data_path.as_deref(), Some("/opt/tessdata"));
    }

    #[test]
    fn promoscan_port_beats_port() {
        let mut config = ServerConfig::default();
        config
            .apply_env(env(&[("PORT", "4000"), ("PROMOSCAN_PORT", "5000")]))
            .unwrap();
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn env_rejects_bad_port() {
        let mut config = ServerConfig::default();
        assert!(config.apply_env(env(&[("PORT", "http")])).is_err());
    }
}
