//! Application configuration.

use serde::{Deserialize, Serialize};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default stage (editing canvas) dimensions.
    pub stage: StageDefaults,

    /// Export settings.
    pub export: ExportDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default stage dimensions in CSS pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDefaults {
    /// Stage width.
    pub width: u32,

    /// Stage height.
    pub height: u32,
}

/// Export parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDefaults {
    /// Supersampling factor applied to stage dimensions.
    pub supersample: u32,

    /// Filename offered for the exported PNG.
    pub filename: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "collage=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for StageDefaults {
    fn default() -> Self {
        Self {
            width: 960,
            height: 520,
        }
    }
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            supersample: 2,
            filename: "composition.png".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stage_contract() {
        let config = AppConfig::default();
        assert_eq!(config.stage.height, 520);
        assert_eq!(config.export.supersample, 2);
        assert_eq!(config.export.filename, "composition.png");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.stage.width, config.stage.width);
        assert_eq!(parsed.logging.level, "info");
    }
}
