//! YAML configuration loading for the prediction service.
//!
//! Loads [`ServeConfig`] from a YAML file on disk, falling back to defaults
//! when no file is specified.

use spamsift_core::ServeConfig;
use std::path::Path;

/// Load a [`ServeConfig`] from a YAML file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the YAML is invalid.
pub fn load_config(path: &Path) -> anyhow::Result<ServeConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e))?;
    let config: ServeConfig = serde_yaml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config YAML: {}", e))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to write YAML to a temp file and return the path.
    fn write_yaml(yaml: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_load_config_full() {
        let yaml = r#"
listen_addr: "0.0.0.0:9090"
vectorizer_path: "/var/lib/spamsift/vectorizer.json"
classifier_path: "/var/lib/spamsift/classifier.json"
logging:
  level: "debug"
  format: "json"
"#;
        let f = write_yaml(yaml);
        let config = load_config(f.path()).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:9090");
        assert_eq!(config.vectorizer_path, "/var/lib/spamsift/vectorizer.json");
        assert_eq!(config.classifier_path, "/var/lib/spamsift/classifier.json");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_config_partial_uses_defaults() {
        let f = write_yaml("listen_addr: \"127.0.0.1:3000\"\n");
        let config = load_config(f.path()).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.vectorizer_path, "models/vectorizer.json");
        assert_eq!(config.classifier_path, "models/classifier.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Path::new("/nonexistent/config.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let f = write_yaml("not: [valid: yaml: {{{}}}");
        let result = load_config(f.path());
        assert!(result.is_err());
    }
}
