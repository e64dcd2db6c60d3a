//! Generator configuration: which specs to process, for which language,
//! into which output directory.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::typemap::TypeMap;

/// Target language for generated template data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Swift,
    Kotlin,
    Js,
}

impl Language {
    pub fn type_map(&self) -> TypeMap {
        match self {
            Language::Swift => TypeMap::swift(),
            Language::Kotlin => TypeMap::kotlin(),
            Language::Js => TypeMap::javascript(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Js => "js",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swift" => Ok(Language::Swift),
            "kotlin" => Ok(Language::Kotlin),
            "js" | "javascript" => Ok(Language::Js),
            other => Err(format!(
                "unknown language {other:?}, expected swift, kotlin, or js"
            )),
        }
    }
}

/// One API to generate: where its spec lives and how to name the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub spec: PathBuf,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub base_path: Option<String>,
}

/// The full generator configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratorConfig {
    pub language: Language,
    #[serde(default = "default_output")]
    pub output: String,
    pub specs: IndexMap<String, ApiConfig>,
}

fn default_output() -> String {
    "client".to_string()
}

/// Load and validate a config file. JSON or YAML is picked by extension;
/// anything that isn't `.json` parses as YAML. Relative spec paths are
/// resolved against the config file's directory.
pub fn load_config(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let mut config: GeneratorConfig = if is_json {
        serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
    } else {
        serde_yaml_ng::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
    };

    if config.specs.is_empty() {
        return Err(ConfigError::NoSpecs);
    }

    if let Some(dir) = path.parent() {
        for api in config.specs.values_mut() {
            if api.spec.is_relative() {
                api.spec = dir.join(&api.spec);
            }
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_json_config_and_resolves_spec_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swagen.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "language": "kotlin",
                "specs": {{
                    "pets": {{ "spec": "specs/pets.json", "basePath": "/v1" }}
                }}
            }}"#
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.language, Language::Kotlin);
        assert_eq!(config.output, "client");
        let pets = &config.specs["pets"];
        assert_eq!(pets.spec, dir.path().join("specs/pets.json"));
        assert_eq!(pets.base_path.as_deref(), Some("/v1"));
    }

    #[test]
    fn empty_specs_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swagen.yaml");
        std::fs::write(&path, "language: swift\nspecs: {}\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::NoSpecs)));
    }

    #[test]
    fn language_parses_from_str() {
        assert_eq!("swift".parse::<Language>().unwrap(), Language::Swift);
        assert_eq!("javascript".parse::<Language>().unwrap(), Language::Js);
        assert!("rust".parse::<Language>().is_err());
    }
}
