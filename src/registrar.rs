//! Registers the generated declaration file in `compilerOptions.types` of
//! the project's tsconfig.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{GenerateError, Result};

/// Ensure `compilerOptions.types` references `declaration_file_name`.
///
/// Any existing entry containing the file name counts as registered. The
/// config is rewritten only when something changed. Returns whether it was.
pub fn register_declaration_file(
    config_path: &Path,
    declaration_file_name: &str,
) -> Result<bool> {
    if !config_path.exists() {
        return Err(GenerateError::ProjectConfigMissing {
            path: config_path.to_path_buf(),
        });
    }

    let raw = fs::read_to_string(config_path).map_err(|e| GenerateError::io(config_path, e))?;
    let mut config: Value =
        serde_json::from_str(&raw).map_err(|e| invalid(config_path, e.to_string()))?;

    let changed = ensure_type_entry(&mut config, declaration_file_name)
        .map_err(|reason| invalid(config_path, reason))?;

    if !changed {
        debug!(
            "{} already registered in {}",
            declaration_file_name,
            config_path.display()
        );
        return Ok(false);
    }

    let mut output = serde_json::to_string_pretty(&config)?;
    output.push('\n');
    fs::write(config_path, output).map_err(|e| GenerateError::io(config_path, e))?;

    info!("registered {} in {}", declaration_file_name, config_path.display());
    Ok(true)
}

fn ensure_type_entry(
    config: &mut Value,
    declaration_file_name: &str,
) -> std::result::Result<bool, String> {
    let root = config
        .as_object_mut()
        .ok_or_else(|| "top level is not an object".to_string())?;

    let mut changed = false;
    if !root.contains_key("compilerOptions") {
        root.insert("compilerOptions".to_string(), Value::Object(Map::new()));
        changed = true;
    }
    let compiler_options = root
        .get_mut("compilerOptions")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| "`compilerOptions` is not an object".to_string())?;

    if !compiler_options.contains_key("types") {
        compiler_options.insert("types".to_string(), Value::Array(Vec::new()));
        changed = true;
    }
    let types = compiler_options
        .get_mut("types")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| "`compilerOptions.types` is not an array".to_string())?;

    let registered = types
        .iter()
        .filter_map(Value::as_str)
        .any(|entry| entry.contains(declaration_file_name));
    if !registered {
        types.push(Value::String(format!("./{}", declaration_file_name)));
        changed = true;
    }

    Ok(changed)
}

fn invalid(path: &Path, reason: String) -> GenerateError {
    GenerateError::ProjectConfigInvalid {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FILE: &str = "web-components.d.ts";

    #[test]
    fn test_creates_types_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tsconfig.json");
        fs::write(&path, r#"{"compilerOptions":{"strict":true},"include":["src"]}"#).unwrap();

        assert!(register_declaration_file(&path, FILE).unwrap());

        let written = fs::read_to_string(&path).unwrap();
        let expected = r#"{
  "compilerOptions": {
    "strict": true,
    "types": [
      "./web-components.d.ts"
    ]
  },
  "include": [
    "src"
  ]
}
"#;
        assert_eq!(written, expected);
    }

    #[test]
    fn test_second_run_does_not_duplicate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tsconfig.json");
        fs::write(&path, "{}").unwrap();

        assert!(register_declaration_file(&path, FILE).unwrap());
        let first = fs::read_to_string(&path).unwrap();
        assert!(!register_declaration_file(&path, FILE).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
        assert_eq!(first.matches(FILE).count(), 1);
    }

    #[test]
    fn test_existing_entry_matches_by_containment() {
        let raw = r#"{"compilerOptions":{"types":["node","../app/web-components.d.ts"]}}"#;
        let mut config: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(ensure_type_entry(&mut config, FILE), Ok(false));
        assert_eq!(config["compilerOptions"]["types"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = register_declaration_file(&dir.path().join("tsconfig.json"), FILE).unwrap_err();
        assert!(matches!(err, GenerateError::ProjectConfigMissing { .. }));
    }

    #[test]
    fn test_wrong_shape_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tsconfig.json");
        fs::write(&path, r#"{"compilerOptions":{"types":"node"}}"#).unwrap();

        let err = register_declaration_file(&path, FILE).unwrap_err();
        assert!(matches!(err, GenerateError::ProjectConfigInvalid { .. }));
    }
}
