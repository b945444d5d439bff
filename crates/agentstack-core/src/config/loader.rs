//! agentstack.json loading and persistence

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::debug;

/// Name of the project configuration file at the project root
pub const CONFIG_FILENAME: &str = "agentstack.json";

/// Project configuration stored in `agentstack.json`
///
/// Keys this type does not know about are kept in `extra` so a load/save
/// cycle never drops user data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(skip)]
    path: Utf8PathBuf,

    /// Agent framework the project is generated for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,

    /// Tools added to the project
    #[serde(default)]
    pub tools: Vec<String>,

    /// Default model in `provider/model` form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    /// CLI version that created the project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agentstack_version: Option<String>,

    /// Template the project was initialized from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Version of that template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_version: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ConfigFile {
    /// Create an empty, unsaved configuration for the given project root
    pub fn new(project_root: &Utf8Path) -> Self {
        Self {
            path: project_root.join(CONFIG_FILENAME),
            ..Default::default()
        }
    }

    /// Check whether the project root contains a configuration file
    pub fn exists(project_root: &Utf8Path) -> bool {
        project_root.join(CONFIG_FILENAME).is_file()
    }

    /// Load the configuration from `project_root/agentstack.json`
    pub fn load(project_root: &Utf8Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILENAME);
        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::not_a_project(project_root.as_str())
            } else {
                Error::Io(e)
            }
        })?;

        let mut config: ConfigFile = serde_json::from_str(&content)?;
        config.path = path;
        Ok(config)
    }

    /// Write the configuration back to disk
    pub fn save(&self) -> Result<()> {
        if self.path.as_str().is_empty() {
            return Err(Error::invalid_config("configuration has no file path"));
        }

        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        fs::write(&self.path, content)?;
        debug!("Wrote project config to {}", self.path);
        Ok(())
    }

    /// Load, modify and save the configuration in one step
    pub fn update<F>(project_root: &Utf8Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut ConfigFile),
    {
        let mut config = Self::load(project_root)?;
        f(&mut config);
        config.save()?;
        Ok(config)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Fail unless `project_root` is an AgentStack project
pub fn assert_project(project_root: &Utf8Path) -> Result<()> {
    if ConfigFile::exists(project_root) {
        Ok(())
    } else {
        Err(Error::not_a_project(project_root.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    #[test]
    fn test_load_missing_file_is_not_a_project() {
        let (_dir, root) = temp_root();
        let err = ConfigFile::load(&root).unwrap_err();
        assert!(matches!(err, Error::NotAProject { .. }));
        assert!(assert_project(&root).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let (_dir, root) = temp_root();
        let mut config = ConfigFile::new(&root);
        config.framework = Some("crewai".to_string());
        config.default_model = Some("openai/gpt-4o".to_string());
        config.save().unwrap();

        assert!(ConfigFile::exists(&root));
        assert!(assert_project(&root).is_ok());

        let loaded = ConfigFile::load(&root).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let (_dir, root) = temp_root();
        fs::write(
            root.join(CONFIG_FILENAME),
            r#"{"framework": "langgraph", "hosting": "local", "tools": ["ftp"]}"#,
        )
        .unwrap();

        ConfigFile::update(&root, |c| c.default_model = Some("anthropic/claude".into())).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(root.join(CONFIG_FILENAME)).unwrap())
                .unwrap();
        assert_eq!(raw["hosting"], "local");
        assert_eq!(raw["framework"], "langgraph");
        assert_eq!(raw["default_model"], "anthropic/claude");
        assert_eq!(raw["tools"][0], "ftp");
    }

    #[test]
    fn test_invalid_json() {
        let (_dir, root) = temp_root();
        fs::write(root.join(CONFIG_FILENAME), "{not json").unwrap();
        assert!(matches!(
            ConfigFile::load(&root).unwrap_err(),
            Error::JsonParse(_)
        ));
    }
}
