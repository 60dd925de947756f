use crate::core::candidate::Candidate;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const BUILTIN_CONFIG: &str = include_str!("../demos/palette.yaml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteConfig {
    #[serde(default)]
    pub max_results: Option<usize>,
    #[serde(default = "default_show_keys")]
    pub show_keys: bool,
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandEntry {
    pub name: String,
    pub action: String,
    /// Defaults to `action`; needed when two entries share an action.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub keys: Option<String>,
}

impl CommandEntry {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(self.action.as_str())
    }
}

fn default_show_keys() -> bool {
    true
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            max_results: None,
            show_keys: default_show_keys(),
            commands: Vec::new(),
        }
    }
}

impl PaletteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        info!(
            path = %path.display(),
            commands = config.commands.len(),
            "loaded palette config"
        );
        Ok(config)
    }

    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_CONFIG)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        debug!(commands = config.commands.len(), "parsed palette config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (index, entry) in self.commands.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(Error::InvalidCommand {
                    index,
                    reason: "name is empty".to_string(),
                });
            }
            if entry.action.trim().is_empty() {
                return Err(Error::InvalidCommand {
                    index,
                    reason: format!("`{}` has an empty action", entry.name),
                });
            }
            if !seen.insert(entry.id()) {
                return Err(Error::DuplicateId(entry.id().to_string()));
            }
        }
        Ok(())
    }

    /// Palette candidates in file order; the payload is the action name.
    pub fn candidates(&self) -> Vec<Candidate<String>> {
        self.commands
            .iter()
            .map(|entry| {
                let candidate = Candidate::new(entry.id(), entry.name.clone(), entry.action.clone());
                match entry.keys.as_deref() {
                    Some(keys) => candidate.with_keys(keys),
                    None => candidate,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_config_is_valid() {
        let config = PaletteConfig::builtin().expect("builtin config");
        assert!(config.show_keys);
        let labels: Vec<String> = config
            .candidates()
            .into_iter()
            .map(|candidate| candidate.label)
            .collect();
        assert!(labels.iter().any(|label| label == "[ | ] Split Vertical"));
        assert!(labels.iter().any(|label| label == "Open Settings"));
    }

    #[test]
    fn minimal_document_uses_defaults() {
        let config = PaletteConfig::from_yaml_str(
            "commands:\n  - name: New Tab\n    action: newTab\n",
        )
        .expect("config");
        assert_eq!(config.max_results, None);
        assert!(config.show_keys);
        let candidates = config.candidates();
        assert_eq!(candidates[0].id.as_str(), "newTab");
        assert_eq!(candidates[0].action, "newTab");
        assert_eq!(candidates[0].keys, None);
    }

    #[test]
    fn empty_document_has_no_commands() {
        let config = PaletteConfig::from_yaml_str("{}").expect("config");
        assert!(config.commands.is_empty());
    }

    #[test]
    fn empty_action_is_rejected() {
        let err = PaletteConfig::from_yaml_str(
            "commands:\n  - name: Broken\n    action: \"  \"\n",
        )
        .expect_err("should fail");
        assert!(matches!(err, Error::InvalidCommand { index: 0, .. }));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = PaletteConfig::from_yaml_str(
            "commands:\n  - name: A\n    action: openSettings\n  - name: B\n    action: openSettings\n",
        )
        .expect_err("should fail");
        assert!(matches!(err, Error::DuplicateId(ref id) if id == "openSettings"));
    }

    #[test]
    fn unknown_fields_are_parse_errors() {
        let err = PaletteConfig::from_yaml_str("colour: red\n").expect_err("should fail");
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "max_results: 3\nshow_keys: false\ncommands: []").expect("write");
        let config = PaletteConfig::load(file.path()).expect("load");
        assert_eq!(config.max_results, Some(3));
        assert!(!config.show_keys);

        let missing = file.path().with_extension("missing");
        let err = PaletteConfig::load(&missing).expect_err("missing file");
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
