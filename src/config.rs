//! Session configuration: export reference frame and class palette.
//!
//! Both are fixed at initialization. The defaults are the 640x480 reference
//! frame and the ten built-in classes; a YAML file can replace either:
//!
//! ```yaml
//! frame:
//!   width: 1280
//!   height: 720
//! classes:
//!   - name: person
//!     color: "#FF6B6B"
//!   - name: forklift
//!     color: "#4ECDC4"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LabelpadError;
use crate::ir::{ClassList, FrameSize};

/// Immutable configuration shared by the box model, overlay and encoders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaygroundConfig {
    /// Frame COCO and Pascal exports are expressed in.
    #[serde(default)]
    pub frame: FrameSize,

    /// Ordered class list; class ids index into it.
    #[serde(default)]
    pub classes: ClassList,
}

impl PlaygroundConfig {
    /// Loads a config from a YAML file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, LabelpadError> {
        let raw = fs::read_to_string(path).map_err(LabelpadError::Io)?;
        let config: PlaygroundConfig =
            serde_yaml::from_str(&raw).map_err(|source| LabelpadError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.check()?;
        log::debug!(
            "loaded config from {}: frame {}, {} class(es)",
            path.display(),
            config.frame,
            config.classes.len()
        );
        Ok(config)
    }

    /// Rejects configurations the box model cannot work with.
    pub fn check(&self) -> Result<(), LabelpadError> {
        if !self.frame.is_usable() {
            return Err(LabelpadError::InvalidConfig(format!(
                "frame {} must have positive dimensions",
                self.frame
            )));
        }
        if self.classes.is_empty() {
            return Err(LabelpadError::InvalidConfig(
                "class list must not be empty".to_string(),
            ));
        }
        if let Some((_, entry)) = self.classes.iter().find(|(_, entry)| entry.name.trim().is_empty()) {
            return Err(LabelpadError::InvalidConfig(format!(
                "class with color {} has an empty name",
                entry.color
            )));
        }
        Ok(())
    }
}
