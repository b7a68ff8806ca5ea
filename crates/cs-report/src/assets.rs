//! Static report assets: the HTML skeleton, its stylesheet and its script.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{ReportError, Result};

pub const SKELETON: &str = "ReportTemplate.html";
pub const STYLES: &str = "styles.css";
pub const SCRIPTS: &str = "scripts.js";

/// Where report assets come from.
pub trait AssetSource: Send + Sync + std::fmt::Debug {
    /// Load one asset by name. A missing asset is [`ReportError::AssetMissing`].
    fn load(&self, name: &str) -> Result<String>;
}

/// The three loaded assets.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    pub skeleton: String,
    pub styles: String,
    pub scripts: String,
}

impl AssetBundle {
    /// Load every required asset; the first missing one aborts.
    pub fn load(source: &dyn AssetSource) -> Result<Self> {
        Ok(Self {
            skeleton: source.load(SKELETON)?,
            styles: source.load(STYLES)?,
            scripts: source.load(SCRIPTS)?,
        })
    }
}

/// Assets compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl AssetSource for EmbeddedAssets {
    fn load(&self, name: &str) -> Result<String> {
        let body = match name {
            SKELETON => include_str!("../assets/ReportTemplate.html"),
            STYLES => include_str!("../assets/styles.css"),
            SCRIPTS => include_str!("../assets/scripts.js"),
            _ => {
                return Err(ReportError::AssetMissing {
                    name: name.to_string(),
                })
            }
        };
        Ok(body.to_string())
    }
}

/// Assets read from a directory at generation time.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirAssets {
    fn load(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ReportError::AssetMissing {
                name: name.to_string(),
            },
            _ => ReportError::AssetRead {
                name: name.to_string(),
                source,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_assets_present() {
        for name in [SKELETON, STYLES, SCRIPTS] {
            let body = EmbeddedAssets.load(name).unwrap();
            assert!(!body.is_empty(), "{name} is empty");
        }
        let skeleton = EmbeddedAssets.load(SKELETON).unwrap();
        assert!(skeleton.contains("$styleGoesHere"));
        assert!(skeleton.contains("$scriptGoesHere"));
    }

    #[test]
    fn test_embedded_unknown_asset() {
        assert!(matches!(
            EmbeddedAssets.load("logo.png"),
            Err(ReportError::AssetMissing { .. })
        ));
    }

    #[test]
    fn test_dir_assets_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SKELETON), "<html></html>").unwrap();
        let source = DirAssets::new(dir.path());

        assert_eq!(source.load(SKELETON).unwrap(), "<html></html>");
        let err = AssetBundle::load(&source).unwrap_err();
        assert!(matches!(err, ReportError::AssetMissing { name } if name == STYLES));
    }
}
