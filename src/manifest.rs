//! Component manifest loading
//!
//! The manifest is an ordered list of the libraries bundled into a ROCm
//! release, plus the lookup tables that translate remote shorthands to
//! GitHub organizations and group/category keys to display labels.
//!
//! The manifest is consumed read-only; resolution and bundling never
//! mutate it.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AutotagError, Result};

/// One library participating in the bundled release, in manifest order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// Repository name, e.g. "rocBLAS"
    pub name: String,

    /// Remote shorthand resolved through the `remotes` table; the default
    /// organization is used when absent
    #[serde(default)]
    pub remote: Option<String>,

    /// Group key, rendered through the `groups` table
    #[serde(default)]
    pub group: String,

    /// Category key, rendered through the `categories` table
    #[serde(default)]
    pub category: String,
}

/// The component manifest for a ROCm release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Fallback organization for components without a mapped remote
    pub default_remote: String,

    /// The umbrella product repository, e.g. "ROCm/ROCm"
    pub product_repo: String,

    /// Remote shorthand to organization name
    #[serde(default)]
    pub remotes: HashMap<String, String>,

    /// Group key to display label
    #[serde(default)]
    pub groups: HashMap<String, String>,

    /// Category key to display label
    #[serde(default)]
    pub categories: HashMap<String, String>,

    /// Ordered component list; bundle order follows this order
    pub components: Vec<ComponentDescriptor>,
}

impl Manifest {
    /// Load and validate a manifest from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AutotagError::ManifestNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| AutotagError::ManifestParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let manifest: Manifest =
            serde_yaml::from_str(&content).map_err(|e| AutotagError::ManifestParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        manifest.validate()?;
        Ok(manifest)
    }

    /// Check referential integrity between components and the lookup tables
    fn validate(&self) -> Result<()> {
        if self.components.is_empty() {
            return Err(AutotagError::ManifestInvalid {
                message: "no components listed".to_string(),
            });
        }
        if !self.product_repo.contains('/') {
            return Err(AutotagError::ManifestInvalid {
                message: format!(
                    "product_repo '{}' must be qualified as owner/name",
                    self.product_repo
                ),
            });
        }

        for component in &self.components {
            if !component.group.is_empty() && !self.groups.contains_key(&component.group) {
                return Err(AutotagError::ManifestInvalid {
                    message: format!(
                        "component '{}' references unknown group key '{}'",
                        component.name, component.group
                    ),
                });
            }
            if !component.category.is_empty() && !self.categories.contains_key(&component.category)
            {
                return Err(AutotagError::ManifestInvalid {
                    message: format!(
                        "component '{}' references unknown category key '{}'",
                        component.name, component.category
                    ),
                });
            }
            if let Some(remote) = &component.remote {
                if !self.remotes.contains_key(remote) {
                    return Err(AutotagError::ManifestInvalid {
                        message: format!(
                            "component '{}' references unknown remote shorthand '{}'",
                            component.name, remote
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    /// Display label for a group key; unmapped keys render as themselves
    pub fn group_label(&self, key: &str) -> String {
        self.groups.get(key).cloned().unwrap_or_else(|| key.to_string())
    }

    /// Display label for a category key; unmapped keys render as themselves
    pub fn category_label(&self, key: &str) -> String {
        self.categories
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_manifest(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const VALID: &str = r#"
default_remote: ROCm
product_repo: ROCm/ROCm
remotes:
  mathlibs: ROCm
groups:
  lib: Libraries
categories:
  math: Math
components:
  - name: rocBLAS
    remote: mathlibs
    group: lib
    category: math
  - name: rocFFT
    group: lib
    category: math
"#;

    #[test]
    fn test_load_valid_manifest() {
        let file = write_manifest(VALID);
        let manifest = Manifest::load(file.path()).unwrap();
        assert_eq!(manifest.components.len(), 2);
        assert_eq!(manifest.components[0].name, "rocBLAS");
        assert_eq!(manifest.components[0].remote.as_deref(), Some("mathlibs"));
        assert_eq!(manifest.components[1].remote, None);
        assert_eq!(manifest.group_label("lib"), "Libraries");
        assert_eq!(manifest.category_label("math"), "Math");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Manifest::load(Path::new("/nonexistent/manifest.yaml"));
        assert!(matches!(result, Err(AutotagError::ManifestNotFound { .. })));
    }

    #[test]
    fn test_unknown_group_key_rejected() {
        let file = write_manifest(
            r#"
default_remote: ROCm
product_repo: ROCm/ROCm
components:
  - name: rocBLAS
    group: nonexistent
"#,
        );
        let result = Manifest::load(file.path());
        assert!(matches!(result, Err(AutotagError::ManifestInvalid { .. })));
    }

    #[test]
    fn test_unknown_remote_rejected() {
        let file = write_manifest(
            r#"
default_remote: ROCm
product_repo: ROCm/ROCm
components:
  - name: rocBLAS
    remote: nowhere
"#,
        );
        let result = Manifest::load(file.path());
        assert!(matches!(result, Err(AutotagError::ManifestInvalid { .. })));
    }

    #[test]
    fn test_unqualified_product_repo_rejected() {
        let file = write_manifest(
            r#"
default_remote: ROCm
product_repo: ROCm
components:
  - name: rocBLAS
"#,
        );
        let result = Manifest::load(file.path());
        assert!(matches!(result, Err(AutotagError::ManifestInvalid { .. })));
    }

    #[test]
    fn test_empty_components_rejected() {
        let file = write_manifest(
            r#"
default_remote: ROCm
product_repo: ROCm/ROCm
components: []
"#,
        );
        let result = Manifest::load(file.path());
        assert!(matches!(result, Err(AutotagError::ManifestInvalid { .. })));
    }

    #[test]
    fn test_unmapped_label_renders_key() {
        let file = write_manifest(VALID);
        let manifest = Manifest::load(file.path()).unwrap();
        assert_eq!(manifest.group_label("other"), "other");
    }
}
