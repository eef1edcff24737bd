//! Shared fixtures for unit tests: local git repositories standing in for
//! remotes, GitHub API payload builders and manifest builders

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use git2::Repository;
use tempfile::{NamedTempFile, TempDir};

/// A local git repository used as a stand-in for a remote
pub struct FixtureRepo {
    pub temp: TempDir,
    pub path: PathBuf,
}

impl FixtureRepo {
    /// Create a repository with a single initial commit
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let repo = Repository::init(&path).expect("Failed to init repository");

        let sig = git2::Signature::now("Test", "test@test.com").expect("signature");
        let tree_id = {
            let mut index = repo.index().expect("index");
            index.write_tree().expect("tree")
        };
        let tree = repo.find_tree(tree_id).expect("tree lookup");
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .expect("initial commit");

        Self { temp, path }
    }

    /// Add an empty commit and return its sha
    pub fn commit(&self, message: &str) -> String {
        let repo = Repository::open(&self.path).expect("open repository");
        let sig = git2::Signature::now("Test", "test@test.com").expect("signature");
        let tree_id = {
            let mut index = repo.index().expect("index");
            index.write_tree().expect("tree")
        };
        let tree = repo.find_tree(tree_id).expect("tree lookup");
        let parent = repo
            .head()
            .expect("head")
            .peel_to_commit()
            .expect("head commit");
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
            .expect("commit")
            .to_string()
    }

    /// Create a lightweight tag pointing at a commit
    pub fn tag(&self, name: &str, sha: &str) {
        let repo = Repository::open(&self.path).expect("open repository");
        let oid = git2::Oid::from_str(sha).expect("oid");
        let object = repo.find_object(oid, None).expect("object");
        repo.tag_lightweight(name, &object, false).expect("tag");
    }

    /// Repository path as a URL usable with git ls-remote
    pub fn url(&self) -> String {
        self.path.display().to_string()
    }
}

/// GitHub API repository payload whose clone URL points at a local fixture
pub fn repo_body(full_name: &str, clone_url: &str) -> String {
    let (owner, name) = full_name.split_once('/').expect("qualified name");
    format!(
        r#"{{"name": "{name}", "full_name": "{full_name}", "clone_url": "{clone_url}", "html_url": "https://github.com/{full_name}", "owner": {{"login": "{owner}"}}}}"#
    )
}

/// Write a manifest listing the given (name, group, category) components
/// under the ROCm org, with G*/C* label tables
pub fn write_manifest(product_repo: &str, components: &[(&str, &str, &str)]) -> NamedTempFile {
    let mut content = String::new();
    content.push_str("default_remote: ROCm\n");
    content.push_str(&format!("product_repo: {product_repo}\n"));
    content.push_str("groups:\n");
    for key in ["G1", "G2", "G3"] {
        content.push_str(&format!("  {key}: Group {key}\n"));
    }
    content.push_str("categories:\n");
    for key in ["C1", "C2", "C3"] {
        content.push_str(&format!("  {key}: Category {key}\n"));
    }
    content.push_str("components:\n");
    for (name, group, category) in components {
        content.push_str(&format!(
            "  - {{ name: {name}, group: {group}, category: {category} }}\n"
        ));
    }

    let mut file = NamedTempFile::new().expect("manifest file");
    file.write_all(content.as_bytes()).expect("write manifest");
    file
}
