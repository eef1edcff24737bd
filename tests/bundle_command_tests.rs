//! End-to-end bundle command tests against a mock GitHub API and local
//! git repositories standing in for component remotes

mod common;

use assert_cmd::Command;
use mockito::ServerGuard;
use predicates::prelude::*;

use common::{repo_body, write_manifest, FixtureRepo};

#[allow(deprecated)]
fn autotag_cmd(server: &ServerGuard) -> Command {
    let mut cmd = Command::cargo_bin("autotag").unwrap();
    cmd.env_remove("GITHUB_TOKEN");
    cmd.env_remove("AUTOTAG_PR_TOKEN");
    cmd.env("AUTOTAG_API_URL", server.url());
    cmd
}

fn mock_org(server: &mut ServerGuard) {
    server
        .mock("GET", "/orgs/ROCm")
        .with_status(200)
        .with_body(r#"{"login": "ROCm"}"#)
        .create();
}

fn mock_component(server: &mut ServerGuard, name: &str, clone_url: &str) {
    server
        .mock("GET", format!("/repos/ROCm/{name}").as_str())
        .with_status(200)
        .with_body(repo_body(&format!("ROCm/{name}"), clone_url))
        .create();
    server
        .mock("GET", format!("/repos/ROCm/{name}-internal").as_str())
        .with_status(404)
        .create();
}

fn mock_product(server: &mut ServerGuard, clone_url: &str) {
    server
        .mock("GET", "/repos/ROCm/ROCm")
        .with_status(200)
        .with_body(repo_body("ROCm/ROCm", clone_url))
        .create();
}

#[test]
fn test_bundle_prints_resolved_libraries() {
    let mut server = mockito::Server::new();
    mock_org(&mut server);

    let product = FixtureRepo::new();
    let release_sha = product.commit("6.2 release");
    product.tag("rocm-6.2.0", &release_sha);
    mock_product(&mut server, &product.url());

    let component = FixtureRepo::new();
    let sha = component.commit("release work");
    component.tag("rocm-6.2.0", &sha);
    mock_component(&mut server, "rocBLAS", &component.url());

    let manifest = write_manifest("ROCm/ROCm", &[("rocBLAS", "G1", "C1")]);

    autotag_cmd(&server)
        .args(["bundle", "6.2.0", "--min-version", "6.2.0"])
        .arg("--manifest")
        .arg(manifest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Libraries for rocm-6.2.0:"))
        .stdout(predicate::str::contains("rocBLAS"))
        .stdout(predicate::str::contains("Group G1"))
        .stdout(predicate::str::contains("Category C1"))
        .stdout(predicate::str::contains(&sha));
}

#[test]
fn test_bundle_reports_missing_fallback_branch() {
    let mut server = mockito::Server::new();
    mock_org(&mut server);

    let product = FixtureRepo::new();
    mock_product(&mut server, &product.url());

    // Component has neither the tag nor the fallback branch.
    let component = FixtureRepo::new();
    mock_component(&mut server, "rocSPARSE", &component.url());
    server
        .mock(
            "GET",
            "/repos/ROCm/rocSPARSE/branches/release/rocm-rel-6.2.0",
        )
        .with_status(404)
        .create();

    let manifest = write_manifest("ROCm/ROCm", &[("rocSPARSE", "G1", "C1")]);

    autotag_cmd(&server)
        .args(["bundle", "6.2.0", "--min-version", "6.2.0"])
        .arg("--manifest")
        .arg(manifest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Could not find the following branch: release/rocm-rel-6.2.0 for rocSPARSE",
        ));
}

#[test]
fn test_bundle_covers_release_history_range() {
    let mut server = mockito::Server::new();
    mock_org(&mut server);

    let product = FixtureRepo::new();
    let v60 = product.commit("6.0 release");
    product.tag("rocm-6.0.0", &v60);
    let v61 = product.commit("6.1 release");
    product.tag("rocm-6.1.0", &v61);
    mock_product(&mut server, &product.url());

    let component = FixtureRepo::new();
    let c60 = component.commit("6.0 release");
    component.tag("rocm-6.0.0", &c60);
    let c61 = component.commit("6.1 release");
    component.tag("rocm-6.1.0", &c61);
    mock_component(&mut server, "rocBLAS", &component.url());
    let tip = component.commit("in-flight work");
    server
        .mock(
            "GET",
            "/repos/ROCm/rocBLAS/branches/release/rocm-rel-6.2.0",
        )
        .with_status(200)
        .with_body(format!(r#"{{"commit": {{"sha": "{tip}"}}}}"#))
        .create();

    let manifest = write_manifest("ROCm/ROCm", &[("rocBLAS", "G1", "C1")]);

    autotag_cmd(&server)
        .args(["bundle", "6.2.0", "--min-version", "6.0.0"])
        .arg("--manifest")
        .arg(manifest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Libraries for rocm-6.0.0:"))
        .stdout(predicate::str::contains("Libraries for rocm-6.1.0:"))
        .stdout(predicate::str::contains("Libraries for rocm-6.2.0:"))
        .stdout(predicate::str::contains(&c60))
        .stdout(predicate::str::contains(&c61))
        .stdout(predicate::str::contains(&tip));
}

#[test]
fn test_bundle_fails_on_unknown_organization() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/orgs/ghost").with_status(404).create();
    server.mock("GET", "/users/ghost").with_status(404).create();

    // Umbrella resolution succeeds; the component namespace does not.
    let product = FixtureRepo::new();
    mock_product(&mut server, &product.url());

    let manifest = write_manifest("ROCm/ROCm", &[("rocBLAS", "G1", "C1")]);

    autotag_cmd(&server)
        .args(["bundle", "6.2.0", "--org", "ghost"])
        .arg("--manifest")
        .arg(manifest.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Could not find organization or user: ghost",
        ));
}
