//! Integration tests for the `siteforge` binary.
//!
//! Argument parsing, completions, and configuration errors run without a
//! network; the build scenarios run the binary against a wiremock API.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORG: &str = "org-1";
const WLAN: &str = "tpl-wlan";

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `siteforge` binary with env isolation.
///
/// Clears all `SITEFORGE_*` env vars, points config directories at `home`,
/// and runs from `home` so no stray `env.json` or `devices.txt` is seen.
fn siteforge_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("siteforge");
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("SITEFORGE_CONFIG")
        .env_remove("SITEFORGE_PROFILE")
        .env_remove("SITEFORGE_BASE_URL")
        .env_remove("SITEFORGE_ORG")
        .env_remove("SITEFORGE_TOKEN")
        .env_remove("SITEFORGE_TIMEOUT")
        .env_remove("SITEFORGE_OUTPUT");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn write_config(dir: &Path, base_url: &str) -> std::path::PathBuf {
    let path = dir.join("siteforge.toml");
    let body = format!(
        r#"
[profiles.default]
base_url = "{base_url}"
org_id = "{ORG}"
token = "test-token"
wlan_template_id = "{WLAN}"

[profiles.default.site]
timezone = "America/Denver"
country_code = "US"
"#
    );
    std::fs::write(&path, body).unwrap();
    path
}

async fn mount_sites(server: &MockServer, existing: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/orgs/{ORG}/sites")))
        .respond_with(ResponseTemplate::new(200).set_body_json(existing))
        .mount(server)
        .await;
}

/// Name check, creation, and template attach for a new `Denver-01`.
async fn mount_site_creation(server: &MockServer) {
    mount_sites(server, json!([])).await;
    Mock::given(method("POST"))
        .and(path(format!("/orgs/{ORG}/sites")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "site-new", "name": "Denver-01" })),
        )
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/orgs/{ORG}/templates/{WLAN}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": WLAN,
            "applies": { "site_ids": [] }
        })))
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/orgs/{ORG}/templates/{WLAN}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_pool(server: &MockServer, devices: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/orgs/{ORG}/inventory")))
        .and(query_param("unassigned", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(devices))
        .mount(server)
        .await;
}

async fn forbid_assignment(server: &MockServer) {
    Mock::given(method("PUT"))
        .and(path(format!("/orgs/{ORG}/inventory")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = siteforge_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    siteforge_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("build")
                .and(predicate::str::contains("inventory"))
                .and(predicate::str::contains("sites")),
        );
}

#[test]
fn version_flag() {
    let home = tempfile::tempdir().unwrap();
    siteforge_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("siteforge"));
}

#[test]
fn build_help_documents_flags() {
    let home = tempfile::tempdir().unwrap();
    siteforge_cmd(home.path())
        .args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--name").and(predicate::str::contains("--devices")));
}

#[test]
fn completions_bash() {
    let home = tempfile::tempdir().unwrap();
    siteforge_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn invalid_output_format_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    siteforge_cmd(home.path())
        .args(["--output", "xml", "sites"])
        .assert()
        .code(2);
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn missing_profile_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let output = siteforge_cmd(home.path())
        .args(["build", "--name", "Denver-01"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("not found"));
}

#[test]
fn legacy_env_json_without_wlan_template_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join("env.json"),
        json!({
            "token": "t",
            "baseUrl": "http://127.0.0.1:9/api/v1",
            "orgId": ORG,
            "wlantemplate_id": ""
        })
        .to_string(),
    )
    .unwrap();

    let output = siteforge_cmd(home.path())
        .args(["build", "--name", "Denver-01"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("wlan_template_id"));
}

#[test]
fn zero_timeout_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), "http://127.0.0.1:9");

    let output = siteforge_cmd(home.path())
        .arg("--config")
        .arg(&config)
        .args(["--timeout", "0", "sites"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("timeout"));
}

// ── Against a mock API ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn build_assigns_devices_from_file() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), &server.uri());
    let devices = home.path().join("macs.txt");
    std::fs::write(&devices, "AA:BB:CC:DD:EE:FF\n\n112233445566\n").unwrap();

    mount_sites(&server, json!([{ "id": "site-old", "name": "Boulder-01" }])).await;
    Mock::given(method("POST"))
        .and(path(format!("/orgs/{ORG}/sites")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "site-new", "name": "Denver-01" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/orgs/{ORG}/templates/{WLAN}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": WLAN,
            "applies": { "site_ids": [] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/orgs/{ORG}/templates/{WLAN}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/orgs/{ORG}/inventory")))
        .and(query_param("unassigned", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "mac": "aabbccddeeff", "serial": "A1", "type": "ap" },
            { "mac": "112233445566", "serial": "B2", "type": "switch" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/orgs/{ORG}/inventory")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": ["aabbccddeeff"],
            "error": ["112233445566"],
            "reason": ["already assigned"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = siteforge_cmd(home.path());
    cmd.arg("--config")
        .arg(&config)
        .args(["--color", "never", "build", "--name", "Denver-01", "--devices"])
        .arg(&devices);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(stdout.contains("devices added to site 'Denver-01': 1"));
    assert!(stdout.contains("device '112233445566' error: already assigned"));
}

#[tokio::test(flavor = "multi_thread")]
async fn build_with_taken_name_exits_with_conflict() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), &server.uri());

    mount_sites(&server, json!([{ "id": "site-old", "name": "Denver-01" }])).await;
    Mock::given(method("POST"))
        .and(path(format!("/orgs/{ORG}/sites")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut cmd = siteforge_cmd(home.path());
    cmd.arg("--config")
        .arg(&config)
        .args(["build", "--name", "Denver-01"]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(6), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("already exists"));
}

#[tokio::test(flavor = "multi_thread")]
async fn sites_renders_json() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), &server.uri());
    mount_sites(&server, json!([{ "id": "site-old", "name": "Boulder-01" }])).await;

    let mut cmd = siteforge_cmd(home.path());
    cmd.arg("--config").arg(&config).args(["--output", "json", "sites"]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["name"], "Boulder-01");
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_token_exits_with_auth_code() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), &server.uri());
    Mock::given(method("GET"))
        .and(path(format!("/orgs/{ORG}/sites")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "bad token" })))
        .mount(&server)
        .await;

    let mut cmd = siteforge_cmd(home.path());
    cmd.arg("--config").arg(&config).arg("sites");
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn build_stops_cleanly_on_mac_outside_pool() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), &server.uri());
    let devices = home.path().join("macs.txt");
    std::fs::write(&devices, "aabbccddeeff\n665544332211\n").unwrap();

    mount_site_creation(&server).await;
    mount_pool(
        &server,
        json!([{ "mac": "aabbccddeeff", "serial": "A1", "type": "ap" }]),
    )
    .await;
    forbid_assignment(&server).await;

    let mut cmd = siteforge_cmd(home.path());
    cmd.arg("--config")
        .arg(&config)
        .args(["--color", "never", "build", "--name", "Denver-01", "--devices"])
        .arg(&devices);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("device '665544332211' does not exist in unassigned inventory"));
}

#[tokio::test(flavor = "multi_thread")]
async fn build_stops_cleanly_on_empty_pool() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), &server.uri());
    let devices = home.path().join("macs.txt");
    std::fs::write(&devices, "aabbccddeeff\n").unwrap();

    mount_site_creation(&server).await;
    mount_pool(&server, json!([])).await;
    forbid_assignment(&server).await;

    let mut cmd = siteforge_cmd(home.path());
    cmd.arg("--config")
        .arg(&config)
        .args(["--color", "never", "build", "--name", "Denver-01", "--devices"])
        .arg(&devices);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("no unassigned devices in inventory"));
}
