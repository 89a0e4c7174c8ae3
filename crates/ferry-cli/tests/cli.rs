//! Binary-level tests: the `ferry` executable against temp config dirs and a
//! mock management API.

use std::path::Path;
use std::process::{Command, Output};

use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const ENV_PATH: &str = "/spaces/s1/environments/master";

const MAPPING: &str = r#"
[mapping.fields.title]
external_key = "name"
type = "Symbol"

[mapping.fields.body]
external_key = "description"
type = "RichText"

[mapping.fields.image]
external_key = "imageUrl"
type = "Link"

[mapping.asset_labels]
title = "title"
upload = "image"
content_type = "mime"
"#;

struct Project {
    root: tempfile::TempDir,
}

impl Project {
    fn new(config: &str, records: &Value) -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let config_dir = root.path().join("config");
        std::fs::create_dir(&config_dir).expect("config dir");
        std::fs::write(config_dir.join("ferry.toml"), config).expect("config file");
        std::fs::write(config_dir.join("records.json"), records.to_string()).expect("records");
        Self { root }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn ferry(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ferry"));
        cmd.args(args)
            .current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".xdg"))
            .env("FERRY_LOG", "info");
        for (key, _) in std::env::vars() {
            if key.starts_with("FERRY_") && key != "FERRY_LOG" {
                cmd.env_remove(key);
            }
        }
        cmd.output().expect("failed to run ferry")
    }
}

fn records(count: usize) -> Value {
    let data: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "name": format!("Item {i}"),
                "description": format!("About item {i}"),
                "imageUrl": format!("https://img.test/{i}.png"),
            })
        })
        .collect();
    json!({ "data": data })
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|error| {
        panic!(
            "stdout is not JSON ({error}): {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

fn import_config(base_url: &str, locale_id: &str) -> String {
    format!(
        r#"
[target]
access_token = "CFPAT-test"
space_id = "s1"
base_url = "{base_url}"

[source]
file = "records.json"

[import]
content_type_id = "product"
locale_id = "{locale_id}"
concurrency = 2
process_poll_interval_ms = 1
{MAPPING}"#
    )
}

/// Mount the full platform surface; returns the entry-creation mock.
fn mock_platform(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/spaces/s1");
        then.status(200).json_body(json!({"sys": {"id": "s1", "type": "Space"}}));
    });
    server.mock(|when, then| {
        when.method(GET).path(ENV_PATH);
        then.status(200).json_body(json!({"sys": {"id": "master", "type": "Environment"}}));
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("{ENV_PATH}/locales/loc1"));
        then.status(200)
            .json_body(json!({"sys": {"id": "loc1", "type": "Locale"}, "code": "en-US"}));
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("{ENV_PATH}/locales/nope"));
        then.status(404).json_body(json!({
            "sys": {"type": "Error", "id": "NotFound"},
            "message": "The resource could not be found."
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("{ENV_PATH}/content_types/product"));
        then.status(200).json_body(
            json!({"sys": {"id": "product", "type": "ContentType", "version": 1}, "name": "Product"}),
        );
    });
    let entries = server.mock(|when, then| {
        when.method(POST).path(format!("{ENV_PATH}/entries"));
        then.status(201).json_body(json!({
            "sys": {"id": "e1", "type": "Entry", "version": 1},
            "fields": {}
        }));
    });
    server.mock(|when, then| {
        when.method(PUT).path(format!("{ENV_PATH}/entries/e1"));
        then.status(200).json_body(json!({
            "sys": {"id": "e1", "type": "Entry", "version": 2},
            "fields": {}
        }));
    });
    server.mock(|when, then| {
        when.method(PUT).path(format!("{ENV_PATH}/entries/e1/published"));
        then.status(200).json_body(json!({
            "sys": {"id": "e1", "type": "Entry", "version": 3, "publishedVersion": 2},
            "fields": {}
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path(format!("{ENV_PATH}/assets"));
        then.status(201).json_body(json!({
            "sys": {"id": "a1", "type": "Asset", "version": 1},
            "fields": {"file": {"en-US": {"fileName": "e1.png", "upload": "https://img.test/0.png"}}}
        }));
    });
    server.mock(|when, then| {
        when.method(PUT).path(format!("{ENV_PATH}/assets/a1/files/en-US/process"));
        then.status(204);
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("{ENV_PATH}/assets/a1"));
        then.status(200).json_body(json!({
            "sys": {"id": "a1", "type": "Asset", "version": 2},
            "fields": {"file": {"en-US": {"fileName": "e1.png", "url": "//cdn.test/e1.png"}}}
        }));
    });
    server.mock(|when, then| {
        when.method(PUT).path(format!("{ENV_PATH}/assets/a1/published"));
        then.status(200).json_body(json!({
            "sys": {"id": "a1", "type": "Asset", "version": 3, "publishedVersion": 2},
            "fields": {}
        }));
    });
    entries
}

#[test]
fn preview_maps_file_source_without_target() {
    let project = Project::new(&format!("[source]\nfile = \"records.json\"\n{MAPPING}"), &records(12));

    let output = project.ferry(&["preview", "--sample"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let rows = stdout_json(&output);
    let rows = rows.as_array().expect("array of records");
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0]["index"], 0);
    assert_eq!(rows[0]["title"], "Item 0");
    assert_eq!(rows[9]["image"], "https://img.test/9.png");
}

#[test]
fn run_without_target_exits_with_failure() {
    let project = Project::new(&format!("[source]\nfile = \"records.json\"\n{MAPPING}"), &records(1));

    let output = project.ferry(&["run"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("'target' is not configured"));
}

#[test]
fn run_imports_every_record() {
    let server = MockServer::start();
    let entries = mock_platform(&server);
    let project = Project::new(&import_config(&server.base_url(), "loc1"), &records(3));

    let output = project.ferry(&["run"]);
    entries.assert_calls(3);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report = stdout_json(&output);
    assert_eq!(report["total"], 3);
    assert_eq!(report["succeeded"], 3);
    assert_eq!(report["failed"], 0);
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("Import finished. Total: 3. Successfully: 3. Failed: 0.")
    );
}

#[test]
fn run_aborts_on_unknown_locale_before_creating_entries() {
    let server = MockServer::start();
    let entries = mock_platform(&server);
    let project = Project::new(&import_config(&server.base_url(), "nope"), &records(2));

    let output = project.ferry(&["run"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("import aborted"));
    entries.assert_calls(0);
}

#[test]
fn validate_prints_resolved_locale() {
    let server = MockServer::start();
    let _ = mock_platform(&server);
    let project = Project::new(&import_config(&server.base_url(), "loc1"), &records(0));

    let output = project.ferry(&["validate", "--format", "raw"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let body = stdout_json(&output);
    assert_eq!(body["locale_code"], "en-US");
    assert_eq!(body["content_type_name"], "Product");
}
