// Copyright 2025 kubefab contributors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use kubefab::domain::fragment::{self, KindRegistry};
use kubefab::ManifestError;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_fragment(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("failed to write fragment");
    path
}

#[test]
fn content_name_wins_over_default_and_kind_comes_from_filename() {
    let dir = TempDir::new().unwrap();
    let file = write_fragment(&dir, "svc.yml", "metadata:\n  name: pong\n");

    let registry = KindRegistry::new();
    let collection = fragment::load(&registry, &[file], "default-app").unwrap();

    assert_eq!(collection.len(), 1);
    let document = collection.iter().next().unwrap();
    assert_eq!(document.kind, "Service");
    assert_eq!(document.name, "pong");
}

#[test]
fn content_kind_wins_over_filename_suffix() {
    let dir = TempDir::new().unwrap();
    let file = write_fragment(
        &dir,
        "app-svc.yml",
        "kind: ConfigMap\nmetadata:\n  name: app\n",
    );

    let registry = KindRegistry::new();
    let collection = fragment::load(&registry, &[file], "default-app").unwrap();
    assert_eq!(collection.iter().next().unwrap().kind, "ConfigMap");
}

#[test]
fn filename_name_segment_and_default_name_fallbacks() {
    let dir = TempDir::new().unwrap();
    let named = write_fragment(&dir, "backend-svc.yml", "spec:\n  clusterIP: None\n");
    let unnamed = write_fragment(&dir, "deployment.yml", "spec: {}\n");

    let registry = KindRegistry::new();
    let collection = fragment::load(&registry, &[named, unnamed], "default-app").unwrap();

    let documents: Vec<_> = collection.iter().collect();
    assert_eq!(documents[0].name, "backend");
    assert_eq!(documents[1].kind, "Deployment");
    assert_eq!(documents[1].name, "default-app");
}

#[test]
fn unmatched_filename_without_kind_is_a_validation_error() {
    let dir = TempDir::new().unwrap();
    let file = write_fragment(&dir, "simple-rc.txt", "metadata:\n  name: simple\n");

    let registry = KindRegistry::new();
    let err = fragment::load(&registry, &[file], "app").unwrap_err();
    match err {
        ManifestError::ValidationError(message) => {
            assert!(message.contains("yaml|yml|json"), "message: {}", message);
        }
        other => panic!("expected validation error, got: {}", other),
    }
}

#[test]
fn unreadable_file_is_an_io_error_and_aborts_the_load() {
    let dir = TempDir::new().unwrap();
    let good = write_fragment(&dir, "app-svc.yml", "spec: {}\n");
    let missing = dir.path().join("missing-cm.yml");

    let registry = KindRegistry::new();
    let err = fragment::load(&registry, &[good, missing], "app").unwrap_err();
    assert!(matches!(err, ManifestError::Io(_)));
}

#[test]
fn non_mapping_metadata_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = write_fragment(&dir, "app-svc.yml", "metadata: just-a-string\n");

    let registry = KindRegistry::new();
    let err = fragment::load(&registry, &[file], "app").unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn helm_fragments_are_skipped_entirely() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write_fragment(&dir, "Chart.helm.yaml", "kind: Chart\n"),
        write_fragment(&dir, "Chart.helm.yml", "kind: Chart\n"),
        write_fragment(&dir, "configmap.yaml", "data:\n  a: b\n"),
        write_fragment(&dir, "named-cm.yaml", "metadata:\n  name: other\n"),
    ];

    let registry = KindRegistry::new();
    let collection = fragment::load(&registry, &files, "app").unwrap();

    assert_eq!(collection.len(), 2);
    let documents: Vec<_> = collection.iter().collect();
    assert_eq!(documents[0].kind, "ConfigMap");
    assert_eq!(documents[0].name, "app");
    assert_eq!(documents[1].kind, "ConfigMap");
    assert_eq!(documents[1].name, "other");
}

#[test]
fn json_fragments_are_loaded() {
    let dir = TempDir::new().unwrap();
    let file = write_fragment(
        &dir,
        "web-svc.json",
        r#"{"metadata": {"name": "web"}, "spec": {"ports": [{"port": 80}]}}"#,
    );

    let registry = KindRegistry::new();
    let collection = fragment::load(&registry, &[file], "app").unwrap();
    let document = collection.iter().next().unwrap();
    assert_eq!(document.kind, "Service");
    assert_eq!(document.name, "web");
    assert!(document.spec.get("ports").is_some());
}

#[test]
fn custom_resource_fragments_keep_registered_kind() {
    let dir = TempDir::new().unwrap();
    let file = write_fragment(&dir, "stream-cr.yml", "kind: KafkaStream\nspec: {}\n");

    let mut registry = KindRegistry::new();
    registry.register_mapping("KafkaStream", vec!["cr".to_string()]);

    let collection = fragment::load(&registry, &[file], "app").unwrap();
    // Content kind still wins even though the suffix maps to the same kind
    assert_eq!(collection.iter().next().unwrap().kind, "KafkaStream");
}

#[test]
fn non_spec_payload_round_trips() {
    let dir = TempDir::new().unwrap();
    let file = write_fragment(&dir, "app-cm.yml", "data:\n  greeting: hello\n");

    let registry = KindRegistry::new();
    let collection = fragment::load(&registry, &[file], "app").unwrap();
    let value = collection.iter().next().unwrap().to_value();
    assert_eq!(
        value
            .get("data")
            .and_then(|d| d.get("greeting"))
            .and_then(|v| v.as_str()),
        Some("hello")
    );
}
