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

use k8s_openapi::api::core::v1::{Container, EnvVar, PodSpec};
use kubefab::merge_pod_spec;

fn generated_spec() -> PodSpec {
    PodSpec {
        containers: vec![Container {
            name: "spring-boot".to_string(),
            image: Some("acme/spring-boot:1.0".to_string()),
            image_pull_policy: Some("IfNotPresent".to_string()),
            env: Some(vec![EnvVar {
                name: "MODE".to_string(),
                value: Some("generated".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        }],
        restart_policy: Some("Always".to_string()),
        ..Default::default()
    }
}

#[test]
fn no_fragment_returns_generated_spec_unchanged() {
    let generated = generated_spec();
    let outcome = merge_pod_spec(None, generated.clone(), "spring-boot", false).unwrap();
    assert_eq!(outcome.pod_spec, generated);
    assert_eq!(outcome.container_name, "spring-boot");
}

#[test]
fn named_fragment_container_is_authoritative() {
    let fragment = PodSpec {
        containers: vec![Container {
            name: "my-app".to_string(),
            args: Some(vec!["--debug".to_string()]),
            ..Default::default()
        }],
        ..Default::default()
    };

    let outcome = merge_pod_spec(Some(fragment), generated_spec(), "spring-boot", false).unwrap();
    assert_eq!(outcome.container_name, "my-app");

    let container = &outcome.pod_spec.containers[0];
    assert_eq!(container.name, "my-app");
    // Fragment fields win, unset fragment fields inherit generated values
    assert_eq!(container.args.as_deref(), Some(&["--debug".to_string()][..]));
    assert_eq!(container.image.as_deref(), Some("acme/spring-boot:1.0"));
    assert_eq!(container.env.as_ref().map(Vec::len), Some(1));
}

#[test]
fn unnamed_fragment_container_merges_under_generated_name_idempotently() {
    let fragment = PodSpec {
        containers: vec![Container {
            name: String::new(),
            working_dir: Some("/work".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };

    let first = merge_pod_spec(
        Some(fragment.clone()),
        generated_spec(),
        "spring-boot",
        false,
    )
    .unwrap();
    let second = merge_pod_spec(Some(fragment), generated_spec(), "spring-boot", false).unwrap();

    assert_eq!(first.container_name, "spring-boot");
    assert_eq!(first.pod_spec.containers[0].name, "spring-boot");
    assert_eq!(
        first.pod_spec.containers[0].working_dir.as_deref(),
        Some("/work")
    );
    // Same inputs, same outputs
    assert_eq!(first.pod_spec, second.pod_spec);
    assert_eq!(first.container_name, second.container_name);
}

#[test]
fn multiple_fragment_containers_without_sidecar_mode_are_ambiguous() {
    let fragment = PodSpec {
        containers: vec![
            Container {
                name: "one".to_string(),
                ..Default::default()
            },
            Container {
                name: "two".to_string(),
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    let err = merge_pod_spec(Some(fragment), generated_spec(), "spring-boot", false).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn sidecar_mode_appends_fragment_containers() {
    let fragment = PodSpec {
        containers: vec![
            Container {
                name: "envoy".to_string(),
                image: Some("envoyproxy/envoy:v1.30".to_string()),
                ..Default::default()
            },
            Container {
                name: "agent".to_string(),
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    let outcome = merge_pod_spec(Some(fragment), generated_spec(), "spring-boot", true).unwrap();
    assert_eq!(outcome.container_name, "spring-boot");

    let names: Vec<&str> = outcome
        .pod_spec
        .containers
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["spring-boot", "envoy", "agent"]);
    // No field merge across distinct named containers
    assert!(outcome.pod_spec.containers[2].image.is_none());
}

#[test]
fn explicit_empty_collections_replace_generated_values() {
    let fragment = PodSpec {
        containers: vec![Container {
            name: "spring-boot".to_string(),
            env: Some(Vec::new()),
            ..Default::default()
        }],
        ..Default::default()
    };

    let outcome = merge_pod_spec(Some(fragment), generated_spec(), "spring-boot", false).unwrap();
    assert_eq!(outcome.pod_spec.containers[0].env, Some(Vec::new()));
}

#[test]
fn fragment_fields_outside_the_generated_set_survive_the_merge() {
    // Fields the generated spec never carries must still ride through from
    // the fragment instead of being dropped.
    let fragment = PodSpec {
        containers: vec![Container {
            name: "spring-boot".to_string(),
            restart_policy: Some("Always".to_string()),
            ..Default::default()
        }],
        active_deadline_seconds: Some(120),
        share_process_namespace: Some(true),
        ..Default::default()
    };

    let outcome = merge_pod_spec(Some(fragment), generated_spec(), "spring-boot", false).unwrap();
    assert_eq!(outcome.pod_spec.active_deadline_seconds, Some(120));
    assert_eq!(outcome.pod_spec.share_process_namespace, Some(true));

    let container = &outcome.pod_spec.containers[0];
    assert_eq!(container.restart_policy.as_deref(), Some("Always"));
    // Generated values still fill the fragment's unset fields
    assert_eq!(container.image.as_deref(), Some("acme/spring-boot:1.0"));
    assert_eq!(outcome.pod_spec.restart_policy.as_deref(), Some("Always"));
}

#[test]
fn pod_level_fragment_fields_override_generated_ones() {
    let fragment = PodSpec {
        containers: Vec::new(),
        restart_policy: Some("Never".to_string()),
        service_account_name: Some("builder".to_string()),
        ..Default::default()
    };

    let outcome = merge_pod_spec(Some(fragment), generated_spec(), "spring-boot", false).unwrap();
    assert_eq!(outcome.container_name, "spring-boot");
    assert_eq!(outcome.pod_spec.restart_policy.as_deref(), Some("Never"));
    assert_eq!(
        outcome.pod_spec.service_account_name.as_deref(),
        Some("builder")
    );
    // Generated containers survive a container-less fragment
    assert_eq!(outcome.pod_spec.containers.len(), 1);
}
