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

use crate::shared::error::{ManifestError, Result};
use k8s_openapi::api::core::v1::{Container, PodSpec};

/// Result of reconciling a fragment pod spec against a generated one.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub pod_spec: PodSpec,
    /// Name of the primary container after the merge.
    pub container_name: String,
}

/// Reconciles a user fragment's pod spec with the generated pod spec.
/// Fragment-provided fields (including explicit empty collections) replace
/// the generated value; fields absent from the fragment inherit it. The
/// merge is a pure function of its inputs.
pub fn merge_pod_spec(
    fragment: Option<PodSpec>,
    generated: PodSpec,
    default_container_name: &str,
    sidecar_mode: bool,
) -> Result<MergeOutcome> {
    let mut fragment = match fragment {
        Some(fragment) => fragment,
        None => {
            return Ok(MergeOutcome {
                pod_spec: generated,
                container_name: default_container_name.to_string(),
            });
        }
    };

    let fragment_containers = std::mem::take(&mut fragment.containers);

    // The fragment is the base of the merge so that every field it sets
    // rides through untouched; generated values only fill unset fields.
    let mut generated = generated;
    let generated_containers = std::mem::take(&mut generated.containers);
    let mut merged = fragment;
    inherit_pod_defaults(&mut merged, generated);

    let primary_index = generated_containers
        .iter()
        .position(|c| c.name == default_container_name)
        .unwrap_or(0);
    let generated_primary = generated_containers
        .get(primary_index)
        .cloned()
        .unwrap_or_else(|| Container {
            name: default_container_name.to_string(),
            ..Default::default()
        });

    let (containers, container_name) = match fragment_containers.len() {
        0 => {
            let containers = if generated_containers.is_empty() {
                vec![generated_primary]
            } else {
                generated_containers
            };
            (containers, default_container_name.to_string())
        }
        1 => {
            let fragment_container = fragment_containers.into_iter().next().unwrap();
            let explicit_name = !fragment_container.name.is_empty();

            // Container identity is resolved by name: a named fragment
            // container merges into its generated namesake when one exists,
            // otherwise into the primary container.
            let target_index = generated_containers
                .iter()
                .position(|c| c.name == fragment_container.name)
                .unwrap_or(primary_index);
            let merge_target = generated_containers
                .get(target_index)
                .cloned()
                .unwrap_or(generated_primary);

            let merged_primary = merge_container(fragment_container, merge_target);
            let primary_name = merged_primary.name.clone();

            let mut containers = generated_containers;
            if containers.is_empty() {
                containers.push(merged_primary);
            } else {
                containers[target_index] = merged_primary;
            }

            let name = if explicit_name {
                primary_name
            } else {
                default_container_name.to_string()
            };
            (containers, name)
        }
        _ if !sidecar_mode => {
            return Err(ManifestError::validation(format!(
                "Pod fragment defines {} containers but sidecar mode is disabled; \
                 the merge target for container '{}' is ambiguous",
                fragment_containers.len(),
                default_container_name
            )));
        }
        _ => {
            // Sidecar mode: fragment containers ride alongside the generated
            // ones, no cross-container field merge.
            let mut containers = if generated_containers.is_empty() {
                vec![generated_primary]
            } else {
                generated_containers
            };
            containers.extend(fragment_containers);
            (containers, default_container_name.to_string())
        }
    };

    merged.containers = containers;
    Ok(MergeOutcome {
        pod_spec: merged,
        container_name,
    })
}

/// Merges the generated container into the fragment's. The fragment is the
/// base, so every field it sets survives verbatim; the fields the generated
/// container can carry fill in where the fragment is silent.
fn merge_container(fragment: Container, generated: Container) -> Container {
    let mut merged = fragment;
    if merged.name.is_empty() {
        merged.name = generated.name;
    }
    if merged.image.is_none() {
        merged.image = generated.image;
    }
    if merged.image_pull_policy.is_none() {
        merged.image_pull_policy = generated.image_pull_policy;
    }
    if merged.command.is_none() {
        merged.command = generated.command;
    }
    if merged.args.is_none() {
        merged.args = generated.args;
    }
    if merged.working_dir.is_none() {
        merged.working_dir = generated.working_dir;
    }
    if merged.ports.is_none() {
        merged.ports = generated.ports;
    }
    if merged.env.is_none() {
        merged.env = generated.env;
    }
    if merged.env_from.is_none() {
        merged.env_from = generated.env_from;
    }
    if merged.resources.is_none() {
        merged.resources = generated.resources;
    }
    if merged.volume_mounts.is_none() {
        merged.volume_mounts = generated.volume_mounts;
    }
    if merged.liveness_probe.is_none() {
        merged.liveness_probe = generated.liveness_probe;
    }
    if merged.readiness_probe.is_none() {
        merged.readiness_probe = generated.readiness_probe;
    }
    if merged.startup_probe.is_none() {
        merged.startup_probe = generated.startup_probe;
    }
    if merged.lifecycle.is_none() {
        merged.lifecycle = generated.lifecycle;
    }
    if merged.security_context.is_none() {
        merged.security_context = generated.security_context;
    }
    merged
}

/// Fills pod-level fields the fragment leaves unset from the generated spec.
/// Fields set by the fragment (including explicit empty collections) are
/// never touched.
fn inherit_pod_defaults(merged: &mut PodSpec, generated: PodSpec) {
    if merged.volumes.is_none() {
        merged.volumes = generated.volumes;
    }
    if merged.init_containers.is_none() {
        merged.init_containers = generated.init_containers;
    }
    if merged.restart_policy.is_none() {
        merged.restart_policy = generated.restart_policy;
    }
    if merged.termination_grace_period_seconds.is_none() {
        merged.termination_grace_period_seconds = generated.termination_grace_period_seconds;
    }
    if merged.dns_policy.is_none() {
        merged.dns_policy = generated.dns_policy;
    }
    if merged.node_selector.is_none() {
        merged.node_selector = generated.node_selector;
    }
    if merged.service_account_name.is_none() {
        merged.service_account_name = generated.service_account_name;
    }
    if merged.security_context.is_none() {
        merged.security_context = generated.security_context;
    }
    if merged.image_pull_secrets.is_none() {
        merged.image_pull_secrets = generated.image_pull_secrets;
    }
    if merged.affinity.is_none() {
        merged.affinity = generated.affinity;
    }
    if merged.tolerations.is_none() {
        merged.tolerations = generated.tolerations;
    }
    if merged.host_network.is_none() {
        merged.host_network = generated.host_network;
    }
    if merged.priority_class_name.is_none() {
        merged.priority_class_name = generated.priority_class_name;
    }
    if merged.scheduler_name.is_none() {
        merged.scheduler_name = generated.scheduler_name;
    }
    if merged.hostname.is_none() {
        merged.hostname = generated.hostname;
    }
    if merged.subdomain.is_none() {
        merged.subdomain = generated.subdomain;
    }
}
