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

use crate::domain::config::{ConfigResolver, HealthCheckConfig, PipelineContext};
use crate::domain::pipeline::Enricher;
use crate::domain::resource::ResourceCollection;
use crate::infrastructure::constants::{
    INSTRUCTION_GENERATED_CONTAINERS, PROBE_INITIAL_DELAY_LIVENESS,
    PROBE_INITIAL_DELAY_READINESS, PROBE_PERIOD,
};
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::{Container, HTTPGetAction, Probe};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// Synthesizes HTTP liveness and readiness probes on generated containers
/// from the image health-check metadata, with per-probe config overrides.
/// Containers the user supplied (sidecars) are left alone, as are probes the
/// fragment already defines.
pub struct HealthProbeEnricher;

impl Enricher for HealthProbeEnricher {
    fn name(&self) -> &str {
        "kubefab-health-probes"
    }

    fn enrich(&self, ctx: &mut PipelineContext, resources: &mut ResourceCollection) -> Result<()> {
        let generated: Vec<String> = ctx
            .instruction(INSTRUCTION_GENERATED_CONTAINERS)
            .map(|names| names.to_vec())
            .unwrap_or_default();
        if generated.is_empty() {
            return Ok(());
        }

        let checks: Vec<(String, HealthCheckConfig)> = ctx
            .images
            .iter()
            .filter_map(|image| {
                image
                    .health_check
                    .clone()
                    .map(|check| (image.container_name(), check))
            })
            .collect();
        if checks.is_empty() {
            return Ok(());
        }

        let config = ctx.config.clone();
        resources.visit_pod_specs(|pod_spec| {
            for container in &mut pod_spec.containers {
                if !generated.contains(&container.name) {
                    continue;
                }
                // The merge may have renamed the primary container; in that
                // case the first image's health check still applies to it.
                let check = checks
                    .iter()
                    .find(|(name, _)| *name == container.name)
                    .or_else(|| {
                        if generated.first() == Some(&container.name) {
                            checks.first()
                        } else {
                            None
                        }
                    })
                    .map(|(_, check)| check);
                let check = match check {
                    Some(check) => check,
                    None => continue,
                };

                if container.readiness_probe.is_none() {
                    container.readiness_probe = build_probe(
                        &config,
                        "readiness",
                        check,
                        container,
                        PROBE_INITIAL_DELAY_READINESS,
                    )?;
                }
                if container.liveness_probe.is_none() {
                    container.liveness_probe = build_probe(
                        &config,
                        "liveness",
                        check,
                        container,
                        PROBE_INITIAL_DELAY_LIVENESS,
                    )?;
                }
            }
            Ok(())
        })
    }
}

fn build_probe(
    config: &ConfigResolver,
    scope: &str,
    check: &HealthCheckConfig,
    container: &Container,
    default_initial_delay: i32,
) -> Result<Option<Probe>> {
    let port = match config.resolve_parsed::<i32>(scope, "port")? {
        Some(port) => Some(port),
        None => check.port.or_else(|| first_container_port(container)),
    };
    let port = match port {
        Some(port) => port,
        None => return Ok(None),
    };

    let path = config.resolve_or(scope, "path", &check.path);
    let scheme = config
        .resolve(scope, "scheme")
        .or_else(|| check.scheme.clone())
        .map(|s| s.to_uppercase());
    let initial_delay = config
        .resolve_parsed::<i32>(scope, "initial-delay")?
        .unwrap_or(default_initial_delay);
    let period = config
        .resolve_parsed::<i32>(scope, "period")?
        .unwrap_or(PROBE_PERIOD);

    Ok(Some(Probe {
        http_get: Some(HTTPGetAction {
            path: Some(path),
            port: IntOrString::Int(port),
            scheme,
            ..Default::default()
        }),
        initial_delay_seconds: Some(initial_delay),
        period_seconds: Some(period),
        ..Default::default()
    }))
}

fn first_container_port(container: &Container) -> Option<i32> {
    container
        .ports
        .as_ref()
        .and_then(|ports| ports.first())
        .map(|port| port.container_port)
}
