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

use crate::domain::config::{PipelineContext, PlatformMode};
use crate::domain::pipeline::Enricher;
use crate::domain::resource::ResourceCollection;
use crate::infrastructure::constants::{
    CONTROLLER_KINDS, DEFAULT_IMAGE_PULL_POLICY, DEFAULT_REPLICAS,
    INSTRUCTION_GENERATED_CONTAINERS, LABEL_APP, LABEL_PROVIDER, LABEL_PROVIDER_VALUE,
};
use crate::infrastructure::kubernetes::resources::pod::{build_pod_spec, merge_pod_spec};
use crate::infrastructure::kubernetes::resources::{ControllerBuilder, ControllerKind};
use crate::shared::error::Result;
use std::collections::BTreeMap;
use tracing::debug;

/// Adds the default controller resource when the collection does not already
/// contain one, or reconciles a user-supplied controller fragment's pod
/// template with the pod spec generated from the image list. Records the
/// generated container names for enrichers running later in the run.
pub struct ControllerEnricher;

const SCOPE: &str = "controller";

impl Enricher for ControllerEnricher {
    fn name(&self) -> &str {
        "kubefab-controller"
    }

    fn create(&self, ctx: &mut PipelineContext, resources: &mut ResourceCollection) -> Result<()> {
        let image_pull_policy =
            ctx.config
                .resolve_or(SCOPE, "image-pull-policy", DEFAULT_IMAGE_PULL_POLICY);
        let generated = build_pod_spec(&ctx.images, &image_pull_policy);
        let default_container_name = ctx
            .images
            .first()
            .map(|image| image.container_name())
            .unwrap_or_else(|| ctx.app_name.clone());
        let sidecar_mode = ctx
            .config
            .resolve_parsed::<bool>(SCOPE, "sidecar")?
            .unwrap_or(false);

        let mut container_names: Vec<String> =
            ctx.images.iter().map(|i| i.container_name()).collect();

        if resources.has_kind(CONTROLLER_KINDS) {
            // A user fragment already provides the controller; merge the
            // generated pod spec into its template.
            for document in resources.iter_mut() {
                if !document.is_controller() {
                    continue;
                }
                let fragment_spec = document.pod_spec()?;
                let outcome = merge_pod_spec(
                    fragment_spec,
                    generated.clone(),
                    &default_container_name,
                    sidecar_mode,
                )?;
                document.set_pod_spec(&outcome.pod_spec)?;
                debug!(kind = %document.kind, name = %document.name, "merged controller fragment");

                if container_names.is_empty() {
                    container_names.push(outcome.container_name);
                } else {
                    container_names[0] = outcome.container_name;
                }
                break;
            }
        } else {
            if ctx.images.is_empty() {
                debug!("no images configured, skipping default controller");
                return Ok(());
            }

            let kind: ControllerKind = ctx
                .config
                .resolve_or(SCOPE, "kind", default_kind(ctx.platform))
                .parse()?;
            let name = ctx.config.resolve_or(SCOPE, "name", &ctx.app_name);
            let replicas = ctx
                .config
                .resolve_parsed::<i32>(SCOPE, "replicas")?
                .unwrap_or(DEFAULT_REPLICAS);

            let document = ControllerBuilder::new(name, kind, &ctx.images)
                .with_replicas(replicas)
                .with_labels(app_labels(&ctx.app_name))
                .with_image_pull_policy(image_pull_policy)
                .build()?;
            debug!(kind = %document.kind, name = %document.name, "created default controller");
            resources.push(document);
        }

        ctx.set_instruction(INSTRUCTION_GENERATED_CONTAINERS, container_names);
        Ok(())
    }
}

fn default_kind(platform: PlatformMode) -> &'static str {
    match platform {
        PlatformMode::Kubernetes => "deployment",
        PlatformMode::OpenShift => "deploymentconfig",
    }
}

pub(crate) fn app_labels(app_name: &str) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_APP.to_string(), app_name.to_string());
    labels.insert(LABEL_PROVIDER.to_string(), LABEL_PROVIDER_VALUE.to_string());
    labels
}
