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

use crate::domain::config::PipelineContext;
use crate::domain::pipeline::Enricher;
use crate::domain::resource::ResourceCollection;
use crate::infrastructure::constants::{IMAGE_TRIGGER_ANNOTATION, INSTRUCTION_GENERATED_CONTAINERS};
use crate::shared::error::Result;
use serde_json::json;

/// Annotates DeploymentConfig resources with image-change triggers for the
/// generated containers. A no-op outside openshift mode.
pub struct ImageTriggerEnricher;

impl Enricher for ImageTriggerEnricher {
    fn name(&self) -> &str {
        "kubefab-image-triggers"
    }

    fn enrich(&self, ctx: &mut PipelineContext, resources: &mut ResourceCollection) -> Result<()> {
        if !ctx.platform.is_openshift() {
            return Ok(());
        }

        let generated: Vec<String> = ctx
            .instruction(INSTRUCTION_GENERATED_CONTAINERS)
            .map(|names| names.to_vec())
            .unwrap_or_default();

        let triggers: Vec<serde_json::Value> = ctx
            .images
            .iter()
            .zip(&generated)
            .map(|(image, container_name)| {
                json!({
                    "from": {
                        "kind": "ImageStreamTag",
                        "name": image.name,
                    },
                    "fieldPath": format!(
                        "spec.template.spec.containers[?(@.name==\"{}\")].image",
                        container_name
                    ),
                })
            })
            .collect();
        if triggers.is_empty() {
            return Ok(());
        }

        let annotation = serde_json::to_string(&triggers)?;
        resources.visit_documents_mut(&["DeploymentConfig"], |document| {
            document.set_annotation(IMAGE_TRIGGER_ANNOTATION, annotation.clone());
            Ok(())
        })
    }
}
