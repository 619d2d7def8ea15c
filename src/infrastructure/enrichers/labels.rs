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
use crate::infrastructure::constants::{LABEL_APP, LABEL_GROUP, LABEL_PROVIDER, LABEL_PROVIDER_VALUE};
use crate::shared::error::Result;
use serde_yaml::{Mapping, Value};

/// Stamps the shared project labels on every document and on embedded pod
/// templates. User-provided labels are never overwritten.
pub struct ProjectLabelEnricher;

const SCOPE: &str = "labels";

impl Enricher for ProjectLabelEnricher {
    fn name(&self) -> &str {
        "kubefab-project-labels"
    }

    fn enrich(&self, ctx: &mut PipelineContext, resources: &mut ResourceCollection) -> Result<()> {
        let group = ctx.config.resolve(SCOPE, "group");

        for document in resources.iter_mut() {
            let mut stamp = |key: &str, value: &str| {
                if !document.labels.contains_key(key) {
                    document.labels.insert(key.to_string(), value.to_string());
                }
            };
            stamp(LABEL_APP, &ctx.app_name);
            stamp(LABEL_PROVIDER, LABEL_PROVIDER_VALUE);
            if let Some(ref group) = group {
                stamp(LABEL_GROUP, group);
            }

            if document.is_controller() {
                stamp_template_labels(document, &ctx.app_name, group.as_deref());
            }
        }
        Ok(())
    }
}

/// Pod template metadata lives inside the opaque spec payload, so the labels
/// are written directly into `spec.template.metadata.labels`.
fn stamp_template_labels(
    document: &mut crate::domain::resource::ResourceDocument,
    app_name: &str,
    group: Option<&str>,
) {
    let spec = match document.spec.as_mapping_mut() {
        Some(spec) => spec,
        None => return,
    };
    let template = spec
        .entry(Value::from("template"))
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    let template = match template.as_mapping_mut() {
        Some(t) => t,
        None => return,
    };
    let metadata = template
        .entry(Value::from("metadata"))
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    let metadata = match metadata.as_mapping_mut() {
        Some(m) => m,
        None => return,
    };
    let labels = metadata
        .entry(Value::from("labels"))
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    let labels = match labels.as_mapping_mut() {
        Some(l) => l,
        None => return,
    };

    let mut stamp = |key: &str, value: &str| {
        let key = Value::from(key);
        if !labels.contains_key(&key) {
            labels.insert(key, Value::from(value));
        }
    };
    stamp(LABEL_APP, app_name);
    stamp(LABEL_PROVIDER, LABEL_PROVIDER_VALUE);
    if let Some(group) = group {
        stamp(LABEL_GROUP, group);
    }
}
