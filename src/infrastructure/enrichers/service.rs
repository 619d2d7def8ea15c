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
use crate::infrastructure::enrichers::controller::app_labels;
use crate::infrastructure::kubernetes::resources::ServiceBuilder;
use crate::shared::error::Result;
use tracing::debug;

/// Adds a default Service for the ports exposed by the configured images
/// when no Service is present yet.
pub struct ServiceEnricher;

const SCOPE: &str = "service";

impl Enricher for ServiceEnricher {
    fn name(&self) -> &str {
        "kubefab-service"
    }

    fn create(&self, ctx: &mut PipelineContext, resources: &mut ResourceCollection) -> Result<()> {
        if resources.has_kind(&["Service"]) {
            return Ok(());
        }

        let mut ports: Vec<i32> = Vec::new();
        for image in &ctx.images {
            for port in &image.ports {
                if !ports.contains(port) {
                    ports.push(*port);
                }
            }
        }
        if ports.is_empty() {
            debug!("no exposed ports, skipping default service");
            return Ok(());
        }

        let name = ctx.config.resolve_or(SCOPE, "name", &ctx.app_name);
        let service_type = ctx.config.resolve(SCOPE, "type");

        let document = ServiceBuilder::new(name, ports)
            .with_labels(app_labels(&ctx.app_name))
            .with_service_type(service_type)
            .build()?;
        debug!(name = %document.name, "created default service");
        resources.push(document);
        Ok(())
    }
}
