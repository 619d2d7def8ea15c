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
use crate::domain::pipeline::enricher::Enricher;
use crate::domain::resource::ResourceCollection;
use crate::shared::error::Result;
use tracing::debug;

/// Drives the two-phase execution over a mutable resource collection: one
/// CREATE pass then one ENRICH pass, both in the caller-supplied enricher
/// order, strictly sequential. The first error aborts the whole run.
pub struct EnricherPipeline {
    enrichers: Vec<Box<dyn Enricher>>,
}

impl EnricherPipeline {
    pub fn new(enrichers: Vec<Box<dyn Enricher>>) -> Self {
        Self { enrichers }
    }

    pub fn run(&self, ctx: &mut PipelineContext, resources: &mut ResourceCollection) -> Result<()> {
        for enricher in &self.enrichers {
            debug!(enricher = enricher.name(), phase = "create", "running enricher");
            enricher.create(ctx, resources)?;
        }
        for enricher in &self.enrichers {
            debug!(enricher = enricher.name(), phase = "enrich", "running enricher");
            enricher.enrich(ctx, resources)?;
        }
        Ok(())
    }
}
