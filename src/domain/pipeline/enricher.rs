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
use crate::domain::resource::ResourceCollection;
use crate::shared::error::Result;

/// A pluggable unit of pipeline logic. The create step may add missing
/// default resources; the enrich step mutates or annotates existing ones.
/// Enrichers observe the collection exactly as left by the enrichers that
/// ran before them; there is no isolation between steps.
pub trait Enricher {
    fn name(&self) -> &str;

    /// Create phase: add default resources for kinds not yet present. Must
    /// not mutate identity fields of existing documents.
    fn create(&self, _ctx: &mut PipelineContext, _resources: &mut ResourceCollection) -> Result<()> {
        Ok(())
    }

    /// Enrich phase: mutate or annotate existing documents, including ones
    /// created earlier in the same run. Must not add controller-kind
    /// documents; that is the create phase's job.
    fn enrich(&self, _ctx: &mut PipelineContext, _resources: &mut ResourceCollection) -> Result<()> {
        Ok(())
    }
}
