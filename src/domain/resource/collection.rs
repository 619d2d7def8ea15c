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

use crate::domain::resource::document::ResourceDocument;
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::PodSpec;

/// An ordered sequence of resource documents. Insertion order is significant:
/// it drives output rendering and first-match visitor semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceCollection {
    items: Vec<ResourceDocument>,
}

impl ResourceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, document: ResourceDocument) {
        self.items.push(document);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceDocument> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ResourceDocument> {
        self.items.iter_mut()
    }

    /// Removes the first document matching `(kind, name)` and returns it.
    pub fn remove(&mut self, kind: &str, name: &str) -> Option<ResourceDocument> {
        let index = self.items.iter().position(|d| d.matches(kind, name))?;
        Some(self.items.remove(index))
    }

    pub fn first_of_kind(&self, kind: &str) -> Option<&ResourceDocument> {
        self.items.iter().find(|d| d.kind == kind)
    }

    pub fn iter_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ResourceDocument> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    /// True iff at least one document's kind is in `kinds`. Used by create
    /// steps to avoid inserting a default resource twice.
    pub fn has_kind(&self, kinds: &[&str]) -> bool {
        self.items.iter().any(|d| kinds.contains(&d.kind.as_str()))
    }

    /// Visits every document whose kind is in `kinds`, in document order.
    pub fn visit_documents_mut<F>(&mut self, kinds: &[&str], mut visitor: F) -> Result<()>
    where
        F: FnMut(&mut ResourceDocument) -> Result<()>,
    {
        for document in &mut self.items {
            if kinds.contains(&document.kind.as_str()) {
                visitor(document)?;
            }
        }
        Ok(())
    }

    /// Visits every embedded pod spec (controller pod templates and bare
    /// Pods) in document order. Mutations made by the visitor are written
    /// back into the owning document.
    pub fn visit_pod_specs<F>(&mut self, mut visitor: F) -> Result<()>
    where
        F: FnMut(&mut PodSpec) -> Result<()>,
    {
        for document in &mut self.items {
            if let Some(mut pod_spec) = document.pod_spec()? {
                visitor(&mut pod_spec)?;
                document.set_pod_spec(&pod_spec)?;
            }
        }
        Ok(())
    }
}

impl IntoIterator for ResourceCollection {
    type Item = ResourceDocument;
    type IntoIter = std::vec::IntoIter<ResourceDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl Extend<ResourceDocument> for ResourceCollection {
    fn extend<T: IntoIterator<Item = ResourceDocument>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}
