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

use crate::infrastructure::constants::{api_version_for, CONTROLLER_KINDS};
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::PodSpec;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// A typed, named, labeled/annotated resource manifest. The payload under
/// `spec` is kept opaque; `extra` preserves any other top-level fields of a
/// user fragment (e.g. ConfigMap `data`) so fragments round-trip unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDocument {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub spec: Value,
    pub extra: Mapping,
}

impl ResourceDocument {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            api_version: api_version_for(&kind).to_string(),
            kind,
            name: name.into(),
            namespace: None,
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
            spec: Value::Null,
            extra: Mapping::new(),
        }
    }

    /// Pipeline identity is `(kind, name)`. Uniqueness is not enforced here;
    /// collisions surface only at known validation points.
    pub fn matches(&self, kind: &str, name: &str) -> bool {
        self.kind == kind && self.name == name
    }

    pub fn is_controller(&self) -> bool {
        CONTROLLER_KINDS.contains(&self.kind.as_str())
    }

    pub fn set_label(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.labels.insert(key.into(), value.into());
    }

    pub fn set_annotation(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.annotations.insert(key.into(), value.into());
    }

    /// The embedded pod spec, if this document carries one: controller kinds
    /// hold it at `spec.template.spec`, a Pod holds it directly under `spec`.
    pub fn pod_spec(&self) -> Result<Option<PodSpec>> {
        let node = if self.kind == "Pod" {
            match &self.spec {
                Value::Null => None,
                other => Some(other),
            }
        } else if self.is_controller() {
            self.spec.get("template").and_then(|t| t.get("spec"))
        } else {
            None
        };

        match node {
            Some(value) => Ok(Some(serde_yaml::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    pub fn set_pod_spec(&mut self, pod_spec: &PodSpec) -> Result<()> {
        let value = serde_yaml::to_value(pod_spec)?;
        if self.kind == "Pod" {
            self.spec = value;
            return Ok(());
        }

        if !matches!(self.spec, Value::Mapping(_)) {
            self.spec = Value::Mapping(Mapping::new());
        }
        let spec = self.spec.as_mapping_mut().unwrap();
        let template = spec
            .entry(Value::from("template"))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if !matches!(template, Value::Mapping(_)) {
            *template = Value::Mapping(Mapping::new());
        }
        template
            .as_mapping_mut()
            .unwrap()
            .insert(Value::from("spec"), value);
        Ok(())
    }

    /// Reassembles the full manifest for serialization by the output writer.
    pub fn to_value(&self) -> Value {
        let mut metadata = Mapping::new();
        metadata.insert(Value::from("name"), Value::from(self.name.clone()));
        if let Some(ref namespace) = self.namespace {
            metadata.insert(Value::from("namespace"), Value::from(namespace.clone()));
        }
        if !self.labels.is_empty() {
            metadata.insert(Value::from("labels"), string_map(&self.labels));
        }
        if !self.annotations.is_empty() {
            metadata.insert(Value::from("annotations"), string_map(&self.annotations));
        }

        let mut root = Mapping::new();
        root.insert(
            Value::from("apiVersion"),
            Value::from(self.api_version.clone()),
        );
        root.insert(Value::from("kind"), Value::from(self.kind.clone()));
        root.insert(Value::from("metadata"), Value::Mapping(metadata));
        if !matches!(self.spec, Value::Null) {
            root.insert(Value::from("spec"), self.spec.clone());
        }
        for (key, value) in &self.extra {
            root.insert(key.clone(), value.clone());
        }
        Value::Mapping(root)
    }
}

fn string_map(map: &BTreeMap<String, String>) -> Value {
    let mut out = Mapping::new();
    for (k, v) in map {
        out.insert(Value::from(k.clone()), Value::from(v.clone()));
    }
    Value::Mapping(out)
}
