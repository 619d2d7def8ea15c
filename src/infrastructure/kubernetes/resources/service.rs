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

use crate::domain::resource::ResourceDocument;
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::{ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use std::collections::BTreeMap;

/// Builds a default Service exposing the given ports, selecting pods by the
/// shared app labels.
pub struct ServiceBuilder {
    name: String,
    labels: BTreeMap<String, String>,
    ports: Vec<i32>,
    service_type: Option<String>,
}

impl ServiceBuilder {
    pub fn new(name: impl Into<String>, ports: Vec<i32>) -> Self {
        Self {
            name: name.into(),
            labels: BTreeMap::new(),
            ports,
            service_type: None,
        }
    }

    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_service_type(mut self, service_type: Option<String>) -> Self {
        self.service_type = service_type;
        self
    }

    pub fn build(&self) -> Result<ResourceDocument> {
        let ports: Vec<ServicePort> = self
            .ports
            .iter()
            .map(|port| ServicePort {
                port: *port,
                target_port: Some(IntOrString::Int(*port)),
                protocol: Some("TCP".to_string()),
                ..Default::default()
            })
            .collect();

        let spec = ServiceSpec {
            selector: Some(self.labels.clone()),
            ports: Some(ports),
            type_: self.service_type.clone(),
            ..Default::default()
        };

        let mut document = ResourceDocument::new("Service", self.name.clone());
        document.labels = self.labels.clone();
        document.spec = serde_yaml::to_value(spec)?;
        Ok(document)
    }
}
