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

use crate::domain::config::ImageConfiguration;
use crate::domain::resource::ResourceDocument;
use crate::infrastructure::constants::{
    DEFAULT_IMAGE_PULL_POLICY, DEFAULT_REPLICAS, RESTART_POLICY_ON_FAILURE,
};
use crate::infrastructure::kubernetes::resources::pod::build_pod_spec;
use crate::shared::error::{ManifestError, Result};
use k8s_openapi::api::apps::v1::{DaemonSetSpec, DeploymentSpec, ReplicaSetSpec, StatefulSetSpec};
use k8s_openapi::api::batch::v1::JobSpec;
use k8s_openapi::api::core::v1::{PodTemplateSpec, ReplicationControllerSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    Deployment,
    ReplicaSet,
    ReplicationController,
    DaemonSet,
    Job,
    StatefulSet,
    DeploymentConfig,
}

impl ControllerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerKind::Deployment => "Deployment",
            ControllerKind::ReplicaSet => "ReplicaSet",
            ControllerKind::ReplicationController => "ReplicationController",
            ControllerKind::DaemonSet => "DaemonSet",
            ControllerKind::Job => "Job",
            ControllerKind::StatefulSet => "StatefulSet",
            ControllerKind::DeploymentConfig => "DeploymentConfig",
        }
    }
}

impl std::str::FromStr for ControllerKind {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "deployment" => Ok(ControllerKind::Deployment),
            "replicaset" => Ok(ControllerKind::ReplicaSet),
            "replicationcontroller" => Ok(ControllerKind::ReplicationController),
            "daemonset" => Ok(ControllerKind::DaemonSet),
            "job" => Ok(ControllerKind::Job),
            "statefulset" => Ok(ControllerKind::StatefulSet),
            "deploymentconfig" => Ok(ControllerKind::DeploymentConfig),
            _ => Err(ManifestError::validation(format!(
                "Unrecognized controller kind: {}",
                s
            ))),
        }
    }
}

/// Builds a default controller resource wrapping the pod spec synthesized
/// from the image list. Consumed by the pipeline's create phase.
pub struct ControllerBuilder<'a> {
    name: String,
    kind: ControllerKind,
    replicas: i32,
    labels: BTreeMap<String, String>,
    image_pull_policy: String,
    images: &'a [ImageConfiguration],
}

impl<'a> ControllerBuilder<'a> {
    pub fn new(name: impl Into<String>, kind: ControllerKind, images: &'a [ImageConfiguration]) -> Self {
        Self {
            name: name.into(),
            kind,
            replicas: DEFAULT_REPLICAS,
            labels: BTreeMap::new(),
            image_pull_policy: DEFAULT_IMAGE_PULL_POLICY.to_string(),
            images,
        }
    }

    pub fn with_replicas(mut self, replicas: i32) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_image_pull_policy(mut self, policy: impl Into<String>) -> Self {
        self.image_pull_policy = policy.into();
        self
    }

    pub fn build(&self) -> Result<ResourceDocument> {
        let mut pod_spec = build_pod_spec(self.images, &self.image_pull_policy);
        if self.kind == ControllerKind::Job {
            pod_spec.restart_policy = Some(RESTART_POLICY_ON_FAILURE.to_string());
        }

        let template = PodTemplateSpec {
            metadata: Some(ObjectMeta {
                labels: Some(self.labels.clone()),
                ..Default::default()
            }),
            spec: Some(pod_spec),
        };

        let selector = LabelSelector {
            match_labels: Some(self.labels.clone()),
            ..Default::default()
        };

        let spec = match self.kind {
            ControllerKind::Deployment => serde_yaml::to_value(DeploymentSpec {
                replicas: Some(self.replicas),
                selector,
                template,
                ..Default::default()
            })?,
            ControllerKind::ReplicaSet => serde_yaml::to_value(ReplicaSetSpec {
                replicas: Some(self.replicas),
                selector,
                template: Some(template),
                ..Default::default()
            })?,
            ControllerKind::DaemonSet => serde_yaml::to_value(DaemonSetSpec {
                selector,
                template,
                ..Default::default()
            })?,
            ControllerKind::StatefulSet => serde_yaml::to_value(StatefulSetSpec {
                replicas: Some(self.replicas),
                selector,
                service_name: self.name.clone(),
                template,
                ..Default::default()
            })?,
            ControllerKind::Job => serde_yaml::to_value(JobSpec {
                template,
                ..Default::default()
            })?,
            ControllerKind::ReplicationController => {
                serde_yaml::to_value(ReplicationControllerSpec {
                    replicas: Some(self.replicas),
                    selector: Some(self.labels.clone()),
                    template: Some(template),
                    ..Default::default()
                })?
            }
            // Not part of k8s-openapi; assembled by hand.
            ControllerKind::DeploymentConfig => {
                let mut spec = Mapping::new();
                spec.insert(Value::from("replicas"), Value::from(self.replicas));
                let mut selector = Mapping::new();
                for (k, v) in &self.labels {
                    selector.insert(Value::from(k.clone()), Value::from(v.clone()));
                }
                spec.insert(Value::from("selector"), Value::Mapping(selector));
                spec.insert(Value::from("template"), serde_yaml::to_value(&template)?);
                Value::Mapping(spec)
            }
        };

        let mut document = ResourceDocument::new(self.kind.as_str(), self.name.clone());
        document.labels = self.labels.clone();
        document.spec = spec;
        Ok(document)
    }
}
