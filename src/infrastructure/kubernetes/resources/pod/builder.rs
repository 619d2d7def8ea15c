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
use k8s_openapi::api::core::v1::{Container, ContainerPort, EnvVar, PodSpec};

/// Synthesizes the generated pod spec from the build's image metadata: one
/// container per image, in image order.
pub fn build_pod_spec(images: &[ImageConfiguration], image_pull_policy: &str) -> PodSpec {
    PodSpec {
        containers: images
            .iter()
            .map(|image| build_container(image, image_pull_policy))
            .collect(),
        ..Default::default()
    }
}

pub fn build_container(image: &ImageConfiguration, image_pull_policy: &str) -> Container {
    let env: Vec<EnvVar> = image
        .env
        .iter()
        .map(|(name, value)| EnvVar {
            name: name.clone(),
            value: Some(value.clone()),
            ..Default::default()
        })
        .collect();

    let ports: Vec<ContainerPort> = image
        .ports
        .iter()
        .map(|port| ContainerPort {
            container_port: *port,
            ..Default::default()
        })
        .collect();

    Container {
        name: image.container_name(),
        image: Some(image.full_name()),
        image_pull_policy: Some(image_pull_policy.to_string()),
        env: if env.is_empty() { None } else { Some(env) },
        ports: if ports.is_empty() { None } else { Some(ports) },
        ..Default::default()
    }
}
