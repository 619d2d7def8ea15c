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
use crate::infrastructure::constants::DEFAULT_PORT_NAMES;
use crate::shared::error::Result;

/// Names unnamed container ports after their well-known protocol (8080 →
/// http, 9779 → prometheus, ...). Ports with no known name stay unnamed.
pub struct PortNameEnricher;

impl Enricher for PortNameEnricher {
    fn name(&self) -> &str {
        "kubefab-port-names"
    }

    fn enrich(&self, _ctx: &mut PipelineContext, resources: &mut ResourceCollection) -> Result<()> {
        resources.visit_pod_specs(|pod_spec| {
            for container in &mut pod_spec.containers {
                if let Some(ref mut ports) = container.ports {
                    for port in ports {
                        if port.name.is_none() {
                            port.name = default_port_name(port.container_port);
                        }
                    }
                }
            }
            Ok(())
        })
    }
}

fn default_port_name(port: i32) -> Option<String> {
    DEFAULT_PORT_NAMES
        .iter()
        .find(|(number, _)| *number == port)
        .map(|(_, name)| name.to_string())
}
