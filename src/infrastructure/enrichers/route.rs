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
use crate::domain::resource::{ResourceCollection, ResourceDocument};
use crate::shared::error::{ManifestError, Result};
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// Creates an OpenShift Route per Service. A no-op outside openshift mode.
/// Route names must be unique; a second Service resolving to an existing
/// route name is a validation error.
pub struct RouteEnricher;

impl Enricher for RouteEnricher {
    fn name(&self) -> &str {
        "kubefab-routes"
    }

    fn create(&self, ctx: &mut PipelineContext, resources: &mut ResourceCollection) -> Result<()> {
        if !ctx.platform.is_openshift() {
            return Ok(());
        }

        let mut route_names: Vec<String> = resources
            .iter_kind("Route")
            .map(|route| route.name.clone())
            .collect();

        let mut routes = Vec::new();
        for service in resources.iter_kind("Service") {
            if route_names.contains(&service.name) {
                // A user fragment already provides this route.
                if routes
                    .iter()
                    .any(|r: &ResourceDocument| r.name == service.name)
                {
                    return Err(ManifestError::validation(format!(
                        "Duplicate route name '{}': route names must be unique",
                        service.name
                    )));
                }
                debug!(name = %service.name, "route already present, skipping");
                continue;
            }
            route_names.push(service.name.clone());
            routes.push(build_route(service));
        }

        resources.extend(routes);
        Ok(())
    }
}

fn build_route(service: &ResourceDocument) -> ResourceDocument {
    let mut spec = Mapping::new();
    let mut to = Mapping::new();
    to.insert(Value::from("kind"), Value::from("Service"));
    to.insert(Value::from("name"), Value::from(service.name.clone()));
    spec.insert(Value::from("to"), Value::Mapping(to));

    if let Some(port) = first_service_port(service) {
        let mut port_mapping = Mapping::new();
        port_mapping.insert(Value::from("targetPort"), port);
        spec.insert(Value::from("port"), Value::Mapping(port_mapping));
    }

    let mut route = ResourceDocument::new("Route", service.name.clone());
    route.labels = service.labels.clone();
    route.spec = Value::Mapping(spec);
    route
}

fn first_service_port(service: &ResourceDocument) -> Option<Value> {
    service
        .spec
        .get("ports")
        .and_then(Value::as_sequence)
        .and_then(|ports| ports.first())
        .and_then(|port| port.get("port"))
        .cloned()
}
