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

use kubefab::infrastructure::enrichers::default_enrichers;
use kubefab::{
    ConfigResolver, Enricher, EnricherPipeline, HealthCheckConfig, ImageConfiguration,
    PipelineContext, PlatformMode, ResourceCollection, ResourceDocument, Result,
};
use std::collections::HashMap;

mod test_utils {
    use super::*;

    pub fn test_image() -> ImageConfiguration {
        let mut image = ImageConfiguration::new("acme/ping-app:1.0");
        image.ports = vec![8080];
        image.health_check = Some(HealthCheckConfig {
            path: "/health".to_string(),
            port: None,
            scheme: None,
        });
        image
    }

    pub fn test_context(platform: PlatformMode) -> PipelineContext {
        test_context_with_properties(platform, HashMap::new())
    }

    pub fn test_context_with_properties(
        platform: PlatformMode,
        properties: HashMap<String, String>,
    ) -> PipelineContext {
        let resolver = ConfigResolver::new("kubefab.enricher", properties, serde_yaml::Value::Null);
        PipelineContext::new(platform, "my-app", vec![test_image()], resolver)
    }
}

use test_utils::*;

struct DeploymentCreator;

impl Enricher for DeploymentCreator {
    fn name(&self) -> &str {
        "test-deployment-creator"
    }

    fn create(&self, _ctx: &mut PipelineContext, resources: &mut ResourceCollection) -> Result<()> {
        if !resources.has_kind(&["Deployment"]) {
            resources.push(ResourceDocument::new("Deployment", "created"));
        }
        Ok(())
    }
}

struct DeploymentAnnotator;

impl Enricher for DeploymentAnnotator {
    fn name(&self) -> &str {
        "test-deployment-annotator"
    }

    fn enrich(&self, _ctx: &mut PipelineContext, resources: &mut ResourceCollection) -> Result<()> {
        resources.visit_documents_mut(&["Deployment"], |document| {
            document.set_annotation("seen-by", "annotator");
            Ok(())
        })
    }
}

#[test]
fn create_phase_results_are_visible_to_all_enrich_steps() {
    // The annotator sits before the creator in priority order; its enrich
    // step must still observe the created Deployment because the create
    // pass completes first.
    let pipeline = EnricherPipeline::new(vec![
        Box::new(DeploymentAnnotator),
        Box::new(DeploymentCreator),
    ]);

    let mut ctx = test_context(PlatformMode::Kubernetes);
    let mut resources = ResourceCollection::new();
    pipeline.run(&mut ctx, &mut resources).unwrap();

    let deployment = resources.first_of_kind("Deployment").unwrap();
    assert_eq!(
        deployment.annotations.get("seen-by").map(String::as_str),
        Some("annotator")
    );
}

#[test]
fn default_pipeline_generates_controller_service_and_probes() {
    let mut properties = HashMap::new();
    properties.insert(
        "kubefab.enricher.controller.replicas".to_string(),
        "3".to_string(),
    );
    let mut ctx = test_context_with_properties(PlatformMode::Kubernetes, properties);
    let mut resources = ResourceCollection::new();

    EnricherPipeline::new(default_enrichers())
        .run(&mut ctx, &mut resources)
        .unwrap();

    let deployment = resources.first_of_kind("Deployment").unwrap();
    assert_eq!(deployment.name, "my-app");
    assert_eq!(
        deployment.spec.get("replicas").and_then(|v| v.as_i64()),
        Some(3)
    );
    assert_eq!(deployment.labels.get("app").map(String::as_str), Some("my-app"));

    let pod_spec = deployment.pod_spec().unwrap().unwrap();
    let container = &pod_spec.containers[0];
    assert_eq!(container.name, "ping-app");

    // Port name inference and probe synthesis both reached the container
    let port = &container.ports.as_ref().unwrap()[0];
    assert_eq!(port.name.as_deref(), Some("http"));
    let readiness = container.readiness_probe.as_ref().unwrap();
    let http_get = readiness.http_get.as_ref().unwrap();
    assert_eq!(http_get.path.as_deref(), Some("/health"));

    // Shared labels reach the embedded pod template too
    let template_app_label = deployment
        .spec
        .get("template")
        .and_then(|t| t.get("metadata"))
        .and_then(|m| m.get("labels"))
        .and_then(|l| l.get("app"))
        .and_then(|v| v.as_str());
    assert_eq!(template_app_label, Some("my-app"));

    let service = resources.first_of_kind("Service").unwrap();
    assert_eq!(service.name, "my-app");

    // Routes and image triggers are an openshift concern
    assert!(!resources.has_kind(&["Route"]));
    assert!(!deployment
        .annotations
        .contains_key("image.openshift.io/triggers"));
    assert_eq!(
        ctx.instruction("generated-container-names"),
        Some(&["ping-app".to_string()][..])
    );
}

#[test]
fn controller_fragment_is_merged_instead_of_duplicated() {
    let mut ctx = test_context(PlatformMode::Kubernetes);
    let mut resources = ResourceCollection::new();

    let mut fragment = ResourceDocument::new("Deployment", "custom");
    fragment.spec = serde_yaml::from_str(
        "template:\n  spec:\n    containers:\n    - name: my-container\n      args: [--debug]\n",
    )
    .unwrap();
    resources.push(fragment);

    EnricherPipeline::new(default_enrichers())
        .run(&mut ctx, &mut resources)
        .unwrap();

    // Still exactly one controller, the user's
    let deployments: Vec<_> = resources.iter_kind("Deployment").collect();
    assert_eq!(deployments.len(), 1);
    assert_eq!(deployments[0].name, "custom");

    let pod_spec = deployments[0].pod_spec().unwrap().unwrap();
    assert_eq!(pod_spec.containers.len(), 1);
    let container = &pod_spec.containers[0];
    // The explicit fragment name is authoritative; image is inherited
    assert_eq!(container.name, "my-container");
    assert_eq!(container.image.as_deref(), Some("acme/ping-app:1.0"));
    assert_eq!(container.args.as_deref(), Some(&["--debug".to_string()][..]));

    assert_eq!(
        ctx.instruction("generated-container-names"),
        Some(&["my-container".to_string()][..])
    );
}

#[test]
fn existing_service_suppresses_the_default_one() {
    let mut ctx = test_context(PlatformMode::Kubernetes);
    let mut resources = ResourceCollection::new();

    let mut service = ResourceDocument::new("Service", "user-svc");
    service.spec = serde_yaml::from_str("ports:\n- port: 9000\n").unwrap();
    resources.push(service);

    EnricherPipeline::new(default_enrichers())
        .run(&mut ctx, &mut resources)
        .unwrap();

    let services: Vec<_> = resources.iter_kind("Service").collect();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].name, "user-svc");
}

#[test]
fn openshift_mode_creates_deploymentconfig_route_and_triggers() {
    let mut ctx = test_context(PlatformMode::OpenShift);
    let mut resources = ResourceCollection::new();

    EnricherPipeline::new(default_enrichers())
        .run(&mut ctx, &mut resources)
        .unwrap();

    let dc = resources.first_of_kind("DeploymentConfig").unwrap();
    assert_eq!(dc.api_version, "apps.openshift.io/v1");
    assert!(dc
        .annotations
        .contains_key("image.openshift.io/triggers"));

    let route = resources.first_of_kind("Route").unwrap();
    assert_eq!(route.name, "my-app");
    assert_eq!(
        route
            .spec
            .get("to")
            .and_then(|to| to.get("name"))
            .and_then(|v| v.as_str()),
        Some("my-app")
    );
}

#[test]
fn duplicate_service_names_collide_on_route_generation() {
    let mut ctx = test_context(PlatformMode::OpenShift);
    let mut resources = ResourceCollection::new();

    let mut first = ResourceDocument::new("Service", "clash");
    first.spec = serde_yaml::from_str("ports:\n- port: 80\n").unwrap();
    let second = first.clone();
    resources.push(first);
    resources.push(second);

    let err = EnricherPipeline::new(default_enrichers())
        .run(&mut ctx, &mut resources)
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn enricher_errors_abort_the_run() {
    struct Failing;
    impl Enricher for Failing {
        fn name(&self) -> &str {
            "test-failing"
        }
        fn create(&self, _: &mut PipelineContext, _: &mut ResourceCollection) -> Result<()> {
            Err(kubefab::ManifestError::validation("boom"))
        }
    }

    let pipeline = EnricherPipeline::new(vec![Box::new(Failing), Box::new(DeploymentCreator)]);
    let mut ctx = test_context(PlatformMode::Kubernetes);
    let mut resources = ResourceCollection::new();

    assert!(pipeline.run(&mut ctx, &mut resources).is_err());
    // The later enricher never ran
    assert!(resources.is_empty());
}
