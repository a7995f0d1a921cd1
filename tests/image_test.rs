// Copyright 2025 JiangLong.
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

use airbyte_kube::domain::config::apply_set_expressions;
use airbyte_kube::*;
use std::collections::BTreeMap;

const ENV_CONFIG_MAP: &str = "airbyte-airbyte-env";

mod test_utils {
    use super::*;

    pub fn render(sets: &[(&str, &str)]) -> RenderedChart {
        let expressions: Vec<String> = sets.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        let mut values = Values::new();
        apply_set_expressions(&mut values, &expressions).expect("valid overrides");
        ChartRenderer::new(values).render().expect("chart renders")
    }

    pub fn enable_all_images(sets: &mut Vec<(&str, &str)>) {
        sets.push(("metrics.enabled", "true"));
        sets.push(("featureflag-server.enabled", "true"));
        sets.push(("temporal-ui.enabled", "true"));
    }

    pub fn all_images_enabled() -> Vec<(&'static str, &'static str)> {
        let mut sets = Vec::new();
        enable_all_images(&mut sets);
        sets
    }

    pub fn assert_elements_match(actual: Vec<String>, expected: &[&str]) {
        let mut actual = actual;
        let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        actual.sort();
        expected.sort();
        assert_eq!(actual, expected);
    }

    pub fn env(chart: &RenderedChart) -> BTreeMap<String, String> {
        chart
            .config_map_data(ENV_CONFIG_MAP)
            .expect("env config map")
            .clone()
    }
}

use test_utils::*;

const DEFAULT_IMAGES: &[&str] = &[
    "airbyte/connector-builder-server:dev",
    "airbyte/cron:dev",
    "bitnami/kubectl:1.28.9",
    "airbyte/server:dev",
    "temporalio/auto-setup:1.23.0",
    "airbyte/webapp:dev",
    "airbyte/worker:dev",
    "airbyte/workload-api-server:dev",
    "airbyte/workload-launcher:dev",
    "airbyte/bootloader:dev",
    "airbyte/mc:latest",
    "busybox:latest",
    "airbyte/db:dev",
    "minio/minio:RELEASE.2023-11-20T22-40-07Z",
];

#[test]
fn test_images_default() {
    let chart = render(&[]);
    assert_elements_match(chart.find_all_images(), DEFAULT_IMAGES);
}

#[test]
fn test_images_default_all_enabled() {
    let chart = render(&all_images_enabled());

    let mut expected = DEFAULT_IMAGES.to_vec();
    expected.extend([
        "airbyte/featureflag-server:dev",
        "airbyte/metrics-reporter:dev",
        "temporalio/ui:2.30.1",
    ]);
    assert_elements_match(chart.find_all_images(), &expected);
}

#[test]
fn test_images_global_tag() {
    let mut sets = all_images_enabled();
    sets.push(("global.image.tag", "test-tag"));
    let chart = render(&sets);

    assert_elements_match(
        chart.find_all_images(),
        &[
            "airbyte/connector-builder-server:test-tag",
            "airbyte/cron:test-tag",
            "bitnami/kubectl:1.28.9",
            "airbyte/server:test-tag",
            "temporalio/auto-setup:1.23.0",
            "airbyte/webapp:test-tag",
            "airbyte/worker:test-tag",
            "airbyte/workload-api-server:test-tag",
            "airbyte/workload-launcher:test-tag",
            "airbyte/bootloader:test-tag",
            "airbyte/mc:latest",
            "busybox:latest",
            "airbyte/db:test-tag",
            "minio/minio:RELEASE.2023-11-20T22-40-07Z",
            "airbyte/featureflag-server:test-tag",
            "airbyte/metrics-reporter:test-tag",
            "temporalio/ui:2.30.1",
        ],
    );

    let env = env(&chart);
    assert_eq!(env["CONTAINER_ORCHESTRATOR_IMAGE"], "airbyte/container-orchestrator:test-tag");
    assert_eq!(env["JOB_KUBE_CURL_IMAGE"], "curlimages/curl:7.83.1");
    assert_eq!(env["AIRBYTE_VERSION"], "test-tag");
}

#[test]
fn test_images_global_registry() {
    let reg = "http://my-registry/";
    let mut sets = all_images_enabled();
    sets.push(("global.image.registry", reg));
    let chart = render(&sets);

    for img in chart.find_all_images() {
        assert!(img.starts_with(reg), "{} does not have the registry prefix", img);
    }

    // Images handed to the workload launcher only show up in the env config map.
    let env = env(&chart);
    for (k, v) in env.iter().filter(|(k, _)| k.ends_with("_IMAGE")) {
        assert!(v.starts_with(reg), "env var {}={:?} does not have the registry prefix", k, v);
    }

    assert_eq!(env["JOB_KUBE_BUSYBOX_IMAGE"], "http://my-registry/busybox:1.35");
    assert_eq!(env["JOB_KUBE_CURL_IMAGE"], "http://my-registry/curlimages/curl:7.83.1");
    assert_eq!(
        env["CONTAINER_ORCHESTRATOR_IMAGE"],
        "http://my-registry/airbyte/container-orchestrator:dev"
    );
    assert_eq!(
        env["CONNECTOR_SIDECAR_IMAGE"],
        "http://my-registry/airbyte/connector-sidecar:dev"
    );
    assert_eq!(
        env["WORKLOAD_INIT_IMAGE"],
        "http://my-registry/airbyte/workload-init-container:dev"
    );
}

#[test]
fn test_images_app_tag() {
    // App image tags take precedence over the global tag.
    let mut sets = all_images_enabled();
    sets.push(("global.image.tag", "global-tag"));

    let tag_keys: Vec<String> = Catalog::airbyte()
        .sections()
        .iter()
        .map(|section| format!("{}.image.tag", section))
        .collect();
    for key in &tag_keys {
        sets.push((key.as_str(), "app-tag"));
    }
    sets.push(("minio.mcImage.tag", "mc-app-tag"));

    let chart = render(&sets);
    assert_elements_match(
        chart.find_all_images(),
        &[
            "airbyte/connector-builder-server:app-tag",
            "airbyte/cron:app-tag",
            "bitnami/kubectl:app-tag",
            "airbyte/server:app-tag",
            "temporalio/auto-setup:app-tag",
            "airbyte/webapp:app-tag",
            "airbyte/worker:app-tag",
            "airbyte/workload-api-server:app-tag",
            "airbyte/workload-launcher:app-tag",
            "airbyte/bootloader:app-tag",
            "airbyte/mc:mc-app-tag",
            "busybox:app-tag",
            "airbyte/db:app-tag",
            "minio/minio:app-tag",
            "airbyte/featureflag-server:app-tag",
            "airbyte/metrics-reporter:app-tag",
            "temporalio/ui:app-tag",
        ],
    );
}

#[test]
fn test_component_tag_wins_in_every_combination() {
    for section in Catalog::airbyte().sections() {
        let key = format!("{}.image.tag", section);
        let mut sets = all_images_enabled();
        sets.push((key.as_str(), "mine"));
        sets.push(("global.image.tag", "global-tag"));

        let chart = render(&sets);
        let component = Catalog::airbyte()
            .components
            .iter()
            .find(|c| c.section == section && c.containers[0].values_key == "image")
            .expect("component with a main image");

        let (_, spec) = chart
            .pod_specs()
            .find(|(name, _)| *name == component.resource_name)
            .expect("rendered component");
        let image = spec.containers[0].image.clone().unwrap_or_default();
        assert!(image.ends_with(":mine"), "{} resolved to {}", section, image);
    }
}

#[test]
fn test_images_pull_secrets() {
    // If global.imagePullSecrets is set, then all pods should use it.
    let mut sets = all_images_enabled();
    sets.push(("global.imagePullSecrets[0].name", "test-img-pull-secret-1"));
    sets.push(("global.imagePullSecrets[1].name", "test-img-pull-secret-2"));
    let chart = render(&sets);

    let mut pods = 0;
    for (name, spec) in chart.pod_specs() {
        let mut secrets: Vec<String> = spec
            .image_pull_secrets
            .iter()
            .flatten()
            .map(|r| r.name.clone())
            .collect();
        secrets.sort();
        assert_eq!(
            secrets,
            vec!["test-img-pull-secret-1", "test-img-pull-secret-2"],
            "{}",
            name
        );
        pods += 1;
    }
    assert_eq!(pods, 17);
}

#[test]
fn test_pull_secrets_independent_of_enabled_components() {
    let chart = render(&[
        ("global.imagePullSecrets[0].name", "only"),
        ("server.enabled", "false"),
        ("worker.enabled", "false"),
    ]);

    assert!(chart.pod_specs().all(|(_, spec)| {
        spec.image_pull_secrets
            .as_ref()
            .is_some_and(|refs| refs.len() == 1 && refs[0].name == "only")
    }));
    assert!(chart.pod_specs().all(|(name, _)| name != "airbyte-server"));
    assert_eq!(env(&chart)["JOB_KUBE_MAIN_CONTAINER_IMAGE_PULL_SECRET"], "only");
}

#[test]
fn test_images_string_images() {
    // String image values go through the same tag and registry rules as mappings.
    let chart = render(&[
        ("global.jobs.kube.images.busybox", "my-busybox"),
        ("global.jobs.kube.images.curl", "my-curl:8.0"),
        ("workload-launcher.containerOrchestrator.image", "my-oc"),
        ("workload-launcher.connectorSidecar.image", "my-cs"),
        ("workload-launcher.workloadInit.image", "my-wi"),
    ]);

    let env = env(&chart);
    assert_eq!(env["JOB_KUBE_BUSYBOX_IMAGE"], "my-busybox:dev");
    assert_eq!(env["JOB_KUBE_CURL_IMAGE"], "my-curl:8.0");
    assert_eq!(env["CONTAINER_ORCHESTRATOR_IMAGE"], "my-oc:dev");
    assert_eq!(env["CONNECTOR_SIDECAR_IMAGE"], "my-cs:dev");
    assert_eq!(env["WORKLOAD_INIT_IMAGE"], "my-wi:dev");
}

#[test]
fn test_string_and_structured_forms_resolve_identically() {
    let string_form = render(&[("server.image", "myrepo:mytag"), ("global.image.tag", "g")]);
    let structured_form = render(&[
        ("server.image.repository", "myrepo"),
        ("server.image.tag", "mytag"),
        ("global.image.tag", "g"),
    ]);

    assert_eq!(string_form.find_all_images(), structured_form.find_all_images());
    assert!(string_form
        .find_all_images()
        .contains(&"myrepo:mytag".to_string()));
}

#[test]
fn test_component_registry_beats_global_registry() {
    let chart = render(&[
        ("global.image.registry", "global.example/"),
        ("webapp.image.registry", "webapp.example/"),
    ]);
    let images = chart.find_all_images();

    assert!(images.contains(&"webapp.example/airbyte/webapp:dev".to_string()));
    assert!(images.contains(&"global.example/airbyte/server:dev".to_string()));
}

#[test]
fn test_app_version_is_the_last_fallback() {
    let chart = ChartRenderer::new(Values::new())
        .with_app_version("1.4.0")
        .render()
        .unwrap();

    assert!(chart
        .find_all_images()
        .contains(&"airbyte/server:1.4.0".to_string()));
    assert_eq!(env(&chart)["WORKLOAD_INIT_IMAGE"], "airbyte/workload-init-container:1.4.0");
    assert_eq!(env(&chart)["AIRBYTE_VERSION"], "1.4.0");
}

#[test]
fn test_tag_override_keeps_string_image_repository() {
    let chart = render(&[
        ("server.image", "myrepo:mytag"),
        ("server.image.tag", "override"),
        ("worker.image", "my-worker"),
        ("worker.image.registry", "registry.example/"),
    ]);
    let images = chart.find_all_images();

    assert!(images.contains(&"myrepo:override".to_string()), "{:?}", images);
    assert!(images.contains(&"registry.example/my-worker:dev".to_string()), "{:?}", images);
    assert!(!images.iter().any(|i| i.starts_with("airbyte/server:")));
    assert!(!images.iter().any(|i| i.starts_with("airbyte/worker:")));
}

#[test]
fn test_non_image_field_under_string_image_is_rejected() {
    let mut values = Values::new();
    let result = apply_set_expressions(
        &mut values,
        &[
            "server.image=myrepo:mytag".to_string(),
            "server.image.pullPolicy=Always".to_string(),
        ],
    );

    assert!(matches!(result, Err(ChartError::InvalidOverride { .. })));
}
