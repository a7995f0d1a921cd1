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

use crate::domain::catalog::{Catalog, ComponentDescriptor, ImageSlot};
use crate::domain::chart::exporter::{export_indirect_images, launcher_env};
use crate::domain::config::{component_scope, global_scope, Values};
use crate::domain::image::{resolve_image, ComponentScope, GlobalScope, ImageDeclaration};
use crate::infrastructure::constants::{
    DEFAULT_APP_VERSION, ENV_CONFIG_MAP_NAME, ENV_KEY_IMAGE_SUFFIX, VALUES_ENABLED,
};
use crate::infrastructure::kubernetes::resources::{
    propagate_pull_secrets, ContainerImage, EnvConfigMapBuilder, Resource, WorkloadBuilder,
};
use crate::shared::error::{ChartError, Result};
use k8s_openapi::api::core::v1::{ConfigMap, PodSpec};
use std::collections::BTreeMap;
use tracing::info;

/// Turns a values tree into manifests. Chart defaults from the catalog sit
/// underneath whatever values the caller supplies.
pub struct ChartRenderer {
    values: Values,
    app_version: String,
    catalog: Catalog,
}

impl ChartRenderer {
    pub fn new(values: Values) -> Self {
        Self {
            values,
            app_version: DEFAULT_APP_VERSION.to_string(),
            catalog: Catalog::airbyte(),
        }
    }

    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        self.app_version = app_version.into();
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// User values layered over chart defaults.
    pub fn effective_values(&self) -> Result<Values> {
        let mut effective = self.catalog.chart_defaults()?;
        effective.merge(self.values.clone());
        Ok(effective)
    }

    pub fn render(&self) -> Result<RenderedChart> {
        let values = self.effective_values()?;
        let global = global_scope(&values);

        let mut resources: Vec<Resource> = self
            .catalog
            .components
            .iter()
            .filter(|component| is_enabled(&values, component))
            .map(|component| self.render_component(&values, &global, component))
            .collect();

        propagate_pull_secrets(&mut resources, &global.pull_secrets);

        let entries = export_indirect_images(
            &values,
            &global,
            &self.app_version,
            self.catalog.indirect_images,
        );
        let env = EnvConfigMapBuilder::new(ENV_CONFIG_MAP_NAME)
            .with_entries(launcher_env(&entries, &global, &self.app_version))
            .build();
        resources.push(Resource::ConfigMap(env));

        info!(
            resources = resources.len(),
            registry = global.registry.as_deref().unwrap_or("<none>"),
            tag = global.tag.as_deref().unwrap_or(&self.app_version),
            "rendered chart"
        );

        Ok(RenderedChart { resources })
    }

    fn render_component(
        &self,
        values: &Values,
        global: &GlobalScope,
        component: &ComponentDescriptor,
    ) -> Resource {
        let resolve = |slots: &[ImageSlot]| -> Vec<ContainerImage> {
            slots
                .iter()
                .map(|slot| {
                    let scope = component_scope(values, &slot.values_path(component.section))
                        .unwrap_or_else(|| {
                            ComponentScope::new(
                                ImageDeclaration::structured(slot.repository, slot.tag).normalize(),
                            )
                        });
                    ContainerImage::new(
                        slot.container,
                        resolve_image(global, &scope, &self.app_version),
                    )
                })
                .collect()
        };

        WorkloadBuilder::new(
            component,
            resolve(component.init_containers),
            resolve(component.containers),
        )
        .build()
    }
}

fn is_enabled(values: &Values, component: &ComponentDescriptor) -> bool {
    values
        .get_bool(&format!("{}.{}", component.section, VALUES_ENABLED))
        .unwrap_or(component.enabled_by_default)
}

/// Where a resolved image ended up in the rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    InitContainer { resource: String, container: String },
    Container { resource: String, container: String },
    EnvEntry { config_map: String, key: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUsage {
    pub source: ImageSource,
    pub image: String,
}

#[derive(Debug, Clone)]
pub struct RenderedChart {
    resources: Vec<Resource>,
}

impl RenderedChart {
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn pod_specs(&self) -> impl Iterator<Item = (&str, &PodSpec)> {
        self.resources
            .iter()
            .filter_map(|r| Some((r.name().unwrap_or_default(), r.pod_spec()?)))
    }

    /// Images of every init container and container of every pod spec.
    pub fn find_all_images(&self) -> Vec<String> {
        let mut images = Vec::new();
        for (_, spec) in self.pod_specs() {
            for container in spec.init_containers.iter().flatten() {
                images.extend(container.image.clone());
            }
            for container in &spec.containers {
                images.extend(container.image.clone());
            }
        }
        images
    }

    pub fn config_map(&self, name: &str) -> Option<&ConfigMap> {
        self.resources
            .iter()
            .filter_map(Resource::as_config_map)
            .find(|cm| cm.metadata.name.as_deref() == Some(name))
    }

    pub fn config_map_data(&self, name: &str) -> Result<&BTreeMap<String, String>> {
        self.config_map(name)
            .and_then(|cm| cm.data.as_ref())
            .ok_or_else(|| ChartError::not_found("ConfigMap", name))
    }

    pub fn image_usages(&self) -> Vec<ImageUsage> {
        let mut usages = Vec::new();

        for (resource, spec) in self.pod_specs() {
            for container in spec.init_containers.iter().flatten() {
                usages.push(ImageUsage {
                    source: ImageSource::InitContainer {
                        resource: resource.to_string(),
                        container: container.name.clone(),
                    },
                    image: container.image.clone().unwrap_or_default(),
                });
            }
            for container in &spec.containers {
                usages.push(ImageUsage {
                    source: ImageSource::Container {
                        resource: resource.to_string(),
                        container: container.name.clone(),
                    },
                    image: container.image.clone().unwrap_or_default(),
                });
            }
        }

        for config_map in self.resources.iter().filter_map(Resource::as_config_map) {
            let name = config_map.metadata.name.clone().unwrap_or_default();
            for (key, value) in config_map.data.iter().flatten() {
                if key.ends_with(ENV_KEY_IMAGE_SUFFIX) {
                    usages.push(ImageUsage {
                        source: ImageSource::EnvEntry {
                            config_map: name.clone(),
                            key: key.clone(),
                        },
                        image: value.clone(),
                    });
                }
            }
        }

        usages
    }

    pub fn to_yaml(&self) -> Result<String> {
        let mut output = String::new();
        for resource in &self.resources {
            output.push_str("---\n");
            output.push_str(&serde_yaml::to_string(resource)?);
        }
        Ok(output)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.resources)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{IndirectImage, WorkloadKind};

    const INIT: &[ImageSlot] = &[ImageSlot::helper("wait-for-db", "waitImage", "busybox", "1.36")];
    const MAIN: &[ImageSlot] = &[ImageSlot::main("api", "acme/api")];
    const COMPONENTS: &[ComponentDescriptor] = &[ComponentDescriptor {
        section: "api",
        resource_name: "acme-api",
        kind: WorkloadKind::Deployment,
        enabled_by_default: true,
        init_containers: INIT,
        containers: MAIN,
    }];
    const INDIRECT: &[IndirectImage] = &[IndirectImage {
        env_key: "SIDECAR_IMAGE",
        values_path: "api.sidecar.image",
        repository: "acme/sidecar",
        tag: None,
    }];

    fn custom_catalog() -> Catalog {
        Catalog {
            components: COMPONENTS,
            indirect_images: INDIRECT,
        }
    }

    #[test]
    fn test_custom_catalog_is_data_only() {
        let chart = ChartRenderer::new(Values::new())
            .with_catalog(custom_catalog())
            .with_app_version("0.9.0")
            .render()
            .unwrap();

        assert_eq!(chart.find_all_images(), vec!["busybox:1.36", "acme/api:0.9.0"]);
        assert_eq!(
            chart.config_map_data(ENV_CONFIG_MAP_NAME).unwrap()["SIDECAR_IMAGE"],
            "acme/sidecar:0.9.0"
        );
    }

    #[test]
    fn test_disabled_component_is_not_rendered() {
        let mut values = Values::new();
        values.set("api.enabled", serde_yaml::Value::Bool(false)).unwrap();

        let chart = ChartRenderer::new(values)
            .with_catalog(custom_catalog())
            .render()
            .unwrap();
        assert!(chart.find_all_images().is_empty());
        assert_eq!(chart.resources().len(), 1);
        assert!(chart.config_map(ENV_CONFIG_MAP_NAME).is_some());
    }

    #[test]
    fn test_image_usages_cover_all_sources() {
        let chart = ChartRenderer::new(Values::new())
            .with_catalog(custom_catalog())
            .render()
            .unwrap();
        let usages = chart.image_usages();

        assert!(matches!(usages[0].source, ImageSource::InitContainer { .. }));
        assert!(matches!(usages[1].source, ImageSource::Container { .. }));
        assert!(matches!(usages[2].source, ImageSource::EnvEntry { .. }));
        assert_eq!(usages.len(), 3);
    }

    #[test]
    fn test_missing_config_map_is_not_found() {
        let chart = ChartRenderer::new(Values::new())
            .with_catalog(custom_catalog())
            .render()
            .unwrap();
        assert!(matches!(
            chart.config_map_data("nope"),
            Err(ChartError::NotFound { .. })
        ));
    }

    #[test]
    fn test_yaml_output_has_kinds() {
        let chart = ChartRenderer::new(Values::new())
            .with_catalog(custom_catalog())
            .render()
            .unwrap();
        let yaml = chart.to_yaml().unwrap();
        assert!(yaml.contains("kind: Deployment"));
        assert!(yaml.contains("kind: ConfigMap"));
        assert!(yaml.contains("acme/api:dev"));
        assert_eq!(yaml.matches("---\n").count(), 2);
    }
}
