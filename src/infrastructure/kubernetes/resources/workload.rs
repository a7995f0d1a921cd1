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

use crate::domain::catalog::{ComponentDescriptor, WorkloadKind};
use crate::infrastructure::constants::{RESTART_POLICY_ALWAYS, RESTART_POLICY_NEVER};
use crate::infrastructure::kubernetes::resources::pod::{LabeledResourceBuilder, PodBuilder};
use crate::infrastructure::kubernetes::resources::resource::Resource;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec, StatefulSet, StatefulSetSpec};
use k8s_openapi::api::batch::v1::{Job, JobSpec};
use k8s_openapi::api::core::v1::{Container, Pod, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};

/// A container name paired with its fully resolved image string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerImage {
    pub container: String,
    pub image: String,
}

impl ContainerImage {
    pub fn new(container: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            image: image.into(),
        }
    }

    fn to_container(&self) -> Container {
        Container {
            name: self.container.clone(),
            image: Some(self.image.clone()),
            ..Default::default()
        }
    }
}

pub struct WorkloadBuilder<'a> {
    component: &'a ComponentDescriptor,
    init_images: Vec<ContainerImage>,
    images: Vec<ContainerImage>,
}

impl LabeledResourceBuilder for WorkloadBuilder<'_> {
    fn component_name(&self) -> &str {
        self.component.resource_name
    }
}

impl PodBuilder for WorkloadBuilder<'_> {
    fn build_init_containers(&self) -> Vec<Container> {
        self.init_images.iter().map(ContainerImage::to_container).collect()
    }

    fn build_containers(&self) -> Vec<Container> {
        self.images.iter().map(ContainerImage::to_container).collect()
    }

    fn restart_policy(&self) -> Option<&'static str> {
        match self.component.kind {
            WorkloadKind::Pod | WorkloadKind::Job => Some(RESTART_POLICY_NEVER),
            WorkloadKind::Deployment | WorkloadKind::StatefulSet => Some(RESTART_POLICY_ALWAYS),
        }
    }
}

impl<'a> WorkloadBuilder<'a> {
    pub fn new(
        component: &'a ComponentDescriptor,
        init_images: Vec<ContainerImage>,
        images: Vec<ContainerImage>,
    ) -> Self {
        Self {
            component,
            init_images,
            images,
        }
    }

    pub fn build(&self) -> Resource {
        let metadata = ObjectMeta {
            name: Some(self.component.resource_name.to_string()),
            labels: Some(self.get_labels()),
            ..Default::default()
        };

        match self.component.kind {
            WorkloadKind::Deployment => Resource::Deployment(Deployment {
                metadata,
                spec: Some(DeploymentSpec {
                    replicas: Some(1),
                    selector: self.build_selector(),
                    template: self.build_template(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            WorkloadKind::StatefulSet => Resource::StatefulSet(StatefulSet {
                metadata,
                spec: Some(StatefulSetSpec {
                    replicas: Some(1),
                    service_name: self.component.resource_name.to_string(),
                    selector: self.build_selector(),
                    template: self.build_template(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            WorkloadKind::Pod => Resource::Pod(Pod {
                metadata,
                spec: Some(self.build_pod_spec()),
                ..Default::default()
            }),
            WorkloadKind::Job => Resource::Job(Job {
                metadata,
                spec: Some(JobSpec {
                    template: self.build_template(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
        }
    }

    fn build_selector(&self) -> LabelSelector {
        LabelSelector {
            match_labels: Some(self.get_selector_labels()),
            ..Default::default()
        }
    }

    fn build_template(&self) -> PodTemplateSpec {
        PodTemplateSpec {
            metadata: Some(ObjectMeta {
                labels: Some(self.get_labels()),
                ..Default::default()
            }),
            spec: Some(self.build_pod_spec()),
        }
    }
}
