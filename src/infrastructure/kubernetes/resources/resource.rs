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

use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{ConfigMap, Pod, PodSpec};
use serde::Serialize;

/// A rendered manifest. Serializes as the wrapped object, `apiVersion` and `kind` included.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Resource {
    Deployment(Deployment),
    StatefulSet(StatefulSet),
    Pod(Pod),
    Job(Job),
    ConfigMap(ConfigMap),
}

impl Resource {
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Deployment(_) => "Deployment",
            Resource::StatefulSet(_) => "StatefulSet",
            Resource::Pod(_) => "Pod",
            Resource::Job(_) => "Job",
            Resource::ConfigMap(_) => "ConfigMap",
        }
    }

    pub fn name(&self) -> Option<&str> {
        let metadata = match self {
            Resource::Deployment(r) => &r.metadata,
            Resource::StatefulSet(r) => &r.metadata,
            Resource::Pod(r) => &r.metadata,
            Resource::Job(r) => &r.metadata,
            Resource::ConfigMap(r) => &r.metadata,
        };
        metadata.name.as_deref()
    }

    pub fn pod_spec(&self) -> Option<&PodSpec> {
        match self {
            Resource::Deployment(r) => r.spec.as_ref()?.template.spec.as_ref(),
            Resource::StatefulSet(r) => r.spec.as_ref()?.template.spec.as_ref(),
            Resource::Pod(r) => r.spec.as_ref(),
            Resource::Job(r) => r.spec.as_ref()?.template.spec.as_ref(),
            Resource::ConfigMap(_) => None,
        }
    }

    pub fn pod_spec_mut(&mut self) -> Option<&mut PodSpec> {
        match self {
            Resource::Deployment(r) => r.spec.as_mut()?.template.spec.as_mut(),
            Resource::StatefulSet(r) => r.spec.as_mut()?.template.spec.as_mut(),
            Resource::Pod(r) => r.spec.as_mut(),
            Resource::Job(r) => r.spec.as_mut()?.template.spec.as_mut(),
            Resource::ConfigMap(_) => None,
        }
    }

    pub fn as_config_map(&self) -> Option<&ConfigMap> {
        match self {
            Resource::ConfigMap(cm) => Some(cm),
            _ => None,
        }
    }
}
