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

use crate::infrastructure::constants::{
    LABEL_INSTANCE, LABEL_MANAGED_BY, LABEL_MANAGED_BY_VALUE, LABEL_NAME, RELEASE_NAME,
};
use k8s_openapi::api::core::v1::{Container, PodSpec};
use std::collections::BTreeMap;

pub trait LabeledResourceBuilder {
    fn component_name(&self) -> &str;

    fn get_labels(&self) -> BTreeMap<String, String> {
        let mut labels = self.get_selector_labels();
        labels.insert(
            LABEL_MANAGED_BY.to_string(),
            LABEL_MANAGED_BY_VALUE.to_string(),
        );
        labels
    }

    fn get_selector_labels(&self) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::new();
        labels.insert(LABEL_NAME.to_string(), self.component_name().to_string());
        labels.insert(LABEL_INSTANCE.to_string(), RELEASE_NAME.to_string());
        labels
    }
}

pub trait PodBuilder: LabeledResourceBuilder {
    fn build_init_containers(&self) -> Vec<Container>;

    fn build_containers(&self) -> Vec<Container>;

    fn restart_policy(&self) -> Option<&'static str> {
        None
    }

    fn build_pod_spec(&self) -> PodSpec {
        let init_containers = self.build_init_containers();
        PodSpec {
            init_containers: (!init_containers.is_empty()).then_some(init_containers),
            containers: self.build_containers(),
            restart_policy: self.restart_policy().map(str::to_string),
            ..Default::default()
        }
    }
}
