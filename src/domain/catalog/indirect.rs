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

//! Images the workload launcher starts on demand. They are never a container
//! of a rendered workload; they reach the launcher through the env ConfigMap.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndirectImage {
    pub env_key: &'static str,
    pub values_path: &'static str,
    pub repository: &'static str,
    pub tag: Option<&'static str>,
}

pub const AIRBYTE_INDIRECT_IMAGES: &[IndirectImage] = &[
    IndirectImage {
        env_key: "JOB_KUBE_BUSYBOX_IMAGE",
        values_path: "global.jobs.kube.images.busybox",
        repository: "busybox",
        tag: Some("1.35"),
    },
    IndirectImage {
        env_key: "JOB_KUBE_CURL_IMAGE",
        values_path: "global.jobs.kube.images.curl",
        repository: "curlimages/curl",
        tag: Some("7.83.1"),
    },
    IndirectImage {
        env_key: "CONTAINER_ORCHESTRATOR_IMAGE",
        values_path: "workload-launcher.containerOrchestrator.image",
        repository: "airbyte/container-orchestrator",
        tag: None,
    },
    IndirectImage {
        env_key: "CONNECTOR_SIDECAR_IMAGE",
        values_path: "workload-launcher.connectorSidecar.image",
        repository: "airbyte/connector-sidecar",
        tag: None,
    },
    IndirectImage {
        env_key: "WORKLOAD_INIT_IMAGE",
        values_path: "workload-launcher.workloadInit.image",
        repository: "airbyte/workload-init-container",
        tag: None,
    },
];
