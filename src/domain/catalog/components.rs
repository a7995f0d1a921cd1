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

//! Every deployable component of the chart, described as data.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
    Pod,
    Job,
}

impl WorkloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "Deployment",
            WorkloadKind::StatefulSet => "StatefulSet",
            WorkloadKind::Pod => "Pod",
            WorkloadKind::Job => "Job",
        }
    }
}

/// One container image a component runs, and where its declaration lives
/// under the component's values section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSlot {
    pub container: &'static str,
    pub values_key: &'static str,
    pub repository: &'static str,
    /// Pinned tag for third-party images. `None` follows the global tag / app version.
    pub tag: Option<&'static str>,
}

impl ImageSlot {
    pub const fn main(container: &'static str, repository: &'static str) -> Self {
        Self {
            container,
            values_key: "image",
            repository,
            tag: None,
        }
    }

    pub const fn pinned(container: &'static str, repository: &'static str, tag: &'static str) -> Self {
        Self {
            container,
            values_key: "image",
            repository,
            tag: Some(tag),
        }
    }

    pub const fn helper(
        container: &'static str,
        values_key: &'static str,
        repository: &'static str,
        tag: &'static str,
    ) -> Self {
        Self {
            container,
            values_key,
            repository,
            tag: Some(tag),
        }
    }

    pub fn values_path(&self, section: &str) -> String {
        format!("{}.{}", section, self.values_key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentDescriptor {
    /// Values section, also the key of the `<section>.enabled` flag.
    pub section: &'static str,
    pub resource_name: &'static str,
    pub kind: WorkloadKind,
    pub enabled_by_default: bool,
    pub init_containers: &'static [ImageSlot],
    pub containers: &'static [ImageSlot],
}

impl ComponentDescriptor {
    const fn deployment(
        section: &'static str,
        resource_name: &'static str,
        containers: &'static [ImageSlot],
    ) -> Self {
        Self {
            section,
            resource_name,
            kind: WorkloadKind::Deployment,
            enabled_by_default: true,
            init_containers: &[],
            containers,
        }
    }

    const fn of_kind(mut self, kind: WorkloadKind) -> Self {
        self.kind = kind;
        self
    }

    const fn disabled(mut self) -> Self {
        self.enabled_by_default = false;
        self
    }

    pub fn slots(&self) -> impl Iterator<Item = &ImageSlot> {
        self.init_containers.iter().chain(self.containers.iter())
    }
}

const SERVER: &[ImageSlot] = &[ImageSlot::main("airbyte-server-container", "airbyte/server")];
const WORKER: &[ImageSlot] = &[ImageSlot::main("airbyte-worker-container", "airbyte/worker")];
const WORKLOAD_API_SERVER: &[ImageSlot] = &[ImageSlot::main(
    "airbyte-workload-api-server-container",
    "airbyte/workload-api-server",
)];
const WORKLOAD_LAUNCHER: &[ImageSlot] = &[ImageSlot::main(
    "airbyte-workload-launcher-container",
    "airbyte/workload-launcher",
)];
const CONNECTOR_BUILDER_SERVER: &[ImageSlot] = &[ImageSlot::main(
    "airbyte-connector-builder-server",
    "airbyte/connector-builder-server",
)];
const CRON: &[ImageSlot] = &[ImageSlot::main("airbyte-cron", "airbyte/cron")];
const WEBAPP: &[ImageSlot] = &[ImageSlot::main("airbyte-webapp-container", "airbyte/webapp")];
const TEST_WEBAPP: &[ImageSlot] = &[ImageSlot::pinned("airbyte-webapp-test", "busybox", "latest")];
const BOOTLOADER: &[ImageSlot] = &[ImageSlot::main("airbyte-bootloader-container", "airbyte/bootloader")];
const TEMPORAL: &[ImageSlot] = &[ImageSlot::pinned("airbyte-temporal", "temporalio/auto-setup", "1.23.0")];
const DB: &[ImageSlot] = &[ImageSlot::main("airbyte-db-container", "airbyte/db")];
const MINIO: &[ImageSlot] = &[ImageSlot::pinned(
    "airbyte-minio",
    "minio/minio",
    "RELEASE.2023-11-20T22-40-07Z",
)];
const MINIO_CREATE_BUCKET: &[ImageSlot] = &[ImageSlot::helper(
    "airbyte-minio-mc",
    "mcImage",
    "airbyte/mc",
    "latest",
)];
const KUBECTL: &[ImageSlot] = &[ImageSlot::pinned("airbyte-kubectl", "bitnami/kubectl", "1.28.9")];
const FEATUREFLAG_SERVER: &[ImageSlot] = &[ImageSlot::main(
    "airbyte-featureflag-server-container",
    "airbyte/featureflag-server",
)];
const METRICS: &[ImageSlot] = &[ImageSlot::main("airbyte-metrics-reporter", "airbyte/metrics-reporter")];
const TEMPORAL_UI: &[ImageSlot] = &[ImageSlot::pinned("airbyte-temporal-ui", "temporalio/ui", "2.30.1")];

pub const AIRBYTE_COMPONENTS: &[ComponentDescriptor] = &[
    ComponentDescriptor::deployment("server", "airbyte-server", SERVER),
    ComponentDescriptor::deployment("worker", "airbyte-worker", WORKER),
    ComponentDescriptor::deployment(
        "workload-api-server",
        "airbyte-workload-api-server",
        WORKLOAD_API_SERVER,
    ),
    ComponentDescriptor::deployment(
        "workload-launcher",
        "airbyte-workload-launcher",
        WORKLOAD_LAUNCHER,
    ),
    ComponentDescriptor::deployment(
        "connector-builder-server",
        "airbyte-connector-builder-server",
        CONNECTOR_BUILDER_SERVER,
    ),
    ComponentDescriptor::deployment("cron", "airbyte-cron", CRON),
    ComponentDescriptor::deployment("webapp", "airbyte-webapp", WEBAPP),
    ComponentDescriptor::deployment("testWebapp", "airbyte-webapp-test-connection", TEST_WEBAPP)
        .of_kind(WorkloadKind::Pod),
    ComponentDescriptor::deployment("airbyte-bootloader", "airbyte-airbyte-bootloader", BOOTLOADER)
        .of_kind(WorkloadKind::Pod),
    ComponentDescriptor::deployment("temporal", "airbyte-temporal", TEMPORAL),
    ComponentDescriptor::deployment("postgresql", "airbyte-db", DB).of_kind(WorkloadKind::StatefulSet),
    ComponentDescriptor::deployment("minio", "airbyte-minio", MINIO).of_kind(WorkloadKind::StatefulSet),
    ComponentDescriptor::deployment("minio", "airbyte-minio-create-bucket", MINIO_CREATE_BUCKET)
        .of_kind(WorkloadKind::Job),
    ComponentDescriptor::deployment("kubectl", "airbyte-kubectl-job-runner", KUBECTL)
        .of_kind(WorkloadKind::Job),
    ComponentDescriptor::deployment(
        "featureflag-server",
        "airbyte-featureflag-server",
        FEATUREFLAG_SERVER,
    )
    .disabled(),
    ComponentDescriptor::deployment("metrics", "airbyte-metrics", METRICS).disabled(),
    ComponentDescriptor::deployment("temporal-ui", "airbyte-temporal-ui", TEMPORAL_UI).disabled(),
];
