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

/// Chart identity
pub const RELEASE_NAME: &str = "airbyte";

/// Tag used when neither a component nor the global scope supplies one
pub const DEFAULT_APP_VERSION: &str = "dev";

/// Values tree keys
pub const VALUES_GLOBAL: &str = "global";
pub const VALUES_GLOBAL_REGISTRY: &str = "global.image.registry";
pub const VALUES_GLOBAL_TAG: &str = "global.image.tag";
pub const VALUES_GLOBAL_PULL_SECRETS: &str = "global.imagePullSecrets";
pub const VALUES_ENABLED: &str = "enabled";
pub const VALUES_TAG: &str = "tag";
pub const VALUES_REPOSITORY: &str = "repository";
pub const VALUES_REGISTRY: &str = "registry";

/// Shared env ConfigMap
pub const ENV_CONFIG_MAP_NAME: &str = "airbyte-airbyte-env";
pub const ENV_KEY_IMAGE_SUFFIX: &str = "_IMAGE";
pub const ENV_KEY_AIRBYTE_VERSION: &str = "AIRBYTE_VERSION";
pub const ENV_KEY_PULL_SECRET: &str = "JOB_KUBE_MAIN_CONTAINER_IMAGE_PULL_SECRET";

/// Resource labels
pub const LABEL_NAME: &str = "app.kubernetes.io/name";
pub const LABEL_INSTANCE: &str = "app.kubernetes.io/instance";
pub const LABEL_MANAGED_BY: &str = "app.kubernetes.io/managed-by";
pub const LABEL_MANAGED_BY_VALUE: &str = "airbyte-kube";

/// Restart policies
pub const RESTART_POLICY_ALWAYS: &str = "Always";
pub const RESTART_POLICY_NEVER: &str = "Never";
