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

//! Image resolution: normalize a declaration, merge it with the global scope, build the reference.

pub mod declaration;
pub mod merger;
pub mod reference;

pub use self::declaration::{ImageDeclaration, NormalizedImage, StructuredImage};
pub use self::merger::{merge_scopes, ComponentScope, GlobalScope, MergedScope, PullSecret};
pub use self::reference::{build_reference, ResolvedImage};

/// Runs the full pipeline for one image slot.
pub fn resolve_image(global: &GlobalScope, component: &ComponentScope, default_tag: &str) -> String {
    let merged = merge_scopes(global, component, default_tag);
    let image = build_reference(&merged);
    tracing::debug!(repository = %component.image.repository, image = %image, "resolved image");
    image
}
