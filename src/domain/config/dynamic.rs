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

//! `--set key=value` overrides applied on top of the values tree.
//!
//! Keys are dotted paths into the tree, list elements are addressed positionally:
//! `global.imagePullSecrets[1].name=my-secret`.

use crate::domain::config::scope::{expand_image_reference, is_image_field};
use crate::domain::config::values::{type_name, Values};
use crate::shared::error::{ChartError, Result};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::OnceLock;

/// Highest list position a path may address.
pub const MAX_LIST_INDEX: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

fn indexed_segment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^\[\]]+)((?:\[\d+\])+)$").expect("valid regex"))
}

fn index_part() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[(\d+)\]").expect("valid regex"))
}

pub fn parse_path(path: &str) -> Result<Vec<PathSegment>> {
    let mut segments = Vec::new();

    for part in path.split('.') {
        if part.is_empty() {
            return Err(ChartError::invalid_override(path, "empty path segment"));
        }

        if !part.contains('[') && !part.contains(']') {
            segments.push(PathSegment::Key(part.to_string()));
            continue;
        }

        let caps = indexed_segment()
            .captures(part)
            .ok_or_else(|| ChartError::invalid_override(path, format!("bad segment '{}'", part)))?;
        segments.push(PathSegment::Key(caps[1].to_string()));

        for index in index_part().captures_iter(&caps[2]) {
            let index = index[1]
                .parse::<usize>()
                .map_err(|e| ChartError::invalid_override(path, e.to_string()))?;
            if index > MAX_LIST_INDEX {
                return Err(ChartError::invalid_override(
                    path,
                    format!("list index {} exceeds {}", index, MAX_LIST_INDEX),
                ));
            }
            segments.push(PathSegment::Index(index));
        }
    }

    Ok(segments)
}

/// Splits `key=value` expressions. The value may itself contain `=`.
pub fn parse_set_expressions(expressions: &[String]) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::with_capacity(expressions.len());

    for expression in expressions {
        let (key, value) = expression
            .split_once('=')
            .ok_or_else(|| ChartError::invalid_override(expression, "expected 'key=value'"))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(ChartError::invalid_override(expression, "empty key"));
        }

        pairs.push((key.to_string(), value.trim().to_string()));
    }

    Ok(pairs)
}

pub fn apply_set_expressions(values: &mut Values, expressions: &[String]) -> Result<()> {
    for (key, raw) in parse_set_expressions(expressions)? {
        tracing::debug!(key = %key, value = %raw, "applying value override");
        values.set(&key, coerce_scalar(&raw))?;
    }
    Ok(())
}

/// `true`/`false` and plain integers become typed scalars, everything else stays a string.
pub fn coerce_scalar(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => match raw.parse::<i64>() {
            Ok(n) if !(raw.starts_with('0') && raw.len() > 1) && !raw.starts_with('+') => {
                Value::Number(n.into())
            }
            _ => Value::String(raw.to_string()),
        },
    }
}

/// Writes `value` at `path`, creating mappings and growing lists as needed.
///
/// A string image in the way is expanded into its mapping form when one of its
/// fields is set, so `server.image.tag` keeps the repository of `server.image=repo:tag`.
/// Any other scalar in the way is an error.
pub fn set_path(node: &mut Value, path: &str, value: Value) -> Result<()> {
    let segments = parse_path(path)?;
    set_segments(node, path, &segments, value)
}

fn set_segments(
    node: &mut Value,
    path: &str,
    segments: &[PathSegment],
    value: Value,
) -> Result<()> {
    let Some((head, rest)) = segments.split_first() else {
        *node = value;
        return Ok(());
    };

    match head {
        PathSegment::Key(key) => {
            if node.is_null() {
                *node = Value::Mapping(Mapping::new());
            } else if let Value::String(reference) = node {
                if is_image_field(key) {
                    let expanded = expand_image_reference(reference);
                    *node = expanded;
                }
            }

            match node {
                Value::Mapping(map) => {
                    let child = map
                        .entry(Value::String(key.clone()))
                        .or_insert(Value::Null);
                    set_segments(child, path, rest, value)
                }
                other => Err(ChartError::invalid_override(
                    path,
                    format!("cannot set '{}' inside a {} value", key, type_name(other)),
                )),
            }
        }
        PathSegment::Index(index) => {
            if node.is_null() {
                *node = Value::Sequence(Vec::new());
            }

            match node {
                Value::Sequence(items) => {
                    let len = index
                        .checked_add(1)
                        .filter(|len| *len <= MAX_LIST_INDEX + 1)
                        .ok_or_else(|| {
                            ChartError::invalid_override(path, "list index out of range")
                        })?;
                    if items.len() < len {
                        items.resize(len, Value::Null);
                    }
                    set_segments(&mut items[*index], path, rest, value)
                }
                other => Err(ChartError::invalid_override(
                    path,
                    format!("cannot index into a {} value", type_name(other)),
                )),
            }
        }
    }
}
