use std::collections::BTreeSet;

use schemars::Schema;
use serde_json::{Map, Value};

use crate::InstanceId;

/// Everything the schema form engine needs to render the details dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonConfig<'a> {
    pub adapter_name: &'a str,
    pub instance: u32,
    pub schema: &'a Schema,
    pub data: &'a Map<String, Value>,
    /// Last error reported by the form, shown above it.
    pub error: Option<&'a str>,
}

impl<'a> JsonConfig<'a> {
    /// Returns `None` when there is no schema to render.
    pub fn new(
        instance: &'a InstanceId,
        schema: Option<&'a Schema>,
        data: &'a Map<String, Value>,
        error: Option<&'a str>,
    ) -> Option<Self> {
        Some(Self {
            adapter_name: instance.adapter(),
            instance: instance.instance(),
            schema: schema?,
            data,
            error,
        })
    }
}

/// Top level keys whose value differs between `original` and `edited`, sorted.
pub fn changed_keys(original: &Map<String, Value>, edited: &Map<String, Value>) -> Vec<String> {
    original
        .keys()
        .chain(edited.keys())
        .filter(|key| original.get(*key) != edited.get(*key))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
