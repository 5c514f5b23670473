// f90defaults/src/namelist/yaml.rs

//! Conversion between a namelist and the `values`-wrapped YAML parameter
//! template used by the CIME ParamGen machinery.

use super::group::Namelist;
use super::value::NamelistValue;
use crate::error::Result;
use linked_hash_map::LinkedHashMap;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

/// One template leaf. Keys other than `values` are ignored.
#[derive(Debug, Deserialize)]
struct Leaf {
    values: NamelistValue,
}

type Template = LinkedHashMap<String, LinkedHashMap<String, Leaf>>;

/// Build the template tree: `group -> variable -> {values: leaf}`.
///
/// Arrays are leaves. Character values made only of whitespace become empty
/// strings.
pub fn to_values_tree(namelist: &Namelist) -> Value {
    let mut root = Mapping::new();
    for (group_name, group) in namelist.groups() {
        let mut variables = Mapping::new();
        for (var, value) in group.variables() {
            let mut leaf = Mapping::new();
            leaf.insert(Value::from("values"), leaf_value(value));
            variables.insert(Value::from(var.as_str()), Value::Mapping(leaf));
        }
        root.insert(Value::from(group_name.as_str()), Value::Mapping(variables));
    }
    Value::Mapping(root)
}

/// Render the template tree as a YAML document.
pub fn to_values_yaml(namelist: &Namelist) -> Result<String> {
    Ok(serde_yaml::to_string(&to_values_tree(namelist))?)
}

/// Read a template back into a namelist, keeping group and variable order.
///
/// Leaves must hold plain values. Conditional `values` mappings need case
/// variables to be reduced first and are rejected.
pub fn from_values_yaml(text: &str) -> Result<Namelist> {
    let template: Template = serde_yaml::from_str(text)?;
    let mut namelist = Namelist::new();
    for (group_name, variables) in template {
        let group = namelist.insert_group(&group_name);
        for (var, leaf) in variables {
            group.insert(&var, leaf.values);
        }
    }
    Ok(namelist)
}

fn leaf_value(value: &NamelistValue) -> Value {
    match value {
        NamelistValue::Integer(i) => Value::from(*i),
        NamelistValue::Real(f) => Value::from(*f),
        NamelistValue::Logical(b) => Value::from(*b),
        NamelistValue::Character(s) if s.trim().is_empty() => Value::from(""),
        NamelistValue::Character(s) => Value::from(s.as_str()),
        NamelistValue::Array(values) => Value::Sequence(values.iter().map(leaf_value).collect()),
        NamelistValue::Null => Value::Null,
    }
}
