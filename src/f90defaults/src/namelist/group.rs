// f90defaults/src/namelist/group.rs

//! Ordered namelist and group containers.

use super::value::NamelistValue;
use linked_hash_map::LinkedHashMap;
use std::fmt;

/// A namelist file: groups in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namelist {
    groups: LinkedHashMap<String, NamelistGroup>,
}

impl Namelist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a group and return a mutable reference to it. An existing
    /// group of the same name is kept and returned.
    pub fn insert_group(&mut self, name: &str) -> &mut NamelistGroup {
        self.groups
            .entry(name.to_lowercase())
            .or_insert_with(NamelistGroup::new)
    }

    /// Get a group by name (case-insensitive).
    pub fn get_group(&self, name: &str) -> Option<&NamelistGroup> {
        self.groups.get(&name.to_lowercase())
    }

    /// Get all group names in order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Iterate over groups in order.
    pub fn groups(&self) -> impl Iterator<Item = (&String, &NamelistGroup)> {
        self.groups.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }
}

impl fmt::Display for Namelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, group) in self.groups() {
            writeln!(f, "&{name}")?;
            for (var, value) in group.variables() {
                writeln!(f, "  {var} = {value}")?;
            }
            writeln!(f, "/")?;
        }
        Ok(())
    }
}

/// A single namelist group: variables in assignment order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamelistGroup {
    variables: LinkedHashMap<String, NamelistValue>,
}

impl NamelistGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a variable, keeping its first position.
    pub fn insert(&mut self, name: &str, value: NamelistValue) -> &mut Self {
        let name = name.to_lowercase();
        match self.variables.get_mut(&name) {
            Some(slot) => *slot = value,
            None => {
                self.variables.insert(name, value);
            }
        }
        self
    }

    /// Get a variable by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&NamelistValue> {
        self.variables.get(&name.to_lowercase())
    }

    /// Iterate over variables in order.
    pub fn variables(&self) -> impl Iterator<Item = (&String, &NamelistValue)> {
        self.variables.iter()
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }
}
