// f90defaults/src/table.rs

//! Per-file tables handed from the scanning phase to the resolution phase.

use crate::declaration::Declaration;
use crate::statement::NamelistClause;
use linked_hash_map::LinkedHashMap;

/// Declarations of one file indexed by lowercased name, in declaration
/// order.
#[derive(Debug, Clone, Default)]
pub struct DeclarationTable {
    entries: LinkedHashMap<String, Declaration>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration. If the name is already declared the table is left
    /// unchanged and the existing declaration is returned.
    pub fn insert(&mut self, declaration: Declaration) -> Option<&Declaration> {
        if self.entries.contains_key(&declaration.name) {
            return self.entries.get(&declaration.name);
        }
        self.entries.insert(declaration.name.clone(), declaration);
        None
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.entries.get(&name.to_ascii_lowercase())
    }

    /// Position of `name` in declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.keys().position(|k| k == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Namelist groups of one file with members in statement order.
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    groups: LinkedHashMap<String, GroupMembers>,
}

/// Members of one group and the line of its first `namelist` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMembers {
    pub line: usize,
    pub members: Vec<String>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the members of a clause to its group. A member already listed
    /// for the group is not added twice.
    pub fn add_clause(&mut self, clause: NamelistClause, line: usize) {
        let group = self
            .groups
            .entry(clause.group)
            .or_insert_with(|| GroupMembers {
                line,
                members: Vec::new(),
            });
        for member in clause.members {
            if !group.members.contains(&member) {
                group.members.push(member);
            }
        }
    }

    pub fn get(&self, group: &str) -> Option<&GroupMembers> {
        self.groups.get(&group.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &GroupMembers)> {
        self.groups.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
