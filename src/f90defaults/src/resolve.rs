// f90defaults/src/resolve.rs

//! Resolution of namelist members to their declared defaults.

use crate::declaration::Declaration;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::literal::{Element, Initializer, Literal};
use crate::namelist::{Namelist, NamelistValue};
use crate::options::{ExtractOptions, MemberOrder, MissingDefaults};
use crate::error::Result;
use crate::table::{DeclarationTable, GroupTable};
use linked_hash_map::LinkedHashMap;
use log::debug;
use std::collections::HashSet;
use std::fmt;

/// A resolved default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    Scalar(Literal),
    /// Scalar initializer applied to every element of an array, `n*value`
    Repeated { count: usize, value: Literal },
    List(Vec<Literal>),
}

impl DefaultValue {
    /// Typed value as a namelist reader would see it.
    pub fn to_value(&self) -> Result<NamelistValue> {
        match self {
            DefaultValue::Scalar(literal) => literal.to_value(),
            DefaultValue::Repeated { count, value } => {
                let value = value.to_value()?;
                Ok(NamelistValue::Array(vec![value; *count]))
            }
            DefaultValue::List(items) => Ok(NamelistValue::Array(
                items.iter().map(Literal::to_value).collect::<Result<_>>()?,
            )),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Scalar(literal) => write!(f, "{literal}"),
            DefaultValue::Repeated { count, value } => write!(f, "{count}*{value}"),
            DefaultValue::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

/// One member of an emitted group. `default` is `None` when no default
/// could be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultEntry {
    pub member: String,
    pub default: Option<DefaultValue>,
}

/// Groups of one file with their members' defaults, in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultsTable {
    groups: LinkedHashMap<String, Vec<DefaultEntry>>,
}

impl DefaultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> impl Iterator<Item = (&String, &Vec<DefaultEntry>)> {
        self.groups.iter()
    }

    pub fn get(&self, group: &str) -> Option<&[DefaultEntry]> {
        self.groups.get(&group.to_ascii_lowercase()).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Typed view of the resolved defaults, skipping members without one.
    pub fn to_namelist(&self) -> Result<Namelist> {
        let mut namelist = Namelist::new();
        for (name, entries) in self.groups() {
            let group = namelist.insert_group(name);
            for entry in entries {
                if let Some(default) = &entry.default {
                    group.insert(&entry.member, default.to_value()?);
                }
            }
        }
        Ok(namelist)
    }
}

/// Build the defaults table for all groups, reporting every member whose
/// default cannot be determined. Such members are kept with no default
/// unless the options ask for them to be omitted.
pub fn resolve(
    declarations: &DeclarationTable,
    groups: &GroupTable,
    options: &ExtractOptions,
) -> (DefaultsTable, Vec<Diagnostic>) {
    let resolver = Resolver {
        declarations,
        options,
    };
    let mut table = DefaultsTable::new();
    let mut diagnostics = Vec::new();

    for (group_name, group) in groups.iter() {
        let mut members: Vec<&String> = group.members.iter().collect();
        if options.member_order == MemberOrder::Declaration {
            // Stable sort keeps undeclared members in namelist order at the end
            members.sort_by_key(|m| declarations.position(m).unwrap_or(usize::MAX));
        }

        let mut entries = Vec::with_capacity(members.len());
        for member in members {
            let default = match declarations.get(member) {
                None => {
                    diagnostics.push(Diagnostic::new(
                        group.line,
                        DiagnosticKind::UndeclaredMember {
                            group: group_name.clone(),
                            member: member.clone(),
                        },
                    ));
                    None
                }
                Some(declaration) => match &declaration.initializer {
                    None => {
                        diagnostics.push(Diagnostic::new(
                            declaration.line,
                            DiagnosticKind::MissingDefault {
                                group: group_name.clone(),
                                member: member.clone(),
                            },
                        ));
                        None
                    }
                    Some(initializer) => {
                        let resolved = resolver.declared_default(declaration, initializer);
                        if resolved.is_none() {
                            diagnostics.push(Diagnostic::new(
                                declaration.line,
                                DiagnosticKind::UnresolvedDefault {
                                    group: group_name.clone(),
                                    member: member.clone(),
                                    expression: initializer_text(initializer),
                                },
                            ));
                        }
                        resolved
                    }
                },
            };
            if default.is_none() && options.missing_defaults == MissingDefaults::Omit {
                continue;
            }
            entries.push(DefaultEntry {
                member: member.clone(),
                default,
            });
        }
        table.groups.insert(group_name.clone(), entries);
    }

    (table, diagnostics)
}

struct Resolver<'a> {
    declarations: &'a DeclarationTable,
    options: &'a ExtractOptions,
}

impl Resolver<'_> {
    /// Default of a declared variable, with scalar-to-array expansion.
    fn declared_default(
        &self,
        declaration: &Declaration,
        initializer: &Initializer,
    ) -> Option<DefaultValue> {
        let mut visiting = HashSet::new();
        visiting.insert(declaration.name.as_str());
        let value = self.initializer_value(initializer, &mut visiting)?;

        if !self.options.expand_scalar_arrays {
            return Some(value);
        }
        match (value, self.extent(declaration)) {
            (DefaultValue::Scalar(literal), Some(count)) if count > 1 => {
                Some(DefaultValue::Repeated {
                    count,
                    value: literal,
                })
            }
            (value, _) => Some(value),
        }
    }

    fn initializer_value<'n>(
        &'n self,
        initializer: &'n Initializer,
        visiting: &mut HashSet<&'n str>,
    ) -> Option<DefaultValue> {
        match initializer {
            Initializer::Scalar(element) => self.element_value(element, visiting),
            Initializer::Array(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    match self.element_value(element, visiting)? {
                        DefaultValue::Scalar(literal) => items.push(literal),
                        DefaultValue::Repeated { count, value } => {
                            items.extend(std::iter::repeat(value).take(count))
                        }
                        DefaultValue::List(list) => items.extend(list),
                    }
                }
                Some(DefaultValue::List(items))
            }
            Initializer::Expression(text) => {
                debug!("not a constant initializer: {}", text);
                None
            }
        }
    }

    fn element_value<'n>(
        &'n self,
        element: &'n Element,
        visiting: &mut HashSet<&'n str>,
    ) -> Option<DefaultValue> {
        match element {
            Element::Literal(literal) => Some(DefaultValue::Scalar(literal.clone())),
            Element::Name(name) => {
                if !self.options.resolve_parameters {
                    return None;
                }
                let constant = self.declarations.get(name).filter(|d| d.parameter)?;
                let initializer = constant.initializer.as_ref()?;
                if !visiting.insert(constant.name.as_str()) {
                    debug!("cyclic parameter reference through '{}'", name);
                    return None;
                }
                let value = self.initializer_value(initializer, visiting);
                visiting.remove(constant.name.as_str());
                value
            }
        }
    }

    /// Total number of elements of an array declaration, when every bound is
    /// an integer literal or an integer parameter.
    fn extent(&self, declaration: &Declaration) -> Option<usize> {
        let dimensions = declaration.dimensions.as_ref()?;
        let mut total: usize = 1;
        for dim in dimensions {
            let size = match dim.split_once(':') {
                Some((lower, upper)) => {
                    let lower = if lower.trim().is_empty() { 1 } else { self.bound(lower)? };
                    let upper = self.bound(upper)?;
                    let size = upper.checked_sub(lower)?.checked_add(1)?;
                    usize::try_from(size).ok()?
                }
                None => usize::try_from(self.bound(dim)?).ok()?,
            };
            total = total.checked_mul(size)?;
        }
        Some(total)
    }

    /// Value of an integer literal, an integer parameter, or a product of
    /// those (`max_vars * num_columns`).
    fn bound(&self, text: &str) -> Option<i64> {
        let text = text.trim();
        if text.contains('*') {
            return text
                .split('*')
                .try_fold(1i64, |product, factor| product.checked_mul(self.bound(factor)?));
        }
        if let Ok(value) = text.parse::<i64>() {
            return Some(value);
        }
        if !self.options.resolve_parameters {
            return None;
        }
        let constant = self.declarations.get(text).filter(|d| d.parameter)?;
        let mut visiting = HashSet::new();
        visiting.insert(constant.name.as_str());
        match self.initializer_value(constant.initializer.as_ref()?, &mut visiting)? {
            DefaultValue::Scalar(Literal::Integer(value)) => value.parse().ok(),
            _ => None,
        }
    }
}

fn initializer_text(initializer: &Initializer) -> String {
    match initializer {
        Initializer::Expression(text) => text.clone(),
        Initializer::Scalar(Element::Name(name)) => name.clone(),
        Initializer::Scalar(Element::Literal(literal)) => literal.to_string(),
        Initializer::Array(elements) => {
            let parts: Vec<String> = elements
                .iter()
                .map(|e| match e {
                    Element::Name(name) => name.clone(),
                    Element::Literal(literal) => literal.to_string(),
                })
                .collect();
            format!("(/ {} /)", parts.join(", "))
        }
    }
}
