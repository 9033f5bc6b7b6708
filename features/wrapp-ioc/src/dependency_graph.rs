use std::{
    any::TypeId,
    collections::{BTreeMap, HashSet},
};

use thiserror::Error;

use crate::{
    binding::BindingTable,
    builder::DiBuilder,
    errors::{InjectError, ResolveError},
    resolver,
    types::{format_chain, TypeInfo},
};

/// Graph of the entire application
/// Used to check a catalog without constructing it and enables visualization of the APP
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    map: BTreeMap<TypeId, DependencyGraphEntry>,
    /// Issues found while adding entries
    issues: Vec<DependencyGraphError>,
}
impl DependencyGraph {
    /// Follows the constructor each component would be built with, through the qualifier resolver
    pub fn new(builder: &DiBuilder, bindings: &BindingTable) -> Self {
        let mut graph = Self::default();

        for (descriptor, _) in &builder.registered_instances {
            graph.add(descriptor.info(), vec![]);
        }

        for descriptor in &builder.registered_components {
            let info = descriptor.info();
            let plan = match descriptor.constructor_plan(builder.options.constructor_fallback) {
                Ok(plan) => plan,
                Err(error) => {
                    graph.issues.push(DependencyGraphError::InvalidConstructor {
                        component: info,
                        error,
                    });
                    graph.add(info, vec![]);
                    continue;
                }
            };

            let mut dependencies = Vec::new();
            for param in plan.constructor().parameters() {
                match resolver::resolve(param.required, bindings, param.qualifier.as_deref()) {
                    Ok(binding) => dependencies.push(binding.concrete),
                    Err(error) => graph.issues.push(DependencyGraphError::MissingDependency {
                        dependency: param.required,
                        required_by: info,
                        error,
                    }),
                }
            }
            graph.add(info, dependencies);
        }

        graph
    }

    fn add(&mut self, info: TypeInfo, dependencies: Vec<TypeInfo>) {
        if let Some(existing) = self
            .map
            .insert(info.type_id, DependencyGraphEntry { info, dependencies })
        {
            self.issues
                .push(DependencyGraphError::Duplicate(existing.info));
        }
    }

    /// Concrete types the component is constructed from, in parameter order
    pub fn dependencies_of(&self, info: TypeInfo) -> Option<&[TypeInfo]> {
        self.map
            .get(&info.type_id)
            .map(|entry| entry.dependencies.as_slice())
    }

    pub fn components(&self) -> impl Iterator<Item = TypeInfo> + '_ {
        self.map.values().map(|entry| entry.info)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Validate the graph
    ///
    /// Returns a list of all issues
    pub fn check(&self) -> Result<(), DependencyGraphErrors> {
        let mut checked = HashSet::new();
        let mut errors = self.issues.clone();
        for entry in self.map.values() {
            let mut dependency_chain = Vec::new();
            check_recurse(
                self,
                &mut checked,
                &mut errors,
                &mut dependency_chain,
                entry,
            );
        }

        if !errors.is_empty() {
            return Err(DependencyGraphErrors { errors });
        }

        return Ok(());

        fn check_recurse(
            graph: &DependencyGraph,
            checked: &mut HashSet<TypeId>,
            errors: &mut Vec<DependencyGraphError>,
            dependency_chain: &mut Vec<TypeInfo>,
            entry: &DependencyGraphEntry,
        ) {
            // Circular Dependency Check
            if let Some(start) = dependency_chain.iter().position(|info| *info == entry.info) {
                let mut chain = dependency_chain[start..].to_vec();
                chain.push(entry.info); // Add current so chain is complete

                errors.push(DependencyGraphError::CircularDependency {
                    from: chain[0],
                    to: chain[chain.len() - 2],
                    chain,
                });
            }

            // Skip other checks if already checked
            if !checked.insert(entry.info.type_id) {
                return;
            };

            dependency_chain.push(entry.info);

            for dependency in &entry.dependencies {
                // Unresolvable dependencies are already reported as issues
                if let Some(next_entry) = graph.map.get(&dependency.type_id) {
                    check_recurse(graph, checked, errors, dependency_chain, next_entry);
                }
            }

            dependency_chain.pop();
        }
    }
}

#[derive(Debug, Clone)]
struct DependencyGraphEntry {
    info: TypeInfo,
    dependencies: Vec<TypeInfo>,
}

#[derive(Error, Debug, Clone)]
pub enum DependencyGraphError {
    #[error("A Type has been registered twice: '{0}'")]
    Duplicate(TypeInfo),
    #[error("'{required_by}' needs '{dependency}' but it can't be resolved: {error}")]
    MissingDependency {
        dependency: TypeInfo,
        required_by: TypeInfo,
        error: ResolveError,
    },
    #[error("'{component}' can't be constructed: {error}")]
    InvalidConstructor {
        component: TypeInfo,
        error: InjectError,
    },
    #[error(
        "A Circular Dependency exists between '{from}' and '{to}' through {}",
        format_chain(.chain)
    )]
    CircularDependency {
        from: TypeInfo,
        to: TypeInfo,
        chain: Vec<TypeInfo>,
    },
}
impl std::fmt::Display for DependencyGraphErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut display = Vec::new();
        display.push("The dependency graph had one or more errors:".to_string());
        for error in &self.errors {
            display.push(format!("- {}", error));
        }
        f.write_str(&display.join("\n"))
    }
}

#[derive(Error, Debug, Clone)]
pub struct DependencyGraphErrors {
    pub errors: Vec<DependencyGraphError>,
}
