use std::{any::type_name, fmt::Debug, sync::Arc};

use crate::{
    binding::BindingTable,
    dependency_graph::DependencyGraph,
    errors::RequireError,
    resolver,
    scope::ApplicationScope,
    types::{Injectable, TypeInfo},
};

/// Container holding all initiated instances
///
/// Read only once startup completed, so clones can be shared freely across threads.
#[derive(Clone)]
pub struct DiContainer(pub Arc<DiContainerInner>);
pub struct DiContainerInner {
    scope: ApplicationScope,
    bindings: Arc<BindingTable>,
    graph: DependencyGraph,
}
impl Debug for DiContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self
            .0
            .scope
            .instances()
            .map(|instance| instance.info.type_name)
            .collect();
        names.sort_unstable();

        let mut list = f.debug_list();
        list.entries(names);
        list.finish()
    }
}

impl DiContainer {
    pub(crate) fn new(
        scope: ApplicationScope,
        bindings: Arc<BindingTable>,
        graph: DependencyGraph,
    ) -> Self {
        Self(Arc::new(DiContainerInner {
            scope,
            bindings,
            graph,
        }))
    }

    /// Attempts to get the requested concrete type
    pub fn require<T: Injectable>(&self) -> Result<Arc<T>, RequireError> {
        match self.0.scope.get(TypeInfo::of::<T>()) {
            Some(instance) => {
                instance
                    .downcast()
                    .map_err(|actual_type| RequireError::DowncastFailed {
                        required_type: type_name::<T>(),
                        actual_type,
                    })
            }
            None => Err(RequireError::TypeMissing(type_name::<T>())),
        }
    }

    /// Resolves a capability the same way constructor parameters are resolved
    pub fn resolve<C: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<C>, RequireError> {
        self.resolve_with(None)
    }

    /// Resolves the implementation of a capability named `qualifier`
    pub fn resolve_qualified<C: ?Sized + Send + Sync + 'static>(
        &self,
        qualifier: &str,
    ) -> Result<Arc<C>, RequireError> {
        self.resolve_with(Some(qualifier))
    }

    fn resolve_with<C: ?Sized + Send + Sync + 'static>(
        &self,
        qualifier: Option<&str>,
    ) -> Result<Arc<C>, RequireError> {
        let binding = resolver::resolve(TypeInfo::of::<C>(), &self.0.bindings, qualifier)?;
        // Only reachable with construct_all disabled
        let instance = self
            .0
            .scope
            .get(binding.concrete)
            .ok_or(RequireError::TypeMissing(binding.concrete.type_name))?;

        binding.upcast(instance)?.downcast()
    }

    /// True if an instance of the concrete type exists
    pub fn contains<T: Injectable>(&self) -> bool {
        self.0.scope.contains(TypeInfo::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.0.scope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.scope.is_empty()
    }

    pub fn scope(&self) -> &ApplicationScope {
        &self.0.scope
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.0.graph
    }
}
