use std::sync::Arc;

use crate::{
    binding::BindingTable,
    container::DiContainer,
    dependency_graph::{DependencyGraph, DependencyGraphErrors},
    descriptor::{Component, TypeDescriptor},
    errors::InjectError,
    initiator::DiInitiator,
    options::InjectorOptions,
    types::{Injectable, Instance, TypeInfo},
};

//////////////////////////////////////////////////////////////////////
///
/// The DI consists of three parts.
/// 1. The DiBuilder where one registers all components and instances
/// 2. The DiInitiator which constructs them on startup
/// 3. The DiContainer holding every singleton afterwards
///
/// ```rust
/// # use std::sync::Arc;
/// # use wrapp_ioc::{Component, Constructor, DiBuilder};
/// struct Database;
/// struct Service { db: Arc<Database> }
///
/// let container = DiBuilder::new()
///     .add_component(Component::<Database>::new().constructor(Constructor::no_args(|| Database)))
///     .add_component(
///         Component::<Service>::new()
///             .constructor(Constructor::new(|args| Ok(Service { db: args.take()? })).param::<Database>()),
///     )
///     .start::<Service>()
///     .unwrap();
///
/// assert!(container.require::<Service>().is_ok());
/// ```
pub struct DiBuilder {
    /// Registered components, in registration order
    pub(crate) registered_components: Vec<Arc<TypeDescriptor>>,
    /// Registered already created instances
    pub(crate) registered_instances: Vec<(Arc<TypeDescriptor>, Instance)>,
    pub(crate) options: InjectorOptions,
}
impl Default for DiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiBuilder {
    pub fn new() -> Self {
        DiBuilder {
            registered_components: Vec::new(),
            registered_instances: Vec::new(),
            options: InjectorOptions::default(),
        }
    }
}
impl DiBuilder {
    /// Registers a ready made singleton, injectable by its own type
    pub fn add_instance<T: Injectable>(mut self, instance: T) -> Self {
        self.registered_instances.push((
            Arc::new(TypeDescriptor::prebuilt::<T>()),
            Instance::new(instance),
        ));
        self
    }

    pub fn add_component<T: Injectable>(self, component: Component<T>) -> Self {
        self.add_descriptor(component.into_descriptor())
    }

    /// Registers a descriptor produced elsewhere
    pub fn add_descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.registered_components.push(Arc::new(descriptor));
        self
    }

    pub fn with_options(mut self, options: InjectorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &InjectorOptions {
        &self.options
    }

    /// Every registered descriptor, instances included
    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.registered_components
            .iter()
            .chain(self.registered_instances.iter().map(|(descriptor, _)| descriptor))
            .map(|descriptor| &**descriptor)
    }

    /// Checks the catalog without constructing anything
    pub fn validate(&self) -> Result<(), DependencyGraphErrors> {
        let bindings = BindingTable::build(self.descriptors());
        DependencyGraph::new(self, &bindings).check()
    }

    /// Starts the application: constructs `Entry` and, unless disabled, every other component
    pub fn start<Entry: Injectable>(self) -> Result<DiContainer, InjectError> {
        DiInitiator::new(self)?.initiate(Some(TypeInfo::of::<Entry>()))
    }

    /// Starts the application without an entry type
    pub fn start_all(self) -> Result<DiContainer, InjectError> {
        DiInitiator::new(self)?.initiate(None)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::factories::Constructor;

    struct Port(u16);
    struct Server(Arc<Port>);

    fn server() -> Component<Server> {
        Component::new()
            .constructor(Constructor::new(|args| Ok(Server(args.take()?))).param::<Port>())
    }

    #[test]
    fn instances_are_injectable() {
        let container = DiBuilder::new()
            .add_instance(Port(8080))
            .add_component(server())
            .start_all()
            .unwrap();

        assert_eq!(container.require::<Server>().unwrap().0 .0, 8080);
        assert_eq!(container.len(), 2);
    }

    #[test]
    fn descriptors_include_instances() {
        let builder = DiBuilder::new().add_instance(Port(1)).add_component(server());
        let names: Vec<_> = builder
            .descriptors()
            .map(|descriptor| descriptor.qualifier().to_string())
            .collect();
        assert_eq!(names, vec!["Server", "Port"]);
    }

    #[test]
    fn validate_reports_missing_dependency() {
        let errors = DiBuilder::new()
            .add_component(server())
            .validate()
            .unwrap_err()
            .errors;
        assert_eq!(errors.len(), 1);
        assert!(DiBuilder::new().add_instance(Port(1)).add_component(server()).validate().is_ok());
    }
}
