use std::{
    any::{type_name, TypeId},
    collections::HashMap,
    sync::Arc,
};

use crate::{
    binding::BindingTable,
    builder::DiBuilder,
    container::DiContainer,
    dependency_graph::DependencyGraph,
    descriptor::TypeDescriptor,
    errors::{InjectError, RequireError},
    factories::Arguments,
    lifecycle,
    options::InjectorOptions,
    resolver,
    scope::{ApplicationScope, CreationState, CreationStates},
    types::{Injectable, Instance, ParamSpec, Resolved, TypeInfo},
};

/// Builds the instance graph of a [DiBuilder]
///
/// Everything runs on the calling thread: each request constructs its whole dependency subtree
/// depth first before returning. Lifecycle hooks receive the running initiator, so they can
/// resolve sibling components while startup is still in progress.
#[derive(Debug, Default)]
pub struct DiInitiator {
    /// Components in registration order
    catalog: Vec<Arc<TypeDescriptor>>,
    index: HashMap<TypeId, Arc<TypeDescriptor>>,
    bindings: Arc<BindingTable>,
    graph: DependencyGraph,

    scope: ApplicationScope,
    states: CreationStates,
    /// Components currently under construction, outermost first
    path: Vec<TypeInfo>,

    options: InjectorOptions,
}

impl DiInitiator {
    pub(crate) fn new(blueprint: DiBuilder) -> Result<Self, InjectError> {
        let bindings = BindingTable::build(blueprint.descriptors());
        let graph = DependencyGraph::new(&blueprint, &bindings);

        let DiBuilder {
            registered_components,
            registered_instances,
            options,
        } = blueprint;

        tracing::debug!(
            "Initializing container with {} components and {} instances",
            registered_components.len(),
            registered_instances.len()
        );

        let mut initiator = DiInitiator {
            bindings: Arc::new(bindings),
            graph,
            options,
            ..Default::default()
        };

        for descriptor in registered_components {
            initiator.register(descriptor.clone())?;
            initiator.catalog.push(descriptor);
        }

        // Pre built instances never get constructed
        for (descriptor, instance) in registered_instances {
            let info = descriptor.info();
            initiator.register(descriptor)?;
            initiator.states.complete(info)?;
            initiator.scope.insert(instance)?;
        }

        Ok(initiator)
    }

    fn register(&mut self, descriptor: Arc<TypeDescriptor>) -> Result<(), InjectError> {
        let info = descriptor.info();
        if self.index.insert(info.type_id, descriptor).is_some() {
            return Err(InjectError::DuplicateComponent(info));
        }
        Ok(())
    }

    /// Constructs `entry` first, then - unless disabled - every other cataloged component
    pub(crate) fn initiate(mut self, entry: Option<TypeInfo>) -> Result<DiContainer, InjectError> {
        tracing::info!(
            "Starting container{} - {} components, {} capabilities bound",
            entry.map(|info| format!(" for '{info}'")).unwrap_or_default(),
            self.index.len(),
            self.bindings.len()
        );

        if let Err(error) = self.try_initiate(entry) {
            tracing::error!("Container startup aborted: {error}");
            return Err(error);
        }

        tracing::info!("Container started with {} instances", self.scope.len());
        Ok(DiContainer::new(self.scope, self.bindings, self.graph))
    }

    fn try_initiate(&mut self, entry: Option<TypeInfo>) -> Result<(), InjectError> {
        let catalog: Vec<TypeInfo> = match self.options.construct_all {
            true => self.catalog.iter().map(|d| d.info()).collect(),
            false => Vec::new(),
        };

        for info in entry.into_iter().chain(catalog) {
            self.get_or_create(info)?;
            // A lifecycle hook may have swallowed a failure, it still aborts startup
            if let Some(error) = self.states.first_failure() {
                return Err(error.clone());
            }
        }

        Ok(())
    }

    /// Returns the singleton of the concrete type, constructing it and its dependencies on first request
    pub fn get_or_create(&mut self, info: TypeInfo) -> Result<Instance, InjectError> {
        if let Some(instance) = self.scope.get(info) {
            return Ok(instance.clone());
        }

        let descriptor = self
            .index
            .get(&info.type_id)
            .cloned()
            .ok_or(InjectError::UnknownComponent(info))?;

        self.states.begin(info, &self.path)?;

        self.path.push(info);
        let constructed = self.construct(&descriptor);
        self.path.pop();
        let instance = match constructed {
            Ok(instance) => instance,
            Err(error) => {
                tracing::debug!("Constructing {} failed: {}", info, error);
                self.states.fail(info, error.clone());
                return Err(error);
            }
        };

        self.states.complete(info)?;
        self.scope.insert(instance.clone())?;
        tracing::debug!("Stored instance of {}", info);

        if let Err(error) = lifecycle::invoke(&instance, &descriptor, self) {
            self.states.record(error.clone());
            return Err(error);
        }

        Ok(instance)
    }

    fn construct(&mut self, descriptor: &TypeDescriptor) -> Result<Instance, InjectError> {
        let info = descriptor.info();
        let plan = descriptor.constructor_plan(self.options.constructor_fallback)?;
        tracing::debug!("Constructing {} using {:?}", info, plan);

        let constructor = plan.constructor();
        let mut values = Vec::with_capacity(constructor.parameters().len());
        for param in constructor.parameters() {
            values.push(self.resolve_parameter(param)?);
        }

        constructor
            .construct(&mut Arguments::new(info, values))
            .map_err(|error| InjectError::ConstructionFailed {
                component: info,
                error: Arc::new(error),
            })
    }

    /// Picks the implementation through the qualifier resolver and reuses it if already built
    fn resolve_parameter(&mut self, param: &ParamSpec) -> Result<Resolved, InjectError> {
        let binding =
            resolver::resolve(param.required, &self.bindings, param.qualifier.as_deref())?.clone();

        let instance = match self.scope.get(binding.concrete) {
            Some(instance) => instance.clone(),
            None => self.get_or_create(binding.concrete)?,
        };

        Ok(binding.upcast(&instance)?)
    }

    /// Resolves a capability, constructing the implementation if needed
    pub fn resolve<C: ?Sized + Send + Sync + 'static>(&mut self) -> Result<Arc<C>, InjectError> {
        self.resolve_param(ParamSpec::of::<C>())
    }

    /// Resolves the implementation of a capability named `qualifier`
    pub fn resolve_qualified<C: ?Sized + Send + Sync + 'static>(
        &mut self,
        qualifier: &str,
    ) -> Result<Arc<C>, InjectError> {
        self.resolve_param(ParamSpec::qualified::<C>(qualifier))
    }

    fn resolve_param<C: ?Sized + Send + Sync + 'static>(
        &mut self,
        param: ParamSpec,
    ) -> Result<Arc<C>, InjectError> {
        let resolved = self.resolve_parameter(&param)?;
        Ok(resolved.downcast()?)
    }

    /// Attempts to get the concrete type, constructing it if needed
    pub fn require<T: Injectable>(&mut self) -> Result<Arc<T>, InjectError> {
        let instance = self.get_or_create(TypeInfo::of::<T>())?;
        instance
            .downcast()
            .map_err(|actual_type| {
                RequireError::DowncastFailed {
                    required_type: type_name::<T>(),
                    actual_type,
                }
                .into()
            })
    }

    /// Instances created so far
    pub fn scope(&self) -> &ApplicationScope {
        &self.scope
    }

    pub fn state_of(&self, info: TypeInfo) -> CreationState {
        self.states.get(info)
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        descriptor::Component, errors::ResolveError, factories::Constructor,
        options::ConstructorFallback,
    };

    struct Leaf;
    struct Branch(Arc<Leaf>);

    fn builder() -> DiBuilder {
        DiBuilder::new()
            .add_component(Component::<Leaf>::new().constructor(Constructor::no_args(|| Leaf)))
            .add_component(
                Component::<Branch>::new()
                    .constructor(Constructor::new(|args| Ok(Branch(args.take()?))).param::<Leaf>()),
            )
    }

    #[test]
    fn builds_dependencies_depth_first() {
        let mut di = DiInitiator::new(builder()).unwrap();

        let branch = di.require::<Branch>().unwrap();
        let leaf = di.require::<Leaf>().unwrap();
        assert!(Arc::ptr_eq(&branch.0, &leaf));
        assert_eq!(di.state_of(TypeInfo::of::<Branch>()), CreationState::Created);
        assert!(di.path.is_empty());
    }

    #[test]
    fn unknown_component_is_reported() {
        let mut di = DiInitiator::new(builder()).unwrap();
        assert!(matches!(
            di.get_or_create(TypeInfo::of::<String>()),
            Err(InjectError::UnknownComponent(_))
        ));
    }

    #[test]
    fn duplicate_registration_fails() {
        let builder = builder()
            .add_component(Component::<Leaf>::new().constructor(Constructor::no_args(|| Leaf)));
        assert!(matches!(
            DiInitiator::new(builder),
            Err(InjectError::DuplicateComponent(info)) if info == TypeInfo::of::<Leaf>()
        ));
    }

    #[test]
    fn failed_component_reports_its_own_error_again() {
        trait Mailer: Send + Sync {}
        struct Newsletter(#[allow(dead_code)] Arc<dyn Mailer>);

        let builder = DiBuilder::new().add_component(
            Component::<Newsletter>::new().constructor(
                Constructor::new(|args| Ok(Newsletter(args.take()?))).param::<dyn Mailer>(),
            ),
        );
        let mut di = DiInitiator::new(builder).unwrap();
        let newsletter = TypeInfo::of::<Newsletter>();

        for _ in 0..2 {
            assert!(matches!(
                di.get_or_create(newsletter),
                Err(InjectError::Resolve(ResolveError::NoImplementationFound(info)))
                    if info == TypeInfo::of::<dyn Mailer>()
            ));
        }
        assert_eq!(di.state_of(newsletter), CreationState::Failed);
        assert!(!di.scope().contains(newsletter));
    }

    #[test]
    fn rejected_fallback_stops_construction() {
        let builder = builder().with_options(
            InjectorOptions::default().constructor_fallback(ConstructorFallback::Reject),
        );
        let mut di = DiInitiator::new(builder).unwrap();
        assert!(matches!(
            di.require::<Branch>(),
            Err(InjectError::UndesignatedConstructor(_))
        ));
        // The no-argument tier is unaffected
        assert!(di.require::<Leaf>().is_ok());
    }
}
