use std::{any::type_name, fmt::Debug, sync::Arc};

use crate::{
    errors::{InjectError, RequireError},
    factories::{Constructor, DynConstructor},
    initiator::DiInitiator,
    options::ConstructorFallback,
    types::{DynError, Injectable, Instance, Resolved, TypeInfo},
};

type UpcastFn = Arc<dyn Fn(&Instance) -> Result<Resolved, RequireError> + Send + Sync>;
type HookFn = Arc<dyn Fn(&Instance, &mut DiInitiator) -> Result<(), DynError> + Send + Sync>;

/// A capability a concrete component satisfies
///
/// Knows how to turn the component's instance into the capability (`Arc<T>` -> `Arc<C>`).
#[derive(Clone)]
pub struct Capability {
    pub info: TypeInfo,
    upcast: UpcastFn,
}

impl Capability {
    /// `T` provides `C`
    ///
    /// `cast` is usually the identity closure, relying on unsized coercion:
    /// ```rust
    /// # use std::sync::Arc;
    /// # use wrapp_ioc::Capability;
    /// trait Greeter: Send + Sync {}
    /// struct English;
    /// impl Greeter for English {}
    ///
    /// let capability = Capability::of::<English, dyn Greeter>(|it| it);
    /// ```
    pub fn of<T, C>(cast: fn(Arc<T>) -> Arc<C>) -> Self
    where
        T: Injectable,
        C: ?Sized + Send + Sync + 'static,
    {
        let upcast = move |instance: &Instance| -> Result<Resolved, RequireError> {
            let concrete = instance
                .downcast::<T>()
                .map_err(|actual_type| RequireError::DowncastFailed {
                    required_type: type_name::<T>(),
                    actual_type,
                })?;
            Ok(Resolved::new(cast(concrete)))
        };

        Capability {
            info: TypeInfo::of::<C>(),
            upcast: Arc::new(upcast),
        }
    }

    /// `T` provides itself
    pub fn itself<T: Injectable>() -> Self {
        Self::of::<T, T>(|it| it)
    }

    /// Converts an instance of the implementing type into this capability
    pub fn upcast(&self, instance: &Instance) -> Result<Resolved, RequireError> {
        (self.upcast)(instance)
    }
}

impl Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Capability").field(&self.info.type_name).finish()
    }
}

/// Method invoked once, right after the component has been constructed and stored
#[derive(Clone)]
pub struct LifecycleHook {
    pub name: &'static str,
    /// Declared parameters - a valid hook has none
    pub parameters: Vec<TypeInfo>,
    invoke: HookFn,
}

impl LifecycleHook {
    pub fn new<T, F>(name: &'static str, hook: F) -> Self
    where
        T: Injectable,
        F: Fn(&T, &mut DiInitiator) -> Result<(), DynError> + Send + Sync + 'static,
    {
        let invoke = move |instance: &Instance, di: &mut DiInitiator| -> Result<(), DynError> {
            let this = instance
                .downcast::<T>()
                .map_err(|actual_type| RequireError::DowncastFailed {
                    required_type: type_name::<T>(),
                    actual_type,
                })?;
            hook(&*this, di)
        };

        LifecycleHook {
            name,
            parameters: Vec::new(),
            invoke: Arc::new(invoke),
        }
    }

    /// Declares parameters on the hook. A hook with parameters is rejected when invoked.
    pub fn with_parameters(mut self, parameters: Vec<TypeInfo>) -> Self {
        self.parameters = parameters;
        self
    }

    pub(crate) fn call(&self, instance: &Instance, di: &mut DiInitiator) -> Result<(), DynError> {
        (self.invoke)(instance, di)
    }
}

impl Debug for LifecycleHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleHook")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Typed declaration of a component
///
/// # Example
/// ```rust
/// # use std::sync::Arc;
/// # use wrapp_ioc::{Component, Constructor};
/// trait Clock: Send + Sync { fn now(&self) -> u64; }
/// struct FixedClock;
/// impl Clock for FixedClock { fn now(&self) -> u64 { 42 } }
///
/// let component = Component::<FixedClock>::new()
///     .provides::<dyn Clock>(|it| it)
///     .constructor(Constructor::no_args(|| FixedClock))
///     .post_construct("announce", |clock, _di| {
///         println!("clock ready at {}", clock.now());
///         Ok(())
///     });
/// ```
pub struct Component<T> {
    qualifier: Option<String>,
    capabilities: Vec<Capability>,
    constructors: Vec<DynConstructor>,
    lifecycle_hooks: Vec<LifecycleHook>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T: Injectable> Default for Component<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Injectable> Component<T> {
    pub fn new() -> Self {
        Component {
            qualifier: None,
            capabilities: Vec::new(),
            constructors: Vec::new(),
            lifecycle_hooks: Vec::new(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Overrides the qualifier name, which defaults to the type's simple name
    pub fn qualified(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Declares that `T` satisfies the capability `C`
    pub fn provides<C: ?Sized + Send + Sync + 'static>(mut self, cast: fn(Arc<T>) -> Arc<C>) -> Self {
        self.capabilities.push(Capability::of::<T, C>(cast));
        self
    }

    /// Adds a constructor - declaration order matters for the first-declared fallback
    pub fn constructor(mut self, constructor: Constructor<T>) -> Self {
        self.constructors.push(constructor.into_dyn());
        self
    }

    /// Adds a zero-argument lifecycle hook
    pub fn post_construct<F>(self, name: &'static str, hook: F) -> Self
    where
        F: Fn(&T, &mut DiInitiator) -> Result<(), DynError> + Send + Sync + 'static,
    {
        self.lifecycle_hook(LifecycleHook::new::<T, F>(name, hook))
    }

    pub fn lifecycle_hook(mut self, hook: LifecycleHook) -> Self {
        self.lifecycle_hooks.push(hook);
        self
    }

    pub fn into_descriptor(self) -> TypeDescriptor {
        let info = TypeInfo::of::<T>();
        TypeDescriptor {
            info,
            qualifier: self
                .qualifier
                .unwrap_or_else(|| info.simple_name().to_string()),
            capabilities: self.capabilities,
            self_capability: Capability::itself::<T>(),
            constructors: self.constructors,
            lifecycle_hooks: self.lifecycle_hooks,
        }
    }
}

/// Read-only metadata of a concrete component
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    info: TypeInfo,
    qualifier: String,
    capabilities: Vec<Capability>,
    self_capability: Capability,
    constructors: Vec<DynConstructor>,
    lifecycle_hooks: Vec<LifecycleHook>,
}

/// The constructor selected for a component
#[derive(Debug, Clone, Copy)]
pub enum ConstructorPlan<'a> {
    /// The single constructor designated for injection
    Designated(&'a DynConstructor),
    /// No designation, but a no-argument constructor exists
    NoArgs(&'a DynConstructor),
    /// Neither - the first declared constructor is used
    FirstDeclared(&'a DynConstructor),
}

impl<'a> ConstructorPlan<'a> {
    pub fn constructor(&self) -> &'a DynConstructor {
        match *self {
            ConstructorPlan::Designated(constructor)
            | ConstructorPlan::NoArgs(constructor)
            | ConstructorPlan::FirstDeclared(constructor) => constructor,
        }
    }
}

impl TypeDescriptor {
    /// Descriptor of a value registered ready-made - it never gets constructed
    pub(crate) fn prebuilt<T: Injectable>() -> Self {
        Component::<T>::new().into_descriptor()
    }

    pub fn info(&self) -> TypeInfo {
        self.info
    }

    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    /// The declared capabilities; empty means the type only provides itself
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// The capabilities the type is bound under
    pub fn bound_capabilities(&self) -> &[Capability] {
        if self.capabilities.is_empty() {
            std::slice::from_ref(&self.self_capability)
        } else {
            &self.capabilities
        }
    }

    pub fn constructors(&self) -> &[DynConstructor] {
        &self.constructors
    }

    pub fn lifecycle_hooks(&self) -> &[LifecycleHook] {
        &self.lifecycle_hooks
    }

    /// Picks the constructor used for injection
    ///
    /// 1. The constructor designated for injection - more than one is an error
    /// 2. Otherwise a no-argument constructor
    /// 3. Otherwise the first declared constructor, unless `fallback` rejects it
    pub fn constructor_plan(
        &self,
        fallback: ConstructorFallback,
    ) -> Result<ConstructorPlan<'_>, InjectError> {
        let mut designated = self.constructors.iter().filter(|c| c.is_designated());
        match (designated.next(), designated.count()) {
            (Some(constructor), 0) => return Ok(ConstructorPlan::Designated(constructor)),
            (Some(_), others) => {
                return Err(InjectError::AmbiguousInjectionPoint {
                    component: self.info,
                    count: others + 1,
                })
            }
            (None, _) => {}
        }

        if let Some(constructor) = self.constructors.iter().find(|c| c.is_no_args()) {
            return Ok(ConstructorPlan::NoArgs(constructor));
        }

        let first = self
            .constructors
            .first()
            .ok_or(InjectError::NoPublicConstructor(self.info))?;

        match fallback {
            ConstructorFallback::FirstDeclared => Ok(ConstructorPlan::FirstDeclared(first)),
            ConstructorFallback::Reject => Err(InjectError::UndesignatedConstructor(self.info)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Named: Send + Sync {
        fn name(&self) -> &'static str;
    }

    struct Widget;
    impl Named for Widget {
        fn name(&self) -> &'static str {
            "widget"
        }
    }

    fn widget_with(constructors: Vec<Constructor<Widget>>) -> TypeDescriptor {
        constructors
            .into_iter()
            .fold(Component::<Widget>::new(), Component::constructor)
            .into_descriptor()
    }

    fn taking_u8() -> Constructor<Widget> {
        Constructor::new(|_| Ok(Widget)).param::<u8>()
    }

    #[test]
    fn defaults_qualifier_to_simple_name() {
        let descriptor = Component::<Widget>::new().into_descriptor();
        assert_eq!(descriptor.qualifier(), "Widget");
        assert_eq!(descriptor.info(), TypeInfo::of::<Widget>());

        let descriptor = Component::<Widget>::new().qualified("gadget").into_descriptor();
        assert_eq!(descriptor.qualifier(), "gadget");
    }

    #[test]
    fn binds_under_itself_without_capabilities() {
        let descriptor = Component::<Widget>::new().into_descriptor();
        assert!(descriptor.capabilities().is_empty());
        assert_eq!(descriptor.bound_capabilities()[0].info, TypeInfo::of::<Widget>());

        let descriptor = Component::<Widget>::new()
            .provides::<dyn Named>(|it| it)
            .into_descriptor();
        let bound: Vec<_> = descriptor.bound_capabilities().iter().map(|c| c.info).collect();
        assert_eq!(bound, vec![TypeInfo::of::<dyn Named>()]);
    }

    #[test]
    fn capability_upcasts_instance() {
        let capability = Capability::of::<Widget, dyn Named>(|it| it);
        let resolved = capability.upcast(&Instance::new(Widget)).unwrap();
        assert_eq!(resolved.downcast::<dyn Named>().unwrap().name(), "widget");

        assert!(matches!(
            capability.upcast(&Instance::new(5_u32)),
            Err(RequireError::DowncastFailed { .. })
        ));
    }

    #[test]
    fn designated_constructor_wins() {
        let descriptor = widget_with(vec![
            Constructor::no_args(|| Widget),
            taking_u8().designated(),
        ]);
        let plan = descriptor.constructor_plan(ConstructorFallback::Reject).unwrap();
        assert!(matches!(plan, ConstructorPlan::Designated(_)));
        assert_eq!(plan.constructor().parameters().len(), 1);
    }

    #[test]
    fn more_than_one_designated_constructor_is_ambiguous() {
        let descriptor = widget_with(vec![
            taking_u8().designated(),
            Constructor::no_args(|| Widget).designated(),
        ]);
        assert!(matches!(
            descriptor.constructor_plan(ConstructorFallback::FirstDeclared),
            Err(InjectError::AmbiguousInjectionPoint { count: 2, .. })
        ));
    }

    #[test]
    fn no_args_constructor_beats_declaration_order() {
        let descriptor = widget_with(vec![taking_u8(), Constructor::no_args(|| Widget)]);
        let plan = descriptor.constructor_plan(ConstructorFallback::FirstDeclared).unwrap();
        assert!(matches!(plan, ConstructorPlan::NoArgs(_)));
    }

    #[test]
    fn falls_back_to_first_declared_constructor() {
        let descriptor = widget_with(vec![
            taking_u8(),
            Constructor::new(|_| Ok(Widget)).param::<u16>(),
        ]);
        let plan = descriptor.constructor_plan(ConstructorFallback::FirstDeclared).unwrap();
        assert!(matches!(plan, ConstructorPlan::FirstDeclared(_)));
        assert_eq!(plan.constructor().parameters()[0].required, TypeInfo::of::<u8>());

        assert!(matches!(
            descriptor.constructor_plan(ConstructorFallback::Reject),
            Err(InjectError::UndesignatedConstructor(_))
        ));
    }

    #[test]
    fn no_constructor_at_all() {
        let descriptor = widget_with(vec![]);
        assert!(matches!(
            descriptor.constructor_plan(ConstructorFallback::FirstDeclared),
            Err(InjectError::NoPublicConstructor(_))
        ));
    }
}
