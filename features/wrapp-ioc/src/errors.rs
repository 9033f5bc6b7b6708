use std::sync::Arc;

use thiserror::Error;

use crate::types::{format_chain, DynError, TypeInfo};

/// Errors aborting startup. None of them are retried.
#[derive(Error, Debug, Clone)]
pub enum InjectError {
    /// More than one constructor is designated for injection
    #[error("'{component}' designates {count} constructors for injection, at most one is allowed")]
    AmbiguousInjectionPoint { component: TypeInfo, count: usize },

    /// The type was requested again while it is still being constructed
    #[error(
        "'{component}' is already in creation - unresolvable circular dependency through {}",
        format_chain(.chain)
    )]
    CircularDependency {
        component: TypeInfo,
        chain: Vec<TypeInfo>,
    },

    /// The type was re-entered although it has been created already
    #[error("'{0}' has already been created")]
    AlreadyCreated(TypeInfo),

    /// Could not pick an implementation for a parameter
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// More than one lifecycle hook is declared
    #[error("'{component}' declares more than one lifecycle hook: {hooks:?}")]
    AmbiguousLifecycleHook {
        component: TypeInfo,
        hooks: Vec<&'static str>,
    },

    /// The lifecycle hook requires parameters
    #[error("Lifecycle hook '{component}::{hook}' must not take parameters, but takes {parameters}")]
    InvalidLifecycleSignature {
        component: TypeInfo,
        hook: &'static str,
        parameters: usize,
    },

    /// The type declares no constructor at all
    #[error("'{0}' declares no constructor")]
    NoPublicConstructor(TypeInfo),

    /// No designated and no no-argument constructor, and the first-declared fallback is rejected
    #[error("'{0}' has neither a designated nor a no-argument constructor")]
    UndesignatedConstructor(TypeInfo),

    /// The type is not part of the catalog
    #[error("'{0}' is not a registered component")]
    UnknownComponent(TypeInfo),

    /// The same concrete type was registered twice
    #[error("A component has been registered twice: '{0}'")]
    DuplicateComponent(TypeInfo),

    /// The constructor itself returned an error
    #[error("Constructing '{component}' failed - error: {error}")]
    ConstructionFailed {
        component: TypeInfo,
        error: Arc<DynError>,
    },

    /// The lifecycle hook returned an error
    #[error("Lifecycle hook '{component}::{hook}' failed - error: {error}")]
    LifecycleHookFailed {
        component: TypeInfo,
        hook: &'static str,
        error: Arc<DynError>,
    },

    /// A resolved value did not have the expected type
    #[error(transparent)]
    Require(#[from] RequireError),
}

/// Errors when picking an implementation for a capability
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Nothing is bound to the capability
    #[error("Can't find an implementation for '{0}'")]
    NoImplementationFound(TypeInfo),

    /// Implementations exist, but none carries the qualifier
    #[error("Can't find an implementation of '{capability}' for qualifier '{qualifier}'")]
    QualifierNotFound {
        capability: TypeInfo,
        qualifier: String,
    },
}

/// Errors when trying to require a certain type
#[derive(Error, Debug, Clone)]
pub enum RequireError {
    /// The required type is not known
    #[error("The required type '{0}' is not known.")]
    TypeMissing(&'static str),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },

    /// A constructor took more arguments than it declared parameters
    #[error("Constructor of '{component}' declares {declared} parameters but took more")]
    ArgumentsExhausted { component: TypeInfo, declared: usize },
}
