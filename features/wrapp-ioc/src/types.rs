use std::{
    any::{type_name, Any, TypeId},
    sync::Arc,
};

use crate::errors::RequireError;

/// All errors must be clone
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Components live for the whole process and may be read from any thread once startup completes
/// So anything injectable needs to be Send + Sync + 'static
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// Singleton instance of a concrete component
#[derive(Clone)]
pub struct Instance {
    pub info: TypeInfo,
    pub instance: Arc<dyn Any + Send + Sync + 'static>,
}

impl Instance {
    pub fn new<ExistingInstance: Injectable>(instance: ExistingInstance) -> Self {
        Self::from_arc(Arc::new(instance))
    }

    pub fn from_arc<ExistingInstance: Injectable>(instance: Arc<ExistingInstance>) -> Self {
        Instance {
            info: TypeInfo::of::<ExistingInstance>(),
            instance,
        }
    }

    pub fn downcast<T: Injectable>(&self) -> Result<Arc<T>, &'static str> {
        match Arc::downcast::<T>(self.instance.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(self.info.type_name),
        }
    }

    /// True if both handles point at the same singleton
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Instance").field(&self.info.type_name).finish()
    }
}

/// A constructor parameter: the required type and an optional qualifier hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// The required Type - either a concrete component or a capability
    pub required: TypeInfo,
    /// Name of the implementation to pick when several are bound
    pub qualifier: Option<String>,
}

impl ParamSpec {
    pub fn of<T: ?Sized + 'static>() -> Self {
        ParamSpec {
            required: TypeInfo::of::<T>(),
            qualifier: None,
        }
    }

    pub fn qualified<T: ?Sized + 'static>(qualifier: impl Into<String>) -> Self {
        ParamSpec {
            required: TypeInfo::of::<T>(),
            qualifier: Some(qualifier.into()),
        }
    }
}

/// A parameter value, already converted to the type the parameter asks for.
///
/// Holds an `Arc<P>` where `P` may be unsized (`dyn Trait`).
pub struct Resolved {
    pub info: TypeInfo,
    value: Box<dyn Any + Send + Sync>,
}

impl Resolved {
    pub fn new<P: ?Sized + Send + Sync + 'static>(value: Arc<P>) -> Self {
        Resolved {
            info: TypeInfo::of::<P>(),
            value: Box::new(value),
        }
    }

    pub fn downcast<P: ?Sized + 'static>(self) -> Result<Arc<P>, RequireError> {
        let actual_type = self.info.type_name;
        self.value
            .downcast::<Arc<P>>()
            .map(|value| *value)
            .map_err(|_| RequireError::DowncastFailed {
                required_type: type_name::<P>(),
                actual_type,
            })
    }
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Resolved").field(&self.info.type_name).finish()
    }
}

/// Type Name and Type Id
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub type_id: TypeId,
}
impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> TypeInfo {
        TypeInfo {
            type_name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    /// Last path segment of the type name, without generic arguments.
    ///
    /// `my_app::services::UserServiceImpl` -> `UserServiceImpl`
    pub fn simple_name(&self) -> &'static str {
        let name = self.type_name.trim_start_matches("dyn ");
        let name = match name.find('<') {
            Some(generics) => &name[..generics],
            None => name,
        };
        match name.rfind("::") {
            Some(separator) => &name[separator + 2..],
            None => name,
        }
    }
}

/// Renders a dependency chain as `A -> B -> A`
pub(crate) fn format_chain(chain: &[TypeInfo]) -> String {
    chain
        .iter()
        .map(|info| info.type_name)
        .collect::<Vec<_>>()
        .join(" -> ")
}
