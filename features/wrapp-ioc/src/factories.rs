use std::{fmt::Debug, sync::Arc};

use crate::{
    errors::RequireError,
    types::{DynError, Injectable, Instance, ParamSpec, Resolved, TypeInfo},
};

type ConstructFn<T> = Arc<dyn Fn(&mut Arguments) -> Result<T, DynError> + Send + Sync>;

/// A constructor of `T`
///
/// Declares its parameters in order; the closure receives them, already resolved, through [Arguments].
///
/// # Example
/// ```rust
/// # use std::sync::Arc;
/// # use wrapp_ioc::Constructor;
/// struct Repository;
/// struct Service { repository: Arc<Repository> }
///
/// let constructor = Constructor::new(|args| {
///     Ok(Service { repository: args.take()? })
/// })
/// .param::<Repository>()
/// .designated();
/// ```
pub struct Constructor<T> {
    designated: bool,
    parameters: Vec<ParamSpec>,
    construct: ConstructFn<T>,
}

impl<T: Injectable> Constructor<T> {
    pub fn new<F>(construct: F) -> Self
    where
        F: Fn(&mut Arguments) -> Result<T, DynError> + Send + Sync + 'static,
    {
        Constructor {
            designated: false,
            parameters: Vec::new(),
            construct: Arc::new(construct),
        }
    }

    /// A constructor taking no arguments
    pub fn no_args<F>(construct: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::new(move |_| Ok(construct()))
    }

    /// Marks this constructor as the one to use for injection
    pub fn designated(mut self) -> Self {
        self.designated = true;
        self
    }

    /// Appends a parameter of type `P`
    pub fn param<P: ?Sized + 'static>(mut self) -> Self {
        self.parameters.push(ParamSpec::of::<P>());
        self
    }

    /// Appends a parameter of type `P`, picking the implementation named `qualifier`
    pub fn qualified_param<P: ?Sized + 'static>(mut self, qualifier: impl Into<String>) -> Self {
        self.parameters.push(ParamSpec::qualified::<P>(qualifier));
        self
    }

    pub(crate) fn into_dyn(self) -> DynConstructor {
        let construct = self.construct;
        DynConstructor {
            designated: self.designated,
            parameters: self.parameters,
            construct: Arc::new(move |args: &mut Arguments| construct(args).map(Instance::new)),
        }
    }
}

/// Type erased constructor, as held by a [crate::TypeDescriptor]
#[derive(Clone)]
pub struct DynConstructor {
    designated: bool,
    parameters: Vec<ParamSpec>,
    construct: ConstructFn<Instance>,
}

impl DynConstructor {
    pub fn is_designated(&self) -> bool {
        self.designated
    }

    pub fn parameters(&self) -> &[ParamSpec] {
        &self.parameters
    }

    pub fn is_no_args(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Invokes the constructor with already resolved arguments, in declaration order
    pub fn construct(&self, args: &mut Arguments) -> Result<Instance, DynError> {
        (self.construct)(args)
    }
}

impl Debug for DynConstructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynConstructor")
            .field("designated", &self.designated)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Resolved constructor arguments, handed out in declaration order
pub struct Arguments {
    component: TypeInfo,
    declared: usize,
    values: std::vec::IntoIter<Resolved>,
}

impl Arguments {
    pub fn new(component: TypeInfo, values: Vec<Resolved>) -> Self {
        Arguments {
            component,
            declared: values.len(),
            values: values.into_iter(),
        }
    }

    /// Takes the next argument
    ///
    /// Fails if `P` is not the type the parameter was declared with
    pub fn take<P: ?Sized + 'static>(&mut self) -> Result<Arc<P>, RequireError> {
        let next = self
            .values
            .next()
            .ok_or(RequireError::ArgumentsExhausted {
                component: self.component,
                declared: self.declared,
            })?;
        next.downcast()
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        left: Arc<u8>,
        right: Arc<String>,
    }

    fn pair_constructor() -> DynConstructor {
        Constructor::new(|args| {
            Ok(Pair {
                left: args.take()?,
                right: args.take()?,
            })
        })
        .param::<u8>()
        .param::<String>()
        .designated()
        .into_dyn()
    }

    #[test]
    fn constructs_from_arguments_in_order() {
        let constructor = pair_constructor();
        assert!(constructor.is_designated());
        assert!(!constructor.is_no_args());
        assert_eq!(constructor.parameters()[1], ParamSpec::of::<String>());

        let mut args = Arguments::new(
            TypeInfo::of::<Pair>(),
            vec![
                Resolved::new(Arc::new(3_u8)),
                Resolved::new(Arc::new("three".to_string())),
            ],
        );
        let instance = constructor.construct(&mut args).unwrap();
        let pair = instance.downcast::<Pair>().unwrap();
        assert_eq!(*pair.left, 3);
        assert_eq!(pair.right.as_str(), "three");
        assert_eq!(args.remaining(), 0);
    }

    #[test]
    fn wrong_argument_order_fails() {
        let constructor = pair_constructor();
        let mut args = Arguments::new(
            TypeInfo::of::<Pair>(),
            vec![
                Resolved::new(Arc::new("three".to_string())),
                Resolved::new(Arc::new(3_u8)),
            ],
        );
        assert!(constructor.construct(&mut args).is_err());
    }

    #[test]
    fn taking_past_the_declared_parameters_fails() {
        let mut args = Arguments::new(TypeInfo::of::<Pair>(), vec![]);
        assert!(matches!(
            args.take::<u8>(),
            Err(RequireError::ArgumentsExhausted { declared: 0, .. })
        ));
    }
}
