/// What to do with a component that has neither a designated nor a no-argument constructor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConstructorFallback {
    /// Use the first declared constructor
    #[default]
    FirstDeclared,
    /// Fail with [crate::InjectError::UndesignatedConstructor]
    ///
    /// Declaration order is rarely a meaningful signal, use this to require an explicit designation.
    Reject,
}

/// Startup behaviour of the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectorOptions {
    pub constructor_fallback: ConstructorFallback,
    /// Construct every registered component on startup, not only those reachable from the entry type
    pub construct_all: bool,
}

impl Default for InjectorOptions {
    fn default() -> Self {
        InjectorOptions {
            constructor_fallback: ConstructorFallback::default(),
            construct_all: true,
        }
    }
}

impl InjectorOptions {
    pub fn constructor_fallback(mut self, fallback: ConstructorFallback) -> Self {
        self.constructor_fallback = fallback;
        self
    }

    pub fn construct_all(mut self, construct_all: bool) -> Self {
        self.construct_all = construct_all;
        self
    }
}
