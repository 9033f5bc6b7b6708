//! Wrapp IoC constructs an application's component graph on startup and keeps every component
//! as a singleton.
//!
//! Wrapp IoC is split into three major parts:
//! 1. DiBuilder: Used to declare all components, what they provide and how they are constructed
//! 2. DiInitiator: Resolves and constructs every component, depth first, on the calling thread
//! 3. DiContainer: The read only application scope once startup completed
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use wrapp_ioc::{Component, Constructor, DiBuilder};
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self, name: &str) -> String;
//! }
//!
//! struct English;
//! impl Greeter for English {
//!     fn greet(&self, name: &str) -> String {
//!         format!("Hello {name}")
//!     }
//! }
//!
//! struct German;
//! impl Greeter for German {
//!     fn greet(&self, name: &str) -> String {
//!         format!("Hallo {name}")
//!     }
//! }
//!
//! struct Reception {
//!     greeter: Arc<dyn Greeter>,
//! }
//!
//! let container = DiBuilder::new()
//!     .add_component(
//!         Component::<English>::new()
//!             .provides::<dyn Greeter>(|it| it)
//!             .constructor(Constructor::no_args(|| English)),
//!     )
//!     .add_component(
//!         Component::<German>::new()
//!             .provides::<dyn Greeter>(|it| it)
//!             .constructor(Constructor::no_args(|| German)),
//!     )
//!     .add_component(
//!         Component::<Reception>::new()
//!             .constructor(
//!                 Constructor::new(|args| Ok(Reception { greeter: args.take()? }))
//!                     .qualified_param::<dyn Greeter>("German")
//!                     .designated(),
//!             )
//!             .post_construct("welcome", |reception, _di| {
//!                 println!("{}", reception.greeter.greet("World"));
//!                 Ok(())
//!             }),
//!     )
//!     .start::<Reception>()
//!     .unwrap();
//!
//! let reception = container.require::<Reception>().unwrap();
//! assert_eq!(reception.greeter.greet("Anna"), "Hallo Anna");
//! ```
//!
//! Wrapp IoC consists of the following components:
//!
//! 1. Descriptor & Factories - typed declaration of components, erased into type descriptors
//! 2. Binding & Resolver - which implementations satisfy a capability and picking one of them
//! 3. Initiator, Scope & Lifecycle - the resolution engine
//! 4. Dependency Graph - static check of the catalog
//! 5. Errors - for everything that aborts startup

pub mod binding;
pub mod builder;
pub mod container;
pub mod dependency_graph;
pub mod descriptor;
pub mod errors;
pub mod factories;
pub mod initiator;
pub mod lifecycle;
pub mod options;
pub mod resolver;
pub mod scope;
pub mod types;

pub use builder::DiBuilder;
pub use container::DiContainer;
pub use descriptor::{Capability, Component, LifecycleHook, TypeDescriptor};
pub use errors::{InjectError, RequireError, ResolveError};
pub use factories::{Arguments, Constructor};
pub use initiator::DiInitiator;
pub use options::{ConstructorFallback, InjectorOptions};
pub use types::{DynError, Injectable, Instance, TypeInfo};
