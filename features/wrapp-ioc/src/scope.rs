use std::{
    any::TypeId,
    collections::{hash_map::Entry, HashMap},
};

use crate::{
    errors::InjectError,
    types::{Instance, TypeInfo},
};

/// Construction progress of a component
///
/// Only ever moves forward: `NotCreated -> Creating -> Created | Failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreationState {
    #[default]
    NotCreated,
    /// Construction is in progress on the current resolution path
    Creating,
    Created,
    /// Construction failed, every later request reports the same error
    Failed,
}

/// Creation state of every component requested so far
#[derive(Debug, Default)]
pub struct CreationStates {
    states: HashMap<TypeId, CreationState>,
    /// Why a component is `Failed`
    failures: HashMap<TypeId, InjectError>,
    /// The failure recorded first, in case a lifecycle hook swallowed it
    first_failure: Option<InjectError>,
}

impl CreationStates {
    pub fn get(&self, info: TypeInfo) -> CreationState {
        self.states.get(&info.type_id).copied().unwrap_or_default()
    }

    /// `NotCreated -> Creating`
    ///
    /// `chain` is the current resolution path, reported when a cycle is found.
    pub fn begin(&mut self, info: TypeInfo, chain: &[TypeInfo]) -> Result<(), InjectError> {
        match self.get(info) {
            CreationState::NotCreated => {
                self.states.insert(info.type_id, CreationState::Creating);
                Ok(())
            }
            CreationState::Creating => {
                let start = chain.iter().position(|entry| *entry == info);
                let mut chain = match start {
                    Some(start) => chain[start..].to_vec(),
                    None => Vec::new(),
                };
                chain.push(info);
                Err(InjectError::CircularDependency {
                    component: info,
                    chain,
                })
            }
            CreationState::Created => Err(InjectError::AlreadyCreated(info)),
            CreationState::Failed => Err(self.failure_of(info)),
        }
    }

    /// `Creating -> Created`, or `NotCreated -> Created` for instances registered ready-made
    pub fn complete(&mut self, info: TypeInfo) -> Result<(), InjectError> {
        match self.get(info) {
            CreationState::Created => Err(InjectError::AlreadyCreated(info)),
            CreationState::Failed => Err(self.failure_of(info)),
            _ => {
                self.states.insert(info.type_id, CreationState::Created);
                Ok(())
            }
        }
    }

    /// `Creating -> Failed`, keeping the error to report it again on re-entry
    pub fn fail(&mut self, info: TypeInfo, error: InjectError) {
        if self.get(info) != CreationState::Creating {
            return;
        }
        self.states.insert(info.type_id, CreationState::Failed);
        self.record(error.clone());
        self.failures.insert(info.type_id, error);
    }

    /// Remembers a failure that does not change any state, e.g. a failed lifecycle hook
    pub fn record(&mut self, error: InjectError) {
        self.first_failure.get_or_insert(error);
    }

    pub fn first_failure(&self) -> Option<&InjectError> {
        self.first_failure.as_ref()
    }

    fn failure_of(&self, info: TypeInfo) -> InjectError {
        self.failures
            .get(&info.type_id)
            .cloned()
            .unwrap_or(InjectError::UnknownComponent(info))
    }
}

/// All singletons created so far, by concrete type
///
/// Written only while the container starts up.
#[derive(Debug, Default, Clone)]
pub struct ApplicationScope {
    instances: HashMap<TypeId, Instance>,
}

impl ApplicationScope {
    pub fn get(&self, info: TypeInfo) -> Option<&Instance> {
        self.instances.get(&info.type_id)
    }

    pub fn contains(&self, info: TypeInfo) -> bool {
        self.instances.contains_key(&info.type_id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.instances.values()
    }

    /// Stores the singleton - each type exactly once
    pub(crate) fn insert(&mut self, instance: Instance) -> Result<(), InjectError> {
        match self.instances.entry(instance.info.type_id) {
            Entry::Occupied(_) => Err(InjectError::AlreadyCreated(instance.info)),
            Entry::Vacant(entry) => {
                entry.insert(instance);
                Ok(())
            }
        }
    }
}
