use std::{any::TypeId, collections::BTreeMap};

use crate::{
    descriptor::{Capability, TypeDescriptor},
    errors::RequireError,
    types::{Instance, Resolved, TypeInfo},
};

/// One implementation bound to a capability
#[derive(Clone, Debug)]
pub struct Binding {
    /// The implementing component
    pub concrete: TypeInfo,
    /// Name used to pick this implementation among several
    pub qualifier: String,
    capability: Capability,
}

impl Binding {
    /// Converts the implementation's instance into the bound capability
    pub fn upcast(&self, instance: &Instance) -> Result<Resolved, RequireError> {
        self.capability.upcast(instance)
    }
}

/// Maps each capability to every implementation bound to it
///
/// Built once on startup, read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct BindingTable {
    map: BTreeMap<TypeId, Vec<Binding>>,
}

impl BindingTable {
    /// Binds every descriptor under each of its capabilities, or under itself if it declares none
    ///
    /// All implementations are kept. Within a capability they are ordered by qualifier, then type name,
    /// which makes the unqualified choice stable across runs.
    pub fn build<'a>(catalog: impl IntoIterator<Item = &'a TypeDescriptor>) -> Self {
        let mut table = BindingTable::default();

        for descriptor in catalog {
            for capability in descriptor.bound_capabilities() {
                tracing::debug!(
                    "Binding {} as '{}' to {}",
                    descriptor.info(),
                    descriptor.qualifier(),
                    capability.info
                );
                table
                    .map
                    .entry(capability.info.type_id)
                    .or_default()
                    .push(Binding {
                        concrete: descriptor.info(),
                        qualifier: descriptor.qualifier().to_string(),
                        capability: capability.clone(),
                    });
            }
        }

        for bindings in table.map.values_mut() {
            bindings.sort_by(|a, b| {
                (a.qualifier.as_str(), a.concrete.type_name)
                    .cmp(&(b.qualifier.as_str(), b.concrete.type_name))
            });
        }

        table
    }

    /// All implementations bound to the capability, empty if there are none
    pub fn bindings(&self, capability: TypeInfo) -> &[Binding] {
        self.map
            .get(&capability.type_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of bound capabilities
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
