use crate::{
    binding::{Binding, BindingTable},
    errors::ResolveError,
    types::TypeInfo,
};

/// Picks exactly one implementation of `capability`
///
/// - With a qualifier, the implementation whose qualifier matches exactly.
/// - Without, the first one in the table's order - the lowest qualifier.
///   Callers relying on a specific implementation among several must qualify.
pub fn resolve<'a>(
    capability: TypeInfo,
    bindings: &'a BindingTable,
    qualifier: Option<&str>,
) -> Result<&'a Binding, ResolveError> {
    let candidates = bindings.bindings(capability);
    let Some(first) = candidates.first() else {
        return Err(ResolveError::NoImplementationFound(capability));
    };

    let Some(qualifier) = qualifier else {
        if candidates.len() > 1 {
            tracing::debug!(
                "{} implementations bound to {}, picking '{}'",
                candidates.len(),
                capability,
                first.qualifier
            );
        }
        return Ok(first);
    };

    candidates
        .iter()
        .find(|binding| binding.qualifier == qualifier)
        .ok_or_else(|| ResolveError::QualifierNotFound {
            capability,
            qualifier: qualifier.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{descriptor::Component, factories::Constructor};

    trait Transport: Send + Sync {}

    struct Http;
    impl Transport for Http {}

    struct Grpc;
    impl Transport for Grpc {}

    fn table() -> BindingTable {
        let catalog = vec![
            Component::<Http>::new()
                .provides::<dyn Transport>(|it| it)
                .constructor(Constructor::no_args(|| Http))
                .into_descriptor(),
            Component::<Grpc>::new()
                .provides::<dyn Transport>(|it| it)
                .constructor(Constructor::no_args(|| Grpc))
                .into_descriptor(),
        ];
        BindingTable::build(&catalog)
    }

    #[test]
    fn qualifier_selects_matching_implementation() {
        let table = table();
        let binding = resolve(TypeInfo::of::<dyn Transport>(), &table, Some("Http")).unwrap();
        assert_eq!(binding.concrete, TypeInfo::of::<Http>());
    }

    #[test]
    fn unknown_qualifier_fails() {
        let table = table();
        assert_eq!(
            resolve(TypeInfo::of::<dyn Transport>(), &table, Some("Smtp")).unwrap_err(),
            ResolveError::QualifierNotFound {
                capability: TypeInfo::of::<dyn Transport>(),
                qualifier: "Smtp".to_string(),
            }
        );
    }

    #[test]
    fn unqualified_choice_is_stable() {
        let table = table();
        let first = resolve(TypeInfo::of::<dyn Transport>(), &table, None).unwrap();
        let second = resolve(TypeInfo::of::<dyn Transport>(), &table, None).unwrap();
        assert_eq!(first.concrete, second.concrete);
        // Lowest qualifier
        assert_eq!(first.concrete, TypeInfo::of::<Grpc>());
    }

    #[test]
    fn nothing_bound_fails() {
        let table = table();
        assert_eq!(
            resolve(TypeInfo::of::<Http>(), &table, None).unwrap_err(),
            ResolveError::NoImplementationFound(TypeInfo::of::<Http>())
        );
    }
}
