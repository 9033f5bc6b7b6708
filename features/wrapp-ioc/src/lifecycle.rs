use std::sync::Arc;

use crate::{
    descriptor::TypeDescriptor, errors::InjectError, initiator::DiInitiator, types::Instance,
};

/// Invokes the lifecycle hook of a freshly stored instance
///
/// No-op without a hook. Fails if more than one hook is declared or if the hook takes parameters.
pub fn invoke(
    instance: &Instance,
    descriptor: &TypeDescriptor,
    di: &mut DiInitiator,
) -> Result<(), InjectError> {
    let hook = match descriptor.lifecycle_hooks() {
        [] => return Ok(()),
        [hook] => hook,
        hooks => {
            return Err(InjectError::AmbiguousLifecycleHook {
                component: descriptor.info(),
                hooks: hooks.iter().map(|hook| hook.name).collect(),
            })
        }
    };

    if !hook.parameters.is_empty() {
        return Err(InjectError::InvalidLifecycleSignature {
            component: descriptor.info(),
            hook: hook.name,
            parameters: hook.parameters.len(),
        });
    }

    tracing::debug!("Invoking {}::{}", descriptor.info(), hook.name);
    hook.call(instance, di)
        .map_err(|error| InjectError::LifecycleHookFailed {
            component: descriptor.info(),
            hook: hook.name,
            error: Arc::new(error),
        })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{
        descriptor::{Component, LifecycleHook},
        types::TypeInfo,
    };

    #[derive(Default)]
    struct Counter {
        calls: AtomicUsize,
    }

    fn count(counter: &Counter, _di: &mut DiInitiator) -> Result<(), crate::types::DynError> {
        counter.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn invoke_on(component: Component<Counter>) -> (Arc<Counter>, Result<(), InjectError>) {
        let descriptor = component.into_descriptor();
        let instance = Instance::new(Counter::default());
        let mut di = DiInitiator::default();
        let result = invoke(&instance, &descriptor, &mut di);
        (instance.downcast().unwrap(), result)
    }

    #[test]
    fn without_hook_is_a_no_op() {
        let (_, result) = invoke_on(Component::new());
        assert!(result.is_ok());
    }

    #[test]
    fn invokes_the_single_hook_once() {
        let (counter, result) = invoke_on(Component::new().post_construct("count", count));
        result.unwrap();
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rejects_more_than_one_hook() {
        let (counter, result) = invoke_on(
            Component::new()
                .post_construct("first", count)
                .post_construct("second", count),
        );
        match result {
            Err(InjectError::AmbiguousLifecycleHook { hooks, .. }) => {
                assert_eq!(hooks, vec!["first", "second"]);
            }
            other => panic!("expected an ambiguous hook, got {other:?}"),
        }
        assert_eq!(counter.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn rejects_hook_with_parameters() {
        let hook = LifecycleHook::new::<Counter, _>("count", count).with_parameters(vec![TypeInfo::of::<u8>()]);
        let (counter, result) = invoke_on(Component::new().lifecycle_hook(hook));
        assert!(matches!(
            result,
            Err(InjectError::InvalidLifecycleSignature { parameters: 1, .. })
        ));
        assert_eq!(counter.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn hook_errors_abort() {
        let (_, result) = invoke_on(
            Component::new().post_construct("fail", |_, _| Err("not today".into())),
        );
        assert!(matches!(result, Err(InjectError::LifecycleHookFailed { hook: "fail", .. })));
    }
}
