//! Scoped ownership of a runtime context
//!
//! [`ContextGuard`] disposes the wrapped context when it goes out of
//! scope, whether the caller returns normally, bails out with `?`, or
//! unwinds.

use std::ops::{Deref, DerefMut};

use super::RuntimeContext;

/// Owns a [`RuntimeContext`] and disposes it exactly once on drop
pub struct ContextGuard {
    context: Box<dyn RuntimeContext>,
}

impl ContextGuard {
    /// Take ownership of a freshly created context
    pub fn new(context: Box<dyn RuntimeContext>) -> Self {
        Self { context }
    }
}

impl Deref for ContextGuard {
    type Target = dyn RuntimeContext;

    fn deref(&self) -> &Self::Target {
        self.context.as_ref()
    }
}

impl DerefMut for ContextGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context.as_mut()
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        tracing::trace!("disposing runtime context");
        self.context.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ActionParameter;
    use crate::error::EngineResult;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingContext(Arc<AtomicUsize>);

    impl RuntimeContext for CountingContext {
        fn output_names(&self) -> Vec<String> {
            Vec::new()
        }

        fn output_parameter(&self, _name: &str) -> EngineResult<Option<&ActionParameter>> {
            Ok(None)
        }

        fn dispose(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_dispose_on_drop() {
        let disposed = Arc::new(AtomicUsize::new(0));
        {
            let guard = ContextGuard::new(Box::new(CountingContext(disposed.clone())));
            assert!(guard.output_names().is_empty());
            assert_eq!(disposed.load(Ordering::SeqCst), 0);
        }
        assert_eq!(disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispose_on_unwind() {
        let disposed = Arc::new(AtomicUsize::new(0));
        let counter = disposed.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = ContextGuard::new(Box::new(CountingContext(counter)));
            panic!("engine blew up");
        });

        assert!(result.is_err());
        assert_eq!(disposed.load(Ordering::SeqCst), 1);
    }
}
