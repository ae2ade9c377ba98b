//! Authorization capabilities for CRUD operations.
//!
//! The façade evaluates the matching capability before an operation proceeds.
//! Checks are async so implementations can consult an external policy engine;
//! every method defaults to allow, so `impl CrudAuthorizer for MyAuth {}`
//! plus the overrides you care about is a complete implementation.

use std::future::{ready, Future};

/// The CRUD capability being exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudAction {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl std::fmt::Display for CrudAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CrudAction::Create => "create",
            CrudAction::Read => "read",
            CrudAction::Update => "update",
            CrudAction::Delete => "delete",
            CrudAction::List => "list",
        };
        f.write_str(name)
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone)]
pub struct Decision {
    allow: bool,
    reason: Option<String>,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            allow: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allow: false,
            reason: Some(reason.into()),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allow
    }

    /// Denial reason, if one was given.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// Per-capability authorization checks evaluated by the CRUD façade.
///
/// Uses RPITIT (return-position `impl Trait` in traits) — no `async-trait`
/// needed. All methods default to [`Decision::allow`].
pub trait CrudAuthorizer: Send + Sync {
    fn can_create(&self) -> impl Future<Output = Decision> + Send {
        ready(Decision::allow())
    }

    fn can_read(&self) -> impl Future<Output = Decision> + Send {
        ready(Decision::allow())
    }

    fn can_update(&self) -> impl Future<Output = Decision> + Send {
        ready(Decision::allow())
    }

    fn can_delete(&self) -> impl Future<Output = Decision> + Send {
        ready(Decision::allow())
    }

    fn can_list(&self) -> impl Future<Output = Decision> + Send {
        ready(Decision::allow())
    }
}

/// Authorizer that permits every action.
///
/// The default for services that gate authorization elsewhere (or not at all).
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl CrudAuthorizer for AllowAll {}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnly;

    impl CrudAuthorizer for ReadOnly {
        fn can_create(&self) -> impl Future<Output = Decision> + Send {
            ready(Decision::deny("read-only"))
        }

        fn can_update(&self) -> impl Future<Output = Decision> + Send {
            ready(Decision::deny("read-only"))
        }

        fn can_delete(&self) -> impl Future<Output = Decision> + Send {
            ready(Decision::deny("read-only"))
        }
    }

    #[test]
    fn allow_all_permits_everything() {
        let auth = AllowAll;
        assert!(futures_block(auth.can_create()).is_allowed());
        assert!(futures_block(auth.can_list()).is_allowed());
    }

    #[test]
    fn overridden_capabilities_deny_with_reason() {
        let auth = ReadOnly;
        let decision = futures_block(auth.can_delete());
        assert!(!decision.is_allowed());
        assert_eq!(decision.reason(), Some("read-only"));
        // Non-overridden capabilities keep the allow default.
        assert!(futures_block(auth.can_read()).is_allowed());
    }

    // The default impls are `ready` futures; poll them without a runtime.
    fn futures_block<F: Future>(fut: F) -> F::Output {
        let mut fut = std::pin::pin!(fut);
        let waker = std::task::Waker::noop();
        let mut cx = std::task::Context::from_waker(waker);
        match fut.as_mut().poll(&mut cx) {
            std::task::Poll::Ready(out) => out,
            std::task::Poll::Pending => unreachable!("ready future returned Pending"),
        }
    }
}
