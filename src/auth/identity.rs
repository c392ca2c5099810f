use std::sync::Arc;

use crate::auth::Requester;

/// Supplies the authenticated rider for the current session.
pub trait IdentityProvider {
    fn current_requester(&self) -> Requester;
}

pub type DynIdentity = Arc<dyn IdentityProvider + Send + Sync>;

/// Always reports the same rider; sessions live outside this service.
#[derive(Clone, Debug)]
pub struct StaticIdentity {
    requester: Requester,
}

impl StaticIdentity {
    pub fn new(requester: Requester) -> Self {
        if !requester.has_known_profile() {
            tracing::debug!(profile = %requester.profile, "requester profile is not one of the standard categories");
        }

        Self { requester }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_requester(&self) -> Requester {
        self.requester.clone()
    }
}
