//! Authenticated caller helpers.

use salvo::prelude::{Depot, StatusError};

use storefront_app::auth::{
    Principal,
    policy::{Operation, authorize},
};

use crate::auth::policy_status_error;

/// Access to the caller resolved by the auth middleware.
pub(crate) trait PrincipalExt {
    fn insert_principal(&mut self, principal: Principal) -> &mut Self;

    /// The authenticated caller, `None` for anonymous requests.
    fn principal(&self) -> Option<Principal>;

    /// Gate `operation` on the current caller.
    fn authorize(&self, operation: Operation) -> Result<Option<Principal>, StatusError> {
        authorize(operation, self.principal()).map_err(policy_status_error)
    }

    /// Gate `operation` and require an authenticated caller.
    fn authorize_principal(&self, operation: Operation) -> Result<Principal, StatusError> {
        self.authorize(operation)?
            .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))
    }
}

impl PrincipalExt for Depot {
    fn insert_principal(&mut self, principal: Principal) -> &mut Self {
        self.inject(principal)
    }

    fn principal(&self) -> Option<Principal> {
        self.obtain::<Principal>().ok().copied()
    }
}
