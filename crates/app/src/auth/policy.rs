//! Role-based authorization policy.
//!
//! Every externally reachable operation maps to one [`Capability`]. Transport
//! layers gate requests with [`authorize`]; services that can resolve the owner of
//! a resource finish the check with [`authorize_owner`].

use thiserror::Error;

use crate::{auth::Principal, domain::users::records::UserUuid};

/// What a caller must be to perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Anyone, including anonymous callers.
    Public,

    /// Any authenticated user.
    Authenticated,

    /// Staff users only.
    Admin,

    /// The user owning the resource, or staff.
    OwnerOrAdmin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateCart,
    GetCart,
    UpdateCart,
    DeleteCart,
    ListCartItems,
    GetCartItem,
    AddCartItem,
    UpdateCartItem,
    RemoveCartItem,

    ListCollections,
    GetCollection,
    CreateCollection,
    UpdateCollection,
    DeleteCollection,

    ListProducts,
    GetProduct,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,

    ListReviews,
    GetReview,
    CreateReview,
    UpdateReview,
    DeleteReview,

    ListCustomers,
    CreateCustomer,
    GetCustomer,
    GetOwnCustomer,
    UpdateCustomer,
    DeleteCustomer,

    CreateOrder,
    ListOrders,
    GetOrder,
    CancelOrder,
    SetOrderStatus,
    ListOrderItems,
    GetOrderItem,
}

impl Operation {
    #[must_use]
    pub const fn capability(self) -> Capability {
        match self {
            Self::CreateCart
            | Self::GetCart
            | Self::UpdateCart
            | Self::DeleteCart
            | Self::ListCartItems
            | Self::GetCartItem
            | Self::AddCartItem
            | Self::UpdateCartItem
            | Self::RemoveCartItem
            | Self::ListCollections
            | Self::GetCollection
            | Self::ListProducts
            | Self::GetProduct
            | Self::ListReviews
            | Self::GetReview => Capability::Public,

            Self::CreateReview
            | Self::GetOwnCustomer
            | Self::CreateOrder
            | Self::ListOrders => Capability::Authenticated,

            Self::CreateCollection
            | Self::UpdateCollection
            | Self::DeleteCollection
            | Self::CreateProduct
            | Self::UpdateProduct
            | Self::DeleteProduct
            | Self::ListCustomers
            | Self::SetOrderStatus => Capability::Admin,

            Self::UpdateReview
            | Self::DeleteReview
            | Self::CreateCustomer
            | Self::GetCustomer
            | Self::UpdateCustomer
            | Self::DeleteCustomer
            | Self::GetOrder
            | Self::CancelOrder
            | Self::ListOrderItems
            | Self::GetOrderItem => Capability::OwnerOrAdmin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("operation not permitted")]
    Forbidden,
}

/// Gate an operation on who the caller is.
///
/// For [`Capability::OwnerOrAdmin`] operations this only requires an
/// authenticated caller; ownership is checked by [`authorize_owner`] once the
/// resource has been loaded.
///
/// # Errors
///
/// Returns [`PolicyError::Unauthenticated`] for anonymous callers of non-public
/// operations and [`PolicyError::Forbidden`] for non-staff callers of admin
/// operations.
pub fn authorize(
    operation: Operation,
    principal: Option<Principal>,
) -> Result<Option<Principal>, PolicyError> {
    match (operation.capability(), principal) {
        (Capability::Public, principal) => Ok(principal),
        (_, None) => Err(PolicyError::Unauthenticated),
        (Capability::Admin, Some(principal)) if !principal.is_staff => Err(PolicyError::Forbidden),
        (Capability::Authenticated | Capability::Admin | Capability::OwnerOrAdmin, principal) => {
            Ok(principal)
        }
    }
}

/// Check an operation against the user owning the affected resource.
///
/// # Errors
///
/// Returns [`PolicyError::Forbidden`] when the operation requires ownership and the
/// actor neither owns the resource nor is staff, or when an admin-only operation is
/// attempted by a non-staff actor.
pub fn authorize_owner(
    operation: Operation,
    actor: Principal,
    owner: UserUuid,
) -> Result<(), PolicyError> {
    let permitted = match operation.capability() {
        Capability::Public | Capability::Authenticated => true,
        Capability::Admin => actor.is_staff,
        Capability::OwnerOrAdmin => actor.is_staff || actor.user_uuid == owner,
    };

    if permitted {
        Ok(())
    } else {
        Err(PolicyError::Forbidden)
    }
}
