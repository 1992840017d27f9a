//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

use crate::auth::policy_status_error;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::NoCustomerProfile => StatusError::bad_request()
            .brief("A customer profile is required before placing an order"),
        OrdersServiceError::EmptyCart => {
            StatusError::bad_request().brief("Cannot create an empty order")
        }
        OrdersServiceError::NotCancellable { status } => StatusError::bad_request().brief(format!(
            "Only pending orders can be cancelled (order is {})",
            status.label()
        )),
        OrdersServiceError::IllegalTransition { from, to } => StatusError::bad_request().brief(
            format!("Cannot change order status from {} to {}", from.label(), to.label()),
        ),
        OrdersServiceError::Policy(policy) => policy_status_error(policy),
        OrdersServiceError::InvalidReference => StatusError::bad_request()
            .brief("A product or customer on this order no longer exists"),
        OrdersServiceError::MissingRequiredData | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront_app::{auth::policy::PolicyError, domain::orders::OrderStatus};

    use super::*;

    #[test]
    fn conversion_failures_are_bad_requests() {
        for error in [OrdersServiceError::EmptyCart, OrdersServiceError::NoCustomerProfile] {
            assert_eq!(into_status_error(error).code, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn not_cancellable_names_the_current_status() {
        let error = into_status_error(OrdersServiceError::NotCancellable {
            status: OrderStatus::Shipped,
        });

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert!(
            error.brief.contains("Shipped"),
            "unexpected brief: {}",
            error.brief
        );
    }

    #[test]
    fn forbidden_maps_to_403() {
        assert_eq!(
            into_status_error(OrdersServiceError::Policy(PolicyError::Forbidden)).code,
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn dangling_reference_names_the_order_not_a_cart() {
        let error = into_status_error(OrdersServiceError::InvalidReference);

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert!(
            !error.brief.contains("Cart"),
            "unexpected brief: {}",
            error.brief
        );
        assert!(error.brief.contains("order"), "unexpected brief: {}", error.brief);
    }
}
