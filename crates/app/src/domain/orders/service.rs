//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    auth::{
        Principal,
        policy::{Operation, PolicyError, authorize, authorize_owner},
    },
    database::Db,
    domain::{
        carts::{
            records::CartUuid,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        customers::repository::PgCustomersRepository,
        orders::{
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
            status::OrderStatus,
        },
        users::records::UserUuid,
    },
};

/// Order reads are scoped to the caller: another customer's order reads as
/// absent rather than forbidden.
fn ensure_visible(
    operation: Operation,
    actor: Principal,
    owner: UserUuid,
) -> Result<(), OrdersServiceError> {
    authorize_owner(operation, actor, owner).map_err(|error| match error {
        PolicyError::Forbidden => OrdersServiceError::NotFound,
        PolicyError::Unauthenticated => OrdersServiceError::Policy(error),
    })
}

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    carts_repository: PgCartsRepository,
    cart_items_repository: PgCartItemsRepository,
    customers_repository: PgCustomersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
            customers_repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.create",
        skip(self, actor),
        fields(
            user_uuid = %actor.user_uuid,
            customer_uuid = tracing::field::Empty,
            order_uuid = tracing::field::Empty,
            item_count = tracing::field::Empty
        ),
        err
    )]
    async fn create_order(
        &self,
        actor: Principal,
        cart: CartUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        authorize(Operation::CreateOrder, Some(actor))?;

        let span = Span::current();

        let mut tx = self.db.begin_transaction().await?;

        let customer = self
            .customers_repository
            .find_customer_by_user(&mut tx, actor.user_uuid)
            .await?
            .ok_or(OrdersServiceError::NoCustomerProfile)?;

        span.record("customer_uuid", tracing::field::display(customer.uuid));

        // A conversion racing us holds this lock until it has deleted the cart.
        if self
            .carts_repository
            .lock_cart(&mut tx, cart)
            .await?
            .is_none()
        {
            return Err(OrdersServiceError::EmptyCart);
        }

        let cart_items = self
            .cart_items_repository
            .list_cart_items(&mut tx, cart)
            .await?;

        if cart_items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        span.record("item_count", cart_items.len());

        let mut order = self
            .orders_repository
            .create_order(&mut tx, OrderUuid::new(), customer.uuid)
            .await?;

        span.record("order_uuid", tracing::field::display(order.uuid));

        order.items = self
            .items_repository
            .create_order_items(&mut tx, order.uuid, &cart_items)
            .await?;

        self.carts_repository.delete_cart(&mut tx, cart).await?;

        tx.commit().await?;

        info!(order_uuid = %order.uuid, cart_uuid = %cart, "created order from cart");

        Ok(order)
    }

    async fn list_orders(&self, actor: Principal) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        authorize(Operation::ListOrders, Some(actor))?;

        let mut tx = self.db.begin_transaction().await?;

        let owner = (!actor.is_staff).then_some(actor.user_uuid);

        let mut orders = self.orders_repository.list_orders(&mut tx, owner).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let items = self
            .items_repository
            .list_order_items(&mut tx, &uuids)
            .await?;

        tx.commit().await?;

        for item in items {
            if let Some(order) = orders.iter_mut().find(|order| order.uuid == item.order_uuid) {
                order.items.push(item);
            }
        }

        Ok(orders)
    }

    async fn get_order(
        &self,
        actor: Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut record = self.orders_repository.get_order(&mut tx, order).await?;

        ensure_visible(Operation::GetOrder, actor, record.customer_user_uuid)?;

        record.items = self
            .items_repository
            .list_order_items(&mut tx, &[order])
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn cancel_order(
        &self,
        actor: Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self.orders_repository.lock_order(&mut tx, order).await?;

        authorize_owner(Operation::CancelOrder, actor, current.customer_user_uuid)?;

        if current.status != OrderStatus::Pending {
            return Err(OrdersServiceError::NotCancellable {
                status: current.status,
            });
        }

        let mut updated = self
            .orders_repository
            .set_order_status(&mut tx, order, OrderStatus::Cancelled)
            .await?;

        updated.items = self
            .items_repository
            .list_order_items(&mut tx, &[order])
            .await?;

        tx.commit().await?;

        info!(order_uuid = %order, "cancelled order");

        Ok(updated)
    }

    async fn set_order_status(
        &self,
        actor: Principal,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        authorize(Operation::SetOrderStatus, Some(actor))?;

        let mut tx = self.db.begin_transaction().await?;

        let current = self.orders_repository.lock_order(&mut tx, order).await?;

        if !current.status.can_transition_to(status) {
            return Err(OrdersServiceError::IllegalTransition {
                from: current.status,
                to: status,
            });
        }

        let mut updated = self
            .orders_repository
            .set_order_status(&mut tx, order, status)
            .await?;

        updated.items = self
            .items_repository
            .list_order_items(&mut tx, &[order])
            .await?;

        tx.commit().await?;

        info!(
            order_uuid = %order,
            from = current.status.code(),
            to = status.code(),
            "changed order status"
        );

        Ok(updated)
    }

    async fn list_order_items(
        &self,
        actor: Principal,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.orders_repository.get_order(&mut tx, order).await?;

        ensure_visible(Operation::ListOrderItems, actor, record.customer_user_uuid)?;

        let items = self
            .items_repository
            .list_order_items(&mut tx, &[order])
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_order_item(
        &self,
        actor: Principal,
        order: OrderUuid,
        item: OrderItemUuid,
    ) -> Result<OrderItemRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.orders_repository.get_order(&mut tx, order).await?;

        ensure_visible(Operation::GetOrderItem, actor, record.customer_user_uuid)?;

        let item = self
            .items_repository
            .get_order_item(&mut tx, order, item)
            .await?;

        tx.commit().await?;

        Ok(item)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Converts a cart into a pending order for the actor's customer profile.
    ///
    /// Copies every cart line onto the order and deletes the cart, all in one
    /// transaction.
    async fn create_order(
        &self,
        actor: Principal,
        cart: CartUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// All orders for staff, the actor's own orders otherwise.
    async fn list_orders(&self, actor: Principal) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Orders owned by someone else read as [`OrdersServiceError::NotFound`]
    /// unless the actor is staff.
    async fn get_order(
        &self,
        actor: Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Cancels a pending order.
    async fn cancel_order(
        &self,
        actor: Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Moves an order to another status along the transition table. Staff only.
    async fn set_order_status(
        &self,
        actor: Principal,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn list_order_items(
        &self,
        actor: Principal,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, OrdersServiceError>;

    async fn get_order_item(
        &self,
        actor: Principal,
        order: OrderUuid,
        item: OrderItemUuid,
    ) -> Result<OrderItemRecord, OrdersServiceError>;
}
