//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use validator::Validate;

use crate::{
    database::Db,
    domain::carts::{
        data::{CartItemUpdate, NewCart, NewCartItem},
        errors::CartsServiceError,
        records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
        repositories::{PgCartItemsRepository, PgCartsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn create_cart(&self, cart: NewCart) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .carts_repository
            .create_cart(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        info!(cart_uuid = %created.uuid, "created cart");

        Ok(created)
    }

    async fn get_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut record = self.carts_repository.get_cart(&mut tx, cart).await?;

        let items = self.items_repository.list_cart_items(&mut tx, cart).await?;

        tx.commit().await?;

        record.items = items;

        Ok(record)
    }

    async fn update_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut record = self
            .carts_repository
            .touch_cart(&mut tx, cart)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        record.items = self.items_repository.list_cart_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn delete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.carts_repository.delete_cart(&mut tx, cart).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(cart_uuid = %cart, "deleted cart");

        Ok(())
    }

    async fn list_items(&self, cart: CartUuid) -> Result<Vec<CartItemRecord>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.carts_repository.get_cart(&mut tx, cart).await?;

        let items = self.items_repository.list_cart_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_item(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let item = self
            .items_repository
            .get_cart_item(&mut tx, cart, item)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn add_item(
        &self,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        item.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        self.carts_repository
            .touch_cart(&mut tx, cart)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let item = self
            .items_repository
            .upsert_cart_item(&mut tx, cart, item)
            .await?;

        tx.commit().await?;

        info!(
            cart_uuid = %cart,
            item_uuid = %item.uuid,
            quantity = item.quantity,
            "added cart item"
        );

        Ok(item)
    }

    async fn update_item_quantity(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
        update: CartItemUpdate,
    ) -> Result<CartItemRecord, CartsServiceError> {
        update.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        self.carts_repository
            .touch_cart(&mut tx, cart)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let item = self
            .items_repository
            .update_cart_item_quantity(&mut tx, cart, item, update.quantity)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn remove_item(&self, cart: CartUuid, item: CartItemUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.carts_repository
            .touch_cart(&mut tx, cart)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Creates a new, empty cart.
    async fn create_cart(&self, cart: NewCart) -> Result<CartRecord, CartsServiceError>;

    /// Retrieve a single cart with its items.
    async fn get_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError>;

    /// Refresh a cart's `updated_at` and return it with its items.
    async fn update_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError>;

    /// Deletes a cart and its items.
    async fn delete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError>;

    /// Lists the items of a cart.
    async fn list_items(&self, cart: CartUuid) -> Result<Vec<CartItemRecord>, CartsServiceError>;

    /// Retrieve a single cart item.
    async fn get_item(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Add a product to the given cart, merging with an existing line for the
    /// same product.
    async fn add_item(
        &self,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Set the quantity of a cart item.
    async fn update_item_quantity(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
        update: CartItemUpdate,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove an item from the given cart.
    async fn remove_item(&self, cart: CartUuid, item: CartItemUuid) -> Result<(), CartsServiceError>;
}
