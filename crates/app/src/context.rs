//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        collections::{CollectionsService, PgCollectionsService},
        customers::{CustomersService, PgCustomersService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        reviews::{PgReviewsService, ReviewsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub collections: Arc<dyn CollectionsService>,
    pub products: Arc<dyn ProductsService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub carts: Arc<dyn CartsService>,
    pub customers: Arc<dyn CustomersService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, max_connections: u32) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        Ok(Self {
            auth: Arc::new(PgAuthService::new(pool)),
            collections: Arc::new(PgCollectionsService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            customers: Arc::new(PgCustomersService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db)),
        })
    }
}
