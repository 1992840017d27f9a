//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
        },
        collections::{
            MockCollectionsService,
            records::{CollectionRecord, CollectionUuid},
        },
        customers::{
            MockCustomersService,
            records::{CustomerRecord, CustomerUuid},
        },
        orders::{
            MockOrdersService, OrderStatus,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductSummary, ProductUuid},
        },
        reviews::{
            MockReviewsService,
            records::{ReviewRecord, ReviewUuid},
        },
        users::records::UserUuid,
    },
};

use crate::state::State;

pub(crate) const SHOPPER: Principal = Principal {
    user_uuid: UserUuid::from_uuid(Uuid::from_u128(1)),
    is_staff: false,
};

pub(crate) const STAFF: Principal = Principal {
    user_uuid: UserUuid::from_uuid(Uuid::from_u128(2)),
    is_staff: true,
};

/// App context whose services panic on any call.
pub(crate) fn strict_app() -> AppContext {
    AppContext {
        auth: Arc::new(MockAuthService::new()),
        collections: Arc::new(MockCollectionsService::new()),
        products: Arc::new(MockProductsService::new()),
        reviews: Arc::new(MockReviewsService::new()),
        carts: Arc::new(MockCartsService::new()),
        customers: Arc::new(MockCustomersService::new()),
        orders: Arc::new(MockOrdersService::new()),
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    let mut app = strict_app();

    app.auth = Arc::new(auth);

    State::from_app_context(app)
}

/// Serve `route` with `app` injected, acting as `principal`.
pub(crate) fn app_service(app: AppContext, principal: Option<Principal>, route: Router) -> Service {
    let router = Router::new().hoop(inject(State::from_app_context(app)));

    let router = match principal {
        Some(principal) => router.hoop(inject(principal)),
        None => router,
    };

    Service::new(router.push(route))
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    let mut app = strict_app();

    app.carts = Arc::new(carts);

    app_service(app, None, route)
}

pub(crate) fn collections_service(
    collections: MockCollectionsService,
    principal: Option<Principal>,
    route: Router,
) -> Service {
    let mut app = strict_app();

    app.collections = Arc::new(collections);

    app_service(app, principal, route)
}

pub(crate) fn products_service(
    products: MockProductsService,
    principal: Option<Principal>,
    route: Router,
) -> Service {
    let mut app = strict_app();

    app.products = Arc::new(products);

    app_service(app, principal, route)
}

pub(crate) fn reviews_service(
    reviews: MockReviewsService,
    principal: Option<Principal>,
    route: Router,
) -> Service {
    let mut app = strict_app();

    app.reviews = Arc::new(reviews);

    app_service(app, principal, route)
}

pub(crate) fn customers_service(
    customers: MockCustomersService,
    principal: Option<Principal>,
    route: Router,
) -> Service {
    let mut app = strict_app();

    app.customers = Arc::new(customers);

    app_service(app, principal, route)
}

pub(crate) fn orders_service(
    orders: MockOrdersService,
    principal: Option<Principal>,
    route: Router,
) -> Service {
    let mut app = strict_app();

    app.orders = Arc::new(orders);

    app_service(app, principal, route)
}

pub(crate) fn make_summary(uuid: ProductUuid, price: u64) -> ProductSummary {
    ProductSummary {
        uuid,
        title: "Dark Roast".to_string(),
        price,
    }
}

pub(crate) fn make_cart_item(cart: CartUuid, price: u64, quantity: u32) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        cart_uuid: cart,
        product: make_summary(ProductUuid::new(), price),
        quantity,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(uuid: CartUuid) -> CartRecord {
    CartRecord {
        uuid,
        items: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_collection(uuid: CollectionUuid) -> CollectionRecord {
    CollectionRecord {
        uuid,
        title: "Coffee".to_string(),
        featured_product_uuid: None,
        products_count: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        title: "Dark Roast".to_string(),
        slug: "dark-roast".to_string(),
        description: "Whole beans".to_string(),
        price: 12_50,
        inventory: 10,
        collection_uuid: CollectionUuid::from_uuid(Uuid::nil()),
        review_count: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_review(product: ProductUuid, uuid: ReviewUuid) -> ReviewRecord {
    ReviewRecord {
        uuid,
        product_uuid: product,
        user_uuid: SHOPPER.user_uuid,
        name: "shopper".to_string(),
        description: "Great beans".to_string(),
        date: jiff::civil::date(2026, 3, 1),
    }
}

pub(crate) fn make_customer(uuid: CustomerUuid) -> CustomerRecord {
    CustomerRecord {
        uuid,
        user_uuid: SHOPPER.user_uuid,
        phone_number: "+14155550123".to_string(),
        birth_date: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, status: OrderStatus) -> OrderRecord {
    OrderRecord {
        uuid,
        customer_uuid: CustomerUuid::from_uuid(Uuid::nil()),
        customer_user_uuid: SHOPPER.user_uuid,
        status,
        items: vec![make_order_item(uuid, OrderItemUuid::new(), 10_00, 3)],
        placed_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order_item(
    order: OrderUuid,
    uuid: OrderItemUuid,
    price: u64,
    quantity: u32,
) -> OrderItemRecord {
    OrderItemRecord {
        uuid,
        order_uuid: order,
        product: make_summary(ProductUuid::new(), price),
        quantity,
    }
}
