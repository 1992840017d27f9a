//! Test Helpers

use testresult::TestResult;
use uuid::Uuid;

use crate::{
    auth::Principal,
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::{NewCart, NewCartItem},
            records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
        },
        collections::{
            CollectionsService, CollectionsServiceError,
            data::NewCollection,
            records::{CollectionRecord, CollectionUuid},
        },
        customers::{
            CustomersService, CustomersServiceError,
            data::NewCustomer,
            records::{CustomerRecord, CustomerUuid},
        },
        orders::{OrdersService, records::OrderRecord},
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::UserUuid,
        },
    },
    test::TestContext,
};

/// Create a user and return the principal a token for it would authenticate as.
pub(crate) async fn create_user(
    ctx: &TestContext,
    username: &str,
    is_staff: bool,
) -> Result<Principal, UsersServiceError> {
    let user = ctx
        .users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: username.to_string(),
            is_staff,
        })
        .await?;

    Ok(Principal {
        user_uuid: user.uuid,
        is_staff: user.is_staff,
    })
}

pub(crate) fn new_customer(user: UserUuid) -> NewCustomer {
    NewCustomer {
        uuid: CustomerUuid::new(),
        user_uuid: user,
        phone_number: "+14155550123".to_string(),
        birth_date: None,
    }
}

/// Sign `user` up as a customer.
pub(crate) async fn create_customer(
    ctx: &TestContext,
    user: Principal,
) -> Result<CustomerRecord, CustomersServiceError> {
    ctx.customers
        .create_customer(user, new_customer(user.user_uuid))
        .await
}

pub(crate) async fn create_collection(
    ctx: &TestContext,
    title: &str,
) -> Result<CollectionRecord, CollectionsServiceError> {
    ctx.collections
        .create_collection(NewCollection {
            uuid: CollectionUuid::new(),
            title: title.to_string(),
            featured_product_uuid: None,
        })
        .await
}

pub(crate) fn new_product(collection: CollectionUuid, title: &str, price: u64) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        title: title.to_string(),
        description: format!("{title} description"),
        price,
        inventory: 10,
        collection_uuid: collection,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    collection: CollectionUuid,
    title: &str,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(new_product(collection, title, price))
        .await
}

pub(crate) async fn create_cart(ctx: &TestContext) -> Result<CartRecord, CartsServiceError> {
    ctx.carts
        .create_cart(NewCart {
            uuid: CartUuid::new(),
        })
        .await
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    cart: CartUuid,
    product: ProductUuid,
    quantity: u32,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            cart,
            NewCartItem {
                uuid: CartItemUuid::new(),
                product_uuid: product,
                quantity,
            },
        )
        .await
}

/// Order `quantity` of `product` as a freshly created customer.
pub(crate) async fn place_order(
    ctx: &TestContext,
    product: ProductUuid,
    quantity: u32,
) -> TestResult<OrderRecord> {
    let buyer = create_user(ctx, &format!("buyer-{}", Uuid::now_v7().simple()), false).await?;

    create_customer(ctx, buyer).await?;

    let cart = create_cart(ctx).await?;

    add_item(ctx, cart.uuid, product, quantity).await?;

    Ok(ctx.orders.create_order(buyer, cart.uuid).await?)
}

/// Order one unit of a new product as `customer`, who must already have a
/// customer profile.
pub(crate) async fn place_order_as(ctx: &TestContext, customer: Principal) -> TestResult<OrderRecord> {
    let suffix = Uuid::now_v7().simple();

    let collection = create_collection(ctx, &format!("collection-{suffix}")).await?;
    let product = create_product(ctx, collection.uuid, &format!("product-{suffix}"), 5_00).await?;
    let cart = create_cart(ctx).await?;

    add_item(ctx, cart.uuid, product.uuid, 1).await?;

    Ok(ctx.orders.create_order(customer, cart.uuid).await?)
}
