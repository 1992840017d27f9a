//! App Router

use salvo::Router;

use crate::{auth, carts, collections, customers, orders, products};

/// Routes behind bearer token resolution.
///
/// Anonymous requests pass through; each handler decides whether it needs a
/// principal.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(carts_router())
        .push(collections_router())
        .push(products_router())
        .push(customers_router())
        .push(orders_router())
}

fn carts_router() -> Router {
    Router::with_path("carts").post(carts::create::handler).push(
        Router::with_path("{cart}")
            .get(carts::get::handler)
            .patch(carts::update::handler)
            .delete(carts::delete::handler)
            .push(
                Router::with_path("items")
                    .get(carts::items::index::handler)
                    .post(carts::items::create::handler)
                    .push(
                        Router::with_path("{item}")
                            .get(carts::items::get::handler)
                            .patch(carts::items::update::handler)
                            .delete(carts::items::delete::handler),
                    ),
            ),
    )
}

fn collections_router() -> Router {
    Router::with_path("collections")
        .get(collections::index::handler)
        .post(collections::create::handler)
        .push(
            Router::with_path("{collection}")
                .get(collections::get::handler)
                .patch(collections::update::handler)
                .delete(collections::delete::handler),
        )
}

fn products_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .post(products::create::handler)
        .push(
            Router::with_path("{product}")
                .get(products::get::handler)
                .put(products::update::handler)
                .delete(products::delete::handler)
                .push(
                    Router::with_path("reviews")
                        .get(products::reviews::index::handler)
                        .post(products::reviews::create::handler)
                        .push(
                            Router::with_path("{review}")
                                .get(products::reviews::get::handler)
                                .patch(products::reviews::update::handler)
                                .delete(products::reviews::delete::handler),
                        ),
                ),
        )
}

fn customers_router() -> Router {
    Router::with_path("customers")
        .get(customers::index::handler)
        .post(customers::create::handler)
        .push(Router::with_path("me").get(customers::me::handler))
        .push(
            Router::with_path("{customer}")
                .get(customers::get::handler)
                .patch(customers::update::handler)
                .delete(customers::delete::handler),
        )
}

fn orders_router() -> Router {
    Router::with_path("orders")
        .get(orders::index::handler)
        .post(orders::create::handler)
        .push(
            Router::with_path("{order}")
                .get(orders::get::handler)
                .patch(orders::update::handler)
                .push(Router::with_path("cancel").post(orders::cancel::handler))
                .push(
                    Router::with_path("items")
                        .get(orders::items::index::handler)
                        .push(Router::with_path("{item}").get(orders::items::get::handler)),
                ),
        )
}
