//! Customers service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use validator::Validate;

use crate::{
    auth::{
        Principal,
        policy::{Operation, authorize, authorize_owner},
    },
    database::Db,
    domain::{
        customers::{
            data::{CustomerUpdate, NewCustomer},
            errors::CustomersServiceError,
            records::{CustomerRecord, CustomerUuid},
            repository::PgCustomersRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn create_customer(
        &self,
        actor: Principal,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        authorize_owner(Operation::CreateCustomer, actor, customer.user_uuid)?;

        customer.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_customer(&mut tx, customer).await?;

        tx.commit().await?;

        info!(
            customer_uuid = %created.uuid,
            user_uuid = %created.user_uuid,
            "created customer"
        );

        Ok(created)
    }

    async fn list_customers(
        &self,
        actor: Principal,
    ) -> Result<Vec<CustomerRecord>, CustomersServiceError> {
        authorize(Operation::ListCustomers, Some(actor))?;

        let mut tx = self.db.begin_transaction().await?;

        let customers = self.repository.list_customers(&mut tx).await?;

        tx.commit().await?;

        Ok(customers)
    }

    async fn get_customer(
        &self,
        actor: Principal,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        authorize_owner(Operation::GetCustomer, actor, record.user_uuid)?;

        Ok(record)
    }

    async fn update_customer(
        &self,
        actor: Principal,
        customer: CustomerUuid,
        update: CustomerUpdate,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        update.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let existing = self.repository.lock_customer(&mut tx, customer).await?;

        authorize_owner(Operation::UpdateCustomer, actor, existing.user_uuid)?;

        let updated = self
            .repository
            .update_customer(&mut tx, customer, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_customer(
        &self,
        actor: Principal,
        customer: CustomerUuid,
    ) -> Result<(), CustomersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let existing = self.repository.lock_customer(&mut tx, customer).await?;

        authorize_owner(Operation::DeleteCustomer, actor, existing.user_uuid)?;

        let rows_affected = self
            .repository
            .delete_customer(&mut tx, customer)
            .await
            .map_err(|error| match CustomersServiceError::from(error) {
                CustomersServiceError::InvalidReference => CustomersServiceError::HasOrders,
                other => other,
            })?;

        if rows_affected == 0 {
            return Err(CustomersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(customer_uuid = %customer, "deleted customer");

        Ok(())
    }

    async fn find_customer_by_user(
        &self,
        user: UserUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let customer = self
            .repository
            .find_customer_by_user(&mut tx, user)
            .await?
            .ok_or(CustomersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(customer)
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Creates the customer profile of a user, either by that user or by staff.
    async fn create_customer(
        &self,
        actor: Principal,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Lists every customer. Staff only.
    async fn list_customers(
        &self,
        actor: Principal,
    ) -> Result<Vec<CustomerRecord>, CustomersServiceError>;

    async fn get_customer(
        &self,
        actor: Principal,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    async fn update_customer(
        &self,
        actor: Principal,
        customer: CustomerUuid,
        update: CustomerUpdate,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Deletes a customer that has never placed an order.
    async fn delete_customer(
        &self,
        actor: Principal,
        customer: CustomerUuid,
    ) -> Result<(), CustomersServiceError>;

    /// Look up the customer profile belonging to a user.
    async fn find_customer_by_user(
        &self,
        user: UserUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{ToSpan, Zoned, civil::date};
    use testresult::TestResult;

    use crate::{
        auth::policy::PolicyError,
        test::{
            TestContext,
            helpers::{create_customer, create_user, new_customer, place_order_as},
        },
    };

    use super::*;

    #[tokio::test]
    async fn user_can_create_own_customer_profile() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada", false).await?;

        let customer = ctx
            .customers
            .create_customer(
                user,
                NewCustomer {
                    birth_date: Some(date(1990, 12, 10)),
                    ..new_customer(user.user_uuid)
                },
            )
            .await?;

        assert_eq!(customer.user_uuid, user.user_uuid);
        assert_eq!(customer.birth_date, Some(date(1990, 12, 10)));

        let found = ctx.customers.find_customer_by_user(user.user_uuid).await?;

        assert_eq!(found.uuid, customer.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn user_cannot_create_profile_for_someone_else() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = create_user(&ctx, "alice", false).await?;
        let bob = create_user(&ctx, "bob", false).await?;

        let result = ctx
            .customers
            .create_customer(alice, new_customer(bob.user_uuid))
            .await;

        assert!(
            matches!(
                result,
                Err(CustomersServiceError::Policy(PolicyError::Forbidden))
            ),
            "expected Forbidden, got {result:?}"
        );

        let admin = create_user(&ctx, "admin", true).await?;

        ctx.customers
            .create_customer(admin, new_customer(bob.user_uuid))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn second_profile_for_user_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "twice", false).await?;

        create_customer(&ctx, user).await?;

        let result = ctx
            .customers
            .create_customer(user, new_customer(user.user_uuid))
            .await;

        assert!(
            matches!(result, Err(CustomersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_customer_validates_phone_and_birth_date() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "invalid", false).await?;
        let tomorrow = Zoned::now().date().checked_add(1.day())?;

        for customer in [
            NewCustomer {
                phone_number: "555-0100".to_string(),
                ..new_customer(user.user_uuid)
            },
            NewCustomer {
                birth_date: Some(tomorrow),
                ..new_customer(user.user_uuid)
            },
        ] {
            let result = ctx.customers.create_customer(user, customer).await;

            assert!(
                matches!(result, Err(CustomersServiceError::Validation(_))),
                "expected Validation, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn create_customer_for_unknown_user_returns_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_user(&ctx, "root", true).await?;

        let result = ctx
            .customers
            .create_customer(admin, new_customer(UserUuid::new()))
            .await;

        assert!(
            matches!(result, Err(CustomersServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_customers_is_admin_only() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "shopper", false).await?;
        let admin = create_user(&ctx, "manager", true).await?;

        create_customer(&ctx, user).await?;

        let result = ctx.customers.list_customers(user).await;

        assert!(
            matches!(
                result,
                Err(CustomersServiceError::Policy(PolicyError::Forbidden))
            ),
            "expected Forbidden, got {result:?}"
        );

        assert_eq!(ctx.customers.list_customers(admin).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn get_customer_checks_ownership() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, "owner", false).await?;
        let stranger = create_user(&ctx, "stranger", false).await?;
        let customer = create_customer(&ctx, owner).await?;

        assert_eq!(
            ctx.customers.get_customer(owner, customer.uuid).await?.uuid,
            customer.uuid
        );

        let result = ctx.customers.get_customer(stranger, customer.uuid).await;

        assert!(
            matches!(
                result,
                Err(CustomersServiceError::Policy(PolicyError::Forbidden))
            ),
            "expected Forbidden, got {result:?}"
        );

        let result = ctx.customers.get_customer(owner, CustomerUuid::new()).await;

        assert!(
            matches!(result, Err(CustomersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_customer_changes_only_given_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "mover", false).await?;
        let customer = ctx
            .customers
            .create_customer(
                user,
                NewCustomer {
                    birth_date: Some(date(1985, 1, 2)),
                    ..new_customer(user.user_uuid)
                },
            )
            .await?;

        let updated = ctx
            .customers
            .update_customer(
                user,
                customer.uuid,
                CustomerUpdate {
                    phone_number: Some("+442079460000".to_string()),
                    birth_date: None,
                },
            )
            .await?;

        assert_eq!(updated.phone_number, "+442079460000");
        assert_eq!(updated.birth_date, Some(date(1985, 1, 2)));

        let cleared = ctx
            .customers
            .update_customer(
                user,
                customer.uuid,
                CustomerUpdate {
                    phone_number: None,
                    birth_date: Some(None),
                },
            )
            .await?;

        assert_eq!(cleared.phone_number, "+442079460000");
        assert!(cleared.birth_date.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn delete_customer_with_orders_returns_has_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "buyer", false).await?;
        let customer = create_customer(&ctx, user).await?;

        place_order_as(&ctx, user).await?;

        let result = ctx.customers.delete_customer(user, customer.uuid).await;

        assert!(
            matches!(result, Err(CustomersServiceError::HasOrders)),
            "expected HasOrders, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_customer_removes_profile() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "leaver", false).await?;
        let customer = create_customer(&ctx, user).await?;

        ctx.customers.delete_customer(user, customer.uuid).await?;

        let result = ctx.customers.find_customer_by_user(user.user_uuid).await;

        assert!(
            matches!(result, Err(CustomersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
