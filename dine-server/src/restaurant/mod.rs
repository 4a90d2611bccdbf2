//! Restaurant Service
//!
//! Registration, staff account binding and profile management. A
//! restaurant owns its menu and order ledger 1:1; deleting it cascades
//! over both aggregates, the dish registry and every bound account.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::{
    AdminUpdateRestaurant, ConnectRestaurant, DeleteRestaurant, RegisterRestaurant,
    UpdateRestaurantProfile,
};

use crate::auth::CurrentUser;
use crate::db::models::{OrderLedgerRecord, RestaurantPatch, RestaurantRecord};
use crate::db::repository::{
    AccountRepository, DishRepository, MenuRepository, OrderRepository, RestaurantRepository,
};
use crate::services::VerificationCode;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct RestaurantService {
    restaurants: RestaurantRepository,
    accounts: AccountRepository,
    menus: MenuRepository,
    dishes: DishRepository,
    orders: OrderRepository,
    verification: Arc<VerificationCode>,
}

impl RestaurantService {
    pub fn new(db: Surreal<Db>, verification: Arc<VerificationCode>) -> Self {
        Self {
            restaurants: RestaurantRepository::new(db.clone()),
            accounts: AccountRepository::new(db.clone()),
            menus: MenuRepository::new(db.clone()),
            dishes: DishRepository::new(db.clone()),
            orders: OrderRepository::new(db),
            verification,
        }
    }

    async fn connected_restaurant(&self, user: &CurrentUser) -> AppResult<RestaurantRecord> {
        let account = self
            .accounts
            .find_by_subject(&user.subject)
            .await?
            .ok_or_else(|| AppError::not_found("You haven't connected to a restaurant"))?;
        let restaurant_id = account
            .restaurant
            .ok_or_else(|| AppError::not_found("You haven't connected to a restaurant"))?;
        self.restaurants
            .find_by_id(&restaurant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Restaurant not found"))
    }

    /// The restaurant the caller is bound to.
    pub async fn current(&self, user: &CurrentUser) -> AppResult<shared::Restaurant> {
        Ok(self.connected_restaurant(user).await?.into())
    }

    /// Register a new restaurant. Requires the rotating verification
    /// code; creates the empty order ledger up front and binds the
    /// caller's account to the new restaurant.
    pub async fn register(
        &self,
        user: &CurrentUser,
        input: RegisterRestaurant,
    ) -> AppResult<shared::Restaurant> {
        if !self.verification.verify(&input.verification_code) {
            return Err(AppError::Unauthorized);
        }
        if self.restaurants.is_name_taken(&input.name, None).await? {
            return Err(AppError::conflict("Restaurant name already exist"));
        }

        let now = chrono::Utc::now();
        let restaurant = self
            .restaurants
            .create(RestaurantRecord::new(
                input.name,
                input.restaurant_token,
                input.table_count,
                input.description,
                input.head_img,
                now,
            ))
            .await?;
        let restaurant_id = restaurant
            .id
            .clone()
            .ok_or_else(|| AppError::database("created restaurant has no id"))?;

        let ledger = self
            .orders
            .create(OrderLedgerRecord::empty(restaurant_id.clone(), now))
            .await?;
        let ledger_id = ledger
            .id
            .ok_or_else(|| AppError::database("created order ledger has no id"))?;
        let restaurant = self
            .restaurants
            .set_order_ledger(&restaurant_id, &ledger_id)
            .await?;

        self.accounts.get_or_create(&user.subject, &user.name).await?;
        self.accounts
            .set_restaurant(&user.subject, Some(restaurant_id))
            .await?;

        Ok(restaurant.into())
    }

    /// Bind the caller's account to an existing restaurant by name and
    /// connection token.
    pub async fn connect(
        &self,
        user: &CurrentUser,
        input: ConnectRestaurant,
    ) -> AppResult<shared::Restaurant> {
        let restaurant = self
            .restaurants
            .find_by_name(&input.name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Restaurant '{}' doesn't exist", input.name))
            })?;
        if restaurant.restaurant_token != input.restaurant_token {
            return Err(AppError::Unauthorized);
        }

        let restaurant_id = restaurant
            .id
            .clone()
            .ok_or_else(|| AppError::database("restaurant record has no id"))?;
        self.accounts.get_or_create(&user.subject, &user.name).await?;
        self.accounts
            .set_restaurant(&user.subject, Some(restaurant_id))
            .await?;

        Ok(restaurant.into())
    }

    /// Drop the caller's restaurant binding. The restaurant itself is
    /// untouched.
    pub async fn disconnect(&self, user: &CurrentUser) -> AppResult<()> {
        let account = self
            .accounts
            .find_by_subject(&user.subject)
            .await?
            .filter(|a| a.restaurant.is_some())
            .ok_or_else(|| AppError::validation("You haven't connected to a restaurant"))?;

        self.accounts
            .set_restaurant(&account.subject, None)
            .await?;
        Ok(())
    }

    /// Staff self-service profile update on the connected restaurant.
    pub async fn update_profile(
        &self,
        user: &CurrentUser,
        input: UpdateRestaurantProfile,
    ) -> AppResult<shared::Restaurant> {
        let restaurant = self.connected_restaurant(user).await?;
        let restaurant_id = restaurant
            .id
            .ok_or_else(|| AppError::database("restaurant record has no id"))?;

        let updated = self
            .restaurants
            .update(
                &restaurant_id,
                RestaurantPatch {
                    name: None,
                    restaurant_token: input.restaurant_token,
                    table_count: input.table_count,
                    description: input.description,
                    head_img: input.head_img,
                },
            )
            .await?;
        Ok(updated.into())
    }

    /// Admin update keyed by the current name; may rename.
    pub async fn admin_update(
        &self,
        input: AdminUpdateRestaurant,
    ) -> AppResult<shared::Restaurant> {
        let restaurant = self
            .restaurants
            .find_by_name(&input.old_name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Restaurant '{}' doesn't exist", input.old_name))
            })?;
        let restaurant_id = restaurant
            .id
            .ok_or_else(|| AppError::database("restaurant record has no id"))?;

        if let Some(new_name) = &input.name
            && new_name != &input.old_name
            && self
                .restaurants
                .is_name_taken(new_name, Some(&restaurant_id))
                .await?
        {
            return Err(AppError::conflict("Restaurant name already exist"));
        }

        let updated = self
            .restaurants
            .update(
                &restaurant_id,
                RestaurantPatch {
                    name: input.name,
                    restaurant_token: input.restaurant_token,
                    table_count: input.table_count,
                    description: input.description,
                    head_img: input.head_img,
                },
            )
            .await?;
        Ok(updated.into())
    }

    /// Delete a restaurant and everything it owns: dish registry, menu
    /// aggregate, order ledger and all account bindings.
    pub async fn delete(&self, input: DeleteRestaurant) -> AppResult<()> {
        let restaurant = self
            .restaurants
            .find_by_name(&input.name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Restaurant '{}' doesn't exist", input.name))
            })?;
        let restaurant_id = restaurant
            .id
            .ok_or_else(|| AppError::database("restaurant record has no id"))?;

        if let Some(menu_id) = &restaurant.menu {
            self.dishes.delete_by_menu(menu_id).await?;
            self.menus.delete(menu_id).await?;
        }
        if let Some(ledger_id) = &restaurant.order_ledger {
            self.orders.delete(ledger_id).await?;
        }
        self.accounts.unbind_restaurant(&restaurant_id).await?;
        self.restaurants.delete(&restaurant_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use chrono::Utc;
    use std::time::Duration;

    fn user(subject: &str, name: &str) -> CurrentUser {
        CurrentUser {
            subject: subject.into(),
            name: name.into(),
        }
    }

    async fn setup() -> (RestaurantService, Arc<VerificationCode>, Surreal<Db>) {
        let db = DbService::open_in_memory().await.unwrap().db;
        let verification = Arc::new(VerificationCode::new(Duration::from_secs(3600)));
        (
            RestaurantService::new(db.clone(), verification.clone()),
            verification,
            db,
        )
    }

    fn register_input(code: &str, name: &str) -> RegisterRestaurant {
        RegisterRestaurant {
            verification_code: code.into(),
            restaurant_token: "654321".into(),
            name: name.into(),
            table_count: 10,
            description: Some("counter seats only".into()),
            head_img: None,
        }
    }

    #[tokio::test]
    async fn register_creates_ledger_and_binds_account() {
        let (service, verification, _db) = setup().await;
        let alice = user("staff:alice", "Alice");

        let restaurant = service
            .register(&alice, register_input(&verification.current(), "Sushi Bay"))
            .await
            .unwrap();
        assert_eq!(restaurant.name, "Sushi Bay");
        assert!(restaurant.order_id.is_some());
        assert!(restaurant.menu_id.is_none());

        let current = service.current(&alice).await.unwrap();
        assert_eq!(current.id, restaurant.id);
    }

    #[tokio::test]
    async fn register_with_wrong_code_is_unauthorized() {
        let (service, verification, _db) = setup().await;
        let alice = user("staff:alice", "Alice");

        let mut wrong = verification.current();
        // flip one digit
        let last = wrong.pop().unwrap();
        wrong.push(if last == '0' { '1' } else { '0' });

        let err = service
            .register(&alice, register_input(&wrong, "Sushi Bay"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn register_duplicate_name_is_a_conflict() {
        let (service, verification, _db) = setup().await;
        let alice = user("staff:alice", "Alice");
        let bob = user("staff:bob", "Bob");

        service
            .register(&alice, register_input(&verification.current(), "Sushi Bay"))
            .await
            .unwrap();
        let err = service
            .register(&bob, register_input(&verification.current(), "Sushi Bay"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn connect_checks_name_and_token() {
        let (service, verification, _db) = setup().await;
        let alice = user("staff:alice", "Alice");
        let bob = user("staff:bob", "Bob");

        service
            .register(&alice, register_input(&verification.current(), "Sushi Bay"))
            .await
            .unwrap();

        let joined = service
            .connect(
                &bob,
                ConnectRestaurant {
                    restaurant_token: "654321".into(),
                    name: "Sushi Bay".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(joined.name, "Sushi Bay");
        assert!(service.current(&bob).await.is_ok());

        let err = service
            .connect(
                &user("staff:carol", "Carol"),
                ConnectRestaurant {
                    restaurant_token: "000000".into(),
                    name: "Sushi Bay".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        let err = service
            .connect(
                &user("staff:carol", "Carol"),
                ConnectRestaurant {
                    restaurant_token: "654321".into(),
                    name: "Ghost Diner".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn disconnect_clears_binding_only() {
        let (service, verification, _db) = setup().await;
        let alice = user("staff:alice", "Alice");

        service
            .register(&alice, register_input(&verification.current(), "Sushi Bay"))
            .await
            .unwrap();
        service.disconnect(&alice).await.unwrap();

        assert!(matches!(
            service.current(&alice).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        // the restaurant survives and can be reconnected to
        assert!(
            service
                .connect(
                    &alice,
                    ConnectRestaurant {
                        restaurant_token: "654321".into(),
                        name: "Sushi Bay".into(),
                    },
                )
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn disconnect_without_binding_is_rejected() {
        let (service, _verification, _db) = setup().await;
        let err = service
            .disconnect(&user("staff:nobody", "Nobody"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_profile_patches_connected_restaurant() {
        let (service, verification, _db) = setup().await;
        let alice = user("staff:alice", "Alice");
        service
            .register(&alice, register_input(&verification.current(), "Sushi Bay"))
            .await
            .unwrap();

        let updated = service
            .update_profile(
                &alice,
                UpdateRestaurantProfile {
                    restaurant_token: Some("111111".into()),
                    table_count: Some(20),
                    description: None,
                    head_img: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.restaurant_token, "111111");
        assert_eq!(updated.table_count, 20);
        assert_eq!(updated.description.as_deref(), Some("counter seats only"));
    }

    #[tokio::test]
    async fn admin_update_renames_unless_taken() {
        let (service, verification, _db) = setup().await;
        let alice = user("staff:alice", "Alice");
        let bob = user("staff:bob", "Bob");
        service
            .register(&alice, register_input(&verification.current(), "Sushi Bay"))
            .await
            .unwrap();
        service
            .register(&bob, register_input(&verification.current(), "Noodle House"))
            .await
            .unwrap();

        let renamed = service
            .admin_update(AdminUpdateRestaurant {
                old_name: "Sushi Bay".into(),
                name: Some("Sushi Harbor".into()),
                restaurant_token: None,
                table_count: None,
                description: None,
                head_img: None,
            })
            .await
            .unwrap();
        assert_eq!(renamed.name, "Sushi Harbor");

        let err = service
            .admin_update(AdminUpdateRestaurant {
                old_name: "Noodle House".into(),
                name: Some("Sushi Harbor".into()),
                restaurant_token: None,
                table_count: None,
                description: None,
                head_img: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = service
            .admin_update(AdminUpdateRestaurant {
                old_name: "Ghost Diner".into(),
                name: None,
                restaurant_token: None,
                table_count: None,
                description: None,
                head_img: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_cascades_over_everything_it_owns() {
        let (service, verification, db) = setup().await;
        let alice = user("staff:alice", "Alice");
        service
            .register(&alice, register_input(&verification.current(), "Sushi Bay"))
            .await
            .unwrap();

        // give the restaurant a menu with one dish
        let menu_service = crate::menu::MenuService::new(db.clone());
        menu_service
            .add_dish(
                &alice,
                shared::models::DishCreate {
                    name: "Salmon Sashimi".into(),
                    description: None,
                    image: None,
                    price: 18.0,
                    feature: true,
                    category: "sashimi".into(),
                },
            )
            .await
            .unwrap();

        service
            .delete(DeleteRestaurant {
                name: "Sushi Bay".into(),
            })
            .await
            .unwrap();

        let restaurants = RestaurantRepository::new(db.clone());
        assert!(
            restaurants
                .find_by_name("Sushi Bay")
                .await
                .unwrap()
                .is_none()
        );
        // binding cleared with the restaurant
        assert!(matches!(
            service.current(&alice).await.unwrap_err(),
            AppError::NotFound(_)
        ));

        let err = service
            .delete(DeleteRestaurant {
                name: "Sushi Bay".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
