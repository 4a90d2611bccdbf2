//! Menu Service
//!
//! Staff-facing menu management. Dish state lives in the per-dish
//! registry records; the menu aggregate carries the three denormalized
//! views and is rewritten in one version-checked statement per
//! operation. Dish-name uniqueness is always checked against the
//! registry, never the views.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::warn;

use shared::models::{
    DishCreate, DishRef, DishUpdate, MenuViews, SortCategory, SortFeature,
};

use crate::auth::CurrentUser;
use crate::db::models::{DishPatch, DishRecord, MenuRecord, RestaurantRecord};
use crate::db::repository::{
    AccountRepository, DishRepository, MenuRepository, RestaurantRepository,
};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct MenuService {
    menus: MenuRepository,
    dishes: DishRepository,
    restaurants: RestaurantRepository,
    accounts: AccountRepository,
}

impl MenuService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            menus: MenuRepository::new(db.clone()),
            dishes: DishRepository::new(db.clone()),
            restaurants: RestaurantRepository::new(db.clone()),
            accounts: AccountRepository::new(db),
        }
    }

    /// The restaurant the authenticated staff account is bound to.
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

    /// Load the restaurant's menu aggregate. Reads never create one.
    async fn load_menu(&self, restaurant: &RestaurantRecord) -> AppResult<MenuRecord> {
        let menu_id = restaurant
            .menu
            .as_ref()
            .ok_or_else(|| AppError::not_found("The restaurant doesn't have a menu yet"))?;
        self.menus
            .find_by_id(menu_id)
            .await?
            .ok_or_else(|| AppError::not_found("The restaurant doesn't have a menu yet"))
    }

    /// Snapshot of the three menu views for the staff read endpoints.
    pub async fn views(&self, user: &CurrentUser) -> AppResult<MenuViews> {
        let restaurant = self.connected_restaurant(user).await?;
        let menu = self.load_menu(&restaurant).await?;
        Ok(menu.views())
    }

    /// Create a dish. The menu aggregate is created lazily on the first
    /// add and linked to the restaurant.
    pub async fn add_dish(&self, user: &CurrentUser, input: DishCreate) -> AppResult<shared::Dish> {
        let restaurant = self.connected_restaurant(user).await?;
        let now = chrono::Utc::now();

        let mut menu = match &restaurant.menu {
            Some(menu_id) => self
                .menus
                .find_by_id(menu_id)
                .await?
                .ok_or_else(|| AppError::database(format!("Menu {menu_id} is missing")))?,
            None => {
                let restaurant_id = restaurant
                    .id
                    .clone()
                    .ok_or_else(|| AppError::internal("restaurant record has no id"))?;
                let created = self
                    .menus
                    .create(MenuRecord::empty(restaurant_id.clone(), &user.name, now))
                    .await?;
                let menu_id = created
                    .id
                    .clone()
                    .ok_or_else(|| AppError::database("created menu has no id"))?;
                self.restaurants.set_menu(&restaurant_id, &menu_id).await?;
                created
            }
        };
        let menu_id = menu
            .id
            .clone()
            .ok_or_else(|| AppError::internal("menu record has no id"))?;

        if self
            .dishes
            .find_by_name(&menu_id, &input.name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("name already exist"));
        }

        let feature = input.feature;
        let category = input.category.clone();
        let record = self
            .dishes
            .create(DishRecord::from_input(menu_id, &user.name, input, now))
            .await?;
        let dish_id = record
            .id
            .clone()
            .ok_or_else(|| AppError::database("created dish has no id"))?;

        menu.insert_ref(
            DishRef::new(dish_id.to_string(), record.name.clone()),
            feature,
            &category,
        );
        menu.update_by = user.name.clone();

        if let Err(e) = self.menus.save_views(&menu).await {
            // Roll the registry back so a retry does not hit a duplicate
            if let Err(del) = self.dishes.delete(&dish_id).await {
                warn!(dish = %dish_id, error = %del, "failed to roll back dish after view save error");
            }
            return Err(e.into());
        }

        Ok(record.into())
    }

    /// Fetch a dish's authoritative record by name.
    pub async fn find_dish(&self, user: &CurrentUser, name: &str) -> AppResult<shared::Dish> {
        let restaurant = self.connected_restaurant(user).await?;
        let menu = self.load_menu(&restaurant).await?;
        let menu_id = menu
            .id
            .ok_or_else(|| AppError::internal("menu record has no id"))?;

        let record = self
            .dishes
            .find_by_name(&menu_id, name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("The dish '{name}' doesn't exist")))?;
        Ok(record.into())
    }

    /// Remove a dish from the registry and all three views.
    pub async fn delete_dish(&self, user: &CurrentUser, name: &str) -> AppResult<()> {
        let restaurant = self.connected_restaurant(user).await?;
        let mut menu = self.load_menu(&restaurant).await?;
        let menu_id = menu
            .id
            .clone()
            .ok_or_else(|| AppError::internal("menu record has no id"))?;

        let record = self
            .dishes
            .find_by_name(&menu_id, name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("The dish '{name}' doesn't exist")))?;
        let dish_id = record
            .id
            .ok_or_else(|| AppError::database("dish record has no id"))?;

        menu.remove_ref(&dish_id.to_string());
        menu.update_by = user.name.clone();
        self.menus.save_views(&menu).await?;

        // Views no longer point at the record; a concurrent delete here
        // just means the cleanup already happened.
        if let Err(e) = self.dishes.delete(&dish_id).await {
            warn!(dish = %dish_id, error = %e, "dish record already gone");
        }
        Ok(())
    }

    /// Partially update a dish. The views retract the old ref and
    /// reassert the new one, so a rename or recategorization lands in
    /// the right bucket in the same write.
    pub async fn update_dish(&self, user: &CurrentUser, input: DishUpdate) -> AppResult<shared::Dish> {
        let restaurant = self.connected_restaurant(user).await?;
        let menu = self.load_menu(&restaurant).await?;
        self.apply_dish_update(menu, user, input).await
    }

    /// The write half of [`update_dish`], against an already-loaded
    /// aggregate. The registry is written first; if the view write then
    /// loses the version check, the registry is restored from the prior
    /// snapshot so record and refs never disagree on the name.
    async fn apply_dish_update(
        &self,
        mut menu: MenuRecord,
        user: &CurrentUser,
        input: DishUpdate,
    ) -> AppResult<shared::Dish> {
        let menu_id = menu
            .id
            .clone()
            .ok_or_else(|| AppError::internal("menu record has no id"))?;

        let record = self
            .dishes
            .find_by_name(&menu_id, &input.past_name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("The dish '{}' doesn't exist", input.past_name))
            })?;
        let dish_id = record
            .id
            .clone()
            .ok_or_else(|| AppError::database("dish record has no id"))?;

        if let Some(new_name) = &input.name
            && new_name != &input.past_name
            && self.dishes.find_by_name(&menu_id, new_name).await?.is_some()
        {
            return Err(AppError::conflict("name already exist"));
        }

        let prior = record.clone();
        let updated = self
            .dishes
            .update(
                &dish_id,
                &user.name,
                DishPatch {
                    name: input.name,
                    description: input.description,
                    image: input.image,
                    price: input.price,
                    feature: input.feature,
                    category: input.category,
                },
            )
            .await?;

        let id_str = dish_id.to_string();
        menu.remove_ref(&id_str);
        menu.insert_ref(
            DishRef::new(id_str, updated.name.clone()),
            updated.feature,
            &updated.category,
        );
        menu.update_by = user.name.clone();

        if let Err(e) = self.menus.save_views(&menu).await {
            // Put the registry back so the views' refs still match it
            if let Err(restore) = self.dishes.restore(&dish_id, &prior).await {
                warn!(dish = %dish_id, error = %restore, "failed to roll back dish after view save error");
            }
            return Err(e.into());
        }

        Ok(updated.into())
    }

    /// Replace the feature view with a staff-supplied reordering.
    pub async fn sort_feature(&self, user: &CurrentUser, input: SortFeature) -> AppResult<MenuViews> {
        let restaurant = self.connected_restaurant(user).await?;
        let mut menu = self.load_menu(&restaurant).await?;

        menu.replace_feature(input.feature)
            .map_err(|e| AppError::validation(e.to_string()))?;
        menu.update_by = user.name.clone();
        let saved = self.menus.save_views(&menu).await?;
        Ok(saved.views())
    }

    /// Replace the category map with a staff-supplied regrouping.
    pub async fn sort_category(
        &self,
        user: &CurrentUser,
        input: SortCategory,
    ) -> AppResult<MenuViews> {
        let restaurant = self.connected_restaurant(user).await?;
        let mut menu = self.load_menu(&restaurant).await?;

        menu.replace_category(input.category)
            .map_err(|e| AppError::validation(e.to_string()))?;
        menu.update_by = user.name.clone();
        let saved = self.menus.save_views(&menu).await?;
        Ok(saved.views())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::RestaurantRecord;
    use shared::models::CategoryMap;

    async fn setup() -> (MenuService, CurrentUser) {
        let db = DbService::open_in_memory().await.unwrap().db;
        let restaurants = RestaurantRepository::new(db.clone());
        let accounts = AccountRepository::new(db.clone());

        let restaurant = restaurants
            .create(RestaurantRecord::new(
                "Sushi Bay".into(),
                "123456".into(),
                12,
                None,
                None,
                chrono::Utc::now(),
            ))
            .await
            .unwrap();

        let user = CurrentUser {
            subject: "staff:alice".into(),
            name: "Alice".into(),
        };
        accounts.get_or_create(&user.subject, &user.name).await.unwrap();
        accounts
            .set_restaurant(&user.subject, restaurant.id.clone())
            .await
            .unwrap();

        (MenuService::new(db), user)
    }

    fn dish(name: &str, price: f64, feature: bool, category: &str) -> DishCreate {
        DishCreate {
            name: name.into(),
            description: None,
            image: None,
            price,
            feature,
            category: category.into(),
        }
    }

    #[tokio::test]
    async fn add_dish_creates_menu_lazily_and_populates_views() {
        let (service, user) = setup().await;

        let created = service
            .add_dish(&user, dish("Salmon Sashimi", 18.0, true, "sashimi"))
            .await
            .unwrap();
        assert_eq!(created.name, "Salmon Sashimi");
        assert_eq!(created.update_by, "Alice");

        let views = service.views(&user).await.unwrap();
        assert_eq!(views.dishes.len(), 1);
        assert_eq!(views.feature.len(), 1);
        assert_eq!(views.category["sashimi"][0].name, "Salmon Sashimi");
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let (service, user) = setup().await;

        service
            .add_dish(&user, dish("Miso Soup", 4.0, false, "soup"))
            .await
            .unwrap();
        let err = service
            .add_dish(&user, dish("Miso Soup", 5.0, false, "soup"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // the failed add must not leave a second ref behind
        let views = service.views(&user).await.unwrap();
        assert_eq!(views.dishes.len(), 1);
    }

    #[tokio::test]
    async fn find_dish_returns_registry_record() {
        let (service, user) = setup().await;
        service
            .add_dish(&user, dish("Tuna Roll", 9.5, false, "roll"))
            .await
            .unwrap();

        let found = service.find_dish(&user, "Tuna Roll").await.unwrap();
        assert_eq!(found.price, 9.5);
        assert_eq!(found.category, "roll");

        let err = service.find_dish(&user, "Ghost Dish").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_dish_removes_record_and_refs() {
        let (service, user) = setup().await;
        service
            .add_dish(&user, dish("Salmon Sashimi", 18.0, true, "sashimi"))
            .await
            .unwrap();
        service
            .add_dish(&user, dish("Tuna Roll", 9.5, false, "roll"))
            .await
            .unwrap();

        service.delete_dish(&user, "Salmon Sashimi").await.unwrap();

        let views = service.views(&user).await.unwrap();
        assert_eq!(views.dishes.len(), 1);
        assert!(views.feature.is_empty());
        assert!(!views.category.contains_key("sashimi"));
        let err = service.find_dish(&user, "Salmon Sashimi").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_dish_renames_and_moves_bucket() {
        let (service, user) = setup().await;
        service
            .add_dish(&user, dish("Salmon Sashimi", 18.0, true, "sashimi"))
            .await
            .unwrap();

        let updated = service
            .update_dish(
                &user,
                DishUpdate {
                    past_name: "Salmon Sashimi".into(),
                    name: Some("Beef Roll".into()),
                    description: None,
                    image: None,
                    price: Some(11.0),
                    feature: Some(false),
                    category: Some("roll".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Beef Roll");
        assert_eq!(updated.price, 11.0);

        let views = service.views(&user).await.unwrap();
        assert!(views.feature.is_empty());
        assert!(!views.category.contains_key("sashimi"));
        assert_eq!(views.category["roll"][0].name, "Beef Roll");
        assert_eq!(views.dishes.len(), 1);
    }

    #[tokio::test]
    async fn price_only_update_keeps_view_membership() {
        let (service, user) = setup().await;
        service
            .add_dish(&user, dish("Salmon Sashimi", 18.0, true, "sashimi"))
            .await
            .unwrap();

        let before = service.views(&user).await.unwrap();
        service
            .update_dish(
                &user,
                DishUpdate {
                    past_name: "Salmon Sashimi".into(),
                    name: None,
                    description: None,
                    image: None,
                    price: Some(19.5),
                    feature: None,
                    category: None,
                },
            )
            .await
            .unwrap();

        let after = service.views(&user).await.unwrap();
        assert_eq!(after.dishes.len(), before.dishes.len());
        assert_eq!(after.feature.len(), before.feature.len());
        assert_eq!(after.category["sashimi"].len(), before.category["sashimi"].len());
        assert_eq!(service.find_dish(&user, "Salmon Sashimi").await.unwrap().price, 19.5);
    }

    #[tokio::test]
    async fn conflicted_view_write_restores_the_dish_record() {
        let (service, user) = setup().await;
        service
            .add_dish(&user, dish("Salmon Sashimi", 18.0, true, "sashimi"))
            .await
            .unwrap();

        // hold a stale aggregate, then let another edit bump the version
        let restaurant = service.connected_restaurant(&user).await.unwrap();
        let stale = service.load_menu(&restaurant).await.unwrap();
        service
            .add_dish(&user, dish("Miso Soup", 4.0, false, "soup"))
            .await
            .unwrap();

        let rename = DishUpdate {
            past_name: "Salmon Sashimi".into(),
            name: Some("Beef Roll".into()),
            description: None,
            image: None,
            price: None,
            feature: Some(false),
            category: Some("roll".into()),
        };
        let err = service
            .apply_dish_update(stale, &user, rename.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // registry and views still agree on the old state
        let found = service.find_dish(&user, "Salmon Sashimi").await.unwrap();
        assert_eq!(found.price, 18.0);
        assert_eq!(found.category, "sashimi");
        assert!(found.feature);
        let views = service.views(&user).await.unwrap();
        assert_eq!(views.dishes.len(), 2);
        assert_eq!(views.category["sashimi"][0].name, "Salmon Sashimi");
        assert!(!views.category.contains_key("roll"));

        // a fresh attempt against the current version goes through
        let updated = service.update_dish(&user, rename).await.unwrap();
        assert_eq!(updated.name, "Beef Roll");
        let views = service.views(&user).await.unwrap();
        assert_eq!(views.category["roll"][0].name, "Beef Roll");
        assert!(views.feature.is_empty());
    }

    #[tokio::test]
    async fn rename_onto_existing_dish_is_a_conflict() {
        let (service, user) = setup().await;
        service
            .add_dish(&user, dish("Miso Soup", 4.0, false, "soup"))
            .await
            .unwrap();
        service
            .add_dish(&user, dish("Tuna Roll", 9.5, false, "roll"))
            .await
            .unwrap();

        let err = service
            .update_dish(
                &user,
                DishUpdate {
                    past_name: "Tuna Roll".into(),
                    name: Some("Miso Soup".into()),
                    description: None,
                    image: None,
                    price: None,
                    feature: None,
                    category: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn sort_feature_applies_permutation_and_rejects_foreign_refs() {
        let (service, user) = setup().await;
        service
            .add_dish(&user, dish("Salmon Sashimi", 18.0, true, "sashimi"))
            .await
            .unwrap();
        service
            .add_dish(&user, dish("Eel Roll", 12.0, true, "roll"))
            .await
            .unwrap();

        let views = service.views(&user).await.unwrap();
        let reordered: Vec<DishRef> = views.feature.iter().rev().cloned().collect();
        let sorted = service
            .sort_feature(&user, SortFeature { feature: reordered })
            .await
            .unwrap();
        assert_eq!(sorted.feature[0].name, "Eel Roll");

        let err = service
            .sort_feature(
                &user,
                SortFeature {
                    feature: vec![DishRef::new("dish:ghost", "Ghost Dish")],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn sort_category_regroups_whole_set() {
        let (service, user) = setup().await;
        service
            .add_dish(&user, dish("Salmon Sashimi", 18.0, false, "sashimi"))
            .await
            .unwrap();
        service
            .add_dish(&user, dish("Tuna Roll", 9.5, false, "roll"))
            .await
            .unwrap();

        let views = service.views(&user).await.unwrap();
        let all: Vec<DishRef> = views.dishes.clone();
        let mut regrouped = CategoryMap::new();
        regrouped.insert("specials".into(), all);

        let sorted = service
            .sort_category(&user, SortCategory { category: regrouped })
            .await
            .unwrap();
        assert_eq!(sorted.category.len(), 1);
        assert_eq!(sorted.category["specials"].len(), 2);
    }

    #[tokio::test]
    async fn views_without_menu_is_not_found() {
        let (service, user) = setup().await;
        let err = service.views(&user).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn unbound_account_cannot_touch_menu() {
        let (service, _) = setup().await;
        let stranger = CurrentUser {
            subject: "staff:mallory".into(),
            name: "Mallory".into(),
        };
        let err = service
            .add_dish(&stranger, dish("Ramen", 12.0, false, "noodles"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
