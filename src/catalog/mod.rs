//! Car Catalog
//!
//! Browse and filter the fleet. On mount the full list is fetched once to
//! derive brand and type choices, then the display list is fetched with
//! whatever filters are set. Viewing a car's details is gated on the
//! session.

mod filters;

pub use filters::{models_for_brand, CarFilters, FilterField, FilterOptions};

use serde::Serialize;
use std::sync::Arc;

use crate::client::RentalApi;
use crate::models::Car;
use crate::session::Session;

/// Notice shown when an anonymous visitor tries to open a car
pub const SIGN_IN_NOTICE: &str = "Sign In or Register to start your booking journey!";

/// Where the front end should go after a gated action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Navigation {
    CarDetails { car_id: i64 },
    SignIn { notice: String, return_to: String },
}

impl Navigation {
    /// Route path for the router
    pub fn path(&self) -> String {
        match self {
            Navigation::CarDetails { car_id } => car_path(*car_id),
            Navigation::SignIn { return_to, .. } => {
                format!("/login?next={}", urlencoding::encode(return_to))
            }
        }
    }
}

fn car_path(car_id: i64) -> String {
    format!("/cars/{}", car_id)
}

/// Catalog view model
pub struct CatalogView {
    api: Arc<dyn RentalApi>,
    session: Session,
    filters: CarFilters,
    /// Unfiltered fleet, fetched once for option derivation
    fleet: Vec<Car>,
    cars: Vec<Car>,
    options: FilterOptions,
    models: Vec<String>,
    loading: bool,
    loading_filters: bool,
}

impl CatalogView {
    pub fn new(api: Arc<dyn RentalApi>, session: Session) -> Self {
        Self {
            api,
            session,
            filters: CarFilters::default(),
            fleet: Vec::new(),
            cars: Vec::new(),
            options: FilterOptions::default(),
            models: Vec::new(),
            loading: true,
            loading_filters: false,
        }
    }

    /// Builder method: start from pre-filled filters (e.g. a shared link)
    pub fn with_filters(mut self, filters: CarFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn filters(&self) -> &CarFilters {
        &self.filters
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Models offered for the selected brand
    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loading_filters(&self) -> bool {
        self.loading_filters
    }

    /// Whether the model selector accepts input
    pub fn model_selector_enabled(&self) -> bool {
        !self.loading_filters && !self.filters.brand.is_empty() && !self.models.is_empty()
    }

    /// Initial load: filter options, then the display list
    pub async fn mount(&mut self) {
        self.load_filter_options().await;
        self.fetch_cars().await;
    }

    /// Update one filter field
    ///
    /// Values are stored trimmed. A brand change narrows the model list to
    /// that brand and resets the selected model.
    pub async fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into().trim().to_string();

        if field == FilterField::Brand && value != self.filters.brand {
            self.filters.brand = value;
            self.filters.model.clear();
            self.refresh_models().await;
            return;
        }

        self.filters.set(field, value);
    }

    /// Fetch the display list with the current filters
    pub async fn apply_filters(&mut self) {
        self.fetch_cars().await;
    }

    /// Reset every field and fetch the unfiltered list
    pub async fn clear_filters(&mut self) {
        self.filters = CarFilters::default();
        self.models.clear();
        self.fetch_cars().await;
    }

    /// Route to a car's detail page, or to sign-in for anonymous visitors
    pub fn view_details(&self, car_id: i64) -> Navigation {
        if let Some(user) = self.session.user() {
            tracing::debug!(car_id, user_id = user.id, "Opening car details");
            Navigation::CarDetails { car_id }
        } else {
            tracing::info!(car_id, "Anonymous visitor sent to sign-in");
            Navigation::SignIn {
                notice: SIGN_IN_NOTICE.to_string(),
                return_to: car_path(car_id),
            }
        }
    }

    async fn load_filter_options(&mut self) {
        self.loading_filters = true;

        match self.api.list_cars().await {
            Ok(fleet) => {
                self.options = FilterOptions::from_cars(&fleet);
                self.fleet = fleet;
                if !self.filters.brand.is_empty() {
                    self.models = models_for_brand(&self.fleet, &self.filters.brand);
                }
                tracing::debug!(
                    brands = self.options.brands.len(),
                    types = self.options.types.len(),
                    "Derived filter options"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch filter options");
            }
        }

        self.loading_filters = false;
    }

    async fn refresh_models(&mut self) {
        let brand = self.filters.brand.clone();
        if brand.is_empty() {
            self.models.clear();
            return;
        }

        if !self.fleet.is_empty() {
            self.models = models_for_brand(&self.fleet, &brand);
            return;
        }

        // Options never loaded; ask the backend for this brand only
        match self.api.search_cars(&[("brand", brand.clone())]).await {
            Ok(cars) => self.models = models_for_brand(&cars, &brand),
            Err(e) => {
                tracing::error!(error = %e, brand = %brand, "Failed to fetch models for brand");
                self.models.clear();
            }
        }
    }

    async fn fetch_cars(&mut self) {
        self.loading = true;

        let params = self.filters.query_params();
        let result = if params.is_empty() {
            self.api.list_cars().await
        } else {
            self.api.search_cars(&params).await
        };

        self.cars = match result {
            Ok(cars) => {
                tracing::debug!(count = cars.len(), filtered = !params.is_empty(), "Fetched cars");
                cars
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch cars");
                Vec::new()
            }
        };

        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::models::{Booking, Payment, User};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every call; fails `/cars` when `fail_list` is set
    #[derive(Default)]
    struct RecordingApi {
        fleet: Vec<Car>,
        fail_list: bool,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingApi {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RentalApi for RecordingApi {
        async fn list_cars(&self) -> Result<Vec<Car>, ClientError> {
            self.calls.lock().unwrap().push("/cars".to_string());
            if self.fail_list {
                return Err(ClientError::Unavailable);
            }
            Ok(self.fleet.clone())
        }

        async fn search_cars(&self, params: &[(&'static str, String)]) -> Result<Vec<Car>, ClientError> {
            let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            self.calls
                .lock()
                .unwrap()
                .push(format!("/cars/search?{}", query.join("&")));
            Ok(self
                .fleet
                .iter()
                .filter(|c| params.iter().all(|(k, v)| *k != "brand" || &c.brand == v))
                .cloned()
                .collect())
        }

        async fn list_users(&self) -> Result<Vec<User>, ClientError> {
            Ok(Vec::new())
        }

        async fn current_user(&self) -> Result<User, ClientError> {
            Err(ClientError::Unavailable)
        }

        async fn list_bookings(&self) -> Result<Vec<Booking>, ClientError> {
            Ok(Vec::new())
        }

        async fn list_payments(&self) -> Result<Vec<Payment>, ClientError> {
            Ok(Vec::new())
        }
    }

    fn fleet() -> Vec<Car> {
        vec![
            Car::new(1, "Toyota", "Corolla", "Sedan"),
            Car::new(2, "Toyota", "Fortuner", "SUV"),
            Car::new(3, "Honda", "City", "Sedan"),
        ]
    }

    fn view_with(api: Arc<RecordingApi>, session: Session) -> CatalogView {
        CatalogView::new(api, session)
    }

    #[tokio::test]
    async fn test_mount_derives_options_and_lists_all() {
        let api = Arc::new(RecordingApi { fleet: fleet(), ..Default::default() });
        let mut view = view_with(Arc::clone(&api), Session::anonymous());

        assert!(view.is_loading());
        view.mount().await;

        assert!(!view.is_loading());
        assert_eq!(view.options().brands, vec!["Honda", "Toyota"]);
        assert_eq!(view.options().types, vec!["SUV", "Sedan"]);
        assert_eq!(view.cars().len(), 3);
        assert_eq!(api.calls(), vec!["/cars", "/cars"]);
    }

    #[tokio::test]
    async fn test_apply_filters_uses_search_with_set_fields_only() {
        let api = Arc::new(RecordingApi { fleet: fleet(), ..Default::default() });
        let mut view = view_with(Arc::clone(&api), Session::anonymous());
        view.mount().await;

        view.set_filter(FilterField::Brand, "Honda").await;
        view.set_filter(FilterField::MaxPrice, "3000").await;
        view.apply_filters().await;

        assert_eq!(api.calls().last().unwrap(), "/cars/search?brand=Honda&maxPrice=3000");
        assert_eq!(view.cars().len(), 1);
    }

    #[tokio::test]
    async fn test_brand_change_narrows_models_and_resets_model() {
        let api = Arc::new(RecordingApi { fleet: fleet(), ..Default::default() });
        let mut view = view_with(api, Session::anonymous());
        view.mount().await;

        assert!(!view.model_selector_enabled());

        view.set_filter(FilterField::Brand, "Toyota").await;
        assert_eq!(view.models(), ["Corolla", "Fortuner"]);
        assert!(view.model_selector_enabled());

        view.set_filter(FilterField::Model, "Fortuner").await;
        view.set_filter(FilterField::Brand, "Honda").await;
        assert_eq!(view.filters().model, "");
        assert_eq!(view.models(), ["City"]);
    }

    #[tokio::test]
    async fn test_brand_without_cars_empties_and_disables_models() {
        let api = Arc::new(RecordingApi { fleet: fleet(), ..Default::default() });
        let mut view = view_with(api, Session::anonymous());
        view.mount().await;
        view.set_filter(FilterField::Brand, "Toyota").await;

        view.set_filter(FilterField::Brand, "Tesla").await;

        assert!(view.models().is_empty());
        assert!(!view.model_selector_enabled());
        assert_eq!(view.filters().model, "");
    }

    #[tokio::test]
    async fn test_same_brand_keeps_model() {
        let api = Arc::new(RecordingApi { fleet: fleet(), ..Default::default() });
        let mut view = view_with(api, Session::anonymous());
        view.mount().await;
        view.set_filter(FilterField::Brand, "Toyota").await;
        view.set_filter(FilterField::Model, "Corolla").await;

        view.set_filter(FilterField::Brand, "Toyota").await;
        assert_eq!(view.filters().model, "Corolla");
    }

    #[tokio::test]
    async fn test_padded_brand_still_finds_models() {
        let api = Arc::new(RecordingApi { fleet: fleet(), ..Default::default() });
        let mut view = view_with(api, Session::anonymous());
        view.mount().await;

        view.set_filter(FilterField::Brand, " Toyota ").await;

        assert_eq!(view.filters().brand, "Toyota");
        assert_eq!(view.models(), ["Corolla", "Fortuner"]);
        assert!(view.model_selector_enabled());
        assert_eq!(view.filters().query_params(), vec![("brand", "Toyota".to_string())]);
    }

    #[tokio::test]
    async fn test_clear_filters_refetches_unfiltered() {
        let api = Arc::new(RecordingApi { fleet: fleet(), ..Default::default() });
        let mut view = view_with(Arc::clone(&api), Session::anonymous());
        view.mount().await;
        view.set_filter(FilterField::Brand, "Honda").await;
        view.apply_filters().await;

        view.clear_filters().await;

        assert_eq!(view.filters(), &CarFilters::default());
        assert!(view.models().is_empty());
        assert_eq!(view.cars().len(), 3);
        assert_eq!(api.calls().last().unwrap(), "/cars");
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_empty_list() {
        let api = Arc::new(RecordingApi { fleet: fleet(), fail_list: true, ..Default::default() });
        let mut view = view_with(Arc::clone(&api), Session::anonymous());

        view.mount().await;

        assert!(view.cars().is_empty());
        assert!(view.options().brands.is_empty());
        assert!(!view.is_loading());
        assert!(!view.is_loading_filters());
    }

    #[tokio::test]
    async fn test_models_fall_back_to_brand_search_without_fleet() {
        let api = Arc::new(RecordingApi { fleet: fleet(), fail_list: true, ..Default::default() });
        let mut view = view_with(Arc::clone(&api), Session::anonymous());
        view.mount().await;

        view.set_filter(FilterField::Brand, "Toyota").await;

        assert_eq!(view.models(), ["Corolla", "Fortuner"]);
        assert_eq!(api.calls().last().unwrap(), "/cars/search?brand=Toyota");
    }

    #[tokio::test]
    async fn test_preselected_brand_loads_models_on_mount() {
        let api = Arc::new(RecordingApi { fleet: fleet(), ..Default::default() });
        let filters = CarFilters { brand: "Toyota".to_string(), ..CarFilters::default() };
        let mut view = view_with(api, Session::anonymous()).with_filters(filters);

        view.mount().await;

        assert_eq!(view.models(), ["Corolla", "Fortuner"]);
        assert_eq!(view.cars().len(), 2);
    }

    #[test]
    fn test_view_details_requires_session() {
        let api = Arc::new(RecordingApi::default());

        let anonymous = view_with(Arc::clone(&api), Session::anonymous());
        let nav = anonymous.view_details(42);
        assert_eq!(
            nav,
            Navigation::SignIn {
                notice: SIGN_IN_NOTICE.to_string(),
                return_to: "/cars/42".to_string(),
            }
        );
        assert_eq!(nav.path(), "/login?next=%2Fcars%2F42");

        let signed_in = view_with(api, Session::authenticated(User::new(1, "Asha", "asha@rentify.io")));
        let nav = signed_in.view_details(42);
        assert_eq!(nav, Navigation::CarDetails { car_id: 42 });
        assert_eq!(nav.path(), "/cars/42");
    }
}
