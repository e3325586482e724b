//! Admin Dashboard Pipeline
//!
//! fetch → validate/default-fill → aggregate → render
//!
//! The four collections are fetched concurrently and joined; aggregation
//! starts only once all of them resolved. Any fetch failure ends in
//! [`DashboardState::Failed`], never in a permanent `Loading`.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::analytics::DashboardReport;
use crate::client::{ClientError, RentalApi};
use crate::models::{Snapshot, User};

/// Where the dashboard is in its load cycle
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Ready(Box<DashboardReport>),
    Failed(String),
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading)
    }
}

/// Errors from the fetch stage
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to fetch {collection}: {source}")]
    Fetch {
        collection: &'static str,
        #[source]
        source: ClientError,
    },
}

impl DashboardError {
    fn fetch(collection: &'static str) -> impl FnOnce(ClientError) -> Self {
        move |source| DashboardError::Fetch { collection, source }
    }
}

/// Fetch users, cars, bookings and payments concurrently
///
/// All-or-nothing: the first failure wins and the other results are dropped.
pub async fn fetch_snapshot(api: &dyn RentalApi) -> Result<Snapshot, DashboardError> {
    let started = Instant::now();

    let (users, cars, bookings, payments) = tokio::try_join!(
        async { api.list_users().await.map_err(DashboardError::fetch("users")) },
        async { api.list_cars().await.map_err(DashboardError::fetch("cars")) },
        async { api.list_bookings().await.map_err(DashboardError::fetch("bookings")) },
        async { api.list_payments().await.map_err(DashboardError::fetch("payments")) },
    )?;

    tracing::info!(
        users = users.len(),
        cars = cars.len(),
        bookings = bookings.len(),
        payments = payments.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Fetched dashboard data"
    );

    Ok(Snapshot::new(users, cars, bookings, payments))
}

/// Admin dashboard view model
pub struct Dashboard {
    api: Arc<dyn RentalApi>,
    state: DashboardState,
    profile: Option<User>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn RentalApi>) -> Self {
        Self {
            api,
            state: DashboardState::Loading,
            profile: None,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// The report, once loaded
    pub fn report(&self) -> Option<&DashboardReport> {
        match &self.state {
            DashboardState::Ready(report) => Some(report),
            _ => None,
        }
    }

    /// Signed-in admin, if `/users/me` answered
    pub fn profile(&self) -> Option<&User> {
        self.profile.as_ref()
    }

    /// Load the report, then the admin profile, with monthly windows ending
    /// in the current local month
    pub async fn refresh(&mut self) -> &DashboardState {
        self.load(Local::now().date_naive()).await;
        self.load_profile().await;
        &self.state
    }

    /// Run the full pipeline with monthly windows ending in `today`'s month
    ///
    /// Only the four collections gate the report; the admin profile has its
    /// own [`Dashboard::load_profile`].
    pub async fn load(&mut self, today: NaiveDate) -> &DashboardState {
        self.state = DashboardState::Loading;

        self.state = match fetch_snapshot(self.api.as_ref()).await {
            Ok(snapshot) => {
                let report = DashboardReport::build(&snapshot.sanitize(), today);
                DashboardState::Ready(Box::new(report))
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching dashboard data");
                DashboardState::Failed(e.to_string())
            }
        };

        &self.state
    }

    /// Fetch the signed-in admin from `/users/me`
    ///
    /// A failure is logged and keeps the previous profile; the report is
    /// left alone either way.
    pub async fn load_profile(&mut self) -> Option<&User> {
        match self.api.current_user().await {
            Ok(user) => self.profile = Some(user),
            Err(e) => tracing::warn!(error = %e, "Failed to fetch admin profile"),
        }
        self.profile.as_ref()
    }
}
