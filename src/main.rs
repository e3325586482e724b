//! Rentify
//!
//! Loads the admin dashboard once from the configured backend and prints it.

use std::sync::Arc;

use rentify::client::HttpRentalClient;
use rentify::config::Config;
use rentify::dashboard::{Dashboard, DashboardState};
use rentify::render::DashboardText;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    rentify::logging::init(&config.logging);

    tracing::info!("Rentify v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend: {}", config.backend.base_url);

    let client = HttpRentalClient::new(config.backend.clone())?;
    let mut dashboard = Dashboard::new(Arc::new(client));
    dashboard.refresh().await;

    match dashboard.state() {
        DashboardState::Ready(report) => {
            tracing::info!(
                success_rate = report.kpis.booking_success_rate,
                revenue_per_booking = report.kpis.average_revenue_per_booking,
                bookings_per_car = report.kpis.bookings_per_car,
                "Dashboard ready"
            );
            print!("{}", DashboardText::new(report, dashboard.profile()));
            Ok(())
        }
        DashboardState::Failed(message) => anyhow::bail!("Dashboard unavailable: {}", message),
        DashboardState::Loading => anyhow::bail!("Dashboard did not finish loading"),
    }
}
