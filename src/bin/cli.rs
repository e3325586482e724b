//! Rentify CLI
//!
//! Command-line front end for the rental backend:
//! - Admin dashboard (tiles, tables, JSON, CSV)
//! - Car catalog search and filter options
//! - Review validation
//! - Config generation

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rentify::catalog::{CarFilters, CatalogView, FilterField};
use rentify::client::{FixtureApi, HttpRentalClient, RentalApi};
use rentify::config::Config;
use rentify::dashboard::{Dashboard, DashboardState};
use rentify::render::{write_cars_csv, write_monthly_csv, CarTable, DashboardText};
use rentify::review::ReviewForm;
use rentify::session::Session;

#[derive(Parser)]
#[command(name = "rentify")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Car rental catalog, reviews and admin analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides config
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Replay a recorded JSON snapshot instead of contacting the backend
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the admin dashboard
    Dashboard {
        /// Reference date for the six-month windows (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Emit chart datasets instead of the report (json only)
        #[arg(long)]
        charts: bool,
    },

    /// List cars, optionally filtered
    Cars {
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long = "type")]
        car_type: Option<String>,
        #[arg(long)]
        min_price: Option<String>,
        #[arg(long)]
        max_price: Option<String>,
        /// Resolve where "View Details" on this car leads
        #[arg(long)]
        view: Option<i64>,
    },

    /// Show brand, type and model choices
    Options {
        /// Narrow the model list to this brand
        #[arg(long)]
        brand: Option<String>,
    },

    /// Validate a review
    Review {
        /// Comment text
        comment: String,
        /// Star rating, 1-5
        #[arg(short, long, default_value = "5")]
        rating: u8,
        /// What is being reviewed
        #[arg(long, default_value = "your rental")]
        item: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(url) = &cli.backend_url {
        config.backend.base_url = url.clone();
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    rentify::logging::init(&config.logging);

    match cli.command {
        Commands::Dashboard { today, charts } => {
            let api = backend(&config, cli.fixture.as_deref())?;
            let mut dashboard = Dashboard::new(api);

            dashboard.load(today.unwrap_or_else(|| Local::now().date_naive())).await;
            // Only the text view shows the admin profile
            if !matches!(cli.format.as_str(), "json" | "csv") {
                dashboard.load_profile().await;
            }

            let report = match dashboard.state() {
                DashboardState::Ready(report) => report,
                DashboardState::Failed(message) => bail!("Dashboard unavailable: {}", message),
                DashboardState::Loading => bail!("Dashboard did not finish loading"),
            };

            match (cli.format.as_str(), charts) {
                ("json", true) => println!("{}", serde_json::to_string_pretty(&report.charts())?),
                ("json", false) => println!("{}", serde_json::to_string_pretty(report)?),
                ("csv", _) => write_monthly_csv(report, std::io::stdout())?,
                _ => print!("{}", DashboardText::new(report, dashboard.profile())),
            }
        }

        Commands::Cars {
            model,
            brand,
            car_type,
            min_price,
            max_price,
            view,
        } => {
            let api = backend(&config, cli.fixture.as_deref())?;

            let filters = CarFilters {
                model: model.unwrap_or_default(),
                brand: brand.unwrap_or_default(),
                car_type: car_type.unwrap_or_default(),
                min_price: min_price.unwrap_or_default(),
                max_price: max_price.unwrap_or_default(),
            };

            if let Some(car_id) = view {
                let session = match api.current_user().await {
                    Ok(user) => Session::authenticated(user),
                    Err(_) => Session::anonymous(),
                };
                tracing::debug!(signed_in = session.is_authenticated(), "Resolved session");
                let catalog = CatalogView::new(api, session);
                let navigation = catalog.view_details(car_id);

                match cli.format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&navigation)?),
                    _ => println!("{}", navigation.path()),
                }
                return Ok(());
            }

            let mut catalog = CatalogView::new(api, Session::anonymous()).with_filters(filters);
            catalog.mount().await;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(catalog.cars())?),
                "csv" => write_cars_csv(catalog.cars(), std::io::stdout())?,
                _ => print!("{}", CarTable(catalog.cars())),
            }
        }

        Commands::Options { brand } => {
            let api = backend(&config, cli.fixture.as_deref())?;

            let mut catalog = CatalogView::new(api, Session::anonymous());
            catalog.mount().await;
            if let Some(brand) = brand {
                catalog.set_filter(FilterField::Brand, brand).await;
            }

            match cli.format.as_str() {
                "json" => {
                    let body = serde_json::json!({
                        "brands": catalog.options().brands,
                        "types": catalog.options().types,
                        "models": catalog.models(),
                        "modelSelectorEnabled": catalog.model_selector_enabled(),
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                _ => {
                    println!("Brands: {}", join_or_none(&catalog.options().brands));
                    println!("Types:  {}", join_or_none(&catalog.options().types));
                    if !catalog.filters().brand.is_empty() {
                        println!("Models: {}", join_or_none(catalog.models()));
                        if !catalog.model_selector_enabled() {
                            println!("(no models for brand {:?})", catalog.filters().brand);
                        }
                    }
                }
            }
        }

        Commands::Review {
            comment,
            rating,
            item,
        } => {
            let mut form = ReviewForm::new();
            form.open(item);
            form.select(rating);
            form.set_comment(comment);

            let mut accepted = None;
            if let Err(e) = form.submit(|submission| accepted = Some(submission)) {
                bail!("{}", e);
            }

            if let Some(submission) = accepted {
                match cli.format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&submission)?),
                    _ => println!(
                        "Review accepted: {} star(s), {:?}",
                        submission.rating, submission.comment
                    ),
                }
            }
        }

        Commands::Config { output } => {
            let config = rentify::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Fixture replay when given, else the live backend
fn backend(config: &Config, fixture: Option<&Path>) -> anyhow::Result<Arc<dyn RentalApi>> {
    match fixture {
        Some(path) => Ok(Arc::new(FixtureApi::from_path(path)?)),
        None => Ok(Arc::new(HttpRentalClient::new(config.backend.clone())?)),
    }
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
