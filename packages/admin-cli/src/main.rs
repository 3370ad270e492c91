//! `admin` - terminal front-end for the back-office console
//!
//! Every subcommand builds the shared console core once, then talks to the
//! remote API through it. Sign in first with `admin login`.

mod cmd;
mod context;
mod navigator;

use admin_core::config::Config;
use admin_core::types::OrderStatus;
use admin_core::{HOME_ROUTE, SIGN_IN_ROUTE};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::context::AppContext;

#[derive(Parser)]
#[command(name = "admin")]
#[command(about = "Back-office admin console")]
struct Cli {
    /// Suppress headers and status lines
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with phone number and OTP
    Login,

    /// Sign out and forget the stored credential
    Logout,

    /// Show session and configuration
    Status,

    /// List users
    Users {
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Only show the total number of users
        #[arg(long)]
        count: bool,
        /// Narrow the page to users whose name, email or phone matches
        #[arg(long)]
        filter: Option<String>,
    },

    /// List or search products
    Products {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },

    /// Search products as you type (one query per line)
    Search,

    /// List orders
    Orders {
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// CONFIRMED, SHIPPED, DELIVERED, CANCELLED, RETURNED or REFUNDED
        #[arg(long, value_parser = parse_status)]
        status: Option<OrderStatus>,
    },

    /// Look up an order by its order id
    Order { order_id: String },

    /// List coupons
    Coupons,

    /// Create a coupon
    CouponCreate {
        #[arg(long)]
        code: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Flat discount
        #[arg(long, default_value_t = 0.0)]
        amount: f64,
        /// Percentage discount
        #[arg(long, default_value_t = 0.0)]
        percent: f64,
        #[arg(long, default_value_t = 0.0)]
        min_order: f64,
        #[arg(long, default_value_t = 0)]
        required_orders: u32,
        /// First valid day, YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,
        /// Last valid day, YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,
        /// Percentage discount is capped at the flat amount
        #[arg(long)]
        up_to: bool,
    },
}

impl Commands {
    /// Route the command stands in for
    fn route(&self) -> &'static str {
        match self {
            Commands::Login | Commands::Logout => SIGN_IN_ROUTE,
            Commands::Status => HOME_ROUTE,
            Commands::Users { .. } => "/users",
            Commands::Products { .. } | Commands::Search => "/products",
            Commands::Orders { .. } | Commands::Order { .. } => "/orders",
            Commands::Coupons | Commands::CouponCreate { .. } => "/offers/coupons",
        }
    }
}

fn parse_status(s: &str) -> Result<OrderStatus, String> {
    OrderStatus::parse(s).ok_or_else(|| {
        let known: Vec<&str> = OrderStatus::variants().iter().map(|v| v.as_str()).collect();
        format!("unknown status '{}', expected one of {}", s, known.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,admin_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let ctx = AppContext::new(config, cli.command.route(), cli.quiet);

    match cli.command {
        Commands::Login => cmd::login::login(&ctx).await,
        Commands::Logout => cmd::login::logout(&ctx).await,
        Commands::Status => cmd::login::status(&ctx).await,
        Commands::Users {
            page,
            count,
            filter,
        } => {
            if count {
                cmd::resources::count_users(&ctx).await
            } else {
                cmd::resources::list_users(&ctx, page, filter.as_deref()).await
            }
        }
        Commands::Products { page, search } => {
            cmd::resources::list_products(&ctx, page, search.as_deref()).await
        }
        Commands::Search => cmd::search::live_product_search(&ctx).await,
        Commands::Orders { page, status } => cmd::resources::list_orders(&ctx, page, status).await,
        Commands::Order { order_id } => cmd::resources::find_order(&ctx, &order_id).await,
        Commands::Coupons => cmd::coupons::list_coupons(&ctx).await,
        Commands::CouponCreate {
            code,
            title,
            description,
            amount,
            percent,
            min_order,
            required_orders,
            start,
            end,
            up_to,
        } => {
            let request = admin_core::types::CouponCreateRequest {
                code,
                title,
                description,
                discount_amount: amount,
                discount_percentage: percent,
                min_order_amount: min_order,
                required_order_count: required_orders,
                start_date: Some(start),
                end_date: Some(end),
                is_up_to: up_to,
            };
            cmd::coupons::create_coupon(&ctx, request).await
        }
    }
}
