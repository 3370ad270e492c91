//! Users, products and orders listings

use admin_core::gateway::Page;
use admin_core::types::{OrderStatus, OrderSummary, ProductSummary, UserSummary};
use anyhow::Result;
use colored::{ColoredString, Colorize};
use console::style;

use crate::context::AppContext;

// ============================================================================
// Users
// ============================================================================

pub async fn list_users(ctx: &AppContext, page: u32, filter: Option<&str>) -> Result<()> {
    let outcome = ctx.api.list_users(page).await?;
    let users = ctx.expect_envelope(outcome)?.into_data().unwrap_or_else(Page::empty);

    ctx.print_header(&format!("Users (page {} of {})", page + 1, users.total_pages));

    let shown: Vec<&UserSummary> = users
        .content
        .iter()
        .filter(|u| filter.map(|term| u.matches(term)).unwrap_or(true))
        .collect();

    if shown.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    for user in shown {
        println!(
            "{:<12} {:<24} {:<32} {}",
            user.phone_number,
            user.name.as_deref().unwrap_or("-"),
            user.email.as_deref().unwrap_or("-"),
            style(user.role.label()).dim()
        );
    }
    Ok(())
}

pub async fn count_users(ctx: &AppContext) -> Result<()> {
    let outcome = ctx.api.count_users().await?;
    let count = ctx.expect_envelope(outcome)?.into_data().unwrap_or(0);
    println!("{}", count);
    Ok(())
}

// ============================================================================
// Products
// ============================================================================

pub async fn list_products(ctx: &AppContext, page: u32, search: Option<&str>) -> Result<()> {
    let outcome = match search {
        Some(query) => ctx.api.search_products(query, page).await?,
        None => ctx.api.list_products(page).await?,
    };
    let products = ctx
        .expect_envelope(outcome)?
        .into_data()
        .unwrap_or_else(Page::empty);

    ctx.print_header(&format!(
        "Products (page {} of {})",
        page + 1,
        products.total_pages
    ));
    print_products(&products.content);
    Ok(())
}

pub fn print_products(products: &[ProductSummary]) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }

    for product in products {
        let stock = match product.stock {
            Some(0) => "out of stock".red(),
            Some(n) => format!("{} in stock", n).normal(),
            None => "-".dimmed(),
        };
        println!(
            "{:<36} {:>10.2}  {:<16} {}",
            product.name,
            product.price,
            product.category.as_deref().unwrap_or("-"),
            stock
        );
    }
}

// ============================================================================
// Orders
// ============================================================================

pub async fn list_orders(ctx: &AppContext, page: u32, status: Option<OrderStatus>) -> Result<()> {
    let outcome = ctx.api.list_orders(page, status).await?;
    let orders = ctx.expect_envelope(outcome)?.into_data().unwrap_or_else(Page::empty);

    let title = match status {
        Some(status) => format!("{} orders", status.as_str()),
        None => "Orders".to_string(),
    };
    ctx.print_header(&format!("{} (page {} of {})", title, page + 1, orders.total_pages));
    print_orders(&orders.content);
    Ok(())
}

pub async fn find_order(ctx: &AppContext, order_id: &str) -> Result<()> {
    let outcome = ctx.api.search_orders(order_id).await?;
    let orders = ctx.expect_envelope(outcome)?.into_data().unwrap_or_default();
    print_orders(&orders);
    Ok(())
}

fn print_orders(orders: &[OrderSummary]) {
    if orders.is_empty() {
        println!("No orders found.");
        return;
    }

    for order in orders {
        println!(
            "{:<20} {:<24} {:>3} items {:>10.2}  {}",
            order.order_id,
            order.receiver_name.as_deref().unwrap_or("-"),
            order.total_item,
            order.order_amount,
            status_badge(&order.status)
        );
    }
}

fn status_badge(status: &str) -> ColoredString {
    match OrderStatus::parse(status) {
        Some(OrderStatus::Confirmed) => status.bright_blue(),
        Some(OrderStatus::Shipped) => status.bright_cyan(),
        Some(OrderStatus::Delivered) => status.bright_green(),
        Some(OrderStatus::Cancelled) | Some(OrderStatus::Refunded) => status.bright_red(),
        Some(OrderStatus::Returned) => status.bright_yellow(),
        None => status.normal(),
    }
}
