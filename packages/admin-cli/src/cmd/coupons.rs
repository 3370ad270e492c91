//! Coupon listing and creation

use admin_core::types::{Coupon, CouponCreateRequest};
use admin_core::ApiError;
use anyhow::Result;
use console::style;

use crate::context::AppContext;

pub async fn list_coupons(ctx: &AppContext) -> Result<()> {
    let outcome = ctx.api.list_coupons().await?;
    let coupons = ctx.expect_envelope(outcome)?.into_data().unwrap_or_default();

    ctx.print_header("Coupons");
    if coupons.is_empty() {
        println!("No coupons yet.");
        return Ok(());
    }

    for coupon in &coupons {
        let state = if coupon.active {
            style("active").green()
        } else {
            style("inactive").dim()
        };
        println!(
            "{:<14} {:<28} {:<14} {} - {}  {}",
            coupon.code,
            coupon.title,
            discount_label(coupon),
            coupon.start_date.as_deref().unwrap_or("?"),
            coupon.end_date.as_deref().unwrap_or("?"),
            state
        );
    }
    Ok(())
}

pub async fn create_coupon(ctx: &AppContext, request: CouponCreateRequest) -> Result<()> {
    let code = request.code.trim().to_uppercase();

    let outcome = match ctx.api.create_coupon(request).await {
        Ok(outcome) => outcome,
        Err(ApiError::Validation(e)) => {
            ctx.print_warning(&e.to_string());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let envelope = ctx.expect_envelope(outcome)?;
    ctx.print_success(envelope.message_or(&format!("Coupon {} created", code)));
    Ok(())
}

fn discount_label(coupon: &Coupon) -> String {
    match (coupon.discount_percentage > 0.0, coupon.is_up_to) {
        (true, true) => format!(
            "{}% up to {:.2}",
            coupon.discount_percentage, coupon.discount_amount
        ),
        (true, false) => format!("{}%", coupon.discount_percentage),
        (false, _) => format!("{:.2} off", coupon.discount_amount),
    }
}
