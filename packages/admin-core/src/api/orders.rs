use super::AdminApi;
use crate::error::{ApiError, ValidationError};
use crate::gateway::{ApiEnvelope, CallOutcome, Page, RequestOptions};
use crate::types::{OrderStatus, OrderSummary};

/// Order ids are between 12 and 20 characters
pub const ORDER_ID_MIN_LEN: usize = 12;
pub const ORDER_ID_MAX_LEN: usize = 20;

impl AdminApi {
    /// One page of orders, optionally narrowed to a status
    pub async fn list_orders(
        &self,
        page: u32,
        status: Option<OrderStatus>,
    ) -> Result<CallOutcome<Page<OrderSummary>>, ApiError> {
        let path = format!("/api/v1/order/all/web/{}/{}", page, self.page_size);
        // The endpoint expects the parameter even when unfiltered
        let status = status.map(|s| s.as_str()).unwrap_or_default();
        let options = RequestOptions::get().query("status", status);
        Ok(self.gateway.call(&path, options).await?)
    }

    /// Look an order up by its public order id
    pub async fn search_orders(
        &self,
        order_id: &str,
    ) -> Result<CallOutcome<Vec<OrderSummary>>, ApiError> {
        let order_id = order_id.trim();
        if order_id.is_empty() {
            return Ok(CallOutcome::Envelope(ApiEnvelope::ok(Vec::new())));
        }
        if !is_valid_order_id(order_id) {
            return Err(ValidationError::InvalidOrderId.into());
        }

        let path = format!("/api/v1/order/search/{}", order_id);
        Ok(self.gateway.call(&path, RequestOptions::get()).await?)
    }
}

/// Length within bounds, and usable as a single path segment
fn is_valid_order_id(order_id: &str) -> bool {
    (ORDER_ID_MIN_LEN..=ORDER_ID_MAX_LEN).contains(&order_id.chars().count())
        && order_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_bounds() {
        assert!(is_valid_order_id("ORD123456789"));
        assert!(is_valid_order_id("ORD-2025-0000000001"));
        assert!(!is_valid_order_id("ORD12345678"));
        assert!(!is_valid_order_id("ORD12345678901234567890"));
        assert!(!is_valid_order_id("ORD/../../users"));
    }
}
