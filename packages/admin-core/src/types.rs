//! Payload types for the back-office API
//!
//! Only the fields the console lists and forms use are modelled; unknown
//! fields in responses are ignored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub phone_number: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    pub created_at: Option<String>,
    pub last_signed_at: Option<String>,
}

impl UserSummary {
    /// Case-insensitive match on name or email, substring match on phone
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        let contains = |field: &Option<String>| {
            field
                .as_deref()
                .map(|v| v.to_lowercase().contains(&term))
                .unwrap_or(false)
        };
        contains(&self.name) || contains(&self.email) || self.phone_number.contains(&term)
    }
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Returned => "RETURNED",
            OrderStatus::Refunded => "REFUNDED",
        }
    }

    pub fn variants() -> &'static [OrderStatus] {
        &[
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Returned,
            OrderStatus::Refunded,
        ]
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::variants()
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub order_id: String,
    pub receiver_name: Option<String>,
    pub total_item: u32,
    pub order_amount: f64,
    /// Kept as text; the server may add statuses the console does not know
    pub status: String,
    pub created_at: Option<String>,
}

// ============================================================================
// Coupons
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub min_order_amount: f64,
    #[serde(default)]
    pub required_order_count: u32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub is_up_to: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponCreateRequest {
    pub code: String,
    pub title: String,
    pub description: String,
    pub discount_amount: f64,
    pub discount_percentage: f64,
    pub min_order_amount: f64,
    pub required_order_count: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_up_to: bool,
}

// ============================================================================
// Gift vouchers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    Active,
    Redeemed,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftVoucher {
    pub id: String,
    pub code: String,
    pub value: f64,
    pub recipient_email: String,
    pub sender_name: String,
    pub message: String,
    pub status: VoucherStatus,
    pub created_at: DateTime<Utc>,
    pub redeemed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_summary_from_api_shape() {
        let user: UserSummary = serde_json::from_value(json!({
            "id": "u1",
            "phoneNumber": "9876543210",
            "name": "Asha",
            "email": null,
            "role": "ADMIN",
            "createdAt": "2025-01-01T00:00:00Z",
            "lastSignedAt": null
        }))
        .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(user.matches("asha"));
        assert!(user.matches("98765"));
        assert!(!user.matches("someone@example.com"));
    }

    #[test]
    fn test_order_status_parse_is_case_insensitive() {
        assert_eq!(OrderStatus::parse("shipped"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::parse("LOST"), None);
    }

    #[test]
    fn test_coupon_request_serializes_camel_case() {
        let request = CouponCreateRequest {
            code: "WELCOME10".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["code"], "WELCOME10");
        assert_eq!(value["startDate"], "2025-01-01");
        assert_eq!(value["isUpTo"], false);
    }

    #[test]
    fn test_voucher_status_lowercase() {
        let status: VoucherStatus = serde_json::from_value(json!("redeemed")).unwrap();
        assert_eq!(status, VoucherStatus::Redeemed);
    }
}
