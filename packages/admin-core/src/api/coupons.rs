use super::AdminApi;
use crate::error::{ApiError, ValidationError};
use crate::gateway::{CallOutcome, RequestOptions};
use crate::types::{Coupon, CouponCreateRequest};

impl CouponCreateRequest {
    /// Check the form and normalise it for submission
    ///
    /// Codes are upper-cased and text fields trimmed.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        self.code = self.code.trim().to_uppercase();
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();

        if self.code.is_empty() {
            return Err(ValidationError::Required("Coupon code"));
        }
        if self.title.is_empty() {
            return Err(ValidationError::Required("Title"));
        }
        if self.discount_percentage <= 0.0 && self.discount_amount <= 0.0 {
            return Err(ValidationError::MissingDiscount);
        }
        let start = self.start_date.ok_or(ValidationError::Required("Start date"))?;
        let end = self.end_date.ok_or(ValidationError::Required("End date"))?;
        if end < start {
            return Err(ValidationError::EndBeforeStart);
        }

        Ok(self)
    }
}

impl AdminApi {
    pub async fn list_coupons(&self) -> Result<CallOutcome<Vec<Coupon>>, ApiError> {
        Ok(self
            .gateway
            .call("/coupon/all", RequestOptions::get())
            .await?)
    }

    /// Validate and submit a new coupon
    ///
    /// The server answers 200 or 201 on success; check with `is_success`.
    pub async fn create_coupon(
        &self,
        request: CouponCreateRequest,
    ) -> Result<CallOutcome<serde_json::Value>, ApiError> {
        let request = request.validated()?;
        let options = RequestOptions::post().json(&request)?;
        Ok(self.gateway.call("/coupon/create", options).await?)
    }
}
