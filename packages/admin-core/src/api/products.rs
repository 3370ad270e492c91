use super::AdminApi;
use crate::error::ApiError;
use crate::gateway::{ApiEnvelope, CallOutcome, Page, RequestOptions};
use crate::types::ProductSummary;

impl AdminApi {
    pub async fn list_products(
        &self,
        page: u32,
    ) -> Result<CallOutcome<Page<ProductSummary>>, ApiError> {
        let path = format!("/api/v1/products/all/{}/{}", page, self.page_size);
        Ok(self.gateway.call(&path, RequestOptions::get()).await?)
    }

    /// Full-text product search; a blank query yields an empty page locally
    pub async fn search_products(
        &self,
        query: &str,
        page: u32,
    ) -> Result<CallOutcome<Page<ProductSummary>>, ApiError> {
        if query.trim().is_empty() {
            return Ok(CallOutcome::Envelope(ApiEnvelope::ok(Page::empty())));
        }

        let path = format!("/api/v1/products/search/{}/{}", page, self.page_size);
        let options = RequestOptions::get().query("query", query);
        Ok(self.gateway.call(&path, options).await?)
    }
}
