use super::AdminApi;
use crate::error::ApiError;
use crate::gateway::{CallOutcome, Page, RequestOptions};
use crate::types::UserSummary;

impl AdminApi {
    /// One page of users, zero-based
    pub async fn list_users(&self, page: u32) -> Result<CallOutcome<Page<UserSummary>>, ApiError> {
        let path = format!("/api/v1/users/all/{}/{}", page, self.page_size);
        Ok(self.gateway.call(&path, RequestOptions::get()).await?)
    }

    pub async fn count_users(&self) -> Result<CallOutcome<u64>, ApiError> {
        Ok(self
            .gateway
            .call("/api/v1/users/count", RequestOptions::get())
            .await?)
    }
}
