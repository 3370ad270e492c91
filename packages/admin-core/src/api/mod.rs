//! Typed calls for the console pages
//!
//! Thin wrappers that fix the path, query and payload type of each
//! endpoint. Everything goes through the authenticated gateway.

mod coupons;
mod orders;
mod products;
mod users;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::gateway::ApiGateway;

pub use orders::{ORDER_ID_MAX_LEN, ORDER_ID_MIN_LEN};

/// Resource API bound to one gateway
#[derive(Clone)]
pub struct AdminApi {
    gateway: ApiGateway,
    page_size: u32,
}

impl AdminApi {
    pub fn new(gateway: ApiGateway) -> Self {
        Self {
            gateway,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }
}
