//! Test harness: a fake remote API plus a console core wired to it.
//!
//! Each test gets its own mock server, credential store and route tracker.
//! Run with `RUST_LOG=debug cargo test -- --nocapture` to see gateway logs.

use admin_core::auth::{CredentialStore, MemoryCredentialStore};
use admin_core::{ApiGateway, AuthContext, RouteTracker};
use std::sync::Arc;
use url::Url;
use wiremock::MockServer;

pub struct TestHarness {
    pub server: MockServer,
    pub credentials: Arc<MemoryCredentialStore>,
    pub navigator: Arc<RouteTracker>,
    pub auth: AuthContext,
    pub gateway: ApiGateway,
}

impl TestHarness {
    /// Harness with no stored credential, starting on `route`
    pub async fn signed_out(route: &str) -> Self {
        Self::build(MemoryCredentialStore::new(), route).await
    }

    /// Harness restored from a stored `token`, starting on `route`
    pub async fn signed_in(token: &str, route: &str) -> Self {
        Self::build(MemoryCredentialStore::with_token(token), route).await
    }

    async fn build(store: MemoryCredentialStore, route: &str) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let server = MockServer::start().await;
        let credentials = Arc::new(store);
        let navigator = Arc::new(RouteTracker::new(route));
        let auth = AuthContext::bootstrap(credentials.clone(), navigator.clone());
        let origin = Url::parse(&server.uri()).expect("mock server uri");
        let gateway = ApiGateway::new(origin, auth.clone());

        Self {
            server,
            credentials,
            navigator,
            auth,
            gateway,
        }
    }

    pub fn stored_token(&self) -> Option<String> {
        self.credentials.load().expect("memory store never fails")
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
