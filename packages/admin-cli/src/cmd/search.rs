//! Search-as-you-type over products

use admin_core::search::{Debouncer, LatestResult};
use admin_core::types::ProductSummary;
use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

use crate::cmd::resources::print_products;
use crate::context::AppContext;

/// Read queries line by line and show results for the latest one
///
/// Each line stands in for the contents of the search box. Lines that
/// arrive within the debounce window replace each other; only the last
/// query is sent, and a response for an older query is dropped.
pub async fn live_product_search(ctx: &AppContext) -> Result<()> {
    ctx.print_header("Product search");
    ctx.print_info("Type a query per line. An empty line clears. Ctrl-D to quit.");

    let latest: Arc<LatestResult<Vec<ProductSummary>>> = Arc::new(LatestResult::new());
    let mut debouncer = Debouncer::new(ctx.config.search_debounce);
    let (tx, mut rx) = mpsc::unbounded_channel::<(String, Vec<ProductSummary>)>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let query = line.trim().to_string();

                if query.is_empty() {
                    debouncer.reset();
                    latest.clear();
                    continue;
                }

                let api = ctx.api.clone();
                let latest = latest.clone();
                let tx = tx.clone();
                debouncer.input(query, move |query, ticket| async move {
                    let products = match api.search_products(&query, 0).await {
                        Ok(outcome) => outcome
                            .into_envelope()
                            .and_then(|e| e.into_data())
                            .map(|page| page.content)
                            .unwrap_or_default(),
                        Err(e) => {
                            warn!("Search for {:?} failed: {}", query, e);
                            return;
                        }
                    };
                    if latest.offer(&ticket, products.clone()) {
                        let _ = tx.send((query, products));
                    }
                });
            }
            Some((query, products)) = rx.recv() => {
                show(ctx, &query, &products);
            }
        }
    }

    // Input ended: let the last timer fire, then drain what is still in flight
    tokio::time::sleep(debouncer.delay() * 2).await;
    drop(debouncer);
    drop(tx);
    while let Some((query, products)) = rx.recv().await {
        show(ctx, &query, &products);
    }

    Ok(())
}

fn show(ctx: &AppContext, query: &str, products: &[ProductSummary]) {
    ctx.print_header(&format!("Results for {:?}", query));
    print_products(products);
}
