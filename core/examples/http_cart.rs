// core/examples/http_cart.rs

//! Lists the cart of a real storefront API.
//!
//! STOREFRONT_API_BASE_URL, STOREFRONT_TOKEN and STOREFRONT_USER_ID must be set.

use storefront::{ClientConfig, Session, StorefrontClient};
use tracing::{error, info};

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- HTTP Cart Example ---");

  let base_url = std::env::var("STOREFRONT_API_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8000/".to_string());
  let (Ok(token), Some(user_id)) = (
    std::env::var("STOREFRONT_TOKEN"),
    std::env::var("STOREFRONT_USER_ID").ok().and_then(|v| v.parse::<u64>().ok()),
  ) else {
    error!("Set STOREFRONT_TOKEN and STOREFRONT_USER_ID to run this example.");
    return;
  };

  let client = match ClientConfig::new(&base_url).and_then(StorefrontClient::connect) {
    Ok(client) => client,
    Err(e) => {
      error!(error = %e, "Could not build the client");
      return;
    }
  };

  if let Err(e) = client.sign_in(Session::new(user_id, token)).await {
    error!(error = %e, "Could not load the cart");
    return;
  }

  let view = client.cart_view();
  for row in view.rows() {
    info!(
      title = %row.display_title(),
      quantity = row.quantity,
      price = row.price,
      checked = row.checked,
      "Cart line"
    );
  }
  let summary = view.summary();
  info!(subtotal = %summary.subtotal, total = %summary.total, "Summary");
}
