// core/src/product.rs

//! Everything the product page shows, loaded in one go.
//!
//! Only the product itself is required. Category, comments, related
//! products and wishlist membership are best-effort: a failure is logged
//! and leaves that part empty.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::comments::{CommentThread, ThreadState};
use crate::error::StorefrontResult;
use crate::model::{Category, Product, ProductVariant};
use crate::remote::CatalogService;
use crate::wishlist::WishlistStore;

#[derive(Debug, Clone)]
pub struct ProductPage {
  pub product: Product,
  pub category: Option<Category>,
  pub related_by_category: Vec<Product>,
  pub related_by_sub_category: Vec<Product>,
  pub thread: ThreadState,
  pub wished: bool,
}

impl ProductPage {
  #[instrument(name = "ProductPage::load", skip(catalog, thread, wishlist), err(Display))]
  pub async fn load(
    product_id: u64,
    catalog: Arc<dyn CatalogService>,
    thread: &CommentThread,
    wishlist: &WishlistStore,
  ) -> StorefrontResult<Self> {
    let product = catalog.product(product_id).await?;

    let category = match product.category {
      Some(id) => catalog
        .category(id)
        .await
        .map_err(|err| event!(Level::WARN, category_id = id, error = %err, "Category lookup failed."))
        .ok(),
      None => None,
    };

    if let Err(err) = thread.load().await {
      event!(Level::WARN, product_id, error = %err, "Comments could not be loaded.");
    }

    let related_by_category = match product.category {
      Some(id) => best_effort_list(catalog.products_in_category(id).await, "category"),
      None => Vec::new(),
    };
    let related_by_sub_category = match product.sub_category {
      Some(id) => best_effort_list(catalog.products_in_sub_category(id).await, "sub-category"),
      None => Vec::new(),
    };

    let first_variant = product.variants.first().map(|v| v.id);
    let wished = wishlist.check_exists(first_variant).await.unwrap_or(false);

    Ok(Self {
      product,
      category,
      related_by_category,
      related_by_sub_category,
      thread: thread.snapshot(),
      wished,
    })
  }

  /// The variant shown first: the product's first variant.
  pub fn main_variant(&self) -> Option<&ProductVariant> {
    self.product.variants.first()
  }

  pub fn main_image_index(variant: &ProductVariant) -> usize {
    variant.main_image_index()
  }

  /// Related products, sub-category first, without duplicates or the
  /// product itself.
  pub fn related(&self) -> Vec<&Product> {
    let mut seen = HashSet::from([self.product.id]);
    self
      .related_by_sub_category
      .iter()
      .chain(self.related_by_category.iter())
      .filter(|p| seen.insert(p.id))
      .collect()
  }
}

fn best_effort_list(result: StorefrontResult<Vec<Product>>, what: &str) -> Vec<Product> {
  result.unwrap_or_else(|err| {
    event!(Level::WARN, error = %err, "Related products by {} could not be loaded.", what);
    Vec::new()
  })
}
