// core/src/model/catalog.rs

//! Catalog records as the storefront API returns them.

use serde::{Deserialize, Serialize};

/// Prices come back either as JSON numbers or as decimal strings ("19.99").
pub(crate) mod money {
  use serde::{Deserialize, Deserializer};

  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawAmount {
    Number(f64),
    Text(String),
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
  where
    D: Deserializer<'de>,
  {
    match RawAmount::deserialize(deserializer)? {
      RawAmount::Number(n) => Ok(n),
      RawAmount::Text(s) => s
        .trim()
        .parse::<f64>()
        .map_err(|e| serde::de::Error::custom(format!("invalid amount '{}': {}", s, e))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantImage {
  #[serde(default)]
  pub id: Option<u64>,
  pub image: String,
  #[serde(rename = "mainImage", default)]
  pub main_image: bool,
}

/// Parent product reference carried by a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
  pub id: u64,
  #[serde(default)]
  pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
  pub id: u64,
  #[serde(default, deserialize_with = "money::deserialize")]
  pub price: f64,
  #[serde(default)]
  pub stock: Option<u32>,
  #[serde(default)]
  pub color: Option<String>,
  #[serde(default)]
  pub images: Vec<VariantImage>,
  #[serde(default)]
  pub product: Option<ProductRef>,
}

impl ProductVariant {
  /// The image flagged as main, else the first one.
  pub fn main_image(&self) -> Option<&VariantImage> {
    self.images.iter().find(|img| img.main_image).or_else(|| self.images.first())
  }

  /// Position of the image flagged as main, 0 when none is flagged.
  pub fn main_image_index(&self) -> usize {
    self.images.iter().position(|img| img.main_image).unwrap_or(0)
  }

  pub fn title(&self) -> &str {
    self.product.as_ref().map(|p| p.title.as_str()).unwrap_or("")
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSize {
  pub id: u64,
  #[serde(rename = "size", default)]
  pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: u64,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub category: Option<u64>,
  #[serde(rename = "subCategory", default)]
  pub sub_category: Option<u64>,
  #[serde(default)]
  pub variants: Vec<ProductVariant>,
  /// Mean comment rating, 0 to 5. Absent when nobody rated the product.
  #[serde(default)]
  pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub id: u64,
  pub title: String,
  #[serde(default)]
  pub slug: String,
}
