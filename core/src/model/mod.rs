pub mod cart;
pub mod catalog;
pub mod social;

pub use cart::{CartLineItem, CartRow, LineKey};
pub use catalog::{Category, Product, ProductRef, ProductSize, ProductVariant, VariantImage};
pub use social::{Comment, UserInfo, WishlistEntry};
