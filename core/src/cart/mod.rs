// core/src/cart/mod.rs

pub mod lanes;
pub mod reducer;
pub mod state;
pub mod store;

pub use lanes::MutationLanes;
pub use reducer::{reduce, CartAction};
pub use state::{round_to_cents, CartState};
pub use store::CartStore;
