pub mod score_store;

pub use score_store::*;
