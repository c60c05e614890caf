//! pennywise-core: value types shared by the ledger pipeline

pub mod finance;
pub mod recommendation;

pub use finance::{CategorizedTransaction, Category, NormalizedTransaction};
pub use recommendation::{Priority, Recommendation, RecommendationKind};
