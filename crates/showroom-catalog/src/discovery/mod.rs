//! Discovery views built on top of the catalog.
//!
//! Contains product cards, product grids, the swipe quiz and the catalog
//! summary used to brief a shopping assistant.

mod card;
mod quiz;
mod summary;

pub use card::{GridItem, ProductCard, ProductGrid};
pub use quiz::{
    LikedProduct, ProductQuiz, QuizBuilder, QuizOutcome, QuizSelection, QuizSession,
    DEFAULT_QUIZ_SIZE, LIKES_TO_UNLOCK, QUIZ_DISCOUNT_PERCENTAGE,
};
pub use summary::CatalogSummary;
