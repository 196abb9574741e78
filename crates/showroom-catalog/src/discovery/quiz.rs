//! The product swipe quiz.
//!
//! A quiz is a random sample of product cards. The shopper likes or skips
//! each card; liking enough of them unlocks a discount, and every like is
//! recorded as a per-category preference for later recommendations.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Product;
use crate::discovery::ProductCard;
use crate::error::CatalogError;
use crate::ids::{CardId, ProductId, QuizId};

/// Discount offered for completing a quiz, in percent.
pub const QUIZ_DISCOUNT_PERCENTAGE: f64 = 5.0;
/// Likes needed to unlock the discount.
pub const LIKES_TO_UNLOCK: usize = 3;
/// Cards per quiz when no count is given.
pub const DEFAULT_QUIZ_SIZE: usize = 8;

/// A set of cards to swipe through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductQuiz {
    pub id: QuizId,
    pub cards: Vec<ProductCard>,
    pub discount_percentage: f64,
}

impl ProductQuiz {
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        Self {
            id: QuizId::generate(),
            cards: products.into_iter().map(ProductCard::from_product).collect(),
            discount_percentage: QUIZ_DISCOUNT_PERCENTAGE,
        }
    }

    pub fn card(&self, id: &CardId) -> Option<&ProductCard> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Instructions shown alongside the cards.
    pub fn instructions(&self) -> String {
        format!(
            "Like at least {} products to unlock a {}% discount!",
            LIKES_TO_UNLOCK, self.discount_percentage
        )
    }
}

/// Builds quizzes from a random sample of the catalog.
#[derive(Debug, Clone)]
pub struct QuizBuilder {
    category: Option<String>,
    count: usize,
}

impl Default for QuizBuilder {
    fn default() -> Self {
        Self {
            category: None,
            count: DEFAULT_QUIZ_SIZE,
        }
    }
}

impl QuizBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only sample from one category, case-insensitive.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sample `count` distinct products.
    ///
    /// Fails with [`CatalogError::NotEnoughProducts`] when the (filtered)
    /// catalog is smaller than `count`.
    pub fn build<R: Rng + ?Sized>(
        &self,
        products: &[Product],
        rng: &mut R,
    ) -> Result<ProductQuiz, CatalogError> {
        let available: Vec<&Product> = match &self.category {
            Some(category) => products.iter().filter(|p| p.in_category(category)).collect(),
            None => products.iter().collect(),
        };

        if available.len() < self.count {
            return Err(CatalogError::NotEnoughProducts {
                requested: self.count,
                available: available.len(),
            });
        }

        let picked = available.choose_multiple(rng, self.count).copied();
        Ok(ProductQuiz::from_products(picked))
    }
}

/// The shopper's verdict on one card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizSelection {
    pub card_id: CardId,
    pub liked: bool,
}

impl QuizSelection {
    pub fn liked(card_id: CardId) -> Self {
        Self {
            card_id,
            liked: true,
        }
    }

    pub fn skipped(card_id: CardId) -> Self {
        Self {
            card_id,
            liked: false,
        }
    }
}

/// A product the shopper liked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LikedProduct {
    pub product_id: ProductId,
    pub title: String,
    pub category: String,
    pub price: f64,
}

/// Result of submitting a quiz.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuizOutcome {
    pub liked: Vec<LikedProduct>,
    pub discount_unlocked: bool,
    /// Set only when the discount was unlocked.
    pub discount_percentage: Option<f64>,
}

/// Quizzes, cards and learned preferences for one shopper.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    cards: Vec<ProductCard>,
    quizzes: Vec<ProductQuiz>,
    preferences: BTreeMap<String, Vec<String>>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and keep a standalone card.
    pub fn add_card(&mut self, product: &Product) -> &ProductCard {
        self.cards.push(ProductCard::from_product(product));
        &self.cards[self.cards.len() - 1]
    }

    /// Look up a standalone card or a card inside any quiz.
    pub fn card(&self, id: &CardId) -> Option<&ProductCard> {
        self.cards
            .iter()
            .find(|c| &c.id == id)
            .or_else(|| self.quizzes.iter().find_map(|q| q.card(id)))
    }

    pub fn add_quiz(&mut self, quiz: ProductQuiz) -> &ProductQuiz {
        self.quizzes.push(quiz);
        &self.quizzes[self.quizzes.len() - 1]
    }

    pub fn quiz(&self, id: &QuizId) -> Result<&ProductQuiz, CatalogError> {
        self.quizzes
            .iter()
            .find(|q| &q.id == id)
            .ok_or_else(|| CatalogError::QuizNotFound(id.to_string()))
    }

    /// Liked titles, keyed by category.
    pub fn preferences(&self) -> &BTreeMap<String, Vec<String>> {
        &self.preferences
    }

    /// Record the shopper's selections for a quiz.
    ///
    /// An unknown quiz yields an empty outcome. Selections for cards that are
    /// not part of the quiz are ignored.
    pub fn submit(&mut self, quiz_id: &QuizId, selections: &[QuizSelection]) -> QuizOutcome {
        let quiz = match self.quiz(quiz_id) {
            Ok(quiz) => quiz,
            Err(e) => {
                debug!(error = %e, "ignoring quiz submission");
                return QuizOutcome::default();
            }
        };

        let liked: Vec<LikedProduct> = quiz
            .cards
            .iter()
            .filter(|card| {
                selections
                    .iter()
                    .any(|s| s.liked && s.card_id == card.id)
            })
            .map(|card| LikedProduct {
                product_id: card.product_id.clone(),
                title: card.title.clone(),
                category: card.category.clone(),
                price: card.price,
            })
            .collect();
        let discount = quiz.discount_percentage;

        for product in &liked {
            let titles = self.preferences.entry(product.category.clone()).or_default();
            if !titles.contains(&product.title) {
                titles.push(product.title.clone());
            }
        }

        let discount_unlocked = liked.len() >= LIKES_TO_UNLOCK;
        QuizOutcome {
            liked,
            discount_unlocked,
            discount_percentage: discount_unlocked.then_some(discount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{normalize, Catalog, CatalogDocument, ImageFallbacks};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn catalog() -> Catalog {
        let json = r#"{"products": [
            {"id": 1, "title": "Lipstick", "category": "beauty", "price": 9},
            {"id": 2, "title": "Mascara", "category": "Beauty", "price": 12},
            {"id": 3, "title": "Serum", "category": "beauty", "price": 30},
            {"id": 4, "title": "Blush", "category": "beauty", "price": 14},
            {"id": 5, "title": "Laptop", "category": "laptops", "price": 999},
            {"id": 6, "title": "Phone", "category": "smartphones", "price": 599}
        ]}"#;
        normalize(CatalogDocument::from_str(json).unwrap(), &ImageFallbacks::default())
    }

    #[test]
    fn test_build_samples_distinct_products() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(7);
        let quiz = QuizBuilder::new()
            .with_count(4)
            .build(catalog.products(), &mut rng)
            .unwrap();
        assert_eq!(quiz.cards.len(), 4);
        assert_eq!(quiz.discount_percentage, QUIZ_DISCOUNT_PERCENTAGE);
        let ids: HashSet<_> = quiz.cards.iter().map(|c| c.product_id.clone()).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_build_by_category() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let quiz = QuizBuilder::new()
            .with_category("BEAUTY")
            .with_count(4)
            .build(catalog.products(), &mut rng)
            .unwrap();
        assert!(quiz.cards.iter().all(|c| c.category.eq_ignore_ascii_case("beauty")));
    }

    #[test]
    fn test_not_enough_products() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let err = QuizBuilder::new()
            .with_category("laptops")
            .with_count(2)
            .build(catalog.products(), &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NotEnoughProducts {
                requested: 2,
                available: 1
            }
        ));
    }

    #[test]
    fn test_submit_unlocks_discount_at_three_likes() {
        let catalog = catalog();
        let mut session = QuizSession::new();
        let quiz = ProductQuiz::from_products(catalog.products().iter().take(4));
        let cards: Vec<CardId> = quiz.cards.iter().map(|c| c.id.clone()).collect();
        let quiz_id = session.add_quiz(quiz).id.clone();

        let two = [
            QuizSelection::liked(cards[0].clone()),
            QuizSelection::liked(cards[1].clone()),
            QuizSelection::skipped(cards[2].clone()),
        ];
        let outcome = session.submit(&quiz_id, &two);
        assert_eq!(outcome.liked.len(), 2);
        assert!(!outcome.discount_unlocked);
        assert_eq!(outcome.discount_percentage, None);

        let three = [
            QuizSelection::liked(cards[0].clone()),
            QuizSelection::liked(cards[1].clone()),
            QuizSelection::liked(cards[3].clone()),
        ];
        let outcome = session.submit(&quiz_id, &three);
        assert!(outcome.discount_unlocked);
        assert_eq!(outcome.discount_percentage, Some(5.0));
    }

    #[test]
    fn test_submit_records_preferences_once() {
        let catalog = catalog();
        let mut session = QuizSession::new();
        let quiz = ProductQuiz::from_products(catalog.products().iter().take(2));
        let likes: Vec<QuizSelection> =
            quiz.cards.iter().map(|c| QuizSelection::liked(c.id.clone())).collect();
        let quiz_id = session.add_quiz(quiz).id.clone();

        session.submit(&quiz_id, &likes);
        session.submit(&quiz_id, &likes);

        assert_eq!(session.preferences()["beauty"], vec!["Lipstick"]);
        assert_eq!(session.preferences()["Beauty"], vec!["Mascara"]);
    }

    #[test]
    fn test_unknown_quiz_is_empty_outcome() {
        let mut session = QuizSession::new();
        let outcome = session.submit(&QuizId::new("missing"), &[]);
        assert_eq!(outcome, QuizOutcome::default());
        assert!(matches!(
            session.quiz(&QuizId::new("missing")),
            Err(CatalogError::QuizNotFound(_))
        ));
    }

    #[test]
    fn test_card_lookup() {
        let catalog = catalog();
        let mut session = QuizSession::new();
        let card_id = session.add_card(&catalog.products()[0]).id.clone();
        assert_eq!(session.card(&card_id).unwrap().title, "Lipstick");

        let quiz = ProductQuiz::from_products(catalog.products().iter().skip(4));
        let quiz_card = quiz.cards[0].id.clone();
        session.add_quiz(quiz);
        assert_eq!(session.card(&quiz_card).unwrap().title, "Laptop");
        assert!(session.card(&CardId::new("nope")).is_none());
    }
}
