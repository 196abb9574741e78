//! Product swipe quiz command.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use showroom_catalog::discovery::{QuizBuilder, QuizSelection, QuizSession};

use super::QuizArgs;
use crate::context::Context;

/// Run the quiz command.
///
/// In JSON mode the quiz is printed without prompting.
pub async fn run(args: QuizArgs, ctx: &Context) -> Result<()> {
    let mut builder = QuizBuilder::new().with_count(args.count);
    if let Some(category) = &args.category {
        builder = builder.with_category(category.clone());
    }

    let store = ctx.load_store().await?;
    let quiz = store
        .build_quiz(&builder)
        .await
        .context("Failed to build quiz")?;

    if ctx.output.is_json() {
        ctx.output.json(&quiz);
        return Ok(());
    }

    ctx.output.header("Product Quiz");
    ctx.output.info(&quiz.instructions());

    let mut selections = Vec::with_capacity(quiz.cards.len());
    for (i, card) in quiz.cards.iter().enumerate() {
        ctx.output.info("");
        ctx.output.info(&format!("[{}/{}] {}", i + 1, quiz.cards.len(), card.headline()));
        if !card.brand.is_empty() {
            ctx.output.kv("brand", &card.brand);
        }
        ctx.output.kv("category", &card.category);
        ctx.output.kv("rating", &format!("{:.1}", card.rating));

        let liked = Confirm::new()
            .with_prompt("Like it?")
            .default(false)
            .interact()?;
        selections.push(if liked {
            QuizSelection::liked(card.id.clone())
        } else {
            QuizSelection::skipped(card.id.clone())
        });
    }

    let mut session = QuizSession::new();
    let quiz_id = session.add_quiz(quiz).id.clone();
    let outcome = session.submit(&quiz_id, &selections);

    ctx.output.header("Results");
    if outcome.liked.is_empty() {
        ctx.output.info("You didn't like any products this time.");
    }
    for product in &outcome.liked {
        ctx.output.list_item(&format!("{} (${:.2})", product.title, product.price));
    }

    match outcome.discount_percentage {
        Some(discount) => ctx
            .output
            .success(&format!("You unlocked a {}% discount!", discount)),
        None => ctx.output.info("Like a few more products next time to unlock a discount."),
    }

    if !session.preferences().is_empty() {
        ctx.output.header("Your Preferences");
        for (category, titles) in session.preferences() {
            ctx.output.kv(category, &titles.join(", "));
        }
    }

    Ok(())
}
