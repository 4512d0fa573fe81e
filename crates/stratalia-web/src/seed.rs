use std::borrow::Cow;

use anyhow::Context;
use rust_embed::Embed;
use stratalia_core::catalog::seed::{KNOWLEDGE_FILE, QUIZ_FILE, WORDS_FILE};
use stratalia_core::Seed;

use crate::config::ContentConfig;

#[derive(Embed)]
#[folder = "seed/"]
struct SeedAssets;

fn asset(name: &str) -> anyhow::Result<String> {
    let file = SeedAssets::get(name).with_context(|| format!("embedded seed file {name} missing"))?;
    Ok(match file.data {
        Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Cow::Owned(bytes) => String::from_utf8(bytes)?,
    })
}

/// The seed compiled into the binary.
pub fn embedded() -> anyhow::Result<Seed> {
    let seed = Seed::from_json(&asset(WORDS_FILE)?, &asset(QUIZ_FILE)?, &asset(KNOWLEDGE_FILE)?)?;
    Ok(seed)
}

/// Loads the seed from `content.seed_dir` when set, else the embedded one.
pub fn load(content: &ContentConfig) -> anyhow::Result<Seed> {
    let seed = match &content.seed_dir {
        Some(dir) => Seed::load_dir(dir)
            .with_context(|| format!("loading seed from {}", dir.display()))?,
        None => embedded()?,
    };
    tracing::info!(
        "Seed loaded: {} words, {} quiz questions, {} knowledge items",
        seed.words.len(),
        seed.quiz.len(),
        seed.knowledge.len()
    );
    Ok(seed)
}
