use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use rand::{seq::IndexedRandom, Rng};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::{game::GameError, utils::letters::normalize_word};

/// Picture match shows four options, so the catalog needs at least four hobbies
pub const MIN_HOBBIES: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hobby {
    pub key: String,
    pub label: String,
    pub emoji: String,
}

impl Hobby {
    fn new(key: &str, label: &str, emoji: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            emoji: emoji.to_string(),
        }
    }

    /// The label as a puzzle word ("Membaca" -> "MEMBACA")
    pub fn word(&self) -> String {
        normalize_word(&self.label)
    }
}

static BUILTIN_HOBBIES: Lazy<Vec<Hobby>> = Lazy::new(|| {
    vec![
        Hobby::new("membaca", "Membaca", "📚"),
        Hobby::new("menulis", "Menulis", "✍️"),
        Hobby::new("menggambar", "Menggambar", "🖍️"),
        Hobby::new("melukis", "Melukis", "🎨"),
        Hobby::new("memancing", "Memancing", "🎣"),
    ]
});

#[derive(Debug, Clone)]
pub struct HobbyCatalog {
    hobbies: Vec<Hobby>,
}

impl HobbyCatalog {
    /// Load a catalog from a JSON array of `{ "key", "label", "emoji" }`
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read hobby catalog {}", path.display()))?;
        let hobbies: Vec<Hobby> =
            serde_json::from_str(&content).context("Hobby catalog is not a valid JSON list")?;

        let catalog = Self::from_hobbies(hobbies)?;
        tracing::info!("Loaded {} hobbies into catalog", catalog.len());

        Ok(catalog)
    }

    /// Build a catalog, dropping blank labels and repeated keys
    pub fn from_hobbies(hobbies: Vec<Hobby>) -> Result<Self> {
        let mut seen = HashSet::new();
        let hobbies: Vec<Hobby> = hobbies
            .into_iter()
            .filter(|hobby| !hobby.word().is_empty() && seen.insert(hobby.key.clone()))
            .collect();

        if hobbies.len() < MIN_HOBBIES {
            anyhow::bail!(GameError::NotEnoughHobbies {
                needed: MIN_HOBBIES,
                found: hobbies.len(),
            });
        }

        Ok(Self { hobbies })
    }

    /// The five hobbies the game ships with
    pub fn builtin() -> Self {
        Self {
            hobbies: BUILTIN_HOBBIES.clone(),
        }
    }

    pub fn hobbies(&self) -> &[Hobby] {
        &self.hobbies
    }

    pub fn len(&self) -> usize {
        self.hobbies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hobbies.is_empty()
    }

    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<&Hobby> {
        self.hobbies.choose(rng)
    }

    /// Up to `count` distinct hobbies in no particular order
    pub fn sample<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<Hobby> {
        self.hobbies.choose_multiple(rng, count).cloned().collect()
    }

    /// Puzzle words of the first `count` hobbies
    pub fn leading_words(&self, count: usize) -> Vec<String> {
        self.hobbies.iter().take(count).map(Hobby::word).collect()
    }
}
