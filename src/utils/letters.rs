use rand::Rng;

/// Filler alphabet for word-search grids
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Distractor letters offered alongside short anagram targets
pub const DISTRACTOR_LETTERS: &str = "ABCD";

/// Pick one uppercase letter, uniformly
pub fn random_letter(rng: &mut impl Rng) -> char {
    ALPHABET[rng.random_range(0..ALPHABET.len())] as char
}

/// Uppercase a word and strip any whitespace ("Memancing ikan" -> "MEMANCINGIKAN")
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Number of distractor letters for a target of `len` letters: up to 2,
/// only for targets shorter than 5
pub fn distractor_count(len: usize) -> usize {
    5usize.saturating_sub(len).min(2)
}
