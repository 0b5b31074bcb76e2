//! Boundary-marked character bigrams of a name.

use std::fmt;
use std::iter::Map;
use std::str::Chars;

/// Marker prepended to every name so the first letter gets its own bigram.
pub const BOUNDARY: char = '_';

/// An ordered pair of adjacent (lowercased) characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bigram(pub [char; 2]);

impl Bigram {
    /// Build a bigram from two characters.
    pub fn new(first: char, second: char) -> Self {
        Self([first, second])
    }
}

impl fmt::Display for Bigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

type Lowered<'a> = Map<Chars<'a>, fn(char) -> char>;

// Only the first char of the lowercase mapping, so 'İ' stays one char.
fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Lazy iterator over the bigrams of `_` + lowercase(name).
///
/// Cloning the iterator restarts from the same position, so a caller can
/// walk the sequence more than once without re-lowercasing the name.
#[derive(Clone)]
pub struct Bigrams<'a> {
    chars: Lowered<'a>,
    prev: Option<char>,
}

impl fmt::Debug for Bigrams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bigrams").field("prev", &self.prev).finish()
    }
}

impl Iterator for Bigrams<'_> {
    type Item = Bigram;

    fn next(&mut self) -> Option<Bigram> {
        let prev = self.prev?;
        let Some(next) = self.chars.next() else {
            self.prev = None;
            return None;
        };
        self.prev = Some(next);
        Some(Bigram::new(prev, next))
    }
}

/// Bigrams of a name: `"Amy"` yields `_a`, `am`, `my`.
///
/// An empty name yields nothing; a one-character name yields exactly one bigram.
pub fn bigrams(name: &str) -> Bigrams<'_> {
    let chars = name.chars().map(lower as fn(char) -> char);
    Bigrams {
        chars,
        prev: (!name.is_empty()).then_some(BOUNDARY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(name: &str) -> Vec<String> {
        bigrams(name).map(|b| b.to_string()).collect()
    }

    #[test]
    fn marks_the_first_letter() {
        assert_eq!(strings("Amy"), vec!["_a", "am", "my"]);
    }

    #[test]
    fn empty_name_has_no_bigrams() {
        assert_eq!(bigrams("").count(), 0);
    }

    #[test]
    fn single_character_name() {
        assert_eq!(strings("J"), vec!["_j"]);
    }

    #[test]
    fn repeated_bigrams_are_kept() {
        assert_eq!(strings("Anna"), vec!["_a", "an", "nn", "na"]);
        assert_eq!(strings("Hannah").iter().filter(|b| *b == "ha").count(), 1);
        assert_eq!(strings("Nana").iter().filter(|b| *b == "na").count(), 2);
    }

    #[test]
    fn clone_restarts_the_sequence() {
        let seq = bigrams("Zoe");
        let first: Vec<_> = seq.clone().collect();
        let second: Vec<_> = seq.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn lowercases_non_ascii() {
        assert_eq!(strings("Élodie")[0], "_é");
    }

    #[test]
    fn expanding_lowercase_keeps_one_bigram_per_char() {
        assert_eq!(strings("İ"), vec!["_i"]);
        assert_eq!(bigrams("İlkay").count(), 5);
    }

    #[test]
    fn fused_after_exhaustion() {
        let mut seq = bigrams("Al");
        assert_eq!(seq.by_ref().count(), 2);
        assert_eq!(seq.next(), None);
    }
}
