//! Bigram document frequencies and their rarity ranks.
//!
//! A bigram's count is the number of *distinct* names containing it; a name
//! seen on several input rows, or containing the same bigram twice, still
//! contributes one. Ranks order bigrams by ascending count (1 = rarest), with
//! ties broken by the bigram's character order so that the ranking does not
//! depend on the order in which names arrive.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::bigram::{Bigram, bigrams};
use crate::error::{NetworkError, Result};

/// Accumulates per-bigram counts over a stream of names.
#[derive(Debug, Default)]
pub struct BigramCounter {
    seen: HashSet<String>,
    counts: BTreeMap<Bigram, usize>,
}

impl BigramCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the bigrams of `name`, unless the name was already observed.
    pub fn observe(&mut self, name: &str) {
        if !self.seen.insert(name.to_string()) {
            return;
        }
        let distinct: HashSet<Bigram> = bigrams(name).collect();
        for bigram in distinct {
            *self.counts.entry(bigram).or_insert(0) += 1;
        }
    }

    /// Freeze the counts into a ranked index.
    pub fn finish(self) -> BigramIndex {
        let mut order: Vec<(Bigram, usize)> = self.counts.into_iter().collect();
        // BTreeMap iteration is already in bigram order; the stable sort keeps
        // that order among equal counts.
        order.sort_by_key(|&(_, count)| count);

        let total = order.iter().map(|&(_, count)| count).sum();
        let entries = order
            .into_iter()
            .enumerate()
            .map(|(i, (bigram, count))| (bigram, BigramStat { count, rank: i + 1 }))
            .collect();

        BigramIndex { entries, total }
    }
}

/// Count and rank of one bigram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigramStat {
    /// Number of distinct names containing the bigram.
    pub count: usize,
    /// Rarity rank, 1 = least frequent.
    pub rank: usize,
}

/// One line of the exported bigram histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramEntry {
    pub bigram: Bigram,
    pub count: usize,
    /// `count` as a percentage of all bigram occurrences.
    pub percentage: f64,
}

/// Bigram → (count, rank) mapping over a set of distinct names.
#[derive(Debug, Clone, Default)]
pub struct BigramIndex {
    entries: HashMap<Bigram, BigramStat>,
    total: usize,
}

impl BigramIndex {
    /// Build an index from names; duplicates are ignored.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counter = BigramCounter::new();
        for name in names {
            counter.observe(name.as_ref());
        }
        counter.finish()
    }

    /// Number of distinct bigrams, which is also the largest rank.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no bigram was counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all per-bigram counts.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Rarity rank of a bigram.
    pub fn rank(&self, bigram: &Bigram) -> Option<usize> {
        self.entries.get(bigram).map(|stat| stat.rank)
    }

    /// Raw count of a bigram.
    pub fn count(&self, bigram: &Bigram) -> Option<usize> {
        self.entries.get(bigram).map(|stat| stat.count)
    }

    /// Iterate over every bigram with its stats, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Bigram, &BigramStat)> {
        self.entries.iter()
    }

    /// Check that ranks cover exactly `1..=len()`.
    pub fn check_ranks(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Ok(());
        }
        let mut ranks: Vec<usize> = self.entries.values().map(|stat| stat.rank).collect();
        ranks.sort_unstable();
        let min = ranks[0];
        let max = ranks[ranks.len() - 1];
        let expected = self.entries.len();
        let contiguous = ranks.iter().enumerate().all(|(i, &r)| r == i + 1);
        if min != 1 || max != expected || !contiguous {
            return Err(NetworkError::RankInvariant { min, max, expected });
        }
        Ok(())
    }

    /// Histogram rows, most frequent bigram first.
    pub fn histogram(&self) -> Vec<HistogramEntry> {
        let mut stats: Vec<(&Bigram, &BigramStat)> = self.entries.iter().collect();
        stats.sort_by(|a, b| b.1.rank.cmp(&a.1.rank));
        let total = self.total.max(1) as f64;
        stats
            .into_iter()
            .map(|(bigram, stat)| HistogramEntry {
                bigram: *bigram,
                count: stat.count,
                percentage: stat.count as f64 * 100.0 / total,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bg(s: &str) -> Bigram {
        let mut chars = s.chars();
        Bigram::new(chars.next().unwrap(), chars.next().unwrap())
    }

    #[test]
    fn counts_each_name_once() {
        let index = BigramIndex::from_names(["Amy", "Amy", "Anna"]);
        assert_eq!(index.count(&bg("_a")), Some(2));
        assert_eq!(index.count(&bg("am")), Some(1));
        assert_eq!(index.count(&bg("nn")), Some(1));
    }

    #[test]
    fn repeated_bigram_inside_a_name_counts_once() {
        let index = BigramIndex::from_names(["Nana"]);
        assert_eq!(index.count(&bg("na")), Some(1));
        assert_eq!(index.total(), 3);
    }

    #[test]
    fn ranks_are_ascending_by_count_then_bigram() {
        let index = BigramIndex::from_names(["Amy", "Ami"]);
        // counts: _a=2, am=2, my=1, mi=1
        assert_eq!(index.rank(&bg("mi")), Some(1));
        assert_eq!(index.rank(&bg("my")), Some(2));
        assert_eq!(index.rank(&bg("_a")), Some(3));
        assert_eq!(index.rank(&bg("am")), Some(4));
        assert!(index.check_ranks().is_ok());
    }

    #[test]
    fn ranking_ignores_arrival_order() {
        let a = BigramIndex::from_names(["Eve", "Amy", "Ava"]);
        let b = BigramIndex::from_names(["Ava", "Eve", "Amy"]);
        for (bigram, stat) in a.iter() {
            assert_eq!(b.rank(bigram), Some(stat.rank));
        }
    }

    #[test]
    fn empty_index_is_consistent() {
        let index = BigramIndex::from_names(Vec::<String>::new());
        assert!(index.is_empty());
        assert!(index.check_ranks().is_ok());
        assert!(index.histogram().is_empty());
    }

    #[test]
    fn histogram_percentages_sum_to_hundred() {
        let index = BigramIndex::from_names(["Amy", "Amber", "Anna"]);
        let histogram = index.histogram();
        let sum: f64 = histogram.iter().map(|e| e.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(histogram[0].bigram, bg("_a"));
        assert!(histogram.windows(2).all(|w| w[0].count >= w[1].count));
    }
}
