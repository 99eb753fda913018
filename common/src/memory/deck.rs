use crate::memory::card::Symbol;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub trait ShuffleRng {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

#[derive(Debug)]
pub struct DeckRng {
    rng: StdRng,
}

impl DeckRng {
    // Same seed, same deal
    pub fn seeded(seed: u64) -> Self {
        DeckRng {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for DeckRng {
    fn default() -> Self {
        DeckRng {
            rng: StdRng::from_entropy(),
        }
    }
}

impl ShuffleRng for DeckRng {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

// Every symbol in 1..=pairs, twice
pub fn paired_symbols(pairs: usize) -> Vec<Symbol> {
    let symbols = (1..=pairs).map(|s| s as Symbol);
    symbols.clone().chain(symbols).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paired_symbols() {
        assert_eq!(paired_symbols(0), Vec::<Symbol>::new());
        assert_eq!(paired_symbols(1), vec![1, 1]);
        assert_eq!(paired_symbols(3), vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_seeded_shuffle_is_repeatable() {
        let mut first = paired_symbols(8);
        let mut second = paired_symbols(8);
        DeckRng::seeded(42).shuffle(&mut first);
        DeckRng::seeded(42).shuffle(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_keeps_symbols() {
        let mut symbols = paired_symbols(8);
        DeckRng::default().shuffle(&mut symbols);
        symbols.sort();
        let mut expected = paired_symbols(8);
        expected.sort();
        assert_eq!(symbols, expected);
    }
}
