use std::ops::AddAssign;
use std::thread;

/// Number of distinct symbols in the byte alphabet.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count of every byte value in some input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// All-zero table ("no data observed").
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    pub fn count(input: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in input {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Counts `input` split across up to `parts` threads and sums the partial tables.
    /// The result is identical to [`FrequencyTable::count`].
    pub fn count_partitioned(input: &[u8], parts: usize) -> Self {
        let parts = parts.max(1);
        if parts == 1 || input.len() < parts {
            return Self::count(input);
        }
        let chunk_len = input.len().div_ceil(parts);

        thread::scope(|scope| {
            let workers: Vec<_> = input
                .chunks(chunk_len)
                .map(|chunk| scope.spawn(move || Self::count(chunk)))
                .collect();

            let mut total = Self::new();
            for worker in workers {
                match worker.join() {
                    Ok(partial) => total += &partial,
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            total
        })
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn set(&mut self, symbol: u8, frequency: u64) {
        self.counts[symbol as usize] = frequency;
    }

    /// Sum of all counts; equals the length of the counted input.
    /// Saturates for tables read from untrusted headers.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0, |acc: u64, &c| acc.saturating_add(c))
    }

    /// `true` when no symbol has a non-zero count.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// `(symbol, frequency)` pairs with non-zero frequency, ascending by symbol.
    pub fn nonzero(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AddAssign<&FrequencyTable> for FrequencyTable {
    fn add_assign(&mut self, other: &FrequencyTable) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, frequency) in iter {
            table.set(symbol, frequency);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_all_zero() {
        let table = FrequencyTable::count(b"");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.nonzero().count(), 0);
    }

    #[test]
    fn counts_match_known_file() {
        let pieces: [&[u8]; 9] = [b"dd", b"ab", b"ddcc", b"bdd", b"f", b"cdddd", b"cbc", b"cccdddd", b"abfdd"];
        let table = FrequencyTable::count(&pieces.concat());
        let window: Vec<u64> = (b'a'..=b'g').map(|s| table.get(s)).collect();
        assert_eq!(window, vec![2, 4, 8, 16, 0, 2, 0]);
        assert_eq!(table.total(), 32);
    }

    #[test]
    fn total_equals_input_length() {
        let input: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let table = FrequencyTable::count(&input);
        assert_eq!(table.total(), 1000);
        assert_eq!(table.distinct_symbols(), 256);
        assert_eq!(table.get(0), 4);
        assert_eq!(table.get(255), 3);
    }

    #[test]
    fn partitioned_count_matches_sequential() {
        let input: Vec<u8> = (0..10_007u32).map(|i| (i * 31 % 251) as u8).collect();
        let sequential = FrequencyTable::count(&input);
        for parts in [0, 1, 2, 3, 8, 64] {
            assert_eq!(FrequencyTable::count_partitioned(&input, parts), sequential);
        }
        assert_eq!(FrequencyTable::count_partitioned(b"ab", 16), FrequencyTable::count(b"ab"));
    }

    #[test]
    fn nonzero_is_ascending() {
        let table = FrequencyTable::count(b"zyxzy");
        let pairs: Vec<_> = table.nonzero().collect();
        assert_eq!(pairs, vec![(b'x', 1), (b'y', 2), (b'z', 2)]);
    }
}
