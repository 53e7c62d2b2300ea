use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TokenizerError {
    #[error("character {0:?} does not appear in the corpus alphabet")]
    UnknownSymbol(char),
    #[error("code {code} is outside the vocabulary range [1, {vocab_size}]")]
    UnknownCode { code: i64, vocab_size: i64 },
}

/// Bijective character <-> integer-code mapping derived from a corpus.
///
/// Codes are assigned in sorted (code-point) order of the distinct characters,
/// starting at 1 because the Stan models index their token arrays from 1; code
/// 0 is never assigned. The mapping is fully determined by the corpus's
/// character set, so it is never persisted; re-scanning the same corpus
/// rebuilds it exactly.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    chars: Vec<char>,
    stoi: HashMap<char, i64>,
}

impl Tokenizer {
    pub fn new(corpus: &str) -> Self {
        let mut chars: Vec<char> = corpus.chars().collect();
        chars.sort_unstable();
        chars.dedup();
        let stoi = chars
            .iter()
            .enumerate()
            .map(|(rank, &ch)| (ch, rank as i64 + 1))
            .collect();
        Tokenizer { chars, stoi }
    }

    /// The number of distinct characters observed in the corpus.
    pub fn vocab_size(&self) -> i64 {
        self.chars.len() as i64
    }

    /// The alphabet in code order; `alphabet()[i]` decodes as code `i + 1`.
    pub fn alphabet(&self) -> &[char] {
        &self.chars
    }

    pub fn encode(&self, text: &str) -> Result<Vec<i64>, TokenizerError> {
        text.chars()
            .map(|ch| {
                self.stoi
                    .get(&ch)
                    .copied()
                    .ok_or(TokenizerError::UnknownSymbol(ch))
            })
            .collect()
    }

    pub fn decode(&self, codes: &[i64]) -> Result<String, TokenizerError> {
        codes
            .iter()
            .map(|&code| {
                if code < 1 || code > self.vocab_size() {
                    return Err(TokenizerError::UnknownCode {
                        code,
                        vocab_size: self.vocab_size(),
                    });
                }
                Ok(self.chars[(code - 1) as usize])
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_sorted_alphabet() {
        let tokenizer = Tokenizer::new("abcab");
        assert_eq!(tokenizer.vocab_size(), 3);
        assert_eq!(tokenizer.alphabet(), &['a', 'b', 'c']);
        assert_eq!(tokenizer.encode("abc").unwrap(), vec![1, 2, 3]);
        assert_eq!(tokenizer.decode(&[1, 2, 3]).unwrap(), "abc");
    }

    #[test]
    fn test_round_trip() {
        let corpus = "To be, or not to be, that is the question:";
        let tokenizer = Tokenizer::new(corpus);
        for sample in [corpus, "to be", "question", ","] {
            let codes = tokenizer.encode(sample).unwrap();
            assert_eq!(tokenizer.decode(&codes).unwrap(), sample);
        }
    }

    #[test]
    fn test_rebuild_gives_identical_mapping() {
        let corpus = "the quick brown fox jumps over the lazy dog";
        let first = Tokenizer::new(corpus);
        let second = Tokenizer::new(corpus);
        assert_eq!(
            first.encode(corpus).unwrap(),
            second.encode(corpus).unwrap()
        );
    }

    #[test]
    fn test_codes_stay_in_range() {
        let corpus = "mississippi";
        let tokenizer = Tokenizer::new(corpus);
        let v = tokenizer.vocab_size();
        for code in tokenizer.encode(corpus).unwrap() {
            assert!((1..=v).contains(&code), "code {} out of [1, {}]", code, v);
        }
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let tokenizer = Tokenizer::new("abcab");
        assert_eq!(
            tokenizer.encode("abd").unwrap_err(),
            TokenizerError::UnknownSymbol('d')
        );
    }

    #[test]
    fn test_out_of_range_codes_rejected() {
        let tokenizer = Tokenizer::new("abcab");
        for code in [0, -1, 4] {
            assert_eq!(
                tokenizer.decode(&[1, code]).unwrap_err(),
                TokenizerError::UnknownCode {
                    code,
                    vocab_size: 3
                }
            );
        }
    }
}
