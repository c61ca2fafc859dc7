use crate::{Generator, BASE58_ALPHABET};
use linkhop_core::{InvalidTokenError, Token, MAX_TOKEN_LENGTH};
use std::sync::atomic::{AtomicU64, Ordering};

/// Length of the base58 encoding of `u64::MAX`.
pub const MAX_COUNTER_LENGTH: usize = 11;

/// Longest prefix whose tokens stay within the token length limit.
pub const MAX_PREFIX_LENGTH: usize = MAX_TOKEN_LENGTH - MAX_COUNTER_LENGTH;

/// A token generator backed by a monotonically increasing counter.
///
/// Each token is the prefix followed by the base58 encoding of the next
/// counter value ("lh1", "lh2", ... "lhz", "lh21", ...). Tokens are unique
/// within a single instance without consulting storage, at the cost of
/// revealing issuance order.
///
/// For distributed deployments, each node should use a unique prefix.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    /// Creates a generator whose counter starts at zero.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a generator starting from a specific counter value.
    ///
    /// Useful for resuming after a restart against persistent storage:
    /// already-issued values collide and are skipped by the shortener.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }

    /// Creates a generator that continues after the highest counter value
    /// found among `issued` tokens. Tokens from other prefixes or other
    /// generators are ignored.
    pub fn resume<'a>(
        prefix: impl Into<String>,
        issued: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let prefix = prefix.into();
        let offset = issued
            .into_iter()
            .filter_map(|token| decode_counter(&prefix, token))
            .max()
            .map_or(0, |last| last.saturating_add(1));
        Self::with_offset(prefix, offset)
    }

    /// Checks that every token built from `prefix` is a well-formed token.
    pub fn validate_prefix(prefix: &str) -> Result<(), InvalidTokenError> {
        if prefix.len() > MAX_PREFIX_LENGTH {
            return Err(InvalidTokenError::Length {
                min: 0,
                max: MAX_PREFIX_LENGTH,
                len: prefix.len(),
            });
        }
        // the counter part is always valid, so a one-digit counter covers the charset
        Token::parse(&format!("{prefix}1")).map(|_| ())
    }

    /// Whether a generator with `prefix` can ever yield `token`.
    pub fn can_produce(prefix: &str, token: &str) -> bool {
        token.strip_prefix(prefix).is_some_and(|rest| {
            !rest.is_empty() && rest.bytes().all(|b| BASE58_ALPHABET.contains(&b))
        })
    }
}

/// Inverse of [`encode_counter`] for tokens carrying `prefix`.
fn decode_counter(prefix: &str, token: &str) -> Option<u64> {
    let encoded = token.strip_prefix(prefix)?;
    let bytes = bs58::decode(encoded).into_vec().ok()?;
    if bytes.is_empty() || bytes.len() > 8 {
        return None;
    }
    let mut buf = [0u8; 8];
    buf[8 - bytes.len()..].copy_from_slice(&bytes);
    let value = u64::from_be_bytes(buf);
    // only canonical encodings were ever issued
    (encode_counter(value) == encoded).then_some(value)
}

/// Base58 of the big-endian counter bytes with leading zero bytes removed,
/// so distinct values never share an encoding.
fn encode_counter(value: u64) -> String {
    let bytes = value.to_be_bytes();
    let first = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len() - 1);
    bs58::encode(&bytes[first..]).into_string()
}

impl Generator for SeqGenerator {
    type Output = Token;

    fn generate(&self) -> Token {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        Token::new_unchecked(format!("{}{}", self.prefix, encode_counter(count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seq_generator_produces_sequential_codes() {
        let generator = SeqGenerator::with_prefix("lh");

        assert_eq!(generator.generate().as_str(), "lh1");
        assert_eq!(generator.generate().as_str(), "lh2");
        assert_eq!(generator.generate().as_str(), "lh3");
    }

    #[test]
    fn seq_generator_with_offset() {
        let generator = SeqGenerator::with_offset("lh", 57);

        assert_eq!(generator.generate().as_str(), "lhz");
        assert_eq!(generator.generate().as_str(), "lh21");
    }

    #[test]
    fn encodings_are_distinct() {
        let generator = SeqGenerator::with_prefix("");
        let tokens: HashSet<String> = (0..10_000)
            .map(|_| generator.generate().as_str().to_string())
            .collect();
        assert_eq!(tokens.len(), 10_000);
    }

    #[test]
    fn generated_tokens_are_valid() {
        let generator = SeqGenerator::with_offset("node-a", u64::MAX - 2);
        for _ in 0..3 {
            let token = generator.generate();
            assert!(Token::parse(token.as_str()).is_ok());
        }
    }

    #[test]
    fn longest_counter_fits_the_reserved_length() {
        assert_eq!(encode_counter(u64::MAX).len(), MAX_COUNTER_LENGTH);
    }

    #[test]
    fn prefix_validation() {
        assert!(SeqGenerator::validate_prefix("").is_ok());
        assert!(SeqGenerator::validate_prefix("lh").is_ok());
        assert!(SeqGenerator::validate_prefix("node_a-").is_ok());
        assert!(SeqGenerator::validate_prefix(&"p".repeat(MAX_PREFIX_LENGTH)).is_ok());

        assert!(SeqGenerator::validate_prefix("lh.").is_err());
        assert!(SeqGenerator::validate_prefix("my/").is_err());
        assert!(SeqGenerator::validate_prefix("a b").is_err());
        assert!(SeqGenerator::validate_prefix(&"p".repeat(MAX_PREFIX_LENGTH + 1)).is_err());
    }

    #[test]
    fn longest_prefix_with_largest_counter_is_a_valid_token() {
        let generator = SeqGenerator::with_offset("p".repeat(MAX_PREFIX_LENGTH), u64::MAX);

        let token = generator.generate();
        assert_eq!(token.as_str().len(), MAX_TOKEN_LENGTH);
        assert!(Token::parse(token.as_str()).is_ok());
    }

    #[test]
    fn can_produce_matches_prefix_and_alphabet() {
        assert!(SeqGenerator::can_produce("heal", "health"));
        assert!(SeqGenerator::can_produce("l", "link"));
        assert!(!SeqGenerator::can_produce("lh", "health"));
        assert!(!SeqGenerator::can_produce("hea", "health"));
        assert!(!SeqGenerator::can_produce("link", "link"));
    }

    #[test]
    fn resume_continues_after_highest_issued_counter() {
        let issued = ["lh1", "lhz", "lh5", "other9", "lh0O", "lhX"];
        let generator = SeqGenerator::resume("lh", issued);

        assert_eq!(generator.generate().as_str(), "lh21");
    }

    #[test]
    fn resume_skips_gaps_left_by_failed_inserts() {
        // counters 0 and 3 committed, 1 and 2 lost
        let generator = SeqGenerator::resume("lh", ["lh1", "lh4"]);

        assert_eq!(generator.generate().as_str(), "lh5");
    }

    #[test]
    fn resume_without_issued_tokens_starts_at_zero() {
        let generator = SeqGenerator::resume("lh", std::iter::empty());

        assert_eq!(generator.generate().as_str(), "lh1");
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SeqGenerator>();
    }
}
