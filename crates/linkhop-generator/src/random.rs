use crate::{Generator, BASE58_ALPHABET};
use linkhop_core::Token;
use rand::Rng;
use typed_builder::TypedBuilder;

pub const DEFAULT_TOKEN_LENGTH: usize = 7;

/// A token generator drawing fixed-length strings from the base58 alphabet.
///
/// With the default length of 7 there are 58^7 (about 2.2e12) possible
/// tokens. Random tokens do not reveal issuance order; the rare collision
/// is detected by the repository's atomic insert and retried.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    #[builder(default = DEFAULT_TOKEN_LENGTH)]
    length: usize,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    type Output = Token;

    fn generate(&self) -> Token {
        let mut rng = rand::rng();
        let token: String = (0..self.length)
            .map(|_| BASE58_ALPHABET[rng.random_range(0..BASE58_ALPHABET.len())] as char)
            .collect();
        Token::new_unchecked(token)
    }
}
