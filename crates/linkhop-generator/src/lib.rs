pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use linkhop_core::Token;

/// Trait for generating candidate tokens.
///
/// Implementations are pure generators that don't interact with storage.
/// The shortener commits a candidate with an atomic insert and asks for a
/// new one if the token turns out to be taken.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<Token>;
    /// Generates a candidate token.
    fn generate(&self) -> Self::Output;
}

/// Base58 alphabet (no `0`, `O`, `I` or `l`).
pub(crate) const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
