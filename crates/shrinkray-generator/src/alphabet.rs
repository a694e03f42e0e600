use crate::Generator;
use shrinkray_core::ShortKey;
use thiserror::Error;

pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DEFAULT_KEY_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("alphabet must not be empty")]
    EmptyAlphabet,
    #[error("alphabet has {0} symbols, at most 65536 are supported")]
    AlphabetTooLarge(usize),
    #[error("key size must be greater than zero")]
    ZeroKeySize,
}

/// Random key generator over a fixed alphabet.
///
/// Each position draws 16 random bits from the thread-local CSPRNG and
/// reduces them modulo the alphabet length. Alphabets whose length does not
/// divide 65536 are slightly biased toward their leading symbols.
#[derive(Debug, Clone)]
pub struct AlphabetGenerator {
    alphabet: Vec<char>,
    key_size: usize,
}

impl AlphabetGenerator {
    pub fn new(alphabet: &str, key_size: usize) -> Result<Self, GeneratorError> {
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }
        if alphabet.len() > usize::from(u16::MAX) + 1 {
            return Err(GeneratorError::AlphabetTooLarge(alphabet.len()));
        }
        if key_size == 0 {
            return Err(GeneratorError::ZeroKeySize);
        }
        Ok(Self { alphabet, key_size })
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn key_size(&self) -> usize {
        self.key_size
    }

    fn pick(&self, random: u16) -> char {
        self.alphabet[usize::from(random) % self.alphabet.len()]
    }
}

impl Default for AlphabetGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            key_size: DEFAULT_KEY_SIZE,
        }
    }
}

impl Generator for AlphabetGenerator {
    fn generate(&self) -> ShortKey {
        let key: String = (0..self.key_size)
            .map(|_| self.pick(rand::random::<u16>()))
            .collect();
        ShortKey::new_unchecked(key)
    }
}
