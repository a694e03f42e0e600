pub mod alphabet;
pub mod scripted;

pub use alphabet::{AlphabetGenerator, GeneratorError, DEFAULT_ALPHABET, DEFAULT_KEY_SIZE};
pub use scripted::ScriptedGenerator;

use shrinkray_core::ShortKey;

/// Trait for producing candidate short keys.
///
/// Implementations are pure generators that don't interact with storage.
/// Candidates are not guaranteed to be unique; the caller checks them
/// against the key table and retries within its attempt budget.
pub trait Generator: Send + Sync + 'static {
    fn generate(&self) -> ShortKey;
}

impl<G: Generator + ?Sized> Generator for std::sync::Arc<G> {
    fn generate(&self) -> ShortKey {
        (**self).generate()
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&self) -> ShortKey {
        (**self).generate()
    }
}
