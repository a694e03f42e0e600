use crate::Generator;
use shrinkray_core::ShortKey;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A generator that replays a fixed list of candidates, wrapping around at
/// the end.
///
/// Useful wherever the sequence of candidates must be predictable, e.g. to
/// force collisions against keys already in the table.
#[derive(Debug)]
pub struct ScriptedGenerator {
    candidates: Vec<String>,
    cursor: AtomicUsize,
}

impl ScriptedGenerator {
    /// # Panics
    ///
    /// Panics if `candidates` is empty.
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();
        assert!(!candidates.is_empty(), "scripted generator needs candidates");
        Self {
            candidates,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of candidates handed out so far.
    pub fn calls(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl Generator for ScriptedGenerator {
    fn generate(&self) -> ShortKey {
        let n = self.cursor.fetch_add(1, Ordering::SeqCst);
        ShortKey::new_unchecked(self.candidates[n % self.candidates.len()].clone())
    }
}
