use super::vector::Vocabulary;

/// Anything that can be compared with the Pearson metric: a count per vocabulary word.
///
/// Blogs, centroids and merged tree representatives all expose the same shape, so the
/// distance function and both clusterers are written against this trait.
pub trait WordVector {
    /// The vocabulary the counts are aligned with.
    fn vocabulary(&self) -> &Vocabulary;

    /// One count per vocabulary word, in vocabulary order.
    fn counts(&self) -> &[f64];

    /// The vocabulary words, in order.
    fn words(&self) -> &[String] {
        self.vocabulary().words()
    }

    /// Count for `word`, or `None` if the word is not part of the vocabulary.
    fn count_for(&self, word: &str) -> Option<f64> {
        self.vocabulary()
            .index_of(word)
            .map(|idx| self.counts()[idx])
    }
}
