pub mod similarity;
pub mod tfidf;
pub mod tokenizer;

pub use similarity::cosine_similarity;
pub use tfidf::{pair_similarity, TfidfPair};
pub use tokenizer::tokenize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextSimilarityError {
    /// Neither document produced a single token.
    #[error("empty vocabulary; neither document contains a word token")]
    EmptyVocabulary,
}
