pub mod engine;
pub mod request;
pub mod tokenizer;

pub use engine::{CompletionEngine, filter_prefix};
pub use request::CompletionRequest;
pub use tokenizer::{Token, Vocabulary, tokenize};
