pub mod cache;
pub mod client;

pub use cache::{CacheStore, GlobCacheStore, MemCache};
pub use client::{ClientBinary, MockVocabularySource, VocabularySource};
