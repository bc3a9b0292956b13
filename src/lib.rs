pub mod cfg;
pub mod cli;
pub mod complete;
pub mod ports;
pub mod shell;

pub use cfg::CompleterConfig;
pub use complete::{CompletionEngine, CompletionRequest, Vocabulary};
