pub mod bash;
pub mod session;

pub use bash::BashScript;
pub use session::serve;
