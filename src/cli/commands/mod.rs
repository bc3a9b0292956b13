pub mod complete;
pub mod init;
pub mod inspect;
pub mod serve;

pub use complete::CompleteCommand;
pub use init::{InitCommand, Shell};
pub use inspect::InspectCommand;
pub use serve::ServeCommand;
