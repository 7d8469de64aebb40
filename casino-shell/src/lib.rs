pub mod command;
pub mod config;
pub mod render;
pub mod session;

pub use command::{Command, ParseError};
pub use config::Config;
pub use session::{Reply, Session};
