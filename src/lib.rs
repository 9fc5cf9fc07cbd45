pub mod complete;
pub mod config;
pub mod dom;
pub mod effects;
pub mod error;
pub mod escalation;
pub mod fetch;
pub mod input;
pub mod interpreter;
pub mod logger;
pub mod render;
pub mod shell;
pub mod system;
pub mod terminal;
pub mod transcript;
pub mod vfs;

pub use config::ShellConfig;
pub use error::ShellError;
pub use system::WebShell;
pub use terminal::{Key, Terminal};
