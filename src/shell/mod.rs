//! External program execution and tool lookup.

pub mod command;
pub mod platform;

pub use command::{display_command, execute_program, CommandResult};
pub use platform::{find_system_tool, parse_system_path, resolve_tool_path};
