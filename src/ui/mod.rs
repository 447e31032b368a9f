pub mod screens;
pub mod sidebar;
pub mod terminal_guard;
pub mod toast;

pub use terminal_guard::{install_panic_hook, TerminalGuard};
