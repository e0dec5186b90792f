//! Control protocol: newline-delimited s-expression plists.

pub mod dispatch;

pub use dispatch::{action_event, format_event, handle_message, Reply};
