// Library root: exposes the terminal front end so integration tests can drive
// input handling and rendering without a real terminal.

pub mod tui;
