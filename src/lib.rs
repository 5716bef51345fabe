// Library surface for headless/integration tests and reuse.
pub mod countdown;
pub mod editor;
pub mod history;
pub mod prompt;
pub mod runtime;
pub mod session;
pub mod ui;
