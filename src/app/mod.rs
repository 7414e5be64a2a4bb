//! Interactive session wiring for the binary.

mod progress;
mod prompt;
mod runtime;
mod terminal;

pub(crate) use runtime::run;
pub(crate) use terminal::init_tracing;
