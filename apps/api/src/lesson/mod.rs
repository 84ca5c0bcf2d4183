// Lesson directive protocol
// Extracts bracketed tutor directives ([CODE_BLOCK: ...], [MINI_TEST: ...], ...)
// from a model reply and returns the visible text plus typed actions.
// Pure and synchronous; persistence of roadmap/progress is the caller's job.

pub mod completion;
pub mod dedup;
pub mod directives;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod sanitizer;
pub mod scanner;
pub mod segmenter;
