//! API translation between `OpenAI` and 1minAI formats.
//!
//! The core of the proxy: flattens chat requests into a single 1minAI prompt
//! and reshapes 1minAI results into chat completions. All translation
//! functions are pure (no I/O).

pub mod oneminai_types;
pub mod openai_types;
pub mod request;
pub mod response;
