//! Storyboard interpretation for Reelmaker.
//!
//! Turns a one-line [`StoryIdea`](reelmaker_core::StoryIdea) into a validated
//! [`StoryboardPlan`](reelmaker_core::StoryboardPlan) by prompting a text
//! generator for a JSON storyboard and recovering from the ways such output
//! usually goes wrong:
//!
//! - **Markdown fences** around the JSON are removed
//! - **Truncation mid-string** is detected by quote parity and rejected early
//! - **Truncation after a complete scene** is repaired by dropping the
//!   trailing fragment and closing the containers left open
//!
//! Repair never invents content. A repaired document still has to pass the
//! structural checks, so a storyboard that lost a scene is rejected rather
//! than padded.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelmaker_storyboard::StoryboardInterpreter;
//!
//! let interpreter = StoryboardInterpreter::new(text_generator);
//! let interpretation = interpreter.interpret(&"A fox learns to swim".into()).await?;
//! println!("{} ({} scenes)", interpretation.message(), interpretation.plan().scenes().len());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod extraction;
mod interpreter;
mod template;

pub use document::validate_document;
pub use extraction::{is_truncated, quote_count, repair, strip_code_fence};
pub use interpreter::{Interpretation, Recovery, StoryboardInterpreter};
pub use template::{STORYBOARD_TEMPLATE, storyboard_prompt, storyboard_sampling};
