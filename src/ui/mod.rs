//! Terminal front end
//!
//! The core never prompts or prints. Commands talk to the user through the
//! traits here so they can be driven from a terminal or from tests:
//!
//! - **`OutputWriter`** - status messages with severity levels
//! - **`UserInput`** - confirmations and text prompts

pub mod input;
pub mod output;
pub mod render;

pub use input::{Answer, DialoguerInput, InputError, ScriptedInput, UserInput};
pub use output::{BufferedWriter, MessageLevel, OutputWriter, StdoutWriter};
pub use render::{format_bookmark, format_entry, format_failure};
