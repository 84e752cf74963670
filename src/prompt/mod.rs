//! User prompting
//!
//! - `interface`: Library-independent prompt traits and their configurations
//! - `dialoguer`: Terminal implementation of those traits

pub mod dialoguer;
pub mod interface;

pub use self::dialoguer::DialoguerPrompter;
pub use interface::{
    ConfirmationConfig, ConfirmationPrompter, Prompter, SingleChoiceConfig,
    SingleChoicePrompter, TextPromptConfig, TextPrompter,
};
