//! cmdtree - typed, trie-based command dispatch.
//!
//! Turns a single line of shell-like text into a call to a statically
//! typed handler: a tokenizer splits the line honoring quotes and
//! escape characters, a prefix trie resolves the longest registered
//! command name, and the remaining tokens are converted into the
//! handler's declared parameter types.
//!
//! ```
//! use cmdtree::CommandTree;
//!
//! let mut tree = CommandTree::new();
//! tree.register("motor speed", |rpm: i32, label: Option<String>| {
//!     let label = label.unwrap_or_default();
//!     println!("{label} -> {rpm} rpm");
//! })?;
//!
//! tree.dispatch("motor speed 1500 \"left wheel\"")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binder;
pub mod convert;
pub mod error;
pub mod handler;
pub mod registry;
pub mod tokenizer;

pub use binder::{Args, Param, Rest};
pub use convert::FromToken;
pub use error::{
    ConvertError, DispatchError, DispatchErrorKind, RegisterError, Result, TokenError,
};
pub use handler::{make_action, Action, Handler};
pub use registry::CommandTree;
pub use tokenizer::TokenStream;
