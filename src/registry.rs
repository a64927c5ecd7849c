//! The prefix-trie command registry.
//!
//! Stores actions under hierarchical, space-separated names and
//! dispatches a command line by walking the trie token-by-token for as
//! long as children match. The deepest node with a bound action is
//! invoked with the unconsumed remainder of the original text, so
//! whitespace and quoting inside arguments reach the handler verbatim.

use std::collections::BTreeMap;

use crate::binder::Args;
use crate::error::{DispatchError, DispatchErrorKind, RegisterError};
use crate::handler::{make_action, Action, Handler};
use crate::tokenizer::TokenStream;

/// One segment of a hierarchical command name.
///
/// Nodes are created lazily during insertion and live for the
/// registry's lifetime; intermediate segments materialize as childless,
/// action-less nodes.
#[derive(Default)]
struct Node {
    children: BTreeMap<String, Node>,
    action: Option<Action>,
}

impl Node {
    fn insert(
        &mut self,
        name_stream: &mut TokenStream<'_>,
        action: Action,
    ) -> Result<(), RegisterError> {
        if !name_stream.has_more() {
            // Last registration for an identical path wins.
            self.action = Some(action);
            return Ok(());
        }
        let segment = name_stream.next()?;
        self.children
            .entry(segment)
            .or_default()
            .insert(name_stream, action)
    }

    fn walk(&self, stream: &mut TokenStream<'_>) -> Result<(), DispatchError> {
        let command_path = stream.consumed();
        let result = if stream.has_more() {
            // Capture the remainder before reading the next token so a
            // fallback action receives it verbatim.
            let rest = stream.remaining();
            match stream.next() {
                Err(err) => Err(DispatchError::from(err)),
                Ok(token) => match self.children.get(&token) {
                    Some(child) => child.walk(stream),
                    None => self
                        .exec(rest)
                        .map_err(|err| err.with_last_token(&token).with_args(rest)),
                },
            }
        } else {
            self.exec("")
        };
        // Deepest annotation wins; outer frames leave it untouched.
        result.map_err(|err| err.with_command_path(command_path))
    }

    fn exec(&self, args: &str) -> Result<(), DispatchError> {
        match &self.action {
            Some(action) => action(args),
            None => Err(DispatchErrorKind::CommandNotFound.into()),
        }
    }
}

/// Prefix-trie command registry mapping hierarchical names to actions.
///
/// Registration takes `&mut self` and dispatch takes `&self`: complete
/// all registration before sharing the tree, and concurrent dispatches
/// against the then-immutable tree only read shared state (each one
/// owns its token-stream cursor).
#[derive(Default)]
pub struct CommandTree {
    root: Node,
}

impl CommandTree {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a raw action under a space-separated hierarchical name.
    ///
    /// Missing intermediate segments are created on the way down, and a
    /// previously stored action at the exact same path is overwritten.
    /// A segment that needs to contain a literal space must be escaped
    /// or quoted using the tokenizer's rules.
    pub fn insert(&mut self, name: &str, action: Action) -> Result<(), RegisterError> {
        tracing::debug!(name, "Registering command");
        let mut name_stream = TokenStream::new(name);
        self.root.insert(&mut name_stream, action)
    }

    /// Registers a typed handler under a space-separated hierarchical name.
    ///
    /// The handler's parameter list is validated here: a stream-consumer
    /// parameter anywhere but the last position is rejected with
    /// [`RegisterError::ConsumerNotLast`].
    pub fn register<A, F>(&mut self, name: &str, handler: F) -> Result<(), RegisterError>
    where
        A: Args,
        F: Handler<A> + 'static,
    {
        if !A::CONSUMER_PLACEMENT_OK {
            return Err(RegisterError::ConsumerNotLast);
        }
        self.insert(name, make_action(handler))
    }

    /// Builds a registry from `(name, action)` pairs, failing fast on
    /// the first malformed name.
    pub fn with_actions<I, S>(actions: I) -> Result<Self, RegisterError>
    where
        I: IntoIterator<Item = (S, Action)>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for (name, action) in actions {
            tree.insert(name.as_ref(), action)?;
        }
        Ok(tree)
    }

    /// Dispatches one command line.
    ///
    /// Walks the trie along the line's leading tokens, then invokes the
    /// deepest bound action with the unconsumed remainder, or fails with
    /// `CommandNotFound`. Errors raised anywhere below are annotated
    /// with the command-name portion consumed and the last token
    /// inspected before the failure.
    pub fn dispatch(&self, line: &str) -> Result<(), DispatchError> {
        tracing::trace!(line, "Dispatching command line");
        let mut stream = TokenStream::new(line);
        self.root.walk(&mut stream)
    }
}
