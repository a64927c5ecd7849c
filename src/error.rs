//! Error types for cmdtree.
//!
//! Defines the error taxonomy for tokenizing, conversion, registration,
//! and dispatch, plus the context annotations a dispatch failure carries
//! so callers can report "which command, which argument" without
//! re-parsing the input.

use thiserror::Error;

/// Token stream failures.
///
/// All of these are fatal to the current dispatch; none are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// `next()` was called with no tokens remaining.
    #[error("end of token stream")]
    EndOfStream,

    /// A double-quoted region was never closed.
    #[error("unterminated quote")]
    UnterminatedQuote,

    /// The input ended directly after an escape character.
    #[error("dangling escape character")]
    TrailingEscape,
}

/// Scalar conversion failures.
///
/// Raised by a specific converter for a specific parameter; a failed
/// conversion never produces a partially written value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The token was empty.
    #[error("empty argument")]
    EmptyArgument,

    /// The parsed magnitude exceeds the target integer type.
    #[error("integer value too large for the target type")]
    IntegerOverflow,

    /// The parsed value is more negative than the target integer type allows.
    #[error("integer value too negative for the target type")]
    IntegerUnderflow,

    /// The token is not a well-formed integer (bad digits or trailing text).
    #[error("invalid integer {0:?}")]
    InvalidInteger(String),

    /// The parsed value rounds to positive infinity.
    #[error("floating-point value overflows to infinity")]
    FloatOverflow,

    /// The parsed value rounds to negative infinity.
    #[error("floating-point value overflows to negative infinity")]
    FloatUnderflow,

    /// The token is not a well-formed floating-point number.
    #[error("invalid floating-point number {0:?}")]
    InvalidFloat(String),

    /// A custom converter rejected the token.
    #[error("invalid argument {0:?}")]
    InvalidArgument(String),
}

/// Registration failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The command name itself failed to tokenize.
    #[error("malformed command name: {0}")]
    BadName(#[from] TokenError),

    /// A stream-consumer parameter was declared before the last position.
    #[error("a stream-consumer parameter must be the last parameter")]
    ConsumerNotLast,
}

/// The failure kind of a dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchErrorKind {
    /// Malformed quoting or escaping in the input line.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// No action is bound at the point the trie walk halted.
    #[error("command not found")]
    CommandNotFound,

    /// The stream ran out of tokens before all required parameters bound.
    #[error("not enough arguments")]
    NotEnoughArguments,

    /// Tokens remained after all declared parameters were bound.
    #[error("too many arguments")]
    TooManyArguments,

    /// A parameter's converter rejected its token.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// A dispatch failure, annotated with where it happened.
///
/// The context fields are set once at the deepest point that knows them
/// and preserved while the error propagates outward; outer frames never
/// overwrite an annotation made closer to the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError {
    kind: DispatchErrorKind,
    command_path: Option<String>,
    last_token: Option<String>,
    args: Option<String>,
}

impl DispatchError {
    /// Creates an unannotated error of the given kind.
    pub fn new(kind: DispatchErrorKind) -> Self {
        Self {
            kind,
            command_path: None,
            last_token: None,
            args: None,
        }
    }

    /// Returns the failure kind.
    pub fn kind(&self) -> &DispatchErrorKind {
        &self.kind
    }

    /// Returns the command-name portion consumed before the failure,
    /// exactly as it appeared in the input (separators included).
    pub fn command_path(&self) -> Option<&str> {
        self.command_path.as_deref()
    }

    /// Returns the last token inspected before the failure.
    pub fn last_token(&self) -> Option<&str> {
        self.last_token.as_deref()
    }

    /// Returns the raw argument text the failing action received.
    pub fn args(&self) -> Option<&str> {
        self.args.as_deref()
    }

    /// Annotates the consumed command-name portion, unless already set.
    pub fn with_command_path(mut self, path: &str) -> Self {
        if self.command_path.is_none() {
            self.command_path = Some(path.to_string());
        }
        self
    }

    /// Annotates the last inspected token, unless already set.
    pub fn with_last_token(mut self, token: &str) -> Self {
        if self.last_token.is_none() {
            self.last_token = Some(token.to_string());
        }
        self
    }

    /// Annotates the raw argument text, unless already set.
    pub fn with_args(mut self, args: &str) -> Self {
        if self.args.is_none() {
            self.args = Some(args.to_string());
        }
        self
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self.kind {
            DispatchErrorKind::Token(_) => "Token Stream Error",
            DispatchErrorKind::CommandNotFound => "Unknown Command",
            DispatchErrorKind::NotEnoughArguments | DispatchErrorKind::TooManyArguments => {
                "Arity Error"
            }
            DispatchErrorKind::Convert(_) => "Conversion Error",
        }
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(path) = &self.command_path {
            write!(f, " (command: {path:?})")?;
        }
        if let Some(token) = &self.last_token {
            write!(f, " (at token: {token:?})")?;
        }
        if let Some(args) = &self.args {
            write!(f, " (arguments: {args:?})")?;
        }
        Ok(())
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<DispatchErrorKind> for DispatchError {
    fn from(kind: DispatchErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<TokenError> for DispatchError {
    fn from(err: TokenError) -> Self {
        Self::new(DispatchErrorKind::Token(err))
    }
}

impl From<ConvertError> for DispatchError {
    fn from(err: ConvertError) -> Self {
        Self::new(DispatchErrorKind::Convert(err))
    }
}

/// Result type alias using DispatchError.
pub type Result<T> = std::result::Result<T, DispatchError>;
