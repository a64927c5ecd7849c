//! Type-directed argument binding.
//!
//! Walks a handler's declared parameter list against the live token
//! stream, deciding per parameter whether it consumes exactly one token
//! (a scalar), zero-or-one token (`Option<T>`), or the entire remaining
//! stream (a consumer such as `Vec<T>` or [`Rest`]).

use crate::convert::FromToken;
use crate::error::{DispatchError, DispatchErrorKind};
use crate::tokenizer::TokenStream;

/// A single handler parameter.
///
/// Scalar types get this through their [`FromToken`] impl (the built-in
/// integers, floats, and `String` are wired up here; custom scalar types
/// implement `FromToken` and delegate to [`bind_scalar`]). A type that
/// instead needs the live stream implements `Param` directly with
/// `CONSUMES_STREAM = true` and may read zero or more remaining tokens.
///
/// The `'static` bound is load-bearing: parameter values must own their
/// data, since the per-call token buffer does not outlive the dispatch.
/// Borrowed types like `&str` therefore cannot be handler parameters.
pub trait Param: Sized + 'static {
    /// True if binding may consume the entire remaining stream.
    ///
    /// A consumer parameter is only permitted in last position; this is
    /// checked when the handler is registered.
    const CONSUMES_STREAM: bool = false;

    /// Binds this parameter from the stream.
    fn bind(stream: &mut TokenStream<'_>) -> Result<Self, DispatchError>;
}

/// Binds a required scalar: takes exactly one token and converts it.
///
/// Fails with `NotEnoughArguments` if the stream is exhausted;
/// conversion failures are annotated with the offending token.
pub fn bind_scalar<T: FromToken>(stream: &mut TokenStream<'_>) -> Result<T, DispatchError> {
    if !stream.has_more() {
        return Err(DispatchErrorKind::NotEnoughArguments.into());
    }
    let token = stream.next()?;
    T::from_token(&token).map_err(|err| DispatchError::from(err).with_last_token(&token))
}

/// Binds an optional scalar: absent if the stream is exhausted,
/// otherwise takes one token and converts it.
pub fn bind_optional<T: FromToken>(
    stream: &mut TokenStream<'_>,
) -> Result<Option<T>, DispatchError> {
    if !stream.has_more() {
        return Ok(None);
    }
    let token = stream.next()?;
    T::from_token(&token)
        .map(Some)
        .map_err(|err| DispatchError::from(err).with_last_token(&token))
}

macro_rules! impl_scalar_param {
    ($($t:ty),+ $(,)?) => {$(
        impl Param for $t {
            fn bind(stream: &mut TokenStream<'_>) -> Result<Self, DispatchError> {
                bind_scalar(stream)
            }
        }
    )+};
}

impl_scalar_param!(String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: FromToken + 'static> Param for Option<T> {
    fn bind(stream: &mut TokenStream<'_>) -> Result<Self, DispatchError> {
        bind_optional(stream)
    }
}

/// Consumer: converts every remaining token, possibly none.
impl<T: FromToken + 'static> Param for Vec<T> {
    const CONSUMES_STREAM: bool = true;

    fn bind(stream: &mut TokenStream<'_>) -> Result<Self, DispatchError> {
        let mut values = Vec::new();
        while stream.has_more() {
            let token = stream.next()?;
            let value = T::from_token(&token)
                .map_err(|err| DispatchError::from(err).with_last_token(&token))?;
            values.push(value);
        }
        Ok(values)
    }
}

/// The raw unconsumed remainder of the argument text, verbatim.
///
/// A consumer parameter for handlers that want the tail of the line
/// with its original whitespace and quoting intact, without any
/// re-tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rest(pub String);

impl Rest {
    /// Returns the captured text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Param for Rest {
    const CONSUMES_STREAM: bool = true;

    fn bind(stream: &mut TokenStream<'_>) -> Result<Self, DispatchError> {
        let text = stream.remaining().to_string();
        stream.drain();
        Ok(Rest(text))
    }
}

/// A handler's full parameter list, bound in declared order.
///
/// Implemented for tuples of [`Param`] up to arity 8. After every
/// parameter is bound, leftover tokens fail with `TooManyArguments`
/// unless the parameter list ends in a consumer.
pub trait Args: Sized {
    /// False if a consumer parameter is declared anywhere but last.
    const CONSUMER_PLACEMENT_OK: bool;

    /// True if the last parameter is a consumer.
    const HAS_CONSUMER: bool;

    /// Binds the whole parameter list from the stream.
    fn bind(stream: &mut TokenStream<'_>) -> Result<Self, DispatchError>;
}

impl Args for () {
    const CONSUMER_PLACEMENT_OK: bool = true;
    const HAS_CONSUMER: bool = false;

    fn bind(stream: &mut TokenStream<'_>) -> Result<Self, DispatchError> {
        if stream.has_more() {
            return Err(DispatchErrorKind::TooManyArguments.into());
        }
        Ok(())
    }
}

macro_rules! impl_tuple_args {
    ($($head:ident)* ; $last:ident) => {
        impl<$($head: Param,)* $last: Param> Args for ($($head,)* $last,) {
            const CONSUMER_PLACEMENT_OK: bool = true $(&& !$head::CONSUMES_STREAM)*;
            const HAS_CONSUMER: bool = $last::CONSUMES_STREAM;

            fn bind(stream: &mut TokenStream<'_>) -> Result<Self, DispatchError> {
                let args = ($($head::bind(stream)?,)* $last::bind(stream)?,);
                if !Self::HAS_CONSUMER && stream.has_more() {
                    return Err(DispatchErrorKind::TooManyArguments.into());
                }
                Ok(args)
            }
        }
    };
}

impl_tuple_args!(; A0);
impl_tuple_args!(A0 ; A1);
impl_tuple_args!(A0 A1 ; A2);
impl_tuple_args!(A0 A1 A2 ; A3);
impl_tuple_args!(A0 A1 A2 A3 ; A4);
impl_tuple_args!(A0 A1 A2 A3 A4 ; A5);
impl_tuple_args!(A0 A1 A2 A3 A4 A5 ; A6);
impl_tuple_args!(A0 A1 A2 A3 A4 A5 A6 ; A7);
