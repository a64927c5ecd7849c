//! Typed handler adaptation.
//!
//! Bridges arbitrary user callables to the registry's action signature.
//! [`Handler`] is implemented for closures and functions of arity 0..=8
//! whose parameters all implement [`crate::binder::Param`]; this is the
//! compile-time signature deduction the dispatch relies on. Return
//! values are discarded. Embedders without a typed signature can always
//! fall back to inserting a raw action over `&str`.

use crate::binder::Args;
use crate::error::DispatchError;
use crate::tokenizer::TokenStream;

/// A bound action: receives the raw remaining text of an invocation.
pub type Action = Box<dyn Fn(&str) -> Result<(), DispatchError>>;

/// A callable whose parameter list `A` can be bound from a token stream.
pub trait Handler<A> {
    /// Invokes the callable with already-bound arguments.
    fn invoke(&self, args: A);
}

macro_rules! impl_handler {
    ($($t:ident),*) => {
        impl<Func, Ret, $($t,)*> Handler<($($t,)*)> for Func
        where
            Func: Fn($($t),*) -> Ret,
        {
            #[allow(non_snake_case)]
            fn invoke(&self, ($($t,)*): ($($t,)*)) {
                self($($t),*);
            }
        }
    };
}

impl_handler!();
impl_handler!(A0);
impl_handler!(A0, A1);
impl_handler!(A0, A1, A2);
impl_handler!(A0, A1, A2, A3);
impl_handler!(A0, A1, A2, A3, A4);
impl_handler!(A0, A1, A2, A3, A4, A5);
impl_handler!(A0, A1, A2, A3, A4, A5, A6);
impl_handler!(A0, A1, A2, A3, A4, A5, A6, A7);

/// Wraps a typed handler into an [`Action`].
///
/// The action re-tokenizes the raw argument text it receives, binds the
/// handler's declared parameter list in order, and invokes the handler
/// exactly once on success. If any parameter fails to bind, the handler
/// is never invoked.
pub fn make_action<A, F>(handler: F) -> Action
where
    A: Args,
    F: Handler<A> + 'static,
{
    Box::new(move |text: &str| {
        let mut stream = TokenStream::new(text);
        let args = A::bind(&mut stream)?;
        handler.invoke(args);
        Ok(())
    })
}
