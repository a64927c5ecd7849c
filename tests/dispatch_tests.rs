//! End-to-end tests for command registration and dispatch.
//!
//! These drive the public API the way an embedder would: register
//! hierarchical commands (raw and typed), dispatch full command lines,
//! and inspect the errors and context annotations that come back.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pretty_assertions::assert_eq;

use cmdtree::{
    Action, CommandTree, ConvertError, DispatchErrorKind, RegisterError, Rest, TokenError,
};

/// Returns an action that bumps the counter on every invocation.
fn counting_action(counter: &Rc<Cell<u32>>) -> Action {
    let counter = Rc::clone(counter);
    Box::new(move |_| {
        counter.set(counter.get() + 1);
        Ok(())
    })
}

#[test]
fn simple_command_invoked_exactly_once() {
    let calls = Rc::new(Cell::new(0));
    let mut tree = CommandTree::new();
    tree.insert("simple", counting_action(&calls)).unwrap();

    tree.dispatch("simple").unwrap();
    assert_eq!(calls.get(), 1);
}

#[test]
fn sibling_and_parent_paths_dispatch_independently() {
    let xyz = Rc::new(Cell::new(0));
    let xyy = Rc::new(Cell::new(0));
    let xy = Rc::new(Cell::new(0));

    let mut tree = CommandTree::new();
    tree.insert("x y z", counting_action(&xyz)).unwrap();
    tree.insert("x y y", counting_action(&xyy)).unwrap();
    tree.insert("x y", counting_action(&xy)).unwrap();

    tree.dispatch("x y").unwrap();
    assert_eq!((xyz.get(), xyy.get(), xy.get()), (0, 0, 1));

    // Unmatched trailing tokens fall back to the deepest bound action.
    tree.dispatch("x y fasdf dasf adf").unwrap();
    assert_eq!((xyz.get(), xyy.get(), xy.get()), (0, 0, 2));

    tree.dispatch("x y z").unwrap();
    assert_eq!((xyz.get(), xyy.get(), xy.get()), (1, 0, 2));

    tree.dispatch("x y y").unwrap();
    assert_eq!((xyz.get(), xyy.get(), xy.get()), (1, 1, 2));
}

#[test]
fn fallback_action_receives_remainder_verbatim() {
    let seen = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&seen);

    let mut tree = CommandTree::new();
    tree.insert("xda yd z", Box::new(|_| panic!("wrong action")))
        .unwrap();
    tree.insert("xda yd y", Box::new(|_| panic!("wrong action")))
        .unwrap();
    tree.insert(
        "xda yd",
        Box::new(move |args| {
            *sink.borrow_mut() = args.to_string();
            Ok(())
        }),
    )
    .unwrap();

    tree.dispatch("xda yd cmplx 0 55 cmd arguments").unwrap();
    assert_eq!(*seen.borrow(), "cmplx 0 55 cmd arguments");
}

#[test]
fn unknown_command_reports_not_found() {
    let mut tree = CommandTree::new();
    tree.insert("known command", Box::new(|_| Ok(()))).unwrap();

    let err = tree.dispatch("unknown").unwrap_err();
    assert_eq!(err.kind(), &DispatchErrorKind::CommandNotFound);
    assert_eq!(err.last_token(), Some("unknown"));
}

#[test]
fn reregistering_a_path_replaces_the_action() {
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));

    let mut tree = CommandTree::new();
    tree.insert("a b", counting_action(&first)).unwrap();
    tree.insert("a b", counting_action(&second)).unwrap();
    tree.insert("a b c", counting_action(&first)).unwrap();

    tree.dispatch("a b").unwrap();
    tree.dispatch("a b c").unwrap();
    assert_eq!(second.get(), 1);
    assert_eq!(first.get(), 1);
}

#[test]
fn zero_parameter_handler_arity() {
    let calls = Rc::new(Cell::new(0));
    let bump = Rc::clone(&calls);

    let mut tree = CommandTree::new();
    tree.register("noop", move || bump.set(bump.get() + 1))
        .unwrap();

    tree.dispatch("noop").unwrap();
    assert_eq!(calls.get(), 1);

    let err = tree.dispatch("noop extra").unwrap_err();
    assert_eq!(err.kind(), &DispatchErrorKind::TooManyArguments);
    assert_eq!(calls.get(), 1);
}

#[test]
fn typed_handler_binds_declared_parameters() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut tree = CommandTree::new();
    tree.register("servo set", move |channel: u8, angle: f64| {
        sink.borrow_mut().push((channel, angle));
    })
    .unwrap();

    tree.dispatch("servo set 3 90.5").unwrap();
    assert_eq!(*seen.borrow(), vec![(3, 90.5)]);
}

#[test]
fn missing_required_argument_fails_before_invocation() {
    let called = Rc::new(Cell::new(false));
    let flag = Rc::clone(&called);

    let mut tree = CommandTree::new();
    tree.register("servo set", move |_channel: u8, _angle: f64| {
        flag.set(true)
    })
    .unwrap();

    let err = tree.dispatch("servo set 3").unwrap_err();
    assert_eq!(err.kind(), &DispatchErrorKind::NotEnoughArguments);
    assert!(!called.get());
}

#[test]
fn optional_parameter_binds_absent_or_present() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut tree = CommandTree::new();
    tree.register("log level", move |level: Option<String>| {
        sink.borrow_mut().push(level);
    })
    .unwrap();

    tree.dispatch("log level").unwrap();
    tree.dispatch("log level debug").unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![None, Some("debug".to_string())]
    );
}

#[test]
fn consumer_parameter_takes_the_remaining_stream() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut tree = CommandTree::new();
    tree.register("sum", move |values: Vec<i64>| {
        sink.borrow_mut().push(values.iter().sum::<i64>());
    })
    .unwrap();

    tree.dispatch("sum 1 2 3 4").unwrap();
    tree.dispatch("sum").unwrap();
    assert_eq!(*seen.borrow(), vec![10, 0]);
}

#[test]
fn rest_parameter_preserves_quoting_and_spacing() {
    let seen = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&seen);

    let mut tree = CommandTree::new();
    tree.register("say", move |times: u32, rest: Rest| {
        for _ in 0..times {
            sink.borrow_mut().push_str(rest.as_str());
        }
    })
    .unwrap();

    tree.dispatch("say 1 hello  \"quoted  text\"").unwrap();
    assert_eq!(*seen.borrow(), "hello  \"quoted  text\"");
}

#[test]
fn misplaced_consumer_rejected_at_registration() {
    let mut tree = CommandTree::new();
    let err = tree
        .register("bad", |_values: Vec<String>, _after: i32| {})
        .unwrap_err();
    assert_eq!(err, RegisterError::ConsumerNotLast);

    // Nothing was stored under the rejected name.
    let err = tree.dispatch("bad").unwrap_err();
    assert_eq!(err.kind(), &DispatchErrorKind::CommandNotFound);
}

#[test]
fn numeric_boundaries_through_dispatch() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut tree = CommandTree::new();
    tree.register("set", move |value: i8| sink.borrow_mut().push(value))
        .unwrap();

    tree.dispatch("set 127").unwrap();
    tree.dispatch("set -128").unwrap();
    assert_eq!(*seen.borrow(), vec![i8::MAX, i8::MIN]);

    let err = tree.dispatch("set 128").unwrap_err();
    assert_eq!(
        err.kind(),
        &DispatchErrorKind::Convert(ConvertError::IntegerOverflow)
    );

    let err = tree.dispatch("set -129").unwrap_err();
    assert_eq!(
        err.kind(),
        &DispatchErrorKind::Convert(ConvertError::IntegerUnderflow)
    );

    let err = tree.dispatch("set 12x").unwrap_err();
    assert_eq!(
        err.kind(),
        &DispatchErrorKind::Convert(ConvertError::InvalidInteger("12x".to_string()))
    );

    let err = tree.dispatch("set \"\"").unwrap_err();
    assert_eq!(
        err.kind(),
        &DispatchErrorKind::Convert(ConvertError::EmptyArgument)
    );
}

#[test]
fn conversion_error_context_names_command_and_token() {
    let mut tree = CommandTree::new();
    tree.register("motor speed", |_rpm: i32| {}).unwrap();

    let err = tree.dispatch("motor speed fast").unwrap_err();
    assert_eq!(
        err.kind(),
        &DispatchErrorKind::Convert(ConvertError::InvalidInteger("fast".to_string()))
    );
    assert_eq!(err.command_path(), Some("motor speed "));
    assert_eq!(err.last_token(), Some("fast"));
    assert_eq!(err.args(), Some("fast"));
}

#[test]
fn quoted_arguments_reach_typed_handlers_unescaped() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut tree = CommandTree::new();
    tree.register("greet", move |name: String| {
        sink.borrow_mut().push(name);
    })
    .unwrap();

    tree.dispatch("greet \"Ada Lovelace\"").unwrap();
    tree.dispatch(r"greet Grace\ Hopper").unwrap();
    assert_eq!(
        *seen.borrow(),
        vec!["Ada Lovelace".to_string(), "Grace Hopper".to_string()]
    );
}

#[test]
fn malformed_line_surfaces_token_error() {
    let mut tree = CommandTree::new();
    tree.insert("cmd", Box::new(|_| Ok(()))).unwrap();

    let err = tree.dispatch("cmd \"unterminated").unwrap_err();
    assert_eq!(
        err.kind(),
        &DispatchErrorKind::Token(TokenError::UnterminatedQuote)
    );
    assert_eq!(err.command_path(), Some("cmd "));
}

#[test]
fn custom_scalar_type_through_from_token() {
    use cmdtree::{ConvertError, FromToken};

    #[derive(Debug, PartialEq, Clone, Copy)]
    enum Direction {
        Forward,
        Reverse,
    }

    impl FromToken for Direction {
        fn from_token(token: &str) -> Result<Self, ConvertError> {
            match token {
                "forward" => Ok(Direction::Forward),
                "reverse" => Ok(Direction::Reverse),
                other => Err(ConvertError::InvalidArgument(other.to_string())),
            }
        }
    }

    impl cmdtree::Param for Direction {
        fn bind(
            stream: &mut cmdtree::TokenStream<'_>,
        ) -> Result<Self, cmdtree::DispatchError> {
            cmdtree::binder::bind_scalar(stream)
        }
    }

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut tree = CommandTree::new();
    tree.register("drive", move |dir: Direction, speed: Option<u16>| {
        sink.borrow_mut().push((dir, speed));
    })
    .unwrap();

    tree.dispatch("drive forward 250").unwrap();
    tree.dispatch("drive reverse").unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![
            (Direction::Forward, Some(250)),
            (Direction::Reverse, None)
        ]
    );
}

#[test]
fn dangling_escape_is_a_token_error() {
    let mut tree = CommandTree::new();
    tree.insert("cmd", Box::new(|_| Ok(()))).unwrap();

    let err = tree.dispatch(r"cmd\").unwrap_err();
    assert_eq!(
        err.kind(),
        &DispatchErrorKind::Token(TokenError::TrailingEscape)
    );
}
