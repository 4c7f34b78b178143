use maybe_equivalency as me;
use maybe_equivalency::{Maybe, MaybeError};
use pretty_assertions::assert_eq;
use std::cell::RefCell;

#[test]
fn bind_transforms_payload_and_keeps_empty() {
    assert_eq!(me::bind(Maybe::filled(2), |v| v.to_string()), Maybe::filled("2".to_string()));
    assert_eq!(me::bind(Maybe::<i32>::empty(), |v| v + 1), Maybe::empty());
}

#[test]
#[should_panic(expected = "selector failed")]
fn bind_lets_selector_panics_propagate() {
    let _ = me::bind(Maybe::filled(1), |_: i32| -> i32 { panic!("selector failed") });
}

#[test]
fn match_action_runs_exactly_one_branch_when_invoked() {
    let log = RefCell::new(Vec::new());
    let action = me::match_action(
        Maybe::filled("x"),
        || log.borrow_mut().push("empty".to_string()),
        |v| log.borrow_mut().push(format!("filled {v}")),
    );
    assert!(log.borrow().is_empty());
    action();
    assert_eq!(*log.borrow(), vec!["filled x".to_string()]);
}

#[test]
fn match_or_default_unwraps_or_falls_back() {
    assert_eq!(me::match_or_default(Maybe::filled(9), 0), 9);
    assert_eq!(me::match_or_default(Maybe::empty(), 0), 0);
}

#[test]
fn from_respects_presence_then_predicate() {
    assert_eq!(me::from(Some(4)), Maybe::filled(4));
    assert_eq!(me::from(None::<i32>), Maybe::empty());
    assert_eq!(me::from_if(Some(4), |v| *v > 3), Maybe::filled(4));
    assert_eq!(me::from_if(Some(2), |v| *v > 3), Maybe::empty());
}

#[test]
fn from_non_empty_text_rejects_blank_and_missing() {
    assert_eq!(me::from_non_empty_text(Some("abc")), Maybe::filled("abc"));
    assert_eq!(me::from_non_empty_text(Some("")), Maybe::empty());
    assert_eq!(me::from_non_empty_text(None::<String>), Maybe::empty());
}

#[test]
fn choose_keeps_filled_payloads_in_order() {
    let source = vec![Maybe::filled(1), Maybe::empty(), Maybe::filled(2), Maybe::empty()];
    let chosen: Vec<_> = me::choose(source).collect();
    assert_eq!(chosen, vec![1, 2]);
}

#[test]
fn choose_is_lazy_and_restartable() {
    let pulled = RefCell::new(0);
    let source = [Maybe::filled(1), Maybe::empty(), Maybe::filled(3)];
    let chosen = me::choose(source.iter().map(|m| {
        *pulled.borrow_mut() += 1;
        *m
    }));
    assert_eq!(*pulled.borrow(), 0);

    let first_pass: Vec<_> = chosen.clone().collect();
    let second_pass: Vec<_> = chosen.collect();
    assert_eq!(first_pass, vec![1, 3]);
    assert_eq!(first_pass, second_pass);
}

#[test]
fn single_or_empty_by_cardinality() {
    assert_eq!(me::single_or_empty(Vec::<Maybe<i32>>::new()), Ok(Maybe::empty()));
    assert_eq!(me::single_or_empty(vec![Maybe::filled(1)]), Ok(Maybe::filled(1)));
    assert_eq!(
        me::single_or_empty(vec![Maybe::filled(1), Maybe::filled(2)]),
        Err(MaybeError::Cardinality { count: 2 })
    );
}

#[test]
fn empty_is_typed() {
    let e: Maybe<Vec<u8>> = me::empty();
    assert_eq!(e, Maybe::default());
}
