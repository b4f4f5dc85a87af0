use std::cell::{Cell, RefCell};
use std::rc::Rc;

use modalx::{ModalRequest, ModalStore};
use proptest::prelude::*;
use serde_json::{Value, json};

fn store() -> ModalStore<String> {
    ModalStore::new()
}

fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    (hits, move || h.set(h.get() + 1))
}

fn names(store: &ModalStore<String>) -> Vec<String> {
    store.requests().into_iter().map(|r| r.name).collect()
}

fn active(store: &ModalStore<String>) -> Vec<String> {
    store
        .requests()
        .into_iter()
        .filter(|r| r.active)
        .map(|r| r.name)
        .collect()
}

#[test]
fn close_on_empty_stack_is_a_noop() {
    let store = store();
    let (hits, hook) = counter();
    store.on_hide("a", hook);
    store.close(Some(json!(1)), true);
    store.dismiss();
    assert!(store.is_empty());
    assert_eq!(hits.get(), 0);
}

#[test]
fn closing_reactivates_the_request_below() {
    let store = store();
    store.open("a", None, None);
    store.open("b", None, None);
    assert_eq!(names(&store), vec!["b", "a"]);
    assert_eq!(active(&store), vec!["b"]);

    store.close(None, true);
    assert_eq!(active(&store), vec!["a"]);
    assert_eq!(store.top().map(|r| r.name).as_deref(), Some("a"));
}

#[test]
fn show_hook_does_not_refire_on_reactivation() {
    let store = store();
    let (hits, hook) = counter();
    store.on_show("a", hook);

    store.open("a", None, None);
    assert_eq!(hits.get(), 1);
    store.open("b", None, None);
    store.close(None, true);
    assert_eq!(hits.get(), 1, "a became active again without leaving the stack");
}

#[test]
fn show_hook_refires_after_full_close() {
    let store = store();
    let (hits, hook) = counter();
    store.on_show("a", hook);

    store.open("a", None, None);
    store.close(None, true);
    store.open("a", None, None);
    assert_eq!(hits.get(), 2);
}

#[test]
fn show_hook_waits_until_every_instance_is_gone() {
    let store = store();
    let (hits, hook) = counter();
    store.on_show("a", hook);

    store.open("a", None, None);
    store.open("a", None, None);
    assert_eq!(hits.get(), 1);
    store.close(None, true);
    store.close(None, true);
    store.open("a", None, None);
    assert_eq!(hits.get(), 2);
}

#[test]
fn show_hook_fires_when_a_deeper_request_first_becomes_top() {
    let store = store();
    let (hits, hook) = counter();
    store.open("a", None, None);
    store.open("b", None, None);
    store.on_show("a", hook);
    assert_eq!(hits.get(), 0, "a is not on top");

    store.close(None, true);
    assert_eq!(hits.get(), 1);
}

#[test]
fn first_registered_hook_wins() {
    let store = store();
    let (first, hook1) = counter();
    let (second, hook2) = counter();
    store.on_show("a", hook1);
    store.on_show("a", hook2);
    let (hide_first, hide1) = counter();
    let (hide_second, hide2) = counter();
    store.on_hide("a", hide1);
    store.on_hide("a", hide2);

    store.open("a", None, None);
    store.close(None, true);
    assert_eq!((first.get(), second.get()), (1, 0));
    assert_eq!((hide_first.get(), hide_second.get()), (1, 0));
}

#[test]
fn hide_hook_fires_on_every_pop() {
    let store = store();
    let (hits, hook) = counter();
    store.on_hide("a", hook);
    store.open("a", None, None);
    store.open("a", None, None);
    store.close(None, false);
    store.close(None, true);
    assert_eq!(hits.get(), 2);
}

#[test]
fn hide_hook_sees_the_request_still_on_top() {
    let store = store();
    let seen = Rc::new(RefCell::new(None));
    let s = Rc::clone(&seen);
    let inner = store.clone();
    store.on_hide("a", move || *s.borrow_mut() = inner.top().map(|r| r.name));
    store.open("a", None, None);
    store.close(None, true);
    assert_eq!(seen.borrow().as_deref(), Some("a"));
}

fn recorder() -> (Rc<RefCell<Vec<Value>>>, Box<dyn FnOnce(Value)>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    (seen, Box::new(move |v: Value| s.borrow_mut().push(v)))
}

#[test]
fn callback_receives_exact_response() {
    let store = store();
    let (seen, callback) = recorder();
    store.open("ask", None, Some(callback));
    store.close(Some(json!({"answer": 42})), true);
    assert_eq!(*seen.borrow(), vec![json!({"answer": 42})]);
}

#[test]
fn null_responses_skip_the_callback() {
    let store = store();
    let (seen, callback) = recorder();
    store.open("ask", None, Some(callback));
    store.close(Some(Value::Null), true);
    assert!(seen.borrow().is_empty());
    assert!(store.is_empty());

    let (seen, callback) = recorder();
    store.open("ask", None, Some(callback));
    store.close(None, true);
    assert!(seen.borrow().is_empty());
}

#[test]
fn falsy_responses_still_reach_the_callback() {
    let store = store();
    let (seen, callback) = recorder();
    store.open("ask", None, Some(callback));
    store.close(Some(json!(0)), true);
    assert_eq!(*seen.borrow(), vec![json!(0)]);
}

#[test]
fn suppressed_response_still_pops_and_hides() {
    let store = store();
    let (hits, hook) = counter();
    store.on_hide("ask", hook);
    let (seen, callback) = recorder();
    store.open("ask", None, Some(callback));
    store.close(Some(json!(true)), false);
    assert!(store.is_empty());
    assert_eq!(hits.get(), 1);
    assert!(seen.borrow().is_empty());
}

#[test]
fn get_modal_scans_top_down() {
    let store = store();
    store.open("a", Some(modalx::Payload::new(1)), None);
    store.open("b", None, None);
    store.open("a", Some(modalx::Payload::new(2)), None);
    let found = store.get_modal("a").unwrap();
    assert_eq!(found.data.and_then(|d| d.decode::<i32>().ok()), Some(2));
    assert!(found.active);
    assert!(store.get_modal("c").is_none());
}

#[test]
fn observers_see_every_mutation_in_order() {
    let store = store();
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = Rc::clone(&log);
    let _sub = store.subscribe(move |requests: &[ModalRequest]| {
        l.borrow_mut()
            .push(requests.iter().map(|r| r.name.clone()).collect::<Vec<_>>());
    });

    store.open("a", None, None);
    store.open("b", None, None);
    store.close(None, true);
    store.close(None, true);
    store.close(None, true);

    let expected: Vec<Vec<String>> = vec![
        vec!["a".into()],
        vec!["b".into(), "a".into()],
        vec!["a".into()],
        vec![],
    ];
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn observer_opening_a_modal_leaves_later_observers_current() {
    let store = store();
    let opener = store.clone();
    let _first = store.subscribe(move |requests: &[ModalRequest]| {
        if requests.len() == 1 && requests[0].name == "a" {
            opener.open("b", None, None);
        }
    });
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = Rc::clone(&log);
    let _second = store.subscribe(move |requests: &[ModalRequest]| {
        l.borrow_mut()
            .push(requests.iter().map(|r| r.name.clone()).collect::<Vec<_>>());
    });

    store.open("a", None, None);
    assert_eq!(names(&store), vec!["b", "a"]);
    assert_eq!(log.borrow().last(), Some(&names(&store)));
    assert_eq!(*log.borrow(), vec![vec!["b".to_string(), "a".to_string()]]);
}

#[test]
fn show_hook_runs_after_observers() {
    let store = store();
    let order = Rc::new(RefCell::new(Vec::new()));
    let o = Rc::clone(&order);
    let _sub = store.subscribe(move |_| o.borrow_mut().push("observer"));
    let o = Rc::clone(&order);
    store.on_show("a", move || o.borrow_mut().push("on_show"));
    store.open("a", None, None);
    assert_eq!(*order.borrow(), vec!["observer", "on_show"]);
}

#[derive(Debug, Clone)]
enum Op {
    Open(u8),
    Close,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(0u8..4).prop_map(Op::Open), Just(Op::Close)]
}

proptest! {
    #[test]
    fn exactly_one_active_request(ops in proptest::collection::vec(op(), 0..48)) {
        let store = store();
        let mut model: Vec<String> = Vec::new();
        for op in ops {
            match op {
                Op::Open(n) => {
                    let name = format!("m{n}");
                    store.open(name.clone(), None, None);
                    model.push(name);
                }
                Op::Close => {
                    store.close(None, true);
                    model.pop();
                }
            }
            let requests = store.requests();
            prop_assert_eq!(requests.len(), model.len());
            let active: Vec<&ModalRequest> = requests.iter().filter(|r| r.active).collect();
            match model.last() {
                Some(top) => {
                    prop_assert_eq!(active.len(), 1);
                    prop_assert_eq!(&active[0].name, top);
                    prop_assert_eq!(active[0].id, requests[0].id);
                }
                None => prop_assert!(active.is_empty()),
            }
        }
    }

    #[test]
    fn show_hook_fires_once_per_occupancy(ops in proptest::collection::vec(op(), 0..48)) {
        let store = store();
        let fired = Rc::new(RefCell::new(Vec::new()));
        for n in 0u8..4 {
            let f = Rc::clone(&fired);
            store.on_show(&format!("m{n}"), move || f.borrow_mut().push(n));
        }

        let mut model: Vec<u8> = Vec::new();
        let mut shown = [false; 4];
        let mut expected = Vec::new();
        for op in ops {
            match op {
                Op::Open(n) => {
                    store.open(format!("m{n}"), None, None);
                    model.push(n);
                }
                Op::Close => {
                    store.close(None, true);
                    if let Some(closed) = model.pop() {
                        if !model.contains(&closed) {
                            shown[closed as usize] = false;
                        }
                    }
                }
            }
            if let Some(&top) = model.last() {
                if !shown[top as usize] {
                    shown[top as usize] = true;
                    expected.push(top);
                }
            }
        }
        prop_assert_eq!(&*fired.borrow(), &expected);
    }
}
