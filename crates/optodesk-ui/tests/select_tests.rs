//! SearchableSelect behaviour against a headless host.

use std::cell::RefCell;
use std::rc::Rc;

use optodesk_ui::geometry::{OverlayPosition, Rect, ScrollOffset};
use optodesk_ui::host::HeadlessHost;
use optodesk_ui::select::{
    filter_indices, filter_options, HitTarget, OverlayContent, SearchableSelect,
};
use proptest::prelude::*;

fn options(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn host() -> HeadlessHost {
    HeadlessHost::new(Rect::new(100.0, 200.0, 150.0, 30.0))
}

#[test]
fn test_typing_filters_in_original_order() {
    let opts = options(&["Myopia", "Hyperopia", "Astigmatism"]);
    let mut host = host();
    let mut select = SearchableSelect::new(None);

    select.input(&mut host, "opia");
    let view = select.overlay(&opts).unwrap();
    assert_eq!(view.rows(), ["Myopia", "Hyperopia"]);
    assert_eq!(
        view.position,
        OverlayPosition {
            top: 230.0,
            left: 100.0,
            width: 150.0
        }
    );
}

#[test]
fn test_filter_indices_track_positions() {
    let opts = options(&["MR1 - Asha", "MR2 - Ravi", "MR1 - Asha"]);
    let mut host = host();
    let mut select = SearchableSelect::new(None);
    select.input(&mut host, "asha");

    assert_eq!(filter_indices(&opts, "asha"), [0, 2]);
    assert_eq!(select.match_indices(&opts), [0, 2]);
    assert_eq!(select.matches(&opts), ["MR1 - Asha", "MR1 - Asha"]);
}

#[test]
fn test_empty_options_show_no_results() {
    let mut host = host();
    let mut select = SearchableSelect::new(None);
    select.input(&mut host, "a");

    let view = select.overlay(&[]).unwrap();
    assert_eq!(view.content, OverlayContent::NoResults("No results".into()));
}

#[test]
fn test_commit_calls_handler_once() {
    let opts = options(&["Myopia", "Hyperopia", "Astigmatism"]);
    let calls = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&calls);
    let mut host = host();
    let mut select =
        SearchableSelect::new(None).on_change(move |v| sink.borrow_mut().push(v.to_string()));

    select.input(&mut host, "ast");
    assert_eq!(
        select.pointer_down(&mut host, HitTarget::OverlayRow(0), &opts),
        Some("Astigmatism".to_string())
    );
    // A second pointer-down after close is ignored
    assert_eq!(
        select.pointer_down(&mut host, HitTarget::OverlayRow(0), &opts),
        None
    );

    assert_eq!(*calls.borrow(), ["Astigmatism"]);
    assert!(!select.is_open());
}

#[test]
fn test_scroll_while_open_moves_overlay() {
    let mut host = host();
    let mut select = SearchableSelect::new(None);
    select.input(&mut host, "x");

    host.scroll = ScrollOffset::new(10.0, 50.0);
    host.anchor = Some(Rect::new(100.0, 150.0, 150.0, 30.0));
    select.on_scroll(&host);

    let pos = select.position();
    assert_eq!(pos.top, 230.0);
    assert_eq!(pos.left, 110.0);
}

#[test]
fn test_scroll_while_closed_is_ignored() {
    let mut host = host();
    let mut select = SearchableSelect::new(None);
    host.scroll = ScrollOffset::new(0.0, 99.0);
    select.on_scroll(&host);
    assert_eq!(select.position(), OverlayPosition::default());
}

#[derive(Debug, Clone)]
enum Action {
    Input(String),
    Focus,
    Click(u8),
    Scroll,
    Sync(Option<String>),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        "[a-c]{0,2}".prop_map(Action::Input),
        Just(Action::Focus),
        (0u8..6).prop_map(Action::Click),
        Just(Action::Scroll),
        proptest::option::of("[a-c]{1,2}").prop_map(Action::Sync),
    ]
}

fn target(code: u8) -> HitTarget {
    match code {
        0 => HitTarget::Input,
        1 => HitTarget::Overlay,
        2 => HitTarget::Outside,
        n => HitTarget::OverlayRow(usize::from(n - 3)),
    }
}

proptest! {
    #[test]
    fn prop_filter_is_ordered_subset(
        opts in prop::collection::vec("[a-zA-Z]{0,5}", 0..8),
        query in "[a-zA-Z]{0,3}",
    ) {
        let matches = filter_options(&opts, &query);
        let needle = query.to_lowercase();

        let mut cursor = opts.iter();
        for m in &matches {
            prop_assert!(m.to_lowercase().contains(&needle));
            prop_assert!(cursor.any(|o| o.as_str() == *m));
        }
        let expected = opts.iter().filter(|o| o.to_lowercase().contains(&needle)).count();
        prop_assert_eq!(matches.len(), expected);
    }

    #[test]
    fn prop_listeners_held_only_while_open(actions in prop::collection::vec(action(), 0..30)) {
        let opts = options(&["ab", "bc", "ca"]);
        let commits = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&commits);
        let mut host = host();
        let mut select = SearchableSelect::new(None).on_change(move |_| *sink.borrow_mut() += 1);
        let mut expected_commits = 0;

        for action in actions {
            match action {
                Action::Input(text) => select.input(&mut host, &text),
                Action::Focus => select.focus(&mut host),
                Action::Click(code) => {
                    if select.pointer_down(&mut host, target(code), &opts).is_some() {
                        expected_commits += 1;
                    }
                }
                Action::Scroll => select.on_scroll(&host),
                Action::Sync(value) => select.sync_value(value.as_deref()),
            }

            let expected = if select.is_open() { 3 } else { 0 };
            prop_assert_eq!(host.total_listeners(), expected);
            prop_assert_eq!(select.overlay(&opts).is_some(), select.is_open());
        }

        prop_assert_eq!(*commits.borrow(), expected_commits);
        select.unmount(&mut host);
        prop_assert_eq!(host.total_listeners(), 0);
    }
}
