//! Behavioural properties of filter trees built from JSON inputs.
//!
//! Exercises the full pipeline: taxonomy and bucket parsing, merging, the
//! taxonomy walk, selection, and rebuilds that carry selection forward.

// Integration tests live outside cfg(test)
#![allow(clippy::tests_outside_test_module)]

use std::collections::BTreeSet;

use facets_tree::{
    BuildOptions, Bucket, FilterTree, NodeId, SelectionState, Taxonomy, decode_filters,
    encode_filters, parse_buckets,
};

const TAXONOMY: &str = r#"[
    {"category": "Tanakh", "heCategory": "תנ״ך", "contents": [
        {"category": "Torah", "heCategory": "תורה", "contents": [
            {"title": "Genesis", "heTitle": "בראשית"},
            {"title": "Exodus", "heTitle": "שמות"},
            {"title": "Leviticus", "heTitle": "ויקרא"}
        ]},
        {"category": "Writings", "heCategory": "כתובים", "contents": [
            {"title": "Psalms", "heTitle": "תהילים"},
            {"title": "Proverbs", "heTitle": "משלי"}
        ]}
    ]},
    {"category": "Mishnah", "heCategory": "משנה", "contents": [
        {"category": "Seder Moed", "heCategory": "סדר מועד", "contents": [
            {"title": "Mishnah Shabbat", "heTitle": "משנה שבת"}
        ]}
    ]},
    {"category": "Torah Commentary", "heCategory": "מפרשי תורה", "contents": [
        {"category": "Genesis", "contents": [
            {"title": "Rashi", "heTitle": "רש״י", "dependence": "Commentary"}
        ]},
        {"category": "Exodus", "contents": [
            {"title": "Ibn Ezra", "heTitle": "אבן עזרא", "dependence": "Commentary"}
        ]}
    ]}
]"#;

const BUCKETS: &str = r#"{"buckets": [
    {"key": "Tanakh/Torah/Genesis", "doc_count": 7},
    {"key": "Tanakh/Torah/Exodus", "doc_count": 2},
    {"key": "Tanakh/Torah/Leviticus", "doc_count": 1},
    {"key": "Tanakh/Writings/Psalms", "doc_count": 4},
    {"key": "Tanakh/Writings/Proverbs", "doc_count": 3},
    {"key": "Mishnah", "doc_count": 11},
    {"key": "Mishnah/Seder Moed/Mishnah Shabbat", "doc_count": 6},
    {"key": "Commentary/Rashi", "doc_count": 5},
    {"key": "Commentary/Ibn Ezra", "doc_count": 3}
]}"#;

fn init_tracing() {
    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn taxonomy() -> Taxonomy {
    Taxonomy::from_json_str(TAXONOMY).unwrap()
}

fn buckets() -> Vec<Bucket> {
    parse_buckets(BUCKETS).unwrap()
}

fn fresh_tree() -> FilterTree {
    init_tracing();
    FilterTree::build(&taxonomy(), &buckets(), &[] as &[&str])
}

/// Path and state of every node that is not unselected.
fn marked(tree: &FilterTree) -> BTreeSet<(String, SelectionState)> {
    tree.iter()
        .filter(|(_, node)| node.state() != SelectionState::Unselected)
        .map(|(_, node)| (node.path.clone(), node.state()))
        .collect()
}

fn assert_tri_state(tree: &FilterTree) {
    for (_, node) in tree.iter().filter(|(_, node)| !node.is_leaf()) {
        let children: Vec<SelectionState> = node
            .children()
            .iter()
            .map(|id| tree.node(*id).state())
            .collect();
        let expected = if children.iter().all(|s| *s == SelectionState::Selected) {
            SelectionState::Selected
        } else if children.iter().all(|s| *s == SelectionState::Unselected) {
            SelectionState::Unselected
        } else {
            SelectionState::Partial
        };
        assert_eq!(node.state(), expected, "tri-state broken at {}", node.path);
    }
}

#[test]
fn rebuild_from_same_inputs_is_identical() {
    let first = fresh_tree();
    let second = fresh_tree();

    let keys = |tree: &FilterTree| tree.registry().keys().cloned().collect::<BTreeSet<_>>();
    let counts = |tree: &FilterTree| {
        tree.iter()
            .map(|(_, n)| (n.path.clone(), n.doc_count))
            .collect::<Vec<_>>()
    };

    assert_eq!(keys(&first), keys(&second));
    assert_eq!(counts(&first), counts(&second));
}

#[test]
fn unreported_parents_sum_their_children() {
    let tree = fresh_tree();

    assert_eq!(tree.get("Tanakh/Torah").unwrap().doc_count, 10);
    assert_eq!(tree.get("Tanakh/Writings").unwrap().doc_count, 7);
    assert_eq!(tree.get("Tanakh").unwrap().doc_count, 17);
    assert_eq!(tree.get("Mishnah/Seder Moed").unwrap().doc_count, 6);

    // Reported explicitly, so not replaced by the child sum.
    assert_eq!(tree.get("Mishnah").unwrap().doc_count, 11);
}

#[test]
fn tri_state_holds_after_any_toggles() {
    let mut tree = fresh_tree();
    let steps = [
        "Tanakh/Torah/Genesis",
        "Tanakh/Writings",
        "Tanakh/Torah/Exodus",
        "Tanakh/Torah/Leviticus",
        "Tanakh/Writings/Psalms",
        "Commentary",
        "Commentary/Rashi",
        "Tanakh",
        "Mishnah/Seder Moed/Mishnah Shabbat",
    ];

    for path in steps {
        tree.toggle(path).unwrap();
        assert_tri_state(&tree);
    }
}

#[test]
fn applied_filters_round_trip_through_fresh_tree() {
    let selections: &[&[&str]] = &[
        &["Tanakh"],
        &["Tanakh/Torah/Genesis", "Tanakh/Writings/Proverbs"],
        &["Tanakh/Torah/Genesis", "Tanakh/Torah/Exodus", "Tanakh/Torah/Leviticus"],
        &["Commentary/Ibn Ezra", "Mishnah/Seder Moed"],
        &["Tanakh", "Mishnah", "Commentary"],
    ];

    for paths in selections {
        let mut tree = fresh_tree();
        for path in *paths {
            assert!(tree.select(path), "unknown path {path}");
        }

        let param = encode_filters(&tree.applied_filters());
        let mut restored = fresh_tree();
        restored.set_applied_filters(&decode_filters(&param));

        assert_eq!(marked(&restored), marked(&tree), "selection {paths:?}");
        assert!(restored.orphan_filters().is_empty());
    }
}

#[test]
fn orphans_survive_rebuilds_and_return() {
    let options = BuildOptions::default();
    let mut tree = fresh_tree();
    tree.select("Mishnah/Seder Moed/Mishnah Shabbat");

    let narrowed = tree.rebuild(
        &taxonomy(),
        &[Bucket::new("Tanakh/Torah/Genesis", 1)],
        &options,
    );
    assert_eq!(narrowed.orphan_filters(), ["Mishnah"]);
    assert_eq!(narrowed.applied_filters(), vec!["Mishnah"]);
    assert!(narrowed.get("Mishnah").is_none());

    let widened = narrowed.rebuild(&taxonomy(), &buckets(), &options);
    assert!(widened.orphan_filters().is_empty());
    assert_eq!(
        widened.get("Mishnah").unwrap().state(),
        SelectionState::Selected
    );
    assert_eq!(
        widened
            .get("Mishnah/Seder Moed/Mishnah Shabbat")
            .unwrap()
            .state(),
        SelectionState::Selected
    );
    assert_eq!(widened.applied_filters(), vec!["Mishnah"]);
}

#[test]
fn orphan_with_no_hits_reappears_at_zero() {
    let options = BuildOptions::default();
    let mut tree = fresh_tree();
    tree.set_applied_filters(&["Tanakh/Writings/Proverbs"]);

    let narrowed = tree.rebuild(&taxonomy(), &[Bucket::new("Mishnah", 2)], &options);
    assert_eq!(narrowed.orphan_filters(), ["Tanakh/Writings/Proverbs"]);

    // The orphan is seeded into the next build even without hits.
    let again = narrowed.rebuild(&taxonomy(), &[Bucket::new("Mishnah", 2)], &options);
    let proverbs = again.get("Tanakh/Writings/Proverbs").unwrap();
    assert_eq!(proverbs.doc_count, 0);
    assert!(proverbs.is_selected());
    assert!(again.orphan_filters().is_empty());
}

#[test]
fn commentary_is_one_flat_facet() {
    let tree = fresh_tree();

    let commentary = tree.get("Commentary").unwrap();
    assert_eq!(commentary.doc_count, 8);

    let children: Vec<(&str, u64)> = commentary
        .children()
        .iter()
        .map(|id: &NodeId| {
            let node = tree.node(*id);
            (node.name(), node.doc_count)
        })
        .collect();
    assert_eq!(children, vec![("Rashi", 5), ("Ibn Ezra", 3)]);

    assert!(tree.get("Torah Commentary").is_none());
    assert!(tree.get("Torah Commentary/Genesis/Rashi").is_none());

    let root = tree.root();
    assert_eq!(root.children().last(), tree.lookup("Commentary").as_ref());
}

#[test]
fn selected_category_hides_its_leaves() {
    let mut tree = fresh_tree();
    tree.select("Tanakh/Torah");

    assert_eq!(tree.applied_filters(), vec!["Tanakh/Torah"]);
    assert_eq!(tree.selected_titles(facets_tree::Language::Hebrew), vec!["תורה"]);
}

#[test]
fn node_id_keys_resolve_like_paths() {
    let tree = fresh_tree();
    assert_eq!(
        tree.lookup("Mishnah-Seder_Moed-Mishnah_Shabbat"),
        tree.lookup("Mishnah/Seder Moed/Mishnah Shabbat")
    );
    assert_eq!(
        tree.lookup("Commentary-Ibn_Ezra"),
        tree.lookup("Commentary/Ibn Ezra")
    );
}
