use proptest::prelude::*;
use serde_json::json;
use value_tree::prelude::*;

fn nested() -> Value {
    Value::from(json!({
        "users": [
            {"name": "ada", "tags": ["math", "engines"]},
            {"name": "grace", "tags": ["compilers"]}
        ],
        "meta": {"count": 2, "pages": {"next": null}}
    }))
}

#[test]
fn test_children_not_classified_before_expansion() {
    let tree = ValueTree::new(nested(), RenderOptions::default()).unwrap();

    assert_eq!(tree.classifications(), 1);
    assert_eq!(tree.children(tree.root()).count(), 0);
    // asking for children does not classify anything
    assert_eq!(tree.classifications(), 1);
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn test_each_level_is_classified_once() {
    let mut tree = ValueTree::new(nested(), RenderOptions::default()).unwrap();
    tree.toggle(tree.root()).unwrap();
    assert_eq!(tree.classifications(), 3);

    let users = tree.find_by_key_path(&["users"]).unwrap();
    tree.toggle(users).unwrap();
    assert_eq!(tree.classifications(), 5);

    // collapsing and re-expanding reuses the existing children
    tree.toggle(users).unwrap();
    tree.toggle(users).unwrap();
    tree.toggle(tree.root()).unwrap();
    tree.toggle(tree.root()).unwrap();
    assert_eq!(tree.classifications(), 5);
    assert_eq!(tree.node_count(), 5);
}

#[test]
fn test_start_expanded_classifies_one_level() {
    let tree = ValueTree::new(nested(), RenderOptions::new().start_expanded(true)).unwrap();
    assert_eq!(tree.classifications(), 3);
    let meta = tree.find_by_key_path(&["meta"]).unwrap();
    assert!(!tree.get(meta).unwrap().ever_expanded());
    assert!(!tree.is_loaded(meta));
}

#[test]
fn test_toggle_on_leaf_changes_nothing() {
    let mut tree = ValueTree::new(nested(), RenderOptions::new().start_expanded(true)).unwrap();
    let meta = tree.expand_path(&["meta"]).unwrap();
    let count = tree.find_by_key_path(&["meta", "count"]).unwrap();
    let before = tree.classifications();

    assert!(tree.is_expanded(meta));
    assert!(!tree.toggle(count).unwrap());
    assert!(!tree.toggle(count).unwrap());
    assert!(!tree.get(count).unwrap().ever_expanded());
    assert_eq!(tree.classifications(), before);
}

proptest! {
    #[test]
    fn toggle_twice_restores_expansion(presses in 1usize..12) {
        let mut tree = ValueTree::new(nested(), RenderOptions::default()).unwrap();
        let root = tree.root();
        for _ in 0..presses {
            tree.toggle(root).unwrap();
        }
        let node = tree.get(root).unwrap();
        prop_assert_eq!(node.is_expanded(), presses % 2 == 1);
        prop_assert!(node.ever_expanded());
        prop_assert_eq!(tree.classifications(), 3);

        let mut again = ValueTree::new(nested(), RenderOptions::default()).unwrap();
        let before = again.get(root).unwrap().is_expanded();
        again.toggle(root).unwrap();
        again.toggle(root).unwrap();
        prop_assert_eq!(again.get(root).unwrap().is_expanded(), before);
    }

    #[test]
    fn containers_with_members_classify_as_containers(
        items in proptest::collection::vec(any::<i32>(), 0..8)
    ) {
        let value = Value::array(items.iter().copied().map(Value::from));
        let tree = ValueTree::new(value, RenderOptions::default()).unwrap();
        let kind = tree.get(tree.root()).unwrap().kind();
        if items.is_empty() {
            prop_assert_eq!(kind, NodeKind::EmptyContainer);
        } else {
            prop_assert_eq!(kind, NodeKind::Container);
        }
    }
}
