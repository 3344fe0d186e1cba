#[cfg(test)]
mod tests {
    use crate::bplustree::node::BPlusNode;

    #[test]
    fn leaf_has_no_keys_and_no_children() {
        let leaf: BPlusNode<i32> = BPlusNode::Leaf { slot: 0 };
        assert!(leaf.is_leaf());
        assert_eq!(leaf.key_count(), 0);
        assert!(leaf.keys().is_empty());
        assert!(leaf.children().is_none());
        assert_eq!(leaf.leaf_slot(), Some(0));
    }

    #[test]
    fn internal_reports_keys_and_children() {
        let node: BPlusNode<i32> = BPlusNode::Internal {
            keys: vec![10, 20],
            children: vec![
                Box::new(BPlusNode::Leaf { slot: 0 }),
                Box::new(BPlusNode::Leaf { slot: 1 }),
                Box::new(BPlusNode::Leaf { slot: 2 }),
            ],
        };
        assert!(!node.is_leaf());
        assert_eq!(node.key_count(), 2);
        assert_eq!(node.children().unwrap().len(), 3);
        assert_eq!(node.leaf_slot(), None);
    }

    #[test]
    fn child_index_routes_equal_keys_right() {
        let node: BPlusNode<i32> = BPlusNode::Internal {
            keys: vec![10, 20],
            children: vec![
                Box::new(BPlusNode::Leaf { slot: 0 }),
                Box::new(BPlusNode::Leaf { slot: 1 }),
                Box::new(BPlusNode::Leaf { slot: 2 }),
            ],
        };
        assert_eq!(node.child_index(&5), 0);
        assert_eq!(node.child_index(&10), 1);
        assert_eq!(node.child_index(&15), 1);
        assert_eq!(node.child_index(&20), 2);
        assert_eq!(node.child_index(&25), 2);
    }
}
