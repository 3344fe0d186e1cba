#[cfg(test)]
mod tests {
    use crate::btree::BTree;
    use crate::collection::OrderedMap;
    use crate::order::Order;

    #[test]
    fn scenario_s1_ascending_insert_and_height() {
        let mut tree: BTree<i32, i32> = BTree::with_order(Order::new(4));
        for i in 1..=10 {
            assert!(tree.insert(i, i * 10));
        }
        assert_eq!(tree.height(), 4);
        assert_eq!(
            tree.elements(),
            (1..=10).map(|i| (i, i * 10)).collect::<Vec<_>>()
        );
        assert_eq!(tree.remove(&10), Some(100));
        assert_eq!(OrderedMap::len(&tree), 9);
    }

    #[test]
    fn insert_rejects_duplicate_key() {
        let mut tree: BTree<i32, &str> = BTree::new();
        assert!(tree.insert(1, "a"));
        assert!(!tree.insert(1, "b"));
        assert_eq!(tree.search(&1), Some("a"));
    }

    #[test]
    fn remove_absent_key_is_none() {
        let mut tree: BTree<i32, i32> = BTree::new();
        tree.insert(1, 1);
        assert_eq!(tree.remove(&99), None);
        assert_eq!(OrderedMap::len(&tree), 1);
    }

    #[test]
    fn bottom_up_and_top_down_insert_agree_on_even_order() {
        let mut bu: BTree<i32, i32> = BTree::with_order(Order::new(4));
        let mut td: BTree<i32, i32> = BTree::with_order(Order::new(4));
        for i in 0..200 {
            let key = (i * 37) % 211;
            bu.insert(key, key);
            td.insert_top_down(key, key);
        }
        assert_eq!(bu.elements(), td.elements());
    }

    #[test]
    fn bottom_up_and_top_down_delete_agree() {
        let order = Order::new(5);
        let mut top: BTree<i32, i32> = BTree::with_order(order);
        let mut bottom: BTree<i32, i32> = BTree::with_order(order);
        for i in 0..150 {
            top.insert(i, i);
            bottom.insert(i, i);
        }
        for i in (0..150).step_by(3) {
            assert_eq!(top.remove(&i), bottom.remove_bottom_up(&i));
        }
        assert_eq!(top.elements(), bottom.elements());
    }

    #[test]
    fn floor_ceiling_predecessor_successor() {
        let mut tree: BTree<i32, i32> = BTree::with_order(Order::new(4));
        for k in [10, 20, 30, 40, 50] {
            tree.insert(k, k);
        }
        assert_eq!(tree.floor(&25), Some((20, 20)));
        assert_eq!(tree.floor(&10), Some((10, 10)));
        assert_eq!(tree.floor(&5), None);
        assert_eq!(tree.ceiling(&25), Some((30, 30)));
        assert_eq!(tree.ceiling(&50), Some((50, 50)));
        assert_eq!(tree.ceiling(&51), None);
        assert_eq!(tree.predecessor(&30), Some((20, 20)));
        assert_eq!(tree.predecessor(&10), None);
        assert_eq!(tree.successor(&30), Some((40, 40)));
        assert_eq!(tree.successor(&50), None);
    }

    #[test]
    fn range_query_matches_spec_bounds() {
        let mut tree: BTree<i32, i32> = BTree::with_order(Order::new(4));
        for i in 1..=20 {
            tree.insert(i, i);
        }
        let got: Vec<i32> = tree.range(&5, &12).into_iter().map(|(k, _)| k).collect();
        assert_eq!(got, (5..=12).collect::<Vec<_>>());
        assert!(tree.range(&100, &200).is_empty());
        assert!(tree.range(&15, &3).is_empty());
    }

    #[test]
    fn bulk_load_produces_ascending_and_valid_height() {
        let items: Vec<(i32, i32)> = (1..=100).map(|i| (i, i)).collect();
        let tree = BTree::bulk_load(items.clone(), Order::new(4));
        assert_eq!(tree.elements(), items);
        assert_eq!(OrderedMap::len(&tree), 100);
    }

    #[test]
    fn min_max_on_empty_and_populated_tree() {
        let mut tree: BTree<i32, i32> = BTree::new();
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
        tree.insert(5, 5);
        tree.insert(1, 1);
        tree.insert(9, 9);
        assert_eq!(tree.min(), Some((1, 1)));
        assert_eq!(tree.max(), Some((9, 9)));
    }

    #[test]
    fn clear_empties_tree() {
        let mut tree: BTree<i32, i32> = BTree::with_order(Order::new(4));
        for i in 0..30 {
            tree.insert(i, i);
        }
        OrderedMap::clear(&mut tree);
        assert_eq!(OrderedMap::len(&tree), 0);
        assert_eq!(tree.elements(), Vec::new());
    }

    #[test]
    #[should_panic(expected = "insert_top_down requires an even order")]
    fn insert_top_down_panics_on_odd_order() {
        let mut tree: BTree<i32, i32> = BTree::with_order(Order::new(5));
        tree.insert_top_down(1, 1);
    }
}
