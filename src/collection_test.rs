#[cfg(test)]
mod tests {
    use crate::bplustree::BPlusTree;
    use crate::btree::BTree;
    use crate::collection::OrderedMap;
    use crate::splay::SplayTree;

    fn exercise<T: OrderedMap<i32, i32>>(mut tree: T) {
        assert!(tree.is_empty());
        assert_eq!(OrderedMap::min(&tree), None);

        for k in [5, 3, 8, 1, 9, 4, 7] {
            assert!(tree.insert(k, k * 10));
        }
        assert_eq!(tree.len(), 7);
        assert!(!tree.insert(5, 999));

        assert_eq!(OrderedMap::search(&mut tree, &5), Some(50));
        assert_eq!(OrderedMap::search(&mut tree, &100), None);
        assert!(OrderedMap::contains_key(&mut tree, &5));
        assert!(!OrderedMap::contains_key(&mut tree, &100));

        assert_eq!(OrderedMap::min(&tree), Some((1, 10)));
        assert_eq!(OrderedMap::max(&tree), Some((9, 90)));

        assert_eq!(tree.keys(), vec![1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(tree.values(), vec![10, 30, 40, 50, 70, 80, 90]);
        assert_eq!(
            tree.reversed(),
            vec![(9, 90), (8, 80), (7, 70), (5, 50), (4, 40), (3, 30), (1, 10)]
        );

        assert_eq!(OrderedMap::update(&mut tree, &5, 500), Some(50));
        assert_eq!(OrderedMap::search(&mut tree, &5), Some(500));
        assert_eq!(OrderedMap::update(&mut tree, &100, 1), None);
        assert_eq!(OrderedMap::upsert(&mut tree, 100, 1000), None);
        assert_eq!(OrderedMap::upsert(&mut tree, 100, 2000), Some(1000));

        assert_eq!(OrderedMap::remove(&mut tree, &100), Some(2000));
        assert_eq!(OrderedMap::remove(&mut tree, &100), None);
        assert_eq!(tree.len(), 7);

        assert_eq!(OrderedMap::at(&mut tree, &5), 500);
        assert_eq!(OrderedMap::set_at(&mut tree, 5, Some(501)), Some(500));
        assert_eq!(OrderedMap::at(&mut tree, &5), 501);
        assert_eq!(OrderedMap::set_at(&mut tree, 5, None), Some(501));
        assert!(!OrderedMap::contains_key(&mut tree, &5));
        assert_eq!(OrderedMap::set_at(&mut tree, 5, Some(500)), None);
        assert_eq!(tree.len(), 7);

        let sum = tree.reduce(0, |acc, _, v| acc + v);
        assert_eq!(sum, 500 + 10 + 30 + 40 + 70 + 80 + 90);

        let doubled = tree.map(|_, v| v * 2);
        assert_eq!(doubled.len(), 7);

        let big = tree.compact_map(|_, v| if *v >= 70 { Some(*v) } else { None });
        assert_eq!(big, vec![70, 80, 90, 500]);

        OrderedMap::clear(&mut tree);
        assert!(tree.is_empty());
        assert_eq!(tree.elements(), Vec::new());
    }

    #[test]
    fn btree_satisfies_the_contract() {
        exercise(BTree::new());
    }

    #[test]
    fn bplustree_satisfies_the_contract() {
        exercise(BPlusTree::new());
    }

    #[test]
    fn splaytree_satisfies_the_contract() {
        exercise(SplayTree::new());
    }

    #[test]
    #[should_panic(expected = "key not present")]
    fn at_panics_on_missing_key() {
        let mut tree: BTree<i32, i32> = BTree::new();
        tree.insert(1, 10);
        OrderedMap::at(&mut tree, &2);
    }
}
