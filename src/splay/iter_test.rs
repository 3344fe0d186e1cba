#[cfg(test)]
mod tests {
    use crate::splay::SplayTree;

    #[test]
    fn ascending_matches_elements() {
        let mut tree: SplayTree<i32, i32> = SplayTree::new();
        for i in [5, 3, 8, 1, 9, 2, 7, 4, 6, 0] {
            tree.insert(i, i);
        }
        let via_iter: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(via_iter, tree.elements());
    }

    #[test]
    fn descending_is_reverse_of_ascending() {
        let mut tree: SplayTree<i32, i32> = SplayTree::new();
        for i in 0..50 {
            tree.insert(i, i);
        }
        let via_rev: Vec<_> = tree.iter_rev().map(|(k, v)| (*k, *v)).collect();
        let mut expected = tree.elements();
        expected.reverse();
        assert_eq!(via_rev, expected);
    }

    #[test]
    fn iterating_does_not_change_shape_touched_by_search() {
        let mut tree: SplayTree<i32, i32> = SplayTree::new();
        for i in 0..20 {
            tree.insert(i, i);
        }
        let before = tree.elements();
        let _: Vec<_> = tree.iter().collect();
        assert_eq!(tree.elements(), before);
    }
}
