#[cfg(test)]
mod tests {
    use crate::btree::node::lower_bound;

    #[test]
    fn lower_bound_finds_exact_match() {
        let keys = [1, 3, 5, 7, 9];
        assert_eq!(lower_bound(&keys, &5), Ok(2));
    }

    #[test]
    fn lower_bound_finds_insertion_point() {
        let keys = [1, 3, 5, 7, 9];
        assert_eq!(lower_bound(&keys, &4), Err(2));
        assert_eq!(lower_bound(&keys, &0), Err(0));
        assert_eq!(lower_bound(&keys, &10), Err(5));
    }

    #[test]
    fn lower_bound_above_linear_crossover_matches_binary_search() {
        let keys: Vec<i32> = (0..100).map(|i| i * 2).collect();
        assert_eq!(lower_bound(&keys, &50), Ok(25));
        assert_eq!(lower_bound(&keys, &51), Err(26));
    }
}
