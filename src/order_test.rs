#[cfg(test)]
mod tests {
    use crate::order::Order;

    #[test]
    fn default_is_sixteen() {
        assert_eq!(Order::default().get(), 16);
    }

    #[test]
    fn derived_quantities_for_order_four() {
        let order = Order::new(4);
        assert_eq!(order.max_keys(), 3);
        assert_eq!(order.min_keys(), 1);
        assert_eq!(order.min_children(), 2);
    }

    #[test]
    fn derived_quantities_for_odd_order() {
        let order = Order::new(5);
        assert_eq!(order.max_keys(), 4);
        assert_eq!(order.min_keys(), 2);
        assert_eq!(order.min_children(), 3);
    }

    #[test]
    fn try_new_rejects_small_orders() {
        let err = Order::try_new(2).unwrap_err();
        assert_eq!(err.order, 2);
        assert_eq!(err.min, 3);
    }

    #[test]
    #[should_panic(expected = "invalid tree order")]
    fn new_panics_on_small_order() {
        Order::new(1);
    }

    #[test]
    fn try_from_roundtrips() {
        let order: Order = 8usize.try_into().unwrap();
        assert_eq!(order.get(), 8);
    }
}
