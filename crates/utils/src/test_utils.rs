/// makes sure traits are implemented
///
/// ```ignore
/// asssert_trait!(sync_send_spec; Specification; Sync, Send);
/// ```
#[macro_export]
macro_rules! asssert_trait {
    ($name:ident; $to_test:ty; $($trait:path),*) => {
        $crate::paste::paste! {
            #[cfg(test)]
            #[test]
            fn [<_$name:snake>]() {
                $({
                    fn check<T: $trait>() {}
                    check::<$to_test>();
                })*
            }
        }
    };
}
