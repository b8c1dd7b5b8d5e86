#[doc(hidden)]
pub use paste;

pub mod ord_util;
pub mod test_utils;

pub use ord_util::{natural_cmp, NaturalOrd};

#[macro_export]
macro_rules! implvec {
    ($t:ty) => {
        impl std::iter::IntoIterator<Item = $t>
    };
}
