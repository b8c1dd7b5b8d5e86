use std::cmp::Ordering;

/// Splits `s` into its leading part and its trailing run of ascii digits
///
/// `"p12"` gives `("p", Some("12"))`, `"abc"` gives `("abc", None)`
#[inline]
fn split_suffix(s: &str) -> (&str, Option<&str>) {
    let idx = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);
    match idx {
        Some(i) => (&s[..i], Some(&s[i..])),
        None => (s, None),
    }
}

/// Compares two runs of digits by numerical value without parsing them
fn digits_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Numeric-suffix-aware ordering of strings
///
/// Strings are compared by their non-numeric prefix first, then by the value
/// of their trailing digits (so `p2 < p10`). A string without a numeric
/// suffix comes before the suffixed strings sharing its prefix. Remaining
/// ties (`p01` vs `p1`) are broken by plain string comparison so that the
/// order stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (pa, sa) = split_suffix(a);
    let (pb, sb) = split_suffix(b);
    pa.cmp(pb)
        .then_with(|| match (sa, sb) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(sa), Some(sb)) => digits_cmp(sa, sb),
        })
        .then_with(|| a.cmp(b))
}

/// Wrapper ordering any string-like value with [natural_cmp]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct NaturalOrd<S>(pub S);

impl<S: AsRef<str> + Eq> PartialOrd for NaturalOrd<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: AsRef<str> + Eq> Ord for NaturalOrd<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(self.0.as_ref(), other.0.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        assert_eq!(natural_cmp("p2", "p10"), Ordering::Less);
        assert_eq!(natural_cmp("p10", "p2"), Ordering::Greater);
        assert_eq!(natural_cmp("p7", "p7"), Ordering::Equal);
    }

    #[test]
    fn prefix_first() {
        assert_eq!(natural_cmp("a10", "b2"), Ordering::Less);
        assert_eq!(natural_cmp("p", "p0"), Ordering::Less);
        assert_eq!(natural_cmp("x_1", "x1"), Ordering::Greater);
    }

    #[test]
    fn leading_zeros() {
        assert_eq!(natural_cmp("010", "9"), Ordering::Greater);
        assert_eq!(natural_cmp("p01", "p1"), Ordering::Less);
        assert_eq!(natural_cmp("f002", "f10"), Ordering::Less);
    }

    #[test]
    fn sorting() {
        let mut v = vec!["p10", "p1", "q", "p2", "p", "p100"];
        v.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(v, ["p", "p1", "p2", "p10", "p100", "q"]);

        let mut w: Vec<_> = ["f3", "f21", "f200"].into_iter().map(NaturalOrd).collect();
        w.sort();
        assert_eq!(w.into_iter().map(|x| x.0).collect::<Vec<_>>(), ["f3", "f21", "f200"]);
    }
}
