use std::cmp::Ordering;

/// Compares two optional components of a partially specified value.
///
/// Both unset compare equal, an unset component sorts before a set one, and
/// two set components compare by value.
pub fn compare_optional<T: Ord>(left: Option<&T>, right: Option<&T>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(l), Some(r)) => l.cmp(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_sorts_first() {
        assert_eq!(compare_optional::<i32>(None, None), Ordering::Equal);
        assert_eq!(compare_optional(None, Some(&1)), Ordering::Less);
        assert_eq!(compare_optional(Some(&1), None), Ordering::Greater);
        assert_eq!(compare_optional(Some(&5), Some(&3)), Ordering::Greater);
        assert_eq!(compare_optional(Some(&3), Some(&3)), Ordering::Equal);
    }
}
