use serde_json::{Number, Value};

/// Equality of two scalar leaves.
///
/// Integers compare exactly. When either side is a float both are compared as
/// `f64`, so `5` equals `5.0`. Everything else must match exactly.
pub fn scalars_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(na), Value::Number(nb)) => numbers_equal(na, nb),
        _ => a == b,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (as_integer(a), as_integer(b)) {
        (Some(ia), Some(ib)) => ia == ib,
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(fa), Some(fb)) => fa == fb,
            _ => false,
        },
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_ignore_representation() {
        assert!(scalars_equal(&json!(5), &json!(5.0)));
        assert!(!scalars_equal(&json!(5), &json!(6)));
    }

    #[test]
    fn tiny_floats_are_not_rounded_together() {
        assert!(!scalars_equal(&json!(1e-20), &json!(2e-20)));
        assert!(scalars_equal(&json!(1e-20), &json!(1e-20)));
    }

    #[test]
    fn large_integers_compare_exactly() {
        let a = json!(9_007_199_254_740_993i64);
        let b = json!(9_007_199_254_740_992i64);
        assert!(!scalars_equal(&a, &b));
        assert!(!scalars_equal(&json!(u64::MAX), &json!(u64::MAX - 1)));
        assert!(scalars_equal(&json!(u64::MAX), &json!(u64::MAX)));
    }

    #[test]
    fn strings_do_not_coerce_to_numbers() {
        assert!(!scalars_equal(&json!("5"), &json!(5)));
        assert!(scalars_equal(&json!("b"), &json!("b")));
    }
}
