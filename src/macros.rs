/// A macro to build a [`Rewrite`](crate::Rewrite) from two pattern
/// strings.
///
/// Both sides parse as [`Pattern`](crate::Pattern)s; the macro panics
/// on a parse error or an unbound right-hand variable, so it is meant
/// for rules known at compile time.
///
/// ```
/// use saturate::rewrite;
///
/// let rules = [
///     rewrite!("commute-add"; "(+ ?a ?b)" => "(+ ?b ?a)"),
///     rewrite!("assoc-add"; "(+ (+ ?x ?y) ?z)" => "(+ ?x (+ ?y ?z))"),
///     rewrite!("mul-zero"; "(* ?x 0)" => "0"),
/// ];
/// assert_eq!(rules.len(), 3);
/// ```
#[macro_export]
macro_rules! rewrite {
    ($name:expr; $lhs:expr => $rhs:expr) => {{
        let lhs: $crate::Pattern = $lhs.parse().unwrap();
        let rhs: $crate::Pattern = $rhs.parse().unwrap();
        $crate::Rewrite::new($name, lhs, rhs).unwrap()
    }};
}
