//! Plain `$NAME` / `${NAME}` substitution without operator support.
//!
//! This is a lower-fidelity alternative to [`crate::evaluate`]:
//! `${NAME:-word}` and the other operator forms are not recognised and
//! pass through unchanged (though references inside them are still
//! replaced). It never fails.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

use crate::eval::{Absent, Variables};

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("reference pattern is valid")
});

/// Replace every simple variable reference in `text`.
///
/// Absent variables become `""` under [`Absent::Empty`] and are left
/// as written under [`Absent::Skip`].
#[must_use]
pub fn substitute(text: &str, variables: &Variables, absent: Absent) -> String {
    REFERENCE
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            match (variables.get(name), absent) {
                (Some(value), _) => value.clone(),
                (None, Absent::Empty) => String::new(),
                (None, Absent::Skip) => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Variables {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn replaces_both_forms() {
        let out = substitute("$a-${b}!", &vars(&[("a", "1"), ("b", "2")]), Absent::Empty);
        assert_eq!(out, "1-2!");
    }

    #[test]
    fn absent_policies() {
        let v = vars(&[]);
        assert_eq!(substitute("[$a]", &v, Absent::Empty), "[]");
        assert_eq!(substitute("[${a}]", &v, Absent::Skip), "[${a}]");
    }

    #[test]
    fn operators_pass_through() {
        let out = substitute("${a:-x}", &vars(&[("a", "1")]), Absent::Empty);
        assert_eq!(out, "${a:-x}");
    }

    #[test]
    fn values_are_not_rescanned() {
        let out = substitute("$a", &vars(&[("a", "$b"), ("b", "no")]), Absent::Empty);
        assert_eq!(out, "$b");
    }
}
