//! `${var}` expansion for configuration values.

use crate::ConfigError;
use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of expansions applied to a single value.
pub(super) const MAX_SUBST: usize = 20;

static VAR_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\$\{[^\}\$ ]+\}").ok());

/// Expand the first `${var}` reference repeatedly until none remain.
///
/// Expansion stops at the first reference `lookup` cannot resolve; the value is
/// returned with that reference intact.
pub(super) fn substitute_vars(
    expression: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let Some(pattern) = VAR_PATTERN.as_ref() else {
        return Ok(expression.to_string());
    };

    let mut eval = expression.to_string();
    for _ in 0..MAX_SUBST {
        let Some(found) = pattern.find(&eval) else {
            return Ok(eval);
        };
        let var = &eval[found.start() + 2..found.end() - 1];
        let Some(value) = lookup(var) else {
            return Ok(eval);
        };
        eval = format!("{}{}{}", &eval[..found.start()], value, &eval[found.end()..]);
    }

    Err(ConfigError::SubstitutionDepth {
        expression: expression.to_string(),
        max_depth: MAX_SUBST,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn expands_chained_references() {
        let vars = vars(&[("base", "/data"), ("dir", "${base}/dfs")]);
        let out = substitute_vars("file://${dir}/name", |var| vars.get(var).cloned()).expect("subst");
        assert_eq!(out, "file:///data/dfs/name");
    }

    #[test]
    fn unresolved_reference_is_left_in_place() {
        let vars = vars(&[("known", "x")]);
        let out = substitute_vars("${missing}-${known}", |var| vars.get(var).cloned()).expect("subst");
        assert_eq!(out, "${missing}-${known}");
    }

    #[test]
    fn self_reference_hits_depth_limit() {
        let vars = vars(&[("loop", "${loop}")]);
        let err = substitute_vars("${loop}", |var| vars.get(var).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::SubstitutionDepth { max_depth: MAX_SUBST, .. }));
    }
}
