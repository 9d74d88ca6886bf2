//! URI validation built on the loose/strict rules in [`crate::regex`].
//!
//! Message parsing itself only requires `uri`/`procedure`/`topic` to be
//! non-null strings (see `messages::validation`); this module is the
//! stricter WAMP URI grammar (wamp-proto section 16.1.2-11) for embedders
//! that want to enforce it explicitly, e.g. before registering a procedure.

use crate::regex::uri_rules::{Rule, WampRules};

/// A URI validated against one of the [`WampRules`] grammars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri(String);

impl Uri {
    /// Validates `value` against `rule`'s loose grammar.
    pub fn validate_loose(rule: WampRules, value: &str) -> Result<Self, String> {
        if rule.rule().loose.is_match(value) {
            Ok(Uri(value.to_string()))
        } else {
            Err(format!("'{value}' does not satisfy the loose WAMP URI grammar"))
        }
    }

    /// Validates `value` against `rule`'s strict grammar.
    pub fn validate_strict(rule: WampRules, value: &str) -> Result<Self, String> {
        if rule.rule().strict.is_match(value) {
            Ok(Uri(value.to_string()))
        } else {
            Err(format!("'{value}' does not satisfy the strict WAMP URI grammar"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_dotted_uri() {
        assert!(Uri::validate_strict(WampRules::URI, "com.myapp.user.new").is_ok());
    }

    #[test]
    fn rejects_uri_with_whitespace_under_loose_rule() {
        assert!(Uri::validate_loose(WampRules::URI, "com myapp").is_err());
    }

    #[test]
    fn prefix_or_wildcard_allows_empty_components() {
        assert!(Uri::validate_loose(WampRules::PrefixOrWildcard, "com..user.new").is_ok());
    }
}
