//! Built-in user-agent stylesheet.
//!
//! These rules seed every document's rule list before author stylesheets,
//! so author rules of equal specificity override them by order. Values
//! stay within the single-word grammar the parser accepts.

use crate::parser::{Rule, parse_stylesheet};

/// Default presentation rules applied to every document.
pub const UA_STYLESHEET: &str = "\
body { font-size: 16px; font-family: serif; color: black; }
h1 { font-size: 32px; font-weight: bold; }
h2 { font-size: 24px; font-weight: bold; }
h3 { font-size: 19px; font-weight: bold; }
h4 { font-size: 16px; font-weight: bold; }
b { font-weight: bold; }
strong { font-weight: bold; }
i { font-style: italic; }
em { font-style: italic; }
small { font-size: 80%; }
a { color: blue; }
code { font-family: monospace; }
pre { font-family: monospace; }
";

/// Parse [`UA_STYLESHEET`] into a rule list.
#[must_use]
pub fn ua_rules() -> Vec<Rule> {
    parse_stylesheet(UA_STYLESHEET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Selector;

    #[test]
    fn test_every_rule_parses() {
        assert_eq!(ua_rules().len(), UA_STYLESHEET.lines().count());
    }

    #[test]
    fn test_headings_are_bold() {
        let rules = ua_rules();
        let h1 = rules
            .iter()
            .find(|r| r.selector == Selector::Tag("h1".to_string()))
            .unwrap();
        assert_eq!(h1.declarations.get("font-weight").unwrap(), "bold");
        assert_eq!(h1.declarations.get("font-size").unwrap(), "32px");
    }
}
