use vireo_css::{Selector, parse_inline_style, parse_stylesheet};

#[test]
fn test_single_rule() {
    let rules = parse_stylesheet("p { color: red; }");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].selector, Selector::Tag("p".to_string()));
    assert_eq!(rules[0].declarations.get("color").unwrap(), "red");
}

#[test]
fn test_descendant_chain_folds_left() {
    let rules = parse_stylesheet("div p b { color: red; }");
    let expected = Selector::Descendant(
        Box::new(Selector::Descendant(
            Box::new(Selector::Tag("div".to_string())),
            Box::new(Selector::Tag("p".to_string())),
        )),
        Box::new(Selector::Tag("b".to_string())),
    );
    assert_eq!(rules[0].selector, expected);
    assert_eq!(rules[0].selector.specificity(), 3);
}

#[test]
fn test_class_in_descendant_chain() {
    let rules = parse_stylesheet(".note p { color: gray; }");
    assert_eq!(rules[0].selector.specificity(), 11);
}

#[test]
fn test_selector_names_are_lowercased() {
    let rules = parse_stylesheet("DIV { color: red; } .Warn { color: blue; }");
    assert_eq!(rules[0].selector, Selector::Tag("div".to_string()));
    assert_eq!(rules[1].selector, Selector::Class("warn".to_string()));
}

#[test]
fn test_bad_declaration_recovers_at_semicolon() {
    let rules = parse_stylesheet("p { color:; font-weight: bold; }");
    assert_eq!(rules.len(), 1);
    assert!(!rules[0].declarations.contains_key("color"));
    assert_eq!(rules[0].declarations.get("font-weight").unwrap(), "bold");
}

#[test]
fn test_missing_colon_abandons_rest_of_body() {
    let rules = parse_stylesheet("p { color red } b { font-style: italic; }");
    assert_eq!(rules.len(), 2);
    assert!(rules[0].declarations.is_empty());
    assert_eq!(rules[1].declarations.get("font-style").unwrap(), "italic");
}

#[test]
fn test_bad_selector_skips_whole_rule() {
    let rules = parse_stylesheet("@media print { color: red; } b { font-style: italic; }");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].selector, Selector::Tag("b".to_string()));
}

#[test]
fn test_unterminated_final_rule_is_dropped() {
    let rules = parse_stylesheet("a { color: blue; } p { color: red");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].selector, Selector::Tag("a".to_string()));
}

#[test]
fn test_duplicate_property_keeps_last_value() {
    let rules = parse_stylesheet("p { color: red; color: blue; }");
    assert_eq!(rules[0].declarations.get("color").unwrap(), "blue");
}

#[test]
fn test_hex_color_value() {
    let rules = parse_stylesheet("p { color: #ff0000; }");
    assert_eq!(rules[0].declarations.get("color").unwrap(), "#ff0000");
}

#[test]
fn test_property_names_are_lowercased() {
    let rules = parse_stylesheet("p { COLOR: red; }");
    assert_eq!(rules[0].declarations.get("color").unwrap(), "red");
}

#[test]
fn test_inline_body_tolerates_missing_terminator() {
    let declarations = parse_inline_style("color: red; font-size: 20px");
    assert_eq!(declarations.len(), 2);
    assert_eq!(declarations.get("color").unwrap(), "red");
    assert_eq!(declarations.get("font-size").unwrap(), "20px");
}

#[test]
fn test_empty_input() {
    assert!(parse_stylesheet("").is_empty());
    assert!(parse_stylesheet("   \n\t ").is_empty());
    assert!(parse_inline_style("").is_empty());
}
