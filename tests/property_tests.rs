//! Property-based tests for rust_structured_logger using proptest

use proptest::prelude::*;
use rust_structured_logger::prelude::*;
use rust_structured_logger::{MessageTemplate, MessageTemplateRepository, PropertyValue};
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = SeverityLevel> {
    prop_oneof![
        Just(SeverityLevel::Minimum),
        Just(SeverityLevel::Verbose),
        Just(SeverityLevel::Debug),
        Just(SeverityLevel::Information),
        Just(SeverityLevel::Warning),
        Just(SeverityLevel::Error),
        Just(SeverityLevel::Fatal),
        Just(SeverityLevel::Maximum),
    ]
}

fn real_level() -> impl Strategy<Value = SeverityLevel> {
    proptest::sample::select(SeverityLevel::REAL_LEVELS.to_vec())
}

// ============================================================================
// SeverityLevel Tests
// ============================================================================

proptest! {
    /// Ordering follows the discriminants
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        let (va, vb) = (a as u8, b as u8);
        prop_assert_eq!(a < b, va < vb);
        prop_assert_eq!(a == b, va == vb);
    }

    /// A level passes a minimum exactly when it is not below it
    #[test]
    fn test_is_enabled_matches_ordering(level in any_level(), minimum in any_level()) {
        prop_assert_eq!(level.is_enabled(minimum), level >= minimum);
    }

    /// Every real level passes Minimum and fails Maximum
    #[test]
    fn test_sentinels(level in real_level()) {
        prop_assert!(SeverityLevel::Minimum < level);
        prop_assert!(level < SeverityLevel::Maximum);
        prop_assert!(level.is_enabled(SeverityLevel::Minimum));
        prop_assert!(!level.is_enabled(SeverityLevel::Maximum));
    }

    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        let parsed: SeverityLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }
}

// ============================================================================
// MessageTemplate Tests
// ============================================================================

proptest! {
    /// Parsing never fails or panics, and rendering without properties
    /// never loses text outside property tokens
    #[test]
    fn test_parse_any_input(text in "\\PC{0,64}") {
        let template = MessageTemplate::parse(&text);
        prop_assert_eq!(template.text(), text.as_str());
        let _ = template.render(&[]);
    }

    /// Text without braces is a single literal that renders to itself
    #[test]
    fn test_brace_free_text_is_literal(text in "[^{}]{1,64}") {
        let template = MessageTemplate::parse(&text);
        prop_assert_eq!(template.property_tokens().count(), 0);
        prop_assert_eq!(template.render(&[]), text);
    }

    /// Well-formed tokens are found wherever they appear
    #[test]
    fn test_named_token_is_parsed(
        prefix in "[^{}]{0,16}",
        name in "[A-Za-z_][A-Za-z0-9_]{0,15}",
        suffix in "[^{}]{0,16}",
    ) {
        let text = format!("{}{{{}}}{}", prefix, name, suffix);
        let template = MessageTemplate::parse(&text);
        let names: Vec<&str> = template.property_tokens().map(|t| t.name()).collect();
        prop_assert_eq!(names, vec![name.as_str()]);
    }

    /// Doubled braces always render as single braces
    #[test]
    fn test_escaped_braces(inner in "[A-Za-z0-9 ]{0,16}") {
        let template = MessageTemplate::parse(&format!("{{{{{}}}}}", inner));
        prop_assert_eq!(template.property_tokens().count(), 0);
        prop_assert_eq!(template.render(&[]), format!("{{{}}}", inner));
    }

    /// The cache hands out one instance per distinct text
    #[test]
    fn test_cache_identity(texts in proptest::collection::vec("[a-c{}]{0,6}", 1..20)) {
        let repository = MessageTemplateRepository::new();
        for text in &texts {
            let first = repository.parse_or_get(text);
            let again = repository.parse_or_get(text);
            prop_assert!(Arc::ptr_eq(&first, &again));
        }
        let distinct: std::collections::HashSet<_> = texts.iter().collect();
        prop_assert_eq!(repository.len(), distinct.len());
    }
}

// ============================================================================
// Logger Tests
// ============================================================================

proptest! {
    /// A bound integer property keeps its value
    #[test]
    fn test_integer_binding(value in any::<i64>()) {
        let memory = InMemorySink::new();
        let logger = Logger::builder().sink(memory.clone()).build();
        logger.information("Value {V}", &[&value]).unwrap();

        let event = &memory.events()[0];
        prop_assert_eq!(event.property("V"), Some(&PropertyValue::from(value)));
        prop_assert_eq!(event.render_message(), format!("Value {}", value));
    }

    /// Only events at or above the minimum reach the sink
    #[test]
    fn test_minimum_level_filtering(minimum in any_level(), level in real_level()) {
        let memory = InMemorySink::new();
        let logger = Logger::builder()
            .minimum_level(minimum)
            .sink(memory.clone())
            .build();
        logger.log(level, "event", &[]).unwrap();
        prop_assert_eq!(memory.len(), usize::from(level >= minimum));
    }
}
