//! Cache of parsed message templates
//!
//! Templates are keyed by their exact text. Each distinct text is parsed
//! once and the resulting `Arc<MessageTemplate>` is handed out to every
//! subsequent caller, so two lookups of the same text are pointer-equal.
//!
//! The cache is unbounded unless a capacity limit is configured. With a
//! limit, templates seen after the cache fills are parsed on every call and
//! not retained.

use super::message_template::MessageTemplate;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct MessageTemplateRepository {
    templates: RwLock<HashMap<String, Arc<MessageTemplate>>>,
    capacity_limit: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MessageTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain at most `limit` templates
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            capacity_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Return the cached template for `text`, parsing it on first use.
    pub fn parse_or_get(&self, text: &str) -> Arc<MessageTemplate> {
        if let Some(template) = self.templates.read().get(text) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(template);
        }

        // Parse outside the lock; a concurrent parse of the same text is
        // harmless because only the first insert is kept.
        let parsed = Arc::new(MessageTemplate::parse(text));

        let mut templates = self.templates.write();
        if let Some(existing) = templates.get(text) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(existing);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        if self.capacity_limit.is_some_and(|limit| templates.len() >= limit) {
            return parsed;
        }
        templates.insert(text.to_string(), Arc::clone(&parsed));
        parsed
    }

    /// Number of cached templates
    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_returns_same_instance() {
        let repo = MessageTemplateRepository::new();
        let a = repo.parse_or_get("Hello {Name}");
        let b = repo.parse_or_get("Hello {Name}");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.hits(), 1);
        assert_eq!(repo.misses(), 1);
    }

    #[test]
    fn test_key_is_exact_text() {
        let repo = MessageTemplateRepository::new();
        let a = repo.parse_or_get("{Name}");
        let b = repo.parse_or_get("{name}");
        let c = repo.parse_or_get("{Name} ");
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_capacity_limit_stops_caching() {
        let repo = MessageTemplateRepository::with_capacity_limit(1);
        let first = repo.parse_or_get("first");
        let second_a = repo.parse_or_get("second");
        let second_b = repo.parse_or_get("second");

        assert!(Arc::ptr_eq(&first, &repo.parse_or_get("first")));
        assert!(!Arc::ptr_eq(&second_a, &second_b));
        assert_eq!(second_a, second_b);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_concurrent_first_insert_converges() {
        let repo = Arc::new(MessageTemplateRepository::new());
        let results: Vec<Arc<MessageTemplate>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let repo = Arc::clone(&repo);
                    scope.spawn(move || repo.parse_or_get("Race {Winner}"))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(repo.len(), 1);
        let cached = repo.parse_or_get("Race {Winner}");
        for template in &results {
            assert!(Arc::ptr_eq(template, &cached));
        }
        // only the call that inserted counts as a miss
        assert_eq!(repo.misses(), 1);
        assert_eq!(repo.hits(), 8);
    }
}
