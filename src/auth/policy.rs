//! Server-side password validation policy
//!
//! An explicit list of named predicates, checked at registration. Client
//! code may mirror these for friendlier UX, but the server check is the
//! one that counts.

use crate::types::{FlagstandError, Result};

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// A named validation predicate
pub struct PasswordRule {
    pub name: &'static str,
    check: Predicate,
}

impl PasswordRule {
    pub fn new(name: &'static str, check: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name,
            check: Box::new(check),
        }
    }
}

/// Ordered list of rules a password must satisfy
pub struct PasswordPolicy {
    rules: Vec<PasswordRule>,
}

impl PasswordPolicy {
    /// Build the default policy with a configurable minimum length
    pub fn with_min_length(min_length: usize) -> Self {
        Self {
            rules: vec![
                PasswordRule::new("min_length", move |p| p.chars().count() >= min_length),
                PasswordRule::new("no_whitespace", |p| !p.chars().any(char::is_whitespace)),
            ],
        }
    }

    /// Check every rule, failing with the first violated rule's name
    pub fn validate(&self, password: &str) -> Result<()> {
        for rule in &self.rules {
            if !(rule.check)(password) {
                return Err(FlagstandError::WeakPassword(rule.name));
            }
        }
        Ok(())
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }
}
