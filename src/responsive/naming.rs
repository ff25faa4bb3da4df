//! Deterministic class names for generated rules
//!
//! Each bucket owns a counter starting at 1. In production the name is the bucket
//! followed by the counter (`m1`, `m2`, ...); in development it is a readable stem
//! followed by the counter. Identical input therefore yields identical class names
//! on every run.

use std::collections::HashMap;

/// Bucket for ad-hoc mobile override rules
pub const MOBILE_BUCKET: &str = "m";

#[derive(Debug, Clone, Default)]
pub struct ClassNamer {
    obfuscate: bool,
    counters: HashMap<String, usize>,
}

impl ClassNamer {
    pub fn new(obfuscate: bool) -> Self {
        Self {
            obfuscate,
            counters: HashMap::new(),
        }
    }

    /// Produce the next class name in `bucket`.
    pub fn next(&mut self, bucket: &str, stem: &str) -> String {
        let counter = self.counters.entry(bucket.to_string()).or_insert(0);
        *counter += 1;
        if self.obfuscate {
            format!("{}{}", bucket, counter)
        } else {
            format!("{}-{}", stem, counter)
        }
    }
}
