// src/lib.rs
//! Conjugation engine for Arabic triliteral verbs across the ten derived
//! forms.

pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;

pub use crate::cache::{CacheStore, ConjugationCache, MemoryStore};
pub use crate::config::EngineConfig;
pub use crate::core::catalog::{all_patterns, get_pattern_info, PatternId, PatternInfo};
pub use crate::core::engine::{ConjugationEngine, ConjugationRequest, Paradigm};
pub use crate::core::extractor::extract_root_letters;
pub use crate::core::generator::generate_conjugations;
pub use crate::core::identifier::identify_pattern;
pub use crate::core::irregular::{detect_irregularities, generate_irregular_conjugations};
pub use crate::core::types::{
    Cell, ConjugationForms, Gender, Irregularity, Number, Person, Root, Tense, VerbConjugation,
};
pub use crate::core::validator::validate_conjugation;
pub use crate::error::{CacheError, ConfigError, ConjugationError, Result};
