// File: src/core/engine.rs
use crate::cache::{CacheStore, ConjugationCache, MemoryStore};
use crate::config::EngineConfig;
use crate::core::catalog::PatternId;
use crate::core::extractor::extract_root_letters;
use crate::core::generator::generate_with_root;
use crate::core::identifier::identify_pattern;
use crate::core::irregular::{applicable_classes, detect_irregularities, overlay_for};
use crate::core::types::{ConjugationForms, Irregularity, Root, VerbConjugation};
use crate::core::validator::validate_conjugation;
use crate::error::{CacheError, ConjugationError, Result};
use crate::persistence::{load_from_disk, save_to_disk};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What a caller wants conjugated. Either `root` or `surface_form` must be
/// set; an explicit root wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConjugationRequest {
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub surface_form: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub irregularities: Vec<String>,
}

impl ConjugationRequest {
    pub fn for_root(root: impl Into<String>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    pub fn for_surface_form(surface_form: impl Into<String>) -> Self {
        Self {
            surface_form: Some(surface_form.into()),
            ..Self::default()
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_irregularities<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.irregularities = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A resolved request and its full grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paradigm {
    pub root: Root,
    pub pattern: PatternId,
    /// Classes applied to the grid, in overlay order.
    pub irregularities: Vec<Irregularity>,
    pub conjugations: ConjugationForms,
}

pub struct ConjugationEngine<S: CacheStore = MemoryStore> {
    config: EngineConfig,
    cache: ConjugationCache<S>,
}

impl ConjugationEngine<MemoryStore> {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_store(config, MemoryStore::new())
    }

    /// Starts from the snapshot at `config.cache.snapshot_path` when one can
    /// be read, empty otherwise.
    pub fn from_file_or_new(config: EngineConfig) -> Self {
        let store = match load_from_disk(&config.cache.snapshot_path) {
            Ok(store) => {
                info!(entries = store.len(), "restored cache snapshot");
                store
            }
            Err(e) => {
                debug!(error = %e, "no usable cache snapshot, starting empty");
                MemoryStore::new()
            }
        };
        Self::with_store(config, store)
    }

    pub fn save_cache(&self) -> std::result::Result<(), CacheError> {
        save_to_disk(self.cache.store(), &self.config.cache.snapshot_path)
    }
}

impl Default for ConjugationEngine<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CacheStore> ConjugationEngine<S> {
    pub fn with_store(config: EngineConfig, store: S) -> Self {
        Self {
            config,
            cache: ConjugationCache::new(store),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &ConjugationCache<S> {
        &self.cache
    }

    /// Resolves the request and returns the regular grid with any weak-root
    /// overlays merged in.
    pub fn conjugate(&self, request: &ConjugationRequest) -> Result<Paradigm> {
        let root = resolve_root(request)?;
        let pattern = match (&request.pattern, &request.surface_form) {
            (Some(pattern), _) => pattern.parse::<PatternId>()?,
            (None, Some(surface)) => identify_pattern(surface),
            (None, None) => PatternId::Form1,
        };

        let mut requested = request
            .irregularities
            .iter()
            .map(|tag| tag.parse::<Irregularity>())
            .collect::<Result<Vec<_>>>()?;
        if requested.is_empty() && self.config.generation.detect_irregularities {
            requested = detect_irregularities(&root);
        }
        let mut irregularities = applicable_classes(&root, &requested);

        let mut conjugations = self.regular_grid(&root, pattern);
        if !irregularities.is_empty() {
            if pattern == PatternId::Form1 {
                conjugations.merge_overlay(&overlay_for(&root, &irregularities));
            } else {
                warn!(%root, %pattern, "weak-root overlays only cover form1, skipping");
                irregularities.clear();
            }
        }

        Ok(Paradigm {
            root,
            pattern,
            irregularities,
            conjugations,
        })
    }

    /// Conjugates, validates and caches a record under `verb_id`.
    pub fn build_record(
        &self,
        verb_id: &str,
        request: &ConjugationRequest,
    ) -> Result<VerbConjugation> {
        let paradigm = self.conjugate(request)?;
        let root_form = request
            .root
            .clone()
            .or_else(|| request.surface_form.clone())
            .unwrap_or_else(|| paradigm.root.to_string());

        let patterns = vec![paradigm.pattern.to_string()];
        let irregularities = paradigm.irregularities.iter().map(ToString::to_string).collect();

        // Rebuilding a known verb keeps its creation time.
        let record = match self.cache.get_conjugation(verb_id) {
            Some(previous) => VerbConjugation {
                root_form,
                conjugations: paradigm.conjugations,
                patterns,
                irregularities,
                ..previous.touched()
            },
            None => VerbConjugation::new(
                verb_id,
                root_form,
                paradigm.conjugations,
                patterns,
                irregularities,
            ),
        };

        let errors = validate_conjugation(&record);
        if !errors.is_empty() {
            return Err(ConjugationError::InvalidRecord(errors));
        }
        self.cache.cache_conjugation(&record);
        Ok(record)
    }

    pub fn get_record(&self, verb_id: &str) -> Option<VerbConjugation> {
        self.cache.get_conjugation(verb_id)
    }

    fn regular_grid(&self, root: &Root, pattern: PatternId) -> ConjugationForms {
        if !self.config.cache.enabled {
            return generate_with_root(root, pattern);
        }
        let key_root = root.to_string();
        if let Some(forms) = self.cache.get_generated_conjugations(&key_root, pattern.as_str()) {
            return forms;
        }
        let forms = generate_with_root(root, pattern);
        self.cache
            .cache_generated_conjugations(&key_root, pattern.as_str(), &forms);
        forms
    }
}

fn resolve_root(request: &ConjugationRequest) -> Result<Root> {
    match (&request.root, &request.surface_form) {
        (Some(root), _) => Root::parse(root),
        (None, Some(surface)) => extract_root_letters(surface).map(Root::new),
        (None, None) => Err(ConjugationError::MissingRoot),
    }
}
