// File: src/core/generator.rs
//! Regular paradigm generation: prefix + filled stem + suffix for every cell.

use crate::core::catalog::{PatternId, Stem};
use crate::core::orthography::{
    self, DAL, EMPHATICS, EMPHATIC_TA, HAMZA_ABOVE, NUN, SHADDA, SUKUN, TA, VOICED_DENTALS, YA,
};
use crate::core::types::{Cell, ConjugationForms, Gender, Number, Person, Root, Tense};
use crate::error::Result;
use tracing::debug;

/// A stem with the radicals substituted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FilledStem {
    pub vocalic: String,
    pub consonantal: String,
}

impl FilledStem {
    pub fn new(vocalic: impl Into<String>, consonantal: impl Into<String>) -> Self {
        Self {
            vocalic: vocalic.into(),
            consonantal: consonantal.into(),
        }
    }

    /// Sukun-initial suffixes close the last radical and take the consonantal
    /// stem; everything else takes the vocalic one.
    fn attach(&self, suffix: &str) -> String {
        let stem = if suffix.starts_with(SUKUN) {
            &self.consonantal
        } else {
            &self.vocalic
        };
        format!("{stem}{suffix}")
    }
}

/// Filled stems for the three tenses.
#[derive(Debug, Clone)]
pub(crate) struct StemSet {
    pub perfect: FilledStem,
    pub imperfect: FilledStem,
    pub imperative: FilledStem,
}

/// Generates the regular paradigm of `pattern_id` for `root`.
///
/// Fails with `NonTriliteral` unless the root has exactly three letters and
/// with `PatternNotFound` unless the pattern is form1..form10.
pub fn generate_conjugations(root: &str, pattern_id: &str) -> Result<ConjugationForms> {
    let root = Root::parse(root)?;
    let pattern = pattern_id.parse::<PatternId>()?;
    Ok(generate_with_root(&root, pattern))
}

/// Typed, infallible form of [`generate_conjugations`].
pub fn generate_with_root(root: &Root, pattern: PatternId) -> ConjugationForms {
    let template = &pattern.info().template;
    let infix = if template.assimilating_infix {
        infix_for(root.first())
    } else {
        TA
    };

    let merge = template.assimilating_infix && infix == root.first();

    let stems = StemSet {
        perfect: fill(&template.perfect, root, infix, merge),
        imperfect: fill(&template.imperfect, root, infix, merge),
        imperative: fill(&template.imperative, root, infix, merge),
    };
    debug!(%root, %pattern, "generating regular paradigm");
    assemble(&stems, template.prefix_vowel)
}

/// Form VIII infix after the first radical.
fn infix_for(first: char) -> char {
    if EMPHATICS.contains(&first) {
        EMPHATIC_TA
    } else if VOICED_DENTALS.contains(&first) {
        DAL
    } else {
        TA
    }
}

/// `merge`: the infix equals the first radical and fuses with it under a
/// shadda (اِتَّبَعَ, اِطَّلَعَ, اِدَّرَسَ).
fn fill(stem: &Stem, root: &Root, infix: char, merge: bool) -> FilledStem {
    let fused = |filled: String| {
        if merge {
            let r1 = root.first();
            filled.replace(&format!("{r1}{SUKUN}{infix}"), &format!("{r1}{SHADDA}"))
        } else {
            filled
        }
    };
    FilledStem::new(
        fused(substitute(stem.vocalic, root, infix)),
        fused(substitute(stem.consonantal, root, infix)),
    )
}

/// Replaces the ف ع ل placeholders with the radicals, in order.
fn substitute(template: &str, root: &Root, infix: char) -> String {
    let [r1, r2, r3] = root.letters();
    template
        .chars()
        .map(|c| match c {
            'ف' => r1,
            'ع' => r2,
            'ل' => r3,
            TA => infix,
            other => other,
        })
        .collect()
}

/// Builds every valid cell from per-tense stems.
pub(crate) fn assemble(stems: &StemSet, prefix_vowel: char) -> ConjugationForms {
    let mut forms = ConjugationForms::new();

    for cell in Cell::paradigm(Tense::Perfect) {
        if let Some(suffix) = perfect_suffix(cell) {
            forms.insert(cell, orthography::canonical_marks(&stems.perfect.attach(suffix)));
        }
    }

    for cell in Cell::paradigm(Tense::Imperfect) {
        if let Some((prefix, suffix)) = imperfect_affixes(cell) {
            let form = format!("{prefix}{prefix_vowel}{}", stems.imperfect.attach(suffix));
            forms.insert(cell, orthography::canonical_marks(&form));
        }
    }

    for cell in Cell::paradigm(Tense::Imperative) {
        if let Some(suffix) = imperative_suffix(cell) {
            forms.insert(cell, orthography::canonical_marks(&stems.imperative.attach(suffix)));
        }
    }

    forms
}

/// Subject suffix of the perfect.
pub(crate) fn perfect_suffix(cell: Cell) -> Option<&'static str> {
    use Gender::*;
    use Number::*;
    use Person::*;

    let suffix = match (cell.person, cell.number, cell.gender) {
        (Third, Singular, Masculine) => "َ",
        (Third, Singular, Feminine) => "َتْ",
        (Third, Dual, Masculine) => "َا",
        (Third, Dual, Feminine) => "َتَا",
        (Third, Plural, Masculine) => "ُوا",
        (Third, Plural, Feminine) => "ْنَ",
        (Second, Singular, Masculine) => "ْتَ",
        (Second, Singular, Feminine) => "ْتِ",
        (Second, Dual, Common) => "ْتُمَا",
        (Second, Plural, Masculine) => "ْتُمْ",
        (Second, Plural, Feminine) => "ْتُنَّ",
        (First, Singular, Common) => "ْتُ",
        (First, Plural, Common) => "ْنَا",
        _ => return None,
    };
    Some(suffix)
}

/// Person prefix letter and indicative suffix of the imperfect.
pub(crate) fn imperfect_affixes(cell: Cell) -> Option<(char, &'static str)> {
    use Gender::*;
    use Number::*;
    use Person::*;

    let affixes = match (cell.person, cell.number, cell.gender) {
        (Third, Singular, Masculine) => (YA, "ُ"),
        (Third, Singular, Feminine) => (TA, "ُ"),
        (Third, Dual, Masculine) => (YA, "َانِ"),
        (Third, Dual, Feminine) => (TA, "َانِ"),
        (Third, Plural, Masculine) => (YA, "ُونَ"),
        (Third, Plural, Feminine) => (YA, "ْنَ"),
        (Second, Singular, Masculine) => (TA, "ُ"),
        (Second, Singular, Feminine) => (TA, "ِينَ"),
        (Second, Dual, Common) => (TA, "َانِ"),
        (Second, Plural, Masculine) => (TA, "ُونَ"),
        (Second, Plural, Feminine) => (TA, "ْنَ"),
        (First, Singular, Common) => (HAMZA_ABOVE, "ُ"),
        (First, Plural, Common) => (NUN, "ُ"),
        _ => return None,
    };
    Some(affixes)
}

/// Suffix of the imperative (jussive endings, second person only).
pub(crate) fn imperative_suffix(cell: Cell) -> Option<&'static str> {
    use Gender::*;
    use Number::*;
    use Person::*;

    let suffix = match (cell.person, cell.number, cell.gender) {
        (Second, Singular, Masculine) => "ْ",
        (Second, Singular, Feminine) => "ِي",
        (Second, Dual, Common) => "َا",
        (Second, Plural, Masculine) => "ُوا",
        (Second, Plural, Feminine) => "ْنَ",
        _ => return None,
    };
    Some(suffix)
}
