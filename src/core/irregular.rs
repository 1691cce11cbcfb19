// File: src/core/irregular.rs
//! Weak-root overlays for Form I.
//!
//! Each class builds a complete irregular paradigm and keeps only the cells
//! that differ from the regular one, so an overlay is always sparse. Overlays
//! are merged hollow, then defective, then doubled; on a cell two classes both
//! touch, the later class wins. A class the root's letters do not have is
//! skipped: its rules would overwrite a sound radical.

use crate::core::catalog::PatternId;
use crate::core::generator::{
    assemble, generate_with_root, imperative_suffix, imperfect_affixes, perfect_suffix,
    FilledStem, StemSet,
};
use crate::core::orthography::{
    canonical_marks, is_weak, ALEF, ALEF_MAQSURA, DAMMA, FATHA, KASRA, NUN, SHADDA, SUKUN, WAW, YA,
};
use crate::core::types::{
    Cell, ConjugationForms, Gender, Irregularity, Number, Person, Root, Tense,
};
use crate::error::Result;
use tracing::{debug, warn};

/// Builds the merged Form I overlay for `root` and the given class tags.
///
/// Fails with `NonTriliteral` for a bad root and `UnknownIrregularity` for
/// any unrecognised tag. An empty tag list yields an empty overlay.
pub fn generate_irregular_conjugations<S: AsRef<str>>(
    root: &str,
    irregularities: &[S],
) -> Result<ConjugationForms> {
    let root = Root::parse(root)?;
    let classes = irregularities
        .iter()
        .map(|tag| tag.as_ref().parse::<Irregularity>())
        .collect::<Result<Vec<_>>>()?;
    Ok(overlay_for(&root, &classes))
}

/// Typed form of [`generate_irregular_conjugations`].
pub fn overlay_for(root: &Root, classes: &[Irregularity]) -> ConjugationForms {
    let regular = generate_with_root(root, PatternId::Form1);
    let mut merged = ConjugationForms::new();

    for class in applicable_classes(root, classes) {
        let full = match class {
            Irregularity::Hollow => hollow(root),
            Irregularity::Defective => defective(root),
            Irregularity::Doubled => doubled(root),
        };
        let overlay = differing_cells(&full, &regular);
        debug!(%root, %class, cells = overlay.len(), "irregular overlay");
        merged.merge_overlay(&overlay);
    }

    merged
}

/// The requested classes `root` actually belongs to, in overlay order.
/// Each mismatch is logged and dropped.
pub fn applicable_classes(root: &Root, classes: &[Irregularity]) -> Vec<Irregularity> {
    let detected = detect_irregularities(root);
    Irregularity::CANONICAL_ORDER
        .into_iter()
        .filter(|class| classes.contains(class))
        .filter(|class| {
            let fits = detected.contains(class);
            if !fits {
                warn!(%root, %class, "root letters do not fit the class, skipping overlay");
            }
            fits
        })
        .collect()
}

/// Classifies a root by its letters. The result is in overlay order.
pub fn detect_irregularities(root: &Root) -> Vec<Irregularity> {
    let [_, r2, r3] = root.letters();
    let mut found = Vec::new();
    if is_weak(r2) {
        found.push(Irregularity::Hollow);
    }
    if is_weak(r3) {
        found.push(Irregularity::Defective);
    }
    if r2 == r3 {
        found.push(Irregularity::Doubled);
    }
    found
}

fn differing_cells(full: &ConjugationForms, regular: &ConjugationForms) -> ConjugationForms {
    let mut overlay = ConjugationForms::new();
    for (cell, form) in full.cells() {
        if regular.get(cell) != Some(form) {
            overlay.insert(cell, form);
        }
    }
    overlay
}

/// قَالَ / قُلْتُ / يَقُولُ / قُلْ, and بَاعَ / بِعْتُ / يَبِيعُ / بِعْ
fn hollow(root: &Root) -> ConjugationForms {
    let [r1, r2, r3] = root.letters();
    let (long, short) = if r2 == YA { (YA, KASRA) } else { (WAW, DAMMA) };
    let closed = format!("{r1}{short}{r3}");
    let open = format!("{r1}{short}{long}{r3}");

    let stems = StemSet {
        perfect: FilledStem::new(format!("{r1}{FATHA}{ALEF}{r3}"), closed.clone()),
        imperfect: FilledStem::new(open.clone(), closed.clone()),
        imperative: FilledStem::new(open, closed),
    };
    assemble(&stems, FATHA)
}

/// مَدَّ / مَدَدْتُ / يَمُدُّ / مُدَّ
fn doubled(root: &Root) -> ConjugationForms {
    let [r1, r2, r3] = root.letters();
    let merged = format!("{r1}{DAMMA}{r2}{SHADDA}");

    let stems = StemSet {
        perfect: FilledStem::new(
            format!("{r1}{FATHA}{r2}{SHADDA}"),
            format!("{r1}{FATHA}{r2}{FATHA}{r3}"),
        ),
        imperfect: FilledStem::new(merged.clone(), format!("{r1}{SUKUN}{r2}{DAMMA}{r3}")),
        imperative: FilledStem::new(merged, format!("{ALEF}{DAMMA}{r1}{SUKUN}{r2}{DAMMA}{r3}")),
    };
    let mut forms = assemble(&stems, FATHA);

    // The bare masculine command takes the merged stem with a helping fatha.
    let command = Cell::new(Tense::Imperative, Person::Second, Number::Singular, Gender::Masculine);
    forms.insert(command, canonical_marks(&format!("{r1}{DAMMA}{r2}{SHADDA}{FATHA}")));
    forms
}

/// دَعَا / يَدْعُو / اُدْعُ, and رَمَى / يَرْمِي / اِرْمِ
fn defective(root: &Root) -> ConjugationForms {
    let [r1, r2, r3] = root.letters();
    let waw_final = matches!(r3, WAW | ALEF);
    let (weak, short) = if waw_final { (WAW, DAMMA) } else { (YA, KASRA) };
    let mut forms = ConjugationForms::new();

    for cell in Cell::paradigm(Tense::Perfect) {
        let Some(suffix) = perfect_suffix(cell) else {
            continue;
        };
        let ending = match (cell.person, cell.number, cell.gender) {
            (Person::Third, Number::Singular, Gender::Masculine) => {
                format!("{FATHA}{}", if waw_final { ALEF } else { ALEF_MAQSURA })
            }
            (Person::Third, Number::Singular | Number::Dual, Gender::Feminine) => suffix.to_string(),
            (Person::Third, Number::Plural, Gender::Masculine) => format!("{FATHA}{WAW}{SUKUN}{ALEF}"),
            (Person::Third, Number::Dual, Gender::Masculine) => format!("{FATHA}{weak}{FATHA}{ALEF}"),
            _ => format!("{FATHA}{weak}{suffix}"),
        };
        forms.insert(cell, canonical_marks(&format!("{r1}{FATHA}{r2}{ending}")));
    }

    for cell in Cell::paradigm(Tense::Imperfect) {
        let Some((prefix, suffix)) = imperfect_affixes(cell) else {
            continue;
        };
        let ending = weak_ending(suffix, weak, short);
        let form = format!("{prefix}{FATHA}{r1}{SUKUN}{r2}{ending}");
        forms.insert(cell, canonical_marks(&form));
    }

    for cell in Cell::paradigm(Tense::Imperative) {
        let Some(suffix) = imperative_suffix(cell) else {
            continue;
        };
        let ending = if suffix == SUKUN.to_string() {
            short.to_string()
        } else {
            weak_ending(suffix, weak, short)
        };
        let form = format!("{ALEF}{short}{r1}{SUKUN}{r2}{ending}");
        forms.insert(cell, canonical_marks(&form));
    }

    forms
}

/// Final-radical ending of a defective stem before an imperfect or
/// imperative suffix.
fn weak_ending(suffix: &str, weak: char, short: char) -> String {
    let fatha_alef = format!("{FATHA}{ALEF}");
    let sukun_nun = format!("{SUKUN}{NUN}{FATHA}");

    if suffix == DAMMA.to_string() {
        format!("{short}{weak}")
    } else if suffix.starts_with(&fatha_alef) {
        format!("{short}{weak}{suffix}")
    } else if suffix == sukun_nun {
        format!("{short}{weak}{NUN}{FATHA}")
    } else {
        // ُونَ / ِينَ / ُوا / ِي replace the weak radical outright.
        suffix.to_string()
    }
}
