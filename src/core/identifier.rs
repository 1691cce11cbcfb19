// File: src/core/identifier.rs
//! Classifies a surface verb form into one of the ten derived forms by its
//! orthographic features.
//!
//! Rules run in a fixed order and the first match wins. Compound features
//! come before the simple features they contain: the ist- complex contains a
//! dental after a letter (VIII), ta- plus shadda contains a medial shadda
//! (II), ta- plus ā contains the long-vowel infix (III). Anything unmarked is
//! Form I.
//!
//! Two spellings are shared between forms and resolve by rule order: a
//! dental after the first radical reads as VIII even when it is the second
//! radical of a Form IX verb (اِكْتَبَّ), and اِنْ reads as VII even when the
//! nun is the first radical of a Form IX verb (اِنْصَرَّ).

use crate::core::catalog::PatternId;
use crate::core::orthography::{
    self, Letter, ALEF, DAL, DAMMA, EMPHATICS, EMPHATIC_TA, FATHA, HAMZA_ABOVE, HAMZA_BELOW, KASRA,
    NUN, SHADDA, SIN, SUKUN, TA, VOICED_DENTALS, WAW, YA,
};

type Rule = fn(&[Letter]) -> bool;

const RULES: [(PatternId, Rule); 9] = [
    (PatternId::Form10, is_form_ten),
    (PatternId::Form8, is_form_eight),
    (PatternId::Form7, is_form_seven),
    (PatternId::Form9, is_form_nine),
    (PatternId::Form6, is_form_six),
    (PatternId::Form5, is_form_five),
    (PatternId::Form2, is_form_two),
    (PatternId::Form4, is_form_four),
    (PatternId::Form3, is_form_three),
];

/// Imperfect person markers.
const PERSON_MARKERS: [char; 4] = [YA, TA, NUN, HAMZA_ABOVE];

/// Letters that can open an inflectional suffix.
const SUFFIX_LETTERS: [char; 5] = [WAW, ALEF, TA, NUN, YA];

/// Returns the form a surface verb belongs to; never fails.
pub fn identify_pattern(surface_form: &str) -> PatternId {
    let word = orthography::tokenize(surface_form);
    RULES
        .iter()
        .find(|(_, rule)| rule(&word))
        .map(|(id, _)| *id)
        .unwrap_or(PatternId::Form1)
}

fn is_person_marker(letter: &Letter) -> bool {
    PERSON_MARKERS.contains(&letter.ch)
}

fn is_wasl(letter: &Letter) -> bool {
    letter.is(ALEF)
}

/// The word itself, and the word without its first letter when that letter
/// could be an imperfect person marker.
fn with_optional_marker(word: &[Letter]) -> impl Iterator<Item = &[Letter]> {
    let stripped = match word.first() {
        Some(first) if is_person_marker(first) => Some(&word[1..]),
        _ => None,
    };
    std::iter::once(word).chain(stripped)
}

/// A letter whose vowel rules out a derivational ta: ta- is always fatha.
fn is_open_ta(letter: &Letter) -> bool {
    letter.is(TA) && !letter.has(DAMMA) && !letter.has(KASRA) && !letter.has(SUKUN)
}

/// Sukun, or no vowel written at all.
fn is_closed(letter: &Letter) -> bool {
    letter.has(SUKUN) || !letter.is_vowelled()
}

/// Long enough for a prefix and three radicals, or four letters ending in a
/// contracted doubled radical (اِمْتَدَّ, اِنْضَمَّ).
fn has_derived_length(word: &[Letter]) -> bool {
    match word {
        [_, _, _, last] => last.has(SHADDA),
        _ => word.len() >= 5,
    }
}

/// ت, or its assimilated ط/د after the matching first radical.
fn is_dental_infix(first: &Letter, infix: &Letter) -> bool {
    infix.is(TA)
        || (infix.is(EMPHATIC_TA) && EMPHATICS.contains(&first.ch))
        || (infix.is(DAL) && VOICED_DENTALS.contains(&first.ch))
}

/// اِسْتَفْعَلَ / يَسْتَفْعِلُ, and the contracted اِسْتَمَرَّ
///
/// The first radical after ist- is closed; Form VIII of a س-initial root
/// (اِسْتَمَعَ) vowels it instead.
fn is_form_ten(word: &[Letter]) -> bool {
    let [first, sin, ta, r1, r2, ..] = word else {
        return false;
    };
    if !(sin.is(SIN) && is_closed(sin) && is_open_ta(ta)) {
        return false;
    }
    if r2.has(SHADDA) {
        return is_wasl(first) || is_person_marker(first);
    }
    if !is_closed(r1) || word.len() < 6 {
        return false;
    }
    // After a person marker the second radical takes the imperfect kasra,
    // which keeps Form IV أَسْتَرْتُمَا out.
    is_wasl(first) || (is_person_marker(first) && (r2.has(KASRA) || !r2.is_vowelled()))
}

/// A dental first radical written with shadda: it has swallowed the infix.
fn is_geminated_dental(r1: &Letter) -> bool {
    r1.has(SHADDA) && [TA, EMPHATIC_TA, DAL].contains(&r1.ch)
}

/// اِفْتَعَلَ / يَفْتَعِلُ, and the merged اِتَّبَعَ / يَتَّبِعُ
fn is_form_eight(word: &[Letter]) -> bool {
    match word {
        [first, r1, _, _, ..] if is_wasl(first) && is_geminated_dental(r1) => true,
        [marker, r1, r2, _, ..]
            if is_person_marker(marker)
                && is_geminated_dental(r1)
                && r1.has(FATHA)
                && r2.has(KASRA) =>
        {
            true
        }
        [first, r1, infix, _, ..] if is_wasl(first) && has_derived_length(word) => {
            is_dental_infix(r1, infix)
                && !infix.has(DAMMA)
                && !infix.has(KASRA)
                && !infix.has(SUKUN)
        }
        [marker, r1, infix, r2, ..] if is_person_marker(marker) && has_derived_length(word) => {
            r1.has(SUKUN)
                && is_dental_infix(r1, infix)
                && infix.has(FATHA)
                && (r2.has(KASRA) || r2.has(SHADDA))
        }
        _ => false,
    }
}

/// The doubled last radical written out: اِحْمَرَرْتُ, يَحْمَرِرْنَ.
fn is_unassimilated_final(word: &[Letter], r3: &Letter) -> bool {
    word.get(4).is_some_and(|next| next.ch == r3.ch && is_closed(next))
}

/// اِفْعَلَّ / اِفْعَلَلْتُ / يَفْعَلُّ
fn is_form_nine(word: &[Letter]) -> bool {
    match word {
        [first, _, _, r3, ..] if is_wasl(first) => {
            r3.has(SHADDA) || is_unassimilated_final(word, r3)
        }
        [marker, r1, r2, r3, ..] if is_person_marker(marker) => {
            r1.has(SUKUN)
                && (r3.has(SHADDA) || (is_unassimilated_final(word, r3) && r2.has(FATHA)))
        }
        _ => false,
    }
}

/// اِنْفَعَلَ / يَنْفَعِلُ
///
/// اُنْ with damma is the Form I imperative of a ن-initial root (اُنْصُرِي).
fn is_form_seven(word: &[Letter]) -> bool {
    if !has_derived_length(word) {
        return false;
    }
    match word {
        [first, n, ..] if is_wasl(first) => n.is(NUN) && is_closed(n) && !first.has(DAMMA),
        [marker, n, r1, r2, ..] if is_person_marker(marker) => {
            n.is(NUN) && n.has(SUKUN) && r1.has(FATHA) && (r2.has(KASRA) || r2.has(SHADDA))
        }
        _ => false,
    }
}

/// تَفَاعَلَ / يَتَفَاعَلُ
fn is_form_six(word: &[Letter]) -> bool {
    with_optional_marker(word).any(|w| match w {
        [ta, _, alef, _, ..] => is_open_ta(ta) && alef.is(ALEF),
        _ => false,
    })
}

/// تَفَعَّلَ / يَتَفَعَّلُ
fn is_form_five(word: &[Letter]) -> bool {
    with_optional_marker(word).any(|w| match w {
        [ta, _, r2, _, ..] => is_open_ta(ta) && r2.has(SHADDA),
        _ => false,
    })
}

/// فَعَّلَ / يُفَعِّلُ
fn is_form_two(word: &[Letter]) -> bool {
    with_optional_marker(word).any(|w| match w {
        [_, r2, _, ..] => r2.has(SHADDA),
        _ => false,
    })
}

/// أَفْعَلَ / يُفْعِلُ
fn is_form_four(word: &[Letter]) -> bool {
    match word {
        [hamza, r1, _, r3, rest @ ..] if hamza.is(HAMZA_ABOVE) || hamza.is(HAMZA_BELOW) => {
            // أُرْسِلُ: the Form IV first-person imperfect marker takes damma.
            if hamza.has(DAMMA) {
                return r1.has(SUKUN);
            }
            // أَكْتُبُ (Form I, first person) also opens with hamza; its bare
            // three radicals end in the indicative damma.
            let first_person_imperfect = rest.is_empty() && r3.has(DAMMA);
            is_closed(r1) && !r1.is(ALEF) && !first_person_imperfect
        }
        [marker, r1, _, _, ..] if is_person_marker(marker) => marker.has(DAMMA) && r1.has(SUKUN),
        _ => false,
    }
}

/// فَاعَلَ / يُفَاعِلُ
fn is_form_three(word: &[Letter]) -> bool {
    with_optional_marker(word).any(|w| match w {
        // قَالُوا: a long vowel followed by a suffix letter is a hollow Form I.
        [_, alef, _, r3, ..] => {
            alef.is(ALEF) && (!SUFFIX_LETTERS.contains(&r3.ch) || r3.has_short_vowel())
        }
        _ => false,
    })
}
