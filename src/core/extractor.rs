// File: src/core/extractor.rs
//! Recovers the three radicals of a surface verb form.
//!
//! A shadda is written out as two letters first, so مَدَّ reads م د د. Every
//! split of that skeleton into (known prefix, stem, known suffix) is then
//! tried; a stem qualifies when it is three letters, or four letters with a
//! recognisable infix or doubling. The best split prefers the shortest
//! prefix, then no infix, then the longest suffix. A doubled final (Form IX)
//! is only taken when nothing else splits, so اِنْمَدَدَ is ان + مدد.

use crate::core::orthography::{
    self, ALEF, DAL, EMPHATICS, EMPHATIC_TA, HAMZA_ABOVE, HAMZA_BELOW, NUN, SHADDA, TA,
    VOICED_DENTALS, YA,
};
use crate::error::{ConjugationError, Result};
use std::cmp::Reverse;

/// Imperfect person markers.
const PERSON_MARKERS: [char; 4] = [YA, TA, NUN, HAMZA_ABOVE];

/// Derivational material written after a person marker (imperfect).
const IMPERFECT_AUGMENTS: [&str; 4] = ["", "ت", "ن", "ست"];

/// Derivational prefixes of perfect and imperative forms.
const PERFECT_PREFIXES: [&str; 4] = ["ا", "ان", "است", "ت"];

/// `تنن` is the written-out ـْتُنَّ.
const SUFFIXES: [&str; 15] = [
    "", "تما", "تم", "تنن", "تن", "ون", "ين", "ان", "وا", "نا", "تا", "ت", "ن", "ا", "ي",
];

/// All known prefixes, the empty one included.
fn prefixes() -> Vec<Vec<char>> {
    let mut all: Vec<Vec<char>> = vec![Vec::new()];
    for marker in PERSON_MARKERS {
        for augment in IMPERFECT_AUGMENTS {
            let mut prefix = vec![marker];
            prefix.extend(augment.chars());
            all.push(prefix);
        }
    }
    for prefix in PERFECT_PREFIXES {
        all.push(prefix.chars().collect());
    }
    all.sort();
    all.dedup();
    all
}

/// A skeleton letter and whether a short vowel is written on it.
#[derive(Debug, Clone, Copy)]
struct Slot {
    ch: char,
    vowelled: bool,
}

/// Skeleton with every shadda written out: the first copy is closed, the
/// second carries the vowel.
fn expanded_skeleton(surface_form: &str) -> Vec<Slot> {
    let mut slots = Vec::new();
    for letter in orthography::tokenize(surface_form) {
        let ch = if letter.ch == HAMZA_BELOW { HAMZA_ABOVE } else { letter.ch };
        let vowelled = letter.has_short_vowel();
        if letter.has(SHADDA) {
            slots.push(Slot { ch, vowelled: false });
        }
        slots.push(Slot { ch, vowelled });
    }
    slots
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StemShape {
    Bare,
    Infixed,
    DoubledFinal,
}

#[derive(Debug)]
struct Split {
    prefix_len: usize,
    shape: StemShape,
    suffix_len: usize,
    radicals: [char; 3],
}

impl Split {
    fn rank(&self) -> (bool, usize, bool, Reverse<usize>) {
        (
            self.shape == StemShape::DoubledFinal,
            self.prefix_len,
            self.shape != StemShape::Bare,
            Reverse(self.suffix_len),
        )
    }
}

/// Returns the three radicals of a bare root or an inflected verb form.
///
/// Fails with `NonTriliteral` when no split leaves exactly three radicals.
pub fn extract_root_letters(surface_form: &str) -> Result<[char; 3]> {
    let slots = expanded_skeleton(surface_form);
    let letters: Vec<char> = slots.iter().map(|s| s.ch).collect();

    let mut splits = Vec::new();
    for prefix in prefixes() {
        if !letters.starts_with(&prefix) {
            continue;
        }
        // A plain alef opening anything longer than a root is hamza-wasl.
        if prefix.is_empty() && letters.len() > 3 && letters.first() == Some(&ALEF) {
            continue;
        }
        for suffix in SUFFIXES {
            let suffix: Vec<char> = suffix.chars().collect();
            if prefix.len() + suffix.len() >= letters.len() || !letters.ends_with(&suffix) {
                continue;
            }
            let stem_end = letters.len() - suffix.len();
            if !joins(&slots, stem_end, &suffix) {
                continue;
            }
            let stem = &letters[prefix.len()..stem_end];
            // A bare ي ending only closes imperative stems, which never carry a
            // person marker: يرمي is ي + رمي, not يرم + ي.
            if suffix == [YA]
                && prefix.is_empty()
                && stem.len() == 3
                && PERSON_MARKERS.contains(&letters[0])
            {
                continue;
            }
            if let Some((radicals, shape)) = radicals_of(stem, !prefix.is_empty()) {
                splits.push(Split {
                    prefix_len: prefix.len(),
                    shape,
                    suffix_len: suffix.len(),
                    radicals,
                });
            }
        }
    }

    splits
        .into_iter()
        .min_by_key(Split::rank)
        .map(|s| s.radicals)
        .ok_or_else(|| ConjugationError::NonTriliteral {
            input: surface_form.to_string(),
            found: residual_len(&letters),
        })
}

/// A consonant suffix follows a closed stem (ـْتُ, ـْنَ) or is closed itself
/// (ـَتْ); two vowels across the join mean the letter is a radical, as in
/// يَظْنُنُ. ـَتَا is the exception. Unvocalized input always joins.
fn joins(slots: &[Slot], stem_end: usize, suffix: &[char]) -> bool {
    match suffix {
        [] | [TA, ALEF] => true,
        [TA | NUN, ..] => !(slots[stem_end - 1].vowelled && slots[stem_end].vowelled),
        _ => true,
    }
}

/// Three radicals of a stem and how they were read.
///
/// The Form VIII dental infix and the Form IX doubled final never appear
/// without a prefix before them.
fn radicals_of(stem: &[char], prefixed: bool) -> Option<([char; 3], StemShape)> {
    use StemShape::*;

    match *stem {
        [a, b, c] => Some(([a, b, c], Bare)),
        // Forms III and VI: long ā after the first radical.
        [a, ALEF, b, c] => Some(([a, b, c], Infixed)),
        [a, TA, b, c] if prefixed => Some(([a, b, c], Infixed)),
        [a, EMPHATIC_TA, b, c] if prefixed && EMPHATICS.contains(&a) => Some(([a, b, c], Infixed)),
        [a, DAL, b, c] if prefixed && VOICED_DENTALS.contains(&a) => Some(([a, b, c], Infixed)),
        // Forms II and V: the doubled middle radical.
        [a, b, c, d] if b == c => Some(([a, b, d], Infixed)),
        [a, b, c, d] if prefixed && c == d => Some(([a, b, c], DoubledFinal)),
        _ => None,
    }
}

/// Letters left after stripping the longest matching suffix, for the error.
fn residual_len(letters: &[char]) -> usize {
    SUFFIXES
        .iter()
        .map(|s| s.chars().collect::<Vec<_>>())
        .filter(|s| s.len() < letters.len() && letters.ends_with(s))
        .map(|s| letters.len() - s.len())
        .min()
        .unwrap_or(letters.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(surface: &str) -> String {
        extract_root_letters(surface).unwrap().iter().collect()
    }

    #[test]
    fn bare_roots_pass_through() {
        assert_eq!(root("كتب"), "كتب");
        assert_eq!(root("ك-ت-ب"), "كتب");
        assert_eq!(root("نصر"), "نصر");
    }

    #[test]
    fn strips_perfect_suffixes() {
        assert_eq!(root("كَتَبْتُمَا"), "كتب");
        assert_eq!(root("كَتَبُوا"), "كتب");
        assert_eq!(root("كَتَبْنَا"), "كتب");
        assert_eq!(root("نَصَرُوا"), "نصر");
    }

    #[test]
    fn strips_imperfect_prefixes() {
        assert_eq!(root("يَكْتُبُ"), "كتب");
        assert_eq!(root("يَكْتُبُونَ"), "كتب");
        assert_eq!(root("تَكْتُبِينَ"), "كتب");
        assert_eq!(root("يَرْمِي"), "رمي");
        assert_eq!(root("يَدْعُو"), "دعو");
    }

    #[test]
    fn strips_derivational_material() {
        assert_eq!(root("أَرْسَلَ"), "رسل");
        assert_eq!(root("كَاتَبَ"), "كتب");
        assert_eq!(root("تَكَاتَبُوا"), "كتب");
        assert_eq!(root("تَعَلَّمَ"), "علم");
        assert_eq!(root("اِنْكَسَرَ"), "كسر");
        assert_eq!(root("اِجْتَمَعَ"), "جمع");
        assert_eq!(root("اِنْتَظَرَ"), "نظر");
        assert_eq!(root("اِصْطَبَرَ"), "صبر");
        assert_eq!(root("اِتَّبَعَ"), "تبع");
        assert_eq!(root("يَتَّبِعُ"), "تبع");
        assert_eq!(root("يَنْتَظِرُ"), "نظر");
        assert_eq!(root("نَاصَرَ"), "نصر");
        assert_eq!(root("اِحْمَرَّ"), "حمر");
        assert_eq!(root("اِسْتَغْفَرَ"), "غفر");
        assert_eq!(root("يَسْتَغْفِرُونَ"), "غفر");
    }

    #[test]
    fn keeps_weak_final_radicals() {
        assert_eq!(root("يَرْمِي"), "رمي");
        assert_eq!(root("اُكْتُبِي"), "كتب");
        assert_eq!(root("أَكْرَمَ"), "كرم");
    }

    #[test]
    fn writes_out_doubled_radicals() {
        assert_eq!(root("مَدَّ"), "مدد");
        assert_eq!(root("يَمُدُّ"), "مدد");
        assert_eq!(root("يَرُدُّ"), "ردد");
        assert_eq!(root("يَمْدُدْنَ"), "مدد");
        assert_eq!(root("أَحْبَبْتُ"), "حبب");
        assert_eq!(root("مَدَّدْتُ"), "مدد");
        assert_eq!(root("اِنْمَدَدَ"), "مدد");
        assert_eq!(root("اِمْتَدَّ"), "مدد");
        assert_eq!(root("اِنْضَمَّ"), "ضمم");
        assert_eq!(root("كَتَبْتُنَّ"), "كتب");
        assert_eq!(root("اِحْمَرَرْتُ"), "حمر");
        assert_eq!(root("يَحْمَرُّونَ"), "حمر");
    }

    #[test]
    fn imperatives_of_marker_initial_roots_keep_their_first_radical() {
        assert_eq!(root("نَصِّرِي"), "نصر");
        assert_eq!(root("نَاصِرِي"), "نصر");
        assert_eq!(root("يَسِّرِي"), "يسر");
        assert_eq!(root("اُنْصُرِي"), "نصر");
    }

    #[test]
    fn vowels_across_the_join_keep_a_final_nun_or_ta() {
        assert_eq!(root("يَظْنُنُ"), "ظنن");
        assert_eq!(root("ظَانَنَ"), "ظنن");
        assert_eq!(root("يَسْكُتُ"), "سكت");
        assert_eq!(root("كَتَبَتْ"), "كتب");
        assert_eq!(root("كَتَبَتَا"), "كتب");
    }

    #[test]
    fn dental_second_radical_reads_as_an_infix() {
        assert_eq!(root("اِكْتَبَبْتُ"), "كبب");
        assert_eq!(root("اِسْتَمَعْتُ"), "سمع");
    }

    #[test]
    fn rejects_non_triliteral_residue() {
        assert!(matches!(
            extract_root_letters("مد"),
            Err(ConjugationError::NonTriliteral { found: 2, .. })
        ));
        assert!(matches!(
            extract_root_letters("دحرج"),
            Err(ConjugationError::NonTriliteral { .. })
        ));
    }
}
