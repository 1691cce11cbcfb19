// File: src/core/orthography.rs
//! Arabic letters, short-vowel marks, and the letter/mark tokenizer every
//! other stage works on.

pub const FATHA: char = '\u{064e}';
pub const DAMMA: char = '\u{064f}';
pub const KASRA: char = '\u{0650}';
pub const SHADDA: char = '\u{0651}';
pub const SUKUN: char = '\u{0652}';
const TATWEEL: char = '\u{0640}';

pub const ALEF: char = 'ا';
pub const ALEF_WASLA: char = 'ٱ';
pub const HAMZA_ABOVE: char = 'أ';
pub const HAMZA_BELOW: char = 'إ';
pub const ALEF_MAQSURA: char = 'ى';
pub const WAW: char = 'و';
pub const YA: char = 'ي';
pub const TA: char = 'ت';
pub const NUN: char = 'ن';
pub const SIN: char = 'س';
pub const EMPHATIC_TA: char = 'ط';
pub const DAL: char = 'د';

/// Letters that trigger the ط infix in Form VIII.
pub const EMPHATICS: [char; 4] = ['ص', 'ض', 'ط', 'ظ'];
/// Letters that trigger the د infix in Form VIII.
pub const VOICED_DENTALS: [char; 3] = ['د', 'ذ', 'ز'];

/// Root separators accepted between radicals, e.g. "ك-ت-ب".
const SEPARATORS: [char; 4] = ['-', '،', ',', '/'];

/// True for harakat, tanwin, shadda, sukun and the dagger alef.
pub fn is_mark(c: char) -> bool {
    matches!(c, '\u{064b}'..='\u{0652}' | '\u{0670}')
}

/// A base letter with the marks written after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    pub ch: char,
    pub marks: Vec<char>,
}

impl Letter {
    pub fn has(&self, mark: char) -> bool {
        self.marks.contains(&mark)
    }

    /// Any short vowel (or sukun) at all.
    pub fn is_vowelled(&self) -> bool {
        self.marks.iter().any(|&m| matches!(m, FATHA | DAMMA | KASRA | SUKUN))
    }

    pub fn has_short_vowel(&self) -> bool {
        self.marks.iter().any(|&m| matches!(m, FATHA | DAMMA | KASRA))
    }

    pub fn is(&self, ch: char) -> bool {
        self.ch == ch
    }
}

/// Splits a string into base letters carrying their marks.
///
/// Tatweel, whitespace and root separators are dropped; alef wasla is read
/// as a plain alef. Marks with no preceding letter are ignored.
pub fn tokenize(input: &str) -> Vec<Letter> {
    let mut letters: Vec<Letter> = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if is_mark(c) => {
                if let Some(last) = letters.last_mut() {
                    last.marks.push(c);
                }
            }
            TATWEEL => {}
            c if c.is_whitespace() || SEPARATORS.contains(&c) => {}
            _ => {
                let ch = if c == ALEF_WASLA { ALEF } else { c };
                let mut marks = Vec::new();
                while let Some(&next) = chars.peek() {
                    if !is_mark(next) {
                        break;
                    }
                    marks.push(next);
                    chars.next();
                }
                letters.push(Letter { ch, marks });
            }
        }
    }

    letters
}

/// The bare consonant skeleton of a word: every mark removed.
pub fn skeleton(input: &str) -> Vec<char> {
    tokenize(input).into_iter().map(|l| l.ch).collect()
}

/// Removes every mark but keeps the letters, separators included.
pub fn strip_marks(input: &str) -> String {
    input.chars().filter(|&c| !is_mark(c)).collect()
}

/// Rewrites every mark cluster so shadda comes before the vowel.
///
/// Both orders are common in typed text; generated forms always use this one.
pub fn canonical_marks(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut cluster: Vec<char> = Vec::new();

    for c in input.chars() {
        if is_mark(c) {
            cluster.push(c);
            continue;
        }
        flush_cluster(&mut out, &mut cluster);
        out.push(c);
    }
    flush_cluster(&mut out, &mut cluster);
    out
}

fn flush_cluster(out: &mut String, cluster: &mut Vec<char>) {
    cluster.sort_by_key(|&m| m != SHADDA);
    out.extend(cluster.drain(..));
}

/// Long-vowel letters: the weak radicals.
pub fn is_weak(c: char) -> bool {
    matches!(c, ALEF | WAW | YA | ALEF_MAQSURA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_attaches_marks_to_letters() {
        let letters = tokenize("كَتَبَ");
        assert_eq!(letters.len(), 3);
        assert!(letters.iter().all(|l| l.has(FATHA)));
    }

    #[test]
    fn skeleton_drops_marks_and_separators() {
        assert_eq!(skeleton("ك-ت-ب"), vec!['ك', 'ت', 'ب']);
        assert_eq!(skeleton("يَكْتُبُ"), vec!['ي', 'ك', 'ت', 'ب']);
        assert_eq!(skeleton("كـتـب"), vec!['ك', 'ت', 'ب']);
    }

    #[test]
    fn alef_wasla_reads_as_alef() {
        assert_eq!(skeleton("ٱسْتَغْفَرَ")[0], ALEF);
    }

    #[test]
    fn canonical_marks_puts_shadda_first() {
        let typed = format!("ع{}{}ل", FATHA, SHADDA);
        assert_eq!(canonical_marks(&typed), format!("ع{}{}ل", SHADDA, FATHA));
    }

    #[test]
    fn strip_marks_keeps_letters() {
        assert_eq!(strip_marks("كَتَبَ"), "كتب");
    }
}
