// File: src/core/catalog.rs
//! The ten classical derived forms (awzan), with display data and the stem
//! templates the generator fills.
//!
//! Templates use the traditional ف ع ل placeholders for the first, second and
//! third radical. Every other letter in a template is literal.

use crate::core::orthography::{DAMMA, FATHA};
use crate::error::ConjugationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternId {
    Form1,
    Form2,
    Form3,
    Form4,
    Form5,
    Form6,
    Form7,
    Form8,
    Form9,
    Form10,
}

impl PatternId {
    pub const ALL: [PatternId; 10] = [
        PatternId::Form1,
        PatternId::Form2,
        PatternId::Form3,
        PatternId::Form4,
        PatternId::Form5,
        PatternId::Form6,
        PatternId::Form7,
        PatternId::Form8,
        PatternId::Form9,
        PatternId::Form10,
    ];

    /// 1 for Form I through 10 for Form X.
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternId::Form1 => "form1",
            PatternId::Form2 => "form2",
            PatternId::Form3 => "form3",
            PatternId::Form4 => "form4",
            PatternId::Form5 => "form5",
            PatternId::Form6 => "form6",
            PatternId::Form7 => "form7",
            PatternId::Form8 => "form8",
            PatternId::Form9 => "form9",
            PatternId::Form10 => "form10",
        }
    }

    pub fn info(&self) -> &'static PatternInfo {
        &CATALOG[self.number() - 1]
    }
}

impl FromStr for PatternId {
    type Err = ConjugationError;

    /// Accepts "form1".."form10" in any ASCII case, or the bare number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let digits = lowered.strip_prefix("form").unwrap_or(&lowered).trim();
        digits
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| PatternId::ALL.get(idx).copied())
            .ok_or_else(|| ConjugationError::PatternNotFound(s.to_string()))
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stem used before vowel-initial suffixes and the one used before
/// sukun-initial suffixes. Only doubled-final stems tell them apart.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stem {
    pub vocalic: &'static str,
    pub consonantal: &'static str,
}

const fn stem(both: &'static str) -> Stem {
    Stem { vocalic: both, consonantal: both }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FormTemplate {
    pub perfect: Stem,
    pub imperfect: Stem,
    pub imperative: Stem,
    /// Vowel on the imperfect person prefix.
    pub prefix_vowel: char,
    /// Form VIII: the ت infix assimilates to an emphatic or voiced first radical.
    pub assimilating_infix: bool,
}

/// A catalog entry. Only the display fields are part of the wire shape.
#[derive(Debug, Serialize)]
pub struct PatternInfo {
    #[serde(skip)]
    pub id: PatternId,
    pub name: &'static str,
    /// Third person masculine singular perfect of ف-ع-ل.
    pub pattern: &'static str,
    pub description: &'static str,
    pub examples: &'static [&'static str],
    #[serde(skip)]
    pub(crate) template: FormTemplate,
}

pub static CATALOG: [PatternInfo; 10] = [
    PatternInfo {
        id: PatternId::Form1,
        name: "Form I",
        pattern: "فَعَلَ",
        description: "Base form carrying the root's core meaning.",
        examples: &["كَتَبَ", "ذَهَبَ", "جَلَسَ"],
        template: FormTemplate {
            perfect: stem("فَعَل"),
            imperfect: stem("فْعُل"),
            imperative: stem("اُفْعُل"),
            prefix_vowel: FATHA,
            assimilating_infix: false,
        },
    },
    PatternInfo {
        id: PatternId::Form2,
        name: "Form II",
        pattern: "فَعَّلَ",
        description: "Doubled middle radical: intensive or causative.",
        examples: &["عَلَّمَ", "دَرَّسَ", "كَسَّرَ"],
        template: FormTemplate {
            perfect: stem("فَعَّل"),
            imperfect: stem("فَعِّل"),
            imperative: stem("فَعِّل"),
            prefix_vowel: DAMMA,
            assimilating_infix: false,
        },
    },
    PatternInfo {
        id: PatternId::Form3,
        name: "Form III",
        pattern: "فَاعَلَ",
        description: "Long vowel after the first radical: doing an action with or to someone.",
        examples: &["كَاتَبَ", "سَاعَدَ", "قَاتَلَ"],
        template: FormTemplate {
            perfect: stem("فَاعَل"),
            imperfect: stem("فَاعِل"),
            imperative: stem("فَاعِل"),
            prefix_vowel: DAMMA,
            assimilating_infix: false,
        },
    },
    PatternInfo {
        id: PatternId::Form4,
        name: "Form IV",
        pattern: "أَفْعَلَ",
        description: "Hamza prefix: causative.",
        examples: &["أَرْسَلَ", "أَكْرَمَ", "أَخْرَجَ"],
        template: FormTemplate {
            perfect: stem("أَفْعَل"),
            imperfect: stem("فْعِل"),
            imperative: stem("أَفْعِل"),
            prefix_vowel: DAMMA,
            assimilating_infix: false,
        },
    },
    PatternInfo {
        id: PatternId::Form5,
        name: "Form V",
        pattern: "تَفَعَّلَ",
        description: "Ta prefix with doubled middle radical: reflexive of Form II.",
        examples: &["تَعَلَّمَ", "تَكَلَّمَ", "تَذَكَّرَ"],
        template: FormTemplate {
            perfect: stem("تَفَعَّل"),
            imperfect: stem("تَفَعَّل"),
            imperative: stem("تَفَعَّل"),
            prefix_vowel: FATHA,
            assimilating_infix: false,
        },
    },
    PatternInfo {
        id: PatternId::Form6,
        name: "Form VI",
        pattern: "تَفَاعَلَ",
        description: "Ta prefix with long vowel: reciprocal of Form III.",
        examples: &["تَكَاتَبَ", "تَعَاوَنَ", "تَبَادَلَ"],
        template: FormTemplate {
            perfect: stem("تَفَاعَل"),
            imperfect: stem("تَفَاعَل"),
            imperative: stem("تَفَاعَل"),
            prefix_vowel: FATHA,
            assimilating_infix: false,
        },
    },
    PatternInfo {
        id: PatternId::Form7,
        name: "Form VII",
        pattern: "اِنْفَعَلَ",
        description: "In prefix: passive or resultative.",
        examples: &["اِنْكَسَرَ", "اِنْقَطَعَ", "اِنْصَرَفَ"],
        template: FormTemplate {
            perfect: stem("اِنْفَعَل"),
            imperfect: stem("نْفَعِل"),
            imperative: stem("اِنْفَعِل"),
            prefix_vowel: FATHA,
            assimilating_infix: false,
        },
    },
    PatternInfo {
        id: PatternId::Form8,
        name: "Form VIII",
        pattern: "اِفْتَعَلَ",
        description: "Ta infixed after the first radical: reflexive or middle voice.",
        examples: &["اِجْتَمَعَ", "اِشْتَغَلَ", "اِنْتَظَرَ"],
        template: FormTemplate {
            perfect: stem("اِفْتَعَل"),
            imperfect: stem("فْتَعِل"),
            imperative: stem("اِفْتَعِل"),
            prefix_vowel: FATHA,
            assimilating_infix: true,
        },
    },
    PatternInfo {
        id: PatternId::Form9,
        name: "Form IX",
        pattern: "اِفْعَلَّ",
        description: "Doubled final radical: colours and physical defects.",
        examples: &["اِحْمَرَّ", "اِخْضَرَّ", "اِصْفَرَّ"],
        template: FormTemplate {
            perfect: Stem { vocalic: "اِفْعَلّ", consonantal: "اِفْعَلَل" },
            imperfect: Stem { vocalic: "فْعَلّ", consonantal: "فْعَلِل" },
            imperative: Stem { vocalic: "اِفْعَلّ", consonantal: "اِفْعَلِل" },
            prefix_vowel: FATHA,
            assimilating_infix: false,
        },
    },
    PatternInfo {
        id: PatternId::Form10,
        name: "Form X",
        pattern: "اِسْتَفْعَلَ",
        description: "Ista prefix: requesting or considering something to have a quality.",
        examples: &["اِسْتَغْفَرَ", "اِسْتَخْدَمَ", "اِسْتَعْمَلَ"],
        template: FormTemplate {
            perfect: stem("اِسْتَفْعَل"),
            imperfect: stem("سْتَفْعِل"),
            imperative: stem("اِسْتَفْعِل"),
            prefix_vowel: FATHA,
            assimilating_infix: false,
        },
    },
];

/// Catalog lookup by identifier. Unknown identifiers are a normal `None`.
pub fn get_pattern_info(pattern_id: &str) -> Option<&'static PatternInfo> {
    pattern_id.parse::<PatternId>().ok().map(|id| id.info())
}

/// All ten entries in form order.
pub fn all_patterns() -> impl Iterator<Item = &'static PatternInfo> {
    CATALOG.iter()
}
