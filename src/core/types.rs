// src/core/types.rs
use crate::core::orthography;
use crate::error::{ConjugationError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A triliteral root: exactly three radicals, in order. Serialises as the
/// bare three-letter string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Root([char; 3]);

impl Root {
    pub fn new(letters: [char; 3]) -> Self {
        Self(letters)
    }

    /// Parses "كتب", "ك-ت-ب" or a vocalized "كَتَبَ". Any count other than
    /// three letters is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let letters = orthography::skeleton(input);
        match <[char; 3]>::try_from(letters.as_slice()) {
            Ok(radicals) => Ok(Self(radicals)),
            Err(_) => Err(ConjugationError::NonTriliteral {
                input: input.to_string(),
                found: letters.len(),
            }),
        }
    }

    pub fn letters(&self) -> [char; 3] {
        self.0
    }

    pub fn first(&self) -> char {
        self.0[0]
    }

    pub fn second(&self) -> char {
        self.0[1]
    }

    pub fn third(&self) -> char {
        self.0[2]
    }
}

impl FromStr for Root {
    type Err = ConjugationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Root> for String {
    fn from(root: Root) -> Self {
        root.to_string()
    }
}

impl TryFrom<String> for Root {
    type Error = ConjugationError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Perfect,
    Imperfect,
    Imperative,
}

impl Tense {
    pub const ALL: [Tense; 3] = [Tense::Perfect, Tense::Imperfect, Tense::Imperative];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Person {
    First,
    Second,
    Third,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    Singular,
    Dual,
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masculine,
    Feminine,
    Common,
}

/// One coordinate of the paradigm grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub tense: Tense,
    pub person: Person,
    pub number: Number,
    pub gender: Gender,
}

/// Person/number/gender slots conjugated in the perfect and imperfect.
/// Arabic has no separate first-person dual; it shares the plural.
static FINITE_SLOTS: [(Person, Number, Gender); 13] = [
    (Person::Third, Number::Singular, Gender::Masculine),
    (Person::Third, Number::Singular, Gender::Feminine),
    (Person::Third, Number::Dual, Gender::Masculine),
    (Person::Third, Number::Dual, Gender::Feminine),
    (Person::Third, Number::Plural, Gender::Masculine),
    (Person::Third, Number::Plural, Gender::Feminine),
    (Person::Second, Number::Singular, Gender::Masculine),
    (Person::Second, Number::Singular, Gender::Feminine),
    (Person::Second, Number::Dual, Gender::Common),
    (Person::Second, Number::Plural, Gender::Masculine),
    (Person::Second, Number::Plural, Gender::Feminine),
    (Person::First, Number::Singular, Gender::Common),
    (Person::First, Number::Plural, Gender::Common),
];

impl Cell {
    pub const fn new(tense: Tense, person: Person, number: Number, gender: Gender) -> Self {
        Self { tense, person, number, gender }
    }

    /// Every linguistically valid cell of one tense, in display order.
    /// The imperative only exists in the second person.
    pub fn paradigm(tense: Tense) -> impl Iterator<Item = Cell> {
        FINITE_SLOTS
            .iter()
            .filter(move |(person, _, _)| tense != Tense::Imperative || *person == Person::Second)
            .map(move |&(person, number, gender)| Cell::new(tense, person, number, gender))
    }

    /// Every valid cell across all three tenses.
    pub fn all() -> impl Iterator<Item = Cell> {
        Tense::ALL.into_iter().flat_map(Cell::paradigm)
    }

    pub fn is_valid(&self) -> bool {
        Cell::paradigm(self.tense).any(|c| c == *self)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}/{:?}/{:?}/{:?}",
            self.tense, self.person, self.number, self.gender
        )
    }
}

type GenderMap = BTreeMap<Gender, String>;
type NumberMap = BTreeMap<Number, GenderMap>;
type PersonMap = BTreeMap<Person, NumberMap>;

/// Sparse tense → person → number → gender → surface form grid.
///
/// A missing cell means "not applicable"; an empty string means generation
/// produced nothing for a cell that should exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConjugationForms(BTreeMap<Tense, PersonMap>);

impl ConjugationForms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: Cell) -> Option<&str> {
        self.0
            .get(&cell.tense)?
            .get(&cell.person)?
            .get(&cell.number)?
            .get(&cell.gender)
            .map(String::as_str)
    }

    pub fn insert(&mut self, cell: Cell, form: impl Into<String>) {
        self.0
            .entry(cell.tense)
            .or_default()
            .entry(cell.person)
            .or_default()
            .entry(cell.number)
            .or_default()
            .insert(cell.gender, form.into());
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    pub fn has_tense(&self, tense: Tense) -> bool {
        self.0.get(&tense).is_some_and(|persons| !persons.is_empty())
    }

    pub fn tenses(&self) -> impl Iterator<Item = Tense> + '_ {
        self.0.keys().copied()
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every populated cell with its form, in key order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, &str)> + '_ {
        self.0.iter().flat_map(|(&tense, persons)| {
            persons.iter().flat_map(move |(&person, numbers)| {
                numbers.iter().flat_map(move |(&number, genders)| {
                    genders.iter().map(move |(&gender, form)| {
                        (Cell::new(tense, person, number, gender), form.as_str())
                    })
                })
            })
        })
    }

    /// Overlays `overlay` onto `self`: touched cells are replaced, the rest
    /// are inherited unchanged.
    pub fn merge_overlay(&mut self, overlay: &ConjugationForms) {
        for (cell, form) in overlay.cells() {
            self.insert(cell, form);
        }
    }
}

/// Weak-root classes with their own phonology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Irregularity {
    /// Medial radical is و or ي.
    Hollow,
    /// Final radical is و or ي.
    Defective,
    /// Second and third radicals are identical.
    Doubled,
}

impl Irregularity {
    /// Overlay order: later classes win on shared cells.
    pub const CANONICAL_ORDER: [Irregularity; 3] =
        [Irregularity::Hollow, Irregularity::Defective, Irregularity::Doubled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Irregularity::Hollow => "hollow",
            Irregularity::Defective => "defective",
            Irregularity::Doubled => "doubled",
        }
    }
}

impl FromStr for Irregularity {
    type Err = ConjugationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hollow" => Ok(Irregularity::Hollow),
            "defective" => Ok(Irregularity::Defective),
            "doubled" | "geminate" => Ok(Irregularity::Doubled),
            _ => Err(ConjugationError::UnknownIrregularity(s.to_string())),
        }
    }
}

impl fmt::Display for Irregularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted conjugation record, as stored by the system of record.
///
/// Patterns and irregularities stay strings: records come back from storage
/// and must be validated, not trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbConjugation {
    pub verb_id: String,
    pub root_form: String,
    #[serde(default)]
    pub conjugations: ConjugationForms,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub irregularities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VerbConjugation {
    pub fn new(
        verb_id: impl Into<String>,
        root_form: impl Into<String>,
        conjugations: ConjugationForms,
        patterns: Vec<String>,
        irregularities: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            verb_id: verb_id.into(),
            root_form: root_form.into(),
            conjugations,
            patterns,
            irregularities,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy stamped with a fresh `updated_at`.
    pub fn touched(&self) -> Self {
        Self {
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_parse_accepts_separated_and_vocalized_input() {
        let bare = Root::parse("كتب").unwrap();
        assert_eq!(Root::parse("ك-ت-ب").unwrap(), bare);
        assert_eq!(Root::parse("كَتَبَ").unwrap(), bare);
        assert_eq!(bare.to_string(), "كتب");
    }

    #[test]
    fn root_parse_rejects_wrong_lengths() {
        assert_eq!(
            Root::parse("كت"),
            Err(ConjugationError::NonTriliteral { input: "كت".into(), found: 2 })
        );
        assert!(matches!(
            Root::parse("دحرج"),
            Err(ConjugationError::NonTriliteral { found: 4, .. })
        ));
    }

    #[test]
    fn root_serializes_as_a_string() {
        let root = Root::parse("ك-ت-ب").unwrap();
        assert_eq!(serde_json::to_string(&root).unwrap(), "\"كتب\"");
        let back: Root = serde_json::from_str("\"كتب\"").unwrap();
        assert_eq!(back, root);
        assert!(serde_json::from_str::<Root>("\"كت\"").is_err());
    }

    #[test]
    fn paradigm_sizes() {
        assert_eq!(Cell::paradigm(Tense::Perfect).count(), 13);
        assert_eq!(Cell::paradigm(Tense::Imperfect).count(), 13);
        assert_eq!(Cell::paradigm(Tense::Imperative).count(), 5);
        assert_eq!(Cell::all().count(), 31);
    }

    #[test]
    fn imperative_first_person_is_not_a_cell() {
        let cell = Cell::new(Tense::Imperative, Person::First, Number::Singular, Gender::Common);
        assert!(!cell.is_valid());
    }

    #[test]
    fn absent_cell_differs_from_empty_cell() {
        let cell = Cell::new(Tense::Perfect, Person::Third, Number::Singular, Gender::Masculine);
        let mut forms = ConjugationForms::new();
        assert_eq!(forms.get(cell), None);
        forms.insert(cell, "");
        assert_eq!(forms.get(cell), Some(""));
    }

    #[test]
    fn merge_overlay_replaces_only_touched_cells() {
        let a = Cell::new(Tense::Perfect, Person::Third, Number::Singular, Gender::Masculine);
        let b = Cell::new(Tense::Perfect, Person::Third, Number::Singular, Gender::Feminine);
        let mut base = ConjugationForms::new();
        base.insert(a, "old-a");
        base.insert(b, "old-b");
        let mut overlay = ConjugationForms::new();
        overlay.insert(a, "new-a");

        base.merge_overlay(&overlay);
        assert_eq!(base.get(a), Some("new-a"));
        assert_eq!(base.get(b), Some("old-b"));
    }

    #[test]
    fn irregularity_accepts_geminate_alias() {
        assert_eq!("geminate".parse::<Irregularity>().unwrap(), Irregularity::Doubled);
        assert!("weak".parse::<Irregularity>().is_err());
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = VerbConjugation::new("v1", "كتب", ConjugationForms::new(), vec![], vec![]);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("verbId").is_some());
        assert!(json.get("rootForm").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
