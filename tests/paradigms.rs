use conjugator_core::{
    extract_root_letters, generate_conjugations, get_pattern_info, identify_pattern, Cell,
    ConjugationError, Gender, Number, PatternId, Person, Root, Tense,
};

const PERFECT_3MS: Cell = Cell::new(Tense::Perfect, Person::Third, Number::Singular, Gender::Masculine);
const IMPERFECT_3MS: Cell = Cell::new(Tense::Imperfect, Person::Third, Number::Singular, Gender::Masculine);
const IMPERATIVE_2MS: Cell = Cell::new(Tense::Imperative, Person::Second, Number::Singular, Gender::Masculine);

const SHADDA: char = '\u{0651}';

fn skeleton(form: &str) -> String {
    form.chars()
        .filter(|c| !('\u{064b}'..='\u{0652}').contains(c))
        .collect()
}

#[test]
fn form_one_grids_are_complete_and_keep_the_root() {
    for root in ["كتب", "نصر", "جلس", "ذهب", "فتح", "شرب", "قتل"] {
        let forms = generate_conjugations(root, "form1").unwrap();
        for tense in Tense::ALL {
            assert!(forms.has_tense(tense), "{root} lacks {tense:?}");
        }
        assert_eq!(skeleton(forms.get(PERFECT_3MS).unwrap()), root);
    }
}

#[test]
fn kataba_scenario() {
    let forms = generate_conjugations("ك-ت-ب", "form1").unwrap();
    assert_eq!(forms.get(PERFECT_3MS), Some("كَتَبَ"));
    assert_eq!(forms.get(IMPERFECT_3MS), Some("يَكْتُبُ"));
    assert!(!forms.get(IMPERATIVE_2MS).unwrap().is_empty());
}

#[test]
fn form_two_doubles_the_middle_radical() {
    let forms = generate_conjugations("ع-ل-م", "form2").unwrap();
    let perfect: Vec<char> = forms.get(PERFECT_3MS).unwrap().chars().collect();
    let lam = perfect.iter().position(|&c| c == 'ل').unwrap();
    assert_eq!(perfect[lam + 1], SHADDA);
}

#[test]
fn form_four_opens_with_hamza() {
    let forms = generate_conjugations("ر-س-ل", "form4").unwrap();
    assert!(forms.get(PERFECT_3MS).unwrap().starts_with('أ'));
}

#[test]
fn every_cell_is_filled_for_every_form() {
    for id in PatternId::ALL {
        let forms = generate_conjugations("فعل", id.as_str()).unwrap();
        assert_eq!(forms.len(), Cell::all().count(), "{id}");
        assert!(forms.cells().all(|(_, form)| !form.is_empty()), "{id}");
    }
}

#[test]
fn generation_is_deterministic() {
    let a = generate_conjugations("درس", "form8").unwrap();
    let b = generate_conjugations("درس", "form8").unwrap();
    assert_eq!(a, b);
}

#[test]
fn non_triliteral_roots_fail() {
    for root in ["كت", "دحرج"] {
        assert!(matches!(
            generate_conjugations(root, "form1"),
            Err(ConjugationError::NonTriliteral { .. })
        ));
    }
    assert_eq!(
        generate_conjugations("كتب", "form13"),
        Err(ConjugationError::PatternNotFound("form13".into()))
    );
}

#[test]
fn identifier_pins() {
    assert_eq!(identify_pattern("كَتَبَ"), PatternId::Form1);
    assert_eq!(identify_pattern("عَلَّمَ"), PatternId::Form2);
    assert_eq!(identify_pattern("أَرْسَلَ"), PatternId::Form4);
    assert_eq!(identify_pattern("اِسْتَغْفَرَ"), PatternId::Form10);
}

#[test]
fn generated_perfects_identify_as_their_form() {
    let root = Root::parse("كسر").unwrap();
    for id in PatternId::ALL {
        let forms = generate_conjugations(&root.to_string(), id.as_str()).unwrap();
        assert_eq!(identify_pattern(forms.get(PERFECT_3MS).unwrap()), id);
    }
}

/// Grids whose spelling is shared with another form and root.
const SHARED_SPELLINGS: [(&str, PatternId); 4] = [
    // The dental second radical reads as the Form VIII infix.
    ("كتب", PatternId::Form9),
    // اِنْ reads as the Form VII prefix.
    ("نصر", PatternId::Form9),
    ("تبع", PatternId::Form7),
    ("تبع", PatternId::Form9),
];

#[test]
fn every_generated_cell_gives_back_its_form_and_root() {
    let mut mismatches = Vec::new();
    for root in ["كتب", "سمع", "نصر", "مدد", "حمر", "كسر", "صبر", "زهر", "تبع"] {
        for id in PatternId::ALL {
            if SHARED_SPELLINGS.contains(&(root, id)) {
                continue;
            }
            let forms = generate_conjugations(root, id.as_str()).unwrap();
            for (cell, form) in forms.cells() {
                let pattern = identify_pattern(form);
                let radicals: String = extract_root_letters(form)
                    .map(|r| r.iter().collect())
                    .unwrap_or_default();
                if pattern != id || radicals != root {
                    mismatches.push(format!("{root} {id} {cell}: {form} -> {pattern} {radicals}"));
                }
            }
        }
    }
    assert!(mismatches.is_empty(), "{mismatches:#?}");
}

#[test]
fn shared_spellings_take_the_earlier_rule() {
    let form9 = generate_conjugations("كتب", "form9").unwrap();
    let form = form9.get(PERFECT_3MS).unwrap();
    assert_eq!(identify_pattern(form), PatternId::Form8);
    assert_eq!(extract_root_letters(form).unwrap(), ['ك', 'ب', 'ب']);

    let form9 = generate_conjugations("نصر", "form9").unwrap();
    let form = form9.get(PERFECT_3MS).unwrap();
    assert_eq!(identify_pattern(form), PatternId::Form7);
    assert_eq!(extract_root_letters(form).unwrap(), ['ص', 'ر', 'ر']);
}

#[test]
fn catalog_covers_every_form() {
    for n in 1..=10 {
        let info = get_pattern_info(&format!("form{n}")).unwrap();
        assert_eq!(info.id.number(), n);
        let generated = generate_conjugations("فعل", info.id.as_str()).unwrap();
        assert_eq!(generated.get(PERFECT_3MS), Some(info.pattern));
    }
    assert!(get_pattern_info("form11").is_none());
}
