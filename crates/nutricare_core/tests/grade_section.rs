use nutricare_core::model::roster::CANONICAL_ROSTER;
use nutricare_core::{
    infer_grade_from_raw, normalize_grade_section, normalize_section_name, resolve_student_fields,
    GradeKey, GradeSection, ResolvedGrade, UNKNOWN_SENTINEL,
};

fn known(grade: GradeKey, section: &str) -> GradeSection {
    GradeSection {
        grade: ResolvedGrade::Known(grade),
        section: section.to_string(),
    }
}

#[test]
fn arabic_prefix_with_dash() {
    assert_eq!(
        normalize_grade_section("3 - ST. JOHN"),
        known(GradeKey::Grade3, "ST. JOHN")
    );
}

#[test]
fn bare_k_with_kinder_one_section() {
    assert_eq!(
        normalize_grade_section("K-MASAYAHIN"),
        known(GradeKey::K1, "MASAYAHIN")
    );
}

#[test]
fn empty_and_blank_input_resolve_to_sentinels() {
    for raw in ["", "   ", "\t\n"] {
        let value = normalize_grade_section(raw);
        assert_eq!(value, GradeSection::unknown());
        assert_eq!(value.display(), "UNKNOWN - UNKNOWN");
    }
}

#[test]
fn roman_prefix_and_unicode_dash() {
    assert_eq!(
        normalize_grade_section("V-AMBER").grade,
        ResolvedGrade::Known(GradeKey::Grade5)
    );
    assert_eq!(normalize_grade_section("V-AMBER").section, "AMBER");
    assert_eq!(
        normalize_grade_section("Grade 5 \u{2013} Ruby"),
        known(GradeKey::Grade5, "RUBY")
    );
}

#[test]
fn section_only_input_uses_roster() {
    assert_eq!(
        normalize_grade_section("st. john"),
        known(GradeKey::Grade3, "ST. JOHN")
    );
    assert_eq!(
        normalize_grade_section("Sunflower"),
        known(GradeKey::Grade4, "SUNFLOWER")
    );
}

#[test]
fn unreadable_grade_prefix_falls_back_to_roster_section() {
    assert_eq!(
        normalize_grade_section("Grade V - Ruby"),
        known(GradeKey::Grade5, "RUBY")
    );
    assert_eq!(
        normalize_grade_section("5th - Ruby"),
        known(GradeKey::Grade5, "RUBY")
    );
    assert_eq!(
        normalize_grade_section("Gr V - AMBER"),
        known(GradeKey::Grade5, "AMBER")
    );
    assert_eq!(
        normalize_grade_section("Section - RUBY"),
        known(GradeKey::Grade5, "RUBY")
    );
    assert_eq!(
        normalize_grade_section("ILANG-ILANG"),
        known(GradeKey::Grade4, "ILANG-ILANG")
    );
}

#[test]
fn unrecognized_text_keeps_section_with_unknown_grade() {
    let value = normalize_grade_section("Violet Room");
    assert_eq!(value.grade, ResolvedGrade::Unknown);
    assert_eq!(value.section, "VIOLET ROOM");
}

#[test]
fn out_of_range_grade_number_never_leaks() {
    let value = normalize_grade_section("9 - ST. JOHN");
    assert_eq!(value.section, "ST. JOHN");
    assert_eq!(value.grade, ResolvedGrade::Known(GradeKey::Grade3));

    let value = normalize_grade_section("11 - NOWHERE");
    assert_eq!(value.grade, ResolvedGrade::Unknown);
}

#[test]
fn k_word_sections_are_not_read_as_kinder() {
    assert_eq!(infer_grade_from_raw("KAHEL"), Some(GradeKey::Grade1));
    assert_eq!(infer_grade_from_raw("KALAMANSI ROOM"), None);
}

#[test]
fn canonical_strings_are_fixed_points_for_whole_roster() {
    for (grade, sections) in CANONICAL_ROSTER {
        for section in *sections {
            let canonical = format!("{} - {}", grade.as_str(), normalize_section_name(section));
            let first = normalize_grade_section(&canonical);
            assert_eq!(first.grade, ResolvedGrade::Known(*grade), "input {canonical}");
            assert_eq!(
                normalize_grade_section(&first.display()),
                first,
                "display of {canonical} did not round back"
            );
        }
    }
}

#[test]
fn resolution_is_deterministic() {
    let inputs = [
        "3 - ST. JOHN",
        "K2-Mapagmahal",
        "grade 6 fl pm \u{2013} andres bonifacio",
        "\"IV - Sampaguita\"",
        "???",
    ];
    for raw in inputs {
        assert_eq!(normalize_grade_section(raw), normalize_grade_section(raw));
    }
}

#[test]
fn results_only_carry_canonical_grades_or_sentinel() {
    let inputs = ["12 - X", "XIII", "-", "- - -", "K", "k3 - foo", "0 - ZERO", "Grade 99"];
    for raw in inputs {
        let value = normalize_grade_section(raw);
        match value.grade {
            ResolvedGrade::Known(key) => assert!(GradeKey::ALL.contains(&key)),
            ResolvedGrade::Unknown => {}
        }
        assert!(!value.section.is_empty(), "empty section for {raw}");
        if value.section_is_unknown() {
            assert_eq!(value.section, UNKNOWN_SENTINEL);
        }
    }
}

#[test]
fn separate_columns_resolve_legacy_grade_labels() {
    assert_eq!(
        resolve_student_fields("GRADE 3", "st. john"),
        known(GradeKey::Grade3, "ST. JOHN")
    );
    assert_eq!(
        resolve_student_fields("Kinder 2", "x"),
        known(GradeKey::K2, "X")
    );
    assert_eq!(
        resolve_student_fields("", "Sunflower"),
        known(GradeKey::Grade4, "SUNFLOWER")
    );
    assert_eq!(resolve_student_fields("", ""), GradeSection::unknown());
}
