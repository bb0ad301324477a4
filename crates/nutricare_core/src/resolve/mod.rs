//! Grade/section resolution and name reconciliation helpers.
//!
//! # Responsibility
//! - Turn free-text grade/section strings from imports and manual entry into
//!   canonical `GradeSection` values.
//! - Provide the permissive name matcher used when reconciling imported rows.
//!
//! # Invariants
//! - Every function here is total and deterministic; malformed input resolves
//!   to the `UNKNOWN` sentinel instead of an error.
//! - Roster lookups compare `normalize_section_name` forms only.

pub mod grade;
pub mod names;
pub mod section;

pub use grade::{
    infer_grade_from_raw, normalize_grade_section, parse_grade_prefix, resolve_student_fields,
};
pub use names::{name_variants, names_loose_match, tokenize_name};
pub use section::{find_grade_for_section, normalize_section_name, section_in_roster};
