//! Domain model for the nutrition and attendance program.
//!
//! # Responsibility
//! - Define canonical grade keys and the compiled-in section roster.
//! - Define student, BMI and attendance records shared by services.
//!
//! # Invariants
//! - Grade keys use one casing only (`Grade 1`, never `GRADE 1`).
//! - The roster is immutable and ordered K1, K2, Grade 1 .. Grade 6.

pub mod grade;
pub mod nutrition;
pub mod roster;
pub mod student;
