//! Official grade levels and section names of Bagong Nayon 1 Elementary School.
//!
//! Names are stored as published; comparisons go through
//! `resolve::normalize_section_name`.

use crate::model::grade::GradeKey;

/// Grade key to ordered section names, in roster order.
pub const CANONICAL_ROSTER: &[(GradeKey, &[&str])] = &[
    (
        GradeKey::K1,
        &[
            "MASAYAHIN",
            "MAPAGBIGAY",
            "BAYANIHAN",
            "AKTIBO",
            "MAPAG-ALAGA",
            "MASUNURIN",
            "MAGITING",
            "PAGKAKAISA",
            "MARIKIT",
            "MAHINHIN",
            "MAKATAO",
            "MATIPID",
            "MASIPAG",
            "MALAMBING",
            "MAUNAWAIN",
            "MASIGLA",
            "KATAPATAN",
            "MAPAGKAWANGGAWA",
            "KARANGALAN",
            "MAALALAHANIN",
            "MATULUNGIN",
            "KAAYA-AYA",
            "MAHUSAY",
            "TAGUMPAY",
            "MASINOP",
            "MATALINO",
            "MAYUMI",
            "MAKISIG",
        ],
    ),
    (
        GradeKey::K2,
        &[
            "MAGALANG",
            "MAGILIW",
            "MAKA-DIYOS",
            "MAPAGMAHAL",
            "PAG-ASA",
            "MABAIT",
            "MAPAGKUMBABA",
            "KAGALAKAN",
            "MAPAGKAKATIWALAAN",
            "MASIGASIG",
            "MATIYAGA",
            "MATAPAT",
            "RESPONSIBLE",
            "MALIKHAIN",
            "PALAKAIBIGAN",
            "MAPAMARAAN",
            "MASIKAP",
            "MAAGAP",
            "KAALAMAN",
            "KARUNUNGAN",
            "MAKABAYAN",
        ],
    ),
    (
        GradeKey::Grade1,
        &[
            "SAGING",
            "DALANDAN",
            "KAHEL",
            "STRAWBERRY",
            "GUYABANO",
            "KIWI",
            "PAPAYA",
            "MACOPA",
            "LANZONES",
            "MELON",
            "ATIS",
            "KAIMITO",
            "KALAMANSI",
            "LEMON",
            "DUHAT",
            "POMELO",
            "PAKWAN",
            "PERAS",
            "BLUEBERRY",
            "RAMBUTAN",
            "CHERRY",
            "SUHA",
            "LANGKA",
            "MANGOSTEEN",
            "SAMPALOK",
            "FL AM",
            "MANGGA",
            "KASOY",
            "DURIAN",
            "BAYABAS",
            "LONGAN",
        ],
    ),
    (
        GradeKey::Grade2,
        &[
            "Acacia",
            "Alibangbang",
            "FL-Narra",
            "Amugis",
            "Apitong",
            "Banaba",
            "Mayapis",
            "Kamatsile",
            "Kamuning",
            "Lanete",
            "Mahogany",
            "Pino",
            "Talisay",
            "Tanguile",
            "Tibig",
            "Toog",
            "Nipa",
            "FL-Igos",
            "Kamagong",
            "Anonang",
            "Caballero",
            "Dapdap",
            "Gemelina",
            "Ipil-Ipil",
            "Kalumpit",
            "Lawaan",
            "Malugai",
            "Mulawin",
            "Malabulak",
            "Molave",
            "Oliva",
            "Tindalo",
            "Yakal",
            "Almaciga",
            "Bani",
            "Aroma",
        ],
    ),
    (
        GradeKey::Grade3,
        &[
            "ST. RAPHAEL",
            "ST. BERNADETTE",
            "ST. MARY",
            "ST. JOHN",
            "ST. DOMINIC",
            "ST. SEBASTIAN",
            "ST. IGNATIUS",
            "ST. PIO",
            "ST. VINCENT",
            "ST. AGNES",
            "ST. MICHAEL",
            "ST. CLEMENT",
            "ST. MARTIN",
            "ST. HELENA",
            "ST. MARK",
            "ST. ANTHONY",
            "ST. CLARE",
            "ST. JOSEPH",
            "ST. THOMAS",
            "ST. FRANCIS",
            "ST. EMMANUEL",
            "ST. BENEDICT",
            "ST. LUKE",
            "ST. GABRIEL",
            "ST. PAUL",
            "ST. MATTHEW",
            "ST. ROSE",
            "ST. ANNE",
            "ST. PATRICK",
            "ST. CATHERINE",
            "ST. THERESE",
            "ST. ELIZABETH",
            "ST. DAVID",
            "ST. CASSIAN",
            "ST. PHILOMENA",
        ],
    ),
    (
        GradeKey::Grade4,
        &[
            "ILANG-ILANG",
            "DAFFODIL",
            "SUNFLOWER",
            "MARIGOLD",
            "ANTHURIUM",
            "ASTER",
            "YELLOWBELL",
            "BOUGAINVILLEA",
            "DAISY",
            "LAVENDER",
            "LILAC",
            "WILDZINNIA",
            "EVERLASTING",
            "ROSE",
            "TULIPS",
            "STARGAZER",
            "CARNATION",
            "HYACINTH",
            "GLADIOLA",
            "JASMINE",
        ],
    ),
    (
        GradeKey::Grade5,
        &[
            "FL PM",
            "AMBER",
            "APATITE",
            "BLUE TOPAZ",
            "CITRINE",
            "DIAMOND",
            "FLOURITE",
            "PEARL",
            "RUBY",
            "SARDONYX",
            "TOURMALINE",
            "CORAL",
            "GOSHENITE",
            "JASPER",
            "MOONSTONE",
            "IDOCRASE",
            "PERIDOT",
            "SAPPHIRE",
            "YELLOW TOPAZ",
            "EMERALD",
        ],
    ),
    (
        GradeKey::Grade6,
        &[
            "FL PM \u{2013} ANDRES BONIFACIO",
            "F. BALTAZAR",
            "P. URDUJA",
            "E. JACINTO",
            "MH. DEL PILAR",
            "G. SILANG",
            "M. SAKAY",
            "F. DAGOHOY",
            "J. LUNA",
            "JL. ESCODA",
            "S. KUDARAT",
            "V. LUCBAN",
            "GL. JAENA",
            "M. GOMEZ",
            "A. MABINI",
            "M. PONCE",
            "A. LUNA",
            "E. AGUINALDO",
        ],
    ),
];

/// Published section names for one grade.
pub fn sections_for(grade: GradeKey) -> &'static [&'static str] {
    CANONICAL_ROSTER
        .iter()
        .find(|(key, _)| *key == grade)
        .map(|(_, sections)| *sections)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::{sections_for, CANONICAL_ROSTER};
    use crate::model::grade::GradeKey;

    #[test]
    fn roster_covers_every_grade_in_order() {
        let keys: Vec<GradeKey> = CANONICAL_ROSTER.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, GradeKey::ALL.to_vec());
    }

    #[test]
    fn sections_for_returns_published_names() {
        assert!(sections_for(GradeKey::K1).contains(&"MASAYAHIN"));
        assert!(sections_for(GradeKey::Grade3).contains(&"ST. JOHN"));
        assert_eq!(sections_for(GradeKey::Grade4).len(), 20);
    }
}
