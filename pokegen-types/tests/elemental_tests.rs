use pokegen_types::ElementalType;
use proptest::prelude::*;

// ── Serde ─────────────────────────────────────────────────────────

#[test]
fn serializes_snake_case() {
    let json = serde_json::to_string(&ElementalType::Electric).unwrap();
    assert_eq!(json, r#""electric""#);
}

#[test]
fn deserializes_snake_case() {
    let parsed: ElementalType = serde_json::from_str(r#""ghost""#).unwrap();
    assert_eq!(parsed, ElementalType::Ghost);
}

#[test]
fn serde_roundtrip_all_variants() {
    for t in ElementalType::ALL {
        let json = serde_json::to_string(&t).unwrap();
        let parsed: ElementalType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, t);
    }
}

// ── Parsing ───────────────────────────────────────────────────────

#[test]
fn display_matches_as_str() {
    for t in ElementalType::ALL {
        assert_eq!(t.to_string(), t.as_str());
    }
}

proptest! {
    #[test]
    fn any_case_mix_of_valid_name_parses(index in 0usize..18, mask in any::<u32>()) {
        let name = ElementalType::ALL[index].as_str();
        let mixed: String = name
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if mask & (1 << (i % 32)) != 0 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect();
        prop_assert_eq!(mixed.parse::<ElementalType>().unwrap(), ElementalType::ALL[index]);
    }

    #[test]
    fn arbitrary_garbage_is_rejected(s in "[a-z]{1,12}") {
        let known = ElementalType::ALL.iter().any(|t| t.as_str() == s);
        prop_assert_eq!(s.parse::<ElementalType>().is_ok(), known);
    }
}
