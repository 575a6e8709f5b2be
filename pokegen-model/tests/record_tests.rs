use pokegen_model::{PokemonDescription, PokemonRecord};
use pokegen_types::{ElementalType, Timestamp};
use std::collections::BTreeSet;

fn description() -> PokemonDescription {
    PokemonDescription {
        ability: "overgrow".into(),
        category: "seed".into(),
        flavor_text: "Carries a bulb on its back.".into(),
        habitat: "grassland".into(),
        height: 0.7,
        name: "Bulbit".into(),
        types: BTreeSet::from([ElementalType::Grass, ElementalType::Poison]),
        weight: 6.9,
    }
}

#[test]
fn from_description_copies_fields() {
    let record = PokemonRecord::from_description(description(), "data:image/png;base64,AAAA");
    assert_eq!(record.name, "Bulbit");
    assert_eq!(record.img_url, "data:image/png;base64,AAAA");
    assert!(!record.favourite);
    assert!(record.timestamp.as_millis() > 0);
}

#[test]
fn description_projection_roundtrips() {
    let record = PokemonRecord::from_description(description(), "url");
    assert_eq!(record.description(), description());
}

#[test]
fn serde_roundtrip_preserves_all_fields() {
    let mut record = PokemonRecord::from_description(description(), "url");
    record.favourite = true;
    record.timestamp = Timestamp::from_millis(42);

    let json = serde_json::to_string(&record).unwrap();
    let parsed = PokemonRecord::from_json(&json).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn favourite_defaults_to_false_on_read() {
    // Rows written before the favourite flag existed have no such field.
    let record = PokemonRecord::from_description(description(), "url");
    let mut json: serde_json::Value = serde_json::to_value(&record).unwrap();
    json.as_object_mut().unwrap().remove("favourite");
    let parsed = PokemonRecord::from_json(&json.to_string()).unwrap();
    assert!(!parsed.favourite);
}

#[test]
fn schema_on_read_rejects_constraint_violations() {
    let record = PokemonRecord::from_description(description(), "url");
    let mut json: serde_json::Value = serde_json::to_value(&record).unwrap();
    json["types"] = serde_json::json!([]);
    assert!(PokemonRecord::from_json(&json.to_string()).is_err());
}
