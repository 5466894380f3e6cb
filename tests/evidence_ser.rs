use merkle_imprint::notary::WIRE_VERSION;
use merkle_imprint::{
    decode_evidence, decode_recipe, encode_evidence, encode_recipe, Blake2sHasher, KeyedNoncer,
    Notary, NotaryError, SerKind,
};

fn fixture() -> (
    Notary<Blake2sHasher, KeyedNoncer>,
    merkle_imprint::Recipe,
    merkle_imprint::Evidence,
) {
    let notary = Notary::new(Blake2sHasher).with_noncer(KeyedNoncer::new([3u8; 32]));
    let values: Vec<Vec<u8>> = (0..5u8).map(|i| vec![i; 4]).collect();
    let recipe = notary.notarize(&values).unwrap();
    let evidence = notary.disclose(&recipe, &[0, 3]).unwrap();
    (notary, recipe, evidence)
}

#[test]
fn recipe_roundtrip() {
    let (_, recipe, _) = fixture();
    let bytes = encode_recipe(&recipe);
    let decoded = decode_recipe(&bytes).unwrap();
    assert_eq!(recipe, decoded);
}

#[test]
fn evidence_roundtrip() {
    let (notary, recipe, evidence) = fixture();
    let bytes = encode_evidence(&evidence);
    let decoded = decode_evidence(&bytes).unwrap();
    assert_eq!(evidence, decoded);
    // A decoded evidence still verifies.
    let root = notary.imprint(&decoded).unwrap();
    assert_eq!(&root, recipe.imprint().unwrap());
}

#[test]
fn truncated_payload_rejected() {
    let (_, _, evidence) = fixture();
    let bytes = encode_evidence(&evidence);
    for cut in [0usize, 1, bytes.len() / 2, bytes.len() - 1] {
        let err = decode_evidence(&bytes[..cut]).unwrap_err();
        assert!(matches!(err, NotaryError::Serialization(SerKind::Evidence)));
    }
}

#[test]
fn trailing_garbage_rejected() {
    let (_, recipe, _) = fixture();
    let mut bytes = encode_recipe(&recipe);
    bytes.push(0);
    let err = decode_recipe(&bytes).unwrap_err();
    assert!(matches!(err, NotaryError::Serialization(SerKind::Recipe)));
}

#[test]
fn foreign_wire_version_rejected() {
    let (_, _, evidence) = fixture();
    let mut bytes = encode_evidence(&evidence);
    let bumped = (WIRE_VERSION + 1).to_le_bytes();
    bytes[..2].copy_from_slice(&bumped);
    let err = decode_evidence(&bytes).unwrap_err();
    assert!(matches!(err, NotaryError::Serialization(SerKind::Evidence)));
}

#[test]
fn unknown_value_tag_rejected() {
    let (_, _, evidence) = fixture();
    let bytes = encode_evidence(&evidence);
    // Layout: version u16, leaf_count u32, record count u32, index u32, tag u8.
    let tag_at = 2 + 4 + 4 + 4;
    let mut bytes = bytes;
    bytes[tag_at] = 9;
    let err = decode_evidence(&bytes).unwrap_err();
    assert!(matches!(err, NotaryError::Serialization(SerKind::Evidence)));
}

#[test]
fn serde_json_roundtrip() {
    let (_, recipe, evidence) = fixture();
    let recipe_json = serde_json::to_string(&recipe).unwrap();
    let evidence_json = serde_json::to_string(&evidence).unwrap();
    assert_eq!(recipe, serde_json::from_str(&recipe_json).unwrap());
    assert_eq!(evidence, serde_json::from_str(&evidence_json).unwrap());
}
