use connect_core::{decode_fault, insert_unique, ConnectFault, Double, ModelError, Timestamp};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

const KNOWN_CODES: &[&str] = &[
    "AccessDeniedException",
    "ContactNotFoundException",
    "DestinationNotAllowedException",
    "DuplicateResourceException",
    "InternalServiceException",
    "InvalidParameterException",
    "InvalidRequestException",
    "LimitExceededException",
    "OutboundContactNotPermittedException",
    "ResourceNotFoundException",
    "ThrottlingException",
    "UserNotFoundException",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn timestamp_millis_survive_json(millis in -62_135_596_800_000i64..253_402_300_799_000i64) {
        let ts = Timestamp::from_epoch_millis(millis).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, ts);
    }

    #[test]
    fn double_eq_implies_same_hash(value in any::<f64>()) {
        let a = Double::new(value);
        let b = Double::from(value);
        prop_assert_eq!(a, b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn duplicate_insert_never_changes_map(
        entries in prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,6}", 1..8),
        replacement in "[a-z0-9]{0,6}",
    ) {
        let mut map: BTreeMap<String, String> = entries.clone();
        for key in entries.keys() {
            let err = insert_unique(&mut map, "Tags", key.clone(), replacement.clone()).unwrap_err();
            prop_assert_eq!(
                err,
                ModelError::DuplicateMapKey { field: "Tags", key: key.clone() }
            );
        }
        prop_assert_eq!(map, entries);
    }

    #[test]
    fn known_codes_decode_with_namespace_and_message(
        index in 0..KNOWN_CODES.len(),
        message in "[ -~]{0,40}",
        use_header in any::<bool>(),
    ) {
        let code = KNOWN_CODES[index];
        let body = serde_json::json!({
            "__type": format!("com.amazonaws.connect#{}", code),
            "message": message,
        });
        let body = serde_json::to_vec(&body).unwrap();
        let header = use_header.then_some(code);
        let fault = decode_fault(400, header, &body);
        prop_assert_eq!(fault.code(), code);
        prop_assert_eq!(fault.message(), message.as_str());
        let is_unknown = matches!(fault, ConnectFault::Unknown { .. });
        prop_assert!(!is_unknown);
    }
}
