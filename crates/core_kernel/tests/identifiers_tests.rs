//! Tests for identifier types

use core_kernel::{CoreError, ExpenseId, MemberId, PotId};
use std::collections::BTreeMap;
use uuid::Uuid;

#[test]
fn test_pot_id_prefix() {
    assert_eq!(PotId::prefix(), "POT");
    assert_eq!(ExpenseId::prefix(), "EXP");
}

#[test]
fn test_pot_id_parses_with_and_without_prefix() {
    let id = PotId::new();
    let with_prefix: PotId = id.to_string().parse().unwrap();
    let bare: PotId = id.as_uuid().to_string().parse().unwrap();
    assert_eq!(with_prefix, id);
    assert_eq!(bare, id);
}

#[test]
fn test_expense_id_uuid_conversion() {
    let uuid = Uuid::new_v4();
    let id = ExpenseId::from(uuid);
    let back: Uuid = id.into();
    assert_eq!(uuid, back);
}

#[test]
fn test_v7_ids_are_distinct() {
    assert_ne!(ExpenseId::new_v7(), ExpenseId::new_v7());
}

#[test]
fn test_member_id_rejects_blank() {
    let err = "   ".parse::<MemberId>().unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn test_member_id_parse_keeps_value() {
    let id: MemberId = "alice".parse().unwrap();
    assert_eq!(id.as_str(), "alice");
    assert_eq!(id.to_string(), "alice");
}

#[test]
fn test_member_id_lookup_by_str() {
    let mut map = BTreeMap::new();
    map.insert(MemberId::from("bob"), 2);
    map.insert(MemberId::from("alice"), 1);

    assert_eq!(map.get("alice"), Some(&1));
    let order: Vec<&str> = map.keys().map(MemberId::as_str).collect();
    assert_eq!(order, ["alice", "bob"]);
}

#[test]
fn test_member_id_serializes_as_plain_string() {
    let id = MemberId::from("0xabc");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"0xabc\"");
}

#[test]
fn test_member_id_deserialization_rejects_blank() {
    let parsed: MemberId = serde_json::from_str("\"alice\"").unwrap();
    assert_eq!(parsed, MemberId::from("alice"));

    let err = serde_json::from_str::<MemberId>("\"  \"").unwrap_err();
    assert!(err.to_string().contains("must not be blank"));
    assert!(serde_json::from_str::<MemberId>("\"\"").is_err());
}
