//! Tests for the pot snapshot model

use chrono::NaiveDate;
use core_kernel::{MemberId, Money};
use domain_pot::{DanglingReference, Expense, Member, Pot, PotError, ReferenceRole, SplitEntry};

fn pot_with(members: &[&str]) -> Pot {
    let mut pot = Pot::new("Test pot", "DOT");
    for id in members {
        pot.add_member(Member::new(*id)).unwrap();
    }
    pot
}

// ============================================================================
// Member Tests
// ============================================================================

mod member_tests {
    use super::*;

    #[test]
    fn test_member_display_name_falls_back_to_id() {
        let member = Member::new("alice");
        assert_eq!(member.display_name(), "alice");

        let member = member.with_name("Alice").with_address("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY");
        assert_eq!(member.display_name(), "Alice");
        assert!(member.address.is_some());
    }

    #[test]
    fn test_add_member_rejects_duplicate() {
        let mut pot = pot_with(&["alice"]);
        let result = pot.add_member(Member::new("alice").with_name("Other Alice"));

        assert_eq!(result, Err(PotError::DuplicateMember(MemberId::from("alice"))));
        assert_eq!(pot.members.len(), 1);
    }

    #[test]
    fn test_member_ids_are_sorted() {
        let pot = pot_with(&["carol", "alice", "bob"]);
        let ids: Vec<String> = pot.member_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, ["alice", "bob", "carol"]);
    }

    #[test]
    fn test_lookup_member() {
        let pot = pot_with(&["alice", "bob"]);
        assert!(pot.has_member(&MemberId::from("bob")));
        assert!(pot.member(&MemberId::from("dave")).is_none());
    }

    #[test]
    fn test_duplicate_member_ids_detected_in_raw_snapshot() {
        let mut pot = pot_with(&["alice", "bob"]);
        pot.members.push(Member::new("alice"));
        pot.members.push(Member::new("alice"));

        assert_eq!(pot.duplicate_member_ids(), vec![MemberId::from("alice")]);
    }
}

// ============================================================================
// Expense Tests
// ============================================================================

mod expense_tests {
    use super::*;

    #[test]
    fn test_equal_split_expense() {
        let expense = Expense::new(Money::from_units(30), "alice");
        assert!(!expense.has_explicit_split());
        assert!(expense.split_total().is_zero());
    }

    #[test]
    fn test_explicit_split_total() {
        let expense = Expense::new(Money::from_units(30), "alice").with_split(vec![
            SplitEntry::new("bob", Money::from_units(10)),
            SplitEntry::new("carol", Money::from_units(20)),
        ]);
        assert!(expense.has_explicit_split());
        assert_eq!(expense.split_total(), Money::from_units(30));
    }

    #[test]
    fn test_referenced_members_payer_first() {
        let expense = Expense::new(Money::from_units(10), "alice")
            .with_split(vec![SplitEntry::new("bob", Money::from_units(10))]);
        let refs: Vec<&str> = expense.referenced_members().map(MemberId::as_str).collect();
        assert_eq!(refs, ["alice", "bob"]);
    }

    #[test]
    fn test_metadata_builders() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let expense = Expense::new(Money::from_units(12), "alice")
            .with_memo("Dinner")
            .with_date(date);
        assert_eq!(expense.memo.as_deref(), Some("Dinner"));
        assert_eq!(expense.date, Some(date));
    }
}

// ============================================================================
// Reference Checks
// ============================================================================

mod reference_tests {
    use super::*;

    #[test]
    fn test_add_expense_accepts_known_members() {
        let mut pot = pot_with(&["alice", "bob"]);
        let expense = Expense::new(Money::from_units(10), "alice")
            .with_split(vec![SplitEntry::new("bob", Money::from_units(10))]);

        assert!(pot.add_expense(expense).is_ok());
        assert_eq!(pot.expenses.len(), 1);
    }

    #[test]
    fn test_add_expense_rejects_unknown_payer() {
        let mut pot = pot_with(&["alice"]);
        let result = pot.add_expense(Expense::new(Money::from_units(10), "mallory"));

        assert_eq!(
            result,
            Err(PotError::UnknownMember {
                member_id: MemberId::from("mallory"),
                expense_index: 0,
                role: ReferenceRole::Payer,
            })
        );
        assert!(pot.expenses.is_empty());
    }

    #[test]
    fn test_add_expense_rejects_unknown_split_member() {
        let mut pot = pot_with(&["alice"]);
        let expense = Expense::new(Money::from_units(10), "alice")
            .with_split(vec![SplitEntry::new("ghost", Money::from_units(10))]);

        let err = pot.add_expense(expense).unwrap_err();
        assert_eq!(err.to_string(), "Unknown member reference: split ghost in expense #0");
    }

    #[test]
    fn test_dangling_references_in_raw_snapshot() {
        let mut pot = pot_with(&["alice", "bob"]);
        pot.expenses.push(Expense::new(Money::from_units(5), "alice"));
        pot.expenses.push(
            Expense::new(Money::from_units(5), "zed")
                .with_split(vec![SplitEntry::new("yan", Money::from_units(5))]),
        );

        assert_eq!(
            pot.dangling_references(),
            vec![
                DanglingReference {
                    expense_index: 1,
                    member_id: MemberId::from("zed"),
                    role: ReferenceRole::Payer,
                },
                DanglingReference {
                    expense_index: 1,
                    member_id: MemberId::from("yan"),
                    role: ReferenceRole::Split,
                },
            ]
        );
    }

    #[test]
    fn test_dangling_references_in_large_pot() {
        let ids: Vec<String> = (0..500).map(|i| format!("member-{i:03}")).collect();
        let mut pot = Pot::new("Festival", "DOT");
        pot.members = ids.iter().map(|id| Member::new(id.as_str())).collect();
        for (i, id) in ids.iter().enumerate() {
            let beneficiary = if i % 100 == 0 {
                "outsider"
            } else {
                ids[(i + 1) % ids.len()].as_str()
            };
            pot.expenses.push(
                Expense::new(Money::from_units(2), id.as_str())
                    .with_split(vec![SplitEntry::new(beneficiary, Money::from_units(2))]),
            );
        }

        let dangling = pot.dangling_references();

        assert_eq!(dangling.len(), 5);
        assert!(dangling.iter().all(|r| r.member_id.as_str() == "outsider"));
        let indexes: Vec<usize> = dangling.iter().map(|r| r.expense_index).collect();
        assert_eq!(indexes, [0, 100, 200, 300, 400]);
    }
}

// ============================================================================
// Snapshot Deserialization
// ============================================================================

mod snapshot_tests {
    use super::*;

    #[test]
    fn test_deserialize_application_snapshot() {
        let json = r#"{
            "name": "Flat",
            "baseCurrency": "DOT",
            "members": [{ "id": "A", "name": "Ana" }, { "id": "B" }, { "id": "C" }],
            "expenses": [
                { "amount": 30, "paidBy": "A", "memo": "Rent top-up", "date": "2024-03-01" },
                { "amount": 10.5, "paidBy": "B", "split": [{ "memberId": "C", "amount": 10.5 }] }
            ]
        }"#;

        let pot: Pot = serde_json::from_str(json).unwrap();

        assert_eq!(pot.base_currency, "DOT");
        assert_eq!(pot.members.len(), 3);
        assert_eq!(pot.expenses[0].amount, Money::from_units(30));
        assert!(pot.expenses[0].split.is_empty());
        assert_eq!(pot.expenses[0].date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(pot.expenses[1].split[0].member_id, MemberId::from("C"));
        assert_eq!(pot.expenses[1].split[0].amount, Money::from_micros(10_500_000));
        assert!(pot.dangling_references().is_empty());
    }

    #[test]
    fn test_blank_member_id_in_snapshot_is_rejected() {
        let json = r#"{
            "name": "Flat",
            "members": [{ "id": "A" }],
            "expenses": [{ "amount": 5, "paidBy": " " }]
        }"#;

        let err = serde_json::from_str::<Pot>(json).unwrap_err();
        assert!(err.to_string().contains("must not be blank"));
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let mut pot = pot_with(&["A", "B"]);
        pot.add_expense(
            Expense::new(Money::from_units(1), "A")
                .with_split(vec![SplitEntry::new("B", Money::from_units(1))]),
        )
        .unwrap();

        let json = serde_json::to_string(&pot).unwrap();
        assert!(json.contains("\"paidBy\":\"A\""));
        assert!(json.contains("\"memberId\":\"B\""));
        assert!(json.contains("\"baseCurrency\":\"DOT\""));

        let back: Pot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pot);
    }
}
