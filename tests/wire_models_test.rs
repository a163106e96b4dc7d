use jubuddy::models::*;
use serde_json::json;

#[test]
fn session_user_accepts_id_aliases_and_keeps_profile() {
    let user: SessionUser =
        serde_json::from_value(json!({ "user_id": 3, "username": "cy", "email": "cy@x.io" }))
            .unwrap();
    assert_eq!(user.id, 3);
    assert_eq!(user.profile["email"], "cy@x.io");

    let written = serde_json::to_value(&user).unwrap();
    assert_eq!(written, json!({ "id": 3, "username": "cy", "email": "cy@x.io" }));

    let user: SessionUser =
        serde_json::from_value(json!({ "userID": 4, "username": "dee" })).unwrap();
    assert_eq!(user.id, 4);
}

#[test]
fn transaction_type_is_read_case_insensitively() {
    let tx: Transaction = serde_json::from_value(json!({
        "id": 1,
        "amount": 12.5,
        "type": "EXPENSE",
        "date": "2024-03-02",
    }))
    .unwrap();

    assert!(tx.is_expense());
    assert_eq!(tx.category, "");
    assert_eq!(tx.payment_method, None);

    let other: Transaction = serde_json::from_value(json!({
        "id": 2, "amount": 1.0, "type": "refund", "date": "2024-03-02"
    }))
    .unwrap();
    assert_eq!(other.kind(), None);
}

#[test]
fn goal_payloads_use_backend_field_names() {
    let payload = UpdateGoalStatusPayload {
        goal_id: 2,
        status: GoalStatus::Cancelled,
    };
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({ "goal_id": 2, "status": "cancelled" })
    );

    let create = CreateGoalPayload {
        user_id: 7,
        name: "Bike".to_string(),
        description: String::new(),
        target_value: 500.0,
        target_date: "2024-12-01".to_string(),
    };
    let value = serde_json::to_value(&create).unwrap();
    assert_eq!(value["targetValue"], 500.0);
    assert_eq!(value["targetDate"], "2024-12-01");
}

#[test]
fn jar_pin_flag_never_reaches_the_wire() {
    let mut item: JarItem = serde_json::from_value(json!({
        "id": 5, "name": "Lamp", "cost": 800, "status": "on_hold",
    }))
    .unwrap();
    assert!(!item.is_pinned);

    item.is_pinned = true;
    let value = serde_json::to_value(&item).unwrap();
    assert!(value.get("is_pinned").is_none());
    assert_eq!(value["status"], "on_hold");
}

#[test]
fn account_types_accept_both_spellings() {
    let spaced: AccountType = serde_json::from_value(json!("Credit Card")).unwrap();
    let compact: AccountType = serde_json::from_value(json!("CreditCard")).unwrap();
    assert_eq!(spaced, AccountType::CreditCard);
    assert_eq!(compact, AccountType::CreditCard);
    assert_eq!(
        serde_json::to_value(AccountType::BankAccount).unwrap(),
        json!("Bank Account")
    );

    let empty: AccountsResponse = serde_json::from_value(json!({})).unwrap();
    assert!(empty.accounts.is_empty());
}
