//! Certificate lifecycle and transfer tests against the in-memory store.

mod common;

use std::collections::BTreeSet;

use certledger_contract::{ContractError, EnergyCertificateContract, UpdateMode};
use certledger_core::{CertificateId, ProducerId, RecordKind, UserId};
use certledger_store::RecordStore;
use common::{draft, Ledger};

// ============================================================================
// Create / Read / Exists
// ============================================================================

#[test]
fn exists_right_after_create() {
    let ledger = Ledger::memory();
    let issued = ledger.create(draft("alice", "p1"));

    assert!(ledger.exists(&issued.id));
    assert_eq!(issued.message, format!("{} created successfully", issued.id));
}

#[test]
fn created_certificate_reads_back() {
    let ledger = Ledger::memory();
    let issued = ledger.create(draft("alice", "p1"));

    let cert = ledger.read(&issued.id).unwrap();
    assert_eq!(cert.id, issued.id);
    assert_eq!(cert.owner_id, UserId::new("alice"));
    assert_eq!(cert.producer_id, ProducerId::new("p1"));
    assert_eq!(cert.emission_date, "2024-01-15");
    assert_eq!(cert.usable_month, 2);
    assert_eq!(cert.usable_year, 2024);
}

#[test]
fn read_missing_is_not_found() {
    let ledger = Ledger::memory();

    let err = ledger.read(&CertificateId::new("missing")).unwrap_err();
    assert!(matches!(
        err,
        ContractError::NotFound {
            entity: RecordKind::Certificate,
            ref id,
        } if id == "missing"
    ));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn read_malformed_is_decode_error() {
    let ledger = Ledger::memory();
    ledger.store.put("junk", b"{\"ownerId\":42}").unwrap();

    let err = ledger.read(&CertificateId::new("junk")).unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn query_certificate_matches_read() {
    let ledger = Ledger::memory();
    let issued = ledger.create(draft("alice", "p1"));

    let queried = ledger
        .evaluate(|c, ctx| c.query_certificate(ctx, &issued.id))
        .unwrap();
    assert_eq!(queried, ledger.read(&issued.id).unwrap());
}

// ============================================================================
// Delete
// ============================================================================

#[test]
fn delete_removes_and_second_delete_fails() {
    let ledger = Ledger::memory();
    let issued = ledger.create(draft("alice", "p1"));

    ledger.submit(|c, ctx| c.delete(ctx, &issued.id)).unwrap();
    assert!(!ledger.exists(&issued.id));

    let err = ledger.submit(|c, ctx| c.delete(ctx, &issued.id)).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn delete_keeps_transactions() {
    let ledger = Ledger::memory();
    let id = ledger.create(draft("u1", "p1")).id;
    let receipt = ledger.transfer(&id, "u2", 10.0).unwrap();

    ledger.submit(|c, ctx| c.delete(ctx, &id)).unwrap();

    let tx = ledger
        .evaluate(|c, ctx| c.query_transaction(ctx, &receipt.transaction_key))
        .unwrap();
    assert_eq!(tx.certificate_ref, id);
    assert_eq!(
        ledger
            .evaluate(|c, ctx| c.transactions_by_certificate(ctx, &id))
            .unwrap()
            .len(),
        1
    );
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn legacy_update_leaves_record_unchanged() {
    let ledger = Ledger::memory();
    let issued = ledger.create(draft("alice", "p1"));
    let before = ledger.read(&issued.id).unwrap();

    ledger
        .submit(|c, ctx| c.update(ctx, &issued.id, 12, 2031))
        .unwrap();

    let after = ledger.read(&issued.id).unwrap();
    assert_eq!(after, before);
    assert_eq!((after.usable_month, after.usable_year), (2, 2024));
}

#[test]
fn apply_update_stores_new_period() {
    let ledger = Ledger::memory().with_contract(EnergyCertificateContract::new(UpdateMode::Apply));
    let issued = ledger.create(draft("alice", "p1"));

    ledger
        .submit(|c, ctx| c.update(ctx, &issued.id, 12, 2031))
        .unwrap();

    let after = ledger.read(&issued.id).unwrap();
    assert_eq!((after.usable_month, after.usable_year), (12, 2031));
    assert_eq!(after.owner_id, UserId::new("alice"));
}

#[test]
fn update_missing_is_not_found() {
    let ledger = Ledger::memory();
    let err = ledger
        .submit(|c, ctx| c.update(ctx, &CertificateId::new("nope"), 1, 2025))
        .unwrap_err();
    assert!(err.is_not_found());
}

// ============================================================================
// Transfer
// ============================================================================

#[test]
fn transfer_changes_owner_and_records_one_transaction() {
    let ledger = Ledger::memory();
    let id = ledger.create(draft("alice", "p1")).id;

    let receipt = ledger.transfer(&id, "bob", 75.25).unwrap();

    assert_eq!(ledger.read(&id).unwrap().owner_id, UserId::new("bob"));

    let history = ledger
        .evaluate(|c, ctx| c.transactions_by_certificate(ctx, &id))
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0], receipt.transaction);
    assert_eq!(history[0].from_user_id, UserId::new("alice"));
    assert_eq!(history[0].to_user_id, UserId::new("bob"));
    assert!((history[0].price - 75.25).abs() < f64::EPSILON);
    assert_eq!(history[0].transaction_date, common::FIXED_DATE);
}

#[test]
fn transfer_chain_keeps_full_history() {
    let ledger = Ledger::memory();
    let c = ledger.create(draft("u1", "p1")).id;

    ledger.transfer(&c, "u2", 100.0).unwrap();
    ledger.transfer(&c, "u3", 250.0).unwrap();

    assert_eq!(ledger.read(&c).unwrap().owner_id, UserId::new("u3"));

    let mut history = ledger
        .evaluate(|ct, ctx| ct.transactions_by_certificate(ctx, &c))
        .unwrap();
    history.sort_by(|a, b| a.price.total_cmp(&b.price));

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].from_user_id, UserId::new("u1"));
    assert_eq!(history[0].to_user_id, UserId::new("u2"));
    assert!((history[0].price - 100.0).abs() < f64::EPSILON);
    assert_eq!(history[1].from_user_id, UserId::new("u2"));
    assert_eq!(history[1].to_user_id, UserId::new("u3"));
    assert!((history[1].price - 250.0).abs() < f64::EPSILON);
}

#[test]
fn transfer_to_same_owner_and_negative_price_are_accepted() {
    let ledger = Ledger::memory();
    let id = ledger.create(draft("alice", "p1")).id;

    let receipt = ledger.transfer(&id, "alice", -3.0).unwrap();
    assert_eq!(receipt.transaction.from_user_id, receipt.transaction.to_user_id);
    assert_eq!(ledger.read(&id).unwrap().owner_id, UserId::new("alice"));
}

#[test]
fn transfer_missing_certificate_is_not_found() {
    let ledger = Ledger::memory();
    let err = ledger
        .transfer(&CertificateId::new("ghost"), "bob", 1.0)
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(ledger.store.is_empty());
}

#[test]
fn failed_transfer_leaves_certificate_untouched() {
    let ledger = Ledger::memory();
    let id = ledger.create(draft("alice", "p1")).id;

    let err = ledger.transfer(&id, "bob", f64::NAN).unwrap_err();
    assert!(matches!(err, ContractError::Encode { .. }));

    assert_eq!(ledger.read(&id).unwrap().owner_id, UserId::new("alice"));
    assert!(ledger
        .evaluate(|c, ctx| c.transactions_by_certificate(ctx, &id))
        .unwrap()
        .is_empty());
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn query_by_owner_returns_exactly_owned_set() {
    let ledger = Ledger::memory();

    let mut alice = BTreeSet::new();
    for i in 0..5 {
        alice.insert(ledger.create(draft("alice", "p1")).id);
        if i % 2 == 0 {
            ledger.create(draft("bob", "p1"));
        }
    }
    ledger.create(draft("bob", "p2"));

    let found: BTreeSet<_> = ledger
        .evaluate(|c, ctx| c.certificates_by_owner(ctx, &UserId::new("alice")))
        .unwrap()
        .into_iter()
        .map(|cert| cert.id)
        .collect();

    assert_eq!(found, alice);
}

#[test]
fn query_by_producer() {
    let ledger = Ledger::memory();
    let a = ledger.create(draft("alice", "solar")).id;
    ledger.create(draft("alice", "wind"));
    let b = ledger.create(draft("bob", "solar")).id;

    let found: BTreeSet<_> = ledger
        .evaluate(|c, ctx| c.certificates_by_producer(ctx, &ProducerId::new("solar")))
        .unwrap()
        .into_iter()
        .map(|cert| cert.id)
        .collect();

    assert_eq!(found, BTreeSet::from([a, b]));
}

#[test]
fn owner_query_follows_transfers() {
    let ledger = Ledger::memory();
    let id = ledger.create(draft("alice", "p1")).id;
    ledger.transfer(&id, "bob", 5.0).unwrap();

    let alice = ledger
        .evaluate(|c, ctx| c.certificates_by_owner(ctx, &UserId::new("alice")))
        .unwrap();
    let bob = ledger
        .evaluate(|c, ctx| c.certificates_by_owner(ctx, &UserId::new("bob")))
        .unwrap();

    assert!(alice.is_empty());
    assert_eq!(bob.len(), 1);
}

#[test]
fn transactions_by_counterpart() {
    let ledger = Ledger::memory();
    let c1 = ledger.create(draft("u1", "p1")).id;
    let c2 = ledger.create(draft("u1", "p1")).id;

    ledger.transfer(&c1, "u2", 1.0).unwrap();
    ledger.transfer(&c2, "u3", 2.0).unwrap();
    ledger.transfer(&c1, "u3", 3.0).unwrap();

    let sold_by_u1 = ledger
        .evaluate(|c, ctx| c.transactions_by_from_user(ctx, &UserId::new("u1")))
        .unwrap();
    let bought_by_u3 = ledger
        .evaluate(|c, ctx| c.transactions_by_to_user(ctx, &UserId::new("u3")))
        .unwrap();
    let bought_by_nobody = ledger
        .evaluate(|c, ctx| c.transactions_by_to_user(ctx, &UserId::new("u9")))
        .unwrap();

    assert_eq!(sold_by_u1.len(), 2);
    assert_eq!(bought_by_u3.len(), 2);
    assert!(bought_by_nobody.is_empty());
}

#[test]
fn certificate_queries_ignore_transaction_records() {
    let ledger = Ledger::memory();
    let id = ledger.create(draft("u1", "p1")).id;
    ledger.transfer(&id, "u2", 1.0).unwrap();

    let everything = ledger
        .evaluate(|c, ctx| c.certificates_by_producer(ctx, &ProducerId::new("p1")))
        .unwrap();
    assert_eq!(everything.len(), 1);
}

#[test]
fn transaction_keys_are_not_certificates() {
    let ledger = Ledger::memory();
    let id = ledger.create(draft("u1", "p1")).id;
    let receipt = ledger.transfer(&id, "u2", 7.0).unwrap();
    let disguised = CertificateId::new(receipt.transaction_key.as_str());

    assert!(!ledger.exists(&disguised));
    assert!(ledger.read(&disguised).unwrap_err().is_not_found());
    assert!(ledger
        .submit(|c, ctx| c.delete(ctx, &disguised))
        .unwrap_err()
        .is_not_found());
    assert!(ledger
        .submit(|c, ctx| c.update(ctx, &disguised, 1, 2030))
        .unwrap_err()
        .is_not_found());
    assert!(ledger.transfer(&disguised, "u3", 1.0).unwrap_err().is_not_found());

    let stored = ledger
        .evaluate(|c, ctx| c.query_transaction(ctx, &receipt.transaction_key))
        .unwrap();
    assert_eq!(stored, receipt.transaction);
}

#[test]
fn query_transaction_malformed_is_decode_error() {
    let ledger = Ledger::memory();
    ledger
        .store
        .put("TRANSACTION_bad", br#"{"transactionId":"bad","price":"free"}"#)
        .unwrap();

    let err = ledger
        .evaluate(|c, ctx| c.query_transaction(ctx, "TRANSACTION_bad"))
        .unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn update_malformed_is_decode_error_and_writes_nothing() {
    let ledger = Ledger::memory().with_contract(EnergyCertificateContract::new(UpdateMode::Apply));
    ledger.store.put("junk", b"not json").unwrap();

    let err = ledger
        .submit(|c, ctx| c.update(ctx, &CertificateId::new("junk"), 3, 2026))
        .unwrap_err();
    assert!(err.is_decode());

    assert_eq!(ledger.store.len(), 1);
    assert_eq!(ledger.store.get("junk").unwrap().as_deref(), Some(&b"not json"[..]));
}

#[test]
fn transfer_malformed_is_decode_error_and_writes_nothing() {
    let ledger = Ledger::memory();
    ledger.store.put("junk", b"{\"ownerId\":42}").unwrap();

    let err = ledger.transfer(&CertificateId::new("junk"), "u2", 10.0).unwrap_err();
    assert!(err.is_decode());

    assert_eq!(ledger.store.keys(), vec!["junk".to_string()]);
    assert_eq!(
        ledger.store.get("junk").unwrap().as_deref(),
        Some(&b"{\"ownerId\":42}"[..])
    );
}
