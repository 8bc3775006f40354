mod common;

use common::{ALICE, BOB, CAROL, seeded_engine};
use rewardpay::domain::payout::PayoutRequest;
use rewardpay::error::PayoutError;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_mixed_batch_scenario() {
    // One bad address sandwiched between two valid recipients: the failure
    // is isolated, both neighbours settle, and the summary reflects it.
    let (ledger, engine) = seeded_engine(1_000_000_000_000, 9);
    let requests = vec![
        PayoutRequest::new(ALICE, dec!(5)),
        PayoutRequest::new("bad", dec!(3)),
        PayoutRequest::new(BOB, dec!(1)),
    ];

    let result = engine.execute_batch(&requests).await.unwrap();
    let outcomes = result.outcomes();

    assert!(outcomes[0].success);
    assert!(!outcomes[1].success);
    assert!(
        outcomes[1]
            .error
            .as_deref()
            .unwrap()
            .contains("invalid recipient address"),
        "unexpected reason: {:?}",
        outcomes[1].error
    );
    assert!(outcomes[2].success);

    assert_eq!(result.total_requested(), 3);
    assert_eq!(result.success_count(), 2);
    assert_eq!(result.failure_count(), 1);

    // Only the two valid requests reached the ledger.
    assert_eq!(ledger.submissions().len(), 2);
}

#[tokio::test]
async fn test_outcomes_preserve_input_order() {
    let (_ledger, engine) = seeded_engine(1_000_000_000_000, 9);
    let requests = vec![
        PayoutRequest::new(CAROL, dec!(3)),
        PayoutRequest::new(ALICE, dec!(1)),
        PayoutRequest::new(BOB, dec!(2)),
    ];

    let result = engine.execute_batch(&requests).await.unwrap();

    assert_eq!(result.outcomes().len(), requests.len());
    for (outcome, request) in result.outcomes().iter().zip(&requests) {
        assert_eq!(outcome.recipient, request.recipient);
        assert_eq!(outcome.amount, request.amount);
    }
}

#[tokio::test]
async fn test_counts_always_sum_to_total() {
    let (_ledger, engine) = seeded_engine(1_000_000_000_000, 9);
    let requests = vec![
        PayoutRequest::new(ALICE, dec!(1)),
        PayoutRequest::new("nope", dec!(1)),
        PayoutRequest::new(BOB, dec!(-4)),
        PayoutRequest::new(CAROL, dec!(2)),
    ];

    let result = engine.execute_batch(&requests).await.unwrap();
    assert_eq!(
        result.success_count() + result.failure_count(),
        result.total_requested()
    );
    assert_eq!(result.success_count(), 2);
}

#[tokio::test]
async fn test_empty_batch_rejected_before_processing() {
    let (ledger, engine) = seeded_engine(1_000_000_000_000, 9);

    let err = engine.execute_batch(&[]).await.unwrap_err();
    assert!(matches!(err, PayoutError::BatchSize { given: 0, max: 100 }));
    assert!(ledger.submissions().is_empty());
}

#[tokio::test]
async fn test_oversized_batch_rejected_before_processing() {
    let (ledger, engine) = seeded_engine(1_000_000_000_000, 9);
    let requests: Vec<_> = (0..101).map(|_| PayoutRequest::new(ALICE, dec!(1))).collect();

    let err = engine.execute_batch(&requests).await.unwrap_err();
    assert!(matches!(
        err,
        PayoutError::BatchSize { given: 101, max: 100 }
    ));
    assert!(ledger.submissions().is_empty());
}

#[tokio::test]
async fn test_full_batch_at_bound_is_accepted() {
    let (ledger, engine) = seeded_engine(1_000_000_000_000, 9);
    let requests: Vec<_> = (0..100).map(|_| PayoutRequest::new(ALICE, dec!(1))).collect();

    let result = engine.execute_batch(&requests).await.unwrap();
    assert_eq!(result.success_count(), 100);
    assert_eq!(ledger.submissions().len(), 100);
}

#[tokio::test]
async fn test_invalid_amounts_do_not_reach_the_ledger() {
    let (ledger, engine) = seeded_engine(1_000_000_000_000, 9);
    let requests = vec![
        PayoutRequest::new(ALICE, dec!(0)),
        PayoutRequest::new(BOB, dec!(-1)),
    ];

    let result = engine.execute_batch(&requests).await.unwrap();
    assert_eq!(result.failure_count(), 2);
    for outcome in result.outcomes() {
        assert!(
            outcome.error.as_deref().unwrap().contains("invalid amount"),
            "unexpected reason: {:?}",
            outcome.error
        );
    }
    assert!(ledger.submissions().is_empty());
}
