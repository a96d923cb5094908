use reconcile_core::errors::*;

#[test]
fn empty_group_carries_key() {
    let err = PreconditionError::EmptyGroup { key: "cc-42".into() };
    assert!(err.to_string().contains("cc-42"));
}

#[test]
fn similarity_error_carries_both_ids() {
    let err = SimilarityError::DomainMismatch {
        source_id: 3,
        target_id: 9,
    };
    let msg = err.to_string();
    assert!(msg.contains('3'));
    assert!(msg.contains('9'));
}

// --- From impls ---

#[test]
fn precondition_error_converts_to_reconcile_error() {
    let err: ReconcileError = PreconditionError::UnknownCluster { id: 5 }.into();
    assert!(matches!(err, ReconcileError::PreconditionError(_)));
}

#[test]
fn similarity_error_converts_to_reconcile_error() {
    let err: ReconcileError = SimilarityError::NonFiniteCoordinate { id: 1 }.into();
    assert!(matches!(err, ReconcileError::SimilarityError(_)));
}

#[test]
fn config_error_converts_to_reconcile_error() {
    let err: ReconcileError = ConfigError::ParseError {
        message: "bad".into(),
    }
    .into();
    assert!(matches!(err, ReconcileError::ConfigError(_)));
    assert!(err.to_string().contains("bad"));
}

#[test]
fn cancelled_carries_round() {
    let err = ReconcileError::Cancelled { round: 4 };
    assert!(err.to_string().contains('4'));
}
