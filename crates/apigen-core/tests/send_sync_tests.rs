//! Tests to verify that public types are Send + Sync.

use apigen_core::*;

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_model_types_are_send_sync() {
    assert_send_sync::<SourceClass>();
    assert_send_sync::<SourceProperty>();
    assert_send_sync::<EndpointDescriptor>();
    assert_send_sync::<SkippedOperation>();
    assert_send_sync::<ValueObjectRegistry>();
    assert_send_sync::<TypeExpr>();
}

#[test]
fn test_report_types_are_send_sync() {
    assert_send_sync::<GenerationReport>();
    assert_send_sync::<Diagnostic>();
    assert_send_sync::<GeneratorConfig>();
}

#[test]
fn test_error_is_send_sync() {
    assert_send_sync::<Error>();
}
