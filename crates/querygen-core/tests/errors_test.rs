//! Tests for error messages and error codes.

use std::path::PathBuf;

use querygen_core::errors::error_code;
use querygen_core::errors::{
    DescriptorError, FoldError, PipelineError, PipelineResult, QuerygenErrorCode, ScanError,
    SyncError,
};

#[test]
fn descriptor_errors_carry_codes_and_messages() {
    let err = DescriptorError::TypeConflict {
        field: "x".into(),
        first: "int".into(),
        second: "string".into(),
    };
    assert_eq!(err.error_code(), error_code::MALFORMED_DIRECTIVE);
    assert_eq!(err.to_string(), "field x used with distinct types: int and string");
    assert!(err.hint().is_none());

    let err = DescriptorError::UnresolvedType {
        field: "x".into(),
        type_name: "Missing".into(),
    };
    assert_eq!(err.error_code(), error_code::UNRESOLVED_TYPE);
}

#[test]
fn unformattable_type_offers_explicit_format_hint() {
    let err = DescriptorError::UnformattableType {
        field: "ratio".into(),
        type_name: "float64".into(),
    };
    let hint = err.hint().unwrap();
    assert!(hint.contains("{{fieldName : type : %d}}"), "hint was: {hint}");
    assert!(hint.contains("float64"));
}

#[test]
fn cyclic_fold_has_its_own_code() {
    let err = FoldError::Cyclic { name: "A".into() };
    assert!(err.is_cyclic());
    assert_eq!(err.error_code(), error_code::CYCLIC_CONSTANT);
    assert_eq!(
        FoldError::Unsupported { kind: "call_expression".into() }.error_code(),
        error_code::FOLD_ERROR
    );
}

#[test]
fn pipeline_error_delegates_code_to_subsystem() {
    let err: PipelineError = ScanError::NoInputs.into();
    assert_eq!(err.error_code(), error_code::NO_INPUTS);
    assert!(err.coded_string().starts_with("[NO_INPUTS]"));

    let err: PipelineError = SyncError::Delete {
        path: PathBuf::from("a_query_gen.go"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    }
    .into();
    assert_eq!(err.error_code(), error_code::SYNC_ERROR);
}

#[test]
fn pipeline_result_collects_non_fatal_errors() {
    let mut result = PipelineResult::<Vec<u32>>::default();
    result.data.extend([1, 2]);
    assert!(result.is_clean());
    result.add_error(ScanError::Walk {
        message: "loop".into(),
    });
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.data, vec![1, 2]);
}

#[test]
fn sync_error_names_the_companion() {
    let err = SyncError::Create {
        path: PathBuf::from("x_query_gen.go"),
        source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
    };
    assert_eq!(err.to_string(), "failed to create x_query_gen.go: boom");
}
