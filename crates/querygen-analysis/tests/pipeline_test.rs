//! End-to-end pipeline tests over scratch Go trees.

use std::fs;
use std::path::{Path, PathBuf};

use querygen_analysis::{Pipeline, RunOutcome, Severity};
use querygen_core::errors::PipelineResult;
use querygen_core::QuerygenConfig;

fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn run(inputs: &[PathBuf]) -> PipelineResult<RunOutcome> {
    Pipeline::new(QuerygenConfig::default()).run(inputs).unwrap()
}

fn run_dir(root: &Path) -> PipelineResult<RunOutcome> {
    run(&[root.to_path_buf()])
}

const USERS_SOURCE: &str = r#"package store

const myArgsQuery = "SELECT * from {{TableName: string}} WHERE id = {{WantId: int}}"
"#;

const USERS_GENERATED: &str = "\
// Code generated by querygen.
// You may only edit import statements.
package store

import (
\t\"github.com/sourcegraph/querygen/lib/interpolate\"
)

type myArgsQueryParams struct {
\tTableName string
\tWantId    int
}

var _ interpolate.QueryParams = &myArgsQueryParams{}

func (qp *myArgsQueryParams) FormatSpecifiers() []string {
\treturn []string{\"%s\", \"%d\"}
}

func (qp *myArgsQueryParams) FormatArgs() []any {
\treturn []any{qp.TableName, qp.WantId}
}
";

#[test]
fn creates_companion_for_query_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "store/users_query.go", USERS_SOURCE);

    let result = run_dir(dir.path());
    assert!(result.is_clean(), "{:?}", result.errors);
    let summary = &result.data.summary;
    assert_eq!(summary.queries_found, 1);
    assert_eq!(summary.descriptor_sets, 1);
    assert_eq!(summary.sync.created, 1);

    let generated = fs::read_to_string(dir.path().join("store/users_query_gen.go")).unwrap();
    assert_eq!(generated, USERS_GENERATED);
}

#[test]
fn second_run_performs_no_writes() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "store/users_query.go", USERS_SOURCE);

    run_dir(dir.path());
    let companion = dir.path().join("store/users_query_gen.go");
    let first = fs::read(&companion).unwrap();
    let first_modified = fs::metadata(&companion).unwrap().modified().unwrap();

    let result = run_dir(dir.path());
    let sync = result.data.summary.sync;
    assert_eq!(sync.writes(), 0);
    assert_eq!(sync.unchanged, 1);
    assert_eq!(fs::read(&companion).unwrap(), first);
    assert_eq!(fs::metadata(&companion).unwrap().modified().unwrap(), first_modified);
    assert!(result.data.diagnostics.is_empty());
}

#[test]
fn changed_query_rewrites_body_and_keeps_imports() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "store/users_query.go", USERS_SOURCE);
    run_dir(dir.path());

    let companion = dir.path().join("store/users_query_gen.go");
    let edited = fs::read_to_string(&companion)
        .unwrap()
        .replace("import (\n", "import (\n\t\"database/sql\"\n\n");
    fs::write(&companion, edited).unwrap();

    fs::write(
        &source,
        "package store\n\nconst myArgsQuery = \"SELECT * FROM t WHERE id = {{WantId: int}}\"\n",
    )
    .unwrap();
    let result = run_dir(dir.path());
    assert_eq!(result.data.summary.sync.updated, 1);

    let text = fs::read_to_string(&companion).unwrap();
    assert!(text.contains("\t\"database/sql\"\n"));
    assert!(text.contains("type myArgsQueryParams struct {\n\tWantId int\n}\n"));
    assert!(!text.contains("TableName"));
    assert_eq!(text.matches("package store").count(), 1);
}

#[test]
fn removed_query_deletes_companion() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "store/users_query.go", USERS_SOURCE);
    run_dir(dir.path());
    let companion = dir.path().join("store/users_query_gen.go");
    assert!(companion.exists());

    fs::write(&source, "package store\n\nconst myArgsQuery = \"SELECT 1\"\n").unwrap();
    let result = run_dir(dir.path());
    assert_eq!(result.data.summary.sync.deleted, 1);
    assert_eq!(result.data.summary.sync.updated, 0);
    assert!(!companion.exists());
}

#[test]
fn orphaned_companion_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "store/other.go", "package store\n");
    let orphan = write(dir.path(), "store/gone_query_gen.go", USERS_GENERATED);

    let result = run_dir(dir.path());
    assert_eq!(result.data.summary.sync.deleted, 1);
    assert!(!orphan.exists());
}

#[test]
fn wildcard_field_repeats_in_arguments() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "store/pair_queries.go",
        "package store\n\nconst pairQuery = `SELECT 1 WHERE a = {{x: int}} AND b = {{x: _}}`\n",
    );
    run_dir(dir.path());

    let text = fs::read_to_string(dir.path().join("store/pair_query_gen.go")).unwrap();
    assert!(text.contains("type pairQueryParams struct {\n\tx int\n}\n"));
    assert!(text.contains("return []string{\"%d\", \"%d\"}"));
    assert!(text.contains("return []any{qp.x, qp.x}"));
}

#[test]
fn folds_across_files_of_a_package() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "party/attendees.go",
        "package party\n\nconst partyAttendeesQuery = `\nSELECT person_name FROM party_attendees WHERE party = {{partyId : int}}\n`\n",
    );
    write(
        dir.path(),
        "party/cake.go",
        "package party\n\nconst bestChoiceCakeQuery = `WITH attendees AS (` + partyAttendeesQuery + `)\nSELECT cake_type WHERE cake_type != {{excludedCakeType : string}}`\n",
    );
    run_dir(dir.path());

    let cake = fs::read_to_string(dir.path().join("party/cake_query_gen.go")).unwrap();
    assert!(cake.contains("type bestChoiceCakeQueryParams struct {\n\tpartyId          int\n\texcludedCakeType string\n}\n"));
    assert!(cake.contains("return []any{qp.partyId, qp.excludedCakeType}"));

    let attendees = fs::read_to_string(dir.path().join("party/attendees_query_gen.go")).unwrap();
    assert!(attendees.contains("type partyAttendeesQueryParams struct {"));
}

#[test]
fn cyclic_constants_produce_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "store/cycle.go",
        "package store\n\nconst AQuery = BQuery\nconst BQuery = AQuery\n",
    );
    let result = run_dir(dir.path());
    assert_eq!(result.data.summary.queries_found, 2);
    assert_eq!(result.data.summary.descriptor_sets, 0);
    assert!(result.data.diagnostics.is_empty());
    assert!(!dir.path().join("store/cycle_query_gen.go").exists());
}

#[test]
fn malformed_query_reports_and_spares_siblings() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "store/mixed.go",
        "package store\n\nconst badQuery = \"{{ratio: float64}}\"\nconst goodQuery = \"{{id: int}}\"\n",
    );
    let result = run_dir(dir.path());

    let diagnostics = &result.data.diagnostics;
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].line, 3);
    assert_eq!(diagnostics[1].severity, Severity::Help);
    assert_eq!(result.data.summary.diagnostics, 2);

    let text = fs::read_to_string(dir.path().join("store/mixed_query_gen.go")).unwrap();
    assert!(text.contains("goodQueryParams"));
    assert!(!text.contains("badQueryParams"));
}

#[test]
fn test_files_get_test_companions() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "store/users_test.go",
        "package store_test\n\nconst fixtureQuery = \"{{n: int}}\"\n",
    );
    run_dir(dir.path());
    let text = fs::read_to_string(dir.path().join("store/users_query_gen_test.go")).unwrap();
    assert!(text.contains("package store_test\n"));
}

#[test]
fn runtime_package_does_not_import_itself() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "go.mod", "module github.com/sourcegraph/querygen\n\ngo 1.22\n");
    write(
        dir.path(),
        "lib/interpolate/interpolate_test.go",
        "package interpolate\n\nconst myArgsQuery = \"SELECT * from {{TableName: string}} WHERE id = {{WantId: int}}\"\n",
    );
    write(
        dir.path(),
        "lib/interpolate/external_test.go",
        "package interpolate_test\n\nconst otherQuery = \"{{n: int}}\"\n",
    );
    run_dir(dir.path());

    let own = fs::read_to_string(dir.path().join("lib/interpolate/interpolate_query_gen_test.go")).unwrap();
    assert!(own.starts_with("// Code generated by querygen.\n// You may only edit import statements.\npackage interpolate\n\ntype myArgsQueryParams struct {\n"));
    assert!(own.contains("var _ QueryParams = &myArgsQueryParams{}"));

    let external = fs::read_to_string(dir.path().join("lib/interpolate/external_query_gen_test.go")).unwrap();
    assert!(external.contains("import (\n\t\"github.com/sourcegraph/querygen/lib/interpolate\"\n)\n"));
    assert!(external.contains("var _ interpolate.QueryParams = &otherQueryParams{}"));
}

#[test]
fn unscanned_existing_companion_is_not_clobbered() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "store/users_query.go", USERS_SOURCE);
    let companion = write(
        dir.path(),
        "store/users_query_gen.go",
        "// Code generated by querygen.\n// You may only edit import statements.\npackage store\n\nimport (\n\tiq \"github.com/sourcegraph/querygen/lib/interpolate\"\n)\n\nstale\n",
    );

    let result = run(&[source]);
    assert_eq!(result.data.summary.sync.updated, 1);
    assert_eq!(result.data.summary.sync.created, 0);
    let text = fs::read_to_string(&companion).unwrap();
    assert!(text.contains("\tiq \"github.com/sourcegraph/querygen/lib/interpolate\"\n"));
    assert!(!text.contains("stale"));
}

#[test]
fn multi_name_const_spec_pairs_each_query_with_its_value() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "store/multi.go",
        "package store\n\nconst aQuery, bQuery, cQuery = \"{{a: int}}\", \"{{b: string}}\", \"{{c: int}}\"\n",
    );
    let result = run_dir(dir.path());
    assert_eq!(result.data.summary.queries_found, 3);
    assert_eq!(result.data.summary.descriptor_sets, 3);

    let text = fs::read_to_string(dir.path().join("store/multi_query_gen.go")).unwrap();
    assert!(text.contains("type aQueryParams struct {\n\ta int\n}\n"));
    assert!(text.contains("type bQueryParams struct {\n\tb string\n}\n"));
    assert!(text.contains("type cQueryParams struct {\n\tc int\n}\n"));
}

#[test]
fn reordered_fields_in_companion_are_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "store/users_query.go", USERS_SOURCE);
    run_dir(dir.path());

    let companion = dir.path().join("store/users_query_gen.go");
    let swapped = USERS_GENERATED.replace("\tTableName string\n\tWantId    int\n", "\tWantId    int\n\tTableName string\n");
    assert_ne!(swapped, USERS_GENERATED);
    fs::write(&companion, &swapped).unwrap();

    let result = run_dir(dir.path());
    assert_eq!(result.data.summary.sync.updated, 1);
    assert_eq!(result.data.summary.sync.unchanged, 0);
    assert_eq!(fs::read_to_string(&companion).unwrap(), USERS_GENERATED);
}

#[test]
fn companion_without_trailing_newline_converges_in_one_run() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "store/users_query.go", USERS_SOURCE);
    let companion = write(dir.path(), "store/users_query_gen.go", "package store");

    let first = run_dir(dir.path());
    assert_eq!(first.data.summary.sync.updated, 1);
    let text = fs::read_to_string(&companion).unwrap();
    assert!(text.starts_with("package store\n\ntype myArgsQueryParams struct {\n"));

    let second = run_dir(dir.path());
    assert_eq!(second.data.summary.sync.writes(), 0);
    assert_eq!(second.data.summary.sync.unchanged, 1);
    assert_eq!(fs::read_to_string(&companion).unwrap(), text);
}

#[test]
fn summary_reports_discovery_counts() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "store/users_query.go", USERS_SOURCE);
    write(dir.path(), "store/users_test.go", "package store\n");
    write(dir.path(), "store/users_query_gen.go", USERS_GENERATED);

    let result = run_dir(dir.path());
    let scan = &result.data.summary.scan;
    assert_eq!(scan.files_discovered, 3);
    assert_eq!(scan.companions, 1);
    assert_eq!(scan.tests_skipped, 0);
    assert_eq!(result.data.summary.files_scanned, 3);
}

#[test]
fn empty_tree_is_a_setup_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Pipeline::new(QuerygenConfig::default())
        .run(&[dir.path().to_path_buf()])
        .is_err());
}
