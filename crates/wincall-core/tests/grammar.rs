use rstest::rstest;
use wincall_core::{
    issue_codes, parse_sql, resolve, BuilderKind, Dialect, Direction, Position, ResolveOptions,
    ResolveRequest, ResolveResult, Severity,
};

fn run(sql: &str) -> ResolveResult {
    resolve(&ResolveRequest::new(sql))
}

#[rstest]
#[case("ROW_NUMBER() OVER (ORDER BY a)", BuilderKind::Arg0, &[])]
#[case("cume_dist() OVER (ORDER BY a)", BuilderKind::Arg0, &[])]
#[case("NTILE(4) OVER (ORDER BY a)", BuilderKind::Arg1, &["4"])]
#[case("LAST_VALUE(b) OVER (ORDER BY a)", BuilderKind::Arg1, &["b"])]
#[case("LAG(b) OVER (ORDER BY a)", BuilderKind::Arg3, &["b", "1", "NULL"])]
#[case("LEAD(b, 3, 0) OVER (ORDER BY a)", BuilderKind::Arg3, &["b", "3", "0"])]
#[case("NTH_VALUE(b, 2) OVER (ORDER BY a)", BuilderKind::NthValue, &["b", "2", "true"])]
fn registered_functions_build(
    #[case] call: &str,
    #[case] builder: BuilderKind,
    #[case] arguments: &[&str],
) {
    let result = run(&format!("SELECT {call} FROM t"));

    assert!(!result.summary.has_errors, "unexpected issues: {:?}", result.issues);
    let calls: Vec<_> = result.calls().collect();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].builder, builder);
    assert_eq!(calls[0].arguments, arguments);
}

#[rstest]
#[case("RANK(a) OVER ()", issue_codes::WRONG_ARGUMENT_COUNT)]
#[case("NTILE() OVER ()", issue_codes::WRONG_ARGUMENT_COUNT)]
#[case("LAG(a, 1, 0, 9) OVER ()", issue_codes::WRONG_ARGUMENT_COUNT)]
#[case("NTH_VALUE(a) OVER ()", issue_codes::WRONG_ARGUMENT_COUNT)]
#[case("NTH_VALUE(a, 2, 'SIDEWAYS') OVER ()", issue_codes::INVALID_DIRECTION)]
#[case("NTILE(buckets => 4) OVER ()", issue_codes::NON_POSITIONAL_ARGUMENT)]
#[case("DENSE_RANK() RESPECT NULLS OVER ()", issue_codes::UNKNOWN_FUNCTION)]
fn rejected_calls_report_their_function(#[case] call: &str, #[case] code: &str) {
    let result = run(&format!("SELECT {call} FROM t"));

    let errors: Vec<_> = result
        .issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1, "issues: {:?}", result.issues);
    assert_eq!(errors[0].code, code);
    let function = errors[0].function.as_deref().unwrap();
    assert!(call.to_uppercase().starts_with(function.to_uppercase().as_str()));
    assert!(errors[0].span.is_some());
}

#[rstest]
#[case("SELECT RANK(x) OVER () IS TRUE FROM t")]
#[case("SELECT RANK(x) OVER () IS NOT FALSE FROM t")]
#[case("SELECT (RANK(x) OVER (), 1) FROM t")]
#[case("SELECT RANK(x) OVER () LIKE 'a%' FROM t")]
#[case("SELECT RANK(x) OVER () ILIKE 'a%' FROM t")]
#[case("SELECT RANK(x) OVER () IS DISTINCT FROM 1 FROM t")]
#[case("SELECT ARRAY[RANK(x) OVER ()] FROM t")]
#[case("SELECT EXTRACT(YEAR FROM RANK(x) OVER ()) FROM t")]
#[case("SELECT SUBSTRING(s FROM RANK(x) OVER ()) FROM t")]
#[case("SELECT RANK(x) OVER () AT TIME ZONE 'UTC' FROM t")]
#[case("SELECT RANK(x) OVER () COLLATE \"C\" FROM t")]
#[case("SELECT 1 FROM a JOIN b ON a.id = RANK(x) OVER ()")]
#[case("SELECT 1 FROM a LEFT JOIN (b JOIN c ON RANK(x) OVER () = 1) ON TRUE")]
fn rejected_calls_are_found_in_any_position(#[case] sql: &str) {
    let result = run(sql);

    let codes: Vec<_> = result.issues.iter().map(|issue| issue.code.as_str()).collect();
    assert_eq!(
        codes,
        vec![
            issue_codes::WRONG_ARGUMENT_COUNT,
            issue_codes::STATEMENT_ABANDONED
        ],
        "{sql}"
    );
    assert_eq!(result.issues[0].function.as_deref(), Some("RANK"));
}

#[test]
fn calls_in_predicates_are_built() {
    let result = run(
        "SELECT a FROM t JOIN u ON t.id = LAG(u.id) OVER (ORDER BY u.id) \
         WHERE (NTILE(4) OVER (ORDER BY a), 1) IN ((1, 1))",
    );

    assert!(!result.summary.has_errors, "{:?}", result.issues);
    let names: Vec<_> = result.calls().map(|call| call.name.as_str()).collect();
    assert_eq!(names, vec!["LAG", "NTILE"]);
}

#[rstest]
#[case("NTH_VALUE(a, 2, 'LAST', 9) OVER ()", "'NTH_VALUE': expected 2 or 3, got 4")]
#[case("LAG() OVER ()", "'LAG': expected 1 to 3, got 0")]
#[case("LEAD(a, 1, 0, 9) OVER ()", "'LEAD': expected 1 to 3, got 4")]
fn padded_functions_report_the_written_count(#[case] call: &str, #[case] message: &str) {
    let result = run(&format!("SELECT {call} FROM t"));

    assert_eq!(result.issues[0].code, issue_codes::WRONG_ARGUMENT_COUNT);
    assert!(
        result.issues[0].message.ends_with(message),
        "{}",
        result.issues[0].message
    );
}

#[test]
fn nulls_treatment_inside_the_argument_list() {
    let result = run("SELECT NTH_VALUE(b, 2 IGNORE NULLS) OVER (ORDER BY a) FROM t");

    let call = result.calls().next().unwrap();
    assert!(!call.respect_nulls);
    assert_eq!(call.arguments, vec!["b", "2", "false"]);
}

#[test]
fn nth_value_from_last_selector() {
    let result = run("SELECT NTH_VALUE(b, 3, 'last') OVER (ORDER BY a) FROM t");

    let call = result.calls().next().unwrap();
    assert_eq!(call.direction, Direction::FromLast);
    assert_eq!(call.arguments, vec!["b", "3", "true"]);
}

#[test]
fn ignore_nulls_reaches_the_literal_and_the_flags() {
    let result = run("SELECT NTH_VALUE(b, 3) IGNORE NULLS OVER (ORDER BY a) FROM t");

    let call = result.calls().next().unwrap();
    assert!(!call.respect_nulls);
    assert_eq!(call.arguments, vec!["b", "3", "false"]);
}

#[test]
fn span_points_at_function_name() {
    let sql = "SELECT a,\n       lag(b) OVER (ORDER BY a) FROM t";
    let result = run(sql);

    let span = result.calls().next().unwrap().span.unwrap();
    assert_eq!(&sql[span.start..span.end], "lag");
}

#[test]
fn statements_are_independent() {
    let result = run(
        "SELECT RANK(x) OVER () FROM t;\n\
         SELECT RANK() OVER (), PERCENT_RANK() OVER () FROM t",
    );

    assert_eq!(result.statements.len(), 2);
    assert!(result.statements[0].abandoned);
    assert_eq!(result.statements[1].statement_index, 1);
    assert_eq!(result.statements[1].calls.len(), 2);
    assert_eq!(result.summary.call_count, 2);
}

#[test]
fn abandoning_can_be_disabled() {
    let request = ResolveRequest::new("SELECT RANK(x) OVER (), RANK() OVER () FROM t").with_options(
        ResolveOptions {
            abandon_statement_on_error: Some(false),
        },
    );
    let result = resolve(&request);

    assert!(!result.statements[0].abandoned);
    assert_eq!(result.summary.call_count, 1);
    assert!(result
        .issues
        .iter()
        .all(|issue| issue.code != issue_codes::STATEMENT_ABANDONED));
}

#[test]
fn source_name_is_carried_through() {
    let request =
        ResolveRequest::new("SELECT NTILE() OVER () FROM t").with_source_name("reports/q1.sql");
    let result = resolve(&request);

    assert_eq!(
        result.statements[0].source_name.as_deref(),
        Some("reports/q1.sql")
    );
    assert!(result
        .issues
        .iter()
        .all(|issue| issue.source_name.as_deref() == Some("reports/q1.sql")));
}

#[test]
fn parse_error_carries_its_position() {
    let error = parse_sql("SELECT a\nFROM t WHERE )").unwrap_err();

    let position: Position = error.position.unwrap();
    assert_eq!(position.line, 2);
    assert!(error.to_string().contains("at line 2"));
}

#[rstest]
#[case(Dialect::Generic)]
#[case(Dialect::Postgres)]
#[case(Dialect::Snowflake)]
#[case(Dialect::Bigquery)]
fn dialects_agree_on_plain_calls(#[case] dialect: Dialect) {
    let request = ResolveRequest::new(
        "SELECT ROW_NUMBER() OVER (PARTITION BY a ORDER BY b), LEAD(b, 2) OVER (ORDER BY b) FROM t",
    )
    .with_dialect(dialect);
    let result = resolve(&request);

    assert!(!result.summary.has_errors, "{dialect:?}: {:?}", result.issues);
    assert_eq!(result.summary.call_count, 2);
}

#[test]
fn result_serializes_camel_case() {
    let result = run("SELECT NTH_VALUE(b, 2) OVER () FROM t");
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["summary"]["callCount"], 1);
    let call = &json["statements"][0]["calls"][0];
    assert_eq!(call["builder"], "nthValue");
    assert_eq!(call["respectNulls"], true);
    assert_eq!(call["direction"], "fromFirst");
}
