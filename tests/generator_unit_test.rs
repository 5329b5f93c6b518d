//! Unit tests for the generator module through the public library API.

use insgen::generator::{self, normalize_field_name, normalize_value, GeneratorConfig};

fn rows(raw: &[&[&str]]) -> Vec<anyhow::Result<Vec<String>>> {
    raw.iter()
        .map(|r| Ok(r.iter().map(|c| c.to_string()).collect()))
        .collect()
}

fn run(raw: &[&[&str]], config: &GeneratorConfig) -> String {
    let mut out = Vec::new();
    generator::generate(rows(raw), config, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_field_name_identity_for_alphanumerics() {
    for name in ["Id", "Name", "a", "Z9", "col2"] {
        assert_eq!(normalize_field_name(name), name);
    }
}

#[test]
fn test_field_name_bracketing() {
    for name in ["first name", "a.b", "total-%", "", "Straße"] {
        assert_eq!(normalize_field_name(name), format!("[{}]", name));
    }
}

#[test]
fn test_value_quoting() {
    assert_eq!(normalize_value("plain", '"'), "'plain'");
    assert_eq!(normalize_value("O'Brien", '"'), "'O''Brien'");
    assert_eq!(normalize_value("NULL", '"'), "NULL");
}

#[test]
fn test_end_to_end_example() {
    let config = GeneratorConfig::new("people");
    let sql = run(
        &[&["Id", "Name"], &["1", "O'Brien"], &["2", "NULL"]],
        &config,
    );

    assert_eq!(
        sql,
        "INSERT INTO people (Id, Name) VALUES\n\
         \t ('1', 'O''Brien')\n\
         ;\n\
         INSERT INTO people (Id, Name) VALUES\n\
         \t ('2', NULL)\n\
         ;\n"
    );
}

#[test]
fn test_block_size_two_with_three_rows() {
    let config = GeneratorConfig::new("t").with_block_size(2);
    let sql = run(&[&["a"], &["1"], &["2"], &["3"]], &config);

    // One full 2-row block plus one short block, both closed
    assert_eq!(
        sql,
        "INSERT INTO t (a) VALUES\n\t ('1')\n\t,('2')\n;\n\
         INSERT INTO t (a) VALUES\n\t ('3')\n;\n"
    );
}

#[test]
fn test_statement_counts_follow_block_arithmetic() {
    for (n, b) in [(1usize, 1usize), (5, 2), (6, 2), (10, 3), (2, 100)] {
        let config = GeneratorConfig::new("t").with_block_size(b);

        let mut source = vec![Ok(vec!["x".to_string()])];
        source.extend((0..n).map(|i| Ok(vec![i.to_string()])));

        let mut out = Vec::new();
        let stats = generator::generate(source, &config, &mut out).unwrap();
        let sql = String::from_utf8(out).unwrap();

        let expected_statements = n.div_ceil(b) as u64;
        assert_eq!(stats.rows_processed, n as u64);
        assert_eq!(stats.statements_written, expected_statements);
        assert_eq!(
            sql.matches("INSERT INTO t").count() as u64,
            expected_statements
        );
        // Every statement is closed, including a short final block
        assert_eq!(sql.matches(";\n").count() as u64, expected_statements);
    }
}

#[test]
fn test_header_is_never_emitted_as_data() {
    let config = GeneratorConfig::new("t");
    let sql = run(&[&["Name"]], &config);
    assert!(sql.is_empty());

    let sql = run(&[&["Name"], &["Name"]], &config);
    // Only the data row shows up as a quoted value
    assert_eq!(sql.matches("'Name'").count(), 1);
    assert_eq!(sql.matches("INSERT INTO").count(), 1);
}

#[test]
fn test_string_delimiter_stripped_from_values() {
    let config = GeneratorConfig::new("t").with_separators(',', '#');
    let sql = run(&[&["a"], &["x#y"]], &config);
    assert!(sql.contains("('xy')"));
}
