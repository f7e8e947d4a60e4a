//! End-to-end integration tests
//!
//! These tests drive the command-line runner over predefined fixtures. Each test:
//! 1. Imports the listed input files from a fixture directory, in order
//! 2. Applies the transfers in transfers.txt, if the fixture has one
//! 3. Generates the CSV account listing
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - One fixture per import format
//! - Re-imports across formats updating existing accounts
//! - A chain of transfers

#[cfg(test)]
mod tests {
    use account_ledger::cli::CliArgs;
    use account_ledger::runner;
    use account_ledger::LedgerError;
    use clap::Parser;
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::{NamedTempFile, TempDir};

    const ALICE: &str = "11111111-1111-1111-1111-111111111111";
    const BOB: &str = "22222222-2222-2222-2222-222222222222";

    /// Build the argument list for a fixture: transfers first, then input files
    fn fixture_args(fixture_dir: &Path, inputs: &[&str]) -> Vec<String> {
        let mut args = vec!["account-ledger".to_string()];

        let transfers_path = fixture_dir.join("transfers.txt");
        if transfers_path.exists() {
            let transfers = fs::read_to_string(&transfers_path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", transfers_path.display(), e));
            for line in transfers.lines().filter(|l| !l.trim().is_empty()) {
                args.push("--transfer".to_string());
                args.push(line.trim().to_string());
            }
        }

        for input in inputs {
            let input_path = fixture_dir.join(input);
            assert!(
                input_path.exists(),
                "Input file not found: {}",
                input_path.display()
            );
            args.push(input_path.display().to_string());
        }
        args
    }

    /// Run a fixture and compare the listing with expected.csv
    fn run_test_fixture(fixture_name: &str, inputs: &[&str]) {
        let fixture_dir = Path::new("tests/fixtures").join(fixture_name);
        let expected_path = fixture_dir.join("expected.csv");
        assert!(
            expected_path.exists(),
            "Expected file not found: {}",
            expected_path.display()
        );

        let args = CliArgs::try_parse_from(fixture_args(&fixture_dir, inputs))
            .unwrap_or_else(|e| panic!("Failed to parse arguments: {}", e));

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");
        runner::run(&args, &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to run fixture: {}", e));
        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));
        let expected_output = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
            panic!(
                "Failed to read expected file {}: {}",
                expected_path.display(),
                e
            )
        });

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("csv_import", &["accounts.csv"])]
    #[case("json_import", &["accounts.json"])]
    #[case("xml_import", &["accounts.xml"])]
    #[case("mixed_formats_upsert", &["accounts.csv", "update.json", "final.XML"])]
    #[case("transfer_flow", &["accounts.csv"])]
    fn test_fixtures(#[case] fixture: &str, #[case] inputs: &[&str]) {
        run_test_fixture(fixture, inputs);
    }

    fn run_in_dir(
        dir: &TempDir,
        files: &[(&str, &str)],
        extra: &[&str],
    ) -> Result<String, LedgerError> {
        let mut args = vec!["account-ledger".to_string()];
        args.extend(extra.iter().map(|s| s.to_string()));
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::write(&path, content).expect("Failed to write input file");
            args.push(path.display().to_string());
        }
        let parsed = CliArgs::try_parse_from(args).expect("arguments should parse");
        let mut output = Vec::new();
        runner::run(&parsed, &mut output)?;
        Ok(String::from_utf8(output).expect("output is UTF-8"))
    }

    #[test]
    fn test_filter_options_narrow_listing() {
        let dir = TempDir::new().unwrap();
        let csv = format!(
            "ID,Name,Balance\n{},Alice,1000.00\n{},Bob,500.00\n",
            ALICE, BOB
        );

        let output = run_in_dir(
            &dir,
            &[("accounts.csv", csv.as_str())],
            &["--name", "B", "--min-balance", "100", "--max-balance", "500"],
        )
        .unwrap();

        assert_eq!(output, format!("id,name,balance\n{},Bob,500.00\n", BOB));
    }

    #[test]
    fn test_json_output() {
        let dir = TempDir::new().unwrap();
        let csv = format!("ID,Name,Balance\n{},Alice,1000.00\n", ALICE);

        let output =
            run_in_dir(&dir, &[("accounts.csv", csv.as_str())], &["--output", "json"]).unwrap();

        let listing: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(listing[0]["id"], ALICE);
        assert_eq!(listing[0]["name"], "Alice");
        assert_eq!(listing[0]["balance"], "1000.00");
    }

    #[rstest]
    #[case::unsupported_extension("accounts.txt", "ID,Name,Balance\n")]
    #[case::no_extension("accounts", "ID,Name,Balance\n")]
    #[case::malformed_json("accounts.json", "[{\"ID\": ")]
    #[case::negative_balance("accounts.csv", "ID,Name,Balance\n11111111-1111-1111-1111-111111111111,Alice,-1\n")]
    #[case::bad_id("accounts.csv", "ID,Name,Balance\nnot-a-uuid,Alice,1\n")]
    fn test_invalid_input_fails(#[case] name: &str, #[case] content: &str) {
        let dir = TempDir::new().unwrap();
        assert!(run_in_dir(&dir, &[(name, content)], &[]).is_err());
    }

    #[test]
    fn test_transfer_to_unknown_account_fails() {
        let dir = TempDir::new().unwrap();
        let csv = format!("ID,Name,Balance\n{},Alice,1000.00\n", ALICE);
        let transfer = format!("{},{},1", ALICE, BOB);

        let error = run_in_dir(
            &dir,
            &[("accounts.csv", csv.as_str())],
            &["--transfer", transfer.as_str()],
        )
        .unwrap_err();

        assert!(matches!(error, LedgerError::NotFound { .. }));
    }
}
