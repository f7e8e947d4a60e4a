use crate::core::parse_account_id;
use crate::types::{parse_amount, AccountFilter, AccountId, LedgerError};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Import account files, apply transfers, and list the resulting accounts
#[derive(Parser, Debug)]
#[command(name = "account-ledger")]
#[command(about = "Import account files, apply transfers, and list the resulting accounts", long_about = None)]
pub struct CliArgs {
    /// Account files to import, applied in the order given
    #[arg(
        value_name = "FILE",
        required = true,
        help = "Account files to import (.csv, .json or .xml), applied in order"
    )]
    pub input_files: Vec<PathBuf>,

    /// Transfers applied after every file has been imported
    #[arg(
        long = "transfer",
        value_name = "FROM,TO,AMOUNT",
        value_parser = parse_transfer,
        help = "Transfer AMOUNT from account FROM to account TO (repeatable)"
    )]
    pub transfers: Vec<TransferRequest>,

    #[arg(
        long = "name",
        value_name = "TEXT",
        help = "Only list accounts whose name contains TEXT (case-insensitive)"
    )]
    pub name: Option<String>,

    #[arg(
        long = "min-balance",
        value_name = "AMOUNT",
        help = "Only list accounts with at least this balance"
    )]
    pub min_balance: Option<String>,

    #[arg(
        long = "max-balance",
        value_name = "AMOUNT",
        help = "Only list accounts with at most this balance"
    )]
    pub max_balance: Option<String>,

    #[arg(
        long = "output",
        value_name = "FORMAT",
        default_value = "csv",
        help = "Listing format written to stdout"
    )]
    pub output: OutputFormat,

    #[arg(
        long = "log-format",
        value_name = "FORMAT",
        default_value = "text",
        help = "Log format written to stderr; level is taken from RUST_LOG"
    )]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// One `--transfer` argument
#[derive(Clone, Debug, PartialEq)]
pub struct TransferRequest {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
}

fn parse_transfer(value: &str) -> Result<TransferRequest, String> {
    let parts: Vec<&str> = value.split(',').collect();
    let [from, to, amount] = parts.as_slice() else {
        return Err(format!("expected FROM,TO,AMOUNT, got '{}'", value));
    };
    Ok(TransferRequest {
        from: parse_account_id(from).map_err(|e| e.to_string())?,
        to: parse_account_id(to).map_err(|e| e.to_string())?,
        amount: parse_amount(amount).map_err(|e| e.to_string())?,
    })
}

impl CliArgs {
    /// Build the listing filter from the filter options
    ///
    /// Empty option values are ignored.
    pub fn account_filter(&self) -> Result<AccountFilter, LedgerError> {
        AccountFilter::from_query(
            self.name.as_deref(),
            self.min_balance.as_deref(),
            self.max_balance.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    const A: &str = "11111111-1111-1111-1111-111111111111";
    const B: &str = "22222222-2222-2222-2222-222222222222";

    #[test]
    fn test_defaults() {
        let parsed = CliArgs::try_parse_from(["program", "accounts.csv"]).unwrap();

        assert_eq!(parsed.input_files, vec![PathBuf::from("accounts.csv")]);
        assert!(parsed.transfers.is_empty());
        assert_eq!(parsed.output, OutputFormat::Csv);
        assert_eq!(parsed.log_format, LogFormat::Text);
        assert_eq!(parsed.account_filter().unwrap(), AccountFilter::default());
    }

    #[test]
    fn test_multiple_files_keep_order() {
        let parsed = CliArgs::try_parse_from(["program", "b.json", "a.csv", "c.xml"]).unwrap();
        assert_eq!(
            parsed.input_files,
            vec![
                PathBuf::from("b.json"),
                PathBuf::from("a.csv"),
                PathBuf::from("c.xml")
            ]
        );
    }

    #[test]
    fn test_transfers_parse_in_order() {
        let first = format!("{},{},200.00", A, B);
        let second = format!("{},{},-5", B, A);
        let parsed = CliArgs::try_parse_from([
            "program",
            "--transfer",
            first.as_str(),
            "--transfer",
            second.as_str(),
            "accounts.csv",
        ])
        .unwrap();

        assert_eq!(
            parsed.transfers,
            vec![
                TransferRequest {
                    from: Uuid::parse_str(A).unwrap(),
                    to: Uuid::parse_str(B).unwrap(),
                    amount: dec!(200.00),
                },
                TransferRequest {
                    from: Uuid::parse_str(B).unwrap(),
                    to: Uuid::parse_str(A).unwrap(),
                    amount: dec!(-5),
                },
            ]
        );
    }

    #[rstest]
    #[case::output_json(&["program", "--output", "json", "a.csv"], OutputFormat::Json, LogFormat::Text)]
    #[case::log_json(&["program", "--log-format", "json", "a.csv"], OutputFormat::Csv, LogFormat::Json)]
    fn test_format_options(
        #[case] args: &[&str],
        #[case] output: OutputFormat,
        #[case] log_format: LogFormat,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.output, output);
        assert_eq!(parsed.log_format, log_format);
    }

    #[rstest]
    #[case::plain("200.00", dec!(200.00))]
    #[case::scientific("2e2", dec!(200))]
    #[case::padded(" 0.5 ", dec!(0.5))]
    fn test_transfer_amount_uses_money_rules(#[case] amount: &str, #[case] expected: Decimal) {
        let request = parse_transfer(&format!("{},{},{}", A, B, amount)).unwrap();
        assert_eq!(request.amount, expected);
    }

    #[test]
    fn test_transfer_amount_too_precise_is_rejected() {
        let value = format!("{},{},0.12345678901234567890123456789012", A, B);
        assert!(parse_transfer(&value).is_err());
    }

    #[test]
    fn test_filter_options() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--name",
            "ali",
            "--min-balance",
            "700",
            "--max-balance",
            "",
            "a.csv",
        ])
        .unwrap();

        let filter = parsed.account_filter().unwrap();
        assert_eq!(filter.name_contains.as_deref(), Some("ali"));
        assert_eq!(filter.min_balance, Some(dec!(700)));
        assert_eq!(filter.max_balance, None);
    }

    #[test]
    fn test_bad_filter_bound_is_validation_error() {
        let parsed = CliArgs::try_parse_from(["program", "--min-balance", "lots", "a.csv"]).unwrap();
        assert!(matches!(
            parsed.account_filter(),
            Err(LedgerError::Validation { .. })
        ));
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_output(&["program", "--output", "xml", "a.csv"])]
    #[case::transfer_two_parts(&["program", "--transfer", "a,b", "a.csv"])]
    #[case::transfer_bad_id(&["program", "--transfer", "x,y,1", "a.csv"])]
    #[case::transfer_bad_amount(
        &["program", "--transfer", "11111111-1111-1111-1111-111111111111,22222222-2222-2222-2222-222222222222,lots", "a.csv"]
    )]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
