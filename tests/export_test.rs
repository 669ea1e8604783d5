mod common;

use anyhow::Result;
use common::{add_expense, ledger_with_friends};
use splitbills::application::Session;
use splitbills::cli::Shell;
use splitbills::domain::ExpenseUpdate;
use splitbills::io::{Exporter, LedgerSnapshot};
use tempfile::TempDir;

#[test]
fn test_export_expenses_csv() -> Result<()> {
    let mut ledger = ledger_with_friends(&["Alice"]);
    let id = add_expense(&mut ledger, "Alice", 12.5);
    ledger.update_expense(id, ExpenseUpdate::Description("Lunch, downtown".into()));

    let mut buffer = Vec::new();
    let count = Exporter::new(&ledger).export_expenses_csv(&mut buffer)?;
    assert_eq!(count, 1);

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers()?.clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "description", "amount", "paid_by", "split_with", "created_at"]
    );

    let record = reader.records().next().unwrap()?;
    assert_eq!(&record[0], "1");
    assert_eq!(&record[1], "Lunch, downtown");
    assert_eq!(&record[2], "12.50");
    assert_eq!(&record[3], "Me");
    assert_eq!(&record[4], "Alice");
    Ok(())
}

#[test]
fn test_export_snapshot_json() -> Result<()> {
    let mut ledger = ledger_with_friends(&["Alice", "Bob"]);
    add_expense(&mut ledger, "Alice", 40.0);
    ledger.set_direct_payment("Alice", 15.0);

    let mut buffer = Vec::new();
    let snapshot = Exporter::new(&ledger).export_snapshot_json(&mut buffer)?;
    assert_eq!(snapshot.friends.len(), 3);

    let parsed: LedgerSnapshot = serde_json::from_slice(&buffer)?;
    assert_eq!(parsed.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(parsed.expenses.len(), 1);
    assert_eq!(parsed.expenses[0].amount, 40.0);
    assert_eq!(parsed.direct_payments.get("Alice"), Some(&15.0));
    assert_eq!(parsed.direct_payments.get("Bob"), None);
    Ok(())
}

#[test]
fn test_shell_export_to_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("summaries.csv");

    let mut session = Session::default();
    let mut out = Vec::new();
    {
        let mut shell = Shell::new(&mut session, &mut out);
        shell.execute_line("friend add Alice")?;
        shell.execute_line("expense add Alice")?;
        shell.execute_line("expense set 1 amount 100")?;
        shell.execute_line("pay Alice 60")?;
        shell.execute_line(&format!("export summaries --output \"{}\"", path.display()))?;
    }

    let contents = std::fs::read_to_string(&path)?;
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "Alice,100.00,60.00,40.00,50.00,10.00");

    let output = String::from_utf8(out)?;
    assert!(output.contains("Exported 1 summaries to"));
    Ok(())
}
