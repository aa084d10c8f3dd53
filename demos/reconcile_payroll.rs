//! Payroll reconciliation example
//!
//! With a config path argument, runs that configuration and writes the CSV
//! reports. Without one, reconciles a small in-memory pay period.

use payroll_recon::reporting::{CORRECTING_TABLE, ERRORS_TABLE, SUMMARY_TABLE, UNRECONCILED_TABLE};
use payroll_recon::utils::MemoryTableSink;
use payroll_recon::{reconcile_sources, run, ElementTable, NameSubstitutions, RunConfig, SourceReader};
use tracing_subscriber::EnvFilter;

const ELEMENTS: &str = "\
Payroll Name,Costing Name,Payroll Category,Costing Category,Debit Account,Credit Account,Should Cost
Regular Pay,Regular Earnings,Standard Earnings,Earnings,500000,200000,TRUE
Overtime,Overtime Earnings,Supplemental Earnings,Earnings,510000,200000,TRUE
Medical,Medical Pretax,Pretax Deductions,Deductions,210000,210000,FALSE
";

const REGISTER: &str = "\
Person Number,Net Pay,Balance Name,Balance Category,Current
1001,\"1,150.00\",Regular Salary,Standard Earnings,\"1,000.00\"
1001,\"1,150.00\",Overtime,Supplemental Earnings,150.00
1001,\"1,150.00\",Overtime Hours,Hours,6
1002,75.00,Overtime,Supplemental Earnings,75.00
";

const COSTING: &str = "\
Employee Number,Element,Company_PC,Department_PC,Account_PC,Debit Amount,Credit Amount,Unit of Measure
1001,Regular Earnings,1100,31000,500000,600.00,0,Money
1001,Regular Earnings,1100,32000,500000,400.00,0,Money
1001,Regular Earnings,1100,90000,200000,0,1000.00,Money
1001,Overtime Earnings,1100,31000,510000,150.00,0,Money
1001,Overtime Earnings,1100,90000,200000,0,150.00,Money
1001,Overtime Earnings,1100,31000,600000,25.00,0,Money
1001,Overtime Earnings,1100,32000,600000,0,25.00,Money
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Some(path) = std::env::args().nth(1) {
        let config = RunConfig::load(&path)?;
        let report = run(&config)?;
        println!("🧾 Reconciled {}", path);
        for (name, rows) in &report.tables {
            println!("  ✓ {}: {} rows", name, rows);
        }
        for file in &report.files {
            println!("  📄 {}", file.display());
        }
        return Ok(());
    }

    println!("🧾 Payroll Recon - In-memory Example\n");

    let elements = ElementTable::from_reader(ELEMENTS.as_bytes())?;
    let reader = SourceReader::new(NameSubstitutions::new().with("Regular Salary", "Regular Pay"));
    let result = reconcile_sources(
        &elements,
        &reader,
        [("register.csv", REGISTER.as_bytes()), ("costing.csv", COSTING.as_bytes())],
    )?;

    println!("📊 Strategy moves: {:?}", result.counts);
    println!("⚠️  Row errors: {}", result.row_errors.len());
    for gap in &result.gaps {
        println!("  • employee {}: {}", gap.employee, gap.description());
    }
    println!();

    let mut sink = MemoryTableSink::new();
    result.reports.write_to(&mut sink)?;
    for name in [SUMMARY_TABLE, UNRECONCILED_TABLE, CORRECTING_TABLE, ERRORS_TABLE] {
        if let Some(table) = sink.get(name) {
            println!("📋 {}", name);
            println!("  {}", table.columns.join(" | "));
            for row in &table.rows {
                println!("  {}", table.ordered_values(row).join(" | "));
            }
            println!();
        }
    }

    Ok(())
}
