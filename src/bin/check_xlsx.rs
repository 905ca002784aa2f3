use clap::Parser;
use clinic_finder::core::checker::check_workbook;
use clinic_finder::utils::logger;

#[derive(Debug, Parser)]
#[command(name = "check-xlsx")]
#[command(about = "Validate the shape of an exported listings spreadsheet")]
struct Args {
    /// Path to the .xlsx file to check
    path: String,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    match check_workbook(&args.path) {
        Ok(report) => {
            println!("Rows: {}", report.rows);
            if !report.extra_columns.is_empty() {
                println!("Extra columns: {}", report.extra_columns.join(", "));
            }

            if report.passed() {
                println!("✅ PASS");
            } else {
                for problem in report.problems() {
                    println!("  - {}", problem);
                }
                println!("❌ FAIL");
                std::process::exit(1);
            }
        }
        Err(e) => {
            // An unreadable file is a different failure than a readable
            // file with missing data, and gets its own exit code.
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    }
}
