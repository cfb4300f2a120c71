//! Thin command-line front end over the projection engine.

pub mod output;
pub mod table;

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand};
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    errors::ProjectionError,
    ledger::LedgerInputs,
    money::evaluate_expression,
    projection::{project, ProjectionOptions, ProjectionReport, Totals},
    storage::{
        export_file_name, load_inputs_from_path, write_day_records_csv, write_snapshot_csv,
        JsonStorage, SnapshotStore,
    },
    utils::{
        build_info,
        paths::{app_data_dir, ensure_dir, exports_dir_in},
    },
};

use output::{format_date, section, OutputStyle};
use table::{Table, TableColumn};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ProjectionError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "cashflow_cli", version)]
#[command(about = "Project checking and savings balances from a budget snapshot.")]
pub struct Cli {
    /// Disable colors and draw tables with ASCII rules.
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Commands that read a snapshot accept either a JSON file or the name of a
/// snapshot stored with `save`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Day-by-day checking and savings ledgers.
    Project { snapshot: String },
    /// Lowest checking balance in each month.
    Minimums { snapshot: String },
    /// Expense totals by name and by category.
    Totals { snapshot: String },
    /// Savings goal progress.
    Goals { snapshot: String },
    /// Write the inputs, or a projected day ledger, as CSV.
    ExportCsv {
        snapshot: String,
        /// Output file (default: exports/budget_data_<timestamp>.csv in the data directory)
        out: Option<PathBuf>,
        /// Export the checking day ledger instead of the inputs.
        #[arg(long)]
        ledger: bool,
        /// Export the day ledger of this savings account.
        #[arg(long, value_name = "ACCOUNT", conflicts_with = "ledger")]
        savings: Option<String>,
    },
    /// Store a snapshot file under a name in the data directory.
    Save { file: PathBuf, name: String },
    /// List stored snapshots.
    Snapshots,
    /// Evaluate an amount such as "$100+50".
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Show build metadata.
    Version,
}

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: Config,
    pub style: OutputStyle,
    pub data_dir: PathBuf,
}

impl Session {
    pub fn new(data_dir: PathBuf, plain: bool) -> Result<Self, CliError> {
        let config = ConfigManager::with_base_dir(data_dir.clone())?.load()?;
        let style = OutputStyle::from_config(&config, plain);
        Ok(Self {
            config,
            style,
            data_dir,
        })
    }

    fn storage(&self) -> Result<JsonStorage, CliError> {
        Ok(JsonStorage::new(Some(self.data_dir.clone()))?)
    }

    /// Reads a snapshot file, or a stored snapshot when no such file exists.
    fn load_snapshot(&self, reference: &str) -> Result<LedgerInputs, CliError> {
        let path = Path::new(reference);
        if !path.exists() {
            let storage = self.storage()?;
            if storage.snapshot_path(reference).is_file() {
                tracing::debug!(name = reference, "loading stored snapshot");
                return Ok(storage.load(reference)?);
            }
        }
        Ok(load_inputs_from_path(path)?)
    }

    fn load_and_project(&self, reference: &str) -> Result<ProjectionReport, CliError> {
        let inputs = self.load_snapshot(reference)?;
        Ok(project(&inputs, &ProjectionOptions::from(&self.config))?)
    }

    fn default_export_path(&self) -> Result<PathBuf, CliError> {
        let dir = exports_dir_in(&self.data_dir);
        ensure_dir(&dir)?;
        Ok(dir.join(export_file_name("csv", Local::now().naive_local())))
    }
}

/// Entry point used by the `cashflow_cli` binary.
pub fn run_cli(cli: Cli) -> Result<(), CliError> {
    if cli.plain {
        colored::control::set_override(false);
    }
    let Some(command) = cli.command else {
        println!("{}", Cli::command().render_help());
        return Ok(());
    };
    let session = Session::new(app_data_dir(), cli.plain)?;
    let rendered = execute(&command, &session)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

/// Runs one command and returns what should be printed.
pub fn execute(command: &Command, session: &Session) -> Result<String, CliError> {
    let style = &session.style;
    match command {
        Command::Project { snapshot } => {
            Ok(render_projection(&session.load_and_project(snapshot)?, style))
        }
        Command::Minimums { snapshot } => {
            Ok(render_minimums(&session.load_and_project(snapshot)?, style))
        }
        Command::Totals { snapshot } => {
            let report = session.load_and_project(snapshot)?;
            Ok([
                render_totals("Totals by name", &report.totals_by_name, style),
                render_totals("Totals by category", &report.totals_by_category, style),
            ]
            .join("\n\n"))
        }
        Command::Goals { snapshot } => {
            Ok(render_goals(&session.load_and_project(snapshot)?, style))
        }
        Command::ExportCsv {
            snapshot,
            out,
            ledger,
            savings,
        } => {
            let inputs = session.load_snapshot(snapshot)?;
            let out = match out {
                Some(path) => path.clone(),
                None => session.default_export_path()?,
            };
            if let Some(account) = savings {
                let report = project(&inputs, &ProjectionOptions::from(&session.config))?;
                let account_ledger = report.savings_ledger(account).ok_or_else(|| {
                    CliError::Input(format!("no savings account named `{account}`"))
                })?;
                let file = BufWriter::new(File::create(&out)?);
                write_day_records_csv(&account_ledger.records, file)?;
            } else if *ledger {
                let report = project(&inputs, &ProjectionOptions::from(&session.config))?;
                write_day_records_csv(&report.checking, BufWriter::new(File::create(&out)?))?;
            } else {
                write_snapshot_csv(&inputs, BufWriter::new(File::create(&out)?))?;
            }
            tracing::info!(path = %out.display(), "exported csv");
            Ok(format!("Wrote {}", out.display()))
        }
        Command::Save { file, name } => {
            let inputs = load_inputs_from_path(file)?;
            let path = session.storage()?.save(&inputs, name)?;
            Ok(format!("Saved `{name}` to {}", path.display()))
        }
        Command::Snapshots => {
            let names = session.storage()?.list()?;
            if names.is_empty() {
                Ok("No stored snapshots.".to_string())
            } else {
                Ok(names.join("\n"))
            }
        }
        Command::Eval { expression } => Ok(style.money(evaluate_expression(expression)?)),
        Command::Version => Ok(render_version()),
    }
}

fn table(columns: Vec<TableColumn>, style: &OutputStyle) -> Table {
    let mut table = Table::new(columns);
    table.ascii_rule = style.plain;
    table
}

pub fn render_projection(report: &ProjectionReport, style: &OutputStyle) -> String {
    let Some(window) = report.window else {
        return "No projection: set a start date first.".to_string();
    };
    let mut blocks = vec![section(format!(
        "Checking ledger {} to {}",
        format_date(window.start),
        format_date(window.end)
    ))
    .to_string()];

    let mut checking = table(
        vec![
            TableColumn::left("Date"),
            TableColumn::left("Event").with_max_width(40),
            TableColumn::right("Net"),
            TableColumn::right("Balance"),
        ],
        style,
    );
    for record in &report.checking {
        checking.push_row(vec![
            format_date(record.date),
            style.label(&record.label).to_string(),
            style.money(record.net_amount),
            style.balance(record.balance),
        ]);
    }
    blocks.push(checking.render());

    for ledger in &report.savings {
        blocks.push(section(format!("Savings: {}", ledger.account_name)).to_string());
        let mut savings = table(
            vec![
                TableColumn::left("Date"),
                TableColumn::left("Event").with_max_width(40),
                TableColumn::right("Contribution"),
                TableColumn::right("Balance"),
            ],
            style,
        );
        for record in ledger.records.iter().filter(|record| !record.contribution.is_zero()) {
            savings.push_row(vec![
                format_date(record.date),
                style.label(&record.label).to_string(),
                style.money(record.contribution),
                style.money(record.balance),
            ]);
        }
        blocks.push(savings.render());
        blocks.push(format!(
            "Opening {} / closing {}",
            style.money(ledger.opening_balance),
            style.money(ledger.closing_balance())
        ));
    }
    blocks.join("\n")
}

pub fn render_minimums(report: &ProjectionReport, style: &OutputStyle) -> String {
    if report.monthly_minimums.is_empty() {
        return "No projection: set a start date first.".to_string();
    }
    let mut minimums = table(
        vec![
            TableColumn::left("Month"),
            TableColumn::left("Date"),
            TableColumn::right("Lowest balance"),
        ],
        style,
    );
    for minimum in &report.monthly_minimums {
        minimums.push_row(vec![
            minimum.year_month.label(),
            format_date(minimum.date),
            style.balance(minimum.balance),
        ]);
    }
    format!("{}\n{}", section("Monthly minimums"), minimums.render())
}

pub fn render_totals(title: &str, totals: &Totals, style: &OutputStyle) -> String {
    let mut rows = table(vec![TableColumn::left("Item"), TableColumn::right("Total")], style);
    for (key, total) in totals.sorted_descending() {
        rows.push_row(vec![key.to_string(), style.money(total)]);
    }
    format!("{}\n{}", section(title), rows.render())
}

pub fn render_goals(report: &ProjectionReport, style: &OutputStyle) -> String {
    if report.goals.is_empty() {
        return "No savings goals to track.".to_string();
    }
    let mut goals = table(
        vec![
            TableColumn::left("Account"),
            TableColumn::right("Now"),
            TableColumn::right("Projected"),
            TableColumn::right("Remaining"),
            TableColumn::left("Status"),
        ],
        style,
    );
    for goal in &report.goals {
        goals.push_row(vec![
            goal.account_name.clone(),
            format!("{:.1}%", goal.current.percent.round_dp(1)),
            format!("{:.1}%", goal.projected.percent.round_dp(1)),
            style.money(goal.projected.remaining),
            if goal.projected.reached {
                "reached".to_string()
            } else {
                "in progress".to_string()
            },
        ]);
    }
    format!("{}\n{}", section("Savings goals"), goals.render())
}

fn render_version() -> String {
    let meta = build_info::current();
    [
        format!("Cashflow Core {}", meta.version),
        format!("  Build hash : {} ({})", meta.git_hash, meta.git_status),
        format!("  Built at   : {}", meta.timestamp),
        format!("  Target     : {}", meta.target),
        format!("  Profile    : {}", meta.profile),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Session {
        Session::new(dir.path().to_path_buf(), true).unwrap()
    }

    #[test]
    fn parses_commands_and_flags() {
        let cli =
            Cli::try_parse_from(["cashflow_cli", "--plain", "project", "inputs.json"]).unwrap();
        assert!(cli.plain);
        assert_eq!(
            cli.command,
            Some(Command::Project {
                snapshot: "inputs.json".into()
            })
        );

        let export =
            Cli::try_parse_from(["cashflow_cli", "export-csv", "in.json", "out.csv", "--ledger"])
                .unwrap();
        assert_eq!(
            export.command,
            Some(Command::ExportCsv {
                snapshot: "in.json".into(),
                out: Some("out.csv".into()),
                ledger: true,
                savings: None,
            })
        );

        let defaulted = Cli::try_parse_from(["cashflow_cli", "export-csv", "in.json"]).unwrap();
        assert!(matches!(
            defaulted.command,
            Some(Command::ExportCsv { out: None, .. })
        ));
    }

    #[test]
    fn plain_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["cashflow_cli", "goals", "inputs.json", "--plain"]).unwrap();
        assert!(cli.plain);
    }

    #[test]
    fn no_arguments_means_no_command() {
        let cli = Cli::try_parse_from(["cashflow_cli"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn missing_operand_and_unknown_commands_are_rejected() {
        assert!(Cli::try_parse_from(["cashflow_cli", "totals"]).is_err());
        assert!(Cli::try_parse_from(["cashflow_cli", "frobnicate"]).is_err());
        assert!(Cli::try_parse_from([
            "cashflow_cli",
            "export-csv",
            "in.json",
            "--ledger",
            "--savings",
            "Emergency"
        ])
        .is_err());
    }

    #[test]
    fn eval_accepts_leading_minus() {
        let cli = Cli::try_parse_from(["cashflow_cli", "eval", "-5+3"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Eval {
                expression: "-5+3".into()
            })
        );
    }

    #[test]
    fn eval_formats_the_result() {
        let dir = TempDir::new().unwrap();
        let rendered = execute(
            &Command::Eval {
                expression: "$100+50".into(),
            },
            &session(&dir),
        )
        .unwrap();
        assert_eq!(rendered, "$150.00");
    }

    #[test]
    fn stored_snapshots_can_be_projected_by_name() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        let file = dir.path().join("plan.json");
        std::fs::write(
            &file,
            r#"{"accountBalance": 100, "startDate": "2025-01-01", "projectionLength": 1,
                "bills": [{"name": "Rent", "date": 2, "amount": 40}]}"#,
        )
        .unwrap();

        let saved = execute(
            &Command::Save {
                file,
                name: "January".into(),
            },
            &session,
        )
        .unwrap();
        assert!(saved.starts_with("Saved `January`"));
        assert_eq!(execute(&Command::Snapshots, &session).unwrap(), "january");

        let rendered = execute(
            &Command::Minimums {
                snapshot: "January".into(),
            },
            &session,
        )
        .unwrap();
        assert!(rendered.contains("January 2025"));
        assert!(rendered.contains("$60.00"));
    }

    #[test]
    fn empty_store_says_so() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            execute(&Command::Snapshots, &session(&dir)).unwrap(),
            "No stored snapshots."
        );
    }
}
