use anyhow::{Context, Result};
use calculator::{estimate_emission, LogActivity, TransportMode};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use storage::{EmissionSummary, LogEntry, Storage};

/// Personal carbon footprint log.
#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://footprint_log.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record an emission.
    Log {
        /// Entry date, defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        #[command(subcommand)]
        activity: ActivityArg,
    },
    /// List every recorded entry.
    View,
    /// Totals by month and by category.
    Summary,
}

#[derive(Subcommand, Debug)]
enum ActivityArg {
    Transport {
        /// car, bus or train
        #[arg(long)]
        mode: TransportMode,
        #[arg(long)]
        distance_km: f64,
    },
    Energy {
        #[arg(long)]
        kwh: f64,
    },
}

impl From<ActivityArg> for LogActivity {
    fn from(value: ActivityArg) -> Self {
        match value {
            ActivityArg::Transport { mode, distance_km } => {
                LogActivity::Transport { mode, distance_km }
            }
            ActivityArg::Energy { kwh } => LogActivity::Energy { kwh },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url)
        .await
        .with_context(|| format!("failed to open footprint log '{}'", cli.database_url))?;
    storage
        .health_check()
        .await
        .context("footprint log database is not usable")?;

    match cli.command {
        Command::Log { activity, date } => {
            let activity = LogActivity::from(activity);
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let emission = log_activity(&storage, activity, date).await?;
            println!("Successfully logged {emission:.2} kg of CO2 ({activity}).");
        }
        Command::View => {
            print!("{}", format_log(&storage.list_log_entries().await?));
        }
        Command::Summary => {
            print!("{}", format_summary(&storage.summary().await?));
        }
    }

    Ok(())
}

async fn log_activity(storage: &Storage, activity: LogActivity, date: NaiveDate) -> Result<f64> {
    let emission = estimate_emission(activity)?;
    let entry_id = storage
        .add_log_entry(date, activity.category(), emission)
        .await?;
    tracing::info!(entry_id = entry_id.0, %activity, emission, "recorded log entry");
    Ok(emission)
}

fn format_log(entries: &[LogEntry]) -> String {
    let mut out = String::from("--- Emission Log ---\n");
    out.push_str(&format!(
        "{:<12} | {:<12} | {:>10}\n",
        "Date", "Category", "kg CO2"
    ));
    for entry in entries {
        out.push_str(&format!(
            "{:<12} | {:<12} | {:>10.2}\n",
            entry.date.to_string(),
            entry.category,
            entry.emission_kg
        ));
    }
    out.push_str("--------------------\n");
    out
}

fn format_summary(summary: &EmissionSummary) -> String {
    if summary.is_empty() {
        return "No data to summarize.\n".to_string();
    }
    let mut out = String::from("--- Emission Summary ---\n");
    for (month, kg) in &summary.by_month {
        out.push_str(&format!("{month}: {kg:.2} kg CO2\n"));
    }
    for (category, kg) in &summary.by_category {
        out.push_str(&format!("{category}: {kg:.2} kg CO2\n"));
    }
    out.push_str("------------------------\n");
    out
}
