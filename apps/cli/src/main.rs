use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{
    CalculationOutcome, FootprintClient, UiAction, ViewController, ViewModel,
    GENERIC_FAILURE_MESSAGE,
};
use shared::domain::{DisplayField, FormField, ProgressBar};

const BAR_WIDTH: usize = 30;

/// Submit one footprint calculation and print the breakdown.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    /// Car travel, miles per month.
    #[arg(long)]
    personal_car: Option<String>,
    /// Bus and train travel, miles per month.
    #[arg(long)]
    public_transit: Option<String>,
    /// Flights, miles per year.
    #[arg(long)]
    flights: Option<String>,
    /// Electricity, kWh per month.
    #[arg(long)]
    electricity: Option<String>,
    /// Natural gas, therms per month.
    #[arg(long)]
    natural_gas: Option<String>,
    /// Additional form field sent verbatim, as NAME=VALUE.
    #[arg(long = "field", value_parser = parse_field)]
    extra_fields: Vec<(String, String)>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Also print the raw result as JSON.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn standard_fields(&self) -> [(FormField, Option<&String>); 5] {
        [
            (FormField::PersonalCar, self.personal_car.as_ref()),
            (FormField::PublicTransit, self.public_transit.as_ref()),
            (FormField::Flights, self.flights.as_ref()),
            (FormField::Electricity, self.electricity.as_ref()),
            (FormField::NaturalGas, self.natural_gas.as_ref()),
        ]
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    Ok((name.trim().to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();
    let args = Args::parse();

    let mut view = ViewModel::new();
    for (field, value) in args.standard_fields() {
        if let Some(value) = value {
            view.set_field(field.key(), value.as_str());
        }
    }
    for (name, value) in &args.extra_fields {
        view.set_field(name, value.as_str());
    }

    let client = match args.timeout_secs {
        Some(secs) => FootprintClient::with_timeout(&args.server_url, Duration::from_secs(secs))?,
        None => FootprintClient::new(&args.server_url),
    };
    let mut controller = ViewController::initialize(view)?;

    match controller.handle(UiAction::Submit, &client).await {
        Some(CalculationOutcome::Success(result)) => {
            print_results(controller.view());
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            Ok(())
        }
        Some(CalculationOutcome::Failure(_)) | None => {
            let message = controller
                .view_mut()
                .dismiss_alert()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            Err(anyhow!(message))
        }
    }
}

fn print_results(view: &ViewModel) {
    let text = move |field: DisplayField| view.text(field).unwrap_or_default();

    println!("Your annual carbon footprint");
    println!("  total:            {} tons CO2e", text(DisplayField::TotalFootprint));
    println!("  trees to offset:  {}", text(DisplayField::TreesOffset));
    println!();
    println!(
        "Transportation      {} tons ({}%)",
        text(DisplayField::TransportTotal),
        text(DisplayField::TransportPercentage)
    );
    println!("  {}", progress_line(view, ProgressBar::Transport));
    println!("  car:              {}", text(DisplayField::CarEmissions));
    println!("  public transit:   {}", text(DisplayField::TransitEmissions));
    println!("  flights:          {}", text(DisplayField::FlightEmissions));
    println!();
    println!(
        "Household energy    {} tons ({}%)",
        text(DisplayField::EnergyTotal),
        text(DisplayField::EnergyPercentage)
    );
    println!("  {}", progress_line(view, ProgressBar::Energy));
    println!("  electricity:      {}", text(DisplayField::ElectricityEmissions));
    println!("  natural gas:      {}", text(DisplayField::NaturalGasEmissions));
}

/// Out-of-range widths are only clamped for drawing; the label keeps the raw value.
fn progress_line(view: &ViewModel, bar: ProgressBar) -> String {
    let filled = view
        .progress_fraction(bar)
        .map(|fraction| (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize)
        .unwrap_or(0);
    format!(
        "[{}{}] {}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        view.text(bar.label()).unwrap_or_default()
    )
}
