//! Appointments CLI
//!
//! Drives the booking forms against a running API:
//! - Add a customer
//! - Book an appointment
//! - Show a day's appointments
//! - Generate a config file
//!
//! HTML snapshots of the views come from the `appointments-ui` binary.

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use appointments::app::{load_day, AppContext};
use appointments::booking::{AppointmentField, CustomerField, RecordId};
use appointments::client::{HttpTransport, Transport};
use appointments::config::Config;
use appointments::form::{FormView, SubmissionOutcome};

#[derive(Parser)]
#[command(name = "appointments")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Book salon customers and appointments")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: platform config dir, then ./appointments.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill in and submit the customer form
    AddCustomer {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        phone_number: String,
    },

    /// Fill in and submit the appointment form
    Book {
        /// Customer id, numeric or text
        #[arg(long)]
        customer: RecordId,
        #[arg(long, default_value = "")]
        service: String,
        #[arg(long, default_value = "")]
        stylist: String,
        /// Start time. Supports: RFC 3339, Unix milliseconds
        #[arg(long)]
        starts_at: String,
    },

    /// Show the appointments of one day
    Day {
        /// Date as YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.client.base_url = url;
    }

    appointments::logging::init(&config.logging);

    match cli.command {
        Commands::AddCustomer {
            first_name,
            last_name,
            phone_number,
        } => {
            let context = context(&config)?;
            let mut form = context.customer_form().on_save(|customer| {
                println!(
                    "Saved customer {} ({})",
                    customer.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
                    customer.full_name()
                );
            });

            form.change(CustomerField::FirstName, first_name);
            form.change(CustomerField::LastName, last_name);
            form.change(CustomerField::PhoneNumber, phone_number);

            if !form.submit().await.is_saved() {
                print_errors(&form.view());
                bail!("Customer was not saved");
            }
        }

        Commands::Book {
            customer,
            service,
            stylist,
            starts_at,
        } => {
            let starts_at = parse_starts_at(&starts_at)?;
            let context = context(&config)?;
            let mut form = context.appointment_form(Some(customer.clone()));

            form.set_time_slots(context.time_slots().await);
            form.change(AppointmentField::Service, service);
            form.change(AppointmentField::Stylist, stylist);

            if !form.select_time_slot(starts_at) {
                bail!(
                    "{} is not an available time slot for stylist '{}'",
                    starts_at,
                    form.record().stylist
                );
            }

            match form.submit().await {
                SubmissionOutcome::Saved(appointment) => {
                    println!(
                        "Booked appointment {} for customer {}",
                        appointment.id.map(|id| id.to_string()).unwrap_or_default(),
                        customer
                    );
                }
                _ => {
                    print_errors(&form.form().view());
                    bail!("Appointment was not booked");
                }
            }
        }

        Commands::Day { date } => {
            let transport = HttpTransport::new(&config.client)?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());

            let day_view = load_day(&transport, date).await.with_context(|| {
                format!("Cannot load appointments from {}", config.client.base_url)
            })?;

            println!("Appointments on {}", date);
            if day_view.is_empty() {
                println!("{}", appointments::app::NO_APPOINTMENTS_MESSAGE);
            }
            for appointment in day_view.appointments() {
                println!(
                    "  {}  {:<20} {:<16} {}",
                    appointment.time_of_day(),
                    appointment.customer.full_name(),
                    appointment.service,
                    appointment.stylist
                );
            }
        }

        Commands::Config { output } => {
            let config = appointments::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn context(config: &Config) -> anyhow::Result<AppContext> {
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config.client)?);
    Ok(AppContext::new(config, transport)?)
}

fn print_errors(view: &FormView) {
    if !view.alert.text().is_empty() {
        eprintln!("{}", view.alert.text());
    }
    for field in &view.fields {
        if !field.error.text().is_empty() {
            eprintln!("{}: {}", field.label, field.error.text());
        }
    }
}

fn parse_starts_at(s: &str) -> anyhow::Result<i64> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        Ok(dt.timestamp_millis())
    } else if let Ok(millis) = s.parse::<i64>() {
        Ok(millis)
    } else {
        bail!("Invalid start time: {}. Use RFC 3339 or Unix milliseconds", s)
    }
}
