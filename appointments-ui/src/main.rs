//! Appointments UI
//!
//! Renders one screen of the booking app to HTML, with its data loaded from
//! a running API, and prints it.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use leptos::*;
use std::path::PathBuf;
use std::sync::Arc;

use appointments::app::{AppContext, AppointmentsDayView};
use appointments::client::{HttpTransport, Transport};
use appointments::config::Config;
use appointments::RecordId;
use appointments_ui::{App, BookingState};

#[derive(Parser)]
#[command(name = "appointments-ui")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render a screen of the booking app as HTML")]
struct Cli {
    /// Screen to render
    #[arg(value_enum, default_value = "day")]
    screen: ScreenArg,

    /// API server URL (overrides the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Config file (default: platform config dir, then ./appointments.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Day shown by the day view, as YYYY-MM-DD (default: today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Customer the appointment form books for
    #[arg(long)]
    customer: Option<RecordId>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScreenArg {
    Day,
    Customer,
    Appointment,
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

    let transport: Arc<dyn Transport> = Arc::new(
        HttpTransport::new(&config.client)
            .with_context(|| format!("Invalid API URL {}", config.client.base_url))?,
    );
    let mut context = AppContext::new(&config, transport)?;
    if let Some(date) = cli.date {
        context = context.with_today(date);
    }

    let day = match cli.screen {
        ScreenArg::Day => context.day().await,
        _ => AppointmentsDayView::default(),
    };
    let slots = match cli.screen {
        ScreenArg::Appointment => context.time_slots().await,
        _ => Vec::new(),
    };

    tracing::debug!(screen = ?cli.screen, "Rendering");

    let screen = cli.screen;
    let customer = cli.customer;
    let html = leptos::ssr::render_to_string(move || {
        let state = BookingState::new(context, day);
        match screen {
            ScreenArg::Day => {}
            ScreenArg::Customer => state.begin_adding_customer_and_appointment(),
            ScreenArg::Appointment => {
                state.open_appointment_form(customer);
                state.set_time_slots(slots);
            }
        }
        view! { <App state=state /> }
    });

    println!("{}", html);
    Ok(())
}
