use anyhow::{bail, Context};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use rail_catalog::{RandomAvailability, SeatAvailability, TrainCatalog};
use rail_core::app_config::Config;
use rail_core::help::filter_faqs;
use rail_core::payment::PaymentMethod;
use rail_core::search::SearchQuery;
use rail_core::session::{Session, UserProfile};
use rail_order::{BookingCoordinator, BookingHistory, PassengerField};
use rail_shared::Masked;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Train ticket booking demo driver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search, pick seats, fill in passengers and pay
    Book {
        /// Search parameters, e.g. `from=Mumbai&to=Delhi&date=2025-11-15&class=3A`
        #[arg(short, long)]
        query: Option<String>,

        /// Number of seats to pick
        #[arg(short, long, default_value_t = 2)]
        seats: usize,

        /// Seed for the seat availability generator
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Search the help centre
    Faq {
        #[arg(default_value = "")]
        query: String,
    },
    /// List sample bookings
    Bookings,
}

const DEMO_PASSENGERS: &[(&str, &str, &str, &str)] = &[
    ("John Doe", "34", "male", "lower"),
    ("Jane Doe", "32", "female", "middle"),
    ("Arjun Doe", "9", "male", "upper"),
    ("Priya Doe", "6", "female", "side-lower"),
    ("Ravi Doe", "61", "male", "side-upper"),
    ("Sita Doe", "58", "female", "lower"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rail_cli=info,rail_order=debug,rail_catalog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    let args = Args::parse();

    match args.command {
        Command::Book { query, seats, seed } => book(&config, query, seats, seed).await,
        Command::Faq { query } => {
            for faq in filter_faqs(&query) {
                println!("Q: {}\nA: {}\n", faq.question, faq.answer);
            }
            Ok(())
        }
        Command::Bookings => {
            let history = BookingHistory::with_mock_bookings();
            println!("{}", serde_json::to_string_pretty(history.list())?);
            Ok(())
        }
    }
}

async fn book(config: &Config, query: Option<String>, seats: usize, seed: Option<u64>) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let query = query.unwrap_or_else(|| {
        let date = today + Duration::days(14);
        format!("from=Mumbai&to=Delhi&date={}&class=3A", date.format("%Y-%m-%d"))
    });
    let search = SearchQuery::parse(&query, today)?;
    tracing::info!("Searching trains {} → {} on {}", search.from, search.to, search.date);

    let catalog = TrainCatalog::mock();
    let class = search.class.unwrap_or_default();
    let Some(train) = catalog
        .search(&search)
        .into_iter()
        .find(|t| catalog.bookable_fare(&t.id, class).is_ok())
    else {
        bail!("No train with open {} seats for {} → {}", class, search.from, search.to);
    };

    let ratio = config.coach.available_ratio;
    let mut availability: Box<dyn SeatAvailability> = match seed {
        Some(seed) => Box::new(RandomAvailability::with_rng(StdRng::seed_from_u64(seed), ratio)),
        None => Box::new(RandomAvailability::new(ratio)),
    };
    let mut seat_map = catalog.open_seat_map(
        &train.id,
        class,
        &config.coach,
        config.booking.max_seats,
        availability.as_mut(),
    )?;

    let open: Vec<u32> = seat_map
        .selection
        .seats()
        .iter()
        .filter(|s| s.is_available())
        .map(|s| s.id)
        .take(seats)
        .collect();
    for seat_id in open {
        let outcome = seat_map.selection.toggle(seat_id);
        if let Some(notice) = outcome.message(seat_map.selection.max_selected()) {
            tracing::warn!("Seat {}: {}", seat_id, notice);
        }
    }

    let session = Session::signed_in(UserProfile {
        name: "John Doe".to_string(),
        email: Masked::from("john.doe@example.com"),
        mobile: Masked::from("+91 98765 43210"),
        address: "Mumbai, Maharashtra".to_string(),
    });
    let coordinator = BookingCoordinator::with_mock_gateway(&config.booking)?;
    let mut draft = coordinator.proceed_to_checkout(&session, &seat_map)?;

    while draft.passengers.len() < draft.seats.len() && draft.passengers.add_passenger() {}
    let ids: Vec<u32> = draft.passengers.entries().iter().map(|e| e.id).collect();
    for (id, (name, age, gender, berth)) in ids.into_iter().zip(DEMO_PASSENGERS.iter()) {
        draft.passengers.update_field(id, PassengerField::Name, name)?;
        draft.passengers.update_field(id, PassengerField::Age, age)?;
        draft.passengers.update_field(id, PassengerField::Gender, gender)?;
        draft.passengers.update_field(id, PassengerField::Berth, berth)?;
    }
    coordinator.proceed_to_payment(&mut draft)?;

    let method = PaymentMethod::Upi {
        vpa: Masked::from("johndoe@okbank"),
    };
    let booking = coordinator.confirm_payment(&mut draft, method).await?;

    let event = booking.confirmation_event();
    tracing::info!(?event, "E-ticket sent");

    let mut history = BookingHistory::with_mock_bookings();
    history.record(&booking, train, search.date);

    println!("{}", serde_json::to_string_pretty(&booking)?);
    println!("{}", serde_json::to_string_pretty(history.list())?);
    Ok(())
}
