use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use paysim::application::checkout::CheckoutService;
use paysim::config::Settings;
use paysim::domain::payment::PaymentRequest;
use paysim::domain::ports::{AccountProviderBox, PaymentGatewayBox};
use paysim::infrastructure::mock_account::MockAccountProvider;
use paysim::infrastructure::simulator::PaymentSimulator;
use paysim::interfaces::csv::request_reader::PaymentRequestReader;
use paysim::interfaces::csv::result_writer::PaymentResultWriter;
use paysim::interfaces::json::{self, PaymentRequestDto};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_DESCRIPTION: &str = "Payment for services";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the account snapshot as JSON
    Account,

    /// Submit one payment and print the response as JSON
    Pay {
        /// Amount to charge, in the currency's minor units at most (none for JPY)
        #[arg(long)]
        amount: Decimal,

        #[arg(long, default_value = "USD")]
        currency: String,

        #[arg(long, default_value = DEFAULT_DESCRIPTION)]
        description: String,
    },

    /// Submit every request in a CSV file and print the results as CSV
    Batch {
        /// Input CSV with an `amount, currency, description` header
        input: PathBuf,
    },

    /// Submit the same payment repeatedly and print outcome counts as JSON
    Simulate {
        #[arg(long, default_value_t = 10_000)]
        count: usize,

        #[arg(long, default_value = "10")]
        amount: Decimal,

        #[arg(long, default_value = "USD")]
        currency: String,
    },

    /// Print the checkout-widget client id
    ClientId,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_request(amount: Decimal, currency: String, description: String) -> Result<PaymentRequest> {
    PaymentRequest::try_from(PaymentRequestDto {
        amount,
        currency,
        description,
    })
    .into_diagnostic()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let settings = Settings::from_env().into_diagnostic()?;

    let accounts: AccountProviderBox = Box::new(MockAccountProvider::from_settings(&settings));
    let payments: PaymentGatewayBox = Box::new(PaymentSimulator::from_settings(&settings));
    let service = CheckoutService::new(accounts, payments)
        .with_retry_policy(CheckoutService::retry_policy_from(&settings));

    match cli.command {
        Command::Account => {
            let account = service.account().await.into_diagnostic()?;
            println!("{}", json::account_to_json(&account).into_diagnostic()?);
        }
        Command::Pay {
            amount,
            currency,
            description,
        } => {
            let request = build_request(amount, currency, description)?;
            // A declined payment is still a processed payment: print it and exit 0.
            let response = service.checkout(&request).await.into_diagnostic()?;
            println!("{}", json::response_to_json(&response).into_diagnostic()?);
        }
        Command::Batch { input } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = PaymentRequestReader::new(file);

            let mut requests = Vec::new();
            for request in reader.requests() {
                match request {
                    Ok(request) => requests.push(request),
                    Err(e) => eprintln!("Error reading payment request: {}", e),
                }
            }

            let results = service.checkout_batch(requests).await;
            let stdout = io::stdout();
            let mut writer = PaymentResultWriter::new(stdout.lock());
            for result in results {
                match result {
                    Ok(response) => writer.write_result(&response).into_diagnostic()?,
                    Err(e) => eprintln!("Error processing payment: {}", e),
                }
            }
            writer.flush().into_diagnostic()?;
        }
        Command::Simulate {
            count,
            amount,
            currency,
        } => {
            let request = build_request(amount, currency, DEFAULT_DESCRIPTION.to_string())?;
            let report = service.simulate(&request, count).await.into_diagnostic()?;
            println!("{}", json::report_to_json(&report).into_diagnostic()?);
        }
        Command::ClientId => {
            println!("{}", settings.client_id());
        }
    }

    Ok(())
}
