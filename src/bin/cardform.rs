//! Command-line front end to the card form engine.
//!
//! # Usage
//!
//! ```bash
//! # Which scheme does a partial number belong to?
//! cardform detect 3782
//!
//! # Validate a full number
//! cardform validate "4242 4242 4242 4242"
//!
//! # Validate a CVV against the scheme of a number
//! cardform cvv 1234 --number 378282246310005
//!
//! # Show the expiry picker window
//! cardform picker --years 10
//!
//! # Run a whole form through the submit gate
//! cardform form --number 4242424242424242 --expiry 06/2030 --cvv 100 \
//!     --name-visibility hidden --billing-visibility hidden --output json
//! ```

use cardform::picker::{ExpiryRange, MONTH_COMPONENT, YEAR_COMPONENT};
use cardform::{
    cvv, expiry, format, validate_number, CardScheme, CvvPolicy, FieldId, FormConfig, FormGate,
    Visibility,
};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cardform")]
#[command(author, version, about = "Payment card form validation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the card scheme from a full or partial number
    Detect {
        /// Card number digits typed so far
        card_number: String,
    },

    /// Validate a card number
    Validate {
        /// Card number (spaces and dashes allowed)
        card_number: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Group a card number for display
    Format {
        /// Card number to format
        card_number: String,

        /// Separator between groups
        #[arg(short, long, default_value = " ")]
        separator: String,
    },

    /// Validate a CVV
    Cvv {
        /// CVV to validate
        cvv: String,

        /// Card number whose scheme decides the expected length
        #[arg(short, long)]
        number: Option<String>,

        /// Require exactly this many digits regardless of scheme
        #[arg(long)]
        fixed: Option<u8>,
    },

    /// Validate an expiry date
    Expiry {
        /// Expiry date (MM/YY, MM/YYYY, MMYY, ...)
        date: String,

        /// Reject dates more than this many years ahead
        #[arg(short, long)]
        max_years: Option<u16>,
    },

    /// Show the expiry picker window
    Picker {
        /// Years offered after the current one (default 20)
        #[arg(short, long)]
        years: Option<u16>,

        /// Resolve a wheel selection given as MONTH_ROW,YEAR_ROW
        #[arg(short, long, value_parser = parse_rows)]
        select: Option<(usize, usize)>,
    },

    /// Run a complete form through the submit gate
    Form(FormArgs),
}

#[derive(Args)]
struct FormArgs {
    /// Card number
    #[arg(long, default_value = "")]
    number: String,

    /// Expiry date
    #[arg(long, default_value = "")]
    expiry: String,

    /// CVV
    #[arg(long, default_value = "")]
    cvv: String,

    /// Cardholder name
    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    address_line1: String,

    #[arg(long, default_value = "")]
    address_line2: String,

    #[arg(long, default_value = "")]
    city: String,

    #[arg(long, default_value = "")]
    state: String,

    #[arg(long, default_value = "")]
    postal_code: String,

    #[arg(long, default_value = "")]
    country: String,

    #[arg(long, default_value = "")]
    phone: String,

    /// Cardholder name visibility: required, optional or hidden
    #[arg(long, default_value = "required")]
    name_visibility: Visibility,

    /// Billing address visibility: required, optional or hidden
    #[arg(long, default_value = "required")]
    billing_visibility: Visibility,

    /// Form configuration as JSON; overrides the visibility flags
    #[arg(long)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,
}

impl FormArgs {
    fn values(&self) -> [(FieldId, &str); 11] {
        [
            (FieldId::CardNumber, self.number.as_str()),
            (FieldId::Expiry, self.expiry.as_str()),
            (FieldId::Cvv, self.cvv.as_str()),
            (FieldId::CardholderName, self.name.as_str()),
            (FieldId::AddressLine1, self.address_line1.as_str()),
            (FieldId::AddressLine2, self.address_line2.as_str()),
            (FieldId::City, self.city.as_str()),
            (FieldId::State, self.state.as_str()),
            (FieldId::PostalCode, self.postal_code.as_str()),
            (FieldId::Country, self.country.as_str()),
            (FieldId::Phone, self.phone.as_str()),
        ]
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_rows(s: &str) -> Result<(usize, usize), String> {
    let (month, year) = s
        .split_once(',')
        .ok_or_else(|| format!("expected MONTH_ROW,YEAR_ROW, got '{s}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid row '{part}': {e}"))
    };
    Ok((parse(month)?, parse(year)?))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect { card_number } => cmd_detect(&card_number),
        Commands::Validate {
            card_number,
            output,
        } => cmd_validate(&card_number, output),
        Commands::Format {
            card_number,
            separator,
        } => cmd_format(&card_number, &separator),
        Commands::Cvv {
            cvv: cvv_input,
            number,
            fixed,
        } => cmd_cvv(&cvv_input, number.as_deref(), fixed),
        Commands::Expiry { date, max_years } => cmd_expiry(&date, max_years),
        Commands::Picker { years, select } => cmd_picker(years, select),
        Commands::Form(args) => cmd_form(&args),
    }
}

fn exit_for(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_detect(card_number: &str) -> ExitCode {
    let scheme = cardform::detect(&format::strip_separators(card_number));
    println!("Detected Scheme: {}", scheme.name());
    if scheme.is_known() {
        println!("Valid Lengths: {:?}", scheme.valid_lengths());
        println!("CVV Length: {}", scheme.cvv_length());
    }
    exit_for(scheme.is_known())
}

fn cmd_validate(card_number: &str, output: OutputFormat) -> ExitCode {
    let result = validate_number(&format::strip_separators(card_number));
    match output {
        OutputFormat::Text => match &result {
            Ok(scheme) => {
                println!("Valid: yes");
                println!("Scheme: {}", scheme.name());
                println!("Masked: {}", cardform::mask::mask_digits(card_number));
            }
            Err(e) => {
                println!("Valid: no");
                println!("Error: {e}");
            }
        },
        OutputFormat::Json => {
            let value = match &result {
                Ok(scheme) => serde_json::json!({
                    "valid": true,
                    "scheme": scheme,
                    "masked": cardform::mask::mask_digits(card_number),
                }),
                Err(e) => serde_json::json!({ "valid": false, "error": e.to_string() }),
            };
            println!("{value:#}");
        }
    }
    exit_for(result.is_ok())
}

fn cmd_format(card_number: &str, separator: &str) -> ExitCode {
    println!("{}", format::format_with_separator(card_number, separator));
    ExitCode::SUCCESS
}

fn cmd_cvv(cvv_input: &str, number: Option<&str>, fixed: Option<u8>) -> ExitCode {
    let scheme = number.map_or(CardScheme::Unknown, |n| {
        cardform::detect(&format::strip_separators(n))
    });
    let policy = fixed.map_or(CvvPolicy::ByScheme, CvvPolicy::Fixed);

    match cvv::validate_cvv_for_scheme(cvv_input, scheme, policy) {
        Ok(()) => {
            println!("Valid: yes");
            println!("Length: {} digits", policy.expected_length(scheme));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_expiry(date: &str, max_years: Option<u16>) -> ExitCode {
    let now = Utc::now();
    match expiry::validate_expiry_at(date, now, max_years) {
        Ok(exp) => {
            println!("Valid: yes");
            println!("Month: {}", exp.month_label());
            println!("Year: {}", exp.year());
            println!("Formatted: {}", exp.format_short());
            println!("Months Until Expiry: {}", exp.months_after(now));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_picker(years: Option<u16>, select: Option<(usize, usize)>) -> ExitCode {
    let range = match years {
        Some(years) => FormConfig::new().with_expiry_years(years).expiry_range(Utc::now()),
        None => ExpiryRange::current(),
    };
    println!("Window: {} to {}", range.minimum(), range.maximum());
    println!("Month Rows: {}", range.row_count_for(MONTH_COMPONENT));
    println!("Year Rows: {}", range.row_count_for(YEAR_COMPONENT));

    if let Some((month_row, year_row)) = select {
        let picked = range.resolve_selection(month_row, year_row);
        println!("Selected: {picked}");
        if let Some((month_row, year_row)) = range.rows_for(picked) {
            println!("Wheel Rows: {month_row},{year_row}");
        }
    }
    ExitCode::SUCCESS
}

fn cmd_form(args: &FormArgs) -> ExitCode {
    let config = match &args.config {
        Some(json) => match FormConfig::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: invalid config: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => FormConfig::new()
            .with_cardholder_name(args.name_visibility)
            .with_billing_details(args.billing_visibility),
    };

    let gate = FormGate::new(config);
    let now = Utc::now();
    let mut snapshot = gate.new_snapshot();
    for (field, value) in args.values() {
        if !value.is_empty() {
            snapshot.set_value(field, value);
        }
    }
    gate.refresh(&mut snapshot, now);

    let submittable = gate.is_submittable(&snapshot);
    let request = gate.submit(&snapshot, now);

    match args.output {
        OutputFormat::Text => {
            println!("Scheme: {}", gate.scheme(&snapshot));
            for (field, verdict) in gate.verdicts(&snapshot, now) {
                println!("{field}: {verdict}");
            }
            println!("Submittable: {}", if submittable { "yes" } else { "no" });
            if let Err(e) = &request {
                println!("Error: {e}");
            }
        }
        OutputFormat::Json => {
            let verdicts: serde_json::Map<String, serde_json::Value> = gate
                .verdicts(&snapshot, now)
                .into_iter()
                .map(|(field, verdict)| (field.name().to_owned(), serde_json::json!(verdict)))
                .collect();
            let value = match &request {
                Ok(request) => serde_json::json!({
                    "submittable": submittable,
                    "verdicts": verdicts,
                    "token_request": request,
                }),
                Err(e) => serde_json::json!({
                    "submittable": submittable,
                    "verdicts": verdicts,
                    "error": e.to_string(),
                }),
            };
            println!("{value:#}");
        }
    }
    // The button stays disabled until every required field is valid.
    exit_for(submittable && request.is_ok())
}
