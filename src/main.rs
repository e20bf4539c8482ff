use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use thermistor_calc::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "thermistor-calc")]
#[command(
    about = "Thermistor over-temperature divider calculator - supply any two of R1, R25 and trip temperature",
    long_about = None
)]
struct Cli {
    /// Thermistor type (NTC or PTC)
    #[arg(long = "type", default_value = "NTC")]
    thermistor_type: String,
    /// B constant in kelvin
    #[arg(short, long = "beta", default_value = "3950")]
    b: String,
    /// Supply voltage in volts
    #[arg(long, default_value = "5")]
    vcc: String,
    /// NTC trigger ratio (fraction of Vcc)
    #[arg(short, default_value = "0.45")]
    x: String,
    /// PTC trigger ratio (fraction of Vcc)
    #[arg(short, default_value = "0.8")]
    y: String,
    /// Series resistor in ohms (e.g. 10000, 10K, 4K7)
    #[arg(long)]
    r1: Option<String>,
    /// Thermistor resistance at 25 °C in ohms
    #[arg(long)]
    r25: Option<String>,
    /// Trip temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    tt: Option<String>,
    /// Also report the nearest standard value for the derived resistor
    #[arg(long, value_enum)]
    series: Option<Series>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Series {
    E3,
    E6,
    E12,
    E24,
}

impl Series {
    fn table(self) -> &'static RSeries {
        match self {
            Series::E3 => &*E3,
            Series::E6 => &*E6,
            Series::E12 => &*E12,
            Series::E24 => &*E24,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let raw = RawInputs {
        thermistor_type: cli.thermistor_type,
        b: cli.b,
        vcc: cli.vcc,
        x: cli.x,
        y: cli.y,
        r1: cli.r1.unwrap_or_default(),
        r25: cli.r25.unwrap_or_default(),
        tt: cli.tt.unwrap_or_default(),
    };

    let (params, inputs) = match raw.parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Input error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let res = match solve(params, inputs) {
        Ok(res) => res,
        Err(e @ CoreError::RequestIncomplete { .. }) => {
            eprintln!("{}", e);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Computation error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", res);

    if let Some(series) = cli.series {
        match series.table().fit(&params, &res) {
            Ok(Some(fit)) => println!("\n{}", fit),
            Ok(None) => {}
            Err(e) => {
                eprintln!("Computation error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
