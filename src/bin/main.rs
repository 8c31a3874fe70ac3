mod common;
use std::env::{set_var, var};
use std::error::Error;
use std::path::Path;

use chrono::Utc;
use clap::{Parser, Subcommand};
use log::{info, trace, warn};
use serde_json::json;

use common::config::{builder::ConfigContainer, models::Config};
use common::helpers::CLIError;
use firebehavior::{
    calculate_drying_pattern,
    models::input::FireBehaviorParams,
    modules::{
        functions::round_to,
        spread::constants::{
            DEFAULT_FUEL_MODEL, DEFAULT_FUEL_MOISTURE, DEFAULT_HUMIDITY, DEFAULT_TEMPERATURE,
            EMC_DECIMALS,
        },
        timelag::models::TimeLagClass,
    },
    predict_fire_behavior,
    version::LONG_VERSION,
    FireBehaviorConfig,
};

#[derive(Parser, Debug)]
#[command(
    version,
    long_version=LONG_VERSION,
    about="Surface fire behavior calculator: fuel moisture, rate of spread, fireline intensity and flame length",
    long_about="fire-behavior computes the equilibrium moisture content of dead fuels, their time-lag drying curves \
and the Rothermel surface spread of the Anderson fuel models, together with Byram fireline intensity and flame length."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Equilibrium moisture content for a temperature and humidity
    Emc {
        #[arg(long, allow_hyphen_values = true, help = "Air temperature [°F]")]
        temp: f32,
        #[arg(long, help = "Relative humidity [%]")]
        rh: f32,
    },
    /// Moisture curve of a fuel under constant weather
    Drying {
        #[arg(long, help = "Initial fuel moisture [%]")]
        initial: f32,
        #[arg(long, allow_hyphen_values = true, help = "Air temperature [°F]")]
        temp: f32,
        #[arg(long, help = "Relative humidity [%]")]
        rh: f32,
        #[arg(long, default_value_t = 24.0, help = "Duration [h]")]
        duration: f32,
        #[arg(long, default_value = "1h", help = "Time-lag class (1h, 10h, 100h, 1000h)")]
        time_lag: TimeLagClass,
    },
    /// Fire behavior of a single fuel model
    Predict {
        #[arg(long, default_value = DEFAULT_FUEL_MODEL, help = "Fuel model (1-13)")]
        fuel_model: String,
        #[arg(long, default_value_t = 0.0, help = "Midflame wind speed [mph]")]
        wind: f32,
        #[arg(long, default_value_t = DEFAULT_FUEL_MOISTURE, help = "Dead fuel moisture [%]")]
        moisture: f32,
        #[arg(long, default_value_t = 0.0, help = "Slope [°]")]
        slope: f32,
        #[arg(long, default_value_t = DEFAULT_TEMPERATURE, allow_hyphen_values = true, help = "Air temperature [°F]")]
        temp: f32,
        #[arg(long, default_value_t = DEFAULT_HUMIDITY, help = "Relative humidity [%]")]
        rh: f32,
        #[arg(long, help = "Use the EMC of temperature and humidity as fuel moisture")]
        use_emc: bool,
    },
    /// Run the scenarios of a configuration file
    Run {
        #[arg(required = true, help = "Path to the configuration file", index = 1)]
        config_path: String,
    },
}

fn print_json(value: &impl serde::Serialize) -> Result<(), CLIError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| format!("Cannot serialize output: {err}"))?;
    println!("{text}");
    Ok(())
}

fn run_config(config_path_str: &str) -> Result<(), CLIError> {
    if !Path::new(config_path_str).is_file() {
        return Err(format!("Config file {} is not a file", config_path_str).into());
    }

    let c = Utc::now();
    let container = ConfigContainer::from_file(config_path_str)
        .map_err(|err| format!("Failed to load config: {}", err))?;
    let config = Config::new(container)?;
    trace!("Loading configuration took {} seconds", Utc::now() - c);

    let outputs = config.evaluate();
    if outputs.len() < config.scenarios().len() {
        warn!(
            "{} of {} scenarios failed",
            config.scenarios().len() - outputs.len(),
            config.scenarios().len()
        );
    }

    let mut output_writer = config.get_output_writer();
    if output_writer.is_empty() {
        return print_json(&outputs);
    }

    let c = Utc::now();
    output_writer.write_outputs(&outputs)?;
    trace!("Writing outputs took {} seconds", Utc::now() - c);
    Ok(())
}

fn run_command(command: Command) -> Result<(), CLIError> {
    let config = FireBehaviorConfig::default();

    match command {
        Command::Emc { temp, rh } => {
            let emc = config.emc(temp, rh)?;
            print_json(&json!({
                "tempF": temp,
                "rh": rh,
                "emc": round_to(emc, EMC_DECIMALS),
            }))
        }
        Command::Drying {
            initial,
            temp,
            rh,
            duration,
            time_lag,
        } => {
            info!("Drying {time_lag} fuel for {duration} hours");
            let pattern = calculate_drying_pattern(
                initial,
                temp,
                rh,
                duration,
                time_lag.hours(),
                config.emc_model(),
            )?;
            print_json(&pattern)
        }
        Command::Predict {
            fuel_model,
            wind,
            moisture,
            slope,
            temp,
            rh,
            use_emc,
        } => {
            let params = FireBehaviorParams {
                wind_speed: wind,
                fuel_moisture: moisture,
                slope,
                fuel_model,
                temp: Some(temp),
                rh: Some(rh),
                use_emc,
            };
            let result = predict_fire_behavior(&params, &config)?;
            if let Some(message) = &result.message {
                info!("{message}");
            }
            print_json(&result)
        }
        Command::Run { config_path } => run_config(&config_path),
    }
}

/// main function
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if var("RUST_LOG").is_err() {
        set_var("RUST_LOG", "info")
    }
    pretty_env_logger::init();

    let start_time = Utc::now();
    run_command(args.command)?;
    trace!("Elapsed time: {} seconds", Utc::now() - start_time);

    Ok(())
}
