// src/bin/stage_merge.rs

use std::env;
use std::error::Error;

use stage_telemetry_render::constants::EXPORT_COLUMNS;
use stage_telemetry_render::crate_version;
use stage_telemetry_render::plot_framework::{root_name_from_path, RenderConfig};
use stage_telemetry_render::plot_functions::plot_flight_profile::plot_flight_profile;
use stage_telemetry_render::stage_inputs::{load_stitched_flight, usage, StageInputs};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // --- Argument Parsing ---
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "stage_merge".to_string());
    let Some(inputs) = StageInputs::from_args(args) else {
        eprintln!("{}", usage(&program));
        std::process::exit(1);
    };
    println!("stage_merge {}", crate_version());

    let flight = load_stitched_flight(&inputs, EXPORT_COLUMNS)?;

    let render_config = RenderConfig::default();
    let root_name = root_name_from_path(&inputs.first_file);

    println!("\n--- Generating Stacked Flight Profile Plot ---");
    plot_flight_profile(&flight.rows, &root_name, &render_config)?;

    Ok(())
}

// src/bin/stage_merge.rs
