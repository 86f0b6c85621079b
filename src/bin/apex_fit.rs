// src/bin/apex_fit.rs

use std::env;
use std::error::Error;

use stage_telemetry_render::constants::EXPORT_COLUMNS;
use stage_telemetry_render::crate_version;
use stage_telemetry_render::data_analysis::apex_fit::{analyze_apex, ApexFitConfig};
use stage_telemetry_render::plot_framework::{root_name_from_path, RenderConfig};
use stage_telemetry_render::plot_functions::plot_apex_fit::plot_apex_fit;
use stage_telemetry_render::stage_inputs::{load_stitched_flight, usage, StageInputs};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // --- Argument Parsing ---
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "apex_fit".to_string());
    let Some(inputs) = StageInputs::from_args(args) else {
        eprintln!("{}", usage(&program));
        std::process::exit(1);
    };
    println!("apex_fit {}", crate_version());

    let flight = load_stitched_flight(&inputs, EXPORT_COLUMNS)?;

    let fit_config = ApexFitConfig::default();
    println!(
        "\n--- Fitting Apex Parabola (burnout t={} s, window {} samples) ---",
        fit_config.burnout_time_s, fit_config.window_capacity
    );
    let report = analyze_apex(&flight.rows, &fit_config)?;
    println!(
        "  {} windows fitted, {} skipped, {} rows after burnout.",
        report.windows_fitted, report.windows_skipped, report.rows_considered
    );
    match &report.best {
        Some(best) => {
            println!(
                "  Best window [{:.3}, {:.3}] s ({} samples): p = {:.6}·t² {:+.6}·t {:+.6}",
                best.window_start,
                best.window_end,
                best.fit.sample_count,
                best.fit.a,
                best.fit.b,
                best.fit.c
            );
            println!(
                "  Quality (sum of squared standard errors): {:e}, residual sum of squares: {:e}",
                best.fit.quality, best.fit.residual_sum_squares
            );
            if let Some((apex_time, apex_pressure)) = best.apex() {
                println!("  Estimated apex at t={apex_time:.3} s, p={apex_pressure:.3}");
            }
        }
        None => println!("  No complete window after burnout; plotting pressure only."),
    }

    if let Some(event) = flight.events.iter().find(|e| e.name == "APOGEE") {
        println!("  Export reports APOGEE at t={:.3} s.", event.time_sec);
    }

    let render_config = RenderConfig::default();
    let root_name = root_name_from_path(&inputs.first_file);

    println!("\n--- Generating Apex Fit Plot ---");
    plot_apex_fit(&flight.rows, &report, &root_name, &render_config)?;

    Ok(())
}

// src/bin/apex_fit.rs
