use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use pitch_engine::cli_api::parse_release_position;
use pitch_engine::{
    run_dispersion, run_request, sample_trajectory, simulate_with, summarize, DispersionParams,
    Handedness, PhysicsConfig, PitchRequest, PitchSpec, SimulationOptions, StrikeZone,
};

#[derive(Parser)]
#[command(name = "pitch-cli")]
#[command(version = "0.1.0")]
#[command(about = "Baseball pitch trajectory calculator", long_about = None)]
struct Cli {
    /// Physics configuration file (JSON); missing fields keep their defaults
    #[arg(long, global = true)]
    physics: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a single pitch
    Simulate {
        #[command(flatten)]
        pitch: PitchArgs,

        /// Time step (seconds)
        #[arg(long, default_value = "0.0005")]
        time_step: f64,

        /// Interpolate the final position to the exact plate plane
        #[arg(long)]
        interpolate: bool,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Full output (show all trajectory points)
        #[arg(long)]
        full: bool,
    },

    /// Answer a JSON pitch request (file path, or - for stdin)
    Request {
        input: String,
    },

    /// Run a release dispersion study
    Dispersion {
        #[command(flatten)]
        pitch: PitchArgs,

        /// Number of simulations
        #[arg(short = 'n', long, default_value = "500")]
        num_sims: usize,

        /// Speed standard deviation (m/s)
        #[arg(long, default_value = "0.5")]
        speed_std: f64,

        /// Spin rate standard deviation (rpm)
        #[arg(long, default_value = "50.0")]
        spin_std: f64,

        /// Launch angle standard deviation (degrees), applied to theta and phi
        #[arg(long, default_value = "0.5")]
        angle_std: f64,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output format
        #[arg(short = 'o', long, default_value = "summary")]
        output: DispersionOutput,
    },

    /// Display model information
    Info,
}

#[derive(clap::Args, Debug, Clone)]
struct PitchArgs {
    /// Throwing hand (LHP or RHP)
    #[arg(long, default_value = "RHP")]
    handedness: String,

    /// Release speed (m/s)
    #[arg(short = 'v', long)]
    velocity: f64,

    /// Spin rate (rpm)
    #[arg(short = 's', long, default_value = "2000")]
    spin: f64,

    /// Release position "x,y,z" (meters)
    #[arg(short = 'r', long, default_value = "0,1.8,0", allow_hyphen_values = true)]
    release: String,

    /// Launch elevation (degrees)
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    theta: f64,

    /// Launch azimuth (degrees)
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    phi: f64,
}

impl PitchArgs {
    fn to_spec(&self) -> Result<PitchSpec, Box<dyn Error>> {
        let handedness = Handedness::from_str(&self.handedness)
            .ok_or_else(|| format!("Invalid handedness: {}. Use LHP or RHP.", self.handedness))?;
        let release = parse_release_position(&self.release)?;
        let spec = PitchSpec::from_degrees(handedness, self.velocity, self.spin, release, self.theta, self.phi);
        spec.validate()?;
        Ok(spec)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DispersionOutput {
    Summary,
    Json,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let physics = match &cli.physics {
        Some(path) => PhysicsConfig::from_json_file(path)?,
        None => PhysicsConfig::default(),
    };

    match cli.command {
        Commands::Simulate { pitch, time_step, interpolate, output, full } => {
            let spec = pitch.to_spec()?;
            let mut options = SimulationOptions::default().with_time_step(time_step);
            if interpolate {
                options = options.interpolated();
            }

            let (trajectory, final_position) = simulate_with(&spec, &physics, &options)?;
            let summary = summarize(&trajectory, &final_position, &spec);
            let call = StrikeZone::default().call(&final_position);

            match output {
                OutputFormat::Json => {
                    let response = serde_json::json!({
                        "finalPosition": final_position.rounded(),
                        "call": call,
                        "summary": summary,
                        "trajectory": pitch_engine::trajectory_sampling::to_xyz(trajectory.points()),
                    });
                    println!("{}", serde_json::to_string_pretty(&response)?);
                },

                OutputFormat::Csv => {
                    println!("time,x,y,z");
                    for (i, p) in trajectory.points().iter().enumerate() {
                        println!("{:.4},{:.4},{:.4},{:.4}", trajectory.time_at(i), p.x, p.y, p.z);
                    }
                },

                OutputFormat::Table => {
                    println!("╔════════════════════════════════════════╗");
                    println!("║         PITCH RESULTS ({})            ║", spec.handedness);
                    println!("╠════════════════════════════════════════╣");
                    println!("║ Plate Height:      {:>8.2} m          ║", final_position.y);
                    println!("║ Plate Lateral:     {:>8.2} m          ║", final_position.z);
                    println!("║ Call:              {:>8}            ║", call);
                    println!("║ Time of Flight:    {:>8.3} s          ║", summary.time_of_flight_s);
                    println!("║ Plate Speed:       {:>8.2} m/s        ║", summary.plate_speed_mps);
                    println!("║ Vertical Drop:     {:>8.2} m          ║", summary.vertical_drop_m);
                    println!("║ Lateral Break:     {:>8.2} m          ║", summary.lateral_break_m);
                    println!("║ Steps:             {:>8}            ║", summary.steps);
                    println!("╚════════════════════════════════════════╝");

                    println!("\nTrajectory Points:");
                    println!("┌──────────┬──────────┬──────────┬──────────┐");
                    println!("│ Time (s) │  X (m)   │  Y (m)   │  Z (m)   │");
                    println!("├──────────┼──────────┼──────────┼──────────┤");
                    if full {
                        for (i, p) in trajectory.points().iter().enumerate() {
                            println!("│ {:>8.4} │ {:>8.3} │ {:>8.3} │ {:>8.3} │",
                                trajectory.time_at(i), p.x, p.y, p.z);
                        }
                    } else {
                        for sample in sample_trajectory(&trajectory, 2.0) {
                            println!("│ {:>8.4} │ {:>8.3} │ {:>8.3} │ {:>8.3} │",
                                sample.time_s, sample.distance_m, sample.height_m, sample.lateral_m);
                        }
                    }
                    println!("└──────────┴──────────┴──────────┴──────────┘");
                },
            }
        },

        Commands::Request { input } => {
            let text = if input == "-" {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                fs::read_to_string(&input)?
            };
            let request: PitchRequest = serde_json::from_str(&text)?;
            let response = run_request(&request, &physics, &SimulationOptions::default())?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        },

        Commands::Dispersion { pitch, num_sims, speed_std, spin_std, angle_std, seed, output } => {
            let spec = pitch.to_spec()?;
            let params = DispersionParams {
                num_simulations: num_sims,
                speed_std_dev: speed_std,
                spin_rate_std_dev: spin_std,
                theta_std_dev: angle_std.to_radians(),
                phi_std_dev: angle_std.to_radians(),
                seed,
                ..Default::default()
            };
            let results = run_dispersion(&spec, &params, &physics, &SimulationOptions::default())?;

            match output {
                DispersionOutput::Summary => {
                    println!("╔════════════════════════════════════════╗");
                    println!("║      RELEASE DISPERSION                ║");
                    println!("║      {:>6} simulations               ║", results.succeeded());
                    println!("╠════════════════════════════════════════╣");
                    println!("║ PLATE HEIGHT                           ║");
                    println!("║ Mean:              {:>8.3} m          ║", results.mean_height_m);
                    println!("║ Std Dev:           {:>8.3} m          ║", results.std_height_m);
                    println!("╠════════════════════════════════════════╣");
                    println!("║ PLATE LATERAL                          ║");
                    println!("║ Mean:              {:>8.3} m          ║", results.mean_lateral_m);
                    println!("║ Std Dev:           {:>8.3} m          ║", results.std_lateral_m);
                    println!("╠════════════════════════════════════════╣");
                    println!("║ Strike Rate:       {:>8.1} %          ║", results.strike_rate * 100.0);
                    println!("║ Failed Samples:    {:>8}            ║", results.failed);
                    println!("╚════════════════════════════════════════╝");
                },

                DispersionOutput::Json => {
                    println!("{}", serde_json::to_string_pretty(&results)?);
                },
            }
        },

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      PITCH ENGINE v0.1.0               ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Baseball pitch trajectory engine.      ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Model:                                 ║");
            println!("║ • Gravity, drag, Magnus lift           ║");
            println!("║ • Fixed-step explicit Euler            ║");
            println!("║ • Plate distance {:>5.1} m              ║", SimulationOptions::default().target_distance);
            println!("║ • Ball mass {:>6.3} kg                 ║", physics.mass_kg);
            println!("║ • Air density {:>6.3} kg/m³            ║", physics.air_density_kg_m3);
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}
