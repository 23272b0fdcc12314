use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use heatloop::render::{feeder_summary, outline_to_svg, plan_summary, plan_to_svg};
use heatloop::{
    generate_bifilar_outline, init_logging, parse_length, plan_layout, route_feeders, Config,
    GridPoint, LengthUnit, PlacedRoom, Point, RoomLayout, Strategy,
};
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "heatloop",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"),
    about = "Radiant floor heating pipe layout planner"
)]
struct Cli {
    /// Configuration file (.toml or .json); defaults to the user config
    #[arg(long, global = true, env = "HEATLOOP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Svg,
    Summary,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out one room from a JSON room description
    Plan {
        layout: PathBuf,
        #[arg(long)]
        strategy: Option<Strategy>,
        /// Grid units between parallel runs
        #[arg(long)]
        spacing: Option<u32>,
        /// Grid cell size, e.g. 0.1 or 0.5ft
        #[arg(long, value_parser = parse_meters)]
        resolution: Option<f64>,
        /// Cap on the generated run, e.g. 80 or 260ft
        #[arg(long, value_parser = parse_meters)]
        max_length: Option<f64>,
        /// Longest installable circuit, e.g. 100 or 330ft
        #[arg(long, value_parser = parse_meters)]
        circuit_max: Option<f64>,
        /// Supply manifold cell as X,Y
        #[arg(long, value_parser = parse_grid_point)]
        start: Option<GridPoint>,
        /// Return manifold cell as X,Y
        #[arg(long, value_parser = parse_grid_point)]
        end: Option<GridPoint>,
        #[arg(long)]
        close_loop: bool,
        #[arg(long, value_enum, default_value = "summary")]
        format: OutputFormat,
    },
    /// Continuous counterflow outline for a rectangle, in meters
    Outline {
        #[arg(long, value_parser = parse_meters)]
        width: f64,
        #[arg(long, value_parser = parse_meters)]
        length: f64,
        /// Pipe spacing; bare numbers are meters
        #[arg(long, value_parser = parse_meters, default_value = "0.2")]
        spacing: f64,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Feeder leads from a heat source to each room of a house
    Feeders {
        house: PathBuf,
        /// Longest straight run; bare numbers are meters
        #[arg(long, value_parser = parse_meters, default_value = "100")]
        max_run: f64,
        #[arg(long, value_enum, default_value = "summary")]
        format: OutputFormat,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// House description read by `heatloop feeders`.
#[derive(Deserialize)]
struct HouseFile {
    #[serde(default)]
    source: Point,
    rooms: Vec<PlacedRoom>,
}

fn parse_grid_point(raw: &str) -> Result<GridPoint, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{raw}'"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("bad X in '{raw}': {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("bad Y in '{raw}': {e}"))?;
    Ok(GridPoint::new(x, y))
}

/// Length argument in meters, or in feet with an `ft` suffix.
fn parse_meters(raw: &str) -> Result<f64, String> {
    parse_length(raw, LengthUnit::Meters)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)
                .with_context(|| format!("loading config {}", path.display()))?,
            Err(e) => {
                debug!("{}, using defaults", e);
                Config::default()
            }
        },
    };
    Ok(config)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Plan {
            layout,
            strategy,
            spacing,
            resolution,
            max_length,
            circuit_max,
            start,
            end,
            close_loop,
            format,
        } => {
            let room: RoomLayout = read_json(&layout)?;
            let g = &mut config.generation;
            if let Some(strategy) = strategy {
                g.strategy = strategy;
                if spacing.is_none() {
                    g.loop_spacing = strategy.recommended_loop_spacing();
                }
            }
            if let Some(spacing) = spacing {
                g.loop_spacing = spacing;
            }
            if let Some(resolution) = resolution {
                g.grid_resolution_m = resolution;
            }
            if max_length.is_some() {
                g.max_pipe_length_m = max_length;
            }
            g.close_loop |= close_loop;
            if let Some(max) = circuit_max {
                config.zoning.max_circuit_length_m = max;
            }
            config.validate()?;

            let options = config.generation_options(start, end);
            let plan = plan_layout(&room, &options, Some(config.zoning.max_circuit_length_m))
                .with_context(|| format!("planning {}", layout.display()))?;
            info!(
                "{} circuit(s), {:.2} m of pipe",
                plan.zone_count(),
                plan.total_length_m()
            );

            match format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&plan)?)?,
                OutputFormat::Svg => write!(out, "{}", plan_to_svg(&plan, &config.rendering))?,
                OutputFormat::Summary => {
                    write!(out, "{}", plan_summary(&plan, config.rendering.length_unit))?
                }
            }
        }
        Commands::Outline {
            width,
            length,
            spacing,
            format,
        } => {
            let points = generate_bifilar_outline(width, length, spacing)?;
            match format {
                OutputFormat::Json | OutputFormat::Summary => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&points)?)?
                }
                OutputFormat::Svg => {
                    let px_per_m =
                        config.rendering.cell_size_px / config.generation.grid_resolution_m;
                    write!(
                        out,
                        "{}",
                        outline_to_svg(&points, width, length, px_per_m, &config.rendering)
                    )?;
                }
            }
        }
        Commands::Feeders {
            house,
            max_run,
            format,
        } => {
            let house: HouseFile = read_json(&house)?;
            let plan = route_feeders(house.source, &house.rooms, max_run)?;
            match format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&plan)?)?,
                OutputFormat::Summary => {
                    write!(out, "{}", feeder_summary(&plan, config.rendering.length_unit))?
                }
                OutputFormat::Svg => bail!("feeder plans have no SVG output"),
            }
        }
        Commands::Config => write!(out, "{}", config.to_toml_string()?)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[zoning]\nmax_circuit_length_m = 20.0\n",
        )
        .unwrap();
        dir
    }

    fn heatloop(dir: &TempDir, args: &[&str]) -> anyhow::Result<String> {
        let config = dir.path().join("config.toml");
        let mut argv = vec!["heatloop", "--config", config.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv)?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_parse_grid_point() {
        assert_eq!(parse_grid_point("3, 4"), Ok(GridPoint::new(3, 4)));
        assert!(parse_grid_point("3").is_err());
        assert!(parse_grid_point("a,4").is_err());
    }

    #[test]
    fn test_length_arguments_accept_feet() {
        let cli = Cli::try_parse_from([
            "heatloop", "outline", "--width", "10ft", "--length", "3", "--spacing", "0.5ft",
        ])
        .unwrap();
        match cli.command {
            Commands::Outline {
                width,
                length,
                spacing,
                ..
            } => {
                assert!((width - 3.048).abs() < 1e-9);
                assert_eq!(length, 3.0);
                assert!((spacing - 0.1524).abs() < 1e-9);
            }
            _ => panic!("expected outline"),
        }
        assert!(Cli::try_parse_from(["heatloop", "outline", "--width", "3yd", "--length", "3"])
            .is_err());
    }

    #[test]
    fn test_plan_json_output() {
        let dir = workspace();
        let layout = dir.path().join("room.json");
        std::fs::write(
            &layout,
            r#"{
                "room": {"width_m": 2.0, "length_m": 1.5},
                "obstacles": [{"x": 0, "y": 0, "width": 4, "height": 4}]
            }"#,
        )
        .unwrap();

        let text = heatloop(
            &dir,
            &[
                "plan",
                layout.to_str().unwrap(),
                "--strategy",
                "boustrophedon",
                "--format",
                "json",
            ],
        )
        .unwrap();

        let plan: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(plan["cols"], 20);
        assert_eq!(plan["rows"], 15);
        let zones = plan["zones"].as_array().unwrap();
        assert!(zones.len() >= 2);
        for zone in zones {
            assert!(zone["length_m"].as_f64().unwrap() <= 20.0 + 1e-6);
        }
    }

    #[test]
    fn test_plan_rejects_start_outside_room() {
        let dir = workspace();
        let layout = dir.path().join("room.json");
        std::fs::write(&layout, r#"{"room": {"width_m": 1.0, "length_m": 1.0}}"#).unwrap();

        let err = heatloop(&dir, &["plan", layout.to_str().unwrap(), "--start", "40,2"])
            .unwrap_err();
        assert!(
            format!("{:#}", err).contains("outside the 10x10 grid"),
            "{:#}",
            err
        );
    }

    #[test]
    fn test_outline_svg() {
        let dir = workspace();
        let svg = heatloop(
            &dir,
            &[
                "outline", "--width", "4", "--length", "3", "--spacing", "0.5", "--format", "svg",
            ],
        )
        .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<path d=\"M "));
    }

    #[test]
    fn test_feeders_summary() {
        let dir = workspace();
        let house = dir.path().join("house.json");
        std::fs::write(
            &house,
            r#"{"rooms": [{"x": 2.0, "y": 2.0, "width": 4.0, "height": 2.0}]}"#,
        )
        .unwrap();

        let text = heatloop(&dir, &["feeders", house.to_str().unwrap()]).unwrap();
        assert!(text.contains("Runs:   2"));
        assert!(text.contains("Total:  7.00 m"));
    }

    #[test]
    fn test_config_prints_effective_values() {
        let dir = workspace();
        let text = heatloop(&dir, &["config"]).unwrap();
        assert!(text.contains("max_circuit_length_m = 20.0"));
        assert!(text.contains("strategy = \"double_spiral\""));
    }
}
