use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use foundation::math::Vec2;
use layers::{GlobeConfig, GlobeView, Legend, RenderStatus, Viewport};
use render::SvgSurface;
use scene::Metric;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Orthographic mobility globe renderer")]
struct Cli {
    /// JSON engine configuration (defaults apply to omitted fields)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// GeoJSON FeatureCollection with per-country mobility records
    #[arg(long)]
    input: PathBuf,

    /// Metric key, e.g. retailChange or parks
    #[arg(long, default_value = "retailChange")]
    metric: Metric,

    #[arg(long, default_value_t = 960.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Simulated drag step as DX,DY pixels; repeat for several moves
    #[arg(long = "drag", value_parser = parse_pair, allow_hyphen_values = true)]
    drags: Vec<(f64, f64)>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the globe to SVG
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the legend swatches for a metric
    Legend {
        #[arg(long, default_value = "retailChange")]
        metric: Metric,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the selection event for a screen point as JSON
    Pick {
        #[command(flatten)]
        scene: SceneArgs,

        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => GlobeConfig::load(path).map_err(|e| format!("load {path:?}: {e}"))?,
        None => GlobeConfig::default(),
    };

    match cli.command {
        Command::Render { scene, output } => cmd_render(&config, &scene, output.as_deref()),
        Command::Legend { metric, json } => cmd_legend(&config, metric, json),
        Command::Pick { scene, x, y } => cmd_pick(&config, &scene, Vec2::new(x, y)),
    }
}

fn build_view(config: &GlobeConfig, scene: &SceneArgs) -> Result<GlobeView, String> {
    let collection = formats::load_feature_collection(&scene.input)
        .map_err(|e| format!("read {:?}: {e}", scene.input))?;
    info!(features = collection.len(), "loaded features");

    let mut view = GlobeView::new(config).map_err(|e| e.to_string())?;
    view.set_metric(scene.metric);
    view.resize(Viewport::new(scene.width, scene.height));
    view.set_features(collection);

    if !scene.drags.is_empty() {
        view.drag_start();
        for &(dx, dy) in &scene.drags {
            view.drag_move(dx, dy);
        }
        view.drag_end();
        let r = view.rotation();
        info!(lon = r.longitude, lat = r.latitude, "rotated");
    }
    Ok(view)
}

fn cmd_render(config: &GlobeConfig, scene: &SceneArgs, output: Option<&Path>) -> Result<(), String> {
    let view = build_view(config, scene)?;
    let mut surface = SvgSurface::new();
    if view.render(&mut surface) == RenderStatus::NotReady {
        return Err("nothing to render: no features or invalid viewport".to_string());
    }
    let svg = surface.to_svg_string();
    match output {
        Some(path) => fs::write(path, svg).map_err(|e| format!("write {path:?}: {e}")),
        None => {
            println!("{svg}");
            Ok(())
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LegendOut<'a> {
    metric: Metric,
    caption: &'a str,
    swatches: Vec<SwatchOut>,
    no_data_label: &'a str,
}

#[derive(Serialize)]
struct SwatchOut {
    value: f64,
    color: String,
}

fn cmd_legend(config: &GlobeConfig, metric: Metric, json: bool) -> Result<(), String> {
    let scale = config.diverging_scale().map_err(|e| e.to_string())?;
    let palette = config.palette().map_err(|e| e.to_string())?;
    let legend = Legend::generate(&scale, metric, palette.no_data, config.compact);

    if json {
        let out = LegendOut {
            metric,
            caption: legend.caption(),
            swatches: legend
                .swatches()
                .iter()
                .map(|s| SwatchOut {
                    value: s.value,
                    color: s.fill.to_hex(),
                })
                .collect(),
            no_data_label: legend.no_data_label(),
        };
        let text = serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    println!("{}: {}", metric.label(), legend.caption());
    for swatch in legend.swatches() {
        println!("{:>6}  {}", swatch.value, swatch.fill.to_hex());
    }
    println!("{:>6}  {}", legend.no_data_label(), palette.no_data.to_hex());
    Ok(())
}

fn cmd_pick(config: &GlobeConfig, scene: &SceneArgs, point: Vec2) -> Result<(), String> {
    let mut view = build_view(config, scene)?;
    match view.click_at(point) {
        Some(selection) => {
            let text = serde_json::to_string(&selection).map_err(|e| e.to_string())?;
            println!("{text}");
            Ok(())
        }
        None => Err(format!("no country at ({}, {})", point.x, point.y)),
    }
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got `{s}`"))?;
    let a: f64 = a.trim().parse().map_err(|e| format!("bad number `{a}`: {e}"))?;
    let b: f64 = b.trim().parse().map_err(|e| format!("bad number `{b}`: {e}"))?;
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, parse_pair};
    use clap::Parser;
    use scene::Metric;

    #[test]
    fn parses_drag_pairs() {
        assert_eq!(parse_pair("3,-4.5"), Ok((3.0, -4.5)));
        assert!(parse_pair("3").is_err());
        assert!(parse_pair("a,1").is_err());
    }

    #[test]
    fn parses_render_command() {
        let cli = Cli::try_parse_from([
            "globe", "render", "--input", "world.json", "--metric", "parks", "--drag", "10,-5",
            "--drag", "2,2",
        ])
        .unwrap();
        let Command::Render { scene, output } = cli.command else {
            panic!("expected render");
        };
        assert_eq!(scene.metric, Metric::Parks);
        assert_eq!(scene.drags, vec![(10.0, -5.0), (2.0, 2.0)]);
        assert_eq!(scene.width, 960.0);
        assert!(output.is_none());
    }
}
