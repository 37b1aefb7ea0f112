//! QGIS SVG parametrizer CLI
//!
//! Usage:
//!   qgis-svg-param [OPTIONS] [FILE]
//!
//! Options:
//!   -p, --preserve-original  Keep original values after the placeholders
//!       --preview            Print the document with parameters applied
//!   -c, --params <FILE>      Parameter file (TOML format)
//!   -o, --output <DIR>       Write NAME-qgis.svg into DIR instead of stdout
//!   -v, --verbose            Debug logging on stderr
//!   -h, --help               Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use qgis_svg_param::{
    exported_file_name, is_svg_file_name, process_with_config, ParamPreset, ProcessConfig,
    SvgArtifact, SvgParams,
};

#[derive(Parser)]
#[command(name = "qgis-svg-param")]
#[command(about = "Convert SVG files into QGIS-parametrized symbols")]
struct Cli {
    /// Input SVG file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Keep original attribute values after the placeholders
    #[arg(short, long)]
    preserve_original: bool,

    /// Print the document with parameter values applied instead of placeholders
    #[arg(long)]
    preview: bool,

    /// Parameter file (TOML format)
    #[arg(short = 'c', long)]
    params: Option<PathBuf>,

    /// Preview fill color
    #[arg(long)]
    fill: Option<String>,

    /// Preview fill opacity (0 to 1)
    #[arg(long)]
    fill_opacity: Option<f64>,

    /// Preview stroke color
    #[arg(long)]
    stroke: Option<String>,

    /// Preview stroke opacity (0 to 1)
    #[arg(long)]
    stroke_opacity: Option<f64>,

    /// Preview stroke width (0 to 10)
    #[arg(long)]
    stroke_width: Option<f64>,

    /// Directory to write the exported file into (requires FILE)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Parameters from the params file, then individual flag overrides
    fn load_params(&self) -> Result<SvgParams, String> {
        let mut params = match &self.params {
            Some(path) => {
                let preset = ParamPreset::from_file(path).map_err(|e| {
                    format!("Error loading params '{}': {}", path.display(), e)
                })?;
                tracing::debug!(name = ?preset.name, path = %path.display(), "loaded params");
                preset.params
            }
            None => SvgParams::default(),
        };
        if let Some(fill) = &self.fill {
            params = params.with_fill(fill.as_str());
        }
        if let Some(opacity) = self.fill_opacity {
            params = params.with_fill_opacity(opacity);
        }
        if let Some(stroke) = &self.stroke {
            params = params.with_stroke(stroke.as_str());
        }
        if let Some(opacity) = self.stroke_opacity {
            params = params.with_stroke_opacity(opacity);
        }
        if let Some(width) = self.stroke_width {
            params = params.with_stroke_width(width);
        }
        Ok(params)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let params = match cli.load_params() {
        Ok(params) => params,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };

    // Read input
    let source = match &cli.input {
        Some(path) => {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            if !is_svg_file_name(name) {
                eprintln!("Error: Please upload a valid SVG file ('{}')", path.display());
                std::process::exit(1);
            }
            match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading file '{}': {}", path.display(), e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = ProcessConfig::new()
        .with_preserve_original(cli.preserve_original)
        .with_preview(cli.preview)
        .with_params(params);
    let svg = match process_with_config(&source, &config) {
        Ok(svg) => svg,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match (&cli.output, &cli.input) {
        (Some(dir), Some(input)) => {
            let name = input
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            let artifact = SvgArtifact::new(exported_file_name(name), svg);
            match artifact.write_to_dir(dir) {
                Ok(path) => eprintln!("Wrote {}", path.display()),
                Err(e) => {
                    eprintln!("Error writing to '{}': {}", dir.display(), e);
                    std::process::exit(1);
                }
            }
        }
        (Some(_), None) => {
            eprintln!("Error: --output requires an input FILE to name the export");
            std::process::exit(1);
        }
        (None, _) => println!("{}", svg),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Shown when run interactively without input
const INTRO: &str = r##"QGIS SVG parametrizer - turn SVG icons into QGIS-parametrized symbols

USAGE:
    qgis-svg-param [OPTIONS] [FILE]
    cat icon.svg | qgis-svg-param

OPTIONS:
    -p, --preserve-original  Keep original values: fill="param(fill) #ff0000"
        --preview            Apply parameter values instead of placeholders
    -c, --params <FILE>      Parameter file (TOML, see below)
        --fill <COLOR>       Preview fill color        (default #667eea)
        --fill-opacity <N>   Preview fill opacity      (default 0.8)
        --stroke <COLOR>     Preview stroke color      (default #764ba2)
        --stroke-opacity <N> Preview stroke opacity    (default 1)
        --stroke-width <N>   Preview stroke width      (default 2)
    -o, --output <DIR>       Write NAME-qgis.svg into DIR
    -v, --verbose            Debug logging
    -h, --help               Print help

REWRITTEN ATTRIBUTES (on path, rect, circle, ellipse, polygon, polyline, line, text):
    fill            -> param(fill)
    fill-opacity    -> param(fill-opacity)
    stroke          -> param(outline)
    stroke-opacity  -> param(outline-opacity)
    stroke-width    -> param(outline-width)

PARAMS FILE:
    [metadata]
    name = "Water"

    [params]
    fill = "#3388ff"
    fill-opacity = 0.5
    stroke-width = 1.5

QUICK START:
    qgis-svg-param marker.svg -o ."##;

fn print_intro() {
    println!("{}", INTRO);
}
