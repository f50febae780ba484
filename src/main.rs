use clap::Parser;
use fomake::{Converter, ConverterConfig, FomakeError};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Convert an XSL-FO document into a pdfmake document definition")]
struct Args {
    /// Path to the XSL-FO document
    input: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print only the content of this flow instead of the whole definition
    #[arg(short, long)]
    flow: Option<String>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> Result<(), FomakeError> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConverterConfig::from_json_file(path)?,
        None => ConverterConfig::default(),
    };
    let converter = Converter::new(&config)?;

    log::info!("Converting {}", args.input.display());
    let markup = fs::read_to_string(&args.input)?;
    let output = match args.flow.as_deref() {
        Some(flow) => serde_json::to_value(converter.convert_flow_str(&markup, Some(flow))?)?,
        None => serde_json::to_value(converter.convert_str(&markup)?)?,
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);
    Ok(())
}
