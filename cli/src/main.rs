//! resumedoc CLI - render marker-tagged resume text to DOCX

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use resumedoc::{suggest_filename, DocxRenderer, JsonFormat, StyleSheet};

#[derive(Parser)]
#[command(name = "resumedoc")]
#[command(version)]
#[command(about = "Render marker-tagged resume text to a formatted DOCX", long_about = None)]
struct Cli {
    /// Input marker text file ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output .docx file (derived from the [NAME] line if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a DOCX file (the default when only FILE is given)
    Docx {
        /// Input marker text file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output .docx file (derived from the [NAME] line if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Print the composed document structure as JSON
    Json {
        /// Input marker text file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// JSON layout
        #[arg(long, value_enum, default_value = "pretty")]
        format: JsonLayout,

        #[command(flatten)]
        style: StyleArgs,
    },
}

#[derive(clap::Args, Clone)]
struct StyleArgs {
    /// Default font family
    #[arg(long, value_name = "NAME")]
    font: Option<String>,

    /// Default font size in points
    #[arg(long, value_name = "PT")]
    font_size: Option<f32>,

    /// Page margin in inches (all four sides)
    #[arg(long, value_name = "IN")]
    margin: Option<f32>,
}

impl StyleArgs {
    fn build(&self) -> StyleSheet {
        let mut style = StyleSheet::new();
        if let Some(ref font) = self.font {
            style = style.with_font(font.clone());
        }
        if let Some(size) = self.font_size {
            style = style.with_font_size(size);
        }
        if let Some(margin) = self.margin {
            style = style.with_margin(margin);
        }
        style
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum JsonLayout {
    Pretty,
    Compact,
}

impl From<JsonLayout> for JsonFormat {
    fn from(layout: JsonLayout) -> Self {
        match layout {
            JsonLayout::Pretty => JsonFormat::Pretty,
            JsonLayout::Compact => JsonFormat::Compact,
        }
    }
}

fn read_input(path: &Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}

fn render_docx(input: &Path, output: Option<PathBuf>, style: StyleSheet) -> Result<(), String> {
    let text = read_input(input).map_err(|e| format!("cannot read {}: {}", input.display(), e))?;

    let renderer = DocxRenderer::with_style(style);
    let bytes = renderer
        .render(&text)
        .map_err(|e| format!("render failed: {}", e))?;

    let output = output.unwrap_or_else(|| {
        let name = suggest_filename(&text, "", "");
        input
            .parent()
            .map(|dir| dir.join(&name))
            .unwrap_or_else(|| PathBuf::from(&name))
    });

    fs::write(&output, &bytes)
        .map_err(|e| format!("cannot write {}: {}", output.display(), e))?;
    info!("wrote {} ({} bytes)", output.display(), bytes.len());
    println!("{}", output.display());
    Ok(())
}

fn render_json(input: &Path, format: JsonFormat, style: StyleSheet) -> Result<(), String> {
    let text = read_input(input).map_err(|e| format!("cannot read {}: {}", input.display(), e))?;

    let renderer = DocxRenderer::with_style(style);
    let json = renderer
        .render_json(&text, format)
        .map_err(|e| format!("render failed: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Some(Commands::Docx {
            input,
            output,
            style,
        }) => render_docx(&input, output, style.build()),
        Some(Commands::Json {
            input,
            format,
            style,
        }) => render_json(&input, format.into(), style.build()),
        None => {
            let input = cli
                .input
                .ok_or_else(|| "no input file given (try --help)".to_string())?;
            render_docx(&input, cli.output, cli.style.build())
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}
