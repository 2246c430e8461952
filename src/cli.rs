use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, Parser, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use geninfo::{GenerationInfo, LayoutOptions, normalize_line_breaks, png, render_document};

const DEFAULT_PAGE_TITLE: &str = "Generation info";

#[derive(Debug, Clone, PartialEq, Eq)]
enum InputSource {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone)]
enum OutputDestination {
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Parser)]
#[command(
    name = "geninfo",
    about = "Parse image generation metadata and lay it out as HTML or JSON."
)]
pub struct RenderArgs {
    /// Path to a metadata text file or a generated PNG. Use '-' to read from stdin.
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Path to the output file. Use '-' to write to stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Output format (defaults to the output file extension or html).
    #[arg(short = 'e', long = "output-format")]
    output_format: Option<OutputFormat>,

    /// Class prefix used for the layout containers.
    #[arg(long = "class-prefix", default_value = geninfo::DEFAULT_CLASS_PREFIX)]
    class_prefix: String,

    /// Suppress informational output.
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    /// Bare layout fragment.
    Html,
    /// Standalone HTML page wrapping the layout.
    Page,
    /// JSON array of `{name, value}` fields.
    Json,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
        {
            Some(ext) if ext == "html" || ext == "htm" => Some(OutputFormat::Page),
            Some(ext) if ext == "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

pub fn run_render(cli: RenderArgs) -> Result<()> {
    let input = parse_input(cli.input.as_deref())?;
    let output = parse_output(cli.output.as_deref())?;
    let format = determine_format(cli.output_format, &output);

    let raw = load_info(&input)?;
    let info = GenerationInfo::parse(&normalize_line_breaks(&raw));
    tracing::info!(fields = info.len(), ?format, "parsed generation info");

    let options = LayoutOptions::with_class_prefix(cli.class_prefix);
    let rendered = match format {
        OutputFormat::Html => info.render_with(&options),
        OutputFormat::Page => render_document(info.fields(), &options, &page_title(&input)),
        OutputFormat::Json => {
            let mut json = info
                .to_json()
                .context("failed to serialize generation info")?;
            json.push('\n');
            json
        }
    };

    write_output(output, rendered.as_bytes(), cli.quiet)
}

fn parse_input(input: Option<&str>) -> Result<InputSource> {
    match input {
        None | Some("-") => Ok(InputSource::Stdin),
        Some(path_str) => {
            let path = PathBuf::from(path_str);
            if !path.exists() {
                bail!("input file '{}' does not exist", path.display());
            }
            Ok(InputSource::File(path))
        }
    }
}

fn parse_output(output: Option<&str>) -> Result<OutputDestination> {
    match output {
        None | Some("-") => Ok(OutputDestination::Stdout),
        Some(path_str) => {
            let path = PathBuf::from(path_str);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(anyhow!(
                        "output directory '{}' does not exist",
                        parent.display()
                    ));
                }
            }
            Ok(OutputDestination::File(path))
        }
    }
}

fn determine_format(preference: Option<OutputFormat>, output: &OutputDestination) -> OutputFormat {
    if let Some(fmt) = preference {
        return fmt;
    }

    match output {
        OutputDestination::Stdout => OutputFormat::Html,
        OutputDestination::File(path) => {
            OutputFormat::from_path(path).unwrap_or(OutputFormat::Html)
        }
    }
}

/// Reads the raw metadata text, pulling it out of the `parameters` chunk
/// when the input is a PNG.
fn load_info(source: &InputSource) -> Result<String> {
    let (bytes, label) = match source {
        InputSource::Stdin => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            (buffer, "stdin".to_string())
        }
        InputSource::File(path) => {
            let bytes =
                fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
            (bytes, format!("'{}'", path.display()))
        }
    };

    let text = if png::is_png(&bytes) {
        png::read_parameters(&bytes)
            .with_context(|| format!("failed to read PNG metadata from {label}"))?
            .ok_or_else(|| anyhow!("image {label} has no generation parameters"))?
    } else {
        String::from_utf8(bytes).with_context(|| format!("{label} is not valid UTF-8 text"))?
    };

    if text.trim().is_empty() {
        bail!("no generation info supplied in {label}");
    }
    Ok(text)
}

fn page_title(source: &InputSource) -> String {
    match source {
        InputSource::Stdin => DEFAULT_PAGE_TITLE.to_string(),
        InputSource::File(path) => path
            .file_name()
            .and_then(|name| name.to_str())
            .map(String::from)
            .unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_string()),
    }
}

fn write_output(dest: OutputDestination, bytes: &[u8], quiet: bool) -> Result<()> {
    match dest {
        OutputDestination::Stdout => {
            let mut stdout = io::stdout();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
        OutputDestination::File(path) => {
            fs::write(&path, bytes)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            if !quiet {
                println!("Rendered info -> {}", path.display());
            }
        }
    }
    Ok(())
}
