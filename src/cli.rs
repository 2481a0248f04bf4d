use crate::config::load_config;
use crate::parser::parse_xaml_with_limit;
use crate::prompt::documentation_prompt;
use crate::render::{render_document, render_fragment, write_output};
use crate::tree_dump::TreeDump;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "xamlr", version, about = "UiPath XAML workflow visualizer")]
pub struct Args {
    /// Input file (.xaml) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "html")]
    pub output_format: OutputFormat,

    /// Config JSON5 file (theme preset, themeVariables, render settings)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Indentation per nesting level, in pixels
    #[arg(long = "indent")]
    pub indent: Option<f32>,

    /// Conversion depth past which subtrees degrade into error nodes
    #[arg(long = "maxDepth")]
    pub max_depth: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    /// Self-contained HTML document with embedded stylesheet
    Html,
    /// Bare HTML fragment without the stylesheet wrapper
    Fragment,
    /// JSON dump of the parsed activity tree
    Json,
    /// Documentation-generator prompt built from the raw markup
    Prompt,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(indent) = args.indent {
        config.render.indent_step = indent;
    }
    if let Some(max_depth) = args.max_depth {
        config.render.max_depth = max_depth;
    }

    let input = read_input(args.input.as_deref())?;

    let rendered = match args.output_format {
        // The documentation prompt operates on the raw markup, before and
        // independently of the tree model.
        OutputFormat::Prompt => documentation_prompt(&input),
        OutputFormat::Html | OutputFormat::Fragment | OutputFormat::Json => {
            let tree = parse_xaml_with_limit(&input, config.render.max_depth)?;
            match args.output_format {
                OutputFormat::Html => render_document(&tree, &config.theme, &config.render),
                OutputFormat::Fragment => render_fragment(&tree, 0, &config.render),
                _ => TreeDump::from_node(&tree).to_json()?,
            }
        }
    };

    write_output(&rendered, args.output.as_deref())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
