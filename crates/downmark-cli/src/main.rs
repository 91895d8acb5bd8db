//! Markdown to HTML command line front end.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use downmark_core::extensions::builtin::{CalloutBlockExtension, HighlightInlineExtension};

#[derive(Parser)]
#[command(
    name = "downmark",
    version,
    about = "Render Markdown to HTML, with optional bundled extensions"
)]
struct Args {
    /// Input file; reads stdin when omitted.
    input: Option<PathBuf>,

    /// Register the bundled callout and highlight extensions.
    #[arg(long)]
    extensions: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let source = match &args.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            buffer
        }
    };

    let mut parser = downmark_core::Parser::new();
    if args.extensions {
        parser
            .register_block_extension(Box::new(CalloutBlockExtension))
            .context("registering the callout extension")?;
        parser
            .register_inline_extension(Box::new(HighlightInlineExtension))
            .context("registering the highlight extension")?;
    }

    let html = parser.parse(&source).context("rendering input")?;
    println!("{html}");
    Ok(())
}
