//! Vireo CLI
//!
//! A headless document viewer for testing and debugging: renders a page
//! and prints its node tree, a paint summary, or raw paint commands as
//! JSON.

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;

use vireo_css::{ApproxMeasurer, PaintCommand, TextMeasurer, cull};
use vireo_html::print_tree;
use vireo_viewer::{FontBook, LoadedDocument, load_document, render_markup};

/// Vireo — render a document to paint commands
#[derive(Parser, Debug)]
#[command(name = "vireo")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Render a local file
    vireo ./index.html

    # Render a URL at a custom viewport width
    vireo --width 1024 https://example.org

    # Parse inline markup
    vireo --markup '<h1>Test</h1>'

    # Dump paint commands as JSON
    vireo --json ./index.html

    # Only the commands visible one screen down
    vireo --scroll 600 ./index.html
"#)]
struct Cli {
    /// Path to a markup file or URL to render
    #[arg(value_name = "FILE|URL")]
    input: Option<String>,

    /// Render a markup string directly instead of a file/URL
    #[arg(long, value_name = "MARKUP")]
    markup: Option<String>,

    /// Viewport width in pixels
    #[arg(long, default_value = "800")]
    width: f32,

    /// Print the parsed node tree before the paint output
    #[arg(long)]
    tree: bool,

    /// Emit paint commands as pretty-printed JSON
    #[arg(long)]
    json: bool,

    /// Measure with fixed ratios instead of system fonts
    #[arg(long)]
    approx: bool,

    /// Keep only commands visible in a window starting at this offset
    #[arg(long, value_name = "PX")]
    scroll: Option<f32>,

    /// Window height used with --scroll
    #[arg(long, default_value = "600", value_name = "PX")]
    viewport_height: f32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let measurer: Box<dyn TextMeasurer> = if cli.approx {
        Box::new(ApproxMeasurer)
    } else {
        Box::new(FontBook::new())
    };

    let doc = if let Some(markup) = cli.markup.as_deref() {
        render_markup(markup, cli.width, measurer.as_ref())?
    } else if let Some(input) = cli.input.as_deref() {
        load_document(input, cli.width, measurer.as_ref())?
    } else {
        anyhow::bail!("provide a FILE|URL argument or --markup");
    };

    let commands: Vec<&PaintCommand> = match cli.scroll {
        Some(scroll) => cull(&doc.commands, scroll, cli.viewport_height).collect(),
        None => doc.commands.iter().collect(),
    };

    if cli.tree {
        println!("{}", "=== Node Tree ===".bold());
        print_tree(&doc.tree, doc.tree.root(), 0);
        println!();
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&commands)?);
        return Ok(());
    }

    print_summary(&doc, &commands);
    Ok(())
}

fn print_summary(doc: &LoadedDocument, commands: &[&PaintCommand]) {
    println!("{}", "=== Document ===".bold());
    println!("origin: {}", doc.origin);
    println!(
        "page: {:.0}x{:.0}, {} rules, {} commands",
        doc.layout.width,
        doc.layout.height,
        doc.rules.len(),
        commands.len()
    );
    println!();
    println!("{}", "=== Paint Commands ===".bold());
    for command in commands {
        match command {
            PaintCommand::Text {
                x, y, text, font, ..
            } => {
                println!("text ({x:.1}, {y:.1}) {}px {:?}", font.size, text);
            }
            PaintCommand::Rect {
                left,
                top,
                right,
                bottom,
                color,
            } => {
                println!("rect ({left:.1}, {top:.1})-({right:.1}, {bottom:.1}) {color}");
            }
        }
    }
}
