//! CLI front-end for the upload controller.
//!
//! A thin shim that maps flags onto `UploadController` calls and prints the
//! converted Markdown.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use distill::client::UploadController;
use distill::session::{UploadSession, ViewMode};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

#[derive(Parser, Debug)]
#[command(
    name = "distill-upload",
    about = "Convert a PDF to Markdown through a distill server",
    version
)]
struct Args {
    /// PDF file to convert
    file: PathBuf,

    /// Base URL of the distill server
    #[arg(long, env = "DISTILL_SERVER_URL", default_value = "http://localhost:3000")]
    server: String,

    /// Print the raw Markdown instead of the styled preview
    #[arg(long)]
    raw: bool,

    /// Directory to save the converted .md file into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Copy the Markdown to the clipboard (OSC 52)
    #[arg(long)]
    copy: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut controller = UploadController::new(&args.server);

    eprintln!("{} {}", cyan("◆"), bold(&format!("Uploading {}…", args.file.display())));
    controller.upload(&args.file).await?;

    if args.raw {
        controller.toggle_view();
    }

    match controller.session() {
        UploadSession::Done {
            filename,
            markdown,
            view_mode,
        } => {
            eprintln!("{} Converted: {}", green("✓"), filename);
            match view_mode {
                ViewMode::Raw => println!("{markdown}"),
                ViewMode::Preview => println!("{}", render_preview(markdown)),
            }
            if args.copy && controller.copy_markdown() {
                eprintln!("{} Copied to clipboard", green("✓"));
            }
            if let Some(dir) = &args.output {
                match controller.save_markdown(dir)? {
                    Some(path) => eprintln!("{} Saved {}", green("✓"), path.display()),
                    None => {}
                }
            }
            Ok(())
        }
        UploadSession::Failed { message } => {
            eprintln!("{} {}", red("✗"), message);
            std::process::exit(1);
        }
        other => bail!("upload ended in unexpected state: {}", other.status_label()),
    }
}

/// Minimal terminal rendering of the preview mode: headings bold, list
/// bullets normalized, fenced code dimmed. Raw mode bypasses this entirely.
fn render_preview(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut in_fence = false;

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            out.push_str(&dim(line));
        } else if in_fence {
            out.push_str(&dim(line));
        } else if trimmed.starts_with('#') {
            out.push_str(&bold(&cyan(line)));
        } else if let Some(rest) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
            out.push_str("  • ");
            out.push_str(rest);
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }

    out
}
