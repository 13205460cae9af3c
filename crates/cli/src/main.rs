//! CLI tool for generating and editing AI-synthesized slide decks.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use slidesmith_core::{
    resolve_placeholders, Customization, DeckEditor, FieldValue, Offset, Presentation, Session,
    Slide, SlideBody, MAX_USER_IMAGES,
};
use slidesmith_ingest::{extract_file, fetch_page};
use slidesmith_synth::{HttpGenerator, SynthesisRequest, Synthesizer};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Generate a slide deck from a URL or document, then edit and export it.
#[derive(Parser, Debug)]
#[command(name = "slidesmith")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize a deck from a web page or a local document
    Generate {
        /// Source web page to summarize
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,

        /// Source document (.pdf, .txt, .md)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Extra guidance passed to the generation service
        #[arg(long, default_value = "")]
        notes: String,

        /// Image reference substituted for a {{USER_IMAGE_N}} token
        /// (repeatable, max 5)
        #[arg(long = "image")]
        images: Vec<String>,

        /// Where to write the deck JSON
        #[arg(short, long, default_value = "deck.json")]
        output: PathBuf,

        /// Print the deck JSON to stdout instead of writing a file
        #[arg(short, long)]
        print: bool,

        /// Generation service base URL
        #[arg(long, default_value = "https://api.openai.com")]
        base_url: String,

        /// Model identifier
        #[arg(long, default_value = "gpt-4o-mini")]
        model: String,

        /// API key (falls back to the SLIDESMITH_API_KEY environment variable)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Apply one editing operation to a deck JSON file
    Edit {
        /// Deck JSON file to edit in place
        deck: PathBuf,

        #[command(subcommand)]
        op: EditOp,
    },

    /// Export a deck
    Export {
        /// Deck JSON file to export
        deck: PathBuf,

        /// Export target
        #[arg(long, value_enum, default_value_t = ExportTarget::Outline)]
        to: ExportTarget,
    },
}

#[derive(Subcommand, Debug)]
enum EditOp {
    /// Replace one text field on a slide
    SetText {
        slide: usize,
        field: String,
        value: String,
    },

    /// Replace a whole list field (e.g. one column of a two-column slide)
    SetList {
        slide: usize,
        field: String,
        items: Vec<String>,
    },

    /// Insert a new content slide after the given index (-1 for the front)
    Insert {
        #[arg(allow_hyphen_values = true)]
        after: isize,
    },

    /// Insert a new image slide after the given index
    InsertImage {
        #[arg(allow_hyphen_values = true)]
        after: isize,
        image: String,
    },

    /// Delete the slide at the given index
    Delete { index: usize },

    /// Set a per-field font size override
    SetFontSize {
        slide: usize,
        key: String,
        size: f64,
    },

    /// Set a per-field position offset
    SetPosition {
        slide: usize,
        key: String,
        x: f64,
        y: f64,
    },

    /// Set a per-field rotation in degrees
    SetRotation {
        slide: usize,
        key: String,
        degrees: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportTarget {
    /// Plain-text outline on stdout
    Outline,
    /// Hand-off instructions for an online slides service
    SlidesService,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match args.command {
        Command::Generate {
            url,
            file,
            notes,
            images,
            output,
            print,
            base_url,
            model,
            api_key,
        } => {
            run_generate(
                url, file, notes, images, output, print, base_url, model, api_key,
            )
            .await
        }
        Command::Edit { deck, op } => run_edit(&deck, op),
        Command::Export { deck, to } => run_export(&deck, to),
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_generate(
    url: Option<String>,
    file: Option<PathBuf>,
    notes: String,
    mut images: Vec<String>,
    output: PathBuf,
    print: bool,
    base_url: String,
    model: String,
    api_key: Option<String>,
) -> Result<()> {
    if images.len() > MAX_USER_IMAGES {
        log::warn!(
            "{} images supplied; only the first {} are usable",
            images.len(),
            MAX_USER_IMAGES
        );
        images.truncate(MAX_USER_IMAGES);
    }

    let request = build_request(url, file, notes, images.len()).await?;

    let api_key = api_key.or_else(|| std::env::var("SLIDESMITH_API_KEY").ok());
    let mut generator = HttpGenerator::new(base_url, model);
    if let Some(key) = api_key {
        generator = generator.with_api_key(key);
    }
    let synthesizer = Synthesizer::new(generator);

    let mut session = Session::new();
    let token = session.begin_synthesis();

    // Cosmetic progress ticker on a fixed timer; it says nothing about
    // actual completion and is aborted the moment the real result lands.
    let ticker = tokio::spawn(async {
        let stages = [
            "Reading the source material...",
            "Structuring the story...",
            "Writing slide copy...",
            "Polishing the deck...",
        ];
        let mut interval = tokio::time::interval(Duration::from_secs(2));
        for stage in stages.iter().cycle() {
            interval.tick().await;
            eprintln!("{}", stage);
        }
    });

    let result = synthesizer
        .synthesize(&request)
        .await
        .map(|deck| resolve_placeholders(&deck, &images));
    ticker.abort();

    session.finish_synthesis(token, result);

    let Some(editor) = session.editor() else {
        bail!(
            "generation failed: {}",
            session.last_error().unwrap_or("unknown error")
        );
    };

    let deck = editor.presentation();
    eprintln!("Generated '{}' with {} slides", deck.title, deck.slides.len());

    let json = serde_json::to_string_pretty(deck)?;
    if print {
        println!("{}", json);
    } else {
        fs::write(&output, json)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        eprintln!("Written to: {}", output.display());
    }

    Ok(())
}

/// Turn the chosen source into a synthesis request.
async fn build_request(
    url: Option<String>,
    file: Option<PathBuf>,
    notes: String,
    image_count: usize,
) -> Result<SynthesisRequest> {
    match (url, file) {
        (Some(url), None) => {
            let page = fetch_page(&url)
                .await
                .with_context(|| format!("Failed to fetch {}", url))?;
            Ok(SynthesisRequest {
                title: page.title,
                description: page.description,
                content: page.content,
                url: page.url,
                notes,
                image_count,
            })
        }
        (None, Some(path)) => {
            let content = extract_file(&path)
                .with_context(|| format!("Failed to extract {}", path.display()))?;
            let title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Document")
                .to_string();
            Ok(SynthesisRequest {
                title,
                content,
                notes,
                image_count,
                ..Default::default()
            })
        }
        _ => bail!("provide exactly one of --url or --file"),
    }
}

fn run_edit(deck_path: &Path, op: EditOp) -> Result<()> {
    let mut editor = DeckEditor::new(load_deck(deck_path)?);

    // Out-of-range indices and field mismatches are clamped or ignored;
    // they never abort the session.
    match op {
        EditOp::SetText {
            slide,
            field,
            value,
        } => {
            if let Err(e) = editor.edit_field(slide, &field, FieldValue::Text(value)) {
                log::warn!("edit ignored: {}", e);
            }
        }
        EditOp::SetList {
            slide,
            field,
            items,
        } => {
            if let Err(e) = editor.edit_field(slide, &field, FieldValue::List(items)) {
                log::warn!("edit ignored: {}", e);
            }
        }
        EditOp::Insert { after } => editor.insert_slide(after, Slide::new_content()),
        EditOp::InsertImage { after, image } => {
            editor.insert_slide(after, Slide::new_image(image))
        }
        EditOp::Delete { index } => editor.delete_slide(index),
        EditOp::SetFontSize { slide, key, size } => {
            editor.set_customization(slide, &key, Customization::FontSize(size))
        }
        EditOp::SetPosition { slide, key, x, y } => {
            editor.set_customization(slide, &key, Customization::Position(Offset { x, y }))
        }
        EditOp::SetRotation {
            slide,
            key,
            degrees,
        } => editor.set_customization(slide, &key, Customization::Rotation(degrees)),
    }

    eprintln!(
        "Deck now has {} slides (current: {})",
        editor.slide_count(),
        editor.current_index()
    );

    let json = serde_json::to_string_pretty(editor.presentation())?;
    fs::write(deck_path, json)
        .with_context(|| format!("Failed to write {}", deck_path.display()))?;
    Ok(())
}

fn run_export(deck_path: &Path, to: ExportTarget) -> Result<()> {
    match to {
        ExportTarget::Outline => {
            let deck = load_deck(deck_path)?;
            print!("{}", outline(&deck));
        }
        ExportTarget::SlidesService => {
            // Direct API export is not wired up; rendering and PDF
            // rasterization live in the viewer.
            println!(
                "Direct export to an online slides service is not available yet.\n\
                 Export the deck to PDF from the viewer, then use the service's\n\
                 'Import slides' feature to bring each page in."
            );
        }
    }
    Ok(())
}

fn load_deck(path: &Path) -> Result<Presentation> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let deck = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a valid deck", path.display()))?;
    Ok(deck)
}

/// Plain-text outline of a deck, one block per slide.
fn outline(deck: &Presentation) -> String {
    let mut out = format!("# {}\n", deck.title);

    for (index, slide) in deck.slides.iter().enumerate() {
        out.push_str(&format!("\n## Slide {} ({})\n", index + 1, slide.kind()));

        match &slide.body {
            SlideBody::Title { title, subtitle } => {
                push_line(&mut out, title);
                push_line(&mut out, subtitle);
            }
            SlideBody::Statement { text } => push_line(&mut out, text),
            SlideBody::TwoColumn { title, left, right } => {
                push_line(&mut out, title);
                for item in left {
                    out.push_str(&format!("- {}\n", item));
                }
                for item in right {
                    out.push_str(&format!("- {}\n", item));
                }
            }
            SlideBody::Quote { text, author } => {
                if let Some(text) = text {
                    out.push_str(&format!("\"{}\"\n", text));
                }
                push_line(&mut out, author);
            }
            SlideBody::BigNumber {
                number,
                label,
                detail,
            } => {
                push_line(&mut out, number);
                push_line(&mut out, label);
                push_line(&mut out, detail);
            }
            SlideBody::Grid { title, items } => {
                push_line(&mut out, title);
                for item in items {
                    if let Some(label) = &item.label {
                        out.push_str(&format!("- {}\n", label));
                    }
                }
            }
            SlideBody::Split { title, left, right } => {
                push_line(&mut out, title);
                for stat in [left, right].into_iter().flatten() {
                    let parts: Vec<&str> = [&stat.title, &stat.value, &stat.label]
                        .into_iter()
                        .filter_map(|s| s.as_deref())
                        .collect();
                    if !parts.is_empty() {
                        out.push_str(&format!("- {}\n", parts.join(": ")));
                    }
                }
            }
            SlideBody::Content { title, text } => {
                push_line(&mut out, title);
                push_line(&mut out, text);
            }
            SlideBody::Image { image, caption } => {
                push_line(&mut out, image);
                push_line(&mut out, caption);
            }
            SlideBody::End { title, cta } => {
                push_line(&mut out, title);
                push_line(&mut out, cta);
            }
        }
    }

    out
}

fn push_line(out: &mut String, field: &Option<String>) {
    if let Some(value) = field {
        out.push_str(value);
        out.push('\n');
    }
}
