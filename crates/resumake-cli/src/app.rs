//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use resumake_core::config::CONFIG_FILENAMES;
use resumake_core::{Action, ExportMode, HtmlPreview, ResumeEditor, Settings};
use resumake_model::{Locale, Resume};
use resumake_pdf::Exporter;
use tracing::warn;

/// Label language for a new résumé
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LocaleArg {
    /// English labels, `YYYY-MM` dates
    #[default]
    En,
    /// Chinese labels, `YYYY年MM月` dates
    ZhCn,
}

impl From<LocaleArg> for Locale {
    fn from(value: LocaleArg) -> Self {
        match value {
            LocaleArg::En => Locale::En,
            LocaleArg::ZhCn => Locale::ZhCn,
        }
    }
}

/// PDF export mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Paginated text layout
    Structured,
    /// Preview captured as an image on one A4 page
    Raster,
}

impl From<ModeArg> for ExportMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Structured => ExportMode::Structured,
            ModeArg::Raster => ExportMode::Raster,
        }
    }
}

#[derive(Parser)]
#[command(name = "resumake")]
#[command(author, version, about = "Build a résumé, preview it, export it to PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a blank résumé JSON file
    Init {
        /// Résumé file to create
        file: PathBuf,

        /// Label language
        #[arg(short, long, value_enum, default_value = "en")]
        locale: LocaleArg,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Apply a JSON array of editor actions and write the result back
    Apply {
        /// Résumé file
        file: PathBuf,

        /// JSON file holding the actions
        actions: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Render the HTML preview
    Preview {
        /// Résumé file
        file: PathBuf,

        /// Output HTML file (defaults to the résumé name with .html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave out the reorder / delete / add buttons
        #[arg(long)]
        no_controls: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Export the résumé to PDF
    Export {
        /// Résumé file
        file: PathBuf,

        /// Output PDF file (defaults to the configured or locale filename)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export mechanism (defaults to the configured mode)
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            file,
            locale,
            force,
        } => {
            init_command(&file, locale.into(), force)?;
        }
        Commands::Apply {
            file,
            actions,
            config,
        } => {
            apply_command(&file, &actions, config.as_deref())?;
        }
        Commands::Preview {
            file,
            output,
            no_controls,
            config,
        } => {
            preview_command(&file, output.as_deref(), no_controls, config.as_deref())?;
        }
        Commands::Export {
            file,
            output,
            mode,
            config,
        } => {
            export_command(&file, output.as_deref(), mode.map(Into::into), config.as_deref())?;
        }
    }

    Ok(())
}

/// Execute the init command
pub fn init_command(file: &Path, locale: Locale, force: bool) -> Result<()> {
    println!("resumake v{}", resumake_core::VERSION);
    println!("Creating: {} ({})", file.display(), locale);

    if file.exists() && !force {
        anyhow::bail!(
            "File already exists: {} (use --force to overwrite)",
            file.display()
        );
    }

    write_resume(file, &Resume::new())?;

    // The locale lives in the config next to the résumé
    let toml_path = resume_dir(file).join(CONFIG_FILENAMES[0]);
    if toml_path.exists() && !force {
        println!("  Kept: {}", toml_path.display());
    } else {
        fs::write(&toml_path, generate_config_toml(locale))
            .with_context(|| format!("Failed to write config file: {}", toml_path.display()))?;
        println!("  Created: {}", toml_path.display());
    }

    println!("  Done.");
    Ok(())
}

/// Starter configuration for a new résumé
fn generate_config_toml(locale: Locale) -> String {
    let mut output = String::new();
    output.push_str("# resumake configuration\n\n");
    output.push_str(&format!("locale = \"{}\"\n\n", locale));
    output.push_str("[export]\n");
    output.push_str(&format!("mode = \"{}\"\n", ExportMode::default()));
    output
}

/// Execute the apply command
pub fn apply_command(file: &Path, actions_path: &Path, config_path: Option<&Path>) -> Result<()> {
    println!("resumake v{}", resumake_core::VERSION);
    println!("Applying: {} -> {}", actions_path.display(), file.display());

    let settings = load_settings(config_path, file)?;
    let mut editor = load_editor(file, &settings)?;

    let content = fs::read_to_string(actions_path)
        .with_context(|| format!("Failed to read actions: {}", actions_path.display()))?;
    let actions: Vec<Action> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse actions: {}", actions_path.display()))?;

    let total = actions.len();
    let changed = editor.apply_all(actions);
    println!("  {} of {} actions changed the résumé", changed, total);

    write_resume(file, editor.resume())?;
    println!("  Saved: {}", file.display());
    Ok(())
}

/// Execute the preview command
pub fn preview_command(
    file: &Path,
    output: Option<&Path>,
    no_controls: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    println!("resumake v{}", resumake_core::VERSION);
    println!("Previewing: {}", file.display());

    let settings = load_settings(config_path, file)?;
    let editor = load_editor(file, &settings)?;

    let fragment = HtmlPreview::new(&editor)
        .with_controls(!no_controls)
        .render();
    let page = html_page(&editor, &fragment);

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| file.with_extension("html"));
    fs::write(&output, page)
        .with_context(|| format!("Failed to write preview: {}", output.display()))?;

    println!("  Created: {}", output.display());
    Ok(())
}

/// Execute the export command
pub fn export_command(
    file: &Path,
    output: Option<&Path>,
    mode: Option<ExportMode>,
    config_path: Option<&Path>,
) -> Result<()> {
    println!("resumake v{}", resumake_core::VERSION);
    println!("Exporting: {}", file.display());

    let settings = load_settings(config_path, file)?;
    let mut editor = load_editor(file, &settings)?;
    let mode = mode.unwrap_or(settings.export.mode);
    let exporter = Exporter::from_settings(&settings);
    println!("  Mode: {}", mode);

    let path = match output {
        Some(path) => {
            exporter
                .save_to(&mut editor, mode, path)
                .with_context(|| format!("Failed to export PDF: {}", path.display()))?;
            path.to_path_buf()
        }
        None => {
            exporter
                .save(&mut editor, mode, resume_dir(file))
                .with_context(|| format!("Failed to export PDF for {}", file.display()))?
        }
    };

    println!("  Created: {}", path.display());
    Ok(())
}

fn load_editor(file: &Path, settings: &Settings) -> Result<ResumeEditor> {
    if !file.exists() {
        anyhow::bail!("Résumé file not found: {}", file.display());
    }
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read résumé: {}", file.display()))?;
    let resume: Resume = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse résumé: {}", file.display()))?;

    Ok(ResumeEditor::from_resume(resume, settings.locale)
        .with_style(settings.style.preview_style()))
}

fn write_resume(file: &Path, resume: &Resume) -> Result<()> {
    let json = serde_json::to_string_pretty(resume).context("Failed to serialize résumé")?;
    fs::write(file, json + "\n")
        .with_context(|| format!("Failed to write résumé: {}", file.display()))
}

fn html_page(editor: &ResumeEditor, fragment: &str) -> String {
    let title = &editor.resume().personal_info.name;
    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        editor.locale().tag(),
        resumake_core::rich_text::html::escape(title),
        fragment
    )
}

/// Directory holding the résumé file
fn resume_dir(file: &Path) -> &Path {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Explicit config, else the first config file found beside the résumé or
/// in the working directory
fn load_settings(config_path: Option<&Path>, file: &Path) -> Result<Settings> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            Settings::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        }
        None => {
            let dirs = [resume_dir(file), Path::new(".")];
            for candidate in dirs
                .iter()
                .flat_map(|dir| CONFIG_FILENAMES.iter().map(move |name| dir.join(name)))
            {
                if !candidate.exists() {
                    continue;
                }
                let content = fs::read_to_string(&candidate)
                    .with_context(|| format!("Failed to read config: {}", candidate.display()))?;
                match Settings::from_toml_str(&content) {
                    Ok(settings) => return Ok(settings),
                    Err(e) => warn!(
                        path = %candidate.display(),
                        error = %e,
                        "ignoring malformed config"
                    ),
                }
            }
            Ok(Settings::default())
        }
    }
}
