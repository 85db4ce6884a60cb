//! Subcommand implementations

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use doc_model::{Document, Path, Selection};
use edit_engine::{insert_column, insert_row, insert_table, remove_table};
use std::path::PathBuf;
use std::process::ExitCode;
use store::{export_dita, export_dita_file, load_snapshot, save_snapshot, ExportSettings, SettingsManager};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON snapshot to export
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export settings file
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Title of the root topic (overrides settings)
    #[arg(long)]
    pub title: Option<String>,
}

/// Snapshot and caret shared by every table edit
#[derive(Debug, Args)]
pub struct EditTarget {
    /// JSON snapshot to edit
    pub input: PathBuf,

    /// Caret path, e.g. `0,1,0`
    #[arg(long)]
    pub at: Option<Path>,

    /// Output file (defaults to rewriting the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum TableCommand {
    /// Insert a table after the top-level block holding the caret
    Insert {
        #[command(flatten)]
        target: EditTarget,

        /// Number of rows
        #[arg(long, default_value_t = 2)]
        rows: usize,

        /// Number of columns
        #[arg(long, default_value_t = 2)]
        cols: usize,
    },

    /// Append a row to the table around the caret
    Row {
        #[command(flatten)]
        target: EditTarget,
    },

    /// Append a column to the table around the caret
    Column {
        #[command(flatten)]
        target: EditTarget,
    },

    /// Remove the table around the caret
    Remove {
        #[command(flatten)]
        target: EditTarget,
    },
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// JSON snapshot to check
    pub input: PathBuf,
}

pub fn export(args: ExportArgs) -> Result<()> {
    let doc = load(&args.input)?;
    let mut settings = load_settings(args.settings)?;
    if let Some(title) = args.title {
        settings.document_title = title;
    }

    match args.output {
        Some(output) => export_dita_file(&doc, &output, &settings)
            .with_context(|| format!("writing {}", output.display()))?,
        None => print!("{}", export_dita(&doc, &settings)?),
    }
    Ok(())
}

pub fn table(command: TableCommand) -> Result<()> {
    let (target, name) = match &command {
        TableCommand::Insert { target, .. } => (target, "insert table"),
        TableCommand::Row { target } => (target, "insert row"),
        TableCommand::Column { target } => (target, "insert column"),
        TableCommand::Remove { target } => (target, "remove table"),
    };

    let doc = load(&target.input)?;
    let selection = target.at.clone().map(Selection::at_start_of);
    let selection = selection.as_ref();

    let result = match &command {
        TableCommand::Insert { rows, cols, .. } => insert_table(&doc, selection, *rows, *cols)?,
        TableCommand::Row { .. } => insert_row(&doc, selection)?,
        TableCommand::Column { .. } => insert_column(&doc, selection)?,
        TableCommand::Remove { .. } => remove_table(&doc, selection)?,
    };

    if !result.applied {
        eprintln!("{name}: nothing to change");
        return Ok(());
    }

    let output = target.output.as_ref().unwrap_or(&target.input);
    save_snapshot(&result.document, output)
        .with_context(|| format!("writing {}", output.display()))?;

    tracing::info!(command = name, output = %output.display(), "saved snapshot");
    if let Some(selection) = result.selection {
        println!("caret: {}", selection.anchor.path);
    }
    Ok(())
}

pub fn validate(args: ValidateArgs) -> Result<ExitCode> {
    let doc = load(&args.input)?;
    let issues = doc_model::validate(&doc);

    if issues.is_empty() {
        println!("ok");
        return Ok(ExitCode::SUCCESS);
    }

    for issue in &issues {
        println!("{issue}");
    }
    Ok(ExitCode::FAILURE)
}

fn load(path: &std::path::Path) -> Result<Document> {
    load_snapshot(path).with_context(|| format!("reading {}", path.display()))
}

fn load_settings(path: Option<PathBuf>) -> Result<ExportSettings> {
    let Some(path) = path else {
        return Ok(ExportSettings::default());
    };
    if !path.exists() {
        bail!("settings file not found: {}", path.display());
    }

    let mut manager = SettingsManager::with_path(path);
    Ok(manager.load_sync()?.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::Element;
    use tempfile::tempdir;

    fn target(input: PathBuf, at: Option<&str>) -> EditTarget {
        EditTarget {
            input,
            at: at.map(|at| at.parse().unwrap()),
            output: None,
        }
    }

    #[test]
    fn test_table_commands_rewrite_snapshot() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("slate_data.json");
        let doc = Document::from_blocks(vec![Element::paragraph("intro").into()]);
        save_snapshot(&doc, &input).unwrap();

        table(TableCommand::Insert {
            target: target(input.clone(), Some("0,0")),
            rows: 2,
            cols: 3,
        })
        .unwrap();
        table(TableCommand::Row {
            target: target(input.clone(), Some("1,0,0,0,0")),
        })
        .unwrap();

        let edited = load_snapshot(&input).unwrap();
        assert_eq!(edited.len(), 2);
        assert_eq!(edited.children_at(&"1".parse().unwrap()).unwrap().len(), 3);
    }

    #[test]
    fn test_noop_edit_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("slate_data.json");
        let doc = Document::from_blocks(vec![Element::paragraph("intro").into()]);
        save_snapshot(&doc, &input).unwrap();
        let before = std::fs::read_to_string(&input).unwrap();

        table(TableCommand::Remove {
            target: target(input.clone(), Some("0,0")),
        })
        .unwrap();
        assert_eq!(std::fs::read_to_string(&input).unwrap(), before);
    }

    #[test]
    fn test_export_with_settings_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("slate_data.json");
        let output = dir.path().join("topic.dita");
        let settings = dir.path().join("export-settings.json");
        save_snapshot(&Document::new(), &input).unwrap();
        std::fs::write(&settings, r#"{"documentTitle": "From Settings"}"#).unwrap();

        export(ExportArgs {
            input,
            output: Some(output.clone()),
            settings: Some(settings),
            title: None,
        })
        .unwrap();
        let xml = std::fs::read_to_string(&output).unwrap();
        assert!(xml.contains("<title>From Settings</title>"));
    }

    #[test]
    fn test_missing_settings_file_is_an_error() {
        assert!(load_settings(Some(PathBuf::from("/nonexistent/settings.json"))).is_err());
    }

    #[test]
    fn test_cli_parses_table_insert() {
        use clap::Parser;
        let cli = crate::Cli::try_parse_from([
            "dita-export", "table", "insert", "doc.json", "--at", "0,1", "--rows", "3",
        ])
        .unwrap();
        match cli.command {
            crate::Command::Table {
                command: TableCommand::Insert { target, rows, cols },
            } => {
                assert_eq!(target.at, Some(Path::new(vec![0, 1])));
                assert_eq!((rows, cols), (3, 2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
