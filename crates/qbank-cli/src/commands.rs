//! Subcommand implementations.
//!
//! Each `run_*` function performs one command against an open
//! [`QuestionBank`] and prints its result.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::{info, warn};

use qbank_core::{ActionOutcome, GitSync, QuestionBank};
use qbank_export::{
    DocumentExporter, DocxBuilder, ExportOptions, OutlineBuilder, check_image,
    default_file_name, select_for_export,
};
use qbank_model::{Question, QuestionDraft, QuestionEdit};
use qbank_persistence::QuestionStore;

use crate::cli::{AddArgs, DeleteArgs, EditArgs, ExportArgs, FilterArgs};
use crate::settings::Settings;
use crate::summary::{choice_table, question_table};

/// Image file extensions accepted for upload.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Open the question bank described by `settings`.
///
/// Creates an empty question file when there is none yet and attaches the
/// git sync when it is enabled.
pub fn open_bank(settings: &Settings) -> QuestionBank {
    let store = QuestionStore::new(&settings.data_file);
    store.ensure_exists();
    let bank = QuestionBank::new(store);
    if settings.sync.enabled {
        let sync = GitSync::new(&settings.data_file)
            .with_remote(settings.sync.remote.clone())
            .with_branch(settings.sync.branch.clone());
        bank.with_sync(Box::new(sync))
    } else {
        bank
    }
}

pub fn run_add(bank: &QuestionBank, args: &AddArgs) -> Result<Question> {
    let mut draft = QuestionDraft::new(args.text.as_str())
        .with_subject(args.subject.as_str())
        .with_topic(args.topic.as_str());
    if let Some(path) = &args.image {
        draft = draft.with_image(read_image(path)?);
    }

    let outcome = bank.add(draft)?;
    println!("Added question {}", outcome.value.id());
    report_sync(&outcome);
    Ok(outcome.value)
}

pub fn run_edit(bank: &QuestionBank, args: &EditArgs) -> Result<Question> {
    let edit = QuestionEdit {
        text: args.text.clone(),
        subject: args.subject.clone(),
        topic: args.topic.clone(),
        image: args.image.as_deref().map(read_image).transpose()?,
    };
    if edit.is_empty() {
        bail!("Nothing to change: pass at least one of --text, --subject, --topic, --image");
    }

    let outcome = bank.update(args.id, edit)?;
    println!("Updated question {}", args.id);
    report_sync(&outcome);
    Ok(outcome.value)
}

pub fn run_list(bank: &QuestionBank, args: &FilterArgs) -> Result<()> {
    let total = bank.questions().len();
    let questions = bank.search(&args.to_filter());
    if questions.is_empty() {
        println!("No questions match ({total} stored).");
        return Ok(());
    }
    println!("{}", question_table(&questions));
    println!("{} of {total} questions", questions.len());
    Ok(())
}

pub fn run_subjects(bank: &QuestionBank) -> Result<()> {
    println!("{}", choice_table("Subject", &bank.subject_choices()));
    Ok(())
}

pub fn run_topics(bank: &QuestionBank) -> Result<()> {
    println!("{}", choice_table("Topic", &bank.topic_choices()));
    Ok(())
}

/// Delete a question, asking on `input` first unless `--yes` was given.
///
/// Returns whether the question was deleted.
pub fn run_delete<R, W>(bank: &QuestionBank, args: &DeleteArgs, mut input: R, mut output: W) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    let pending = bank.request_delete(args.id)?;

    if !args.yes {
        write!(
            output,
            "Delete question {}: \"{}\"? [y/N] ",
            pending.id(),
            pending.question().text()
        )?;
        output.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer).context("read confirmation")?;
        if !is_yes(&answer) {
            drop(pending);
            writeln!(output, "Cancelled.")?;
            return Ok(false);
        }
    }

    let outcome = bank.confirm_delete(pending)?;
    writeln!(output, "Deleted question {}", outcome.value.id())?;
    report_sync(&outcome);
    Ok(true)
}

/// Export the selected questions.
///
/// Writes a `.docx` file and returns its path, or prints an outline and
/// returns `None` when `--outline` is set.
pub fn run_export(bank: &QuestionBank, settings: &Settings, args: &ExportArgs) -> Result<Option<PathBuf>> {
    let questions = bank.questions();
    let filter = args.filter.to_filter();

    let selected: Vec<&Question> = if !args.ids.is_empty() {
        let selection = select_for_export(&questions, &args.ids);
        for id in &selection.missing {
            warn!(id, "Requested question does not exist");
            eprintln!("warning: there is no question with id {id}");
        }
        selection
            .questions
            .into_iter()
            .filter(|q| filter.matches(q))
            .collect()
    } else if args.all || !filter.is_unrestricted() {
        filter.apply(&questions)
    } else {
        bail!("Choose what to export with --ids, --all or a filter");
    };

    let options = export_options(settings);
    let generated_on = options.generated_on;
    let exporter = DocumentExporter::new(options);

    if args.outline {
        let outline = exporter.build(&selected, OutlineBuilder::new())?;
        print!("{outline}");
        return Ok(None);
    }

    let bytes = exporter.build(&selected, DocxBuilder::new())?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| settings.export.output_dir.join(default_file_name(generated_on)));
    write_document(&path, &bytes)?;
    info!(questions = selected.len(), path = %path.display(), "Exported question paper");
    println!("Exported {} questions to {}", selected.len(), path.display());
    Ok(Some(path))
}

fn export_options(settings: &Settings) -> ExportOptions {
    ExportOptions {
        title: settings.export.title.clone(),
        image_width_inches: settings.export.image_width_inches,
        generated_on: Local::now().date_naive(),
    }
}

fn write_document(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))
}

/// Read an image to attach.
///
/// The file must have a png or jpeg extension and decode as an image the
/// exporter can embed, so a bad upload is refused before it is stored.
pub fn read_image(path: &Path) -> Result<Vec<u8>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        bail!(
            "{} is not a supported image (expected {})",
            path.display(),
            IMAGE_EXTENSIONS.join(", ")
        );
    }
    let bytes = fs::read(path).with_context(|| format!("read image {}", path.display()))?;
    let (width, height) =
        check_image(&bytes).with_context(|| format!("{} is not a usable image", path.display()))?;
    tracing::debug!(path = %path.display(), width, height, "Image accepted");
    Ok(bytes)
}

fn report_sync<T>(outcome: &ActionOutcome<T>) {
    if let Some(warning) = outcome.sync_warning() {
        eprintln!("warning: {warning}");
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
