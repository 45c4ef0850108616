//! Check command implementation.
//!
//! The `relint check` command lints documents with the configured rules and
//! can apply their fixes.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::lint::{
    Diagnostic, FileReport, HumanFormatter, JsonFormatter, LintFormatter, Linter, OutputFormat,
    SarifFormatter, Severity,
};
use crate::ui::{should_use_colors, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::load_rules;

/// Path shown for standard input.
pub const STDIN_PATH: &str = "<stdin>";

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: CheckArgs,
}

/// A document read for linting.
struct Document {
    path: PathBuf,
    text: String,
    from_stdin: bool,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Read the documents named on the command line, or standard input.
    ///
    /// Returns `None` after reporting a missing path.
    fn read_documents(&self, ui: &mut dyn UserInterface) -> Result<Option<Vec<Document>>> {
        if self.args.stdin {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            return Ok(Some(vec![Document {
                path: PathBuf::from(STDIN_PATH),
                text,
                from_stdin: true,
            }]));
        }

        let mut files = Vec::new();
        for path in &self.args.paths {
            if !path.exists() {
                ui.error(&format!("Path not found: {}", path.display()));
                return Ok(None);
            }
            collect_files(path, &mut files, ui);
        }

        let mut documents = Vec::with_capacity(files.len());
        for path in files {
            match fs::read_to_string(&path) {
                Ok(text) => documents.push(Document {
                    path,
                    text,
                    from_stdin: false,
                }),
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    ui.warning(&format!("Skipping non-UTF-8 file {}", path.display()));
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Some(documents))
    }

    /// Whether fixed text is printed instead of written back.
    fn prints_fixed_text(&self) -> bool {
        self.args.fix && (self.args.dry_run || self.args.stdin)
    }

    /// Lint, and fix when requested, one document.
    fn process(
        &self,
        linter: &Linter,
        language: &str,
        document: Document,
        ui: &mut dyn UserInterface,
    ) -> Result<(PathBuf, String, Vec<Diagnostic>)> {
        if !self.args.fix {
            let diagnostics = linter.lint(&document.text, language);
            return Ok((document.path, document.text, diagnostics));
        }

        let fixed = linter.fix_document(&document.text, language)?;
        if self.prints_fixed_text() {
            ui.output(&fixed.text);
        } else if fixed.changed() && !document.from_stdin {
            fs::write(&document.path, &fixed.text)?;
            ui.success(&format!(
                "Applied {} fix(es) to {}",
                fixed.edits,
                document.path.display()
            ));
        }
        Ok((document.path, fixed.text, fixed.remaining))
    }

    /// Format reports using the requested formatter.
    fn format_output(&self, reports: &[FileReport<'_>], color: bool) -> Result<String> {
        let mut output = Vec::new();

        match self.args.format {
            OutputFormat::Json => {
                JsonFormatter::new().format(reports, &mut output)?;
                output.push(b'\n');
            }
            OutputFormat::Sarif => {
                SarifFormatter::new("relint", env!("CARGO_PKG_VERSION"))
                    .format(reports, &mut output)?;
                output.push(b'\n');
            }
            OutputFormat::Human => {
                HumanFormatter::new(color).format(reports, &mut output)?;
            }
        }

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let loaded = match load_rules(&self.project_root, self.config_override.as_deref(), ui)? {
            Ok(loaded) => loaded,
            Err(result) => return Ok(result),
        };
        let (rules, dropped) = loaded.store.snapshot_with_dropped();
        for dropped in dropped.iter() {
            ui.warning(&format!(
                "Skipping rule #{} ({}): {}",
                dropped.index, dropped.rule, dropped.reason
            ));
        }

        let language = self
            .args
            .language
            .clone()
            .unwrap_or_else(|| loaded.config.language().to_string());
        let linter = Linter::new(rules);

        let Some(documents) = self.read_documents(ui)? else {
            return Ok(CommandResult::failure(2));
        };
        ui.message(&format!(
            "Checking {} document(s) as '{}' with {} rule(s)",
            documents.len(),
            language,
            linter.rules().len()
        ));

        let mut results = Vec::with_capacity(documents.len());
        for document in documents {
            let (path, text, diagnostics) = self.process(&linter, &language, document, ui)?;
            ui.detail(&format!(
                "{}: {} diagnostic(s)",
                path.display(),
                diagnostics.len()
            ));
            results.push((path, text, diagnostics));
        }

        let reports: Vec<FileReport<'_>> = results
            .iter()
            .map(|(path, text, diagnostics)| FileReport::new(path.clone(), text, diagnostics.clone()))
            .collect();
        let all = || reports.iter().flat_map(|r| &r.diagnostics);
        let has_errors = all().any(|d| d.severity == Severity::Error);
        let has_warnings = all().any(|d| d.severity == Severity::Warning);
        let has_diagnostics = all().next().is_some();

        if !self.prints_fixed_text() {
            if !has_diagnostics && self.args.format == OutputFormat::Human {
                ui.success("No issues found");
            } else {
                let color = ui.is_interactive() && should_use_colors();
                let output = self.format_output(&reports, color)?;
                ui.output(&output);
            }
        }

        if has_errors || (self.args.strict && has_warnings) {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

/// Collect `path`, or the files below it, skipping hidden entries.
///
/// Symlinks below `path` are not followed. Entries that cannot be read are
/// reported and skipped.
fn collect_files(path: &Path, files: &mut Vec<PathBuf>, ui: &mut dyn UserInterface) {
    let walker = WalkDir::new(path)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => ui.warning(&format!("Skipping unreadable entry: {}", e)),
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|n| n.starts_with('.'))
}
