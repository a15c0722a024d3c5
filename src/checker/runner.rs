use std::path::{Path, PathBuf};
use std::process::Command;

use crate::path_utils::display_path;
use crate::scanner::SourceFile;

use super::command::CheckerCommand;
use super::links::{LinkRegistry, LinkSet, Linked};
use super::result::CheckerResult;

/// Runs external checkers over a resolved file set.
pub struct CheckerRunner<'r> {
    registry: &'r LinkRegistry,
    base_dir: PathBuf,
}

/// Command-line arguments for one invocation, plus what to tell the user
/// about files that could not be passed.
#[derive(Default)]
struct Arguments {
    files: Vec<String>,
    /// Link path as passed, and the original display path it stands for.
    renames: Vec<(String, String)>,
    notes: Vec<String>,
}

impl<'r> CheckerRunner<'r> {
    #[must_use]
    pub fn new(registry: &'r LinkRegistry, base_dir: &Path) -> Self {
        Self {
            registry,
            base_dir: base_dir.to_path_buf(),
        }
    }

    /// Run `command` once over all `files`.
    ///
    /// Temporary links are removed before this returns, whatever the outcome.
    #[must_use]
    pub fn invoke(&self, command: &CheckerCommand, files: &[SourceFile]) -> CheckerResult {
        let program = match which::which(&command.program) {
            Ok(program) => program,
            Err(e) => {
                log::warn!("{}: '{}' not found: {e}", command.name, command.program);
                return CheckerResult::not_run(
                    &command.name,
                    format!("{}: command not found: {e}", command.program),
                );
            }
        };

        let mut links = LinkSet::new(self.registry);
        let arguments = self.arguments(command, files, &mut links);
        let collided = !arguments.notes.is_empty();

        let mut output = arguments.notes.join("\n");
        let failed = if arguments.files.is_empty() {
            collided
        } else {
            match self.run(&program, command, &arguments) {
                Ok((success, text)) => {
                    let failed = command.failure.is_failure(success, &text);
                    if !output.is_empty() && !text.is_empty() {
                        output.push('\n');
                    }
                    output.push_str(&text);
                    failed || collided
                }
                Err(e) => {
                    if !output.is_empty() {
                        output.push('\n');
                    }
                    output.push_str(&format!("failed to run {}: {e}", program.display()));
                    true
                }
            }
        };

        if !links.is_empty() {
            log::debug!("Removing {} temporary link(s)", links.len());
        }
        drop(links);

        CheckerResult::new(&command.name, output, failed)
    }

    fn arguments(
        &self,
        command: &CheckerCommand,
        files: &[SourceFile],
        links: &mut LinkSet<'_>,
    ) -> Arguments {
        let mut arguments = Arguments::default();

        for file in files {
            let original = file.display.to_string_lossy().into_owned();
            let Some(ext) = command
                .requires_extension
                .as_deref()
                .filter(|ext| !file.has_extension(ext))
            else {
                arguments.files.push(original);
                continue;
            };

            match links.link(&file.absolute, ext) {
                Ok(Linked::Created(link)) => {
                    let shown = display_path(&link, &self.base_dir)
                        .to_string_lossy()
                        .into_owned();
                    arguments.files.push(shown.clone());
                    arguments.renames.push((shown, original));
                }
                Ok(Linked::Collision(existing)) => arguments.notes.push(format!(
                    "{original}: not checked, {} already exists",
                    display_path(&existing, &self.base_dir).display()
                )),
                Err(e) => arguments
                    .notes
                    .push(format!("{original}: not checked, cannot link: {e}")),
            }
        }

        arguments
    }

    fn run(
        &self,
        program: &Path,
        command: &CheckerCommand,
        arguments: &Arguments,
    ) -> std::io::Result<(bool, String)> {
        log::info!(
            "Running {} on {} file(s)",
            command.name,
            arguments.files.len()
        );
        log::debug!(
            "{} {} {}",
            program.display(),
            command.args.join(" "),
            arguments.files.join(" ")
        );

        // `output()` drains stdout and stderr together, so a chatty checker
        // cannot stall on a full pipe.
        let output = Command::new(program)
            .args(&command.args)
            .args(&arguments.files)
            .current_dir(&self.base_dir)
            .output()?;

        let text = combine_output(&output.stdout, &output.stderr);
        log::debug!("{} exited with {}", command.name, output.status);

        Ok((output.status.success(), rewrite_links(&text, &arguments.renames)))
    }
}

/// Stdout followed by stderr, each starting on its own line.
fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stdout).into_owned();
    if !stderr.is_empty() && !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(&String::from_utf8_lossy(stderr));
    text
}

/// Replace temporary link paths in checker output with the originals.
///
/// Longer link paths are replaced first so one link name that ends
/// another is not rewritten halfway.
fn rewrite_links(text: &str, renames: &[(String, String)]) -> String {
    let mut ordered: Vec<&(String, String)> = renames.iter().collect();
    ordered.sort_by_key(|(link, _)| std::cmp::Reverse(link.len()));
    ordered
        .into_iter()
        .fold(text.to_string(), |acc, (link, original)| acc.replace(link, original))
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
