use std::fs;

use crate::cli::InitArgs;
use crate::{EXIT_FATAL, EXIT_SUCCESS, Result, StyleGuardError};

#[must_use]
pub fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    }
}

/// Initializes a new configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(StyleGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r##"# style-guard configuration file

[scanner]
# Extensions accepted as source without asking the `file` classifier.
# The first one is also given to temporary links for extensionless scripts.
source_extensions = ["py"]

# Binary or generated extensions that are never checked
# skip_extensions = ["pyc", "pyo", "so", "png", "zip"]

# Directory names pruned from walks and dropped from git change sets
# (names ending in .egg-info are always skipped)
# skip_dirs = [".git", "__pycache__", ".tox", "build", "dist"]

# Files starting with this character are skipped during directory walks
ignore_prefix = "."

# Case-insensitive text `file -b` must print for an extensionless file
classifier_pattern = "python"

[checkers.pylint]
enabled = true
# program = "/path/to/venv/bin/pylint"
# Takes precedence over a pylintrc in the current directory
# config = "tools/pylintrc"

[checkers.pycodestyle]
enabled = true
# program = "pycodestyle"
# Ignored when setup.cfg, tox.ini or .pycodestyle exists in the current directory
# config = "tools/pycodestyle.cfg"

[custom]
# Every file must contain this text; "" disables the check
footer_marker = "# vim:"

# Always prefer double quotes instead of estimating per file
prefer_double_quotes = false

# Extra globs exempt from the quote-consistency check
# quote_exempt = ["**/fixtures/*.py"]

# Debugger modules whose calls must not be committed
debug_modules = ["pdb", "ipdb", "pudb"]
"##
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
