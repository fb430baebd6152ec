//! Validation command handler

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use indicatif::ProgressBar;
use specaudit_schemas::ValidationSession;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(spec = ?args.spec, all = args.all))]
pub async fn handle_validate(
    args: ValidateArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let timer = Timer::new("validate_command");

    let strict = args.strict || config.validation.strict;
    let specs_dir = args
        .specs_dir
        .clone()
        .unwrap_or_else(|| config.paths.specs_dir.clone());
    debug!(strict, specs_dir = %specs_dir.display(), "Resolved validation settings");

    let mut session = ValidationSession::new(strict);

    if let Some(spec) = &args.spec {
        output.info(&format!("Validating {}", spec.display()))?;
        session.validate_one(spec);
    }

    if args.all {
        output.info(&format!(
            "Validating all specifications in {}",
            specs_dir.display()
        ))?;

        let mut bar: Option<Option<ProgressBar>> = None;
        session.validate_all_with_progress(&specs_dir, |progress| {
            let pb = bar.get_or_insert_with(|| {
                output.progress_bar(progress.total as u64, "Validating specifications")
            });
            if let Some(pb) = pb {
                pb.set_message(progress.path.display().to_string());
                pb.set_position(progress.current as u64);
            }
        });
        if let Some(Some(pb)) = bar {
            pb.finish_and_clear();
        }
    }

    let report = session.report();
    output.report(&report)?;

    info!(
        passed = report.passed,
        errors = report.summary.errors,
        warnings = report.summary.warnings,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Validation finished"
    );

    if report.passed {
        Ok(())
    } else {
        warn!("Validation failed");
        Err(Error::ValidationFailed {
            errors: report.summary.errors,
            warnings: report.summary.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const VALID: &str = "patterns:\n  - name: Singleton\n    category: creational\n    hints: [getInstance]\n    report_fields: [location]\n";
    const EMPTY_FIELDS: &str = "patterns:\n  - name: Lonely\n    category: creational\n    hints: [x]\n    report_fields: []\n";

    fn sink() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(std::io::sink()))
    }

    fn args(spec: Option<PathBuf>, all: bool, strict: bool, dir: &TempDir) -> ValidateArgs {
        ValidateArgs {
            spec,
            all,
            strict,
            specs_dir: Some(dir.path().to_path_buf()),
        }
    }

    #[tokio::test]
    async fn test_valid_directory_passes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.yaml"), VALID).unwrap();

        let result = handle_validate(args(None, true, false, &dir), &Config::default(), &mut sink()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_strict_from_flag_or_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.yaml"), EMPTY_FIELDS).unwrap();

        let lenient = handle_validate(args(None, true, false, &dir), &Config::default(), &mut sink()).await;
        assert!(lenient.is_ok());

        let flagged = handle_validate(args(None, true, true, &dir), &Config::default(), &mut sink()).await;
        assert!(matches!(
            flagged,
            Err(Error::ValidationFailed { errors: 0, warnings: 1 })
        ));

        let mut config = Config::default();
        config.validation.strict = true;
        let configured = handle_validate(args(None, true, false, &dir), &config, &mut sink()).await;
        assert!(configured.is_err());
    }

    #[tokio::test]
    async fn test_missing_spec_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = handle_validate(
            args(Some(dir.path().join("missing.yaml")), false, false, &dir),
            &Config::default(),
            &mut sink(),
        )
        .await;
        assert_eq!(result.unwrap_err().exit_code(), 1);
    }
}
