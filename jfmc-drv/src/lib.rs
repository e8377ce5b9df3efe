//! jfmc-drv - the `jfmc` command-line driver.
//!
//! Orchestrates the four core stages (`jfmc-lex` → `jfmc-par` →
//! `jfmc-sem` → `jfmc-gen`) in a fixed order, reading one source file
//! and writing one emitted C file. CLI parsing, file I/O, and
//! invoking an external C compiler all live here and only here — this
//! crate's job is to be a thin, unsurprising shell around the core,
//! not a place where correctness is expected to live.

mod config;

pub use config::{Config, EmitTarget};

use std::path::{Path, PathBuf};

use jfmc_util::{Handler, SourceMap};
use thiserror::Error;

/// Process exit codes: `0` on a clean
/// compile, `1` if any diagnostic was reported (including a pure
/// `--check` run that found problems), `2` on a driver-level failure
/// that happened before there was even a program to diagnose — file
/// not found, an unwritable output path, or a CLI option this driver
/// deliberately doesn't implement.
pub const EXIT_OK: i32 = 0;
pub const EXIT_DIAGNOSTICS: i32 = 1;
pub const EXIT_DRIVER_ERROR: i32 = 2;

/// Driver-level failures: the ones that happen before there is even a
/// program to diagnose, so they have no source location and are not
/// part of the compiled program's recoverable syntax/semantic
/// diagnostic list. `run` reports these through `anyhow` rather than
/// the `Handler`, since none of them are things a user fixes by
/// editing SL source.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("--emit-exe is not implemented; invoking an external C toolchain is out of scope for this compiler")]
    EmitExeUnsupported,
}

/// Parses CLI arguments, runs the pipeline, and exits the process with
/// the resulting code. Never returns.
pub fn main() -> ! {
    let config = <Config as clap::Parser>::parse();
    configure_logging(config.verbose);
    std::process::exit(run(&config));
}

fn configure_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).try_init();
}

/// Runs the whole pipeline for `config` and returns the process exit
/// code. Driver-level failures (bad CLI flags, unreadable input,
/// unwritable output) are reported through `anyhow` and always map to
/// [`EXIT_DRIVER_ERROR`]; everything past that point goes through the
/// ordinary diagnostic-accumulation path in [`finish`].
pub fn run(config: &Config) -> i32 {
    match try_run(config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("jfmc: {e}");
            EXIT_DRIVER_ERROR
        }
    }
}

fn try_run(config: &Config) -> anyhow::Result<i32> {
    if config.emit == EmitTarget::Exe {
        return Err(DriverError::EmitExeUnsupported.into());
    }

    let source = std::fs::read_to_string(&config.input).map_err(|source| DriverError::Read {
        path: config.input.clone(),
        source,
    })?;

    let file = config.input.clone();
    let handler = Handler::new();
    let mut source_map = SourceMap::new();
    let file_id = source_map.add_file(file.clone(), source.clone());

    log::debug!("lexing {}", file.display());
    let tokens = jfmc_lex::scan(&source, file.clone(), &handler);
    if config.tokens || config.all {
        println!("{tokens:#?}");
        if config.tokens && !config.all {
            return Ok(finish(&handler, config, &source_map, file_id));
        }
    }

    log::debug!("parsing {}", file.display());
    let program = jfmc_par::parse_program(tokens, &source, file.clone(), &handler);
    if config.ast || config.all {
        println!("{program:#?}");
        if config.ast && !config.all {
            return Ok(finish(&handler, config, &source_map, file_id));
        }
    }

    log::debug!("running semantic analysis");
    let _table = jfmc_sem::analyze(&program, file.clone(), &handler);
    if config.semantic || config.all {
        print_semantic_summary(&handler);
        if config.semantic && !config.all {
            return Ok(finish(&handler, config, &source_map, file_id));
        }
    }

    if config.check {
        log::debug!("--check requested, stopping after semantic analysis");
        return Ok(finish(&handler, config, &source_map, file_id));
    }

    if handler.has_errors() {
        return Ok(finish(&handler, config, &source_map, file_id));
    }

    log::debug!("emitting C");
    let c_text = jfmc_gen::emit(&program);

    if config.dump_c || config.all {
        println!("{c_text}");
    }

    let out_path = config
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&config.input));
    std::fs::write(&out_path, &c_text).map_err(|source| DriverError::Write {
        path: out_path.clone(),
        source,
    })?;
    log::debug!("wrote {}", out_path.display());

    Ok(finish(&handler, config, &source_map, file_id))
}

/// Prints accumulated diagnostics, each followed by its offending
/// source line and a caret under the reported column, and resolves
/// the final exit code.
///
/// `--all` is a debug-dump convenience: it always
/// exits `0` so a user can inspect every intermediate form of a
/// program that doesn't yet compile, without the dump being mistaken
/// for a successful build by a script checking the exit code normally.
fn finish(handler: &Handler, config: &Config, source_map: &SourceMap, file_id: usize) -> i32 {
    let source = source_map.get(file_id);
    for diagnostic in handler.diagnostics() {
        match source {
            Some(source) => eprintln!("{}", diagnostic.render_with_source(source)),
            None => eprintln!("{diagnostic}"),
        }
    }
    if config.all {
        return EXIT_OK;
    }
    if handler.has_errors() {
        EXIT_DIAGNOSTICS
    } else {
        EXIT_OK
    }
}

fn print_semantic_summary(handler: &Handler) {
    println!(
        "semantic analysis: {} diagnostic(s), {} error(s)",
        handler.diagnostics().len(),
        handler.error_count()
    );
}

/// `<input>.jfm` → `<input>.c`; anything else just gets `.c` appended
/// (`jfmc.c`'s `get_default_output`).
fn default_output_path(input: &Path) -> PathBuf {
    let text = input.to_string_lossy();
    match text.strip_suffix(".jfm") {
        Some(stem) => PathBuf::from(format!("{stem}.c")),
        None => PathBuf::from(format!("{text}.c")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_strips_jfm_extension() {
        assert_eq!(default_output_path(Path::new("main.jfm")), PathBuf::from("main.c"));
    }

    #[test]
    fn default_output_appends_c_when_no_jfm_extension() {
        assert_eq!(default_output_path(Path::new("main")), PathBuf::from("main.c"));
        assert_eq!(default_output_path(Path::new("main.txt")), PathBuf::from("main.txt.c"));
    }

    #[test]
    fn emit_exe_is_a_driver_error_before_any_file_is_read() {
        let config = <Config as clap::Parser>::parse_from(["jfmc", "does-not-exist.jfm", "--emit", "exe"]);
        let err = try_run(&config).unwrap_err();
        assert!(err.to_string().contains("out of scope"));
    }

    #[test]
    fn unreadable_input_is_a_driver_error_naming_the_path() {
        let config = <Config as clap::Parser>::parse_from(["jfmc", "does-not-exist.jfm"]);
        let err = try_run(&config).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.jfm"));
    }
}
