//! CLI surface: a `clap`-derived struct covering the compiler's
//! argument parsing, dump toggles, and exit-code distinctions.

use std::path::PathBuf;

use clap::Parser;

/// `jfmc` - compiles SL source to portable C.
#[derive(Parser, Debug, Clone)]
#[command(name = "jfmc", version, about = "Compiles SL source to portable C", long_about = None)]
pub struct Config {
    /// Source file to compile.
    pub input: PathBuf,

    /// Output path for the emitted C (default: `<input>.c`, or
    /// `<input minus .jfm>.c` if the input ends in `.jfm`).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print the token stream.
    #[arg(long)]
    pub tokens: bool,

    /// Print the parsed AST.
    #[arg(long)]
    pub ast: bool,

    /// Print a semantic-analysis summary.
    #[arg(long)]
    pub semantic: bool,

    /// Print the emitted C alongside writing it to the output path.
    #[arg(long = "c")]
    pub dump_c: bool,

    /// Print every intermediate form (tokens, AST, semantic summary,
    /// emitted C) and always exit 0, regardless of diagnostics.
    #[arg(long)]
    pub all: bool,

    /// Stop after semantic analysis; do not emit C.
    #[arg(long)]
    pub check: bool,

    /// What to produce. `exe` is accepted but rejected at run time:
    /// driving an external C compiler is out of scope for this
    /// compiler.
    #[arg(long = "emit", value_enum, default_value_t = EmitTarget::C)]
    pub emit: EmitTarget,

    /// Trace each pipeline phase to stderr as it runs.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EmitTarget {
    C,
    Exe,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_bare_input_with_defaults() {
        let config = Config::parse_from(["jfmc", "main.jfm"]);
        assert_eq!(config.input, PathBuf::from("main.jfm"));
        assert_eq!(config.output, None);
        assert!(!config.check);
        assert_eq!(config.emit, EmitTarget::C);
    }

    #[test]
    fn parses_output_and_dump_toggles() {
        let config = Config::parse_from(["jfmc", "main.jfm", "-o", "out.c", "--ast", "--check"]);
        assert_eq!(config.output, Some(PathBuf::from("out.c")));
        assert!(config.ast);
        assert!(config.check);
    }

    #[test]
    fn parses_emit_exe() {
        let config = Config::parse_from(["jfmc", "main.jfm", "--emit", "exe"]);
        assert_eq!(config.emit, EmitTarget::Exe);
    }
}
