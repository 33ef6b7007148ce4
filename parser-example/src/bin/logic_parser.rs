//! Parses logic declaration files and prints their trees.
//!
//! ```text
//! logic-parser [-v]... [FILE]...
//! ```
//!
//! Without files a built-in sample is parsed. Each `-v` raises the bridge
//! verbosity; set `LOGIC_LOG=debug` (or `trace`) to see the output.

use parser_example::{parse, render_tree};
use pipeline_core::BridgeConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "\
# sample input
data ready = false || \"maybe\";
data done = true;
";

struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(
        &self,
        _w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

fn main() -> ExitCode {
    if let Ok(filter) = EnvFilter::try_from_env("LOGIC_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_timer(NoTimestamp)
            .with_writer(std::io::stderr)
            .init();
        tracing::debug!("tracing initialized");
    }

    let mut verbosity = 0u8;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        if let Some(level) = verbosity_flag(&arg) {
            verbosity = verbosity.saturating_add(level);
        } else {
            paths.push(PathBuf::from(arg));
        }
    }

    if paths.is_empty() {
        let config = BridgeConfig::new().with_verbosity(verbosity);
        return if report("<sample>", SAMPLE, config) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let mut status = ExitCode::SUCCESS;
    for path in paths {
        let name = path.display().to_string();
        let input = match std::fs::read_to_string(&path) {
            Ok(input) => input,
            Err(err) => {
                eprintln!("{name}: {err}");
                status = ExitCode::FAILURE;
                continue;
            }
        };
        let config = BridgeConfig::new()
            .with_file_path(path)
            .with_verbosity(verbosity);
        if !report(&name, &input, config) {
            status = ExitCode::FAILURE;
        }
    }
    status
}

/// Verbosity added by a `-v`, `-vv`, ... flag; `None` for anything else.
fn verbosity_flag(arg: &str) -> Option<u8> {
    let vs = arg.strip_prefix('-')?;
    if vs.is_empty() || !vs.chars().all(|c| c == 'v') {
        return None;
    }
    Some(u8::try_from(vs.len()).unwrap_or(u8::MAX))
}

/// Prints the tree and any errors; returns `true` if the input was clean.
fn report(name: &str, input: &str, config: BridgeConfig) -> bool {
    let ctx = match parse(input, config) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("{name}: {err}");
            return false;
        }
    };
    if let Some(root) = &ctx.root {
        print!("{}", render_tree(&**root));
    }
    for err in &ctx.errors {
        eprintln!("{name}: {err}");
    }
    ctx.is_ok()
}
