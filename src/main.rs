use std::fs;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use polymer_externs::check::check_externs_with_diagnostics;
use polymer_externs::cli::Cli;
use polymer_externs::config::Config;
use polymer_externs::logger::init_logger;
use polymer_externs::{generate, Analyzer, Error, FeatureDump, Result};

fn main() -> ExitCode {
    let args = Cli::parse();
    init_logger(args.verbose, args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<()> {
    let mut config = Config::load(&args.root, args.config.as_deref())?;
    args.apply(&mut config);

    let analysis = FeatureDump::new(&config.analysis).analyze(&args.root)?;
    let externs = generate(&analysis.features, &config.emit);

    if config.check {
        let name = config
            .output
            .as_ref()
            .map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string());
        check_externs_with_diagnostics(&name, &externs)?;
    }

    match &config.output {
        Some(path) => {
            fs::write(path, &externs).map_err(|e| Error::io(path, e))?;
            info!(path = %path.display(), "wrote externs");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(externs.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| Error::io("<stdout>", e))?;
        }
    }

    Ok(())
}
