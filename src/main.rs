// src/main.rs

use runcap::config::{self, EngineConfig};
use runcap::exec::Executor;
use runcap::{cli, logging};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("runcap error: {err}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> runcap::Result<i32> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;

    let cfg = load_config(&args)?;
    let spec = args.to_spec()?;

    let result = Executor::new(cfg).run(spec).await?;

    // Propagate the child's status the way a shell would.
    Ok(result.status.shell_code())
}

/// Use `--config` when given, otherwise `Runcap.toml` if present, otherwise
/// defaults.
fn load_config(args: &cli::CliArgs) -> runcap::Result<EngineConfig> {
    if let Some(ref path) = args.config {
        return config::load_and_validate(path);
    }

    let default = config::default_config_path();
    if default.exists() {
        config::load_and_validate(&default)
    } else {
        Ok(EngineConfig::default())
    }
}
