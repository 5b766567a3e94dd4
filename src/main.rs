// src/main.rs

mod benchmark_cli;

use std::process::ExitCode;
use log::{debug, error};
use env_logger::Env;
use numeric_kernels::config::KernelsConfig;
use numeric_kernels::kernels::configure_shared_memo;
use numeric_kernels::{KernelError, Result};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, args) = split_config_flag(args);

    let config = load_config(config_path.as_deref());

    // RUST_LOG wins over the configured level; a config that failed to load still gets "info"
    let level = config.as_ref().map(|c| c.log_level.clone()).unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match config.and_then(|config| run(&args, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ KernelError::Config(_)) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("\n{}", benchmark_cli::USAGE);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&str>) -> Result<KernelsConfig> {
    let config = match path {
        Some(path) => KernelsConfig::load_from_file(path)?,
        None => KernelsConfig::load()?,
    };
    Ok(config)
}

fn run(args: &[String], config: &KernelsConfig) -> Result<()> {
    debug!("Loaded configuration: {:?}", config);
    configure_shared_memo(config.memo_max_entries);
    dispatch(args, config)
}

fn dispatch(args: &[String], config: &KernelsConfig) -> Result<()> {
    let command = args.first().map(String::as_str);
    let rest = args.get(1..).unwrap_or(&[]);

    match command {
        Some("list") => {
            benchmark_cli::list_kernels();
            Ok(())
        }
        Some("run") => benchmark_cli::run_kernel(rest),
        Some("compare") => benchmark_cli::compare_kernel(rest),
        Some("bench") => benchmark_cli::run_benchmarks(config),
        Some("diff") => benchmark_cli::diff_results(rest),
        Some("quick") => benchmark_cli::quick_check(),
        Some("help") | Some("--help") | Some("-h") | None => {
            println!("{}", benchmark_cli::USAGE);
            Ok(())
        }
        Some(other) => Err(KernelError::InvalidArgument(format!("unknown command: {}", other))),
    }
}

/// Pull `--config PATH` out of the argument list.
fn split_config_flag(args: Vec<String>) -> (Option<String>, Vec<String>) {
    let mut config_path = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            config_path = iter.next();
        } else if let Some(path) = arg.strip_prefix("--config=") {
            config_path = Some(path.to_string());
        } else {
            rest.push(arg);
        }
    }
    (config_path, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_config_flag() {
        let args = vec!["--config".to_string(), "k.toml".to_string(), "bench".to_string()];
        let (path, rest) = split_config_flag(args);
        assert_eq!(path.as_deref(), Some("k.toml"));
        assert_eq!(rest, vec!["bench".to_string()]);

        let (path, rest) = split_config_flag(vec!["--config=other.yaml".to_string()]);
        assert_eq!(path.as_deref(), Some("other.yaml"));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_bad_config_path_reported_as_config_error() {
        let err = load_config(Some("/nonexistent/kernels.toml")).unwrap_err();
        assert!(matches!(err, KernelError::Config(_)));
        assert!(err.to_string().starts_with("configuration error:"));
    }
}
