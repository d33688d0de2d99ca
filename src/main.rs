use anyhow::{anyhow, Result};
use is_terminal::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zonegate::{Config, GitRepository, NamedCheckzone, Pipeline};

fn main() -> Result<()> {
    tracing_init();

    let mut first_args = std::env::args().take(2);
    let (program_name, config_file) = (
        first_args.next().unwrap_or("zonegate".to_string()),
        first_args.next(),
    );

    let config = config_init(config_file)?;
    let context = config.context(&program_name);

    let repo = GitRepository::discover(&config.git, &std::env::current_dir()?)
        .inspect_err(|_| tracing::error!("You are not inside a git repo"))?;
    let checker = NamedCheckzone::new(&config.checkzone);

    let report = Pipeline::new(context, &repo, &checker).run()?;
    if report.is_success() {
        Ok(())
    } else {
        Err(anyhow!(
            "{} of {} zone file(s) failed validation",
            report.error_count(),
            report.checked.len()
        ))
    }
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zonegate=info".into()),
        )
        .init();
}

fn config_init(config_file: Option<String>) -> Result<Config> {
    match config_file {
        None => Ok(Config::default()),
        Some(config_file) => {
            let config = Config::try_from_file(&config_file)?;
            tracing::debug!("loaded config from {config_file}");
            Ok(config)
        }
    }
}
