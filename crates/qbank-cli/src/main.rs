//! Question bank CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use qbank_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use qbank_cli::commands::{
    open_bank, run_add, run_delete, run_edit, run_export, run_list, run_subjects, run_topics,
};
use qbank_cli::logging::{LogConfig, LogFormat, init_logging};
use qbank_cli::settings::load_settings;
use qbank_core::BankError;
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let mut settings = load_settings(cli.config.as_deref());
    if let Some(path) = &cli.data_file {
        settings.data_file = path.clone();
    }
    let bank = open_bank(&settings);

    let result = match &cli.command {
        Command::Add(args) => run_add(&bank, args).map(drop),
        Command::Edit(args) => run_edit(&bank, args).map(drop),
        Command::List(args) => run_list(&bank, args),
        Command::Subjects => run_subjects(&bank),
        Command::Topics => run_topics(&bank),
        Command::Delete(args) => {
            run_delete(&bank, args, io::stdin().lock(), io::stdout()).map(drop)
        }
        Command::Export(args) => run_export(&bank, &settings, args).map(drop),
    };

    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) {
    if let Some(bank_error) = error.downcast_ref::<BankError>() {
        eprintln!("error: {}", bank_error.user_message());
        if let Some(hint) = bank_error.suggestion() {
            eprintln!("hint: {hint}");
        }
    } else {
        eprintln!("error: {error:#}");
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
