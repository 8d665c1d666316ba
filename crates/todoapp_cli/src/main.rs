use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::io;
use std::sync::Arc;
use todoapp_cli::cli::{self, Input, LaunchArgs};
use todoapp_cli::screens::{self, Format};
use todoapp_cli::session::{Session, Settings, StdinConfirmer};
use todoapp_core::config::{self, Config};
use todoapp_core::confirm::{AlwaysConfirm, Confirmer};
use todoapp_core::error::AppError;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "TODOAPP_LOG";

fn init_tracing(log_level: Option<&str>) -> Result<(), AppError> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level),
        None => EnvFilter::try_from_env(LOG_ENV_VAR).or_else(|_| EnvFilter::try_new("warn")),
    }
    .map_err(|err| AppError::invalid_input(format!("invalid log level: {err}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| AppError::io(err.to_string()))
}

fn load_config(args: &LaunchArgs) -> Result<Config, AppError> {
    let loaded = config::load_config_with_fallback();
    let overrides = cli::collect_overrides(&args.config_override)?;
    let mut merged = config::merge_overrides(&loaded.config, &overrides);
    if let Some(delay_ms) = args.delay_ms {
        merged.delay_ms = Some(delay_ms);
    }
    Ok(merged)
}

fn print_help() {
    let mut cmd = Input::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn print_screen(session: &Session) {
    match session.render() {
        Ok(screen) => println!("{screen}"),
        Err(err) => eprintln!("ERROR: {}", err),
    }
}

async fn run_interactive(config: &Config, mut session: Session) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();

    print_screen(&session);

    loop {
        input.clear();
        // No lock is held between reads so confirmation prompts can read stdin too.
        let bytes = stdin
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let expanded = config.expand_alias(line);
        let args = match cli::split_command_line(&expanded) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("todoapp".to_string());
        argv.extend(args);

        let parsed = match Input::try_parse_from(argv) {
            Ok(parsed) => parsed,
            Err(err) => {
                eprintln!("ERROR: {}", cli::normalize_parse_error(err));
                continue;
            }
        };

        match session.handle(parsed.command).await {
            Ok(notice) => {
                if let Some(notice) = notice {
                    println!("{notice}");
                }
                print_screen(&session);
            }
            Err(err) => eprintln!("ERROR: {}", err),
        }
    }

    Ok(())
}

fn run(args: LaunchArgs) -> Result<(), AppError> {
    init_tracing(args.log_level.as_deref())?;
    let config = load_config(&args)?;

    let confirmer: Arc<dyn Confirmer> = if args.yes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(StdinConfirmer)
    };
    let format = if args.json { Format::Json } else { Format::Plain };
    let mut settings = Settings::from_config(&config, confirmer, format);
    settings.busy_listener = Some(screens::busy_printer(settings.palette, format));
    tracing::debug!(
        delay_ms = settings.delay.as_millis() as u64,
        filter = %settings.default_filter,
        "starting"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|err| AppError::io(err.to_string()))?;

    runtime.block_on(run_interactive(&config, Session::new(settings)))
}

fn main() {
    let args = match LaunchArgs::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("ERROR: {}", cli::normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
