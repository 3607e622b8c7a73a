use chrono::Local;
use log::LevelFilter;
use std::path::PathBuf;
use std::sync::Once;

static INIT: Once = Once::new();

/// Parsed `IBAN_LOG_LEVEL` value: a default level plus per-target overrides,
/// written as `warn,iban_parse::iban=trace`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LevelSpec {
    default: LevelFilter,
    targets: Vec<(String, LevelFilter)>,
}

fn parse_level_spec(spec: &str) -> Result<LevelSpec, String> {
    let mut parsed = LevelSpec {
        default: LevelFilter::Info,
        targets: Vec::new(),
    };
    for directive in spec.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        match directive.split_once('=') {
            Some((target, level)) => {
                let level = level
                    .trim()
                    .parse::<LevelFilter>()
                    .map_err(|_| format!("invalid log level in '{directive}'"))?;
                parsed.targets.push((target.trim().to_string(), level));
            }
            None => {
                parsed.default = directive
                    .parse::<LevelFilter>()
                    .map_err(|_| format!("invalid log level '{directive}'"))?;
            }
        }
    }
    Ok(parsed)
}

pub fn init_logging(app_name: &str) -> Result<(), String> {
    let mut init_result: Result<(), String> = Ok(());
    INIT.call_once(|| {
        if let Err(err) = init_logging_inner(app_name) {
            init_result = Err(err);
        }
    });
    init_result
}

fn init_logging_inner(app_name: &str) -> Result<(), String> {
    let raw = std::env::var("IBAN_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_default();
    let spec = parse_level_spec(&raw)?;

    // File logging is opt-in; validation output goes to stdout.
    let log_dir = match std::env::var("IBAN_LOG_DIR").ok().as_deref() {
        None | Some("off") | Some("none") | Some("") => None,
        Some(path) => Some(PathBuf::from(path)),
    };

    let mut dispatch = fern::Dispatch::new()
        .level(spec.default)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} | {:<5} | {} | {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        });
    for (target, level) in spec.targets {
        dispatch = dispatch.level_for(target, level);
    }
    dispatch = dispatch.chain(std::io::stderr());

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let date = Local::now().format("%Y_%m_%d");
        let file_path = dir.join(format!("{app_name}-{date}.log"));
        dispatch = dispatch.chain(fern::log_file(file_path).map_err(|err| err.to_string())?);
    }

    dispatch.apply().map_err(|err| err.to_string())
}
