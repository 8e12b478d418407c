//! `finview_cli`: renders one page of view models from a snapshot file.

pub mod output;

use std::path::PathBuf;

use chrono::NaiveDate;

use finview_config::{Config, ConfigManager};
use finview_core::{Clock, DatePreset, ExpansionState, ExpenseFilter, FixedClock, SystemClock};
use finview_domain::CategoryId;

use crate::{
    engine::{session_from_config, ViewModelEngine},
    errors::{FinviewError, Result},
    snapshot::Snapshot,
    utils::build_info,
};

pub const USAGE: &str = "usage: finview_cli <snapshot.json> [dashboard|budgets|categories|expenses|reports] \
[--user ID] [--today YYYY-MM-DD] [--search TERM] [--category ID] \
[--period all|today|week|month] [--include-inactive] [--json] [--config PATH] [--version]
       finview_cli config [backup [NOTE]|backups|restore INDEX|NAME] [--config PATH]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Budgets,
    Categories,
    Expenses,
    Reports,
}

impl View {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "dashboard" => Some(View::Dashboard),
            "budgets" => Some(View::Budgets),
            "categories" => Some(View::Categories),
            "expenses" => Some(View::Expenses),
            "reports" => Some(View::Reports),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliOptions {
    pub snapshot: PathBuf,
    pub view: View,
    pub user: Option<i64>,
    pub today: Option<NaiveDate>,
    pub search: Option<String>,
    pub category: Option<i64>,
    pub period: Option<DatePreset>,
    pub include_inactive: bool,
    pub json: bool,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    Backup { note: Option<String> },
    ListBackups,
    /// 1-based index from `backups`, or part of a backup file name.
    Restore { reference: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigCommand {
    pub action: ConfigAction,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Version,
    Render(CliOptions),
    Config(ConfigCommand),
}

/// Parses arguments (program name excluded).
pub fn parse_args<I>(args: I) -> Result<CliCommand>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().peekable();
    if args.peek().is_some_and(|first| first == "config") {
        args.next();
        return parse_config_args(args);
    }

    let mut options = CliOptions::default();
    let mut snapshot = None;
    let mut view = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--json" => options.json = true,
            "--include-inactive" => options.include_inactive = true,
            "--user" => options.user = Some(parse_number(&arg, args.next())?),
            "--category" => options.category = Some(parse_number(&arg, args.next())?),
            "--search" => options.search = Some(value_for(&arg, args.next())?),
            "--config" => options.config = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--today" => {
                let value = value_for(&arg, args.next())?;
                let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
                    FinviewError::InvalidInput(format!("--today expects YYYY-MM-DD, got `{value}`"))
                })?;
                options.today = Some(date);
            }
            "--period" => {
                let value = value_for(&arg, args.next())?;
                let preset = DatePreset::parse(&value).ok_or_else(|| {
                    FinviewError::InvalidInput(format!("unknown period `{value}`"))
                })?;
                options.period = Some(preset);
            }
            flag if flag.starts_with("--") => {
                return Err(FinviewError::InvalidInput(format!("unknown flag `{flag}`")));
            }
            positional if snapshot.is_none() => snapshot = Some(PathBuf::from(positional)),
            positional if view.is_none() => {
                view = Some(View::parse(positional).ok_or_else(|| {
                    FinviewError::InvalidInput(format!("unknown view `{positional}`"))
                })?);
            }
            extra => {
                return Err(FinviewError::InvalidInput(format!("unexpected argument `{extra}`")));
            }
        }
    }

    options.snapshot = snapshot.ok_or_else(|| FinviewError::InvalidInput(USAGE.to_string()))?;
    options.view = view.unwrap_or_default();
    Ok(CliCommand::Render(options))
}

fn parse_config_args<I>(mut args: I) -> Result<CliCommand>
where
    I: Iterator<Item = String>,
{
    let mut config = None;
    let mut positionals = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--config" => config = Some(PathBuf::from(value_for(&arg, args.next())?)),
            flag if flag.starts_with("--") => {
                return Err(FinviewError::InvalidInput(format!("unknown flag `{flag}`")));
            }
            _ => positionals.push(arg),
        }
    }

    let mut positionals = positionals.into_iter();
    let action = match positionals.next().as_deref() {
        None | Some("backups") => ConfigAction::ListBackups,
        Some("backup") => ConfigAction::Backup {
            note: positionals.next(),
        },
        Some("restore") => ConfigAction::Restore {
            reference: positionals.next().ok_or_else(|| {
                FinviewError::InvalidInput("restore requires a backup index or name".into())
            })?,
        },
        Some(other) => {
            return Err(FinviewError::InvalidInput(format!(
                "unknown config command `{other}`"
            )));
        }
    };
    if let Some(extra) = positionals.next() {
        return Err(FinviewError::InvalidInput(format!("unexpected argument `{extra}`")));
    }
    Ok(CliCommand::Config(ConfigCommand { action, config }))
}

fn value_for(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| FinviewError::InvalidInput(format!("{flag} requires a value")))
}

fn parse_number(flag: &str, value: Option<String>) -> Result<i64> {
    let value = value_for(flag, value)?;
    value
        .parse()
        .map_err(|_| FinviewError::InvalidInput(format!("{flag} expects a number, got `{value}`")))
}

/// Entry point used by the binary.
pub fn run_cli() -> Result<()> {
    match parse_args(std::env::args().skip(1))? {
        CliCommand::Version => println!("{}", build_info::current().banner()),
        CliCommand::Render(options) => print!("{}", render(&options)?),
        CliCommand::Config(command) => print!("{}", run_config(&command)?),
    }
    Ok(())
}

fn config_manager(path: Option<&PathBuf>) -> ConfigManager {
    match path {
        Some(path) => ConfigManager::for_file(path.clone()),
        None => ConfigManager::default_location(),
    }
}

/// Creates, lists or restores configuration backups.
pub fn run_config(command: &ConfigCommand) -> Result<String> {
    let manager = config_manager(command.config.as_ref());
    let message = match &command.action {
        ConfigAction::Backup { note } => {
            let config = manager.load()?;
            let name = manager.backup(&config, note.as_deref())?;
            tracing::info!(backup = %name, "configuration backed up");
            format!("Backup created: {name}")
        }
        ConfigAction::ListBackups => {
            let backups = manager.list_backups()?;
            if backups.is_empty() {
                "No configuration backups found.".to_string()
            } else {
                let mut lines = vec!["Available backups:".to_string()];
                for (idx, name) in backups.iter().enumerate() {
                    lines.push(format!("  {:>2}. {name}", idx + 1));
                }
                lines.join("\n")
            }
        }
        ConfigAction::Restore { reference } => {
            let backups = manager.list_backups()?;
            let name = select_backup(&backups, reference)?;
            manager.restore(&name)?;
            tracing::info!(backup = %name, "configuration restored");
            format!("Restored configuration from {name}")
        }
    };
    Ok(format!("{message}\n"))
}

fn select_backup(backups: &[String], reference: &str) -> Result<String> {
    if backups.is_empty() {
        return Err(FinviewError::InvalidInput(
            "no configuration backups available to restore".into(),
        ));
    }
    if let Ok(index) = reference.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|idx| backups.get(idx))
            .cloned()
            .ok_or_else(|| {
                FinviewError::InvalidInput(format!("backup index {reference} out of range"))
            });
    }
    backups
        .iter()
        .find(|name| name.contains(reference))
        .cloned()
        .ok_or_else(|| FinviewError::InvalidInput(format!("no backup matches `{reference}`")))
}

/// Loads config and snapshot, then renders the requested view.
pub fn render(options: &CliOptions) -> Result<String> {
    let manager = config_manager(options.config.as_ref());
    let config = manager.load()?;
    apply_color_preference(&config, options.json);

    let clock: Box<dyn Clock> = match options.today {
        Some(date) => Box::new(FixedClock::new(date)),
        None => Box::new(SystemClock),
    };
    let today = clock.today();
    let session = session_from_config(&config, options.user);
    let snapshot = Snapshot::load(&options.snapshot)?;
    let engine = ViewModelEngine::load(session, clock, &snapshot)?;
    tracing::debug!(view = ?options.view, user = %engine.session().user_id, "rendering view");

    let filter = build_filter(options, today);
    let currency = config.currency.as_str();
    let rendered = match options.view {
        View::Dashboard => {
            let view = engine.dashboard();
            if options.json {
                serde_json::to_string_pretty(&view)?
            } else {
                output::page(output::DashboardPage {
                    view: &view,
                    currency,
                })
            }
        }
        View::Budgets => {
            let view = engine.budgets_view(options.include_inactive);
            if options.json {
                serde_json::to_string_pretty(&view)?
            } else {
                output::page(output::BudgetsPage {
                    view: &view,
                    currency,
                })
            }
        }
        View::Categories => {
            let mut expansion = ExpansionState::new();
            expansion.expand_all(engine.categories());
            let view = engine.categories_view(&expansion);
            if options.json {
                serde_json::to_string_pretty(&view)?
            } else {
                output::page(output::CategoriesPage {
                    view: &view,
                    currency,
                })
            }
        }
        View::Expenses => {
            let view = engine.expenses_view(&filter);
            if options.json {
                serde_json::to_string_pretty(&view)?
            } else {
                output::page(output::ExpensesPage {
                    view: &view,
                    currency,
                })
            }
        }
        View::Reports => {
            let view = engine.reports_view(&filter);
            if options.json {
                serde_json::to_string_pretty(&view)?
            } else {
                output::page(output::ReportsPage {
                    view: &view,
                    currency,
                })
            }
        }
    };
    Ok(format!("{rendered}\n"))
}

fn build_filter(options: &CliOptions, today: NaiveDate) -> ExpenseFilter {
    let mut filter = ExpenseFilter::new();
    if let Some(term) = &options.search {
        filter = filter.search(term.clone());
    }
    if let Some(id) = options.category {
        filter = filter.category(CategoryId(id));
    }
    let period = match (options.period, options.view) {
        (Some(preset), _) => Some(preset),
        (None, View::Expenses) => Some(DatePreset::default()),
        (None, _) => None,
    };
    if let Some(preset) = period {
        filter = filter.with_preset(preset, today);
    }
    filter
}

fn apply_color_preference(config: &Config, json: bool) {
    let no_color = std::env::var_os("NO_COLOR").is_some();
    if json || no_color || !config.ui_color_enabled {
        colored::control::set_override(false);
    }
}
