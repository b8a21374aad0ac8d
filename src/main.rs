mod app;
mod availability;
mod calendar;
mod help;
mod jumpto;
mod theme;
use crate::app::App;
use crate::availability::{AvailabilityPayload, MonthData};
use crate::calendar::{MonthDescriptor, MonthGrid, MonthWindow, YearMonth};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct RunOptions {
    payload: PathBuf,
    month: Option<YearMonth>,
    today: Option<Date>,
    json: bool,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut payload = None;
        let mut month = None;
        let mut today = None;
        let mut json = false;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('m') | Arg::Long("month") => {
                    month = Some(parser.value()?.parse::<YearMonth>()?);
                }
                Arg::Short('t') | Arg::Long("today") => {
                    let value = parser.value()?.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => today = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Short('j') | Arg::Long("json") => json = true,
                Arg::Short('l') | Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if payload.is_none() => payload = Some(PathBuf::from(value)),
                _ => return Err(arg.unexpected()),
            }
        }
        let payload = payload.ok_or("missing PAYLOAD argument")?;
        Ok(Command::Run(RunOptions {
            payload,
            month,
            today,
            json,
            log_file,
        }))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => opts.run(),
            Command::Help => {
                println!("Usage: cabincal [OPTIONS] <PAYLOAD>");
                println!();
                println!("Terminal availability & nightly-rate calendar for a rental cabin");
                println!();
                println!("PAYLOAD is a path to the backend's JSON availability payload, or -");
                println!("to read it from standard input.");
                println!();
                println!("Options:");
                println!("  -j, --json              Print the month grids as JSON and exit");
                println!("  -l, --log-file PATH     Write log messages to PATH");
                println!("  -m, --month YYYY-MM     Show the given month first");
                println!("  -t, --today YYYY-MM-DD  Treat the given date as today");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl RunOptions {
    fn run(self) -> anyhow::Result<()> {
        init_logging(self.log_file.as_deref(), self.json)?;
        let payload = load_payload(&self.payload)?;
        let cabin = payload.cabin.clone();
        let months = payload.into_months();
        if self.json {
            let report = JsonReport::new(cabin.as_deref(), &months, self.month);
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &report)
                .context("failed to write JSON output")?;
            writeln!(stdout).context("failed to write JSON output")?;
            return Ok(());
        }
        let today = match self.today {
            Some(d) => d,
            None => OffsetDateTime::now_local()
                .context("failed to determine local date")?
                .date(),
        };
        let mut window = MonthWindow::new(today, months)
            .context("cannot display a calendar for today's date")?
            .cabin(cabin);
        if let Some(ym) = self.month {
            window = window.start_month(ym);
        }
        with_terminal(|mut terminal| {
            terminal.hide_cursor().context("failed to hide cursor")?;
            App::new(window).run(terminal)?;
            Ok(())
        })
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

// Log records would garble the calendar if written to the terminal, so in
// interactive mode they are only emitted when a log file is given.
fn init_logging(log_file: Option<&Path>, to_stderr: bool) -> anyhow::Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let fp = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(fp)));
    } else if !to_stderr {
        return Ok(());
    }
    builder
        .try_init()
        .context("failed to initialize logging")?;
    Ok(())
}

fn load_payload(path: &Path) -> anyhow::Result<AvailabilityPayload> {
    if path == Path::new("-") {
        AvailabilityPayload::from_reader(io::stdin().lock())
            .context("failed to read availability payload from stdin")
    } else {
        let fp = File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        AvailabilityPayload::from_reader(BufReader::new(fp))
            .with_context(|| format!("failed to read availability payload from {}", path.display()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct JsonReport<'a> {
    cabin: Option<&'a str>,
    months: Vec<MonthDescriptor>,
}

impl<'a> JsonReport<'a> {
    // With `only` set, the report covers just that month (whether loaded or
    // not); otherwise it covers every loaded month.
    fn new(cabin: Option<&'a str>, months: &[MonthData], only: Option<YearMonth>) -> Self {
        let months = match only {
            Some(ym) => vec![MonthGrid::for_month(ym, months).descriptor()],
            None => months
                .iter()
                .map(|m| MonthGrid::build(m.ym, Some(m), months).descriptor())
                .collect(),
        };
        JsonReport { cabin, months }
    }
}
