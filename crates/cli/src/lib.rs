//! Shared plumbing for the calculator binaries: logging, interactive input,
//! catalog selection and report output.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use log::info;
use orbital_calculator::bodies::{Body, Catalog};
use orbital_calculator::conics::{LaunchWindows, TransferEllipse};
use orbital_calculator::export;
use orbital_calculator::solver::{Knowns, Step};
use rust_decimal::Decimal;
use serde::Serialize;

/// Install the logger; verbosity comes from `RUST_LOG` and defaults to `warn`.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}

/// Reads answers line by line, echoing each question first.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// One trimmed line; end of input is an error.
    pub fn line(&mut self, question: &str) -> anyhow::Result<String> {
        write!(self.output, "{question}: ")?;
        self.output.flush()?;
        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            bail!("no answer given for `{question}`");
        }
        Ok(answer.trim().to_string())
    }

    pub fn value<T>(&mut self, question: &str) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let answer = self.line(question)?;
        answer
            .parse()
            .with_context(|| format!("invalid answer `{answer}` for `{question}`"))
    }

    /// A blank answer leaves the value unknown.
    pub fn optional_decimal(&mut self, question: &str) -> anyhow::Result<Option<Decimal>> {
        let answer = self.line(question)?;
        if answer.is_empty() {
            return Ok(None);
        }
        let value = Decimal::from_str(&answer)
            .or_else(|_| Decimal::from_scientific(&answer))
            .with_context(|| format!("invalid number `{answer}` for `{question}`"))?;
        Ok(Some(value))
    }

    /// Ask for the flag value when it was not given on the command line.
    pub fn or_ask<T>(&mut self, value: Option<T>, question: &str) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match value {
            Some(value) => Ok(value),
            None => self.value(question),
        }
    }

    /// Ask for every parameter in turn; blank answers stay unknown.
    pub fn knowns(&mut self, params: &[(&str, &str)]) -> anyhow::Result<Knowns> {
        let mut knowns = Knowns::new();
        for (name, question) in params {
            if let Some(value) = self.optional_decimal(question)? {
                knowns.insert(*name, value);
            }
        }
        Ok(knowns)
    }
}

/// Knowns from optional command-line values.
pub fn knowns_from(values: &[(&str, Option<Decimal>)]) -> Knowns {
    values
        .iter()
        .filter_map(|(name, value)| value.map(|value| (*name, value)))
        .collect()
}

/// Built-in catalog, extended with the bodies at `path` when given.
pub fn catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => orbital_calculator::config::load_catalog(path)
            .with_context(|| format!("loading bodies from {}", path.display())),
        None => Ok(Catalog::new()),
    }
}

/// Print the trace to stdout, then `Raw data:` and the JSON dump to `output`.
pub fn report<T: Serialize + ?Sized>(
    trace: &[Step],
    value: &T,
    output: &Path,
) -> anyhow::Result<()> {
    if output == Path::new("-") {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        export::write_report(&mut lock, trace, value)?;
        return Ok(());
    }
    {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        export::write_trace(&mut lock, trace)?;
        writeln!(lock)?;
        writeln!(lock, "Raw data: {}", output.display())?;
    }
    info!("writing raw data to {}", output.display());
    let mut writer = export::writer_for_path(output)
        .with_context(|| format!("creating {}", output.display()))?;
    export::write_json(&mut *writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Flags shared by the transfer binaries.
#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Central body of the transfer
    #[arg(long, default_value = "sonne")]
    pub central: String,

    /// Departure body; its semi-major axis becomes the start radius
    #[arg(long)]
    pub from: Option<String>,

    /// Target body; its semi-major axis becomes the target radius
    #[arg(long)]
    pub to: Option<String>,

    /// Start radius in km, instead of a departure body
    #[arg(long)]
    pub r_start: Option<Decimal>,

    /// Target radius in km, instead of a target body
    #[arg(long)]
    pub r_target: Option<Decimal>,

    /// Force an inward transfer (otherwise inferred from the radii)
    #[arg(long, default_value_t = false)]
    pub inward: bool,

    /// List launch windows around this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<DateTime<Utc>>,

    /// Number of upcoming launch windows to list with --date
    #[arg(long, default_value_t = 3)]
    pub windows: usize,

    /// Extra body definitions (YAML list, TOML file or directory)
    #[arg(long)]
    pub bodies: Option<PathBuf>,

    /// JSON output path ("-" for stdout)
    #[arg(long, default_value = "-")]
    pub output: PathBuf,
}

/// Endpoints of a transfer after prompting for whatever is missing.
pub struct Endpoints<'a> {
    pub central: &'a Body,
    pub start: Option<&'a Body>,
    pub target: Option<&'a Body>,
    pub knowns: Knowns,
}

impl TransferArgs {
    /// Bodies named by flags or answers. Without any endpoint flag the
    /// departure and target bodies are asked for.
    pub fn endpoints<'a, R: BufRead, W: Write>(
        &self,
        catalog: &'a Catalog,
        prompter: &mut Prompter<R, W>,
    ) -> anyhow::Result<Endpoints<'a>> {
        let central = catalog.get(&self.central)?;
        let (from, to) = if self.from.is_none()
            && self.to.is_none()
            && self.r_start.is_none()
            && self.r_target.is_none()
        {
            (
                Some(prompter.line("From (body)")?),
                Some(prompter.line("To (body)")?),
            )
        } else {
            (self.from.clone(), self.to.clone())
        };
        let start = from.as_deref().map(|name| catalog.get(name)).transpose()?;
        let target = to.as_deref().map(|name| catalog.get(name)).transpose()?;
        let inward = self.inward.then_some(Decimal::ONE);
        let knowns = knowns_from(&[
            ("r_start", self.r_start),
            ("r_target", self.r_target),
            ("inward", inward),
        ]);
        Ok(Endpoints {
            central,
            start,
            target,
            knowns,
        })
    }

    /// Report the transfer, then the launch windows when a date was given.
    pub fn finish(&self, transfer: &TransferEllipse<'_>) -> anyhow::Result<()> {
        report(transfer.trace(), transfer, &self.output)?;
        println!();
        println!("Transfer time: {:.1} days", transfer.transfer_days());
        if let Some(date) = self.date {
            print_windows(&transfer.launch_windows()?, date, self.windows)?;
        }
        Ok(())
    }
}

/// Launch windows bracketing `date` followed by the next `count` ones.
pub fn print_windows(
    windows: &LaunchWindows,
    date: DateTime<Utc>,
    count: usize,
) -> anyhow::Result<()> {
    let (previous, next) = windows.around(date)?;
    println!(
        "Launch windows around {}: {} / {}",
        date.format("%Y-%m-%d"),
        previous.format("%Y-%m-%d %H:%M"),
        next.format("%Y-%m-%d %H:%M")
    );
    for (index, window) in windows.upcoming(date, count)?.iter().enumerate() {
        println!("  #{:<2} {}", index + 1, window.format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}

/// `YYYY-MM-DD`, midnight UTC.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
}
