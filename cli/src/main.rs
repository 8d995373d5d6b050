//! Moebius CLI - prints a constant to increasing decimal precision.
//!
//! ```text
//! moebius [constant] [max-precision]
//! ```
//!
//! `constant` is one of `pi`, `e`, `sqrt2`, `log2`. Both arguments fall back
//! to `[demo]` in `~/.moebius/config.toml`, then to `pi` and `10`. Logs go
//! to stderr and are filtered by `RUST_LOG` (default `info`).

use std::env;
use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use moebius_config::MoebiusConfig;
use moebius_engine::{
    EvalSettings, Expr, TraceSink, ee, elogpos, epi, erational, esqrtrat, render_with,
};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Constant {
    Pi,
    E,
    Sqrt2,
    Log2,
}

impl Constant {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            "sqrt2" => Some(Self::Sqrt2),
            "log2" | "ln2" => Some(Self::Log2),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
            Self::Sqrt2 => "sqrt2",
            Self::Log2 => "log2",
        }
    }

    fn expr(self) -> Result<Expr> {
        Ok(match self {
            Self::Pi => epi(),
            Self::E => ee(),
            Self::Sqrt2 => esqrtrat(2, 1)?,
            Self::Log2 => elogpos(erational(2, 1)?),
        })
    }
}

fn main() -> Result<()> {
    init_tracing();

    let config = match MoebiusConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            tracing::warn!("Using default config: {err}");
            MoebiusConfig::default()
        }
    };
    let settings = match config.eval_settings() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("Using default eval settings: {err}");
            EvalSettings::default()
        }
    };

    let mut args = env::args().skip(1);
    let raw_constant = args
        .next()
        .unwrap_or_else(|| config.demo_constant().to_owned());
    let Some(constant) = Constant::parse(&raw_constant) else {
        bail!("unknown constant {raw_constant:?} (expected pi, e, sqrt2 or log2)");
    };
    let max_precision = match args.next() {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("invalid precision {raw:?}"))?,
        None => config.max_precision(),
    };

    tracing::info!(
        constant = constant.name(),
        max_precision,
        strategy = settings.strategy().as_str(),
        "Starting"
    );

    let mut stdout = io::stdout().lock();
    for precision in 0..=max_precision {
        // fresh stream per precision
        let mut sink = TraceSink;
        let numeral = render_with(constant.expr()?, precision, &settings, &mut sink)
            .with_context(|| format!("rendering {} to {precision} places", constant.name()))?;
        writeln!(stdout, "{} up to {precision} places: {numeral}", constant.name())?;
    }

    Ok(())
}
