//! Check command - validates uniqueness rules against a JSON document.
//!
//! Rules come either from `--target`/`--search` flags or from the nearest
//! `Unicity.toml`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, anyhow};
use clap::ValueEnum;
use nu_ansi_term::Color;
use serde_json::Value;
use tracing::debug;
use unicity::{
    SearchPaths, UniqueConstraint, UniquePolicy, UniqueRule, ValidationOutput, validate,
};
use unicity_config::{CONFIG_FILENAME, UnicityConfig};

use crate::util::{display_path, read_json};

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PolicyArg {
    /// Duplicate when the value occurs more than once (cached)
    Counted,
    /// Duplicate when an equal value sits at another position
    PositionAware,
}

impl From<PolicyArg> for UniquePolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Counted => UniquePolicy::Counted,
            PolicyArg::PositionAware => UniquePolicy::PositionAware,
        }
    }
}

#[derive(clap::Args)]
pub struct Args {
    /// Path to JSON document to check (use - for stdin)
    pub file: String,

    /// Path to config file (defaults to the nearest Unicity.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run only these rules from the config file
    #[arg(short, long)]
    pub rule: Vec<String>,

    /// Check the values at this path instead of using a config file
    #[arg(long)]
    pub target: Option<String>,

    /// Where to search for duplicates (repeatable; defaults to --target)
    #[arg(long, requires = "target")]
    pub search: Vec<String>,

    /// Duplicate policy for --target
    #[arg(long, value_enum, default_value = "counted", requires = "target")]
    pub policy: PolicyArg,

    /// Reference document to search for duplicates (defaults to the checked file)
    #[arg(long)]
    pub context: Option<String>,

    /// Run without a reference document
    #[arg(long, conflicts_with = "context")]
    pub no_context: bool,

    /// Quiet mode: print a single summary line plus errors
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: Args) {
    let start = Instant::now();

    let data = match read_json(&args.file) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}", Color::Red.paint(e));
            std::process::exit(1);
        }
    };

    let rules = match load_rules(&args) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("{}", Color::Red.paint(format!("Error: {e:#}")));
            std::process::exit(1);
        }
    };

    let reference = match &args.context {
        Some(path) => match read_json(path) {
            Ok(value) => Some(value),
            Err(e) => {
                eprintln!("{}", Color::Red.paint(e));
                std::process::exit(1);
            }
        },
        None => None,
    };
    let context: Option<&Value> = if args.no_context {
        None
    } else {
        Some(reference.as_ref().unwrap_or(&data))
    };

    let output = validate(&data, context, &rules);
    report(&args, rules.len(), &output, start);
}

fn load_rules(args: &Args) -> anyhow::Result<Vec<UniqueRule>> {
    if let Some(target) = &args.target {
        let search = if args.search.is_empty() {
            SearchPaths::single(target.as_str())
        } else {
            args.search.iter().map(String::as_str).collect()
        };
        let constraint =
            UniqueConstraint::new(target.clone(), search)?.with_policy(args.policy.into());
        return Ok(vec![UniqueRule::new(target.as_str(), constraint)]);
    }

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => {
            let current_dir =
                std::env::current_dir().context("Failed to get current directory")?;
            UnicityConfig::find_config_file(&current_dir)
                .ok_or_else(|| anyhow!("No --target given and no {CONFIG_FILENAME} found"))?
        }
    };
    let config = UnicityConfig::load(&config_path)
        .with_context(|| format!("Error loading {}", config_path.display()))?;
    debug!(config = %config_path.display(), rules = config.rules.len(), "loaded config");

    let names: Vec<String> = if args.rule.is_empty() {
        config.default_rules().to_vec()
    } else {
        args.rule.clone()
    };
    if names.is_empty() {
        return Ok(config.to_rules()?);
    }

    names
        .iter()
        .map(|name| -> anyhow::Result<UniqueRule> {
            let rule = config.get_rule(name).ok_or_else(|| {
                let available: Vec<&str> = config.rule_names().collect();
                anyhow!("Unknown rule '{name}' (available: {})", available.join(", "))
            })?;
            Ok(rule.to_rule()?)
        })
        .collect()
}

fn report(args: &Args, rule_count: usize, output: &ValidationOutput, start: Instant) {
    let duration_s = start.elapsed().as_secs_f64();
    let file = display_path(Some(&args.file));

    if !args.quiet {
        for warning in &output.warnings {
            eprintln!("{} {warning}", Color::Yellow.paint("warning:"));
        }
    }
    for error in &output.errors {
        eprintln!("  {} {error}", Color::Red.paint("✗"));
    }

    if args.quiet {
        if output.is_valid {
            println!(
                "unicity check: {} rule(s), ok in {:.2}s",
                rule_count, duration_s
            );
        } else {
            println!(
                "unicity check: {} rule(s), {} error(s) in {:.2}s",
                rule_count,
                output.errors.len(),
                duration_s
            );
        }
    } else if output.is_valid {
        println!("{} {} is valid", Color::Green.bold().paint("✓"), file);
    } else {
        println!(
            "{} {} has {} error(s)",
            Color::Red.bold().paint("✗"),
            file,
            output.errors.len()
        );
    }

    std::process::exit(if output.is_valid { 0 } else { 1 });
}
