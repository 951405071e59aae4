//! Attack resolver CLI.
//!
//! Loads a character (or a sample one), rebuilds its attack modes from its
//! equipment and features, optionally applies more rules, and prints the
//! result.
//!
//! ```bash
//! cargo run -p dnd-attacks --bin attack-resolver -- --sample monk --attacked
//! cargo run -p dnd-attacks --bin attack-resolver -- --character hero.json --rule "Shield Expert" --format json
//! RUST_LOG=dnd_attacks=debug cargo run -p dnd-attacks --bin attack-resolver -- --list-rules
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dnd_attacks::{
    create_sample_crossbow_ranger, create_sample_fighter, create_sample_monk,
    create_sample_polearm_fighter, AttackMode, AttackResolver, Character, PoolStats,
    RefreshReport, ResolutionOutcome, ResolverConfig, RuleCatalog,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Sample {
    Fighter,
    Ranger,
    Polearm,
    Monk,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Resolve a character's attack modes
#[derive(Parser, Debug)]
#[command(name = "attack-resolver")]
#[command(about = "Build a D&D character's attack modes and apply extra-attack rules")]
struct Args {
    /// Character JSON file
    #[arg(long, short = 'c', conflicts_with = "sample")]
    character: Option<PathBuf>,

    /// Use a sample character
    #[arg(long, value_enum, default_value = "fighter")]
    sample: Sample,

    /// Record an attack this turn before resolving
    #[arg(long)]
    attacked: bool,

    /// Extra rule or group to apply after the refresh (repeatable)
    #[arg(long = "rule", short = 'r')]
    rules: Vec<String>,

    /// Resolver configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// List the catalog's rules and groups and exit
    #[arg(long)]
    list_rules: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
}

/// JSON output structure
#[derive(Serialize)]
struct Output<'a> {
    character: &'a str,
    refresh: RefreshReport,
    rules: Vec<RuleResult>,
    attack_modes: &'a [AttackMode],
    pool: PoolStats,
}

#[derive(Serialize)]
struct RuleResult {
    rule: String,
    outcome: ResolutionOutcome,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let catalog = RuleCatalog::standard().context("Failed to build the rule catalog")?;

    if args.list_rules {
        print_catalog(&catalog);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => ResolverConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ResolverConfig::default(),
    };
    let mut resolver = AttackResolver::new(config);

    let mut character = match &args.character {
        Some(path) => load_character(path)?,
        None => sample_character(args.sample),
    };
    if args.attacked {
        character.record_attack();
    }

    let refresh = resolver.refresh_attack_modes(&mut character, &catalog);
    info!(
        character = %character.name,
        modes = character.attack_modes.len(),
        "Attack modes refreshed"
    );

    let mut results = Vec::new();
    for name in &args.rules {
        let rules = catalog.rules_for(name);
        if rules.is_empty() {
            anyhow::bail!("Unknown rule or group: {name}");
        }
        for rule in rules {
            let outcome = resolver.try_add_extra_attack(&mut character, rule);
            results.push(RuleResult {
                rule: rule.name().to_string(),
                outcome,
            });
        }
    }

    match args.format {
        Format::Json => {
            let output = Output {
                character: &character.name,
                refresh,
                rules: results,
                attack_modes: &character.attack_modes,
                pool: resolver.pool_stats(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => {
            println!("{}:", character.name);
            for mode in &character.attack_modes {
                println!("  {mode}");
            }
            for result in &results {
                if let ResolutionOutcome::Ineligible { validator } = &result.outcome {
                    println!("  ({} not applicable: {validator})", result.rule);
                }
            }
        }
    }

    Ok(())
}

fn load_character(path: &Path) -> Result<Character> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read character from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse character from {}", path.display()))
}

fn sample_character(sample: Sample) -> Character {
    match sample {
        Sample::Fighter => create_sample_fighter("Roland"),
        Sample::Ranger => create_sample_crossbow_ranger("Vex"),
        Sample::Polearm => create_sample_polearm_fighter("Gwen"),
        Sample::Monk => create_sample_monk("Li"),
    }
}

fn print_catalog(catalog: &RuleCatalog) {
    println!("Rules:");
    for rule in catalog.rules() {
        let validators: Vec<&str> = rule.validators().iter().map(|v| v.name()).collect();
        println!(
            "  {} ({}, {}) [{}]",
            rule.name(),
            rule.kind().name(),
            rule.action_type(),
            validators.join(", ")
        );
    }
    println!("Groups:");
    for (name, members) in catalog.groups() {
        println!("  {name}: {}", members.join(", "));
    }
}
