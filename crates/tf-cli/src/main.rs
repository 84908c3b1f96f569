use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use serde::Serialize;
use tf_common::config::ScoringConfig;
use tf_common::dataset::{Dataset, DatasetError};
use tf_common::development::DevelopmentBrief;
use tf_common::insights::{StrategicOverview, TalentView};
use tf_common::logging::{init_tracing_subscriber, LogSettings};
use tf_common::matching::{CompatibilityEngine, RankingReport, ScoringError, ScoringFailure};
use tf_common::{FutureRole, TalentType, VisionPlan};
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "tf-cli",
    about = "Score people against future roles and report on workforce readiness"
)]
struct Cli {
    /// Directory holding org_config.json, vision.json and the talent files
    #[arg(long, global = true, env = "TF_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TalentFilter {
    Internal,
    External,
    All,
}

impl TalentFilter {
    fn admits(self, talent_type: TalentType) -> bool {
        match self {
            TalentFilter::Internal => talent_type == TalentType::Internal,
            TalentFilter::External => talent_type == TalentType::External,
            TalentFilter::All => true,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compatibility breakdown of one person for one future role
    Score {
        #[arg(long)]
        person: u64,
        /// Future role id or title
        #[arg(long)]
        role: String,
    },
    /// Rank candidates for one future role
    Rank {
        /// Future role id or title
        #[arg(long)]
        role: String,
        #[arg(long, value_enum, default_value_t = TalentFilter::All)]
        talent: TalentFilter,
        /// Keep only the best N candidates
        #[arg(long)]
        top: Option<usize>,
    },
    /// Rank every future role for one person
    Roles {
        #[arg(long)]
        person: u64,
    },
    /// Best internal score per future role, weakest first
    Coverage,
    /// Retention, allocation, project load and coverage in one report
    Overview,
    /// Internal roster and average skill levels, for all chapters or one
    Talent {
        /// Chapter name (exact match); all chapters when omitted
        #[arg(long)]
        chapter: Option<String>,
    },
    /// Development brief (score, levels, skill gaps) for one person and role
    Brief {
        #[arg(long)]
        person: u64,
        /// Future role id or title
        #[arg(long)]
        role: String,
    },
    /// Id the next roster entry should get
    NextId,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("no person with id {0}")]
    PersonNotFound(u64),
    #[error("no future role with id or title {0:?}")]
    RoleNotFound(String),
    #[error("no chapter named {0:?} in the org config")]
    ChapterNotFound(String),
    #[error("future role {0} has no definition in the role catalog")]
    RoleUndefined(String),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Looks up a future role by id first, then by title.
fn resolve_role<'a>(vision: &'a VisionPlan, key: &str) -> Result<&'a FutureRole, CliError> {
    vision
        .find_by_id(key)
        .or_else(|| vision.find_by_title(key))
        .ok_or_else(|| CliError::RoleNotFound(key.to_string()))
}

fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text(value)),
    }
    Ok(())
}

fn filter_report(
    mut report: RankingReport,
    talent: TalentFilter,
    top: Option<usize>,
) -> RankingReport {
    report.ranked.retain(|c| talent.admits(c.talent_type));
    if let Some(top) = top {
        report.ranked.truncate(top);
    }
    report
}

fn render_report(report: &RankingReport) -> String {
    let mut out = format!("{} ({})\n", report.role_title, report.role_id);
    for (rank, candidate) in report.ranked.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {:<24} {:<9} {}",
            rank + 1,
            candidate.name,
            candidate.talent_type.as_ref(),
            candidate.readiness.format_percent(candidate.percent)
        );
    }
    render_failures(&mut out, &report.failures);
    out
}

fn render_failures(out: &mut String, failures: &[ScoringFailure]) {
    for failure in failures {
        let _ = writeln!(out, "  ! {}: {}", failure.subject, failure.error);
    }
}

fn run() -> Result<(), CliError> {
    dotenv().ok();
    init_tracing_subscriber(env!("CARGO_PKG_NAME"), LogSettings::from_env());

    let cli = Cli::parse();
    let config = ScoringConfig::from_env();
    let dataset = Dataset::load_dir(&cli.data_dir)?;
    let roles = dataset.role_lookup();
    let engine = CompatibilityEngine::new(config);
    let format = cli.format;

    info!(command = ?cli.command, "running");

    match cli.command {
        Command::Score { person, role } => {
            let person = dataset
                .find_person(person)
                .ok_or(CliError::PersonNotFound(person))?;
            let future_role = resolve_role(&dataset.vision, &role)?;
            let score = engine.calculate_total_compatibility(person, future_role, &roles)?;
            let label = engine.readiness(&score);

            emit(format, &score, |score| {
                let mut out = format!(
                    "{} -> {}: {}\n",
                    person.name,
                    future_role.title,
                    label.format_percent(score.display_percent())
                );
                for (name, component) in score.components() {
                    let _ = writeln!(
                        out,
                        "  {:<17} {:>5.1}/{:<4} {:<13} {}",
                        name,
                        component.score,
                        component.max_score,
                        component.status.as_ref(),
                        component.details
                    );
                }
                out
            })
        }
        Command::Rank { role, talent, top } => {
            let future_role = resolve_role(&dataset.vision, &role)?;
            let report = filter_report(
                engine.rank_candidates(&dataset.people, future_role, &roles),
                talent,
                top,
            );
            emit(format, &report, render_report)
        }
        Command::Roles { person } => {
            let person = dataset
                .find_person(person)
                .ok_or(CliError::PersonNotFound(person))?;
            let ranking = engine.rank_roles_for_person(person, &dataset.vision, &roles);

            emit(format, &ranking, |ranking| {
                let mut out = format!("{} ({})\n", person.name, person.id);
                for role in &ranking.ranked {
                    let _ = writeln!(
                        out,
                        "  {:<32} {}",
                        role.role_title,
                        role.readiness.format_percent(role.percent)
                    );
                }
                render_failures(&mut out, &ranking.failures);
                out
            })
        }
        Command::Coverage => {
            let coverage = engine.role_coverage(&dataset.people, &dataset.vision, &roles);
            emit(format, &coverage, |coverage| {
                let mut out = String::new();
                for entry in coverage {
                    let _ = writeln!(
                        out,
                        "{:<32} {:>3}%{}",
                        entry.role_title,
                        entry.best_score,
                        if entry.is_critical_gap { "  CRITICAL GAP" } else { "" }
                    );
                    render_failures(&mut out, &entry.failures);
                }
                out
            })
        }
        Command::Overview => {
            let overview =
                StrategicOverview::build(&engine, &dataset.people, &dataset.vision, &roles);
            emit(format, &overview, |overview| {
                let mut out = format!("generated {}\n", overview.generated_at.to_rfc3339());
                let watchlist = &overview.retention_watchlist;
                let _ = writeln!(out, "retention watchlist: {}", watchlist.len());
                for entry in watchlist {
                    let _ = writeln!(
                        out,
                        "  {} ({}) risk {}",
                        entry.name,
                        entry.current_role,
                        entry.retention_risk.as_ref()
                    );
                }
                let _ = writeln!(out, "over-allocated: {}", overview.over_allocated.len());
                for entry in &overview.over_allocated {
                    let _ = writeln!(out, "  {} {}%", entry.name, entry.total_dedication);
                }
                let _ = writeln!(out, "project load:");
                for project in &overview.project_load {
                    let _ = writeln!(out, "  {:<24} {}%", project.project, project.total_load);
                }
                let _ = writeln!(out, "critical gaps: {}", overview.critical_gaps.join(", "));
                if !overview.incomplete_coverage.is_empty() {
                    let _ = writeln!(
                        out,
                        "coverage incomplete (unscored people): {}",
                        overview.incomplete_coverage.join(", ")
                    );
                    for entry in overview.coverage.iter().filter(|c| c.is_incomplete()) {
                        let _ = writeln!(out, "  {}", entry.role_title);
                        render_failures(&mut out, &entry.failures);
                    }
                }
                out
            })
        }
        Command::Talent { chapter } => {
            if let Some(name) = chapter.as_deref() {
                if !dataset.catalog.chapter_names().contains(&name) {
                    return Err(CliError::ChapterNotFound(name.to_string()));
                }
            }
            let view = TalentView::build(
                &dataset.people,
                chapter.as_deref(),
                &dataset.catalog.skill_names(),
            );

            emit(format, &view, |view| {
                let mut out = format!(
                    "chapter: {}\n",
                    view.chapter.as_deref().unwrap_or("all")
                );
                for entry in &view.roster {
                    let _ = writeln!(
                        out,
                        "  {:<24} {:<12} {:<24} {}",
                        entry.name, entry.chapter, entry.current_role, entry.manager
                    );
                }
                let _ = writeln!(out, "average skill level:");
                for skill in &view.skill_averages {
                    let _ = writeln!(
                        out,
                        "  {:<28} {:>5.2} ({} people)",
                        skill.skill_name, skill.average_level, skill.people
                    );
                }
                out
            })
        }
        Command::Brief { person, role } => {
            let person = dataset
                .find_person(person)
                .ok_or(CliError::PersonNotFound(person))?;
            let future_role = resolve_role(&dataset.vision, &role)?;
            let role_def = roles
                .get(&future_role.id)
                .ok_or_else(|| CliError::RoleUndefined(future_role.id.clone()))?;
            let score = engine.score_against_definition(person, future_role, role_def)?;
            let brief = DevelopmentBrief::build(
                person,
                future_role,
                role_def,
                &score,
                &dataset.catalog.skill_names(),
                engine.config().skill_gap_level,
            );

            emit(format, &brief, |brief| {
                let mut out = format!(
                    "{} ({}) -> {}\n",
                    brief.person_name, brief.current_role, brief.future_role_title
                );
                let _ = writeln!(out, "  score: {:.2}", brief.score);
                let _ = writeln!(
                    out,
                    "  aspiration: {} / role level: {}",
                    brief.aspiration_level, brief.role_level
                );
                let _ = writeln!(out, "  gaps: {}", brief.gap_summary());
                out
            })
        }
        Command::NextId => {
            let next = dataset.next_person_id();
            emit(format, &next, |next| format!("{next}\n"))
        }
    }
}

fn main() {
    if let Err(err) = run() {
        tracing::error!(error = %err, "tf-cli failed");
        eprintln!("tf-cli: {err}");
        std::process::exit(1);
    }
}
