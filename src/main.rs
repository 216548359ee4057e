use clap::Parser;
use pr_circular_deps::adapters::local::write_comment;
use pr_circular_deps::core::{CheckOutcome, DependencySource, PullRequestProvider};
use pr_circular_deps::utils::error::{CheckError, ErrorSeverity};
use pr_circular_deps::utils::{logger, validation::Validate};
use pr_circular_deps::{
    CheckSettings, CircularDependencyChecker, CircularDepsRunner, CliConfig, GitHubClient,
    LocalFilesPublisher, LocalPullRequest,
};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting pr-circular-deps");

    let settings = match config.settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Effective settings: {:?}", settings);
    if settings.github_token.is_none() {
        tracing::info!("No GitHub token configured, using unauthenticated requests");
    }

    match run(&config, &settings).await {
        Ok(outcome) => {
            report(&config, outcome)?;
        }
        Err(e) => {
            tracing::error!(
                "❌ Circular dependency check failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run(config: &CliConfig, settings: &CheckSettings) -> Result<CheckOutcome, CheckError> {
    let github = GitHubClient::new(settings)?;

    match &config.files {
        Some(files) if config.publish => {
            let provider = LocalFilesPublisher::new(files, github.clone());
            execute(provider, github, settings, config.dry_run, &config.pr_url).await
        }
        Some(files) => {
            let provider = LocalPullRequest::new(files, config.output.as_ref().map(PathBuf::from));
            execute(provider, github, settings, config.dry_run, &config.pr_url).await
        }
        None => {
            // 沒有 --publish 時只輸出，不在 PR 上留言
            let dry_run = config.dry_run || !config.publish;
            execute(github.clone(), github, settings, dry_run, &config.pr_url).await
        }
    }
}

async fn execute<P, D>(
    provider: P,
    source: D,
    settings: &CheckSettings,
    dry_run: bool,
    pr_url: &str,
) -> Result<CheckOutcome, CheckError>
where
    P: PullRequestProvider,
    D: DependencySource,
{
    let checker = CircularDependencyChecker::new(source, settings)?;
    CircularDepsRunner::new(provider, checker)
        .with_dry_run(dry_run)
        .run(pr_url)
        .await
}

fn report(config: &CliConfig, outcome: CheckOutcome) -> Result<(), CheckError> {
    match outcome {
        CheckOutcome::NoFindings => {
            tracing::info!("✅ No circular dependencies detected");
        }
        CheckOutcome::Published { .. } => {
            tracing::info!("✅ Circular dependency check completed");
        }
        CheckOutcome::DryRun { comment } => {
            if config.dry_run {
                tracing::info!("🔍 DRY RUN MODE - comment rendered, nothing written");
                tracing::debug!("{}", comment);
            } else {
                write_comment(config.output.as_deref().map(std::path::Path::new), &comment)?;
            }
        }
        CheckOutcome::Skipped { reason } => {
            tracing::warn!("Check skipped: {}", reason);
            eprintln!("⚠️ Check skipped: {}", reason);
        }
    }
    Ok(())
}
