use clap::{Parser, Subcommand, ValueEnum};
use gateway_harness::config::cli::{exit_with, GlobalArgs};
use gateway_harness::core::webbattles::{self, UpdateMethod};
use gateway_harness::core::load_artifact;
use gateway_harness::domain::model::ContractArtifact;
use gateway_harness::utils::error::{HarnessError, Result};
use gateway_harness::{HardhatDeployer, HarnessSettings, LocalStorage};

#[derive(Parser)]
#[command(name = "webbattles")]
#[command(about = "Cross-chain WebBattles demo on top of the gateway oracle")]
struct Args {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Deploy WebBattles on both hardhat chains and record the addresses
    Deploy,
    /// Register the sync and battle replication oracle tasks
    Register,
    /// Push the last battle to chain 2 directly
    ExecuteUpdate {
        #[arg(long, value_enum, default_value_t = Mode::Sync)]
        method: Mode,
    },
    /// Show oracle task status, both registered tasks by default
    Status { task_id: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Sync,
    Replicate,
    Both,
}

impl Mode {
    fn methods(self) -> &'static [UpdateMethod] {
        match self {
            Mode::Sync => &[UpdateMethod::Sync],
            Mode::Replicate => &[UpdateMethod::Replicate],
            Mode::Both => &[UpdateMethod::Sync, UpdateMethod::Replicate],
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // 初始化日誌
    args.global.init_logging();
    tracing::info!("🚀 Starting WebBattles demo");

    if let Err(e) = run(args).await {
        exit_with(&e);
    }
}

async fn run(args: Args) -> Result<()> {
    let settings = args.global.load_settings()?;
    let client = settings.gateway_client();

    match args.command {
        Command::Deploy => {
            let deployer = HardhatDeployer::new(&settings.evm_project_dir);
            webbattles::deploy_both_chains(&deployer, &args.global.settings).await?;
            println!("Next step: webbattles register");
        }
        Command::Register => {
            let artifact = webbattles_artifact(&settings).await?;
            let tasks =
                webbattles::register_tasks(&client, &settings, &artifact, &args.global.settings)
                    .await?;
            if !tasks.is_complete() {
                return Err(HarnessError::MissingFieldError {
                    field: "taskID".to_string(),
                });
            }
        }
        Command::ExecuteUpdate { method } => {
            let artifact = webbattles_artifact(&settings).await?;
            let mut outcomes = Vec::new();
            for update in method.methods() {
                let outcome =
                    webbattles::execute_update(&client, &settings, &artifact, *update).await?;
                outcomes.push((*update, outcome.is_success()));
            }

            if method == Mode::Both {
                println!("\nSummary:");
                for (update, succeeded) in &outcomes {
                    println!(
                        "  {}: {}",
                        update,
                        if *succeeded { "SUCCESS" } else { "FAILED" }
                    );
                }
            }

            let failed = outcomes.iter().filter(|(_, ok)| !ok).count();
            if failed > 0 {
                tracing::warn!("⚠️ {} oracle execution(s) failed", failed);
            }
        }
        Command::Status { task_id } => match task_id {
            Some(task_id) => {
                webbattles::check_task_status(&client, &task_id).await?;
            }
            None => webbattles::check_registered_tasks(&client, &settings).await,
        },
    }

    Ok(())
}

async fn webbattles_artifact(settings: &HarnessSettings) -> Result<ContractArtifact> {
    let storage = LocalStorage::new(".");
    load_artifact(&storage, &settings.contract_artifacts_path).await
}
