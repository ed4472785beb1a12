//! Synergos CLI - Main entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use synergos_cli::{commands, AppContext, SynergosConfig};
use synergos_provider::{
    CashinConfirmRequest, CashinSimulateRequest, PrecreateRequest, TransferConfirmRequest,
    TransferSimulateRequest,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "synergos")]
#[command(about = "Synergos - shared group wallets with unanimous approval", long_about = None)]
struct Cli {
    /// Dataset file (JSON); the demo dataset is used when omitted
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,

    /// Config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write the resulting dataset here after the command
    #[arg(long, global = true)]
    export: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List users
    Users,

    /// List groups
    Groups {
        /// Only the active groups of this user
        #[arg(long)]
        user: Option<String>,
    },

    /// Groups awaiting approval that include a user
    PendingGroups {
        #[arg(long)]
        user: String,
    },

    /// List transactions
    Transactions {
        /// Only the transactions of this group
        #[arg(long)]
        group: Option<String>,
    },

    /// Transactions waiting on a user's approval
    PendingTransactions {
        #[arg(long)]
        user: String,
    },

    /// Workflow counters
    Summary,

    // === Group workflow ===

    /// Propose a new group wallet
    ProposeGroup {
        /// Group name
        name: String,
        /// Proposing user (counted as approved)
        #[arg(long)]
        by: String,
        /// Member user ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        members: Vec<String>,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Approve a pending group
    ApproveGroup { group: String, user: String },

    /// Reject a pending group (deletes it)
    RejectGroup { group: String, user: String },

    // === Transaction workflow ===

    /// Propose a transaction on a group wallet
    AddTransaction {
        group: String,
        /// cashin, cashout, w2w (or wallet-transfer), payment
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        fees: Option<String>,
        /// Proposing member (counted as approved)
        #[arg(long)]
        by: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        beneficiary: Option<String>,
    },

    /// Approve a pending transaction
    ApproveTransaction { transaction: String, user: String },

    /// Reject a pending transaction
    RejectTransaction { transaction: String, user: String },

    /// Run a JSON script of workflow actions
    Run {
        script: PathBuf,
        /// Stop at the first refused action
        #[arg(long)]
        stop_on_error: bool,
    },

    // === Analytics ===

    /// Dashboard KPIs
    Stats,

    /// User locations and city density
    Locations,

    /// Co-membership graph
    Graph,

    /// Wallet provider simulator
    #[command(subcommand)]
    Provider(ProviderCommand),
}

#[derive(Subcommand)]
enum ProviderCommand {
    /// Issue a transfer OTP
    Otp,

    /// Pre-create a wallet
    Precreate {
        phone_number: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        operator: Option<String>,
    },

    /// Activate a pre-created wallet
    Activate,

    /// Balance of a user or group contract
    Balance {
        #[arg(long)]
        contract_id: Option<String>,
    },

    /// Client profile by phone number
    ClientInfo { phone_number: String },

    /// Operation history
    History {
        #[arg(long)]
        contract_id: Option<String>,
    },

    CashinSimulate {
        amount: String,
        #[arg(long)]
        contract_id: Option<String>,
        #[arg(long)]
        fees: Option<String>,
    },

    CashinConfirm {
        token: String,
        amount: String,
        #[arg(long)]
        contract_id: Option<String>,
        #[arg(long)]
        fees: Option<String>,
    },

    TransferSimulate {
        amount: String,
        /// Destination user id
        #[arg(long)]
        to: String,
        #[arg(long)]
        fees: Option<String>,
    },

    TransferConfirm { amount: String },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays parseable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = SynergosConfig::load(cli.config.as_deref())?;
    let mut ctx = AppContext::new(cli.dataset.as_deref(), config)?;

    match cli.command {
        Commands::Users => commands::users(&ctx)?,
        Commands::Groups { user } => commands::groups(&ctx, user.as_deref())?,
        Commands::PendingGroups { user } => commands::pending_groups(&ctx, &user)?,
        Commands::Transactions { group } => commands::transactions(&ctx, group.as_deref())?,
        Commands::PendingTransactions { user } => commands::pending_transactions(&ctx, &user)?,
        Commands::Summary => commands::summary(&ctx)?,

        Commands::ProposeGroup {
            name,
            by,
            members,
            description,
        } => commands::propose_group(&mut ctx, &name, &description, &members, &by)?,
        Commands::ApproveGroup { group, user } => commands::approve_group(&mut ctx, &group, &user)?,
        Commands::RejectGroup { group, user } => commands::reject_group(&mut ctx, &group, &user)?,

        Commands::AddTransaction {
            group,
            kind,
            amount,
            fees,
            by,
            description,
            beneficiary,
        } => commands::add_transaction(
            &mut ctx,
            &group,
            &kind,
            &amount,
            fees.as_deref(),
            &by,
            description.as_deref(),
            beneficiary.as_deref(),
        )?,
        Commands::ApproveTransaction { transaction, user } => {
            commands::approve_transaction(&mut ctx, &transaction, &user)?
        }
        Commands::RejectTransaction { transaction, user } => {
            commands::reject_transaction(&mut ctx, &transaction, &user)?
        }

        Commands::Run {
            script,
            stop_on_error,
        } => {
            let raw = std::fs::read_to_string(&script)?;
            commands::run_script(&mut ctx, &raw, stop_on_error)?;
        }

        Commands::Stats => commands::stats(&ctx)?,
        Commands::Locations => commands::locations(&ctx)?,
        Commands::Graph => commands::graph(&ctx)?,

        Commands::Provider(cmd) => run_provider(&mut ctx, cmd)?,
    }

    if let Some(path) = cli.export {
        ctx.export(&path)?;
        println!("✅ Dataset written to {}", path.display());
    }

    Ok(())
}

fn run_provider(ctx: &mut AppContext, cmd: ProviderCommand) -> anyhow::Result<()> {
    match cmd {
        ProviderCommand::Otp => commands::provider_otp(ctx),
        ProviderCommand::Precreate {
            phone_number,
            first_name,
            last_name,
            email,
            operator,
        } => commands::provider_precreate(
            ctx,
            &PrecreateRequest {
                phone_number,
                client_first_name: first_name,
                client_last_name: last_name,
                email,
                phone_operator: operator,
                ..Default::default()
            },
        ),
        ProviderCommand::Activate => commands::provider_activate(ctx),
        ProviderCommand::Balance { contract_id } => {
            commands::provider_balance(ctx, contract_id.as_deref())
        }
        ProviderCommand::ClientInfo { phone_number } => {
            commands::provider_client_info(ctx, &phone_number)
        }
        ProviderCommand::History { contract_id } => {
            commands::provider_history(ctx, contract_id.as_deref())
        }
        ProviderCommand::CashinSimulate {
            amount,
            contract_id,
            fees,
        } => commands::provider_cashin_simulate(
            ctx,
            &CashinSimulateRequest {
                contract_id,
                amount,
                fees,
            },
        ),
        ProviderCommand::CashinConfirm {
            token,
            amount,
            contract_id,
            fees,
        } => commands::provider_cashin_confirm(
            ctx,
            &CashinConfirmRequest {
                token,
                amount,
                contract_id,
                fees,
            },
        ),
        ProviderCommand::TransferSimulate { amount, to, fees } => {
            commands::provider_transfer_simulate(
                ctx,
                &TransferSimulateRequest {
                    amount,
                    destination_user_id: to,
                    fees,
                },
            )
        }
        ProviderCommand::TransferConfirm { amount } => {
            commands::provider_transfer_confirm(ctx, &TransferConfirmRequest { amount })
        }
    }
}
