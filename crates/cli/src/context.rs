//! Application context - wires everything together

use anyhow::Context;
use std::path::Path;
use synergos_approval::ApprovalWorkflow;
use synergos_core::Dataset;
use synergos_provider::WalletProvider;

use crate::config::SynergosConfig;

/// Application context - wires together all components
pub struct AppContext {
    pub config: SynergosConfig,
    pub workflow: ApprovalWorkflow,
    pub provider: WalletProvider,
}

impl AppContext {
    /// Build a context over the dataset at `dataset_path`, or the demo data
    pub fn new(dataset_path: Option<&Path>, config: SynergosConfig) -> anyhow::Result<Self> {
        let dataset = match dataset_path {
            Some(path) => load_dataset(path)?,
            None => Dataset::demo(),
        };
        Self::from_dataset(dataset, config)
    }

    pub fn from_dataset(dataset: Dataset, config: SynergosConfig) -> anyhow::Result<Self> {
        tracing::debug!(
            users = dataset.users.len(),
            groups = dataset.groups.len(),
            transactions = dataset.transactions.len(),
            "Loading dataset"
        );

        let workflow = ApprovalWorkflow::in_memory(dataset, config.workflow.clone())
            .context("dataset is not consistent")?;
        let provider = WalletProvider::new(config.currency.clone());

        Ok(Self {
            config,
            workflow,
            provider,
        })
    }

    /// Current state of users, groups and transactions
    pub fn dataset(&self) -> Dataset {
        self.workflow.snapshot()
    }

    /// Write the current state as pretty JSON
    pub fn export(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.dataset())?;
        std::fs::write(path, json)
            .with_context(|| format!("cannot write dataset to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Dataset exported");
        Ok(())
    }
}

pub fn load_dataset(path: &Path) -> anyhow::Result<Dataset> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read dataset {}", path.display()))?;
    let dataset = serde_json::from_str(&raw)
        .with_context(|| format!("malformed dataset {}", path.display()))?;
    Ok(dataset)
}
