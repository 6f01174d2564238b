//! `rse estimate`: size a deployment locally or through the service

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use estimator_lib::{
    DeploymentType, EstimateInput, EstimateResult, Estimator, ServiceEnvelope,
};
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{
    format_gb, format_quantity, format_range, or_dash, print_info, print_json, print_table,
    print_warning, OutputFormat, NOT_AVAILABLE,
};

/// Engaged users below which the shared-resource option is offered
const SHARED_ENGAGED_USERS: u64 = 325;
/// Average repositories below which the shared-resource option is offered
const SHARED_AVERAGE_REPOSITORIES: u64 = 750;

#[derive(Debug, Clone, Args)]
pub struct EstimateArgs {
    /// Total number of users
    #[arg(long, default_value_t = 300)]
    pub users: u32,

    /// Percentage of users active on a regular basis
    #[arg(long, default_value_t = 100)]
    pub engagement_rate: u32,

    /// Number of repositories
    #[arg(long, default_value_t = 5000)]
    pub repositories: u32,

    /// Repositories larger than 2GB
    #[arg(long, default_value_t = 5)]
    pub large_monorepos: u32,

    /// Combined size of all repositories in GB
    #[arg(long = "total-repo-size", default_value_t = 500)]
    pub total_repo_size_gb: u32,

    /// Size of the largest repository in GB
    #[arg(long = "largest-repo-size", default_value_t = 5)]
    pub largest_repo_size_gb: u32,

    /// Size of the largest precise code intelligence index in GB
    #[arg(long = "largest-index-size", default_value_t = 3)]
    pub largest_index_size_gb: u32,

    /// Deployment topology (kubernetes, docker-compose)
    #[arg(long, default_value = "kubernetes")]
    pub deployment: DeploymentType,

    /// Disable code insight background jobs
    #[arg(long)]
    pub no_code_insight: bool,

    /// Disable precise code intelligence
    #[arg(long)]
    pub no_code_intel: bool,

    /// Ask the estimator service instead of computing locally
    #[arg(long)]
    pub remote: bool,
}

impl EstimateArgs {
    pub fn to_input(&self) -> EstimateInput {
        EstimateInput {
            users: self.users,
            engagement_rate: self.engagement_rate,
            repositories: self.repositories,
            large_monorepos: self.large_monorepos,
            total_repo_size_gb: self.total_repo_size_gb,
            largest_repo_size_gb: self.largest_repo_size_gb,
            largest_index_size_gb: self.largest_index_size_gb,
            code_insight: !self.no_code_insight,
            code_intel: !self.no_code_intel,
            deployment: self.deployment,
        }
    }
}

/// Row for the per-service table
#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Replicas")]
    replicas: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "Memory")]
    memory: String,
    #[tabled(rename = "Ephemeral")]
    ephemeral: String,
    #[tabled(rename = "Storage")]
    storage: String,
}

impl ServiceRow {
    fn new(name: &str, envelope: &ServiceEnvelope, deployment: DeploymentType) -> Self {
        if envelope.contact_support {
            return Self {
                service: name.red().to_string(),
                replicas: NOT_AVAILABLE.to_string(),
                cpu: NOT_AVAILABLE.to_string(),
                memory: NOT_AVAILABLE.to_string(),
                ephemeral: NOT_AVAILABLE.to_string(),
                storage: NOT_AVAILABLE.to_string(),
            };
        }

        match deployment {
            DeploymentType::Kubernetes => Self {
                service: name.to_string(),
                replicas: envelope.replicas.to_string(),
                cpu: format_range(envelope.cpu, ""),
                memory: format_range(envelope.memory, "G"),
                ephemeral: if envelope.ephemeral.is_zero() {
                    "-".to_string()
                } else {
                    format_range(envelope.ephemeral, "G")
                },
                storage: or_dash(envelope.storage, format_gb),
            },
            // Compose runs one container per service sized for every replica
            DeploymentType::DockerCompose => {
                let replicas = envelope.replicas.max(1) as f64;
                Self {
                    service: name.to_string(),
                    replicas: "1".to_string(),
                    cpu: format_quantity(envelope.cpu.limit * replicas),
                    memory: format_gb(envelope.memory.limit * replicas),
                    ephemeral: or_dash(envelope.ephemeral.limit, format_gb),
                    storage: or_dash(envelope.storage, format_gb),
                }
            }
        }
    }
}

/// Whether the shared-resource option applies to this estimate
pub fn suggests_shared_resources(result: &EstimateResult) -> bool {
    result.derived.engaged_users < SHARED_ENGAGED_USERS
        && result.derived.average_repositories < SHARED_AVERAGE_REPOSITORIES
}

/// Summary lines shown under the service table
pub fn summary_lines(result: &EstimateResult) -> Vec<(String, String)> {
    let totals = &result.totals;
    let value = |rendered: String| {
        if result.contact_support {
            "not available".to_string()
        } else {
            rendered
        }
    };

    vec![
        (
            "Estimated total CPUs".to_string(),
            value(format_quantity(totals.total_cpu.ceil())),
        ),
        (
            "Estimated total memory".to_string(),
            value(format_gb(totals.total_memory_gb.ceil())),
        ),
        (
            "Estimated total storage".to_string(),
            value(format_gb(totals.total_storage_gb.ceil())),
        ),
    ]
}

pub async fn run(args: EstimateArgs, api_url: &str, format: OutputFormat) -> Result<()> {
    let (result, clamped_fields) = if args.remote {
        let client = ApiClient::new(api_url)?;
        let response = client.estimate(&args.to_input()).await?;
        (response.result, response.clamped_fields)
    } else {
        let (input, clamped) = args.to_input().clamped();
        let result = Estimator::default().estimate(&input);
        (result, clamped.into_iter().map(String::from).collect())
    };

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => print_estimate(&result, &clamped_fields),
    }

    Ok(())
}

fn print_estimate(result: &EstimateResult, clamped_fields: &[String]) {
    if !clamped_fields.is_empty() {
        print_warning(&format!(
            "Adjusted into the supported range: {}",
            clamped_fields.join(", ")
        ));
        println!();
    }

    println!("{}", "Estimate Summary".bold());
    println!("{}", "=".repeat(50));
    println!("Deployment:             {}", result.input.deployment.to_string().cyan());
    println!("Engaged users:          {}", result.derived.engaged_users);
    println!("Average repositories:   {}", result.derived.average_repositories);
    println!();

    for (label, value) in summary_lines(result) {
        println!("{:<24}{}", format!("{}:", label), value.bold());
    }
    println!(
        "{}",
        "The estimated total includes default values for other services.".dimmed()
    );
    println!();

    if suggests_shared_resources(result) {
        print_info(&format!(
            "Cost-saving option: shared resources need about {} CPUs and {} memory",
            format_quantity(result.totals.shared_cpu.ceil()),
            format_gb(result.totals.shared_memory_gb.ceil())
        ));
        let how = match result.input.deployment {
            DeploymentType::Kubernetes => {
                "Apply the limits below and remove or reduce the requests for each service."
            }
            DeploymentType::DockerCompose => {
                "Apply the limits below but only provision a machine with the shared resources."
            }
        };
        println!("  {}", how.dimmed());
        println!();
    }

    if result.contact_support {
        print_warning(&format!(
            "Please contact support for services marked as {}: {}",
            NOT_AVAILABLE,
            result.contact_support_services().join(", ")
        ));
        println!();
    }

    let rows: Vec<ServiceRow> = result
        .services
        .iter()
        .map(|(name, envelope)| ServiceRow::new(name, envelope, result.input.deployment))
        .collect();
    print_table(&rows);
}
