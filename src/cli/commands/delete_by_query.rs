//! Delete-by-query command implementation

use super::query::QueryInput;
use super::{connect, report_failure, ContainerTarget, EXIT_OK};
use clap::Args;

/// Arguments for the delete-by-query command
#[derive(Args, Debug)]
pub struct DeleteByQueryArgs {
    #[command(flatten)]
    pub target: ContainerTarget,

    /// Field of each match holding its partition-key value
    #[arg(long)]
    pub partition_key_field: String,

    #[command(flatten)]
    pub input: QueryInput,
}

impl DeleteByQueryArgs {
    /// Execute the delete-by-query command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let spec = match self.input.to_spec() {
            Ok(spec) => spec,
            Err(e) => return Ok(report_failure("Invalid query", &e)),
        };

        let (_, gateway) = match connect(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        tracing::info!(
            container = %self.target.container,
            query = %spec.query,
            "Deleting items by query"
        );

        match gateway
            .delete_items_by_query(
                &self.target.database,
                &self.target.container,
                &self.partition_key_field,
                &spec,
            )
            .await
        {
            Ok(deleted) => {
                println!("✅ Deleted {deleted} item(s)");
                Ok(EXIT_OK)
            }
            Err(e) => Ok(report_failure(
                "Delete by query failed; some items may already be deleted",
                &e,
            )),
        }
    }
}
