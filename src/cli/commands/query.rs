//! Query command implementation

use super::{
    connect, parse_partition_key, parse_query_param, print_json, report_failure, ContainerTarget,
    EXIT_OK,
};
use crate::domain::{PartitionKeyValue, QuerySpec, Result};
use clap::Args;
use serde_json::Value;

/// Query text with its parameters, shared by `query` and `delete-by-query`
#[derive(Args, Debug, Clone)]
pub struct QueryInput {
    /// Query text, e.g. "SELECT * FROM root r WHERE r.partitionKey = @pk"
    #[arg(short, long)]
    pub query: String,

    /// Named parameter as @name=value; may be repeated
    #[arg(long = "param", value_parser = parse_query_param)]
    pub params: Vec<(String, Value)>,

    /// Restrict the query to one partition-key value
    #[arg(long, value_parser = parse_partition_key)]
    pub partition_key: Option<PartitionKeyValue>,
}

impl QueryInput {
    /// Builds the query specification
    pub fn to_spec(&self) -> Result<QuerySpec> {
        let mut spec = QuerySpec::new(self.query.clone());
        for (name, value) in &self.params {
            spec = spec.with_parameter(name.clone(), value)?;
        }
        if let Some(partition_key) = &self.partition_key {
            spec = spec.with_partition_key(partition_key.clone());
        }
        Ok(spec)
    }
}

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub target: ContainerTarget,

    #[command(flatten)]
    pub input: QueryInput,
}

impl QueryArgs {
    /// Execute the query command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let spec = match self.input.to_spec() {
            Ok(spec) => spec,
            Err(e) => return Ok(report_failure("Invalid query", &e)),
        };

        let (_, gateway) = match connect(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        println!("Querying container: {}", self.target.container);
        match gateway
            .query_items(&self.target.database, &self.target.container, &spec)
            .await
        {
            Ok(results) => {
                for result in &results {
                    print_json(result);
                }
                println!("{} result(s)", results.len());
                Ok(EXIT_OK)
            }
            Err(e) => Ok(report_failure("Query failed", &e)),
        }
    }
}
