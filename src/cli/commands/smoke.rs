//! Smoke-test command implementation
//!
//! Walks a live account through every gateway operation with two sample
//! family documents, printing each step as it goes. The sample documents
//! carry their key in `partitionKey`, so the configured partition-key path
//! must be `/partitionKey`.

use super::{connect, print_json, report_failure, EXIT_OK};
use crate::core::partition::extract_item_id;
use crate::core::Gateway;
use crate::domain::{GatewayError, PartitionKeyValue, QuerySpec, Result};
use clap::Args;
use serde_json::{json, Value};

/// Arguments for the smoke-test command
#[derive(Args, Debug)]
pub struct SmokeTestArgs {
    /// Database id
    #[arg(short, long, default_value = "FamilyDatabase")]
    pub database: String,

    /// Container id
    #[arg(short = 'C', long, default_value = "FamilyContainer")]
    pub container: String,

    /// Keep the remaining sample item instead of cleaning it up
    #[arg(long)]
    pub keep: bool,
}

/// Sample family documents keyed on `/partitionKey`
///
/// Both share the run id so cleanup can find them with one query.
pub fn sample_families(run_id: &str) -> (Value, Value) {
    let created_at = chrono::Utc::now().to_rfc3339();

    let andersen = json!({
        "id": format!("Andersen.{run_id}"),
        "partitionKey": "USA",
        "runId": run_id,
        "createdAt": created_at,
        "lastName": "Andersen",
        "parents": [{"firstName": "Thomas"}, {"firstName": "Mary Kay"}],
        "children": [{
            "firstName": "Henriette Thaulow",
            "gender": "female",
            "grade": 5,
            "pets": [{"givenName": "Fluffy"}]
        }],
        "address": {"state": "WA", "county": "King", "city": "Seattle"}
    });

    let wakefield = json!({
        "id": format!("Wakefield.{run_id}"),
        "partitionKey": "USA",
        "runId": run_id,
        "createdAt": created_at,
        "lastName": "Wakefield",
        "parents": [
            {"familyName": "Wakefield", "firstName": "Robin"},
            {"familyName": "Miller", "firstName": "Ben"}
        ],
        "children": [
            {
                "familyName": "Merriam",
                "firstName": "Jesse",
                "gender": "female",
                "grade": 8,
                "pets": [{"givenName": "Goofy"}, {"givenName": "Shadow"}]
            },
            {
                "familyName": "Miller",
                "firstName": "Lisa",
                "gender": "female",
                "grade": 1
            }
        ],
        "address": {"state": "NY", "county": "Manhattan", "city": "NY"}
    });

    (andersen, wakefield)
}

impl SmokeTestArgs {
    /// Execute the smoke-test command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (config, gateway) = match connect(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let run_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(run_id = %run_id, database = %self.database, "Starting smoke test");

        match self
            .run(&gateway, &run_id, config.cosmosdb.default_throughput)
            .await
        {
            Ok(steps) => {
                println!("✅ Smoke test passed ({steps} steps)");
                Ok(EXIT_OK)
            }
            Err(e) => Ok(report_failure("Smoke test failed", &e)),
        }
    }

    /// Runs every step against `gateway` and returns the number of steps
    pub async fn run(&self, gateway: &Gateway, run_id: &str, throughput: u32) -> Result<usize> {
        let db = self.database.as_str();
        let container = self.container.as_str();
        let mut step = 0;
        let mut announce = |label: &str| {
            step += 1;
            println!("[{step}] {label}");
            step
        };

        announce("Create database");
        gateway.create_database(db).await?;

        announce("Read database");
        gateway.read_database(db).await?;

        announce("Create container");
        gateway.create_container(db, container).await?;

        announce("Read container");
        gateway.read_container(db, container).await?;

        announce("Scale container");
        let outcome = gateway.scale_container(db, container, throughput).await?;
        println!("    {outcome:?}");

        let (mut andersen, wakefield) = sample_families(run_id);

        announce("Create Andersen family item");
        gateway.create_item(db, container, &andersen).await?;

        let partition_key = PartitionKeyValue::from("USA");
        announce("Read Andersen family item");
        let stored = gateway
            .read_item(db, container, extract_item_id(&andersen)?, &partition_key)
            .await?;
        if stored["children"] != andersen["children"] {
            return Err(GatewayError::Other(format!(
                "Read back {} differs from what was written",
                stored["id"]
            )));
        }

        announce("Create Wakefield family item");
        gateway.create_item(db, container, &wakefield).await?;

        let children_query =
            QuerySpec::new("SELECT VALUE r.children FROM root r WHERE r.partitionKey = @country")
                .with_parameter("@country", "USA")?
                .with_partition_key("USA");

        announce("Query container");
        for result in gateway.query_items(db, container, &children_query).await? {
            print_json(&result);
        }

        announce("Replace Andersen family item");
        andersen["children"][0]["grade"] = json!(6);
        gateway
            .replace_item(db, container, &andersen, &partition_key)
            .await?;

        announce("Query container");
        for result in gateway.query_items(db, container, &children_query).await? {
            print_json(&result);
        }

        let last = announce("Delete Andersen family item");
        gateway.delete_item(db, container, &andersen).await?;

        if self.keep {
            return Ok(last);
        }

        let cleanup = QuerySpec::new("SELECT * FROM root r WHERE r.runId = @runId")
            .with_parameter("@runId", run_id)?;
        let last = announce("Delete remaining sample items");
        let deleted = gateway
            .delete_items_by_query(db, container, "partitionKey", &cleanup)
            .await?;
        println!("    deleted {deleted} item(s)");

        let last = announce("Read all items");
        let leftovers = gateway
            .read_all_items(db, container)
            .await?
            .into_iter()
            .filter(|item| item["runId"] == run_id)
            .count();
        if leftovers > 0 {
            return Err(GatewayError::Other(format!(
                "{leftovers} sample item(s) of run {run_id} still present"
            )));
        }

        Ok(last)
    }
}
