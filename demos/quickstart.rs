//! Quickstart: create a database and container, then round an item through
//! create, query, replace and delete.
//!
//! Run with a configuration file holding your account endpoint and key:
//!
//! ```bash
//! cargo run --example quickstart -- cosmos-gateway.toml
//! ```

use cosmos_gateway::config::load_config;
use cosmos_gateway::core::Gateway;
use cosmos_gateway::domain::{PartitionKeyValue, QuerySpec};
use cosmos_gateway::logging::init_logging;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cosmos-gateway.toml".to_string());
    let config = load_config(&config_path)?;
    let _guard = init_logging("debug", &config.logging)?;

    let gateway = Gateway::from_config(&config.cosmosdb)?;

    gateway.create_database("ToDoList").await?;
    gateway.create_container("ToDoList", "Items").await?;

    let mut item = json!({
        "id": "task-1",
        "partitionKey": "personal",
        "description": "Pick up apples and strawberries",
        "isComplete": false
    });
    gateway.create_item("ToDoList", "Items", &item).await?;

    let open_tasks = QuerySpec::new("SELECT * FROM root r WHERE r.isComplete = @done")
        .with_parameter("@done", false)?;
    for task in gateway.query_items("ToDoList", "Items", &open_tasks).await? {
        println!("open: {}", task["description"]);
    }

    item["isComplete"] = json!(true);
    let stored = gateway
        .replace_item("ToDoList", "Items", &item, &PartitionKeyValue::from("personal"))
        .await?;
    println!("completed: {}", stored["id"]);

    gateway.delete_item("ToDoList", "Items", &item).await?;
    Ok(())
}
