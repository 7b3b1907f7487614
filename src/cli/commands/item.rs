//! Item commands
//!
//! `item create|read|list|replace|delete`.

use super::{
    connect, parse_partition_key, print_json, report_failure, ContainerTarget, ItemBody, EXIT_OK,
};
use crate::domain::PartitionKeyValue;
use clap::{Args, Subcommand};
use serde_json::Value;

/// Arguments for the item command
#[derive(Args, Debug)]
pub struct ItemArgs {
    #[command(subcommand)]
    pub action: ItemAction,
}

/// Item operations
#[derive(Subcommand, Debug)]
pub enum ItemAction {
    /// Upsert an item and print it as stored
    Create {
        #[command(flatten)]
        target: ContainerTarget,

        #[command(flatten)]
        body: ItemBody,
    },

    /// Read an item by id and partition-key value
    Read {
        #[command(flatten)]
        target: ContainerTarget,

        /// Item id
        #[arg(long)]
        id: String,

        /// Partition-key value (JSON literal or bare string)
        #[arg(long, value_parser = parse_partition_key)]
        partition_key: PartitionKeyValue,
    },

    /// Print every item of the container
    List(ContainerTarget),

    /// Replace an existing item and print it as stored
    Replace {
        #[command(flatten)]
        target: ContainerTarget,

        #[command(flatten)]
        body: ItemBody,

        /// Partition-key value of the existing item
        #[arg(long, value_parser = parse_partition_key)]
        partition_key: PartitionKeyValue,
    },

    /// Delete an item; id and partition key are read from the body
    Delete {
        #[command(flatten)]
        target: ContainerTarget,

        #[command(flatten)]
        body: ItemBody,
    },
}

impl ItemArgs {
    /// Execute the item command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, gateway) = match connect(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        match &self.action {
            ItemAction::Create { target, body } => {
                let item = match body.load() {
                    Ok(item) => item,
                    Err(e) => return Ok(report_failure("Invalid item", &e)),
                };
                match gateway
                    .create_item(&target.database, &target.container, &item)
                    .await
                {
                    Ok(stored) => {
                        println!("✅ Created item: {}", item_id(&stored));
                        print_json(&stored);
                        Ok(EXIT_OK)
                    }
                    Err(e) => Ok(report_failure("Failed to create item", &e)),
                }
            }
            ItemAction::Read {
                target,
                id,
                partition_key,
            } => match gateway
                .read_item(&target.database, &target.container, id, partition_key)
                .await
            {
                Ok(item) => {
                    print_json(&item);
                    Ok(EXIT_OK)
                }
                Err(e) => Ok(report_failure("Failed to read item", &e)),
            },
            ItemAction::List(target) => {
                match gateway
                    .read_all_items(&target.database, &target.container)
                    .await
                {
                    Ok(items) => {
                        println!("Found {} item(s):", items.len());
                        for item in &items {
                            print_json(item);
                        }
                        Ok(EXIT_OK)
                    }
                    Err(e) => Ok(report_failure("Failed to list items", &e)),
                }
            }
            ItemAction::Replace {
                target,
                body,
                partition_key,
            } => {
                let item = match body.load() {
                    Ok(item) => item,
                    Err(e) => return Ok(report_failure("Invalid item", &e)),
                };
                match gateway
                    .replace_item(&target.database, &target.container, &item, partition_key)
                    .await
                {
                    Ok(stored) => {
                        println!("✅ Replaced item: {}", item_id(&stored));
                        print_json(&stored);
                        Ok(EXIT_OK)
                    }
                    Err(e) => Ok(report_failure("Failed to replace item", &e)),
                }
            }
            ItemAction::Delete { target, body } => {
                let item = match body.load() {
                    Ok(item) => item,
                    Err(e) => return Ok(report_failure("Invalid item", &e)),
                };
                match gateway
                    .delete_item(&target.database, &target.container, &item)
                    .await
                {
                    Ok(()) => {
                        println!("✅ Deleted item: {}", item_id(&item));
                        Ok(EXIT_OK)
                    }
                    Err(e) => Ok(report_failure("Failed to delete item", &e)),
                }
            }
        }
    }
}

fn item_id(item: &Value) -> &str {
    item.get("id").and_then(Value::as_str).unwrap_or("<unknown>")
}
