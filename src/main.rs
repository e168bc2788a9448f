mod allocator;
mod cidr_block;
mod error;
mod vpc_client;

use lambda::{handler_fn, Context};
use rusoto_core::Region;

use serde::{Deserialize, Serialize};

use crate::vpc_client::VpcNetworkClient;

const DEFAULT_SUBNET_PREFIX_LEN: u8 = 26;

#[derive(Deserialize)]
pub struct AllocationEvent {
    vpc_id: String,
    prefix_len: Option<u8>,
}

#[derive(Serialize)]
pub struct AllocationOutput {
    cidr_block: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    lambda::run(handler_fn(allocation_handler)).await?;
    Ok(())
}

async fn allocation_handler(
    event: AllocationEvent,
    _: Context,
) -> Result<AllocationOutput, Box<dyn std::error::Error + Send + Sync + 'static>> {
    let client = VpcNetworkClient::new(Region::default());
    let prefix_len = event.prefix_len.unwrap_or(DEFAULT_SUBNET_PREFIX_LEN);
    let cidr_block = client
        .find_available_cidr_block(&event.vpc_id, prefix_len)
        .await?;
    Ok(AllocationOutput { cidr_block })
}
