use async_trait::async_trait;
use ipnet::Ipv4Net;
use rusoto_core::Region;
use rusoto_ec2::{DescribeSubnetsRequest, DescribeVpcsRequest, Ec2, Ec2Client, Filter};

use crate::allocator;
use crate::cidr_block;
use crate::error::SubnetAllocatorError;

pub struct VpcNetworkClient {
    client: Ec2Client,
}

#[async_trait]
pub trait DescribeAddressSpace {
    async fn describe_vpc_cidr(&self, vpc_id: &str) -> Result<Ipv4Net, SubnetAllocatorError>;
    async fn describe_subnet_cidrs(
        &self,
        vpc_id: &str,
    ) -> Result<Vec<Ipv4Net>, SubnetAllocatorError>;
}

#[async_trait]
impl DescribeAddressSpace for VpcNetworkClient {
    async fn describe_vpc_cidr(&self, vpc_id: &str) -> Result<Ipv4Net, SubnetAllocatorError> {
        let request = DescribeVpcsRequest {
            vpc_ids: Some(vec![vpc_id.to_string()]),
            ..DescribeVpcsRequest::default()
        };

        let result = self.client.describe_vpcs(request).await?;
        let vpc = result
            .vpcs
            .ok_or(SubnetAllocatorError::NoneValue)?
            .into_iter()
            .next()
            .ok_or(SubnetAllocatorError::NoneValue)?;
        cidr_block::parse_aligned(&vpc.cidr_block.ok_or(SubnetAllocatorError::NoneValue)?)
    }

    async fn describe_subnet_cidrs(
        &self,
        vpc_id: &str,
    ) -> Result<Vec<Ipv4Net>, SubnetAllocatorError> {
        let request = DescribeSubnetsRequest {
            filters: Some(vec![Filter {
                name: Some("vpc-id".to_string()),
                values: Some(vec![vpc_id.to_string()]),
            }]),
            ..DescribeSubnetsRequest::default()
        };

        let result = self.client.describe_subnets(request).await?;
        let mut cidrs = Vec::<Ipv4Net>::new();
        for subnet in result.subnets.ok_or(SubnetAllocatorError::NoneValue)? {
            cidrs.push(cidr_block::parse_aligned(
                &subnet.cidr_block.ok_or(SubnetAllocatorError::NoneValue)?,
            )?);
        }
        Ok(cidrs)
    }
}

impl VpcNetworkClient {
    pub fn new(region: Region) -> Self {
        VpcNetworkClient {
            client: Ec2Client::new(region),
        }
    }

    fn new_with_client(client: Ec2Client) -> Self {
        VpcNetworkClient { client }
    }

    /// Query the VPC's address space and pick the first free block of the
    /// requested size. The caller commits the block upstream; two racing
    /// invocations against the same VPC can pick the same block, so commit
    /// and verify must be serialized by the caller.
    pub async fn find_available_cidr_block(
        &self,
        vpc_id: &str,
        new_prefix_len: u8,
    ) -> Result<String, SubnetAllocatorError> {
        let parent = self.describe_vpc_cidr(vpc_id).await?;
        let allocated = self.describe_subnet_cidrs(vpc_id).await?;
        let block = allocator::first_available_subnet(parent, &allocated, new_prefix_len)?;
        Ok(block.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::vpc_client::{DescribeAddressSpace, VpcNetworkClient};
    use ipnet::Ipv4Net;
    use rusoto_ec2::Ec2Client;
    use rusoto_mock::{
        MockCredentialsProvider, MockRequestDispatcher, MockResponseReader, ReadMockResponse,
    };

    #[tokio::test]
    async fn test_describe_vpc_cidr() {
        let mock = Ec2Client::new_with(
            MockRequestDispatcher::default().with_body(&*MockResponseReader::read_response(
                "test_resources/valid",
                "describe_vpcs.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = VpcNetworkClient::new_with_client(mock);
        let result = client.describe_vpc_cidr("vpc-0abc12de34f567890").await;

        assert_eq!(result.unwrap(), "10.0.0.0/24".parse::<Ipv4Net>().unwrap());
    }

    #[tokio::test]
    async fn test_describe_subnet_cidrs() {
        let mock = Ec2Client::new_with(
            MockRequestDispatcher::default().with_body(&*MockResponseReader::read_response(
                "test_resources/valid",
                "describe_subnets.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = VpcNetworkClient::new_with_client(mock);
        let result = client.describe_subnet_cidrs("vpc-0abc12de34f567890").await;

        assert_eq!(
            result.unwrap(),
            [
                "10.0.0.0/26".parse::<Ipv4Net>().unwrap(),
                "10.0.0.64/26".parse::<Ipv4Net>().unwrap(),
            ]
        );
    }

    #[tokio::test]
    async fn test_describe_vpc_cidr_error() {
        let mock = Ec2Client::new_with(
            MockRequestDispatcher::with_status(400).with_body(&*MockResponseReader::read_response(
                "test_resources/error",
                "describe_vpcs.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = VpcNetworkClient::new_with_client(mock);
        let result = client.describe_vpc_cidr("vpc-0abc12de34f567890").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_describe_subnet_cidrs_error() {
        let mock = Ec2Client::new_with(
            MockRequestDispatcher::with_status(400).with_body(&*MockResponseReader::read_response(
                "test_resources/error",
                "describe_vpcs.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = VpcNetworkClient::new_with_client(mock);
        let result = client.describe_subnet_cidrs("vpc-0abc12de34f567890").await;

        assert!(result.is_err());
    }
}
