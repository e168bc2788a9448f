use std::error::Error;

use ipnet::Ipv4Net;
use rusoto_core::RusotoError;
use rusoto_ec2::{DescribeSubnetsError, DescribeVpcsError};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

#[derive(Debug, PartialEq)]
pub enum SubnetAllocatorError {
    NoneValue,
    MalformedCidr(ipnet::AddrParseError),
    MisalignedBlock(Ipv4Net),
    PrefixOutOfRange { parent: u8, requested: u8 },
    NoAvailableBlock,
    DescribeVpcsFailed(RusotoError<DescribeVpcsError>),
    DescribeSubnetsFailed(RusotoError<DescribeSubnetsError>),
}

impl Display for SubnetAllocatorError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            SubnetAllocatorError::NoneValue => write!(f, "Value is None"),
            SubnetAllocatorError::MalformedCidr(ref error) => std::fmt::Display::fmt(error, f),
            SubnetAllocatorError::MisalignedBlock(ref block) => write!(
                f,
                "Base address {} is not the network address for /{}",
                block.addr(),
                block.prefix_len()
            ),
            SubnetAllocatorError::PrefixOutOfRange { parent, requested } => write!(
                f,
                "Requested prefix length /{} is out of range for parent /{}",
                requested, parent
            ),
            SubnetAllocatorError::NoAvailableBlock => {
                write!(f, "No available CIDR block of the requested size")
            }
            SubnetAllocatorError::DescribeVpcsFailed(ref error) => {
                std::fmt::Display::fmt(error, f)
            }
            SubnetAllocatorError::DescribeSubnetsFailed(ref error) => {
                std::fmt::Display::fmt(error, f)
            }
        }
    }
}

impl Error for SubnetAllocatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            SubnetAllocatorError::MalformedCidr(ref error) => Some(error),
            SubnetAllocatorError::DescribeVpcsFailed(ref error) => Some(error),
            SubnetAllocatorError::DescribeSubnetsFailed(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<ipnet::AddrParseError> for SubnetAllocatorError {
    fn from(e: ipnet::AddrParseError) -> SubnetAllocatorError {
        SubnetAllocatorError::MalformedCidr(e)
    }
}

impl From<RusotoError<DescribeVpcsError>> for SubnetAllocatorError {
    fn from(e: RusotoError<DescribeVpcsError>) -> SubnetAllocatorError {
        SubnetAllocatorError::DescribeVpcsFailed(e)
    }
}

impl From<RusotoError<DescribeSubnetsError>> for SubnetAllocatorError {
    fn from(e: RusotoError<DescribeSubnetsError>) -> SubnetAllocatorError {
        SubnetAllocatorError::DescribeSubnetsFailed(e)
    }
}
