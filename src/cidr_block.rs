use crate::error::SubnetAllocatorError;
use ipnet::Ipv4Net;

/// Parse a CIDR string, requiring the base address to be the canonical
/// network address for its prefix length.
pub fn parse_aligned(cidr: &str) -> Result<Ipv4Net, SubnetAllocatorError> {
    let block = cidr.parse::<Ipv4Net>()?;
    ensure_aligned(block)
}

pub fn ensure_aligned(block: Ipv4Net) -> Result<Ipv4Net, SubnetAllocatorError> {
    if block.addr() != block.network() {
        return Err(SubnetAllocatorError::MisalignedBlock(block));
    }
    Ok(block)
}

/// Two blocks overlap when their inclusive address ranges intersect.
pub fn overlaps(a: &Ipv4Net, b: &Ipv4Net) -> bool {
    let a_start = u32::from(a.network());
    let a_end = u32::from(a.broadcast());
    let b_start = u32::from(b.network());
    let b_end = u32::from(b.broadcast());
    !(a_end < b_start || b_end < a_start)
}
