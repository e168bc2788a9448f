use crate::cidr_block;
use crate::error::SubnetAllocatorError;
use ipnet::Ipv4Net;

/// Find the numerically lowest subnet of `parent` with `new_prefix_len` bits
/// of prefix that overlaps none of the blocks in `allocated`.
///
/// Candidates are tested in ascending base-address order, so repeated calls
/// with the same inputs return the same block. Members of `allocated` that
/// lie outside `parent` are harmless; they can never overlap a candidate.
pub fn first_available_subnet(
    parent: Ipv4Net,
    allocated: &[Ipv4Net],
    new_prefix_len: u8,
) -> Result<Ipv4Net, SubnetAllocatorError> {
    let parent = cidr_block::ensure_aligned(parent)?;
    if new_prefix_len < parent.prefix_len() || new_prefix_len > 32 {
        return Err(SubnetAllocatorError::PrefixOutOfRange {
            parent: parent.prefix_len(),
            requested: new_prefix_len,
        });
    }
    for block in allocated {
        cidr_block::ensure_aligned(*block)?;
    }

    let candidates = parent
        .subnets(new_prefix_len)
        .map_err(|_| SubnetAllocatorError::PrefixOutOfRange {
            parent: parent.prefix_len(),
            requested: new_prefix_len,
        })?;
    for candidate in candidates {
        if allocated
            .iter()
            .all(|block| !cidr_block::overlaps(&candidate, block))
        {
            return Ok(candidate);
        }
    }
    Err(SubnetAllocatorError::NoAvailableBlock)
}

/// CIDR-notation front of [`first_available_subnet`], matching what callers
/// hold after querying live infrastructure state.
pub fn find_available_block(
    parent_cidr: &str,
    allocated_cidrs: &[String],
    new_prefix_len: u8,
) -> Result<String, SubnetAllocatorError> {
    let parent = cidr_block::parse_aligned(parent_cidr)?;
    let allocated = allocated_cidrs
        .iter()
        .map(|cidr| cidr_block::parse_aligned(cidr))
        .collect::<Result<Vec<Ipv4Net>, SubnetAllocatorError>>()?;
    let block = first_available_subnet(parent, &allocated, new_prefix_len)?;
    Ok(block.to_string())
}
