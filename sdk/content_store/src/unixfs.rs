//! Just enough dag-pb and UnixFS decoding to unwrap a single-block file.
//!
//! Gateways serving `?format=raw` return the exact block the CID hashes, so a
//! CIDv0 document arrives wrapped in a `PBNode { Data: UnixFS { Type, Data } }`
//! envelope. Small files fit in one block; larger ones are split into linked
//! chunks, which this reader does not follow.

// UnixFS Data.Type values
const UNIXFS_RAW: u64 = 0;
const UNIXFS_FILE: u64 = 2;

enum Field<'a> {
    Varint(u64),
    Bytes(&'a [u8]),
}

fn read_varint(buf: &[u8], pos: &mut usize) -> Option<u64> {
    let mut value = 0u64;
    for shift in (0..64).step_by(7) {
        let byte = *buf.get(*pos)?;
        *pos += 1;
        value |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            return Some(value);
        }
    }
    None
}

fn next_field<'a>(buf: &'a [u8], pos: &mut usize) -> Option<(u64, Field<'a>)> {
    let key = read_varint(buf, pos)?;
    let number = key >> 3;
    match key & 0x7 {
        0 => Some((number, Field::Varint(read_varint(buf, pos)?))),
        2 => {
            let len = usize::try_from(read_varint(buf, pos)?).ok()?;
            let end = pos.checked_add(len)?;
            let bytes = buf.get(*pos..end)?;
            *pos = end;
            Some((number, Field::Bytes(bytes)))
        }
        _ => None,
    }
}

/// File contents of a dag-pb block that holds a complete file, or `None` if
/// the block links to further chunks or is not a file at all.
pub fn single_block_content(block: &[u8]) -> Option<Vec<u8>> {
    let mut pos = 0;
    let mut unixfs = None;
    while pos < block.len() {
        match next_field(block, &mut pos)? {
            (1, Field::Bytes(data)) => unixfs = Some(data),
            // PBNode.Links
            (2, Field::Bytes(_)) => return None,
            _ => return None,
        }
    }

    let unixfs = unixfs?;
    let mut pos = 0;
    let mut kind = None;
    let mut content: &[u8] = &[];
    while pos < unixfs.len() {
        match next_field(unixfs, &mut pos)? {
            (1, Field::Varint(t)) => kind = Some(t),
            (2, Field::Bytes(data)) => content = data,
            (3, Field::Varint(_)) => {}
            // blocksizes only appear on chunked files
            (4, _) => return None,
            _ => return None,
        }
    }

    match kind? {
        UNIXFS_RAW | UNIXFS_FILE => Some(content.to_vec()),
        _ => None,
    }
}
