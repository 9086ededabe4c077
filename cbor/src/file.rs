use super::decode::Error;
use std::{path::Path, vec::Vec};
use tracing::debug;

/// Read the whole of the file at `path` into memory.
pub fn read_file<P>(path: P) -> Result<Vec<u8>, Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| Error::File {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}
