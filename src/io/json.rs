use std::{fs::File, io::{BufReader, BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};

/// Reads a JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("[io::json] Failed to open JSON file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("[io::json] Failed to parse JSON from {}", path.display()))
}

/// Writes `value` as pretty-printed JSON to `path`.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::json] Failed to create JSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("[io::json] Failed to write JSON to {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");

        let values = BTreeMap::from([("a".to_string(), vec![1.0, 2.5]), ("b".to_string(), vec![])]);
        write_json(&values, &path).unwrap();

        assert_eq!(read_json::<BTreeMap<String, Vec<f64>>>(&path).unwrap(), values);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_json::<Vec<u32>>(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/config.json"));
    }
}
