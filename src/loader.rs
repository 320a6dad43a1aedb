//! Parameter file loading.
//!
//! Raw parameter documents are YAML files using the external wire
//! identifiers (e.g. `connect-timeout`). Loading only parses; validation
//! happens when the typed parameter object is built.

use crate::params::{RawClientParams, RawServerParams};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load raw client parameters from a YAML file.
pub fn load_client_params(path: &Path) -> Result<RawClientParams> {
    info!("Loading client parameters from: {:?}", path);
    let file = File::open(path)
        .wrap_err_with(|| format!("cannot open parameter file {:?}", path))?;
    let params = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("failed to parse client parameters from {:?}", path))?;
    Ok(params)
}

/// Load raw server parameters from a YAML file.
pub fn load_server_params(path: &Path) -> Result<RawServerParams> {
    info!("Loading server parameters from: {:?}", path);
    let file = File::open(path)
        .wrap_err_with(|| format!("cannot open parameter file {:?}", path))?;
    let params = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("failed to parse server parameters from {:?}", path))?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ClientParams, Protocol, RawQuantity};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_client_params() {
        let yaml = r#"
host: "192.168.1.10"
port: 50000
udp: true
bitrate: "1M"
time: 5
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let raw = load_client_params(temp_file.path()).unwrap();
        assert_eq!(raw.host.as_deref(), Some("192.168.1.10"));
        assert_eq!(raw.time, Some(RawQuantity::Count(5)));

        let params = ClientParams::build(raw).unwrap();
        assert_eq!(params.protocol, Protocol::Udp);
        assert_eq!(params.bitrate, Some(1024 * 1024));
    }

    #[test]
    fn test_load_server_params() {
        let yaml = r#"
port: 50000
interval: 1
run-duration: 10
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let raw = load_server_params(temp_file.path()).unwrap();
        assert_eq!(raw.port, Some(50000));
        assert_eq!(raw.run_duration, Some(RawQuantity::Count(10)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_client_params(Path::new("/nonexistent/params.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "no_such_field: true\n").unwrap();
        assert!(load_client_params(temp_file.path()).is_err());
    }
}
