//! Loading equipment and link records from delimited text files.
//!
//! Each file is line-oriented with `;` separated fields. Blank lines and
//! lines starting with `#` are skipped, fields are trimmed, and a single
//! trailing `;` is tolerated. Anything else malformed aborts the load with
//! the file and line that caused it.
//!
//! The loader only validates shape and field types. Whether a link's
//! endpoints actually exist is decided later, when the graph is assembled.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use log::info;

use crate::model::{Connection, Equipment};

/// Load host and router records, hosts first, as one equipment list.
/// Insertion order downstream follows this order.
pub fn load_equipment(hosts_path: &Path, routers_path: &Path) -> Result<Vec<Equipment>> {
    let mut equipment = Vec::new();

    for (line_no, line) in data_lines(&read_file(hosts_path)?) {
        equipment.push(parse_host(line, hosts_path, line_no)?);
    }
    let host_count = equipment.len();
    info!("Loaded {} host records from {}", host_count, hosts_path.display());

    for (line_no, line) in data_lines(&read_file(routers_path)?) {
        equipment.push(parse_router(line, routers_path, line_no)?);
    }
    info!(
        "Loaded {} router records from {}",
        equipment.len() - host_count,
        routers_path.display()
    );

    Ok(equipment)
}

/// Load link records.
pub fn load_connections(path: &Path) -> Result<Vec<Connection>> {
    let mut connections = Vec::new();
    for (line_no, line) in data_lines(&read_file(path)?) {
        connections.push(parse_link(line, path, line_no)?);
    }
    info!("Loaded {} link records from {}", connections.len(), path.display());
    Ok(connections)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read data file: {}", path.display()))
}

/// Lines carrying records, with their 1-based line numbers.
fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Split one record into trimmed fields, dropping a single trailing `;`.
fn split_record(line: &str) -> Vec<&str> {
    let line = line.strip_suffix(';').unwrap_or(line);
    line.split(';').map(str::trim).collect()
}

fn parse_host(line: &str, path: &Path, line_no: usize) -> Result<Equipment> {
    let fields = split_record(line);
    if fields.len() != 5 {
        bail!(
            "{}:{}: host record needs 5 fields (id;ip;mac;active;location), found {}",
            path.display(),
            line_no,
            fields.len()
        );
    }
    require_key_fields(&fields, path, line_no)?;
    let active = parse_flag(fields[3], path, line_no)?;
    Ok(Equipment::host(
        fields[0], fields[1], fields[2], active, fields[4],
    ))
}

fn parse_router(line: &str, path: &Path, line_no: usize) -> Result<Equipment> {
    let fields = split_record(line);
    if fields.len() != 8 {
        bail!(
            "{}:{}: router record needs 8 fields (id;ip;mac;active;location;model;firmware;throughput), found {}",
            path.display(),
            line_no,
            fields.len()
        );
    }
    require_key_fields(&fields, path, line_no)?;
    let active = parse_flag(fields[3], path, line_no)?;
    let throughput = parse_number(fields[7], "throughput", path, line_no)?;
    Ok(Equipment::router(
        fields[0], fields[1], fields[2], active, fields[4], fields[5], fields[6], throughput,
    ))
}

fn parse_link(line: &str, path: &Path, line_no: usize) -> Result<Connection> {
    let fields = split_record(line);
    if fields.len() != 6 {
        bail!(
            "{}:{}: link record needs 6 fields (source_ip;target_ip;link_type;bandwidth;latency;error_rate), found {}",
            path.display(),
            line_no,
            fields.len()
        );
    }
    if fields[0].is_empty() || fields[1].is_empty() {
        bail!(
            "{}:{}: link record has an empty endpoint address",
            path.display(),
            line_no
        );
    }
    let bandwidth = parse_number(fields[3], "bandwidth", path, line_no)?;
    let latency = parse_number(fields[4], "latency", path, line_no)?;
    let error_rate = parse_number(fields[5], "error rate", path, line_no)?;
    Ok(Connection::new(
        fields[0], fields[1], fields[2], bandwidth, latency, error_rate,
    ))
}

/// The id and ip fields key everything downstream and may not be empty.
fn require_key_fields(fields: &[&str], path: &Path, line_no: usize) -> Result<()> {
    if fields[0].is_empty() || fields[1].is_empty() {
        bail!(
            "{}:{}: equipment record has an empty id or ip field",
            path.display(),
            line_no
        );
    }
    Ok(())
}

fn parse_flag(raw: &str, path: &Path, line_no: usize) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(eyre!(
            "{}:{}: expected true or false, found {:?}",
            path.display(),
            line_no,
            raw
        )),
    }
}

fn parse_number<T>(raw: &str, what: &str, path: &Path, line_no: usize) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse().map_err(|err| {
        eyre!(
            "{}:{}: invalid {} {:?}: {}",
            path.display(),
            line_no,
            what,
            raw,
            err
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EquipmentKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_hosts_then_routers() {
        let hosts = temp_with("PC1;10.0.0.1;AA:00;true;Lab\nPC2;10.0.0.2;AA:01;false;Lab\n");
        let routers = temp_with("R1;10.0.0.3;AA:02;true;Closet;C2901;15.1;1000\n");
        let equipment = load_equipment(hosts.path(), routers.path()).unwrap();
        let ids: Vec<&str> = equipment.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["PC1", "PC2", "R1"]);
        assert!(!equipment[1].active);
        match &equipment[2].kind {
            EquipmentKind::Router {
                model,
                firmware,
                throughput,
            } => {
                assert_eq!(model, "C2901");
                assert_eq!(firmware, "15.1");
                assert_eq!(*throughput, 1000);
            }
            EquipmentKind::Host => panic!("expected a router"),
        }
    }

    #[test]
    fn test_comments_blanks_and_trailing_separator() {
        let hosts = temp_with(
            "# lab hosts\n\n  PC1 ; 10.0.0.1 ; AA:00 ; TRUE ; Lab ;\n\n# end\n",
        );
        let routers = temp_with("");
        let equipment = load_equipment(hosts.path(), routers.path()).unwrap();
        assert_eq!(equipment.len(), 1);
        assert_eq!(equipment[0].id, "PC1");
        assert_eq!(equipment[0].location, "Lab");
        assert!(equipment[0].active);
    }

    #[test]
    fn test_bad_flag_reports_file_and_line() {
        let hosts = temp_with("PC1;10.0.0.1;AA:00;true;Lab\nPC2;10.0.0.2;AA:01;yes;Lab\n");
        let routers = temp_with("");
        let err = load_equipment(hosts.path(), routers.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(":2:"), "no line number in: {message}");
        assert!(message.contains("true or false"));
    }

    #[test]
    fn test_wrong_field_count_is_fatal() {
        let hosts = temp_with("PC1;10.0.0.1;AA:00;true\n");
        let routers = temp_with("");
        let err = load_equipment(hosts.path(), routers.path()).unwrap_err();
        assert!(err.to_string().contains("5 fields"));
    }

    #[test]
    fn test_empty_key_field_is_fatal() {
        let hosts = temp_with(";10.0.0.1;AA:00;true;Lab\n");
        let routers = temp_with("");
        let err = load_equipment(hosts.path(), routers.path()).unwrap_err();
        assert!(err.to_string().contains("empty id or ip"));
    }

    #[test]
    fn test_links_parse() {
        let links = temp_with(
            "10.0.0.1;10.0.0.3;ethernet;100;5;0.01\n10.0.0.2;10.0.0.3;satellite;512;500;0.2\n",
        );
        let connections = load_connections(links.path()).unwrap();
        assert_eq!(connections.len(), 2);
        assert_eq!(connections[0].bandwidth, 100);
        assert_eq!(connections[1].link_type, "satellite");
        assert_eq!(connections[1].latency, 500);
        assert!((connections[1].error_rate - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_bad_number_reports_context() {
        let links = temp_with("10.0.0.1;10.0.0.2;ethernet;fast;5;0.0\n");
        let err = load_connections(links.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("invalid bandwidth"));
        assert!(message.contains(":1:"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_connections(Path::new("/nonexistent/links.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/links.txt"));
    }
}
