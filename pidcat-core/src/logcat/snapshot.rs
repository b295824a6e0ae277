/// Column holding the pid in `ps` output.
const PID_FIELD: usize = 1;
/// Column holding the process name in `ps` output.
const NAME_FIELD: usize = 8;
const FIELD_COUNT: usize = 9;

/// One row of a process list snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub pid: String,
    pub name: String,
}

/// Parse `adb shell ps` output.
///
/// The first line is the column header. Rows that do not have the expected
/// column count or a numeric pid (kernel threads with empty columns, warnings
/// printed by the shell) are skipped.
pub fn parse_snapshot(text: &str) -> Vec<SnapshotEntry> {
    text.lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != FIELD_COUNT {
                return None;
            }
            let pid = fields[PID_FIELD];
            if !pid.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some(SnapshotEntry {
                pid: pid.to_string(),
                name: fields[NAME_FIELD].to_string(),
            })
        })
        .collect()
}
