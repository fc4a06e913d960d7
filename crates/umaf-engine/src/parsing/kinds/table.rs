/// Pipe tables: a header row, a `---|:--:` separator row, then rows.
pub struct PipeTable;

impl PipeTable {
    pub fn has_pipe(line: &str) -> bool {
        line.contains('|')
    }

    /// Non-empty trimmed cells between pipes.
    pub fn cells(line: &str) -> Vec<String> {
        line.split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// A separator row has pipes and only cells made of `-` and `:`.
    pub fn is_separator(line: &str) -> bool {
        if !Self::has_pipe(line) {
            return false;
        }
        let cells = Self::cells(line);
        !cells.is_empty()
            && cells
                .iter()
                .all(|cell| cell.contains('-') && cell.chars().all(|c| c == '-' || c == ':'))
    }
}
