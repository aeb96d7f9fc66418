use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use lineup_roster::{Player, PlayerPool, Roster};
use serde::Serialize;

use crate::schema::Problem;

/// Where a command writes its JSON result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    /// Writes `value` as pretty JSON to `output_path`, or to stdout if there is none.
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        output_path.map_or(Output::Stdout, Output::File).write_json(value)
    }

    fn write_json<T>(&self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let result = match self {
            Output::Stdout => write_pretty(io::stdout().lock(), value),
            Output::File(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {self}"))?;
                write_pretty(BufWriter::new(file), value)
            }
        };
        result.with_context(|| format!("Failed to write JSON to {self}"))
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => f.write_str("stdout"),
            Output::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn write_pretty<W, T>(mut writer: W, value: &T) -> io::Result<()>
where
    W: io::Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    let reader = io::BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Reads a JSON array of players. Later duplicates of an id are ignored.
pub fn read_pool_file<P>(path: P) -> anyhow::Result<PlayerPool>
where
    P: AsRef<Path>,
{
    let players: Vec<Player> = read_json_file("player pool", path)?;
    Ok(players.into_iter().collect())
}

pub fn read_lineup_file<P>(path: P) -> anyhow::Result<Roster>
where
    P: AsRef<Path>,
{
    read_json_file("lineup", path)
}

pub fn read_problem_file<P>(path: P) -> anyhow::Result<Problem>
where
    P: AsRef<Path>,
{
    read_json_file("problem", path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use lineup_roster::PlayerId;

    use super::*;

    #[test]
    fn test_read_pool_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        fs::write(
            &path,
            r#"[
                {"name": "Borders", "player_id": 1, "eligible_positions": ["C"], "stats": {"HR": 15}},
                {"name": "Olerud", "player_id": 2, "eligible_positions": ["1B"], "percent_owned": 70},
                {"name": "Borders again", "player_id": 1, "eligible_positions": ["C"]}
            ]"#,
        )
        .unwrap();

        let pool = read_pool_file(&path).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(PlayerId::new(1)).unwrap().name, "Borders");
        assert_eq!(
            pool.get(PlayerId::new(2)).unwrap().category_value("percent_owned"),
            Some(70.0)
        );
    }

    #[test]
    fn test_read_json_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();
        let err = read_problem_file(&path).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Failed to parse problem JSON file"), "{message}");
        assert!(message.contains("broken.json"), "{message}");

        let err = read_lineup_file(dir.path().join("missing.json")).unwrap_err();
        assert!(format!("{err}").starts_with("Failed to open lineup file"));
    }

    #[test]
    fn test_save_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        Output::save_json(&serde_json::json!({"score": 1.5}), Some(path.clone())).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["score"], 1.5);

        let missing = dir.path().join("no-such-dir").join("out.json");
        let err = Output::save_json(&value, Some(missing)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to create output file"));
        assert_eq!(Output::Stdout.to_string(), "stdout");
    }
}
