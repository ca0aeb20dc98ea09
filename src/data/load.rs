use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::data::record::SongRecord;
use crate::foundation::error::{VinylError, VinylResult};

const RANK: &str = "rank";
const TITLE: &str = "title";
const ARTIST: &str = "artist";
const YEAR_ALIASES: [&str; 3] = ["release_year", "releaseyear", "year"];

/// Where the song table comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    /// A local CSV file.
    Path(PathBuf),
    /// CSV on standard input.
    Stdin,
    /// CSV fetched with a single blocking HTTP GET (requires the `fetch` feature).
    Url(String),
}

impl DataSource {
    /// Interpret a CLI-style argument: `-` is stdin, `http(s)://` is a URL, anything else a path.
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else if arg.starts_with("http://") || arg.starts_with("https://") {
            Self::Url(arg.to_owned())
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Stdin => f.write_str("<stdin>"),
            Self::Url(u) => f.write_str(u),
        }
    }
}

/// Load every song record from `source`.
#[tracing::instrument(skip_all, fields(source = %source))]
pub fn load_songs(source: &DataSource) -> VinylResult<Vec<SongRecord>> {
    let records = match source {
        DataSource::Path(p) => load_songs_from_path(p)?,
        DataSource::Stdin => parse_songs_csv(std::io::stdin().lock())?,
        DataSource::Url(url) => fetch_songs(url)?,
    };
    tracing::info!(count = records.len(), "loaded song records");
    Ok(records)
}

/// Load song records from a CSV file on disk.
pub fn load_songs_from_path(path: &Path) -> VinylResult<Vec<SongRecord>> {
    let f = std::fs::File::open(path)
        .with_context(|| format!("open song table '{}'", path.display()))?;
    parse_songs_csv(std::io::BufReader::new(f))
}

#[cfg(feature = "fetch")]
fn fetch_songs(url: &str) -> VinylResult<Vec<SongRecord>> {
    let resp = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("fetch song table '{url}'"))?;
    let bytes = resp
        .bytes()
        .with_context(|| format!("read song table body '{url}'"))?;
    parse_songs_csv(std::io::Cursor::new(bytes))
}

#[cfg(not(feature = "fetch"))]
fn fetch_songs(url: &str) -> VinylResult<Vec<SongRecord>> {
    Err(VinylError::config(format!(
        "cannot fetch '{url}': built without the `fetch` feature"
    )))
}

#[derive(serde::Deserialize)]
struct RawRow {
    rank: Option<String>,
    title: Option<String>,
    artist: Option<String>,
    #[serde(alias = "releaseyear", alias = "year")]
    release_year: Option<String>,
}

/// Parse a CSV song table with a header row.
///
/// Header names are matched case-insensitively; `releaseYear` and `year` are accepted for the
/// release year column. Every row must carry a positive integer rank and an integer year.
pub fn parse_songs_csv<R: Read>(reader: R) -> VinylResult<Vec<SongRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = normalize_headers(
        rdr.headers()
            .map_err(|e| VinylError::data(format!("read csv header: {e}")))?,
    );
    check_required_columns(&headers)?;
    rdr.set_headers(headers.clone());

    let mut out = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(|e| VinylError::data(format!("read csv row: {e}")))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let raw: RawRow = row
            .deserialize(Some(&headers))
            .map_err(|e| VinylError::data(format!("line {line}: {e}")))?;
        out.push(raw.into_record(line)?);
    }
    Ok(out)
}

fn normalize_headers(headers: &csv::StringRecord) -> csv::StringRecord {
    headers
        .iter()
        .map(|h| {
            h.trim()
                .trim_start_matches('\u{feff}')
                .to_ascii_lowercase()
                .replace([' ', '-'], "_")
        })
        .collect()
}

fn check_required_columns(headers: &csv::StringRecord) -> VinylResult<()> {
    let has = |name: &str| headers.iter().any(|h| h == name);
    let mut missing = Vec::new();
    for name in [RANK, TITLE, ARTIST] {
        if !has(name) {
            missing.push(name);
        }
    }
    if !YEAR_ALIASES.iter().any(|n| has(n)) {
        missing.push("release_year");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(VinylError::data(format!(
            "csv header is missing column(s): {}",
            missing.join(", ")
        )))
    }
}

impl RawRow {
    fn into_record(self, line: u64) -> VinylResult<SongRecord> {
        let field = |v: Option<String>, name: &str| {
            v.ok_or_else(|| VinylError::data(format!("line {line}: missing {name}")))
        };

        let rank_s = field(self.rank, RANK)?;
        let rank = rank_s.parse::<i64>().map_err(|_| {
            VinylError::data(format!("line {line}: rank '{rank_s}' is not an integer"))
        })?;
        if rank <= 0 {
            return Err(VinylError::data(format!(
                "line {line}: rank must be positive (got {rank})"
            )));
        }
        let rank = u32::try_from(rank)
            .map_err(|_| VinylError::data(format!("line {line}: rank {rank} is out of range")))?;

        let year_s = field(self.release_year, "release_year")?;
        let release_year = year_s.parse::<i32>().map_err(|_| {
            VinylError::data(format!(
                "line {line}: release_year '{year_s}' is not an integer"
            ))
        })?;

        Ok(SongRecord {
            rank,
            title: self.title.unwrap_or_default(),
            artist: self.artist.unwrap_or_default(),
            release_year,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/load.rs"]
mod tests;
