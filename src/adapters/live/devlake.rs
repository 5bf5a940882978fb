//! Live adapter for the `TeamTableStore` port using DevLake's org plugin.
//!
//! Owns the wire format: the table travels as CSV text, fetched with a GET
//! and replaced with a multipart file upload via PUT against the same
//! endpoint.

use std::fmt;

use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::config::Config;
use crate::ports::table::{PersistFuture, TableFuture, Team, TeamTable, TeamTableStore};

/// Path of the team table endpoint, relative to the DevLake base URL.
pub const TEAMS_CSV_PATH: &str = "api/plugins/org/teams.csv";

/// Errors produced while reading or writing the team table.
#[derive(Debug)]
pub enum TableError {
    /// The endpoint could not be reached or its body could not be read.
    Transport(reqwest::Error),
    /// The table body is not well-formed tabular text, or the in-memory
    /// table could not be encoded.
    Format(String),
    /// A data row carries fewer fields than the team schema requires.
    MalformedRow {
        /// 1-based line number of the offending row.
        line: u64,
        /// Number of fields found on that row.
        fields: usize,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "transport failure: {err}"),
            Self::Format(msg) => write!(f, "malformed team table: {msg}"),
            Self::MalformedRow { line, fields } => {
                write!(f, "malformed team row on line {line}: expected 5 fields, found {fields}")
            }
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Format(_) | Self::MalformedRow { .. } => None,
        }
    }
}

/// Live team table store backed by a DevLake instance.
pub struct LiveDevLakeTeams {
    client: Client,
    teams_url: String,
    replace_teams: bool,
}

impl LiveDevLakeTeams {
    /// Creates a store client for the DevLake instance named by `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            teams_url: teams_csv_url(&config.devlake_url),
            replace_teams: config.replace_teams,
        }
    }
}

fn teams_csv_url(base_url: &str) -> String {
    format!("{base_url}{TEAMS_CSV_PATH}")
}

/// Decodes CSV text into a table: row 0 becomes the header, the rest
/// become team records.
///
/// An empty body decodes to the canonical header with no data rows, so a
/// later persist always writes a well-formed table.
fn decode_table(body: &str) -> Result<TeamTable, TableError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_reader(body.as_bytes());
    let mut header = Vec::new();
    let mut teams = Vec::new();
    let mut first = true;

    for result in reader.records() {
        let record = result.map_err(|e| TableError::Format(e.to_string()))?;
        if first {
            header = record.iter().map(ToString::to_string).collect();
            first = false;
        } else {
            teams.push(team_from_record(&record)?);
        }
    }

    if header.is_empty() {
        return Ok(TeamTable::with_default_header());
    }
    Ok(TeamTable { header, teams })
}

fn team_from_record(record: &csv::StringRecord) -> Result<Team, TableError> {
    if record.len() < 5 {
        return Err(TableError::MalformedRow {
            line: record.position().map_or(0, csv::Position::line),
            fields: record.len(),
        });
    }
    Ok(Team {
        id: record[0].to_string(),
        name: record[1].to_string(),
        alias: record[2].to_string(),
        parent_id: record[3].to_string(),
        sorting_index: record[4].to_string(),
    })
}

/// Encodes the header and every data row back into CSV text.
fn encode_table(table: &TeamTable) -> Result<String, TableError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.header).map_err(|e| TableError::Format(e.to_string()))?;
    for team in &table.teams {
        writer
            .write_record([
                team.id.as_str(),
                team.name.as_str(),
                team.alias.as_str(),
                team.parent_id.as_str(),
                team.sorting_index.as_str(),
            ])
            .map_err(|e| TableError::Format(e.to_string()))?;
    }
    let bytes = writer.into_inner().map_err(|e| TableError::Format(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TableError::Format(e.to_string()))
}

impl TeamTableStore for LiveDevLakeTeams {
    fn fetch_table(&self) -> TableFuture<'_> {
        if self.replace_teams {
            // Bootstrap mode: rebuild from scratch without consulting the
            // server.
            return Box::pin(async { Ok(TeamTable::with_default_header()) });
        }

        Box::pin(async move {
            let response =
                self.client.get(&self.teams_url).send().await.map_err(TableError::Transport)?;
            let body = response.text().await.map_err(TableError::Transport)?;
            Ok(decode_table(&body)?)
        })
    }

    fn persist_table<'a>(&'a self, table: &'a TeamTable) -> PersistFuture<'a> {
        let encoded = encode_table(table);
        Box::pin(async move {
            let part = Part::text(encoded?).file_name("teams.csv");
            let form = Form::new().part("file", part);
            let response = self
                .client
                .put(&self.teams_url)
                .multipart(form)
                .send()
                .await
                .map_err(TableError::Transport)?;
            // The status line is not validated; the body is surfaced so the
            // operator log shows whatever DevLake replied.
            let reply = response.text().await.map_err(TableError::Transport)?;
            Ok(reply)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_table, encode_table, teams_csv_url, LiveDevLakeTeams, TableError};
    use crate::config::Config;
    use crate::ports::table::{Team, TeamTable, TeamTableStore, TEAM_TABLE_HEADER};

    const SAMPLE: &str = "Id,Name,Alias,ParentId,SortingIndex\n\
                          1,Maple Leafs,ML,2,0\n\
                          2,Friendly Confines,FC,,1\n\
                          3,Blue Jays,BJ,,2\n";

    fn team(id: &str, name: &str, alias: &str, parent_id: &str, sorting_index: &str) -> Team {
        Team {
            id: id.to_string(),
            name: name.to_string(),
            alias: alias.to_string(),
            parent_id: parent_id.to_string(),
            sorting_index: sorting_index.to_string(),
        }
    }

    #[test]
    fn url_is_joined_onto_the_base() {
        assert_eq!(
            teams_csv_url("http://localhost:4000/"),
            "http://localhost:4000/api/plugins/org/teams.csv"
        );
    }

    #[test]
    fn decode_splits_header_from_data_rows() {
        let table = decode_table(SAMPLE).expect("well-formed csv");
        assert_eq!(table.header, TEAM_TABLE_HEADER);
        assert_eq!(
            table.teams,
            vec![
                team("1", "Maple Leafs", "ML", "2", "0"),
                team("2", "Friendly Confines", "FC", "", "1"),
                team("3", "Blue Jays", "BJ", "", "2"),
            ]
        );
    }

    #[test]
    fn decode_of_empty_body_yields_the_canonical_header() {
        let table = decode_table("").expect("empty body");
        assert_eq!(table, TeamTable::with_default_header());
    }

    #[test]
    fn decode_rejects_inconsistent_column_counts() {
        let result = decode_table("Id,Name,Alias,ParentId,SortingIndex\n1,Maple Leafs\n");
        assert!(matches!(result, Err(TableError::Format(_))));
    }

    #[test]
    fn decode_rejects_rows_below_five_fields() {
        let result = decode_table("Id,Name,Alias\n1,Maple Leafs,ML\n");
        assert!(matches!(result, Err(TableError::MalformedRow { line: 2, fields: 3 })));
    }

    #[test]
    fn encode_writes_header_then_rows() {
        let mut table = TeamTable::with_default_header();
        table.teams.push(team("1", "Maple Leafs", "ML", "2", "0"));
        table.teams.push(team("2", "Friendly Confines", "FC", "", "1"));

        let encoded = encode_table(&table).expect("encodable table");
        assert_eq!(
            encoded,
            "Id,Name,Alias,ParentId,SortingIndex\n1,Maple Leafs,ML,2,0\n2,Friendly Confines,FC,,1\n"
        );
    }

    #[tokio::test]
    async fn replace_mode_fetches_header_only_without_a_server() {
        let config = Config {
            devlake_url: "http://127.0.0.1:1/".to_string(),
            backstage_url: "http://127.0.0.1:1/".to_string(),
            replace_teams: true,
        };
        let store = LiveDevLakeTeams::new(&config);

        let table = store.fetch_table().await.expect("replace mode needs no server");
        assert_eq!(table, TeamTable::with_default_header());
    }
}
