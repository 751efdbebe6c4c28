use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::media::{KindFilter, Media, MediaKind, MediaRecord, Metadata};

use super::{Catalog, ColumnValue, MediaColumn};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS media (
    location     TEXT PRIMARY KEY NOT NULL,
    file_name    TEXT NOT NULL,
    time         INTEGER NOT NULL DEFAULT 0,
    length       INTEGER NOT NULL DEFAULT 0,
    type         INTEGER NOT NULL,
    width        INTEGER NOT NULL DEFAULT 0,
    height       INTEGER NOT NULL DEFAULT 0,
    picture      BLOB,
    title        TEXT,
    artist       TEXT,
    genre        TEXT,
    album        TEXT,
    copyright    TEXT,
    track_number TEXT,
    description  TEXT,
    rating       TEXT,
    date         TEXT,
    settings     TEXT,
    now_playing  TEXT,
    publisher    TEXT,
    encoded_by   TEXT,
    track_id     TEXT
);
CREATE INDEX IF NOT EXISTS media_type ON media (type);
";

const COLUMNS: &str = "location, file_name, time, length, type, width, height, picture, \
     title, artist, genre, album, copyright, track_number, description, rating, date, \
     settings, now_playing, publisher, encoded_by, track_id";

/// SQLite-backed [`Catalog`].
#[derive(Debug)]
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    /// Open (and create if needed) the catalog database at `path`.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        info!("opening media catalog at {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, CatalogError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, CatalogError> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, CatalogError> {
        self.conn.lock().map_err(|_| CatalogError::Poisoned)
    }
}

fn to_sql_int(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

fn from_sql_int(v: i64) -> u64 {
    u64::try_from(v).unwrap_or(0)
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<(MediaRecord, i32)> {
    let record = MediaRecord {
        location: row.get("location")?,
        file_name: row.get("file_name")?,
        time: from_sql_int(row.get("time")?),
        length: from_sql_int(row.get("length")?),
        kind: MediaKind::default(),
        width: row.get("width")?,
        height: row.get("height")?,
        picture: row.get("picture")?,
        meta: Metadata {
            title: row.get("title")?,
            artist: row.get("artist")?,
            genre: row.get("genre")?,
            album: row.get("album")?,
            copyright: row.get("copyright")?,
            track_number: row.get("track_number")?,
            description: row.get("description")?,
            rating: row.get("rating")?,
            date: row.get("date")?,
            settings: row.get("settings")?,
            now_playing: row.get("now_playing")?,
            publisher: row.get("publisher")?,
            encoded_by: row.get("encoded_by")?,
            track_id: row.get("track_id")?,
        },
    };
    Ok((record, row.get("type")?))
}

fn with_kind((mut record, tag): (MediaRecord, i32)) -> Result<MediaRecord, CatalogError> {
    record.kind = MediaKind::try_from(tag)?;
    Ok(record)
}

impl Catalog for SqliteCatalog {
    fn upsert(&self, media: &Media) -> Result<(), CatalogError> {
        let meta = media.metadata();
        let conn = self.conn()?;
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO media ({COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                         ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)"
            ),
            params![
                media.location(),
                media.file_name(),
                to_sql_int(media.time()),
                to_sql_int(media.length()),
                media.kind().tag(),
                media.width(),
                media.height(),
                media.picture(),
                meta.title,
                meta.artist,
                meta.genre,
                meta.album,
                meta.copyright,
                meta.track_number,
                meta.description,
                meta.rating,
                meta.date,
                meta.settings,
                meta.now_playing,
                meta.publisher,
                meta.encoded_by,
                meta.track_id,
            ],
        )?;
        debug!("stored {}", media.location());
        Ok(())
    }

    fn update_field(
        &self,
        location: &str,
        column: MediaColumn,
        value: ColumnValue<'_>,
    ) -> Result<(), CatalogError> {
        if !column.accepts(&value) {
            return Err(CatalogError::ColumnType(column.name()));
        }

        let sql = format!("UPDATE media SET {} = ?1 WHERE location = ?2", column.name());
        let conn = self.conn()?;
        let changed = match value {
            ColumnValue::Integer(v) => conn.execute(&sql, params![to_sql_int(v), location])?,
            ColumnValue::Text(v) => conn.execute(&sql, params![v, location])?,
            ColumnValue::Blob(v) => conn.execute(&sql, params![v, location])?,
        };

        if changed == 0 {
            return Err(CatalogError::NotFound(location.to_string()));
        }
        debug!("updated {} of {location}", column.name());
        Ok(())
    }

    fn get(&self, location: &str) -> Result<Option<MediaRecord>, CatalogError> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM media WHERE location = ?1"),
            [location],
            record_from_row,
        )
        .optional()?
        .map(with_kind)
        .transpose()
    }

    fn list(&self, filter: KindFilter) -> Result<Vec<MediaRecord>, CatalogError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM media WHERE ?1 = -1 OR type = ?1 ORDER BY location"
        ))?;
        let rows = stmt
            .query_map([filter.tag()], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(with_kind).collect()
    }

    fn remove(&self, location: &str) -> Result<bool, CatalogError> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM media WHERE location = ?1", [location])?;
        Ok(removed > 0)
    }
}
