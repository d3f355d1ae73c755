//! # Template Storage
//!
//! SQLite persistence for submitted templates. A template is stored as one row
//! holding its metadata and its component array as JSON text:
//!
//! | column        | content                                           |
//! |---------------|---------------------------------------------------|
//! | `id`          | UUID v4                                           |
//! | `name`        | template name, unique per `language`              |
//! | `category`    | `MARKETING`, `UTILITY` or `AUTHENTICATION`        |
//! | `status`      | review status, `PENDING` on creation and edit     |
//! | `components`  | JSON component array as sent to the API           |
//! | `content_md5` | MD5 of the serialised request, for change checks  |
//!
//! All functions here are synchronous and take a borrowed connection; handlers
//! go through [`run`], which opens a connection inside a blocking task so the
//! async workers never wait on disk.

use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use template_common::model::saved::{
    Page, SavedTemplate, SortOrder, TemplateFilter, TemplateStats, TemplateStatus,
};
use template_common::{Category, Component, TemplateRequest};
use uuid::Uuid;

use crate::error::ServiceError;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS templates (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    category    TEXT NOT NULL,
    language    TEXT NOT NULL,
    status      TEXT NOT NULL,
    components  TEXT NOT NULL,
    content_md5 TEXT NOT NULL,
    created_at  INTEGER NOT NULL,
    updated_at  INTEGER NOT NULL,
    UNIQUE (name, language)
);";

const COLUMNS: &str =
    "id, name, category, language, status, components, content_md5, created_at, updated_at";

/// Creates the schema if the database file does not have it yet.
pub fn init(path: &Path) -> Result<(), ServiceError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Runs `task` against a fresh connection on the blocking thread pool.
pub async fn run<T, F>(db_path: &Path, task: F) -> Result<T, ServiceError>
where
    T: Send + 'static,
    F: FnOnce(&mut Connection) -> Result<T, ServiceError> + Send + 'static,
{
    let path: PathBuf = db_path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let mut conn = Connection::open(&path)?;
        task(&mut conn)
    })
    .await?
}

pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

pub fn content_md5(request: &TemplateRequest) -> Result<String, ServiceError> {
    let json = serde_json::to_string(request)?;
    Ok(format!("{:x}", md5::compute(json.as_bytes())))
}

/// Row as read from SQLite, before the text columns are parsed.
struct StoredRow {
    id: String,
    name: String,
    category: String,
    language: String,
    status: String,
    components: String,
    content_md5: String,
    created_at: i64,
    updated_at: i64,
}

impl StoredRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(StoredRow {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            language: row.get(3)?,
            status: row.get(4)?,
            components: row.get(5)?,
            content_md5: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }
}

impl TryFrom<StoredRow> for SavedTemplate {
    type Error = ServiceError;

    fn try_from(row: StoredRow) -> Result<Self, Self::Error> {
        let category =
            Category::parse(&row.category).ok_or_else(|| ServiceError::Corrupt(row.id.clone()))?;
        let status = TemplateStatus::parse(&row.status)
            .ok_or_else(|| ServiceError::Corrupt(row.id.clone()))?;
        let components: Vec<Component> = serde_json::from_str(&row.components)?;
        Ok(SavedTemplate {
            id: row.id,
            name: row.name,
            category,
            language: row.language,
            status,
            components,
            content_md5: row.content_md5,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn ensure_name_free(
    conn: &Connection,
    name: &str,
    language: &str,
    except_id: Option<&str>,
) -> Result<(), ServiceError> {
    let owner: Option<String> = conn
        .query_row(
            "SELECT id FROM templates WHERE name = ?1 AND language = ?2",
            params![name, language],
            |row| row.get(0),
        )
        .optional()?;
    match owner {
        Some(id) if Some(id.as_str()) != except_id => Err(name_taken(name, language)),
        _ => Ok(()),
    }
}

fn name_taken(name: &str, language: &str) -> ServiceError {
    ServiceError::Conflict(format!(
        "A template named '{}' already exists for language '{}'",
        name, language
    ))
}

/// A write that lost a race for the same name/language pair trips the
/// `UNIQUE (name, language)` constraint after `ensure_name_free` passed.
fn unique_violation(err: rusqlite::Error, name: &str, language: &str) -> ServiceError {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            name_taken(name, language)
        }
        other => other.into(),
    }
}

/// Stores a new template as `PENDING` and returns its id.
pub fn insert(conn: &Connection, request: &TemplateRequest) -> Result<String, ServiceError> {
    ensure_name_free(conn, &request.name, &request.language, None)?;
    let id = Uuid::new_v4().to_string();
    let now = now_secs();
    conn.execute(
        &format!("INSERT INTO templates ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
        params![
            id,
            request.name,
            request.category.as_str(),
            request.language,
            TemplateStatus::Pending.as_str(),
            serde_json::to_string(&request.components)?,
            content_md5(request)?,
            now,
            now,
        ],
    )
    .map_err(|e| unique_violation(e, &request.name, &request.language))?;
    debug!("Stored template {} as {}", request.name, id);
    Ok(id)
}

pub fn fetch(conn: &Connection, id: &str) -> Result<SavedTemplate, ServiceError> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM templates WHERE id = ?1"),
            params![id],
            StoredRow::read,
        )
        .optional()?
        .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
    SavedTemplate::try_from(row)
}

/// Replaces a template's content. Returns `false`, leaving the row untouched,
/// when the request hashes to the stored digest.
pub fn update(conn: &Connection, id: &str, request: &TemplateRequest) -> Result<bool, ServiceError> {
    let current = fetch(conn, id)?;
    let digest = content_md5(request)?;
    if digest == current.content_md5 {
        return Ok(false);
    }
    ensure_name_free(conn, &request.name, &request.language, Some(id))?;
    conn.execute(
        "UPDATE templates
         SET name = ?1, category = ?2, language = ?3, status = ?4,
             components = ?5, content_md5 = ?6, updated_at = ?7
         WHERE id = ?8",
        params![
            request.name,
            request.category.as_str(),
            request.language,
            TemplateStatus::Pending.as_str(),
            serde_json::to_string(&request.components)?,
            digest,
            now_secs(),
            id,
        ],
    )
    .map_err(|e| unique_violation(e, &request.name, &request.language))?;
    Ok(true)
}

pub fn set_status(
    conn: &Connection,
    id: &str,
    status: TemplateStatus,
) -> Result<SavedTemplate, ServiceError> {
    let updated = conn.execute(
        "UPDATE templates SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now_secs(), id],
    )?;
    if updated == 0 {
        return Err(ServiceError::NotFound(id.to_string()));
    }
    fetch(conn, id)
}

pub fn delete(conn: &Connection, id: &str) -> Result<(), ServiceError> {
    match conn.execute("DELETE FROM templates WHERE id = ?1", params![id])? {
        0 => Err(ServiceError::NotFound(id.to_string())),
        _ => Ok(()),
    }
}

/// Deletes every listed id in one transaction; unknown ids are skipped.
pub fn delete_many(conn: &mut Connection, ids: &[String]) -> Result<usize, ServiceError> {
    let tx = conn.transaction()?;
    let mut deleted = 0;
    {
        let mut stmt = tx.prepare("DELETE FROM templates WHERE id = ?1")?;
        for id in ids {
            deleted += stmt.execute(params![id])?;
        }
    }
    tx.commit()?;
    Ok(deleted)
}

/// Copies a stored template under `name`, as a new `PENDING` template.
pub fn duplicate(conn: &Connection, id: &str, name: &str) -> Result<String, ServiceError> {
    let source = fetch(conn, id)?;
    let request = TemplateRequest {
        name: name.to_string(),
        category: source.category,
        language: source.language,
        components: source.components,
    };
    insert(conn, &request)
}

/// One page of templates matching `filter`, with the total match count.
pub fn find(conn: &Connection, filter: &TemplateFilter) -> Result<Page<SavedTemplate>, ServiceError> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    if let Some(term) = filter.search_term() {
        clauses.push("instr(lower(name), lower(?)) > 0");
        values.push(Value::Text(term.to_string()));
    }
    if let Some(category) = filter.category {
        clauses.push("category = ?");
        values.push(Value::Text(category.as_str().to_string()));
    }
    if let Some(status) = filter.status {
        clauses.push("status = ?");
        values.push(Value::Text(status.as_str().to_string()));
    }
    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM templates{where_sql}"),
        params_from_iter(values.iter()),
        |row| row.get(0),
    )?;

    let direction = match filter.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    let sql = format!(
        "SELECT {COLUMNS} FROM templates{where_sql} \
         ORDER BY created_at {direction}, rowid {direction} LIMIT ? OFFSET ?"
    );
    let limit = Value::Integer(i64::try_from(filter.size()).unwrap_or(i64::MAX));
    let offset = Value::Integer(i64::try_from(filter.offset()).unwrap_or(i64::MAX));
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(
            params_from_iter(values.iter().chain([&limit, &offset])),
            StoredRow::read,
        )?
        .collect::<Result<Vec<_>, _>>()?;
    let items = rows
        .into_iter()
        .map(SavedTemplate::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page {
        items,
        total: total as usize,
        page: filter.page(),
        size: filter.size(),
    })
}

pub fn stats(conn: &Connection) -> Result<TemplateStats, ServiceError> {
    let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM templates GROUP BY status")?;
    let counts = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    let mut stats = TemplateStats::default();
    for (raw, count) in counts {
        match TemplateStatus::parse(&raw) {
            Some(status) => stats.add(status, count as usize),
            None => warn!("Skipping {} template(s) with unknown status {:?} in stats", count, raw),
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use template_common::wire::BodyExample;

    fn open_test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("templates.sqlite");
        init(&path).expect("schema");
        let conn = Connection::open(&path).expect("open");
        (dir, conn)
    }

    fn request(name: &str) -> TemplateRequest {
        TemplateRequest {
            name: name.to_string(),
            category: Category::Utility,
            language: "en".to_string(),
            components: vec![Component::Body {
                text: "Hi {{1}}".to_string(),
                example: Some(BodyExample::Positional {
                    body_text: vec![vec!["Ana".to_string()]],
                }),
            }],
        }
    }

    #[test]
    fn insert_then_fetch() {
        let (_dir, conn) = open_test_db();
        let id = insert(&conn, &request("welcome")).unwrap();
        let saved = fetch(&conn, &id).unwrap();
        assert_eq!(saved.name, "welcome");
        assert_eq!(saved.status, TemplateStatus::Pending);
        assert_eq!(saved.components, request("welcome").components);
        assert_eq!(saved.content_md5, content_md5(&request("welcome")).unwrap());
    }

    #[test]
    fn name_is_unique_per_language() {
        let (_dir, conn) = open_test_db();
        insert(&conn, &request("welcome")).unwrap();
        assert!(matches!(
            insert(&conn, &request("welcome")),
            Err(ServiceError::Conflict(_))
        ));
        let mut spanish = request("welcome");
        spanish.language = "es".to_string();
        assert!(insert(&conn, &spanish).is_ok());
    }

    #[test]
    fn update_reports_whether_content_changed() {
        let (_dir, conn) = open_test_db();
        let id = insert(&conn, &request("welcome")).unwrap();
        set_status(&conn, &id, TemplateStatus::Approved).unwrap();

        assert!(!update(&conn, &id, &request("welcome")).unwrap());
        assert_eq!(fetch(&conn, &id).unwrap().status, TemplateStatus::Approved);

        let mut edited = request("welcome");
        edited.components.push(Component::Footer {
            text: "Bye".to_string(),
        });
        assert!(update(&conn, &id, &edited).unwrap());
        let saved = fetch(&conn, &id).unwrap();
        assert_eq!(saved.status, TemplateStatus::Pending);
        assert_eq!(saved.components.len(), 2);
    }

    #[test]
    fn update_rejects_a_name_taken_by_another_template() {
        let (_dir, conn) = open_test_db();
        insert(&conn, &request("first")).unwrap();
        let id = insert(&conn, &request("second")).unwrap();
        assert!(matches!(
            update(&conn, &id, &request("first")),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn missing_ids_are_not_found() {
        let (_dir, conn) = open_test_db();
        assert!(matches!(fetch(&conn, "nope"), Err(ServiceError::NotFound(_))));
        assert!(matches!(delete(&conn, "nope"), Err(ServiceError::NotFound(_))));
        assert!(matches!(
            set_status(&conn, "nope", TemplateStatus::Rejected),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn bulk_delete_counts_existing_rows() {
        let (_dir, mut conn) = open_test_db();
        let a = insert(&conn, &request("a")).unwrap();
        let b = insert(&conn, &request("b")).unwrap();
        insert(&conn, &request("c")).unwrap();
        let deleted = delete_many(&mut conn, &[a, b, "ghost".to_string()]).unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(stats(&conn).unwrap().total, 1);
    }

    #[test]
    fn find_filters_and_pages() {
        let (_dir, conn) = open_test_db();
        for name in ["order_update", "order_shipped", "promo_sale"] {
            insert(&conn, &request(name)).unwrap();
        }
        let promo = find(
            &conn,
            &TemplateFilter {
                search: Some("PROMO".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(promo.total, 1);
        assert_eq!(promo.items[0].name, "promo_sale");

        let first_page = find(
            &conn,
            &TemplateFilter {
                search: Some("order".into()),
                order: SortOrder::Asc,
                size: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(first_page.total, 2);
        assert_eq!(first_page.items.len(), 1);
        assert_eq!(first_page.items[0].name, "order_update");

        let marketing = find(
            &conn,
            &TemplateFilter {
                category: Some(Category::Marketing),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(marketing.total, 0);
        assert!(marketing.items.is_empty());
    }

    #[test]
    fn duplicate_copies_content_under_new_name() {
        let (_dir, conn) = open_test_db();
        let id = insert(&conn, &request("welcome")).unwrap();
        set_status(&conn, &id, TemplateStatus::Approved).unwrap();
        let copy = duplicate(&conn, &id, "welcome_copy").unwrap();
        let saved = fetch(&conn, &copy).unwrap();
        assert_eq!(saved.name, "welcome_copy");
        assert_eq!(saved.status, TemplateStatus::Pending);
        assert_eq!(saved.components, fetch(&conn, &id).unwrap().components);

        let stats = stats(&conn).unwrap();
        assert_eq!((stats.total, stats.approved, stats.pending), (2, 1, 1));
    }

    #[test]
    fn huge_page_is_empty_not_an_error() {
        let (_dir, conn) = open_test_db();
        insert(&conn, &request("welcome")).unwrap();
        for page in [1usize << 62, usize::MAX] {
            let result = find(
                &conn,
                &TemplateFilter {
                    page: Some(page),
                    size: Some(100),
                    ..Default::default()
                },
            )
            .unwrap();
            assert_eq!(result.total, 1);
            assert!(result.items.is_empty());
        }
    }

    #[test]
    fn losing_a_name_race_is_a_conflict() {
        let (_dir, conn) = open_test_db();
        let id = insert(&conn, &request("welcome")).unwrap();
        // Second row for the same pair written without the pre-check, as a
        // concurrent request that passed `ensure_name_free` would.
        let err = conn
            .execute(
                &format!(
                    "INSERT INTO templates ({COLUMNS}) \
                     SELECT 'other-id', name, category, language, status, components, \
                     content_md5, created_at, updated_at FROM templates WHERE id = ?1"
                ),
                params![id],
            )
            .unwrap_err();
        assert!(matches!(
            unique_violation(err, "welcome", "en"),
            ServiceError::Conflict(_)
        ));

        let other = rusqlite::Error::QueryReturnedNoRows;
        assert!(matches!(
            unique_violation(other, "welcome", "en"),
            ServiceError::Storage(_)
        ));
    }

    #[test]
    fn stats_group_by_status() {
        let (_dir, conn) = open_test_db();
        let a = insert(&conn, &request("a")).unwrap();
        insert(&conn, &request("b")).unwrap();
        insert(&conn, &request("c")).unwrap();
        set_status(&conn, &a, TemplateStatus::Rejected).unwrap();
        let stats = stats(&conn).unwrap();
        assert_eq!((stats.total, stats.pending, stats.rejected), (3, 2, 1));
    }
}
