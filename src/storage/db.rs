use chrono::Utc;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OptionalExtension, Result};

use crate::core::error::{AppError, AppResult};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Статус заявки на запись: new → approved | rejected (терминальные).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadStatus {
    New,
    Approved,
    Rejected,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Approved => "approved",
            LeadStatus::Rejected => "rejected",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "new" => Some(LeadStatus::New),
            "approved" => Some(LeadStatus::Approved),
            "rejected" => Some(LeadStatus::Rejected),
            _ => None,
        }
    }
}

/// Статус ДЗ: new → accepted | rework (оба терминальные; повторная
/// отправка создаёт новую запись, старая не переоткрывается).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    New,
    Accepted,
    Rework,
}

impl HomeworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::New => "new",
            HomeworkStatus::Accepted => "accepted",
            HomeworkStatus::Rework => "rework",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "new" => Some(HomeworkStatus::New),
            "accepted" => Some(HomeworkStatus::Accepted),
            "rework" => Some(HomeworkStatus::Rework),
            _ => None,
        }
    }
}

/// Структура, представляющая пользователя в базе данных.
#[derive(Debug, Clone)]
pub struct User {
    /// Telegram ID пользователя
    pub tg_id: i64,
    /// Имя пользователя (username) в Telegram, если доступно
    pub username: Option<String>,
    /// Отображаемое имя
    pub full_name: Option<String>,
    pub created_at: String,
}

/// Заявка на запись в группу.
#[derive(Debug, Clone)]
pub struct Lead {
    pub id: i64,
    pub tg_id: i64,
    /// Класс ученика: "1-4", "5-8", "9", "10", "11"
    pub student_class: String,
    /// Цель занятий: "подтянуть успеваемость", "ОГЭ", "ЕГЭ"
    pub goal: String,
    /// Удобное время: "утро", "день", "вечер"
    pub time_pref: String,
    pub contact: Option<String>,
    pub status: LeadStatus,
    pub created_at: String,
}

/// Поля новой заявки (идентификатор присваивает база).
#[derive(Debug, Clone)]
pub struct NewLead {
    pub tg_id: i64,
    pub student_class: String,
    pub goal: String,
    pub time_pref: String,
    pub contact: Option<String>,
}

/// ДЗ, отправленное на проверку.
#[derive(Debug, Clone)]
pub struct Homework {
    pub id: i64,
    pub tg_id: i64,
    pub student_class: String,
    /// Тема: "алгебра", "геометрия", "текстовые задачи", "ОГЭ/ЕГЭ"
    pub topic: String,
    /// Тип вложения: "text", "photo", "document"
    pub payload_type: String,
    pub payload_text: Option<String>,
    /// Telegram file_id для фото/документа
    pub file_id: Option<String>,
    pub caption: Option<String>,
    pub status: HomeworkStatus,
    pub admin_comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Поля нового ДЗ (идентификатор присваивает база).
#[derive(Debug, Clone)]
pub struct NewHomework {
    pub tg_id: i64,
    pub student_class: String,
    pub topic: String,
    pub payload_type: String,
    pub payload_text: Option<String>,
    pub file_id: Option<String>,
    pub caption: Option<String>,
}

/// Create a new database connection pool
///
/// Initializes a connection pool with up to 10 connections and ensures the
/// schema exists on the first connection.
pub fn create_pool(database_path: &str) -> AppResult<DbPool> {
    let manager = SqliteConnectionManager::file(database_path);
    let pool = Pool::builder()
        .max_size(10) // Maximum 10 connections in the pool
        .build(manager)?;

    let conn = pool.get()?;
    init_schema(&conn)?;

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is automatically returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, r2d2::Error> {
    pool.get()
}

/// Creates all tables and indexes if they do not exist yet.
///
/// Safe to run on every startup; additive only.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            tg_id      INTEGER PRIMARY KEY,
            username   TEXT,
            full_name  TEXT,
            created_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS leads (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            tg_id         INTEGER NOT NULL,
            student_class TEXT NOT NULL,
            goal          TEXT NOT NULL,
            time_pref     TEXT NOT NULL,
            contact       TEXT,
            status        TEXT NOT NULL DEFAULT 'new',
            created_at    TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_leads_tg_id ON leads (tg_id);
        CREATE TABLE IF NOT EXISTS homeworks (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            tg_id         INTEGER NOT NULL,
            student_class TEXT NOT NULL,
            topic         TEXT NOT NULL,
            payload_type  TEXT NOT NULL,
            payload_text  TEXT,
            file_id       TEXT,
            caption       TEXT,
            status        TEXT NOT NULL DEFAULT 'new',
            admin_comment TEXT,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_homeworks_tg_id ON homeworks (tg_id);",
    )
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

fn lead_status_from_row(s: String) -> Result<LeadStatus> {
    LeadStatus::from_db(&s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            6,
            rusqlite::types::Type::Text,
            format!("unknown lead status: {s}").into(),
        )
    })
}

fn homework_status_from_row(s: String) -> Result<HomeworkStatus> {
    HomeworkStatus::from_db(&s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            8,
            rusqlite::types::Type::Text,
            format!("unknown homework status: {s}").into(),
        )
    })
}

/// Создаёт пользователя. Запись создаётся один раз при первом обращении
/// и дальше не изменяется.
pub fn create_user(conn: &Connection, tg_id: i64, username: Option<&str>, full_name: Option<&str>) -> Result<()> {
    conn.execute(
        "INSERT INTO users (tg_id, username, full_name, created_at) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![tg_id, username, full_name, now_rfc3339()],
    )?;
    Ok(())
}

/// Получает пользователя по Telegram ID.
pub fn get_user(conn: &Connection, tg_id: i64) -> Result<Option<User>> {
    conn.query_row(
        "SELECT tg_id, username, full_name, created_at FROM users WHERE tg_id = ?1",
        [tg_id],
        |row| {
            Ok(User {
                tg_id: row.get(0)?,
                username: row.get(1)?,
                full_name: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .optional()
}

/// Создаёт заявку со статусом "new" и возвращает её идентификатор.
///
/// Вставка и чтение идентификатора идут на одном соединении, поэтому
/// привязка кнопок к заявке не может увидеть чужой id.
pub fn create_lead(conn: &Connection, lead: &NewLead) -> Result<i64> {
    conn.execute(
        "INSERT INTO leads (tg_id, student_class, goal, time_pref, contact, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 'new', ?6)",
        rusqlite::params![
            lead.tg_id,
            lead.student_class,
            lead.goal,
            lead.time_pref,
            lead.contact,
            now_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Получает заявку по идентификатору.
pub fn get_lead(conn: &Connection, id: i64) -> Result<Option<Lead>> {
    conn.query_row(
        "SELECT id, tg_id, student_class, goal, time_pref, contact, status, created_at
         FROM leads WHERE id = ?1",
        [id],
        |row| {
            Ok(Lead {
                id: row.get(0)?,
                tg_id: row.get(1)?,
                student_class: row.get(2)?,
                goal: row.get(3)?,
                time_pref: row.get(4)?,
                contact: row.get(5)?,
                status: lead_status_from_row(row.get(6)?)?,
                created_at: row.get(7)?,
            })
        },
    )
    .optional()
}

/// Переводит заявку в указанный статус. Повторное применение того же
/// статуса допустимо (идемпотентно).
///
/// Returns the number of updated rows (0 if the lead does not exist).
pub fn update_lead_status(conn: &Connection, id: i64, status: LeadStatus) -> Result<usize> {
    conn.execute(
        "UPDATE leads SET status = ?1 WHERE id = ?2",
        rusqlite::params![status.as_str(), id],
    )
}

/// Создаёт ДЗ со статусом "new" и возвращает его идентификатор.
pub fn create_homework(conn: &Connection, hw: &NewHomework) -> Result<i64> {
    let now = now_rfc3339();
    conn.execute(
        "INSERT INTO homeworks (tg_id, student_class, topic, payload_type, payload_text, file_id, caption, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'new', ?8, ?8)",
        rusqlite::params![
            hw.tg_id,
            hw.student_class,
            hw.topic,
            hw.payload_type,
            hw.payload_text,
            hw.file_id,
            hw.caption,
            now
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Получает ДЗ по идентификатору.
pub fn get_homework(conn: &Connection, id: i64) -> Result<Option<Homework>> {
    conn.query_row(
        "SELECT id, tg_id, student_class, topic, payload_type, payload_text, file_id, caption,
                status, admin_comment, created_at, updated_at
         FROM homeworks WHERE id = ?1",
        [id],
        |row| {
            Ok(Homework {
                id: row.get(0)?,
                tg_id: row.get(1)?,
                student_class: row.get(2)?,
                topic: row.get(3)?,
                payload_type: row.get(4)?,
                payload_text: row.get(5)?,
                file_id: row.get(6)?,
                caption: row.get(7)?,
                status: homework_status_from_row(row.get(8)?)?,
                admin_comment: row.get(9)?,
                created_at: row.get(10)?,
                updated_at: row.get(11)?,
            })
        },
    )
    .optional()
}

/// Переводит ДЗ в указанный статус и обновляет updated_at.
///
/// Returns the number of updated rows (0 if the homework does not exist).
pub fn update_homework_status(conn: &Connection, id: i64, status: HomeworkStatus) -> Result<usize> {
    conn.execute(
        "UPDATE homeworks SET status = ?1, updated_at = ?2 WHERE id = ?3",
        rusqlite::params![status.as_str(), now_rfc3339(), id],
    )
}

/// Записывает комментарий преподавателя и обновляет updated_at.
/// Каждый новый комментарий заменяет предыдущий.
pub fn set_homework_comment(conn: &Connection, id: i64, comment: &str) -> Result<usize> {
    conn.execute(
        "UPDATE homeworks SET admin_comment = ?1, updated_at = ?2 WHERE id = ?3",
        rusqlite::params![comment, now_rfc3339(), id],
    )
}

/// Convenience helper: gets a pooled connection mapped into `AppError`.
pub fn connection(pool: &DbPool) -> AppResult<DbConnection> {
    get_connection(pool).map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn sample_lead(tg_id: i64) -> NewLead {
        NewLead {
            tg_id,
            student_class: "9".to_string(),
            goal: "ОГЭ".to_string(),
            time_pref: "утро".to_string(),
            contact: Some("@ivan".to_string()),
        }
    }

    fn sample_homework(tg_id: i64) -> NewHomework {
        NewHomework {
            tg_id,
            student_class: "5-8".to_string(),
            topic: "алгебра".to_string(),
            payload_type: "photo".to_string(),
            payload_text: None,
            file_id: Some("AgACAgIAAxkBAAI".to_string()),
            caption: Some("не понял пункт б".to_string()),
        }
    }

    #[test]
    fn test_create_and_get_user() {
        let conn = test_conn();
        create_user(&conn, 100, Some("ivan"), Some("Иван Петров")).unwrap();

        let user = get_user(&conn, 100).unwrap().unwrap();
        assert_eq!(user.tg_id, 100);
        assert_eq!(user.username.as_deref(), Some("ivan"));
        assert_eq!(user.full_name.as_deref(), Some("Иван Петров"));

        assert!(get_user(&conn, 101).unwrap().is_none());
    }

    #[test]
    fn test_create_lead_literal_fields_and_new_status() {
        let conn = test_conn();
        let id = create_lead(&conn, &sample_lead(100)).unwrap();

        let lead = get_lead(&conn, id).unwrap().unwrap();
        assert_eq!(lead.tg_id, 100);
        assert_eq!(lead.student_class, "9");
        assert_eq!(lead.goal, "ОГЭ");
        assert_eq!(lead.time_pref, "утро");
        assert_eq!(lead.contact.as_deref(), Some("@ivan"));
        assert_eq!(lead.status, LeadStatus::New);
    }

    #[test]
    fn test_lead_ids_are_sequential() {
        let conn = test_conn();
        let first = create_lead(&conn, &sample_lead(1)).unwrap();
        let second = create_lead(&conn, &sample_lead(2)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_update_lead_status_is_idempotent() {
        let conn = test_conn();
        let id = create_lead(&conn, &sample_lead(100)).unwrap();

        assert_eq!(update_lead_status(&conn, id, LeadStatus::Approved).unwrap(), 1);
        assert_eq!(get_lead(&conn, id).unwrap().unwrap().status, LeadStatus::Approved);

        // A second press of the same button re-applies the same status.
        assert_eq!(update_lead_status(&conn, id, LeadStatus::Approved).unwrap(), 1);
        assert_eq!(get_lead(&conn, id).unwrap().unwrap().status, LeadStatus::Approved);
    }

    #[test]
    fn test_update_missing_lead_touches_nothing() {
        let conn = test_conn();
        assert_eq!(update_lead_status(&conn, 9999, LeadStatus::Rejected).unwrap(), 0);
    }

    #[test]
    fn test_create_homework_and_read_back() {
        let conn = test_conn();
        let id = create_homework(&conn, &sample_homework(200)).unwrap();

        let hw = get_homework(&conn, id).unwrap().unwrap();
        assert_eq!(hw.tg_id, 200);
        assert_eq!(hw.payload_type, "photo");
        assert_eq!(hw.payload_text, None);
        assert_eq!(hw.file_id.as_deref(), Some("AgACAgIAAxkBAAI"));
        assert_eq!(hw.caption.as_deref(), Some("не понял пункт б"));
        assert_eq!(hw.status, HomeworkStatus::New);
        assert_eq!(hw.admin_comment, None);
        assert_eq!(hw.created_at, hw.updated_at);
    }

    #[test]
    fn test_homework_status_refreshes_updated_at() {
        let conn = test_conn();
        let id = create_homework(&conn, &sample_homework(200)).unwrap();
        let before = get_homework(&conn, id).unwrap().unwrap();

        update_homework_status(&conn, id, HomeworkStatus::Accepted).unwrap();
        let after = get_homework(&conn, id).unwrap().unwrap();

        assert_eq!(after.status, HomeworkStatus::Accepted);
        assert_ne!(before.updated_at, after.updated_at);
        assert_eq!(before.created_at, after.created_at);
    }

    #[test]
    fn test_homework_comment_overwrites_previous() {
        let conn = test_conn();
        let id = create_homework(&conn, &sample_homework(200)).unwrap();

        set_homework_comment(&conn, id, "перепроверь №3").unwrap();
        assert_eq!(
            get_homework(&conn, id).unwrap().unwrap().admin_comment.as_deref(),
            Some("перепроверь №3")
        );

        set_homework_comment(&conn, id, "и №5 тоже").unwrap();
        let hw = get_homework(&conn, id).unwrap().unwrap();
        assert_eq!(hw.admin_comment.as_deref(), Some("и №5 тоже"));
        // Comment does not touch the status.
        assert_eq!(hw.status, HomeworkStatus::New);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(LeadStatus::from_db("approved"), Some(LeadStatus::Approved));
        assert_eq!(LeadStatus::from_db("bogus"), None);
        assert_eq!(HomeworkStatus::from_db("rework"), Some(HomeworkStatus::Rework));
        assert_eq!(HomeworkStatus::from_db(""), None);
    }
}
