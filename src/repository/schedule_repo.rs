// ==========================================
// 舰艇维护期排程核心 - 排程数据仓储
// ==========================================
// 职责: 管理 ships / mps / teams / assignments 四张表
// 输出: ScheduleSnapshot (一次渲染所需的只读快照)
// 排序: MP 按 start_date，团队按 name，舰艇按 name，分派按 created_at
// ==========================================

use crate::db::{configure_sqlite_connection, ensure_schema, open_sqlite_connection};
use crate::domain::assignment::Assignment;
use crate::domain::maintenance_period::MaintenancePeriodRecord;
use crate::domain::ship::Ship;
use crate::domain::snapshot::ScheduleSnapshot;
use crate::domain::team::Team;
use crate::domain::types::{AssignmentStatus, MpStatus, MpType};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

const MP_COLUMNS: &str = r#"
    id, ship_id, mp_number, year, type, status,
    start_date, end_date, planning_start, closeout_end,
    has_pre_planning, created_at, updated_at
"#;

/// mps 行的原始映射 (枚举列在锁外再解析)
struct MpRow {
    id: String,
    ship_id: String,
    mp_number: i32,
    year: i32,
    mp_type: String,
    status: Option<String>,
    start_date: String,
    end_date: String,
    planning_start: String,
    closeout_end: String,
    has_pre_planning: Option<bool>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl MpRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            ship_id: row.get(1)?,
            mp_number: row.get(2)?,
            year: row.get(3)?,
            mp_type: row.get(4)?,
            status: row.get(5)?,
            start_date: row.get(6)?,
            end_date: row.get(7)?,
            planning_start: row.get(8)?,
            closeout_end: row.get(9)?,
            has_pre_planning: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }

    fn into_record(self) -> RepositoryResult<MaintenancePeriodRecord> {
        let mp_type = MpType::from_str(&self.mp_type)
            .map_err(|e| RepositoryError::invalid_record("mps", &self.id, e))?;
        let status = match self.status.as_deref() {
            None => MpStatus::default(),
            Some(raw) => MpStatus::from_str(raw)
                .map_err(|e| RepositoryError::invalid_record("mps", &self.id, e))?,
        };

        Ok(MaintenancePeriodRecord {
            id: self.id,
            ship_id: self.ship_id,
            mp_number: self.mp_number,
            year: self.year,
            mp_type,
            status,
            start_date: self.start_date,
            end_date: self.end_date,
            planning_start: self.planning_start,
            closeout_end: self.closeout_end,
            has_pre_planning: self.has_pre_planning.unwrap_or(false),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

// ==========================================
// ScheduleRepository - 排程数据仓储
// ==========================================
pub struct ScheduleRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ScheduleRepository {
    /// 打开数据库文件并建表
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// 从已有连接创建 (与 ConfigManager 共享连接)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        {
            let guard = repo.get_conn()?;
            configure_sqlite_connection(&guard)?;
        }
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// 共享连接句柄
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 建表（幂等）
    pub fn ensure_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        ensure_schema(&conn)?;
        Ok(())
    }

    // ==========================================
    // 写入
    // ==========================================

    pub fn insert_ship(&self, ship: &Ship) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO ships (id, name, code, created_at)
            VALUES (?1, ?2, ?3, COALESCE(?4, CURRENT_TIMESTAMP))
            "#,
            params![ship.id, ship.name, ship.code, ship.created_at],
        )?;
        Ok(())
    }

    pub fn insert_team(&self, team: &Team) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO teams (id, name, created_at, updated_at)
            VALUES (?1, ?2, COALESCE(?3, CURRENT_TIMESTAMP), COALESCE(?4, CURRENT_TIMESTAMP))
            "#,
            params![team.id, team.name, team.created_at, team.updated_at],
        )?;
        Ok(())
    }

    pub fn insert_maintenance_period(&self, mp: &MaintenancePeriodRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO mps (
                id, ship_id, mp_number, year, type, status,
                start_date, end_date, planning_start, closeout_end,
                has_pre_planning, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                COALESCE(?12, CURRENT_TIMESTAMP), COALESCE(?13, CURRENT_TIMESTAMP)
            )
            "#,
            params![
                mp.id,
                mp.ship_id,
                mp.mp_number,
                mp.year,
                mp.mp_type.as_str(),
                mp.status.as_str(),
                mp.start_date,
                mp.end_date,
                mp.planning_start,
                mp.closeout_end,
                mp.has_pre_planning,
                mp.created_at,
                mp.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn insert_assignment(&self, assignment: &Assignment) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO assignments (
                id, mp_id, team_id, weeks_allocated, status, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                COALESCE(?6, CURRENT_TIMESTAMP), COALESCE(?7, CURRENT_TIMESTAMP)
            )
            "#,
            params![
                assignment.id,
                assignment.mp_id,
                assignment.team_id,
                assignment.weeks_allocated,
                assignment.status.as_str(),
                assignment.created_at,
                assignment.updated_at,
            ],
        )?;
        Ok(())
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn list_ships(&self) -> RepositoryResult<Vec<Ship>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, name, code, created_at FROM ships ORDER BY name")?;
        let ships = stmt
            .query_map([], |row| {
                Ok(Ship {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    code: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ships)
    }

    pub fn list_teams(&self) -> RepositoryResult<Vec<Team>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, created_at, updated_at FROM teams ORDER BY name")?;
        let teams = stmt
            .query_map([], |row| {
                Ok(Team {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                    updated_at: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(teams)
    }

    pub fn list_maintenance_periods(&self) -> RepositoryResult<Vec<MaintenancePeriodRecord>> {
        let rows = {
            let conn = self.get_conn()?;
            let sql = format!("SELECT {} FROM mps ORDER BY start_date, id", MP_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], MpRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        rows.into_iter().map(MpRow::into_record).collect()
    }

    pub fn find_maintenance_period(
        &self,
        mp_id: &str,
    ) -> RepositoryResult<Option<MaintenancePeriodRecord>> {
        let row = {
            let conn = self.get_conn()?;
            let sql = format!("SELECT {} FROM mps WHERE id = ?1", MP_COLUMNS);
            conn.query_row(&sql, params![mp_id], MpRow::from_row)
                .optional()?
        };

        row.map(MpRow::into_record).transpose()
    }

    pub fn list_assignments(&self) -> RepositoryResult<Vec<Assignment>> {
        let raw = {
            let conn = self.get_conn()?;
            let mut stmt = conn.prepare(
                r#"
                SELECT id, mp_id, team_id, weeks_allocated, status, created_at, updated_at
                FROM assignments
                ORDER BY created_at, id
                "#,
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        Assignment {
                            id: row.get(0)?,
                            mp_id: row.get(1)?,
                            team_id: row.get(2)?,
                            weeks_allocated: row.get(3)?,
                            status: AssignmentStatus::default(),
                            created_at: row.get(5)?,
                            updated_at: row.get(6)?,
                        },
                        row.get::<_, Option<String>>(4)?,
                    ))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        raw.into_iter()
            .map(|(mut assignment, status)| {
                if let Some(raw_status) = status {
                    assignment.status = AssignmentStatus::from_str(&raw_status).map_err(|e| {
                        RepositoryError::invalid_record("assignments", &assignment.id, e)
                    })?;
                }
                Ok(assignment)
            })
            .collect()
    }

    /// 读取完整快照
    pub fn load_snapshot(&self) -> RepositoryResult<ScheduleSnapshot> {
        let snapshot = ScheduleSnapshot {
            ships: self.list_ships()?,
            mps: self.list_maintenance_periods()?,
            teams: self.list_teams()?,
            assignments: self.list_assignments()?,
        };

        tracing::debug!(
            ships = snapshot.ships.len(),
            mps = snapshot.mps.len(),
            teams = snapshot.teams.len(),
            assignments = snapshot.assignments.len(),
            "schedule snapshot loaded"
        );
        Ok(snapshot)
    }
}
