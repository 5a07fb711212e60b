// ==========================================
// 舰艇维护期排程核心 - 甘特时间轴 API
// ==========================================
// 职责: 组合 仓储 (快照读取/写入) + 配置 + 引擎 (布局计算)
// 架构: API 层 → Repository 层 (ScheduleRepository) / Engine 层 (TimelineRenderer)
// 红线: 写入前先做字段校验，违规一次性全部返回
// ==========================================

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::{ConfigManager, ScheduleConfigReader};
use crate::config::schedule_config::ScheduleConfig;
use crate::domain::assignment::Assignment;
use crate::domain::maintenance_period::{is_supported_date, MaintenancePeriodRecord};
use crate::domain::ship::Ship;
use crate::domain::snapshot::{ScheduleSnapshot, SnapshotSummary};
use crate::domain::team::Team;
use crate::engine::timeline::{TimelineLayout, TimelineRenderer};
use crate::engine::validation::{
    validate_assignment, validate_mp_draft, validate_mp_record, validate_ship, validate_team_name,
};
use crate::engine::view::TimelineView;
use crate::engine::window_derivation::MaintenancePeriodDraft;
use crate::perf::{install_sql_counter, PerfGuard};
use crate::repository::schedule_repo::ScheduleRepository;

// ==========================================
// GanttApi - 甘特时间轴 API
// ==========================================
pub struct GanttApi {
    repo: Arc<ScheduleRepository>,
    config: Arc<dyn ScheduleConfigReader>,
}

impl GanttApi {
    /// 创建新的GanttApi实例
    ///
    /// # 参数
    /// - repo: 排程数据仓储
    /// - config: 排程参数来源 (ConfigManager 或静态 ScheduleConfig)
    pub fn new(repo: Arc<ScheduleRepository>, config: Arc<dyn ScheduleConfigReader>) -> Self {
        Self { repo, config }
    }

    /// 打开数据库文件，仓储与配置共享同一连接
    pub fn open(db_path: &str) -> ApiResult<Self> {
        let repo = ScheduleRepository::new(db_path)?;
        let conn = repo.connection();
        {
            let mut guard = conn
                .lock()
                .map_err(|e| ApiError::DatabaseError(format!("数据库锁获取失败: {}", e)))?;
            install_sql_counter(&mut guard);
        }
        let config_manager = ConfigManager::from_connection(conn)
            .map_err(|e| ApiError::InternalError(format!("配置加载失败: {}", e)))?;

        tracing::info!(db_path, "gantt api opened");
        Ok(Self::new(Arc::new(repo), Arc::new(config_manager)))
    }

    fn schedule_config(&self) -> ApiResult<ScheduleConfig> {
        self.config
            .load_schedule_config()
            .map_err(|e| ApiError::InternalError(format!("配置加载失败: {}", e)))
    }

    fn now_timestamp() -> String {
        Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    // ==========================================
    // 时间轴
    // ==========================================

    /// 以 anchor 所在月为起点的默认视图
    pub fn default_view(&self, anchor: NaiveDate) -> ApiResult<TimelineView> {
        let config = self.schedule_config()?;
        Ok(TimelineView::new(anchor, config.view))
    }

    /// 按视图窗口计算布局
    pub fn render_timeline(&self, view: &TimelineView) -> ApiResult<TimelineLayout> {
        let (start, end) = view.window();
        self.render_window(start, end)
    }

    /// 按显式窗口计算布局
    pub fn render_window(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> ApiResult<TimelineLayout> {
        let mut perf = PerfGuard::new("render_timeline");

        if window_end < window_start {
            return Err(ApiError::InvalidInput(format!(
                "时间窗口倒置: {} > {}",
                window_start, window_end
            )));
        }
        if !is_supported_date(window_start) || !is_supported_date(window_end) {
            return Err(ApiError::InvalidInput(format!(
                "时间窗口超出可排程年份: {} ~ {}",
                window_start, window_end
            )));
        }

        let config = self.schedule_config()?;
        let snapshot = self.repo.load_snapshot()?;
        let layout = TimelineRenderer::new(&config.derivation).render(
            &snapshot,
            window_start,
            window_end,
        );

        perf.record("weeks", layout.weeks.len());
        perf.record("rows", layout.rows.len());
        perf.record("bars", layout.rows.iter().map(|r| r.bars.len()).sum());
        perf.record("rejected", layout.rejected.len());
        Ok(layout)
    }

    /// 读取原始快照
    pub fn load_snapshot(&self) -> ApiResult<ScheduleSnapshot> {
        Ok(self.repo.load_snapshot()?)
    }

    /// 驾驶舱汇总
    pub fn dashboard_summary(&self) -> ApiResult<SnapshotSummary> {
        let mut perf = PerfGuard::new("dashboard_summary");
        let summary = self.repo.load_snapshot()?.summary();
        perf.record("mps", summary.mp_count);
        Ok(summary)
    }

    // ==========================================
    // 写入
    // ==========================================

    pub fn create_ship(&self, name: &str, code: &str) -> ApiResult<Ship> {
        let mut ship = Ship::new(Uuid::new_v4().to_string(), name, code);
        ApiError::check_violations(validate_ship(&ship))?;

        ship.created_at = Some(Self::now_timestamp());
        self.repo.insert_ship(&ship)?;
        tracing::info!(ship_id = %ship.id, code = %ship.code, "ship created");
        Ok(ship)
    }

    pub fn create_team(&self, name: &str) -> ApiResult<Team> {
        ApiError::check_violations(validate_team_name(name))?;

        let now = Self::now_timestamp();
        let team = Team {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Some(now.clone()),
            updated_at: Some(now),
        };
        self.repo.insert_team(&team)?;
        tracing::info!(team_id = %team.id, name = %team.name, "team created");
        Ok(team)
    }

    /// 新建维护期：校验 → 推算规划/收尾窗口 → 写入
    pub fn create_maintenance_period(
        &self,
        draft: &MaintenancePeriodDraft,
    ) -> ApiResult<MaintenancePeriodRecord> {
        ApiError::check_violations(validate_mp_draft(draft))?;

        let config = self.schedule_config()?;
        let record = draft.to_record(
            Uuid::new_v4().to_string(),
            Some(Self::now_timestamp()),
            &config.derivation,
        );
        self.import_maintenance_period(&record)?;
        Ok(record)
    }

    /// 写入完整维护期记录 (四个日期由调用方给出)
    ///
    /// 日期须可解析且在可排程年份内，否则整条拒绝。
    pub fn import_maintenance_period(&self, record: &MaintenancePeriodRecord) -> ApiResult<()> {
        ApiError::check_violations(validate_mp_record(record))?;
        self.repo.insert_maintenance_period(record)?;

        tracing::info!(
            mp_id = %record.id,
            ship_id = %record.ship_id,
            mp_type = %record.mp_type,
            planning_start = %record.planning_start,
            closeout_end = %record.closeout_end,
            "maintenance period saved"
        );
        Ok(())
    }

    /// 分派团队
    pub fn assign_team(
        &self,
        mp_id: &str,
        team_id: &str,
        weeks_allocated: i32,
    ) -> ApiResult<Assignment> {
        let now = Self::now_timestamp();
        let mut assignment =
            Assignment::new(Uuid::new_v4().to_string(), mp_id, team_id, weeks_allocated);
        ApiError::check_violations(validate_assignment(&assignment))?;

        if self.repo.find_maintenance_period(mp_id)?.is_none() {
            return Err(ApiError::NotFound(format!(
                "MaintenancePeriod(id={})不存在",
                mp_id
            )));
        }

        assignment.created_at = Some(now.clone());
        assignment.updated_at = Some(now);
        self.repo.insert_assignment(&assignment)?;

        tracing::info!(
            assignment_id = %assignment.id,
            mp_id,
            team_id,
            weeks_allocated,
            "team assigned"
        );
        Ok(assignment)
    }
}
