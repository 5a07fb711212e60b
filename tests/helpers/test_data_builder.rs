// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use mp_schedule::domain::{
    Assignment, MaintenancePeriod, MaintenancePeriodRecord, MpStatus, MpType, ScheduleSnapshot,
    Ship, Team,
};

/// 日期简写
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn fmt(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ==========================================
// MaintenancePeriod 构建器
// ==========================================
// 默认: 进坞, 2025-03-01 ~ 2025-05-30, 规划 2024-11-23, 收尾 2025-06-13

pub struct MpBuilder {
    record: MaintenancePeriodRecord,
}

impl MpBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            record: MaintenancePeriodRecord {
                id: id.to_string(),
                ship_id: "ship-001".to_string(),
                mp_number: 1,
                year: 2025,
                mp_type: MpType::Docking,
                status: MpStatus::Planned,
                start_date: "2025-03-01".to_string(),
                end_date: "2025-05-30".to_string(),
                planning_start: "2024-11-23".to_string(),
                closeout_end: "2025-06-13".to_string(),
                has_pre_planning: false,
                created_at: None,
                updated_at: None,
            },
        }
    }

    pub fn ship(mut self, ship_id: &str) -> Self {
        self.record.ship_id = ship_id.to_string();
        self
    }

    pub fn number(mut self, mp_number: i32, year: i32) -> Self {
        self.record.mp_number = mp_number;
        self.record.year = year;
        self
    }

    pub fn mp_type(mut self, mp_type: MpType) -> Self {
        self.record.mp_type = mp_type;
        self
    }

    pub fn status(mut self, status: MpStatus) -> Self {
        self.record.status = status;
        self
    }

    pub fn pre_planning(mut self, enabled: bool) -> Self {
        self.record.has_pre_planning = enabled;
        self
    }

    /// 四个关键日期
    pub fn dates(
        mut self,
        planning_start: NaiveDate,
        start_date: NaiveDate,
        end_date: NaiveDate,
        closeout_end: NaiveDate,
    ) -> Self {
        self.record.planning_start = fmt(planning_start);
        self.record.start_date = fmt(start_date);
        self.record.end_date = fmt(end_date);
        self.record.closeout_end = fmt(closeout_end);
        self
    }

    /// 只关心占用区间 [from, to] 时使用 (规划与收尾退化)
    pub fn occupied(self, from: NaiveDate, to: NaiveDate) -> Self {
        self.dates(from, from, to, to)
    }

    /// 直接写入原始日期字符串 (构造非法数据)
    pub fn raw_start_date(mut self, raw: &str) -> Self {
        self.record.start_date = raw.to_string();
        self
    }

    pub fn raw_end_date(mut self, raw: &str) -> Self {
        self.record.end_date = raw.to_string();
        self
    }

    pub fn build_record(self) -> MaintenancePeriodRecord {
        self.record
    }

    pub fn build(self) -> MaintenancePeriod {
        MaintenancePeriod::try_from(&self.record).expect("测试数据日期应合法")
    }
}

// ==========================================
// ScheduleSnapshot 构建器
// ==========================================

#[derive(Default)]
pub struct SnapshotBuilder {
    snapshot: ScheduleSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ship(mut self, id: &str, name: &str, code: &str) -> Self {
        self.snapshot.ships.push(Ship::new(id, name, code));
        self
    }

    pub fn team(mut self, id: &str, name: &str) -> Self {
        self.snapshot.teams.push(Team::new(id, name));
        self
    }

    pub fn mp(mut self, record: MaintenancePeriodRecord) -> Self {
        self.snapshot.mps.push(record);
        self
    }

    pub fn assign(mut self, mp_id: &str, team_id: &str, weeks: i32) -> Self {
        let id = format!("asg-{}", self.snapshot.assignments.len() + 1);
        self.snapshot
            .assignments
            .push(Assignment::new(id, mp_id, team_id, weeks));
        self
    }

    pub fn build(self) -> ScheduleSnapshot {
        self.snapshot
    }
}

// ==========================================
// 伪随机输入 (固定种子，结果可复现)
// ==========================================

pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    /// [0, bound)
    pub fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

/// 生成 n 个占用区间随机的 MP (全部分派给 team_id)
pub fn random_team_workload(
    rng: &mut Lcg,
    n: usize,
    team_id: &str,
) -> (Vec<MaintenancePeriod>, Vec<Assignment>) {
    let base = d(2025, 1, 1);
    let mut mps = Vec::with_capacity(n);
    let mut assignments = Vec::with_capacity(n);

    for i in 0..n {
        let from = base + chrono::Duration::days(i64::from(rng.below(300)));
        let to = from + chrono::Duration::days(i64::from(rng.below(90)));
        let id = format!("mp-{:03}", i);
        mps.push(MpBuilder::new(&id).occupied(from, to).build());
        assignments.push(Assignment::new(format!("asg-{:03}", i), id, team_id, 4));
    }

    (mps, assignments)
}
