// ==========================================
// ScheduleRepository 集成测试
// ==========================================
// 测试范围:
// 1. 写入 / 读取四张表，快照排序
// 2. 约束违反 (唯一、外键、CHECK)
// 3. 文件数据库重开后数据仍在
// ==========================================

mod helpers;

use helpers::api_test_helper::create_test_db;
use helpers::test_data_builder::{d, MpBuilder};
use mp_schedule::domain::{Assignment, AssignmentStatus, MpStatus, MpType, Ship, Team};
use mp_schedule::repository::{RepositoryError, ScheduleRepository};

fn seeded_repo(db_path: &str) -> ScheduleRepository {
    let repo = ScheduleRepository::new(db_path).expect("无法打开仓储");
    repo.insert_ship(&Ship::new("ship-sch", "Cape Schanck", "SCH"))
        .unwrap();
    repo.insert_ship(&Ship::new("ship-cho", "HMAS Choules", "CHO"))
        .unwrap();
    repo.insert_team(&Team::new("team-z", "Zulu Electrical")).unwrap();
    repo.insert_team(&Team::new("team-a", "Alpha Hull")).unwrap();

    repo.insert_maintenance_period(
        &MpBuilder::new("mp-late")
            .ship("ship-cho")
            .mp_type(MpType::InWater)
            .status(MpStatus::Active)
            .dates(d(2025, 4, 5), d(2025, 7, 12), d(2025, 8, 1), d(2025, 8, 15))
            .pre_planning(true)
            .build_record(),
    )
    .unwrap();
    repo.insert_maintenance_period(
        &MpBuilder::new("mp-early")
            .ship("ship-sch")
            .number(3, 2025)
            .build_record(),
    )
    .unwrap();

    repo.insert_assignment(&Assignment::new("asg-1", "mp-early", "team-a", 12))
        .unwrap();
    let mut in_progress = Assignment::new("asg-2", "mp-late", "team-a", 4);
    in_progress.status = AssignmentStatus::InProgress;
    repo.insert_assignment(&in_progress).unwrap();
    repo
}

#[test]
fn test_snapshot_round_trip_and_ordering() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let repo = seeded_repo(&db_path);

    let snapshot = repo.load_snapshot().unwrap();

    let team_names: Vec<&str> = snapshot.teams.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(team_names, vec!["Alpha Hull", "Zulu Electrical"]);

    let mp_ids: Vec<&str> = snapshot.mps.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(mp_ids, vec!["mp-early", "mp-late"]);

    let late = snapshot.mp_record("mp-late").unwrap();
    assert_eq!(late.mp_type, MpType::InWater);
    assert_eq!(late.status, MpStatus::Active);
    assert!(late.has_pre_planning);
    assert_eq!(late.planning_start, "2025-04-05");
    assert!(late.created_at.is_some());

    assert_eq!(snapshot.assignments.len(), 2);
    let asg2 = snapshot.assignments.iter().find(|a| a.id == "asg-2").unwrap();
    assert_eq!(asg2.status, AssignmentStatus::InProgress);

    let summary = snapshot.summary();
    assert_eq!(summary.ship_count, 2);
    assert_eq!(summary.active_mp_count, 1);
    assert_eq!(summary.planned_mp_count, 1);
    assert_eq!(summary.total_weeks_allocated, 16);
}

#[test]
fn test_data_survives_reopen() {
    let (_tmp, db_path) = create_test_db().unwrap();
    {
        seeded_repo(&db_path);
    }

    let reopened = ScheduleRepository::new(&db_path).unwrap();
    let found = reopened.find_maintenance_period("mp-early").unwrap();
    assert_eq!(found.map(|m| m.mp_number), Some(3));
    assert!(reopened.find_maintenance_period("mp-none").unwrap().is_none());
}

#[test]
fn test_constraint_violations() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let repo = seeded_repo(&db_path);

    // 舰艇代码唯一
    let err = repo
        .insert_ship(&Ship::new("ship-dup", "Another", "SCH"))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));

    // 团队名称唯一
    let err = repo.insert_team(&Team::new("team-dup", "Alpha Hull")).unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));

    // 分派引用不存在的团队
    let err = repo
        .insert_assignment(&Assignment::new("asg-x", "mp-early", "team-none", 2))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));

    // MP 引用不存在的舰艇
    let err = repo
        .insert_maintenance_period(&MpBuilder::new("mp-orphan").ship("ship-none").build_record())
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));
}

#[test]
fn test_malformed_dates_are_stored_verbatim() {
    // 存储层不解析日期；非法日期在渲染阶段被剔除
    let (_tmp, db_path) = create_test_db().unwrap();
    let repo = seeded_repo(&db_path);
    repo.insert_maintenance_period(
        &MpBuilder::new("mp-bad")
            .ship("ship-sch")
            .raw_start_date("01/03/2025")
            .build_record(),
    )
    .unwrap();

    let snapshot = repo.load_snapshot().unwrap();
    let resolved = snapshot.resolve_periods();
    assert_eq!(resolved.periods.len(), 2);
    assert_eq!(resolved.rejected.len(), 1);
    assert_eq!(resolved.rejected[0].mp_id, "mp-bad");
}
