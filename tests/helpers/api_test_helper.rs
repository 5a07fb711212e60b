// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 临时数据库 + 仓储 + 配置 + GanttApi 的一站式测试环境
// ==========================================

use std::error::Error;
use std::sync::Arc;
use tempfile::NamedTempFile;

use mp_schedule::api::GanttApi;
use mp_schedule::config::ConfigManager;
use mp_schedule::logging;
use mp_schedule::repository::ScheduleRepository;

pub type TestResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// API测试环境
pub struct ApiTestEnv {
    pub db_path: String,
    pub api: GanttApi,

    // Repository / 配置（用于测试数据准备与参数覆写）
    pub repo: Arc<ScheduleRepository>,
    pub config_manager: Arc<ConfigManager>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    pub fn new() -> TestResult<Self> {
        logging::init_test();

        let temp_file = NamedTempFile::new()?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or("临时文件路径不是 UTF-8")?
            .to_string();

        let repo = Arc::new(ScheduleRepository::new(&db_path)?);
        let config_manager = Arc::new(ConfigManager::from_connection(repo.connection())?);
        let api = GanttApi::new(repo.clone(), config_manager.clone());

        Ok(Self {
            db_path,
            api,
            repo,
            config_manager,
            _temp_file: temp_file,
        })
    }
}

/// 仅创建临时数据库文件 (仓储测试使用)
pub fn create_test_db() -> TestResult<(NamedTempFile, String)> {
    logging::init_test();

    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是 UTF-8")?
        .to_string();
    Ok((temp_file, db_path))
}
