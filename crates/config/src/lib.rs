//! mferp-config - 配置加载库

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// 是否输出 JSON 格式日志（生产环境默认开启）
    pub json: Option<bool>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: None,
        }
    }
}

/// 单据编号配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NumberingConfig {
    pub vendor_prefix: String,
    pub purchase_order_prefix: String,
    pub component_issue_prefix: String,
    pub opening_stock_prefix: String,
    pub osp_job_prefix: String,
    /// 单据流水号位数
    pub sequence_width: usize,
    /// 物料件号流水号位数
    pub piece_sequence_width: usize,
}

impl Default for NumberingConfig {
    fn default() -> Self {
        Self {
            vendor_prefix: "VND".to_string(),
            purchase_order_prefix: "PO".to_string(),
            component_issue_prefix: "CI".to_string(),
            opening_stock_prefix: "OS".to_string(),
            osp_job_prefix: "OSP".to_string(),
            sequence_width: 4,
            piece_sequence_width: 5,
        }
    }
}

/// 库存计算配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// 未指定密度时使用的默认密度（g/cm³，碳钢 7.85）
    pub default_density_g_cm3: Decimal,
    /// 长度（mm）保留小数位
    pub length_scale: u32,
    /// 重量（kg）保留小数位
    pub weight_scale: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            default_density_g_cm3: Decimal::new(785, 2),
            length_scale: 2,
            weight_scale: 3,
        }
    }
}

/// 分页配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    pub telemetry: TelemetryConfig,
    pub numbering: NumberingConfig,
    pub inventory: InventoryConfig,
    pub pagination: PaginationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "mf-ops".to_string(),
            app_env: "development".to_string(),
            telemetry: TelemetryConfig::default(),
            numbering: NumberingConfig::default(),
            inventory: InventoryConfig::default(),
            pagination: PaginationConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 优先级：环境变量 `APP_<SECTION>__<KEY>` > `{APP_ENV}.toml` > `default.toml`
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config: Self = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("APP_").ignore(&["env"]).split("__"))
            .join(Serialized::default("app_env", env.as_str()))
            .extract()?;

        Ok(config)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    /// 是否输出 JSON 日志
    pub fn json_logs(&self) -> bool {
        self.telemetry.json.unwrap_or_else(|| self.is_production())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_files() {
        Jail::expect_with(|jail| {
            jail.set_env("APP_ENV", "development");
            let config = AppConfig::load(".").map_err(|e| e.to_string())?;
            assert_eq!(config.app_name, "mf-ops");
            assert_eq!(config.numbering.purchase_order_prefix, "PO");
            assert_eq!(config.inventory.default_density_g_cm3, Decimal::new(785, 2));
            assert_eq!(config.pagination.max_page_size, 100);
            assert!(!config.json_logs());
            Ok(())
        });
    }

    #[test]
    fn test_file_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.set_env("APP_ENV", "production");
            jail.create_file(
                "default.toml",
                r#"
                app_name = "mf-ops-plant2"

                [numbering]
                purchase_order_prefix = "PUR"
                sequence_width = 5

                [inventory]
                default_density_g_cm3 = 8.0
                "#,
            )?;
            jail.create_file(
                "production.toml",
                r#"
                [telemetry]
                log_level = "warn"
                "#,
            )?;
            jail.set_env("APP_NUMBERING__OSP_JOB_PREFIX", "JW");

            let config = AppConfig::load(".").map_err(|e| e.to_string())?;
            assert_eq!(config.app_name, "mf-ops-plant2");
            assert_eq!(config.app_env, "production");
            assert_eq!(config.numbering.purchase_order_prefix, "PUR");
            assert_eq!(config.numbering.osp_job_prefix, "JW");
            assert_eq!(config.numbering.sequence_width, 5);
            assert_eq!(config.numbering.vendor_prefix, "VND");
            assert_eq!(config.inventory.default_density_g_cm3, Decimal::new(8, 0));
            assert_eq!(config.telemetry.log_level, "warn");
            assert!(config.json_logs());
            Ok(())
        });
    }
}
