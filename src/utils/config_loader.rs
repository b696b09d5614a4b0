// Layered Config

/*
 * HASHEQ BENCH - LAYERED CONFIGURATION LOADER
 * =================================================================
 * Component Name: src/utils/config_loader.rs
 * Core Responsibility: تحميل إعدادات القياس من الطبقات: القيم الافتراضية ← ملف TOML ← متغيرات البيئة.
 * Design Pattern: Layered Sources / Validate-on-Load
 * Forensic Impact: الإعدادات الفعلية تُسجل في كل تقرير، فلا يمكن إنكار "لم أغير شيئاً".
 * =================================================================
 */

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::de::{self, SeqAccess, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{HarnessError, HarnessResult};
use crate::fixture::DECLARED_SIZES;
use crate::harness::ProtocolConfig;

/// الملف الافتراضي (اختياري)
pub const DEFAULT_CONFIG_PATH: &str = "config/harness.toml";
/// مثال: `HASHEQ_PROTOCOL__FORKS=1`
pub const ENV_PREFIX: &str = "HASHEQ";

// =================================================================
// تعريفات هيكل الإعدادات (Configuration Schema)
// =================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HarnessConfig {
    pub protocol: ProtocolConfig,
    pub sweep: SweepConfig,
    pub logging: LoggingConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// قيم الحجم المعلنة قبل التشغيل
    #[serde(deserialize_with = "size_list")]
    pub sizes: Vec<usize>,
    /// أنماط جزئية لمعرفات المقاييس (فارغ = الكل)
    #[serde(deserialize_with = "text_list")]
    pub include: Vec<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            sizes: DECLARED_SIZES.to_vec(),
            include: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// مجلد ملفات السجل الدورية. `None` = stderr فقط.
    pub dir: Option<String>,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            file_name: "hasheq_core.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    pub json_path: Option<PathBuf>,
}

// -----------------------------------------------------------------
// قوائم متساهلة: مصفوفة TOML، أو قيمة مفردة/نص مفصول بفواصل من البيئة
// -----------------------------------------------------------------

struct SizeList(Vec<usize>);

impl<'de> Deserialize<'de> for SizeList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SizeListVisitor).map(SizeList)
    }
}

struct SizeListVisitor;

impl<'de> Visitor<'de> for SizeListVisitor {
    type Value = Vec<usize>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a size, a list of sizes, or comma-separated sizes")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        usize::try_from(v)
            .map(|size| vec![size])
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        usize::try_from(v)
            .map(|size| vec![size])
            .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<usize>()
                    .map_err(|_| E::invalid_value(Unexpected::Str(part), &self))
            })
            .collect()
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut sizes = Vec::new();
        while let Some(SizeList(part)) = seq.next_element()? {
            sizes.extend(part);
        }
        Ok(sizes)
    }
}

fn size_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<usize>, D::Error> {
    SizeList::deserialize(deserializer).map(|list| list.0)
}

struct TextList(Vec<String>);

impl<'de> Deserialize<'de> for TextList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TextListVisitor).map(TextList)
    }
}

struct TextListVisitor;

impl<'de> Visitor<'de> for TextListVisitor {
    type Value = Vec<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a pattern, a list of patterns, or comma-separated patterns")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_owned)
            .collect())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(vec![v.to_string()])
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(vec![v.to_string()])
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut patterns = Vec::new();
        while let Some(TextList(part)) = seq.next_element()? {
            patterns.extend(part);
        }
        Ok(patterns)
    }
}

fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    TextList::deserialize(deserializer).map(|list| list.0)
}

impl HarnessConfig {
    pub fn validate(&self) -> HarnessResult<()> {
        self.protocol.validate()?;
        if self.sweep.sizes.iter().any(|&s| s == 0) {
            return Err(HarnessError::ConfigInvalid("sweep.sizes must not contain 0".into()));
        }
        Ok(())
    }
}

// =================================================================
// التحميل (Loading)
// =================================================================

/// مسار صريح = ملف إلزامي. بدون مسار = `config/harness.toml` إن وجد.
pub fn load_config(path: Option<&Path>) -> HarnessResult<HarnessConfig> {
    load_layers(path, env_source())
}

/// طبقة البيئة. القوائم مفصولة بفواصل: `HASHEQ_SWEEP__SIZES=100,1000`
fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("sweep.sizes")
        .with_list_parse_key("sweep.include")
}

fn load_layers(path: Option<&Path>, env: Environment) -> HarnessResult<HarnessConfig> {
    let file_source = match path {
        Some(p) => File::from(p).format(FileFormat::Toml).required(true),
        None => File::from(Path::new(DEFAULT_CONFIG_PATH))
            .format(FileFormat::Toml)
            .required(false),
    };

    let settings = Config::builder()
        .add_source(file_source)
        .add_source(env)
        .build()
        .map_err(|e| HarnessError::ConfigInvalid(format!("Build Error: {}", e)))?;

    let config = settings
        .try_deserialize::<HarnessConfig>()
        .map_err(|e| HarnessError::ConfigInvalid(format!("Parse Error: {}", e)))?;

    config.validate()?;
    debug!("CONFIG: Harness configuration loaded (source: {:?}).", source_label(path));
    Ok(config)
}

/// مصدر الملف كما يظهر في السجل
pub fn source_label(path: Option<&Path>) -> &Path {
    path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{ForkMode, TimeUnit};
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_toml(
            r#"
            [protocol]
            forks = 1
            fork_mode = "in_process"
            time_unit = "microseconds"

            [sweep]
            sizes = [10, 20]
            "#,
        );
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.protocol.forks, 1);
        assert_eq!(config.protocol.fork_mode, ForkMode::InProcess);
        assert_eq!(config.protocol.time_unit, TimeUnit::Microseconds);
        assert_eq!(config.protocol.warmup_iterations, 5);
        assert_eq!(config.sweep.sizes, vec![10, 20]);
        assert!(config.sweep.include.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = write_toml("[protocol]\nforks = 0\n");
        assert!(matches!(
            load_config(Some(file.path())),
            Err(HarnessError::ConfigInvalid(_))
        ));

        let file = write_toml("[sweep]\nsizes = [100, 0]\n");
        assert!(load_config(Some(file.path())).is_err());
    }

    fn env_map(pairs: &[(&str, &str)]) -> Environment {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        env_source().source(Some(vars))
    }

    #[test]
    fn test_env_overrides_scalars_and_lists() {
        let file = write_toml("[protocol]\nforks = 3\n\n[sweep]\nsizes = [10, 20]\n");
        let env = env_map(&[
            ("HASHEQ_PROTOCOL__FORKS", "1"),
            ("HASHEQ_PROTOCOL__FORK_MODE", "in_process"),
            ("HASHEQ_SWEEP__SIZES", "100,1000"),
            ("HASHEQ_SWEEP__INCLUDE", "plain.,mapGet"),
        ]);

        let config = load_layers(Some(file.path()), env).unwrap();
        assert_eq!(config.protocol.forks, 1);
        assert_eq!(config.protocol.fork_mode, ForkMode::InProcess);
        assert_eq!(config.sweep.sizes, vec![100, 1_000]);
        assert_eq!(config.sweep.include, vec!["plain.".to_string(), "mapGet".to_string()]);
    }

    #[test]
    fn test_env_single_size_is_a_list() {
        let env = env_map(&[("HASHEQ_SWEEP__SIZES", "100")]);
        let config = load_layers(Some(write_toml("").path()), env).unwrap();
        assert_eq!(config.sweep.sizes, vec![100]);
    }

    #[test]
    fn test_env_invalid_value_is_rejected() {
        let env = env_map(&[("HASHEQ_PROTOCOL__BATCH_SIZE", "0")]);
        let result = load_layers(Some(write_toml("").path()), env);
        assert!(matches!(result, Err(HarnessError::ConfigInvalid(_))));
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let result = load_config(Some(Path::new("/nonexistent/harness.toml")));
        assert!(matches!(result, Err(HarnessError::ConfigInvalid(_))));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = HarnessConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sweep.sizes, vec![100, 1_000, 10_000]);
    }
}
