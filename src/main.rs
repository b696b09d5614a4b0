/*
 * HASHEQ BENCH - SYSTEM ENTRY POINT
 * =================================================================
 * Component: src/main.rs
 * Responsibility: تشغيل المسح الكامل، أو تنفيذ نسخة قياس واحدة عند الاستدعاء كعملية فرعية.
 * Status: PRODUCTION (Measurement Grade)
 * =================================================================
 */

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::{error, info, warn};

use hasheq_bench::hardware::HostInfo;
use hasheq_bench::harness::{execute_fork_task, ForkTask};
use hasheq_bench::report::RunReport;
use hasheq_bench::utils::config_loader::source_label;
use hasheq_bench::utils::logger::fork_child_logging;
use hasheq_bench::{init_logger, load_config, Harness, SweepPlan};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "hasheq_core")]
#[command(about = "Equality, hashing and lookup micro-benchmarks across record authoring styles")]
#[command(version)]
struct Args {
    /// ملف إعدادات TOML (الافتراضي: config/harness.toml إن وجد)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// نمط جزئي لمعرف المقياس، مثل `plain.` أو `mapGet` (قابل للتكرار)
    #[arg(long, value_name = "PATTERN")]
    include: Vec<String>,

    /// حجم المجموعة (قابل للتكرار، يستبدل قائمة الإعدادات)
    #[arg(long = "size", value_name = "N")]
    sizes: Vec<usize>,

    /// كتابة التقرير بصيغة JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// داخلي: تنفيذ نسخة واحدة وكتابة النتيجة على stdout
    #[arg(long = "fork-task", value_name = "JSON", hide = true)]
    fork_task: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // أ. مسار العملية الفرعية: سطر نتيجة واحد على stdout ولا شيء غيره
    if let Some(payload) = args.fork_task.as_deref() {
        return match run_fork_child(payload) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("FORK: Child failed: {:#}", e);
                eprintln!("hasheq_core fork child failed: {:#}", e);
                ExitCode::FAILURE
            }
        };
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ HASHEQ: Run aborted: {:#}", e);
            eprintln!("hasheq_core: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_fork_child(payload: &str) -> anyhow::Result<()> {
    let _guard = init_logger(&fork_child_logging())?;
    let task: ForkTask = serde_json::from_str(payload).context("decoding fork task")?;
    let outcome = execute_fork_task(&task)?;
    println!("{}", outcome.to_wire_line()?);
    Ok(())
}

fn run(args: Args) -> anyhow::Result<()> {
    // أ. الإعدادات + تجاوزات سطر الأوامر
    let args_config = args.config;
    let mut config = load_config(args_config.as_deref()).context("loading configuration")?;
    if !args.include.is_empty() {
        config.sweep.include = args.include;
    }
    if !args.sizes.is_empty() {
        config.sweep.sizes = args.sizes;
    }
    if args.json.is_some() {
        config.report.json_path = args.json;
    }

    // ب. الصندوق الأسود (Logging)
    let _guard = init_logger(&config.logging)?;

    info!("🚀 HASHEQ: Benchmark run initiated...");
    info!(
        "CONFIG: Loaded (file: {}, env prefix: HASHEQ_)",
        source_label(args_config.as_deref()).display()
    );
    let host = HostInfo::capture();
    info!("   - Host: {}", host.summary());
    info!(
        "   - Protocol: warmup {}x{}ms, measure {}x{}ms, {} forks ({:?}), batch {}",
        config.protocol.warmup_iterations,
        config.protocol.warmup_time_ms,
        config.protocol.measurement_iterations,
        config.protocol.measurement_time_ms,
        config.protocol.forks,
        config.protocol.fork_mode,
        config.protocol.batch_size
    );
    if cfg!(debug_assertions) {
        warn!("⚠️ Debug build: numbers are not representative. Use --release.");
    }

    // ج. الخطة والمسح
    let plan = SweepPlan::new(&config.sweep.include, &config.sweep.sizes)?;
    let harness = Harness::new(config.protocol.clone())?;

    let started_at = Utc::now();
    let results = harness.sweep(&plan)?;
    let report = RunReport::new(started_at, host, config.protocol, results);

    // د. التقرير
    print!("{}", report.render_table());
    if let Some(path) = &config.report.json_path {
        report
            .write_json(path)
            .with_context(|| format!("writing report to {}", path.display()))?;
    }

    info!("✅ HASHEQ: Run {} complete ({} results).", report.run_id, report.results.len());
    Ok(())
}
