use anyhow::Context;
use common::OverflowPolicy;
use engine::engine::CalcEngine;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

const POLICY_ENV: &str = "MATH_UTILS_POLICY";

fn main() -> anyhow::Result<()> {
    install_tracing();
    let policy = parse_policy(std::env::var(POLICY_ENV).ok())?;
    info!(%policy, "initial overflow policy");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    CalcEngine::new(policy).start(stdin.lock(), &mut stdout)?;
    Ok(())
}

// 日志写到 stderr，stdout 只输出命令结果
fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Policy named by `MATH_UTILS_POLICY`, `wrap` when it is unset.
fn parse_policy(value: Option<String>) -> anyhow::Result<OverflowPolicy> {
    match value {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid {POLICY_ENV}")),
        None => Ok(OverflowPolicy::default()),
    }
}
