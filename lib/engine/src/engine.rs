/* 计算引擎：对接命令输入与 math_utils，提供逐行命令接口 */
use crate::constant::{ADD_COMMAND, NAME, SELF_TEST_PASSED, VERSION};
use anyhow::{anyhow, bail, Context};
use common::{add, add_with, Number, OverflowPolicy};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Numeric type an `add` command is evaluated in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    I8,
    I16,
    I32,
    #[default]
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
}

impl FromStr for NumberKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "i8" => NumberKind::I8,
            "i16" => NumberKind::I16,
            "i32" => NumberKind::I32,
            "i64" => NumberKind::I64,
            "i128" => NumberKind::I128,
            "isize" => NumberKind::Isize,
            "u8" => NumberKind::U8,
            "u16" => NumberKind::U16,
            "u32" => NumberKind::U32,
            "u64" => NumberKind::U64,
            "u128" => NumberKind::U128,
            "usize" => NumberKind::Usize,
            "f32" => NumberKind::F32,
            "f64" => NumberKind::F64,
            _ => bail!("unknown number type `{s}`"),
        })
    }
}

// 解析两个操作数并按策略相加
fn sum<T>(policy: OverflowPolicy, lhs: &str, rhs: &str) -> anyhow::Result<String>
where
    T: Number + FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let a: T = lhs
        .parse()
        .with_context(|| format!("invalid {} operand `{lhs}`", T::NAME))?;
    let b: T = rhs
        .parse()
        .with_context(|| format!("invalid {} operand `{rhs}`", T::NAME))?;
    Ok(add_with(policy, a, b)?.to_string())
}

pub struct CalcEngine {
    pub policy: OverflowPolicy,
}

impl CalcEngine {
    pub fn new(policy: OverflowPolicy) -> Self {
        CalcEngine { policy }
    }

    /// Reads commands from `input` until `quit` or end of input, writing every
    /// reply to `output`.
    ///
    /// Bad operands and checked overflow are reported as `error ...` lines and
    /// the loop goes on. A failing `selftest` or an I/O error ends the loop with
    /// `Err`.
    pub fn start<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> anyhow::Result<()> {
        info!(policy = %self.policy, "engine started");
        for line in input.lines() {
            let line = line.context("failed to read command")?;
            let cmd = line.trim();
            if cmd.is_empty() {
                continue;
            }
            if cmd == "quit" {
                Self::quit(output)?;
                return Ok(());
            }
            self.execute(cmd, output)?;
        }
        info!("input closed");
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, cmd: &str, output: &mut W) -> anyhow::Result<()> {
        debug!(cmd, "execute");
        let mut token = cmd.splitn(2, ' ');
        let name = token.next().unwrap_or_default();
        let param = token.next().unwrap_or_default().trim();
        match name {
            "info" => self.info(output)?,
            "isready" => writeln!(output, "readyok")?,
            "policy" => self.policy(param, output)?,
            "add" => match self.add(param) {
                Ok(value) => writeln!(output, "result {value}")?,
                Err(err) => {
                    warn!(cmd, "{err:#}");
                    writeln!(output, "error {err:#}")?;
                }
            },
            "selftest" => self.self_test(output)?,
            _ => writeln!(output, "not support")?,
        }
        Ok(())
    }

    pub fn info<W: Write>(&self, output: &mut W) -> anyhow::Result<()> {
        writeln!(output, "id name {NAME} {VERSION}")?;
        writeln!(output, "option policy {}", self.policy)?;
        writeln!(output, "infook")?;
        Ok(())
    }

    // 无参数时只回显当前策略
    pub fn policy<W: Write>(&mut self, param: &str, output: &mut W) -> anyhow::Result<()> {
        if !param.is_empty() {
            match param.parse() {
                Ok(policy) => {
                    info!(%policy, "overflow policy changed");
                    self.policy = policy;
                }
                Err(err) => {
                    warn!("{err}");
                    writeln!(output, "error {err}")?;
                    return Ok(());
                }
            }
        }
        writeln!(output, "policy {}", self.policy)?;
        Ok(())
    }

    /// Evaluates the parameters of an `add` command, e.g. `u8 200 100`.
    pub fn add(&self, param: &str) -> anyhow::Result<String> {
        let captures = ADD_COMMAND
            .captures(param)
            .ok_or_else(|| anyhow!("usage: add [<type>] <a> <b>"))?;
        let kind = match captures.name("ty") {
            Some(ty) => ty.as_str().parse()?,
            None => NumberKind::default(),
        };
        let lhs = &captures["lhs"];
        let rhs = &captures["rhs"];
        // `add i8 1`：类型后只跟了一个操作数
        if captures.name("ty").is_none() && lhs.parse::<NumberKind>().is_ok() {
            bail!("usage: add [<type>] <a> <b>");
        }
        let policy = self.policy;

        match kind {
            NumberKind::I8 => sum::<i8>(policy, lhs, rhs),
            NumberKind::I16 => sum::<i16>(policy, lhs, rhs),
            NumberKind::I32 => sum::<i32>(policy, lhs, rhs),
            NumberKind::I64 => sum::<i64>(policy, lhs, rhs),
            NumberKind::I128 => sum::<i128>(policy, lhs, rhs),
            NumberKind::Isize => sum::<isize>(policy, lhs, rhs),
            NumberKind::U8 => sum::<u8>(policy, lhs, rhs),
            NumberKind::U16 => sum::<u16>(policy, lhs, rhs),
            NumberKind::U32 => sum::<u32>(policy, lhs, rhs),
            NumberKind::U64 => sum::<u64>(policy, lhs, rhs),
            NumberKind::U128 => sum::<u128>(policy, lhs, rhs),
            NumberKind::Usize => sum::<usize>(policy, lhs, rhs),
            NumberKind::F32 => sum::<f32>(policy, lhs, rhs),
            NumberKind::F64 => sum::<f64>(policy, lhs, rhs),
        }
    }

    pub fn self_test<W: Write>(&self, output: &mut W) -> anyhow::Result<()> {
        let result = add(2, 3);
        if result != 5 {
            bail!("add(2, 3) returned {result}, expected 5");
        }
        writeln!(output, "{SELF_TEST_PASSED}")?;
        Ok(())
    }

    pub fn quit<W: Write>(output: &mut W) -> anyhow::Result<()> {
        writeln!(output, "bye")?;
        Ok(())
    }
}
