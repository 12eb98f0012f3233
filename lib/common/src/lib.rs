/**
 * 详细中文注释 - 公共工具库（common）
 *
 * 目标
 * - 提供可复用的数值工具，供引擎与命令行程序调用
 * - math_utils：加法函数及其溢出策略（回绕、饱和、检查）
 *
 * 使用注意
 * - 默认的 add 对整数采用回绕语义，对浮点数采用 IEEE-754 语义
 * - 需要发现溢出时使用 checked_add 或 OverflowPolicy::Checked
 */
pub mod math_utils;

pub use math_utils::{add, add_with, checked_add, saturating_add, MathError, Number, OverflowPolicy};
