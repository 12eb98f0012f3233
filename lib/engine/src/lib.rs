/**
 * 详细中文注释 - 计算引擎库入口
 *
 * 说明
 * - 暴露两个子模块：constant, engine
 * - engine 逐行读取命令（info / isready / policy / add / selftest / quit），
 *   调用 common::math_utils 计算并把结果写回输出流
 */
pub mod constant;
pub mod engine;
