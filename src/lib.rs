//! Shoplist binary support.
//!
//! 启动装配：配置加载、日志初始化、依赖注入与命令执行。

pub mod bootstrap;
pub mod cli;
