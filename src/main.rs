use clap::Parser;

use lsb_conceal::{cli::Cli, handler::dispatch};

/// 程序的主入口点
///
/// 初始化日志后解析命令行参数，并根据 `--encode` 或 `--decode`
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 解析命令行参数
    let cli = Cli::parse();

    dispatch(cli)
}
