//! ISS 位置轮询进程：启动时在 Tile38 中注册 enter 围栏，之后定时拉取 ISS
//! 当前位置并写入 `earth-orbit/iss` 点位。

mod cli;
mod tracker;

use clap::Parser;
use cli::Cli;
use orbit_telemetry::init_tracing;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // -h 由 clap 直接输出到 stdout 并以 0 退出
    let cli = Cli::parse();
    if cli.version {
        println!("{}", cli::version_line());
        return ExitCode::SUCCESS;
    }
    // 初始化结构化日志
    init_tracing();

    match tracker::run(cli.into_input()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
