use anyhow::Result;
use clap::Parser;
use migverify::cli::commands::dump::{DumpCommand, DumpCommandHandler};
use migverify::cli::commands::verify::{VerifyCommand, VerifyCommandHandler};
use migverify::cli::{Cli, Commands};
use std::env;
use std::process;

fn main() {
    // CLIをパースして実行
    let cli = Cli::parse();

    // 非同期ランタイムを作成して実行
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    let result = runtime.block_on(run_command(cli));

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// コマンドを実行する
async fn run_command(cli: Cli) -> Result<String> {
    // プロジェクトのルートパスを取得
    let project_path = env::current_dir()?;

    match cli.command {
        Commands::Verify {
            dsn,
            database,
            migrations_dir,
            dump_file,
            runner,
            odbc_ini,
            json,
        } => {
            let handler = VerifyCommandHandler::new();
            let command = VerifyCommand {
                project_path,
                dsn,
                database,
                migrations_dir,
                dump_file,
                runner,
                odbc_ini,
                json,
            };
            handler.execute(&command).await
        }

        Commands::Dump {
            database,
            dump_file,
        } => {
            let handler = DumpCommandHandler::new();
            let command = DumpCommand {
                project_path,
                database,
                dump_file,
            };
            handler.execute(&command).await
        }
    }
}
