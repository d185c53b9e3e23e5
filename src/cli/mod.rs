// CLIレイヤー
// コマンドライン引数の定義とコマンドルーティング

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// migverify - マイグレーション適用検証ハーネス
#[derive(Parser, Debug)]
#[command(
    name = "migverify",
    version,
    about = "Verifies that a schema migration tool applied SQL migrations correctly"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full verification pipeline (reset, apply, status, reconcile)
    Verify {
        /// DSN name the external migration tool connects through
        #[arg(long)]
        dsn: Option<String>,

        /// Target SQLite database file
        #[arg(long)]
        database: Option<PathBuf>,

        /// Directory containing the migration files
        #[arg(long)]
        migrations_dir: Option<PathBuf>,

        /// Path of the schema dump artifact
        #[arg(long)]
        dump_file: Option<PathBuf>,

        /// Migration tool command, whitespace-separated (e.g. "cargo run --quiet --")
        #[arg(long)]
        runner: Option<String>,

        /// Named-connection registry file (defaults to ~/.odbc.ini)
        #[arg(long)]
        odbc_ini: Option<PathBuf>,

        /// Print the reconciliation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Capture the schema dump artifact from an existing database (no reset, no apply)
    Dump {
        /// Target SQLite database file
        #[arg(long)]
        database: Option<PathBuf>,

        /// Path of the schema dump artifact
        #[arg(long)]
        dump_file: Option<PathBuf>,
    },
}
