use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gsoc-guide")]
#[command(about = "GSoC組織ディレクトリ・提案書アーカイブ", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ログをJSONで出力
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// HTTPサーバを起動
    Serve {
        /// 待ち受けアドレス（省略時は設定値）
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// 全組織の提案書有無を表示
    Orgs {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 提案書の件数を集計
    Summary,

    /// 組織の提案書一覧を表示
    Proposals {
        /// 組織名（大文字小文字は任意）
        #[arg(required = true)]
        org: String,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 組織名から実際のフォルダ名を解決
    Resolve {
        /// 組織名
        #[arg(required = true)]
        org: String,

        /// リモートの表記ゆれインデックスも使う
        #[arg(long)]
        with_index: bool,
    },

    /// 設定を表示/編集
    Config {
        /// GitHubトークンを設定
        #[arg(long)]
        set_token: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
