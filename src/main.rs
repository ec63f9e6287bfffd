mod canvas;
mod logging;
mod models;
mod render;
mod scene;

use std::fs::File;

use clap::{Arg, Command};

use logging::{LogConfig, LogOutput, init_logging, level_for_verbosity};
use render::RenderEngine;
use scene::SceneConfig;

fn main() {
    // コマンドライン引数の解析
    let command = Command::new("scenevis")
        .version("0.1.0")
        .about("監視シーン可視化ツール (Scene Visualizer)")
        .long_about(
            "ロボット・監視シーンの記述ファイルを読み込み、\n\
             境界・移動ターゲット・移動障害物・固定カメラを\n\
             真上から見た静的なSVG画像として描画します。",
        )
        .arg(
            Arg::new("scene")
                .short('s')
                .long("scene")
                .value_name("FILE")
                .required(true)
                .help("シーン記述ファイルのパスを指定"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .required(true)
                .help("出力SVGファイルのパスを指定"),
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .action(clap::ArgAction::SetTrue)
                .help("シーンの情報のみ表示して終了"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::Count)
                .help("詳細出力レベル (-v: 基本, -vv: 詳細)"),
        )
        .arg(
            Arg::new("log-output")
                .long("log-output")
                .value_name("DEST")
                .default_value("console")
                .help("ログ出力先 (console, file, both)"),
        );

    // ヘルプ表示・必須オプション欠落はいずれも非ゼロ終了
    let matches = match command.try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let verbose_level = matches.get_count("verbose");

    // ログシステムの初期化
    let log_output = matches
        .get_one::<String>("log-output")
        .and_then(|s| s.parse::<LogOutput>().ok())
        .unwrap_or(LogOutput::Console);
    let log_config = LogConfig {
        level: level_for_verbosity(verbose_level),
        output: log_output,
        ..LogConfig::default()
    };
    if let Err(e) = init_logging(log_config) {
        eprintln!("警告: ログ初期化に失敗しました: {}", e);
    }

    if let (Some(scene_path), Some(output_path)) = (
        matches.get_one::<String>("scene"),
        matches.get_one::<String>("output"),
    ) {
        match run_render(
            scene_path,
            output_path,
            matches.get_flag("info"),
            verbose_level,
        ) {
            Ok(_) => {
                if verbose_level > 0 {
                    println!("描画が正常に完了しました。");
                }
            }
            Err(e) => {
                eprintln!("エラー: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// シーン記述ファイルを読み込んで描画を実行
fn run_render(
    scene_path: &str,
    output_path: &str,
    info_only: bool,
    verbose_level: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    // シーン記述の読み込み
    let config = SceneConfig::from_file(scene_path)?;

    if verbose_level > 0 {
        println!("シーン記述ファイル読み込み完了: {}", scene_path);
    }

    // 情報表示のみの場合
    if info_only {
        config.print_summary();
        return Ok(());
    }

    // 出力リソースはシーンモデル構築の前に確保する。構築に失敗した
    // 場合も空の出力ファイルはDropで解放される（内容は無効）。
    let out = File::create(output_path)?;

    let mut engine = RenderEngine::new(config, out, verbose_level);
    engine.initialize()?;
    engine.run()?;

    if verbose_level > 0 {
        println!("出力ファイル書き込み完了: {}", output_path);
    }

    Ok(())
}
