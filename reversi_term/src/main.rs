//! 端末で動作する最小 UI。
//!
//! 標準入力から `列 行` を読み、ソロモードではランダムボットが遅れて応じる。

mod view;

use core::time::Duration;
use reversi_core::engine;
use reversi_core::session::{Config, Mode, RunState, Session, SessionError};
use std::io::{self, BufRead as _, Write as _};
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use view::TerminalView;

/// 使い方。
const USAGE: &str = "\
usage: reversi_term [--mode solo|multi] [--side black|white] [--delay-ms N] [--seed N] [--log-json]

commands while playing:
  <column> <row>   place a disc (0..=7 each)
  start | pause    resume or pause the match
  reset            start over (paused)
  mode solo|multi  switch the opponent
  quit             leave";

/// コマンドライン引数から得た設定。
#[derive(Debug)]
struct Options {
    /// 対局設定。
    config: Config,
    /// ログを JSON で出すか。
    log_json: bool,
    /// ボットの乱数 seed。
    seed: u64,
}

fn parse_side(text: &str) -> Result<engine::Side, String> {
    match text {
        "black" | "b" => Ok(engine::Side::Black),
        "white" | "w" => Ok(engine::Side::White),
        other => Err(format!("unknown side: {other}")),
    }
}

fn parse_mode(text: &str) -> Result<Mode, String> {
    match text {
        "solo" => Ok(Mode::Solo),
        "multi" => Ok(Mode::Multi),
        other => Err(format!("unknown mode: {other}")),
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config: Config::default(),
        log_json: false,
        seed: u64::from(std::process::id()),
    };

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--mode" => options.config = options.config.with_mode(parse_mode(value()?)?),
            "--side" => options.config = options.config.with_solo_side(parse_side(value()?)?),
            "--delay-ms" => {
                let millis: u64 = value()?.parse().map_err(|err| format!("--delay-ms: {err}"))?;
                options.config = options.config.with_bot_delay(Duration::from_millis(millis));
            }
            "--seed" => options.seed = value()?.parse().map_err(|err| format!("--seed: {err}"))?,
            "--log-json" => options.log_json = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(options)
}

/// `RUST_LOG` を尊重しつつ、標準エラーへログを出す subscriber を設定する。
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

type App = Session<TerminalView>;

fn draw(app: &mut App) {
    let show_hints = app.is_human_turn();
    match app.listener_mut().render(show_hints) {
        Ok(text) => println!("{text}"),
        Err(err) => warn!(%err, "failed to render the board"),
    }
}

/// ボットの予約が発火するまで待ち、発火したら描画する。人間の手番に戻るまで繰り返す。
fn drive_bot(app: &mut App) {
    while app.run_state() == RunState::Playing {
        let Some(wait) = app.time_until_bot_move(Instant::now()) else {
            return;
        };
        std::thread::sleep(wait);
        if let Some(square) = app.tick(Instant::now()) {
            println!("bot plays {square}");
            draw(app);
        }
    }
}

/// 1行ぶんの入力を処理する。終了するなら `false`。
fn handle_command(app: &mut App, line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    let now = Instant::now();
    match words.as_slice() {
        [] => {}
        ["quit" | "exit"] => return false,
        ["help"] => println!("{USAGE}"),
        ["start"] => app.start(now),
        ["pause"] => app.pause(),
        ["reset"] => {
            app.reset();
            println!("match reset; type `start` to play");
        }
        ["mode", mode] => match parse_mode(mode) {
            Ok(value) => app.set_mode(value, now),
            Err(err) => println!("{err}"),
        },
        [column, row] => {
            let coords = column.parse::<u8>().ok().zip(row.parse::<u8>().ok());
            let Some((col, rank)) = coords else {
                println!("expected two numbers, got `{line}`");
                return true;
            };
            match app.human_move(col, rank, now) {
                Ok(_) => {}
                Err(SessionError::NotPlaying) => println!("paused; type `start` to play"),
                Err(err) => println!("rejected: {err}"),
            }
        }
        _ => println!("unknown command, type `help`"),
    }

    draw(app);
    true
}

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    let options = parse_args(&args)?;
    init_tracing(options.log_json);
    info!(config = ?options.config, seed = options.seed, "starting");

    let mut app = App::with_seed(options.config, TerminalView::new(), options.seed);
    app.start(Instant::now());
    draw(&mut app);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        drive_bot(&mut app);

        print!("> ");
        io::stdout().flush().map_err(|err| err.to_string())?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(|err| err.to_string())?;
        debug!(input = %line.trim(), "command");
        if !handle_command(&mut app, &line) {
            break;
        }
    }

    Ok(())
}
