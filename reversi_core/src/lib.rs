//! Reversi (Othello) rule engine.
//!
//! このクレートは盤面・合法手判定・手番進行を行う `engine`、手を選択する `ai`、
//! 対局モードとボットの遅延着手を扱う `session` を提供します。
//! 描画側（`reversi_term` など）から利用されることを想定しています。

#![forbid(unsafe_code)]

/// ゲームルール・盤面・進行を提供するモジュール。
pub mod engine;

/// 手選択アルゴリズムを提供するモジュール。
pub mod ai;

/// ソロ/マルチ対局の進行とボットの遅延着手を提供するモジュール。
pub mod session;
