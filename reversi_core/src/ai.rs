/// 合法手から一様ランダムに1手選ぶ。
pub mod random;
pub mod types;
