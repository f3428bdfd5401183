//! コンソール初期化（Windows で出力を UTF-8 にする）
//!
//! 最初の出力より前に一度だけ呼ぶ。冪等で、teardown は不要（プロセス終了で回収）。

use std::sync::Once;

static INIT: Once = Once::new();

#[cfg(windows)]
const CP_UTF8: u32 = 65001;

/// コンソールを一度だけ初期化する（2 回目以降は何もしない）
pub fn init() {
    INIT.call_once(|| {
        #[cfg(windows)]
        unsafe {
            use windows_sys::Win32::System::Console::{SetConsoleCP, SetConsoleOutputCP};
            // 失敗してもプローブは続行する（コンソールなしのリダイレクト実行等）
            let _ = SetConsoleOutputCP(CP_UTF8);
            let _ = SetConsoleCP(CP_UTF8);
        }
    });
}
