use log::error;
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// フロントエンドへ返す値をシリアライズする。失敗した場合は null を返してログに残す。
/// マップは `Map` ではなく通常のオブジェクトとして返す。
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    match value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
        Ok(v) => v,
        Err(err) => {
            error!("Failed to serialize result: {:?}", err);
            JsValue::NULL
        }
    }
}
