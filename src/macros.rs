/// Builds a [`ConfMap`](crate::ConfMap) from `key => value` pairs, keeping their order.
///
/// Keys are anything that converts into `String`, values anything that
/// converts into [`Value`](crate::Value).
///
/// # Examples
///
/// ```rust
/// use serde_tellstick::{conf_map, Value};
///
/// let params = conf_map! {
///     "house" => 12,
///     "unit" => 1,
///     "code" => "0000000001",
/// };
///
/// assert_eq!(params.len(), 3);
/// assert_eq!(params.get("house"), Some(&Value::Number(12.0)));
/// ```
#[macro_export]
macro_rules! conf_map {
    () => {
        $crate::ConfMap::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::ConfMap::new();
        $(
            map.insert($key, $crate::Value::from($value));
        )+
        map
    }};
}
