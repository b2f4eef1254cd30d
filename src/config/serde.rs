use serde::Deserialize;
use serde_with::DeserializeAs;

use crate::options::AutoDismiss;

/// Reads an [`AutoDismiss`] from integer milliseconds (non-positive means
/// never), a humantime string such as `"2s"`, or `"never"`.
pub(super) struct DismissAfter;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDismiss {
    Millis(i64),
    Text(String),
}

impl<'de> DeserializeAs<'de, AutoDismiss> for DismissAfter {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<AutoDismiss, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match RawDismiss::deserialize(deserializer)? {
            RawDismiss::Millis(ms) => Ok(AutoDismiss::from_millis(ms)),
            RawDismiss::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}
