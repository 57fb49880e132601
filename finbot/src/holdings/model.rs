use finbot_ui_tree::TreeNode;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of entry in the holdings tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum HoldingKind {
    Portfolio,
    Account,
    #[default]
    Holding,
}

/// Node of the holdings tree: a portfolio, an account, or a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct HoldingNode {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) kind: HoldingKind,
    #[serde(default)]
    pub(crate) value: f64,
    #[serde(
        default,
        deserialize_with = "lenient_children",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub(crate) children: Vec<HoldingNode>,
}

impl TreeNode for HoldingNode {
    fn children(&self) -> Option<&[Self]> {
        Some(self.children.as_slice())
    }
}

/// Holdings snapshot as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct HoldingsFile {
    #[serde(default = "default_version")]
    pub(crate) version: u32,
    #[serde(default)]
    pub(crate) root: Option<HoldingNode>,
}

fn default_version() -> u32 {
    1
}

/// Accept only arrays as child collections; anything else is a leaf.
fn lenient_children<'de, D>(
    deserializer: D,
) -> Result<Vec<HoldingNode>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(de::Error::custom))
            .collect(),
        other => {
            log::debug!("non-array children treated as leaf: {other}");
            Ok(Vec::new())
        },
    }
}
