use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::Arrangement;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Which fruit are shown and how they are laid out.
pub struct SceneOptions {
    /// One texture URL per fruit, in layout order.
    #[schemars(skip)]
    pub images: Vec<String>,
    /// Layout of the fruit and the decorations around them.
    #[schemars(skip)]
    pub arrangement: Arrangement,
}
