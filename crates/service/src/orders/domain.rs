use serde::Serialize;

use models::{client, order, product};

/// An order together with its referenced product and client rows.
///
/// Every read path returns this shape; attaching the relations is a fixed
/// policy of the repository, not a caller option. The options are only empty
/// if a referenced row disappeared between the order query and the relation
/// load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    #[serde(flatten)]
    pub order: order::Model,
    pub product: Option<product::Model>,
    pub client: Option<client::Model>,
}
