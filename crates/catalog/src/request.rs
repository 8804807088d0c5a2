//! Commands and queries.
//!
//! Every request is a variant of [`Request`]; its [`Dispatchable::name`] is
//! the only thing the bus looks at when routing it.

use common::{AggregateId, Dispatchable};
use serde::{Deserialize, Serialize};

/// Routing name of [`Command::PurchaseProduct`].
pub const PURCHASE_PRODUCT: &str = "purchase.product";

/// Routing name of [`Query::Products`].
pub const PRODUCTS: &str = "products";

/// Routing name of [`Query::Product`].
pub const PRODUCT: &str = "product";

/// Command to purchase a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseProduct {
    pub id: AggregateId,
}

/// Mutating requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Command {
    PurchaseProduct(PurchaseProduct),
}

impl Command {
    /// Every command name. A command bus must route all of them.
    pub const NAMES: &'static [&'static str] = &[PURCHASE_PRODUCT];
}

impl Dispatchable for Command {
    fn name(&self) -> &'static str {
        match self {
            Command::PurchaseProduct(_) => PURCHASE_PRODUCT,
        }
    }
}

impl From<PurchaseProduct> for Command {
    fn from(cmd: PurchaseProduct) -> Self {
        Command::PurchaseProduct(cmd)
    }
}

/// Read-only requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Query {
    /// Every product in the catalog.
    Products,
    /// A single product by id.
    Product { id: AggregateId },
}

impl Query {
    /// Every query name. A query bus must route all of them.
    pub const NAMES: &'static [&'static str] = &[PRODUCTS, PRODUCT];
}

impl Dispatchable for Query {
    fn name(&self) -> &'static str {
        match self {
            Query::Products => PRODUCTS,
            Query::Product { .. } => PRODUCT,
        }
    }
}

/// Anything the command/query bus accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Command(Command),
    Query(Query),
}

impl Request {
    /// Returns true for mutating requests.
    pub fn is_command(&self) -> bool {
        matches!(self, Request::Command(_))
    }
}

impl Dispatchable for Request {
    fn name(&self) -> &'static str {
        match self {
            Request::Command(cmd) => cmd.name(),
            Request::Query(query) => query.name(),
        }
    }
}

impl From<Command> for Request {
    fn from(cmd: Command) -> Self {
        Request::Command(cmd)
    }
}

impl From<Query> for Request {
    fn from(query: Query) -> Self {
        Request::Query(query)
    }
}
