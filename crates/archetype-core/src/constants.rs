/// Archetype engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cluster id reserved for the catch-all experimental cluster.
pub const EXPERIMENTAL_CLUSTER_ID: i64 = -1;

/// Name given to the experimental cluster.
pub const EXPERIMENTAL_CLUSTER_NAME: &str = "Experimental";

/// Name given to a cluster with no curated identity.
pub const NEW_CLUSTER_NAME: &str = "NEW";

/// Number of distinct cards in a highlander deck.
pub const HIGHLANDER_DISTINCT_CARDS: usize = 30;
