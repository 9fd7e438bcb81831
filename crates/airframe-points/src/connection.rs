//! Point-to-point connections joined by hulls.

use serde::{Deserialize, Serialize};

/// A request to join two points by id.
///
/// Serialized as a two-element array, `["C11", "C21"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[String; 2]", into = "[String; 2]")]
pub struct Connection {
    /// Id of the first endpoint.
    pub from_id: String,
    /// Id of the second endpoint.
    pub to_id: String,
}

impl Connection {
    /// Create a connection between two point ids.
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
        }
    }
}

impl From<[String; 2]> for Connection {
    fn from([from_id, to_id]: [String; 2]) -> Self {
        Self { from_id, to_id }
    }
}

impl From<Connection> for [String; 2] {
    fn from(c: Connection) -> Self {
        [c.from_id, c.to_id]
    }
}

/// Ordered list of connections handed to the geometry builder.
///
/// Ids are resolved against a point set only when geometry is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionTable {
    connections: Vec<Connection>,
}

impl ConnectionTable {
    /// Create a table from connections.
    pub fn new(connections: Vec<Connection>) -> Self {
        Self { connections }
    }

    /// A table with no connections.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Build a table from `(from, to)` id pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(from, to)| Connection::new(from, to))
                .collect(),
        )
    }

    /// Iterate over connections in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Connection> {
        self.connections.iter()
    }

    /// Number of connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Check if the table has no connections.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

/// The compiled-in fuselage frame connections.
impl Default for ConnectionTable {
    fn default() -> Self {
        Self::from_pairs([("C11", "C21"), ("C21", "C31")])
    }
}

impl<'a> IntoIterator for &'a ConnectionTable {
    type Item = &'a Connection;
    type IntoIter = std::slice::Iter<'a, Connection>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let table = ConnectionTable::default();
        assert_eq!(table.len(), 2);
        let ids: Vec<_> = table
            .iter()
            .map(|c| (c.from_id.as_str(), c.to_id.as_str()))
            .collect();
        assert_eq!(ids, vec![("C11", "C21"), ("C21", "C31")]);
    }

    #[test]
    fn serializes_as_pairs() {
        let table = ConnectionTable::from_pairs([("A", "B")]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[["A","B"]]"#);

        let restored: ConnectionTable = serde_json::from_str(r#"[["A","B"],["B","C"]]"#).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.iter().nth(1), Some(&Connection::new("B", "C")));
    }
}
