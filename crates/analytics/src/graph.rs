//! User relationship graph with wallet groups as background clusters

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;
use synergos_core::{Dataset, GroupStatus};

pub const TRANSACTED_WITH: &str = "TRANSACTED_WITH";

/// Cluster fill colours, reused in order when there are more groups
const PALETTE: [&str; 6] = [
    "rgba(59, 130, 246, 0.1)",
    "rgba(139, 92, 246, 0.1)",
    "rgba(239, 68, 68, 0.1)",
    "rgba(16, 185, 129, 0.1)",
    "rgba(245, 158, 11, 0.1)",
    "rgba(236, 72, 153, 0.1)",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperties {
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: NodeProperties,
    /// First group listing this user; used for positioning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphRelationship {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCluster {
    pub id: String,
    pub name: String,
    pub color: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub relationships: Vec<GraphRelationship>,
    pub clusters: Vec<GroupCluster>,
}

/// Build the graph: one node per user, one cluster per group, and a link
/// between every pair of users sharing an active group
pub fn graph(dataset: &Dataset) -> GraphData {
    let nodes = dataset
        .users
        .iter()
        .map(|user| GraphNode {
            id: user.id.clone(),
            label: user.full_name(),
            kind: "user".to_string(),
            properties: NodeProperties {
                balance: user.balance,
                phone_number: user.phone_number.clone(),
            },
            group_id: dataset
                .groups
                .iter()
                .find(|g| g.is_member(&user.id))
                .map(|g| g.id.clone()),
        })
        .collect();

    let clusters = dataset
        .groups
        .iter()
        .zip(PALETTE.iter().cycle())
        .map(|(group, color)| GroupCluster {
            id: group.id.clone(),
            name: group.name.clone(),
            color: color.to_string(),
            members: group.members.clone(),
        })
        .collect();

    let mut seen: BTreeSet<(String, String)> = BTreeSet::new();
    let mut relationships = Vec::new();
    for group in dataset.groups.iter().filter(|g| g.status == GroupStatus::Active) {
        for (i, source) in group.members.iter().enumerate() {
            for target in &group.members[i + 1..] {
                let key = if source < target {
                    (source.clone(), target.clone())
                } else {
                    (target.clone(), source.clone())
                };
                if seen.insert(key) {
                    relationships.push(GraphRelationship {
                        source: source.clone(),
                        target: target.clone(),
                        kind: TRANSACTED_WITH.to_string(),
                    });
                }
            }
        }
    }

    GraphData {
        nodes,
        relationships,
        clusters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_members_linked_once() {
        let data = graph(&Dataset::demo());

        let mut pairs = BTreeSet::new();
        for rel in &data.relationships {
            assert_ne!(rel.source, rel.target);
            let key = if rel.source < rel.target {
                (rel.source.clone(), rel.target.clone())
            } else {
                (rel.target.clone(), rel.source.clone())
            };
            assert!(pairs.insert(key), "duplicate link {rel:?}");
        }
    }

    #[test]
    fn test_palette_cycles() {
        let mut dataset = Dataset::demo();
        let template = dataset.groups[0].clone();
        for n in 0..PALETTE.len() {
            let mut group = template.clone();
            group.id = format!("extra{n}");
            dataset.groups.push(group);
        }

        let data = graph(&dataset);
        let len = PALETTE.len();
        assert_eq!(data.clusters[0].color, data.clusters[len].color);
    }
}
