use super::{ModelError, PricePredictor};
use crate::domain::features::FeatureRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A node of a flat, array-backed regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go to `left` when `row[feature] < threshold`, otherwise `right`.
    Split {
        feature: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

/// Additive ensemble of regression trees (boosted-forest style):
/// `price = base_score + Σ leaf(tree, row)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

impl Tree {
    /// Children must point strictly forward so traversal always terminates.
    fn validate(&self, index: usize) -> Result<(), ModelError> {
        let malformed = |reason: String| ModelError::MalformedTree {
            tree: index,
            reason,
        };

        if self.nodes.is_empty() {
            return Err(malformed("tree has no nodes".into()));
        }

        for (id, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split { left, right, .. } = node {
                for child in [*left, *right] {
                    if child <= id || child >= self.nodes.len() {
                        return Err(malformed(format!(
                            "node {id} has invalid child index {child}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn leaf_value(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row
                        .get(feature)
                        .ok_or_else(|| ModelError::MissingFeature(feature.clone()))?;
                    id = if value < *threshold { *left } else { *right };
                }
            }
        }
    }
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<(), ModelError> {
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.validate(i))
    }

    pub fn feature_names(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self
            .trees
            .iter()
            .flat_map(|t| t.nodes.iter())
            .filter_map(|n| match n {
                TreeNode::Split { feature, .. } => Some(feature),
                TreeNode::Leaf { .. } => None,
            })
            .collect();
        names.into_iter().cloned().collect()
    }
}

impl PricePredictor for TreeEnsemble {
    type Error = ModelError;

    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        self.trees
            .iter()
            .try_fold(self.base_score, |acc, tree| Ok(acc + tree.leaf_value(row)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceModel;

    const ENSEMBLE: &str = r#"{
        "kind": "tree_ensemble",
        "base_score": 150000.0,
        "trees": [
            {"nodes": [
                {"feature": "GoodLivArea", "threshold": 1800.0, "left": 1, "right": 2},
                {"value": -10000.0},
                {"value": 25000.0}
            ]},
            {"nodes": [
                {"feature": "HasPool", "threshold": 0.5, "left": 1, "right": 2},
                {"value": 0.0},
                {"value": 12000.0}
            ]}
        ]
    }"#;

    fn row(area: f64, pool: f64) -> FeatureRow {
        [
            ("GoodLivArea".to_string(), area),
            ("HasPool".to_string(), pool),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn sums_leaves_over_trees() {
        let model = PriceModel::from_json(ENSEMBLE).unwrap();

        assert_eq!(model.predict(&row(1500.0, 0.0)).unwrap(), 140_000.0);
        assert_eq!(model.predict(&row(2000.0, 1.0)).unwrap(), 187_000.0);
        // threshold itself goes right
        assert_eq!(model.predict(&row(1800.0, 0.0)).unwrap(), 175_000.0);
    }

    #[test]
    fn lists_split_features() {
        let model = PriceModel::from_json(ENSEMBLE).unwrap();
        assert_eq!(
            model.feature_names(),
            vec!["GoodLivArea".to_string(), "HasPool".to_string()]
        );
    }

    #[test]
    fn backward_child_is_rejected_on_load() {
        let json = r#"{"kind": "tree_ensemble", "trees": [{"nodes": [
            {"feature": "GoodLivArea", "threshold": 1.0, "left": 0, "right": 1},
            {"value": 1.0}
        ]}]}"#;

        match PriceModel::from_json(json) {
            Err(ModelError::MalformedTree { tree, .. }) => assert_eq!(tree, 0),
            other => panic!("expected MalformedTree, got {other:?}"),
        }
    }

    #[test]
    fn missing_split_feature_propagates() {
        let model = PriceModel::from_json(ENSEMBLE).unwrap();
        let mut partial = FeatureRow::new();
        partial.set("GoodLivArea", 1000.0);

        assert!(matches!(
            model.predict(&partial),
            Err(ModelError::MissingFeature(f)) if f == "HasPool"
        ));
    }
}
